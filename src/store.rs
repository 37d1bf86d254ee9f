//! Canonical in-memory state, synchronized to durable storage.

use anyhow::Result;
use tracing::debug;

use crate::schema::{Application, Status};
use crate::storage::StorageBackend;

/// Owns the application list for the session.
///
/// `load` runs once; after that every mutation writes the whole list back
/// through the backend. Mutations before the first load never save, so a
/// half-started session cannot clobber durable state with an empty list.
pub struct ApplicationStore<S: StorageBackend> {
    backend: S,
    applications: Vec<Application>,
    is_loaded: bool,
}

impl<S: StorageBackend> ApplicationStore<S> {
    pub fn new(backend: S) -> Self {
        Self {
            backend,
            applications: Vec::new(),
            is_loaded: false,
        }
    }

    /// One-time load from storage. A second call is a no-op.
    pub fn load(&mut self) -> Result<()> {
        if self.is_loaded {
            return Ok(());
        }
        self.applications = self.backend.load()?;
        self.is_loaded = true;
        debug!(count = self.applications.len(), "loaded applications");
        Ok(())
    }

    pub fn is_loaded(&self) -> bool {
        self.is_loaded
    }

    pub fn applications(&self) -> &[Application] {
        &self.applications
    }

    /// Prepend a fully-formed application. The caller supplies the id.
    pub fn add(&mut self, app: Application) -> Result<()> {
        self.applications.insert(0, app);
        self.persist()
    }

    /// Replace the status of the matching application. Unknown ids are a
    /// no-op (the list still persists unchanged).
    pub fn update_status(&mut self, id: &str, status: Status) -> Result<()> {
        if let Some(app) = self.applications.iter_mut().find(|a| a.id == id) {
            app.status = status;
        }
        self.persist()
    }

    /// Remove the matching application. Unknown ids are a no-op.
    pub fn delete(&mut self, id: &str) -> Result<()> {
        self.applications.retain(|a| a.id != id);
        self.persist()
    }

    fn persist(&self) -> Result<()> {
        if !self.is_loaded {
            return Ok(());
        }
        self.backend.save(&self.applications)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    fn app(id: &str, company: &str) -> Application {
        Application {
            id: id.into(),
            company_name: company.into(),
            role: "SWE".into(),
            location: "Remote".into(),
            status: Status::Applied,
            resume_name: "general".into(),
            resume_file: None,
            notes: String::new(),
            job_description: String::new(),
            date_applied: "Aug 30, 2026".into(),
        }
    }

    #[test]
    fn load_pulls_previous_session_state() {
        let backend = MemoryStorage::with_contents(vec![app("1", "Acme")]);
        let mut store = ApplicationStore::new(backend);
        assert!(!store.is_loaded());
        store.load().unwrap();
        assert!(store.is_loaded());
        assert_eq!(store.applications().len(), 1);
    }

    #[test]
    fn add_prepends() {
        let mut store = ApplicationStore::new(MemoryStorage::new());
        store.load().unwrap();
        store.add(app("1", "Acme")).unwrap();
        store.add(app("2", "Globex")).unwrap();
        let ids: Vec<&str> = store.applications().iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["2", "1"]);
    }

    #[test]
    fn add_then_delete_round_trips_to_pre_add_state() {
        let mut store = ApplicationStore::new(MemoryStorage::new());
        store.load().unwrap();
        store.add(app("1", "Acme")).unwrap();
        let before = store.applications().to_vec();

        store.add(app("2", "Globex")).unwrap();
        store.delete("2").unwrap();
        assert_eq!(store.applications(), before.as_slice());
    }

    #[test]
    fn update_status_replaces_only_the_status() {
        let mut store = ApplicationStore::new(MemoryStorage::new());
        store.load().unwrap();
        store.add(app("1", "Acme")).unwrap();
        store.update_status("1", Status::Offer).unwrap();
        let updated = &store.applications()[0];
        assert_eq!(updated.status, Status::Offer);
        assert_eq!(updated.company_name, "Acme");
    }

    #[test]
    fn update_status_on_unknown_id_is_a_noop() {
        let mut store = ApplicationStore::new(MemoryStorage::new());
        store.load().unwrap();
        store.add(app("1", "Acme")).unwrap();
        let before = store.applications().to_vec();
        store.update_status("missing", Status::Ghosted).unwrap();
        assert_eq!(store.applications(), before.as_slice());
    }

    #[test]
    fn delete_on_unknown_id_is_a_noop() {
        let mut store = ApplicationStore::new(MemoryStorage::new());
        store.load().unwrap();
        store.add(app("1", "Acme")).unwrap();
        store.delete("missing").unwrap();
        assert_eq!(store.applications().len(), 1);
    }

    #[test]
    fn mutations_before_load_never_save() {
        let mut store = ApplicationStore::new(MemoryStorage::new());
        store.add(app("1", "Acme")).unwrap();
        // the slot was never written
        assert!(store.backend.is_empty());

        store.load().unwrap();
        store.add(app("2", "Globex")).unwrap();
        assert!(!store.backend.is_empty());
    }

    #[test]
    fn load_twice_does_not_reset_in_memory_state() {
        let mut store = ApplicationStore::new(MemoryStorage::new());
        store.load().unwrap();
        store.add(app("1", "Acme")).unwrap();
        store.load().unwrap();
        assert_eq!(store.applications().len(), 1);
    }
}
