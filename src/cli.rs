//! Command-line surface: argument parsing, prompts and rendering.

use std::io;
use std::path::PathBuf;

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use console::style;
use dialoguer::{Confirm, Input, Select};
use uuid::Uuid;

use jobtrack::config::Config;
use jobtrack::github::{StarError, StarService};
use jobtrack::schema::{Application, Status};
use jobtrack::storage::JsonFileStorage;
use jobtrack::store::ApplicationStore;
use jobtrack::{attach, date, selectors, stats, StatusFilter};

#[derive(Parser)]
#[command(name = "jobtrack", version, about = "Track job applications from the terminal")]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Add an application interactively
    Add,
    /// List applications, optionally filtered
    List {
        /// Only show applications in this status
        #[arg(long, value_parser = parse_status)]
        status: Option<Status>,
        /// Case-insensitive match on company or role
        #[arg(long)]
        search: Option<String>,
    },
    /// Show one application in full
    Show { id: String },
    /// Move an application to a new status
    #[command(name = "status")]
    SetStatus {
        id: String,
        #[arg(value_parser = parse_status)]
        status: Status,
    },
    /// Delete an application
    Delete {
        id: String,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
    /// Dashboard: totals, rates and resume usage
    Stats,
    /// Star count of the configured GitHub repository
    Stars,
    /// Generate shell completions
    Completions { shell: Shell },
}

fn parse_status(s: &str) -> Result<Status, String> {
    s.parse().map_err(|err: anyhow::Error| err.to_string())
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load()?;

    match cli.command {
        Command::Add => {
            let mut store = open_store(&config)?;
            add(&mut store)
        }
        Command::List { status, search } => {
            let mut store = open_store(&config)?;
            store.load()?;
            let filter = status.map_or(StatusFilter::All, StatusFilter::Only);
            list(store.applications(), search.as_deref().unwrap_or(""), filter);
            Ok(())
        }
        Command::Show { id } => {
            let mut store = open_store(&config)?;
            store.load()?;
            show(store.applications(), &id);
            Ok(())
        }
        Command::SetStatus { id, status } => {
            let mut store = open_store(&config)?;
            store.load()?;
            set_status(&mut store, &id, status)
        }
        Command::Delete { id, yes } => {
            let mut store = open_store(&config)?;
            store.load()?;
            delete(&mut store, &id, yes)
        }
        Command::Stats => {
            let mut store = open_store(&config)?;
            store.load()?;
            dashboard(store.applications());
            Ok(())
        }
        Command::Stars => {
            stars(&config);
            Ok(())
        }
        Command::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "jobtrack", &mut io::stdout());
            Ok(())
        }
    }
}

fn open_store(config: &Config) -> Result<ApplicationStore<JsonFileStorage>> {
    Ok(ApplicationStore::new(JsonFileStorage::new(config.data_dir()?)))
}

fn add(store: &mut ApplicationStore<JsonFileStorage>) -> Result<()> {
    store.load()?;

    let company_name = required_input("Company")?;
    let role = required_input("Role")?;
    let location: String = Input::new()
        .with_prompt("Location")
        .default("Remote".to_string())
        .interact_text()?;

    let items: Vec<&str> = Status::ALL.iter().map(Status::as_str).collect();
    let picked = Select::new()
        .with_prompt("Status")
        .items(&items)
        .default(0)
        .interact()?;
    let status = Status::ALL[picked];

    let resume_name = required_input("Resume used")?;
    let resume_path: String = Input::new()
        .with_prompt("Resume PDF path (empty to skip)")
        .allow_empty(true)
        .interact_text()?;
    let resume_file = if resume_path.trim().is_empty() {
        None
    } else {
        match attach::read_resume(&PathBuf::from(resume_path.trim())) {
            Ok(file) => {
                println!("{}", style("PDF attached").green());
                Some(file)
            }
            Err(err) => {
                // Add continues without an attachment, as if none was picked.
                println!("{}", style(format!("{err}")).red());
                None
            }
        }
    };

    let job_description: String = Input::new()
        .with_prompt("Job description (empty to skip)")
        .allow_empty(true)
        .interact_text()?;
    let notes: String = Input::new()
        .with_prompt("Notes (empty to skip)")
        .allow_empty(true)
        .interact_text()?;

    let app = Application {
        id: Uuid::new_v4().to_string(),
        company_name,
        role,
        location,
        status,
        resume_name,
        resume_file,
        notes,
        job_description,
        date_applied: date::today_display(),
    };
    let id = app.id.clone();
    store.add(app)?;
    println!("{} {}", style("Added").green().bold(), style(id).dim());
    Ok(())
}

fn required_input(prompt: &str) -> Result<String> {
    let value: String = Input::new()
        .with_prompt(prompt)
        .validate_with(|input: &String| -> Result<(), &str> {
            if input.trim().is_empty() {
                Err("required")
            } else {
                Ok(())
            }
        })
        .interact_text()?;
    Ok(value.trim().to_string())
}

fn list(apps: &[Application], search: &str, filter: StatusFilter) {
    let filtered = selectors::filter_applications(apps, search, filter);
    if filtered.is_empty() {
        println!("{}", style("No applications found").dim());
        return;
    }
    for app in &filtered {
        print_row(app);
    }
    println!(
        "\n{}",
        style(format!("{} of {} applications", filtered.len(), apps.len())).dim()
    );
}

fn print_row(app: &Application) {
    println!(
        "{}  {} — {}  [{}]  {}",
        style(&app.id[..8.min(app.id.len())]).dim(),
        style(&app.company_name).bold(),
        app.role,
        status_style(app.status),
        style(&app.date_applied).dim()
    );
}

fn status_style(status: Status) -> console::StyledObject<&'static str> {
    let text = status.as_str();
    match status {
        Status::Applied => style(text).blue(),
        Status::Pending => style(text).yellow(),
        Status::Interviewing => style(text).cyan(),
        Status::Offer => style(text).green(),
        Status::Rejected => style(text).red(),
        Status::Ghosted => style(text).dim(),
    }
}

fn show(apps: &[Application], id: &str) {
    let Some(app) = selectors::by_id(apps, id) else {
        println!("{}", style("Application not found").red());
        return;
    };
    println!("{}", style(&app.company_name).bold().underlined());
    println!("Role:       {}", app.role);
    println!("Location:   {}", app.location);
    println!("Status:     {}", status_style(app.status));
    println!("Applied:    {}", app.date_applied);
    println!("Resume:     {}", app.resume_name);
    if let Some(file) = &app.resume_file {
        println!("Attachment: {} ({})", file.name, file.mime_type);
    }
    if !app.job_description.is_empty() {
        println!("\n{}\n{}", style("Job description").bold(), app.job_description);
    }
    if !app.notes.is_empty() {
        println!("\n{}\n{}", style("Notes").bold(), app.notes);
    }
    println!("\n{}", style(&app.id).dim());
}

fn set_status(
    store: &mut ApplicationStore<JsonFileStorage>,
    id: &str,
    status: Status,
) -> Result<()> {
    if selectors::by_id(store.applications(), id).is_none() {
        println!("{}", style("Application not found").red());
        return Ok(());
    }
    store.update_status(id, status)?;
    println!("{} {}", style("Status set to").green(), status_style(status));
    Ok(())
}

fn delete(store: &mut ApplicationStore<JsonFileStorage>, id: &str, yes: bool) -> Result<()> {
    let Some(app) = selectors::by_id(store.applications(), id) else {
        println!("{}", style("Application not found").red());
        return Ok(());
    };
    if !yes {
        let prompt = format!("Delete {} — {}?", app.company_name, app.role);
        if !Confirm::new().with_prompt(prompt).default(false).interact()? {
            return Ok(());
        }
    }
    store.delete(id)?;
    println!("{}", style("Deleted").green());
    Ok(())
}

fn dashboard(apps: &[Application]) {
    let stats_record = stats::calculate_stats(apps);
    println!("{}", style("Dashboard").bold().underlined());
    println!("Total:         {}", stats_record.total);
    println!("Applied:       {}", stats_record.applied);
    println!("Pending:       {}", stats_record.pending);
    println!("Interviewing:  {}", stats_record.interviews);
    println!("Offers:        {}", stats_record.offers);
    println!("Rejected:      {}", stats_record.rejected);
    println!("This week:     {}", stats::weekly_count(apps));
    println!(
        "Interview rate: {}%   Response rate: {}%",
        stats::progress_percentage(&stats_record),
        stats::response_rate(&stats_record)
    );

    let resumes = selectors::unique_resumes(apps);
    if !resumes.is_empty() {
        println!("\n{}", style("Resumes").bold());
        for name in resumes {
            println!("  {name}: {} uses", selectors::resume_usage_count(apps, name));
        }
    }

    let recent = selectors::recent(apps, 5);
    if !recent.is_empty() {
        println!("\n{}", style("Recent").bold());
        for app in recent {
            print_row(app);
        }
    }
}

fn stars(config: &Config) {
    let Ok(cache_dir) = config.cache_dir() else {
        println!("{}", style("★ —").dim());
        return;
    };
    let service = StarService::new(config.github.clone(), cache_dir);
    if !service.is_configured() {
        println!("{}", style("No GitHub repository configured").dim());
        return;
    }
    match service.stars() {
        Ok(count) => {
            let url = service.repo_url().unwrap_or_default();
            println!("★ {count}  {}", style(url).dim());
        }
        Err(StarError::Unconfigured) => {
            println!("{}", style("No GitHub repository configured").dim());
        }
        Err(err) => {
            tracing::warn!(%err, "star fetch failed");
            println!("{}", style("★ —").dim());
        }
    }
}
