//! # Resumatch CLI
//!
//! Upload resumes, search them and match them against job postings from the
//! terminal.

mod commands;
mod config;
mod output;
mod telemetry;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use resumatch_core::ApiError;
use resumatch_core::domain::{DEFAULT_PAGE_SIZE, Role, SearchQuery};
use resumatch_infra::api::{DEFAULT_LIST_LIMIT, DEFAULT_TOP_N};

use commands::Context;
use config::AppConfig;
use output::OutputFormat;
use telemetry::TelemetryConfig;

/// Resumatch CLI - find the right resume for the job.
#[derive(Parser)]
#[command(name = "resumatch")]
#[command(about = "Resumatch client for uploading, searching and matching resumes")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Backend base URL
    #[arg(long, global = true)]
    api_base: Option<String>,

    /// File holding the stored session
    #[arg(long, global = true)]
    session_file: Option<PathBuf>,

    /// Output format (text or json)
    #[arg(short, long, default_value = "text", global = true)]
    format: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in and store the session
    Login {
        #[arg(short, long)]
        username: Option<String>,
        /// Prompted for when omitted
        #[arg(long, env = "RESUMATCH_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },

    /// Create an account and log in with it
    Signup {
        #[arg(short, long)]
        username: Option<String>,
        #[arg(short, long)]
        email: Option<String>,
        #[arg(long, env = "RESUMATCH_PASSWORD", hide_env_values = true)]
        password: Option<String>,
        /// candidate or recruiter
        #[arg(long, default_value = "candidate")]
        role: Role,
    },

    /// Forget the stored session
    Logout,

    /// Show whether a session is stored
    Status,

    /// Upload a resume (PDF, DOC or DOCX, up to 5 MB)
    Upload { file: PathBuf },

    /// Browse uploaded resumes
    Resumes {
        #[command(subcommand)]
        command: ResumeCommands,
    },

    /// Ask the retrieval endpoint directly
    Ask {
        query: String,
        /// Number of answers
        #[arg(short, default_value_t = DEFAULT_PAGE_SIZE)]
        k: usize,
    },

    /// Search resumes and remember the search
    Search {
        query: String,
        #[arg(short, long)]
        location: Option<String>,
        #[arg(short, long)]
        experience: Option<String>,
        #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
        page_size: usize,
    },

    /// Recent searches
    History {
        #[command(subcommand)]
        command: HistoryCommands,
    },

    /// Job postings
    Jobs {
        #[command(subcommand)]
        command: JobCommands,
    },
}

#[derive(Subcommand)]
enum ResumeCommands {
    /// List resumes
    List {
        /// Filter by text
        #[arg(short, long)]
        q: Option<String>,
        #[arg(long, default_value_t = DEFAULT_LIST_LIMIT)]
        limit: usize,
        #[arg(long, default_value_t = 0)]
        offset: usize,
    },
    /// Show a resume's content
    Show {
        id: String,
        /// Keywords to highlight
        #[arg(long)]
        highlight: Option<String>,
    },
}

#[derive(Subcommand)]
enum HistoryCommands {
    /// List recent searches, newest first
    List,
    /// Run a recent search again
    Run { index: usize },
    /// Remove one search by its index
    Remove { index: usize },
    /// Remove all searches
    Clear,
}

#[derive(Subcommand)]
enum JobCommands {
    /// Create a job posting
    Create {
        #[arg(short, long)]
        title: String,
        #[arg(short, long)]
        description: String,
        /// Comma-separated, e.g. "rust, tokio"
        #[arg(short, long, default_value = "")]
        requirements: String,
    },
    /// List job postings
    List,
    /// Rank resumes against a job
    Match {
        id: String,
        #[arg(long, default_value_t = DEFAULT_TOP_N)]
        top_n: usize,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    // Load .env file if present
    dotenvy::dotenv().ok();

    telemetry::init_telemetry(&TelemetryConfig::from_env("warn,resumatch_infra=info"));

    let cli = Cli::parse();
    let format = cli.format;

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            report(&e, &format);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = AppConfig::from_env()?.with_overrides(cli.api_base, cli.session_file);
    let ctx = Context::new(config, cli.format).await?;

    match cli.command {
        Commands::Login { username, password } => commands::login(&ctx, username, password).await,
        Commands::Signup {
            username,
            email,
            password,
            role,
        } => commands::signup(&ctx, username, email, password, role).await,
        Commands::Logout => commands::logout(&ctx).await,
        Commands::Status => commands::status(&ctx).await,
        Commands::Upload { file } => commands::upload(&ctx, &file).await,
        Commands::Resumes { command } => match command {
            ResumeCommands::List { q, limit, offset } => {
                commands::resumes_list(&ctx, q.as_deref(), limit, offset).await
            }
            ResumeCommands::Show { id, highlight } => {
                commands::resumes_show(&ctx, &id, highlight.as_deref()).await
            }
        },
        Commands::Ask { query, k } => commands::ask(&ctx, &query, k).await,
        Commands::Search {
            query,
            location,
            experience,
            page_size,
        } => {
            let mut search = SearchQuery::new(query).with_page_size(page_size);
            if let Some(location) = location {
                search = search.with_location(location);
            }
            if let Some(experience) = experience {
                search = search.with_experience(experience);
            }
            commands::search(&ctx, search).await
        }
        Commands::History { command } => match command {
            HistoryCommands::List => commands::history_list(&ctx).await,
            HistoryCommands::Run { index } => commands::history_run(&ctx, index).await,
            HistoryCommands::Remove { index } => commands::history_remove(&ctx, index).await,
            HistoryCommands::Clear => commands::history_clear(&ctx).await,
        },
        Commands::Jobs { command } => match command {
            JobCommands::Create {
                title,
                description,
                requirements,
            } => commands::jobs_create(&ctx, &title, &description, &requirements).await,
            JobCommands::List => commands::jobs_list(&ctx).await,
            JobCommands::Match { id, top_n } => commands::jobs_match(&ctx, &id, top_n).await,
        },
    }
}

/// Print a failed command's message, plus a hint when the session is gone.
fn report(error: &anyhow::Error, format: &OutputFormat) {
    match error.downcast_ref::<ApiError>() {
        Some(api_error) => {
            output::print_error(&api_error.message(), format);
            if api_error.requires_login() {
                eprintln!("Your session has expired. Run `resumatch login` to sign in again.");
            }
        }
        None => output::print_error(&format!("{error:#}"), format),
    }
}
