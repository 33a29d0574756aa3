//! Command-line driver for the profile page core.
//!
//! Each invocation opens the store file as one context, runs start-up and
//! performs a single action.

use clap::{Parser, Subcommand};
use log::info;
use profile_core::{
    core_version, default_log_level, init_logging, lock_status, render::page::Page, Clock,
    ContactForm, GateContext, OpenOutcome, ProfileApp, ProfileConfig, SqliteStore, SubmitOutcome,
    SystemClock,
};
use std::error::Error;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// SQLite store file shared by every context
    #[arg(long, global = true, default_value = "profile.db")]
    db: PathBuf,

    /// JSON config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory for rolling log files; logging is off when omitted
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,

    /// trace|debug|info|warn|error
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run start-up and print every rendered region
    Render,
    /// Submit a contact form message
    Post {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        message: String,
    },
    /// Try the admin password
    Login { password: String },
    /// Show the persisted lockout state
    LockStatus,
}

fn main() -> ExitCode {
    match run(Args::parse()) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<ExitCode, Box<dyn Error>> {
    if let Some(log_dir) = &args.log_dir {
        let level = args.log_level.as_deref().unwrap_or(default_log_level());
        init_logging(level, absolute(log_dir)?)?;
    }

    let config = match &args.config {
        Some(path) => ProfileConfig::from_file(path)?,
        None => ProfileConfig::default(),
    };
    let store = SqliteStore::open(&args.db)?;
    info!(
        "event=cli_start module=cli status=ok command={:?} core_version={}",
        args.command,
        core_version()
    );

    let mut app = ProfileApp::new(store, SystemClock, config, Page::standard());
    app.start();

    let code = match args.command {
        Command::Render => {
            for (name, content) in app.page().regions() {
                println!("[{name}]\n{content}\n");
            }
            ExitCode::SUCCESS
        }
        Command::Post {
            name,
            email,
            message,
        } => {
            let form = ContactForm {
                name,
                email,
                message,
            };
            match app.submit_contact_form(&form) {
                Ok(stored) => {
                    print_notices(&app);
                    println!("id={}", stored.id);
                    ExitCode::SUCCESS
                }
                Err(err) => {
                    eprintln!("{}", err.user_message());
                    ExitCode::FAILURE
                }
            }
        }
        Command::Login { password } => login(&mut app, &password)?,
        Command::LockStatus => {
            let ctx = GateContext {
                store: app.store(),
                session: app.session(),
                clock: app.clock(),
            };
            let status = lock_status(&ctx);
            println!("locked={}", status.is_locked);
            println!("attempts={}", status.attempt_count);
            if let Some(minutes) = status.remaining_minutes(app.clock().now_ms()) {
                println!("remaining_minutes={minutes}");
            }
            ExitCode::SUCCESS
        }
    };

    Ok(code)
}

fn login(
    app: &mut ProfileApp<SqliteStore, SystemClock>,
    password: &str,
) -> Result<ExitCode, Box<dyn Error>> {
    if let OpenOutcome::Locked { .. } = app.open_admin_gate() {
        print_notices(app);
        return Ok(ExitCode::FAILURE);
    }

    let code = match app.submit_admin_password(password)? {
        SubmitOutcome::Authenticated { redirect, .. } => {
            print_notices(app);
            println!("redirect={redirect}");
            ExitCode::SUCCESS
        }
        SubmitOutcome::EmptyPassword { feedback } | SubmitOutcome::Rejected { feedback, .. } => {
            eprintln!("{}", feedback.text());
            ExitCode::FAILURE
        }
        SubmitOutcome::Locked { .. } | SubmitOutcome::LockedOut { .. } => {
            print_notices(app);
            ExitCode::FAILURE
        }
        SubmitOutcome::NotOpen => ExitCode::FAILURE,
    };
    Ok(code)
}

fn print_notices(app: &ProfileApp<SqliteStore, SystemClock>) {
    for notice in app.notices() {
        println!("{:?}: {}", notice.kind, notice.text);
    }
}

fn absolute(path: &Path) -> std::io::Result<PathBuf> {
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        Ok(std::env::current_dir()?.join(path))
    }
}
