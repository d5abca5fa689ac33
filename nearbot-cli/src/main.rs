//! nearbot console shell.
//!
//! Wires the layers together: config, session store, session gate, then
//! the chat REPL. The login handoff arrives as flags or as the raw query
//! string the external login page redirects with.

mod console;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use chrono::{DateTime, Utc};
use clap::Parser;
use colored::Colorize;
use rustyline::error::ReadlineError;
use tracing_subscriber::EnvFilter;

use nearbot_application::{ChatController, HeaderAction, SessionGate, SessionOutcome, header_view};
use nearbot_core::session::LoginHandoff;
use nearbot_infrastructure::{ConfigService, NearbotPaths, TomlSessionRepository};
use nearbot_interaction::{ChatApiClient, GeoProvider, source_from_config};

#[derive(Parser, Debug)]
#[command(name = "nearbot", about = "Location-aware retail assistant console client")]
struct Args {
    /// Raw login-handoff query string (session_id=..&user_type=..)
    #[arg(long, conflicts_with = "guest")]
    handoff: Option<String>,

    /// Session id from the login flow
    #[arg(long)]
    session_id: Option<String>,

    /// User type from the login flow (guest | authenticated)
    #[arg(long)]
    user_type: Option<String>,

    /// Display name from the login flow
    #[arg(long)]
    user_name: Option<String>,

    /// Profile picture URL from the login flow
    #[arg(long)]
    user_picture: Option<String>,

    /// RFC 3339 login time from the login flow
    #[arg(long)]
    login_time: Option<String>,

    /// Start a locally minted guest session
    #[arg(long)]
    guest: bool,

    /// Override the config directory
    #[arg(long)]
    config_dir: Option<PathBuf>,
}

fn handoff_from_args(args: &Args) -> Option<LoginHandoff> {
    if args.guest {
        return Some(LoginHandoff::local_guest(args.user_name.clone()));
    }
    if let Some(query) = &args.handoff {
        return Some(LoginHandoff::from_query(query));
    }
    if args.session_id.is_some() || args.user_type.is_some() {
        return Some(LoginHandoff {
            session_id: args.session_id.clone(),
            user_type: args.user_type.clone(),
            user_name: args.user_name.clone(),
            user_picture: args.user_picture.clone(),
            login_time: args
                .login_time
                .as_deref()
                .and_then(|t| DateTime::parse_from_rfc3339(t).ok())
                .map(|t| t.with_timezone(&Utc)),
        });
    }
    None
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let paths = NearbotPaths::new(args.config_dir.clone());
    let config = ConfigService::new(paths.config_file()?).get_config();

    let repository = Arc::new(TomlSessionRepository::new(paths.session_file()?));
    let gate = SessionGate::new(repository, config.login.login_url.clone());

    let session = match gate.initialize(handoff_from_args(&args), Utc::now()).await {
        SessionOutcome::Ready(session) => session,
        SessionOutcome::RedirectToLogin { url, cleared } => {
            if cleared {
                println!("{}", "Your session has expired.".yellow());
            }
            println!("Sign in to continue: {}", url.underline());
            return Ok(());
        }
    };

    tracing::debug!(session_id = %session.session_id, "Session established");
    let header = header_view::render(&session);
    console::print_header(&header);

    let backend = Arc::new(ChatApiClient::new(&config.backend)?);
    let geo = GeoProvider::new(source_from_config(&config.geo)?);
    let surface = Arc::new(console::ConsoleSurface);
    let mut controller = ChatController::new(geo, backend, surface);

    controller.prime_location().await;

    let mut editor = rustyline::DefaultEditor::new()?;
    loop {
        match editor.readline("> ") {
            Ok(line) => {
                let line = line.trim().to_string();
                if line.is_empty() {
                    continue;
                }
                let _ = editor.add_history_entry(&line);

                match line.as_str() {
                    "/quit" | "/exit" => break,
                    "/help" => console::print_help(),
                    "/map" => console::print_map(controller.map()),
                    "/location" => controller.location_check(false).await,
                    "/login" => {
                        println!("Sign in at: {}", gate.login_redirect_url(Utc::now()).underline());
                    }
                    "/logout" => {
                        if header.action != HeaderAction::Logout {
                            println!("You are browsing as a guest. Use /login to sign in.");
                            continue;
                        }
                        let confirmed = matches!(
                            editor.readline("Log out? [y/N] "),
                            Ok(answer) if matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
                        );
                        match gate.logout(confirmed, Utc::now()).await {
                            Some(url) => {
                                println!("Signed out. Sign in again at: {}", url.underline());
                                break;
                            }
                            None => println!("Logout cancelled."),
                        }
                    }
                    _ if line.starts_with("/focus") => {
                        let picked = line
                            .split_whitespace()
                            .nth(1)
                            .and_then(|n| n.parse::<usize>().ok())
                            .and_then(|n| n.checked_sub(1))
                            .is_some_and(|index| controller.focus_card(index));
                        if picked {
                            console::print_map(controller.map());
                        } else {
                            println!("No such store card.");
                        }
                    }
                    _ => controller.send_message(&line).await,
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(err) => return Err(err.into()),
        }
    }

    Ok(())
}
