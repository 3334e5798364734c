//! newscheck: verify a news headline or statement from the terminal.

mod render;

use std::io::Read;
use std::process::ExitCode;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use newscheck::{validate, HttpTransport, Presentation, RequestState, VerificationClient};
use tokio::sync::watch;

#[derive(Parser)]
#[command(name = "newscheck", about = "Verify a news headline or statement")]
struct Cli {
    /// Statement to verify. Read from stdin when omitted.
    statement: Vec<String>,

    /// Base URL of the verification service.
    #[arg(long, env = "NEWSCHECK_API_URL", default_value = newscheck::DEFAULT_BASE_URL)]
    api_url: String,

    /// Give up on the service after this many seconds.
    #[arg(long, default_value_t = 60, env = "NEWSCHECK_TIMEOUT_SECS")]
    timeout_secs: u64,

    /// Print the verification result as JSON.
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let raw = if cli.statement.is_empty() {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read statement from stdin")?;
        buf
    } else {
        cli.statement.join(" ")
    };

    let statement = match validate(&raw) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("{e}");
            return Ok(ExitCode::from(2));
        }
    };

    let transport = HttpTransport::with_timeout(&cli.api_url, Duration::from_secs(cli.timeout_secs))
        .context("Failed to build HTTP client")?;
    let mut client = VerificationClient::with_transport(transport);
    let progress = client.subscribe();

    let (state, ()) = tokio::join!(client.submit(statement), show_progress(progress));

    let view = Presentation::from_state(&state);
    if cli.json {
        println!("{}", render::render_json(&state, &view)?);
    } else {
        print!("{}", render::render(&view));
    }

    Ok(match state {
        RequestState::Succeeded(_) => ExitCode::SUCCESS,
        _ => ExitCode::FAILURE,
    })
}

/// Echo the submit label while a request is in flight; stop once it settles.
async fn show_progress(mut rx: watch::Receiver<RequestState>) {
    while rx.changed().await.is_ok() {
        let view = Presentation::from_state(&rx.borrow_and_update());
        if !view.submit_disabled {
            break;
        }
        eprintln!("{}", view.submit_label);
    }
}
