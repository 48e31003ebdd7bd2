//! # WMS Hub Library
//!
//! Terminal front-end for the warehouse management backend. Everything the
//! binary does lives here so the loop can be driven from tests.
//!
//! ## Module Organization
//! ```text
//! wms_hub_lib/
//! ├── lib.rs          ◄─── You are here (CLI, logging, read/render loop)
//! ├── commands.rs     ◄─── Input line → Command
//! ├── error.rs        ◄─── AppError shown as "! {message}"
//! ├── shell/
//! │   ├── mod.rs      ◄─── Current page, navigation, nav bar
//! │   └── page.rs     ◄─── Page enum
//! ├── pages/          ◄─── Screen trait + one adapter per page
//! └── ui/             ◄─── Button, Input, Select, Modal, Table
//! ```

pub mod commands;
pub mod error;
pub mod pages;
pub mod shell;
pub mod ui;

use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Lines};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;
use wms_client::{Backend, HubConfig, RestBackend};

use commands::{Command, HELP};
use error::AppError;
use shell::{Reply, Shell};

/// Command-line flags. Anything not given here comes from the config file
/// and `WMS_*` environment variables.
#[derive(Debug, Clone, Default, Parser)]
#[command(name = "wms-hub", version, about = "Terminal front-end for the warehouse management system")]
pub struct Cli {
    /// Config file (default: platform config dir / wms-hub.toml)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Backend base URL, e.g. http://localhost:8080/api
    #[arg(long, value_name = "URL")]
    pub base_url: Option<String>,

    /// Probe the gateway health endpoint and exit
    #[arg(long)]
    pub check: bool,
}

/// Runs the hub.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  1. Load configuration ─── file, then WMS_* env, then --base-url       │
/// │  2. Initialize logging ─── RUST_LOG wins over the configured filter    │
/// │  3. Build the REST backend (base URL fixed from here on)               │
/// │  4. --check ? probe {gateway}/health and exit                          │
/// │            : run the shell on stdin/stdout until quit or EOF           │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = HubConfig::load(cli.config.clone()).context("failed to load configuration")?;
    if let Some(base_url) = cli.base_url {
        config = config.with_base_url(base_url).context("invalid --base-url")?;
    }

    init_tracing(&config.log.filter);
    info!(base_url = %config.api.base_url, "Starting WMS Hub");

    let backend = RestBackend::from_config(&config)?;

    if cli.check {
        return check_gateway(&backend, &config).await;
    }

    let backend: Arc<dyn Backend> = Arc::new(backend);
    let mut shell = Shell::new(backend);
    let stdin = BufReader::new(tokio::io::stdin());
    run_shell(&mut shell, stdin, std::io::stdout()).await?;

    info!("WMS Hub stopped");
    Ok(())
}

/// Initializes the tracing subscriber. Called once, from [`run`].
///
/// Logs go to stderr so they never interleave with the rendered screen.
/// `RUST_LOG` overrides `filter` when set.
fn init_tracing(filter: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn check_gateway(backend: &RestBackend, config: &HubConfig) -> anyhow::Result<()> {
    let gateway = config.gateway_url()?;
    match backend.health(&gateway).await {
        Ok(body) => {
            let body = body.map(|v| v.to_string()).unwrap_or_else(|| "(no content)".to_string());
            println!("Gateway {} is healthy: {}", gateway, body);
            Ok(())
        }
        Err(e) => {
            warn!(%gateway, error = %e, "Health check failed");
            Err(anyhow::anyhow!("Gateway {} is unreachable: {}", gateway, e))
        }
    }
}

// =============================================================================
// Read / Render Loop
// =============================================================================

fn report<W: Write>(output: &mut W, err: &AppError) -> std::io::Result<()> {
    if err.is_silent() {
        debug!(error = %err, "Suppressed");
        return Ok(());
    }
    writeln!(output, "! {}", err)
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

/// How a line typed while backend work was running ended that work.
enum Interrupt {
    Quit,
    Navigate(Command),
}

/// Reads commands from `input` until `quit` or end of input, redrawing the
/// screen to `output` after each one. Deletes ask for a y/N answer first.
///
/// ## Loop
/// ```text
///  read line ──► Shell::handle ──► pending work? ──no──► render
///                                       │ yes
///                                       ▼
///                     render "Loading ..." (initial fetch only)
///                                       │
///              ┌──── select! ───────────┴───────────────┐
///              │ work finishes        │ line arrives     │
///              ▼                      ▼                  │
///            render        go <page> / quit: cancel ─────┘
///                          anything else:   "! Still waiting ..."
/// ```
pub async fn run_shell<R, W>(shell: &mut Shell, input: R, mut output: W) -> anyhow::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    writeln!(output, "{}", shell.render())?;
    let mut lines = input.lines();
    let mut queued: Option<Command> = None;

    loop {
        let command = match queued.take() {
            Some(command) => command,
            None => {
                write!(output, "> ")?;
                output.flush()?;
                let Some(line) = lines.next_line().await? else {
                    break;
                };
                match Command::parse(&line) {
                    Ok(Some(command)) => command,
                    Ok(None) => continue,
                    Err(e) => {
                        report(&mut output, &e)?;
                        continue;
                    }
                }
            }
        };

        match shell.handle(command) {
            Ok(Reply::Quit) => break,
            Ok(Reply::Help) => {
                writeln!(output, "{}", HELP)?;
                continue;
            }
            Ok(Reply::Render) => {}
            Ok(Reply::Confirm { prompt, id }) => {
                write!(output, "{} [y/N] ", prompt)?;
                output.flush()?;
                let answer = lines.next_line().await?;
                if answer.as_deref().is_some_and(is_yes) {
                    if let Err(e) = shell.confirm_delete(id) {
                        report(&mut output, &e)?;
                    }
                } else {
                    debug!(%id, "Delete not confirmed");
                }
            }
            Err(e) => {
                report(&mut output, &e)?;
                continue;
            }
        }

        if shell.has_pending() {
            if shell.is_mounting() {
                writeln!(output, "{}", shell.render())?;
            }
            match drive_pending(shell, &mut lines, &mut output).await? {
                Some(Interrupt::Quit) => break,
                Some(Interrupt::Navigate(command)) => {
                    queued = Some(command);
                    continue;
                }
                None => {}
            }
        }
        writeln!(output, "{}", shell.render())?;
    }
    Ok(())
}

/// Runs the shell's pending work while still reading input.
///
/// Navigation and `quit` cancel the work through the page lifetime; the
/// work then finishes as cancelled and nothing it fetched is applied.
async fn drive_pending<R, W>(
    shell: &mut Shell,
    lines: &mut Lines<R>,
    output: &mut W,
) -> anyhow::Result<Option<Interrupt>>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let current = shell.page();
    let canceller = shell.canceller();
    let mut interrupt = None;

    let work = shell.run_pending();
    tokio::pin!(work);

    let result = loop {
        tokio::select! {
            biased;
            result = &mut work => break result,
            line = lines.next_line(), if interrupt.is_none() => {
                let command = match line? {
                    None => Command::Quit,
                    Some(line) => match Command::parse(&line) {
                        Ok(Some(command)) => command,
                        Ok(None) => continue,
                        Err(e) => {
                            report(output, &e)?;
                            continue;
                        }
                    },
                };
                match command {
                    Command::Quit => {
                        canceller.cancel();
                        interrupt = Some(Interrupt::Quit);
                    }
                    Command::Go(page) if page != current => {
                        info!(from = %current, to = %page, "Leaving before the page finished loading");
                        canceller.cancel();
                        interrupt = Some(Interrupt::Navigate(command));
                    }
                    Command::Go(_) => {}
                    Command::Help => writeln!(output, "{}", HELP)?,
                    _ => report(output, &AppError::Waiting)?,
                }
            }
        }
    };

    if let Err(e) = result {
        report(output, &e)?;
    }
    Ok(interrupt)
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::MemoryBackend;
    use serde_json::json;

    async fn drive(backend: Arc<MemoryBackend>, script: &str) -> String {
        let mut shell = Shell::new(backend);
        let mut output = Vec::new();
        run_shell(&mut shell, BufReader::new(script.as_bytes()), &mut output)
            .await
            .unwrap();
        String::from_utf8(output).unwrap()
    }

    #[tokio::test]
    async fn test_add_commodity_session() {
        let backend = MemoryBackend::with("commodities", json!([]));
        let out = drive(
            backend.clone(),
            "commodities\nadd\nset name Basmati Rice\nset amount 12\nsubmit\nquit\n",
        )
        .await;

        assert_eq!(backend.list("commodities"), vec![json!({"id": "n1", "name": "Basmati Rice", "amount": 12})]);
        assert!(out.contains("Basmati Rice | 12"));
        assert!(out.contains("No commodities found."));
    }

    #[tokio::test]
    async fn test_validation_blocks_the_request() {
        let backend = MemoryBackend::with("warehouses", json!([]));
        let out = drive(backend.clone(), "warehouses\nadd\nset storage big\nsubmit\n").await;

        assert!(backend.list("warehouses").is_empty());
        assert!(out.contains("! Name is required."));
        assert!(out.contains("! Storage (capacity) must be a valid number."));
    }

    #[tokio::test]
    async fn test_rejected_save_keeps_form_open() {
        let backend = MemoryBackend::with("commodities", json!([]));
        backend.reject_next("Name already exists");
        let out = drive(
            backend.clone(),
            "commodities\nadd\nset name Rice\nset amount 1\nsubmit\n",
        )
        .await;

        let last_frame = &out[out.rfind("Commodities Management").unwrap()..];
        assert!(last_frame.contains("! Name already exists"));
        assert!(last_frame.contains("┌─ Add New Commodity "));
        assert!(backend.list("commodities").is_empty());
    }

    #[tokio::test]
    async fn test_delete_needs_yes() {
        let backend = MemoryBackend::with("customers", json!([{"id": "u1", "firstName": "Ada", "lastName": "L", "email": "a@b.c", "phone": "1", "address": "x"}]));

        let out = drive(backend.clone(), "customers\ndelete u1\nn\n").await;
        assert!(out.contains("Are you sure you want to delete this Customer? [y/N] "));
        assert_eq!(backend.list("customers").len(), 1);

        drive(backend.clone(), "customers\ndelete u1\ny\n").await;
        assert!(backend.list("customers").is_empty());
    }

    #[tokio::test]
    async fn test_errors_are_reported_and_loop_continues() {
        let out = drive(MemoryBackend::new(), "bogus\nedit c1\nhelp\nquit\n").await;
        assert!(out.contains("! Unknown command 'bogus'"));
        assert!(out.contains("! 'edit' is not available on the Dashboard page"));
        assert!(out.contains("Commands:"));
    }

    #[tokio::test]
    async fn test_leaving_a_stalled_page_cancels_its_fetch() {
        let backend = MemoryBackend::with("customers", json!([]));
        backend.hang("customers");

        let session = drive(backend.clone(), "customers\ndashboard\nquit\n");
        let out = tokio::time::timeout(std::time::Duration::from_secs(2), session)
            .await
            .unwrap();

        assert!(out.contains("Loading Customers..."));
        let last_frame = &out[out.rfind("WMS Hub").unwrap()..];
        assert!(last_frame.contains(pages::WELCOME_TEXT));
        assert_eq!(backend.list_count("customers"), 1);
    }

    #[tokio::test]
    async fn test_commands_during_a_fetch_are_refused() {
        let backend = MemoryBackend::with("commodities", json!([]));
        backend.hang("commodities");

        let session = drive(backend.clone(), "commodities\nadd\nquit\n");
        let out = tokio::time::timeout(std::time::Duration::from_secs(2), session)
            .await
            .unwrap();

        assert!(out.contains("! Still waiting for the backend."));
        assert!(!out.contains("┌─ Add New Commodity"));
        assert_eq!(backend.list_count("commodities"), 1);
    }

    #[test]
    fn test_confirmation_answers() {
        assert!(is_yes("y\n"));
        assert!(is_yes(" YES "));
        assert!(!is_yes("\n"));
        assert!(!is_yes("no"));
    }

    #[test]
    fn test_cli_flags() {
        let cli = Cli::parse_from(["wms-hub", "--base-url", "http://api:9000/api", "--check"]);
        assert_eq!(cli.base_url.as_deref(), Some("http://api:9000/api"));
        assert!(cli.check);
        assert!(cli.config.is_none());
    }
}
