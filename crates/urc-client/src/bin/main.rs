//! urc-dashboard binary: look up drivers by car number
//!
//! Run with:
//! ```bash
//! cargo run -p urc-client --bin urc-dashboard -- --division "URC Sprints" --car 24
//! ```
//!
//! Without `--car` an interactive session reads car numbers from stdin.

use std::path::PathBuf;

use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

use urc_client::view::{render, render_divisions};
use urc_client::{session::HELP, Command, Dashboard};
use urc_core::{DashboardConfig, ResolutionState, SourceEntry};

#[derive(Parser, Debug)]
#[command(name = "urc-dashboard")]
#[command(about = "URC announcing dashboard: driver lookup by car number")]
struct Args {
    /// JSON config file (timeouts, user agent, stats fallback)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Division to select on start
    #[arg(long, short)]
    division: Option<String>,

    /// Car number to look up, then exit
    #[arg(long, short)]
    car: Option<String>,

    /// Request timeout in milliseconds (overrides config)
    #[arg(long)]
    timeout_ms: Option<u64>,

    /// Print the division list and exit
    #[arg(long)]
    list: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("urc_dashboard=info".parse()?)
                .add_directive("urc_client=info".parse()?)
                .add_directive("urc_core=info".parse()?),
        )
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => DashboardConfig::load(path)?,
        None => DashboardConfig::default(),
    };
    if let Some(ms) = args.timeout_ms {
        config.request_timeout_ms = ms;
    }

    let dashboard = Dashboard::builtin(&config)?;

    if args.list {
        println!("{}", render_divisions(&dashboard.view().await));
        return Ok(());
    }

    if let Some(car) = args.car {
        let Some(division) = args.division else {
            anyhow::bail!("--car needs --division");
        };
        return lookup_once(&dashboard, &division, &car).await;
    }

    if let Some(division) = &args.division {
        dashboard.select_division(division).await?;
    }

    interactive(dashboard).await
}

async fn lookup_once(dashboard: &Dashboard, division: &str, car: &str) -> anyhow::Result<()> {
    let view = dashboard.load_division(division).await?;
    if let ResolutionState::Error(message) = &view.state {
        anyhow::bail!("{}: {}", view.selected.name, message);
    }

    dashboard.set_query(car).await;
    let (view, reveal) = dashboard.take_view().await;
    print!("{}", render(&view, reveal));
    Ok(())
}

async fn interactive(dashboard: Dashboard) -> anyhow::Result<()> {
    println!("{}", HELP);

    let mut updates = dashboard.subscribe();
    let renderer = dashboard.clone();
    let render_task = tokio::spawn(async move {
        let mut last: Option<(SourceEntry, String, ResolutionState)> = None;
        loop {
            updates.borrow_and_update();
            // Render the core's current view, not the broadcast snapshot: the
            // reveal signal must come from the same state that gets printed.
            let (view, reveal) = renderer.take_view().await;
            let key = (view.selected.clone(), view.query.clone(), view.state.clone());
            if last.as_ref() != Some(&key) {
                println!("{}", render(&view, reveal));
                last = Some(key);
            }
            if updates.changed().await.is_err() {
                break;
            }
        }
    });

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match Command::parse(&line) {
            Command::Query(query) => dashboard.set_query(&query).await,
            Command::Select(name) => {
                if let Err(e) = dashboard.select_division(&name).await {
                    eprintln!("{}", e);
                }
            }
            Command::Reload => {
                dashboard.reload().await;
            }
            Command::List => println!("{}", render_divisions(&dashboard.view().await)),
            Command::Help => println!("{}", HELP),
            Command::Quit => break,
            Command::Unknown(input) => eprintln!("Unknown command: {} (try :help)", input),
        }
    }

    render_task.abort();
    Ok(())
}
