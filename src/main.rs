use std::path::PathBuf;

use clap::Parser;
use color_eyre::Result;
use tokio::time::{Instant, sleep_until};

use wattop::app::App;
use wattop::config::{self, Config};
use wattop::event::{Event, EventHandler};
use wattop::logging;
use wattop::scheduler::Scheduler;
use wattop::system::collector::Collector;
use wattop::system::source::ProcessKiller;
use wattop::ui;

#[derive(Parser)]
#[command(
    name = "wattop",
    about = "Terminal system monitor with per-process power estimates"
)]
struct Cli {
    /// Path to config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Refresh interval in milliseconds (200..=60000)
    #[arg(long)]
    refresh_rate: Option<u64>,

    /// Number of processes to list
    #[arg(long)]
    top: Option<usize>,

    /// CPU package TDP in watts used by the power estimate
    #[arg(long)]
    tdp: Option<f64>,

    /// Memory draw in watts per resident GB
    #[arg(long)]
    mem_watts_per_gb: Option<f64>,

    /// Initial sort key: cpu, mem, pid, name, power
    #[arg(long)]
    sort: Option<String>,

    /// Color support: auto, 256, truecolor, mono
    #[arg(long)]
    color: Option<String>,

    /// Write logs to this file (level from WATTOP_LOG)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    let config = load_config_for_cli(&cli);

    if let Some(path) = &config.general.log_file {
        logging::init_file_logging(path)?;
    }

    let mut terminal = ratatui::init();

    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        ratatui::restore();
        original_hook(panic_info);
    }));

    let result = run(&mut terminal, config).await;

    ratatui::restore();

    result
}

async fn run(terminal: &mut ratatui::DefaultTerminal, config: Config) -> Result<()> {
    let mut scheduler = Scheduler::start(Collector::new(), config.power_model()).await;
    let mut app = App::new(&config, scheduler.host().clone());
    let mut events = EventHandler::new();

    let mut next_tick = Instant::now();

    while app.running {
        tokio::select! {
            _ = sleep_until(next_tick) => {
                let data = scheduler.tick().await;
                app.apply_tick(data);
                redraw(terminal, &app);
                next_tick = Instant::now() + app.view.refresh_interval();
            }
            maybe_event = events.next() => {
                match maybe_event {
                    Some(Event::Key(key)) => {
                        let action = app.map_key(key);
                        app.dispatch(action);
                        if let Some(pid) = app.take_kill_request() {
                            let result = scheduler.source().kill(pid).await;
                            app.set_kill_status(result);
                        }
                        redraw(terminal, &app);
                    }
                    Some(Event::Resize) => redraw(terminal, &app),
                    None => {
                        tracing::warn!("input stream closed; exiting");
                        app.running = false;
                    }
                }
            }
        }
    }

    Ok(())
}

fn redraw(terminal: &mut ratatui::DefaultTerminal, app: &App) {
    if let Err(err) = terminal.draw(|frame| ui::draw(frame, &app.dashboard())) {
        tracing::error!(%err, "frame render failed");
    }
}

fn load_config_for_cli(cli: &Cli) -> Config {
    let mut config = match &cli.config {
        Some(path) => config::load_config_from_path(path),
        None => config::load_config(),
    };

    if let Some(rate) = cli.refresh_rate {
        config.general.refresh_rate_ms = rate;
    }
    if let Some(top) = cli.top {
        config.general.top_n = top;
    }
    if let Some(tdp) = cli.tdp {
        config.power.cpu_tdp_watts = tdp;
    }
    if let Some(per_gb) = cli.mem_watts_per_gb {
        config.power.mem_watts_per_gb = per_gb;
    }
    if let Some(ref sort) = cli.sort {
        config.general.default_sort = sort.clone();
    }
    if let Some(ref support) = cli.color {
        config.colors.color_support = support.clone();
    }
    if let Some(ref path) = cli.log_file {
        config.general.log_file = Some(path.clone());
    }

    config
}
