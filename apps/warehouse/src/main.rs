//! warehouse — AGV fleet telemetry simulator.
//!
//! Runs a fleet of simulated automated guided vehicles, each on its own tick
//! loop, and writes one reading per provisioned channel per tick to the
//! selected sink.  Logs go to stderr so that `--sink jsonl` (the default)
//! can stream readings on stdout into a stream processor.
//!
//! ```text
//! warehouse --config fleet.json --sink csv --out readings.csv --ticks 600
//! RUST_LOG=debug warehouse --vehicles 20 --seed 7 | benthos -c pipeline.yaml
//! ```

mod args;

#[cfg(test)]
mod tests;

use std::fs::File;
use std::io::BufWriter;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use agv_core::FleetConfig;
use agv_fleet::{FleetBuilder, FleetReport, StopSignal};
use agv_telemetry::{CsvSink, DataSink, JsonLinesSink, MemorySink, NullSink};

use args::{Args, SinkKind};

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();

    let args = Args::parse();
    let config = load_config(&args)?;
    if args.print_config {
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(());
    }

    let sink = open_sink(&args)?;
    let driver = FleetBuilder::new(config).sink(sink).build()?;

    let stop = StopSignal::new();
    let trigger = stop.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("ctrl-c received, stopping fleet");
            trigger.stop();
        }
    });

    let report = driver.run(stop).await;
    print_summary(&report);
    Ok(())
}

// ── Setup ─────────────────────────────────────────────────────────────────────

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// File config (or defaults), then command-line overrides, then validation.
fn load_config(args: &Args) -> Result<FleetConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            FleetConfig::from_json_str(&text)
                .with_context(|| format!("parsing config {}", path.display()))?
        }
        None => FleetConfig::default(),
    };

    if let Some(n) = args.vehicles {
        config.vehicles = n;
    }
    if let Some(t) = args.ticks {
        config.max_ticks = Some(t);
    }
    if let Some(s) = args.seed {
        config.seed = Some(s);
    }
    if let Some(ms) = args.tick_ms {
        config.tick_period_ms = ms;
    }

    config.validate().context("invalid fleet configuration")?;
    Ok(config)
}

fn open_sink(args: &Args) -> Result<Arc<dyn DataSink>> {
    let sink: Arc<dyn DataSink> = match args.sink {
        SinkKind::Null   => Arc::new(NullSink),
        SinkKind::Memory => Arc::new(MemorySink::new()),
        SinkKind::JsonLines => match &args.out {
            Some(path) => {
                let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
                Arc::new(JsonLinesSink::new(BufWriter::new(file)))
            }
            None => Arc::new(JsonLinesSink::stdout()),
        },
        SinkKind::Csv => {
            let Some(path) = &args.out else {
                bail!("--sink csv requires --out <file>");
            };
            Arc::new(CsvSink::create(path).with_context(|| format!("creating {}", path.display()))?)
        }
        SinkKind::Sqlite => open_sqlite(args)?,
    };
    Ok(sink)
}

#[cfg(feature = "sqlite")]
fn open_sqlite(args: &Args) -> Result<Arc<dyn DataSink>> {
    let Some(path) = &args.out else {
        bail!("--sink sqlite requires --out <file>");
    };
    let sink = agv_telemetry::SqliteSink::open(path)
        .with_context(|| format!("opening {}", path.display()))?;
    Ok(Arc::new(sink))
}

#[cfg(not(feature = "sqlite"))]
fn open_sqlite(_args: &Args) -> Result<Arc<dyn DataSink>> {
    bail!("this build has no SQLite support; rebuild with `--features sqlite`")
}

// ── Reporting ─────────────────────────────────────────────────────────────────

fn print_summary(report: &FleetReport) {
    eprintln!();
    eprintln!("seed {}  ({})", report.seed, if report.stopped { "stopped" } else { "completed" });
    eprintln!(
        "{:<10} {:>7} {:>9} {:>7} {:>8} {:>9} {:>8}",
        "vehicle", "ticks", "written", "failed", "battery", "mission", "pallet"
    );
    for v in &report.vehicles {
        let s = &v.final_state;
        eprintln!(
            "{:<10} {:>7} {:>9} {:>7} {:>7.1}% {:>9} {:>8}",
            v.name,
            v.ticks,
            v.readings_written,
            v.readings_failed,
            s.battery,
            s.mission,
            s.pallet_ticks_remaining,
        );
    }
    if !report.aborted.is_empty() {
        eprintln!("aborted during drain: {:?}", report.aborted);
    }
    if !report.flushed {
        eprintln!("warning: final sink flush failed");
    }
}
