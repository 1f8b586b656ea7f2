// src/main.rs
mod capture;
mod classifier;
mod config;
mod engine;
mod firewall;
mod history;
mod listener;
mod rate;
mod scenario;

use clap::Parser;
use log::{error, info};
use std::sync::Arc;
use std::time::Duration;

use config::{EngineConfig, ScenarioConfig};
use engine::TrafficEngine;
use firewall::RuleSet;

#[derive(Parser, Debug)]
#[clap(author, version, about = "Intrusion-detection and firewall simulation pipeline", long_about = None)]
struct Args {
    /// Address the ingestion listener binds to
    #[arg(short, long, default_value = "127.0.0.1:12345")]
    listen: String,

    /// Destination ports dropped by the firewall
    #[arg(long, value_delimiter = ',', default_values_t = [80u16, 443])]
    blocked_ports: Vec<u16>,

    /// Source addresses dropped by the firewall
    #[arg(long, value_delimiter = ',')]
    blocked_addrs: Vec<String>,

    /// Events within one second that count as a traffic spike
    #[arg(long, default_value_t = 10)]
    alert_threshold: usize,

    /// Minimum seconds between two IDS alerts
    #[arg(long, default_value_t = 5.0)]
    cooldown_secs: f64,

    /// Capacity of the IDS timestamp window
    #[arg(long, default_value_t = 100)]
    window_capacity: usize,

    /// Capacity of the packet audit log
    #[arg(long, default_value_t = 200)]
    log_capacity: usize,

    /// Capacity of the chart time/category series
    #[arg(long, default_value_t = 200)]
    series_capacity: usize,

    /// Run one synthetic attack scenario after startup
    #[arg(long, default_value_t = false)]
    scenario: bool,

    /// Fetch this URL once and record it as a forced capture
    #[arg(long)]
    capture_url: Option<String>,

    /// Seconds between stats snapshots on the log
    #[arg(long, default_value_t = 5)]
    stats_interval: u64,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args = Args::parse();
    info!("starting netdefend with settings: {:?}", args);

    let engine_cfg = EngineConfig {
        alert_threshold: args.alert_threshold,
        cooldown_secs: args.cooldown_secs,
        window_capacity: args.window_capacity,
        log_capacity: args.log_capacity,
        series_capacity: args.series_capacity,
        ..EngineConfig::default()
    };
    let rules = RuleSet::new(args.blocked_addrs.clone(), args.blocked_ports.clone());
    let engine = Arc::new(TrafficEngine::new(rules, &engine_cfg));

    // Ingestion listener task
    let listener_engine = engine.clone();
    let listen_addr = args.listen.clone();
    tokio::spawn(async move {
        if let Err(e) = listener::start_listener(&listen_addr, listener_engine).await {
            error!("ingestion listener error: {}", e);
        }
    });

    // Stats reporter: the read-only snapshot consumer polling the engine
    let stats_engine = engine.clone();
    let stats_interval = Duration::from_secs(args.stats_interval.max(1));
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(stats_interval);
        interval.tick().await; // first tick fires immediately, skip it
        loop {
            interval.tick().await;
            let stats = stats_engine.snapshot_stats();
            match serde_json::to_string(&stats) {
                Ok(json) => info!("stats: {} active={}", json, stats_engine.is_active()),
                Err(e) => error!("stats serialization failed: {}", e),
            }
        }
    });

    if let Some(url) = args.capture_url.clone() {
        match capture::capture_url(&engine, &url).await {
            Ok(record) => info!("capture verdict for {}: {:?}", url, record.verdict),
            Err(e) => error!("capture failed: {}", e),
        }
    }

    if args.scenario {
        let scenario_engine = engine.clone();
        tokio::spawn(async move {
            scenario::run_scenario(scenario_engine, ScenarioConfig::default()).await;
        });
    }

    tokio::signal::ctrl_c().await?;
    info!("Ctrl+C received, shutting down...");

    let stats = engine.snapshot_stats();
    let (times, categories) = engine.snapshot_series();
    info!(
        "final stats: {} ({} logged records, {} series points, {} categories)",
        serde_json::to_string(&stats)?,
        engine.snapshot_log(engine::DEFAULT_LOG_LIMIT).len(),
        times.len(),
        categories.len()
    );

    Ok(())
}
