// src/config.rs
use std::time::Duration;

/// Tunables for the detection engine, fixed for the lifetime of a run.
///
/// Defaults mirror the reference deployment: an alert fires when 10 events
/// land inside one second, debounced by a 5 second cooldown, with 80/443
/// blocked at the firewall.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Number of events inside the density window that constitutes a burst.
    pub alert_threshold: usize,
    /// Minimum spacing between two consecutive IDS alerts, in seconds.
    pub cooldown_secs: f64,
    /// Capacity of the sliding window of event timestamps fed to the IDS.
    pub window_capacity: usize,
    /// Capacity of the packet audit log.
    pub log_capacity: usize,
    /// Capacity of the time/category series handed to the dashboard.
    pub series_capacity: usize,
    /// Lowercase content signatures; any substring match marks a payload malicious.
    pub signatures: Vec<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            alert_threshold: 10,
            cooldown_secs: 5.0,
            window_capacity: 100,
            log_capacity: 200,
            series_capacity: 200,
            signatures: vec!["scan".to_string(), "flood".to_string()],
        }
    }
}

/// Pacing and duration of the synthetic attack scenario.
///
/// Tests zero out the pacing so a full scenario finishes in one scheduler pass.
#[derive(Debug, Clone)]
pub struct ScenarioConfig {
    /// Delay between successive port-scan probes.
    pub scan_pacing: Duration,
    /// Delay between successive flood packets.
    pub flood_pacing: Duration,
    /// Wall-clock length of the flood phase.
    pub flood_duration: Duration,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        ScenarioConfig {
            scan_pacing: Duration::from_millis(5),
            flood_pacing: Duration::from_millis(10),
            flood_duration: Duration::from_secs(5),
        }
    }
}
