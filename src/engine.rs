// src/engine.rs
use chrono::{DateTime, Utc};
use log::{debug, info, warn};
use serde::Serialize;
use std::sync::Mutex;
use std::time::Instant;

use crate::classifier::{Category, Classifier};
use crate::config::EngineConfig;
use crate::firewall::RuleSet;
use crate::history::History;
use crate::rate::RateMonitor;

/// Default number of records returned by [`TrafficEngine::snapshot_log`].
pub const DEFAULT_LOG_LIMIT: usize = 200;

/// Final disposition of an inbound event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Normal,
    Malicious,
    Blocked,
}

impl From<Category> for Verdict {
    fn from(category: Category) -> Self {
        match category {
            Category::Normal => Verdict::Normal,
            Category::Malicious => Verdict::Malicious,
        }
    }
}

/// One classified inbound event, immutable once built. Only the engine
/// creates these; the audit log owns them until eviction.
#[derive(Debug, Clone, Serialize)]
pub struct PacketRecord {
    pub source_addr: String,
    pub source_port: u16,
    /// Monotonic seconds since engine start; orders records and feeds the IDS.
    pub timestamp: f64,
    /// Wall-clock receipt time, for display in the audit log.
    pub received_at: DateTime<Utc>,
    pub payload: String,
    pub verdict: Verdict,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Copy-out of the engine counters. Monotonically non-decreasing between
/// resets; `load` counts IDS alerts raised.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatsSnapshot {
    pub normal: u64,
    pub malicious: u64,
    pub blocked: u64,
    pub load: u64,
}

/// Everything `submit` mutates, kept behind one lock so a submission is
/// atomic as a unit: a snapshot reader can never see a counter bumped
/// without its matching log entry.
struct EngineState {
    active: bool,
    stats: StatsSnapshot,
    log: History<PacketRecord>,
    times: History<f64>,
    categories: History<Verdict>,
    monitor: RateMonitor,
}

/// Orchestrates firewall, classifier, and IDS for every inbound event, and
/// owns all shared counters and buffers. Shared across tasks as
/// `Arc<TrafficEngine>`; the internal lock is never held across an await.
pub struct TrafficEngine {
    firewall: RuleSet,
    classifier: Classifier,
    started: Instant,
    state: Mutex<EngineState>,
}

impl TrafficEngine {
    pub fn new(firewall: RuleSet, cfg: &EngineConfig) -> Self {
        TrafficEngine {
            firewall,
            classifier: Classifier::new(cfg.signatures.clone()),
            started: Instant::now(),
            state: Mutex::new(EngineState {
                active: false,
                stats: StatsSnapshot::default(),
                log: History::new(cfg.log_capacity),
                times: History::new(cfg.series_capacity),
                categories: History::new(cfg.series_capacity),
                monitor: RateMonitor::new(
                    cfg.window_capacity,
                    cfg.alert_threshold,
                    cfg.cooldown_secs,
                ),
            }),
        }
    }

    /// Monotonic seconds since the engine was created.
    fn now(&self) -> f64 {
        self.started.elapsed().as_secs_f64()
    }

    pub fn firewall(&self) -> &RuleSet {
        &self.firewall
    }

    /// Runs one inbound event through the pipeline: firewall, then classifier,
    /// then the audit log and IDS.
    ///
    /// Returns `None` when the engine is idle and `force` is false; events are
    /// deliberately dropped outside a running scenario so each run's log only
    /// reflects that run. Forced submissions (external captures) always record.
    pub fn submit(
        &self,
        source_addr: &str,
        source_port: u16,
        payload: &str,
        force: bool,
    ) -> Option<PacketRecord> {
        let mut state = self.state.lock().unwrap();
        if !state.active && !force {
            return None;
        }
        let now = self.now();

        let record = if self.firewall.is_blocked(source_addr, source_port) {
            info!("[FW] blocked {}:{}", source_addr, source_port);
            state.stats.blocked += 1;
            state.categories.push(Verdict::Blocked);
            PacketRecord {
                source_addr: source_addr.to_string(),
                source_port,
                timestamp: now,
                received_at: Utc::now(),
                payload: payload.to_string(),
                verdict: Verdict::Blocked,
                reason: Some("blocked by firewall rules".to_string()),
            }
        } else {
            let category = self.classifier.classify(payload);
            let verdict = Verdict::from(category);
            debug!(
                "[PKT] {}:{} -> {:?}: {}",
                source_addr,
                source_port,
                verdict,
                payload.chars().take(60).collect::<String>()
            );
            match category {
                Category::Malicious => state.stats.malicious += 1,
                Category::Normal => state.stats.normal += 1,
            }
            state.times.push(now);
            state.categories.push(verdict);
            PacketRecord {
                source_addr: source_addr.to_string(),
                source_port,
                timestamp: now,
                received_at: Utc::now(),
                payload: payload.to_string(),
                verdict,
                reason: None,
            }
        };

        state.log.push(record.clone());
        if state.monitor.observe(now) {
            state.stats.load += 1;
            warn!("[IDS] traffic spike detected, possible flood attack");
        }
        Some(record)
    }

    /// Clears all counters, buffers, and IDS state and returns to idle.
    pub fn reset(&self) {
        let mut state = self.state.lock().unwrap();
        state.active = false;
        state.stats = StatsSnapshot::default();
        state.log.clear();
        state.times.clear();
        state.categories.clear();
        state.monitor.clear();
        info!("engine state reset");
    }

    /// Toggles whether `submit` records events; scenarios bound their effect
    /// on the log by flipping this around their run.
    pub fn set_active(&self, active: bool) {
        self.state.lock().unwrap().active = active;
    }

    pub fn is_active(&self) -> bool {
        self.state.lock().unwrap().active
    }

    pub fn snapshot_stats(&self) -> StatsSnapshot {
        self.state.lock().unwrap().stats
    }

    /// The most recent `limit` records in arrival order.
    pub fn snapshot_log(&self, limit: usize) -> Vec<PacketRecord> {
        self.state.lock().unwrap().log.snapshot(limit)
    }

    /// The chart window consumed by the dashboard collaborator: event times
    /// for classified traffic plus the category sequence including blocks.
    pub fn snapshot_series(&self) -> (Vec<f64>, Vec<Verdict>) {
        let state = self.state.lock().unwrap();
        (
            state.times.snapshot(usize::MAX),
            state.categories.snapshot(usize::MAX),
        )
    }
}
