// src/scenario.rs
use log::info;
use rand::Rng;
use std::sync::Arc;
use std::time::Instant;

use crate::config::ScenarioConfig;
use crate::engine::TrafficEngine;

/// Drives one synthetic attack against the engine: a low-rate port scan
/// followed by a timed flood, with the occasional event aimed straight at a
/// blocked port so the firewall path shows up in the stats.
///
/// Resets the engine and activates it for the duration; the engine returns
/// to idle when the scenario completes. The task only ever calls `submit`,
/// so aborting it mid-run leaves the engine consistent.
pub async fn run_scenario(engine: Arc<TrafficEngine>, cfg: ScenarioConfig) {
    engine.reset();
    engine.set_active(true);

    let attacker_addr = format!("192.168.0.{}", rand::thread_rng().gen_range(2..=254));
    let blocked_port = engine.firewall().sample_blocked_port();

    info!("[SIM] port scan starting from {}", attacker_addr);
    for port in (1..1025u16).step_by(50) {
        // Every fourth probe targets a blocked port to exercise the firewall.
        let target = match blocked_port {
            Some(blocked) if port % 200 == 1 => blocked,
            _ => port,
        };
        let payload = format!("PORT SCAN ATTEMPT on port {}", port);
        engine.submit(&attacker_addr, target, &payload, false);
        tokio::time::sleep(cfg.scan_pacing).await;
    }

    info!("[SIM] flood attack starting");
    let flood_start = Instant::now();
    loop {
        if flood_start.elapsed() >= cfg.flood_duration {
            break;
        }
        let (payload, dest_port) = {
            let mut rng = rand::thread_rng();
            let payload = if rng.gen_bool(0.2) {
                "NORMAL PACKET"
            } else {
                "FLOOD PACKET"
            };
            // Occasionally the firewall drops a flood packet.
            let dest_port = match blocked_port {
                Some(blocked) if rng.gen_bool(0.12) => blocked,
                _ => rng.gen_range(1000..65000u16),
            };
            (payload, dest_port)
        };
        engine.submit(&attacker_addr, dest_port, payload, false);
        tokio::time::sleep(cfg.flood_pacing).await;
    }

    engine.set_active(false);
    let stats = engine.snapshot_stats();
    info!(
        "[SIM] scenario complete: normal={} malicious={} blocked={} load={}",
        stats.normal, stats.malicious, stats.blocked, stats.load
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use crate::firewall::RuleSet;
    use std::time::Duration;

    fn fresh_engine() -> Arc<TrafficEngine> {
        Arc::new(TrafficEngine::new(
            RuleSet::new(vec![], vec![80, 443]),
            &EngineConfig::default(),
        ))
    }

    fn fast_scenario() -> ScenarioConfig {
        ScenarioConfig {
            scan_pacing: Duration::ZERO,
            flood_pacing: Duration::from_millis(1),
            flood_duration: Duration::from_millis(50),
        }
    }

    #[tokio::test]
    async fn scenario_end_to_end() {
        let engine = fresh_engine();
        run_scenario(engine.clone(), fast_scenario()).await;

        let stats = engine.snapshot_stats();
        assert!(stats.malicious >= 1, "scan probes classify as malicious");
        assert!(stats.blocked >= 1, "forced probes hit the firewall");
        assert!(!engine.is_active(), "engine returns to idle on completion");
        assert!(!engine.snapshot_log(200).is_empty());
    }

    #[tokio::test]
    async fn blocked_probes_log_the_swept_port() {
        let engine = fresh_engine();
        // Scan phase only, so every record carries a scan payload.
        run_scenario(
            engine.clone(),
            ScenarioConfig {
                scan_pacing: Duration::ZERO,
                flood_pacing: Duration::ZERO,
                flood_duration: Duration::ZERO,
            },
        )
        .await;

        let blocked: Vec<_> = engine
            .snapshot_log(200)
            .into_iter()
            .filter(|r| r.reason.is_some())
            .collect();
        assert!(!blocked.is_empty());
        for record in blocked {
            let swept: u16 = record
                .payload
                .rsplit(' ')
                .next()
                .unwrap()
                .parse()
                .expect("scan payload ends with the swept port");
            assert_eq!(swept % 200, 1, "payload names the swept port: {}", record.payload);
        }
    }

    #[tokio::test]
    async fn scenario_resets_previous_run() {
        let engine = fresh_engine();
        engine.set_active(true);
        engine.submit("10.0.0.1", 5000, "leftover", false);
        run_scenario(engine.clone(), fast_scenario()).await;

        // The implicit reset wiped the leftover before the scan began.
        let log = engine.snapshot_log(200);
        assert!(log.iter().all(|r| r.payload != "leftover"));
    }

    #[tokio::test]
    async fn scenario_without_blocked_ports_still_completes() {
        let engine = Arc::new(TrafficEngine::new(
            RuleSet::default(),
            &EngineConfig::default(),
        ));
        run_scenario(engine.clone(), fast_scenario()).await;
        let stats = engine.snapshot_stats();
        assert_eq!(stats.blocked, 0);
        assert!(stats.malicious >= 1);
    }
}
