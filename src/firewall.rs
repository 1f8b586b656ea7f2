// src/firewall.rs
use std::collections::HashSet;

/// Static firewall rules, loaded once at startup.
///
/// Swapping rules mid-run means building a new `RuleSet` and replacing the
/// whole value; there is no partial mutation for concurrent readers to see.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    blocked_addrs: HashSet<String>,
    blocked_ports: HashSet<u16>,
}

impl RuleSet {
    pub fn new(blocked_addrs: Vec<String>, blocked_ports: Vec<u16>) -> Self {
        RuleSet {
            blocked_addrs: blocked_addrs.into_iter().collect(),
            blocked_ports: blocked_ports.into_iter().collect(),
        }
    }

    /// True iff the source address or the destination port matches a rule.
    pub fn is_blocked(&self, addr: &str, port: u16) -> bool {
        self.blocked_addrs.contains(addr) || self.blocked_ports.contains(&port)
    }

    /// An arbitrary blocked port, if any rule names one. The scenario driver
    /// uses this to aim traffic at the firewall on purpose.
    pub fn sample_blocked_port(&self) -> Option<u16> {
        self.blocked_ports.iter().copied().next()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules() -> RuleSet {
        RuleSet::new(vec!["10.0.0.66".to_string()], vec![80, 443])
    }

    #[test]
    fn blocks_listed_ports() {
        let r = rules();
        assert!(r.is_blocked("192.168.0.5", 80));
        assert!(r.is_blocked("192.168.0.5", 443));
        assert!(!r.is_blocked("192.168.0.5", 8080));
    }

    #[test]
    fn blocks_listed_addresses_on_any_port() {
        let r = rules();
        assert!(r.is_blocked("10.0.0.66", 12345));
        assert!(!r.is_blocked("10.0.0.67", 12345));
    }

    #[test]
    fn empty_ruleset_blocks_nothing() {
        let r = RuleSet::default();
        assert!(!r.is_blocked("10.0.0.66", 80));
        assert_eq!(r.sample_blocked_port(), None);
    }
}
