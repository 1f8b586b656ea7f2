// src/classifier.rs
/// What the classifier decided about a payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Normal,
    Malicious,
}

/// Content-signature matcher. A stand-in for real payload analysis: any
/// case-insensitive substring hit against the signature set marks the
/// payload malicious.
#[derive(Debug, Clone)]
pub struct Classifier {
    signatures: Vec<String>,
}

impl Classifier {
    /// Signatures are lowercased once here so `classify` only lowercases
    /// the payload. The set is fixed after construction; replacing it means
    /// building a new `Classifier`.
    pub fn new(signatures: Vec<String>) -> Self {
        Classifier {
            signatures: signatures.into_iter().map(|s| s.to_lowercase()).collect(),
        }
    }

    pub fn classify(&self, payload: &str) -> Category {
        if payload.is_empty() {
            return Category::Normal;
        }
        let lowered = payload.to_lowercase();
        if self.signatures.iter().any(|sig| lowered.contains(sig.as_str())) {
            Category::Malicious
        } else {
            Category::Normal
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_classifier() -> Classifier {
        Classifier::new(vec!["scan".to_string(), "flood".to_string()])
    }

    #[test]
    fn flags_signature_payloads() {
        let c = default_classifier();
        assert_eq!(c.classify("PORT SCAN ATTEMPT on port 5"), Category::Malicious);
        assert_eq!(c.classify("FLOOD PACKET #42"), Category::Malicious);
    }

    #[test]
    fn passes_benign_payloads() {
        let c = default_classifier();
        assert_eq!(c.classify("hello world"), Category::Normal);
        assert_eq!(c.classify("NORMAL PACKET"), Category::Normal);
    }

    #[test]
    fn empty_payload_is_normal() {
        assert_eq!(default_classifier().classify(""), Category::Normal);
    }

    #[test]
    fn matching_is_case_insensitive() {
        let c = default_classifier();
        assert_eq!(c.classify("FLOOD"), Category::Malicious);
        assert_eq!(c.classify("Scan"), Category::Malicious);
    }

    #[test]
    fn custom_signature_set_replaces_defaults() {
        let c = Classifier::new(vec!["EXFIL".to_string()]);
        assert_eq!(c.classify("exfil attempt"), Category::Malicious);
        assert_eq!(c.classify("port scan"), Category::Normal);
    }
}
