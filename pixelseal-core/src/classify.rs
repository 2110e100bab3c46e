//! Distance-based tamper classification.

use serde::{Deserialize, Serialize};

use crate::fingerprint::Fingerprint;

/// Default Hamming-distance threshold separating benign re-encoding noise
/// from content-level edits. Lower values catch more tampering but also flag
/// legitimate recompression; higher values do the opposite.
pub const DEFAULT_TAMPER_THRESHOLD: u32 = 5;

/// Outcome of comparing the current fingerprint against the sealed one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Classification {
    /// Bit-for-bit identical perceptual content.
    Identical,
    /// Small drift consistent with re-encoding or the injected noise.
    Authentic,
    /// Drift beyond the threshold: edited or AI-modified content.
    Tampered,
}

impl std::fmt::Display for Classification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Classification::Identical => f.write_str("IDENTICAL"),
            Classification::Authentic => f.write_str("AUTHENTIC"),
            Classification::Tampered => f.write_str("TAMPERED"),
        }
    }
}

/// Applies the tamper-threshold policy to fingerprint distances.
#[derive(Debug, Clone, Copy)]
pub struct Classifier {
    threshold: u32,
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new(DEFAULT_TAMPER_THRESHOLD)
    }
}

impl Classifier {
    pub fn new(threshold: u32) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> u32 {
        self.threshold
    }

    /// Classify a raw Hamming distance.
    pub fn classify_distance(&self, distance: u32) -> Classification {
        if distance == 0 {
            Classification::Identical
        } else if distance < self.threshold {
            Classification::Authentic
        } else {
            Classification::Tampered
        }
    }

    /// Classify the distance between two fingerprints.
    pub fn classify(&self, sealed: &Fingerprint, current: &Fingerprint) -> Classification {
        self.classify_distance(sealed.hamming_distance(current))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_policy() {
        let classifier = Classifier::default();
        assert_eq!(classifier.classify_distance(0), Classification::Identical);
        assert_eq!(classifier.classify_distance(3), Classification::Authentic);
        assert_eq!(classifier.classify_distance(10), Classification::Tampered);
    }

    #[test]
    fn test_threshold_boundaries() {
        let classifier = Classifier::new(5);
        assert_eq!(classifier.classify_distance(1), Classification::Authentic);
        assert_eq!(classifier.classify_distance(4), Classification::Authentic);
        assert_eq!(classifier.classify_distance(5), Classification::Tampered);
    }

    #[test]
    fn test_custom_threshold() {
        let strict = Classifier::new(1);
        assert_eq!(strict.classify_distance(1), Classification::Tampered);

        let lenient = Classifier::new(20);
        assert_eq!(lenient.classify_distance(10), Classification::Authentic);
    }

    #[test]
    fn test_classify_fingerprints() {
        let classifier = Classifier::default();
        let a = Fingerprint::from_u64(0b1111);
        let b = Fingerprint::from_u64(0b1000);

        assert_eq!(classifier.classify(&a, &a), Classification::Identical);
        assert_eq!(classifier.classify(&a, &b), Classification::Authentic);
        assert_eq!(
            classifier.classify(&a, &Fingerprint::from_u64(!a.as_u64())),
            Classification::Tampered
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(Classification::Identical.to_string(), "IDENTICAL");
        assert_eq!(Classification::Authentic.to_string(), "AUTHENTIC");
        assert_eq!(Classification::Tampered.to_string(), "TAMPERED");
    }
}
