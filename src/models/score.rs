use serde::{Deserialize, Serialize};

/// Result of a quiz attempt. `total` is always the size of the bank,
/// unanswered questions count as incorrect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub correct: usize,
    pub total: usize,
}

impl Score {
    pub fn percentage(&self) -> f64 {
        if self.total > 0 {
            (self.correct as f64 / self.total as f64) * 100.0
        } else {
            0.0
        }
    }

    pub fn tier(&self) -> Tier {
        Tier::for_score(self.correct, self.total)
    }
}

/// Qualitative feedback bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tier {
    Excellent,
    Good,
    KeepPracticing,
}

impl Tier {
    /// Lowest percentage (inclusive) for each tier.
    pub const EXCELLENT_FROM: usize = 80;
    pub const GOOD_FROM: usize = 60;

    /// Compared in integers so that ratios like 4/5 land exactly on the
    /// breakpoint. An empty score is `KeepPracticing`.
    pub fn for_score(correct: usize, total: usize) -> Self {
        if total == 0 {
            return Tier::KeepPracticing;
        }
        let scaled = correct.saturating_mul(100);
        if scaled >= Self::EXCELLENT_FROM * total {
            Tier::Excellent
        } else if scaled >= Self::GOOD_FROM * total {
            Tier::Good
        } else {
            Tier::KeepPracticing
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Tier::Excellent => "Excellent work!",
            Tier::Good => "Good attempt!",
            Tier::KeepPracticing => "Keep practicing!",
        }
    }
}
