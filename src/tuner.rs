//! Adaptive serving knobs driven by recent latency observations
//!
//! A deliberately crude cost model: one threshold per observation, no
//! smoothing, no hysteresis. Only the immediately preceding request's
//! latencies are consulted.

use serde::{Deserialize, Serialize};

/// Fraction of the budget above which generation counts as expensive
const GEN_PRESSURE: f64 = 0.55;

/// Fraction of the budget above which retrieval counts as the bottleneck
const RETRIEVAL_PRESSURE: f64 = 0.25;

/// Per-request serving configuration chosen by the tuner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Knobs {
    /// Result-set size requested from the retriever
    pub top_k: usize,

    /// Micro-batch size hint; computed but consumed by nothing downstream
    pub batch: usize,

    /// Degraded-quality, lower-latency serving mode
    pub cheap_mode: bool,
}

impl Default for Knobs {
    fn default() -> Self {
        Self {
            top_k: 8,
            batch: 8,
            cheap_mode: false,
        }
    }
}

/// Pick the next request's knobs from the latest latency pair
///
/// If recent generation latency exceeds 55% of the budget, shrink the
/// result set and switch to cheap mode. If recent retrieval latency exceeds
/// 25% of the budget, widen the (informational) micro-batch.
pub fn select_knobs(budget_ms: f64, recent_retrieval_ms: f64, recent_gen_ms: f64) -> Knobs {
    let (top_k, cheap_mode) = if recent_gen_ms > budget_ms * GEN_PRESSURE {
        (6, true)
    } else {
        (10, false)
    };

    let batch = if recent_retrieval_ms > budget_ms * RETRIEVAL_PRESSURE {
        16
    } else {
        8
    };

    Knobs {
        top_k,
        batch,
        cheap_mode,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expensive_generation_enables_cheap_mode() {
        // 25 > 0.55 * 40 = 22, 5 <= 0.25 * 40 = 10
        let knobs = select_knobs(40.0, 5.0, 25.0);
        assert!(knobs.cheap_mode);
        assert_eq!(knobs.top_k, 6);
        assert_eq!(knobs.batch, 8);
    }

    #[test]
    fn test_slow_retrieval_widens_batch() {
        // 20 > 0.25 * 40 = 10, 10 <= 0.55 * 40 = 22
        let knobs = select_knobs(40.0, 20.0, 10.0);
        assert!(!knobs.cheap_mode);
        assert_eq!(knobs.top_k, 10);
        assert_eq!(knobs.batch, 16);
    }

    #[test]
    fn test_thresholds_are_strict_inequalities() {
        let knobs = select_knobs(40.0, 10.0, 22.0);
        assert!(!knobs.cheap_mode);
        assert_eq!(knobs.top_k, 10);
        assert_eq!(knobs.batch, 8);
    }

    #[test]
    fn test_both_pressures_combine() {
        let knobs = select_knobs(40.0, 15.0, 30.0);
        assert!(knobs.cheap_mode);
        assert_eq!(knobs.top_k, 6);
        assert_eq!(knobs.batch, 16);
    }

    #[test]
    fn test_pure_function() {
        assert_eq!(select_knobs(40.0, 8.0, 18.0), select_knobs(40.0, 8.0, 18.0));
    }
}
