//! Match counters, compiled in with the `metrics` feature.

use std::sync::atomic::{AtomicU64, Ordering};

/// Point-in-time view of a matcher's counters.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct MatchMetrics {
    /// Number of inputs run against the expression
    pub attempts: u64,
    /// Number of inputs that matched
    pub matches: u64,
    /// Number of typed extractions aborted by a conversion or type error
    pub conversion_failures: u64,
}

impl MatchMetrics {
    pub fn match_rate(&self) -> f64 {
        if self.attempts == 0 {
            0.0
        } else {
            self.matches as f64 / self.attempts as f64
        }
    }
}

/// Live counters shared by every clone of a matcher.
#[derive(Debug, Default)]
pub(crate) struct MatchCounters {
    attempts: AtomicU64,
    matches: AtomicU64,
    conversion_failures: AtomicU64,
}

impl MatchCounters {
    #[inline]
    pub(crate) fn record(&self, matched: bool) {
        self.attempts.fetch_add(1, Ordering::Relaxed);
        if matched {
            self.matches.fetch_add(1, Ordering::Relaxed);
        }
    }

    #[inline]
    pub(crate) fn record_conversion_failure(&self) {
        self.conversion_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn snapshot(&self) -> MatchMetrics {
        MatchMetrics {
            attempts: self.attempts.load(Ordering::Relaxed),
            matches: self.matches.load(Ordering::Relaxed),
            conversion_failures: self.conversion_failures.load(Ordering::Relaxed),
        }
    }

    pub(crate) fn reset(&self) {
        self.attempts.store(0, Ordering::Relaxed);
        self.matches.store(0, Ordering::Relaxed);
        self.conversion_failures.store(0, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters() {
        let counters = MatchCounters::default();
        counters.record(true);
        counters.record(false);
        counters.record(true);
        counters.record_conversion_failure();

        let metrics = counters.snapshot();
        assert_eq!(metrics.attempts, 3);
        assert_eq!(metrics.matches, 2);
        assert_eq!(metrics.conversion_failures, 1);
        assert!((metrics.match_rate() - 2.0 / 3.0).abs() < f64::EPSILON);

        counters.reset();
        assert_eq!(counters.snapshot(), MatchMetrics::default());
    }

    #[test]
    fn test_empty_match_rate() {
        assert_eq!(MatchMetrics::default().match_rate(), 0.0);
    }
}
