//! Scan progress counter.

use std::sync::atomic::{AtomicUsize, Ordering};

/// Fraction of candidates processed during a scan.
///
/// Written only by the scan's aggregation loop; any thread may read it.
#[derive(Debug)]
pub struct ScanProgress {
    completed: AtomicUsize,
    total: usize,
}

impl ScanProgress {
    pub fn new(total: usize) -> Self {
        Self {
            completed: AtomicUsize::new(0),
            total,
        }
    }

    /// Reset to zero for a new scan.
    pub(crate) fn reset(&self) {
        self.completed.store(0, Ordering::SeqCst);
    }

    /// Record one processed candidate. Saturates at `total`.
    pub(crate) fn advance(&self) -> f64 {
        let total = self.total;
        let _ = self
            .completed
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| {
                (n < total).then_some(n + 1)
            });
        self.fraction()
    }

    /// Candidates processed so far.
    pub fn completed(&self) -> usize {
        self.completed.load(Ordering::SeqCst)
    }

    pub fn total(&self) -> usize {
        self.total
    }

    /// `completed / total`, in `0.0..=1.0`.
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            return 1.0;
        }
        (self.completed() as f64 / self.total as f64).min(1.0)
    }

    pub fn is_complete(&self) -> bool {
        self.completed() >= self.total
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_reaches_one() {
        let progress = ScanProgress::new(4);
        assert_eq!(progress.fraction(), 0.0);

        let mut last = 0.0;
        for _ in 0..4 {
            let next = progress.advance();
            assert!(next >= last);
            last = next;
        }
        assert!((progress.fraction() - 1.0).abs() < f64::EPSILON);
        assert!(progress.is_complete());
    }

    #[test]
    fn test_advance_saturates() {
        let progress = ScanProgress::new(2);
        progress.advance();
        progress.advance();
        progress.advance();
        assert_eq!(progress.completed(), 2);
        assert!(progress.fraction() <= 1.0);
    }

    #[test]
    fn test_reset() {
        let progress = ScanProgress::new(2);
        progress.advance();
        progress.reset();
        assert_eq!(progress.completed(), 0);
        assert!(!progress.is_complete());
    }
}
