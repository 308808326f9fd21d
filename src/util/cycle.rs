use std::{collections::HashMap, hash::Hash};

/// A detected recurrence in a stepped simulation.
#[cfg_attr(test, derive(Debug, PartialEq))]
pub struct Cycle<S> {
    /// The step at which the fingerprint was first recorded.
    pub first_step: u64,

    /// `recurrence step - first_step`.
    pub length: u64,

    /// The snapshot recorded alongside the first occurrence, for computing per-cycle deltas of
    /// monotone accumulators.
    pub snapshot: S,
}

/// Detects when a stepped simulation re-enters a previously seen state, so the caller can
/// fast-forward over an otherwise intractable number of steps.
///
/// The fingerprint must capture enough local state that its recurrence implies the entire future
/// trajectory recurs identically. A window that misses relevant state produces a wrong final
/// answer with no runtime signal, so the window size is a correctness-critical parameter of each
/// caller, not a constant to copy.
pub struct CycleDetector<F, S> {
    seen: HashMap<F, (u64, S)>,
    armed: bool,
}

impl<F: Eq + Hash, S: Clone> CycleDetector<F, S> {
    pub fn new() -> Self {
        Self {
            seen: HashMap::new(),
            armed: true,
        }
    }

    /// Records the fingerprint at `step`, or reports the cycle if it was already recorded.
    ///
    /// Only one cycle is ever reported: a single fast-forward is all a caller needs, so the first
    /// hit disarms the detector and every later call is a cheap no-op.
    pub fn observe(&mut self, fingerprint: F, step: u64, snapshot: S) -> Option<Cycle<S>> {
        if !self.armed {
            return None;
        }

        match self.seen.get(&fingerprint) {
            Some((first_step, first_snapshot)) => {
                self.armed = false;

                Some(Cycle {
                    first_step: *first_step,
                    length: step - *first_step,
                    snapshot: first_snapshot.clone(),
                })
            }
            None => {
                self.seen.insert(fingerprint, (step, snapshot));

                None
            }
        }
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }
}

impl<F: Eq + Hash, S: Clone> Default for CycleDetector<F, S> {
    fn default() -> Self {
        Self::new()
    }
}

/// How many whole cycles fit between the current and target step counts.
pub const fn whole_cycles_remaining(current_step: u64, target_step: u64, cycle_length: u64) -> u64 {
    (target_step - current_step) / cycle_length
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Per-step height deltas with period 3, summing to 5 per cycle.
    const DELTAS: [u64; 3_usize] = [1_u64, 3_u64, 1_u64];
    const TARGET_STEPS: u64 = 100_u64;

    fn run_slow() -> u64 {
        (0_u64..TARGET_STEPS).fold(0_u64, |height, step| {
            height + DELTAS[(step % 3_u64) as usize]
        })
    }

    fn run_fast_forwarded() -> u64 {
        let mut cycle_detector: CycleDetector<u64, u64> = CycleDetector::new();
        let mut step: u64 = 0_u64;
        let mut height: u64 = 0_u64;
        let mut fast_forwarded: bool = false;

        while step < TARGET_STEPS {
            height += DELTAS[(step % 3_u64) as usize];
            step += 1_u64;

            if let Some(cycle) = cycle_detector.observe(step % 3_u64, step, height) {
                let cycles: u64 = whole_cycles_remaining(step, TARGET_STEPS, cycle.length);
                let height_per_cycle: u64 = height - cycle.snapshot;

                assert_eq!(cycle.length, 3_u64);
                assert_eq!(height_per_cycle, 5_u64);

                height += cycles * height_per_cycle;
                step += cycles * cycle.length;
                fast_forwarded = true;
            }
        }

        assert!(fast_forwarded);
        assert_eq!(step, TARGET_STEPS);

        height
    }

    #[test]
    fn test_fast_forward_matches_stepping() {
        assert_eq!(run_fast_forwarded(), run_slow());
    }

    #[test]
    fn test_detector_reports_once() {
        let mut cycle_detector: CycleDetector<u8, ()> = CycleDetector::new();

        assert_eq!(cycle_detector.observe(0_u8, 0_u64, ()), None);
        assert_eq!(
            cycle_detector.observe(0_u8, 4_u64, ()),
            Some(Cycle {
                first_step: 0_u64,
                length: 4_u64,
                snapshot: ()
            })
        );
        assert!(!cycle_detector.is_armed());

        // Disarmed: recurrences are no longer reported, nor recorded.
        assert_eq!(cycle_detector.observe(0_u8, 8_u64, ()), None);
        assert_eq!(cycle_detector.observe(1_u8, 9_u64, ()), None);
    }
}
