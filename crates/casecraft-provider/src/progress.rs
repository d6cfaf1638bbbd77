// SPDX-License-Identifier: MIT OR Apache-2.0
//! Simulated progress curve for non-streaming generation calls.
//!
//! Non-streaming providers give no feedback until the whole response
//! arrives, so the scheduler reports a simulated completion percentage
//! instead of leaving the user staring at a blank progress bar. The curve
//! follows four fixed stages; a retry rolls back from the last stage
//! rather than restarting at zero, so the user sees an honest regression
//! instead of the bar snapping back to empty.

/// The four fixed stage percentages of the simulated curve.
pub const STAGES: [u8; 4] = [10, 80, 90, 100];

/// Compute the rollback percentage applied to `last_percent` at the start
/// of a retry: 30% of the current value, with a floor of 10 points.
#[must_use]
pub fn rollback(last_percent: u8) -> u8 {
    let drop = ((last_percent as u32 * 3).div_ceil(10)).max(10);
    last_percent.saturating_sub(drop.min(u8::MAX as u32) as u8)
}

/// The sequence of percentages to emit, in order, for the given zero-indexed
/// retry `attempt`. Attempt `0` emits the stages verbatim; subsequent
/// attempts begin with a rolled-back value and only emit stages above it.
#[must_use]
pub fn progress_sequence(attempt: u32) -> Vec<u8> {
    if attempt == 0 {
        return STAGES.to_vec();
    }

    let start = rollback(STAGES[STAGES.len() - 1]);
    let mut seq = vec![start];
    seq.extend(STAGES.iter().copied().filter(|&p| p > start));
    seq
}

/// Emit `sequence` to `sink` with a short delay between steps, so a caller
/// awaiting this future observes the same pacing a real generation call
/// would produce.
pub async fn emit(sequence: &[u8], sink: &dyn super::client::ProgressSink) {
    for &percent in sequence {
        sink.on_percent(percent);
        tokio::time::sleep(std::time::Duration::from_millis(1)).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_attempt_emits_stages_verbatim() {
        assert_eq!(progress_sequence(0), vec![10, 80, 90, 100]);
    }

    #[test]
    fn rollback_is_thirty_percent_of_current() {
        assert_eq!(rollback(100), 70);
        assert_eq!(rollback(80), 56);
    }

    #[test]
    fn rollback_floors_at_ten_points() {
        // 30% of 20 is 6, below the 10-point floor.
        assert_eq!(rollback(20), 10);
    }

    #[test]
    fn retry_sequence_starts_below_full_and_climbs_back() {
        let seq = progress_sequence(1);
        assert_eq!(seq, vec![70, 80, 90, 100]);
        assert!(seq.windows(2).all(|w| w[0] < w[1]));
    }
}
