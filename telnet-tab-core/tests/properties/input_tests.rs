//! Property tests for recent input tracking and termination detection

use proptest::prelude::*;
use telnet_tab_core::session::{RecentInputTracker, TerminationMatcher};

fn chunks_strategy() -> impl Strategy<Value = Vec<Vec<u8>>> {
    prop::collection::vec(prop::collection::vec(any::<u8>(), 0..40), 0..20)
}

proptest! {
    /// The tracker never exceeds its capacity and always keeps the newest bytes
    #[test]
    fn keeps_trailing_window(capacity in 1usize..128, chunks in chunks_strategy()) {
        let mut tracker = RecentInputTracker::with_capacity(capacity);
        let mut all = Vec::new();
        for chunk in &chunks {
            tracker.push(chunk);
            all.extend_from_slice(chunk);
            prop_assert!(tracker.len() <= capacity);
        }
        let start = all.len().saturating_sub(capacity);
        prop_assert_eq!(tracker.to_vec(), all[start..].to_vec());
    }

    /// Chunk boundaries do not affect suffix matching
    #[test]
    fn suffix_independent_of_chunking(data in prop::collection::vec(any::<u8>(), 0..100), split in 0usize..100) {
        let split = split.min(data.len());
        let mut whole = RecentInputTracker::new();
        whole.push(&data);
        let mut parts = RecentInputTracker::new();
        parts.push(&data[..split]);
        parts.push(&data[split..]);
        prop_assert_eq!(whole.to_vec(), parts.to_vec());
    }

    /// Typing a termination command last always counts as explicit
    #[test]
    fn trailing_command_is_detected(
        prefix in prop::collection::vec(any::<u8>(), 0..200),
        command in prop::sample::select(vec!["close\r", "quit\r"]),
    ) {
        let mut tracker = RecentInputTracker::new();
        tracker.push(&prefix);
        tracker.push(command.as_bytes());
        prop_assert!(TerminationMatcher::default().matches(&tracker));
    }

    /// Anything typed after the command cancels the match
    #[test]
    fn later_input_cancels_detection(
        command in prop::sample::select(vec!["close\r", "quit\r"]),
        tail in "[a-z]{1,8}",
    ) {
        let mut tracker = RecentInputTracker::new();
        tracker.push(command.as_bytes());
        tracker.push(tail.as_bytes());
        prop_assert!(!TerminationMatcher::default().matches(&tracker));
    }
}
