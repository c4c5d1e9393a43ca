use proptest::prelude::*;

/// Strategy for generating a single event label (never empty, never containing the separator)
pub fn event_label_strategy() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_]{0,11}"
}

/// Strategy for generating one non-empty batch of event labels
pub fn batch_events_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(event_label_strategy(), 1..8)
}

/// Strategy for generating a non-empty list of non-empty batches
pub fn batches_strategy() -> impl Strategy<Value = Vec<Vec<String>>> {
    prop::collection::vec(batch_events_strategy(), 1..10)
}

/// Strategy for generating batches plus the index of one batch to sabotage
pub fn batches_with_target_strategy() -> impl Strategy<Value = (Vec<Vec<String>>, usize)> {
    batches_strategy().prop_flat_map(|batches| {
        let len = batches.len();
        (Just(batches), 0..len)
    })
}
