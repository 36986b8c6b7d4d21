//! Property-based tests for event accounting invariants.

use freefall_event::prelude::*;
use proptest::prelude::*;

#[derive(Debug, Clone, Copy)]
enum Op {
    Event,
    Drain,
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![3 => Just(Op::Event), 1 => Just(Op::Drain)]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_drains_sum_to_event_count(ops in prop::collection::vec(op(), 0..250)) {
        let channel = EventChannel::new();
        let producer = channel.producer();
        let mut handle = channel.open().map_err(|e| TestCaseError::fail(e.to_string()))?;

        let mut produced = 0u64;
        let mut drained = 0u64;
        for op in ops {
            match op {
                Op::Event => {
                    producer.on_hardware_event();
                    produced += 1;
                }
                Op::Drain => match handle.read(ReadMode::NonBlocking) {
                    Ok(count) => drained += u64::from(count.get()),
                    Err(err) => prop_assert_eq!(err, ReadError::WouldBlock),
                },
            }
        }
        if let Ok(count) = handle.read(ReadMode::NonBlocking) {
            drained += u64::from(count.get());
        }

        prop_assert_eq!(drained, produced);
    }

    #[test]
    fn prop_clamp_matches_byte_range(raw in any::<u64>()) {
        let count = DrainedCount::from_raw(raw);
        match raw {
            0 => prop_assert!(count.is_none()),
            1..=254 => prop_assert_eq!(count.map(|c| u64::from(c.get())), Some(raw)),
            _ => prop_assert_eq!(count, Some(DrainedCount::MAX)),
        }
    }

    #[test]
    fn prop_empty_channel_never_yields_data(reads in 1usize..20) {
        let channel = EventChannel::new();
        let mut handle = channel.open().map_err(|e| TestCaseError::fail(e.to_string()))?;
        for _ in 0..reads {
            prop_assert_eq!(handle.read(ReadMode::NonBlocking), Err(ReadError::WouldBlock));
        }
    }
}
