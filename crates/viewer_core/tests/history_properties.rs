use proptest::prelude::*;
use viewer_core::{JumpStack, MessageId, ReturnProbe};

fn ascending_stack() -> impl Strategy<Value = Vec<MessageId>> {
    proptest::collection::btree_set(1u64..500, 0..12)
        .prop_map(|set| set.into_iter().map(MessageId).collect())
}

proptest! {
    #[test]
    fn record_jump_supersedes_entries_at_or_below_origin(
        entries in ascending_stack(),
        from in 1u64..500,
        to in 1u64..500,
    ) {
        let from = MessageId(from);
        let to = MessageId(to);
        let mut stack = JumpStack::from_entries(entries.clone());
        stack.record_jump(from, to);

        let mut expected: Vec<MessageId> = entries.into_iter().filter(|id| *id > from).collect();
        expected.push(from);
        expected.push(to);
        prop_assert_eq!(stack.entries(), expected.as_slice());
        prop_assert_eq!(stack.top(), Some(to));
    }

    #[test]
    fn prune_keeps_exactly_the_entries_above_minimum(
        entries in ascending_stack(),
        min in 1u64..500,
    ) {
        let min = MessageId(min);
        let mut stack = JumpStack::from_entries(entries.clone());
        stack.prune(Some(min));

        prop_assert!(stack.entries().iter().all(|id| *id > min));
        let survivors: Vec<MessageId> = entries.into_iter().filter(|id| *id > min).collect();
        prop_assert_eq!(stack.entries(), survivors.as_slice());
    }

    #[test]
    fn prune_without_minimum_changes_nothing(entries in ascending_stack()) {
        let mut stack = JumpStack::from_entries(entries.clone());
        prop_assert_eq!(stack.prune(None), 0);
        prop_assert_eq!(stack.entries(), entries.as_slice());
    }

    #[test]
    fn return_pops_one_or_two_and_never_underflows(
        entries in ascending_stack(),
        at_bottom in any::<bool>(),
        aligned_on_top in any::<bool>(),
    ) {
        let mut stack = JumpStack::from_entries(entries.clone());
        let probe = ReturnProbe {
            top_aligned: if aligned_on_top { stack.top() } else { None },
            at_bottom,
        };
        let double = entries.len() >= 2 && (at_bottom || aligned_on_top);
        let popped = stack.return_to_last_jump(probe);

        let expected_count = if double { 2 } else { entries.len().min(1) };
        prop_assert_eq!(popped.len(), expected_count);
        prop_assert_eq!(stack.len(), entries.len() - expected_count);
        let mut reversed: Vec<MessageId> = entries[stack.len()..].to_vec();
        reversed.reverse();
        prop_assert_eq!(popped, reversed);
    }
}
