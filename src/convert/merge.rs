//! Pairing of send and receive events describing the same wire message

use crate::event::MidiEvent;

/// Merge translated send and receive events into one ordered list
///
/// A receive event is folded into the first send event carrying the same wire
/// message that has no receive function yet. Unmatched receive events come
/// first, followed by all send events, each list in its input order.
pub fn merge_events(mut send: Vec<MidiEvent>, receive: Vec<MidiEvent>) -> Vec<MidiEvent> {
    let mut merged = Vec::with_capacity(send.len() + receive.len());

    for event in receive {
        match send
            .iter_mut()
            .find(|candidate| candidate.receive_function.is_none() && candidate.same_message(&event))
        {
            Some(pair) => {
                pair.receive_function = event.receive_function;
                pair.debounce_time = event.debounce_time;
            }
            None => merged.push(event),
        }
    }

    merged.extend(send);
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{EventType, Function};
    use proptest::prelude::*;

    fn sent(number: i32) -> MidiEvent {
        MidiEvent::send(1, 1, Function::On, EventType::ControlChange)
            .with_number(number)
            .with_min_and_max(127)
    }

    fn received(number: i32, debounce: u32) -> MidiEvent {
        MidiEvent::receive(1, 1, debounce, Function::Toggle, EventType::ControlChange)
            .with_number(number)
            .with_min_and_max(127)
    }

    #[test]
    fn test_matching_pair_collapses() {
        let merged = merge_events(vec![sent(7)], vec![received(7, 30)]);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].send_function, Function::On);
        assert_eq!(merged[0].receive_function, Function::Toggle);
        assert_eq!(merged[0].debounce_time, 30);
    }

    #[test]
    fn test_unmatched_receive_events_come_first() {
        // send [A, B], receive [X, Y] where only Y matches B
        let a = sent(1);
        let b = sent(2);
        let x = received(9, 0);
        let y = received(2, 10);

        let merged = merge_events(vec![a.clone(), b], vec![x.clone(), y]);
        assert_eq!(merged.len(), 3);
        assert_eq!(merged[0], x);
        assert_eq!(merged[1], a);
        assert_eq!(merged[2].number, 2);
        assert_eq!(merged[2].receive_function, Function::Toggle);
        assert_eq!(merged[2].debounce_time, 10);
    }

    #[test]
    fn test_each_send_event_absorbs_one_receive_event() {
        let merged = merge_events(vec![sent(3), sent(3)], vec![received(3, 1), received(3, 2)]);
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].debounce_time, 1);
        assert_eq!(merged[1].debounce_time, 2);

        let merged = merge_events(vec![sent(3)], vec![received(3, 1), received(3, 2)]);
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].debounce_time, 2);
        assert_eq!(merged[0].send_function, Function::None);
        assert_eq!(merged[1].debounce_time, 1);
    }

    #[test]
    fn test_different_range_does_not_match() {
        let merged = merge_events(vec![sent(7)], vec![received(7, 0).with_max(100)]);
        assert_eq!(merged.len(), 2);
    }

    #[test]
    fn test_empty_inputs() {
        assert!(merge_events(vec![], vec![]).is_empty());
        assert_eq!(merge_events(vec![sent(1)], vec![]), vec![sent(1)]);
        assert_eq!(merge_events(vec![], vec![received(1, 0)]), vec![received(1, 0)]);
    }

    proptest! {
        #[test]
        fn prop_send_order_and_count_preserved(
            send in prop::collection::vec(0i32..4, 0..8),
            receive in prop::collection::vec(0i32..4, 0..8),
        ) {
            let send_events: Vec<_> = send.iter().map(|n| sent(*n)).collect();
            let receive_events: Vec<_> = receive.iter().map(|n| received(*n, 0)).collect();
            let merged = merge_events(send_events, receive_events);

            let sent_numbers: Vec<i32> = merged
                .iter()
                .filter(|e| !e.send_function.is_none())
                .map(|e| e.number)
                .collect();
            prop_assert_eq!(sent_numbers, send.clone());

            let paired = merged
                .iter()
                .filter(|e| !e.send_function.is_none() && !e.receive_function.is_none())
                .count();
            let unmatched = merged.len() - send.len();
            prop_assert_eq!(paired + unmatched, receive.len());
        }
    }
}
