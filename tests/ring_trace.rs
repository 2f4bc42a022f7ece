// ==============================================
// RING BUFFER TRACE TESTS (integration)
// ==============================================
//
// Walks a small buffer through a fixed history and checks every observable
// through the public API only: cursor, logical reads, both traversals, and
// the capability traits.

use ringkit::prelude::*;

fn history() -> Vec<RingBuffer<char>> {
    let b0 = RingBuffer::new(3);
    let b1 = b0.push('a');
    let b2 = b1.push('b');
    let b3 = b2.push('c');
    let b4 = b3.push('d');
    vec![b0, b1, b2, b3, b4]
}

fn forward(ring: &RingBuffer<char>) -> Vec<Option<char>> {
    ring.forward().map(|slot| slot.copied()).collect()
}

fn reverse(ring: &RingBuffer<char>) -> Vec<Option<char>> {
    ring.reverse().map(|slot| slot.copied()).collect()
}

// ==============================================
// Push Trace
// ==============================================

mod push_trace {
    use super::*;

    #[test]
    fn cursor_follows_pushes() {
        let cursors: Vec<i64> = history().iter().map(RingBuffer::cursor).collect();
        assert_eq!(cursors, vec![0, 1, 2, 0, 1]);
    }

    #[test]
    fn forward_order_at_each_step() {
        let h = history();
        assert_eq!(forward(&h[0]), vec![None, None, None]);
        assert_eq!(forward(&h[1]), vec![Some('a'), None, None]);
        assert_eq!(forward(&h[2]), vec![Some('b'), None, Some('a')]);
        assert_eq!(forward(&h[3]), vec![Some('c'), Some('a'), Some('b')]);
        assert_eq!(forward(&h[4]), vec![Some('d'), Some('b'), Some('c')]);
    }

    #[test]
    fn reverse_order_when_full() {
        let h = history();
        assert_eq!(reverse(&h[3]), vec![Some('c'), Some('b'), Some('a')]);
        assert_eq!(reverse(&h[4]), vec![Some('d'), Some('c'), Some('b')]);
    }

    #[test]
    fn physical_layout_matches_rebuilt_buffer() {
        let h = history();
        let rebuilt = RingBufferBuilder::new(3)
            .slots([Some('c'), Some('d'), Some('b')])
            .cursor(1)
            .try_build()
            .unwrap();
        assert_eq!(rebuilt, h[4]);

        let rebuilt = RingBufferBuilder::new(3)
            .slots([None, Some('a'), Some('b')])
            .cursor(2)
            .try_build()
            .unwrap();
        assert_eq!(rebuilt, h[2]);
    }

    #[test]
    fn earlier_versions_are_untouched() {
        let h = history();
        let _later = h[4].push('e').push('f').pop().set_at(0, 'z');
        assert!(h[0].is_empty());
        assert_eq!(h[1].peek(), Some(&'a'));
        assert_eq!(h[2].peek(), Some(&'b'));
        assert_eq!(h[3].peek(), Some(&'c'));
        assert_eq!(h[4].peek(), Some(&'d'));
    }
}

// ==============================================
// Pop and Overwrite
// ==============================================

mod pop_trace {
    use super::*;

    #[test]
    fn pop_after_wrapping_push_loses_overwritten_value() {
        let h = history();
        let popped = h[3].push('x').pop();
        assert_ne!(popped, h[3]);
        assert_eq!(popped.cursor(), 0);
        assert_eq!(forward(&popped), vec![Some('c'), None, Some('b')]);
    }

    #[test]
    fn pop_after_push_into_sentinel_restores_buffer() {
        let h = history();
        assert_eq!(h[0].push('x').pop(), h[0]);
        assert_eq!(h[1].push('x').pop(), h[1]);
    }

    #[test]
    fn pop_after_wrapping_cursor_differs_by_raw_cursor() {
        let h = history();
        let round_trip = h[2].push('x').pop();
        assert_eq!(forward(&round_trip), vec![Some('b'), None, Some('a')]);
        assert_eq!(round_trip.cursor(), -1);
        assert_ne!(round_trip, h[2]);
    }

    #[test]
    fn draining_steps_cursor_below_zero() {
        let h = history();
        let drained = h[1].pop().pop().pop();
        assert!(drained.is_empty());
        assert_eq!(drained.cursor(), -2);
        assert_eq!(drained.peek(), None);

        let refilled = drained.push('q');
        assert_eq!(refilled.cursor(), 2);
        assert_eq!(refilled.peek(), Some(&'q'));
    }

    #[test]
    fn set_at_overwrites_logical_slot() {
        let h = history();
        let edited = h[4].set_at(-1, 'z');
        assert_eq!(forward(&edited), vec![Some('d'), Some('b'), Some('z')]);
        assert_eq!(edited[-1], Some('z'));
        assert_eq!(edited.cursor(), h[4].cursor());
    }
}

// ==============================================
// Capability Traits
// ==============================================

mod capabilities {
    use super::*;

    #[test]
    fn associative_view_of_trace() {
        let h = history();
        let ring = &h[4];
        assert!(ring.contains_key(&2_u8));
        assert!(ring.contains_key(&-99_i64));
        assert!(!ring.contains_key("d"));
        assert_eq!(ring.value_at(&1_usize), Some(Some(&'b')));
        assert_eq!(ring.entry_at(&-1_i32), Some((2, Some(&'c'))));
        assert_eq!(ring.value_at_or(&0.5_f32, Some(&'?')), Some(&'?'));
    }

    #[test]
    fn invoke_and_assoc_reject_bad_keys() {
        let h = history();
        let ring = &h[4];
        assert_eq!(ring.invoke(&3_i16), Ok(Some(&'d')));
        assert!(ring.invoke(&'x').unwrap_err().is_invalid_key());
        assert!(ring.assoc(&false, 'x').unwrap_err().is_invalid_key());
        assert_eq!(ring.assoc(&4_u64, 'x').unwrap().get(1), Some(&'x'));
    }

    #[test]
    fn mutation_surface_is_closed() {
        let mut ring = history().remove(4);
        let before = ring.clone();
        assert!(ring.add('e').unwrap_err().is_unsupported_mutation());
        assert!(ring.clear().unwrap_err().is_unsupported_mutation());
        assert_eq!(ring, before);
    }

    #[test]
    fn indexable_and_iterables_agree_with_inherent_api() {
        let h = history();
        let ring = &h[4];
        assert_eq!(ring.slot_count(), ring.capacity());
        for i in -5..5 {
            assert_eq!(ring.nth(i), ring.get(i));
        }
        assert!(ring.iter_forward().eq(ring.forward()));
        assert!(ring.iter_reverse().eq(ring.reverse()));
    }
}

// ==============================================
// Snapshots and Errors
// ==============================================

mod snapshots {
    use super::*;

    #[test]
    fn snapshot_and_copy_follow_forward_order() {
        let h = history();
        assert_eq!(h[4].to_snapshot(), vec![Some('d'), Some('b'), Some('c')]);

        let mut dest = [None; 5];
        assert_eq!(h[4].copy_into(&mut dest), 3);
        assert_eq!(dest, [Some('d'), Some('b'), Some('c'), None, None]);
    }

    #[test]
    fn oversized_store_is_rejected() {
        let err = RingBuffer::try_from_slots([Some(1), Some(2), Some(3)], 2).unwrap_err();
        assert!(err.is_size_mismatch());
        assert_eq!(
            err.to_string(),
            "slot store of length 3 exceeds buffer capacity 2"
        );
    }

    #[test]
    fn emptied_keeps_capacity() {
        let h = history();
        let reset = h[4].emptied();
        assert_eq!(reset.capacity(), 3);
        assert_eq!(reset, &h[0]);
    }
}
