#![no_main]

use libfuzzer_sys::fuzz_target;
use ringkit::ds::RingBuffer;

// Fuzz arbitrary operation sequences on RingBuffer
//
// Drives push, set_at, pop and emptied against a plain Vec with an explicit
// cursor, and checks that every retained older version is left untouched.
fuzz_target!(|data: &[u8]| {
    if data.len() < 2 {
        return;
    }

    // First byte picks the capacity (0-31)
    let capacity = (data[0] % 32) as usize;

    let mut ring = RingBuffer::new(capacity);
    let mut slots: Vec<Option<u8>> = vec![None; capacity];
    let mut cursor: i64 = 0;

    let mut checkpoint = ring.clone();
    let mut checkpoint_snapshot = checkpoint.to_snapshot();

    let mut idx = 1;
    while idx + 1 < data.len() {
        let op = data[idx] % 5;
        let arg = data[idx + 1];
        let cap = capacity as i64;

        match op {
            0 => {
                ring = ring.push(arg);
                if capacity > 0 {
                    cursor = (cursor + 1).rem_euclid(cap);
                    slots[cursor as usize] = Some(arg);
                }
            }
            1 => {
                let i = i64::from(arg as i8);
                ring = ring.set_at(i, arg);
                if capacity > 0 {
                    slots[(cursor + i).rem_euclid(cap) as usize] = Some(arg);
                }
            }
            2 => {
                ring = ring.pop();
                if capacity > 0 {
                    slots[cursor.rem_euclid(cap) as usize] = None;
                    cursor -= 1;
                }
            }
            3 => {
                // Keep this version around and verify it later
                checkpoint = ring.clone();
                checkpoint_snapshot = checkpoint.to_snapshot();
            }
            4 => {
                ring = ring.emptied().clone();
                slots = vec![None; capacity];
                cursor = 0;
            }
            _ => unreachable!(),
        }

        // Compare against the model
        ring.debug_validate_invariants();
        assert_eq!(ring.capacity(), capacity);
        assert_eq!(ring.cursor(), cursor);
        let expected: Vec<Option<&u8>> = slots.iter().map(Option::as_ref).collect();
        assert_eq!(ring.debug_snapshot_slots(), expected);
        assert_eq!(ring.is_empty(), slots.iter().all(Option::is_none));

        if capacity > 0 {
            assert_eq!(ring.peek(), slots[cursor.rem_euclid(capacity as i64) as usize].as_ref());
            let reverse: Vec<Option<&u8>> = ring.reverse().collect();
            assert_eq!(reverse.len(), capacity);
            assert_eq!(reverse[0], ring.peek());
        } else {
            assert_eq!(ring.peek(), None);
            assert_eq!(ring.forward().count(), 0);
        }

        // Older versions never change
        assert_eq!(checkpoint.to_snapshot(), checkpoint_snapshot);

        idx += 2;
    }
});
