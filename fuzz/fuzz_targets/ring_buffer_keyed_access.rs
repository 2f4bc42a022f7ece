#![no_main]

use libfuzzer_sys::fuzz_target;
use ringkit::ds::RingBuffer;
use ringkit::traits::{Associative, Invocable};

// Fuzz keyed access with arbitrary-width integer keys
//
// Every integer key must be accepted and must read the same slot as its
// reduction modulo the capacity.
fuzz_target!(|data: &[u8]| {
    if data.len() < 17 {
        return;
    }

    let capacity = (data[0] % 16) as usize + 1;
    let ring = RingBuffer::new(capacity).push_all(data[17..].iter().copied());

    let mut raw = [0u8; 16];
    raw.copy_from_slice(&data[1..17]);
    let wide = i128::from_le_bytes(raw);
    let unsigned = u128::from_le_bytes(raw);
    let narrow = wide as i64;

    let reduced = wide.rem_euclid(capacity as i128) as i64;
    assert!(ring.contains_key(&wide));
    assert_eq!(ring.invoke(&wide), Ok(ring.get(reduced)));

    let reduced = (unsigned % capacity as u128) as i64;
    assert_eq!(ring.value_at(&unsigned), Some(ring.get(reduced)));

    assert_eq!(ring.invoke(&narrow), Ok(ring.get(narrow)));

    let written = ring.assoc(&wide, 0xAA).unwrap();
    assert_eq!(written.invoke(&wide), Ok(Some(&0xAA)));
    assert_eq!(written.cursor(), ring.cursor());
});
