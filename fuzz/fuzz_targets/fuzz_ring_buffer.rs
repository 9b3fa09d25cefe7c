//! Fuzz target: `RingBuffer` operation sequences
//!
//! Interprets the input as a stream of opcodes and checks the buffer's
//! size accounting after each one.
//!
//! cargo fuzz run fuzz_ring_buffer

#![no_main]

use libfuzzer_sys::fuzz_target;
use sensornode::ring_buffer::RingBuffer;

const CAP: usize = 17;

fuzz_target!(|data: &[u8]| {
    let mut rb = RingBuffer::new([0u8; CAP]);
    let mut scratch = [0u8; 64];
    let mut ops = data.chunks(2);

    while let Some(&[op, arg]) = ops.next() {
        let n = usize::from(arg) % scratch.len();
        match op % 6 {
            0 => rb.write(&scratch[..n]),
            1 => {
                let free = rb.free();
                assert_eq!(rb.write_truncating(&scratch[..n]), n.min(free));
            }
            2 => {
                let before = rb.available();
                assert_eq!(rb.read(&mut scratch[..n]), n.min(before));
            }
            3 => {
                let before = rb.available();
                assert_eq!(rb.peek(&mut scratch[..n]), n.min(before));
                assert_eq!(rb.available(), before);
            }
            4 => rb.write_byte(arg),
            _ => {
                let _ = rb.read_byte();
            }
        }

        assert!(rb.available() <= CAP);
        assert_eq!(rb.available() + rb.free(), CAP);
        assert_eq!(rb.is_empty(), rb.available() == 0);
        assert_eq!(rb.is_full(), rb.available() == CAP);
    }
});
