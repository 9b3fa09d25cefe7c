//! Fuzz target: `ModbusDevice::poll`
//!
//! Delivers arbitrary bytes as one received frame and asserts that the
//! engine never panics, answers only frames addressed to it, and that every
//! reply it sends carries a valid CRC.
//!
//! cargo fuzz run fuzz_slave_poll

#![no_main]

use core::cell::Cell;

use futures_lite::future::block_on;
use libfuzzer_sys::fuzz_target;
use sensornode::config::{ModbusConfig, SerialConfig};
use sensornode::error::TransportError;
use sensornode::modbus::crc;
use sensornode::modbus::slave::{ModbusDevice, PollOutcome};
use sensornode::modbus::transport::{SerialTransport, TimePort};
use sensornode::ring_buffer::RingBuffer;

const SLAVE: u8 = 0x11;

struct FuzzPort {
    rx: RingBuffer<[u8; 256]>,
    sent: Vec<Vec<u8>>,
}

impl SerialTransport for FuzzPort {
    fn read_available(&self) -> usize {
        self.rx.available()
    }

    fn read(&mut self, buf: &mut [u8]) -> usize {
        self.rx.read(buf)
    }

    fn write(&mut self, data: &[u8], _timeout_ms: u32) -> Result<(), TransportError> {
        self.sent.push(data.to_vec());
        Ok(())
    }
}

struct StepClock(Cell<u32>);

impl TimePort for StepClock {
    fn now_ms(&self) -> u32 {
        self.0.get()
    }

    fn sleep_ms(&self, ms: u32) -> impl Future<Output = ()> {
        self.0.set(self.0.get().wrapping_add(ms));
        core::future::ready(())
    }
}

fuzz_target!(|data: &[u8]| {
    let regs: Vec<u16> = (0..64).collect();
    let config = ModbusConfig {
        slave_addr: SLAVE,
        base_addr: 0,
        regs_count: 64,
        ..ModbusConfig::default()
    };

    let mut rx = RingBuffer::new([0u8; 256]);
    rx.write(data);
    let port = FuzzPort {
        rx,
        sent: Vec::new(),
    };

    let serial = SerialConfig::default();
    let clock = StepClock(Cell::new(0));
    let Ok(mut device) = ModbusDevice::new(port, clock, &regs[..], &config, &serial) else {
        return;
    };
    let outcome = block_on(device.poll());

    let sent = &device.transport().sent;
    match outcome {
        Ok(PollOutcome::Responded { len, .. }) => {
            assert_eq!(sent.len(), 1);
            assert_eq!(sent[0].len(), len);
        }
        Ok(PollOutcome::ExceptionSent { .. }) => assert_eq!(sent.len(), 1),
        _ => assert!(sent.is_empty(), "replied to a frame it should drop"),
    }
    for reply in sent {
        assert_eq!(reply[0], SLAVE);
        assert!(crc::verify(reply), "reply with bad CRC");
    }
});
