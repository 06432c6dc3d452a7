//! Shared test infrastructure for thermoclock integration tests

#![allow(dead_code)] // Items used across multiple test files; Rust analyzes per-file

use std::collections::VecDeque;

use embedded_hal::delay::DelayNs;
use thermoclock::{
    Actuator, AnalogChannel, AnalogInput, ByteStorage, CharDisplay, HalError, Hardware,
    SerialPort, SharedState, Thermostat,
};

// ============================================================================
// Mock Display
// ============================================================================

/// Character rendered in place of the degree glyph
pub const DEGREE: char = '\u{b0}';

/// Mock two-line display that keeps the visible text of each row
pub struct MockDisplay {
    rows: [String; 2],
    row: usize,
    pub clears: usize,
    pub glyphs: Vec<(u8, [u8; 8])>,
}

impl MockDisplay {
    pub fn new() -> Self {
        Self {
            rows: [String::new(), String::new()],
            row: 0,
            clears: 0,
            glyphs: Vec::new(),
        }
    }

    pub fn line(&self, row: usize) -> &str {
        &self.rows[row]
    }
}

impl CharDisplay for MockDisplay {
    fn clear(&mut self) {
        self.rows = [String::new(), String::new()];
        self.row = 0;
        self.clears += 1;
    }

    fn set_cursor(&mut self, _column: u8, row: u8) {
        self.row = row as usize;
    }

    fn write_str(&mut self, text: &str) {
        self.rows[self.row].push_str(text);
    }

    fn register_glyph(&mut self, slot: u8, bitmap: &[u8; 8]) {
        self.glyphs.push((slot, *bitmap));
    }

    fn write_glyph(&mut self, slot: u8) {
        assert!(
            self.glyphs.iter().any(|(s, _)| *s == slot),
            "glyph {} drawn before registration",
            slot
        );
        self.rows[self.row].push(DEGREE);
    }
}

// ============================================================================
// Mock Analog Input
// ============================================================================

/// Mock converter returning a fixed raw sample per channel
pub struct MockAnalog {
    selected: Option<AnalogChannel>,
    pub temperature_raw: u16,
    pub threshold_raw: u16,
    pub fail_reads: bool,
    pub reads: Vec<AnalogChannel>,
}

impl MockAnalog {
    pub fn new(temperature_raw: u16, threshold_raw: u16) -> Self {
        Self {
            selected: None,
            temperature_raw,
            threshold_raw,
            fail_reads: false,
            reads: Vec::new(),
        }
    }
}

impl AnalogInput for MockAnalog {
    fn select(&mut self, channel: AnalogChannel) {
        self.selected = Some(channel);
    }

    fn read(&mut self) -> Result<u16, HalError> {
        let channel = self.selected.expect("read before channel select");
        if self.fail_reads {
            return Err(HalError::Timeout);
        }
        self.reads.push(channel);
        Ok(match channel {
            AnalogChannel::Temperature => self.temperature_raw,
            AnalogChannel::Threshold => self.threshold_raw,
        })
    }
}

// ============================================================================
// Mock Storage
// ============================================================================

/// Mock non-volatile storage, erased to 0xFF
pub struct MockStorage {
    pub cells: [u8; 16],
    pub writes: usize,
}

impl MockStorage {
    pub fn erased() -> Self {
        Self {
            cells: [0xFF; 16],
            writes: 0,
        }
    }

    /// Storage already holding `threshold` at addresses 0-3
    pub fn with_threshold(threshold: f32) -> Self {
        let mut storage = Self::erased();
        storage.cells[..4].copy_from_slice(&threshold.to_ne_bytes());
        storage
    }

    pub fn threshold(&self) -> f32 {
        let mut bytes = [0u8; 4];
        bytes.copy_from_slice(&self.cells[..4]);
        f32::from_ne_bytes(bytes)
    }
}

impl ByteStorage for MockStorage {
    fn write_byte(&mut self, address: u16, value: u8) {
        self.cells[address as usize] = value;
        self.writes += 1;
    }

    fn read_byte(&mut self, address: u16) -> u8 {
        self.cells[address as usize]
    }
}

// ============================================================================
// Mock Actuator
// ============================================================================

/// Mock modulated output
pub struct MockActuator {
    pub enabled: bool,
    pub duty: u8,
}

impl MockActuator {
    pub fn new() -> Self {
        Self {
            enabled: false,
            duty: 0,
        }
    }
}

impl Actuator for MockActuator {
    fn enable(&mut self) {
        self.enabled = true;
    }

    fn disable(&mut self) {
        self.enabled = false;
    }

    fn set_duty(&mut self, duty: u8) {
        self.duty = duty;
    }
}

// ============================================================================
// Mock Delay
// ============================================================================

/// Mock delay that only accumulates the requested time
pub struct MockDelay {
    pub total_ns: u64,
}

impl MockDelay {
    pub fn new() -> Self {
        Self { total_ns: 0 }
    }

    pub fn total_ms(&self) -> u64 {
        self.total_ns / 1_000_000
    }
}

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.total_ns += ns as u64;
    }

    fn delay_ms(&mut self, ms: u32) {
        self.total_ns += ms as u64 * 1_000_000;
    }
}

// ============================================================================
// Mock Serial Port
// ============================================================================

/// Mock serial port with a scripted receive queue and captured output
pub struct MockSerial {
    pub rx: VecDeque<u8>,
    pub tx: Vec<u8>,
    pub fail_writes: bool,
}

impl MockSerial {
    pub fn new() -> Self {
        Self {
            rx: VecDeque::new(),
            tx: Vec::new(),
            fail_writes: false,
        }
    }

    pub fn with_rx(bytes: &[u8]) -> Self {
        let mut port = Self::new();
        port.rx.extend(bytes.iter().copied());
        port
    }

    pub fn sent(&self) -> &str {
        std::str::from_utf8(&self.tx).expect("reply is not ASCII")
    }
}

impl SerialPort for MockSerial {
    fn write_byte(&mut self, byte: u8) -> Result<(), HalError> {
        if self.fail_writes {
            return Err(HalError::Fault);
        }
        self.tx.push(byte);
        Ok(())
    }

    fn read_byte(&mut self) -> Result<u8, HalError> {
        self.rx.pop_front().ok_or(HalError::Timeout)
    }
}

// ============================================================================
// Test Helper Functions
// ============================================================================

pub type TestThermostat<'s> =
    Thermostat<'s, MockAnalog, MockDisplay, MockStorage, MockActuator, MockDelay>;

/// Builds a thermostat over mock hardware
pub fn thermostat<'s>(
    shared: &'s SharedState,
    analog: MockAnalog,
    storage: MockStorage,
) -> TestThermostat<'s> {
    Thermostat::new(
        Hardware {
            analog,
            display: MockDisplay::new(),
            storage,
            actuator: MockActuator::new(),
            delay: MockDelay::new(),
        },
        shared,
    )
}

/// Advances the shared clock by `n` ticks
pub fn ticks(shared: &SharedState, n: usize) {
    for _ in 0..n {
        thermoclock::on_tick(shared);
    }
}

/// Compare two readings with floating-point tolerance
pub fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() < 0.001
}
