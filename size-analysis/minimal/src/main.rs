#![no_std]
#![no_main]

use cortex_m_rt::{entry, exception};
use embedded_hal::delay::DelayNs;
use panic_halt as _;
use thermoclock::{
    Actuator, AnalogChannel, AnalogInput, Button, ByteStorage, CharDisplay, HalError, Hardware,
    ResponderSlot, SerialPort, SerialResponder, SharedState, Thermostat, handlers,
};

// ============================================================================
// Minimal Hardware
// ============================================================================

/// Display that drops everything
pub struct NullDisplay;

impl CharDisplay for NullDisplay {
    fn clear(&mut self) {}
    fn set_cursor(&mut self, _column: u8, _row: u8) {}
    fn write_str(&mut self, text: &str) {
        core::hint::black_box(text);
    }
    fn register_glyph(&mut self, _slot: u8, _bitmap: &[u8; 8]) {}
    fn write_glyph(&mut self, _slot: u8) {}
}

/// Converter returning a mid-scale sample
pub struct FixedAnalog;

impl AnalogInput for FixedAnalog {
    fn select(&mut self, channel: AnalogChannel) {
        core::hint::black_box(channel);
    }

    fn read(&mut self) -> Result<u16, HalError> {
        Ok(core::hint::black_box(512))
    }
}

/// Four bytes of RAM standing in for EEPROM
pub struct RamStorage([u8; 4]);

impl ByteStorage for RamStorage {
    fn write_byte(&mut self, address: u16, value: u8) {
        self.0[address as usize & 3] = value;
    }

    fn read_byte(&mut self, address: u16) -> u8 {
        self.0[address as usize & 3]
    }
}

/// Output that only remembers its duty value
pub struct NullActuator(u8);

impl Actuator for NullActuator {
    fn enable(&mut self) {}
    fn disable(&mut self) {}
    fn set_duty(&mut self, duty: u8) {
        self.0 = core::hint::black_box(duty);
    }
}

/// Delay that returns immediately
pub struct NoDelay;

impl DelayNs for NoDelay {
    fn delay_ns(&mut self, _ns: u32) {}
}

/// Serial port with nothing attached
pub struct NullSerial;

impl SerialPort for NullSerial {
    fn write_byte(&mut self, byte: u8) -> Result<(), HalError> {
        core::hint::black_box(byte);
        Ok(())
    }

    fn read_byte(&mut self) -> Result<u8, HalError> {
        Err(HalError::Timeout)
    }
}

// ============================================================================
// Shared State and Handlers
// ============================================================================

static SHARED: SharedState = SharedState::new();
static SERIAL: ResponderSlot<NullSerial> = ResponderSlot::new();

#[exception]
fn SysTick() {
    handlers::on_tick(&SHARED);
}

// This function uses the library to prevent optimizer from removing code
#[inline(never)]
fn exercise_handlers() {
    handlers::on_button_edge(&SHARED, Button::Threshold);
    handlers::on_button_edge(&SHARED, Button::Temperature);
    for byte in [0x10, 12, 0, 0, 0x20, 0x30, 0x99] {
        core::hint::black_box(SERIAL.on_byte(byte, &SHARED));
    }
    core::hint::black_box(SERIAL.on_byte_blocking(0x10, &SHARED));
}

#[entry]
fn main() -> ! {
    SERIAL.install(SerialResponder::new(NullSerial));

    let mut thermostat = Thermostat::new(
        Hardware {
            analog: FixedAnalog,
            display: NullDisplay,
            storage: RamStorage([0; 4]),
            actuator: NullActuator(0),
            delay: NoDelay,
        },
        &SHARED,
    );

    exercise_handlers();

    // Size analysis binary, not meant to run on hardware
    thermostat.run()
}
