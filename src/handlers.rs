//! Interrupt-context event sources.
//!
//! Bind these to the board's interrupt vectors. Each runs to completion,
//! touches only [`SharedState`] and the serial port, and never returns an
//! error to the vector.
//!
//! ```ignore
//! static SHARED: SharedState = SharedState::new();
//! static SERIAL: ResponderSlot<Uart> = ResponderSlot::new();
//!
//! #[interrupt]
//! fn TIM3() {
//!     handlers::on_tick(&SHARED);
//! }
//!
//! #[interrupt]
//! fn USART1() {
//!     let byte = uart_read_data_register();
//!     SERIAL.on_byte(byte, &SHARED);
//! }
//! ```

use core::cell::RefCell;
use critical_section::Mutex;

use crate::hal::SerialPort;
use crate::serial::{FrameEvent, SerialResponder};
use crate::shared::SharedState;
use crate::types::{Button, DisplayMode};

/// Periodic tick: advances uptime and the clock.
pub fn on_tick(shared: &SharedState) {
    if shared.tick() {
        trace!("second elapsed at tick {}", shared.ticks());
    }
}

/// Falling edge on a menu button.
///
/// Returns the new display mode, or `None` when the edge fell in the same
/// tick as the last accepted one.
pub fn on_button_edge(shared: &SharedState, button: Button) -> Option<DisplayMode> {
    let mode = shared.press(button);
    match mode {
        Some(mode) => debug!("{:?} pressed, showing {:?}", button, mode),
        None => trace!("{:?} edge suppressed", button),
    }
    mode
}

/// Holder for the serial responder owned by the byte-arrival interrupt.
///
/// Install the responder once during start-up, before enabling the
/// receive interrupt.
pub struct ResponderSlot<P: SerialPort> {
    responder: Mutex<RefCell<Option<SerialResponder<P>>>>,
}

impl<P: SerialPort> ResponderSlot<P> {
    pub const fn new() -> Self {
        Self {
            responder: Mutex::new(RefCell::new(None)),
        }
    }

    /// Installs the responder, replacing any previous one.
    pub fn install(&self, responder: SerialResponder<P>) {
        critical_section::with(|cs| {
            self.responder.borrow(cs).replace(Some(responder));
        });
    }

    /// Removes and returns the installed responder.
    pub fn take(&self) -> Option<SerialResponder<P>> {
        critical_section::with(|cs| self.responder.borrow(cs).take())
    }

    /// Byte arrival: feeds the incremental frame decoder.
    ///
    /// Returns `None` when no responder is installed or the reply could not
    /// be sent. Failures are logged, never propagated.
    pub fn on_byte(&self, byte: u8, shared: &SharedState) -> Option<FrameEvent> {
        self.with_responder(|responder| responder.on_byte(byte, shared))
    }

    /// Byte arrival: reads the rest of the frame by blocking on the port.
    pub fn on_byte_blocking(&self, byte: u8, shared: &SharedState) -> Option<FrameEvent> {
        self.with_responder(|responder| responder.on_frame_start_blocking(byte, shared))
    }

    fn with_responder<F>(&self, f: F) -> Option<FrameEvent>
    where
        F: FnOnce(&mut SerialResponder<P>) -> Result<FrameEvent, crate::Error>,
    {
        critical_section::with(|cs| {
            let mut slot = self.responder.borrow(cs).borrow_mut();
            let Some(responder) = slot.as_mut() else {
                warn!("serial byte received before responder was installed");
                return None;
            };
            match f(responder) {
                Ok(event) => Some(event),
                Err(err) => {
                    warn!("serial frame failed: {:?}", err);
                    None
                }
            }
        })
    }
}

impl<P: SerialPort> Default for ResponderSlot<P> {
    fn default() -> Self {
        Self::new()
    }
}
