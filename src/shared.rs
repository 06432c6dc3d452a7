//! State shared between the interrupt handlers and the control loop.
//!
//! Every field sits behind a [`critical_section::Mutex`]. Reads and writes go
//! through `critical_section::with`, so multi-byte values (the `f32`
//! readings, the 64-bit tick count) are never observed half-written on
//! targets that cannot move them in one instruction.
//!
//! Writers:
//! - clock and tick count: tick handler (serial time-set replaces the time)
//! - display mode and debounce mark: button handlers
//! - temperature and published threshold: control loop

use core::cell::Cell;
use critical_section::Mutex;

use crate::clock::{Clock, ClockTime};
use crate::debounce::DebounceMark;
use crate::types::{Button, DisplayMode};

/// Consistent view of the shared fields, taken in one critical section.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Snapshot {
    pub time: ClockTime,
    pub mode: DisplayMode,
    pub temperature: f32,
    pub threshold: f32,
}

/// Process-wide shared region.
///
/// Build it with [`SharedState::new`] in a `static` before enabling
/// interrupts. It lives for the whole program.
pub struct SharedState {
    clock: Mutex<Cell<Clock>>,
    debounce: Mutex<Cell<DebounceMark>>,
    mode: Mutex<Cell<DisplayMode>>,
    temperature: Mutex<Cell<f32>>,
    threshold: Mutex<Cell<f32>>,
}

impl SharedState {
    /// Midnight, zero uptime, `Time` screen, readings at zero.
    pub const fn new() -> Self {
        Self {
            clock: Mutex::new(Cell::new(Clock::new())),
            debounce: Mutex::new(Cell::new(DebounceMark::new())),
            mode: Mutex::new(Cell::new(DisplayMode::Time)),
            temperature: Mutex::new(Cell::new(0.0)),
            threshold: Mutex::new(Cell::new(0.0)),
        }
    }

    /// Counts one periodic tick. Returns `true` when a second elapsed.
    pub fn tick(&self) -> bool {
        critical_section::with(|cs| {
            let cell = self.clock.borrow(cs);
            let mut clock = cell.get();
            let elapsed = clock.advance_one_tick();
            cell.set(clock);
            elapsed
        })
    }

    /// Ticks counted since start-up.
    pub fn ticks(&self) -> u64 {
        critical_section::with(|cs| self.clock.borrow(cs).get().ticks())
    }

    /// Current wall-clock time.
    pub fn time(&self) -> ClockTime {
        critical_section::with(|cs| self.clock.borrow(cs).get().time())
    }

    /// Replaces the wall-clock time as received.
    pub fn set_time(&self, time: ClockTime) {
        critical_section::with(|cs| {
            let cell = self.clock.borrow(cs);
            let mut clock = cell.get();
            clock.set_time(time);
            cell.set(clock);
        });
    }

    /// Handles an edge on `button`.
    ///
    /// The debounce check, mark update and mode change happen in one
    /// critical section. Returns the new mode, or `None` when the edge was
    /// suppressed.
    pub fn press(&self, button: Button) -> Option<DisplayMode> {
        critical_section::with(|cs| {
            let now = self.clock.borrow(cs).get().ticks();
            let mark_cell = self.debounce.borrow(cs);
            let mut mark = mark_cell.get();
            if !mark.try_accept(now) {
                return None;
            }
            mark_cell.set(mark);

            let mode_cell = self.mode.borrow(cs);
            let mode = mode_cell.get().toggled_by(button);
            mode_cell.set(mode);
            Some(mode)
        })
    }

    /// Screen currently selected.
    pub fn display_mode(&self) -> DisplayMode {
        critical_section::with(|cs| self.mode.borrow(cs).get())
    }

    /// Tick of the last accepted button edge.
    pub fn debounce_mark(&self) -> DebounceMark {
        critical_section::with(|cs| self.debounce.borrow(cs).get())
    }

    /// Latest temperature in degrees Celsius.
    pub fn temperature(&self) -> f32 {
        critical_section::with(|cs| self.temperature.borrow(cs).get())
    }

    pub fn set_temperature(&self, celsius: f32) {
        critical_section::with(|cs| self.temperature.borrow(cs).set(celsius));
    }

    /// Threshold last read from or written to storage by the control loop.
    ///
    /// Interrupt handlers report this copy instead of touching storage.
    /// Control decisions always re-read storage.
    pub fn published_threshold(&self) -> f32 {
        critical_section::with(|cs| self.threshold.borrow(cs).get())
    }

    pub fn publish_threshold(&self, celsius: f32) {
        critical_section::with(|cs| self.threshold.borrow(cs).set(celsius));
    }

    /// Reads every field in one critical section.
    pub fn snapshot(&self) -> Snapshot {
        critical_section::with(|cs| Snapshot {
            time: self.clock.borrow(cs).get().time(),
            mode: self.mode.borrow(cs).get(),
            temperature: self.temperature.borrow(cs).get(),
            threshold: self.threshold.borrow(cs).get(),
        })
    }
}

impl Default for SharedState {
    fn default() -> Self {
        Self::new()
    }
}
