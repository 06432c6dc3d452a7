//! Tick-window debouncing for the menu buttons.

/// Tick count at which a button edge was last accepted.
///
/// One mark is shared by both buttons: an edge on either button is
/// suppressed while the tick count still equals the mark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DebounceMark(u64);

impl DebounceMark {
    /// Mark at tick zero.
    pub const fn new() -> Self {
        Self(0)
    }

    /// Tick of the last accepted edge.
    pub fn tick(&self) -> u64 {
        self.0
    }

    /// Accepts an edge seen at `now` unless one was already accepted in
    /// the same tick. Updates the mark on acceptance.
    pub fn try_accept(&mut self, now: u64) -> bool {
        if self.0 == now {
            return false;
        }
        self.0 = now;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_tick_is_suppressed() {
        let mut mark = DebounceMark::new();
        assert!(mark.try_accept(5));
        assert!(!mark.try_accept(5));
        assert_eq!(mark.tick(), 5);
    }

    #[test]
    fn new_tick_is_accepted() {
        let mut mark = DebounceMark::new();
        assert!(mark.try_accept(1));
        assert!(mark.try_accept(2));
        assert_eq!(mark.tick(), 2);
    }

    #[test]
    fn edge_at_startup_tick_is_suppressed() {
        let mut mark = DebounceMark::new();
        assert!(!mark.try_accept(0));
    }
}
