//! Time sources driving the animation.
//!
//! The render loop never reads a wall clock directly: it asks a `TimeSource`
//! for elapsed seconds, so tests can substitute a clock they advance by hand.

use std::cell::Cell;
use std::rc::Rc;

/// A monotonic clock measured in seconds since an epoch fixed at creation.
///
/// Implementations must never return a value smaller than a previous one.
pub trait TimeSource {
    /// Seconds elapsed since the source was created.
    fn elapsed(&self) -> f64;
}

impl<T: TimeSource + ?Sized> TimeSource for Rc<T> {
    fn elapsed(&self) -> f64 {
        (**self).elapsed()
    }
}

/// Hand-advanced clock for deterministic tests and headless stepping.
///
/// Clones share the same underlying time, so a scheduler can advance the
/// clock that the render loop reads.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<f64>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start the clock at `seconds` instead of zero.
    pub fn starting_at(seconds: f64) -> Self {
        Self {
            now: Rc::new(Cell::new(seconds)),
        }
    }

    /// Move time forward by `dt` seconds. Negative deltas are ignored.
    pub fn advance(&self, dt: f64) {
        if dt > 0.0 {
            self.now.set(self.now.get() + dt);
        }
    }

    /// Jump to `seconds`, unless that would move time backwards.
    pub fn set(&self, seconds: f64) {
        if seconds > self.now.get() {
            self.now.set(seconds);
        }
    }
}

impl TimeSource for ManualClock {
    fn elapsed(&self) -> f64 {
        self.now.get()
    }
}

/// Wall clock backed by `std::time::Instant`, for native hosts.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone, Copy)]
pub struct InstantClock {
    origin: std::time::Instant,
}

#[cfg(not(target_arch = "wasm32"))]
impl InstantClock {
    pub fn new() -> Self {
        Self {
            origin: std::time::Instant::now(),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl Default for InstantClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl TimeSource for InstantClock {
    fn elapsed(&self) -> f64 {
        self.origin.elapsed().as_secs_f64()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_clock_starts_at_zero() {
        let clock = ManualClock::new();
        assert_eq!(clock.elapsed(), 0.0);
    }

    #[test]
    fn manual_clock_advances() {
        let clock = ManualClock::new();
        clock.advance(0.5);
        clock.advance(0.25);
        assert_eq!(clock.elapsed(), 0.75);
    }

    #[test]
    fn manual_clock_never_goes_backwards() {
        let clock = ManualClock::starting_at(10.0);
        clock.advance(-3.0);
        assert_eq!(clock.elapsed(), 10.0);
        clock.set(4.0);
        assert_eq!(clock.elapsed(), 10.0);
        clock.set(12.0);
        assert_eq!(clock.elapsed(), 12.0);
    }

    #[test]
    fn clones_share_time() {
        let clock = ManualClock::new();
        let reader = clock.clone();
        clock.advance(2.0);
        assert_eq!(reader.elapsed(), 2.0);
    }

    #[test]
    #[cfg(not(target_arch = "wasm32"))]
    fn instant_clock_is_monotonic() {
        let clock = InstantClock::new();
        let a = clock.elapsed();
        let b = clock.elapsed();
        assert!(a >= 0.0);
        assert!(b >= a);
    }
}
