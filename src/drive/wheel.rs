// Per-wheel direction control
//
// Each wheel is one H-bridge channel with two input lines:
// Forward = (1,0), Backward = (0,1), Stop = (0,0). Driving both lines high
// would short the bridge, so the drive table never produces it.

use super::gpio::{Level, OutputPin};

/// Signed wheel direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
    Stop,
}

/// One wheel: two output lines plus a polarity correction for reversed wiring
pub struct Wheel<P: OutputPin> {
    line_a: P,
    line_b: P,
    invert: bool,
}

impl<P: OutputPin> Wheel<P> {
    /// Take ownership of the two lines and drive both low
    pub fn new(mut line_a: P, mut line_b: P, invert: bool) -> Self {
        line_a.set_level(Level::Low);
        line_b.set_level(Level::Low);
        Self {
            line_a,
            line_b,
            invert,
        }
    }

    /// Set the output lines from the direction and the invert flag
    pub fn drive(&mut self, direction: Direction) {
        let (a, b) = match direction {
            Direction::Forward => (Level::High, Level::Low),
            Direction::Backward => (Level::Low, Level::High),
            Direction::Stop => (Level::Low, Level::Low),
        };
        let (a, b) = if self.invert { (b, a) } else { (a, b) };
        self.line_a.set_level(a);
        self.line_b.set_level(b);
    }
}
