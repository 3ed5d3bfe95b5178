// Drive control module for the 4WD base
//
// Provides:
// - A two-state output-line capability with loopback and Raspberry Pi backends
// - Per-wheel direction control with polarity inversion
// - Drivetrain maneuvers composing the four wheels

pub mod drivetrain;
pub mod gpio;
pub mod wheel;

pub use drivetrain::Drivetrain;
pub use gpio::{open_output_pin, GpioError, Level, LoopbackPin, OutputPin, PinProbe};
pub use wheel::{Direction, Wheel};
