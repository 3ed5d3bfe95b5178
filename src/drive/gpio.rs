// Digital output capability
//
// The drive core only needs "set this line to 0 or 1". On Raspberry Pi
// targets the lines map to the GPIO controller via rppal; everywhere else
// (and in tests) a loopback pin records the level it was driven to.

use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use tracing::debug;

#[derive(Debug, thiserror::Error)]
pub enum GpioError {
    #[error("GPIO line {pin} unavailable: {reason}")]
    Unavailable { pin: u8, reason: String },
}

/// Digital output level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Low,
    High,
}

/// A single digital output line
pub trait OutputPin: Send {
    fn set_level(&mut self, level: Level);
}

impl OutputPin for Box<dyn OutputPin> {
    fn set_level(&mut self, level: Level) {
        (**self).set_level(level);
    }
}

/// Loopback pin: remembers the level it was last driven to.
///
/// Used on hosts without a GPIO controller and by tests, which observe the
/// line through a [`PinProbe`].
pub struct LoopbackPin {
    pin: u8,
    level: Arc<AtomicBool>,
}

impl LoopbackPin {
    pub fn new(pin: u8) -> Self {
        Self {
            pin,
            level: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Handle for observing the line from outside the owning wheel
    pub fn probe(&self) -> PinProbe {
        PinProbe(Arc::clone(&self.level))
    }
}

impl OutputPin for LoopbackPin {
    fn set_level(&mut self, level: Level) {
        debug!("GPIO {} -> {:?}", self.pin, level);
        self.level.store(level == Level::High, Ordering::SeqCst);
    }
}

/// Read side of a [`LoopbackPin`]
#[derive(Clone)]
pub struct PinProbe(Arc<AtomicBool>);

impl PinProbe {
    pub fn is_high(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

#[cfg(target_arch = "arm")]
mod hw {
    use super::{GpioError, Level, OutputPin};
    use rppal::gpio::{Gpio, OutputPin as RppalPin};

    /// Physical output line on the Pi's GPIO header, driven low at open
    pub struct BoardPin {
        line: RppalPin,
    }

    impl BoardPin {
        pub fn open(pin: u8) -> Result<Self, GpioError> {
            let gpio = Gpio::new().map_err(|e| GpioError::Unavailable {
                pin,
                reason: e.to_string(),
            })?;
            let mut line = gpio
                .get(pin)
                .map_err(|e| GpioError::Unavailable {
                    pin,
                    reason: e.to_string(),
                })?
                .into_output();
            line.set_low();
            Ok(Self { line })
        }
    }

    impl OutputPin for BoardPin {
        fn set_level(&mut self, level: Level) {
            match level {
                Level::High => self.line.set_high(),
                Level::Low => self.line.set_low(),
            }
        }
    }
}

/// Open an output line: the GPIO controller on Pi targets (unless hardware
/// is disabled), a loopback line everywhere else.
pub fn open_output_pin(pin: u8, hardware: bool) -> Result<Box<dyn OutputPin>, GpioError> {
    #[cfg(target_arch = "arm")]
    if hardware {
        return Ok(Box::new(hw::BoardPin::open(pin)?));
    }

    #[cfg(not(target_arch = "arm"))]
    if hardware {
        debug!("no GPIO controller on this target, line {} is loopback", pin);
    }

    Ok(Box::new(LoopbackPin::new(pin)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loopback_pin_starts_low_and_tracks_writes() {
        let mut pin = LoopbackPin::new(4);
        let probe = pin.probe();

        assert!(!probe.is_high());
        pin.set_level(Level::High);
        assert!(probe.is_high());
        pin.set_level(Level::Low);
        assert!(!probe.is_high());
    }

    #[test]
    fn open_output_pin_falls_back_to_loopback_off_target() {
        // On the host there is no GPIO controller, so both settings must
        // yield a usable line.
        assert!(open_output_pin(18, true).is_ok());
        assert!(open_output_pin(18, false).is_ok());
    }
}
