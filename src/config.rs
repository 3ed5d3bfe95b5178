// Timeouts, pin map, server configuration
use std::time::Duration;

// HTTP server defaults
pub const DEFAULT_PORT: u16 = 80;

// Pending connections beyond the one being serviced
pub const LISTEN_BACKLOG: u32 = 2;

// Inactivity timeout for the per-connection read phase
pub const CLIENT_TIMEOUT: Duration = Duration::from_secs(3);

// Network bring-up retry budget (60 x 250ms, about 15 seconds)
pub const NET_ATTEMPTS: u32 = 60;
pub const NET_RETRY_INTERVAL: Duration = Duration::from_millis(250);

// Status LED (BCM numbering)
pub const STATUS_LED_PIN: u8 = 16;

// Motor pin map (BCM numbering)
// Each wheel has two lines: (IN1, IN2). Forward = (1,0), Backward = (0,1), Stop = (0,0)
pub const PINS_FL: (u8, u8) = (18, 19); // Front Left
pub const PINS_FR: (u8, u8) = (9, 8); // Front Right
pub const PINS_RL: (u8, u8) = (21, 20); // Rear Left
pub const PINS_RR: (u8, u8) = (7, 6); // Rear Right

// If any wheel spins the opposite direction, set its invert flag true
pub const INVERT_FL: bool = false;
pub const INVERT_FR: bool = false;
pub const INVERT_RL: bool = false;
pub const INVERT_RR: bool = false;
