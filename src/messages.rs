// JSON body types for the HTTP interface

use serde::{Deserialize, Serialize};

/// The single authoritative label for the robot's commanded motion.
///
/// Wire labels match what the control page displays.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum MotionState {
    #[serde(rename = "STOP")]
    Stopped,
    #[serde(rename = "FORWARD")]
    Forward,
    #[serde(rename = "BACKWARD")]
    Backward,
    #[serde(rename = "LEFT")]
    TurningLeft,
    #[serde(rename = "RIGHT")]
    TurningRight,
}

// Body of every 200 response on the JSON routes
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct StateReport {
    pub state: MotionState,
}

// Body of the 404 response
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ErrorReport<'a> {
    pub error: &'a str,
}
