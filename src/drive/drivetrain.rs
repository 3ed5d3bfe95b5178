// Four-wheel drivetrain: named maneuvers over the FL/FR/RL/RR wheels
//
// The drivetrain owns the wheels exclusively; nothing else may address one.
// Every maneuver overwrites all four wheel outputs and the state label
// before returning, so no wheel is ever left in a stale direction from a
// previous maneuver.

use tracing::info;

use super::gpio::OutputPin;
use super::wheel::{Direction, Wheel};
use crate::messages::MotionState;

pub struct Drivetrain<P: OutputPin> {
    front_left: Wheel<P>,
    front_right: Wheel<P>,
    rear_left: Wheel<P>,
    rear_right: Wheel<P>,
    state: MotionState,
}

impl<P: OutputPin> Drivetrain<P> {
    /// Assemble the drivetrain. Wheels drive their lines low at
    /// construction, so the base boots Stopped with all eight lines low.
    pub fn new(
        front_left: Wheel<P>,
        front_right: Wheel<P>,
        rear_left: Wheel<P>,
        rear_right: Wheel<P>,
    ) -> Self {
        Self {
            front_left,
            front_right,
            rear_left,
            rear_right,
            state: MotionState::Stopped,
        }
    }

    fn apply(
        &mut self,
        fl: Direction,
        fr: Direction,
        rl: Direction,
        rr: Direction,
        state: MotionState,
    ) {
        self.front_left.drive(fl);
        self.front_right.drive(fr);
        self.rear_left.drive(rl);
        self.rear_right.drive(rr);
        self.state = state;
    }

    pub fn stop(&mut self) {
        info!("Maneuver: stop");
        self.apply(
            Direction::Stop,
            Direction::Stop,
            Direction::Stop,
            Direction::Stop,
            MotionState::Stopped,
        );
    }

    pub fn forward(&mut self) {
        info!("Maneuver: forward");
        self.apply(
            Direction::Forward,
            Direction::Forward,
            Direction::Forward,
            Direction::Forward,
            MotionState::Forward,
        );
    }

    pub fn backward(&mut self) {
        info!("Maneuver: backward");
        self.apply(
            Direction::Backward,
            Direction::Backward,
            Direction::Backward,
            Direction::Backward,
            MotionState::Backward,
        );
    }

    /// pivot=true spins in place (left side backward, right side forward);
    /// pivot=false stops the left side for a gentle arc.
    pub fn turn_left(&mut self, pivot: bool) {
        info!("Maneuver: turn left (pivot={})", pivot);
        let left = if pivot {
            Direction::Backward
        } else {
            Direction::Stop
        };
        self.apply(
            left,
            Direction::Forward,
            left,
            Direction::Forward,
            MotionState::TurningLeft,
        );
    }

    /// Mirror of [`turn_left`](Self::turn_left).
    pub fn turn_right(&mut self, pivot: bool) {
        info!("Maneuver: turn right (pivot={})", pivot);
        let right = if pivot {
            Direction::Backward
        } else {
            Direction::Stop
        };
        self.apply(
            Direction::Forward,
            right,
            Direction::Forward,
            right,
            MotionState::TurningRight,
        );
    }

    /// Current commanded motion; pure read, no side effect
    pub fn state(&self) -> MotionState {
        self.state
    }
}
