// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Named cell-to-cell moves.

use log::debug;

use crate::motion::{Motion, Turn};
use crate::platform::Platform;

/// Distance covered before and after a turn (m).
pub const TURN_APPROACH_DISTANCE: f32 = 0.02;

/// Linear speed held while turning into a side cell (m/s).
pub const TURN_ENTRY_SPEED: f32 = 0.666;

/// Where to go from the current cell, relative to the robot heading.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    Front,
    Left,
    Right,
    Back,
    /// Stop in the middle of the current cell.
    Stop,
}

/// Codes used by the maze-solving layer: 0 front, 1 left, 2 right, 3 back. Anything else stops.
impl From<u8> for Direction {
    fn from(code: u8) -> Self {
        match code {
            0 => Direction::Front,
            1 => Direction::Left,
            2 => Direction::Right,
            3 => Direction::Back,
            _ => Direction::Stop,
        }
    }
}

impl<'a, P: Platform> Motion<'a, P> {
    fn move_side(&mut self, turn: Turn) {
        self.enable_walls_control();
        let origin = self.cell.cell_origin_um();
        self.decelerate(origin, TURN_APPROACH_DISTANCE, TURN_ENTRY_SPEED);
        self.disable_walls_control();
        self.turn(turn);
        self.enable_walls_control();
        let position = self.platform.position_um();
        self.accelerate(position, TURN_APPROACH_DISTANCE);
        self.entered_next_cell();
    }

    /// Turn into the cell on the left.
    pub fn move_left(&mut self) {
        self.move_side(Turn::Left);
    }

    /// Turn into the cell on the right.
    pub fn move_right(&mut self) {
        self.move_side(Turn::Right);
    }

    /// Go back to the previous cell.
    pub fn move_back(&mut self) {
        self.stop_middle();
        self.turn_right();
        self.turn_right();
        self.move_out();
    }

    /// Move into the next cell according to `direction`.
    pub fn move_towards(&mut self, direction: Direction) {
        debug!("move {:?}", direction);
        match direction {
            Direction::Front => self.move_front(),
            Direction::Left => self.move_left(),
            Direction::Right => self.move_right(),
            Direction::Back => self.move_back(),
            Direction::Stop => self.stop_middle(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::motion::engine::tests::open_bank;
    use crate::motion::turn::{TURN_ANGULAR_SPEED, TURN_ROTATION_TICKS};
    use crate::platform::sim::{Event, SimRobot};
    use approx::assert_abs_diff_eq;

    #[test]
    fn decodes_direction_codes() {
        assert_eq!(Direction::from(0), Direction::Front);
        assert_eq!(Direction::from(1), Direction::Left);
        assert_eq!(Direction::from(2), Direction::Right);
        assert_eq!(Direction::from(3), Direction::Back);
        assert_eq!(Direction::from(4), Direction::Stop);
        assert_eq!(Direction::from(200), Direction::Stop);
    }

    #[test]
    fn front_enters_next_cell() {
        let bank = open_bank();
        let mut motion = Motion::new(SimRobot::new(), &bank, Config::DEFAULT);
        motion.move_towards(Direction::Front);
        assert_eq!(motion.platform().toggles, 1);
        assert_eq!(motion.cell().cell_shift(), 0.0);
    }

    #[test]
    fn stop_halts_mid_cell_without_entering() {
        let bank = open_bank();
        let mut motion = Motion::new(SimRobot::new(), &bank, Config::DEFAULT);
        motion.move_towards(Direction::Stop);
        assert_eq!(motion.platform().toggles, 0);
        assert_abs_diff_eq!(motion.cell().cell_shift(), 0.09, epsilon = 1e-6);
        assert_eq!(motion.platform().target_linear, 0.0);
    }

    #[test]
    fn left_turns_between_approach_and_exit() {
        let bank = open_bank();
        let mut motion = Motion::new(SimRobot::new(), &bank, Config::DEFAULT);
        motion.move_towards(Direction::Left);

        let robot = motion.platform();
        let turn_start = robot
            .events
            .iter()
            .position(|e| matches!(e, Event::Angular(_, w) if *w == -TURN_ANGULAR_SPEED))
            .unwrap();
        let entry_speed = robot.events[..turn_start]
            .iter()
            .rev()
            .find_map(|e| match e {
                Event::Linear(_, v) => Some(*v),
                _ => None,
            });
        assert_eq!(entry_speed, Some(TURN_ENTRY_SPEED));
        assert_eq!(robot.events[turn_start - 1], Event::FrontControl(false));

        let commands = robot.angular_commands();
        let (start, _) = commands
            .iter()
            .copied()
            .find(|(_, w)| *w == -TURN_ANGULAR_SPEED)
            .unwrap();
        assert!(commands.contains(&(start + TURN_ROTATION_TICKS, 0.0)));
        assert_eq!(robot.target_linear, motion.max_linear_speed());
        assert_eq!(robot.toggles, 1);
        assert_eq!(motion.cell().cell_shift(), 0.0);
    }

    #[test]
    fn right_turn_uses_positive_rate() {
        let bank = open_bank();
        let mut motion = Motion::new(SimRobot::new(), &bank, Config::DEFAULT);
        motion.move_towards(Direction::Right);
        assert!(motion
            .platform()
            .angular_commands()
            .iter()
            .any(|(_, w)| *w == TURN_ANGULAR_SPEED));
    }

    #[test]
    fn back_stops_turns_twice_and_leaves() {
        let bank = open_bank();
        let mut motion = Motion::new(SimRobot::new(), &bank, Config::DEFAULT);
        motion.move_towards(Direction::Back);

        let robot = motion.platform();
        let right_turns = robot
            .angular_commands()
            .iter()
            .filter(|(_, w)| *w == TURN_ANGULAR_SPEED)
            .count();
        assert_eq!(right_turns, 2);
        assert_eq!(robot.toggles, 1);
        assert_eq!(motion.cell().cell_shift(), 0.0);
    }
}
