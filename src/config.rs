// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Maze and robot geometry shared by the sensing and motion layers.
//!
//! Values are fixed at build time. Host tests override individual fields through the `with_*`
//! builders.

/// Encoder positions are expressed in micrometers.
pub const MICROMETERS_PER_METER: f32 = 1_000_000.0;

/// Physical constants of the maze and the robot body.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Config {
    /// Side of one maze cell, wall center to wall center (m)
    pub cell_dimension: f32,
    /// Wall thickness (m)
    pub wall_width: f32,
    /// Distance from the robot center to the front of its body (m)
    pub mouse_head: f32,
    /// Distance from the robot center to the back of its body (m)
    pub mouse_tail: f32,
    /// Side distance measured when the robot is centered in a corridor (m)
    pub middle_maze_distance: f32,
    /// Control loop and tick counter rate (Hz)
    pub tick_frequency_hz: f32,
}

impl Config {
    pub const DEFAULT: Config = Config {
        cell_dimension: 0.18,
        wall_width: 0.012,
        mouse_head: 0.028,
        mouse_tail: 0.042,
        middle_maze_distance: (0.18 - 0.012) / 2.0,
        tick_frequency_hz: 1000.0,
    };

    /// Set the cell dimension and recompute the nominal mid-corridor distance.
    pub const fn with_cell_dimension(mut self, cell_dimension: f32) -> Self {
        self.cell_dimension = cell_dimension;
        self.middle_maze_distance = (cell_dimension - self.wall_width) / 2.0;
        self
    }

    pub const fn with_middle_maze_distance(mut self, distance: f32) -> Self {
        self.middle_maze_distance = distance;
        self
    }

    pub const fn with_body(mut self, head: f32, tail: f32) -> Self {
        self.mouse_head = head;
        self.mouse_tail = tail;
        self
    }

    pub const fn with_tick_frequency_hz(mut self, hz: f32) -> Self {
        self.tick_frequency_hz = hz;
        self
    }

    /// Side walls closer than this are reported as present.
    #[inline]
    pub fn side_wall_threshold(&self) -> f32 {
        self.cell_dimension * 0.90
    }

    /// Both front sensors must read closer than this to report a front wall.
    #[inline]
    pub fn front_wall_threshold(&self) -> f32 {
        self.cell_dimension * 1.5
    }

    /// Cell shift of a robot whose tail touches the wall behind it.
    #[inline]
    pub fn starting_shift(&self) -> f32 {
        self.wall_width / 2.0 + self.mouse_tail
    }

    /// Distance to travel inside a cell before the head touches the front wall.
    #[inline]
    pub fn head_to_front_wall(&self) -> f32 {
        self.cell_dimension - self.wall_width / 2.0 - self.mouse_head
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Convert a distance in meters into encoder micrometers (truncating).
#[inline]
pub fn micrometers(meters: f32) -> i32 {
    (meters * MICROMETERS_PER_METER) as i32
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn default_middle_distance_centers_the_robot() {
        let cfg = Config::DEFAULT;
        assert_abs_diff_eq!(cfg.middle_maze_distance, 0.084, epsilon = 1e-6);
    }

    #[test]
    fn cell_dimension_builder_updates_middle_distance() {
        let cfg = Config::DEFAULT.with_cell_dimension(0.09);
        assert_abs_diff_eq!(cfg.middle_maze_distance, 0.039, epsilon = 1e-6);
        assert_abs_diff_eq!(cfg.side_wall_threshold(), 0.081, epsilon = 1e-6);
        assert_abs_diff_eq!(cfg.front_wall_threshold(), 0.135, epsilon = 1e-6);
    }

    #[test]
    fn micrometer_conversion_truncates() {
        assert_eq!(micrometers(0.18), 180_000);
        assert_eq!(micrometers(-0.0000015), -1);
    }
}
