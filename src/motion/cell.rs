// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Position of the robot within the current maze cell.

use crate::config::{micrometers, Config};

/// Where the current cell started and how far into it the robot already sits.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct CellTracker {
    /// Offset of the robot inside the current cell (m)
    cell_shift: f32,
    /// Encoder position of the cell start (µm)
    cell_origin_um: i32,
}

impl CellTracker {
    pub const fn new(cell_origin_um: i32, cell_shift: f32) -> Self {
        Self {
            cell_shift,
            cell_origin_um,
        }
    }

    #[inline]
    pub fn cell_shift(&self) -> f32 {
        self.cell_shift
    }

    #[inline]
    pub fn cell_origin_um(&self) -> i32 {
        self.cell_origin_um
    }

    /// Distance left until the next cell starts (m).
    #[inline]
    pub fn remaining(&self, config: &Config) -> f32 {
        config.cell_dimension - self.cell_shift
    }

    /// Robot tail against the wall behind it, at `position_um`.
    pub fn reset_to_start(&mut self, position_um: i32, config: &Config) {
        self.cell_shift = config.starting_shift();
        self.cell_origin_um = position_um;
    }

    /// Remember that the robot stopped `shift` meters into the current cell.
    #[inline]
    pub fn stopped_at(&mut self, shift: f32) {
        self.cell_shift = shift;
    }

    /// Start a new cell at `position_um`.
    ///
    /// With a front wall in view the origin is re-anchored: a wall seen exactly one cell ahead
    /// means the robot is exactly at the cell start. Returns the correction applied (µm).
    pub fn enter_next_cell(
        &mut self,
        position_um: i32,
        front_wall_distance: Option<f32>,
        config: &Config,
    ) -> i32 {
        let correction = front_wall_distance
            .map(|d| micrometers(d - config.cell_dimension))
            .unwrap_or(0);
        self.cell_origin_um = position_um + correction;
        self.cell_shift = 0.0;
        correction
    }
}
