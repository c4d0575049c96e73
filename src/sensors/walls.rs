// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Wall presence from sensor distances.

use crate::config::Config;
use crate::sensors::Distances;

/// Walls around the robot's current cell.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct WallsAround {
    pub left: bool,
    pub front: bool,
    pub right: bool,
}

impl WallsAround {
    pub fn detect(distances: &Distances, config: &Config) -> Self {
        Self {
            left: side_wall(distances.side_left, config),
            front: front_wall(distances.front_left, distances.front_right, config),
            right: side_wall(distances.side_right, config),
        }
    }
}

#[inline]
pub fn side_wall(distance: f32, config: &Config) -> bool {
    distance < config.side_wall_threshold()
}

/// Both sensors must agree; a single close reading is usually a wall post seen through a gap.
#[inline]
pub fn front_wall(left: f32, right: f32, config: &Config) -> bool {
    let threshold = config.front_wall_threshold();
    left < threshold && right < threshold
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sensors::NO_READING;

    fn cfg() -> Config {
        Config::DEFAULT.with_cell_dimension(0.18)
    }

    #[test]
    fn side_threshold_is_strict() {
        let cfg = cfg();
        let threshold = cfg.side_wall_threshold();
        assert!(!side_wall(threshold, &cfg));
        assert!(side_wall(threshold - 0.001, &cfg));
    }

    #[test]
    fn front_wall_requires_both_sensors() {
        let cfg = cfg();
        let threshold = cfg.front_wall_threshold();
        assert!(front_wall(threshold - 0.01, threshold - 0.02, &cfg));
        assert!(!front_wall(threshold - 0.01, threshold + 0.01, &cfg));
        assert!(!front_wall(threshold + 0.01, threshold - 0.01, &cfg));
    }

    #[test]
    fn detect_builds_snapshot() {
        let cfg = cfg();
        let d = Distances {
            side_left: 0.08,
            side_right: 0.30,
            front_left: 0.10,
            front_right: 0.11,
        };
        let walls = WallsAround::detect(&d, &cfg);
        assert_eq!(
            walls,
            WallsAround {
                left: true,
                front: true,
                right: false
            }
        );
    }

    #[test]
    fn missing_readings_report_no_walls() {
        let walls = WallsAround::detect(&Distances::uniform(NO_READING), &cfg());
        assert_eq!(walls, WallsAround::default());
    }
}
