//! Settings for a simulation session and for drawing it.
use crate::Connectivity;
use grid_util::point::Point;
use std::num::NonZeroUsize;

/// An RGB colour.
pub type Rgb = (u8, u8, u8);

/// Settings of the driving loop.
#[derive(Clone, Debug, PartialEq)]
pub struct SimulationConfig {
    /// Number of cells along each side of the square grid.
    pub grid_size: usize,
    pub connectivity: Connectivity,
    /// Where the agent begins every episode.
    pub start: Point,
    /// Fraction of cells blocked at random when the session starts.
    pub obstacle_density: f64,
    /// How often a new goal is drawn when the current one cannot be reached.
    pub max_goal_attempts: usize,
    /// Bound on the number of remembered goals, unbounded if [None].
    pub memory_capacity: Option<NonZeroUsize>,
    /// Seed of the goal generator, drawn from the OS if [None].
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> SimulationConfig {
        SimulationConfig {
            grid_size: 10,
            connectivity: Connectivity::Four,
            start: Point::new(0, 0),
            obstacle_density: 0.0,
            max_goal_attempts: 100,
            memory_capacity: None,
            seed: None,
        }
    }
}

/// Window layout, colours and tick rate of the visualization.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderConfig {
    pub screen_width: u32,
    pub screen_height: u32,
    /// Simulation steps per second.
    pub ticks_per_second: u32,
    pub background: Rgb,
    pub grid_lines: Rgb,
    pub agent: Rgb,
    pub goal: Rgb,
    pub obstacle: Rgb,
    pub path: Rgb,
}

impl Default for RenderConfig {
    fn default() -> RenderConfig {
        RenderConfig {
            screen_width: 400,
            screen_height: 400,
            ticks_per_second: 10,
            background: (240, 240, 240),
            grid_lines: (100, 100, 100),
            agent: (54, 12, 124),
            goal: (90, 200, 100),
            obstacle: (60, 60, 60),
            path: (200, 190, 230),
        }
    }
}

impl RenderConfig {
    /// Side length in pixels of one cell when `grid_size` cells fill the window.
    pub fn cell_size(&self, grid_size: usize) -> f32 {
        self.screen_width.min(self.screen_height) as f32 / grid_size.max(1) as f32
    }

    /// Seconds between two simulation steps.
    pub fn tick_interval(&self) -> f32 {
        1.0 / self.ticks_per_second.max(1) as f32
    }
}
