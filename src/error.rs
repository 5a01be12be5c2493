use grid_util::point::Point;
use thiserror::Error;

/// Failures of a search or of recording its result.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum PathError {
    /// A start or goal lies outside the grid. Goal generation is bounded by construction, so
    /// this indicates a caller bug.
    #[error("{point} lies outside the {width}x{height} grid")]
    OutOfBounds {
        point: Point,
        width: usize,
        height: usize,
    },
    /// The goal is not reachable from the start. The grid is static, so searching again
    /// gives the same answer.
    #[error("no path from {start} to {goal}")]
    NotFound { start: Point, goal: Point },
    /// A path handed to the memory does not end at the goal it is stored under.
    #[error("path ending at {end} cannot be stored for goal {goal}")]
    GoalMismatch { goal: Point, end: Point },
    #[error("cannot store an empty path for goal {goal}")]
    EmptyPath { goal: Point },
}

impl PathError {
    /// Short code for log lines.
    pub fn code(&self) -> &'static str {
        match self {
            Self::OutOfBounds { .. } => "OUT_OF_BOUNDS",
            Self::NotFound { .. } => "NOT_FOUND",
            Self::GoalMismatch { .. } => "GOAL_MISMATCH",
            Self::EmptyPath { .. } => "EMPTY_PATH",
        }
    }
}
