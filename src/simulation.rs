//! The driving loop: an agent walks from a fixed start to randomly placed goals, replaying
//! remembered paths where it can and searching where it cannot.
//!
//! [Simulation] knows nothing about drawing or timing; a frontend calls [Simulation::step]
//! once per tick and renders the state in between.
use crate::config::SimulationConfig;
use crate::memory::GoalMemory;
use crate::pathing_grid::PathingGrid;
use crate::solver::{BfsSolver, PathFinder};
use crate::{Connectivity, PathError};
use grid_util::grid::Grid;
use grid_util::point::Point;
use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::cmp::Ordering;

/// What a single [Simulation::step] did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    /// The agent advanced one cell along its path.
    Moved { from: Point, to: Point, reward: i32 },
    /// The agent reached its goal; a new episode has been set up.
    GoalReached {
        goal: Point,
        steps: usize,
        episodes: usize,
    },
    /// No path to follow. A new goal has been drawn for the next tick.
    Idle,
}

/// +1 for getting closer to the goal, -1 for moving away, 0 otherwise. Distances are
/// Manhattan distances.
pub fn step_reward(previous: &Point, current: &Point, goal: &Point) -> i32 {
    let previous_distance = Connectivity::Four.distance(previous, goal);
    let new_distance = Connectivity::Four.distance(current, goal);
    match new_distance.cmp(&previous_distance) {
        Ordering::Less => 1,
        Ordering::Greater => -1,
        Ordering::Equal => 0,
    }
}

/// A seeded generator, or one seeded from the OS when `seed` is [None].
pub fn seeded_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// One simulation session. Owns the grid, the [GoalMemory] and the random source, which all
/// live exactly as long as the session.
#[derive(Debug)]
pub struct Simulation<R: Rng, S: PathFinder = BfsSolver> {
    config: SimulationConfig,
    grid: PathingGrid,
    memory: GoalMemory,
    solver: S,
    rng: R,
    position: Point,
    goal: Point,
    path: Vec<Point>,
    path_index: usize,
    step_count: usize,
    episode_count: usize,
}

impl<R: Rng> Simulation<R, BfsSolver> {
    /// A session on a square grid built from `config`, searched with breadth-first search.
    pub fn new(config: SimulationConfig, rng: R) -> Result<Self, PathError> {
        Simulation::with_solver(config, BfsSolver, rng)
    }
}

impl<R: Rng, S: PathFinder> Simulation<R, S> {
    /// Builds the grid from `config`, blocking cells at random with the configured density.
    /// The start cell is never blocked.
    pub fn with_solver(config: SimulationConfig, solver: S, mut rng: R) -> Result<Self, PathError> {
        let size = config.grid_size;
        let mut grid = PathingGrid::new(size, size, false);
        grid.connectivity = config.connectivity;
        grid.check_bounds(&config.start)?;
        let density = config.obstacle_density.clamp(0.0, 1.0);
        if density > 0.0 {
            for y in 0..size {
                for x in 0..size {
                    let p = Point::new(x as i32, y as i32);
                    if p != config.start && rng.gen_bool(density) {
                        grid.set(x, y, true);
                    }
                }
            }
        }
        grid.generate_components();
        Simulation::with_grid(config, grid, solver, rng)
    }

    /// A session on a prepared grid. The grid's own size and connectivity replace those in
    /// `config`; a non-square grid is recorded by its longer side.
    pub fn with_grid(
        mut config: SimulationConfig,
        mut grid: PathingGrid,
        solver: S,
        rng: R,
    ) -> Result<Self, PathError> {
        config.grid_size = grid.width().max(grid.height());
        config.connectivity = grid.connectivity;
        let start = config.start;
        grid.check_bounds(&start)?;
        if grid.is_blocked(&start) {
            debug!("Clearing blocked start {}", start);
            grid.set(start.x as usize, start.y as usize, false);
        }
        grid.update();
        let memory = match config.memory_capacity {
            Some(capacity) => GoalMemory::with_capacity_limit(capacity),
            None => GoalMemory::new(),
        };
        let mut simulation = Simulation {
            config,
            grid,
            memory,
            solver,
            rng,
            position: start,
            goal: start,
            path: Vec::new(),
            path_index: 0,
            step_count: 0,
            episode_count: 0,
        };
        simulation.goal = simulation.random_goal();
        simulation.plan();
        Ok(simulation)
    }

    /// Advances the session by one tick.
    pub fn step(&mut self) -> StepOutcome {
        if self.position == self.goal {
            return self.finish_episode();
        }
        let next = self.path.get(self.path_index + 1).copied();
        let Some(next) = next else {
            debug!("No path to follow towards {}", self.goal);
            self.goal = self.random_goal();
            self.plan();
            return StepOutcome::Idle;
        };
        let from = self.position;
        self.position = next;
        self.path_index += 1;
        self.step_count += 1;
        let reward = step_reward(&from, &next, &self.goal);
        debug!("Step reward: {}", reward);
        if self.position == self.goal {
            self.finish_episode()
        } else {
            StepOutcome::Moved {
                from,
                to: next,
                reward,
            }
        }
    }

    /// Steps until `episodes` more goals have been reached or `max_ticks` ticks have passed.
    /// Returns the number of goals reached.
    pub fn run_episodes(&mut self, episodes: usize, max_ticks: usize) -> usize {
        let mut reached = 0;
        for _ in 0..max_ticks {
            if reached >= episodes {
                break;
            }
            if let StepOutcome::GoalReached { .. } = self.step() {
                reached += 1;
            }
        }
        reached
    }

    /// Replaces the current goal and plans towards it from the agent's current position.
    /// Returns whether a path was found.
    pub fn set_goal(&mut self, goal: Point) -> Result<bool, PathError> {
        self.grid.check_bounds(&goal)?;
        self.goal = goal;
        match self.path_to(goal) {
            Ok(path) => {
                self.follow(path);
                Ok(true)
            }
            Err(err @ PathError::NotFound { .. }) => {
                warn!("[{}] {}", err.code(), err);
                self.follow(Vec::new());
                Ok(false)
            }
            Err(err) => Err(err),
        }
    }

    /// Plans towards the current goal, drawing new goals while the current one cannot be
    /// reached. Gives up after [SimulationConfig::max_goal_attempts] goals.
    pub fn plan(&mut self) -> bool {
        for _ in 0..self.config.max_goal_attempts.max(1) {
            match self.path_to(self.goal) {
                Ok(path) => {
                    self.follow(path);
                    return true;
                }
                Err(err) => {
                    warn!("Skipping goal {} [{}]: {}", self.goal, err.code(), err);
                    self.goal = self.random_goal();
                }
            }
        }
        warn!(
            "No reachable goal after {} attempts",
            self.config.max_goal_attempts
        );
        self.follow(Vec::new());
        false
    }

    /// A remembered path from the agent's position if there is one, otherwise a fresh search
    /// whose result is remembered.
    fn path_to(&mut self, goal: Point) -> Result<Vec<Point>, PathError> {
        let start = self.position;
        if let Some(path) = self.memory.lookup_from(&start, &goal) {
            info!("Reusing cached path for goal {}", goal);
            return Ok(path.to_vec());
        }
        info!("Searching for goal {}...", goal);
        let path = self.solver.get_path_single_goal(&self.grid, start, goal)?;
        self.memory.record(goal, path.clone())?;
        Ok(path)
    }

    fn follow(&mut self, path: Vec<Point>) {
        self.path = path;
        self.path_index = 0;
    }

    fn finish_episode(&mut self) -> StepOutcome {
        self.episode_count += 1;
        let goal = self.goal;
        let steps = self.step_count;
        info!(
            "Goal reached at {} in {} steps. Total episodes: {}",
            goal, steps, self.episode_count
        );
        self.position = self.config.start;
        self.step_count = 0;
        self.goal = self.random_goal();
        self.plan();
        StepOutcome::GoalReached {
            goal,
            steps,
            episodes: self.episode_count,
        }
    }

    /// A uniformly drawn passable cell. The start is always passable, so there is one.
    fn random_goal(&mut self) -> Point {
        self.grid
            .passable_points()
            .choose(&mut self.rng)
            .copied()
            .unwrap_or(self.config.start)
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn grid(&self) -> &PathingGrid {
        &self.grid
    }

    pub fn memory(&self) -> &GoalMemory {
        &self.memory
    }

    pub fn solver(&self) -> &S {
        &self.solver
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn goal(&self) -> Point {
        self.goal
    }

    /// The whole path being replayed, including the cells already walked.
    pub fn path(&self) -> &[Point] {
        &self.path
    }

    /// The part of the path still ahead of the agent, starting at its position.
    pub fn remaining_path(&self) -> &[Point] {
        self.path.get(self.path_index..).unwrap_or(&[])
    }

    /// Steps taken in the current episode.
    pub fn step_count(&self) -> usize {
        self.step_count
    }

    pub fn episode_count(&self) -> usize {
        self.episode_count
    }
}
