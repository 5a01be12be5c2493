//! Memory of the shortest path found for each goal.
//!
//! Entries are keyed by goal, but each one also remembers the start it was searched from. A
//! path is only a valid answer for the same start, so [GoalMemory::lookup_from] treats an entry
//! recorded from a different start as a miss. [GoalMemory::lookup] ignores the start and is
//! meant for callers that always search from one fixed cell.
use crate::PathError;
use fxhash::FxBuildHasher;
use grid_util::point::Point;
use indexmap::IndexMap;
use log::debug;
use std::num::NonZeroUsize;

type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;

#[derive(Clone, Debug, PartialEq, Eq)]
struct MemoryEntry {
    start: Point,
    path: Vec<Point>,
}

/// Counters of how lookups were answered.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MemoryStats {
    pub hits: usize,
    pub misses: usize,
    /// Misses where an entry existed but was recorded from another start.
    pub stale: usize,
    pub evictions: usize,
}

/// Maps goal to the path previously found for it.
///
/// Unbounded by default. With [GoalMemory::with_capacity_limit] the least recently used entry is
/// evicted once the limit is exceeded; entries are kept in recency order, oldest first.
#[derive(Clone, Debug, Default)]
pub struct GoalMemory {
    entries: FxIndexMap<Point, MemoryEntry>,
    capacity: Option<NonZeroUsize>,
    stats: MemoryStats,
}

impl GoalMemory {
    pub fn new() -> GoalMemory {
        GoalMemory::default()
    }

    pub fn with_capacity_limit(capacity: NonZeroUsize) -> GoalMemory {
        GoalMemory {
            capacity: Some(capacity),
            ..GoalMemory::default()
        }
    }

    pub fn capacity_limit(&self) -> Option<NonZeroUsize> {
        self.capacity
    }

    /// The path stored for `goal`, whatever start it was found from.
    pub fn lookup(&mut self, goal: &Point) -> Option<&[Point]> {
        if self.entries.contains_key(goal) {
            self.stats.hits += 1;
            self.touch(goal);
            self.peek(goal)
        } else {
            self.stats.misses += 1;
            None
        }
    }

    /// The path stored for `goal` if it was found from `start`.
    pub fn lookup_from(&mut self, start: &Point, goal: &Point) -> Option<&[Point]> {
        let recorded_from = self.entries.get(goal).map(|entry| entry.start);
        match recorded_from {
            Some(recorded) if recorded == *start => {
                self.stats.hits += 1;
                self.touch(goal);
                self.peek(goal)
            }
            Some(recorded) => {
                debug!(
                    "Path for goal {} was recorded from {}, not {}",
                    goal, recorded, start
                );
                self.stats.misses += 1;
                self.stats.stale += 1;
                None
            }
            None => {
                self.stats.misses += 1;
                None
            }
        }
    }

    /// Reads an entry without counting it as a lookup or refreshing it.
    pub fn peek(&self, goal: &Point) -> Option<&[Point]> {
        self.entries.get(goal).map(|entry| entry.path.as_slice())
    }

    /// Stores `path` for `goal`, replacing any previous entry. The path runs from the start it was
    /// searched from to `goal`, both inclusive.
    pub fn record(&mut self, goal: Point, path: Vec<Point>) -> Result<(), PathError> {
        let (start, end) = match (path.first(), path.last()) {
            (Some(&start), Some(&end)) => (start, end),
            _ => return Err(PathError::EmptyPath { goal }),
        };
        if end != goal {
            return Err(PathError::GoalMismatch { goal, end });
        }
        if self.capacity.is_some() {
            self.entries.shift_remove(&goal);
        }
        self.entries.insert(goal, MemoryEntry { start, path });
        self.evict();
        Ok(())
    }

    pub fn contains(&self, goal: &Point) -> bool {
        self.entries.contains_key(goal)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn stats(&self) -> MemoryStats {
        self.stats
    }

    /// Goals with their paths, least recently used first when bounded, otherwise in order of
    /// first recording.
    pub fn iter(&self) -> impl Iterator<Item = (&Point, &[Point])> {
        self.entries
            .iter()
            .map(|(goal, entry)| (goal, entry.path.as_slice()))
    }

    /// Moves an entry to the most recently used end. Only needed when bounded.
    fn touch(&mut self, goal: &Point) {
        if self.capacity.is_some() {
            if let Some(entry) = self.entries.shift_remove(goal) {
                self.entries.insert(*goal, entry);
            }
        }
    }

    fn evict(&mut self) {
        let Some(capacity) = self.capacity else {
            return;
        };
        while self.entries.len() > capacity.get() {
            if let Some((goal, _)) = self.entries.shift_remove_index(0) {
                debug!("Evicting path for goal {}", goal);
                self.stats.evictions += 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn staircase(start: Point, goal: Point) -> Vec<Point> {
        let mut path = vec![start];
        let mut current = start;
        while current != goal {
            if current.x != goal.x {
                current = Point::new(current.x + (goal.x - current.x).signum(), current.y);
            } else {
                current = Point::new(current.x, current.y + (goal.y - current.y).signum());
            }
            path.push(current);
        }
        path
    }

    #[test]
    fn miss_then_hit() {
        let mut memory = GoalMemory::new();
        let start = Point::new(0, 0);
        let goal = Point::new(3, 2);
        assert!(memory.lookup(&goal).is_none());
        let path = staircase(start, goal);
        memory.record(goal, path.clone()).unwrap();
        assert_eq!(memory.lookup(&goal), Some(path.as_slice()));
        assert_eq!(
            memory.stats(),
            MemoryStats {
                hits: 1,
                misses: 1,
                ..MemoryStats::default()
            }
        );
    }

    #[test]
    fn record_overwrites() {
        let mut memory = GoalMemory::new();
        let goal = Point::new(2, 2);
        memory.record(goal, staircase(Point::new(0, 0), goal)).unwrap();
        let newer = staircase(Point::new(2, 0), goal);
        memory.record(goal, newer.clone()).unwrap();
        assert_eq!(memory.len(), 1);
        assert_eq!(memory.peek(&goal), Some(newer.as_slice()));
    }

    #[test]
    fn lookup_from_other_start_is_stale() {
        let mut memory = GoalMemory::new();
        let start = Point::new(0, 0);
        let goal = Point::new(4, 4);
        memory.record(goal, staircase(start, goal)).unwrap();
        assert!(memory.lookup_from(&Point::new(1, 0), &goal).is_none());
        assert!(memory.lookup_from(&start, &goal).is_some());
        let stats = memory.stats();
        assert_eq!((stats.hits, stats.misses, stats.stale), (1, 1, 1));
    }

    #[test]
    fn rejects_paths_not_ending_at_goal() {
        let mut memory = GoalMemory::new();
        let goal = Point::new(1, 1);
        assert_eq!(
            memory.record(goal, vec![]),
            Err(PathError::EmptyPath { goal })
        );
        let path = staircase(Point::new(0, 0), Point::new(1, 0));
        assert_eq!(
            memory.record(goal, path),
            Err(PathError::GoalMismatch {
                goal,
                end: Point::new(1, 0)
            })
        );
        assert!(memory.is_empty());
    }

    #[test]
    fn bounded_memory_evicts_least_recently_used() {
        let capacity = NonZeroUsize::new(2).unwrap();
        let mut memory = GoalMemory::with_capacity_limit(capacity);
        let start = Point::new(0, 0);
        let goals = [Point::new(1, 0), Point::new(2, 0), Point::new(3, 0)];
        memory.record(goals[0], staircase(start, goals[0])).unwrap();
        memory.record(goals[1], staircase(start, goals[1])).unwrap();
        // Refresh the oldest entry so the second one becomes the eviction candidate.
        assert!(memory.lookup(&goals[0]).is_some());
        memory.record(goals[2], staircase(start, goals[2])).unwrap();
        assert_eq!(memory.len(), 2);
        assert!(memory.contains(&goals[0]));
        assert!(!memory.contains(&goals[1]));
        assert!(memory.contains(&goals[2]));
        assert_eq!(memory.stats().evictions, 1);
        let order = memory.iter().map(|(goal, _)| *goal).collect::<Vec<_>>();
        assert_eq!(order, vec![goals[0], goals[2]]);
    }

    #[test]
    fn clear_keeps_stats() {
        let mut memory = GoalMemory::new();
        let goal = Point::new(0, 1);
        memory.record(goal, staircase(Point::new(0, 0), goal)).unwrap();
        assert!(memory.lookup(&goal).is_some());
        memory.clear();
        assert!(memory.is_empty());
        assert_eq!(memory.stats().hits, 1);
    }
}
