//! This module implements breadth-first search in the shape of
//! [pathfinding's bfs function](https://docs.rs/pathfinding/latest/pathfinding/directed/bfs/index.html),
//! with the visited set doubling as the predecessor table. Nodes are stored in an insertion
//! ordered map, so a node's index is its discovery order and predecessors are referenced by
//! index.
use fxhash::FxBuildHasher;
use indexmap::map::Entry::Vacant;
use indexmap::IndexMap;
use log::trace;
use std::collections::VecDeque;
use std::hash::Hash;

type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;

fn reverse_path<N>(parents: &FxIndexMap<N, usize>, start: usize) -> Vec<N>
where
    N: Eq + Hash + Clone,
{
    let mut path: Vec<N> = itertools::unfold(start, |i| {
        parents.get_index(*i).map(|(node, &parent)| {
            *i = parent;
            node.clone()
        })
    })
    .collect();
    path.reverse();
    path
}

/// Searches outward from `start`, visiting successors in the order `successors` yields them,
/// until `success` holds for a dequeued node. Returns the path from `start` to that node, both
/// inclusive, or [None] once the frontier is exhausted.
///
/// Since every edge has the same cost, the first node to satisfy `success` is a closest one,
/// and for a fixed successor order the returned path is always the same.
pub fn bfs<N, FN, IN, FS>(start: &N, mut successors: FN, mut success: FS) -> Option<Vec<N>>
where
    N: Eq + Hash + Clone,
    FN: FnMut(&N) -> IN,
    IN: IntoIterator<Item = N>,
    FS: FnMut(&N) -> bool,
{
    let mut to_see: VecDeque<usize> = VecDeque::new();
    to_see.push_back(0);
    let mut parents: FxIndexMap<N, usize> = FxIndexMap::default();
    parents.insert(start.clone(), usize::MAX);
    while let Some(index) = to_see.pop_front() {
        let successors = {
            let (node, _) = parents.get_index(index)?;
            if success(node) {
                trace!("Goal dequeued after visiting {} nodes", parents.len());
                return Some(reverse_path(&parents, index));
            }
            successors(node)
        };
        for successor in successors {
            if let Vacant(e) = parents.entry(successor) {
                let n = e.index();
                e.insert(index);
                to_see.push_back(n);
            }
        }
    }
    trace!("Frontier exhausted after visiting {} nodes", parents.len());
    None
}
