use crate::algorithms::common::{reconstruct_path, SearchOutcome, SearchResult, SearchTrace};
use crate::grid::{Grid, Position};
use log::{debug, trace};
use rustc_hash::FxHashSet;
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::time::Instant;

/// Entry of the open set. `Ord` is reversed so that `BinaryHeap` pops the
/// lowest priority first; ties go to the lower heuristic, then the lower
/// position.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
struct OpenEntry {
    priority: u32,
    h: u32,
    position: Position,
}

impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .priority
            .cmp(&self.priority)
            .then_with(|| other.h.cmp(&self.h))
            .then_with(|| other.position.cmp(&self.position))
    }
}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Shared loop of uniform-cost search and A*.
///
/// Orders the open set by `g + h(pos)`; with no heuristic the order is by
/// `g` alone and no f-scores are recorded. Entries superseded by a cheaper
/// push are skipped when popped after their cell has been closed.
/// The grid must already be validated.
pub(crate) fn best_first(
    grid: &Grid,
    algorithm: &'static str,
    heuristic: Option<&dyn Fn(Position) -> u32>,
) -> SearchOutcome {
    let started = Instant::now();
    let (start, goal) = (grid.start(), grid.goal());
    let estimate = |pos: Position| heuristic.map_or(0, |h| h(pos));

    let mut search_trace = SearchTrace::default();
    let mut open = BinaryHeap::new();
    let mut closed = FxHashSet::default();
    let mut nodes_explored = 0;

    let start_h = estimate(start);
    search_trace.g_scores.insert(start, 0);
    if heuristic.is_some() {
        search_trace.f_scores.insert(start, start_h);
    }
    open.push(OpenEntry {
        priority: start_h,
        h: start_h,
        position: start,
    });

    while let Some(OpenEntry { position: current, .. }) = open.pop() {
        if !closed.insert(current) {
            continue;
        }
        let Some(&current_g) = search_trace.g_scores.get(&current) else {
            continue;
        };

        nodes_explored += 1;
        search_trace.explored.push(current);
        trace!("{} expanding {:?} (g = {})", algorithm, current, current_g);

        if current == goal {
            let path = reconstruct_path(&search_trace.predecessors, start, goal);
            debug!(
                "{} reached goal with cost {} after exploring {} nodes",
                algorithm, current_g, nodes_explored
            );
            let result =
                SearchResult::found(algorithm, path, current_g, nodes_explored, started.elapsed());
            return SearchOutcome {
                result,
                trace: search_trace,
            };
        }

        for neighbor in grid.neighbors(&current) {
            let Some(step) = grid.cost(neighbor) else {
                continue;
            };
            if closed.contains(&neighbor) {
                continue;
            }

            let tentative_g = current_g.saturating_add(step);
            let improves = search_trace
                .g_scores
                .get(&neighbor)
                .map_or(true, |&g| tentative_g < g);
            if !improves {
                continue;
            }

            let h = estimate(neighbor);
            search_trace.g_scores.insert(neighbor, tentative_g);
            search_trace.predecessors.insert(neighbor, current);
            if heuristic.is_some() {
                search_trace.f_scores.insert(neighbor, tentative_g + h);
            }
            open.push(OpenEntry {
                priority: tentative_g + h,
                h,
                position: neighbor,
            });
        }
    }

    debug!("{} exhausted open set after {} nodes", algorithm, nodes_explored);
    SearchOutcome {
        result: SearchResult::not_found(algorithm, nodes_explored, started.elapsed()),
        trace: search_trace,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heap_pops_lowest_priority_first() {
        let mut heap = BinaryHeap::new();
        for (priority, h, x) in [(5, 0, 0), (2, 1, 1), (2, 0, 2), (9, 0, 3)] {
            heap.push(OpenEntry {
                priority,
                h,
                position: Position::new(x, 0),
            });
        }
        let order: Vec<usize> = std::iter::from_fn(|| heap.pop().map(|e| e.position.x)).collect();
        assert_eq!(order, vec![2, 1, 0, 3]);
    }
}
