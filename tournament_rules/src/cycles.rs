//! Enumeration of majority cycles.
//!
//! The search is a depth-first backtracking search over the majority graph,
//! written with an explicit stack so that it can be bounded by
//! [SearchLimits]. Every cycle is started from its smallest candidate and
//! only visits larger candidates, so each cycle is produced once regardless
//! of rotation.

use log::{debug, info};

use crate::config::*;
use crate::margins::MarginGraph;

/// A majority cycle: each candidate is majority preferred to the next one, and
/// the last one is majority preferred to the first one.
///
/// Invariant: at least 3 distinct candidates, the first one being the smallest.
#[derive(Eq, PartialEq, Debug, Clone, Hash, PartialOrd, Ord)]
pub struct Cycle(Vec<Candidate>);

impl Cycle {
    pub fn candidates(&self) -> &[Candidate] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The edges of the cycle, including the closing edge from the last
    /// candidate back to the first one.
    pub fn edges(&self) -> impl Iterator<Item = (Candidate, Candidate)> + '_ {
        let n = self.0.len();
        (0..n).map(move |idx| (self.0[idx], self.0[(idx + 1) % n]))
    }

    pub fn contains_edge(&self, from: Candidate, to: Candidate) -> bool {
        self.edges().any(|e| e == (from, to))
    }
}

// One level of the depth-first search.
struct Frame {
    node: Candidate,
    // Index of the next successor of node to explore.
    next_successor: usize,
}

/// Finds all the simple majority cycles of length 3 or more.
///
/// Cycles are sorted by their first (smallest) candidate, then in the order
/// in which the search meets them (successors in increasing order).
pub fn find_cycles(graph: &MarginGraph, limits: &SearchLimits) -> Result<Vec<Cycle>, TournamentErrors> {
    let n = graph.num_candidates();
    if let Some(limit) = limits.max_candidates {
        if n > limit {
            return Err(TournamentErrors::ResourceExhausted(
                ExhaustedResource::Candidates { count: n, limit },
            ));
        }
    }

    let successors: Vec<Vec<Candidate>> = (0..n).map(|c| graph.successors(c)).collect();
    let mut cycles: Vec<Cycle> = Vec::new();
    let mut steps: u64 = 0;

    for start in 0..n {
        let mut path: Vec<Candidate> = vec![start];
        let mut on_path = vec![false; n];
        on_path[start] = true;
        let mut stack: Vec<Frame> = vec![Frame {
            node: start,
            next_successor: 0,
        }];

        while let Some(frame) = stack.last_mut() {
            steps += 1;
            if let Some(limit) = limits.max_search_steps {
                if steps > limit {
                    debug!(
                        "find_cycles: giving up after {} steps, {} cycles found so far",
                        limit,
                        cycles.len()
                    );
                    return Err(TournamentErrors::ResourceExhausted(
                        ExhaustedResource::SearchSteps { limit },
                    ));
                }
            }

            let v = frame.node;
            if let Some(&w) = successors[v].get(frame.next_successor) {
                frame.next_successor += 1;
                if w == start {
                    // The majority graph has no 2-cycles, but keep the invariant explicit.
                    if path.len() >= 3 {
                        debug!("find_cycles: found cycle {:?}", path);
                        cycles.push(Cycle(path.clone()));
                    }
                } else if w > start && !on_path[w] {
                    on_path[w] = true;
                    path.push(w);
                    stack.push(Frame {
                        node: w,
                        next_successor: 0,
                    });
                }
            } else {
                stack.pop();
                path.pop();
                on_path[v] = false;
            }
        }
    }

    info!("find_cycles: {} cycles found in {} steps", cycles.len(), steps);
    Ok(cycles)
}
