//! Split Cycle.
//!
//! In every majority cycle, the wins with the smallest margin in that cycle are
//! discarded. The remaining majority wins are defeats, and the candidates
//! without any defeat are the winners.

use log::{debug, info};

use std::collections::BTreeSet;

use crate::config::*;
use crate::cycles::{find_cycles, Cycle};
use crate::profile::Profile;

/// A directed graph over the candidates: `x -> y` reads "x defeats y".
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct DefeatRelation {
    num_candidates: usize,
    edges: BTreeSet<(Candidate, Candidate)>,
}

impl DefeatRelation {
    fn new(num_candidates: usize, edges: BTreeSet<(Candidate, Candidate)>) -> DefeatRelation {
        DefeatRelation {
            num_candidates,
            edges,
        }
    }

    pub fn num_candidates(&self) -> usize {
        self.num_candidates
    }

    pub fn defeats(&self, x: Candidate, y: Candidate) -> bool {
        self.edges.contains(&(x, y))
    }

    /// The defeats, ordered by winner then loser.
    pub fn edges(&self) -> Vec<(Candidate, Candidate)> {
        self.edges.iter().cloned().collect()
    }

    /// The candidates defeating `y`.
    pub fn defeaters(&self, y: Candidate) -> Vec<Candidate> {
        self.edges
            .iter()
            .filter(|(_, to)| *to == y)
            .map(|(from, _)| *from)
            .collect()
    }

    /// The candidates that nobody defeats, in increasing order.
    pub fn undefeated(&self) -> Vec<Candidate> {
        (0..self.num_candidates)
            .filter(|&c| !self.edges.iter().any(|(_, to)| *to == c))
            .collect()
    }
}

/// A majority cycle together with its weakest wins.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct CycleReport {
    pub cycle: Cycle,
    pub weakest_margin: i64,
    /// Every edge of the cycle with the weakest margin.
    pub weakest_edges: Vec<(Candidate, Candidate)>,
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct SplitCycleOutcome {
    pub winners: Vec<Candidate>,
    pub defeats: DefeatRelation,
    pub cycles: Vec<CycleReport>,
}

/// Computes the Split Cycle defeats and winners by enumerating the majority cycles.
///
/// Fails only when the enumeration exceeds the given limits.
pub fn split_cycle(profile: &Profile, limits: &SearchLimits) -> Result<SplitCycleOutcome, TournamentErrors> {
    let graph = profile.margin_graph();
    let cycles = find_cycles(graph, limits)?;

    let mut discarded: BTreeSet<(Candidate, Candidate)> = BTreeSet::new();
    let mut reports: Vec<CycleReport> = Vec::new();
    for cycle in cycles.into_iter() {
        let margins: Vec<((Candidate, Candidate), i64)> = cycle
            .edges()
            .map(|(x, y)| ((x, y), graph.margin(x, y)))
            .collect();
        let weakest_margin = match margins.iter().map(|(_, m)| *m).min() {
            Some(m) => m,
            None => continue,
        };
        // All the tied edges are discarded, never only one of them.
        let weakest_edges: Vec<(Candidate, Candidate)> = margins
            .iter()
            .filter(|(_, m)| *m == weakest_margin)
            .map(|(e, _)| *e)
            .collect();
        debug!(
            "split_cycle: cycle {:?} weakest margin {} edges {:?}",
            cycle, weakest_margin, weakest_edges
        );
        discarded.extend(weakest_edges.iter().cloned());
        reports.push(CycleReport {
            cycle,
            weakest_margin,
            weakest_edges,
        });
    }

    let defeat_edges: BTreeSet<(Candidate, Candidate)> = graph
        .edges()
        .into_iter()
        .map(|(x, y, _)| (x, y))
        .filter(|e| !discarded.contains(e))
        .collect();
    let defeats = DefeatRelation::new(profile.num_candidates(), defeat_edges);
    let winners = defeats.undefeated();
    info!(
        "split_cycle: {} cycles, {} defeats, winners {:?}",
        reports.len(),
        defeats.edges.len(),
        winners
    );
    Ok(SplitCycleOutcome {
        winners,
        defeats,
        cycles: reports,
    })
}

/// Computes the Split Cycle defeats without enumerating cycles.
///
/// `x` defeats `y` when the margin of `x` over `y` is positive and larger than
/// the strength of the strongest majority path from `y` back to `x`, the
/// strength of a path being its smallest margin.
pub fn split_cycle_by_paths(profile: &Profile) -> DefeatRelation {
    let graph = profile.margin_graph();
    let n = profile.num_candidates();

    let mut strength: Vec<Vec<i64>> = (0..n)
        .map(|x| (0..n).map(|y| graph.margin(x, y).max(0)).collect())
        .collect();
    for k in 0..n {
        for i in 0..n {
            if i == k {
                continue;
            }
            for j in 0..n {
                if j == i || j == k {
                    continue;
                }
                let through_k = strength[i][k].min(strength[k][j]);
                if through_k > strength[i][j] {
                    strength[i][j] = through_k;
                }
            }
        }
    }

    let edges: BTreeSet<(Candidate, Candidate)> = graph
        .edges()
        .into_iter()
        .filter(|&(x, y, m)| m > strength[y][x])
        .map(|(x, y, _)| (x, y))
        .collect();
    DefeatRelation::new(n, edges)
}
