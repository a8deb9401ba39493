use log::debug;

use crate::config::*;

/// Pairwise majority comparisons of a profile.
///
/// The graph keeps the raw support counts: `support(x, y)` is the number of
/// voters ranking `x` strictly above `y`. There is an edge `x -> y` weighted by
/// `margin(x, y)` whenever that margin is positive.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct MarginGraph {
    num_candidates: usize,
    // Row-major: support[x * num_candidates + y]
    support: Vec<u64>,
}

impl MarginGraph {
    /// Builds the support counts in one pass over the ballots.
    ///
    /// The ballots must have been validated: every ranking is a permutation of
    /// the candidates.
    pub(crate) fn from_ballots(num_candidates: usize, ballots: &[Ballot]) -> MarginGraph {
        let mut support = vec![0u64; num_candidates * num_candidates];
        for ballot in ballots.iter() {
            let ranking = &ballot.ranking;
            for (idx, &above) in ranking.iter().enumerate() {
                for &below in ranking[idx + 1..].iter() {
                    support[above * num_candidates + below] += ballot.count;
                }
            }
        }
        let graph = MarginGraph {
            num_candidates,
            support,
        };
        debug!("from_ballots: majority edges: {:?}", graph.edges());
        graph
    }

    pub fn num_candidates(&self) -> usize {
        self.num_candidates
    }

    fn contains(&self, c: Candidate) -> bool {
        c < self.num_candidates
    }

    /// The number of voters ranking `x` strictly above `y` (0 for unknown candidates).
    pub fn support(&self, x: Candidate, y: Candidate) -> u64 {
        if self.contains(x) && self.contains(y) {
            self.support[x * self.num_candidates + y]
        } else {
            0
        }
    }

    pub fn margin(&self, x: Candidate, y: Candidate) -> i64 {
        self.support(x, y) as i64 - self.support(y, x) as i64
    }

    pub fn majority_prefers(&self, x: Candidate, y: Candidate) -> bool {
        self.margin(x, y) > 0
    }

    /// All the majority edges `(from, to, margin)`, ordered by `from` then `to`.
    pub fn edges(&self) -> Vec<(Candidate, Candidate, i64)> {
        let n = self.num_candidates;
        (0..n)
            .flat_map(|x| (0..n).map(move |y| (x, y)))
            .filter_map(|(x, y)| {
                let m = self.margin(x, y);
                if m > 0 {
                    Some((x, y, m))
                } else {
                    None
                }
            })
            .collect()
    }

    /// The candidates that `x` is majority preferred to, in increasing order.
    pub fn successors(&self, x: Candidate) -> Vec<Candidate> {
        (0..self.num_candidates)
            .filter(|&y| self.majority_prefers(x, y))
            .collect()
    }

    /// The candidates majority preferred to `y`, in increasing order.
    pub fn predecessors(&self, y: Candidate) -> Vec<Candidate> {
        (0..self.num_candidates)
            .filter(|&x| self.majority_prefers(x, y))
            .collect()
    }

    /// margins[x][y] = margin(x, y)
    pub fn margin_matrix(&self) -> Vec<Vec<i64>> {
        let n = self.num_candidates;
        (0..n)
            .map(|x| (0..n).map(|y| self.margin(x, y)).collect())
            .collect()
    }
}
