use log::{debug, info};

use std::collections::{BTreeMap, HashSet};

use crate::config::*;
use crate::cycles::{find_cycles, Cycle};
use crate::elimination;
use crate::margins::MarginGraph;
use crate::scoring;
use crate::split_cycle::{self, DefeatRelation, SplitCycleOutcome};

/// An immutable multiset of rankings.
///
/// Every ranking orders all the candidates of the profile. The margin graph is
/// computed once at construction.
#[derive(Debug, Clone)]
pub struct Profile {
    num_candidates: usize,
    ballots: Vec<Ballot>,
    num_voters: u64,
    graph: MarginGraph,
}

impl Profile {
    /// Validates the ballots and builds the profile.
    pub fn new(num_candidates: usize, ballots: Vec<Ballot>) -> Result<Profile, TournamentErrors> {
        if num_candidates == 0 {
            return Err(TournamentErrors::DegenerateInput(
                DegenerateReason::NoCandidates,
            ));
        }
        if ballots.is_empty() {
            return Err(TournamentErrors::DegenerateInput(DegenerateReason::NoBallots));
        }
        for (idx, ballot) in ballots.iter().enumerate() {
            check_ballot(idx, ballot, num_candidates)?;
        }
        let num_voters = count_voters(num_candidates, &ballots)?;
        let graph = MarginGraph::from_ballots(num_candidates, &ballots);
        info!(
            "Profile: {} candidates, {} voters, {} distinct ballots",
            num_candidates,
            num_voters,
            ballots.len()
        );
        Ok(Profile {
            num_candidates,
            ballots,
            num_voters,
            graph,
        })
    }

    pub fn num_candidates(&self) -> usize {
        self.num_candidates
    }

    pub fn candidates(&self) -> std::ops::Range<Candidate> {
        0..self.num_candidates
    }

    pub fn ballots(&self) -> &[Ballot] {
        &self.ballots
    }

    pub fn num_voters(&self) -> u64 {
        self.num_voters
    }

    /// The smallest number of voters that forms a strict majority.
    pub fn strict_majority_size(&self) -> u64 {
        self.num_voters / 2 + 1
    }

    pub fn margin_graph(&self) -> &MarginGraph {
        &self.graph
    }

    pub fn support(&self, x: Candidate, y: Candidate) -> u64 {
        self.graph.support(x, y)
    }

    pub fn margin(&self, x: Candidate, y: Candidate) -> i64 {
        self.graph.margin(x, y)
    }

    pub fn majority_prefers(&self, x: Candidate, y: Candidate) -> bool {
        self.graph.majority_prefers(x, y)
    }

    /// The number of voters placing `c` at the (1-based) position `level`.
    pub fn rank_count(&self, c: Candidate, level: usize) -> u64 {
        if level == 0 {
            return 0;
        }
        self.ballots
            .iter()
            .filter(|b| b.ranking.get(level - 1) == Some(&c))
            .map(|b| b.count)
            .sum()
    }

    /// The candidate ranked first by a strict majority of voters, if any.
    pub fn majority_winner(&self) -> Option<Candidate> {
        let scores = scoring::plurality_scores(self);
        let threshold = self.strict_majority_size();
        self.candidates().find(|&c| scores[c] >= threshold)
    }

    /// The candidate majority preferred to every other candidate, if any.
    pub fn condorcet_winner(&self) -> Option<Candidate> {
        self.candidates().find(|&c| {
            self.candidates()
                .filter(|&d| d != c)
                .all(|d| self.majority_prefers(c, d))
        })
    }

    /// The candidate that every other candidate is majority preferred to, if any.
    pub fn condorcet_loser(&self) -> Option<Candidate> {
        self.candidates().find(|&c| {
            self.candidates()
                .filter(|&d| d != c)
                .all(|d| self.majority_prefers(d, c))
        })
    }

    /// Builds the profile without the given candidates.
    ///
    /// The remaining candidates are renumbered densely, keeping their order.
    /// The second element maps each new candidate index to its index in this profile.
    pub fn remove_candidates(
        &self,
        removed: &[Candidate],
    ) -> Result<(Profile, Vec<Candidate>), TournamentErrors> {
        if let Some(&c) = removed.iter().find(|&&c| c >= self.num_candidates) {
            return Err(TournamentErrors::InvalidProfile(
                InvalidProfileReason::UnknownRemovedCandidate(c),
            ));
        }
        let removed: HashSet<Candidate> = removed.iter().cloned().collect();
        let kept: Vec<Candidate> = self.candidates().filter(|c| !removed.contains(c)).collect();
        if kept.is_empty() {
            return Err(TournamentErrors::DegenerateInput(
                DegenerateReason::AllCandidatesRemoved,
            ));
        }
        let mut new_index: Vec<Option<Candidate>> = vec![None; self.num_candidates];
        for (idx, &c) in kept.iter().enumerate() {
            new_index[c] = Some(idx);
        }
        let ballots: Vec<Ballot> = self
            .ballots
            .iter()
            .map(|b| Ballot {
                ranking: b.ranking.iter().filter_map(|&c| new_index[c]).collect(),
                count: b.count,
            })
            .collect();
        debug!(
            "remove_candidates: removed {:?}, kept {:?}",
            removed, kept
        );
        let reduced = Profile::new(kept.len(), ballots)?;
        Ok((reduced, kept))
    }

    // **** Rule evaluation ****

    /// All the majority cycles, using the default search limits.
    pub fn cycles(&self) -> Result<Vec<Cycle>, TournamentErrors> {
        find_cycles(&self.graph, &SearchLimits::DEFAULT_LIMITS)
    }

    pub fn cycles_with_limits(&self, limits: &SearchLimits) -> Result<Vec<Cycle>, TournamentErrors> {
        find_cycles(&self.graph, limits)
    }

    pub fn split_cycle_defeats(&self) -> Result<DefeatRelation, TournamentErrors> {
        Ok(self.split_cycle_with_explanation()?.defeats)
    }

    pub fn split_cycle_winners(&self) -> Result<Vec<Candidate>, TournamentErrors> {
        Ok(self.split_cycle_with_explanation()?.winners)
    }

    pub fn split_cycle_with_explanation(&self) -> Result<SplitCycleOutcome, TournamentErrors> {
        split_cycle::split_cycle(self, &SearchLimits::DEFAULT_LIMITS)
    }

    pub fn plurality_winners(&self) -> Vec<Candidate> {
        scoring::plurality(self).winners
    }

    pub fn borda_winners(&self) -> Vec<Candidate> {
        scoring::borda(self).winners
    }

    pub fn copeland_winners(&self) -> Vec<Candidate> {
        scoring::copeland(self).winners
    }

    pub fn minimax_winners(&self) -> Vec<Candidate> {
        scoring::minimax(self).winners
    }

    pub fn instant_runoff_winners(&self) -> Vec<Candidate> {
        self.instant_runoff_with_explanation().winners
    }

    pub fn instant_runoff_with_explanation(&self) -> EliminationOutcome {
        elimination::run_elimination(self, EliminationCriterion::FewestFirstPlaces)
    }

    pub fn coombs_winners(&self) -> Vec<Candidate> {
        self.coombs_with_explanation().winners
    }

    pub fn coombs_with_explanation(&self) -> EliminationOutcome {
        elimination::run_elimination(self, EliminationCriterion::MostLastPlaces)
    }

    pub fn plurality_with_runoff_winners(&self) -> Vec<Candidate> {
        self.plurality_with_runoff_with_explanation().winners
    }

    pub fn plurality_with_runoff_with_explanation(&self) -> RunoffOutcome {
        elimination::plurality_with_runoff(self)
    }

    // The multiset of rankings, independent of the insertion order.
    fn canonical_ballots(&self) -> BTreeMap<&[Candidate], u64> {
        let mut res: BTreeMap<&[Candidate], u64> = BTreeMap::new();
        for b in self.ballots.iter() {
            *res.entry(b.ranking.as_slice()).or_insert(0) += b.count;
        }
        res
    }
}

impl PartialEq for Profile {
    fn eq(&self, other: &Profile) -> bool {
        self.num_candidates == other.num_candidates
            && self.canonical_ballots() == other.canonical_ballots()
    }
}

impl Eq for Profile {}

// Supports, margins and Borda scores are bounded by num_voters * (n - 1),
// which must fit in an i64.
fn count_voters(num_candidates: usize, ballots: &[Ballot]) -> Result<u64, TournamentErrors> {
    let too_many = TournamentErrors::InvalidProfile(InvalidProfileReason::TooManyVoters);
    let mut num_voters: u64 = 0;
    for ballot in ballots.iter() {
        num_voters = num_voters.checked_add(ballot.count).ok_or_else(|| too_many.clone())?;
    }
    let max_points = (num_candidates.max(2) - 1) as u64;
    match num_voters.checked_mul(max_points) {
        Some(total) if total <= i64::MAX as u64 => Ok(num_voters),
        _ => Err(too_many),
    }
}

fn check_ballot(idx: usize, ballot: &Ballot, num_candidates: usize) -> Result<(), TournamentErrors> {
    if ballot.count == 0 {
        return Err(TournamentErrors::InvalidProfile(
            InvalidProfileReason::ZeroCount { ballot: idx },
        ));
    }
    let mut seen = vec![false; num_candidates];
    for &c in ballot.ranking.iter() {
        if c >= num_candidates {
            return Err(TournamentErrors::InvalidProfile(
                InvalidProfileReason::UnknownCandidate {
                    ballot: idx,
                    candidate: c,
                },
            ));
        }
        if seen[c] {
            return Err(TournamentErrors::InvalidProfile(
                InvalidProfileReason::DuplicateCandidate {
                    ballot: idx,
                    candidate: c,
                },
            ));
        }
        seen[c] = true;
    }
    if ballot.ranking.len() != num_candidates {
        return Err(TournamentErrors::InvalidProfile(
            InvalidProfileReason::CandidateSetMismatch {
                ballot: idx,
                expected: num_candidates,
                found: ballot.ranking.len(),
            },
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    fn init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn profile(name: &str) -> Profile {
        init();
        fixtures::find(name).unwrap().profile().unwrap()
    }

    #[test]
    fn rejects_empty_inputs() {
        assert_eq!(
            Profile::new(0, vec![Ballot::new(&[], 1)]),
            Err(TournamentErrors::DegenerateInput(DegenerateReason::NoCandidates))
        );
        assert_eq!(
            Profile::new(3, vec![]),
            Err(TournamentErrors::DegenerateInput(DegenerateReason::NoBallots))
        );
    }

    #[test]
    fn rejects_invalid_ballots() {
        let unknown = Profile::new(3, vec![Ballot::new(&[0, 1, 3], 1)]);
        assert_eq!(
            unknown,
            Err(TournamentErrors::InvalidProfile(
                InvalidProfileReason::UnknownCandidate {
                    ballot: 0,
                    candidate: 3
                }
            ))
        );
        let duplicate = Profile::new(
            3,
            vec![Ballot::new(&[0, 1, 2], 1), Ballot::new(&[1, 1, 2], 1)],
        );
        assert_eq!(
            duplicate,
            Err(TournamentErrors::InvalidProfile(
                InvalidProfileReason::DuplicateCandidate {
                    ballot: 1,
                    candidate: 1
                }
            ))
        );
        let partial = Profile::new(
            3,
            vec![Ballot::new(&[0, 1, 2], 1), Ballot::new(&[2, 0], 2)],
        );
        assert_eq!(
            partial,
            Err(TournamentErrors::InvalidProfile(
                InvalidProfileReason::CandidateSetMismatch {
                    ballot: 1,
                    expected: 3,
                    found: 2
                }
            ))
        );
        let zero = Profile::new(2, vec![Ballot::new(&[0, 1], 0)]);
        assert_eq!(
            zero,
            Err(TournamentErrors::InvalidProfile(
                InvalidProfileReason::ZeroCount { ballot: 0 }
            ))
        );
    }

    #[test]
    fn rejects_overflowing_counts() {
        let too_many: Result<Profile, TournamentErrors> = Err(TournamentErrors::InvalidProfile(
            InvalidProfileReason::TooManyVoters,
        ));
        assert_eq!(Profile::new(2, vec![Ballot::new(&[0, 1], 1 << 63)]), too_many);
        assert_eq!(
            Profile::new(
                2,
                vec![Ballot::new(&[0, 1], u64::MAX), Ballot::new(&[1, 0], 1)]
            ),
            too_many
        );
        // Borda gives up to n - 1 points per voter.
        assert_eq!(
            Profile::new(3, vec![Ballot::new(&[0, 1, 2], 1 << 62)]),
            too_many
        );

        let p = Profile::new(2, vec![Ballot::new(&[0, 1], i64::MAX as u64)]).unwrap();
        assert_eq!(p.margin(0, 1), i64::MAX);
        assert_eq!(p.margin(1, 0), -i64::MAX);
        assert!(p.majority_prefers(0, 1));
        assert_eq!(p.borda_winners(), vec![0]);
    }

    #[test]
    fn illustrative_ex1_basics() {
        let p = profile("illustrative_ex1");
        assert_eq!(p.num_voters(), 21);
        assert_eq!(p.strict_majority_size(), 11);
        assert_eq!(p.margin(0, 1), -5);
        assert_eq!(p.margin(1, 2), -1);
        assert_eq!(p.margin(1, 3), 21);
        assert_eq!(p.margin(2, 3), 7);
        assert_eq!(p.condorcet_winner(), Some(2));
        assert_eq!(p.condorcet_loser(), Some(0));
        assert_eq!(p.majority_winner(), None);
        assert_eq!(p.rank_count(1, 1), 7);
        assert_eq!(p.rank_count(3, 2), 7);
        assert_eq!(p.rank_count(0, 4), 13);
        assert_eq!(p.rank_count(0, 0), 0);
    }

    #[test]
    fn majority_winner_of_cycle_with_winner() {
        let p = profile("condorcet_cycle_with_winner");
        assert_eq!(p.majority_winner(), Some(3));
        assert_eq!(p.condorcet_winner(), Some(3));
        assert_eq!(p.condorcet_loser(), None);
    }

    #[test]
    fn equality_ignores_order_and_splitting() {
        let a = Profile::new(
            3,
            vec![Ballot::new(&[0, 1, 2], 2), Ballot::new(&[2, 1, 0], 1)],
        )
        .unwrap();
        let b = Profile::new(
            3,
            vec![
                Ballot::new(&[2, 1, 0], 1),
                Ballot::new(&[0, 1, 2], 1),
                Ballot::new(&[0, 1, 2], 1),
            ],
        )
        .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn removing_nothing_is_identity() {
        let p = profile("illustrative_ex2");
        let (same, mapping) = p.remove_candidates(&[]).unwrap();
        assert_eq!(same, p);
        assert_eq!(mapping, vec![0, 1, 2, 3]);
        assert_eq!(same.margin_graph(), p.margin_graph());
        assert_eq!(same.instant_runoff_winners(), p.instant_runoff_winners());
        assert_eq!(same.split_cycle_winners(), p.split_cycle_winners());
    }

    #[test]
    fn remove_candidates_renumbers() {
        let p = profile("illustrative_ex1");
        let (reduced, mapping) = p.remove_candidates(&[3, 0]).unwrap();
        assert_eq!(mapping, vec![1, 2]);
        assert_eq!(reduced.num_candidates(), 2);
        assert_eq!(reduced.num_voters(), 21);
        // 1 and 2 in the original profile
        assert_eq!(reduced.margin(0, 1), p.margin(1, 2));
        assert_eq!(reduced.ballots()[2].ranking, vec![0, 1]);
    }

    #[test]
    fn remove_candidates_errors() {
        let p = profile("condorcet_cycle");
        assert_eq!(
            p.remove_candidates(&[5]),
            Err(TournamentErrors::InvalidProfile(
                InvalidProfileReason::UnknownRemovedCandidate(5)
            ))
        );
        assert_eq!(
            p.remove_candidates(&[0, 1, 2]),
            Err(TournamentErrors::DegenerateInput(
                DegenerateReason::AllCandidatesRemoved
            ))
        );
    }

    #[test]
    fn single_candidate_profile() {
        let p = Profile::new(1, vec![Ballot::new(&[0], 4)]).unwrap();
        assert_eq!(p.condorcet_winner(), Some(0));
        assert_eq!(p.majority_winner(), Some(0));
        assert_eq!(p.split_cycle_winners(), Ok(vec![0]));
        assert_eq!(p.instant_runoff_winners(), vec![0]);
        assert_eq!(p.plurality_with_runoff_winners(), vec![0]);
    }
}
