use log::{debug, info};

use crate::config::*;
use crate::profile::Profile;
use crate::scoring::plurality_scores;

// **** Private structures ****

// The state of an elimination process between two rounds.
struct EliminationState {
    // In increasing order.
    remaining: Vec<Candidate>,
    rounds: Vec<EliminationRound>,
}

impl EliminationState {
    fn new(profile: &Profile) -> EliminationState {
        EliminationState {
            remaining: profile.candidates().collect(),
            rounds: Vec::new(),
        }
    }

    fn apply(&mut self, round: EliminationRound) {
        // Invariant: the number of candidates decreases at each round.
        assert!(
            !round.eliminated.is_empty() && round.eliminated.len() < self.remaining.len(),
            "Round {} does not shrink the candidates: {:?} -> {:?}",
            round.round,
            self.remaining,
            round.eliminated
        );
        self.remaining.retain(|c| !round.eliminated.contains(c));
        self.rounds.push(round);
    }

    fn finish(self, termination: Termination, final_tally: Vec<(Candidate, u64)>) -> EliminationOutcome {
        let winners = match termination {
            Termination::MajorityFound(c) => vec![c],
            Termination::AllTied => self.remaining,
        };
        EliminationOutcome {
            winners,
            rounds: self.rounds,
            termination,
            final_tally,
        }
    }
}

enum RoundResult {
    Eliminated(EliminationRound),
    Terminal(Termination, Vec<(Candidate, u64)>),
}

#[derive(Eq, PartialEq, Debug, Clone, Copy)]
enum Place {
    First,
    Last,
}

// Counts, for each remaining candidate, the voters placing it first (or last)
// among the remaining candidates.
fn compute_tally(profile: &Profile, remaining: &[Candidate], place: Place) -> Vec<(Candidate, u64)> {
    let mut still_running = vec![false; profile.num_candidates()];
    for &c in remaining.iter() {
        still_running[c] = true;
    }
    let mut counts = vec![0u64; profile.num_candidates()];
    for ballot in profile.ballots().iter() {
        let mut running = ballot.ranking.iter().filter(|&&c| still_running[c]);
        let top = match place {
            Place::First => running.next(),
            Place::Last => running.last(),
        };
        if let Some(&c) = top {
            counts[c] += ballot.count;
        }
    }
    remaining.iter().map(|&c| (c, counts[c])).collect()
}

fn run_one_round(
    profile: &Profile,
    remaining: &[Candidate],
    criterion: EliminationCriterion,
    round_id: u32,
) -> RoundResult {
    let first_place_tally = compute_tally(profile, remaining, Place::First);
    debug!("run_one_round: round {} tally: {:?}", round_id, first_place_tally);

    let threshold = profile.strict_majority_size();
    if let Some(&(c, count)) = first_place_tally.iter().find(|(_, count)| *count >= threshold) {
        debug!(
            "run_one_round: {:?} has count {:?} >= {:?}, marking as winner",
            c, count, threshold
        );
        return RoundResult::Terminal(Termination::MajorityFound(c), first_place_tally);
    }

    let (last_place_tally, eliminated) = match criterion {
        EliminationCriterion::FewestFirstPlaces => {
            let eliminated = extreme_candidates(&first_place_tally, Extreme::Min);
            (None, eliminated)
        }
        EliminationCriterion::MostLastPlaces => {
            let last = compute_tally(profile, remaining, Place::Last);
            let eliminated = extreme_candidates(&last, Extreme::Max);
            (Some(last), eliminated)
        }
    };
    debug!("run_one_round: eliminated_candidates: {:?}", eliminated);

    if eliminated.len() == remaining.len() {
        debug!("run_one_round: all the remaining candidates are tied: {:?}", remaining);
        return RoundResult::Terminal(Termination::AllTied, first_place_tally);
    }

    RoundResult::Eliminated(EliminationRound {
        round: round_id,
        first_place_tally,
        last_place_tally,
        eliminated,
    })
}

#[derive(Eq, PartialEq, Debug, Clone, Copy)]
enum Extreme {
    Min,
    Max,
}

// All the candidates tied at the extreme count.
fn extreme_candidates(tally: &[(Candidate, u64)], extreme: Extreme) -> Vec<Candidate> {
    let counts = tally.iter().map(|(_, count)| *count);
    let target = match extreme {
        Extreme::Min => counts.min(),
        Extreme::Max => counts.max(),
    };
    tally
        .iter()
        .filter(|(_, count)| Some(*count) == target)
        .map(|(c, _)| *c)
        .collect()
}

/// Runs instant runoff or Coombs over the profile.
///
/// Rounds proceed while no remaining candidate is ranked first (among the
/// remaining candidates) by a strict majority of the voters. Each round removes
/// every candidate tied for the elimination criterion. When a round would
/// remove all the remaining candidates, they are all winners.
pub fn run_elimination(profile: &Profile, criterion: EliminationCriterion) -> EliminationOutcome {
    info!(
        "run_elimination: {:?} over {} candidates, {} voters",
        criterion,
        profile.num_candidates(),
        profile.num_voters()
    );
    let mut state = EliminationState::new(profile);
    // Terminates: every eliminating round strictly shrinks the remaining
    // candidates, and a single remaining candidate always has a majority.
    loop {
        let round_id = (state.rounds.len() + 1) as u32;
        match run_one_round(profile, &state.remaining, criterion, round_id) {
            RoundResult::Eliminated(round) => {
                info!("Round {}: eliminated {:?}", round_id, round.eliminated);
                state.apply(round);
            }
            RoundResult::Terminal(termination, final_tally) => {
                info!("Round {}: {:?}", round_id, termination);
                return state.finish(termination, final_tally);
            }
        }
    }
}

/// Plurality with runoff.
///
/// A majority winner wins outright. Otherwise the candidates with the most
/// first-place votes face, in head-to-head runoffs, the candidates with the
/// second most (or each other when several are tied at the top). The winner of
/// any runoff is a winner; a tied runoff makes both candidates winners.
pub fn plurality_with_runoff(profile: &Profile) -> RunoffOutcome {
    let scores = plurality_scores(profile);
    if let Some(w) = profile.majority_winner() {
        debug!("plurality_with_runoff: majority winner {:?}", w);
        return RunoffOutcome {
            winners: vec![w],
            majority_winner: Some(w),
            plurality_scores: scores,
            runoffs: Vec::new(),
        };
    }

    let mut levels: Vec<u64> = scores.clone();
    levels.sort_unstable_by(|a, b| b.cmp(a));
    levels.dedup();
    let at_level = |level: Option<&u64>| -> Vec<Candidate> {
        match level {
            Some(l) => profile.candidates().filter(|&c| scores[c] == *l).collect(),
            None => Vec::new(),
        }
    };
    let first = at_level(levels.first());
    let pairs: Vec<(Candidate, Candidate)> = if first.len() == 1 {
        let second = at_level(levels.get(1));
        second.iter().map(|&s| (first[0], s)).collect()
    } else {
        first
            .iter()
            .enumerate()
            .flat_map(|(idx, &a)| first[idx + 1..].iter().map(move |&b| (a, b)))
            .collect()
    };
    debug!("plurality_with_runoff: top {:?} runoffs {:?}", first, pairs);

    let runoffs: Vec<Runoff> = pairs
        .iter()
        .map(|&(a, b)| Runoff {
            first: a,
            second: b,
            margin: profile.margin(a, b),
        })
        .collect();
    let mut winners: Vec<Candidate> = if runoffs.is_empty() {
        first
    } else {
        runoffs.iter().flat_map(|r| r.winners()).collect()
    };
    winners.sort_unstable();
    winners.dedup();
    info!("plurality_with_runoff: winners {:?}", winners);

    RunoffOutcome {
        winners,
        majority_winner: None,
        plurality_scores: scores,
        runoffs,
    }
}
