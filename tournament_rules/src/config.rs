// ********* Input data structures ***********

use std::error::Error;
use std::fmt::Display;

/// A candidate is designated by its index, between 0 and the number of candidates (excluded).
///
/// Display names are a concern of the caller: the library never sees them.
pub type Candidate = usize;

/// A ranking cast by `count` voters, most preferred candidate first.
#[derive(Eq, PartialEq, Debug, Clone, Hash)]
pub struct Ballot {
    pub ranking: Vec<Candidate>,
    pub count: u64,
}

impl Ballot {
    pub fn new(ranking: &[Candidate], count: u64) -> Ballot {
        Ballot {
            ranking: ranking.to_vec(),
            count,
        }
    }
}

// ******** Output data structures *********

/// Winners and scores of a single pass scoring rule.
///
/// `scores[c]` is the score of candidate `c`. Winners are sorted and
/// contain every candidate tied for the best score.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct ScoreCard<S> {
    pub scores: Vec<S>,
    pub winners: Vec<Candidate>,
}

/// The criterion used to pick the candidates removed in a round.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub enum EliminationCriterion {
    /// Instant runoff: the candidates with the fewest first-place votes.
    FewestFirstPlaces,
    /// Coombs: the candidates with the most last-place votes.
    MostLastPlaces,
}

/// Statistics for one elimination round
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct EliminationRound {
    pub round: u32,
    /// First-place votes of every candidate still running at the start of the round.
    pub first_place_tally: Vec<(Candidate, u64)>,
    /// Last-place votes, only collected by the Coombs criterion.
    pub last_place_tally: Option<Vec<(Candidate, u64)>>,
    /// Candidates removed in this round, sorted.
    pub eliminated: Vec<Candidate>,
}

/// How an elimination process came to a stop.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub enum Termination {
    /// The candidate received a strict majority of first-place votes.
    MajorityFound(Candidate),
    /// All the remaining candidates were tied, they are all winners.
    AllTied,
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct EliminationOutcome {
    pub winners: Vec<Candidate>,
    pub rounds: Vec<EliminationRound>,
    pub termination: Termination,
    /// First-place tally among the candidates remaining at termination.
    pub final_tally: Vec<(Candidate, u64)>,
}

impl EliminationOutcome {
    /// The candidates removed at each round, in round order.
    pub fn eliminated_per_round(&self) -> Vec<Vec<Candidate>> {
        self.rounds.iter().map(|r| r.eliminated.clone()).collect()
    }
}

/// A head-to-head runoff between two candidates.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub struct Runoff {
    pub first: Candidate,
    pub second: Candidate,
    /// margin(first, second)
    pub margin: i64,
}

impl Runoff {
    /// The winners of this runoff: a tie makes both candidates winners.
    pub fn winners(&self) -> Vec<Candidate> {
        match self.margin {
            m if m > 0 => vec![self.first],
            m if m < 0 => vec![self.second],
            _ => vec![self.first, self.second],
        }
    }
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct RunoffOutcome {
    pub winners: Vec<Candidate>,
    pub majority_winner: Option<Candidate>,
    pub plurality_scores: Vec<u64>,
    /// Empty when a majority winner exists or when a single candidate runs.
    pub runoffs: Vec<Runoff>,
}

/// Errors that prevent a profile from being built or analyzed.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum TournamentErrors {
    InvalidProfile(InvalidProfileReason),
    DegenerateInput(DegenerateReason),
    ResourceExhausted(ExhaustedResource),
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub enum InvalidProfileReason {
    /// The ballot (by position) refers to a candidate outside of the profile.
    UnknownCandidate { ballot: usize, candidate: Candidate },
    /// The ballot ranks the same candidate twice.
    DuplicateCandidate { ballot: usize, candidate: Candidate },
    /// The ballot does not rank the same candidates as the profile.
    CandidateSetMismatch {
        ballot: usize,
        expected: usize,
        found: usize,
    },
    /// The ballot has a count of zero.
    ZeroCount { ballot: usize },
    /// A candidate to remove is not part of the profile.
    UnknownRemovedCandidate(Candidate),
    /// The counts add up beyond what margins and scores can represent.
    TooManyVoters,
}

#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum DegenerateReason {
    NoCandidates,
    NoBallots,
    AllCandidatesRemoved,
}

#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum ExhaustedResource {
    Candidates { count: usize, limit: usize },
    SearchSteps { limit: u64 },
}

impl Error for TournamentErrors {}

impl Display for TournamentErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TournamentErrors::InvalidProfile(reason) => {
                write!(f, "invalid profile: ")?;
                match reason {
                    InvalidProfileReason::UnknownCandidate { ballot, candidate } => {
                        write!(f, "ballot {} ranks unknown candidate {}", ballot, candidate)
                    }
                    InvalidProfileReason::DuplicateCandidate { ballot, candidate } => {
                        write!(f, "ballot {} ranks candidate {} twice", ballot, candidate)
                    }
                    InvalidProfileReason::CandidateSetMismatch {
                        ballot,
                        expected,
                        found,
                    } => write!(
                        f,
                        "ballot {} ranks {} candidates, expected {}",
                        ballot, found, expected
                    ),
                    InvalidProfileReason::ZeroCount { ballot } => {
                        write!(f, "ballot {} has a count of zero", ballot)
                    }
                    InvalidProfileReason::UnknownRemovedCandidate(c) => {
                        write!(f, "cannot remove unknown candidate {}", c)
                    }
                    InvalidProfileReason::TooManyVoters => {
                        write!(f, "too many voters, the scores would overflow")
                    }
                }
            }
            TournamentErrors::DegenerateInput(reason) => match reason {
                DegenerateReason::NoCandidates => write!(f, "degenerate input: no candidates"),
                DegenerateReason::NoBallots => write!(f, "degenerate input: no voters"),
                DegenerateReason::AllCandidatesRemoved => {
                    write!(f, "degenerate input: every candidate was removed")
                }
            },
            TournamentErrors::ResourceExhausted(resource) => match resource {
                ExhaustedResource::Candidates { count, limit } => write!(
                    f,
                    "resource exhausted: {} candidates exceed the limit of {} for cycle search",
                    count, limit
                ),
                ExhaustedResource::SearchSteps { limit } => write!(
                    f,
                    "resource exhausted: cycle search did not finish within {} steps",
                    limit
                ),
            },
        }
    }
}

// ********* Configuration **********

/// Bounds on the enumeration of majority cycles, which is exponential in the
/// worst case.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub struct SearchLimits {
    /// Profiles with more candidates are rejected before searching.
    pub max_candidates: Option<usize>,
    /// Maximum number of steps of the depth-first search.
    pub max_search_steps: Option<u64>,
}

impl SearchLimits {
    pub const DEFAULT_LIMITS: SearchLimits = SearchLimits {
        max_candidates: None,
        max_search_steps: Some(50_000_000),
    };

    pub const UNLIMITED: SearchLimits = SearchLimits {
        max_candidates: None,
        max_search_steps: None,
    };
}

impl Default for SearchLimits {
    fn default() -> Self {
        SearchLimits::DEFAULT_LIMITS
    }
}
