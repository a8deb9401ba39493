pub use crate::config::*;
use crate::profile::Profile;

/// A builder for adding rankings one at a time.
///
/// Identical rankings are merged, so the builder may be fed one ranking per voter.
///
/// ```
/// pub use tournament_rules::builder::Builder;
/// # use tournament_rules::TournamentErrors;
///
/// let mut builder = Builder::new(3);
/// builder.add_ranking(&[0, 1, 2], 2)?;
/// builder.add_ranking(&[2, 1, 0], 1)?;
/// builder.add_ranking(&[0, 1, 2], 1)?;
///
/// let profile = builder.build()?;
/// assert_eq!(profile.num_voters(), 4);
/// assert_eq!(profile.margin(0, 2), 2);
///
/// # Ok::<(), TournamentErrors>(())
/// ```
pub struct Builder {
    num_candidates: usize,
    ballots: Vec<Ballot>,
}

impl Builder {
    pub fn new(num_candidates: usize) -> Builder {
        Builder {
            num_candidates,
            ballots: Vec::new(),
        }
    }

    pub fn num_candidates(&self) -> usize {
        self.num_candidates
    }

    /// Adds a single voter.
    pub fn add_ranking_simple(&mut self, ranking: &[Candidate]) -> Result<(), TournamentErrors> {
        self.add_ranking(ranking, 1)
    }

    /// Adds a ranking cast by `count` voters.
    ///
    /// Only the count is checked here, the ranking itself is validated by [Builder::build].
    pub fn add_ranking(&mut self, ranking: &[Candidate], count: u64) -> Result<(), TournamentErrors> {
        if count == 0 {
            return Err(TournamentErrors::InvalidProfile(
                InvalidProfileReason::ZeroCount {
                    ballot: self.ballots.len(),
                },
            ));
        }
        match self.ballots.iter_mut().find(|b| b.ranking == ranking) {
            Some(existing) => {
                existing.count = existing.count.checked_add(count).ok_or(
                    TournamentErrors::InvalidProfile(InvalidProfileReason::TooManyVoters),
                )?;
            }
            None => self.ballots.push(Ballot::new(ranking, count)),
        }
        Ok(())
    }

    pub fn build(self) -> Result<Profile, TournamentErrors> {
        Profile::new(self.num_candidates, self.ballots)
    }
}
