//! Hand-authored profiles illustrating the rules.

use crate::config::*;
use crate::profile::Profile;

/// A named profile, stored as `(ranking, count)` pairs.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub struct Fixture {
    pub name: &'static str,
    pub title: &'static str,
    pub ballots: &'static [(&'static [Candidate], u64)],
}

impl Fixture {
    pub fn num_candidates(&self) -> usize {
        self.ballots.first().map(|(r, _)| r.len()).unwrap_or(0)
    }

    pub fn profile(&self) -> Result<Profile, TournamentErrors> {
        let ballots: Vec<Ballot> = self
            .ballots
            .iter()
            .map(|(ranking, count)| Ballot::new(ranking, *count))
            .collect();
        Profile::new(self.num_candidates(), ballots)
    }
}

pub static FIXTURES: [Fixture; 6] = [
    Fixture {
        name: "condorcet_cycle",
        title: "Condorcet Cycle",
        ballots: &[(&[0, 1, 2], 1), (&[1, 2, 0], 1), (&[2, 0, 1], 1)],
    },
    Fixture {
        name: "condorcet_cycle_with_winner",
        title: "Condorcet Cycle with Winner",
        ballots: &[(&[3, 0, 1, 2], 1), (&[3, 1, 2, 0], 1), (&[3, 2, 0, 1], 1)],
    },
    Fixture {
        name: "condorcet_cycle_with_loser",
        title: "Condorcet Cycle with Loser",
        ballots: &[(&[0, 1, 2, 3], 1), (&[1, 2, 0, 3], 1), (&[2, 0, 1, 3], 1)],
    },
    Fixture {
        name: "illustrative_ex1",
        title: "Illustrative Example 1",
        ballots: &[
            (&[0, 1, 2, 3], 3),
            (&[0, 2, 1, 3], 5),
            (&[1, 3, 2, 0], 7),
            (&[2, 1, 3, 0], 6),
        ],
    },
    Fixture {
        name: "illustrative_ex2",
        title: "Illustrative Example 2",
        ballots: &[
            (&[0, 1, 2, 3], 7),
            (&[1, 2, 3, 0], 5),
            (&[3, 1, 2, 0], 4),
            (&[2, 3, 0, 1], 3),
        ],
    },
    Fixture {
        name: "illustrative_ex3",
        title: "Illustrative Example 3",
        ballots: &[
            (&[2, 1, 3, 0], 1),
            (&[0, 2, 3, 1], 1),
            (&[1, 0, 2, 3], 1),
            (&[1, 0, 3, 2], 1),
            (&[3, 0, 2, 1], 1),
        ],
    },
];

/// Looks up a fixture by name.
pub fn find(name: &str) -> Option<&'static Fixture> {
    FIXTURES.iter().find(|f| f.name == name)
}
