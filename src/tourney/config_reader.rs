use crate::tourney::*;

use serde::{Deserialize, Serialize};

/// A candidate on a ballot, by position or by name.
#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CandidateRef {
    Index(Candidate),
    Name(String),
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct BallotConfig {
    pub ranking: Vec<CandidateRef>,
    // One voter when missing
    pub count: Option<u64>,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct LimitsConfig {
    #[serde(rename = "maxCandidates")]
    pub max_candidates: Option<usize>,
    #[serde(rename = "maxSearchSteps")]
    pub max_search_steps: Option<u64>,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct ProfileConfig {
    pub title: Option<String>,
    pub candidates: Option<Vec<String>>,
    pub ballots: Vec<BallotConfig>,
    pub limits: Option<LimitsConfig>,
}

impl LimitsConfig {
    // Missing fields keep their default value.
    pub fn search_limits(&self) -> SearchLimits {
        SearchLimits {
            max_candidates: self.max_candidates.or(SearchLimits::DEFAULT_LIMITS.max_candidates),
            max_search_steps: self
                .max_search_steps
                .or(SearchLimits::DEFAULT_LIMITS.max_search_steps),
        }
    }
}

impl ProfileConfig {
    pub fn num_candidates(&self) -> usize {
        match &self.candidates {
            Some(names) => names.len(),
            None => self.ballots.first().map(|b| b.ranking.len()).unwrap_or(0),
        }
    }

    pub fn into_election(self) -> TourneyResult<Election> {
        let names = match &self.candidates {
            Some(names) => names.clone(),
            None => default_names(self.num_candidates()),
        };
        let mut ballots: Vec<Ballot> = Vec::new();
        for (idx, ballot) in self.ballots.iter().enumerate() {
            let ranking = resolve_ranking(idx, &ballot.ranking, &names)?;
            ballots.push(Ballot::new(&ranking, ballot.count.unwrap_or(1)));
        }
        debug!("into_election: candidates {:?} ballots {:?}", names, ballots);
        let profile = Profile::new(names.len(), ballots).context(InvalidProfileSnafu {})?;
        Ok(Election {
            title: self.title,
            names,
            profile,
            limits: self
                .limits
                .map(|l| l.search_limits())
                .unwrap_or(SearchLimits::DEFAULT_LIMITS),
        })
    }
}

fn resolve_ranking(
    ballot: usize,
    ranking: &[CandidateRef],
    names: &[String],
) -> TourneyResult<Vec<Candidate>> {
    let mut res: Vec<Candidate> = Vec::new();
    for cref in ranking.iter() {
        let c = match cref {
            // Out of range indices are reported when building the profile.
            CandidateRef::Index(c) => *c,
            CandidateRef::Name(name) => names
                .iter()
                .position(|n| n == name)
                .context(UnknownCandidateNameSnafu { ballot, name })?,
        };
        res.push(c);
    }
    Ok(res)
}

pub fn read_profile_config(path: &str) -> TourneyResult<ProfileConfig> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    let config: ProfileConfig = serde_json::from_str(&contents).context(ParsingJsonSnafu {})?;
    debug!("read_profile_config: {:?}", config);
    Ok(config)
}

pub fn read_summary(path: &str) -> TourneyResult<JSValue> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    let js: JSValue = serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu {})?;
    Ok(js)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(s: &str) -> ProfileConfig {
        serde_json::from_str(s).unwrap()
    }

    #[test]
    fn indices_and_default_names() {
        let config = parse(
            r#"{"ballots": [{"ranking": [0, 1, 2], "count": 2}, {"ranking": [2, 1, 0]}]}"#,
        );
        assert_eq!(config.num_candidates(), 3);
        let election = config.into_election().unwrap();
        assert_eq!(election.names, vec!["a", "b", "c"]);
        assert_eq!(election.title, None);
        assert_eq!(election.profile.num_voters(), 3);
        assert_eq!(election.limits, SearchLimits::DEFAULT_LIMITS);
    }

    #[test]
    fn names_and_indices_can_be_mixed() {
        let config = parse(
            r#"{"candidates": ["x", "y"], "ballots": [{"ranking": ["y", 0], "count": 1}],
                "limits": {"maxCandidates": 8}}"#,
        );
        assert_eq!(
            config.ballots[0].ranking,
            vec![CandidateRef::Name("y".to_string()), CandidateRef::Index(0)]
        );
        let election = config.into_election().unwrap();
        assert_eq!(election.profile.ballots()[0].ranking, vec![1, 0]);
        assert_eq!(election.limits.max_candidates, Some(8));
        assert_eq!(
            election.limits.max_search_steps,
            SearchLimits::DEFAULT_LIMITS.max_search_steps
        );
    }

    #[test]
    fn unknown_name() {
        let config = parse(r#"{"candidates": ["x", "y"], "ballots": [{"ranking": ["x", "z"]}]}"#);
        assert!(matches!(
            config.into_election(),
            Err(TourneyError::UnknownCandidateName { ballot: 0, .. })
        ));
    }

    #[test]
    fn invalid_profile() {
        let config = parse(r#"{"ballots": [{"ranking": [0, 1]}, {"ranking": [0, 2]}]}"#);
        assert!(matches!(
            config.into_election(),
            Err(TourneyError::InvalidProfile {
                source: TournamentErrors::InvalidProfile(_)
            })
        ));
        let empty = parse(r#"{"ballots": []}"#);
        assert!(matches!(
            empty.into_election(),
            Err(TourneyError::InvalidProfile {
                source: TournamentErrors::DegenerateInput(DegenerateReason::NoCandidates)
            })
        ));
    }
}
