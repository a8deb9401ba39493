use log::debug;

use crate::config::*;
use crate::profile::Profile;

// Candidates achieving the best score, in increasing order.
fn best_candidates<S: Ord + Copy>(scores: &[S], best: Option<S>) -> Vec<Candidate> {
    match best {
        Some(b) => scores
            .iter()
            .enumerate()
            .filter_map(|(c, s)| if *s == b { Some(c) } else { None })
            .collect(),
        None => Vec::new(),
    }
}

/// The number of voters ranking each candidate first.
pub fn plurality_scores(profile: &Profile) -> Vec<u64> {
    let mut scores = vec![0u64; profile.num_candidates()];
    for ballot in profile.ballots().iter() {
        if let Some(&first) = ballot.ranking.first() {
            scores[first] += ballot.count;
        }
    }
    scores
}

pub fn plurality(profile: &Profile) -> ScoreCard<u64> {
    let scores = plurality_scores(profile);
    let winners = best_candidates(&scores, scores.iter().max().cloned());
    debug!("plurality: scores {:?} winners {:?}", scores, winners);
    ScoreCard { scores, winners }
}

/// Each voter gives n-1 points to the first candidate, down to 0 for the last one.
pub fn borda_scores(profile: &Profile) -> Vec<u64> {
    let n = profile.num_candidates();
    let mut scores = vec![0u64; n];
    for ballot in profile.ballots().iter() {
        for (position, &c) in ballot.ranking.iter().enumerate() {
            scores[c] += ballot.count * (n - 1 - position) as u64;
        }
    }
    scores
}

pub fn borda(profile: &Profile) -> ScoreCard<u64> {
    let scores = borda_scores(profile);
    let winners = best_candidates(&scores, scores.iter().max().cloned());
    debug!("borda: scores {:?} winners {:?}", scores, winners);
    ScoreCard { scores, winners }
}

/// Win-loss record: majority wins minus majority losses.
pub fn copeland_scores(profile: &Profile) -> Vec<i64> {
    let graph = profile.margin_graph();
    profile
        .candidates()
        .map(|c| graph.successors(c).len() as i64 - graph.predecessors(c).len() as i64)
        .collect()
}

pub fn copeland(profile: &Profile) -> ScoreCard<i64> {
    let scores = copeland_scores(profile);
    let winners = best_candidates(&scores, scores.iter().max().cloned());
    debug!("copeland: scores {:?} winners {:?}", scores, winners);
    ScoreCard { scores, winners }
}

/// The largest head-to-head loss of each candidate, 0 without losses.
pub fn minimax_scores(profile: &Profile) -> Vec<i64> {
    profile
        .candidates()
        .map(|c| {
            profile
                .candidates()
                .map(|d| profile.margin(d, c))
                .max()
                .unwrap_or(0)
                .max(0)
        })
        .collect()
}

pub fn minimax(profile: &Profile) -> ScoreCard<i64> {
    let scores = minimax_scores(profile);
    let winners = best_candidates(&scores, scores.iter().min().cloned());
    debug!("minimax: scores {:?} winners {:?}", scores, winners);
    ScoreCard { scores, winners }
}
