//! Property-based tests over random profiles.

use std::collections::HashSet;

use proptest::prelude::*;
use tournament_rules::*;

// Profiles of up to 5 candidates, with complete rankings.
fn profile_strategy() -> impl Strategy<Value = Profile> {
    (1usize..=5).prop_flat_map(|n| {
        let ranking = Just((0..n).collect::<Vec<Candidate>>()).prop_shuffle();
        prop::collection::vec((ranking, 1u64..5), 1..8).prop_map(move |ballots| {
            let ballots: Vec<Ballot> = ballots
                .into_iter()
                .map(|(ranking, count)| Ballot::new(&ranking, count))
                .collect();
            Profile::new(n, ballots).unwrap()
        })
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// margin(x, y) = -margin(y, x), and every voter takes a side.
    #[test]
    fn prop_margins_are_antisymmetric(p in profile_strategy()) {
        for x in p.candidates() {
            prop_assert_eq!(p.margin(x, x), 0);
            for y in p.candidates() {
                prop_assert_eq!(p.margin(x, y), -p.margin(y, x));
                prop_assert!(!(p.majority_prefers(x, y) && p.majority_prefers(y, x)));
                if x != y {
                    prop_assert_eq!(p.support(x, y) + p.support(y, x), p.num_voters());
                }
            }
        }
    }

    /// An odd number of voters leaves no pairwise tie.
    #[test]
    fn prop_odd_electorate_is_a_complete_tournament(p in profile_strategy()) {
        prop_assume!(p.num_voters() % 2 == 1);
        let n = p.num_candidates();
        prop_assert_eq!(p.margin_graph().edges().len(), n * (n - 1) / 2);
    }

    #[test]
    fn prop_cycles_are_canonical(p in profile_strategy()) {
        let cycles = p.cycles_with_limits(&SearchLimits::UNLIMITED).unwrap();
        let unique: HashSet<&Cycle> = cycles.iter().collect();
        prop_assert_eq!(unique.len(), cycles.len());
        for cycle in cycles.iter() {
            let candidates = cycle.candidates();
            prop_assert!(candidates.len() >= 3);
            prop_assert_eq!(Some(&candidates[0]), candidates.iter().min());
            let distinct: HashSet<&Candidate> = candidates.iter().collect();
            prop_assert_eq!(distinct.len(), candidates.len());
            for (x, y) in cycle.edges() {
                prop_assert!(p.majority_prefers(x, y));
            }
        }
    }

    #[test]
    fn prop_split_cycle_always_has_winners(p in profile_strategy()) {
        let res = p.split_cycle_with_explanation().unwrap();
        prop_assert!(!res.winners.is_empty());
        for (x, y) in res.defeats.edges() {
            prop_assert!(p.majority_prefers(x, y));
        }
        for report in res.cycles.iter() {
            for &(x, y) in report.weakest_edges.iter() {
                prop_assert!(!res.defeats.defeats(x, y));
            }
        }
    }

    #[test]
    fn prop_paths_agree_with_cycles(p in profile_strategy()) {
        prop_assert_eq!(split_cycle_by_paths(&p), p.split_cycle_defeats().unwrap());
    }

    #[test]
    fn prop_condorcet_winner_wins(p in profile_strategy()) {
        if let Some(w) = p.condorcet_winner() {
            prop_assert_eq!(p.split_cycle_winners().unwrap(), vec![w]);
            prop_assert_eq!(p.copeland_winners(), vec![w]);
            prop_assert_eq!(p.minimax_winners(), vec![w]);
            if p.majority_winner() == Some(w) {
                prop_assert_eq!(p.instant_runoff_winners(), vec![w]);
                prop_assert_eq!(p.coombs_winners(), vec![w]);
                prop_assert_eq!(p.plurality_with_runoff_winners(), vec![w]);
            }
        }
    }

    #[test]
    fn prop_condorcet_loser_never_wins_split_cycle(p in profile_strategy()) {
        prop_assume!(p.num_candidates() > 1);
        if let Some(l) = p.condorcet_loser() {
            prop_assert!(!p.split_cycle_winners().unwrap().contains(&l));
        }
    }

    #[test]
    fn prop_elimination_terminates(p in profile_strategy()) {
        for res in [p.instant_runoff_with_explanation(), p.coombs_with_explanation()] {
            prop_assert!(res.rounds.len() < p.num_candidates());
            prop_assert!(!res.winners.is_empty());
            let eliminated: HashSet<Candidate> =
                res.rounds.iter().flat_map(|r| r.eliminated.clone()).collect();
            for w in res.winners.iter() {
                prop_assert!(!eliminated.contains(w));
            }
            if let Termination::MajorityFound(w) = res.termination {
                prop_assert_eq!(res.winners.clone(), vec![w]);
            }
        }
    }

    #[test]
    fn prop_every_rule_has_winners(p in profile_strategy()) {
        prop_assert!(!p.plurality_winners().is_empty());
        prop_assert!(!p.borda_winners().is_empty());
        prop_assert!(!p.copeland_winners().is_empty());
        prop_assert!(!p.minimax_winners().is_empty());
        prop_assert!(!p.plurality_with_runoff_winners().is_empty());
    }

    /// Borda hands out n(n-1)/2 points per voter.
    #[test]
    fn prop_borda_total(p in profile_strategy()) {
        let n = p.num_candidates() as u64;
        let total: u64 = borda_scores(&p).iter().sum();
        prop_assert_eq!(total, p.num_voters() * n * (n - 1) / 2);
    }

    #[test]
    fn prop_removing_nothing_is_identity(p in profile_strategy()) {
        let (same, mapping) = p.remove_candidates(&[]).unwrap();
        prop_assert_eq!(mapping, p.candidates().collect::<Vec<_>>());
        prop_assert_eq!(same.margin_graph(), p.margin_graph());
        prop_assert_eq!(same, p);
    }

    /// Removing a candidate does not change the margins between the others.
    #[test]
    fn prop_removal_keeps_margins(p in profile_strategy(), removed in 0usize..5) {
        prop_assume!(removed < p.num_candidates() && p.num_candidates() > 1);
        let (reduced, mapping) = p.remove_candidates(&[removed]).unwrap();
        prop_assert_eq!(reduced.num_voters(), p.num_voters());
        for x in reduced.candidates() {
            for y in reduced.candidates() {
                prop_assert_eq!(reduced.margin(x, y), p.margin(mapping[x], mapping[y]));
            }
        }
    }
}
