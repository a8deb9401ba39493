/*!
Majority tournaments over ranked ballots.

A [Profile] is a multiset of rankings. From it, this crate derives the
pairwise majority margins, the majority cycles, the Split Cycle defeats and
the winners of a few classical voting rules, with the intermediate steps
that justify each outcome.

```
use tournament_rules::fixtures;

let profile = fixtures::find("illustrative_ex2").unwrap().profile()?;
assert_eq!(profile.split_cycle_winners()?, vec![1]);
assert_eq!(profile.instant_runoff_winners(), vec![3]);
# Ok::<(), tournament_rules::TournamentErrors>(())
```

See the [manual] for a description of each rule.
*/

mod config;
mod cycles;
mod elimination;
mod margins;
mod profile;
mod scoring;
mod split_cycle;

pub mod builder;
pub mod fixtures;
pub mod manual;

pub use crate::config::*;
pub use crate::cycles::{find_cycles, Cycle};
pub use crate::elimination::{plurality_with_runoff, run_elimination};
pub use crate::margins::MarginGraph;
pub use crate::profile::Profile;
pub use crate::scoring::{
    borda, borda_scores, copeland, copeland_scores, minimax, minimax_scores, plurality,
    plurality_scores,
};
pub use crate::split_cycle::{
    split_cycle, split_cycle_by_paths, CycleReport, DefeatRelation, SplitCycleOutcome,
};
