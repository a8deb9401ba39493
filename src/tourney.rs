use log::{debug, info, warn};

use snafu::{prelude::*, Snafu};
use tournament_rules::*;

use std::fs;

use serde_json::json;
use serde_json::Map as JSMap;
use serde_json::Value as JSValue;
use text_diff::print_diff;

use crate::args::Args;
use crate::tourney::config_reader::*;
use crate::tourney::io_csv::read_csv_profile;
use crate::tourney::render::*;

pub mod config_reader;
pub mod io_csv;
pub mod render;

#[derive(Debug, Snafu)]
pub enum TourneyError {
    #[snafu(display("Error opening file {path}"))]
    OpeningJson {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error parsing JSON"))]
    ParsingJson { source: serde_json::Error },
    #[snafu(display("Error opening CSV file {path}"))]
    CsvOpen { source: csv::Error, path: String },
    #[snafu(display("Error parsing CSV line"))]
    CsvLineParse { source: csv::Error },
    #[snafu(display("Line {lineno} is too short"))]
    CsvLineTooShort { lineno: usize },
    #[snafu(display("Line {lineno}: cannot read the count {value:?}"))]
    CsvCount {
        source: std::num::ParseIntError,
        lineno: usize,
        value: String,
    },
    #[snafu(display("Ballot {ballot} ranks unknown candidate {name:?}"))]
    UnknownCandidateName { ballot: usize, name: String },
    #[snafu(display("Unknown example profile {name:?}"))]
    UnknownExample { name: String },
    #[snafu(display("Cannot evaluate the profile: {source}"))]
    InvalidProfile { source: TournamentErrors },
    #[snafu(display("Error writing file {path}"))]
    WritingOutput {
        source: std::io::Error,
        path: String,
    },

    #[snafu(whatever, display("{message}"))]
    Whatever {
        message: String,
        #[snafu(source(from(Box<dyn std::error::Error>, Some)))]
        source: Option<Box<dyn std::error::Error>>,
    },
}

pub type TourneyResult<T> = Result<T, TourneyError>;

/// A profile together with the names of its candidates.
#[derive(Debug, Clone)]
pub struct Election {
    pub title: Option<String>,
    // Indexed by candidate
    pub names: Vec<String>,
    pub profile: Profile,
    pub limits: SearchLimits,
}

/// The outcome of Split Cycle, by cycle enumeration when the limits allow it.
#[derive(Debug, Clone)]
pub struct SplitCycleRun {
    // None when the enumeration exceeded the limits.
    pub outcome: Option<SplitCycleOutcome>,
    pub defeats: DefeatRelation,
}

impl SplitCycleRun {
    pub fn cycles(&self) -> Option<Vec<Cycle>> {
        self.outcome
            .as_ref()
            .map(|o| o.cycles.iter().map(|r| r.cycle.clone()).collect())
    }
}

pub fn evaluate_split_cycle(election: &Election) -> TourneyResult<SplitCycleRun> {
    match split_cycle(&election.profile, &election.limits) {
        Ok(outcome) => Ok(SplitCycleRun {
            defeats: outcome.defeats.clone(),
            outcome: Some(outcome),
        }),
        Err(TournamentErrors::ResourceExhausted(resource)) => {
            warn!(
                "evaluate_split_cycle: {:?}, computing the defeats from path strengths",
                resource
            );
            Ok(SplitCycleRun {
                outcome: None,
                defeats: split_cycle_by_paths(&election.profile),
            })
        }
        Err(e) => Err(e).context(InvalidProfileSnafu {}),
    }
}

fn names_of(candidates: &[Candidate], names: &[String]) -> Vec<String> {
    candidates.iter().map(|&c| names[c].clone()).collect()
}

fn edge_label(from: Candidate, to: Candidate, names: &[String]) -> String {
    format!("{},{}", names[from], names[to])
}

fn scores_to_json<S: Into<JSValue> + Copy>(scores: &[S], names: &[String]) -> JSMap<String, JSValue> {
    let mut res: JSMap<String, JSValue> = JSMap::new();
    for (c, s) in scores.iter().enumerate() {
        res.insert(names[c].clone(), (*s).into());
    }
    res
}

fn tally_to_json(tally: &[(Candidate, u64)], names: &[String]) -> JSMap<String, JSValue> {
    let mut res: JSMap<String, JSValue> = JSMap::new();
    for (c, count) in tally.iter() {
        res.insert(names[*c].clone(), json!(count));
    }
    res
}

fn score_card_to_json<S: Into<JSValue> + Copy>(card: &ScoreCard<S>, names: &[String]) -> JSValue {
    json!({
        "scores": scores_to_json(&card.scores, names),
        "winners": names_of(&card.winners, names),
    })
}

fn elimination_to_json(outcome: &EliminationOutcome, names: &[String]) -> JSValue {
    let rounds: Vec<JSValue> = outcome
        .rounds
        .iter()
        .map(|round| {
            let mut js = json!({
                "round": round.round,
                "tally": tally_to_json(&round.first_place_tally, names),
                "eliminated": names_of(&round.eliminated, names),
            });
            if let Some(last) = &round.last_place_tally {
                js["lastPlaceTally"] = JSValue::Object(tally_to_json(last, names));
            }
            js
        })
        .collect();
    let termination = match outcome.termination {
        Termination::MajorityFound(_) => "majorityFound",
        Termination::AllTied => "allTied",
    };
    json!({
        "winners": names_of(&outcome.winners, names),
        "rounds": rounds,
        "termination": termination,
        "finalTally": tally_to_json(&outcome.final_tally, names),
    })
}

fn runoff_to_json(outcome: &RunoffOutcome, names: &[String]) -> JSValue {
    let runoffs: Vec<JSValue> = outcome
        .runoffs
        .iter()
        .map(|r| {
            json!({
                "first": names[r.first],
                "second": names[r.second],
                "margin": r.margin,
            })
        })
        .collect();
    json!({
        "winners": names_of(&outcome.winners, names),
        "majorityWinner": outcome.majority_winner.map(|c| names[c].clone()),
        "scores": scores_to_json(&outcome.plurality_scores, names),
        "runoffs": runoffs,
    })
}

fn split_cycle_to_json(run: &SplitCycleRun, names: &[String]) -> JSValue {
    let defeats: Vec<String> = run
        .defeats
        .edges()
        .iter()
        .map(|(x, y)| edge_label(*x, *y, names))
        .collect();
    let winners = run.defeats.undefeated();
    match &run.outcome {
        Some(outcome) => {
            let cycles: Vec<JSValue> = outcome
                .cycles
                .iter()
                .map(|report| {
                    let weakest: Vec<String> = report
                        .weakest_edges
                        .iter()
                        .map(|(x, y)| edge_label(*x, *y, names))
                        .collect();
                    json!({
                        "cycle": names_of(report.cycle.candidates(), names),
                        "weakestMargin": report.weakest_margin,
                        "weakestEdges": weakest,
                    })
                })
                .collect();
            json!({
                "method": "cycles",
                "winners": names_of(&winners, names),
                "defeats": defeats,
                "cycles": cycles,
            })
        }
        None => json!({
            "method": "paths",
            "winners": names_of(&winners, names),
            "defeats": defeats,
            "cycles": JSValue::Null,
        }),
    }
}

pub fn build_summary_js(election: &Election, split: &SplitCycleRun) -> JSValue {
    let profile = &election.profile;
    let names = &election.names;
    let graph = profile.margin_graph();
    let edges: Vec<String> = graph
        .edges()
        .iter()
        .map(|(x, y, m)| format!("{},{}", edge_label(*x, *y, names), m))
        .collect();
    let cycles: JSValue = match split.cycles() {
        Some(cs) => {
            let named: Vec<Vec<String>> = cs.iter().map(|c| names_of(c.candidates(), names)).collect();
            json!(named)
        }
        None => JSValue::Null,
    };
    let name_of = |c: Option<Candidate>| c.map(|x| names[x].clone());

    json!({
        "title": election.title,
        "candidates": names,
        "numVoters": profile.num_voters(),
        "strictMajoritySize": profile.strict_majority_size(),
        "marginMatrix": graph.margin_matrix(),
        "marginGraph": {
            "nodes": names,
            "edges": edges,
        },
        "majorityWinner": name_of(profile.majority_winner()),
        "condorcetWinner": name_of(profile.condorcet_winner()),
        "condorcetLoser": name_of(profile.condorcet_loser()),
        "cycles": cycles,
        "results": {
            "plurality": score_card_to_json(&plurality(profile), names),
            "borda": score_card_to_json(&borda(profile), names),
            "copeland": score_card_to_json(&copeland(profile), names),
            "minimax": score_card_to_json(&minimax(profile), names),
            "pluralityWithRunoff": runoff_to_json(&profile.plurality_with_runoff_with_explanation(), names),
            "instantRunoff": elimination_to_json(&profile.instant_runoff_with_explanation(), names),
            "coombs": elimination_to_json(&profile.coombs_with_explanation(), names),
            "splitCycle": split_cycle_to_json(split, names),
        },
    })
}

/// The names a, b, c, ... used when the input does not name the candidates.
pub fn default_names(num_candidates: usize) -> Vec<String> {
    (0..num_candidates)
        .map(|idx| {
            if idx < 26 {
                ((b'a' + idx as u8) as char).to_string()
            } else {
                format!("c{}", idx)
            }
        })
        .collect()
}

fn load_example(name: &str) -> TourneyResult<Election> {
    let fixture = fixtures::find(name).context(UnknownExampleSnafu { name })?;
    let profile = fixture.profile().context(InvalidProfileSnafu {})?;
    Ok(Election {
        title: Some(fixture.title.to_string()),
        names: default_names(profile.num_candidates()),
        profile,
        limits: SearchLimits::DEFAULT_LIMITS,
    })
}

fn load_election(args: &Args) -> TourneyResult<Election> {
    match (&args.config, &args.input, &args.example) {
        (Some(config_path), None, None) => {
            info!("Reading profile description {:?}", config_path);
            read_profile_config(config_path)?.into_election()
        }
        (None, Some(input_path), None) => {
            let input_type = args.input_type.clone().unwrap_or_else(|| "csv".to_string());
            match input_type.as_str() {
                "csv" => read_csv_profile(input_path, args.skip_rows.unwrap_or(0)),
                x => whatever!("Input type {:?} not supported", x),
            }
        }
        (None, None, Some(name)) => load_example(name),
        (None, None, None) => whatever!("One of --config, --input or --example is required"),
        _ => whatever!("Only one of --config, --input and --example can be provided"),
    }
}

fn apply_limit_overrides(limits: &SearchLimits, args: &Args) -> SearchLimits {
    SearchLimits {
        max_candidates: args.max_candidates.or(limits.max_candidates),
        max_search_steps: args.max_search_steps.or(limits.max_search_steps),
    }
}

fn summary_to_stdout(out: &Option<String>) -> bool {
    matches!(out.as_deref(), None | Some("stdout"))
}

fn write_summary(pretty_js: &str, out: &Option<String>) -> TourneyResult<()> {
    match out.as_deref() {
        None | Some("stdout") => {
            println!("{}", pretty_js);
            Ok(())
        }
        Some(path) => {
            info!("Writing summary to {:?}", path);
            fs::write(path, pretty_js).context(WritingOutputSnafu { path })
        }
    }
}

fn check_reference(pretty_js_stats: &str, reference_path: &str) -> TourneyResult<()> {
    let summary_ref = read_summary(reference_path)?;
    debug!("reference summary: {:?}", summary_ref);
    let pretty_js_summary_ref =
        serde_json::to_string_pretty(&summary_ref).context(ParsingJsonSnafu {})?;
    if pretty_js_summary_ref != pretty_js_stats {
        warn!("Found differences with the reference string");
        print_diff(pretty_js_summary_ref.as_str(), pretty_js_stats, "\n");
        whatever!("Difference detected between calculated summary and reference summary")
    }
    Ok(())
}

pub fn run(args: &Args) -> TourneyResult<()> {
    let mut election = load_election(args)?;
    election.limits = apply_limit_overrides(&election.limits, args);
    info!(
        "run: {} candidates, {} voters, limits {:?}",
        election.profile.num_candidates(),
        election.profile.num_voters(),
        election.limits
    );

    let split = evaluate_split_cycle(&election)?;
    let result_js = build_summary_js(&election, &split);
    let pretty_js_stats = serde_json::to_string_pretty(&result_js).context(ParsingJsonSnafu {})?;
    write_summary(&pretty_js_stats, &args.out)?;

    if let Some(format) = &args.graph {
        let format = GraphFormat::parse(format)?;
        let graphs = render_graphs(format, &election, &split);
        // Stdout only carries the JSON summary when it is written there.
        if summary_to_stdout(&args.out) {
            eprintln!("{}", graphs);
        } else {
            println!("{}", graphs);
        }
    }

    if let Some(reference_path) = &args.reference {
        check_reference(&pretty_js_stats, reference_path)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn test_data(name: &str) -> String {
        format!("{}/tests/data/{}", env!("CARGO_MANIFEST_DIR"), name)
    }

    fn summary_of(election: &Election) -> JSValue {
        let split = evaluate_split_cycle(election).unwrap();
        build_summary_js(election, &split)
    }

    #[test]
    fn summary_of_illustrative_ex2() {
        init();
        let election = load_example("illustrative_ex2").unwrap();
        let js = summary_of(&election);
        assert_eq!(js["title"], json!("Illustrative Example 2"));
        assert_eq!(js["numVoters"], json!(19));
        assert_eq!(js["strictMajoritySize"], json!(10));
        assert_eq!(js["condorcetWinner"], JSValue::Null);
        assert_eq!(
            js["cycles"],
            json!([["a", "b", "c"], ["a", "b", "c", "d"], ["a", "b", "d"]])
        );
        let results = &js["results"];
        assert_eq!(results["splitCycle"]["method"], json!("cycles"));
        assert_eq!(results["splitCycle"]["winners"], json!(["b"]));
        assert_eq!(
            results["splitCycle"]["defeats"],
            json!(["b,c", "b,d", "c,a", "c,d", "d,a"])
        );
        assert_eq!(results["instantRunoff"]["winners"], json!(["d"]));
        assert_eq!(results["instantRunoff"]["termination"], json!("majorityFound"));
        assert_eq!(results["coombs"]["winners"], json!(["b"]));
        assert_eq!(results["plurality"]["scores"], json!({"a": 7, "b": 5, "c": 3, "d": 4}));
        assert_eq!(results["borda"]["winners"], json!(["b"]));
        assert_eq!(results["copeland"]["winners"], json!(["b", "c"]));
        assert_eq!(results["minimax"]["winners"], json!(["b"]));
        assert_eq!(
            results["pluralityWithRunoff"]["runoffs"],
            json!([{"first": "a", "second": "b", "margin": 1}])
        );
    }

    #[test]
    fn summary_of_condorcet_winner() {
        init();
        let election = load_example("illustrative_ex1").unwrap();
        let js = summary_of(&election);
        assert_eq!(js["condorcetWinner"], json!("c"));
        assert_eq!(js["condorcetLoser"], json!("a"));
        assert_eq!(js["cycles"], json!([]));
        assert_eq!(js["marginGraph"]["edges"][0], json!("b,a,5"));
        assert_eq!(js["results"]["splitCycle"]["winners"], json!(["c"]));
        let rounds = &js["results"]["coombs"]["rounds"];
        assert_eq!(rounds[0]["eliminated"], json!(["a"]));
        assert_eq!(rounds[0]["lastPlaceTally"]["a"], json!(13));
    }

    #[test]
    fn exhausted_search_falls_back_to_paths() {
        init();
        let mut election = load_example("illustrative_ex2").unwrap();
        election.limits = SearchLimits {
            max_candidates: None,
            max_search_steps: Some(1),
        };
        let js = summary_of(&election);
        assert_eq!(js["cycles"], JSValue::Null);
        assert_eq!(js["results"]["splitCycle"]["method"], json!("paths"));
        assert_eq!(js["results"]["splitCycle"]["winners"], json!(["b"]));
    }

    #[test]
    fn limit_overrides() {
        let args = Args {
            max_candidates: Some(3),
            ..Args::default()
        };
        let limits = apply_limit_overrides(&SearchLimits::DEFAULT_LIMITS, &args);
        assert_eq!(limits.max_candidates, Some(3));
        assert_eq!(
            limits.max_search_steps,
            SearchLimits::DEFAULT_LIMITS.max_search_steps
        );
    }

    #[test]
    fn unknown_example() {
        assert!(matches!(
            load_example("illustrative_ex9"),
            Err(TourneyError::UnknownExample { .. })
        ));
    }

    #[test]
    fn exactly_one_source() {
        let args = Args {
            config: Some(test_data("illustrative_ex1.json")),
            example: Some("illustrative_ex1".to_string()),
            ..Args::default()
        };
        assert!(load_election(&args).is_err());
        assert!(load_election(&Args::default()).is_err());
    }

    #[test]
    fn json_config_matches_example() {
        init();
        let args = Args {
            config: Some(test_data("illustrative_ex1.json")),
            ..Args::default()
        };
        let election = load_election(&args).unwrap();
        let expected = load_example("illustrative_ex1").unwrap();
        assert_eq!(election.profile, expected.profile);
        assert_eq!(election.names, vec!["Alice", "Bob", "Charlie", "Dave"]);
        assert_eq!(election.limits.max_search_steps, Some(1_000_000));
    }

    #[test]
    fn csv_input() {
        init();
        let args = Args {
            input: Some(test_data("condorcet_cycle.csv")),
            skip_rows: Some(1),
            ..Args::default()
        };
        let election = load_election(&args).unwrap();
        let expected = load_example("condorcet_cycle").unwrap();
        assert_eq!(election.profile, expected.profile);
        assert_eq!(election.names, vec!["Alice", "Bob", "Charlie"]);
    }

    #[test]
    fn reference_comparison() {
        init();
        let out = std::env::temp_dir().join(format!(
            "tourney_reference_comparison_{}.json",
            std::process::id()
        ));
        let out_path = out.display().to_string();
        let args = Args {
            example: Some("illustrative_ex3".to_string()),
            out: Some(out_path.clone()),
            ..Args::default()
        };
        run(&args).unwrap();

        let same = Args {
            reference: Some(out_path.clone()),
            ..args.clone()
        };
        // The summary is written again before the comparison.
        run(&same).unwrap();

        let other = Args {
            example: Some("illustrative_ex2".to_string()),
            out: Some("stdout".to_string()),
            reference: Some(out_path),
            ..Args::default()
        };
        assert!(run(&other).is_err());
        let _ = fs::remove_file(&out);
    }

    #[test]
    fn graphs_leave_stdout_to_the_summary() {
        assert!(summary_to_stdout(&None));
        assert!(summary_to_stdout(&Some("stdout".to_string())));
        assert!(!summary_to_stdout(&Some("summary.json".to_string())));

        let args = Args {
            example: Some("condorcet_cycle".to_string()),
            graph: Some("dot".to_string()),
            ..Args::default()
        };
        run(&args).unwrap();
    }
}
