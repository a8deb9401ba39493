use clap::Parser;

/// Evaluates majority margins, majority cycles, Split Cycle and other voting rules over ranked ballots.
#[derive(Parser, Debug, Clone, Default)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path, optional) A JSON description of the profile: candidates, ballots and search limits.
    /// For more information about the file format, read the manual of the tournament_rules crate.
    #[clap(short, long, value_parser)]
    pub config: Option<String>,

    /// (file path) A reference file containing a summary in JSON format. If provided, tourney will
    /// check that the computed summary matches the reference.
    #[clap(short, long, value_parser)]
    pub reference: Option<String>,

    /// (file path, 'stdout' or empty) If specified, the summary will be written in JSON format to the given
    /// location. By default, it is printed on the standard output.
    #[clap(short, long, value_parser)]
    pub out: Option<String>,

    /// (file path or empty) A file containing the ballots. Its format is given by --input-type.
    #[clap(short, long, value_parser)]
    pub input: Option<String>,

    /// (default csv) The type of the input. Only csv is currently supported.
    #[clap(long, value_parser)]
    pub input_type: Option<String>,

    /// (default 0) The number of rows to skip at the start of the input, for example a header.
    #[clap(long, value_parser)]
    pub skip_rows: Option<usize>,

    /// (name or empty) Evaluates one of the built-in profiles: condorcet_cycle, condorcet_cycle_with_winner,
    /// condorcet_cycle_with_loser, illustrative_ex1, illustrative_ex2, illustrative_ex3.
    #[clap(short, long, value_parser)]
    pub example: Option<String>,

    /// Profiles with more candidates do not enumerate cycles. Overrides the limits of the configuration.
    #[clap(long, value_parser)]
    pub max_candidates: Option<usize>,

    /// Maximum number of steps of the cycle search. Overrides the limits of the configuration.
    #[clap(long, value_parser)]
    pub max_search_steps: Option<u64>,

    /// ('text', 'dot' or empty) If specified, prints the margin graph, the majority cycles and the
    /// Split Cycle defeats, as edge lists or in the Graphviz format. The graphs go to stderr
    /// when the summary is written to stdout.
    #[clap(short, long, value_parser)]
    pub graph: Option<String>,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard output.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}
