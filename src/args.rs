use clap::Parser;

/// Computes the electoral tally of a winner-take-all contest and writes the data for its map.
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path) The JSON file describing the contest: regions, candidates and rules.
    /// See the manual of the electoral_tally crate for the format.
    #[clap(short, long, value_parser)]
    pub config: String,

    /// (file path or 'stdout') If specified, the map summary will be written in JSON format to the given
    /// location. Setting this option overrides the outputPath that may be specified in the configuration.
    #[clap(short, long, value_parser)]
    pub out: Option<String>,

    /// (file path) A reference map summary in JSON format. If provided, elecmap will
    /// check that the computed summary matches the reference.
    #[clap(short, long, value_parser)]
    pub reference: Option<String>,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard output.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}
