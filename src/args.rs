use clap::Parser;

/// Replays the selections made on a ballot and reports how each category is classified.
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path, optional) The layout of the ballot in JSON format. If not provided, the standard
    /// ballot with five categories is used.
    #[clap(short, long, value_parser)]
    pub config: Option<String>,

    /// (file path) The selections to replay, in JSON format. See the manual for the format.
    #[clap(short, long, value_parser)]
    pub input: Option<String>,

    /// (file path, 'stdout' or empty) If specified, the categories that are not blank will be written
    /// in JSON format to the given location.
    #[clap(short, long, value_parser)]
    pub out: Option<String>,

    /// (file path) A reference file with the expected output in JSON format. If provided, ballotcheck will
    /// check that the output matches the reference.
    #[clap(short, long, value_parser)]
    pub reference: Option<String>,

    /// (error key) Prints the explanation shown to the voter for this error key and exits.
    #[clap(long, value_parser)]
    pub explain: Option<String>,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard output.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}
