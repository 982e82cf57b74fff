use clap::Parser;

/// This is a tabulation program for yes/no votes, keeping only the last vote of each voter.
#[derive(Parser, Debug, Clone, Default)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path, optional) The file containing the description of the vote, in JSON format.
    /// The other options override the values of this file.
    #[clap(short, long, value_parser)]
    pub config: Option<String>,
    /// (file path) A reference file containing the summary of the vote in JSON format. If provided, dtally will
    /// check that the tabulated output matches the reference.
    #[clap(short, long, value_parser)]
    pub reference: Option<String>,

    /// (file path, 'stdout' or empty) If specified, the summary of the vote will be written in JSON format to the given
    /// location. Setting this option overrides the path that may be specified with the --config option.
    /// Defaults to vote_data.json
    #[clap(short, long, value_parser)]
    pub out: Option<String>,

    /// (file path or empty) The spreadsheet with the responses. Setting this option overrides the path that may
    /// be specified with the --config option.
    #[clap(short, long, value_parser)]
    pub input: Option<String>,

    /// (xlsx or csv) The type of the input. By default, it is guessed from the extension of the input file.
    #[clap(long, value_parser)]
    pub input_type: Option<String>,

    /// (default 6, or G) The column with the first names. Numbers start at 0, letters at A.
    #[clap(long, value_parser)]
    pub first_name_column: Option<String>,

    /// (default 7, or H) The column with the last names.
    #[clap(long, value_parser)]
    pub last_name_column: Option<String>,

    /// (default 9, or J) The column with the answers.
    #[clap(long, value_parser)]
    pub vote_column: Option<String>,

    /// (default: first worksheet) When using an Excel file, indicates the name of the worksheet to use.
    #[clap(long, value_parser)]
    pub excel_worksheet_name: Option<String>,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard output.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}
