use clap::Parser;

/// Summaries of the Andhra Pradesh 2024 assembly election results.
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path, optional) A JSON configuration file describing the data source, the known parties
    /// and the selection. See the manual for the format.
    #[clap(short, long, value_parser)]
    pub config: Option<String>,

    /// (file path) The file containing the election results. Setting this option overrides the path
    /// that may be specified with the --config option.
    #[clap(short, long, value_parser)]
    pub input: Option<String>,

    /// (csv or xlsx) The type of the input. By default, it is guessed from the file extension.
    #[clap(long, value_parser)]
    pub input_type: Option<String>,

    /// (default: first worksheet) When using an Excel file, indicates the name of the worksheet to use.
    #[clap(long, value_parser)]
    pub excel_worksheet_name: Option<String>,

    /// (default: the first known party) The party shown in the party view.
    #[clap(short, long, value_parser)]
    pub party: Option<String>,

    /// (default: the first constituency in alphabetical order) The constituency shown in the
    /// constituency view.
    #[clap(long, value_parser)]
    pub constituency: Option<String>,

    /// (file path, 'stdout' or empty) If specified, the summary will be written in JSON format to the given
    /// location. Otherwise it is printed on the standard output.
    #[clap(short, long, value_parser)]
    pub out: Option<String>,

    /// (file path, directory or 'stdout') If specified, the results of the selected constituency are
    /// exported in CSV format. When a directory is given, the file is named `<constituency>_results.csv`.
    #[clap(long, value_parser)]
    pub export: Option<String>,

    /// (file path) A reference file containing the expected summary in JSON format. If provided,
    /// apresults will check that the computed summary matches the reference.
    #[clap(short, long, value_parser)]
    pub reference: Option<String>,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard output.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}
