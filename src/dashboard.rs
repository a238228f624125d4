use log::{debug, info, warn};

use election_results::builder::DatasetBuilder;
use election_results::*;
use snafu::{prelude::*, Snafu};

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::json;
use serde_json::Value as JSValue;
use text_diff::print_diff;

use crate::args::Args;
use crate::dashboard::config_reader::*;

pub mod config_reader;
pub mod export;
pub mod io_common;
pub mod io_csv;
pub mod io_excel;
pub mod report;

#[derive(Debug, Snafu)]
pub enum DashboardError {
    #[snafu(display("Error opening file {path}"))]
    OpeningExcel {
        source: calamine::XlsxError,
        path: String,
    },
    #[snafu(display("Worksheet {name} not found in {path}"))]
    MissingWorksheet { name: String, path: String },
    #[snafu(display("The spreadsheet has no worksheet or no header row"))]
    EmptyExcel {},
    #[snafu(display("Error opening file {path}"))]
    CsvOpen { source: csv::Error, path: String },
    #[snafu(display("Error reading line {lineno}"))]
    CsvLineParse { source: csv::Error, lineno: usize },
    #[snafu(display("Error writing the results to {path}"))]
    CsvWrite { source: csv::Error, path: String },
    #[snafu(display("Column {column:?} not found in {path}"))]
    MissingColumn { column: String, path: String },
    #[snafu(display("Line {lineno} is too short"))]
    LineTooShort { lineno: usize },
    #[snafu(display("Line {lineno}: empty value in column {column:?}"))]
    MissingValue { lineno: usize, column: String },
    #[snafu(display("Line {lineno}: the vote count {content:?} is not a non-negative whole number"))]
    VoteCountParse { lineno: usize, content: String },
    #[snafu(display("Line {lineno}: {source}"))]
    InvalidRow {
        source: AggregationError,
        lineno: usize,
    },
    #[snafu(display("The file {path} does not contain any result"))]
    EmptyDataset { path: String },
    #[snafu(display("Unknown input type {input_type:?} (expected csv or xlsx)"))]
    UnknownProvider { input_type: String },
    #[snafu(display("No input file: use --input or the dataSource section of the configuration"))]
    MissingInput {},
    #[snafu(display("Error opening file {path}"))]
    OpeningJson {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error reading or writing JSON"))]
    ParsingJson { source: serde_json::Error },
    #[snafu(display("Error writing {path}"))]
    Writing {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("The configuration file has no parent directory"))]
    MissingParentDir {},

    #[snafu(whatever, display("{message}"))]
    Whatever {
        message: String,
        #[snafu(source(from(Box<dyn std::error::Error>, Some)))]
        source: Option<Box<dyn std::error::Error>>,
    },
}

pub type DashboardResult<T> = Result<T, DashboardError>;

/// A result row, as parsed by the readers.
/// This is before checking the rows against each other.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct ParsedRow {
    pub lineno: usize,
    pub constituency: String,
    pub candidate: String,
    pub party: String,
    pub total_votes: u64,
}

#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum Provider {
    Csv,
    Excel,
}

impl Provider {
    /// The explicit input type wins. Otherwise the type is guessed from the file extension.
    pub fn select(input_type: Option<&str>, path: &str) -> DashboardResult<Provider> {
        match input_type {
            Some("csv") => Ok(Provider::Csv),
            Some("xlsx") | Some("excel") => Ok(Provider::Excel),
            Some(x) => UnknownProviderSnafu { input_type: x }.fail(),
            None => {
                let ext = Path::new(path)
                    .extension()
                    .and_then(|e| e.to_str())
                    .map(|e| e.to_lowercase());
                match ext.as_deref() {
                    Some("xlsx") => Ok(Provider::Excel),
                    _ => Ok(Provider::Csv),
                }
            }
        }
    }
}

/// Everything needed for one run, after merging the command line and the configuration file.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Settings {
    pub dashboard_name: String,
    pub input_path: String,
    pub provider: Provider,
    pub excel_worksheet_name: Option<String>,
    pub columns: Columns,
    pub parties: Vec<Party>,
    pub party: Option<String>,
    pub constituency: Option<String>,
    pub out: Option<String>,
    pub export: Option<String>,
    pub reference: Option<String>,
}

fn resolve_path(root: &Path, p: &str) -> String {
    let pb: PathBuf = root.join(p);
    pb.display().to_string()
}

pub fn resolve_settings(args: &Args) -> DashboardResult<Settings> {
    let (config, root_p): (DashboardConfig, PathBuf) = match &args.config {
        Some(config_path) => {
            let config = read_config(config_path)?;
            let root = Path::new(config_path)
                .parent()
                .context(MissingParentDirSnafu {})?;
            (config, root.to_path_buf())
        }
        None => (DashboardConfig::default(), PathBuf::new()),
    };

    let input_path = match (&args.input, &config.data_source.file_path) {
        (Some(p), _) => p.clone(),
        (None, Some(p)) => resolve_path(&root_p, p),
        (None, None) => return MissingInputSnafu {}.fail(),
    };
    let input_type = args
        .input_type
        .clone()
        .or_else(|| config.data_source.provider.clone());
    let provider = Provider::select(input_type.as_deref(), &input_path)?;

    let output_dir: Option<String> = config
        .output_settings
        .output_directory
        .as_ref()
        .map(|d| resolve_path(&root_p, d));
    let out = args.out.clone().or_else(|| {
        output_dir
            .as_ref()
            .map(|d| resolve_path(Path::new(d), "summary.json"))
    });
    let export = args.export.clone().or_else(|| {
        if config.output_settings.export_constituency.unwrap_or(false) {
            Some(output_dir.clone().unwrap_or_else(|| ".".to_string()))
        } else {
            None
        }
    });

    let res = Settings {
        dashboard_name: config
            .output_settings
            .dashboard_name
            .clone()
            .unwrap_or_else(|| DEFAULT_DASHBOARD_NAME.to_string()),
        input_path,
        provider,
        excel_worksheet_name: args
            .excel_worksheet_name
            .clone()
            .or_else(|| config.data_source.excel_worksheet_name.clone()),
        columns: config.data_source.columns(),
        parties: config.known_parties(),
        party: args.party.clone().or_else(|| config.selection.party.clone()),
        constituency: args
            .constituency
            .clone()
            .or_else(|| config.selection.constituency.clone()),
        out,
        export,
        reference: args.reference.clone(),
    };
    info!("settings: {:?}", res);
    Ok(res)
}

/// Checks the rows against each other and builds the dataset.
fn validate_rows(parsed_rows: Vec<ParsedRow>) -> DashboardResult<Vec<ResultRow>> {
    let mut builder = DatasetBuilder::new();
    for pr in parsed_rows {
        let lineno = pr.lineno;
        builder
            .add_result(&pr.constituency, &pr.candidate, &pr.party, pr.total_votes)
            .context(InvalidRowSnafu { lineno })?;
    }
    Ok(builder.build())
}

/// Loads the dataset once. It is only borrowed afterwards.
pub fn load_dataset(settings: &Settings) -> DashboardResult<Vec<ResultRow>> {
    info!(
        "Attempting to read results file {:?} ({:?})",
        settings.input_path, settings.provider
    );
    let parsed_rows = match settings.provider {
        Provider::Csv => io_csv::read_csv_results(&settings.input_path, &settings.columns)?,
        Provider::Excel => io_excel::read_excel_results(
            &settings.input_path,
            settings.excel_worksheet_name.as_deref(),
            &settings.columns,
        )?,
    };
    let rows = validate_rows(parsed_rows)?;
    ensure!(
        !rows.is_empty(),
        EmptyDatasetSnafu {
            path: settings.input_path.clone()
        }
    );
    Ok(rows)
}

fn write_output(out: Option<&str>, content: &str) -> DashboardResult<()> {
    match out {
        None | Some("stdout") => {
            println!("{}", content);
        }
        Some(path) => {
            if let Some(parent) = Path::new(path).parent() {
                if !parent.as_os_str().is_empty() {
                    fs::create_dir_all(parent).context(WritingSnafu { path })?;
                }
            }
            fs::write(path, content).context(WritingSnafu { path })?;
            info!("Summary written to {}", path);
        }
    }
    Ok(())
}

/// Compares a computed summary with a reference summary.
pub fn check_reference(reference_path: &str, pretty_js_summary: &str) -> DashboardResult<()> {
    let summary_ref = read_summary(reference_path)?;
    let pretty_js_summary_ref =
        serde_json::to_string_pretty(&summary_ref).context(ParsingJsonSnafu {})?;
    if pretty_js_summary_ref != pretty_js_summary {
        warn!("Found differences with the reference summary");
        print_diff(pretty_js_summary_ref.as_str(), pretty_js_summary, "\n");
        whatever!("Difference detected between calculated summary and reference summary")
    }
    info!("The summary matches the reference {}", reference_path);
    Ok(())
}

pub fn run_dashboard(args: &Args) -> DashboardResult<()> {
    let settings = resolve_settings(args)?;
    let rows = load_dataset(&settings)?;

    let party = match (&settings.party, settings.parties.first()) {
        (Some(p), _) => p.clone(),
        (None, Some(p)) => p.name.clone(),
        (None, None) => whatever!("No party selected and no known party configured"),
    };
    let constituency = match &settings.constituency {
        Some(c) => c.clone(),
        None => constituencies(&rows)
            .into_iter()
            .next()
            .context(EmptyDatasetSnafu {
                path: settings.input_path.clone(),
            })?,
    };
    info!("Selection: party {:?}, constituency {:?}", party, constituency);

    let summary = report::build_summary(
        &settings.dashboard_name,
        &settings.parties,
        &rows,
        &party,
        &constituency,
    );
    let pretty_js_summary = serde_json::to_string_pretty(&summary).context(ParsingJsonSnafu {})?;
    write_output(settings.out.as_deref(), &pretty_js_summary)?;

    if let Some(target) = &settings.export {
        export::export_constituency(&rows, &constituency, target)?;
    }

    // The reference summary, if provided for comparison
    if let Some(reference_path) = &settings.reference {
        check_reference(reference_path, &pretty_js_summary)?;
    }

    Ok(())
}
