use log::{debug, info, warn};

use dedup_voting::*;
use snafu::prelude::*;

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value as JSValue;
use text_diff::print_diff;

use crate::args::Args;
use crate::tally::config_reader::*;
use crate::tally::io_common::*;

pub mod config_reader;
pub mod io_common;
pub mod io_csv;
pub mod io_excel;

/// Where the summary goes when nothing else is specified.
pub const DEFAULT_OUTPUT: &str = "vote_data.json";
const STDOUT: &str = "stdout";

#[derive(Debug, Snafu)]
pub enum TallyError {
    #[snafu(display("Error opening file {path}"))]
    OpeningExcel {
        source: calamine::XlsxError,
        path: String,
    },
    #[snafu(display("The workbook {path} has no worksheet"))]
    EmptyExcel { path: String },
    #[snafu(display("Cannot find worksheet {name} in {path}"))]
    MissingWorksheet { name: String, path: String },
    #[snafu(display("Error opening CSV file {path}"))]
    CsvOpen { source: csv::Error, path: String },
    #[snafu(display("Error reading line {lineno} of {path}"))]
    CsvLineParse {
        source: csv::Error,
        path: String,
        lineno: usize,
    },
    #[snafu(display("Error opening JSON file {path}"))]
    OpeningJson {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error parsing JSON"))]
    ParsingJson { source: serde_json::Error },
    #[snafu(display("Cannot understand column index {content}"))]
    ParsingColumnIndex { content: String },
    #[snafu(display("Unknown input type {provider} (expected xlsx or csv)"))]
    UnknownProvider { provider: String },
    #[snafu(display("No input file: use --input or --config"))]
    MissingInput {},
    #[snafu(display("Cannot find the directory of {path}"))]
    MissingParentDir { path: String },
    #[snafu(display(
        "Unexpected header in column {column}: expected {expected:?}, found {found:?}"
    ))]
    HeaderMismatch {
        column: usize,
        expected: String,
        found: String,
    },
    #[snafu(display("Error writing the summary to {path}"))]
    WritingOutput {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Difference detected between calculated summary and reference summary"))]
    ReferenceMismatch {},

    #[snafu(whatever, display("{message}"))]
    Whatever {
        message: String,
        #[snafu(source(from(Box<dyn std::error::Error>, Some)))]
        source: Option<Box<dyn std::error::Error>>,
    },
}

pub type TallyResult<T> = Result<T, TallyError>;

/// Everything needed for one run, with the paths resolved.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct TallyJob {
    pub config: TallyConfig,
    pub input_path: PathBuf,
    pub provider: Provider,
    /// A file path, or stdout.
    pub output: String,
    pub reference: Option<String>,
}

/// Merges the configuration file (if any) and the command line arguments.
///
/// Paths in the configuration file are relative to its directory, paths on the
/// command line to the current directory.
pub fn build_job(args: &Args) -> TallyResult<TallyJob> {
    let (mut config, root): (TallyConfig, PathBuf) = match &args.config {
        Some(config_path) => {
            let config = read_config(config_path)?;
            let root = Path::new(config_path)
                .parent()
                .context(MissingParentDirSnafu { path: config_path })?
                .to_path_buf();
            (config, root)
        }
        None => (TallyConfig::default(), PathBuf::new()),
    };
    info!("build_job: config: {:?}", config);

    let input_path = match (&args.input, &args.config) {
        (Some(input), _) => PathBuf::from(input),
        (None, Some(_)) if !config.source.file_path.is_empty() => {
            root.join(&config.source.file_path)
        }
        _ => return MissingInputSnafu {}.fail(),
    };
    config.source.file_path = input_path.display().to_string();

    if let Some(provider) = &args.input_type {
        config.source.provider = Some(provider.clone());
    }
    if let Some(col) = &args.first_name_column {
        config.source.first_name_column_index = Some(JSValue::String(col.clone()));
    }
    if let Some(col) = &args.last_name_column {
        config.source.last_name_column_index = Some(JSValue::String(col.clone()));
    }
    if let Some(col) = &args.vote_column {
        config.source.vote_column_index = Some(JSValue::String(col.clone()));
    }
    if let Some(name) = &args.excel_worksheet_name {
        config.source.excel_worksheet_name = Some(name.clone());
    }

    let provider = match &config.source.provider {
        Some(name) => Provider::from_name(name)?,
        None => Provider::from_path(&input_path),
    };

    let output = match (&args.out, &config.output_settings.output_path) {
        (Some(out), _) => out.clone(),
        (None, Some(out)) if out == STDOUT => out.clone(),
        (None, Some(out)) => root.join(out).display().to_string(),
        (None, None) => DEFAULT_OUTPUT.to_string(),
    };
    ensure_whatever!(
        !output.trim().is_empty(),
        "Empty output path: use --out or outputPath"
    );

    Ok(TallyJob {
        config,
        input_path,
        provider,
        output,
        reference: args.reference.clone(),
    })
}

fn read_rows(job: &TallyJob) -> TallyResult<Vec<Vec<String>>> {
    info!(
        "Attempting to read {:?} file {:?}",
        job.provider, job.input_path
    );
    match job.provider {
        Provider::Xlsx => io_excel::read_excel_rows(
            &job.input_path,
            job.config.source.excel_worksheet_name.as_deref(),
        ),
        Provider::Csv => io_csv::read_csv_rows(&job.input_path),
    }
}

/// Reads the responses, tallies them and writes the summary.
///
/// Nothing is written if the responses cannot be read.
pub fn run_tally_job(job: &TallyJob) -> TallyResult<VoteSummary> {
    if let Some(contest) = &job.config.output_settings.contest_name {
        info!("Tallying {}", contest);
    }
    let layout = job.config.source.layout()?;
    debug!("run_tally_job: layout: {:?}", layout);

    let rows = read_rows(job)?;
    check_header(rows.first(), &job.config.source.expected_headers(&layout))?;

    let summary = tally_rows(&rows, &layout);
    info!("run_tally_job: summary: {:?}", summary);

    let output = SummaryOutput::from(&summary);
    let pretty_js_stats = serde_json::to_string_pretty(&output).context(ParsingJsonSnafu {})?;
    if job.output == STDOUT {
        println!("{}", pretty_js_stats);
    } else {
        fs::write(&job.output, &pretty_js_stats).context(WritingOutputSnafu { path: &job.output })?;
    }

    print!("{}", format_report(&summary, &job.output));

    // The reference summary, if provided for comparison
    if let Some(summary_p) = &job.reference {
        check_reference(&output, summary_p)?;
    }

    Ok(summary)
}

pub fn run_from_args(args: &Args) -> TallyResult<VoteSummary> {
    let job = build_job(args)?;
    run_tally_job(&job)
}

/// The console report, one figure per line.
pub fn format_report(summary: &VoteSummary, destination: &str) -> String {
    let mut s = String::new();
    s.push_str(&format!(
        "Processed {} raw responses.\n",
        summary.total_raw_responses
    ));
    s.push_str(&format!(
        "Removed {} duplicate votes.\n",
        summary.duplicates_removed
    ));
    s.push_str(&format!(
        "Total unique votes: {}\n",
        summary.total_unique_votes
    ));
    s.push_str(&format!(
        "YES: {} ({:.1}%)\n",
        summary.yes_count, summary.yes_percentage
    ));
    s.push_str(&format!(
        "NO: {} ({:.1}%)\n",
        summary.no_count, summary.no_percentage
    ));
    s.push_str(&format!("Result: {}\n", summary.result));
    s.push_str(&format!("Output saved to: {}\n", destination));
    s
}

fn check_reference(output: &SummaryOutput, summary_p: &str) -> TallyResult<()> {
    let summary_ref = read_summary(summary_p)?;
    info!("summary: {:?}", summary_ref);
    // Both sides go through JSValue so that the keys are ordered the same way.
    let computed = serde_json::to_value(output).context(ParsingJsonSnafu {})?;
    let pretty_js_stats = serde_json::to_string_pretty(&computed).context(ParsingJsonSnafu {})?;
    let pretty_js_summary_ref =
        serde_json::to_string_pretty(&summary_ref).context(ParsingJsonSnafu {})?;
    if pretty_js_summary_ref != pretty_js_stats {
        warn!("Found differences with the reference string");
        print_diff(
            pretty_js_summary_ref.as_str(),
            pretty_js_stats.as_ref(),
            "\n",
        );
        return ReferenceMismatchSnafu {}.fail();
    }
    Ok(())
}

#[cfg(test)]
fn test_wrapper(test_name: &str, input_name: &str) -> (TallyResult<VoteSummary>, Option<String>) {
    let _ = env_logger::builder().is_test(true).try_init();
    let test_dir = format!("{}/tests/{}", env!("CARGO_MANIFEST_DIR"), test_name);
    info!("Running test {}", test_name);
    let out_dir = tempfile::tempdir().unwrap();
    let out = out_dir.path().join("vote_data.json");
    let args = Args {
        config: Some(format!("{}/{}_config.json", test_dir, test_name)),
        reference: Some(format!("{}/{}_expected_summary.json", test_dir, test_name)),
        out: Some(out.display().to_string()),
        input: if input_name.is_empty() {
            None
        } else {
            Some(format!("{}/{}", test_dir, input_name))
        },
        ..Default::default()
    };
    let res = run_from_args(&args);
    if let Err(e) = &res {
        eprintln!("An error occured {}", e);
    }
    (res, fs::read_to_string(&out).ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn csv_form() {
        let (res, written) = test_wrapper("csv_form", "");
        let summary = res.unwrap();
        assert_eq!(summary.total_raw_responses, 9);
        assert_eq!(summary.total_unique_votes, 5);
        assert_eq!(summary.result, Outcome::Yes);
        let written: JSValue = serde_json::from_str(&written.unwrap()).unwrap();
        assert_eq!(written["duplicates_removed"], 4);
        assert_eq!(written["yes_percentage"], 60.0);
    }

    #[test]
    fn xlsx_form() {
        let (res, written) = test_wrapper("xlsx_form", "");
        let summary = res.unwrap();
        assert_eq!(summary.total_raw_responses, 4);
        assert_eq!(summary.yes_count, 1);
        assert_eq!(summary.no_count, 1);
        assert_eq!(summary.result, Outcome::No);
        assert!(written.unwrap().contains("\"result\": \"NO\""));
    }

    #[test]
    fn header_mismatch_writes_nothing() {
        let (res, written) = test_wrapper("header_mismatch", "");
        assert!(matches!(res, Err(TallyError::HeaderMismatch { column: 9, .. })));
        assert_eq!(written, None);
    }

    #[test]
    fn missing_input_writes_nothing() {
        let (res, written) = test_wrapper("csv_form", "does_not_exist.csv");
        assert!(matches!(res, Err(TallyError::CsvOpen { .. })));
        assert_eq!(written, None);
    }

    #[test]
    fn reference_mismatch() {
        // The header_mismatch responses, tallied without the header check.
        let (res, written) = test_wrapper("reference_mismatch", "");
        assert!(matches!(res, Err(TallyError::ReferenceMismatch {})));
        // The summary itself is still written.
        assert!(written.is_some());
    }

    #[test]
    fn job_from_command_line() {
        let args = Args {
            input: Some("responses.CSV".to_string()),
            vote_column: Some("C".to_string()),
            ..Default::default()
        };
        let job = build_job(&args).unwrap();
        assert_eq!(job.provider, Provider::Csv);
        assert_eq!(job.output, DEFAULT_OUTPUT);
        assert_eq!(job.input_path, PathBuf::from("responses.CSV"));
        let layout = job.config.source.layout().unwrap();
        assert_eq!(layout.vote, 2);
        assert_eq!(layout.first_name, DEFAULT_FIRST_NAME_COLUMN);
    }

    #[test]
    fn job_from_config_file() {
        let config = format!(
            "{}/tests/csv_form/csv_form_config.json",
            env!("CARGO_MANIFEST_DIR")
        );
        let args = Args {
            config: Some(config),
            input_type: Some("xlsx".to_string()),
            ..Default::default()
        };
        let job = build_job(&args).unwrap();
        assert_eq!(job.provider, Provider::Xlsx);
        assert!(job.input_path.ends_with("tests/csv_form/csv_form.csv"));
        assert!(job.output.ends_with("tests/csv_form/vote_data.json"));
    }

    #[test]
    fn job_without_input() {
        assert!(matches!(
            build_job(&Args::default()),
            Err(TallyError::MissingInput {})
        ));
    }

    #[test]
    fn job_with_empty_output() {
        let args = Args {
            input: Some("responses.csv".to_string()),
            out: Some("".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            build_job(&args),
            Err(TallyError::Whatever { .. })
        ));
    }

    #[test]
    fn report_lines() {
        let summary = VoteSummary {
            yes_count: 1,
            no_count: 1,
            total_unique_votes: 2,
            total_raw_responses: 3,
            duplicates_removed: 1,
            yes_percentage: 50.0,
            no_percentage: 50.0,
            result: Outcome::No,
        };
        let report = format_report(&summary, "vote_data.json");
        let lines: Vec<&str> = report.lines().collect();
        assert_eq!(
            lines,
            vec![
                "Processed 3 raw responses.",
                "Removed 1 duplicate votes.",
                "Total unique votes: 2",
                "YES: 1 (50.0%)",
                "NO: 1 (50.0%)",
                "Result: NO",
                "Output saved to: vote_data.json",
            ]
        );
    }
}
