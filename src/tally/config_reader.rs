use crate::tally::*;

use dedup_voting::{ColumnLayout, Outcome, VoteSummary};
use serde::{Deserialize, Serialize};
use serde_json::Value as JSValue;

#[derive(Eq, PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputSettings {
    #[serde(rename = "contestName")]
    pub contest_name: Option<String>,
    #[serde(rename = "outputPath")]
    pub output_path: Option<String>,
}

#[derive(Eq, PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileSource {
    pub provider: Option<String>,
    #[serde(rename = "filePath")]
    pub file_path: String,
    #[serde(rename = "firstNameColumnIndex")]
    pub first_name_column_index: Option<JSValue>,
    #[serde(rename = "lastNameColumnIndex")]
    pub last_name_column_index: Option<JSValue>,
    #[serde(rename = "voteColumnIndex")]
    pub vote_column_index: Option<JSValue>,
    #[serde(rename = "excelWorksheetName")]
    pub excel_worksheet_name: Option<String>,
    // Optional checks on the header row
    #[serde(rename = "firstNameHeader")]
    pub first_name_header: Option<String>,
    #[serde(rename = "lastNameHeader")]
    pub last_name_header: Option<String>,
    #[serde(rename = "voteHeader")]
    pub vote_header: Option<String>,
}

impl FileSource {
    pub fn layout(&self) -> TallyResult<ColumnLayout> {
        let default = ColumnLayout::DEFAULT_LAYOUT;
        Ok(ColumnLayout {
            first_name: read_js_int(&self.first_name_column_index, default.first_name)?,
            last_name: read_js_int(&self.last_name_column_index, default.last_name)?,
            vote: read_js_int(&self.vote_column_index, default.vote)?,
        })
    }

    /// The texts that the header must contain, by column.
    pub fn expected_headers(&self, layout: &ColumnLayout) -> Vec<(usize, String)> {
        [
            (layout.first_name, &self.first_name_header),
            (layout.last_name, &self.last_name_header),
            (layout.vote, &self.vote_header),
        ]
        .iter()
        .filter_map(|(idx, h)| h.as_ref().map(|s| (*idx, s.clone())))
        .collect()
    }
}

#[derive(Eq, PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct TallyConfig {
    #[serde(rename = "outputSettings", default)]
    pub output_settings: OutputSettings,
    pub source: FileSource,
}

/// The summary, as written to disk. The order of the fields is the order of the keys in the file.
#[derive(PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct SummaryOutput {
    pub yes_count: u64,
    pub no_count: u64,
    pub total_unique_votes: u64,
    pub total_raw_responses: u64,
    pub duplicates_removed: u64,
    pub yes_percentage: f64,
    pub no_percentage: f64,
    pub result: String,
}

impl From<&VoteSummary> for SummaryOutput {
    fn from(s: &VoteSummary) -> Self {
        SummaryOutput {
            yes_count: s.yes_count,
            no_count: s.no_count,
            total_unique_votes: s.total_unique_votes,
            total_raw_responses: s.total_raw_responses,
            duplicates_removed: s.duplicates_removed,
            yes_percentage: s.yes_percentage,
            no_percentage: s.no_percentage,
            result: match s.result {
                Outcome::Yes => "YES".to_string(),
                Outcome::No => "NO".to_string(),
            },
        }
    }
}

pub fn read_config(path: &str) -> TallyResult<TallyConfig> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    debug!("read_config: content: {:?}", contents);
    let config: TallyConfig = serde_json::from_str(&contents).context(ParsingJsonSnafu {})?;
    Ok(config)
}

pub fn read_summary(path: &str) -> TallyResult<JSValue> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    let js: JSValue = serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu {})?;
    debug!("read_summary: {:?}", js);
    Ok(js)
}

/// Reads a column position: a number starting at 0, or a column name starting at A.
pub fn parse_column_index(s: &str) -> TallyResult<usize> {
    let s = s.trim();
    if !s.is_empty() && s.chars().all(|c| c.is_ascii_alphabetic()) {
        // A -> 0, Z -> 25, AA -> 26
        let x = s
            .to_ascii_lowercase()
            .chars()
            .try_fold(0usize, |acc, c| {
                acc.checked_mul(26)?
                    .checked_add(c as usize - 'a' as usize + 1)
            })
            .context(ParsingColumnIndexSnafu { content: s })?;
        Ok(x - 1)
    } else {
        s.parse::<usize>()
            .ok()
            .context(ParsingColumnIndexSnafu { content: s })
    }
}

fn read_js_int(x: &Option<JSValue>, default: usize) -> TallyResult<usize> {
    match x {
        None | Some(JSValue::Null) => Ok(default),
        Some(JSValue::Number(n)) => n
            .as_u64()
            .map(|x| x as usize)
            .context(ParsingColumnIndexSnafu {
                content: n.to_string(),
            }),
        Some(JSValue::String(s)) => parse_column_index(s),
        Some(v) => ParsingColumnIndexSnafu {
            content: v.to_string(),
        }
        .fail(),
    }
}
