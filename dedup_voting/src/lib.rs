/*!
A tally engine for yes/no votes collected through online forms.

Form tools let the same person answer several times. This crate keeps only
the last answer of every voter, identified by first and last name, and
counts the result.

```
use dedup_voting::*;

let rows = vec![
    vec!["First", "Last", "Vote"],
    vec!["Ada", "Lovelace", "Yes"],
    vec!["ada ", "LOVELACE", "No"],
    vec!["Alan", "Turing", "yes"],
];
let layout = ColumnLayout { first_name: 0, last_name: 1, vote: 2 };
let summary = tally_rows(&rows, &layout);
assert_eq!(summary.total_raw_responses, 3);
assert_eq!(summary.total_unique_votes, 2);
assert_eq!(summary.duplicates_removed, 1);
// One yes, one no: a tie does not pass.
assert_eq!(summary.result, Outcome::No);
```
*/

mod config;
pub mod builder;
pub mod manual;

use log::{debug, info};

use std::collections::HashMap;

pub use crate::config::*;

const YES: &str = "yes";
const NO: &str = "no";

/// The last known vote of every voter.
///
/// Rows must be recorded in submission order: a later row always replaces an
/// earlier one for the same voter, whatever its content. No timestamp is
/// checked, so rows that are out of chronological order silently keep the
/// wrong vote.
#[derive(Debug, Clone, Default)]
pub struct VoteLedger {
    votes: HashMap<VoterIdentity, String>,
    raw_responses: u64,
}

impl VoteLedger {
    pub fn new() -> VoteLedger {
        VoteLedger::default()
    }

    /// Records one response. Responses without a full name are counted
    /// but do not enter the ledger.
    pub fn record(&mut self, rec: VoteRecord) {
        self.raw_responses += 1;
        let identity = match rec.identity() {
            Some(identity) => identity,
            None => {
                debug!(
                    "record: response {}: missing name, skipping {:?}",
                    self.raw_responses, rec
                );
                return;
            }
        };
        if let Some(previous) = self.votes.insert(identity, rec.vote_value.clone()) {
            debug!(
                "record: response {}: {} {} replaces {:?} with {:?}",
                self.raw_responses, rec.first_name, rec.last_name, previous, rec.vote_value
            );
        }
    }

    pub fn raw_responses(&self) -> u64 {
        self.raw_responses
    }

    pub fn unique_voters(&self) -> usize {
        self.votes.len()
    }

    pub fn vote_of(&self, identity: &VoterIdentity) -> Option<&str> {
        self.votes.get(identity).map(|s| s.as_str())
    }

    /// Counts the votes. The ledger is not needed afterwards.
    pub fn summarize(self) -> VoteSummary {
        let mut yes_count: u64 = 0;
        let mut no_count: u64 = 0;
        for vote in self.votes.values() {
            match vote.as_str() {
                YES => yes_count += 1,
                NO => no_count += 1,
                // Abstentions and free text only count toward the unique votes.
                _ => {}
            }
        }

        let total_unique_votes = self.votes.len() as u64;
        let summary = VoteSummary {
            yes_count,
            no_count,
            total_unique_votes,
            total_raw_responses: self.raw_responses,
            duplicates_removed: self.raw_responses - total_unique_votes,
            yes_percentage: percentage(yes_count, total_unique_votes),
            no_percentage: percentage(no_count, total_unique_votes),
            result: if yes_count > no_count {
                Outcome::Yes
            } else {
                Outcome::No
            },
        };
        info!("summarize: {:?}", summary);
        summary
    }
}

/// Share of `count` in `total`, in percent, rounded to one decimal place.
/// Zero when there is nothing to divide by.
fn percentage(count: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let pct = (count as f64 / total as f64) * 100.0;
    // Rounds the exact stored value, ties to even: 6.25 -> 6.2, 1.05 (stored above 1.05) -> 1.1
    format!("{:.1}", pct).parse::<f64>().unwrap_or(pct)
}

/// Tallies normalized records, in submission order.
pub fn run_tally(records: &[VoteRecord]) -> VoteSummary {
    info!("run_tally: Processing {:?} responses", records.len());
    let mut ledger = VoteLedger::new();
    for rec in records.iter() {
        ledger.record(rec.clone());
    }
    info!(
        "run_tally: {:?} unique voters out of {:?} responses",
        ledger.unique_voters(),
        ledger.raw_responses()
    );
    ledger.summarize()
}

/// Tallies raw rows as read from a spreadsheet.
///
/// The first row is the header and is always skipped. The other rows are
/// read at the positions given by `layout`.
pub fn tally_rows<R, S>(rows: &[R], layout: &ColumnLayout) -> VoteSummary
where
    R: AsRef<[S]>,
    S: AsRef<str>,
{
    let records: Vec<VoteRecord> = rows
        .iter()
        .skip(1)
        .map(|row| VoteRecord::from_cells(row.as_ref(), layout))
        .collect();
    run_tally(&records)
}
