// ********* Input data structures ***********

use std::error::Error;
use std::fmt::Display;

/// Zero-based position of the first name in a response row.
pub const DEFAULT_FIRST_NAME_COLUMN: usize = 6;
/// Zero-based position of the last name in a response row.
pub const DEFAULT_LAST_NAME_COLUMN: usize = 7;
/// Zero-based position of the yes/no answer in a response row.
pub const DEFAULT_VOTE_COLUMN: usize = 9;

/// Where the three significant fields live in a response row.
///
/// Positions are fixed configuration. They are never inferred from the header.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub struct ColumnLayout {
    pub first_name: usize,
    pub last_name: usize,
    pub vote: usize,
}

impl ColumnLayout {
    pub const DEFAULT_LAYOUT: ColumnLayout = ColumnLayout {
        first_name: DEFAULT_FIRST_NAME_COLUMN,
        last_name: DEFAULT_LAST_NAME_COLUMN,
        vote: DEFAULT_VOTE_COLUMN,
    };
}

impl Default for ColumnLayout {
    fn default() -> Self {
        ColumnLayout::DEFAULT_LAYOUT
    }
}

/// Trims and lower-cases a cell value.
pub fn normalize(s: &str) -> String {
    s.trim().to_lowercase()
}

/// The identity of a voter: the normalized first and last names.
#[derive(Eq, PartialEq, Debug, Clone, Hash, Ord, PartialOrd)]
pub struct VoterIdentity {
    pub first_name: String,
    pub last_name: String,
}

/// One response row, after normalization.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct VoteRecord {
    pub first_name: String,
    pub last_name: String,
    pub vote_value: String,
}

impl VoteRecord {
    pub fn new(first_name: &str, last_name: &str, vote_value: &str) -> VoteRecord {
        VoteRecord {
            first_name: normalize(first_name),
            last_name: normalize(last_name),
            vote_value: normalize(vote_value),
        }
    }

    /// Reads the record out of a row of cells.
    ///
    /// A row that is too short for the layout reads as empty values for the
    /// missing columns.
    pub fn from_cells<S: AsRef<str>>(cells: &[S], layout: &ColumnLayout) -> VoteRecord {
        let cell = |idx: usize| cells.get(idx).map(|s| s.as_ref()).unwrap_or("");
        VoteRecord::new(
            cell(layout.first_name),
            cell(layout.last_name),
            cell(layout.vote),
        )
    }

    /// The identity of the voter, if both names are present.
    pub fn identity(&self) -> Option<VoterIdentity> {
        if self.first_name.is_empty() || self.last_name.is_empty() {
            None
        } else {
            Some(VoterIdentity {
                first_name: self.first_name.clone(),
                last_name: self.last_name.clone(),
            })
        }
    }
}

// ******** Output data structures *********

/// The outcome of the vote. A tie is not a win.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub enum Outcome {
    Yes,
    No,
}

impl Outcome {
    pub fn label(&self) -> &'static str {
        match self {
            Outcome::Yes => "YES",
            Outcome::No => "NO",
        }
    }
}

impl Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[derive(PartialEq, Debug, Clone)]
pub struct VoteSummary {
    pub yes_count: u64,
    pub no_count: u64,
    pub total_unique_votes: u64,
    /// All the rows read after the header, including the ones without a usable name.
    pub total_raw_responses: u64,
    /// Duplicated submissions and nameless rows.
    pub duplicates_removed: u64,
    pub yes_percentage: f64,
    pub no_percentage: f64,
    pub result: Outcome,
}

/// Errors raised by the builder API.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum TallyErrors {
    /// A vote was added after the tally was computed.
    AlreadyTallied,
}

impl Error for TallyErrors {}

impl Display for TallyErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TallyErrors::AlreadyTallied => write!(f, "TallyError: the votes were already tallied"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_are_normalized() {
        let a = VoteRecord::new("Jane", "Doe", "Yes");
        let b = VoteRecord::new(" JANE", "doe ", " yes ");
        assert_eq!(a, b);
        assert_eq!(a.identity(), b.identity());
        assert_eq!(a.vote_value, "yes");
    }

    #[test]
    fn missing_name_has_no_identity() {
        assert_eq!(VoteRecord::new("Jane", "  ", "yes").identity(), None);
        assert_eq!(VoteRecord::new("", "Doe", "yes").identity(), None);
    }

    #[test]
    fn short_row_reads_as_empty() {
        let layout = ColumnLayout {
            first_name: 0,
            last_name: 1,
            vote: 5,
        };
        let rec = VoteRecord::from_cells(&["Jane", "Doe"], &layout);
        assert_eq!(rec, VoteRecord::new("jane", "doe", ""));

        let empty: [&str; 0] = [];
        let rec = VoteRecord::from_cells(&empty, &ColumnLayout::default());
        assert_eq!(rec.identity(), None);
    }

    #[test]
    fn outcome_labels() {
        assert_eq!(Outcome::Yes.to_string(), "YES");
        assert_eq!(Outcome::No.label(), "NO");
    }
}
