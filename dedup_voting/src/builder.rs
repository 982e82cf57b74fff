pub use crate::config::*;
use crate::VoteLedger;

/// A builder for adding responses one at a time.
///
/// Useful when the responses do not come from a table, or when they are
/// streamed and should not be collected first.
///
/// ```
/// pub use dedup_voting::builder::Builder;
/// # use dedup_voting::TallyErrors;
///
/// let mut builder = Builder::new();
///
/// builder.add_response("Ada", "Lovelace", "yes")?;
/// builder.add_response("Alan", "Turing", "no")?;
/// builder.add_response("Alan", "Turing", "Yes")?;
///
/// let summary = builder.tally()?;
/// assert_eq!(summary.yes_count, 2);
/// assert_eq!(summary.duplicates_removed, 1);
/// # Ok::<(), TallyErrors>(())
/// ```
#[derive(Debug)]
pub struct Builder {
    _ledger: Option<VoteLedger>,
}

impl Default for Builder {
    fn default() -> Self {
        Builder::new()
    }
}

impl Builder {
    pub fn new() -> Builder {
        Builder {
            _ledger: Some(VoteLedger::new()),
        }
    }

    /// Adds a response with raw (not normalized) values.
    ///
    /// Responses must be added in submission order.
    pub fn add_response(
        &mut self,
        first_name: &str,
        last_name: &str,
        vote: &str,
    ) -> Result<(), TallyErrors> {
        self.add_record(VoteRecord::new(first_name, last_name, vote))
    }

    pub fn add_record(&mut self, record: VoteRecord) -> Result<(), TallyErrors> {
        let ledger = self._ledger.as_mut().ok_or(TallyErrors::AlreadyTallied)?;
        ledger.record(record);
        Ok(())
    }

    /// Computes the summary. The builder cannot be used afterwards.
    pub fn tally(&mut self) -> Result<VoteSummary, TallyErrors> {
        let ledger = self._ledger.take().ok_or(TallyErrors::AlreadyTallied)?;
        Ok(ledger.summarize())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cannot_add_after_tally() {
        let mut builder = Builder::new();
        builder.add_response("Jane", "Doe", "yes").unwrap();
        let summary = builder.tally().unwrap();
        assert_eq!(summary.result, Outcome::Yes);
        assert_eq!(
            builder.add_response("John", "Doe", "no"),
            Err(TallyErrors::AlreadyTallied)
        );
        assert_eq!(builder.tally(), Err(TallyErrors::AlreadyTallied));
    }

    #[test]
    fn empty_builder() {
        let summary = Builder::default().tally().unwrap();
        assert_eq!(summary.total_raw_responses, 0);
        assert_eq!(summary.result, Outcome::No);
    }
}
