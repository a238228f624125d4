use std::collections::HashSet;

use log::debug;

pub use crate::config::*;

/// A builder for assembling a dataset row by row.
///
/// The builder rejects a candidate that appears twice in the same constituency.
///
/// ```
/// pub use election_results::builder::DatasetBuilder;
/// # use election_results::AggregationError;
///
/// let mut builder = DatasetBuilder::new();
/// builder.add_result("Kuppam", "Anna", "Telugu Desam", 1200)?;
/// builder.add_result("Kuppam", "Bob", "Janasena Party", 800)?;
///
/// let rows = builder.build();
/// assert_eq!(rows.len(), 2);
///
/// # Ok::<(), AggregationError>(())
/// ```
#[derive(Debug, Default)]
pub struct DatasetBuilder {
    pub(crate) _rows: Vec<ResultRow>,
    pub(crate) _seen: HashSet<(String, String)>,
}

impl DatasetBuilder {
    pub fn new() -> DatasetBuilder {
        DatasetBuilder {
            _rows: Vec::new(),
            _seen: HashSet::new(),
        }
    }

    /// Adds the result of one candidate.
    ///
    /// It is the simplest use case for most cases.
    pub fn add_result(
        &mut self,
        constituency: &str,
        candidate: &str,
        party: &str,
        total_votes: u64,
    ) -> Result<(), AggregationError> {
        self.add_row(ResultRow::new(constituency, candidate, party, total_votes))
    }

    pub fn add_row(&mut self, row: ResultRow) -> Result<(), AggregationError> {
        let key = (row.constituency.clone(), row.candidate.clone());
        if !self._seen.insert(key) {
            debug!("add_row: duplicate row {:?}", row);
            return Err(AggregationError::DuplicateCandidate {
                constituency: row.constituency,
                candidate: row.candidate,
            });
        }
        self._rows.push(row);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self._rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self._rows.is_empty()
    }

    /// Returns the rows, in insertion order.
    pub fn build(self) -> Vec<ResultRow> {
        self._rows
    }
}
