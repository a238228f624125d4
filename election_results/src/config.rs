// ********* Input data structures ***********

use std::error::Error;
use std::fmt::Display;

/// One candidate's vote total within one constituency.
///
/// Rows are created once when the dataset is loaded and never modified afterwards.
/// All the derived views are new values.
#[derive(Eq, PartialEq, Debug, Clone, Hash)]
pub struct ResultRow {
    pub constituency: String,
    /// Unique within a constituency.
    pub candidate: String,
    pub party: String,
    pub total_votes: u64,
}

impl ResultRow {
    pub fn new(constituency: &str, candidate: &str, party: &str, total_votes: u64) -> ResultRow {
        ResultRow {
            constituency: constituency.to_string(),
            candidate: candidate.to_string(),
            party: party.to_string(),
            total_votes,
        }
    }
}

/// A party that can be selected, with the colour used to display it.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Party {
    pub name: String,
    pub color: String,
}

impl Party {
    pub fn new(name: &str, color: &str) -> Party {
        Party {
            name: name.to_string(),
            color: color.to_string(),
        }
    }
}

/// The parties contesting the 2024 Andhra Pradesh assembly election, with their usual colours.
///
/// The order matters: the first party is the default selection.
pub const DEFAULT_PARTIES: [(&str, &str); 4] = [
    ("Janasena Party", "#FF0000"),
    ("Telugu Desam", "#FFD700"),
    ("Yuvajana Sramika Rythu Congress Party", "#0000FF"),
    ("Bharatiya Janata Party", "#FFA500"),
];

pub fn default_parties() -> Vec<Party> {
    DEFAULT_PARTIES
        .iter()
        .map(|(name, color)| Party::new(name, color))
        .collect()
}

// ******** Output data structures *********

/// Statistics over the `total_votes` column of a non-empty subset.
#[derive(PartialEq, Debug, Clone, Copy)]
pub struct Summary {
    pub count: usize,
    pub sum: u64,
    pub mean: f64,
    pub max: u64,
}

/// Five-number summary of the vote counts, as drawn by a box plot.
#[derive(PartialEq, Debug, Clone, Copy)]
pub struct Distribution {
    pub min: u64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: u64,
}

/// The rollup of all the rows of one party.
#[derive(PartialEq, Debug, Clone)]
pub struct PartyAggregate {
    pub party: String,
    pub total_votes_sum: u64,
    pub average_votes: f64,
    /// Number of rows in the group. Each row is one contested seat.
    pub constituency_count: usize,
    /// Share of the grand total, in percent, rounded half-to-even to 2 decimals.
    pub vote_share_percent: f64,
}

/// Errors that prevent a statistic from being computed.
///
/// None of them is fatal: the caller is expected to skip the affected metric.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum AggregationError {
    /// A statistic that needs at least one row was requested over zero rows.
    EmptyAggregationInput,
    /// A share was requested while the total is zero.
    DivisionUndefined,
    /// The filter value is not part of the known domain.
    UnknownFilterValue { value: String },
    /// The sum of the vote counts does not fit in 64 bits.
    VoteOverflow,
    /// The same candidate appears twice in one constituency.
    DuplicateCandidate {
        constituency: String,
        candidate: String,
    },
}

impl Error for AggregationError {}

impl Display for AggregationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AggregationError::EmptyAggregationInput => {
                write!(f, "statistic requested over an empty set of rows")
            }
            AggregationError::DivisionUndefined => {
                write!(f, "vote share requested while the total number of votes is zero")
            }
            AggregationError::UnknownFilterValue { value } => {
                write!(f, "unknown filter value {:?}", value)
            }
            AggregationError::VoteOverflow => {
                write!(f, "the total number of votes overflows a 64-bit count")
            }
            AggregationError::DuplicateCandidate {
                constituency,
                candidate,
            } => write!(
                f,
                "candidate {:?} appears more than once in constituency {:?}",
                candidate, constituency
            ),
        }
    }
}
