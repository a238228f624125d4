mod config;
pub mod builder;
pub mod manual;

use log::{debug, info};

use std::{
    cmp::Ordering,
    collections::{BTreeSet, HashMap, HashSet},
};

pub use crate::config::*;

// **** Filters ****

/// Returns all the rows of the given party.
///
/// A party that does not appear in the rows yields an empty subset. Use
/// [check_filter_value] first when an unknown name must be reported.
pub fn filter_by_party(rows: &[ResultRow], party: &str) -> Vec<ResultRow> {
    let res: Vec<ResultRow> = rows.iter().filter(|r| r.party == party).cloned().collect();
    debug!(
        "filter_by_party: {:?}: kept {} of {} rows",
        party,
        res.len(),
        rows.len()
    );
    res
}

/// Returns all the rows of the given constituency. Same contract as [filter_by_party].
pub fn filter_by_constituency(rows: &[ResultRow], constituency: &str) -> Vec<ResultRow> {
    let res: Vec<ResultRow> = rows
        .iter()
        .filter(|r| r.constituency == constituency)
        .cloned()
        .collect();
    debug!(
        "filter_by_constituency: {:?}: kept {} of {} rows",
        constituency,
        res.len(),
        rows.len()
    );
    res
}

/// Checks that a filter value belongs to its domain (the known parties, the
/// constituencies present in the dataset, ...).
pub fn check_filter_value<S: AsRef<str>>(domain: &[S], value: &str) -> Result<(), AggregationError> {
    if domain.iter().any(|d| d.as_ref() == value) {
        Ok(())
    } else {
        Err(AggregationError::UnknownFilterValue {
            value: value.to_string(),
        })
    }
}

/// The sorted list of distinct constituencies.
pub fn constituencies(rows: &[ResultRow]) -> Vec<String> {
    let names: BTreeSet<&str> = rows.iter().map(|r| r.constituency.as_str()).collect();
    names.into_iter().map(|s| s.to_string()).collect()
}

pub fn count_distinct_constituencies(rows: &[ResultRow]) -> usize {
    rows.iter()
        .map(|r| r.constituency.as_str())
        .collect::<HashSet<&str>>()
        .len()
}

/// Candidates are counted by name over the whole dataset.
pub fn count_distinct_candidates(rows: &[ResultRow]) -> usize {
    rows.iter()
        .map(|r| r.candidate.as_str())
        .collect::<HashSet<&str>>()
        .len()
}

// **** Statistics ****

/// The total number of votes of the rows.
///
/// Fails with [AggregationError::VoteOverflow] instead of wrapping around.
pub fn total_votes(rows: &[ResultRow]) -> Result<u64, AggregationError> {
    rows.iter().try_fold(0u64, |acc, r| {
        acc.checked_add(r.total_votes)
            .ok_or(AggregationError::VoteOverflow)
    })
}

/// Count, sum, mean and max of the vote counts.
pub fn summarize(subset: &[ResultRow]) -> Result<Summary, AggregationError> {
    let max = subset
        .iter()
        .map(|r| r.total_votes)
        .max()
        .ok_or(AggregationError::EmptyAggregationInput)?;
    let sum = total_votes(subset)?;
    let count = subset.len();
    Ok(Summary {
        count,
        sum,
        mean: sum as f64 / count as f64,
        max,
    })
}

/// The row with the most votes. Ties go to the row that comes first.
pub fn leading_row(subset: &[ResultRow]) -> Result<&ResultRow, AggregationError> {
    let mut best: Option<&ResultRow> = None;
    for r in subset.iter() {
        match best {
            Some(b) if b.total_votes >= r.total_votes => {}
            _ => best = Some(r),
        }
    }
    best.ok_or(AggregationError::EmptyAggregationInput)
}

/// The party of [leading_row].
pub fn leading_party(subset: &[ResultRow]) -> Result<String, AggregationError> {
    leading_row(subset).map(|r| r.party.clone())
}

/// The five-number summary of the vote counts.
///
/// Quartiles are interpolated linearly between the two closest ranks.
pub fn distribution(subset: &[ResultRow]) -> Result<Distribution, AggregationError> {
    let mut values: Vec<u64> = subset.iter().map(|r| r.total_votes).collect();
    values.sort_unstable();
    let (min, max) = match (values.first(), values.last()) {
        (Some(min), Some(max)) => (*min, *max),
        _ => return Err(AggregationError::EmptyAggregationInput),
    };
    Ok(Distribution {
        min,
        q1: quantile(&values, 0.25),
        median: quantile(&values, 0.5),
        q3: quantile(&values, 0.75),
        max,
    })
}

// The values must be sorted and not empty.
fn quantile(sorted: &[u64], p: f64) -> f64 {
    let pos = p * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let lo_v = sorted[lo] as f64;
    let hi_v = sorted[hi] as f64;
    lo_v + (hi_v - lo_v) * (pos - lo as f64)
}

/// `part / total` in percent, rounded half-to-even to 2 decimals.
///
/// The rounding is done on integers (hundredths of a percent), so that exact ties are
/// detected and resolved to the even neighbour.
pub fn round_share(part: u64, total: u64) -> Result<f64, AggregationError> {
    if total == 0 {
        return Err(AggregationError::DivisionUndefined);
    }
    let numer = part as u128 * 10_000;
    let denom = total as u128;
    let mut hundredths = numer / denom;
    let rem = numer % denom;
    match (2 * rem).cmp(&denom) {
        Ordering::Greater => hundredths += 1,
        Ordering::Equal if hundredths % 2 == 1 => hundredths += 1,
        _ => {}
    }
    Ok(hundredths as f64 / 100.0)
}

/// Groups the rows by party and computes the vote share of every party.
///
/// The parties are returned in the order in which they first appear in the rows.
/// Use [sort_by_total_votes] or [sort_by_vote_share] for another order.
pub fn aggregate_by_party(rows: &[ResultRow]) -> Result<Vec<PartyAggregate>, AggregationError> {
    if rows.is_empty() {
        return Err(AggregationError::EmptyAggregationInput);
    }
    let mut order: Vec<&str> = Vec::new();
    // party -> (sum, count)
    let mut groups: HashMap<&str, (u64, usize)> = HashMap::new();
    for r in rows.iter() {
        let e = groups.entry(r.party.as_str()).or_insert_with(|| {
            order.push(r.party.as_str());
            (0, 0)
        });
        e.0 = e.0
            .checked_add(r.total_votes)
            .ok_or(AggregationError::VoteOverflow)?;
        e.1 += 1;
    }

    let grand_total = total_votes(rows)?;
    debug!(
        "aggregate_by_party: {} parties, {} votes in total",
        order.len(),
        grand_total
    );

    let mut res: Vec<PartyAggregate> = Vec::new();
    for party in order {
        let (sum, count) = groups[party];
        res.push(PartyAggregate {
            party: party.to_string(),
            total_votes_sum: sum,
            average_votes: sum as f64 / count as f64,
            constituency_count: count,
            vote_share_percent: round_share(sum, grand_total)?,
        });
    }
    Ok(res)
}

// **** Orderings ****

/// Stable sort on the total number of votes.
pub fn sort_by_total_votes(mut aggs: Vec<PartyAggregate>, ascending: bool) -> Vec<PartyAggregate> {
    if ascending {
        aggs.sort_by(|a, b| a.total_votes_sum.cmp(&b.total_votes_sum));
    } else {
        aggs.sort_by(|a, b| b.total_votes_sum.cmp(&a.total_votes_sum));
    }
    aggs
}

/// Stable sort, largest share first.
pub fn sort_by_vote_share(mut aggs: Vec<PartyAggregate>) -> Vec<PartyAggregate> {
    aggs.sort_by(|a, b| b.vote_share_percent.total_cmp(&a.vote_share_percent));
    aggs
}

/// Stable sort of the rows, most votes first.
pub fn sort_rows_by_votes(rows: &[ResultRow]) -> Vec<ResultRow> {
    let mut res = rows.to_vec();
    res.sort_by(|a, b| b.total_votes.cmp(&a.total_votes));
    res
}

// **** Views ****

/// Everything shown about one party.
///
/// Each metric is computed independently: a failing one does not prevent the others.
#[derive(PartialEq, Debug, Clone)]
pub struct PartyView {
    pub party: String,
    /// Rows of the party, in dataset order.
    pub rows: Vec<ResultRow>,
    pub constituency_count: usize,
    pub summary: Result<Summary, AggregationError>,
    pub distribution: Result<Distribution, AggregationError>,
}

#[derive(PartialEq, Debug, Clone)]
pub struct ConstituencyView {
    pub constituency: String,
    /// Rows of the constituency, in dataset order.
    pub rows: Vec<ResultRow>,
    pub summary: Result<Summary, AggregationError>,
    pub leading: Result<ResultRow, AggregationError>,
    /// Share of each party within the constituency.
    pub vote_share: Result<Vec<PartyAggregate>, AggregationError>,
}

#[derive(PartialEq, Debug, Clone)]
pub struct OverallView {
    pub constituency_count: usize,
    pub candidate_count: usize,
    pub total_votes: Result<u64, AggregationError>,
    /// In order of first appearance of the parties.
    pub party_totals: Result<Vec<PartyAggregate>, AggregationError>,
}

pub fn party_view(rows: &[ResultRow], party: &str) -> PartyView {
    let subset = filter_by_party(rows, party);
    let constituency_count = count_distinct_constituencies(&subset);
    let summary = summarize(&subset);
    let distribution = distribution(&subset);
    info!(
        "party_view: {:?}: {} rows in {} constituencies",
        party,
        subset.len(),
        constituency_count
    );
    PartyView {
        party: party.to_string(),
        rows: subset,
        constituency_count,
        summary,
        distribution,
    }
}

pub fn constituency_view(rows: &[ResultRow], constituency: &str) -> ConstituencyView {
    let subset = filter_by_constituency(rows, constituency);
    let summary = summarize(&subset);
    let leading = leading_row(&subset).cloned();
    let vote_share = aggregate_by_party(&subset);
    info!(
        "constituency_view: {:?}: {} candidates, leading: {:?}",
        constituency,
        subset.len(),
        leading.as_ref().map(|r| r.party.as_str())
    );
    ConstituencyView {
        constituency: constituency.to_string(),
        rows: subset,
        summary,
        leading,
        vote_share,
    }
}

pub fn overall_view(rows: &[ResultRow]) -> OverallView {
    let res = OverallView {
        constituency_count: count_distinct_constituencies(rows),
        candidate_count: count_distinct_candidates(rows),
        total_votes: total_votes(rows),
        party_totals: aggregate_by_party(rows),
    };
    info!(
        "overall_view: {} constituencies, {} candidates, {:?} votes",
        res.constituency_count, res.candidate_count, res.total_votes
    );
    res
}
