// Assembles the views into the JSON summary.

use crate::dashboard::{io_common::export_file_name, *};

/// Formats a number with a comma every three digits: `1234567` -> `1,234,567`.
pub fn format_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut res = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, c) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            res.push(',');
        }
        res.push(c);
    }
    res
}

fn metric(label: &str, value: JSValue, display: String) -> JSValue {
    json!({"label": label, "value": value, "display": display})
}

// Metrics that cannot be computed are left out. The reason is logged and kept with the view.
fn record_error(errors: &mut Vec<JSValue>, view: &str, what: &str, e: &AggregationError) {
    warn!("{}: cannot compute {}: {}", view, what, e);
    errors.push(json!({"metric": what, "error": e.to_string()}));
}

fn color_of(parties: &[Party], name: &str) -> JSValue {
    match parties.iter().find(|p| p.name == name) {
        Some(p) => json!(p.color),
        None => JSValue::Null,
    }
}

fn row_to_json(r: &ResultRow) -> JSValue {
    json!({
        "constituency": r.constituency,
        "candidate": r.candidate,
        "party": r.party,
        "totalVotes": r.total_votes,
    })
}

fn party_aggregate_to_json(parties: &[Party], a: &PartyAggregate) -> JSValue {
    json!({
        "party": a.party,
        "color": color_of(parties, &a.party),
        "totalVotes": a.total_votes_sum,
        "averageVotes": a.average_votes,
        "constituencies": a.constituency_count,
        "voteSharePercent": a.vote_share_percent,
    })
}

fn rejected_view(key: &str, value: &str, view: &str, e: &AggregationError) -> JSValue {
    warn!("{}: not rendered: {}", view, e);
    json!({
        key: value,
        "errors": [{"metric": "selection", "error": e.to_string()}],
    })
}

pub fn party_view_to_json(parties: &[Party], rows: &[ResultRow], party: &str) -> JSValue {
    let known: Vec<&str> = parties.iter().map(|p| p.name.as_str()).collect();
    if let Err(e) = check_filter_value(&known, party) {
        return rejected_view("party", party, "party view", &e);
    }

    let pv = party_view(rows, party);
    let mut errors: Vec<JSValue> = Vec::new();
    let mut metrics: Vec<JSValue> = vec![metric(
        "Total Constituencies",
        json!(pv.constituency_count),
        format_thousands(pv.constituency_count as u64),
    )];
    match &pv.summary {
        Ok(s) => {
            metrics.push(metric("Total Votes", json!(s.sum), format_thousands(s.sum)));
            // Displayed truncated to an integer.
            metrics.push(metric(
                "Average Votes",
                json!(s.mean),
                format_thousands(s.mean as u64),
            ));
            metrics.push(metric("Highest Votes", json!(s.max), format_thousands(s.max)));
        }
        Err(e) => record_error(&mut errors, "party view", "summary", e),
    }

    let distribution = match &pv.distribution {
        Ok(d) => json!({
            "min": d.min,
            "q1": d.q1,
            "median": d.median,
            "q3": d.q3,
            "max": d.max,
        }),
        Err(e) => {
            record_error(&mut errors, "party view", "distribution", e);
            JSValue::Null
        }
    };

    let results: Vec<JSValue> = sort_rows_by_votes(&pv.rows).iter().map(row_to_json).collect();
    json!({
        "party": pv.party,
        "color": color_of(parties, party),
        "metrics": metrics,
        "results": results,
        "distribution": distribution,
        "errors": errors,
    })
}

pub fn constituency_view_to_json(
    parties: &[Party],
    rows: &[ResultRow],
    constituency: &str,
) -> JSValue {
    let domain = constituencies(rows);
    if let Err(e) = check_filter_value(&domain, constituency) {
        return rejected_view("constituency", constituency, "constituency view", &e);
    }

    let cv = constituency_view(rows, constituency);
    let mut errors: Vec<JSValue> = Vec::new();
    let mut metrics: Vec<JSValue> = vec![metric(
        "Total Candidates",
        json!(cv.rows.len()),
        format_thousands(cv.rows.len() as u64),
    )];
    match &cv.summary {
        Ok(s) => metrics.push(metric(
            "Total Votes Cast",
            json!(s.sum),
            format_thousands(s.sum),
        )),
        Err(e) => record_error(&mut errors, "constituency view", "summary", e),
    }
    let mut leading_candidate = JSValue::Null;
    match &cv.leading {
        Ok(r) => {
            metrics.push(metric("Leading Party", json!(r.party), r.party.clone()));
            leading_candidate = row_to_json(r);
        }
        Err(e) => record_error(&mut errors, "constituency view", "leading party", e),
    }

    let vote_share: Vec<JSValue> = match &cv.vote_share {
        Ok(aggs) => aggs
            .iter()
            .map(|a| party_aggregate_to_json(parties, a))
            .collect(),
        Err(e) => {
            record_error(&mut errors, "constituency view", "vote share", e);
            vec![]
        }
    };

    let results: Vec<JSValue> = sort_rows_by_votes(&cv.rows).iter().map(row_to_json).collect();
    json!({
        "constituency": cv.constituency,
        "metrics": metrics,
        "leadingCandidate": leading_candidate,
        "voteShare": vote_share,
        "results": results,
        "exportFileName": export_file_name(constituency),
        "errors": errors,
    })
}

pub fn overall_view_to_json(parties: &[Party], rows: &[ResultRow]) -> JSValue {
    let ov = overall_view(rows);
    let mut errors: Vec<JSValue> = Vec::new();
    let mut metrics: Vec<JSValue> = vec![metric(
        "Total Constituencies",
        json!(ov.constituency_count),
        format_thousands(ov.constituency_count as u64),
    )];
    match &ov.total_votes {
        Ok(total) => metrics.push(metric(
            "Total Votes Cast",
            json!(total),
            format_thousands(*total),
        )),
        Err(e) => record_error(&mut errors, "overall view", "total votes", e),
    }
    metrics.push(metric(
        "Total Candidates",
        json!(ov.candidate_count),
        format_thousands(ov.candidate_count as u64),
    ));

    let (party_totals, vote_share_summary) = match ov.party_totals {
        Ok(aggs) => {
            let totals: Vec<JSValue> = sort_by_total_votes(aggs.clone(), true)
                .iter()
                .map(|a| party_aggregate_to_json(parties, a))
                .collect();
            let summary: Vec<JSValue> = sort_by_vote_share(aggs)
                .iter()
                .map(|a| {
                    json!({
                        "party": a.party,
                        "voteSharePercent": a.vote_share_percent,
                        "constituencies": a.constituency_count,
                    })
                })
                .collect();
            (totals, summary)
        }
        Err(e) => {
            record_error(&mut errors, "overall view", "party totals", &e);
            (vec![], vec![])
        }
    };

    json!({
        "metrics": metrics,
        "partyTotals": party_totals,
        "voteShareSummary": vote_share_summary,
        "errors": errors,
    })
}

/// The complete summary for one selection.
pub fn build_summary(
    dashboard_name: &str,
    parties: &[Party],
    rows: &[ResultRow],
    party: &str,
    constituency: &str,
) -> JSValue {
    let known: Vec<JSValue> = parties
        .iter()
        .map(|p| json!({"name": p.name, "color": p.color}))
        .collect();
    json!({
        "dashboard": dashboard_name,
        "parties": known,
        "constituencies": constituencies(rows),
        "selection": {"party": party, "constituency": constituency},
        "partyView": party_view_to_json(parties, rows, party),
        "constituencyView": constituency_view_to_json(parties, rows, constituency),
        "overallView": overall_view_to_json(parties, rows),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows() -> Vec<ResultRow> {
        vec![
            ResultRow::new("Kuppam", "N Chandrababu Naidu", "Telugu Desam", 121929),
            ResultRow::new("Kuppam", "K R J Bharath", "Yuvajana Sramika Rythu Congress Party", 73923),
            ResultRow::new("Kuppam", "Awala Govindarajulu", "Indian National Congress", 2310),
            ResultRow::new("Pithapuram", "Pawan Kalyan", "Janasena Party", 134394),
            ResultRow::new("Pithapuram", "Vanga Geetha", "Yuvajana Sramika Rythu Congress Party", 64115),
        ]
    }

    #[test]
    fn thousands() {
        assert_eq!(format_thousands(0), "0");
        assert_eq!(format_thousands(999), "999");
        assert_eq!(format_thousands(1000), "1,000");
        assert_eq!(format_thousands(121929), "121,929");
        assert_eq!(format_thousands(1234567), "1,234,567");
    }

    #[test]
    fn party_view_metrics() {
        let js = party_view_to_json(
            &default_parties(),
            &rows(),
            "Yuvajana Sramika Rythu Congress Party",
        );
        assert_eq!(js["color"], "#0000FF");
        let metrics = js["metrics"].as_array().unwrap();
        assert_eq!(metrics.len(), 4);
        assert_eq!(metrics[0]["value"], 2);
        assert_eq!(metrics[1]["display"], "138,038");
        assert_eq!(metrics[2]["display"], "69,019");
        assert_eq!(metrics[3]["value"], 73923);
        // Most votes first.
        assert_eq!(js["results"][0]["candidate"], "K R J Bharath");
        assert_eq!(js["distribution"]["median"], 69019.0);
        assert!(js["errors"].as_array().unwrap().is_empty());
    }

    #[test]
    fn party_without_results() {
        let js = party_view_to_json(&default_parties(), &rows(), "Bharatiya Janata Party");
        // Only the count of constituencies can be shown.
        assert_eq!(js["metrics"].as_array().unwrap().len(), 1);
        assert!(js["distribution"].is_null());
        let errors = js["errors"].as_array().unwrap();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0]["metric"], "summary");
    }

    #[test]
    fn unknown_party_is_not_rendered() {
        let js = party_view_to_json(&default_parties(), &rows(), "Indian National Congress");
        assert!(js.get("metrics").is_none());
        assert_eq!(js["errors"][0]["metric"], "selection");
    }

    #[test]
    fn constituency_view_metrics() {
        let js = constituency_view_to_json(&default_parties(), &rows(), "Kuppam");
        let metrics = js["metrics"].as_array().unwrap();
        assert_eq!(metrics[0]["value"], 3);
        assert_eq!(metrics[1]["value"], 121929 + 73923 + 2310);
        assert_eq!(metrics[2]["value"], "Telugu Desam");
        assert_eq!(js["leadingCandidate"]["candidate"], "N Chandrababu Naidu");
        assert_eq!(js["exportFileName"], "Kuppam_results.csv");
        let shares = js["voteShare"].as_array().unwrap();
        assert_eq!(shares.len(), 3);
        // Parties outside of the colour scheme have no colour.
        assert!(shares[2]["color"].is_null());
    }

    #[test]
    fn unknown_constituency_is_not_rendered() {
        let js = constituency_view_to_json(&default_parties(), &rows(), "Atlantis");
        assert_eq!(js["constituency"], "Atlantis");
        assert!(js.get("results").is_none());
    }

    #[test]
    fn overall_view_orders() {
        let js = overall_view_to_json(&default_parties(), &rows());
        let totals = js["partyTotals"].as_array().unwrap();
        assert_eq!(totals[0]["party"], "Indian National Congress");
        assert_eq!(totals[3]["party"], "Yuvajana Sramika Rythu Congress Party");
        let summary = js["voteShareSummary"].as_array().unwrap();
        assert_eq!(summary[0]["party"], "Yuvajana Sramika Rythu Congress Party");
        let shares: f64 = summary
            .iter()
            .map(|s| s["voteSharePercent"].as_f64().unwrap())
            .sum();
        assert!((shares - 100.0).abs() < 0.05);
        assert_eq!(js["metrics"][2]["value"], 5);
    }

    #[test]
    fn overall_view_of_no_votes() {
        let zero = vec![ResultRow::new("Kuppam", "A", "Telugu Desam", 0)];
        let js = overall_view_to_json(&default_parties(), &zero);
        assert_eq!(js["metrics"][1]["value"], 0);
        assert!(js["partyTotals"].as_array().unwrap().is_empty());
        assert_eq!(js["errors"][0]["metric"], "party totals");
    }

    #[test]
    fn overall_view_of_too_many_votes() {
        let huge = vec![
            ResultRow::new("Kuppam", "A", "Telugu Desam", u64::MAX),
            ResultRow::new("Kuppam", "B", "Janasena Party", 1),
        ];
        let js = overall_view_to_json(&default_parties(), &huge);
        let metrics = js["metrics"].as_array().unwrap();
        assert_eq!(metrics.len(), 2);
        assert_eq!(metrics[1]["label"], "Total Candidates");
        let errors = js["errors"].as_array().unwrap();
        assert_eq!(errors[0]["metric"], "total votes");
        assert_eq!(errors[1]["metric"], "party totals");

        let cv = constituency_view_to_json(&default_parties(), &huge, "Kuppam");
        assert_eq!(cv["leadingCandidate"]["candidate"], "A");
        assert_eq!(cv["errors"][0]["metric"], "summary");
    }
}
