use std::path::Path;

use crate::dashboard::*;

pub fn simplify_file_name(path: &str) -> String {
    Path::new(path)
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or(path)
        .to_string()
}

/// The name of the file a constituency is exported to.
pub fn export_file_name(constituency: &str) -> String {
    // Path separators would otherwise escape the output directory.
    let safe: String = constituency
        .chars()
        .map(|c| if c == '/' || c == '\\' { '_' } else { c })
        .collect();
    format!("{}_results.csv", safe)
}

/// The positions of the columns of interest in the header row.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub struct ColumnIndices {
    pub constituency: usize,
    pub candidate: usize,
    pub party: usize,
    pub votes: usize,
}

impl ColumnIndices {
    pub fn locate(header: &[String], columns: &Columns, path: &str) -> DashboardResult<ColumnIndices> {
        let find = |column: &String| -> DashboardResult<usize> {
            header
                .iter()
                .position(|h| h.trim() == column.as_str())
                .context(MissingColumnSnafu {
                    column: column.clone(),
                    path,
                })
        };
        let res = ColumnIndices {
            constituency: find(&columns.constituency)?,
            candidate: find(&columns.candidate)?,
            party: find(&columns.party)?,
            votes: find(&columns.votes)?,
        };
        debug!("locate: {}: {:?}", simplify_file_name(path), res);
        Ok(res)
    }
}

pub fn parse_vote_count(s: &str, lineno: usize) -> DashboardResult<u64> {
    s.trim()
        .parse::<u64>()
        .ok()
        .context(VoteCountParseSnafu { lineno, content: s })
}

/// A non-empty text field.
pub fn require_text(s: &str, column: &str, lineno: usize) -> DashboardResult<String> {
    let t = s.trim();
    ensure!(!t.is_empty(), MissingValueSnafu { lineno, column });
    Ok(t.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn locate_columns_in_any_order() {
        let h = header(&["Sl No", "Party", "Total Votes", "Candidate", "Constituency"]);
        let idx = ColumnIndices::locate(&h, &Columns::default(), "AP_2024-2.csv").unwrap();
        assert_eq!(
            idx,
            ColumnIndices {
                constituency: 4,
                candidate: 3,
                party: 1,
                votes: 2
            }
        );
    }

    #[test]
    fn missing_column() {
        let h = header(&["Constituency", "Candidate", "Party"]);
        let err = ColumnIndices::locate(&h, &Columns::default(), "x.csv").unwrap_err();
        assert!(matches!(err, DashboardError::MissingColumn { column, .. } if column == "Total Votes"));
    }

    #[test]
    fn vote_counts() {
        assert_eq!(parse_vote_count(" 121929 ", 2).unwrap(), 121929);
        assert!(matches!(
            parse_vote_count("-5", 3),
            Err(DashboardError::VoteCountParse { lineno: 3, .. })
        ));
        assert!(parse_vote_count("1.5", 4).is_err());
        assert!(parse_vote_count("", 5).is_err());
    }

    #[test]
    fn text_fields() {
        assert_eq!(require_text(" Kuppam ", "Constituency", 2).unwrap(), "Kuppam");
        assert!(matches!(
            require_text("  ", "Party", 7),
            Err(DashboardError::MissingValue { lineno: 7, .. })
        ));
    }

    #[test]
    fn file_names() {
        assert_eq!(simplify_file_name("/data/AP_2024-2.csv"), "AP_2024-2.csv");
        assert_eq!(export_file_name("Kuppam"), "Kuppam_results.csv");
        assert_eq!(export_file_name("A/B"), "A_B_results.csv");
    }
}
