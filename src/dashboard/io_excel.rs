// Primitives for reading Excel (xlsx) files.

use calamine::{open_workbook, DataType, Range, Reader, Xlsx};

use crate::dashboard::{
    io_common::{parse_vote_count, require_text, simplify_file_name, ColumnIndices},
    *,
};

pub fn read_excel_results(
    path: &str,
    worksheet: Option<&str>,
    columns: &Columns,
) -> DashboardResult<Vec<ParsedRow>> {
    let wrange = get_range(path, worksheet)?;

    let mut iter = wrange.rows();
    let header: Vec<String> = iter
        .next()
        .context(EmptyExcelSnafu {})?
        .iter()
        .map(read_cell_text)
        .collect();
    debug!("read_excel_results: header: {:?}", header);
    let idx = ColumnIndices::locate(&header, columns, path)?;

    // Leading empty rows are not part of the range.
    let header_row = wrange.start().map(|(r, _)| r as usize).unwrap_or(0);

    let mut res: Vec<ParsedRow> = Vec::new();
    for (i, row) in iter.enumerate() {
        let lineno = header_row + i + 2;
        if row.iter().all(|c| matches!(c, DataType::Empty)) {
            continue;
        }
        let cell = |pos: usize| row.get(pos).context(LineTooShortSnafu { lineno });

        let pr = ParsedRow {
            lineno,
            constituency: require_text(
                &read_cell_text(cell(idx.constituency)?),
                &columns.constituency,
                lineno,
            )?,
            candidate: require_text(
                &read_cell_text(cell(idx.candidate)?),
                &columns.candidate,
                lineno,
            )?,
            party: require_text(&read_cell_text(cell(idx.party)?), &columns.party, lineno)?,
            total_votes: read_cell_votes(cell(idx.votes)?, lineno)?,
        };
        debug!("read_excel_results: {:?}", pr);
        res.push(pr);
    }
    info!(
        "read_excel_results: {}: {} rows",
        simplify_file_name(path),
        res.len()
    );
    Ok(res)
}

fn get_range(path: &str, worksheet: Option<&str>) -> DashboardResult<Range<DataType>> {
    let mut workbook: Xlsx<_> = open_workbook(path).context(OpeningExcelSnafu { path })?;
    let wrange = match worksheet {
        Some(name) => workbook
            .worksheet_range(name)
            .context(MissingWorksheetSnafu { name, path })?,
        None => workbook.worksheet_range_at(0).context(EmptyExcelSnafu {})?,
    };
    wrange.context(OpeningExcelSnafu { path })
}

fn read_cell_text(cell: &DataType) -> String {
    match cell {
        DataType::String(s) => s.clone(),
        DataType::Int(i) => i.to_string(),
        DataType::Float(f) if f.fract() == 0.0 => format!("{}", *f as i64),
        DataType::Float(f) => f.to_string(),
        DataType::Bool(b) => b.to_string(),
        _ => "".to_string(),
    }
}

fn read_cell_votes(cell: &DataType, lineno: usize) -> DashboardResult<u64> {
    match cell {
        DataType::Int(i) if *i >= 0 => Ok(*i as u64),
        // The cast would saturate above u64::MAX.
        DataType::Float(f) if *f >= 0.0 && *f < u64::MAX as f64 && f.fract() == 0.0 => {
            Ok(*f as u64)
        }
        DataType::String(s) => parse_vote_count(s, lineno),
        _ => VoteCountParseSnafu {
            lineno,
            content: format!("{:?}", cell),
        }
        .fail(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::tests::excel_fixture_path;

    #[test]
    fn read_fixture() {
        let rows = read_excel_results(&excel_fixture_path(), None, &Columns::default()).unwrap();
        // The blank sheet row 5 is skipped.
        assert_eq!(rows.len(), 4);
        assert_eq!(
            rows[0],
            ParsedRow {
                lineno: 2,
                constituency: "Kuppam".to_string(),
                candidate: "N Chandrababu Naidu".to_string(),
                party: "Telugu Desam".to_string(),
                total_votes: 121929,
            }
        );
        assert_eq!(rows[3].lineno, 6);
        assert_eq!(rows[3].candidate, "Vanga Geetha");
        assert_eq!(rows[3].total_votes, 64115);
    }

    #[test]
    fn worksheet_by_name() {
        let rows = read_excel_results(
            &excel_fixture_path(),
            Some("Dharmavaram"),
            &Columns::default(),
        )
        .unwrap();
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| r.constituency == "Dharmavaram"));
        // The header is on sheet row 3.
        let lines: Vec<usize> = rows.iter().map(|r| r.lineno).collect();
        assert_eq!(lines, vec![4, 5]);
        assert_eq!(rows[0].party, "Bharatiya Janata Party");
        assert_eq!(rows[1].total_votes, 102810);
    }

    #[test]
    fn missing_worksheet() {
        let err = read_excel_results(&excel_fixture_path(), Some("Kadapa"), &Columns::default())
            .unwrap_err();
        assert!(matches!(err, DashboardError::MissingWorksheet { name, .. } if name == "Kadapa"));
    }

    #[test]
    fn empty_worksheet() {
        let err = read_excel_results(&excel_fixture_path(), Some("Empty"), &Columns::default())
            .unwrap_err();
        assert!(matches!(err, DashboardError::EmptyExcel {}));
    }

    #[test]
    fn excel_missing_column() {
        let columns = Columns {
            votes: "Votes".to_string(),
            ..Columns::default()
        };
        let err = read_excel_results(&excel_fixture_path(), None, &columns).unwrap_err();
        assert!(matches!(err, DashboardError::MissingColumn { column, .. } if column == "Votes"));
    }

    #[test]
    fn cell_text() {
        assert_eq!(read_cell_text(&DataType::String("Kuppam".to_string())), "Kuppam");
        assert_eq!(read_cell_text(&DataType::Float(12.0)), "12");
        assert_eq!(read_cell_text(&DataType::Int(7)), "7");
        assert_eq!(read_cell_text(&DataType::Empty), "");
    }

    #[test]
    fn cell_votes() {
        assert_eq!(read_cell_votes(&DataType::Float(121929.0), 2).unwrap(), 121929);
        assert_eq!(read_cell_votes(&DataType::Int(5), 2).unwrap(), 5);
        assert_eq!(
            read_cell_votes(&DataType::String("640".to_string()), 2).unwrap(),
            640
        );
        assert!(read_cell_votes(&DataType::Float(1.5), 3).is_err());
        assert!(read_cell_votes(&DataType::Int(-1), 3).is_err());
        assert!(read_cell_votes(&DataType::Float(1e20), 3).is_err());
        assert!(matches!(
            read_cell_votes(&DataType::Empty, 9),
            Err(DashboardError::VoteCountParse { lineno: 9, .. })
        ));
    }

    #[test]
    fn missing_file() {
        let err = read_excel_results("/nonexistent/AP_2024.xlsx", None, &Columns::default())
            .unwrap_err();
        assert!(matches!(err, DashboardError::OpeningExcel { .. }));
    }
}
