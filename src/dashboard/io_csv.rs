// Primitives for reading CSV files.

use crate::dashboard::{
    io_common::{parse_vote_count, require_text, simplify_file_name, ColumnIndices},
    *,
};

pub fn read_csv_results(path: &str, columns: &Columns) -> DashboardResult<Vec<ParsedRow>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .context(CsvOpenSnafu { path })?;
    let header: Vec<String> = rdr
        .headers()
        .context(CsvLineParseSnafu { lineno: 1usize })?
        .iter()
        .map(|s| s.to_string())
        .collect();
    debug!("read_csv_results: header: {:?}", header);
    let idx = ColumnIndices::locate(&header, columns, path)?;

    let mut res: Vec<ParsedRow> = Vec::new();
    for (i, line_r) in rdr.records().enumerate() {
        // Blank lines are skipped by the reader, the position gives the real line.
        let fallback = i + 2;
        let line = match line_r {
            Ok(line) => line,
            Err(e) => {
                let lineno = e.position().map(|p| p.line() as usize).unwrap_or(fallback);
                return Err(e).context(CsvLineParseSnafu { lineno });
            }
        };
        let lineno = line
            .position()
            .map(|p| p.line() as usize)
            .unwrap_or(fallback);
        let cell = |pos: usize| line.get(pos).context(LineTooShortSnafu { lineno });

        let pr = ParsedRow {
            lineno,
            constituency: require_text(cell(idx.constituency)?, &columns.constituency, lineno)?,
            candidate: require_text(cell(idx.candidate)?, &columns.candidate, lineno)?,
            party: require_text(cell(idx.party)?, &columns.party, lineno)?,
            total_votes: parse_vote_count(cell(idx.votes)?, lineno)?,
        };
        debug!("read_csv_results: {:?}", pr);
        res.push(pr);
    }
    info!(
        "read_csv_results: {}: {} rows",
        simplify_file_name(path),
        res.len()
    );
    Ok(res)
}
