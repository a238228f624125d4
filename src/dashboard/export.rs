// Writes a subset of the results back in CSV format.

use std::io::{self, Write};
use std::path::PathBuf;

use crate::dashboard::{io_common::export_file_name, *};

/// Header of an export, whatever the column names of the input were.
pub const EXPORT_HEADER: [&str; 4] = ["Constituency", "Candidate", "Party", "Total Votes"];

pub fn write_rows<W: Write>(rows: &[ResultRow], w: W) -> Result<(), csv::Error> {
    let mut wtr = csv::Writer::from_writer(w);
    wtr.write_record(&EXPORT_HEADER)?;
    for r in rows.iter() {
        wtr.write_record(&[
            r.constituency.as_str(),
            r.candidate.as_str(),
            r.party.as_str(),
            r.total_votes.to_string().as_str(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

/// Exports the rows of a constituency.
///
/// The target is either `stdout`, a directory (the file is then named after the
/// constituency) or a file path. Returns where the rows were written.
pub fn export_constituency(
    rows: &[ResultRow],
    constituency: &str,
    target: &str,
) -> DashboardResult<String> {
    let subset = filter_by_constituency(rows, constituency);
    if subset.is_empty() {
        warn!(
            "export_constituency: no results for {:?}, exporting the header only",
            constituency
        );
    }
    if target == "stdout" {
        write_rows(&subset, io::stdout().lock())
            .context(CsvWriteSnafu { path: target })?;
        return Ok(target.to_string());
    }
    let mut p = PathBuf::from(target);
    if p.is_dir() {
        p.push(export_file_name(constituency));
    }
    let path = p.display().to_string();
    let file = fs::File::create(&p).context(WritingSnafu { path: path.clone() })?;
    write_rows(&subset, file).context(CsvWriteSnafu { path: path.clone() })?;
    info!("export_constituency: wrote {} rows to {}", subset.len(), path);
    Ok(path)
}
