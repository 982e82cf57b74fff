// Primitives for reading CSV files.

use std::path::Path;

use crate::tally::*;

/// Reads all the records of a CSV file, header included.
///
/// Rows may have different lengths.
pub fn read_csv_rows(path: &Path) -> TallyResult<Vec<Vec<String>>> {
    let p = path.display().to_string();
    let rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .context(CsvOpenSnafu { path: &p })?;

    let mut res: Vec<Vec<String>> = Vec::new();
    for (idx, line_r) in rdr.into_records().enumerate() {
        let lineno = idx + 1;
        let line = line_r.context(CsvLineParseSnafu { path: &p, lineno })?;
        debug!("read_csv_rows: lineno: {:?} row: {:?}", lineno, &line);
        res.push(line.iter().map(|s| s.to_string()).collect());
    }
    Ok(res)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn short_rows_are_kept() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        write!(f, "First,Last,Vote\nJane,Doe,Yes\nJohn\n\"Smith, Jr\",Al,no\n").unwrap();
        let rows = read_csv_rows(f.path()).unwrap();
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0], vec!["First", "Last", "Vote"]);
        assert_eq!(rows[2], vec!["John"]);
        assert_eq!(rows[3], vec!["Smith, Jr", "Al", "no"]);
    }

    #[test]
    fn missing_file() {
        let res = read_csv_rows(Path::new("/nonexistent/responses.csv"));
        assert!(matches!(res, Err(TallyError::CsvOpen { .. })));
    }

    #[test]
    fn invalid_utf8() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(b"First,Last,Vote\nJ\xffne,Doe,yes\n").unwrap();
        let res = read_csv_rows(f.path());
        assert!(matches!(
            res,
            Err(TallyError::CsvLineParse { lineno: 2, .. })
        ));
    }
}
