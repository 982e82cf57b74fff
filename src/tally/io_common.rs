use std::path::Path;

use dedup_voting::normalize;

use crate::tally::*;

/// The supported formats for the responses.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum Provider {
    Xlsx,
    Csv,
}

impl Provider {
    pub fn from_name(name: &str) -> TallyResult<Provider> {
        match name.trim().to_lowercase().as_str() {
            "xlsx" | "excel" => Ok(Provider::Xlsx),
            "csv" => Ok(Provider::Csv),
            _ => UnknownProviderSnafu { provider: name }.fail(),
        }
    }

    /// Everything that is not a .csv file is treated as a workbook.
    pub fn from_path(path: &Path) -> Provider {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("csv") => Provider::Csv,
            _ => Provider::Xlsx,
        }
    }
}

/// Checks that the header cells contain the expected texts, ignoring case.
pub fn check_header(header: Option<&Vec<String>>, expected: &[(usize, String)]) -> TallyResult<()> {
    for (column, text) in expected.iter() {
        let found = header
            .and_then(|h| h.get(*column))
            .map(|s| normalize(s))
            .unwrap_or_default();
        ensure!(
            found.contains(&normalize(text)),
            HeaderMismatchSnafu {
                column: *column,
                expected: text,
                found,
            }
        );
        debug!("check_header: column {} matches {:?}", column, text);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_names() {
        assert_eq!(Provider::from_name("CSV").unwrap(), Provider::Csv);
        assert_eq!(Provider::from_name("xlsx").unwrap(), Provider::Xlsx);
        assert!(Provider::from_name("ods").is_err());
        assert_eq!(Provider::from_path(Path::new("a/b.CSV")), Provider::Csv);
        assert_eq!(
            Provider::from_path(Path::new("Form Responses.xlsx")),
            Provider::Xlsx
        );
        assert_eq!(Provider::from_path(Path::new("responses")), Provider::Xlsx);
    }

    #[test]
    fn header_contains_expected_text() {
        let header: Vec<String> = vec![
            "First Name".into(),
            "Last Name".into(),
            "  Do you APPROVE the change?".into(),
        ];
        let ok = vec![
            (0, "first name".to_string()),
            (2, "do you approve".to_string()),
        ];
        assert!(check_header(Some(&header), &ok).is_ok());
        assert!(check_header(Some(&header), &[]).is_ok());

        let swapped = vec![(0, "Last Name".to_string())];
        assert!(matches!(
            check_header(Some(&header), &swapped),
            Err(TallyError::HeaderMismatch { column: 0, .. })
        ));
        let out_of_range = vec![(7, "Vote".to_string())];
        assert!(check_header(Some(&header), &out_of_range).is_err());
        assert!(check_header(None, &ok).is_err());
    }
}
