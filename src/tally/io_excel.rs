use calamine::{open_workbook, DataType, Range, Reader, Xlsx};
use std::path::Path;

use crate::tally::*;

/// Reads all the rows of a worksheet as text, header included.
///
/// Cells are placed at their sheet column: the first cell of a row is column A,
/// even when the first columns of the sheet are empty.
pub fn read_excel_rows(path: &Path, worksheet_name: Option<&str>) -> TallyResult<Vec<Vec<String>>> {
    let wrange = get_range(path, worksheet_name)?;
    if wrange.is_empty() {
        warn!("read_excel_rows: {:?}: empty worksheet", path);
    }
    let rows = range_to_rows(&wrange);
    debug!("read_excel_rows: {:?}: {} rows", path, rows.len());
    Ok(rows)
}

pub fn range_to_rows(wrange: &Range<DataType>) -> Vec<Vec<String>> {
    // The range starts at the first used cell.
    let start_col = wrange.start().map(|(_, col)| col as usize).unwrap_or(0);
    wrange
        .rows()
        .map(|row| {
            let mut cells: Vec<String> = vec![String::new(); start_col];
            cells.extend(row.iter().map(read_cell));
            cells
        })
        .collect()
}

fn read_cell(cell: &DataType) -> String {
    match cell {
        DataType::String(s) => s.clone(),
        DataType::Int(i) => i.to_string(),
        DataType::Float(f) => f.to_string(),
        DataType::Bool(b) => b.to_string(),
        DataType::Empty => String::new(),
        _ => {
            debug!("read_cell: unusual cell {:?}", cell);
            format!("{:?}", cell)
        }
    }
}

fn get_range(path: &Path, worksheet_name: Option<&str>) -> TallyResult<Range<DataType>> {
    let p = path.display().to_string();
    debug!("get_range: path: {:?} worksheet: {:?}", &p, &worksheet_name);
    let mut workbook: Xlsx<_> = open_workbook(path).context(OpeningExcelSnafu { path: &p })?;

    // A worksheet name was provided, use it.
    if let Some(name) = worksheet_name {
        workbook
            .worksheet_range(name)
            .context(MissingWorksheetSnafu { name, path: &p })?
            .context(OpeningExcelSnafu { path: &p })
    } else {
        workbook
            .worksheet_range_at(0)
            .context(EmptyExcelSnafu { path: &p })?
            .context(OpeningExcelSnafu { path: &p })
    }
}
