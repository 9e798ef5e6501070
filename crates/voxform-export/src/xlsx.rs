//! Spreadsheet export.
//!
//! Each `<table>` becomes its own sheet (`Sheet1`, `Sheet2`, ...). A form
//! without tables gets a single `FormData` sheet listing every field.

use rust_xlsxwriter::{Format, Workbook, Worksheet};
use voxform_core::dom::{Document, NodeId};
use voxform_core::{FormSession, RegionKind};

use crate::error::ExportError;

const FORM_DATA_SHEET: &str = "FormData";

/// Largest spans browsers honour.
const MAX_COLSPAN: u32 = 1000;
const MAX_ROWSPAN: u32 = 65534;

/// Worksheet dimensions.
const SHEET_ROWS: usize = 1_048_576;
const SHEET_COLS: u32 = 16_384;

#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Number(f64),
}

impl CellValue {
    fn from_text(text: &str) -> Self {
        let text = text.trim();
        match text.parse::<f64>() {
            Ok(number) if number.is_finite() => Self::Number(number),
            _ => Self::Text(text.to_string()),
        }
    }

    fn is_empty(&self) -> bool {
        matches!(self, Self::Text(text) if text.is_empty())
    }

    fn as_text(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Number(number) => number.to_string(),
        }
    }
}

/// One table cell placed on the sheet grid.
#[derive(Debug, Clone, PartialEq)]
pub struct GridCell {
    pub row: u32,
    pub col: u32,
    pub rows: u32,
    pub cols: u32,
    pub value: CellValue,
}

impl GridCell {
    fn is_merged(&self) -> bool {
        self.rows > 1 || self.cols > 1
    }
}

/// Taken column ranges per row, as sorted half-open `(start, end)` pairs.
struct Occupancy {
    rows: Vec<Vec<(u32, u32)>>,
}

impl Occupancy {
    fn new(rows: usize) -> Self {
        Self {
            rows: vec![Vec::new(); rows],
        }
    }

    /// First free column at or after `col`.
    fn next_free(&self, row: usize, mut col: u32) -> u32 {
        for &(start, end) in &self.rows[row] {
            if start > col {
                break;
            }
            if col < end {
                col = end;
            }
        }
        col
    }

    /// Start of the first taken range at or after `col`.
    fn next_taken(&self, row: usize, col: u32) -> Option<u32> {
        self.rows[row]
            .iter()
            .map(|&(start, _)| start)
            .find(|start| *start >= col)
    }

    fn take(&mut self, row: usize, start: u32, end: u32) {
        let ranges = &mut self.rows[row];
        let at = ranges.partition_point(|&(s, _)| s < start);
        ranges.insert(at, (start, end));
    }
}

/// Lay out the cells of `table`, skipping rows of nested tables and
/// shifting cells right of slots taken by earlier row spans.
///
/// Spans never reach past the last row of the table or the sheet edge,
/// and a column span stops at the first slot another cell already holds,
/// so no two cells ever cover the same slot.
pub fn table_grid(doc: &Document, table: NodeId) -> Vec<GridCell> {
    let rows: Vec<NodeId> = doc
        .descendants(table)
        .filter(|node| doc.is_tag(*node, "tr"))
        .filter(|tr| doc.ancestors(*tr).find(|a| doc.is_tag(*a, "table")) == Some(table))
        .take(SHEET_ROWS)
        .collect();

    let mut occupied = Occupancy::new(rows.len());
    let mut cells = Vec::new();
    for (row, tr) in rows.iter().enumerate() {
        let remaining = u32::try_from(rows.len() - row).unwrap_or(u32::MAX);
        let mut col = 0u32;
        for cell in doc.children(*tr) {
            if !doc.is_tag(*cell, "td") && !doc.is_tag(*cell, "th") {
                continue;
            }
            col = occupied.next_free(row, col);
            if col >= SHEET_COLS {
                break;
            }
            let mut cols = span(doc, *cell, "colspan", MAX_COLSPAN).min(SHEET_COLS - col);
            if let Some(taken) = occupied.next_taken(row, col) {
                cols = cols.min(taken - col);
            }
            let rowspan = span(doc, *cell, "rowspan", MAX_ROWSPAN).min(remaining);
            for r in row..row + rowspan as usize {
                occupied.take(r, col, col + cols);
            }
            cells.push(GridCell {
                row: row as u32,
                col,
                rows: rowspan,
                cols,
                value: CellValue::from_text(&doc.text_content(*cell)),
            });
            col += cols;
        }
    }
    cells
}

fn span(doc: &Document, cell: NodeId, attr: &str, max: u32) -> u32 {
    doc.attr(cell, attr)
        .and_then(|value| value.trim().parse::<u32>().ok())
        .filter(|value| *value > 0)
        .map_or(1, |value| value.min(max))
}

/// `(ordinal, trimmed text)` for every field, in document order.
pub fn form_rows(session: &FormSession) -> Vec<(u32, String)> {
    let doc = session.document();
    let regions = session.regions();
    let fields = doc.descendants(doc.root()).filter(|node| {
        regions
            .by_node(*node)
            .is_some_and(|region| region.kind() == RegionKind::Field)
    });
    (1u32..)
        .zip(fields)
        .map(|(ordinal, node)| (ordinal, doc.text_content(node).trim().to_string()))
        .collect()
}

pub fn export_xlsx(session: &FormSession) -> Result<Vec<u8>, ExportError> {
    let doc = session.document();
    let mut workbook = Workbook::new();
    let merge_format = Format::new();

    let tables = doc.elements_by_tag("table");
    if tables.is_empty() {
        let sheet = workbook.add_worksheet();
        sheet.set_name(FORM_DATA_SHEET)?;
        write_form_data(sheet, &form_rows(session))?;
    } else {
        for (index, table) in tables.iter().enumerate() {
            let sheet = workbook.add_worksheet();
            sheet.set_name(format!("Sheet{}", index + 1))?;
            write_grid(sheet, &table_grid(doc, *table), &merge_format)?;
        }
    }

    Ok(workbook.save_to_buffer()?)
}

fn write_grid(sheet: &mut Worksheet, cells: &[GridCell], merge_format: &Format) -> Result<(), ExportError> {
    for cell in cells {
        let row = cell.row;
        let col = column(cell.col);
        if cell.is_merged() {
            let last_row = row + cell.rows - 1;
            let last_col = column(cell.col + cell.cols - 1);
            sheet.merge_range(row, col, last_row, last_col, &cell.value.as_text(), merge_format)?;
            if let CellValue::Number(number) = cell.value {
                sheet.write_number_with_format(row, col, number, merge_format)?;
            }
            continue;
        }
        match &cell.value {
            CellValue::Number(number) => {
                sheet.write_number(row, col, *number)?;
            }
            CellValue::Text(text) if !cell.value.is_empty() => {
                sheet.write_string(row, col, text)?;
            }
            CellValue::Text(_) => {}
        }
    }
    Ok(())
}

fn write_form_data(sheet: &mut Worksheet, rows: &[(u32, String)]) -> Result<(), ExportError> {
    sheet.write_string(0, 0, "Field")?;
    sheet.write_string(0, 1, "Value")?;
    for (ordinal, value) in rows {
        sheet.write_number(*ordinal, 0, f64::from(*ordinal))?;
        if !value.is_empty() {
            sheet.write_string(*ordinal, 1, value)?;
        }
    }
    Ok(())
}

/// Columns past the sheet limit are clamped; the writer rejects them.
fn column(col: u32) -> u16 {
    u16::try_from(col).unwrap_or(u16::MAX)
}

#[cfg(test)]
#[path = "xlsx_tests.rs"]
mod tests;
