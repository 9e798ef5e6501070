use voxform_core::SessionOptions;

use super::*;

fn load(html: &str) -> FormSession {
    FormSession::load("sheet.html", html, SessionOptions::default()).unwrap()
}

fn cell(row: u32, col: u32, rows: u32, cols: u32, value: CellValue) -> GridCell {
    GridCell {
        row,
        col,
        rows,
        cols,
        value,
    }
}

#[test]
fn test_grid_plain_rows() {
    let doc = Document::parse("<table><tr><th>Item</th><th>Qty</th></tr><tr><td>Bolts</td><td> 12 </td></tr></table>");
    let table = doc.first_by_tag("table").unwrap();
    assert_eq!(
        table_grid(&doc, table),
        vec![
            cell(0, 0, 1, 1, CellValue::Text("Item".into())),
            cell(0, 1, 1, 1, CellValue::Text("Qty".into())),
            cell(1, 0, 1, 1, CellValue::Text("Bolts".into())),
            cell(1, 1, 1, 1, CellValue::Number(12.0)),
        ]
    );
}

#[test]
fn test_grid_spans() {
    let doc = Document::parse(concat!(
        "<table>",
        "<tr><td rowspan=2>A</td><td colspan=2>B</td></tr>",
        "<tr><td>C</td><td>D</td></tr>",
        "</table>",
    ));
    let table = doc.first_by_tag("table").unwrap();
    let grid = table_grid(&doc, table);
    assert_eq!(grid[0], cell(0, 0, 2, 1, CellValue::Text("A".into())));
    assert_eq!(grid[1], cell(0, 1, 1, 2, CellValue::Text("B".into())));
    // Row 1 starts after the slot held by A.
    assert_eq!(grid[2], cell(1, 1, 1, 1, CellValue::Text("C".into())));
    assert_eq!(grid[3], cell(1, 2, 1, 1, CellValue::Text("D".into())));
}

#[test]
fn test_grid_ignores_bad_spans() {
    let doc = Document::parse("<table><tr><td colspan=0>a</td><td rowspan=x>b</td></tr></table>");
    let table = doc.first_by_tag("table").unwrap();
    let grid = table_grid(&doc, table);
    assert!(grid.iter().all(|c| c.rows == 1 && c.cols == 1));
    assert_eq!(grid[1].col, 1);
}

#[test]
fn test_grid_skips_nested_table_rows() {
    let doc = Document::parse(concat!(
        "<table><tr><td>outer",
        "<table><tr><td>inner</td></tr></table>",
        "</td></tr></table>",
    ));
    let tables = doc.elements_by_tag("table");
    let outer = table_grid(&doc, tables[0]);
    assert_eq!(outer.len(), 1);
    assert_eq!(outer[0].value, CellValue::Text("outerinner".into()));

    let inner = table_grid(&doc, tables[1]);
    assert_eq!(inner, vec![cell(0, 0, 1, 1, CellValue::Text("inner".into()))]);
}

#[test]
fn test_cell_value_parsing() {
    assert_eq!(CellValue::from_text("3.5"), CellValue::Number(3.5));
    assert_eq!(CellValue::from_text("-2"), CellValue::Number(-2.0));
    assert_eq!(CellValue::from_text("inf"), CellValue::Text("inf".into()));
    assert_eq!(CellValue::from_text("12 kg"), CellValue::Text("12 kg".into()));
    assert!(CellValue::from_text("   ").is_empty());
}

#[test]
fn test_form_rows_in_document_order() {
    let mut session = load("<div>Company: ___</div><p>Name: ___</p><span>[Phone]</span>");
    let company = session.summary().regions[2].id.clone();
    session.set_text(&company, "  Acme  ").unwrap();

    let rows = form_rows(&session);
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0], (1, "Acme".to_string()));
    assert_eq!(rows[1], (2, "Name:".to_string()));
    assert_eq!(rows[2], (3, String::new()));
}

#[test]
fn test_export_with_tables_is_a_zip() {
    let session = load("<table><tr><td>Qty</td><td></td></tr></table><table><tr><td>x</td></tr></table>");
    let bytes = export_xlsx(&session).unwrap();
    assert!(bytes.starts_with(b"PK"));
}

#[test]
fn test_export_without_tables_is_a_zip() {
    let session = load("<p>Name: ____</p>");
    let bytes = export_xlsx(&session).unwrap();
    assert!(bytes.starts_with(b"PK"));
    assert!(bytes.len() > 100);
}

#[test]
fn test_grid_colspan_stops_at_row_span() {
    let doc = Document::parse(concat!(
        "<table>",
        "<tr><td>a</td><td rowspan=2>b</td></tr>",
        "<tr><td colspan=3>c</td></tr>",
        "</table>",
    ));
    let table = doc.first_by_tag("table").unwrap();
    let grid = table_grid(&doc, table);
    assert_eq!(grid[1], cell(0, 1, 2, 1, CellValue::Text("b".into())));
    // c is cut short where b hangs down into row 1.
    assert_eq!(grid[2], cell(1, 0, 1, 1, CellValue::Text("c".into())));
}

#[test]
fn test_export_overlapping_spans() {
    let session = load(concat!(
        "<table>",
        "<tr><td>a</td><td rowspan=2>b</td></tr>",
        "<tr><td colspan=3>c</td><td>d</td></tr>",
        "</table>",
    ));
    let bytes = export_xlsx(&session).unwrap();
    assert!(bytes.starts_with(b"PK"));
}

#[test]
fn test_grid_clamps_huge_spans() {
    let doc = Document::parse("<table><tr><td rowspan=65534 colspan=1000>x</td><td>y</td></tr></table>");
    let table = doc.first_by_tag("table").unwrap();
    let grid = table_grid(&doc, table);
    assert_eq!(grid[0], cell(0, 0, 1, 1000, CellValue::Text("x".into())));
    assert_eq!(grid[1], cell(0, 1000, 1, 1, CellValue::Text("y".into())));
}

#[test]
fn test_grid_stops_at_sheet_edge() {
    let wide = "<td colspan=1000></td>".repeat(17);
    let doc = Document::parse(&format!("<table><tr>{wide}<td>past</td></tr></table>"));
    let table = doc.first_by_tag("table").unwrap();
    let grid = table_grid(&doc, table);
    assert_eq!(grid.len(), 17);
    let last = grid.last().unwrap();
    assert_eq!(last.col + last.cols, 16_384);
}

#[test]
fn test_export_huge_spans() {
    let session = load("<table><tr><td rowspan=65534 colspan=1000>x</td></tr><tr><td>y</td></tr></table>");
    let bytes = export_xlsx(&session).unwrap();
    assert!(bytes.starts_with(b"PK"));
}
