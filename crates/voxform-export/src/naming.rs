//! Download names for exported artifacts.

const DEFAULT_STEM: &str = "form";

/// Extensions that are replaced rather than kept (`.htm`, `.html`, `.xhtm`, `.xhtml`).
const MARKUP_EXTENSIONS: [&str; 4] = [".xhtml", ".xhtm", ".html", ".htm"];

/// `order.html` -> `order_filled.xlsx`; an empty name becomes `form_filled.<ext>`.
pub fn export_file_name(upload: &str, extension: &str) -> String {
    let upload = upload.trim();
    let stem = MARKUP_EXTENSIONS
        .iter()
        .find_map(|suffix| upload.strip_suffix(suffix))
        .unwrap_or(upload);
    let stem = if stem.is_empty() { DEFAULT_STEM } else { stem };
    format!("{}_filled.{}", stem, extension)
}
