//! Standalone HTML export.

use voxform_core::FormSession;

use crate::error::ExportError;
use crate::page::{page_title, prepared_copy, standalone_page, strip_markers};

const BASE_STYLE: &str = "
body { font-family: Arial, sans-serif; padding: 20px; }
table { border-collapse: collapse; }
img { max-width: 100%; height: auto; }
";

/// The filled form as a self-contained page without editing affordances.
pub fn export_html(session: &FormSession) -> Result<String, ExportError> {
    let mut doc = prepared_copy(session);
    strip_markers(&mut doc, session, false);
    standalone_page(&doc, page_title(session), BASE_STYLE, None)
}

#[cfg(test)]
#[path = "html_tests.rs"]
mod tests;
