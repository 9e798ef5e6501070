//! Print-ready page; the platform print dialog produces the PDF.

use voxform_core::FormSession;

use crate::error::ExportError;
use crate::page::{page_title, prepared_copy, standalone_page, strip_markers};

const PRINT_STYLE: &str = "
body { margin: 20px; font-family: Arial, sans-serif; }
table { border-collapse: collapse; width: 100%; }
.editable { border: none !important; outline: none !important; }
img { max-width: 100%; height: auto; }
@media print {
  body { margin: 0; }
  .no-print { display: none; }
}
";

/// Opens the print dialog shortly after the page has loaded.
const PRINT_SCRIPT: &str =
    "window.addEventListener(\"load\", function () { setTimeout(function () { window.print(); }, 250); });";

pub fn export_print(session: &FormSession) -> Result<String, ExportError> {
    let mut doc = prepared_copy(session);
    strip_markers(&mut doc, session, true);
    for region in session.regions().fields() {
        let node = region.node();
        doc.set_attr(node, "contenteditable", "false");
        doc.update_style(node, |style| {
            style.set("outline", "none");
            style.set("background-color", "transparent");
        });
    }
    standalone_page(&doc, page_title(session), PRINT_STYLE, Some(PRINT_SCRIPT))
}

#[cfg(test)]
mod tests {
    use super::*;
    use voxform_core::SessionOptions;

    #[test]
    fn test_print_page() {
        let session = FormSession::load(
            "order.html",
            "<p>Name: ____</p><img src=logo.png>",
            SessionOptions::default(),
        )
        .unwrap();
        let page = export_print(&session).unwrap();

        assert!(page.starts_with("<!DOCTYPE html>"));
        assert!(page.contains("window.print()"));
        assert!(page.contains("250"));
        assert!(page.contains("@media print"));
        assert!(page.contains(r#"contenteditable="false""#));
        assert!(page.contains("outline: none;"));
        assert!(page.contains("background-color: transparent;"));
        assert!(!page.contains("data-editable-id"));
        assert!(!page.contains("data-image-id"));
        assert!(page.contains("<title>order.html</title>"));
    }

    #[test]
    fn test_live_form_untouched() {
        let session =
            FormSession::load("f.html", "<p>___</p>", SessionOptions::default()).unwrap();
        export_print(&session).unwrap();
        let live = session.document().to_html().unwrap();
        assert!(live.contains(r#"contenteditable="true""#));
    }
}
