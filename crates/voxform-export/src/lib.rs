//! # Voxform Export
//!
//! Turns a filled [`FormSession`](voxform_core::FormSession) into a
//! downloadable artifact. Every exporter works on a deep copy of the
//! session document; the live form is never touched.

pub mod error;
pub mod html;
pub mod naming;
pub mod print;
pub mod xlsx;

mod page;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::info;
use voxform_core::FormSession;

pub use error::ExportError;
pub use html::export_html;
pub use naming::export_file_name;
pub use print::export_print;
pub use xlsx::export_xlsx;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Html,
    Xlsx,
    Print,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            Self::Html | Self::Print => "html",
            Self::Xlsx => "xlsx",
        }
    }

    pub fn content_type(self) -> &'static str {
        match self {
            Self::Html | Self::Print => "text/html; charset=utf-8",
            Self::Xlsx => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        }
    }

    /// Whether the artifact is meant to be opened in place rather than saved.
    pub fn is_inline(self) -> bool {
        matches!(self, Self::Print)
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Html => "html",
            Self::Xlsx => "xlsx",
            Self::Print => "print",
        };
        f.write_str(name)
    }
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "html" => Ok(Self::Html),
            "xlsx" => Ok(Self::Xlsx),
            "print" | "pdf" => Ok(Self::Print),
            other => Err(ExportError::UnknownFormat(other.to_string())),
        }
    }
}

/// A rendered export.
#[derive(Debug, Clone)]
pub struct Artifact {
    pub format: ExportFormat,
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl Artifact {
    pub fn content_type(&self) -> &'static str {
        self.format.content_type()
    }

    /// `Content-Disposition` header value for this artifact.
    pub fn content_disposition(&self) -> String {
        let disposition = if self.format.is_inline() {
            "inline"
        } else {
            "attachment"
        };
        let escaped = self.file_name.replace('\\', "\\\\").replace('"', "\\\"");
        format!("{}; filename=\"{}\"", disposition, escaped)
    }
}

/// Render the session in the requested format.
pub fn export(session: &FormSession, format: ExportFormat) -> Result<Artifact, ExportError> {
    let bytes = match format {
        ExportFormat::Html => export_html(session)?.into_bytes(),
        ExportFormat::Xlsx => export_xlsx(session)?,
        ExportFormat::Print => export_print(session)?.into_bytes(),
    };
    let file_name = export_file_name(session.file_name(), format.extension());
    info!(format = %format, file = %file_name, bytes = bytes.len(), "Form exported");
    Ok(Artifact {
        format,
        file_name,
        bytes,
    })
}

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;
