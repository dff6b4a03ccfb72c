//! Panel content descriptions
//!
//! The layout engine only stores a content handle. The GUI uses file paths as
//! handles and decides here how to describe what a panel holds.

use std::path::Path;

/// Extensions offered in the file picker
pub const SUPPORTED_EXTENSIONS: &[&str] = &[
    "png", "jpg", "jpeg", "gif", "mp4", "webm", "pdf", "txt", "md", "csv", "tsv", "excalidraw",
    "svg", "rs", "js", "ts", "py", "json", "toml",
];

/// What kind of viewer a panel's content calls for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    Image,
    Video,
    Document,
    Table,
    Text,
    Drawing,
    Code,
    Unsupported,
}

impl ContentKind {
    /// Classify a file by its extension.
    pub fn from_path(path: &Path) -> Self {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        match ext.as_str() {
            "png" | "jpg" | "jpeg" | "gif" => ContentKind::Image,
            "mp4" | "webm" => ContentKind::Video,
            "pdf" => ContentKind::Document,
            "csv" | "tsv" => ContentKind::Table,
            "txt" | "md" => ContentKind::Text,
            "excalidraw" | "svg" => ContentKind::Drawing,
            "rs" | "js" | "ts" | "py" | "json" | "toml" => ContentKind::Code,
            _ => ContentKind::Unsupported,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ContentKind::Image => "Image",
            ContentKind::Video => "Video",
            ContentKind::Document => "Document",
            ContentKind::Table => "Table",
            ContentKind::Text => "Text",
            ContentKind::Drawing => "Drawing",
            ContentKind::Code => "Code",
            ContentKind::Unsupported => "Unsupported file type",
        }
    }
}

/// File name shown in a panel header, falling back to the full handle.
pub fn display_name(handle: &str) -> &str {
    Path::new(handle)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(handle)
}
