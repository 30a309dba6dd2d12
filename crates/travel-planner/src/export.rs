//! Itinerary export.
//!
//! Writes a finished plan to disk as Markdown with a generated header and
//! an optional disclaimer footer.

use std::path::{Path, PathBuf};

use chrono::Utc;

use crate::error::Result;

const DISCLAIMER: &str = "*This itinerary was generated automatically. \
Verify prices, opening hours and travel requirements before booking.*";

/// Writes trip plans as standalone Markdown documents.
pub struct MarkdownExporter {
    include_disclaimer: bool,
}

impl MarkdownExporter {
    pub fn new() -> Self {
        Self {
            include_disclaimer: true,
        }
    }

    pub fn without_disclaimer(mut self) -> Self {
        self.include_disclaimer = false;
        self
    }

    /// Render the document and write it to `path`. Returns the path written.
    pub fn export(&self, plan: &str, path: impl AsRef<Path>) -> Result<PathBuf> {
        let path = path.as_ref().to_path_buf();
        let document = self.render(plan);
        std::fs::write(&path, document)?;
        tracing::info!(path = %path.display(), "exported itinerary");
        Ok(path)
    }

    fn render(&self, plan: &str) -> String {
        let mut document = String::from("# 🧳 AI Travel Itinerary\n\n");
        document.push_str(&format!(
            "_Generated on {}_\n\n---\n\n",
            Utc::now().format("%Y-%m-%d %H:%M UTC")
        ));
        document.push_str(plan.trim());
        document.push('\n');
        if self.include_disclaimer {
            document.push_str("\n---\n\n");
            document.push_str(DISCLAIMER);
            document.push('\n');
        }
        document
    }
}

impl Default for MarkdownExporter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_path() -> PathBuf {
        std::env::temp_dir().join(format!("itinerary-{}.md", uuid::Uuid::new_v4()))
    }

    #[test]
    fn test_export_writes_header_body_and_footer() {
        let path = scratch_path();
        let exporter = MarkdownExporter::new();
        let written = exporter
            .export("# Trip Plan for Paris\n\nDay 1: Louvre.", &path)
            .unwrap();

        let content = std::fs::read_to_string(&written).unwrap();
        assert!(content.starts_with("# 🧳 AI Travel Itinerary"));
        assert!(content.contains("# Trip Plan for Paris"));
        assert!(content.contains("Verify prices"));
        std::fs::remove_file(written).unwrap();
    }

    #[test]
    fn test_disclaimer_can_be_disabled() {
        let exporter = MarkdownExporter::new().without_disclaimer();
        let document = exporter.render("Day 1: beach.");
        assert!(!document.contains("Verify prices"));
        assert!(document.trim_end().ends_with("Day 1: beach."));
    }
}
