use std::fmt::{self, Display};

use crate::domain::entities::ScoredChunk;

pub const DEFAULT_MAX_CONTENT_LENGTH: usize = 200;

/// Search results rendered as a report, one block per row.
pub struct ResultsReport<'a> {
    results: &'a [ScoredChunk],
    max_content_length: usize,
}

impl<'a> ResultsReport<'a> {
    pub fn new(results: &'a [ScoredChunk], max_content_length: usize) -> Self {
        Self {
            results,
            max_content_length,
        }
    }
}

impl Display for ResultsReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, row) in self.results.iter().enumerate() {
            let preview: String = row.content().chars().take(self.max_content_length).collect();

            writeln!(f)?;
            writeln!(f, "[{}] Similarity: {:.4}", idx + 1, row.similarity())?;
            writeln!(f, "File: {}", or_none(row.source()))?;
            writeln!(f, "Chunk index: {}", or_none(row.chunk_index()))?;
            writeln!(f, "Page: {}", or_none(row.page_number()))?;
            writeln!(f, "Section: {}", or_none(row.section_title()))?;
            writeln!(f, "Content: {preview}...")?;
            writeln!(f, "{}", "-".repeat(80))?;
        }
        Ok(())
    }
}

/// Renders a human-readable report of search results.
///
/// Content is cut to its first `max_content_length` characters and always
/// followed by `...`, even when nothing was cut.
pub fn format_results(results: &[ScoredChunk], max_content_length: usize) -> String {
    ResultsReport::new(results, max_content_length).to_string()
}

/// Header printed after a search completes.
pub fn format_summary(count: usize) -> String {
    format!("\nFound {count} documents\n{}\n", "=".repeat(100))
}

fn or_none<T: Display>(value: Option<T>) -> String {
    value.map_or_else(|| "None".to_string(), |v| v.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::ScoredChunkParts;

    fn row(content: &str, similarity: f64) -> ScoredChunk {
        ScoredChunk::new(
            ScoredChunkParts {
                source: Some("handbook.pdf".to_string()),
                content: content.to_string(),
                sha1: "7c211433f02071597741e6ff5a8ea34789abbf43".to_string(),
                chunk_index: Some(4),
                page_number: Some(12),
                section_title: Some("Benefits".to_string()),
                ..Default::default()
            },
            similarity,
        )
    }

    #[test]
    fn test_block_layout() {
        let out = format_results(&[row("Vacation policy", 0.87654)], 200);

        let expected = format!(
            "\n[1] Similarity: 0.8765\nFile: handbook.pdf\nChunk index: 4\nPage: 12\nSection: Benefits\nContent: Vacation policy...\n{}\n",
            "-".repeat(80)
        );
        assert_eq!(out, expected);
    }

    #[test]
    fn test_long_content_is_cut_to_limit() {
        let content = "a".repeat(250);
        let out = format_results(&[row(&content, 0.5)], 200);

        let expected = format!("Content: {}...\n", "a".repeat(200));
        assert!(out.contains(&expected));
    }

    #[test]
    fn test_short_content_still_gets_ellipsis() {
        let out = format_results(&[row("tiny", 0.5)], 10);
        assert!(out.contains("Content: tiny...\n"));

        let exact = format_results(&[row("0123456789", 0.5)], 10);
        assert!(exact.contains("Content: 0123456789...\n"));
    }

    #[test]
    fn test_cut_counts_characters_not_bytes() {
        let out = format_results(&[row("검색결과입니다", 0.5)], 2);
        assert!(out.contains("Content: 검색...\n"));
    }

    #[test]
    fn test_missing_fields_render_as_none() {
        let bare = ScoredChunk::new(
            ScoredChunkParts {
                content: "orphan".to_string(),
                ..Default::default()
            },
            0.1,
        );
        let out = format_results(&[bare], 200);

        assert!(out.contains("File: None\n"));
        assert!(out.contains("Chunk index: None\n"));
        assert!(out.contains("Page: None\n"));
        assert!(out.contains("Section: None\n"));
    }

    #[test]
    fn test_rows_are_numbered_from_one() {
        let out = format_results(&[row("first", 0.9), row("second", 0.8)], 200);

        assert!(out.contains("[1] Similarity: 0.9000"));
        assert!(out.contains("[2] Similarity: 0.8000"));
        assert!(out.find("[1]").unwrap() < out.find("[2]").unwrap());
    }

    #[test]
    fn test_report_display_matches_format_results() {
        let rows = [row("first", 0.9), row("second", 0.8)];

        assert_eq!(ResultsReport::new(&rows, 3).to_string(), format_results(&rows, 3));
    }

    #[test]
    fn test_empty_results() {
        assert!(format_results(&[], 200).is_empty());
        assert_eq!(format_summary(0), format!("\nFound 0 documents\n{}\n", "=".repeat(100)));
    }
}
