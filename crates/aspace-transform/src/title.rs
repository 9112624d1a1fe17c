//! Title extraction.

use aspace_model::ArchivalObject;

type TitleSource = fn(&ArchivalObject) -> Option<&str>;

fn record_title(record: &ArchivalObject) -> Option<&str> {
    record.title.as_deref()
}

fn display_string(record: &ArchivalObject) -> Option<&str> {
    record.display_string.as_deref()
}

/// Tried in order; the first non-blank value wins.
const TITLE_SOURCES: &[TitleSource] = &[record_title, display_string];

/// Title for the digital object, or `None` when the record has none.
pub fn extract_title(record: &ArchivalObject) -> Option<String> {
    TITLE_SOURCES
        .iter()
        .filter_map(|source| source(record))
        .map(str::trim)
        .find(|title| !title.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefers_title_then_display_string() {
        let mut record = ArchivalObject {
            title: Some("Letter to Mary".to_string()),
            display_string: Some("Letter to Mary, 1901".to_string()),
            ..ArchivalObject::default()
        };
        assert_eq!(extract_title(&record).as_deref(), Some("Letter to Mary"));

        record.title = Some("   ".to_string());
        assert_eq!(
            extract_title(&record).as_deref(),
            Some("Letter to Mary, 1901")
        );

        record.display_string = None;
        assert_eq!(extract_title(&record), None);
    }
}
