//! Filename correlation.
//!
//! Technical-metadata filenames follow several historical conventions
//! (`BC-2001-074_64862_0000.tif`, `BC_2001-074_64862_0000.tif`,
//! `bc2001-074_64862_0000.tif`). Each is normalized to a canonical key such
//! as `BC2001_074_64862` that matches the component id of the archival item.

use std::collections::BTreeMap;

use tracing::debug;

fn alpha_prefix_len(name: &str) -> usize {
    name.bytes().take_while(u8::is_ascii_alphabetic).count()
}

/// `BC-2000...` and `BC_2000...` both become `BC2000...`.
fn drop_prefix_separator(name: &str) -> String {
    let prefix = alpha_prefix_len(name);
    let rest = &name[prefix..];
    let mut chars = rest.chars();
    match (chars.next(), chars.next()) {
        (Some('-' | '_'), Some(next)) if prefix > 0 && next.is_ascii_digit() => {
            format!("{}{}", &name[..prefix], &rest[1..])
        }
        _ => name.to_string(),
    }
}

/// Everything before the third underscore: institution code plus two numeric
/// groups. Names with fewer segments lose only their extension.
fn truncate_identifier(name: &str) -> &str {
    if let Some((index, _)) = name.match_indices('_').nth(2) {
        return &name[..index];
    }
    match name.rfind('.') {
        Some(index) => &name[..index],
        None => name,
    }
}

/// Normalize a raw filename to its canonical item key.
pub fn canonical_key(raw: &str) -> String {
    let upper = raw.to_uppercase();
    let collapsed = drop_prefix_separator(&upper).replace('-', "_");
    truncate_identifier(&collapsed).to_string()
}

/// Alternate spellings of `key` with a separator between the letter prefix
/// and the first digit.
///
/// Known defect: the second (dash) variant is built with `_` as well, so both
/// entries are identical. Existing listings depend on this behavior.
pub fn tolerant_variants(key: &str) -> Vec<String> {
    let prefix = alpha_prefix_len(key);
    let rest = &key[prefix..];
    if prefix == 0 || !rest.starts_with(|ch: char| ch.is_ascii_digit()) {
        return Vec::new();
    }
    let underscored = format!("{}_{}", &key[..prefix], rest);
    let dashed = format!("{}_{}", &key[..prefix], rest);
    vec![underscored, dashed]
}

/// Canonical key → raw filenames belonging to that item.
///
/// A filename is registered under its canonical key and every tolerant
/// variant, so one filename may appear under several keys. Built once per run
/// and read-only afterward.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileListing {
    entries: BTreeMap<String, Vec<String>>,
}

impl FileListing {
    pub fn build<I, S>(filenames: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut listing = Self::default();
        let mut file_count = 0usize;
        for filename in filenames {
            let filename = filename.as_ref();
            let key = canonical_key(filename);
            for variant in tolerant_variants(&key) {
                listing.register(variant, filename);
            }
            listing.register(key, filename);
            file_count += 1;
        }
        debug!(
            file_count,
            key_count = listing.entries.len(),
            "built file listing"
        );
        listing
    }

    fn register(&mut self, key: String, filename: &str) {
        let files = self.entries.entry(key).or_default();
        if !files.iter().any(|existing| existing == filename) {
            files.push(filename.to_string());
        }
    }

    /// Files for an item, sorted lexicographically.
    pub fn files_for(&self, key: &str) -> Option<Vec<String>> {
        let files = self
            .entries
            .get(key)
            .or_else(|| self.entries.get(&key.to_uppercase()))?;
        let mut sorted = files.clone();
        sorted.sort();
        Some(sorted)
    }

    /// Files under `key` in input order.
    pub fn registered(&self, key: &str) -> Option<&[String]> {
        self.entries.get(key).map(Vec::as_slice)
    }

    pub fn contains_filename(&self, filename: &str) -> bool {
        self.entries
            .values()
            .any(|files| files.iter().any(|existing| existing == filename))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn historical_conventions_share_a_key() {
        for raw in [
            "BC-2001-074_64862_0000.tif",
            "BC_2001-074_64862_0000.tif",
            "bc2001-074_64862_0000.tif",
        ] {
            assert_eq!(canonical_key(raw), "BC2001_074_64862", "raw: {raw}");
        }
    }

    #[test]
    fn separator_is_kept_when_no_digit_follows() {
        assert_eq!(drop_prefix_separator("BC_ABC"), "BC_ABC");
        assert_eq!(drop_prefix_separator("-2001"), "-2001");
    }

    #[test]
    fn short_names_lose_only_the_extension() {
        assert_eq!(canonical_key("BC2001_074.tif"), "BC2001_074");
        assert_eq!(canonical_key("README"), "README");
    }

    #[test]
    fn variants_insert_underscore_after_prefix() {
        assert_eq!(
            tolerant_variants("BC2001_074_64862"),
            vec!["BC_2001_074_64862", "BC_2001_074_64862"]
        );
        assert!(tolerant_variants("2001_074_64862").is_empty());
        assert!(tolerant_variants("BC_2001").is_empty());
    }

    #[test]
    fn pages_of_one_item_are_grouped_and_sorted() {
        let listing = FileListing::build([
            "BC2001_074_64862_0002.tif",
            "BC-2001-074_64862_0001.tif",
            "BC2001_074_64862_0000.jpg",
            "BC2001_074_99999_0000.tif",
        ]);
        assert_eq!(
            listing.files_for("BC2001_074_64862").unwrap(),
            vec![
                "BC-2001-074_64862_0001.tif",
                "BC2001_074_64862_0000.jpg",
                "BC2001_074_64862_0002.tif",
            ]
        );
        assert_eq!(
            listing.registered("BC_2001_074_64862").unwrap(),
            &[
                "BC2001_074_64862_0002.tif",
                "BC-2001-074_64862_0001.tif",
                "BC2001_074_64862_0000.jpg",
            ]
        );
    }

    #[test]
    fn identical_variants_do_not_duplicate_entries() {
        let listing = FileListing::build(["BC2001_074_64862_0000.tif"]);
        assert_eq!(listing.registered("BC_2001_074_64862").unwrap().len(), 1);
        assert_eq!(listing.len(), 2);
        assert!(!listing.is_empty());
        assert!(FileListing::build(Vec::<String>::new()).is_empty());
    }

    #[test]
    fn lookup_is_case_tolerant() {
        let listing = FileListing::build(["BC2001_074_64862_0000.tif"]);
        assert!(listing.files_for("bc2001_074_64862").is_some());
        assert!(listing.files_for("BC2001_074_00000").is_none());
    }
}
