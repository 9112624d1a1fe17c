//! Property tests for filename correlation.

use aspace_transform::{FileListing, canonical_key};
use proptest::prelude::*;

proptest! {
    #[test]
    fn every_filename_is_reachable(names in proptest::collection::vec("[A-Za-z]{0,3}[-_]?[0-9]{0,4}([-_][0-9A-Za-z]{1,5}){0,4}(\\.[a-z]{3})?", 0..20)) {
        let listing = FileListing::build(&names);
        for name in &names {
            prop_assert!(listing.contains_filename(name));
            let key = canonical_key(name);
            let registered = listing.registered(&key).unwrap_or_default();
            prop_assert!(registered.iter().any(|existing| existing == name));
        }
    }

    #[test]
    fn canonical_key_is_stable(name in "[A-Za-z]{1,3}[-_]?[0-9]{4}[-_][0-9]{3}_[0-9]{5}_[0-9]{4}\\.(tif|jpg)") {
        let key = canonical_key(&name);
        prop_assert_eq!(canonical_key(&key), key.clone());
        prop_assert_eq!(key.matches('_').count(), 2);
        prop_assert!(!key.contains('-'));
    }
}

#[test]
fn listing_from_owned_strings() {
    let names = vec![
        "BC-2001-074_64862_0000.tif".to_string(),
        "BC-2001-074_64862_0001.tif".to_string(),
    ];
    let listing = FileListing::build(&names);
    assert_eq!(listing.files_for("BC2001_074_64862").unwrap().len(), 2);
    assert_eq!(listing.files_for("BC_2001_074_64862").unwrap().len(), 2);
}
