//! Property-Based Tests for the lookup path
//!
//! Uses proptest to check key uniqueness and the cache-aside call/write
//! accounting over arbitrary inputs.

use std::collections::HashSet;
use std::sync::Arc;

use proptest::prelude::*;

use crate::cache::{CacheKey, RecordStore};
use crate::lookup::fakes::{FakeProvider, FakeStore};
use crate::lookup::LookupService;
use crate::models::MovieRecord;

// == Strategies ==
/// Printable titles, including separators and trailing digits
fn title_strategy() -> impl Strategy<Value = String> {
    "[ -~]{1,24}".prop_filter("title must not be blank", |t| !t.trim().is_empty())
}

fn year_strategy() -> impl Strategy<Value = i32> {
    prop_oneof![1880..2100i32, any::<i32>()]
}

fn pair_strategy() -> impl Strategy<Value = (String, i32)> {
    (title_strategy(), year_strategy())
}

fn record_for(title: &str, year: i32) -> MovieRecord {
    MovieRecord::new(title, year).with_director(format!("director of {title}"))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // Distinct (title, year) pairs never share an encoded key.
    #[test]
    fn prop_key_encoding_is_injective(a in pair_strategy(), b in pair_strategy()) {
        let ka = CacheKey::new(&a.0, a.1).encode();
        let kb = CacheKey::new(&b.0, b.1).encode();
        prop_assert_eq!(a == b, ka == kb);
    }

    // Moving trailing title digits into the year never collides.
    #[test]
    fn prop_digit_shift_never_collides(stem in "[A-Za-z]{1,10}", digits in "[0-9]{1,3}", year in 0..10_000i32) {
        let shifted_title = format!("{stem}{digits}");
        let shifted_year: i32 = format!("{digits}{year}").parse().unwrap_or(year);
        let a = CacheKey::new(&shifted_title, year);
        let b = CacheKey::new(&stem, shifted_year);
        prop_assert_ne!(a.encode(), b.encode());
    }

    #[test]
    fn prop_parse_inverts_encode((title, year) in pair_strategy()) {
        let key = CacheKey::new(&title, year);
        prop_assert_eq!(CacheKey::parse(&key.encode()), Some(key));
    }

    // Two lookups from an empty store: one provider call, one write, equal results.
    #[test]
    fn prop_second_lookup_is_pure_hit((title, year) in pair_strategy()) {
        tokio_test::block_on(async {
            let store = Arc::new(FakeStore::new());
            let provider = Arc::new(FakeProvider::new());
            provider.insert(record_for(&title, year));
            let svc = LookupService::new(store.clone(), provider.clone());

            let first = svc.lookup(&title, year).await.unwrap();
            let second = svc.lookup(&title, year).await.unwrap();

            prop_assert_eq!(provider.calls(), 1);
            prop_assert_eq!(store.writes(), 1);
            prop_assert_eq!(first, second);
            Ok(())
        })?;
    }

    // list_all_cached reports exactly the distinct successful lookups.
    #[test]
    fn prop_list_all_matches_distinct_lookups(pairs in prop::collection::vec(pair_strategy(), 1..20)) {
        tokio_test::block_on(async {
            let store = Arc::new(FakeStore::new());
            let provider = Arc::new(FakeProvider::new());
            for (title, year) in &pairs {
                provider.insert(record_for(title, *year));
            }
            let svc = LookupService::new(store.clone(), provider.clone());

            for (title, year) in &pairs {
                svc.lookup(title, *year).await.unwrap();
            }

            let distinct: HashSet<(String, i32)> = pairs.iter().cloned().collect();
            let listed = svc.list_all_cached().await.unwrap();
            let listed_keys: HashSet<(String, i32)> =
                listed.iter().map(|r| (r.title.clone(), r.year)).collect();

            prop_assert_eq!(listed.len(), distinct.len());
            prop_assert_eq!(listed_keys, distinct);
            prop_assert_eq!(provider.calls(), listed.len());
            Ok(())
        })?;
    }

    // A not-found answer leaves the entry count untouched.
    #[test]
    fn prop_not_found_leaves_store_unchanged(
        known in prop::collection::vec(pair_strategy(), 0..8),
        (title, year) in pair_strategy(),
    ) {
        prop_assume!(!known.contains(&(title.clone(), year)));
        tokio_test::block_on(async {
            let store = Arc::new(FakeStore::new());
            let provider = Arc::new(FakeProvider::new());
            for (t, y) in &known {
                provider.insert(record_for(t, *y));
            }
            let svc = LookupService::new(store.clone(), provider.clone());
            for (t, y) in &known {
                svc.lookup(t, *y).await.unwrap();
            }

            let before = store.len().await.unwrap();
            let result = svc.lookup(&title, year).await.unwrap();

            prop_assert!(result.is_none());
            prop_assert_eq!(store.len().await.unwrap(), before);
            Ok(())
        })?;
    }
}
