use std::collections::HashMap;

use terragen_core::lang::registry::ItemKind;
use terragen_core::lang::runtime::{self, RuntimeItemId};
use terragen_core::lang::rust_keywords;

#[test]
fn runtime_spellings_unique_and_resolvable() {
    let mut seen: HashMap<&'static str, RuntimeItemId> = HashMap::new();

    for info in runtime::RUNTIME_ITEMS {
        assert_eq!(
            runtime::from_str(info.canonical),
            Some(info.id),
            "runtime item canonical spelling not resolvable: {}",
            info.canonical
        );
        assert_eq!(
            runtime::as_str(info.id),
            info.canonical,
            "runtime as_str mismatch for {:?}",
            info.id
        );

        if let Some(prev) = seen.insert(info.canonical, info.id) {
            panic!(
                "duplicate runtime item spelling {:?}: {:?} and {:?}",
                info.canonical, prev, info.id
            );
        }
    }
}

#[test]
fn runtime_paths_start_with_runtime_crate() {
    for info in runtime::RUNTIME_ITEMS {
        let segments = runtime::path_segments(info.id);
        assert_eq!(segments[0], runtime::RUNTIME_CRATE);
        assert!(segments.iter().all(|s| !s.is_empty()), "empty segment in {}", info.canonical);
    }
}

#[test]
fn only_collection_items_are_generic() {
    for info in runtime::RUNTIME_ITEMS {
        if matches!(info.kind, ItemKind::Alias | ItemKind::Struct) {
            let expect_generic = matches!(
                info.id,
                RuntimeItemId::ListValue
                    | RuntimeItemId::SetValue
                    | RuntimeItemId::MapValue
                    | RuntimeItemId::ListRef
                    | RuntimeItemId::SetRef
                    | RuntimeItemId::MapRef
            );
            assert_eq!(info.arity == 1, expect_generic, "unexpected arity for {:?}", info.id);
        }
    }
}

#[test]
fn runtime_items_are_not_keywords() {
    for info in runtime::RUNTIME_ITEMS {
        for segment in info.canonical.split("::") {
            assert!(!rust_keywords::is_keyword(segment), "runtime segment is a keyword: {segment}");
        }
    }
}
