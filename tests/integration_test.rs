// Integration tests for texsuggest
use std::fs;
use tempfile::tempdir;
use texsuggest::prelude::*;
use texsuggest::metrics::{damerau_levenshtein, similarity};

fn create_manager(path: &std::path::Path, strategy: Strategy) -> OverrideManager<FileStore> {
    let config = SuggestConfig {
        strategy,
        override_file: path.to_path_buf(),
        ..SuggestConfig::default()
    };
    OverrideManager::new(FileStore::new(path), config).unwrap()
}

#[test]
fn test_builtin_vocabulary() {
    let registry = EntryRegistry::with_builtins().unwrap();
    assert!(registry.len() > 600);
    assert_eq!(registry.override_count(), 0);

    let alpha = registry.resolve("\\alpha").unwrap().unwrap();
    assert!(!alpha.description.is_empty());
    assert!(alpha.snippet.is_empty());

    let frac = registry.resolve("\\frac").unwrap().unwrap();
    assert_eq!(frac.snippet, "\\frac{@1@}{@2@}");
    assert!(frac.see_also.contains(&"\\dfrac".to_string()));
}

#[test]
fn test_exact_match_ranks_first() {
    let registry = EntryRegistry::with_builtins().unwrap();
    let search = RankedSearch::new(&registry);

    for strategy in [Strategy::EditDistance, Strategy::Subsequence] {
        for query in ["\\alpha", "\\frac", "\\mathbb", "\\sqrt"] {
            let results = search.search(query, 5, strategy);
            assert_eq!(results.len(), 5);
            assert_eq!(results[0].name, query, "{} under {}", query, strategy);
        }
    }
}

#[test]
fn test_search_limits() {
    let registry = EntryRegistry::with_builtins().unwrap();
    let search = RankedSearch::new(&registry);

    assert!(search.search("\\alp", 0, Strategy::EditDistance).is_empty());
    assert_eq!(search.search("\\alp", 3, Strategy::Subsequence).len(), 3);
    assert_eq!(
        search.search("\\alp", usize::MAX, Strategy::EditDistance).len(),
        registry.len()
    );
}

#[test]
fn test_edit_distance_scores_descend() {
    let registry = EntryRegistry::with_builtins().unwrap();
    let results = RankedSearch::new(&registry).search_scored("\\lef", 10, Strategy::EditDistance);

    for window in results.windows(2) {
        assert!(window[0].score >= window[1].score);
    }
    assert_eq!(results[0].score, similarity("\\lef", results[0].name()));
    assert_eq!(results[0].name(), "\\left");
}

#[test]
fn test_metrics() {
    assert_eq!(damerau_levenshtein("\\alpha", "\\alpha"), 0);
    assert_eq!(damerau_levenshtein("\\apla", "\\alpha"), 2);
    assert_eq!(similarity("", ""), 1.0);
}

#[test]
fn test_missing_document() {
    let dir = tempdir().unwrap();
    let manager = create_manager(&dir.path().join("symbols.md"), Strategy::Subsequence);

    assert!(!manager.reload());
    assert!(matches!(manager.try_reload(), Err(Error::DocumentNotFound(_))));
    // Builtins stay usable without a document
    assert_eq!(manager.suggestions("\\frac", 1).unwrap()[0].insert_text, "\\frac{@1@}{@2@}");
}

#[test]
fn test_init_and_reload_from_disk() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("symbols.md");

    let manager = create_manager(&path, Strategy::EditDistance);
    assert_eq!(manager.init_document().unwrap(), 2);
    assert!(path.is_file());
    assert!(matches!(manager.init_document(), Err(Error::DocumentExists(_))));

    let fresh = create_manager(&path, Strategy::EditDistance);
    assert!(fresh.reload());

    let int = fresh.lookup("\\int").unwrap().unwrap();
    assert_eq!(int.snippet, "\\int_{@1@}^{@2@}");
    assert!(int.description.is_empty());

    let sum = fresh.lookup("\\sum").unwrap().unwrap();
    assert_eq!(sum.snippet, "\\sum_{@1@}^{@2@}");
    assert!(!sum.description.is_empty());
    assert_eq!(sum.see_also, vec!["\\Sigma".to_string()]);

    let top = &fresh.suggestions("\\sum", 1).unwrap()[0];
    assert!(top.overridden);
    assert_eq!(top.insert_text, "\\sum_{@1@}^{@2@}");
}

#[test]
fn test_set_snippet_persists() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("symbols.md");

    let manager = create_manager(&path, Strategy::Subsequence);
    manager.set_snippet("\\alpha", "\\alpha_{@1@}").unwrap();
    manager.set_snippet("\\R", "\\mathbb{R}").unwrap();

    let fresh = create_manager(&path, Strategy::Subsequence);
    assert!(fresh.reload());
    let alpha = fresh.lookup("\\alpha").unwrap().unwrap();
    assert_eq!(alpha.snippet, "\\alpha_{@1@}");
    assert!(!alpha.description.is_empty());
    assert_eq!(fresh.lookup("\\R").unwrap().unwrap().snippet, "\\mathbb{R}");

    assert!(fresh.remove_override("\\R").unwrap());
    let again = create_manager(&path, Strategy::Subsequence);
    assert!(again.reload());
    assert!(again.lookup("\\R").is_none());
    assert_eq!(again.registry().override_count(), 1);
}

#[test]
fn test_malformed_document_keeps_previous_overrides() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("symbols.md");

    let manager = create_manager(&path, Strategy::Subsequence);
    manager.init_document().unwrap();

    fs::write(&path, "```json\n[{\"name\": \"\\\\int\",}]\n```\n").unwrap();
    assert!(!manager.reload());
    assert!(matches!(
        manager.try_reload(),
        Err(Error::MalformedOverrideTable { .. })
    ));
    assert_eq!(manager.registry().override_count(), 2);
    assert_eq!(manager.lookup("\\int").unwrap().unwrap().snippet, "\\int_{@1@}^{@2@}");
}

#[test]
fn test_yaml_document_with_notes_survives_save() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("symbols.md");
    fs::write(
        &path,
        "# My symbols\n\n```note\nremember the primes\n```\n\n```yaml\n- name: \\prime\n  snippet: ^{\\prime}\n```\n",
    )
    .unwrap();

    let manager = create_manager(&path, Strategy::Subsequence);
    assert!(manager.reload());
    assert_eq!(manager.lookup("\\prime").unwrap().unwrap().snippet, "^{\\prime}");

    manager.set_snippet("\\sqrt", "\\sqrt{@1@}").unwrap();

    let text = fs::read_to_string(&path).unwrap();
    assert!(text.starts_with("```note\nremember the primes\n```\n```yaml\n"));

    let fresh = create_manager(&path, Strategy::Subsequence);
    assert!(fresh.reload());
    assert_eq!(fresh.lookup("\\prime").unwrap().unwrap().snippet, "^{\\prime}");
    assert_eq!(fresh.lookup("\\sqrt").unwrap().unwrap().snippet, "\\sqrt{@1@}");
}

#[test]
fn test_suggest_honours_trigger_settings() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("symbols.md");
    let manager = create_manager(&path, Strategy::Subsequence);

    let inside = manager.suggest("The sum $\\frac").unwrap();
    assert_eq!(inside.len(), manager.config().max_suggestions);
    assert_eq!(inside[0].name, "\\frac");

    assert!(manager.suggest("No math \\frac").unwrap().is_empty());
}
