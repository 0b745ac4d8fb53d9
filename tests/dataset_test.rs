use civic_info::dataset::{DatasetMatches, DatasetStore, Matches, MatchOptions, RefreshPolicy};
use civic_info::domain::{CandidateField, FieldValue};
use civic_info::CivicError;
use serde_json::json;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn store_with(files: &[(&str, &str)]) -> (tempfile::TempDir, DatasetStore) {
    let dir = tempdir().unwrap();
    for (name, body) in files {
        fs::write(dir.path().join(name), body).unwrap();
    }
    let store = DatasetStore::new(dir.path(), RefreshPolicy::LoadOnce);
    (dir, store)
}

const CANDIDATES: &str = r#"[
    {"id": 3, "name": "JANE DOE", "party": "Green", "office": "Mayor"},
    {"id": 5, "name": "Lee Park", "office": "City Council"},
    {"id": 3, "name": "Jane Doe Jr", "party": "Unaffiliated", "office": "School Board"}
]"#;

#[test]
fn missing_dataset_is_not_found_not_empty() {
    let (_dir, store) = store_with(&[]);

    let err = store.candidates().snapshot().unwrap_err();
    assert!(matches!(err, CivicError::DatasetNotFound { .. }));
    assert!(err.is_data_unavailable());

    let err = store.load_dataset("glossary").unwrap_err();
    assert!(matches!(err, CivicError::DatasetNotFound { .. }));
}

#[test]
fn malformed_dataset_is_invalid() {
    let (_dir, store) = store_with(&[
        ("candidates.json", "[{\"name\": \"unterminated\""),
        ("glossary.json", r#"[{"term": "Bill"}]"#),
    ]);

    assert!(matches!(
        store.load_dataset("candidates"),
        Err(CivicError::InvalidDataset { .. })
    ));
    // Valid JSON that does not fit the record schema
    assert!(matches!(
        store.glossary().snapshot(),
        Err(CivicError::InvalidDataset { .. })
    ));
    assert!(store.preload().is_err());
}

#[test]
fn legacy_wrapped_layout_is_accepted() {
    let (_dir, store) = store_with(&[(
        "candidates.json",
        r#"{"candidates": [{"name": "Wrapped", "office": "Mayor"}]}"#,
    )]);
    assert_eq!(store.candidates().snapshot().unwrap()[0].name, "Wrapped");
}

#[test]
fn wrapper_without_the_dataset_key_is_invalid() {
    let (_dir, store) = store_with(&[("candidates.json", r#"{"people": []}"#)]);
    assert!(matches!(
        store.candidates().snapshot(),
        Err(CivicError::InvalidDataset { .. })
    ));
}

#[test]
fn projection_by_name_keeps_only_present_fields() {
    let (_dir, store) = store_with(&[("candidates.json", CANDIDATES)]);

    let projected = store
        .project_attributes("candidates", Some(&["name", "party"][..]))
        .unwrap();
    let projected = serde_json::to_value(projected).unwrap();
    assert_eq!(
        projected,
        json!([
            {"name": "JANE DOE", "party": "Green"},
            {"name": "Lee Park"},
            {"name": "Jane Doe Jr", "party": "Unaffiliated"}
        ])
    );

    // A single attribute is a one-element list
    let names = store.project_attributes("candidates", Some(&["name"][..])).unwrap();
    assert!(names.iter().all(|p| p.len() == 1));
}

#[test]
fn projection_without_attributes_round_trips_the_load() {
    let body = r#"[
        {"id": 1, "name": "A", "office": "Mayor", "stances": ["x"]},
        {"name": "B", "office": "Sheriff", "party": "Green", "endorsements": {"unions": 2}}
    ]"#;
    let (_dir, store) = store_with(&[("candidates.json", body)]);

    let projected = store.project_attributes::<&str>("candidates", None).unwrap();
    assert_eq!(
        serde_json::to_value(projected).unwrap(),
        store.load_dataset("candidates").unwrap()
    );
}

#[test]
fn wrapped_projection_round_trips_the_wrapped_records() {
    let (_dir, store) = store_with(&[(
        "candidates.json",
        r#"{"candidates": [{"name": "Wrapped", "office": "Mayor", "slogan": "Onward"}]}"#,
    )]);

    let projected = store.project_attributes::<&str>("candidates", None).unwrap();
    let raw = store.load_dataset("candidates").unwrap();
    assert_eq!(serde_json::to_value(projected).unwrap(), raw["candidates"]);
}

#[test]
fn projection_rejects_unknown_names() {
    let (_dir, store) = store_with(&[("candidates.json", CANDIDATES)]);

    assert!(matches!(
        store.project_attributes("candidates", Some(&["shoe_size"][..])),
        Err(CivicError::UnknownField { .. })
    ));
    assert!(matches!(
        store.project_attributes::<&str>("polls", None),
        Err(CivicError::UnknownDataset(_))
    ));
}

#[test]
fn name_search_is_case_insensitive_by_default() {
    let (_dir, store) = store_with(&[("candidates.json", CANDIDATES)]);
    let candidates = store.candidates();

    let found = candidates
        .find_by_attribute(CandidateField::Name, FieldValue::Text("Jane Doe"), MatchOptions::default())
        .unwrap();
    match found {
        Matches::First(Some(candidate)) => assert_eq!(candidate.name, "JANE DOE"),
        other => panic!("expected a match, got {:?}", other),
    }

    let strict = candidates
        .find_by_attribute(
            CandidateField::Name,
            FieldValue::Text("Jane Doe"),
            MatchOptions::default().case_sensitive(true),
        )
        .unwrap();
    assert_eq!(strict, Matches::First(None));
}

#[test]
fn id_search_returns_every_match_in_order() {
    let (_dir, store) = store_with(&[("candidates.json", CANDIDATES)]);

    let found = store
        .candidates()
        .find_by_attribute(CandidateField::Id, FieldValue::Integer(3), MatchOptions::all())
        .unwrap()
        .into_vec();
    let names: Vec<_> = found.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["JANE DOE", "Jane Doe Jr"]);

    let none = store
        .candidates()
        .find_by_attribute(CandidateField::Id, FieldValue::Integer(42), MatchOptions::all())
        .unwrap();
    assert_eq!(none, Matches::All(vec![]));
}

#[test]
fn store_search_by_names_covers_both_datasets() {
    let (_dir, store) = store_with(&[
        ("candidates.json", CANDIDATES),
        (
            "glossary.json",
            r#"[
                {"term": "Veto", "definition": "Rejection of a bill.", "category": "Legislative Process"},
                {"term": "Caucus", "definition": "Party meeting.", "category": "Political Process"},
                {"term": "Bill", "definition": "Proposed law.", "category": "Legislative Process"}
            ]"#,
        ),
    ]);

    let found = store
        .find_by_attribute("candidates", "id", &json!(3), MatchOptions::all())
        .unwrap();
    match found {
        DatasetMatches::Candidates(Matches::All(candidates)) => assert_eq!(candidates.len(), 2),
        other => panic!("expected candidate matches, got {:?}", other),
    }

    let found = store
        .find_by_attribute("glossary", "term", &json!("caucus"), MatchOptions::default())
        .unwrap();
    assert_eq!(
        serde_json::to_value(&found).unwrap(),
        json!({"term": "Caucus", "definition": "Party meeting.", "category": "Political Process"})
    );

    let found = store
        .find_by_attribute("glossary", "category", &json!("Legislative Process"), MatchOptions::all())
        .unwrap();
    let wire = serde_json::to_value(&found).unwrap();
    let terms: Vec<_> = wire.as_array().unwrap().iter().map(|t| &t["term"]).collect();
    assert_eq!(terms, vec!["Veto", "Bill"]);

    // Text never equals an integer id
    let found = store
        .find_by_attribute("candidates", "id", &json!("3"), MatchOptions::default())
        .unwrap();
    assert!(found.is_empty());

    assert!(matches!(
        store.find_by_attribute("candidates", "id", &json!(true), MatchOptions::default()),
        Err(CivicError::UnsupportedValue(_))
    ));
    assert!(matches!(
        store.find_by_attribute("glossary", "spelling", &json!("x"), MatchOptions::default()),
        Err(CivicError::UnknownField { .. })
    ));
    assert!(matches!(
        store.find_by_attribute("polls", "name", &json!("x"), MatchOptions::default()),
        Err(CivicError::UnknownDataset(_))
    ));

    assert_eq!(
        store.glossary_categories().unwrap(),
        vec!["Legislative Process", "Political Process"]
    );
    let legislative: Vec<_> = store
        .glossary_terms(Some("Legislative Process"))
        .unwrap()
        .into_iter()
        .map(|t| t.term)
        .collect();
    assert_eq!(legislative, vec!["Bill", "Veto"]);
}

#[test]
fn shipped_datasets_load() {
    let root = Path::new(env!("CARGO_MANIFEST_DIR")).join("data");
    let store = DatasetStore::new(root, RefreshPolicy::LoadOnce);
    store.preload().unwrap();

    let categories = store.glossary_categories().unwrap();
    assert!(categories.contains(&"Legislative Process".to_string()));

    let elections = store.glossary_terms(Some("Elections")).unwrap();
    let terms: Vec<_> = elections.iter().map(|t| t.term.as_str()).collect();
    assert_eq!(terms, vec!["General Election", "Gerrymandering", "Primary Election"]);

    assert!(!store.candidates().snapshot().unwrap().is_empty());
}
