use std::fs;
use std::path::{Path, PathBuf};

use nutriplan_core::{
    inspect_catalog, load_catalog, load_catalog_or_empty, CatalogError, MealSlot,
    ValidationIssue,
};
use tempfile::TempDir;

fn sample_catalog_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../data/sample_foods.json")
}

fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn bundled_sample_catalog_is_complete() {
    let catalog = load_catalog(sample_catalog_path()).expect("sample catalog should load");
    for slot in MealSlot::ALL {
        assert!(!catalog.slot(slot).is_empty(), "{slot} should have foods");
    }
    let (_, report) = inspect_catalog(sample_catalog_path()).unwrap();
    assert!(report.is_empty(), "unexpected issues: {report}");
}

#[test]
fn missing_file_substitutes_empty_catalog() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("absent.json");
    assert!(matches!(
        load_catalog(&path),
        Err(CatalogError::NotFound { .. })
    ));
    assert!(load_catalog_or_empty(&path).is_empty());
}

#[test]
fn invalid_json_substitutes_empty_catalog() {
    let dir = TempDir::new().unwrap();
    let path = write(dir.path(), "broken.json", "{\"breakfast\": [");
    assert!(matches!(
        load_catalog(&path),
        Err(CatalogError::InvalidJson { .. })
    ));
    assert!(load_catalog_or_empty(&path).is_empty());
}

#[test]
fn missing_meal_types_default_to_empty() {
    let dir = TempDir::new().unwrap();
    let path = write(
        dir.path(),
        "partial.json",
        r#"{"lunch": [{"name": "Soup", "calories": 200, "protein": 8, "carbs": 30, "fat": 5, "category": ["vegetarian"]}]}"#,
    );
    let catalog = load_catalog(&path).unwrap();
    assert_eq!(catalog.lunch.len(), 1);
    assert!(catalog.breakfast.is_empty());
    assert!(catalog.snacks.is_empty());

    let (_, report) = inspect_catalog(&path).unwrap();
    assert!(report.issues.contains(&ValidationIssue::MissingSlot {
        slot: MealSlot::Snacks
    }));
    assert!(!report.issues.contains(&ValidationIssue::EmptySlot {
        slot: MealSlot::Snacks
    }));
}

#[test]
fn structural_problems_fail_strict_load_with_full_report() {
    let dir = TempDir::new().unwrap();
    let path = write(
        dir.path(),
        "invalid.json",
        r#"{
            "breakfast": [{"name": "Toast", "calories": 120}],
            "lunch": [],
            "dinner": [],
            "snacks": [{"name": "Nuts", "calories": 160, "protein": 6, "carbs": 6, "fat": 14}]
        }"#,
    );
    let err = load_catalog(&path).unwrap_err();
    let CatalogError::Invalid { report, .. } = &err else {
        panic!("expected validation failure, got {err}");
    };
    let fatal: Vec<String> = report.fatal().map(ToString::to_string).collect();
    assert_eq!(fatal.len(), 5);
    assert!(fatal.contains(&"food 'Toast' in breakfast is missing required field: category".to_string()));
    assert!(fatal.contains(&"food 'Nuts' in snacks is missing required field: category".to_string()));

    assert!(load_catalog_or_empty(&path).is_empty());
}

#[test]
fn extra_catalog_merges_after_base() {
    let dir = TempDir::new().unwrap();
    let extra = write(
        dir.path(),
        "extra.json",
        r#"{"snacks": [{"name": "Rice Cake", "calories": 35, "protein": 1, "carbs": 7, "fat": 0.3, "category": ["gluten-free", "low-fat"]}]}"#,
    );
    let base = load_catalog(sample_catalog_path()).unwrap();
    let merged = base.merge(&load_catalog(&extra).unwrap());
    assert_eq!(merged.snacks.len(), base.snacks.len() + 1);
    assert_eq!(merged.snacks.last().unwrap().name, "Rice Cake");
    assert_eq!(merged.breakfast, base.breakfast);
}
