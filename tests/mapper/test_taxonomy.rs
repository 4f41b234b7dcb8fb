// Taxonomy loading tests

use clinical_interest_mapper::{Taxonomy, TaxonomyError};
use std::io::Write;
use tempfile::NamedTempFile;

fn write_taxonomy(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn test_load_from_file() {
    let file = write_taxonomy(super::common::TAXONOMY_JSON);
    let taxonomy = Taxonomy::load(file.path()).unwrap();

    assert_eq!(taxonomy.len(), 2);
    assert_eq!(taxonomy.specialty_names(), vec!["Cardiology", "Orthopedics"]);

    let ortho = taxonomy.get("  orthopedics ").unwrap();
    assert_eq!(ortho.sub_specialties.len(), 3);
    assert_eq!(ortho.sub_specialties[0].name, "Joint Reconstruction");
}

#[test]
fn test_load_accepts_camel_case_keys() {
    let file = write_taxonomy(
        r#"[{"specialty": "Neurology", "subSpecialties": [
            {"name": "Epilepsy", "clinicalInterests": ["seizure disorders", "Seizure  Disorders", "EEG"]}
        ]}]"#,
    );
    let taxonomy = Taxonomy::load(file.path()).unwrap();

    let epilepsy = &taxonomy.get("Neurology").unwrap().sub_specialties[0];
    assert_eq!(epilepsy.clinical_interests, vec!["seizure disorders", "EEG"]);
}

#[test]
fn test_missing_file_is_io_error() {
    let err = Taxonomy::load("/nonexistent/clinical_interests.json").unwrap_err();
    assert!(matches!(err, TaxonomyError::Io { .. }));
}

#[test]
fn test_wrong_shape_is_schema_error() {
    let file = write_taxonomy(r#"{"specialty": "Orthopedics"}"#);
    assert!(matches!(
        Taxonomy::load(file.path()).unwrap_err(),
        TaxonomyError::Schema(_)
    ));

    let file = write_taxonomy(r#"[{"specialty": "Orthopedics", "sub_specialties": [{"name": 3}]}]"#);
    assert!(matches!(
        Taxonomy::load(file.path()).unwrap_err(),
        TaxonomyError::Schema(_)
    ));
}

#[test]
fn test_duplicate_specialty_is_invalid() {
    let file = write_taxonomy(
        r#"[{"specialty": "Cardiology", "sub_specialties": []},
            {"specialty": "cardiology", "sub_specialties": []}]"#,
    );
    assert!(matches!(
        Taxonomy::load(file.path()).unwrap_err(),
        TaxonomyError::Invalid(_)
    ));
}

#[test]
fn test_unknown_specialty() {
    let taxonomy = super::common::taxonomy();
    let err = taxonomy.require("Dermatology").unwrap_err();
    assert!(matches!(err, TaxonomyError::UnknownSpecialty(ref name) if name == "Dermatology"));
}
