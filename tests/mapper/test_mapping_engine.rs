// Closed-vocabulary mapping tests

use super::common::{taxonomy, ScriptedModel};
use clinical_interest_mapper::mapping::ProposedEntry;
use clinical_interest_mapper::{
    KeywordMappingEngine, LlmMappingEngine, Mapping, MappingEngine, MappingError, Specialty,
    SubSpecialty, Taxonomy,
};
use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};
use serde_json::json;

fn random_taxonomy(rng: &mut StdRng) -> Taxonomy {
    let specialties = (0..rng.gen_range(1..4))
        .map(|s| Specialty {
            name: format!("Specialty {}", s),
            sub_specialties: (0..rng.gen_range(1..5))
                .map(|j| SubSpecialty {
                    name: format!("Sub {}-{}", s, j),
                    clinical_interests: (0..rng.gen_range(1..6))
                        .map(|k| format!("interest {}-{}-{}", s, j, k))
                        .collect(),
                })
                .collect(),
        })
        .collect();
    Taxonomy::from_specialties(specialties).unwrap()
}

/// Model reply mixing real taxonomy terms, case variants and inventions
fn noisy_reply(rng: &mut StdRng, taxonomy: &Taxonomy) -> String {
    let mut mappings = Vec::new();
    for specialty in taxonomy.specialties() {
        for sub in &specialty.sub_specialties {
            if rng.gen_bool(0.6) {
                let mut interests: Vec<String> = Vec::new();
                for interest in &sub.clinical_interests {
                    if rng.gen_bool(0.5) {
                        interests.push(if rng.gen_bool(0.3) {
                            interest.to_uppercase()
                        } else {
                            interest.clone()
                        });
                    }
                }
                interests.push(format!("invented {}", rng.gen::<u32>()));
                interests.shuffle(rng);
                mappings.push(json!({"sub_specialty": sub.name, "clinical_interests": interests}));
            }
        }
    }
    mappings.push(json!({"sub_specialty": "Made Up Sub", "clinical_interests": ["made up"]}));
    json!({ "mappings": mappings }).to_string()
}

fn assert_within_vocabulary(mapping: &Mapping, specialty: &Specialty) {
    for entry in &mapping.entries {
        let sub = specialty
            .sub_specialties
            .iter()
            .find(|s| s.name == entry.sub_specialty)
            .unwrap_or_else(|| panic!("{} is not in {}", entry.sub_specialty, specialty.name));
        assert!(!entry.matched_interests.is_empty());
        for interest in &entry.matched_interests {
            assert!(
                sub.clinical_interests.contains(interest),
                "{} is not an interest of {}",
                interest,
                sub.name
            );
        }
    }
}

#[tokio::test]
async fn test_output_stays_within_requested_specialty() {
    let mut rng = StdRng::seed_from_u64(42);

    for _ in 0..50 {
        let taxonomy = random_taxonomy(&mut rng);
        let specialty = taxonomy
            .specialties()
            .choose(&mut rng)
            .unwrap()
            .clone();
        let engine = LlmMappingEngine::new(ScriptedModel::new(noisy_reply(&mut rng, &taxonomy)), 0.0);

        let mapping = engine.map("some corpus text", &specialty).await.unwrap();

        assert_eq!(mapping.specialty, specialty.name);
        assert_within_vocabulary(&mapping, &specialty);
    }
}

#[tokio::test]
async fn test_hip_replacement_maps_to_joint_reconstruction() {
    let taxonomy = taxonomy();
    let orthopedics = taxonomy.get("Orthopedics").unwrap();
    let model = ScriptedModel::new(
        "Sub-specialty: Joint Reconstruction\n→ Clinical Interest: hip replacement\n",
    );
    let engine = LlmMappingEngine::new(model.clone(), 0.0);

    let mapping = engine
        .map("Dr. Doe specializes in hip replacement.", orthopedics)
        .await
        .unwrap();

    assert_eq!(model.calls(), 1);
    assert_eq!(mapping.entries.len(), 1);
    assert_eq!(mapping.entries[0].sub_specialty, "Joint Reconstruction");
    assert_eq!(mapping.entries[0].matched_interests, vec!["hip replacement"]);
    assert_eq!(
        mapping.to_string(),
        "Sub-specialty: Joint Reconstruction\n→ Clinical Interest: hip replacement\n"
    );
}

#[tokio::test]
async fn test_prose_output_is_unparseable() {
    let taxonomy = taxonomy();
    let prose = "Based on the text, this doctor seems to do many things related to joints.";
    let engine = LlmMappingEngine::new(ScriptedModel::new(prose), 0.0);

    match engine.map("corpus", taxonomy.get("Orthopedics").unwrap()).await {
        Err(MappingError::Unparseable { raw, .. }) => assert_eq!(raw, prose),
        other => panic!("expected unparseable output, got {:?}", other),
    }
}

#[tokio::test]
async fn test_keyword_engine_matches_whole_phrases() {
    let taxonomy = taxonomy();
    let mapping = KeywordMappingEngine::new()
        .map(
            "Performs Hip Replacement and spinal fusion; not scoliosisX.",
            taxonomy.get("Orthopedics").unwrap(),
        )
        .await
        .unwrap();

    let subs: Vec<&str> = mapping.entries.iter().map(|e| e.sub_specialty.as_str()).collect();
    assert_eq!(subs, vec!["Joint Reconstruction", "Spine"]);
    assert_eq!(mapping.get("Spine").unwrap().matched_interests, vec!["spinal fusion"]);
}

#[test]
fn test_constrain_merges_duplicate_claims() {
    let taxonomy = taxonomy();
    let mapping = Mapping::constrain(
        taxonomy.get("Orthopedics").unwrap(),
        vec![
            ProposedEntry {
                sub_specialty: "spine".to_string(),
                clinical_interests: vec!["Scoliosis".to_string()],
            },
            ProposedEntry {
                sub_specialty: "Spine".to_string(),
                clinical_interests: vec!["scoliosis".to_string(), "spinal  fusion".to_string()],
            },
        ],
    );

    assert_eq!(mapping.entries.len(), 1);
    assert_eq!(mapping.entries[0].matched_interests, vec!["scoliosis", "spinal fusion"]);
}
