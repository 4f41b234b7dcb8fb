// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Prompt construction for closed-vocabulary mapping

use serde_json::json;

use crate::llm::ChatMessage;
use crate::taxonomy::Specialty;

pub const SYSTEM_PROMPT: &str = "You are a clinical interest mapping assistant. \
You classify text about a medical expert against a fixed dataset and answer with JSON only.";

const INSTRUCTIONS: &str = r#"Instructions:
- Carefully examine the provided text.
- For every sub-specialty in the dataset, check whether any of its clinical interests are:
  - directly mentioned,
  - partially referenced,
  - or strongly implied by context.
- Include all sub-specialties that apply.
- ONLY use sub-specialty names and clinical interests exactly as written in the dataset.
- NEVER make up, paraphrase or assume terms that are not in the dataset.
- If nothing applies, return an empty "mappings" list.

Output format (JSON only, no commentary):
{"mappings": [{"sub_specialty": "<sub-specialty name>", "clinical_interests": ["<interest>", "..."]}]}"#;

/// Dataset section: only the requested specialty's sub-specialties
pub fn dataset_json(specialty: &Specialty) -> String {
    let subs: Vec<_> = specialty
        .sub_specialties
        .iter()
        .map(|s| {
            json!({
                "sub_specialty": s.name,
                "clinical_interests": s.clinical_interests,
            })
        })
        .collect();

    serde_json::to_string_pretty(&subs).unwrap_or_else(|_| "[]".to_string())
}

/// Build the user prompt
pub fn build_prompt(corpus: &str, specialty: &Specialty) -> String {
    format!(
        "Text:\n{}\n\nDataset for specialty: {}\n{}\n\n{}",
        corpus.trim(),
        specialty.name,
        dataset_json(specialty),
        INSTRUCTIONS
    )
}

/// Build the full message list for one mapping call
pub fn build_messages(corpus: &str, specialty: &Specialty) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(SYSTEM_PROMPT),
        ChatMessage::user(build_prompt(corpus, specialty)),
    ]
}
