// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Parsing of raw model output into proposed mapping entries
//!
//! Two structures are recognised:
//! - a JSON object `{"mappings": [...]}` (or a bare array), optionally inside
//!   a Markdown code fence
//! - the line format `Sub-specialty: X` followed by `→ Clinical Interest: Y`
//!
//! Anything else is rejected rather than partially parsed.

use regex::Regex;
use serde::Deserialize;
use std::sync::OnceLock;

use super::types::ProposedEntry;

#[derive(Deserialize)]
#[serde(untagged)]
enum JsonMapping {
    Object { mappings: Vec<ProposedEntry> },
    List(Vec<ProposedEntry>),
}

fn code_fence() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)```(?:json|JSON)?\s*(.*?)```").expect("valid regex"))
}

fn sub_specialty_line() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)^[\s\-*#]*sub[\s\-]?specialty\**\s*:\s*(.+)$").expect("valid regex")
    })
}

fn interest_line() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)^[\s\-*→>]*clinical\s+interest\**\s*:\s*(.+)$").expect("valid regex")
    })
}

/// Parse model output into proposed entries
///
/// Returns the reason on failure.
pub fn parse_model_output(raw: &str) -> Result<Vec<ProposedEntry>, String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err("empty response".to_string());
    }

    if let Some(entries) = parse_json(trimmed) {
        return Ok(entries);
    }

    parse_lines(trimmed)
}

fn parse_json(text: &str) -> Option<Vec<ProposedEntry>> {
    let mut candidates: Vec<&str> = Vec::new();
    if let Some(captures) = code_fence().captures(text) {
        if let Some(body) = captures.get(1) {
            candidates.push(body.as_str().trim());
        }
    }
    candidates.push(text);

    candidates
        .into_iter()
        .find_map(|candidate| serde_json::from_str::<JsonMapping>(candidate).ok())
        .or_else(|| first_embedded_object(text))
        .map(|mapping| match mapping {
            JsonMapping::Object { mappings } => mappings,
            JsonMapping::List(entries) => entries,
        })
}

/// First balanced mapping object inside surrounding prose
fn first_embedded_object(text: &str) -> Option<JsonMapping> {
    text.match_indices('{').find_map(|(start, _)| {
        serde_json::Deserializer::from_str(&text[start..])
            .into_iter::<JsonMapping>()
            .next()?
            .ok()
    })
}

fn parse_lines(text: &str) -> Result<Vec<ProposedEntry>, String> {
    let mut entries: Vec<ProposedEntry> = Vec::new();

    for line in text.lines() {
        if let Some(captures) = sub_specialty_line().captures(line) {
            entries.push(ProposedEntry {
                sub_specialty: clean_value(&captures[1]),
                clinical_interests: Vec::new(),
            });
        } else if let Some(captures) = interest_line().captures(line) {
            match entries.last_mut() {
                Some(current) => current.clinical_interests.push(clean_value(&captures[1])),
                None => return Err("clinical interest listed before any sub-specialty".to_string()),
            }
        }
    }

    if entries.is_empty() {
        return Err("no JSON mapping or sub-specialty lines found".to_string());
    }
    Ok(entries)
}

/// Strip the decoration models add around values
fn clean_value(value: &str) -> String {
    value
        .trim()
        .trim_matches(|c: char| matches!(c, '[' | ']' | '*' | '"' | '`'))
        .trim()
        .to_string()
}
