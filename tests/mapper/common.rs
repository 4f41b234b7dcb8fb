// Shared fixtures for the mapper integration tests
#![allow(dead_code)]

use async_trait::async_trait;
use clinical_interest_mapper::llm::{ChatMessage, ChatModel, LlmError};
use clinical_interest_mapper::search::{SearchError, SearchProvider, SearchResult};
use clinical_interest_mapper::Taxonomy;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

pub const TAXONOMY_JSON: &str = r#"[
    {"specialty": "Orthopedics", "sub_specialties": [
        {"name": "Joint Reconstruction", "clinical_interests": ["hip replacement", "knee replacement", "revision arthroplasty"]},
        {"name": "Sports Medicine", "clinical_interests": ["ACL reconstruction", "rotator cuff repair"]},
        {"name": "Spine", "clinical_interests": ["scoliosis", "spinal fusion"]}
    ]},
    {"specialty": "Cardiology", "sub_specialties": [
        {"name": "Electrophysiology", "clinical_interests": ["atrial fibrillation", "pacemaker"]}
    ]}
]"#;

pub fn taxonomy() -> Arc<Taxonomy> {
    Arc::new(Taxonomy::from_json_str(TAXONOMY_JSON).unwrap())
}

/// Chat model that always answers with the same text and counts calls
pub struct ScriptedModel {
    reply: String,
    calls: AtomicUsize,
}

impl ScriptedModel {
    pub fn new(reply: impl Into<String>) -> Arc<Self> {
        Arc::new(Self {
            reply: reply.into(),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ChatModel for ScriptedModel {
    async fn complete(&self, _messages: &[ChatMessage], _temperature: f32) -> Result<String, LlmError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.reply.clone())
    }

    fn model_name(&self) -> &str {
        "scripted"
    }
}

/// Search provider returning fixed results for every query
pub struct StaticProvider {
    pub results: Vec<SearchResult>,
    pub calls: AtomicUsize,
}

impl StaticProvider {
    pub fn new(results: Vec<SearchResult>) -> Arc<Self> {
        Arc::new(Self {
            results,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SearchProvider for StaticProvider {
    async fn search(&self, _query: &str, _num_results: usize) -> Result<Vec<SearchResult>, SearchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.results.clone())
    }

    fn name(&self) -> &'static str {
        "static"
    }
}

/// Search provider that fails every query
pub struct FailingProvider;

#[async_trait]
impl SearchProvider for FailingProvider {
    async fn search(&self, _query: &str, _num_results: usize) -> Result<Vec<SearchResult>, SearchError> {
        Err(SearchError::Timeout { timeout_ms: 10 })
    }

    fn name(&self) -> &'static str {
        "failing"
    }
}

pub fn result(url: &str, snippet: Option<&str>) -> SearchResult {
    SearchResult {
        url: url.to_string(),
        title: String::new(),
        snippet: snippet.map(str::to_string),
        source: "static".to_string(),
    }
}
