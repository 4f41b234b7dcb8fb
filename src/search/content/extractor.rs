//! HTML content extraction
//!
//! Two extractors over a parsed document:
//! - `extract_main_content` removes boilerplate and prefers the article body
//! - `extract_visible_text` concatenates every visible text node

use scraper::{ElementRef, Html, Selector};

/// Elements that never carry page body text
const NOISE_TAGS: &[&str] = &[
    "script", "style", "noscript", "template", "svg", "iframe", "nav", "header", "footer",
    "aside", "form", "button",
];

/// Elements whose text is never rendered
const INVISIBLE_TAGS: &[&str] = &["script", "style", "noscript", "template", "head"];

/// Minimum length for a candidate container to win over `<body>`
const SUBSTANTIAL_CONTENT_CHARS: usize = 200;

/// Extract main content from HTML
///
/// Tries multiple strategies in order:
/// 1. `<article>` tag
/// 2. `<main>` tag
/// 3. `[role="main"]` attribute
/// 4. Common content class names (.content, .post-content, profile bodies, etc.)
/// 5. Fallback to `<body>` with noise removal
///
/// Navigation, headers, footers, asides, forms and scripts are stripped in
/// every case.
pub fn extract_main_content(html: &str, max_chars: usize) -> String {
    let document = Html::parse_document(html);

    // Priority order of selectors to try
    let selectors = [
        "article",
        "main",
        "[role='main']",
        ".post-content",
        ".article-content",
        ".entry-content",
        ".profile-content",   // Physician directory profiles
        ".provider-profile",
        ".bio",
        ".content-body",
        "#article-body",
        "#content",
        ".content",
    ];

    for selector_str in selectors {
        if let Ok(selector) = Selector::parse(selector_str) {
            if let Some(element) = document.select(&selector).next() {
                let cleaned = clean_text(&collect_text(element, NOISE_TAGS));
                if cleaned.chars().count() > SUBSTANTIAL_CONTENT_CHARS {
                    return truncate_content(&cleaned, max_chars);
                }
            }
        }
    }

    // Fallback: extract from body, removing nav/footer/script
    if let Ok(body_selector) = Selector::parse("body") {
        if let Some(body) = document.select(&body_selector).next() {
            let cleaned = clean_text(&collect_text(body, NOISE_TAGS));
            return truncate_content(&cleaned, max_chars);
        }
    }
    String::new()
}

/// Concatenate every visible text node of the document
///
/// Structural fallback with no boilerplate heuristics; only never-rendered
/// elements (scripts, styles, head) are skipped.
pub fn extract_visible_text(html: &str, max_chars: usize) -> String {
    let document = Html::parse_document(html);
    let cleaned = clean_text(&collect_text(document.root_element(), INVISIBLE_TAGS));
    truncate_content(&cleaned, max_chars)
}

/// Gather text below `element`, skipping subtrees rooted at `skip` tags
fn collect_text(element: ElementRef<'_>, skip: &[&str]) -> String {
    let mut parts = Vec::new();
    walk(element, skip, &mut parts);
    parts.join(" ")
}

fn walk<'a>(element: ElementRef<'a>, skip: &[&str], parts: &mut Vec<&'a str>) {
    for child in element.children() {
        if let Some(text) = child.value().as_text() {
            let text: &str = text;
            if !text.trim().is_empty() {
                parts.push(text);
            }
        } else if let Some(child_element) = ElementRef::wrap(child) {
            if !skip.contains(&child_element.value().name()) {
                walk(child_element, skip, parts);
            }
        }
    }
}

/// Clean text: normalize whitespace
pub fn clean_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Truncate content to `max_chars` characters, preserving word boundaries
pub fn truncate_content(text: &str, max_chars: usize) -> String {
    let cut = match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => byte_index,
        None => return text.to_string(),
    };

    // Find last space before the cut
    let truncated = &text[..cut];
    match truncated.rfind(' ') {
        Some(last_space) => format!("{}...", &text[..last_space]),
        None => format!("{}...", truncated),
    }
}
