//! Document sources for training: web pages and local JSON files.

use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::Html;
use std::path::Path;
use tracing::{debug, info};

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Fetch a page and return its visible text, whitespace-collapsed.
pub async fn load_url(http: &reqwest::Client, url: &str) -> Result<String> {
    info!("Loading document from {}", url);

    let response = http
        .get(url)
        .send()
        .await
        .with_context(|| format!("Failed to fetch {}", url))?
        .error_for_status()
        .with_context(|| format!("Bad status fetching {}", url))?;

    let body = response.text().await.context("Failed to read page body")?;
    let text = extract_text(&body);

    debug!("Extracted {} characters from {}", text.chars().count(), url);
    Ok(text)
}

/// Read a local JSON file and flatten every string value into one text blob.
pub fn load_json_file<P: AsRef<Path>>(path: P) -> Result<String> {
    let path = path.as_ref();
    info!("Loading document from {}", path.display());

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let value: serde_json::Value =
        serde_json::from_str(&content).with_context(|| format!("Invalid JSON in {}", path.display()))?;

    let mut strings = Vec::new();
    collect_strings(&value, &mut strings);

    Ok(collapse_whitespace(&strings.join(" ")))
}

/// Visible text of an HTML document. Script, style and noscript subtrees are
/// skipped entirely.
pub fn extract_text(html: &str) -> String {
    let document = Html::parse_document(html);
    let mut parts = String::new();
    visit_node(document.tree.root(), &mut parts);
    collapse_whitespace(&parts)
}

fn visit_node(node: ego_tree::NodeRef<'_, scraper::Node>, out: &mut String) {
    if let scraper::Node::Element(element) = node.value() {
        if matches!(element.name(), "script" | "style" | "noscript") {
            return;
        }
    }

    if let scraper::Node::Text(text) = node.value() {
        out.push_str(&text);
        out.push(' ');
    }

    for child in node.children() {
        visit_node(child, out);
    }
}

fn collect_strings(value: &serde_json::Value, out: &mut Vec<String>) {
    match value {
        serde_json::Value::String(s) => {
            if !s.trim().is_empty() {
                out.push(s.clone());
            }
        }
        serde_json::Value::Array(items) => {
            for item in items {
                collect_strings(item, out);
            }
        }
        serde_json::Value::Object(map) => {
            for item in map.values() {
                collect_strings(item, out);
            }
        }
        _ => {}
    }
}

fn collapse_whitespace(text: &str) -> String {
    WHITESPACE_RE.replace_all(text.trim(), " ").to_string()
}
