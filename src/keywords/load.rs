use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use super::data::KeywordRecord;

#[derive(Deserialize)]
#[serde(untagged)]
enum KeywordDocument {
    Bare(Vec<KeywordRecord>),
    Wrapped { keywords: Vec<KeywordRecord> },
}

pub fn load_keywords(path: &Path) -> Result<Vec<KeywordRecord>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read keyword file {}", path.display()))?;
    parse_keywords(&raw).with_context(|| format!("failed to parse keyword file {}", path.display()))
}

pub fn parse_keywords(raw: &str) -> Result<Vec<KeywordRecord>> {
    let document =
        serde_json::from_str::<KeywordDocument>(raw).context("keyword document is not valid JSON")?;

    Ok(match document {
        KeywordDocument::Bare(records) => records,
        KeywordDocument::Wrapped { keywords } => keywords,
    })
}
