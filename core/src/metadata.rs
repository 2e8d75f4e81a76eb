//! Metadata providers: the bundled sample collection and JSON / JSONL files.

use crate::{ArticleRecord, MetadataProvider};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

const BUNDLED: &str = include_str!("../data/articles.json");

/// Input record shape: either named fields or the positional
/// `[title, author, timestamp, length, [keywords...]]` array.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum InputRecord {
    Named(ArticleRecord),
    Positional(String, String, i64, u64, Vec<String>),
}

impl From<InputRecord> for ArticleRecord {
    fn from(input: InputRecord) -> Self {
        match input {
            InputRecord::Named(record) => record,
            InputRecord::Positional(title, author, timestamp, length, keywords) => {
                ArticleRecord { title, author, timestamp, length, keywords }
            }
        }
    }
}

/// Sample article collection compiled into the crate.
#[derive(Debug, Default, Clone, Copy)]
pub struct BundledMetadata;

impl MetadataProvider for BundledMetadata {
    fn article_metadata(&self) -> Result<Vec<ArticleRecord>> {
        let records = parse_json_str(BUNDLED).context("bundled article metadata is malformed")?;
        tracing::info!(records = records.len(), "loaded bundled article metadata");
        Ok(records)
    }
}

/// Article metadata read from a `.json` / `.jsonl` file, or every such file
/// under a directory.
#[derive(Debug, Clone)]
pub struct FileMetadata {
    pub path: PathBuf,
}

impl FileMetadata {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self { path: path.as_ref().to_path_buf() }
    }
}

impl MetadataProvider for FileMetadata {
    fn article_metadata(&self) -> Result<Vec<ArticleRecord>> {
        let mut records = Vec::new();
        for file in metadata_files(&self.path)? {
            let before = records.len();
            if file.extension().and_then(|s| s.to_str()) == Some("jsonl") {
                load_jsonl(&file, &mut records)?;
            } else {
                load_json(&file, &mut records)?;
            }
            tracing::debug!(file = %file.display(), records = records.len() - before, "read metadata file");
        }
        tracing::info!(path = %self.path.display(), records = records.len(), "loaded article metadata");
        Ok(records)
    }
}

fn metadata_files(path: &Path) -> Result<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = Vec::new();
    if path.is_dir() {
        for entry in WalkDir::new(path).follow_links(true).sort_by_file_name() {
            let entry = entry.with_context(|| format!("walking {}", path.display()))?;
            let p = entry.path();
            if p.is_file() {
                if let Some(ext) = p.extension().and_then(|s| s.to_str()) {
                    if matches!(ext, "json" | "jsonl") {
                        files.push(p.to_path_buf());
                    }
                }
            }
        }
    } else if path.is_file() {
        files.push(path.to_path_buf());
    } else {
        anyhow::bail!("metadata path not found: {}", path.display());
    }
    Ok(files)
}

fn load_jsonl(file: &Path, records: &mut Vec<ArticleRecord>) -> Result<()> {
    let f = File::open(file).with_context(|| format!("opening {}", file.display()))?;
    let reader = BufReader::new(f);
    for (lineno, line) in reader.lines().enumerate() {
        let line = line.with_context(|| format!("{}:{}", file.display(), lineno + 1))?;
        if line.trim().is_empty() { continue; }
        let input: InputRecord = serde_json::from_str(&line)
            .with_context(|| format!("{}:{}: invalid article record", file.display(), lineno + 1))?;
        records.push(input.into());
    }
    Ok(())
}

fn load_json(file: &Path, records: &mut Vec<ArticleRecord>) -> Result<()> {
    let f = File::open(file).with_context(|| format!("opening {}", file.display()))?;
    let json: serde_json::Value = serde_json::from_reader(BufReader::new(f))
        .with_context(|| format!("{}: invalid JSON", file.display()))?;
    records.extend(records_from_value(json).with_context(|| format!("{}: invalid article record", file.display()))?);
    Ok(())
}

/// Parse a JSON document holding an array of records or a single record.
pub fn parse_json_str(s: &str) -> Result<Vec<ArticleRecord>> {
    let json: serde_json::Value = serde_json::from_str(s)?;
    records_from_value(json)
}

fn records_from_value(json: serde_json::Value) -> Result<Vec<ArticleRecord>> {
    // A bare positional record is itself an array, so check for it before
    // treating the array as a list of records.
    let positional = matches!(&json, serde_json::Value::Array(arr) if arr.first().is_some_and(|v| v.is_string()));
    match json {
        serde_json::Value::Array(_) if positional => {
            let input: InputRecord = serde_json::from_value(json)?;
            Ok(vec![input.into()])
        }
        serde_json::Value::Array(arr) => {
            let mut out = Vec::with_capacity(arr.len());
            for v in arr {
                let input: InputRecord = serde_json::from_value(v)?;
                out.push(input.into());
            }
            Ok(out)
        }
        serde_json::Value::Object(_) => {
            let input: InputRecord = serde_json::from_value(json)?;
            Ok(vec![input.into()])
        }
        _ => anyhow::bail!("expected an array or an object of article records"),
    }
}
