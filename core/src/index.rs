use serde::Deserialize;
use std::collections::HashMap;

/// One article's metadata as supplied by a metadata provider.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ArticleRecord {
    pub title: String,
    pub author: String,
    /// Unix epoch seconds.
    pub timestamp: i64,
    /// Character count.
    pub length: u64,
    #[serde(default)]
    pub keywords: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleInfo {
    pub author: String,
    pub timestamp: i64,
    pub length: u64,
}

/// Keyword -> titles of the articles listing it, in collection order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeywordIndex {
    titles: HashMap<String, Vec<String>>,
}

impl KeywordIndex {
    pub fn get(&self, keyword: &str) -> Option<&[String]> {
        self.titles.get(keyword).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize { self.titles.len() }

    pub fn is_empty(&self) -> bool { self.titles.is_empty() }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.titles.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }
}

/// Title -> author/timestamp/length.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InfoIndex {
    info: HashMap<String, ArticleInfo>,
}

impl InfoIndex {
    pub fn get(&self, title: &str) -> Option<&ArticleInfo> { self.info.get(title) }

    pub fn len(&self) -> usize { self.info.len() }

    pub fn is_empty(&self) -> bool { self.info.is_empty() }
}

/// Build the keyword index. Titles are appended in record order with no
/// deduplication, so a keyword listed twice on one article yields the title twice.
pub fn build_keyword_index(records: &[ArticleRecord]) -> KeywordIndex {
    let mut titles: HashMap<String, Vec<String>> = HashMap::new();
    for record in records {
        for keyword in &record.keywords {
            titles.entry(keyword.clone()).or_default().push(record.title.clone());
        }
    }
    tracing::debug!(records = records.len(), keywords = titles.len(), "built keyword index");
    KeywordIndex { titles }
}

/// Build the info index. Titles are expected to be unique; on collision the
/// last record wins.
pub fn build_info_index(records: &[ArticleRecord]) -> InfoIndex {
    let mut info: HashMap<String, ArticleInfo> = HashMap::with_capacity(records.len());
    for record in records {
        info.insert(
            record.title.clone(),
            ArticleInfo { author: record.author.clone(), timestamp: record.timestamp, length: record.length },
        );
    }
    tracing::debug!(records = records.len(), titles = info.len(), "built info index");
    InfoIndex { info }
}
