use crate::KeywordIndex;

/// Titles of the articles listing `keyword`, matched exactly and
/// case-sensitively. Returns an owned copy so callers cannot reach into the
/// index; an unknown keyword yields an empty list.
pub fn search(keyword: &str, keyword_index: &KeywordIndex) -> Vec<String> {
    match keyword_index.get(keyword) {
        Some(titles) => titles.to_vec(),
        None => {
            tracing::debug!(keyword, "keyword not in index");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{build_keyword_index, ArticleRecord};

    fn index() -> KeywordIndex {
        build_keyword_index(&[ArticleRecord {
            title: "Rust".into(),
            author: "ferris".into(),
            timestamp: 0,
            length: 1,
            keywords: vec!["language".into()],
        }])
    }

    #[test]
    fn exact_match_only() {
        let idx = index();
        assert_eq!(search("language", &idx), vec!["Rust".to_string()]);
        assert!(search("Language", &idx).is_empty());
        assert!(search("lang", &idx).is_empty());
    }

    #[test]
    fn returned_list_is_a_copy() {
        let idx = index();
        let mut hits = search("language", &idx);
        hits.push("Injected".into());
        assert_eq!(search("language", &idx), vec!["Rust".to_string()]);
    }
}
