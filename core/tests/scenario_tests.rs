use search_core::filters::{by_max_length, filter_out_keyword};
use search_core::{build_info_index, build_keyword_index, search, AdvancedOption, ArticleRecord, BundledMetadata, MetadataProvider, ResultSet, SearchIndexes};

fn two_articles() -> Vec<ArticleRecord> {
    vec![
        ArticleRecord { title: "A".into(), author: "Alice".into(), timestamp: 1000000000, length: 100, keywords: vec!["x".into(), "y".into()] },
        ArticleRecord { title: "B".into(), author: "Bob".into(), timestamp: 1600000000, length: 500, keywords: vec!["y".into()] },
    ]
}

fn owned(ts: &[&str]) -> Vec<String> {
    ts.iter().map(|t| t.to_string()).collect()
}

#[test]
fn two_article_scenario() {
    let m = two_articles();
    let kw = build_keyword_index(&m);
    let info = build_info_index(&m);

    assert_eq!(kw.len(), 2);
    assert_eq!(kw.get("x").unwrap(), owned(&["A"]).as_slice());
    assert_eq!(kw.get("y").unwrap(), owned(&["A", "B"]).as_slice());

    let hits = search("y", &kw);
    assert_eq!(hits, owned(&["A", "B"]));
    assert_eq!(by_max_length(200, &hits, &info), owned(&["A"]));
    assert_eq!(filter_out_keyword("x", &hits, &kw), owned(&["B"]));
}

#[test]
fn empty_collection() {
    let idx = SearchIndexes::build(&[]);
    assert!(idx.keywords.is_empty());
    assert!(idx.info.is_empty());
    assert!(search("anything", &idx.keywords).is_empty());
    let result = idx.query("anything", &AdvancedOption::GroupByAuthor);
    assert!(result.is_empty());
    assert_eq!(result.to_string(), "No articles found");
}

#[test]
fn bundled_dog_queries() {
    let records = BundledMetadata.article_metadata().unwrap();
    let idx = SearchIndexes::build(&records);

    let dogs = idx.query("dog", &AdvancedOption::None);
    assert_eq!(
        dogs,
        ResultSet::Titles(owned(&["Guide dog", "Black dog (ghost)", "Mexican dog-faced bat", "Dalmatian (dog)", "Sun dog"]))
    );

    assert_eq!(
        idx.query("dog", &AdvancedOption::MaxLength(8000)),
        ResultSet::Titles(owned(&["Guide dog", "Mexican dog-faced bat"]))
    );
    assert_eq!(
        idx.query("dog", &AdvancedOption::FilterToAuthor("Mr Jake".into())),
        ResultSet::Titles(owned(&["Mexican dog-faced bat", "Dalmatian (dog)", "Sun dog"]))
    );
    assert_eq!(
        idx.query("dog", &AdvancedOption::FilterOutKeyword("dogs".into())),
        ResultSet::Titles(owned(&["Mexican dog-faced bat", "Sun dog"]))
    );
    assert_eq!(
        idx.query("dog", &AdvancedOption::FromYear(2008)),
        ResultSet::Titles(owned(&["Black dog (ghost)", "Dalmatian (dog)", "Sun dog"]))
    );
    assert_eq!(
        idx.query("dog", &AdvancedOption::GroupByAuthor).to_string(),
        r#"Here are your articles: {"Jack Johnson": ["Guide dog"], "Pegship": ["Black dog (ghost)"], "Mr Jake": ["Mexican dog-faced bat", "Dalmatian (dog)", "Sun dog"]}"#
    );
}

#[test]
fn author_names_differing_in_case_are_distinct() {
    let records = BundledMetadata.article_metadata().unwrap();
    let idx = SearchIndexes::build(&records);
    match idx.query("the", &AdvancedOption::GroupByAuthor) {
        ResultSet::ByAuthor(groups) => {
            assert!(groups.get("Jack Johnson").is_some());
            assert!(groups.get("jack johnson").is_some());
        }
        other => panic!("expected grouping, got {other:?}"),
    }
}

#[test]
fn search_is_case_sensitive() {
    let records = BundledMetadata.article_metadata().unwrap();
    let idx = SearchIndexes::build(&records);
    assert!(idx.query("Dog", &AdvancedOption::None).is_empty());
}
