use crate::filters::{by_max_length, filter_by_year, filter_out_keyword, filter_to_author, group_by_author, AuthorGroups};
use crate::{build_info_index, build_keyword_index, search, ArticleRecord, InfoIndex, KeywordIndex};
use anyhow::{anyhow, bail, Context, Result};
use serde::Serialize;
use std::fmt;

/// The single secondary filter chosen after a keyword search.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AdvancedOption {
    #[default]
    None,
    MaxLength(u64),
    GroupByAuthor,
    FilterToAuthor(String),
    FilterOutKeyword(String),
    FromYear(i32),
}

impl AdvancedOption {
    /// Menu shown by interactive front ends, indexed by choice number.
    pub const MENU: [&'static str; 6] = [
        "Articles with length not exceeding a maximum",
        "Articles grouped by author",
        "Articles from a specific author",
        "Articles without a second keyword",
        "Articles from a specific year",
        "None",
    ];

    /// Whether `choice` needs a parameter value from the user.
    pub fn choice_needs_value(choice: u8) -> bool {
        matches!(choice, 1 | 3 | 4 | 5)
    }

    /// Map a numbered menu choice and its raw parameter to an option.
    /// Choice 6 means no filter; choices 1 and 5 take integers, 3 and 4 take text.
    pub fn from_choice(choice: u8, value: Option<&str>) -> Result<Self> {
        let required = |name: &str| -> Result<String> {
            match value.map(str::trim) {
                Some(v) if !v.is_empty() => Ok(v.to_string()),
                _ => Err(anyhow!("option {choice} requires {name}")),
            }
        };
        let option = match choice {
            1 => {
                let raw = required("a maximum length")?;
                Self::MaxLength(raw.parse().with_context(|| format!("invalid maximum length: {raw}"))?)
            }
            2 => Self::GroupByAuthor,
            3 => Self::FilterToAuthor(required("an author")?),
            4 => Self::FilterOutKeyword(required("a keyword")?),
            5 => {
                let raw = required("a year")?;
                Self::FromYear(raw.parse().with_context(|| format!("invalid year: {raw}"))?)
            }
            6 => Self::None,
            other => bail!("unknown advanced option {other}, expected 1-6"),
        };
        Ok(option)
    }
}

/// Final value of a query: a flat title list, or titles grouped by author.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ResultSet {
    Titles(Vec<String>),
    ByAuthor(AuthorGroups),
}

impl ResultSet {
    pub fn is_empty(&self) -> bool {
        match self {
            ResultSet::Titles(t) => t.is_empty(),
            ResultSet::ByAuthor(g) => g.is_empty(),
        }
    }
}

impl fmt::Display for ResultSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("No articles found");
        }
        match self {
            ResultSet::Titles(t) => write!(f, "Here are your articles: {t:?}"),
            ResultSet::ByAuthor(g) => write!(f, "Here are your articles: {g}"),
        }
    }
}

/// Both lookup structures, built once per run and passed explicitly.
#[derive(Debug, Clone, Default)]
pub struct SearchIndexes {
    pub keywords: KeywordIndex,
    pub info: InfoIndex,
}

impl SearchIndexes {
    pub fn build(records: &[ArticleRecord]) -> Self {
        Self { keywords: build_keyword_index(records), info: build_info_index(records) }
    }

    /// Search for `keyword`, then apply `option`.
    ///
    /// The max-length filter is checked first and independently; the four
    /// remaining filters are mutually exclusive.
    pub fn query(&self, keyword: &str, option: &AdvancedOption) -> ResultSet {
        let mut titles = search(keyword, &self.keywords);
        tracing::debug!(keyword, hits = titles.len(), ?option, "keyword search");

        if let AdvancedOption::MaxLength(max) = option {
            titles = by_max_length(*max, &titles, &self.info);
        }
        match option {
            AdvancedOption::GroupByAuthor => ResultSet::ByAuthor(group_by_author(&titles, &self.info)),
            AdvancedOption::FilterToAuthor(author) => ResultSet::Titles(filter_to_author(author, &titles, &self.info)),
            AdvancedOption::FilterOutKeyword(kw) => ResultSet::Titles(filter_out_keyword(kw, &titles, &self.keywords)),
            AdvancedOption::FromYear(year) => ResultSet::Titles(filter_by_year(*year, &titles, &self.info)),
            AdvancedOption::None | AdvancedOption::MaxLength(_) => ResultSet::Titles(titles),
        }
    }
}

/// Supplies the full article collection.
pub trait MetadataProvider {
    fn article_metadata(&self) -> Result<Vec<ArticleRecord>>;
}

/// Asks the user what to search for.
pub trait QueryInput {
    fn ask_search_keyword(&mut self) -> Result<String>;
    fn ask_advanced_option(&mut self) -> Result<AdvancedOption>;
}

/// Load metadata, build the indexes, ask for a keyword and an advanced
/// option, and return the filtered result.
pub fn run<P, Q>(provider: &P, input: &mut Q) -> Result<ResultSet>
where
    P: MetadataProvider + ?Sized,
    Q: QueryInput + ?Sized,
{
    let records = provider.article_metadata()?;
    let indexes = SearchIndexes::build(&records);
    let keyword = input.ask_search_keyword()?;
    let option = input.ask_advanced_option()?;
    Ok(indexes.query(&keyword, &option))
}
