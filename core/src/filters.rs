//! Advanced filters applied to a keyword search result.
//!
//! Every filter is a pure function: it borrows the current title list and the
//! indexes and returns a new value. Titles absent from the info index are
//! skipped rather than treated as errors.

use crate::{InfoIndex, KeywordIndex};
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::fmt;
use time::{Date, Month};

const SECONDS_PER_DAY: i64 = 86_400;

/// Titles grouped by author. Authors keep the order in which they first
/// appear in the grouped list, titles keep their relative order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthorGroups {
    groups: Vec<(String, Vec<String>)>,
}

impl AuthorGroups {
    pub fn get(&self, author: &str) -> Option<&[String]> {
        self.groups.iter().find(|(a, _)| a == author).map(|(_, titles)| titles.as_slice())
    }

    pub fn authors(&self) -> impl Iterator<Item = &str> {
        self.groups.iter().map(|(a, _)| a.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.groups.iter().map(|(a, t)| (a.as_str(), t.as_slice()))
    }

    pub fn is_empty(&self) -> bool { self.groups.is_empty() }

    pub fn into_titles(self, author: &str) -> Vec<String> {
        self.groups.into_iter().find(|(a, _)| a == author).map(|(_, titles)| titles).unwrap_or_default()
    }

    fn push(&mut self, author: &str, title: String) {
        match self.groups.iter_mut().find(|(a, _)| a == author) {
            Some((_, titles)) => titles.push(title),
            None => self.groups.push((author.to_string(), vec![title])),
        }
    }
}

impl Serialize for AuthorGroups {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.groups.len()))?;
        for (author, titles) in &self.groups {
            map.serialize_entry(author, titles)?;
        }
        map.end()
    }
}

impl fmt::Display for AuthorGroups {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (author, titles)) in self.groups.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{author:?}: {titles:?}")?;
        }
        f.write_str("}")
    }
}

/// Keep titles whose recorded length is at most `max_length`.
pub fn by_max_length(max_length: u64, titles: &[String], info_index: &InfoIndex) -> Vec<String> {
    titles
        .iter()
        .filter(|t| info_index.get(t).is_some_and(|info| info.length <= max_length))
        .cloned()
        .collect()
}

pub fn group_by_author(titles: &[String], info_index: &InfoIndex) -> AuthorGroups {
    let mut groups = AuthorGroups::default();
    for title in titles {
        match info_index.get(title) {
            Some(info) => groups.push(&info.author, title.clone()),
            None => tracing::warn!(title = %title, "title missing from info index"),
        }
    }
    groups
}

/// Titles written by `author`; empty when the author wrote none of them.
pub fn filter_to_author(author: &str, titles: &[String], info_index: &InfoIndex) -> Vec<String> {
    group_by_author(titles, info_index).into_titles(author)
}

/// Drop titles that also list `keyword`.
///
/// When `keyword` is not in the index at all the result is empty, the same
/// absent-key policy [`search`](crate::search::search) applies. This is kept as
/// observed behavior rather than treated as a no-op filter.
pub fn filter_out_keyword(keyword: &str, titles: &[String], keyword_index: &KeywordIndex) -> Vec<String> {
    let Some(excluded) = keyword_index.get(keyword) else {
        tracing::debug!(keyword, "exclusion keyword not in index, result emptied");
        return Vec::new();
    };
    titles.iter().filter(|t| !excluded.contains(t)).cloned().collect()
}

/// Keep titles published during `year`, using UTC year boundaries.
pub fn filter_by_year(year: i32, titles: &[String], info_index: &InfoIndex) -> Vec<String> {
    let Some((start, end)) = year_bounds(year) else {
        tracing::warn!(year, "year outside supported calendar range");
        return Vec::new();
    };
    titles
        .iter()
        .filter(|t| info_index.get(t).is_some_and(|info| (start..end).contains(&info.timestamp)))
        .cloned()
        .collect()
}

/// Half-open `[start, end)` epoch-second range covering `year` in UTC.
pub fn year_bounds(year: i32) -> Option<(i64, i64)> {
    let first_day = Date::from_calendar_date(year, Month::January, 1).ok()?;
    let start = first_day.midnight().assume_utc().unix_timestamp();
    let end = start + i64::from(time::util::days_in_year(year)) * SECONDS_PER_DAY;
    Some((start, end))
}
