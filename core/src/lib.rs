pub mod filters;
pub mod index;
pub mod metadata;
pub mod query;
pub mod search;

pub use filters::AuthorGroups;
pub use index::{build_info_index, build_keyword_index, ArticleInfo, ArticleRecord, InfoIndex, KeywordIndex};
pub use metadata::{BundledMetadata, FileMetadata};
pub use query::{run, AdvancedOption, MetadataProvider, QueryInput, ResultSet, SearchIndexes};
pub use search::search;
