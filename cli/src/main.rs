use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use search_core::{run, AdvancedOption, BundledMetadata, FileMetadata, MetadataProvider, QueryInput, ResultSet, SearchIndexes};
use std::io::{self, Write};
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};

mod prompt;

use prompt::Prompt;

#[derive(Parser)]
#[command(name = "article-search")]
#[command(about = "Keyword search over article metadata with advanced filters", long_about = None)]
struct Cli {
    /// Metadata file or directory (.json / .jsonl). Falls back to $ARTICLE_DATA, then the bundled sample
    #[arg(long, global = true)]
    data: Option<PathBuf>,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Prompt for a keyword and an advanced option (default)
    Interactive,
    /// Run one query from flags
    Search {
        /// Keyword to search for (exact, case-sensitive)
        #[arg(long)]
        keyword: String,
        #[command(flatten)]
        filter: FilterArgs,
        /// Print the result as JSON
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// List every keyword with its article count
    Keywords,
}

#[derive(Args)]
#[group(multiple = false)]
struct FilterArgs {
    /// Keep articles no longer than this many characters
    #[arg(long)]
    max_length: Option<u64>,
    /// Group the result by author
    #[arg(long, default_value_t = false)]
    group_by_author: bool,
    /// Keep articles by this author only
    #[arg(long)]
    author: Option<String>,
    /// Drop articles that also list this keyword
    #[arg(long)]
    exclude: Option<String>,
    /// Keep articles published in this year (UTC)
    #[arg(long)]
    year: Option<i32>,
}

impl FilterArgs {
    fn into_option(self) -> AdvancedOption {
        if let Some(max) = self.max_length {
            AdvancedOption::MaxLength(max)
        } else if self.group_by_author {
            AdvancedOption::GroupByAuthor
        } else if let Some(author) = self.author {
            AdvancedOption::FilterToAuthor(author)
        } else if let Some(keyword) = self.exclude {
            AdvancedOption::FilterOutKeyword(keyword)
        } else if let Some(year) = self.year {
            AdvancedOption::FromYear(year)
        } else {
            AdvancedOption::None
        }
    }
}

/// Query input taken from command-line flags.
struct FlagInput {
    keyword: Option<String>,
    option: Option<AdvancedOption>,
}

impl QueryInput for FlagInput {
    fn ask_search_keyword(&mut self) -> Result<String> {
        Ok(self.keyword.take().unwrap_or_default())
    }

    fn ask_advanced_option(&mut self) -> Result<AdvancedOption> {
        Ok(self.option.take().unwrap_or_default())
    }
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).with_writer(io::stderr).init();
    let cli = Cli::parse();
    let provider = metadata_provider(cli.data);

    match cli.command.unwrap_or(Commands::Interactive) {
        Commands::Interactive => {
            let stdin = io::stdin();
            let mut input = Prompt::new(stdin.lock(), io::stdout());
            let result = run(provider.as_ref(), &mut input)?;
            display_result(&mut io::stdout().lock(), &result, false)
        }
        Commands::Search { keyword, filter, json } => {
            let mut input = FlagInput { keyword: Some(keyword), option: Some(filter.into_option()) };
            let result = run(provider.as_ref(), &mut input)?;
            display_result(&mut io::stdout().lock(), &result, json)
        }
        Commands::Keywords => list_keywords(&mut io::stdout().lock(), provider.as_ref()),
    }
}

fn metadata_provider(data: Option<PathBuf>) -> Box<dyn MetadataProvider> {
    let path = data.or_else(|| std::env::var_os("ARTICLE_DATA").map(PathBuf::from));
    match path {
        Some(path) => {
            tracing::debug!(path = %path.display(), "using metadata from disk");
            Box::new(FileMetadata::new(path))
        }
        None => Box::new(BundledMetadata),
    }
}

fn display_result<W: Write>(out: &mut W, result: &ResultSet, json: bool) -> Result<()> {
    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(result)?)?;
    } else {
        writeln!(out)?;
        writeln!(out, "{result}")?;
    }
    Ok(())
}

/// One `keyword<TAB>count` line per keyword, sorted by keyword.
fn list_keywords<W: Write>(out: &mut W, provider: &dyn MetadataProvider) -> Result<()> {
    let records = provider.article_metadata()?;
    let indexes = SearchIndexes::build(&records);
    let mut keywords: Vec<(&str, usize)> = indexes.keywords.iter().map(|(k, titles)| (k, titles.len())).collect();
    keywords.sort_unstable_by(|a, b| a.0.cmp(b.0));
    for (keyword, count) in keywords {
        writeln!(out, "{keyword}\t{count}")?;
    }
    Ok(())
}
