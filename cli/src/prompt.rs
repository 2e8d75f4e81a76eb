use anyhow::{anyhow, bail, Context, Result};
use search_core::{AdvancedOption, QueryInput};
use std::io::{BufRead, Write};

/// Line-oriented prompt over any reader/writer pair, normally stdin/stdout.
pub struct Prompt<R, W> {
    reader: R,
    writer: W,
}

impl<R: BufRead, W: Write> Prompt<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    fn ask(&mut self, question: &str) -> Result<String> {
        write!(self.writer, "{question}")?;
        self.writer.flush()?;
        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            bail!("input closed before answering: {}", question.trim_end());
        }
        Ok(line.trim().to_string())
    }
}

impl<R: BufRead, W: Write> QueryInput for Prompt<R, W> {
    fn ask_search_keyword(&mut self) -> Result<String> {
        let keyword = self.ask("Enter a keyword to search for: ")?;
        if keyword.is_empty() {
            tracing::warn!("empty search keyword");
        }
        Ok(keyword)
    }

    fn ask_advanced_option(&mut self) -> Result<AdvancedOption> {
        writeln!(self.writer)?;
        writeln!(self.writer, "Advanced search options:")?;
        for (i, label) in AdvancedOption::MENU.iter().enumerate() {
            writeln!(self.writer, "  {}. {label}", i + 1)?;
        }
        let raw = self.ask("Choose an option [6]: ")?;
        let choice: u8 = if raw.is_empty() {
            6
        } else {
            raw.parse().map_err(|_| anyhow!("not an option number: {raw}"))?
        };

        let value = if AdvancedOption::choice_needs_value(choice) {
            let question = match choice {
                1 => "Maximum article length: ",
                3 => "Author: ",
                4 => "Keyword to exclude: ",
                _ => "Year: ",
            };
            Some(self.ask(question)?)
        } else {
            None
        };
        AdvancedOption::from_choice(choice, value.as_deref()).context("invalid advanced option")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn prompt(input: &str) -> Prompt<Cursor<Vec<u8>>, Vec<u8>> {
        Prompt::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    #[test]
    fn reads_keyword_and_option_with_value() {
        let mut p = prompt("dog\n3\nMr Jake\n");
        assert_eq!(p.ask_search_keyword().unwrap(), "dog");
        assert_eq!(p.ask_advanced_option().unwrap(), AdvancedOption::FilterToAuthor("Mr Jake".into()));
        let shown = String::from_utf8(p.writer).unwrap();
        assert!(shown.contains("2. Articles grouped by author"));
        assert!(shown.ends_with("Author: "));
    }

    #[test]
    fn blank_choice_means_no_filter() {
        let mut p = prompt("\n");
        assert_eq!(p.ask_advanced_option().unwrap(), AdvancedOption::None);
    }

    #[test]
    fn option_without_value_does_not_ask_again() {
        let mut p = prompt("2\nleftover\n");
        assert_eq!(p.ask_advanced_option().unwrap(), AdvancedOption::GroupByAuthor);
    }

    #[test]
    fn closed_input_is_an_error() {
        let mut p = prompt("5\n");
        assert!(p.ask_advanced_option().is_err());
        assert!(prompt("").ask_search_keyword().is_err());
    }

    #[test]
    fn non_numeric_choice_is_an_error() {
        assert!(prompt("two\n").ask_advanced_option().is_err());
    }
}
