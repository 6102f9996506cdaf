use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser, Subcommand};

pub mod commands;
pub mod errors;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Search a folder of PDFs for passages related to a topic
    Search {
        /// Topic to search for. Prompted interactively when omitted.
        query: Option<String>,

        #[clap(flatten)]
        corpus_args: CorpusArgs,

        /// Where to write the JSON results
        #[clap(short, long)]
        output: Option<PathBuf>,

        /// Number of results to return
        #[clap(short = 'k', long)]
        top_k: Option<usize>,

        /// Embedding model name (see `docsift models`)
        #[clap(short, long)]
        model: Option<String>,

        /// Don't print results to the console
        #[clap(long, default_value = "false")]
        no_console: bool,
    },
    /// Print the text units extracted from a folder, without embedding them
    Extract {
        #[clap(flatten)]
        corpus_args: CorpusArgs,
    },
    /// List supported embedding models
    Models {},
}

#[derive(ClapArgs, Debug, Clone)]
pub struct CorpusArgs {
    /// Folder containing the documents
    #[clap(short, long)]
    pub input: Option<PathBuf>,

    /// Minimum words for a text block to be kept
    #[clap(short = 'w', long)]
    pub min_words: Option<usize>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_search() {
        let args = Args::try_parse_from([
            "docsift", "search", "insurance", "-i", "docs", "-k", "3", "--no-console",
        ])
        .unwrap();

        match args.command {
            Command::Search {
                query,
                corpus_args,
                top_k,
                no_console,
                output,
                model,
            } => {
                assert_eq!(query.as_deref(), Some("insurance"));
                assert_eq!(corpus_args.input, Some(PathBuf::from("docs")));
                assert_eq!(top_k, Some(3));
                assert!(no_console);
                assert!(output.is_none());
                assert!(model.is_none());
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_parse_search_without_query() {
        let args = Args::try_parse_from(["docsift", "search"]).unwrap();
        assert!(matches!(args.command, Command::Search { query: None, .. }));
    }

    #[test]
    fn test_parse_extract() {
        let args = Args::try_parse_from(["docsift", "extract", "--min-words", "8"]).unwrap();
        match args.command {
            Command::Extract { corpus_args } => assert_eq!(corpus_args.min_words, Some(8)),
            other => panic!("unexpected command {other:?}"),
        }
    }
}
