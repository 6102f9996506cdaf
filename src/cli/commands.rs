use std::io::Write;
use std::path::PathBuf;

use crate::{
    cli::errors::{CliError, CliResult},
    config::Config,
    document::{self, DocumentParser, LoadedCorpus, TextUnit, UnitExtractor},
    output,
    semantic::{EmbeddingError, EmbeddingProvider, RankedResult, Ranker, SearchPipeline},
};

const QUERY_PROMPT: &str = "Enter a topic to search (e.g., AI, insurance, pesticide):";

/// Where the search query comes from
#[derive(Debug, Clone)]
pub enum QuerySource {
    /// Given on the command line (or by a test)
    Provided(String),
    /// Read from the terminal once the corpus is embedded
    Interactive,
}

impl QuerySource {
    pub fn obtain(&self) -> CliResult<String> {
        let raw = match self {
            Self::Provided(query) => query.clone(),
            Self::Interactive => inquire::Text::new(QUERY_PROMPT)
                .prompt()
                .map_err(|e| CliError::invalid_input(e.to_string()))?,
        };

        let query = raw.trim();
        if query.is_empty() {
            return Err(CliError::invalid_input("query cannot be empty"));
        }
        Ok(query.to_string())
    }
}

/// Settings shared by commands that read the document folder
#[derive(Debug, Clone)]
pub struct CorpusSettings {
    pub input_dir: PathBuf,
    pub min_words: usize,
    pub skip_unreadable: bool,
}

impl CorpusSettings {
    pub fn new(config: &Config, input: Option<PathBuf>, min_words: Option<usize>) -> CliResult<Self> {
        let min_words = min_words.unwrap_or(config.min_words);
        if min_words == 0 {
            return Err(CliError::invalid_input("min-words must be at least 1"));
        }

        Ok(Self {
            input_dir: input.unwrap_or_else(|| config.input_dir.clone()),
            min_words,
            skip_unreadable: config.skip_unreadable,
        })
    }

    /// Load the folder, reporting progress on `out`.
    pub fn load(&self, parser: &dyn DocumentParser, out: &mut dyn Write) -> CliResult<LoadedCorpus> {
        let extractor = UnitExtractor::new(self.min_words);
        Ok(document::load_corpus(
            &self.input_dir,
            parser,
            &extractor,
            self.skip_unreadable,
            out,
        )?)
    }
}

/// Parameters for creating a search command
#[derive(Debug, Clone)]
pub struct SearchCommandParams {
    pub query: Option<String>,
    pub input: Option<PathBuf>,
    pub min_words: Option<usize>,
    pub output: Option<PathBuf>,
    pub top_k: Option<usize>,
    pub no_console: bool,
}

/// Command for running one semantic search over a folder
#[derive(Debug, Clone)]
pub struct SearchCommand {
    pub query: QuerySource,
    pub corpus: CorpusSettings,
    pub output_file: PathBuf,
    pub top_k: usize,
    pub preview_chars: usize,
    pub print_console: bool,
}

impl SearchCommand {
    pub fn new(params: SearchCommandParams, config: &Config) -> CliResult<Self> {
        let top_k = params.top_k.unwrap_or(config.top_k);
        if top_k == 0 {
            return Err(CliError::invalid_input("top-k must be at least 1"));
        }

        let query = match params.query {
            Some(query) => QuerySource::Provided(query),
            None => QuerySource::Interactive,
        };

        Ok(Self {
            query,
            corpus: CorpusSettings::new(config, params.input, params.min_words)?,
            output_file: params.output.unwrap_or_else(|| config.output_file.clone()),
            top_k,
            preview_chars: config.preview_chars,
            print_console: !params.no_console,
        })
    }

    /// Extract, embed, ask for the query, rank, save.
    ///
    /// The provider is only created once the folder yielded at least one
    /// unit, so an empty corpus never triggers a model download.
    pub fn execute<F>(self, parser: &dyn DocumentParser, make_provider: F) -> CliResult<Vec<RankedResult>>
    where
        F: FnOnce() -> Result<Box<dyn EmbeddingProvider>, EmbeddingError>,
    {
        let loaded = self.corpus.load(parser, &mut std::io::stdout())?;
        println!(
            "Extracted {} paragraphs from {} document(s) in {}.",
            loaded.units.len(),
            loaded.documents,
            self.corpus.input_dir.display()
        );

        let provider = make_provider()?;
        let pipeline = SearchPipeline::new(provider.as_ref(), Ranker::new(self.top_k));
        let corpus = pipeline.index(loaded.units)?;

        let query = self.query.obtain()?;
        let results = pipeline.search(&corpus, &query)?;

        output::write_results(&self.output_file, &results)?;

        if self.print_console {
            print!("{}", output::render_console(&results, self.preview_chars));
        }
        println!("\nResults saved to: {}", self.output_file.display());

        Ok(results)
    }
}

/// Command for dumping extracted units
#[derive(Debug, Clone)]
pub struct ExtractCommand {
    pub corpus: CorpusSettings,
}

impl ExtractCommand {
    pub fn new(config: &Config, input: Option<PathBuf>, min_words: Option<usize>) -> CliResult<Self> {
        Ok(Self {
            corpus: CorpusSettings::new(config, input, min_words)?,
        })
    }

    pub fn execute(self, parser: &dyn DocumentParser) -> CliResult<Vec<TextUnit>> {
        // stdout carries the JSON dump
        let units = self.corpus.load(parser, &mut std::io::stderr())?.units;
        let json = output::to_json(&units)?;
        println!("{}", String::from_utf8_lossy(&json));
        Ok(units)
    }
}

/// Command for listing embedding models
pub struct ModelsCommand;

impl ModelsCommand {
    pub fn execute(config: &Config) -> CliResult<()> {
        for name in crate::semantic::SUPPORTED_MODELS {
            if name.eq_ignore_ascii_case(&config.embedding.model) {
                println!("{name} (configured)");
            } else {
                println!("{name}");
            }
        }
        Ok(())
    }
}
