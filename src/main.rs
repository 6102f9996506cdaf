use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod app;
mod cli;
mod config;
mod document;
mod output;
mod semantic;
mod storage;
#[cfg(test)]
mod tests;

use app::AppFactory;
use cli::commands::{ExtractCommand, ModelsCommand, SearchCommand, SearchCommandParams};
use cli::CorpusArgs;
use document::PdfParser;

fn init_logging() {
    // log records from library code are forwarded by the subscriber
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() -> anyhow::Result<()> {
    init_logging();

    let args = cli::Args::parse();

    let base_path = AppFactory::get_base_path()?;
    let mut config = AppFactory::create_config(&base_path)?;
    let parser = PdfParser::new();

    match args.command {
        cli::Command::Search {
            query,
            corpus_args: CorpusArgs { input, min_words },
            output,
            top_k,
            model,
            no_console,
        } => {
            if let Some(model) = model {
                config.embedding.model = model;
                config.validate().context("Invalid --model")?;
            }

            let params = SearchCommandParams {
                query,
                input,
                min_words,
                output,
                top_k,
                no_console,
            };
            let command = SearchCommand::new(params, &config)?;
            command.execute(&parser, || AppFactory::create_provider(&config))?;
            Ok(())
        }

        cli::Command::Extract {
            corpus_args: CorpusArgs { input, min_words },
        } => {
            let command = ExtractCommand::new(&config, input, min_words)?;
            command.execute(&parser)?;
            Ok(())
        }

        cli::Command::Models {} => {
            ModelsCommand::execute(&config)?;
            Ok(())
        }
    }
}
