use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rag::{classify, find_templates, index_corpus, open_processor, Config, Intent, RagProcessor};
use tokio::io::AsyncBufReadExt;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "mentorbot", about = "Mentor bot for the short-term rental business")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Build the embedding index from the corpus directory
    Index,
    /// Ask a single question and print the grounded answer
    Ask { question: String },
    /// Interactive chat loop (default)
    Chat,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let cfg = Config::from_env().context("invalid configuration")?;

    match cli.command.unwrap_or(Command::Chat) {
        Command::Index => {
            // Blocking HTTP must stay off the async runtime.
            let build_cfg = cfg.clone();
            let summary = tokio::task::spawn_blocking(move || index_corpus(&build_cfg))
                .await
                .context("index worker panicked")??;
            match summary {
                Some(summary) => println!(
                    "Indexed {} documents into {} chunks.",
                    summary.documents, summary.chunks
                ),
                None => println!("No documents found; index not built."),
            }
        }
        Command::Ask { question } => {
            let processor = Arc::new(open_processor(&cfg)?);
            let answer = dispatch(processor, question).await?;
            println!("{answer}");
        }
        Command::Chat => run_chat(cfg).await?,
    }
    Ok(())
}

async fn run_chat(cfg: Config) -> Result<()> {
    // Missing index or bad config is fatal here, before any message is read.
    let processor = Arc::new(open_processor(&cfg)?);
    println!(
        "Привет! 👋 Я твой бот-наставник по посуточной аренде.\n\
         Задай вопрос текстом или попроси шаблон (Ctrl-D для выхода)."
    );

    let mut lines = tokio::io::BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let message = line.trim();
        if message.is_empty() {
            continue;
        }
        match classify(message) {
            Intent::TemplateRequest { keywords } if keywords.is_empty() => {
                println!(
                    "Пожалуйста, уточните, какой именно шаблон вам нужен \
                     (например, 'шаблон вакансии менеджера')."
                );
            }
            Intent::TemplateRequest { keywords } => {
                let found = find_templates(Path::new(&cfg.templates_dir), &keywords);
                if found.is_empty() {
                    println!(
                        "К сожалению, не нашел шаблонов по запросу '{message}'. \
                         Попробуйте другие ключевые слова."
                    );
                } else {
                    println!("Нашел следующие шаблоны по вашему запросу:");
                    for path in found {
                        println!("  {}", path.display());
                    }
                }
            }
            Intent::OpenQuestion(question) => {
                println!("Получил ваш вопрос, сейчас подумаю... 🤔");
                let answer = dispatch(processor.clone(), question).await?;
                println!("{answer}");
            }
        }
    }
    Ok(())
}

/// The retrieval+generation sequence is blocking and latency-heavy, so it
/// runs on the blocking worker pool while the event loop stays free.
async fn dispatch(processor: Arc<RagProcessor>, question: String) -> Result<String> {
    tokio::task::spawn_blocking(move || processor.answer(&question))
        .await
        .context("answer worker panicked")
}
