use std::sync::Arc;
use std::time::Instant;

use clap::{Parser, Subcommand};
use color_eyre::eyre::eyre;
use indicatif::{ProgressBar, ProgressStyle};
use tokio::sync::mpsc;

use askweb_core::answer::{AnswerSynthesizer, CitationVerifier};
use askweb_core::config::Config;
use askweb_core::graph::{QueryGraph, RunState, Stage};
use askweb_core::llm::{Provider, LLM};
use askweb_core::scrape::PageFetcher;
use askweb_core::search::DuckDuckGoClient;

#[derive(Parser)]
#[command(name = "askweb")]
#[command(about = "Ask the web a question, get a cited and verified answer", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Ask a question
    Ask {
        /// The question to answer
        #[arg(required = true)]
        question: Vec<String>,

        /// Maximum number of search results to scrape
        #[arg(long)]
        max_results: Option<usize>,
    },
    /// Print a default configuration file
    ConfigInit,
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::WARN)
        .with_target(false)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Ask {
            question,
            max_results,
        } => {
            let question = question.join(" ");
            ask(&question, max_results).await?;
        }
        Commands::ConfigInit => {
            print!("{}", Config::default_config_string());
        }
    }

    Ok(())
}

async fn ask(question: &str, max_results: Option<usize>) -> color_eyre::Result<()> {
    let mut config = Config::load()?;
    if let Some(n) = max_results {
        config.search.max_results = n;
    }

    let search = DuckDuckGoClient::new(&config.search, &config.scrape.user_agent)?;
    let fetcher = PageFetcher::new(&config.scrape)?;
    let llm: Arc<dyn LLM> = Arc::from(Provider::from_config(&config.llm).build()?);

    let graph = QueryGraph::new(
        search,
        fetcher,
        AnswerSynthesizer::new(Arc::clone(&llm)),
        CitationVerifier::new(llm),
    )
    .with_max_results(config.search.max_results)
    .with_scrape_config(config.scrape.clone());

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.enable_steady_tick(std::time::Duration::from_millis(100));
    spinner.set_message(Stage::GetLinks.display_name());

    let started = Instant::now();
    let (tx, mut rx) = mpsc::unbounded_channel();

    let graph = Arc::new(graph);
    let handle = tokio::spawn({
        let graph = Arc::clone(&graph);
        let question = question.to_string();
        async move { graph.run(&question, tx).await }
    });

    let mut links_shown = false;
    while let Some(snapshot) = rx.recv().await {
        render_progress(&spinner, &snapshot, &mut links_shown);
    }

    spinner.finish_and_clear();
    let final_state = handle.await??;

    render_final(&final_state, started)?;
    Ok(())
}

fn render_progress(spinner: &ProgressBar, snapshot: &RunState, links_shown: &mut bool) {
    spinner.set_message(snapshot.stage.display_name());

    if !*links_shown && !snapshot.links.is_empty() {
        *links_shown = true;
        spinner.suspend(|| {
            println!("Found {} source(s):", snapshot.links.len());
            for link in &snapshot.links {
                println!("  {link}");
            }
            println!();
        });
    }
}

fn render_final(state: &RunState, started: Instant) -> color_eyre::Result<()> {
    let answer = state
        .answer
        .as_ref()
        .ok_or_else(|| eyre!("run finished without an answer"))?;

    println!("{}", answer.text);
    println!();

    if let Some(status) = state.status {
        println!("Citation check: {status}");
    }

    let latency = started.elapsed().as_secs_f64();
    println!(
        "Latency: {latency:.2}s | Tokens: {} in / {} out / {} total",
        answer.usage.input_tokens, answer.usage.output_tokens, answer.usage.total_tokens
    );

    Ok(())
}
