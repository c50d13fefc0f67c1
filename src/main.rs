use anyhow::Result;
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ragserve::{select_knobs, Knobs, Pipeline, ServeConfig, Timings};

#[derive(Parser)]
#[command(name = "ragserve")]
#[command(about = "Adaptive RAG request-serving pipeline simulator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a traffic trace through the pipeline
    Replay {
        /// Questions to serve (defaults to the built-in trace)
        questions: Vec<String>,

        /// Per-request latency budget in milliseconds
        #[arg(long, default_value = "40.0")]
        budget_ms: f64,

        /// Retrieval cache capacity (entries)
        #[arg(long, default_value = "512")]
        retrieval_cache: usize,

        /// Fragment cache capacity (entries)
        #[arg(long, default_value = "4096")]
        fragment_cache: usize,

        /// Emit one JSON record per request instead of text
        #[arg(long)]
        json: bool,
    },
}

/// Built-in trace; repeats two questions to exercise the cache-hit path
fn default_traffic() -> Vec<String> {
    [
        "what is rag latency?",
        "how to reduce rag cost?",
        "what is rag latency?",
        "explain caching in rag",
        "how to reduce rag cost?",
        "what is ragserve vs rago?",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

#[derive(Serialize)]
struct RequestRecord<'a> {
    request: usize,
    question: &'a str,
    knobs: Knobs,
    timings: &'a Timings,
}

async fn replay(
    questions: Vec<String>,
    budget_ms: f64,
    retrieval_cache: usize,
    fragment_cache: usize,
    json: bool,
) -> Result<()> {
    let config = ServeConfig::builder()
        .retrieval_cache_entries(retrieval_cache)
        .fragment_cache_entries(fragment_cache)
        .latency_budget_ms(budget_ms)
        .build();
    let mut pipeline = Pipeline::new(config)?;

    let questions = if questions.is_empty() {
        default_traffic()
    } else {
        questions
    };

    // Seed observations for the first request's knob selection
    let mut last_retrieval_ms = 8.0;
    let mut last_gen_ms = 18.0;

    for (i, question) in questions.iter().enumerate() {
        let knobs = select_knobs(budget_ms, last_retrieval_ms, last_gen_ms);

        if !json {
            println!(
                "\n--- request {} | top_k={} batch={} cheap_mode={} ---",
                i + 1,
                knobs.top_k,
                knobs.batch,
                if knobs.cheap_mode { "on" } else { "off" }
            );
        }

        let served = pipeline.serve(question, &knobs).await?;

        if json {
            let record = RequestRecord {
                request: i + 1,
                question,
                knobs,
                timings: &served.timings,
            };
            println!("{}", serde_json::to_string(&record)?);
        } else {
            println!("{}", served.answer);
            println!(
                "timing(ms): e2e={:.1} retr={:.1} ctx={:.1} gen={:.1} cache_hit={}",
                served.timings.e2e_ms,
                served.timings.retrieval_ms,
                served.timings.context_ms,
                served.timings.gen_ms,
                if served.timings.cache_hit { "yes" } else { "no" }
            );
        }

        last_retrieval_ms = served.timings.retrieval_ms;
        last_gen_ms = served.timings.gen_ms;
    }

    if !json {
        let retrieval = pipeline.retrieval_cache_stats();
        let fragment = pipeline.fragment_cache_stats();
        println!("\nretrieval cache: {}", retrieval);
        println!("fragment cache:  {}", fragment);
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "ragserve=info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Replay {
            questions,
            budget_ms,
            retrieval_cache,
            fragment_cache,
            json,
        } => {
            replay(questions, budget_ms, retrieval_cache, fragment_cache, json).await?;
        }
    }

    Ok(())
}
