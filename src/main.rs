//! Gamesight CLI binary entry point.

use clap::Parser;
use uuid::Uuid;

use gamesight::agent::{AgentClient, InvokeRequest, RationaleObserver};
use gamesight::chart::ChartClient;
use gamesight::cli::{AskArgs, Cli, Commands, ResultsArgs};
use gamesight::config::GamesightConfig;
use gamesight::render;
use gamesight::store::QueryStoreClient;
use gamesight::types::{Answer, ChartResult, QueryResult};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Ask(args) => handle_ask(args).await,
        Commands::Results(args) => handle_results(args).await,
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

/// Prints each rationale as it streams in.
struct PrintObserver;

impl RationaleObserver for PrintObserver {
    fn rationale(&mut self, text: &str) {
        println!("  … {text}");
    }
}

async fn handle_ask(args: AskArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = GamesightConfig::from_env();
    let agent = AgentClient::new(&config)?;

    let session_id = args
        .session
        .unwrap_or_else(|| Uuid::new_v4().to_string());
    let query_id = Uuid::new_v4().to_string();

    let request = InvokeRequest::builder()
        .session_id(session_id)
        .input_text(args.question.as_str())
        .maybe_user_name(args.user)
        .query_id(query_id.as_str())
        .build();

    let mut observer = PrintObserver;
    let invocation = agent.invoke(request, &mut observer).await?;

    let query_results = fetch_query_results(&config, &query_id).await;
    let answer = invocation.into_answer(query_results);

    println!("{}", render::answer_details(&args.question, &answer));
    println!("{}", render::query_results(&answer));
    println!(
        "Tokens: {} in / {} out",
        answer.total_input_tokens, answer.total_output_tokens
    );

    if !args.no_chart {
        print_chart(&config, &answer).await?;
    }

    Ok(())
}

async fn handle_results(args: ResultsArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = GamesightConfig::from_env();
    let store = QueryStoreClient::new(&config)?;
    let results = store.fetch_results(&args.query_id).await?;

    if results.is_empty() {
        println!("No stored results for {}", args.query_id);
        return Ok(());
    }
    for result in &results {
        println!("{}", render::query_result(result));
    }
    Ok(())
}

/// A lookup failure leaves the answer without query results; the answer
/// itself still renders.
async fn fetch_query_results(config: &GamesightConfig, query_id: &str) -> Vec<QueryResult> {
    let store = match QueryStoreClient::new(config) {
        Ok(store) => store,
        Err(e) => {
            eprintln!("warning: query store not configured: {e}");
            return Vec::new();
        }
    };
    match store.fetch_results(query_id).await {
        Ok(results) => results,
        Err(e) => {
            eprintln!("warning: could not fetch query results: {e}");
            Vec::new()
        }
    }
}

async fn print_chart(
    config: &GamesightConfig,
    answer: &Answer,
) -> Result<(), Box<dyn std::error::Error>> {
    let chart = ChartClient::new(config)?;
    match chart.generate(answer).await {
        ChartResult::Chart(spec) => {
            println!("Chart ({}): {}", spec.chart_type, spec.caption);
            println!("{}", serde_json::to_string_pretty(&spec.chart_configuration)?);
        }
        ChartResult::NoChart { rationale } => {
            println!("No chart: {rationale}");
        }
    }
    Ok(())
}
