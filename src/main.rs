use std::sync::Arc;

use clap::{Parser, ValueEnum};

use ragcore::infrastructure::establish_connection;
use ragcore::{
    DEFAULT_MAX_CONTENT_LENGTH, DenseRetriever, HttpEmbeddingProvider, PgChunkStore,
    ResultsReport, RetrievalConfig, SearchParams, Settings, SparseRetriever, TableNames,
    format_summary,
};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Retriever {
    Dense,
    Sparse,
}

/// Search the document store for chunks relevant to a question.
#[derive(Debug, Parser)]
#[command(name = "ragcore", version)]
struct Cli {
    /// The question to search for
    question: String,

    #[arg(long, value_enum, default_value_t = Retriever::Dense)]
    retriever: Retriever,

    /// Number of rows fetched before thresholding
    #[arg(long)]
    top_k: Option<usize>,

    /// Minimum similarity (0.4 dense, 0.3 sparse when omitted)
    #[arg(long)]
    threshold: Option<f64>,

    /// Rows returned by the fallback when too few pass the threshold
    #[arg(long)]
    min_results: Option<usize>,

    #[arg(long, default_value_t = DEFAULT_MAX_CONTENT_LENGTH)]
    max_content_length: usize,
}

impl Cli {
    fn params(&self) -> SearchParams {
        let mut params = match self.retriever {
            Retriever::Dense => SearchParams::dense(),
            Retriever::Sparse => SearchParams::sparse(),
        };
        if let Some(top_k) = self.top_k {
            params = params.with_top_k(top_k);
        }
        if let Some(threshold) = self.threshold {
            params = params.with_similarity_threshold(threshold);
        }
        if let Some(min_results) = self.min_results {
            params = params.with_min_results(min_results);
        }
        params
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let cli = Cli::parse();
    let settings = Settings::from_env()?;
    let dimensions = settings.embedding.dimensions;

    let mut conn = establish_connection(&settings.database)?;
    let store = PgChunkStore::new(&mut conn, TableNames::for_dimensions(dimensions));

    let results = match cli.retriever {
        Retriever::Dense => {
            let provider = HttpEmbeddingProvider::from_settings(&settings.embedding)?;
            let config = RetrievalConfig::new(Arc::new(provider), dimensions);
            DenseRetriever::new(store, config)
                .search(&cli.question, cli.params())
                .await?
        }
        Retriever::Sparse => SparseRetriever::new(store).search(&cli.question, cli.params())?,
    };

    print!("{}", format_summary(results.len()));
    print!("{}", ResultsReport::new(&results, cli.max_content_length));

    Ok(())
}
