//! Train a knowledge base: load a document, chunk it, embed and store.

use anyhow::{bail, Context, Result};
use tracing::info;

use crate::config::Config;
use crate::knowledge::{loader, Chunker, EmbeddingService, VectorStore};

/// Chunks embedded per OpenAI request.
const EMBED_BATCH_SIZE: usize = 100;

/// Result of one training run.
#[derive(Debug)]
pub struct TrainResult {
    pub collection: String,
    pub chunks_stored: usize,
    pub points_total: u64,
}

/// Load `source` (a URL or a local JSON file), split it into chunks and
/// upsert the embedded chunks into the named collection.
pub async fn run(config: &Config, source: &str, collection: &str) -> Result<TrainResult> {
    if collection.trim().is_empty() {
        bail!("Collection name must not be empty");
    }

    let text = load_source(source).await?;
    if text.trim().is_empty() {
        bail!("Document at {} contains no text", source);
    }

    let chunker = Chunker::new(config.chunk_size, config.chunk_overlap);
    let chunks = chunker.chunk(&text, source);
    info!("Split document into {} chunks", chunks.len());

    let embeddings = EmbeddingService::with_model(
        config.openai_api_key.clone(),
        config.embedding_model.clone(),
    )?;
    let store = VectorStore::with_dimension(&config.qdrant_url, collection, embeddings.dimension())
        .await
        .context("Failed to connect to Qdrant")?;
    store.init_collection().await?;

    let mut stored = 0;
    for batch in chunks.chunks(EMBED_BATCH_SIZE) {
        let texts: Vec<String> = batch.iter().map(|c| c.text.clone()).collect();
        let vectors = embeddings.embed_batch(&texts).await?;

        let points: Vec<_> = batch
            .iter()
            .cloned()
            .zip(vectors)
            .filter(|(_, v)| !v.is_empty())
            .collect();

        stored += store.upsert_chunks(&points).await?;
        println!("Indexed {}/{} chunks", stored, chunks.len());
    }

    let stats = store.stats().await?;
    info!(
        "Collection {} now holds {} points",
        collection, stats.points_count
    );

    Ok(TrainResult {
        collection: collection.to_string(),
        chunks_stored: stored,
        points_total: stats.points_count,
    })
}

async fn load_source(source: &str) -> Result<String> {
    if source.starts_with("http://") || source.starts_with("https://") {
        let http = reqwest::Client::builder()
            .user_agent("slack_reader/0.1.0")
            .build()
            .context("Failed to build HTTP client")?;
        loader::load_url(&http, source).await
    } else {
        loader::load_json_file(source)
    }
}
