//! Answer a question against a trained knowledge base.

use anyhow::{bail, Context, Result};
use tracing::{debug, info};

use crate::config::Config;
use crate::integrations::OpenAIClient;
use crate::knowledge::{EmbeddingService, VectorStore};

/// Retrieved chunks fed to the model per question.
const SEARCH_LIMIT: u64 = 4;

/// Embed the question, search the collection and ask the chat model.
pub async fn run(config: &Config, collection: &str, question: &str) -> Result<String> {
    if question.trim().is_empty() {
        bail!("Question must not be empty");
    }

    let embeddings = EmbeddingService::with_model(
        config.openai_api_key.clone(),
        config.embedding_model.clone(),
    )?;
    let query_embedding = embeddings.embed(question).await?;

    let store = VectorStore::with_dimension(&config.qdrant_url, collection, embeddings.dimension())
        .await
        .context("Failed to connect to Qdrant")?;
    let hits = store.search(query_embedding, SEARCH_LIMIT).await?;
    info!("Retrieved {} chunks from {}", hits.len(), collection);

    for hit in &hits {
        debug!("Context chunk (score {:.3}): {}", hit.score, hit.source);
    }

    let context: Vec<String> = hits.into_iter().map(|h| h.text).collect();

    let openai = OpenAIClient::new(config.openai_api_key.clone())?;
    let answer = openai
        .answer_with_context(
            question,
            &context,
            &config.openai_model,
            config.openai_temperature,
            config.openai_max_tokens,
        )
        .await?;

    Ok(answer)
}
