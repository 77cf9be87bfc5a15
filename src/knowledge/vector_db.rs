//! Vector database integration with Qdrant

use anyhow::Result;
use qdrant_client::qdrant::{
    CreateCollectionBuilder, Distance, PointStruct, SearchPointsBuilder, UpsertPointsBuilder,
    Value as QdrantValue, VectorParamsBuilder,
};
use qdrant_client::Qdrant;
use std::collections::HashMap;
use tracing::{debug, info};

use super::chunker::Chunk;

/// Vector store backed by Qdrant.
///
/// Each trained knowledge base lives in its own named collection; the
/// collection to operate on is fixed at construction.
pub struct VectorStore {
    client: Qdrant,
    collection: String,
    dimension: usize,
}

impl VectorStore {
    /// Connect to Qdrant server
    pub async fn new(url: &str, collection: impl Into<String>) -> Result<Self> {
        let client = Qdrant::from_url(url).build()?;

        Ok(Self {
            client,
            collection: collection.into(),
            dimension: 1536, // text-embedding-3-small dimension
        })
    }

    /// Connect with custom dimension
    pub async fn with_dimension(
        url: &str,
        collection: impl Into<String>,
        dimension: usize,
    ) -> Result<Self> {
        let mut store = Self::new(url, collection).await?;
        store.dimension = dimension;
        Ok(store)
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// Initialize the collection if it doesn't exist
    pub async fn init_collection(&self) -> Result<()> {
        let collections = self.client.list_collections().await?;

        let exists = collections
            .collections
            .iter()
            .any(|c| c.name == self.collection);

        if !exists {
            info!("Creating collection '{}'", self.collection);

            self.client
                .create_collection(
                    CreateCollectionBuilder::new(self.collection.as_str()).vectors_config(
                        VectorParamsBuilder::new(self.dimension as u64, Distance::Cosine),
                    ),
                )
                .await?;

            info!("Collection created successfully");
        } else {
            debug!("Collection '{}' already exists", self.collection);
        }

        Ok(())
    }

    /// Upsert embedded chunks. Chunks with empty embeddings are skipped.
    pub async fn upsert_chunks(&self, chunks: &[(Chunk, Vec<f32>)]) -> Result<usize> {
        let indexed_at = chrono::Utc::now().to_rfc3339();

        let points: Vec<PointStruct> = chunks
            .iter()
            .filter_map(|(chunk, embedding)| {
                if embedding.is_empty() {
                    return None;
                }

                let mut payload: HashMap<String, QdrantValue> = HashMap::new();
                payload.insert("text".into(), chunk.text.clone().into());
                payload.insert("source".into(), chunk.source.clone().into());
                payload.insert("start".into(), (chunk.start as i64).into());
                payload.insert("end".into(), (chunk.end as i64).into());
                payload.insert("indexed_at".into(), indexed_at.clone().into());

                Some(PointStruct::new(
                    chunk.id.to_string(),
                    embedding.clone(),
                    payload,
                ))
            })
            .collect();

        if points.is_empty() {
            return Ok(0);
        }

        let count = points.len();
        debug!("Upserting {} points to Qdrant", count);

        self.client
            .upsert_points(UpsertPointsBuilder::new(self.collection.as_str(), points))
            .await?;

        info!(
            "Successfully upserted {} chunks into '{}'",
            count, self.collection
        );
        Ok(count)
    }

    /// Search for chunks similar to the query embedding
    pub async fn search(&self, query_embedding: Vec<f32>, limit: u64) -> Result<Vec<ScoredChunk>> {
        let results = self
            .client
            .search_points(
                SearchPointsBuilder::new(self.collection.as_str(), query_embedding, limit)
                    .with_payload(true),
            )
            .await?;

        let hits: Vec<ScoredChunk> = results
            .result
            .into_iter()
            .filter_map(|point| {
                let payload = point.payload;
                Some(ScoredChunk {
                    text: payload.get("text")?.as_str()?.to_string(),
                    source: payload
                        .get("source")
                        .and_then(QdrantValueExt::as_str)
                        .unwrap_or_default()
                        .to_string(),
                    start: payload
                        .get("start")
                        .and_then(|v| v.as_integer())
                        .unwrap_or(0) as usize,
                    end: payload.get("end").and_then(|v| v.as_integer()).unwrap_or(0) as usize,
                    score: point.score,
                })
            })
            .collect();

        Ok(hits)
    }

    /// Get collection statistics
    pub async fn stats(&self) -> Result<CollectionStats> {
        let info = self.client.collection_info(self.collection.as_str()).await?;

        Ok(CollectionStats {
            points_count: info
                .result
                .map(|r| r.points_count.unwrap_or(0))
                .unwrap_or(0),
            dimension: self.dimension,
        })
    }
}

/// Search hit restored from the point payload.
#[derive(Debug, Clone)]
pub struct ScoredChunk {
    pub text: String,
    pub source: String,
    pub start: usize,
    pub end: usize,
    pub score: f32,
}

/// Collection statistics
#[derive(Debug)]
pub struct CollectionStats {
    pub points_count: u64,
    pub dimension: usize,
}

trait QdrantValueExt {
    fn as_integer(&self) -> Option<i64>;
    fn as_str(&self) -> Option<&str>;
}

impl QdrantValueExt for QdrantValue {
    fn as_integer(&self) -> Option<i64> {
        match &self.kind {
            Some(qdrant_client::qdrant::value::Kind::IntegerValue(v)) => Some(*v),
            _ => None,
        }
    }

    fn as_str(&self) -> Option<&str> {
        match &self.kind {
            Some(qdrant_client::qdrant::value::Kind::StringValue(v)) => Some(v),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn new_stores_collection_and_default_dimension() {
        let store = VectorStore::new("http://localhost:6333", "kb_test")
            .await
            .unwrap();
        assert_eq!(store.collection(), "kb_test");
        assert_eq!(store.dimension, 1536);
    }

    #[tokio::test]
    async fn with_dimension_overrides_default() {
        let store = VectorStore::with_dimension("http://localhost:6333", "kb_test", 3072)
            .await
            .unwrap();
        assert_eq!(store.dimension, 3072);
    }

    #[test]
    fn scored_chunk_clone_and_debug() {
        let hit = ScoredChunk {
            text: "chunk text".to_string(),
            source: "https://example.com".to_string(),
            start: 0,
            end: 10,
            score: 0.87,
        };
        let cloned = hit.clone();
        assert_eq!(cloned.text, hit.text);
        assert!(format!("{:?}", hit).contains("ScoredChunk"));
    }

    #[test]
    fn qdrant_value_ext_extracts_kinds() {
        let s: QdrantValue = "hello".to_string().into();
        assert_eq!(QdrantValueExt::as_str(&s), Some("hello"));
        assert_eq!(QdrantValueExt::as_integer(&s), None);

        let n: QdrantValue = 42i64.into();
        assert_eq!(QdrantValueExt::as_integer(&n), Some(42));
        assert_eq!(QdrantValueExt::as_str(&n), None);
    }

    #[tokio::test]
    #[ignore] // Requires Qdrant server
    async fn init_upsert_and_search_round_trip() {
        let store = VectorStore::with_dimension("http://localhost:6334", "kb_it_test", 4)
            .await
            .unwrap();
        store.init_collection().await.unwrap();

        let chunk = Chunk::new("integration chunk".to_string(), 0, 17, "test");
        let upserted = store
            .upsert_chunks(&[(chunk, vec![0.1, 0.2, 0.3, 0.4])])
            .await
            .unwrap();
        assert_eq!(upserted, 1);

        let hits = store.search(vec![0.1, 0.2, 0.3, 0.4], 1).await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].text, "integration chunk");
    }
}
