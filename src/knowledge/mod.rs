//! Knowledge base pipeline
//!
//! Provides tools for:
//! - Loading documents from web pages and JSON files
//! - Splitting text into overlapping chunks
//! - Generating embeddings using OpenAI
//! - Storing and searching chunks in a vector database (Qdrant)

pub mod chunker;
pub mod embeddings;
pub mod loader;
pub mod vector_db;

pub use chunker::{Chunk, Chunker, ChunkingStrategy};
pub use embeddings::EmbeddingService;
pub use vector_db::{ScoredChunk, VectorStore};

/// Collection used by the chat command when none is configured.
pub const DEFAULT_COLLECTION: &str = "knowledge_base";
