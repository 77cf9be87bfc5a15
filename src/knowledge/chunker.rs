use uuid::Uuid;

/// Text chunk produced by the chunker.
#[derive(Debug, Clone)]
pub struct Chunk {
    /// Unique chunk id
    pub id: Uuid,
    /// Raw text of the chunk
    pub text: String,
    /// Unit index of the first element (character or word, per strategy)
    pub start: usize,
    /// Unit index after the last element
    pub end: usize,
    /// Source label (URL, file path, channel)
    pub source: String,
}

impl Chunk {
    pub fn new(text: String, start: usize, end: usize, source: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            text,
            start,
            end,
            source: source.into(),
        }
    }
}

/// Chunking strategy.
#[derive(Debug, Clone, Copy)]
pub enum ChunkingStrategy {
    /// Split by characters with overlap (default for document ingestion)
    Characters,
    /// Split by words with overlap
    Words,
}

/// Sliding-window chunker with overlap.
#[derive(Debug, Clone)]
pub struct Chunker {
    size: usize,
    overlap: usize,
    strategy: ChunkingStrategy,
}

impl Chunker {
    /// Create a character chunker.
    pub fn new(size: usize, overlap: usize) -> Self {
        Self::with_strategy(size, overlap, ChunkingStrategy::Characters)
    }

    /// Create with custom strategy.
    pub fn with_strategy(size: usize, overlap: usize, strategy: ChunkingStrategy) -> Self {
        Self {
            size: size.max(1),
            overlap: overlap.min(size.saturating_sub(1)),
            strategy,
        }
    }

    /// Split text into overlapping chunks. Empty or whitespace-only input
    /// yields no chunks.
    pub fn chunk(&self, text: &str, source: impl Into<String>) -> Vec<Chunk> {
        match self.strategy {
            ChunkingStrategy::Characters => self.chunk_chars(text, source),
            ChunkingStrategy::Words => self.chunk_words(text, source),
        }
    }

    /// Character windows over the trimmed input. Indexing is in characters,
    /// never bytes, so multi-byte text is split on scalar boundaries.
    fn chunk_chars(&self, text: &str, source: impl Into<String>) -> Vec<Chunk> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Vec::new();
        }

        let chars: Vec<char> = trimmed.chars().collect();
        let step = self.size.saturating_sub(self.overlap).max(1);
        let source = source.into();
        let mut chunks = Vec::new();
        let mut idx = 0;

        while idx < chars.len() {
            let end = (idx + self.size).min(chars.len());
            let chunk_text: String = chars[idx..end].iter().collect();
            chunks.push(Chunk::new(chunk_text, idx, end, source.clone()));

            if end == chars.len() {
                break;
            }
            idx += step;
        }

        chunks
    }

    fn chunk_words(&self, text: &str, source: impl Into<String>) -> Vec<Chunk> {
        let words: Vec<&str> = text.split_whitespace().collect();
        if words.is_empty() {
            return Vec::new();
        }

        let step = self.size.saturating_sub(self.overlap).max(1);
        let source = source.into();
        let mut chunks = Vec::new();
        let mut idx = 0;

        while idx < words.len() {
            let end = (idx + self.size).min(words.len());
            let chunk_text = words[idx..end].join(" ");
            chunks.push(Chunk::new(chunk_text, idx, end, source.clone()));

            if end == words.len() {
                break;
            }
            idx += step;
        }

        chunks
    }
}
