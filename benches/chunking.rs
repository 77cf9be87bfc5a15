use criterion::{black_box, criterion_group, criterion_main, Criterion};
use slack_reader::knowledge::{Chunker, ChunkingStrategy};

fn char_chunker_benchmark(c: &mut Criterion) {
    let chunker = Chunker::new(300, 2);
    let text = "Slack export retrieval chunk overlap knowledge base embedding ".repeat(256);

    c.bench_function("chunker_chars_long_document", |b| {
        b.iter(|| {
            let chunks = chunker.chunk(black_box(text.as_str()), "bench");
            black_box(chunks.len());
        });
    });
}

fn word_chunker_benchmark(c: &mut Criterion) {
    let chunker = Chunker::with_strategy(64, 8, ChunkingStrategy::Words);
    let text = "Alice exports Slack channels and trains retrieval pipelines \
        with Bob and Carol while measuring chunker throughput."
        .repeat(128);

    c.bench_function("chunker_words_long_document", |b| {
        b.iter(|| {
            let chunks = chunker.chunk(black_box(text.as_str()), "bench");
            black_box(chunks.len());
        });
    });
}

criterion_group!(chunking, char_chunker_benchmark, word_chunker_benchmark);
criterion_main!(chunking);
