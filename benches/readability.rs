//! Throughput benchmarks for the content-extraction pipeline.
//!
//! Run with: `cargo bench`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use readabilityrs::{Document, ReadabilityOptions};

const SAMPLE_HTML: &str = r#"
<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>Sample Article | Example Blog</title>
    <meta name="description" content="A sample article for benchmarking.">
    <meta property="og:title" content="Sample Article">
</head>
<body>
    <nav class="nav">
        <a href="/">Home</a>
        <a href="/about">About</a>
    </nav>
    <div class="sidebar">
        <div class="comment">Buy now! Limited offer!</div>
    </div>
    <article>
        <h1>Sample Article Title</h1>
        <p class="byline">By John Doe</p>
        <p>This is the first paragraph of the article. It contains some meaningful,
        substantial content that should be extracted by the scoring pipeline.</p>
        <p>Here is a second paragraph with more content, more commas, and more
        clauses. The extraction should preserve this text while removing
        navigation and other boilerplate chrome around it.</p>
        <p>A third paragraph ensures there is enough content for a meaningful
        benchmark of the full pipeline's extraction performance, end to end.</p>
    </article>
    <aside>
        <h3>Related Articles</h3>
        <ul>
            <li><a href="/a">Related article 1</a></li>
            <li><a href="/b">Related article 2</a></li>
        </ul>
    </aside>
    <footer>
        <p>Copyright 2026</p>
    </footer>
</body>
</html>
"#;

fn bench_summary_full_document(c: &mut Criterion) {
    c.bench_function("summary_full_document", |b| {
        b.iter(|| {
            let doc = Document::new(black_box(SAMPLE_HTML), ReadabilityOptions::default());
            doc.summary(false)
        });
    });
}

fn bench_summary_partial(c: &mut Criterion) {
    c.bench_function("summary_partial", |b| {
        b.iter(|| {
            let doc = Document::new(black_box(SAMPLE_HTML), ReadabilityOptions::default());
            doc.summary(true)
        });
    });
}

fn bench_scaling_by_size(c: &mut Criterion) {
    let mut group = c.benchmark_group("scaling");

    for repeat in [1usize, 10, 50] {
        let mut html = String::from("<html><body><article>");
        for _ in 0..repeat {
            html.push_str("<p>Paragraph text with enough characters to be scored, and a comma, too.</p>");
        }
        html.push_str("</article></body></html>");

        group.throughput(Throughput::Bytes(html.len() as u64));
        group.bench_with_input(BenchmarkId::new("paragraphs", repeat), &html, |b, html| {
            b.iter(|| {
                let doc = Document::new(black_box(html.as_str()), ReadabilityOptions::default());
                doc.summary(true)
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_summary_full_document, bench_summary_partial, bench_scaling_by_size);
criterion_main!(benches);
