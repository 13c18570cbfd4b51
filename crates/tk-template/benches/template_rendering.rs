//! Benchmarks for template parsing and rendering.

#![allow(clippy::format_push_string)] // Benchmark setup code, performance not critical

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use serde_json::{Map, json};
use tk_template::{Engine, RenderContext, TagError, TagHandler, TagInvocation, TagRegistry};

struct Marker;

impl TagHandler for Marker {
    fn configure(_invocation: &TagInvocation) -> Result<Self, TagError> {
        Ok(Self)
    }

    fn render(&self, _ctx: &RenderContext<'_>) -> String {
        "<mark>?</mark>".to_owned()
    }
}

/// Generate template source with the given number of paragraphs, each using one tag.
fn generate_source(paragraphs: usize) -> String {
    let mut source = String::with_capacity(paragraphs * 120);
    source.push_str("<h1>{{ page.title }}</h1>\n");
    for i in 0..paragraphs {
        source.push_str(&format!(
            "<p>Paragraph {i} still needs a quote {{% marker source pending %}} from {{{{ page.author }}}}.</p>\n"
        ));
    }
    source
}

fn engine() -> Engine {
    let registry = TagRegistry::new()
        .with_tag::<Marker>("marker")
        .expect("valid tag name");
    Engine::new(registry)
}

fn bench_parse(c: &mut Criterion) {
    let engine = engine();
    let mut group = c.benchmark_group("parse");

    for paragraphs in [10, 100, 1000] {
        let source = generate_source(paragraphs);
        group.throughput(Throughput::Bytes(source.len() as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(paragraphs),
            &source,
            |b, source| {
                b.iter(|| engine.parse(source));
            },
        );
    }

    group.finish();
}

fn bench_render(c: &mut Criterion) {
    let engine = engine();
    let vars = json!({ "page": { "title": "Budget", "author": "Desk" } });
    let vars = vars.as_object().cloned().unwrap_or_else(Map::new);
    let ctx = RenderContext::new(&vars);
    let mut group = c.benchmark_group("render");

    for paragraphs in [10, 100, 1000] {
        let template = engine
            .parse(&generate_source(paragraphs))
            .expect("benchmark template parses");
        group.bench_with_input(
            BenchmarkId::from_parameter(paragraphs),
            &template,
            |b, template| {
                b.iter(|| template.render(&ctx));
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_parse, bench_render);
criterion_main!(benches);
