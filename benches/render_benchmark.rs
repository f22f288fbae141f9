//! Benchmarks for xmindmd decoding and rendering performance.
//!
//! Run with: cargo bench
//!
//! These benchmarks use synthetic outlines of increasing breadth.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use xmindmd::render::{render, RenderOptions, Style};
use xmindmd::OutlineNode;

/// Build an outline with `sections` level-2 sections, each holding a
/// bulleted subtree and one slide group citing a few PMIDs.
fn create_outline(sections: usize) -> OutlineNode {
    let mut root = OutlineNode::new("Benchmark talk");
    for s in 0..sections {
        let mut section = OutlineNode::new(format!("Section {s}"));
        for i in 0..8 {
            section = section.child(
                OutlineNode::new(format!("Point {i} [(P{})]", s * 10 + i))
                    .child(OutlineNode::new("detail").bold())
                    .child(OutlineNode::new("flagged").with_marker("tag-red")),
            );
        }
        section = section.child(
            OutlineNode::new("rjs")
                .child(OutlineNode::new("Key ||idea|| here"))
                .child(OutlineNode::new(format!("Evidence [(P{})]", s)))
                .child(OutlineNode::new("notes").child(OutlineNode::new("speak"))),
        );
        root = root.child(section);
    }
    root
}

/// Serialize an outline as `content.json`.
fn create_content_json(sections: usize) -> Vec<u8> {
    fn topic(node: &OutlineNode) -> String {
        let children: Vec<String> = node.children.iter().map(topic).collect();
        format!(
            r#"{{"title": {:?}, "children": {{"attached": [{}]}}}}"#,
            node.title,
            children.join(",")
        )
    }
    let root = topic(&create_outline(sections));
    format!(r#"[{{"title": "Sheet", "rootTopic": {}}}]"#, root).into_bytes()
}

/// Benchmark container detection.
fn bench_format_detection(c: &mut Criterion) {
    let json = create_content_json(1);
    let other = b"Not an XMind file at all, just random text content";

    c.bench_function("detect_content_json", |b| {
        b.iter(|| xmindmd::detect_format_from_bytes(black_box(&json)).unwrap());
    });

    c.bench_function("detect_unknown", |b| {
        b.iter(|| xmindmd::detect_format_from_bytes(black_box(other)).is_err());
    });
}

/// Benchmark decoding at various sizes.
fn bench_decoding(c: &mut Criterion) {
    let mut group = c.benchmark_group("decoding");

    for sections in [1, 10, 50].iter() {
        let data = create_content_json(*sections);

        group.bench_function(format!("{}_sections", sections), |b| {
            b.iter(|| xmindmd::parse_bytes(black_box(&data)).unwrap());
        });
    }

    group.finish();
}

/// Benchmark rendering both artifacts at various sizes.
fn bench_rendering(c: &mut Criterion) {
    let mut group = c.benchmark_group("rendering");

    for sections in [1, 10, 50].iter() {
        let outline = create_outline(*sections);

        group.bench_function(format!("markdown_{}_sections", sections), |b| {
            let options = RenderOptions::new();
            b.iter(|| render(black_box(&outline), &options));
        });

        group.bench_function(format!("dokuwiki_{}_sections", sections), |b| {
            let options = RenderOptions::new()
                .with_style(Style::DokuWiki)
                .with_header_depth(3);
            b.iter(|| render(black_box(&outline), &options));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_format_detection, bench_decoding, bench_rendering);
criterion_main!(benches);
