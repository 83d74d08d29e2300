// benches/normalize.rs
use criterion::{black_box, criterion_group, criterion_main, Criterion};

use cal_scrape::extract::{locate_literal, normalize_literal};

const MARKER: &str = "window.calendarComponentStates[1] =";

/// Synthesize a snapshot-shaped page: surrounding markup, then the
/// embedded literal with a few hundred events in the captured style
/// (unquoted keys, single quotes, trailing commas, freeze wrapper).
fn build_sample(days: usize, events_per_day: usize) -> String {
    let mut doc = String::with_capacity(256 * 1024);
    doc.push_str("<html><head><title>calendar</title></head><body>\n");
    for i in 0..50 {
        doc.push_str(&format!("<div class=\"filler\">row {i} (no marker)</div>\n"));
    }
    doc.push_str("<script>");
    doc.push_str(MARKER);
    doc.push_str(" Object.freeze({days: [");
    let mut id = 0u64;
    for d in 0..days {
        doc.push_str(&format!("{{date: '<span>Day {d}</span>', events: ["));
        for _ in 0..events_per_day {
            id += 1;
            doc.push_str(&format!(
                "{{id: {id}, dateline: {}, impactName: 'High', currency: 'USD', \
                 name: 'Event \"{id}\" (rev)', actual: '', forecast: '1.{id}%',}},",
                1_700_000_000 + id * 60
            ));
        }
        doc.push_str("],},");
    }
    doc.push_str("],});</script></body></html>");
    doc
}

fn bench_pipeline(c: &mut Criterion) {
    let doc = build_sample(7, 40);
    let span = locate_literal(&doc, MARKER).unwrap();
    let literal = span.slice(&doc);

    c.bench_function("locate_literal", |b| {
        b.iter(|| locate_literal(black_box(&doc), MARKER).unwrap())
    });

    c.bench_function("normalize_literal", |b| {
        b.iter(|| normalize_literal(black_box(literal)))
    });
}

criterion_group!(benches, bench_pipeline);
criterion_main!(benches);
