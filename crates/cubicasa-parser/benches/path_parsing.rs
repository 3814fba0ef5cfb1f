// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use cubicasa_parser::{parse_floor_str, parse_path_data, PathTokenizer};
use std::fmt::Write;
use std::path::Path;

fn ring(points: usize, attached: bool) -> String {
    let mut d = String::new();
    for i in 0..points {
        let angle = i as f64 / points as f64 * std::f64::consts::TAU;
        let (x, y) = (500.0 + 300.0 * angle.cos(), 500.0 + 300.0 * angle.sin());
        let cmd = if i == 0 { 'M' } else { 'L' };
        if attached {
            let _ = write!(d, "{cmd}{x:.3},{y:.3}");
        } else {
            let _ = write!(d, "{cmd} {x:.3} {y:.3} ");
        }
    }
    d.push('Z');
    d
}

fn floor_document(paths: usize) -> String {
    let mut svg = String::from(r#"<svg viewBox="0 0 1000 1000">"#);
    for i in 0..paths {
        let id = ["Wall", "Space Room", "Window", "Door"][i % 4];
        let _ = write!(svg, r#"<g id="{id}"><path d="{}"/></g>"#, ring(16, i % 2 == 0));
    }
    svg.push_str("</svg>");
    svg
}

fn bench_tokenizer(c: &mut Criterion) {
    let d = ring(256, false);
    let mut group = c.benchmark_group("tokenizer");
    group.throughput(Throughput::Bytes(d.len() as u64));
    group.bench_function("separated_256", |b| {
        b.iter(|| PathTokenizer::new(black_box(&d)).count())
    });
    let attached = ring(256, true);
    group.bench_function("attached_256", |b| {
        b.iter(|| PathTokenizer::new(black_box(&attached)).count())
    });
    group.finish();
}

fn bench_polygon(c: &mut Criterion) {
    let d = ring(256, false);
    c.bench_function("parse_path_data_256", |b| {
        b.iter(|| parse_path_data(black_box(&d)))
    });
}

fn bench_floor(c: &mut Criterion) {
    let svg = floor_document(500);
    let mut group = c.benchmark_group("floor");
    group.throughput(Throughput::Bytes(svg.len() as u64));
    group.bench_function("parse_floor_str_500", |b| {
        b.iter(|| parse_floor_str(black_box(&svg), Path::new("bench/model.svg")))
    });
    group.finish();
}

criterion_group!(benches, bench_tokenizer, bench_polygon, bench_floor);
criterion_main!(benches);
