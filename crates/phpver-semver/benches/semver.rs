use criterion::{black_box, criterion_group, criterion_main, Criterion};
use phpver_semver::{Semver, VersionParser};

fn bench_canonicalize(c: &mut Criterion) {
    let versions = [
        "8.1",
        "v8.2.3",
        "php-8.3.0RC1",
        "7.4.33",
        "8",
        "PHP 8.4 (future)",
        "master",
    ];

    c.bench_function("canonicalize_versions", |b| {
        b.iter(|| {
            for version in versions {
                black_box(VersionParser::canonicalize(black_box(version)));
            }
        })
    });
}

fn bench_parse_constraints(c: &mut Criterion) {
    let parser = VersionParser::new();
    let constraints = [
        ">=7.4 <8.3",
        "^7.3 || ^8.0",
        "8.0.* || 8.2.*",
        "7.4 - 8.2",
        "~8.1.2 >=8.1.3",
        ">= 8.1, < 8.4",
    ];

    c.bench_function("parse_constraints", |b| {
        b.iter(|| {
            for constraint in constraints {
                black_box(parser.parse_constraints(black_box(constraint)));
            }
        })
    });
}

fn bench_satisfied_by(c: &mut Criterion) {
    let versions = [
        "5.6", "7.0", "7.1", "7.2", "7.3", "7.4", "8.0", "8.1", "8.2", "8.3", "8.4", "8.5",
    ];

    c.bench_function("satisfied_by", |b| {
        b.iter(|| black_box(Semver::satisfied_by(black_box(&versions), ">=7.4 <8.3 || ^8.4")))
    });
}

fn bench_sort(c: &mut Criterion) {
    let versions = [
        "8.3", "7.4", "8.0", "8.4", "7.1", "5.6", "8.2", "7.3", "8.1", "7.2", "7.0",
    ];

    c.bench_function("sort", |b| b.iter(|| black_box(Semver::sort(black_box(&versions)))));
}

criterion_group!(
    benches,
    bench_canonicalize,
    bench_parse_constraints,
    bench_satisfied_by,
    bench_sort
);
criterion_main!(benches);
