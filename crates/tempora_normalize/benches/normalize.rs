use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tempora_normalize::{Config, DatesNormalizer, NormalizationResult, TimeSpan};

const CORPUS: &[&str] = &[
    "1986-07-12",
    "1650?/..",
    "19XX",
    "19th century",
    "S. XVI-XX",
    "1942-1943",
    "[1842-1943]",
    "Byzantine Period; start=0395; end=0641",
    "2014/15",
    "-600000",
    "[ca. 1946]",
    "1946 (printed)",
    "not a date",
];

fn bench_normalize(c: &mut Criterion) {
    let config = Config::default();
    let normalizer = DatesNormalizer::new(config.normalizer.clone());

    c.bench_function("Normalize mixed corpus", |b| {
        b.iter(|| {
            for value in CORPUS {
                normalizer.normalize_date_property(black_box(value)).unwrap();
            }
        })
    });

    let resolved: Vec<_> = CORPUS
        .iter()
        .filter_map(|value| match normalizer.normalize_date_property(value) {
            Ok(NormalizationResult::Matched(resolved)) => Some(resolved),
            _ => None,
        })
        .collect();

    c.bench_function("Serialize time spans", |b| {
        b.iter(|| {
            for date in &resolved {
                black_box(TimeSpan::from_resolved(date, &config.linked_data).to_ntriples());
            }
        })
    });
}

criterion_group!(benches, bench_normalize);
criterion_main!(benches);
