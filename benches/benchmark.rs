//! Benchmarks for cardcheck performance testing.
//!
//! Run with: cargo bench

use cardcheck::{detect_provider, luhn, CardData, CardValidator, Policy};
use chrono::{TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

const VISA: &str = "4111111111111111";
const MASTER: &str = "5555555555554444";
const AMEX: &str = "378282246310005";
const MAESTRO: &str = "6331101999990016";
const SWITCH: &str = "675900000000000000";

const VISA_DIGITS: [u8; 16] = [4, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1];

/// Benchmark the Luhn checksum alone
fn bench_luhn(c: &mut Criterion) {
    let mut group = c.benchmark_group("luhn");

    group.bench_function("digits", |b| {
        b.iter(|| luhn::validate(black_box(&VISA_DIGITS)))
    });

    group.bench_function("str", |b| b.iter(|| luhn::validate_str(black_box(VISA))));

    group.bench_function("check_digit", |b| {
        b.iter(|| luhn::generate_check_digit(black_box(&VISA_DIGITS[..15])))
    });

    group.finish();
}

/// Benchmark provider detection; later catalog entries try more patterns
fn bench_detect(c: &mut Criterion) {
    let mut group = c.benchmark_group("detect_provider");

    for (name, number) in [
        ("visa", VISA),
        ("master", MASTER),
        ("american_express", AMEX),
        ("switch", SWITCH),
        ("maestro", MAESTRO),
        ("no_match", "1234567890123456"),
    ] {
        group.bench_with_input(BenchmarkId::from_parameter(name), number, |b, number| {
            b.iter(|| detect_provider(black_box(number)))
        });
    }

    group.finish();
}

/// Benchmark the whole pipeline
fn bench_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline");
    let now = Utc.with_ymd_and_hms(2010, 11, 1, 1, 0, 0).unwrap();
    let validator = CardValidator::new(Policy::default());

    let valid = CardData::new()
        .number(VISA)
        .name_on_card("John Smith")
        .expiration(1, 2011)
        .verification_value("1434");
    let switch = CardData::new()
        .number(SWITCH)
        .name_on_card("John Smith")
        .expiration(1, 2011)
        .verification_value("1434")
        .provider_name("switch")
        .start(1, 1990)
        .issue_number("01");
    let empty = CardData::new();

    group.throughput(Throughput::Elements(1));
    group.bench_function("valid_visa", |b| {
        b.iter(|| validator.validate_at(black_box(&valid), now))
    });
    group.bench_function("switch", |b| {
        b.iter(|| validator.validate_at(black_box(&switch), now))
    });
    group.bench_function("empty", |b| {
        b.iter(|| validator.validate_at(black_box(&empty), now))
    });

    let strict = CardValidator::new(
        Policy::default()
            .auto_derive_provider_name(false)
            .with_supported_providers(["visa", "master"]),
    );
    let labelled = valid.clone().provider_name("visa");
    group.bench_function("no_derivation", |b| {
        b.iter(|| strict.validate_at(black_box(&labelled), now))
    });

    group.finish();
}

criterion_group!(benches, bench_luhn, bench_detect, bench_pipeline);
criterion_main!(benches);
