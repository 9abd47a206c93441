//! Criterion benchmarks for cloudwatch_logging

use cloudwatch_logging::prelude::*;
use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use std::io;
use std::sync::Arc;

fn discard(name: &str) -> LoggerBuilder {
    Logger::builder(name).sink(StreamSink::new(io::sink()))
}

fn quiet() -> DiagnosticCallback {
    Arc::new(|_: &Diagnostic| {})
}

// ============================================================================
// Logger Creation Benchmarks
// ============================================================================

fn bench_logger_creation(c: &mut Criterion) {
    let mut group = c.benchmark_group("logger_creation");
    group.throughput(Throughput::Elements(1));

    group.bench_function("bare", |b| {
        b.iter(|| black_box(discard("bench").build()));
    });

    group.bench_function("with_transforms", |b| {
        b.iter(|| {
            let logger = discard("bench")
                .transform(AppenderConfig::new().with_field("service", "bench"))
                .transform(Preset::LowCost)
                .build();
            black_box(logger)
        });
    });

    group.bench_function("registry_lookup", |b| {
        let registry = LoggerRegistry::new();
        registry.register(discard("bench"));
        b.iter(|| black_box(registry.logger(black_box("bench"))));
    });

    group.finish();
}

// ============================================================================
// Logging Performance Benchmarks
// ============================================================================

fn bench_logging(c: &mut Criterion) {
    let mut group = c.benchmark_group("logging");
    group.throughput(Throughput::Elements(1));

    let plain = discard("plain").build();
    group.bench_function("plain", |b| {
        b.iter(|| plain.info(black_box("Info message")));
    });

    let enriched = discard("enriched")
        .transform(
            AppenderConfig::new()
                .with_field("service", "bench")
                .with_field("region", "eu-west-1"),
        )
        .transform(Preset::LowCost)
        .build();
    group.bench_function("appender_and_filter", |b| {
        b.iter(|| enriched.info(black_box("Info message")));
    });

    group.bench_function("ad_hoc_fields", |b| {
        b.iter(|| {
            enriched.info_with_context(
                black_box("Order placed"),
                LogContext::new()
                    .with_field("order_id", 42)
                    .with_field("amount", 19.99)
                    .with_field("currency", "EUR"),
            )
        });
    });

    let colliding = discard("colliding")
        .transform(AppenderConfig::new().with_field("order_id", 0))
        .on_diagnostic(quiet())
        .build();
    group.bench_function("collision", |b| {
        b.iter(|| {
            colliding.info_with_context(
                black_box("Order placed"),
                LogContext::new().with_field("order_id", 42),
            )
        });
    });

    let lambda = discard("lambda")
        .lambda(
            &LambdaContext::default()
                .with_function_name("bench-fn")
                .with_request_id("req-1"),
        )
        .build();
    group.bench_function("lambda_context", |b| {
        b.iter(|| lambda.info(black_box("Invocation")));
    });

    group.finish();
}

fn bench_level_filtering(c: &mut Criterion) {
    let mut group = c.benchmark_group("level_filtering");
    group.throughput(Throughput::Elements(1));

    let logger = discard("filtered").min_level(LogLevel::Error).build();

    group.bench_function("below_level", |b| {
        b.iter(|| logger.debug(black_box("dropped")));
    });

    group.bench_function("is_enabled_for", |b| {
        b.iter(|| black_box(logger.is_enabled_for(black_box(LogLevel::Info))));
    });

    group.finish();
}

// ============================================================================
// Formatting Benchmarks
// ============================================================================

fn bench_formatting(c: &mut Criterion) {
    let mut group = c.benchmark_group("formatting");
    group.throughput(Throughput::Elements(1));

    let formatter = CloudwatchFormatter::new();
    let entry = LogEntry::new("bench", LogLevel::Info, "Order placed")
        .with_context(
            LogContext::new()
                .with_field("order_id", 42)
                .with_field("tags", vec!["a", "b", "c"]),
        )
        .expect("valid fields");

    group.bench_function("format_line", |b| {
        b.iter(|| black_box(formatter.format(black_box(&entry))));
    });

    group.bench_function("entry_creation", |b| {
        b.iter(|| black_box(LogEntry::new("bench", LogLevel::Info, black_box("message"))));
    });

    group.finish();
}

// ============================================================================
// Reconfiguration Benchmarks
// ============================================================================

fn bench_updates(c: &mut Criterion) {
    let mut group = c.benchmark_group("updates");
    group.throughput(Throughput::Elements(1));

    let logger = discard("updates")
        .transform(AppenderConfig::new())
        .transform(FilterConfig::new())
        .build();

    group.bench_function("update_appender", |b| {
        b.iter(|| logger.update_appender(AppenderConfig::new().with_field("version", 2)));
    });

    group.bench_function("update_filter", |b| {
        b.iter(|| logger.update_filter(Preset::ElkCompatible));
    });

    group.finish();
}

// ============================================================================
// Criterion Configuration
// ============================================================================

criterion_group!(
    benches,
    bench_logger_creation,
    bench_logging,
    bench_level_filtering,
    bench_formatting,
    bench_updates
);

criterion_main!(benches);
