use areacost_core::catalog::{Catalog, RawTable, AREA_COLUMNS, CATEGORY_COLUMNS};
use areacost_core::estimate::estimate;
use areacost_core::ledger::AreaLedger;
use areacost_core::session::SessionState;
use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};

fn build_sample_ledger(entry_count: usize) -> AreaLedger {
    let mut ledger = AreaLedger::new("Benchmark");
    for idx in 0..entry_count {
        ledger
            .add(
                &format!("item-{idx}"),
                "benchmark entry",
                5.0 + (idx % 100) as f64,
            )
            .expect("unique items");
    }
    ledger
}

fn build_sample_catalog(item_count: usize) -> Catalog {
    let area_table = RawTable::new(
        AREA_COLUMNS.iter().map(|c| c.to_string()).collect(),
        vec![vec!["1".into(), "Warehouse".into(), "5000".into()]],
    );
    let rows = (0..item_count)
        .map(|idx| {
            vec![
                idx.to_string(),
                format!("category-{}", idx % 10),
                format!("item-{idx}"),
                "5".into(),
                "USD".into(),
                "1".into(),
                "sqft".into(),
            ]
        })
        .collect();
    let category_table = RawTable::new(
        CATEGORY_COLUMNS.iter().map(|c| c.to_string()).collect(),
        rows,
    );
    Catalog::from_tables(&area_table, &category_table).expect("valid tables")
}

fn bench_ledger_mutations(c: &mut Criterion) {
    let ledger = build_sample_ledger(black_box(10_000));

    c.bench_function("ledger_add_undo_10k", |b| {
        b.iter_batched(
            || ledger.clone(),
            |mut ledger_clone| {
                ledger_clone
                    .add("fresh-item", "assumed", 123.45)
                    .expect("add");
                ledger_clone.undo("fresh-item").expect("undo");
                black_box(ledger_clone.grand_total());
            },
            BatchSize::SmallInput,
        );
    });

    c.bench_function("ledger_display_total_10k", |b| {
        b.iter(|| {
            black_box(ledger.display_total());
        })
    });
}

fn bench_estimation(c: &mut Criterion) {
    c.bench_function("estimate_cross_unit", |b| {
        b.iter(|| {
            let result = estimate(black_box(350.0), black_box(0.0025), black_box(20.0));
            black_box(result);
        })
    });
}

fn bench_session_flow(c: &mut Criterion) {
    let catalog = build_sample_catalog(black_box(1_000));

    c.bench_function("session_commit_category", |b| {
        b.iter_batched(
            || SessionState::new(catalog.clone()),
            |mut session| {
                session.select_area("Warehouse").expect("area");
                session.select_category("category-0").expect("category");
                while session.current_item().is_some() {
                    session.commit("", None, None).expect("commit");
                }
                black_box(session.summary().expect("summary").grand_total);
            },
            BatchSize::SmallInput,
        );
    });
}

criterion_group!(
    benches,
    bench_ledger_mutations,
    bench_estimation,
    bench_session_flow
);
criterion_main!(benches);
