use chrono::{Duration, NaiveDate};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use slot_metrics::sales::{aggregate, classify, Row, SalesTable};

const DESCRIPTIONS: &[&str] = &[
    "Avulsa",
    "Plano Mensal 1x semana",
    "Plano Trimestral",
    "Pacote (10 sessões)",
    "Plano Semestral",
    "Camiseta",
    "TESTE venda",
];

fn build_export(row_count: usize) -> SalesTable {
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    let mut table = SalesTable::new(["Descrição", "Valor", "Quantidade", "Data da venda"]);
    for idx in 0..row_count {
        let date = start + Duration::days((idx % 365) as i64);
        table.push(
            Row::new()
                .with("Descrição", DESCRIPTIONS[idx % DESCRIPTIONS.len()])
                .with("Valor", 50.0 + (idx % 100) as f64)
                .with("Quantidade", ((idx % 3) + 1) as f64)
                .with("Data da venda", format!("{} 10:00:00", date)),
        );
    }
    table
}

fn bench_classify(c: &mut Criterion) {
    c.bench_function("classify_mixed", |b| {
        b.iter(|| {
            for text in DESCRIPTIONS {
                black_box(classify(Some(black_box(text))));
            }
        })
    });
}

fn bench_aggregate(c: &mut Criterion) {
    let table = build_export(black_box(10_000));
    c.bench_function("aggregate_10k", |b| {
        b.iter(|| aggregate(black_box(&table)).expect("aggregate"))
    });
}

criterion_group!(benches, bench_classify, bench_aggregate);
criterion_main!(benches);
