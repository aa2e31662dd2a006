use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use funnel_analytics::ingest::{parse_document, ParseOptions};

fn leads_csv(rows: usize) -> String {
    let mut out = String::from(
        "Client Name,Source,Category,Status,MRC Value,Next Follow-up Date,Owner,Date Added\n",
    );
    for i in 0..rows {
        out.push_str(&format!(
            "Client {i},LinkedIn,Enterprise,HOT!!,\"₹{amount},500.50\",2024-03-{day:02},Owner {i},2024-02-01\n",
            amount = 40 + (i % 9),
            day = 1 + (i % 28),
        ));
    }
    out
}

fn bench_parse_leads(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_leads");
    let opts = ParseOptions::default();

    for rows in [100usize, 1_000, 10_000] {
        let raw = leads_csv(rows);
        group.throughput(Throughput::Bytes(raw.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(rows), &raw, |b, raw| {
            b.iter(|| parse_document(black_box(raw), &opts));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_parse_leads);
criterion_main!(benches);
