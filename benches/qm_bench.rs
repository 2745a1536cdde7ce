// Benchmarks QM solve time and Petrick expansion time at increasing
// variable counts.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use qm_core::encoding::Enc16;
use qm_core::random::generate_random_minterms;
use qm_core::{minimal_column_covers, minimize};

fn bench_qm_solve(c: &mut Criterion) {
    let mut group = c.benchmark_group("qm_solve");

    for &n_vars in &[6usize, 8, 10, 12] {
        let vars: Vec<String> = (0..n_vars).map(|i| format!("v{}", i)).collect();
        let n_minterms = 1usize << (n_vars - 1);
        let minterms: Vec<u32> = generate_random_minterms::<Enc16>(n_vars, n_minterms, 42);
        group.throughput(Throughput::Elements(minterms.len() as u64));

        group.bench_with_input(BenchmarkId::new("minimize", n_vars), &(vars, minterms), |b, (vars, minterms)| {
            b.iter(|| minimize::<Enc16>(black_box(vars), black_box(minterms), &[], None));
        });
    }

    group.finish();
}

fn bench_petrick_expansion(c: &mut Criterion) {
    let mut group = c.benchmark_group("petrick_expansion");

    for &n_rows in &[8usize, 16, 24] {
        let rows: Vec<String> = (0..n_rows)
            .map(|i| {
                let mut row = vec!['0'; n_rows];
                row[i] = '1';
                row[(i + 1) % n_rows] = '1';
                row.into_iter().collect::<String>()
            })
            .collect();
        group.throughput(Throughput::Elements(n_rows as u64));

        group.bench_with_input(BenchmarkId::new("smallest_cover", n_rows), &rows, |b, rows| {
            let refs: Vec<&str> = rows.iter().map(|s| s.as_str()).collect();
            b.iter(|| minimal_column_covers(black_box(&refs), black_box(true), None));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_qm_solve, bench_petrick_expansion);
criterion_main!(benches);
