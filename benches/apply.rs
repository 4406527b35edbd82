use criterion::{criterion_group, criterion_main, Criterion};
use decision_diagrams::bdd::BddManager;
use decision_diagrams::config::Config;
use decision_diagrams::ids::NodeId;

/// Builds the BDD for the parity function over `n` variables: `x0 XOR x1 XOR ... XOR x(n-1)`.
fn parity(m: &mut BddManager, n: usize) -> NodeId {
    let variables: Vec<_> = (0..n).map(|_| m.create_variable()).collect();
    let mut acc = NodeId::FALSE;
    for v in variables {
        let literal = m.variable_node(v).unwrap();
        acc = m.xor(acc, literal);
    }
    acc
}

pub fn criterion_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("apply");
    group.sample_size(20);

    for &size in &[8usize, 12, 16] {
        group.bench_function(format!("or_of_two_parities_{}", size), |b| {
            b.iter(|| {
                let mut m = BddManager::new(Config::default());
                let left = parity(&mut m, size);
                let right = parity(&mut m, size);
                m.or(left, right)
            });
        });

        group.bench_function(format!("iterative_matches_recursive_{}", size), |b| {
            b.iter(|| {
                let mut m = BddManager::new(Config::default());
                let formula = parity(&mut m, size);
                m.and_recursive(formula, formula)
            });
        });
    }
    group.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
