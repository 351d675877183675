//! Benchmark suite for kernel enumeration and full synthesis
//!
//! Covers the stages separately on a fixed mid-size expression, then the
//! whole driver on inputs of growing width. The wide input is a fully
//! expanded product of sums, the shape on which rectangle covering does the
//! most work.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use factor_logic::{
    build_kernel_matrix, kernel_pairs, ranked_rectangles, synthesize, Cube, Expr,
    DEFAULT_RECTANGLE_CAP,
};

const TEN_CUBES: &str = "h + bfg + dfa + dfb + dfc + efa + efb + efc + dg + ge";

/// The expansion of (a+b+c)(d+e+f)(g+h...) over the given alphabet groups
fn expanded_product(groups: &[&[&str]]) -> Expr {
    let mut cubes = vec![Cube::one()];
    for group in groups {
        let mut next = Vec::with_capacity(cubes.len() * group.len());
        for cube in &cubes {
            for name in *group {
                next.push(cube.union(&Cube::singleton(name)));
            }
        }
        cubes = next;
    }
    Expr::from_cubes(cubes)
}

fn bench_stages(c: &mut Criterion) {
    let f = Expr::parse(TEN_CUBES).unwrap();
    c.bench_function("kernel_pairs/ten_cubes", |b| {
        b.iter(|| kernel_pairs(black_box(&f)))
    });

    let pairs = kernel_pairs(&f);
    c.bench_function("build_kernel_matrix/ten_cubes", |b| {
        b.iter(|| build_kernel_matrix(black_box(&pairs)))
    });

    let matrix = build_kernel_matrix(&pairs);
    c.bench_function("ranked_rectangles/ten_cubes", |b| {
        b.iter(|| ranked_rectangles(black_box(&matrix), DEFAULT_RECTANGLE_CAP))
    });
}

fn bench_synthesize(c: &mut Criterion) {
    let mut group = c.benchmark_group("synthesize");

    let small = Expr::parse("ab + ac + ad").unwrap();
    group.bench_with_input(BenchmarkId::new("cubes", small.len()), &small, |b, f| {
        b.iter(|| synthesize(black_box(f)))
    });

    let medium = Expr::parse(TEN_CUBES).unwrap();
    group.bench_with_input(BenchmarkId::new("cubes", medium.len()), &medium, |b, f| {
        b.iter(|| synthesize(black_box(f)))
    });

    let wide = expanded_product(&[
        &["a", "b", "c"],
        &["d", "e", "f"],
        &["g", "h", "i"],
    ]);
    group.bench_with_input(BenchmarkId::new("cubes", wide.len()), &wide, |b, f| {
        b.iter(|| synthesize(black_box(f)))
    });

    group.finish();
}

criterion_group!(benches, bench_stages, bench_synthesize);
criterion_main!(benches);
