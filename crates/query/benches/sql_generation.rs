//! SQL Generation Performance Benchmarks
//!
//! Tests the cost of building clause trees and rendering them to SQL

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use elif_query::{Dialect, JoinType, QueryBuilder};

fn report_query() -> QueryBuilder {
    let mut query = QueryBuilder::new();
    let _ = query.select(["u.id", "u.name", "p.title"]);
    let _ = query.from("users");
    query
        .alias("u")
        .join("profiles", "p.user_id", "=", "u.id")
        .alias("p")
        .where_("u.active", "=", true)
        .where_not_null("p.title")
        .order_by_desc(["u.created_at"])
        .limit(50);
    query
}

fn bench_basic_sql_generation(c: &mut Criterion) {
    let mut group = c.benchmark_group("basic_sql_generation");

    group.bench_function("simple_select", |b| {
        let mut query = QueryBuilder::new();
        let _ = query.select(["id", "name", "email"]);
        let _ = query.from("users");

        b.iter(|| black_box(query.to_sql()))
    });

    group.bench_function("select_with_joins", |b| {
        let mut query = report_query();

        b.iter(|| black_box(query.render().len()))
    });

    group.finish();
}

fn bench_query_building(c: &mut Criterion) {
    let mut group = c.benchmark_group("query_building");

    group.bench_function("build_and_render", |b| {
        b.iter(|| black_box(report_query().into_sql()))
    });

    group.bench_function("reuse_after_clear", |b| {
        let mut query = QueryBuilder::new();
        b.iter(|| {
            query.clear();
            let _ = query.from(black_box("users"));
            query
                .where_("id", ">", black_box(100))
                .where_group(|g| {
                    g.where_("role", "=", "'admin'").or_where("role", "=", "'owner'");
                })
                .limit(10);
            black_box(query.render().len())
        })
    });

    group.bench_function("nested_subqueries", |b| {
        b.iter(|| {
            let mut query = QueryBuilder::new();
            let _ = query.from("users");
            query
                .where_in_sub("id", |sub| {
                    let _ = sub.select(["user_id"]);
                    let _ = sub.from("orders");
                    sub.where_exists(|inner| {
                        let _ = inner.from("items");
                        inner.where_raw("items.order_id = orders.id");
                    });
                })
                .join_sub(JoinType::Left, |sub| {
                    let _ = sub.from("posts");
                })
                .alias("p")
                .on("p.user_id", "=", "users.id");
            black_box(query.into_sql())
        })
    });

    group.finish();
}

fn bench_where_clause_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("where_clause_scaling");

    for count in [1usize, 10, 50, 100] {
        group.bench_with_input(BenchmarkId::new("conditions", count), &count, |b, &count| {
            b.iter(|| {
                let mut query = QueryBuilder::new();
                let _ = query.from("users");
                for i in 0..count {
                    query.where_(&format!("col_{}", i), "=", i as u64);
                }
                black_box(query.into_sql())
            })
        });
    }

    group.finish();
}

fn bench_dialects(c: &mut Criterion) {
    let mut group = c.benchmark_group("dialects");
    let mut query = report_query();
    query.offset(100);

    for dialect in [Dialect::Postgres, Dialect::MySql, Dialect::Sqlite] {
        group.bench_with_input(
            BenchmarkId::new("render_with", format!("{:?}", dialect)),
            &dialect,
            |b, &dialect| b.iter(|| black_box(query.render_with(dialect).len())),
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_basic_sql_generation,
    bench_query_building,
    bench_where_clause_scaling,
    bench_dialects
);
criterion_main!(benches);
