use chrono::NaiveDate;
use criterion::{criterion_group, criterion_main, Criterion};
use fittrack::models::{Activity, ActivityType, Goals};
use fittrack::services::{aggregation, export};
use std::hint::black_box;

/// Roughly two years of logging at a few records per day.
fn build_history(today: NaiveDate, days: u64) -> Vec<Activity> {
    let mut activities = Vec::new();
    for day in 0..days {
        let date = today - chrono::Days::new(day);
        for (i, activity_type) in ActivityType::ALL.iter().enumerate() {
            activities.push(Activity {
                id: format!("{}-{}", day, i),
                activity_type: *activity_type,
                value: 1 + (day * 37 + i as u64 * 101) % 9000,
                date,
                notes: (day % 4 == 0).then(|| "tempo run, hills".to_string()),
                created_at: None,
                updated_at: None,
            });
        }
    }
    activities
}

fn benchmark_aggregation(c: &mut Criterion) {
    let today = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
    let activities = build_history(today, 730);
    let goals = Goals::default();

    let mut group = c.benchmark_group("aggregation");

    group.bench_function("trailing_series_30_days", |b| {
        b.iter(|| {
            aggregation::trailing_series(
                black_box(&activities),
                ActivityType::Steps,
                30,
                today,
            )
        })
    });

    group.bench_function("insights", |b| {
        b.iter(|| aggregation::insights(black_box(&activities), &goals, today))
    });

    group.bench_function("dashboard", |b| {
        b.iter(|| aggregation::dashboard(black_box(&activities), &goals, today))
    });

    group.bench_function("export_csv", |b| {
        b.iter(|| export::to_csv(black_box(&activities)))
    });

    group.finish();
}

criterion_group!(benches, benchmark_aggregation);
criterion_main!(benches);
