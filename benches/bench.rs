// Criterion benchmarks for GigMatch

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use gigmatch::core::{distance::haversine_distance, MatchEngine};
use gigmatch::models::{Coordinates, Job, JobStatus, Role, StatusFilter};

fn create_job(id: usize, lat: f64, lng: f64) -> Job {
    Job {
        id: id.to_string(),
        title: format!("Job {}", id),
        description: "A short-term gig".to_string(),
        requirements: String::new(),
        company_name: format!("Company {}", id % 20),
        budget: 50.0 + (id % 200) as f64,
        job_type: if id % 2 == 0 { "remote" } else { "on-site" }.to_string(),
        location: "London, UK".to_string(),
        coordinates: Some(Coordinates::new(lat, lng)),
        status: if id % 5 == 0 {
            JobStatus::Completed
        } else {
            JobStatus::Active
        },
        applications: vec![],
        created_at: chrono::Utc::now(),
    }
}

fn bench_haversine_distance(c: &mut Criterion) {
    c.bench_function("haversine_distance", |b| {
        b.iter(|| {
            haversine_distance(
                black_box(51.5074),
                black_box(-0.1278),
                black_box(51.52),
                black_box(-0.10),
            )
        });
    });
}

fn bench_visible_jobs(c: &mut Criterion) {
    let engine = MatchEngine::new();
    let origin = Coordinates::new(51.5074, -0.1278);

    let mut group = c.benchmark_group("visible_jobs");

    for job_count in [10, 50, 100, 500, 1000].iter() {
        let jobs: Vec<Job> = (0..*job_count)
            .map(|i| {
                let lat_offset = (i as f64 * 0.001) % 0.5;
                let lng_offset = (i as f64 * 0.001) % 0.5;
                create_job(i, 51.5074 + lat_offset, -0.1278 + lng_offset)
            })
            .collect();

        group.bench_with_input(
            BenchmarkId::from_parameter(job_count),
            &jobs,
            |b, jobs| {
                b.iter(|| {
                    engine.visible_jobs(
                        black_box(jobs.clone()),
                        Role::Student,
                        "",
                        StatusFilter::All,
                        Some(origin),
                        25.0,
                    )
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_haversine_distance, bench_visible_jobs);
criterion_main!(benches);
