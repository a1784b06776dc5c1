// Criterion benchmarks for Nestly Algo

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use nestly_algo::core::{haversine_distance, Ranker};
use nestly_algo::models::{
    Drinks, Ethnicity, Gender, Location, Orientation, Profile, RoomListing, Smokes,
};

fn create_candidate(id: usize, lat: f64, lon: f64) -> Profile {
    Profile {
        user_id: id.to_string(),
        name: format!("User {}", id),
        age: Some(22 + (id % 20) as u8),
        gender: Some(if id % 2 == 0 { Gender::Male } else { Gender::Other }),
        orientation: Some(Orientation::Straight),
        ethnicity: Some(if id % 3 == 0 { Ethnicity::Asian } else { Ethnicity::White }),
        income: Some(format!("{}", 1500 + (id % 40) * 100)),
        smokes: Some(if id % 5 == 0 { Smokes::Yes } else { Smokes::No }),
        drinks: Some(Drinks::Socially),
        location: Location {
            place: Some("somewhere".to_string()),
            latitude: Some(lat),
            longitude: Some(lon),
        },
    }
}

fn create_room(id: usize, lat: f64, lon: f64) -> RoomListing {
    RoomListing {
        id: uuid::Uuid::from_u128(id as u128),
        owner_id: format!("owner-{}", id),
        rent: 800.0 + (id % 30) as f64 * 50.0,
        available_from: chrono::NaiveDate::from_ymd_opt(2025, 9, 1).unwrap(),
        duration: "12 months".to_string(),
        room_type: "private".to_string(),
        layout: "2BR".to_string(),
        deposit: 500.0,
        description: String::new(),
        location: Location {
            place: Some("somewhere".to_string()),
            latitude: Some(lat),
            longitude: Some(lon),
        },
        image_urls: vec![],
        created_at: chrono::DateTime::from_timestamp(1_700_000_000, 0).unwrap(),
    }
}

fn create_target() -> Profile {
    let mut target = create_candidate(usize::MAX, 41.9981, 21.4254);
    target.user_id = "target".to_string();
    target
}

fn bench_haversine_distance(c: &mut Criterion) {
    c.bench_function("haversine_distance", |b| {
        b.iter(|| {
            haversine_distance(
                black_box(41.9981),
                black_box(21.4254),
                black_box(44.7866),
                black_box(20.4489),
            )
        });
    });
}

fn bench_rank_users(c: &mut Criterion) {
    let ranker = Ranker::new();
    let target = create_target();

    let mut group = c.benchmark_group("rank_users");

    for candidate_count in [10, 100, 1000].iter() {
        let candidates: Vec<Profile> = (0..*candidate_count)
            .map(|i| {
                let lat_offset = (i as f64 * 0.001) % 0.5;
                let lon_offset = (i as f64 * 0.001) % 0.5;
                create_candidate(i, 41.9981 + lat_offset, 21.4254 + lon_offset)
            })
            .collect();

        group.bench_with_input(
            BenchmarkId::from_parameter(candidate_count),
            candidate_count,
            |b, _| {
                b.iter(|| {
                    ranker.rank_users(
                        black_box(&target),
                        black_box(candidates.clone()),
                        black_box(None),
                    )
                });
            },
        );
    }

    group.finish();
}

fn bench_rank_rooms(c: &mut Criterion) {
    let ranker = Ranker::new();
    let target = create_target();

    let rooms: Vec<RoomListing> = (0..500)
        .map(|i| {
            let lat_offset = (i as f64 * 0.002) % 1.0;
            create_room(i, 41.9981 + lat_offset, 21.4254)
        })
        .collect();

    c.bench_function("rank_rooms_500", |b| {
        b.iter(|| {
            ranker.rank_rooms(
                black_box(&target),
                black_box(rooms.clone()),
                black_box(Some(20)),
            )
        });
    });
}

criterion_group!(benches, bench_haversine_distance, bench_rank_users, bench_rank_rooms);

criterion_main!(benches);
