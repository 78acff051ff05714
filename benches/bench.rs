// Criterion benchmarks for Cuisine Scout

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use cuisine_scout::core::{
    cuisine::{extract_cuisines, hints_from_name, matches_accepted, matches_rejected, parse_cuisine_list},
    distance::haversine_distance,
    slim::{business_cards, merge_places},
};
use cuisine_scout::models::{Coordinates, Geometry, LatLng, Place};

const CUISINE_TYPES: &[&str] = &[
    "korean_restaurant",
    "thai_restaurant",
    "italian_restaurant",
    "mexican_restaurant",
    "indian_restaurant",
    "japanese_restaurant",
];

const NAMES: &[&str] = &[
    "Seoul Garden",
    "Golden Dragon Dim Sum",
    "Taqueria El Sol",
    "Pho 99",
    "Luigi's Pizza",
    "Corner Diner",
];

fn create_place(id: usize) -> Place {
    let lat_offset = (id as f64 * 0.001) % 0.5;
    let lon_offset = (id as f64 * 0.001) % 0.5;

    // Every third place only carries generic types so the name hints kick in
    let types = if id % 3 == 0 {
        vec!["restaurant".to_string()]
    } else {
        vec![
            CUISINE_TYPES[id % CUISINE_TYPES.len()].to_string(),
            "restaurant".to_string(),
            "food".to_string(),
        ]
    };

    Place {
        place_id: Some(format!("place-{}", id)),
        name: Some(NAMES[id % NAMES.len()].to_string()),
        types,
        vicinity: Some(format!("{} Broadway", id)),
        geometry: Some(Geometry {
            location: LatLng {
                lat: 40.7128 + lat_offset,
                lng: -74.0060 + lon_offset,
            },
        }),
        ..Default::default()
    }
}

fn bench_haversine_distance(c: &mut Criterion) {
    c.bench_function("haversine_distance", |b| {
        b.iter(|| {
            haversine_distance(
                black_box(40.7128),
                black_box(-74.0060),
                black_box(40.72),
                black_box(-74.01),
            )
        });
    });
}

fn bench_name_hints(c: &mut Criterion) {
    c.bench_function("hints_from_name", |b| {
        b.iter(|| hints_from_name(black_box("Golden Dragon Dim Sum & Pho")));
    });
}

fn bench_extract_cuisines(c: &mut Criterion) {
    let mut group = c.benchmark_group("extract_cuisines");

    for place_count in [20, 60, 200].iter() {
        let places: Vec<Place> = (0..*place_count).map(create_place).collect();

        group.bench_with_input(
            BenchmarkId::new("places", place_count),
            place_count,
            |b, _| {
                b.iter(|| extract_cuisines(black_box(&places)));
            },
        );
    }

    group.finish();
}

fn bench_filtering_pipeline(c: &mut Criterion) {
    let origin = Coordinates { latitude: 40.7128, longitude: -74.0060 };
    let accepted = parse_cuisine_list("korean,thai,mexican,pizza");
    let rejected = parse_cuisine_list("dim sum");
    let batches: Vec<Vec<Place>> = (0..4)
        .map(|batch| (0..60).map(|i| create_place(batch * 30 + i)).collect())
        .collect();

    c.bench_function("filtering_pipeline_4x60_places", |b| {
        b.iter(|| {
            let mut places = merge_places(batches.clone());
            places.retain(|p| matches_accepted(p, &accepted));
            places.retain(|p| !matches_rejected(p, &rejected));

            black_box(business_cards(&places, Some(&origin)))
        });
    });
}

criterion_group!(
    benches,
    bench_haversine_distance,
    bench_name_hints,
    bench_extract_cuisines,
    bench_filtering_pipeline
);

criterion_main!(benches);
