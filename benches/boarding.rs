use criterion::{black_box, criterion_group, criterion_main, Criterion};
use boarding_system::services::{plan_boarding, sequence_text, validate};

// Полный автобус: 80 мест, по брони на место, ряды вперемешку
fn full_manifest() -> String {
    let mut raw = String::from("Booking_ID,Seats\n");
    let mut id = 1;
    for row in (1..=20).rev().step_by(2).chain((1..=20).step_by(2)) {
        for letter in ['C', 'a', 'D', 'b'] {
            raw.push_str(&format!("{},{}{}\n", id, letter, row));
            id += 1;
        }
    }
    raw
}

fn bench_validate(c: &mut Criterion) {
    let raw = full_manifest();
    c.bench_function("validate full bus", |b| {
        b.iter(|| validate(black_box(&raw)))
    });
}

fn bench_sequence_text(c: &mut Criterion) {
    let cleaned = validate(&full_manifest()).map(|m| m.to_text()).unwrap_or_default();
    c.bench_function("sequence cleaned text", |b| {
        b.iter(|| sequence_text(black_box(&cleaned)))
    });
}

fn bench_plan_boarding(c: &mut Criterion) {
    let raw = full_manifest();
    c.bench_function("validate + sequence full bus", |b| {
        b.iter(|| plan_boarding(black_box(&raw)))
    });
}

criterion_group!(benches, bench_validate, bench_sequence_text, bench_plan_boarding);
criterion_main!(benches);
