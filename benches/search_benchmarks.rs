//! Performance benchmarks for address book queries.
//!
//! These benchmarks measure lookups under different book sizes:
//! - Name search (case-insensitive substring)
//! - Phone search (digit substring)
//! - Upcoming birthdays over the whole book
//! - Rendering the contacts table

use assistant_x::table::render_contacts;
use assistant_x::{AddressBook, Birthday, Record};
use chrono::NaiveDate;
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box;
use std::time::Duration;

/// Build a book of `size` contacts with distinct names, phones and birthdays.
fn build_book(size: usize) -> AddressBook {
    (0..size)
        .map(|i| {
            let mut record = Record::new(&format!("Contact {:05}", i)).unwrap();
            record.add_phone(&format!("{:010}", 5_000_000_000u64 + i as u64)).unwrap();
            let birthday = format!("{:02}.{:02}.{}", i % 28 + 1, i % 12 + 1, 1950 + i % 50);
            record.set_birthday(Birthday::parse(&birthday).unwrap());
            record
        })
        .collect()
}

fn bench_search_by_name(c: &mut Criterion) {
    let mut group = c.benchmark_group("search_by_name");
    for size in [100, 1_000, 10_000] {
        let book = build_book(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &book, |b, book| {
            b.iter(|| book.search(black_box("contact 004")));
        });
    }
    group.finish();
}

fn bench_search_by_phone(c: &mut Criterion) {
    let mut group = c.benchmark_group("search_by_phone");
    for size in [100, 1_000, 10_000] {
        let book = build_book(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &book, |b, book| {
            b.iter(|| book.search(black_box("00042")));
        });
    }
    group.finish();
}

fn bench_upcoming_birthdays(c: &mut Criterion) {
    let today = NaiveDate::from_ymd_opt(2026, 12, 28).unwrap();
    let mut group = c.benchmark_group("upcoming_birthdays");
    for size in [100, 1_000, 10_000] {
        let book = build_book(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &book, |b, book| {
            b.iter(|| book.upcoming_birthdays(black_box(today), 7));
        });
    }
    group.finish();
}

fn bench_render_table(c: &mut Criterion) {
    let book = build_book(1_000);
    c.bench_function("render_contacts_1000", |b| {
        b.iter(|| render_contacts(book.list_all()));
    });
}

criterion_group! {
    name = benches;
    config = Criterion::default()
        .measurement_time(Duration::from_secs(5))
        .sample_size(50);
    targets = bench_search_by_name,
        bench_search_by_phone,
        bench_upcoming_birthdays,
        bench_render_table
}
criterion_main!(benches);
