use chrono::NaiveDate;
use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use inky_fixtures::api_football::{parse_events_json, parse_fixtures_json, parse_standings_json};
use inky_fixtures::canvas::RecordingCanvas;
use inky_fixtures::crest::CrestMap;
use inky_fixtures::fake_feed::DemoSource;
use inky_fixtures::layout::{LayoutConfig, lay_out};
use inky_fixtures::model::Standings;
use inky_fixtures::selector::{WindowPolicy, select};
use inky_fixtures::source::{FixtureSource, League};
use inky_fixtures::text::wrap_text;

const LEAGUE: League = League::new(39, 2024);

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 15).expect("valid date")
}

fn bench_fixtures_parse(c: &mut Criterion) {
    c.bench_function("fixtures_parse", |b| {
        b.iter(|| {
            let rows = parse_fixtures_json(black_box(FIXTURES_JSON)).unwrap();
            black_box(rows.len());
        })
    });
}

fn bench_events_parse(c: &mut Criterion) {
    c.bench_function("events_parse", |b| {
        b.iter(|| {
            let events = parse_events_json(black_box(EVENTS_JSON)).unwrap();
            black_box(events.len());
        })
    });
}

fn bench_standings_parse(c: &mut Criterion) {
    c.bench_function("standings_parse", |b| {
        b.iter(|| {
            let rows = parse_standings_json(black_box(STANDINGS_JSON)).unwrap();
            black_box(rows.len());
        })
    });
}

fn bench_wrap_details(c: &mut Criterion) {
    let joined = (0..12)
        .map(|i| format!("Goal: Player Number {i} ({}')", 5 + i * 7))
        .collect::<Vec<_>>()
        .join("; ");
    c.bench_function("wrap_details", |b| {
        b.iter(|| black_box(wrap_text(black_box(&joined), 63).len()))
    });
}

fn bench_select_and_lay_out(c: &mut Criterion) {
    let layout = LayoutConfig::standard();
    let crests = CrestMap::default();

    c.bench_function("select_and_lay_out", |b| {
        b.iter(|| {
            let mut source = DemoSource::new(today());
            let standings = Standings::from_rows(&source.standings(LEAGUE).unwrap());
            let days = select(&mut source, LEAGUE, today(), &WindowPolicy::rolling(), 10);
            let mut canvas = RecordingCanvas::new(800, 480);
            let report =
                lay_out(&layout, &mut canvas, &days, &standings, &mut source, &crests).unwrap();
            black_box(report.used_height());
        })
    });
}

criterion_group!(
    perf,
    bench_fixtures_parse,
    bench_events_parse,
    bench_standings_parse,
    bench_wrap_details,
    bench_select_and_lay_out
);
criterion_main!(perf);

static FIXTURES_JSON: &str = include_str!("../tests/fixtures/api_fixtures.json");
static EVENTS_JSON: &str = include_str!("../tests/fixtures/api_events.json");
static STANDINGS_JSON: &str = include_str!("../tests/fixtures/api_standings.json");
