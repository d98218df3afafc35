mod common;

use std::collections::HashSet;

use common::{LEAGUE, ScriptedSource, date, fixture, utc};
use inky_fixtures::selector::{
    DEFAULT_DAY_ADVANCE, DayAdvance, WindowPolicy, group_by_day, select, select_fixed_days,
    select_rolling,
};

fn ids(fixtures: &[inky_fixtures::model::Fixture]) -> Vec<u64> {
    fixtures.iter().map(|f| f.id).collect()
}

#[test]
fn rolling_output_is_unique_and_sorted() {
    let mut source = ScriptedSource::default()
        .day(
            date(2025, 1, 18),
            vec![
                fixture(3, utc(2025, 1, 18, 17, 30), "NS"),
                fixture(1, utc(2025, 1, 18, 12, 30), "FT"),
                fixture(2, utc(2025, 1, 18, 15, 0), "NS"),
            ],
        )
        .day(
            date(2025, 1, 19),
            vec![
                fixture(2, utc(2025, 1, 18, 15, 0), "NS"),
                fixture(5, utc(2025, 1, 19, 16, 30), "NS"),
                fixture(4, utc(2025, 1, 19, 14, 0), "NS"),
            ],
        )
        .next(vec![
            fixture(7, utc(2025, 1, 25, 15, 0), "NS"),
            fixture(6, utc(2025, 1, 20, 20, 0), "NS"),
            fixture(4, utc(2025, 1, 19, 14, 0), "NS"),
        ]);

    let out = select_rolling(&mut source, LEAGUE, date(2025, 1, 18), 6, 2, DayAdvance::WhenFewer);
    assert_eq!(ids(&out), vec![1, 2, 3, 4, 5, 6]);

    let unique: HashSet<u64> = out.iter().map(|f| f.id).collect();
    assert_eq!(unique.len(), out.len());
    assert!(out.windows(2).all(|w| w[0].kickoff <= w[1].kickoff));
    assert_eq!(source.next_calls, vec![6]);
}

#[test]
fn rolling_stops_once_target_is_met() {
    let busy: Vec<_> = (1..=12)
        .map(|i| fixture(i, utc(2025, 1, 18, 8 + i as u32, 0), "NS"))
        .collect();
    let mut source = ScriptedSource::default().day(date(2025, 1, 18), busy);

    let out = select_rolling(&mut source, LEAGUE, date(2025, 1, 18), 10, 7, DEFAULT_DAY_ADVANCE);
    assert_eq!(out.len(), 10);
    assert_eq!(out[0].id, 1);
    assert_eq!(source.days_requested, vec![date(2025, 1, 18)]);
    assert!(source.next_calls.is_empty());
}

#[test]
fn rolling_walks_empty_days_then_falls_back_to_next() {
    let mut source = ScriptedSource::default().next(vec![
        fixture(9, utc(2025, 1, 28, 19, 45), "NS"),
        fixture(8, utc(2025, 1, 28, 19, 30), "NS"),
    ]);

    let out = select_rolling(&mut source, LEAGUE, date(2025, 1, 18), 10, 3, DEFAULT_DAY_ADVANCE);
    assert_eq!(ids(&out), vec![8, 9]);
    assert_eq!(
        source.days_requested,
        vec![date(2025, 1, 18), date(2025, 1, 19), date(2025, 1, 20)]
    );
    assert_eq!(source.next_calls, vec![10]);
}

#[test]
fn failed_day_keeps_what_was_collected() {
    let mut source = ScriptedSource::default()
        .day(date(2025, 1, 18), vec![fixture(1, utc(2025, 1, 18, 12, 30), "FT")])
        .failing_day(date(2025, 1, 19))
        .day(date(2025, 1, 20), vec![fixture(2, utc(2025, 1, 20, 20, 0), "NS")]);

    let out = select_rolling(&mut source, LEAGUE, date(2025, 1, 18), 5, 7, DEFAULT_DAY_ADVANCE);
    assert_eq!(ids(&out), vec![1]);
    assert_eq!(source.days_requested, vec![date(2025, 1, 18), date(2025, 1, 19)]);
    assert_eq!(source.next_calls, vec![5]);
}

#[test]
fn failed_next_query_is_not_fatal() {
    let mut source = ScriptedSource::default()
        .day(date(2025, 1, 18), vec![fixture(1, utc(2025, 1, 18, 12, 30), "FT")]);

    let out = select_rolling(&mut source, LEAGUE, date(2025, 1, 18), 4, 1, DEFAULT_DAY_ADVANCE);
    assert_eq!(ids(&out), vec![1]);
    assert_eq!(source.next_calls, vec![4]);
}

// Day two yields exactly the two fixtures still needed, but one is a repeat.
fn exact_remaining_source() -> ScriptedSource {
    ScriptedSource::default()
        .day(
            date(2025, 1, 18),
            vec![
                fixture(1, utc(2025, 1, 18, 12, 30), "FT"),
                fixture(2, utc(2025, 1, 18, 15, 0), "NS"),
            ],
        )
        .day(
            date(2025, 1, 19),
            vec![
                fixture(2, utc(2025, 1, 18, 15, 0), "NS"),
                fixture(3, utc(2025, 1, 19, 14, 0), "NS"),
            ],
        )
        .day(date(2025, 1, 20), vec![fixture(4, utc(2025, 1, 20, 20, 0), "NS")])
        .next(Vec::new())
}

#[test]
fn day_advance_when_fewer_stops_on_exact_count() {
    let mut source = exact_remaining_source();
    let out = select_rolling(&mut source, LEAGUE, date(2025, 1, 18), 4, 7, DayAdvance::WhenFewer);
    assert_eq!(ids(&out), vec![1, 2, 3]);
    assert_eq!(source.days_requested.len(), 2);
    assert_eq!(source.next_calls, vec![4]);
}

#[test]
fn day_advance_when_fewer_or_equal_keeps_walking() {
    let mut source = exact_remaining_source();
    let out = select_rolling(
        &mut source,
        LEAGUE,
        date(2025, 1, 18),
        4,
        7,
        DayAdvance::WhenFewerOrEqual,
    );
    assert_eq!(ids(&out), vec![1, 2, 3, 4]);
    assert_eq!(source.days_requested.len(), 3);
    assert!(source.next_calls.is_empty());
}

#[test]
fn zero_target_fetches_nothing() {
    let mut source = ScriptedSource::default();
    let out = select_rolling(&mut source, LEAGUE, date(2025, 1, 18), 0, 7, DEFAULT_DAY_ADVANCE);
    assert!(out.is_empty());
    assert!(source.days_requested.is_empty());
}

#[test]
fn fixed_window_marks_empty_days_and_has_no_cap() {
    let many: Vec<_> = (1..=12)
        .map(|i| fixture(i, utc(2025, 1, 18, 8 + i as u32, 0), "NS"))
        .collect();
    let mut source = ScriptedSource::default()
        .day(date(2025, 1, 18), many)
        .day(date(2025, 1, 20), vec![fixture(20, utc(2025, 1, 20, 20, 0), "NS")]);

    let days = select_fixed_days(&mut source, LEAGUE, date(2025, 1, 18), 3);
    assert_eq!(days.len(), 3);
    assert_eq!(days[0].fixtures.len(), 12);
    assert_eq!(days[1].date, date(2025, 1, 19));
    assert!(days[1].fixtures.is_empty());
    assert_eq!(ids(&days[2].fixtures), vec![20]);
    assert!(source.next_calls.is_empty());
}

#[test]
fn fixed_window_stops_at_failed_day() {
    let mut source = ScriptedSource::default()
        .day(date(2025, 1, 18), vec![fixture(1, utc(2025, 1, 18, 12, 30), "FT")])
        .failing_day(date(2025, 1, 19));

    let days = select_fixed_days(&mut source, LEAGUE, date(2025, 1, 18), 3);
    assert_eq!(days.len(), 1);
    assert_eq!(source.days_requested.len(), 2);
}

#[test]
fn fixed_window_files_fixtures_under_their_local_day() {
    // 23:30 UTC in July is 00:30 the next morning locally.
    let late = fixture(1, utc(2025, 7, 12, 23, 30), "NS");
    let mut source = ScriptedSource::default().day(date(2025, 7, 12), vec![late.clone()]);

    let one = select_fixed_days(&mut source, LEAGUE, date(2025, 7, 12), 1);
    assert_eq!(one.len(), 1);
    assert_eq!(one[0].date, date(2025, 7, 12));
    assert!(one[0].fixtures.is_empty());

    let mut source = ScriptedSource::default().day(date(2025, 7, 12), vec![late]);
    let two = select_fixed_days(&mut source, LEAGUE, date(2025, 7, 12), 2);
    assert!(two[0].fixtures.is_empty());
    assert_eq!(two[1].date, date(2025, 7, 13));
    assert_eq!(ids(&two[1].fixtures), vec![1]);
    for day in &two {
        assert!(day.fixtures.iter().all(|f| f.local_date() == day.date));
    }
}

#[test]
fn fixed_window_drops_repeats_across_days() {
    let mut source = ScriptedSource::default()
        .day(
            date(2025, 1, 18),
            vec![
                fixture(2, utc(2025, 1, 18, 15, 0), "NS"),
                fixture(1, utc(2025, 1, 18, 12, 30), "FT"),
            ],
        )
        .day(
            date(2025, 1, 19),
            vec![
                fixture(2, utc(2025, 1, 18, 15, 0), "NS"),
                fixture(3, utc(2025, 1, 19, 14, 0), "NS"),
            ],
        );

    let days = select_fixed_days(&mut source, LEAGUE, date(2025, 1, 18), 2);
    assert_eq!(ids(&days[0].fixtures), vec![1, 2]);
    assert_eq!(ids(&days[1].fixtures), vec![3]);
}

#[test]
fn groups_by_local_calendar_day() {
    // 23:30 UTC in July is 00:30 the next morning locally.
    let fixtures = vec![
        fixture(1, utc(2025, 7, 12, 18, 0), "NS"),
        fixture(2, utc(2025, 7, 12, 23, 30), "NS"),
        fixture(3, utc(2025, 7, 13, 14, 0), "NS"),
    ];
    let days = group_by_day(fixtures);
    assert_eq!(days.len(), 2);
    assert_eq!(days[0].date, date(2025, 7, 12));
    assert_eq!(ids(&days[1].fixtures), vec![2, 3]);
}

#[test]
fn select_dispatches_on_policy() {
    let mut source = ScriptedSource::default()
        .day(date(2025, 1, 18), vec![fixture(1, utc(2025, 1, 18, 12, 30), "FT")])
        .day(date(2025, 1, 19), vec![fixture(2, utc(2025, 1, 19, 14, 0), "NS")]);

    let days = select(&mut source, LEAGUE, date(2025, 1, 18), &WindowPolicy::fixed(2), 10);
    assert_eq!(days.len(), 2);

    let policy = WindowPolicy::Rolling {
        max_days: 2,
        advance: DayAdvance::WhenFewer,
    };
    let mut source = ScriptedSource::default()
        .day(date(2025, 1, 18), vec![fixture(1, utc(2025, 1, 18, 12, 30), "FT")])
        .day(date(2025, 1, 19), vec![fixture(2, utc(2025, 1, 19, 14, 0), "NS")])
        .next(Vec::new());
    let days = select(&mut source, LEAGUE, date(2025, 1, 18), &policy, 10);
    assert_eq!(days.len(), 2);
    assert_eq!(days[1].date, date(2025, 1, 19));
}
