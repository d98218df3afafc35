use std::collections::HashSet;

use chrono::NaiveDate;

use crate::model::{Fixture, FixtureId, MatchDay};
use crate::source::{FixtureSource, League};

/// When the rolling window moves on to the next calendar day. `remaining` is
/// the shortfall before the day was fetched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DayAdvance {
    #[default]
    WhenFewer,
    WhenFewerOrEqual,
}

pub const DEFAULT_DAY_ADVANCE: DayAdvance = DayAdvance::WhenFewer;

/// Days the rolling window walks before falling back to a "next N" query.
pub const DEFAULT_ROLLING_MAX_DAYS: u32 = 7;

impl DayAdvance {
    pub fn should_advance(self, yielded: usize, remaining: usize) -> bool {
        match self {
            Self::WhenFewer => yielded < remaining,
            Self::WhenFewerOrEqual => yielded <= remaining,
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "fewer" | "when-fewer" => Some(Self::WhenFewer),
            "fewer-or-equal" | "when-fewer-or-equal" => Some(Self::WhenFewerOrEqual),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WindowPolicy {
    FixedDays { days: u32 },
    Rolling { max_days: u32, advance: DayAdvance },
}

impl WindowPolicy {
    pub fn fixed(days: u32) -> Self {
        Self::FixedDays { days }
    }

    pub fn rolling() -> Self {
        Self::Rolling {
            max_days: DEFAULT_ROLLING_MAX_DAYS,
            advance: DEFAULT_DAY_ADVANCE,
        }
    }
}

pub fn select<S: FixtureSource + ?Sized>(
    source: &mut S,
    league: League,
    today: NaiveDate,
    policy: &WindowPolicy,
    target_count: usize,
) -> Vec<MatchDay> {
    match policy {
        WindowPolicy::FixedDays { days } => select_fixed_days(source, league, today, *days),
        WindowPolicy::Rolling { max_days, advance } => {
            let fixtures =
                select_rolling(source, league, today, target_count, *max_days, *advance);
            group_by_day(fixtures)
        }
    }
}

/// One `MatchDay` per local calendar day, empty days included. A failed fetch
/// ends the window at the day before it.
pub fn select_fixed_days<S: FixtureSource + ?Sized>(
    source: &mut S,
    league: League,
    today: NaiveDate,
    days: u32,
) -> Vec<MatchDay> {
    let mut out: Vec<MatchDay> = Vec::new();
    let mut fetched: Vec<Fixture> = Vec::new();
    let mut seen = HashSet::new();
    let mut date = today;

    for offset in 0..days {
        if offset > 0 {
            let Some(next) = date.succ_opt() else {
                break;
            };
            date = next;
        }
        match source.fixtures_on(league, date) {
            Ok(fixtures) => fetched.extend(fixtures.into_iter().filter(|f| seen.insert(f.id))),
            Err(err) => {
                log::warn!("fixtures for {date} unavailable, window stops here: {err:#}");
                break;
            }
        }
        out.push(MatchDay {
            date,
            fixtures: Vec::new(),
        });
    }

    // A day's query can return kickoffs that fall on a neighbouring local day.
    for fixture in fetched {
        let local = fixture.local_date();
        match out.iter_mut().find(|day| day.date == local) {
            Some(day) => day.fixtures.push(fixture),
            None => log::debug!("fixture {} on {local} is outside the window", fixture.id),
        }
    }
    for day in &mut out {
        sort_by_kickoff(&mut day.fixtures);
        if day.fixtures.is_empty() {
            log::info!("no fixtures on {}", day.date);
        }
    }
    out
}

/// Collects up to `target_count` distinct fixtures, earliest kickoff first.
pub fn select_rolling<S: FixtureSource + ?Sized>(
    source: &mut S,
    league: League,
    today: NaiveDate,
    target_count: usize,
    max_days: u32,
    advance: DayAdvance,
) -> Vec<Fixture> {
    let mut acc: Vec<Fixture> = Vec::new();
    let mut seen: HashSet<FixtureId> = HashSet::new();
    if target_count == 0 {
        return acc;
    }

    let mut date = today;
    for _ in 0..max_days.max(1) {
        let remaining = target_count - acc.len();
        let fetched = match source.fixtures_on(league, date) {
            Ok(fixtures) => fixtures,
            Err(err) => {
                log::warn!("fixtures for {date} unavailable, window stops here: {err:#}");
                break;
            }
        };
        let yielded = fetched.len();
        merge_unique(&mut acc, &mut seen, fetched);
        log::debug!("{date}: {yielded} fixtures, {} collected", acc.len());

        if acc.len() >= target_count || !advance.should_advance(yielded, remaining) {
            break;
        }
        let Some(next) = date.succ_opt() else {
            break;
        };
        date = next;
    }

    if acc.len() < target_count {
        log::info!(
            "{} of {target_count} fixtures after day walk, asking for next {target_count}",
            acc.len()
        );
        match source.next_fixtures(league, target_count) {
            Ok(next) => merge_unique(&mut acc, &mut seen, next),
            Err(err) => log::warn!("next fixtures unavailable: {err:#}"),
        }
    }

    sort_by_kickoff(&mut acc);
    acc.truncate(target_count);
    acc
}

/// Splits a kickoff-ordered list into local calendar days.
pub fn group_by_day(fixtures: Vec<Fixture>) -> Vec<MatchDay> {
    let mut days: Vec<MatchDay> = Vec::new();
    for fixture in fixtures {
        let date = fixture.local_date();
        match days.last_mut() {
            Some(day) if day.date == date => day.fixtures.push(fixture),
            _ => days.push(MatchDay {
                date,
                fixtures: vec![fixture],
            }),
        }
    }
    days
}

fn merge_unique(acc: &mut Vec<Fixture>, seen: &mut HashSet<FixtureId>, incoming: Vec<Fixture>) {
    for fixture in incoming {
        if seen.insert(fixture.id) {
            acc.push(fixture);
        }
    }
}

fn sort_by_kickoff(fixtures: &mut [Fixture]) {
    fixtures.sort_by_key(|f| (f.kickoff, f.id));
}
