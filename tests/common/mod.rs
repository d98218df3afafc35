#![allow(dead_code)]

use std::collections::HashMap;

use anyhow::{Result, anyhow};
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use inky_fixtures::model::{
    EventKind, Fixture, FixtureId, MatchEvent, MatchStatus, Score, StandingsRow, Team, TeamId,
};
use inky_fixtures::source::{FixtureSource, League};

pub const LEAGUE: League = League::new(39, 2024);

/// Canned source. Days missing from `days` return an empty list; days mapped
/// to `None` fail. With `events_fail` set every event lookup fails.
#[derive(Default)]
pub struct ScriptedSource {
    pub days: HashMap<NaiveDate, Option<Vec<Fixture>>>,
    pub next: Option<Vec<Fixture>>,
    pub events: HashMap<FixtureId, Vec<MatchEvent>>,
    pub standings: Option<Vec<StandingsRow>>,
    pub events_fail: bool,
    pub days_requested: Vec<NaiveDate>,
    pub next_calls: Vec<usize>,
    pub event_calls: Vec<FixtureId>,
}

impl ScriptedSource {
    pub fn day(mut self, date: NaiveDate, fixtures: Vec<Fixture>) -> Self {
        self.days.insert(date, Some(fixtures));
        self
    }

    pub fn failing_day(mut self, date: NaiveDate) -> Self {
        self.days.insert(date, None);
        self
    }

    pub fn next(mut self, fixtures: Vec<Fixture>) -> Self {
        self.next = Some(fixtures);
        self
    }

    pub fn events(mut self, id: FixtureId, events: Vec<MatchEvent>) -> Self {
        self.events.insert(id, events);
        self
    }

    pub fn failing_events(mut self) -> Self {
        self.events_fail = true;
        self
    }

    pub fn standings(mut self, rows: Vec<StandingsRow>) -> Self {
        self.standings = Some(rows);
        self
    }
}

impl FixtureSource for ScriptedSource {
    fn standings(&mut self, _league: League) -> Result<Vec<StandingsRow>> {
        self.standings.clone().ok_or_else(|| anyhow!("standings offline"))
    }

    fn fixtures_on(&mut self, _league: League, date: NaiveDate) -> Result<Vec<Fixture>> {
        self.days_requested.push(date);
        match self.days.get(&date) {
            Some(Some(fixtures)) => Ok(fixtures.clone()),
            Some(None) => Err(anyhow!("http 500 for {date}")),
            None => Ok(Vec::new()),
        }
    }

    fn next_fixtures(&mut self, _league: League, count: usize) -> Result<Vec<Fixture>> {
        self.next_calls.push(count);
        self.next.clone().ok_or_else(|| anyhow!("next offline"))
    }

    fn events(&mut self, fixture: FixtureId) -> Result<Vec<MatchEvent>> {
        self.event_calls.push(fixture);
        if self.events_fail {
            return Err(anyhow!("events offline for {fixture}"));
        }
        Ok(self.events.get(&fixture).cloned().unwrap_or_default())
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn utc(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
}

pub fn team(id: TeamId) -> Team {
    Team::new(id, format!("Team {id}"))
}

pub fn fixture(id: FixtureId, kickoff: DateTime<Utc>, status: &str) -> Fixture {
    Fixture {
        id,
        kickoff,
        home: team(id as TeamId * 2),
        away: team(id as TeamId * 2 + 1),
        score: None,
        status: MatchStatus::from_short(status),
    }
}

pub fn played(id: FixtureId, kickoff: DateTime<Utc>, status: &str, home: u8, away: u8) -> Fixture {
    Fixture {
        score: Some(Score { home, away }),
        ..fixture(id, kickoff, status)
    }
}

pub fn goal(player: &str, minute: u16) -> MatchEvent {
    MatchEvent {
        kind: EventKind::Goal,
        player: player.to_string(),
        minute,
    }
}

pub fn standing(rank: u16, team_id: TeamId) -> StandingsRow {
    StandingsRow {
        rank,
        team: team(team_id),
        played: 20,
        won: 10,
        drawn: 5,
        lost: 5,
        goals_for: 30,
        goals_against: 20,
        goal_diff: 10,
        points: 35,
        form: "WDLWW".to_string(),
    }
}
