use anyhow::Result;
use chrono::NaiveDate;

use crate::model::{Fixture, FixtureId, MatchEvent, Standings, StandingsRow};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct League {
    pub id: u32,
    pub season: i32,
}

impl League {
    pub const fn new(id: u32, season: i32) -> Self {
        Self { id, season }
    }
}

/// Remote sports-data endpoints the board pulls from. Implementations report
/// failures as errors; the board decides how to degrade.
pub trait FixtureSource {
    fn standings(&mut self, league: League) -> Result<Vec<StandingsRow>>;

    fn fixtures_on(&mut self, league: League, date: NaiveDate) -> Result<Vec<Fixture>>;

    fn next_fixtures(&mut self, league: League, count: usize) -> Result<Vec<Fixture>>;

    fn events(&mut self, fixture: FixtureId) -> Result<Vec<MatchEvent>>;
}

pub fn standings_or_empty<S: FixtureSource + ?Sized>(source: &mut S, league: League) -> Standings {
    match source.standings(league) {
        Ok(rows) => {
            log::info!("standings: {} teams for league {}", rows.len(), league.id);
            Standings::from_rows(&rows)
        }
        Err(err) => {
            log::warn!("standings fetch failed for league {}: {err:#}", league.id);
            Standings::default()
        }
    }
}

pub fn events_or_empty<S: FixtureSource + ?Sized>(source: &mut S, fixture: FixtureId) -> Vec<MatchEvent> {
    source.events(fixture).unwrap_or_else(|err| {
        log::warn!("events fetch failed for fixture {fixture}: {err:#}");
        Vec::new()
    })
}
