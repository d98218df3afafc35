use std::collections::HashMap;

use anyhow::Result;
use chrono::{DateTime, Days, NaiveDate, NaiveTime, Utc};

use crate::model::{
    EventKind, Fixture, FixtureId, MatchEvent, MatchStatus, Score, StandingsRow, StatusClass,
    Team, TeamId,
};
use crate::source::{FixtureSource, League};

const TEAMS: [(TeamId, &str); 20] = [
    (40, "Liverpool"),
    (42, "Arsenal"),
    (65, "Nottingham Forest"),
    (49, "Chelsea"),
    (50, "Manchester City"),
    (34, "Newcastle"),
    (51, "Brighton"),
    (36, "Fulham"),
    (66, "Aston Villa"),
    (35, "Bournemouth"),
    (55, "Brentford"),
    (52, "Crystal Palace"),
    (33, "Manchester United"),
    (47, "Tottenham"),
    (45, "Everton"),
    (48, "West Ham"),
    (39, "Wolves"),
    (46, "Leicester"),
    (57, "Ipswich"),
    (41, "Southampton"),
];

/// (day offset, UTC kickoff, home index, away index, status, score)
type Slot = (u64, (u32, u32), usize, usize, &'static str, Option<(u8, u8)>);

const SCHEDULE: [Slot; 14] = [
    (0, (11, 30), 12, 0, "FT", Some((2, 1))),
    (0, (14, 0), 4, 13, "2H", Some((1, 1))),
    (0, (16, 30), 1, 14, "NS", None),
    (2, (19, 0), 5, 18, "NS", None),
    (2, (19, 45), 3, 19, "NS", None),
    (3, (14, 0), 8, 15, "PST", None),
    (3, (14, 0), 6, 10, "NS", None),
    (3, (16, 30), 2, 16, "NS", None),
    (5, (11, 30), 7, 9, "NS", None),
    (5, (14, 0), 11, 17, "NS", None),
    (5, (16, 30), 0, 4, "TBD", None),
    (6, (13, 0), 13, 1, "NS", None),
    (6, (15, 30), 14, 12, "NS", None),
    (9, (14, 0), 19, 3, "NS", None),
];

const FIRST_FIXTURE_ID: FixtureId = 1_208_000;

#[derive(Debug, Clone)]
pub struct DemoSource {
    fixtures: Vec<Fixture>,
    events: HashMap<FixtureId, Vec<MatchEvent>>,
}

impl DemoSource {
    pub fn new(today: NaiveDate) -> Self {
        let fixtures: Vec<Fixture> = SCHEDULE
            .iter()
            .enumerate()
            .filter_map(|(idx, slot)| seed_fixture(today, idx, slot))
            .collect();
        let events = fixtures
            .iter()
            .filter(|f| f.score.is_some())
            .map(|f| (f.id, seed_events(f)))
            .collect();
        Self { fixtures, events }
    }

    pub fn fixtures(&self) -> &[Fixture] {
        &self.fixtures
    }
}

impl FixtureSource for DemoSource {
    fn standings(&mut self, _league: League) -> Result<Vec<StandingsRow>> {
        Ok(seed_standings())
    }

    fn fixtures_on(&mut self, _league: League, date: NaiveDate) -> Result<Vec<Fixture>> {
        Ok(self
            .fixtures
            .iter()
            .filter(|f| f.local_date() == date)
            .cloned()
            .collect())
    }

    fn next_fixtures(&mut self, _league: League, count: usize) -> Result<Vec<Fixture>> {
        let mut upcoming: Vec<Fixture> = self
            .fixtures
            .iter()
            .filter(|f| {
                matches!(
                    f.status.class(),
                    StatusClass::NotStarted | StatusClass::TimeUndetermined
                )
            })
            .cloned()
            .collect();
        upcoming.sort_by_key(|f| (f.kickoff, f.id));
        upcoming.truncate(count);
        Ok(upcoming)
    }

    fn events(&mut self, fixture: FixtureId) -> Result<Vec<MatchEvent>> {
        Ok(self.events.get(&fixture).cloned().unwrap_or_default())
    }
}

fn seed_fixture(today: NaiveDate, idx: usize, slot: &Slot) -> Option<Fixture> {
    let (offset, (hour, minute), home, away, status, score) = *slot;
    let day = today.checked_add_days(Days::new(offset))?;
    let kickoff: DateTime<Utc> = day.and_time(NaiveTime::from_hms_opt(hour, minute, 0)?).and_utc();
    Some(Fixture {
        id: FIRST_FIXTURE_ID + idx as FixtureId,
        kickoff,
        home: team(home)?,
        away: team(away)?,
        score: score.map(|(home, away)| Score { home, away }),
        status: MatchStatus::from_short(status),
    })
}

fn team(idx: usize) -> Option<Team> {
    TEAMS.get(idx).map(|(id, name)| Team::new(*id, *name))
}

fn seed_events(fixture: &Fixture) -> Vec<MatchEvent> {
    let scorers = ["Fernandes", "Salah", "Haaland", "Son", "Hojlund", "Szoboszlai"];
    let mut events = Vec::new();
    let Some(score) = fixture.score else {
        return events;
    };
    let goals = usize::from(score.home) + usize::from(score.away);
    for (i, name) in scorers.iter().cycle().skip(fixture.id as usize % 3).take(goals).enumerate() {
        events.push(MatchEvent {
            kind: EventKind::Goal,
            player: (*name).to_string(),
            minute: 12 + 17 * i as u16,
        });
    }
    events.push(MatchEvent {
        kind: EventKind::YellowCard,
        player: "Mainoo".to_string(),
        minute: 34,
    });
    if fixture.status.class() == StatusClass::Finished {
        events.push(MatchEvent {
            kind: EventKind::RedCard,
            player: "Van Dijk".to_string(),
            minute: 81,
        });
    }
    events.sort_by_key(|e| e.minute);
    events
}

fn seed_standings() -> Vec<StandingsRow> {
    let forms = ["WWDWW", "WDWWL", "WWLWD", "DWWLW", "LWDWW", "WLWDW", "DDWLW"];
    TEAMS
        .iter()
        .enumerate()
        .map(|(idx, (id, name))| {
            let i = idx as u16;
            let won = 20u16.saturating_sub(i);
            let drawn = 4 + i % 4;
            let lost = 32 - won - drawn;
            let goals_for = 70u16.saturating_sub(2 * i);
            let goals_against = 25 + 2 * i;
            StandingsRow {
                rank: i + 1,
                team: Team::new(*id, *name),
                played: won + drawn + lost,
                won,
                drawn,
                lost,
                goals_for,
                goals_against,
                goal_diff: i32::from(goals_for) - i32::from(goals_against),
                points: 3 * won + drawn,
                form: forms[idx % forms.len()].to_string(),
            }
        })
        .collect()
}
