use std::time::Duration;

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::connect::Link;
use crate::http_client::get_text;
use crate::model::{
    EventKind, Fixture, FixtureId, MatchEvent, MatchStatus, Score, StandingsRow, Team,
};
use crate::source::{FixtureSource, League};

pub const DEFAULT_BASE_URL: &str = "https://v3.football.api-sports.io";
const API_KEY_HEADER: &str = "x-apisports-key";
/// Calendar the `date` query is evaluated in; matches `clock::to_local`.
const FIXTURE_TIMEZONE: &str = "Europe/London";

/// API-Football v3 client.
pub struct ApiFootball {
    base_url: String,
    api_key: String,
}

impl ApiFootball {
    pub fn new(base_url: &str, api_key: &str) -> Result<Self> {
        if api_key.trim().is_empty() {
            return Err(anyhow::anyhow!("API-Football key is empty"));
        }
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.trim().to_string(),
        })
    }

    fn get(&self, path: &str, query: &[(&str, String)], timeout: Option<Duration>) -> Result<String> {
        let url = format!("{}/{path}", self.base_url);
        get_text(&url, query, &[(API_KEY_HEADER, self.api_key.as_str())], timeout)
    }
}

impl FixtureSource for ApiFootball {
    fn standings(&mut self, league: League) -> Result<Vec<StandingsRow>> {
        let body = self.get(
            "standings",
            &[
                ("league", league.id.to_string()),
                ("season", league.season.to_string()),
            ],
            None,
        )?;
        parse_standings_json(&body)
    }

    fn fixtures_on(&mut self, league: League, date: NaiveDate) -> Result<Vec<Fixture>> {
        let body = self.get(
            "fixtures",
            &[
                ("league", league.id.to_string()),
                ("season", league.season.to_string()),
                ("date", date.format("%Y-%m-%d").to_string()),
                ("timezone", FIXTURE_TIMEZONE.to_string()),
            ],
            None,
        )?;
        let fixtures = parse_fixtures_json(&body)?;
        log::info!("{} fixtures on {date}", fixtures.len());
        Ok(fixtures)
    }

    fn next_fixtures(&mut self, league: League, count: usize) -> Result<Vec<Fixture>> {
        let body = self.get(
            "fixtures",
            &[
                ("league", league.id.to_string()),
                ("season", league.season.to_string()),
                ("next", count.to_string()),
                ("timezone", FIXTURE_TIMEZONE.to_string()),
            ],
            None,
        )?;
        let fixtures = parse_fixtures_json(&body)?;
        log::info!("{} upcoming fixtures from next={count}", fixtures.len());
        Ok(fixtures)
    }

    fn events(&mut self, fixture: FixtureId) -> Result<Vec<MatchEvent>> {
        let body = self.get("fixtures/events", &[("fixture", fixture.to_string())], None)?;
        parse_events_json(&body)
    }
}

impl Link for ApiFootball {
    fn connect(&mut self, timeout: Duration) -> Result<()> {
        self.get("status", &[], Some(timeout))
            .context("status check failed")
            .map(|_| ())
    }
}

#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(default)]
    errors: Value,
    #[serde(default)]
    response: Value,
}

// The API reports quota and auth problems in `errors` with a 200 status.
fn has_errors(errors: &Value) -> bool {
    match errors {
        Value::Null => false,
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
        Value::String(s) => !s.trim().is_empty(),
        _ => true,
    }
}

fn parse_response_items(raw: &str, what: &str) -> Result<Vec<Value>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Ok(Vec::new());
    }
    let envelope: Envelope =
        serde_json::from_str(trimmed).with_context(|| format!("invalid {what} json"))?;
    if has_errors(&envelope.errors) {
        return Err(anyhow::anyhow!("{what} api errors: {}", envelope.errors));
    }
    match envelope.response {
        Value::Array(items) => Ok(items),
        Value::Null => Ok(Vec::new()),
        other => Err(anyhow::anyhow!("unexpected {what} response shape: {other}")),
    }
}

fn parse_items<T: DeserializeOwned>(items: Vec<Value>, what: &str) -> Vec<T> {
    items
        .into_iter()
        .filter_map(|item| match serde_json::from_value::<T>(item) {
            Ok(parsed) => Some(parsed),
            Err(err) => {
                log::debug!("skipping malformed {what} entry: {err}");
                None
            }
        })
        .collect()
}

#[derive(Debug, Deserialize)]
struct ApiFixture {
    fixture: ApiFixtureInfo,
    teams: ApiTeams,
    #[serde(default)]
    goals: ApiGoals,
}

#[derive(Debug, Deserialize)]
struct ApiFixtureInfo {
    id: u64,
    #[serde(default)]
    timestamp: Option<i64>,
    #[serde(default)]
    date: Option<String>,
    #[serde(default)]
    status: ApiStatus,
}

#[derive(Debug, Default, Deserialize)]
struct ApiStatus {
    #[serde(default)]
    short: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiTeams {
    home: ApiTeam,
    away: ApiTeam,
}

#[derive(Debug, Deserialize)]
struct ApiTeam {
    id: u32,
    #[serde(default)]
    name: String,
}

#[derive(Debug, Default, Deserialize)]
struct ApiGoals {
    #[serde(default)]
    home: Option<u8>,
    #[serde(default)]
    away: Option<u8>,
}

pub fn parse_fixtures_json(raw: &str) -> Result<Vec<Fixture>> {
    let items = parse_response_items(raw, "fixtures")?;
    Ok(parse_items::<ApiFixture>(items, "fixture")
        .into_iter()
        .filter_map(into_fixture)
        .collect())
}

fn into_fixture(item: ApiFixture) -> Option<Fixture> {
    let kickoff = item
        .fixture
        .timestamp
        .and_then(|ts| DateTime::<Utc>::from_timestamp(ts, 0))
        .or_else(|| {
            item.fixture
                .date
                .as_deref()
                .and_then(|d| DateTime::parse_from_rfc3339(d).ok())
                .map(|d| d.with_timezone(&Utc))
        })?;
    let score = match (item.goals.home, item.goals.away) {
        (Some(home), Some(away)) => Some(Score { home, away }),
        _ => None,
    };
    let status = item
        .fixture
        .status
        .short
        .as_deref()
        .map(MatchStatus::from_short)
        .unwrap_or_else(|| MatchStatus::Other(String::new()));
    Some(Fixture {
        id: item.fixture.id,
        kickoff,
        home: Team::new(item.teams.home.id, item.teams.home.name),
        away: Team::new(item.teams.away.id, item.teams.away.name),
        score,
        status,
    })
}

#[derive(Debug, Deserialize)]
struct ApiEvent {
    #[serde(default)]
    time: ApiEventTime,
    #[serde(default)]
    player: ApiPlayer,
    #[serde(rename = "type", default)]
    kind: String,
    #[serde(default)]
    detail: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct ApiEventTime {
    #[serde(default)]
    elapsed: Option<u16>,
}

#[derive(Debug, Default, Deserialize)]
struct ApiPlayer {
    #[serde(default)]
    name: Option<String>,
}

/// Goals and cards in the order the API lists them. Substitutions, VAR
/// reviews and missed penalties are dropped.
pub fn parse_events_json(raw: &str) -> Result<Vec<MatchEvent>> {
    let items = parse_response_items(raw, "events")?;
    Ok(parse_items::<ApiEvent>(items, "event")
        .into_iter()
        .filter_map(into_event)
        .collect())
}

fn into_event(item: ApiEvent) -> Option<MatchEvent> {
    let detail = item.detail.as_deref().unwrap_or_default();
    let kind = match item.kind.to_ascii_lowercase().as_str() {
        "goal" if detail.eq_ignore_ascii_case("missed penalty") => return None,
        "goal" => EventKind::Goal,
        "card" if detail.eq_ignore_ascii_case("yellow card") => EventKind::YellowCard,
        "card" => EventKind::RedCard,
        _ => return None,
    };
    Some(MatchEvent {
        kind,
        player: item.player.name.unwrap_or_default().trim().to_string(),
        minute: item.time.elapsed.unwrap_or(0),
    })
}

#[derive(Debug, Deserialize)]
struct ApiStandingsItem {
    league: ApiLeagueStandings,
}

#[derive(Debug, Deserialize)]
struct ApiLeagueStandings {
    #[serde(default)]
    standings: Vec<Vec<Value>>,
}

#[derive(Debug, Deserialize)]
struct ApiStandingRow {
    rank: u16,
    team: ApiTeam,
    #[serde(default)]
    points: Option<u16>,
    #[serde(rename = "goalsDiff", default)]
    goals_diff: Option<i32>,
    #[serde(default)]
    form: Option<String>,
    #[serde(default)]
    all: ApiRecord,
}

#[derive(Debug, Default, Deserialize)]
struct ApiRecord {
    #[serde(default)]
    played: Option<u16>,
    #[serde(default)]
    win: Option<u16>,
    #[serde(default)]
    draw: Option<u16>,
    #[serde(default)]
    lose: Option<u16>,
    #[serde(default)]
    goals: ApiGoalTotals,
}

#[derive(Debug, Default, Deserialize)]
struct ApiGoalTotals {
    #[serde(rename = "for", default)]
    scored: Option<u16>,
    #[serde(default)]
    against: Option<u16>,
}

/// First table of the first league in the response (group-stage competitions
/// carry several).
pub fn parse_standings_json(raw: &str) -> Result<Vec<StandingsRow>> {
    let items = parse_response_items(raw, "standings")?;
    let Some(first) = parse_items::<ApiStandingsItem>(items, "standings").into_iter().next()
    else {
        return Ok(Vec::new());
    };
    let Some(table) = first.league.standings.into_iter().next() else {
        return Ok(Vec::new());
    };
    Ok(parse_items::<ApiStandingRow>(table, "standings row")
        .into_iter()
        .map(|row| StandingsRow {
            rank: row.rank,
            team: Team::new(row.team.id, row.team.name),
            played: row.all.played.unwrap_or(0),
            won: row.all.win.unwrap_or(0),
            drawn: row.all.draw.unwrap_or(0),
            lost: row.all.lose.unwrap_or(0),
            goals_for: row.all.goals.scored.unwrap_or(0),
            goals_against: row.all.goals.against.unwrap_or(0),
            goal_diff: row.goals_diff.unwrap_or(0),
            points: row.points.unwrap_or(0),
            form: row.form.unwrap_or_default(),
        })
        .collect())
}
