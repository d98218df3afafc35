use std::collections::HashMap;
use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

use crate::clock::to_local;

pub type FixtureId = u64;
pub type TeamId = u32;

/// Longest team name the fixture rows will draw.
pub const TEAM_NAME_MAX_CHARS: usize = 17;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Team {
    pub id: TeamId,
    pub name: String,
}

impl Team {
    pub fn new(id: TeamId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    pub fn display_name(&self) -> String {
        truncate_chars(&self.name, TEAM_NAME_MAX_CHARS)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Score {
    pub home: u8,
    pub away: u8,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchStatus {
    TimeToBeDefined,
    NotStarted,
    FirstHalf,
    HalfTime,
    SecondHalf,
    ExtraTime,
    BreakTime,
    Penalties,
    Suspended,
    Interrupted,
    Live,
    Finished,
    FinishedAfterExtraTime,
    FinishedAfterPenalties,
    Postponed,
    Cancelled,
    Abandoned,
    TechnicalLoss,
    WalkOver,
    Other(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusClass {
    Finished,
    InProgress,
    NotStarted,
    TimeUndetermined,
    Other,
}

impl MatchStatus {
    pub fn from_short(code: &str) -> Self {
        match code.trim().to_ascii_uppercase().as_str() {
            "TBD" => Self::TimeToBeDefined,
            "NS" => Self::NotStarted,
            "1H" => Self::FirstHalf,
            "HT" => Self::HalfTime,
            "2H" => Self::SecondHalf,
            "ET" => Self::ExtraTime,
            "BT" => Self::BreakTime,
            "P" => Self::Penalties,
            "SUSP" => Self::Suspended,
            "INT" => Self::Interrupted,
            "LIVE" => Self::Live,
            "FT" => Self::Finished,
            "AET" => Self::FinishedAfterExtraTime,
            "PEN" => Self::FinishedAfterPenalties,
            "PST" => Self::Postponed,
            "CANC" => Self::Cancelled,
            "ABD" => Self::Abandoned,
            "AWD" => Self::TechnicalLoss,
            "WO" => Self::WalkOver,
            _ => Self::Other(code.trim().to_string()),
        }
    }

    pub fn short(&self) -> &str {
        match self {
            Self::TimeToBeDefined => "TBD",
            Self::NotStarted => "NS",
            Self::FirstHalf => "1H",
            Self::HalfTime => "HT",
            Self::SecondHalf => "2H",
            Self::ExtraTime => "ET",
            Self::BreakTime => "BT",
            Self::Penalties => "P",
            Self::Suspended => "SUSP",
            Self::Interrupted => "INT",
            Self::Live => "LIVE",
            Self::Finished => "FT",
            Self::FinishedAfterExtraTime => "AET",
            Self::FinishedAfterPenalties => "PEN",
            Self::Postponed => "PST",
            Self::Cancelled => "CANC",
            Self::Abandoned => "ABD",
            Self::TechnicalLoss => "AWD",
            Self::WalkOver => "WO",
            Self::Other(code) => code,
        }
    }

    pub fn class(&self) -> StatusClass {
        match self {
            Self::Finished | Self::FinishedAfterExtraTime | Self::FinishedAfterPenalties => {
                StatusClass::Finished
            }
            Self::FirstHalf
            | Self::HalfTime
            | Self::SecondHalf
            | Self::ExtraTime
            | Self::BreakTime
            | Self::Penalties
            | Self::Suspended
            | Self::Interrupted
            | Self::Live => StatusClass::InProgress,
            Self::NotStarted => StatusClass::NotStarted,
            Self::TimeToBeDefined => StatusClass::TimeUndetermined,
            Self::Postponed
            | Self::Cancelled
            | Self::Abandoned
            | Self::TechnicalLoss
            | Self::WalkOver
            | Self::Other(_) => StatusClass::Other,
        }
    }
}

impl fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.short())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fixture {
    pub id: FixtureId,
    pub kickoff: DateTime<Utc>,
    pub home: Team,
    pub away: Team,
    pub score: Option<Score>,
    pub status: MatchStatus,
}

impl Fixture {
    pub fn local_date(&self) -> NaiveDate {
        to_local(self.kickoff).date()
    }

    pub fn local_time(&self) -> NaiveTime {
        to_local(self.kickoff).time()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Goal,
    YellowCard,
    RedCard,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchEvent {
    pub kind: EventKind,
    pub player: String,
    pub minute: u16,
}

impl MatchEvent {
    pub fn label(&self) -> String {
        let prefix = match self.kind {
            EventKind::Goal => "Goal",
            EventKind::YellowCard => "Yellow",
            EventKind::RedCard => "Red",
        };
        format!("{prefix}: {} ({}')", self.player, self.minute)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StandingsRow {
    pub rank: u16,
    pub team: Team,
    pub played: u16,
    pub won: u16,
    pub drawn: u16,
    pub lost: u16,
    pub goals_for: u16,
    pub goals_against: u16,
    pub goal_diff: i32,
    pub points: u16,
    pub form: String,
}

/// League rank per team, consulted read-only while laying out rows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Standings {
    ranks: HashMap<TeamId, u16>,
}

impl Standings {
    pub fn from_rows(rows: &[StandingsRow]) -> Self {
        Self {
            ranks: rows.iter().map(|row| (row.team.id, row.rank)).collect(),
        }
    }

    pub fn rank(&self, team: TeamId) -> Option<u16> {
        self.ranks.get(&team).copied()
    }

    pub fn insert(&mut self, team: TeamId, rank: u16) {
        self.ranks.insert(team, rank);
    }

    pub fn len(&self) -> usize {
        self.ranks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranks.is_empty()
    }
}

/// One calendar day of the selection. An empty `fixtures` list is drawn as an
/// explicit "no fixtures" marker under the day header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchDay {
    pub date: NaiveDate,
    pub fixtures: Vec<Fixture>,
}

pub fn truncate_chars(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}
