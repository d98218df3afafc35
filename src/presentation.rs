use chrono::NaiveTime;

use crate::canvas::Pen;
use crate::model::{MatchStatus, Score, StatusClass};

/// Semantic urgency of the centre score/time text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorClass {
    Neutral,
    Urgent,
    Alert,
}

impl ColorClass {
    pub fn pen(self) -> Pen {
        match self {
            Self::Neutral => Pen::Black,
            Self::Urgent => Pen::Green,
            Self::Alert => Pen::Red,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Presentation {
    pub text: String,
    pub color: ColorClass,
    pub fetch_events: bool,
}

/// Maps a fixture's state to what the centre column shows. Total over every
/// status; unknown codes land on the postponed row.
pub fn present(status: &MatchStatus, kickoff_local: NaiveTime, score: Option<Score>) -> Presentation {
    match status.class() {
        StatusClass::Finished => Presentation {
            text: score_text(score),
            color: ColorClass::Neutral,
            fetch_events: true,
        },
        StatusClass::InProgress => Presentation {
            text: score_text(score),
            color: ColorClass::Urgent,
            fetch_events: true,
        },
        StatusClass::NotStarted => Presentation {
            text: kickoff_local.format("%H:%M").to_string(),
            color: ColorClass::Alert,
            fetch_events: false,
        },
        StatusClass::TimeUndetermined => Presentation {
            text: "TBD".to_string(),
            color: ColorClass::Alert,
            fetch_events: false,
        },
        StatusClass::Other => Presentation {
            text: "P-P".to_string(),
            color: ColorClass::Alert,
            fetch_events: false,
        },
    }
}

// A started match without goals in the payload shows "?" rather than a guess.
fn score_text(score: Option<Score>) -> String {
    match score {
        Some(score) => format!("{}-{}", score.home, score.away),
        None => "?-?".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kickoff() -> NaiveTime {
        NaiveTime::from_hms_opt(16, 0, 0).unwrap()
    }

    #[test]
    fn finished_shows_score_in_black() {
        let p = present(
            &MatchStatus::Finished,
            kickoff(),
            Some(Score { home: 2, away: 1 }),
        );
        assert_eq!(p.text, "2-1");
        assert_eq!(p.color, ColorClass::Neutral);
        assert!(p.fetch_events);
    }

    #[test]
    fn live_sub_states_are_urgent() {
        for code in ["1H", "HT", "2H", "ET", "BT", "P", "SUSP", "INT", "LIVE"] {
            let p = present(
                &MatchStatus::from_short(code),
                kickoff(),
                Some(Score { home: 0, away: 3 }),
            );
            assert_eq!(p.text, "0-3", "{code}");
            assert_eq!(p.color, ColorClass::Urgent, "{code}");
            assert!(p.fetch_events, "{code}");
        }
    }

    #[test]
    fn not_started_shows_local_kickoff() {
        let p = present(&MatchStatus::NotStarted, kickoff(), None);
        assert_eq!(p.text, "16:00");
        assert_eq!(p.color, ColorClass::Alert);
        assert!(!p.fetch_events);
    }

    #[test]
    fn undetermined_and_unknown_codes() {
        let tbd = present(&MatchStatus::from_short("TBD"), kickoff(), None);
        assert_eq!(tbd.text, "TBD");
        assert!(!tbd.fetch_events);

        for code in ["PST", "CANC", "ABD", "AWD", "WO", "???", ""] {
            let p = present(&MatchStatus::from_short(code), kickoff(), None);
            assert_eq!(p.text, "P-P", "{code}");
            assert_eq!(p.color, ColorClass::Alert);
            assert!(!p.fetch_events);
        }
    }

    #[test]
    fn missing_score_on_started_match() {
        let p = present(&MatchStatus::Live, kickoff(), None);
        assert_eq!(p.text, "?-?");
    }
}
