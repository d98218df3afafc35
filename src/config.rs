use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Result, anyhow};
use chrono::{DateTime, Datelike, Utc};

use crate::api_football::DEFAULT_BASE_URL;
use crate::battery::{BatteryReading, voltage_from_adc};
use crate::connect::RetryPolicy;
use crate::layout::{LayoutConfig, OverflowPolicy};
use crate::selector::{DEFAULT_DAY_ADVANCE, DEFAULT_ROLLING_MAX_DAYS, DayAdvance, WindowPolicy};
use crate::source::League;

pub const DEFAULT_LEAGUE_ID: u32 = 39;
pub const DEFAULT_TARGET_COUNT: usize = 10;
pub const DEFAULT_FIXED_DAYS: u32 = 3;

#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: Option<String>,
    pub base_url: String,
    pub league: League,
    pub window: WindowPolicy,
    pub target_count: usize,
    pub layout: LayoutConfig,
    pub retry: RetryPolicy,
    pub crest_dir: PathBuf,
    pub output: PathBuf,
    pub battery: Option<BatteryReading>,
    pub demo: bool,
}

impl Config {
    /// Reads the process environment. Call after `.env` files are loaded.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok(), Utc::now())
    }

    pub fn from_lookup<F>(lookup: F, now: DateTime<Utc>) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key).and_then(|val| {
                let val = val.trim().to_string();
                if val.is_empty() { None } else { Some(val) }
            })
        };

        let demo = get("DEMO").is_some_and(|val| is_truthy(&val));
        let api_key = get("API_FOOTBALL_KEY");
        if api_key.is_none() && !demo {
            return Err(anyhow!("API_FOOTBALL_KEY is not set (use DEMO=1 to run offline)"));
        }

        let league = League::new(
            parse_or(&get, "LEAGUE_ID", DEFAULT_LEAGUE_ID),
            parse_or(&get, "SEASON", now.year()),
        );

        let window = match get("WINDOW").map(|val| val.to_ascii_lowercase()).as_deref() {
            None | Some("rolling") => WindowPolicy::Rolling {
                max_days: parse_or(&get, "ROLLING_MAX_DAYS", DEFAULT_ROLLING_MAX_DAYS).max(1),
                advance: parse_with(&get, "DAY_ADVANCE", DayAdvance::parse)
                    .unwrap_or(DEFAULT_DAY_ADVANCE),
            },
            Some("fixed") => {
                WindowPolicy::fixed(parse_or(&get, "FIXED_DAYS", DEFAULT_FIXED_DAYS).max(1))
            }
            Some(other) => {
                log::warn!("unknown WINDOW {other:?}, using rolling");
                WindowPolicy::rolling()
            }
        };

        let mut layout = parse_with(&get, "LAYOUT", LayoutConfig::preset).unwrap_or_default();
        layout.base_row_height = parse_or(&get, "ROW_HEIGHT", layout.base_row_height);
        layout.extra_line_height = parse_or(&get, "ROW_LINE_EXTRA", layout.extra_line_height);
        layout.detail_wrap = parse_or(&get, "WRAP_WIDTH", layout.detail_wrap).max(1);
        layout.day_gap = parse_or(&get, "DAY_GAP", layout.day_gap);
        layout.overflow = parse_with(&get, "OVERFLOW", OverflowPolicy::parse).unwrap_or_default();

        let defaults = RetryPolicy::default();
        let retry = RetryPolicy {
            attempts: parse_or(&get, "CONNECT_ATTEMPTS", defaults.attempts).max(1),
            backoff: Duration::from_secs(parse_or(
                &get,
                "CONNECT_BACKOFF_SECS",
                defaults.backoff.as_secs(),
            )),
            timeout: Duration::from_secs(parse_or(
                &get,
                "CONNECT_TIMEOUT_SECS",
                defaults.timeout.as_secs(),
            )),
        };

        // A raw VSYS sample is accepted when no calibrated voltage is given.
        let battery = get("BATTERY_VOLTAGE")
            .and_then(|raw| parse_logged::<f32>("BATTERY_VOLTAGE", &raw))
            .or_else(|| {
                get("BATTERY_ADC")
                    .and_then(|raw| parse_logged::<u16>("BATTERY_ADC", &raw))
                    .map(voltage_from_adc)
            })
            .map(|voltage| BatteryReading {
                voltage,
                on_usb: get("BATTERY_USB").is_some_and(|val| is_truthy(&val)),
            });

        Ok(Self {
            api_key,
            base_url: get("API_FOOTBALL_BASE").unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            league,
            window,
            target_count: parse_or(&get, "TARGET_COUNT", DEFAULT_TARGET_COUNT),
            layout,
            retry,
            crest_dir: get("CREST_DIR").map(PathBuf::from).unwrap_or_else(|| "sd".into()),
            output: get("OUTPUT")
                .map(PathBuf::from)
                .unwrap_or_else(|| "frame.png".into()),
            battery,
            demo,
        })
    }
}

fn is_truthy(raw: &str) -> bool {
    matches!(raw.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on")
}

fn parse_logged<T: FromStr>(key: &str, raw: &str) -> Option<T> {
    let parsed = raw.parse::<T>().ok();
    if parsed.is_none() {
        log::warn!("ignoring unparsable {key}={raw:?}");
    }
    parsed
}

fn parse_or<G, T>(get: &G, key: &str, default: T) -> T
where
    G: Fn(&str) -> Option<String>,
    T: FromStr,
{
    get(key)
        .and_then(|raw| parse_logged(key, &raw))
        .unwrap_or(default)
}

fn parse_with<G, T>(get: &G, key: &str, parse: fn(&str) -> Option<T>) -> Option<T>
where
    G: Fn(&str) -> Option<String>,
{
    let raw = get(key)?;
    let parsed = parse(&raw);
    if parsed.is_none() {
        log::warn!("ignoring unknown {key}={raw:?}");
    }
    parsed
}
