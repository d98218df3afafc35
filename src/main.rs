use std::process::ExitCode;

use anyhow::{Context, Result};
use inky_fixtures::api_football::ApiFootball;
use inky_fixtures::battery::{BatterySensor, FixedBattery, draw_battery};
use inky_fixtures::board::FixtureBoard;
use inky_fixtures::canvas::{Canvas, FrameCanvas, PANEL_HEIGHT, PANEL_WIDTH, Pen};
use inky_fixtures::clock::{Clock, SystemClock};
use inky_fixtures::config::Config;
use inky_fixtures::connect::connect_with_retry;
use inky_fixtures::crest::CrestDir;
use inky_fixtures::fake_feed::DemoSource;
use inky_fixtures::source::FixtureSource;

fn main() -> ExitCode {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let config = Config::from_env()?;
    let clock = SystemClock;

    let mut source: Box<dyn FixtureSource> = if config.demo {
        log::info!("demo mode, no network");
        Box::new(DemoSource::new(clock.local_today()))
    } else {
        let key = config.api_key.as_deref().unwrap_or_default();
        let mut api = ApiFootball::new(&config.base_url, key)?;
        connect_with_retry(&mut api, &config.retry)?;
        Box::new(api)
    };

    let mut canvas = FrameCanvas::new(PANEL_WIDTH, PANEL_HEIGHT, &config.output);
    canvas.clear(Pen::White);

    let crests = CrestDir::new(&config.crest_dir);
    let report = FixtureBoard::new(source.as_mut(), &crests, &clock, &config.layout).render(
        &mut canvas,
        config.league,
        &config.window,
        config.target_count,
    )?;
    log::info!(
        "{} rows laid out, {}px used",
        report.rows().count(),
        report.used_height()
    );

    if let Some(reading) = FixedBattery(config.battery).read() {
        draw_battery(&mut canvas, &reading);
    }

    canvas
        .commit()
        .with_context(|| format!("failed to write {}", config.output.display()))
}
