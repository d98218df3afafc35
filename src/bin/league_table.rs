use anyhow::{Context, Result};

use inky_fixtures::api_football::ApiFootball;
use inky_fixtures::canvas::{Canvas, FrameCanvas, PANEL_HEIGHT, PANEL_WIDTH, Pen};
use inky_fixtures::clock::{Clock, SystemClock};
use inky_fixtures::config::Config;
use inky_fixtures::connect::connect_with_retry;
use inky_fixtures::crest::CrestDir;
use inky_fixtures::fake_feed::DemoSource;
use inky_fixtures::league_table::draw_league_table;
use inky_fixtures::source::FixtureSource;

fn main() -> Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::from_env()?;
    let rows = if config.demo {
        DemoSource::new(SystemClock.local_today()).standings(config.league)?
    } else {
        let key = config.api_key.as_deref().unwrap_or_default();
        let mut api = ApiFootball::new(&config.base_url, key)?;
        connect_with_retry(&mut api, &config.retry)?;
        api.standings(config.league)
            .context("standings unavailable, leaving the panel untouched")?
    };

    let mut canvas = FrameCanvas::new(PANEL_WIDTH, PANEL_HEIGHT, &config.output);
    canvas.clear(Pen::White);
    draw_league_table(&mut canvas, &rows, &CrestDir::new(&config.crest_dir));
    canvas.commit()?;
    println!("League table written to {}", config.output.display());
    Ok(())
}
