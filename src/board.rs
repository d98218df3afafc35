use crate::canvas::Canvas;
use crate::clock::Clock;
use crate::crest::CrestStore;
use crate::error::BoardError;
use crate::layout::{LayoutConfig, RenderReport, lay_out};
use crate::selector::{WindowPolicy, select};
use crate::source::{FixtureSource, League, standings_or_empty};

/// The fixture list screen: standings, selection and layout wired to the
/// injected capabilities. Holds no state between passes.
pub struct FixtureBoard<'a, S: ?Sized, K: ?Sized, T: ?Sized> {
    source: &'a mut S,
    crests: &'a K,
    clock: &'a T,
    layout: &'a LayoutConfig,
}

impl<'a, S, K, T> FixtureBoard<'a, S, K, T>
where
    S: FixtureSource + ?Sized,
    K: CrestStore + ?Sized,
    T: Clock + ?Sized,
{
    pub fn new(source: &'a mut S, crests: &'a K, clock: &'a T, layout: &'a LayoutConfig) -> Self {
        Self {
            source,
            crests,
            clock,
            layout,
        }
    }

    /// One full pass. Fetch failures degrade to empty data; only layout
    /// overflow under `OverflowPolicy::Fail` returns an error.
    pub fn render<C: Canvas + ?Sized>(
        &mut self,
        canvas: &mut C,
        league: League,
        policy: &WindowPolicy,
        target_count: usize,
    ) -> Result<RenderReport, BoardError> {
        let standings = standings_or_empty(&mut *self.source, league);
        let today = self.clock.local_today();
        log::info!(
            "render pass: league {} season {} from {today} ({policy:?}, target {target_count})",
            league.id,
            league.season
        );

        let days = select(&mut *self.source, league, today, policy, target_count);
        let fixtures: usize = days.iter().map(|d| d.fixtures.len()).sum();
        log::info!("{fixtures} fixtures across {} days selected", days.len());

        let report = lay_out(
            self.layout,
            canvas,
            &days,
            &standings,
            &mut *self.source,
            self.crests,
        )?;
        if report.crest_misses > 0 {
            log::info!("{} crests missing, placeholders drawn", report.crest_misses);
        }
        if report.clipped > 0 {
            log::warn!("{} items clipped at the bottom of the canvas", report.clipped);
        }
        Ok(report)
    }
}
