use chrono::NaiveDate;
use embedded_graphics::prelude::Point;

use crate::canvas::{Canvas, Pen};
use crate::crest::{CrestStore, draw_crest};
use crate::error::BoardError;
use crate::model::{Fixture, FixtureId, MatchDay, Standings, Team};
use crate::presentation::{Presentation, present};
use crate::source::{FixtureSource, events_or_empty};
use crate::text::wrap_text;

const NAME_SCALE: u8 = 2;
const RANK_SCALE: u8 = 1;
const DETAIL_SCALE: u8 = 1;
const EMPTY_MESSAGE: &str = "No fixtures found.";

/// What to do when the list runs past the bottom of the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverflowPolicy {
    /// Keep drawing; the panel silently drops off-screen pixels.
    #[default]
    Allow,
    /// Stop at the first item that would not fit.
    Clip,
    /// Abort the pass with `BoardError::LayoutOverflow`.
    Fail,
}

impl OverflowPolicy {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "allow" => Some(Self::Allow),
            "clip" => Some(Self::Clip),
            "fail" | "error" => Some(Self::Fail),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutConfig {
    pub top: i32,
    pub left: i32,
    /// Distance from the header text to its separator line.
    pub header_rule_offset: u32,
    pub header_height: u32,
    pub base_row_height: u32,
    /// Added per wrapped detail line beyond the first.
    pub extra_line_height: u32,
    pub day_gap: u32,
    pub score_center_x: i32,
    pub crest_size: u32,
    pub center_gap: u32,
    pub name_gap: u32,
    pub rank_gap: u32,
    pub text_dy: i32,
    pub crest_dy: i32,
    pub rank_dy: i32,
    pub detail_x: i32,
    pub detail_wrap: usize,
    pub detail_line_height: u32,
    pub detail_lift: i32,
    pub overflow: OverflowPolicy,
}

impl LayoutConfig {
    pub fn standard() -> Self {
        Self {
            top: 10,
            left: 10,
            header_rule_offset: 10,
            header_height: 20,
            base_row_height: 40,
            extra_line_height: 5,
            day_gap: 5,
            score_center_x: 245,
            crest_size: 20,
            center_gap: 7,
            name_gap: 5,
            rank_gap: 3,
            text_dy: 5,
            crest_dy: 2,
            rank_dy: -3,
            detail_x: 485,
            detail_wrap: 63,
            detail_line_height: 10,
            detail_lift: 8,
            overflow: OverflowPolicy::Allow,
        }
    }

    pub fn compact() -> Self {
        Self {
            base_row_height: 35,
            detail_x: 500,
            detail_wrap: 60,
            ..Self::standard()
        }
    }

    pub fn preset(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "standard" => Some(Self::standard()),
            "compact" => Some(Self::compact()),
            _ => None,
        }
    }

    pub fn row_height(&self, detail_lines: usize) -> u32 {
        let extra = detail_lines.saturating_sub(1) as u32;
        self.base_row_height + extra * self.extra_line_height
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self::standard()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutCursor {
    pub y: i32,
    pub date: Option<NaiveDate>,
}

impl LayoutCursor {
    pub fn new(top: i32) -> Self {
        Self { y: top, date: None }
    }

    pub fn advance(&mut self, dy: u32) {
        self.y += dy as i32;
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowLayout {
    pub fixture_id: FixtureId,
    pub y: i32,
    pub height: u32,
    pub presentation: Presentation,
    pub events_requested: bool,
    pub detail_lines: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutItem {
    DayHeader { date: NaiveDate, y: i32, height: u32 },
    EmptyDay { date: NaiveDate, y: i32, height: u32 },
    NoFixtures { y: i32, height: u32 },
    Row(RowLayout),
    DayGap { y: i32, height: u32 },
}

impl LayoutItem {
    pub fn height(&self) -> u32 {
        match self {
            Self::DayHeader { height, .. }
            | Self::EmptyDay { height, .. }
            | Self::NoFixtures { height, .. }
            | Self::DayGap { height, .. } => *height,
            Self::Row(row) => row.height,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderReport {
    pub items: Vec<LayoutItem>,
    pub cursor: LayoutCursor,
    pub top: i32,
    pub crest_misses: usize,
    pub clipped: usize,
}

impl RenderReport {
    /// Vertical space consumed below the top margin.
    pub fn used_height(&self) -> u32 {
        (self.cursor.y - self.top).max(0) as u32
    }

    pub fn rows(&self) -> impl Iterator<Item = &RowLayout> {
        self.items.iter().filter_map(|item| match item {
            LayoutItem::Row(row) => Some(row),
            _ => None,
        })
    }
}

/// Lays the selected days out onto `canvas`. Event details are fetched from
/// `source` per row, after the row's teams and score are placed.
pub fn lay_out<C, S, K>(
    config: &LayoutConfig,
    canvas: &mut C,
    days: &[MatchDay],
    standings: &Standings,
    source: &mut S,
    crests: &K,
) -> Result<RenderReport, BoardError>
where
    C: Canvas + ?Sized,
    S: FixtureSource + ?Sized,
    K: CrestStore + ?Sized,
{
    let mut engine = LayoutEngine {
        config,
        canvas,
        standings,
        source,
        crests,
        cursor: LayoutCursor::new(config.top),
        items: Vec::new(),
        crest_misses: 0,
        clipped: 0,
        stopped: false,
    };
    engine.run(days)?;
    Ok(RenderReport {
        items: engine.items,
        cursor: engine.cursor,
        top: config.top,
        crest_misses: engine.crest_misses,
        clipped: engine.clipped,
    })
}

struct LayoutEngine<'a, C: ?Sized, S: ?Sized, K: ?Sized> {
    config: &'a LayoutConfig,
    canvas: &'a mut C,
    standings: &'a Standings,
    source: &'a mut S,
    crests: &'a K,
    cursor: LayoutCursor,
    items: Vec<LayoutItem>,
    crest_misses: usize,
    clipped: usize,
    stopped: bool,
}

impl<C, S, K> LayoutEngine<'_, C, S, K>
where
    C: Canvas + ?Sized,
    S: FixtureSource + ?Sized,
    K: CrestStore + ?Sized,
{
    fn run(&mut self, days: &[MatchDay]) -> Result<(), BoardError> {
        if days.is_empty() {
            if self.fits(self.config.base_row_height)? {
                self.empty_message();
                let height = self.config.base_row_height;
                self.items.push(LayoutItem::NoFixtures {
                    y: self.cursor.y,
                    height,
                });
                self.cursor.advance(height);
            }
            return Ok(());
        }

        for day in days {
            if self.stopped {
                self.clipped += day.fixtures.len().max(1);
                continue;
            }
            self.day(day)?;
        }
        Ok(())
    }

    fn day(&mut self, day: &MatchDay) -> Result<(), BoardError> {
        // A header is only worth drawing with room for one row under it.
        if !self.fits(self.config.header_height + self.config.base_row_height)? {
            self.clipped += day.fixtures.len().max(1);
            return Ok(());
        }
        self.header(day.date);

        if day.fixtures.is_empty() {
            if !self.fits(self.config.base_row_height)? {
                self.clipped += 1;
                return Ok(());
            }
            let y = self.cursor.y;
            self.empty_message();
            let height = self.config.base_row_height;
            self.items.push(LayoutItem::EmptyDay {
                date: day.date,
                y,
                height,
            });
            self.cursor.advance(height);
        }

        for (idx, fixture) in day.fixtures.iter().enumerate() {
            if !self.fits(self.config.base_row_height)? {
                self.clipped += day.fixtures.len() - idx;
                return Ok(());
            }
            self.row(fixture);
        }

        let gap = self.config.day_gap;
        self.items.push(LayoutItem::DayGap {
            y: self.cursor.y,
            height: gap,
        });
        self.cursor.advance(gap);
        Ok(())
    }

    // Overflow is judged on an item's minimum extent; wrapped detail lines can
    // still push a row further down.
    fn fits(&mut self, height: u32) -> Result<bool, BoardError> {
        if self.stopped {
            return Ok(false);
        }
        let available = self.canvas.size().height;
        let needed = self.cursor.y + height as i32;
        if needed <= available as i32 {
            return Ok(true);
        }
        match self.config.overflow {
            OverflowPolicy::Allow => Ok(true),
            OverflowPolicy::Clip => {
                log::warn!("canvas full at y={}, clipping the rest", self.cursor.y);
                self.stopped = true;
                Ok(false)
            }
            OverflowPolicy::Fail => Err(BoardError::LayoutOverflow { needed, available }),
        }
    }

    fn header(&mut self, date: NaiveDate) {
        let y = self.cursor.y;
        let text = date.format("%A, %d-%m-%Y").to_string();
        self.canvas
            .draw_text(&text, Point::new(self.config.left, y), Pen::Blue, 1);
        let rule_y = y + self.config.header_rule_offset as i32;
        let width = self.canvas.size().width as i32;
        self.canvas
            .draw_line(Point::new(0, rule_y), Point::new(width, rule_y), Pen::Blue);

        let height = self.config.header_height;
        self.items.push(LayoutItem::DayHeader { date, y, height });
        self.cursor.date = Some(date);
        self.cursor.advance(height);
    }

    fn empty_message(&mut self) {
        self.canvas.draw_text(
            EMPTY_MESSAGE,
            Point::new(self.config.left, self.cursor.y),
            Pen::Red,
            NAME_SCALE,
        );
    }

    fn row(&mut self, fixture: &Fixture) {
        let cfg = self.config;
        let y = self.cursor.y;
        let presentation = present(&fixture.status, fixture.local_time(), fixture.score);

        let score_width = self.canvas.measure_text(&presentation.text, NAME_SCALE) as i32;
        let score_x = cfg.score_center_x - score_width / 2;

        let home_crest_x = score_x - cfg.center_gap as i32 - cfg.crest_size as i32;
        self.home_side(&fixture.home, home_crest_x, y);

        self.canvas.draw_text(
            &presentation.text,
            Point::new(score_x, y + cfg.text_dy),
            presentation.color.pen(),
            NAME_SCALE,
        );

        let away_crest_x = score_x + score_width + cfg.center_gap as i32;
        self.away_side(&fixture.away, away_crest_x, y);

        let events = if presentation.fetch_events {
            events_or_empty(&mut *self.source, fixture.id)
        } else {
            Vec::new()
        };
        let joined = events
            .iter()
            .map(|event| event.label())
            .collect::<Vec<_>>()
            .join("; ");
        let lines = wrap_text(&joined, cfg.detail_wrap);
        self.details(&lines, y);

        let height = cfg.row_height(lines.len());
        self.items.push(LayoutItem::Row(RowLayout {
            fixture_id: fixture.id,
            y,
            height,
            events_requested: presentation.fetch_events,
            presentation,
            detail_lines: lines,
        }));
        self.cursor.advance(height);
    }

    // Rank badge, name, crest; right-aligned against the crest.
    fn home_side(&mut self, team: &Team, crest_x: i32, y: i32) {
        let cfg = self.config;
        let name = team.display_name();
        let name_width = self.canvas.measure_text(&name, NAME_SCALE) as i32;
        let name_x = crest_x - cfg.name_gap as i32 - name_width;

        if let Some(rank) = self.standings.rank(team.id) {
            let badge = rank.to_string();
            let badge_width = self.canvas.measure_text(&badge, RANK_SCALE) as i32;
            let badge_x = name_x - cfg.rank_gap as i32 - badge_width;
            self.canvas
                .draw_text(&badge, Point::new(badge_x, y + cfg.rank_dy), Pen::Red, RANK_SCALE);
        }
        self.canvas
            .draw_text(&name, Point::new(name_x, y + cfg.text_dy), Pen::Black, NAME_SCALE);
        self.crest(team, crest_x, y);
    }

    fn away_side(&mut self, team: &Team, crest_x: i32, y: i32) {
        let cfg = self.config;
        self.crest(team, crest_x, y);

        let name = team.display_name();
        let name_x = crest_x + cfg.crest_size as i32 + cfg.name_gap as i32;
        let name_width = self.canvas.draw_text(
            &name,
            Point::new(name_x, y + cfg.text_dy),
            Pen::Black,
            NAME_SCALE,
        ) as i32;

        if let Some(rank) = self.standings.rank(team.id) {
            let badge_x = name_x + name_width + cfg.rank_gap as i32;
            self.canvas.draw_text(
                &rank.to_string(),
                Point::new(badge_x, y + cfg.rank_dy),
                Pen::Red,
                RANK_SCALE,
            );
        }
    }

    fn crest(&mut self, team: &Team, x: i32, y: i32) {
        let at = Point::new(x, y + self.config.crest_dy);
        if !draw_crest(&mut *self.canvas, self.crests, team.id, at, self.config.crest_size) {
            self.crest_misses += 1;
        }
    }

    // Detail lines are centred on the row's midline in the side panel.
    fn details(&mut self, lines: &[String], y: i32) {
        let cfg = self.config;
        let step = cfg.detail_line_height as i32;
        let lift = ((lines.len() as i32 - 1) * step) / 2 - cfg.detail_lift;
        for (i, line) in lines.iter().enumerate() {
            if line.is_empty() {
                continue;
            }
            let line_y = y - lift + i as i32 * step;
            self.canvas
                .draw_text(line, Point::new(cfg.detail_x, line_y), Pen::Black, DETAIL_SCALE);
        }
    }
}
