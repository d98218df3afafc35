use embedded_graphics::prelude::{Point, Size};

use crate::canvas::{Canvas, Pen};
use crate::crest::{CrestStore, draw_crest};
use crate::model::{StandingsRow, TEAM_NAME_MAX_CHARS, truncate_chars};

const SCALE: u8 = 2;
const HEADER_Y: i32 = 5;
const FIRST_ROW_Y: i32 = 30;
const LINE_HEIGHT: i32 = 22;
const LEFT: i32 = 5;
const RULE_END_X: i32 = 790;
const RULE_LIFT: i32 = 5;
const CREST_X: i32 = LEFT + 30;
const CREST_SIZE: u32 = 20;
const NAME_X: i32 = LEFT + 55;
const FORM_X: i32 = 720;
const FORM_SQUARE: u32 = 14;
const FORM_STEP: i32 = 16;

const COLUMNS: [(&str, i32); 10] = [
    ("Team", 60),
    ("P", 235),
    ("W", 295),
    ("D", 355),
    ("L", 415),
    ("GF", 475),
    ("GA", 535),
    ("GD", 595),
    ("Pts", 655),
    ("Form", 725),
];

/// Rule colour drawn above the row at `index`, marking qualification and
/// relegation zones.
pub fn zone_rule(index: usize) -> Option<Pen> {
    match index {
        4 | 5 => Some(Pen::Blue),
        17 => Some(Pen::Red),
        _ => None,
    }
}

pub fn form_pen(result: char) -> Pen {
    match result {
        'W' => Pen::Green,
        'L' => Pen::Red,
        _ => Pen::Gray,
    }
}

/// Draws the table and returns how many crests fell back to a placeholder.
pub fn draw_league_table<C, K>(canvas: &mut C, rows: &[StandingsRow], crests: &K) -> usize
where
    C: Canvas + ?Sized,
    K: CrestStore + ?Sized,
{
    for (title, x) in COLUMNS {
        canvas.draw_text(title, Point::new(x, HEADER_Y), Pen::Black, SCALE);
    }

    let mut misses = 0;
    let mut y = FIRST_ROW_Y;
    for (index, row) in rows.iter().enumerate() {
        if let Some(pen) = zone_rule(index) {
            rule(canvas, y, pen);
        }
        if !draw_row(canvas, row, crests, y) {
            misses += 1;
        }
        y += LINE_HEIGHT;
    }
    rule(canvas, y, Pen::Red);

    log::info!("league table: {} rows, {misses} crests missing", rows.len());
    misses
}

fn rule<C: Canvas + ?Sized>(canvas: &mut C, y: i32, pen: Pen) {
    canvas.draw_line(
        Point::new(LEFT, y - RULE_LIFT),
        Point::new(RULE_END_X, y - RULE_LIFT),
        pen,
    );
}

fn draw_row<C, K>(canvas: &mut C, row: &StandingsRow, crests: &K, y: i32) -> bool
where
    C: Canvas + ?Sized,
    K: CrestStore + ?Sized,
{
    canvas.draw_text(&format!("{}.", row.rank), Point::new(LEFT, y), Pen::Black, SCALE);
    let drawn = draw_crest(canvas, crests, row.team.id, Point::new(CREST_X, y - 3), CREST_SIZE);
    canvas.draw_text(
        &truncate_chars(&row.team.name, TEAM_NAME_MAX_CHARS),
        Point::new(NAME_X, y),
        Pen::Black,
        SCALE,
    );

    let numbers = [
        row.played.to_string(),
        row.won.to_string(),
        row.drawn.to_string(),
        row.lost.to_string(),
        row.goals_for.to_string(),
        row.goals_against.to_string(),
        row.goal_diff.to_string(),
        row.points.to_string(),
    ];
    for (value, (_, x)) in numbers.iter().zip(&COLUMNS[1..9]) {
        canvas.draw_text(value, Point::new(*x, y), Pen::Black, SCALE);
    }

    for (j, result) in row.form.chars().enumerate() {
        let x = FORM_X + j as i32 * FORM_STEP;
        canvas.draw_rectangle(
            Point::new(x, y),
            Size::new(FORM_SQUARE, FORM_SQUARE),
            form_pen(result),
        );
        canvas.draw_text(&result.to_string(), Point::new(x + 2, y + 2), Pen::White, 1);
    }
    drawn
}
