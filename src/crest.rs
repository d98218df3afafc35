use std::collections::HashMap;
use std::path::PathBuf;

use embedded_graphics::prelude::{Point, Size};
use image::RgbaImage;

use crate::canvas::{Canvas, Pen};
use crate::model::TeamId;

/// Cached team badges keyed by team id.
pub trait CrestStore {
    fn load(&self, team: TeamId) -> Option<RgbaImage>;
}

/// Crests stored as `{root}/{team_id}.png`, as laid out on the SD card.
#[derive(Debug, Clone)]
pub struct CrestDir {
    root: PathBuf,
}

impl CrestDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn path_for(&self, team: TeamId) -> PathBuf {
        self.root.join(format!("{team}.png"))
    }
}

impl CrestStore for CrestDir {
    fn load(&self, team: TeamId) -> Option<RgbaImage> {
        let path = self.path_for(team);
        match image::open(&path) {
            Ok(img) => Some(img.to_rgba8()),
            Err(err) => {
                log::debug!("crest {} unavailable: {err}", path.display());
                None
            }
        }
    }
}

/// In-memory crests, handy for demos and tests.
#[derive(Debug, Clone, Default)]
pub struct CrestMap {
    crests: HashMap<TeamId, RgbaImage>,
}

impl CrestMap {
    pub fn insert(&mut self, team: TeamId, crest: RgbaImage) {
        self.crests.insert(team, crest);
    }
}

impl CrestStore for CrestMap {
    fn load(&self, team: TeamId) -> Option<RgbaImage> {
        self.crests.get(&team).cloned()
    }
}

/// Draws the crest for `team` at `at`, or a filled square of `size` when the
/// image is missing. Returns whether the real crest was drawn.
pub fn draw_crest<C: Canvas + ?Sized, K: CrestStore + ?Sized>(
    canvas: &mut C,
    crests: &K,
    team: TeamId,
    at: Point,
    size: u32,
) -> bool {
    match crests.load(team) {
        Some(img) => {
            canvas.draw_image(&img, at);
            true
        }
        None => {
            canvas.draw_rectangle(at, Size::new(size, size), Pen::Black);
            false
        }
    }
}
