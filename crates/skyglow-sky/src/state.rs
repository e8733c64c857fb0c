//! Night-sky animation state management.

use rand::{Rng, rngs::ThreadRng};
use skyglow_core::{DrawList, Viewport};
use tracing::{debug, trace};

use crate::animations::{
    backdrop,
    meteor::{self, Meteor, ShootingStarSpawner},
    starfield::{self, Star},
};

/// Night-sky animation state.
#[derive(Debug)]
pub struct SkyState<R = ThreadRng> {
    /// Current star field, sized for `last_viewport`.
    stars: Vec<Star>,
    /// Meteors still in flight.
    meteors: Vec<Meteor>,
    /// Shooting-star cadence.
    spawner: ShootingStarSpawner,
    /// Viewport the star field was generated for.
    last_viewport: Viewport,
    rng: R,
}

impl Default for SkyState {
    fn default() -> Self {
        Self::new()
    }
}

impl SkyState {
    /// Create a sky seeded from the thread-local generator.
    pub fn new() -> Self {
        Self::with_rng(rand::rng())
    }
}

impl<R: Rng> SkyState<R> {
    /// Create a sky drawing randomness from `rng`.
    pub fn with_rng(rng: R) -> Self {
        Self {
            stars: Vec::new(),
            meteors: Vec::new(),
            spawner: ShootingStarSpawner::new(),
            last_viewport: Viewport::default(),
            rng,
        }
    }

    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    pub fn meteors(&self) -> &[Meteor] {
        &self.meteors
    }

    /// Produce the draw list for one frame.
    ///
    /// Order: backdrop, stars, spawn check, meteor advance, meteors. An empty
    /// viewport skips the frame without touching any state.
    pub fn frame(&mut self, viewport: Viewport, elapsed_ms: u64) -> DrawList {
        if viewport.is_empty() {
            trace!("skipping sky frame: empty viewport");
            return DrawList::new();
        }

        if viewport != self.last_viewport {
            self.stars = starfield::generate(viewport, &mut self.rng);
            self.last_viewport = viewport;
            debug!(
                width = viewport.width,
                height = viewport.height,
                stars = self.stars.len(),
                "regenerated star field"
            );
        }

        let mut list = DrawList::with_capacity(self.stars.len() * 2 + 16);
        backdrop::draw_backdrop(viewport, &mut list);
        starfield::draw(&self.stars, elapsed_ms, &mut self.rng, &mut list);

        if let Some(m) =
            self.spawner
                .maybe_spawn(elapsed_ms, self.meteors.len(), viewport, &mut self.rng)
        {
            debug!(x = m.x, y = m.y, angle = m.angle, "shooting star spawned");
            self.meteors.push(m);
        }

        self.meteors = meteor::advance(std::mem::take(&mut self.meteors), viewport);
        meteor::draw(&self.meteors, &mut list);

        list
    }
}
