//! Loop lifecycle and per-frame scheduling.
//!
//! [`LoopEngine`] is host-agnostic: the browser layer feeds it
//! `requestAnimationFrame` timestamps and resize notifications, tests feed
//! it a fake clock. Measuring and painting go through [`TrackSurface`].

use crate::config::LoopConfig;
use crate::motion::MotionController;
use crate::tile::{RetileOutcome, Tile, TileManager};

/// Layout source and rendering sink for one track.
pub trait TrackSurface {
    /// Rendered width of the visible container.
    fn viewport_width(&self) -> f64;

    /// Rendered width of the primary content unit. Zero before layout.
    fn unit_width(&self) -> f64;

    /// Replaces every clone with fresh copies matching `tiles[1..]`.
    /// `tiles[0]` is the primary and must be left in place.
    fn rebuild(&mut self, tiles: &[Tile]);

    /// Applies a single horizontal translation to the whole track.
    fn translate(&mut self, x: f64);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    Idle,
    Running,
    /// Terminal.
    Destroyed,
}

/// Returned by [`LoopEngine::tick`]: whether the host should schedule another frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickControl {
    Continue,
    Stop,
}

pub struct LoopEngine<S> {
    surface: S,
    tiles: TileManager,
    motion: MotionController,
    state: EngineState,
    pause_on_hover: bool,
    paused: bool,
    hovered: bool,
    resize_pending: bool,
    last_timestamp: Option<f64>,
}

impl<S: TrackSurface> LoopEngine<S> {
    pub fn new(surface: S, config: LoopConfig) -> Self {
        let config = config.sanitized();
        Self {
            surface,
            tiles: TileManager::new(),
            motion: MotionController::new(&config),
            state: EngineState::Idle,
            pause_on_hover: config.pause_on_hover,
            paused: false,
            hovered: false,
            resize_pending: false,
            last_timestamp: None,
        }
    }

    /// Performs the initial tiling and enters `Running`.
    ///
    /// Returns `false` if the engine was not idle.
    pub fn start(&mut self) -> bool {
        if self.state != EngineState::Idle {
            return false;
        }
        self.state = EngineState::Running;
        self.retile();
        true
    }

    pub fn pause(&mut self) {
        if self.state != EngineState::Destroyed {
            self.paused = true;
        }
    }

    pub fn resume(&mut self) {
        if self.state != EngineState::Destroyed {
            self.paused = false;
        }
    }

    /// Hover signal from the host. Ignored unless `pause_on_hover` is set.
    pub fn set_hovered(&mut self, hovered: bool) {
        if self.state != EngineState::Destroyed {
            self.hovered = hovered;
        }
    }

    /// Marks the track for re-tiling at the next tick. Repeated calls
    /// between ticks coalesce into one re-tile.
    pub fn notify_resize(&mut self) {
        if self.state == EngineState::Running {
            self.resize_pending = true;
        }
    }

    /// Runs one frame at `timestamp_ms` (host clock, milliseconds).
    pub fn tick(&mut self, timestamp_ms: f64) -> TickControl {
        if self.state != EngineState::Running {
            return TickControl::Stop;
        }

        if self.resize_pending {
            self.resize_pending = false;
            self.retile();
        }

        let dt = match self.last_timestamp {
            Some(prev) => (timestamp_ms - prev) / 1000.0,
            None => 0.0,
        };
        self.last_timestamp = Some(timestamp_ms);

        self.motion.advance(dt, self.is_paused());
        if self.motion.unit_width() > 0.0 {
            self.surface.translate(self.motion.translation());
        }
        TickControl::Continue
    }

    /// Enters the terminal state. Safe to call repeatedly or before `start`.
    pub fn destroy(&mut self) {
        if self.state == EngineState::Destroyed {
            return;
        }
        self.state = EngineState::Destroyed;
        self.resize_pending = false;
        self.last_timestamp = None;
    }

    /// A lost measurement freezes the offset until a valid one arrives.
    fn retile(&mut self) {
        let viewport = self.surface.viewport_width();
        let unit = self.surface.unit_width();
        match self.tiles.retile(viewport, unit) {
            RetileOutcome::Rebuilt(_) => {
                self.surface.rebuild(self.tiles.tiles());
                self.motion.set_unit_width(self.tiles.unit_width());
            }
            RetileOutcome::Unchanged(_) => self.motion.set_unit_width(self.tiles.unit_width()),
            RetileOutcome::Unmeasured | RetileOutcome::TooNarrow => self.motion.clear_unit_width(),
        }
    }

    /// True when motion is easing toward zero, either from an explicit
    /// `pause` or from hover.
    pub fn is_paused(&self) -> bool {
        self.paused || (self.pause_on_hover && self.hovered)
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn tile_count(&self) -> usize {
        self.tiles.tile_count()
    }

    pub fn offset(&self) -> f64 {
        self.motion.offset()
    }

    pub fn velocity(&self) -> f64 {
        self.motion.velocity()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }
}
