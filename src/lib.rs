//! Seamless continuous-loop marquee ("logo loop").
//!
//! The core (`tile`, `motion`, `engine`) is plain Rust and runs anywhere;
//! the browser binding in `wasm` wires it to the DOM.

mod log;

pub mod config;
pub mod engine;
pub mod motion;
pub mod tile;

pub use config::LoopConfig;
pub use engine::{EngineState, LoopEngine, TickControl, TrackSurface};
pub use motion::{wrap_offset, MotionController};
pub use tile::{rebuild_tiles, required_tile_count, RetileOutcome, Tile, TileManager};

// Only compile wasm-specific code when targeting wasm32.
#[cfg(target_arch = "wasm32")]
mod wasm;

#[cfg(target_arch = "wasm32")]
pub use wasm::LogoLoop;
