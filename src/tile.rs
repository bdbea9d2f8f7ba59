//! Track tiling.
//!
//! A track is the primary content unit followed by enough clones, laid out
//! edge to edge, to cover the viewport plus one spare unit. The spare unit
//! keeps the viewport covered while the track scrolls through a full unit
//! width before the offset wraps.

/// One rendered copy of the content unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tile {
    /// Slot on the track. 0 is the caller-owned primary.
    pub index: usize,
    /// Rebuild that created this tile. The primary always stays at 0.
    pub generation: u32,
}

impl Tile {
    pub const PRIMARY: Tile = Tile {
        index: 0,
        generation: 0,
    };

    pub fn is_primary(&self) -> bool {
        self.index == 0
    }

    /// Clones duplicate visible content and are hidden from screen readers.
    pub fn is_hidden_from_assistive_tech(&self) -> bool {
        !self.is_primary()
    }
}

/// Upper bound on tiles per track. Narrower units leave the track as it is.
pub const MAX_TILES: usize = 1024;

/// Minimum tile count such that `count * unit_width >= viewport_width + unit_width`.
///
/// Returns `None` while the unit is unmeasured (zero, negative or not finite).
/// The result may exceed [`MAX_TILES`]; [`TileManager::retile`] refuses those.
pub fn required_tile_count(viewport_width: f64, unit_width: f64) -> Option<usize> {
    if !(unit_width.is_finite() && unit_width > 0.0) {
        return None;
    }
    let viewport = if viewport_width.is_finite() {
        viewport_width.max(0.0)
    } else {
        0.0
    };
    let covering = (viewport / unit_width).ceil();
    let covering = if covering >= (usize::MAX - 1) as f64 {
        usize::MAX - 1
    } else {
        covering as usize
    };
    Some(covering + 1)
}

/// Keeps the primary tile, drops every clone and appends `desired - 1` fresh
/// clones stamped with `generation`.
///
/// `desired` is clamped to `1..=MAX_TILES`: the primary is never removed.
pub fn rebuild_tiles(current: &[Tile], desired: usize, generation: u32) -> Vec<Tile> {
    let desired = desired.clamp(1, MAX_TILES);
    let primary = current
        .first()
        .copied()
        .filter(Tile::is_primary)
        .unwrap_or(Tile::PRIMARY);
    let mut tiles = Vec::with_capacity(desired);
    tiles.push(primary);
    tiles.extend((1..desired).map(|index| Tile { index, generation }));
    tiles
}

/// Result of a [`TileManager::retile`] request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetileOutcome {
    /// The unit has no width yet. Nothing changed; retry on the next resize.
    Unmeasured,
    /// Covering the viewport would take more than [`MAX_TILES`] tiles.
    /// Nothing changed.
    TooNarrow,
    /// Same inputs as the last applied re-tile. The track was left alone.
    Unchanged(usize),
    /// The track was rebuilt with this many tiles.
    Rebuilt(usize),
}

impl RetileOutcome {
    pub fn tile_count(&self) -> Option<usize> {
        match *self {
            RetileOutcome::Unmeasured | RetileOutcome::TooNarrow => None,
            RetileOutcome::Unchanged(n) | RetileOutcome::Rebuilt(n) => Some(n),
        }
    }
}

/// Owns the tile list of one track.
#[derive(Debug, Clone)]
pub struct TileManager {
    tiles: Vec<Tile>,
    unit_width: f64,
    last_applied: Option<(f64, f64)>,
    generation: u32,
}

impl Default for TileManager {
    fn default() -> Self {
        Self::new()
    }
}

impl TileManager {
    pub fn new() -> Self {
        Self {
            tiles: vec![Tile::PRIMARY],
            unit_width: 0.0,
            last_applied: None,
            generation: 0,
        }
    }

    pub fn retile(&mut self, viewport_width: f64, unit_width: f64) -> RetileOutcome {
        let Some(count) = required_tile_count(viewport_width, unit_width) else {
            return RetileOutcome::Unmeasured;
        };
        if count > MAX_TILES {
            return RetileOutcome::TooNarrow;
        }
        if self.last_applied == Some((viewport_width, unit_width)) {
            return RetileOutcome::Unchanged(self.tiles.len());
        }

        self.generation = self.generation.wrapping_add(1);
        self.tiles = rebuild_tiles(&self.tiles, count, self.generation);
        self.unit_width = unit_width;
        self.last_applied = Some((viewport_width, unit_width));
        RetileOutcome::Rebuilt(count)
    }

    /// Forgets the last applied inputs so the next `retile` always rebuilds.
    pub fn invalidate(&mut self) {
        self.last_applied = None;
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn tile_count(&self) -> usize {
        self.tiles.len()
    }

    /// Width of one content unit as of the last rebuild; 0 before any.
    pub fn unit_width(&self) -> f64 {
        self.unit_width
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn documented_example() {
        assert_eq!(required_tile_count(650.0, 200.0), Some(5));
    }

    #[test]
    fn exact_multiple_still_gets_slack_unit() {
        assert_eq!(required_tile_count(600.0, 200.0), Some(4));
        assert_eq!(required_tile_count(0.0, 200.0), Some(1));
    }

    #[test]
    fn unmeasured_unit_yields_none() {
        assert_eq!(required_tile_count(650.0, 0.0), None);
        assert_eq!(required_tile_count(650.0, -3.0), None);
        assert_eq!(required_tile_count(650.0, f64::NAN), None);
    }

    #[test]
    fn rebuild_keeps_primary_and_refreshes_clones() {
        let first = rebuild_tiles(&[Tile::PRIMARY], 3, 1);
        let second = rebuild_tiles(&first, 5, 2);
        assert_eq!(second.len(), 5);
        assert_eq!(second[0], Tile::PRIMARY);
        assert!(second[1..].iter().all(|t| t.generation == 2));
        assert!(second[1..].iter().all(Tile::is_hidden_from_assistive_tech));
        let indices: Vec<_> = second.iter().map(|t| t.index).collect();
        assert_eq!(indices, [0, 1, 2, 3, 4]);
    }

    #[test]
    fn rebuild_never_drops_primary() {
        assert_eq!(rebuild_tiles(&[], 0, 1), vec![Tile::PRIMARY]);
    }

    #[test]
    fn rebuild_clamps_to_max_tiles() {
        let tiles = rebuild_tiles(&[Tile::PRIMARY], usize::MAX, 1);
        assert_eq!(tiles.len(), MAX_TILES);
    }

    #[test]
    fn unmeasured_retile_records_nothing() {
        let mut tm = TileManager::new();
        assert_eq!(tm.retile(800.0, 0.0), RetileOutcome::Unmeasured);
        assert_eq!(tm.unit_width(), 0.0);
        assert_eq!(tm.tile_count(), 1);
    }

    #[test]
    fn identical_inputs_are_skipped() {
        let mut tm = TileManager::new();
        assert_eq!(tm.retile(650.0, 200.0), RetileOutcome::Rebuilt(5));
        let before = tm.tiles().to_vec();
        assert_eq!(tm.retile(650.0, 200.0), RetileOutcome::Unchanged(5));
        assert_eq!(tm.tiles(), &before[..]);

        tm.invalidate();
        assert_eq!(tm.retile(650.0, 200.0), RetileOutcome::Rebuilt(5));
    }
}
