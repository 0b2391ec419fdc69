use std::collections::HashSet;

use log::debug;
use rand::Rng;

use crate::config::{FOOD_ATTEMPTS_PER_CELL, FOOD_ENUMERATION_THRESHOLD, GridSize};
use crate::error::PlacementError;
use crate::snake::Cell;

/// Chooses a food cell uniformly among cells not in `occupied`.
///
/// Sparse grids use rejection sampling over the whole grid. Once occupancy
/// exceeds [`FOOD_ENUMERATION_THRESHOLD`], or sampling runs out of attempts,
/// the free cells are enumerated and one is picked directly, so the call
/// always terminates. A grid with no free cell yields
/// [`PlacementError::GridFull`].
pub fn place<R: Rng + ?Sized>(
    rng: &mut R,
    bounds: GridSize,
    occupied: &HashSet<Cell>,
) -> Result<Cell, PlacementError> {
    let total = bounds.total_cells();
    let occupied_in_bounds = occupied
        .iter()
        .filter(|cell| cell.is_within_bounds(bounds))
        .count();

    if occupied_in_bounds >= total {
        return Err(PlacementError::GridFull);
    }

    #[allow(clippy::cast_precision_loss)]
    let occupancy = occupied_in_bounds as f64 / total as f64;
    if occupancy <= FOOD_ENUMERATION_THRESHOLD {
        for _ in 0..total.saturating_mul(FOOD_ATTEMPTS_PER_CELL) {
            let candidate = Cell {
                x: rng.gen_range(0..i32::from(bounds.width)),
                y: rng.gen_range(0..i32::from(bounds.height)),
            };
            if !occupied.contains(&candidate) {
                return Ok(candidate);
            }
        }
        debug!("food sampling exhausted its attempts, enumerating free cells");
    }

    let free = free_cells(bounds, occupied);
    if free.is_empty() {
        return Err(PlacementError::GridFull);
    }

    Ok(free[rng.gen_range(0..free.len())])
}

/// Lists every cell of the grid not in `occupied`, row by row.
#[must_use]
pub fn free_cells(bounds: GridSize, occupied: &HashSet<Cell>) -> Vec<Cell> {
    let mut candidates = Vec::with_capacity(bounds.total_cells());

    for y in 0..i32::from(bounds.height) {
        for x in 0..i32::from(bounds.width) {
            let cell = Cell { x, y };
            if !occupied.contains(&cell) {
                candidates.push(cell);
            }
        }
    }

    candidates
}
