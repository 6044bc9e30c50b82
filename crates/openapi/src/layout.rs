//! Grid layout of entities on the canvas

use crate::options::LayoutConfig;
use relmap_core::Position;
use relmap_ir::Entity;

/// Number of grid columns for `count` entities: `ceil(sqrt(count))`
pub fn grid_columns(count: usize) -> usize {
    ((count as f64).sqrt().ceil() as usize).max(1)
}

/// Position of the entity at `index` in a grid with `columns` columns
pub fn grid_position(index: usize, columns: usize, layout: &LayoutConfig) -> Position {
    let columns = columns.max(1);
    let col = (index % columns) as f32;
    let row = (index / columns) as f32;
    layout
        .start
        .offset(col * layout.spacing_x, row * layout.spacing_y)
}

/// Place entities on a grid in their current order
pub fn assign_positions(entities: &mut [Entity], layout: &LayoutConfig) {
    let columns = grid_columns(entities.len());
    for (index, entity) in entities.iter_mut().enumerate() {
        entity.position = grid_position(index, columns, layout);
    }
}

// ============================================================================
// Tests
// ============================================================================
