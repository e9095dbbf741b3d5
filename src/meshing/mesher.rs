//! # Segment Mesher Module
//!
//! Converts one segment (a `16×16×16` slab of a chunk) into the complete
//! list of visible oriented faces. Two passes cover every cell exactly once:
//!
//! - **Interior pass** (fast path): all Y-layers of the segment, but only
//!   x/z positions at least one cell away from the chunk edge. Every one of
//!   the 6 neighbors of such a cell lives inside the same chunk, so neighbor
//!   lookups are pure stride arithmetic on the flat cell array.
//! - **Boundary pass** (slow path): the outermost ring of the 16×16
//!   footprint, split into four corner-disjoint runs (-Z row, +X column,
//!   +Z row, -X column). Neighbor lookups go through the grid accessor,
//!   which resolves cross-chunk coordinates against the cached lateral
//!   neighbor chunks.
//!
//! Both passes apply the same visibility rule and must produce bit-identical
//! faces for cells where either could apply. Emission order is deterministic:
//! the interior pass runs to completion before the boundary pass, and within
//! each pass cells are visited Y ascending in a fixed z/x scan order with
//! faces checked in wire order 0..5. Two runs against identical voxel data
//! therefore produce byte-identical geometry.

use cgmath::Point3;
use web_time::{Duration, Instant};

use crate::rendering::atlas::TextureAtlas;
use crate::voxels::block::block_side::BlockSide;
use crate::voxels::block::catalog::BlockCatalog;
use crate::voxels::block::MaterialFlags;
use crate::voxels::cell::{self, BlockId, Cell};
use crate::voxels::chunk::{SEGMENT_SIZE, SIZE_XZ, SIZE_Y, STRIDE_Y, STRIDE_Z};
use crate::voxels::chunk::Chunk;
use crate::voxels::grid::VoxelGridAccessor;

use super::emitter::FaceEmitter;

/// Wall-clock cost of the two mesher passes of one build, for the build
/// queue's frame accounting and debug logging.
#[derive(Copy, Clone, Debug, Default)]
pub struct MeshTimings {
    /// Time spent in the interior fast pass.
    pub interior: Duration,
    /// Time spent in the boundary slow pass.
    pub boundary: Duration,
}

/// Meshes the segment at Y-offset `by` of the grid's chunk into `emitter`.
///
/// `by` must be a multiple of [`SEGMENT_SIZE`]. The caller resets the emitter
/// beforehand and uploads its contents afterwards; the mesher only appends.
///
/// # Panics
/// Panics if the voxel data references a block id the catalog does not know.
/// Continuing would silently corrupt geometry, so this is a fatal assertion
/// rather than a recoverable error.
pub fn mesh_segment(
    grid: &VoxelGridAccessor,
    catalog: &BlockCatalog,
    atlas: &dyn TextureAtlas,
    by: i32,
    emitter: &mut FaceEmitter,
) -> MeshTimings {
    debug_assert!(by % SEGMENT_SIZE == 0 && (0..SIZE_Y).contains(&by));

    let interior_start = Instant::now();
    mesh_interior(grid, catalog, atlas, by, emitter);
    let interior = interior_start.elapsed();

    let boundary_start = Instant::now();
    mesh_boundary(grid, catalog, atlas, by, emitter);
    let boundary = boundary_start.elapsed();

    log::trace!(
        "meshed segment by={} of chunk {:?}: {} quads, interior {:?}, boundary {:?}",
        by,
        grid.chunk().position,
        emitter.quad_count(),
        interior,
        boundary,
    );

    MeshTimings { interior, boundary }
}

/// Fast path: interior x/z positions, neighbors via stride arithmetic.
fn mesh_interior(
    grid: &VoxelGridAccessor,
    catalog: &BlockCatalog,
    atlas: &dyn TextureAtlas,
    by: i32,
    emitter: &mut FaceEmitter,
) {
    let cells = grid.chunk().cells();

    for ly in 0..SEGMENT_SIZE {
        let wy = by + ly;
        for z in 1..SIZE_XZ - 1 {
            for x in 1..SIZE_XZ - 1 {
                let index = Chunk::index_of(x, wy, z);
                let current = cells[index];
                if !cell::is_solid(current) {
                    continue;
                }

                // Neighbor cells in wire face order {+Z,-Z,+Y,-Y,+X,-X}.
                // Vertical lookups apply the chunk edge policies: air above
                // the ceiling, clamp-to-self below the floor.
                let neighbors: [Cell; 6] = [
                    cells[index + STRIDE_Z],
                    cells[index - STRIDE_Z],
                    if wy + 1 >= SIZE_Y { 0 } else { cells[index + STRIDE_Y] },
                    if wy == 0 { current } else { cells[index - STRIDE_Y] },
                    cells[index + 1],
                    cells[index - 1],
                ];

                emit_visible_faces(catalog, atlas, emitter, x, wy, z, by, current, &neighbors);
            }
        }
    }
}

/// Slow path: the four corner-disjoint boundary runs, neighbors via the grid
/// accessor.
fn mesh_boundary(
    grid: &VoxelGridAccessor,
    catalog: &BlockCatalog,
    atlas: &dyn TextureAtlas,
    by: i32,
    emitter: &mut FaceEmitter,
) {
    let edge = SIZE_XZ - 1;

    for ly in 0..SEGMENT_SIZE {
        let wy = by + ly;
        // Each run is SIZE-1 long so no corner is processed twice.
        for x in 0..edge {
            mesh_boundary_cell(grid, catalog, atlas, emitter, x, wy, 0, by);
        }
        for z in 0..edge {
            mesh_boundary_cell(grid, catalog, atlas, emitter, edge, wy, z, by);
        }
        for x in 1..=edge {
            mesh_boundary_cell(grid, catalog, atlas, emitter, x, wy, edge, by);
        }
        for z in 1..=edge {
            mesh_boundary_cell(grid, catalog, atlas, emitter, 0, wy, z, by);
        }
    }
}

fn mesh_boundary_cell(
    grid: &VoxelGridAccessor,
    catalog: &BlockCatalog,
    atlas: &dyn TextureAtlas,
    emitter: &mut FaceEmitter,
    x: i32,
    wy: i32,
    z: i32,
    by: i32,
) {
    let current = grid.chunk().cell(x, wy, z);
    if !cell::is_solid(current) {
        return;
    }

    let mut neighbors = [0 as Cell; 6];
    for side in BlockSide::all() {
        neighbors[side as usize] = grid.neighbor_cell(x, wy, z, side);
    }

    emit_visible_faces(catalog, atlas, emitter, x, wy, z, by, current, &neighbors);
}

/// Applies the visibility rule to all six faces of one solid cell and emits
/// the visible ones, in wire face order.
#[allow(clippy::too_many_arguments)]
fn emit_visible_faces(
    catalog: &BlockCatalog,
    atlas: &dyn TextureAtlas,
    emitter: &mut FaceEmitter,
    x: i32,
    wy: i32,
    z: i32,
    by: i32,
    current: Cell,
    neighbors: &[Cell; 6],
) {
    let id = cell::block_id(current);
    let descriptor = catalog
        .get_block_with_id(id)
        .unwrap_or_else(|| panic!("voxel data references unknown block id {id}"));

    for (face_index, neighbor) in neighbors.iter().enumerate() {
        if !face_visible(catalog, id, *neighbor) {
            continue;
        }

        let side = BlockSide::from_index(face_index);
        let slot = descriptor.face_slot(
            x,
            wy,
            z,
            side,
            cell::metadata(current),
            cell::data(current),
        );
        let coords = atlas.slot_coords(slot);
        emitter.emit(Point3::new(x, wy - by, z), side, coords);
    }
}

/// The sole culling rule: a face is emitted iff the neighbor is air, or is a
/// different block type whose material carries MERGE. Equal block types
/// never emit a face between them.
fn face_visible(catalog: &BlockCatalog, id: BlockId, neighbor: Cell) -> bool {
    let neighbor_id = cell::block_id(neighbor);
    if neighbor_id == cell::AIR {
        return true;
    }
    if neighbor_id == id {
        return false;
    }

    let descriptor = catalog
        .get_block_with_id(neighbor_id)
        .unwrap_or_else(|| panic!("voxel data references unknown block id {neighbor_id}"));
    descriptor.material.flags.contains(MaterialFlags::MERGE)
}
