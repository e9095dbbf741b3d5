//! Integration tests for the two-pass segment mesher: face culling, chunk
//! edge policies, boundary/interior agreement, and deterministic output.

use cgmath::Point2;

use voxel_segments::meshing::{mesh_segment, FaceEmitter};
use voxel_segments::rendering::{GridAtlas, TextureAtlas, Vertex};
use voxel_segments::voxels::block::{BlockCatalog, BlockDescriptor};
use voxel_segments::voxels::cell;
use voxel_segments::voxels::chunk::{Chunk, SIZE_XZ, SIZE_Y};
use voxel_segments::voxels::grid::VoxelGridAccessor;
use voxel_segments::voxels::world::World;

/// Builtin block ids used throughout: dirt/grass are opaque, glass carries
/// the MERGE flag.
const DIRT: u8 = 1;
const GRASS: u8 = 2;
const GLASS: u8 = 5;

fn mesh(world: &World, chunk_position: Point2<i32>, by: i32) -> (Vec<Vertex>, Vec<u32>) {
    let _ = env_logger::builder().is_test(true).try_init();
    let catalog = BlockCatalog::with_builtin_blocks();
    let atlas = GridAtlas::new(8);
    let grid = VoxelGridAccessor::gather(world, chunk_position).expect("chunk must be loaded");
    let mut emitter = FaceEmitter::new();
    mesh_segment(&grid, &catalog, &atlas, by, &mut emitter);
    let mesh = emitter.finish();
    (mesh.vertices.to_vec(), mesh.indices.to_vec())
}

fn quad_count(world: &World, chunk_position: Point2<i32>, by: i32) -> usize {
    let (vertices, _) = mesh(world, chunk_position, by);
    vertices.len() / 4
}

/// Positions of the four corners of quad `q`, in emission order.
fn quad_corners(vertices: &[Vertex], q: usize) -> [cgmath::Point3<i32>; 4] {
    let base = q * 4;
    [
        vertices[base].position(),
        vertices[base + 1].position(),
        vertices[base + 2].position(),
        vertices[base + 3].position(),
    ]
}

#[test]
fn isolated_block_emits_one_quad_per_face() {
    // A single non-merging block with no neighbors in any direction: six
    // quads, one per face, in wire face order {+Z,-Z,+Y,-Y,+X,-X}. A marker
    // block whose face slots are 0..=5 pins each quad to its face.
    let mut catalog = BlockCatalog::new();
    catalog.register(BlockDescriptor::new(1, "marker", [0, 1, 2, 3, 4, 5]));
    let atlas = GridAtlas::new(8);

    let mut chunk = Chunk::empty(Point2::new(0, 0));
    chunk.set_cell(5, 5, 5, cell::pack_id(1));
    let mut world = World::new();
    world.insert(chunk);

    let grid = VoxelGridAccessor::gather(&world, Point2::new(0, 0)).unwrap();
    let mut emitter = FaceEmitter::new();
    mesh_segment(&grid, &catalog, &atlas, 0, &mut emitter);
    let mesh = emitter.finish();

    assert_eq!(mesh.vertices.len(), 24);
    assert_eq!(mesh.indices.len(), 36);
    assert_eq!(mesh.element_count(), 36);

    // Quad q carries atlas slot q, so each face resolved its own slot.
    for q in 0..6 {
        let expected = atlas.slot_coords(q as u16);
        for corner in 0..4 {
            assert_eq!(
                mesh.vertices[q * 4 + corner].tex_coords(),
                expected[corner],
                "quad {q} corner {corner}"
            );
        }
    }

    // Each quad lies in the plane its face direction dictates.
    let planes = [
        |p: cgmath::Point3<i32>| p.z == 6, // +Z
        |p: cgmath::Point3<i32>| p.z == 5, // -Z
        |p: cgmath::Point3<i32>| p.y == 6, // +Y
        |p: cgmath::Point3<i32>| p.y == 5, // -Y
        |p: cgmath::Point3<i32>| p.x == 6, // +X
        |p: cgmath::Point3<i32>| p.x == 5, // -X
    ];
    for (q, in_plane) in planes.iter().enumerate() {
        for corner in quad_corners(mesh.vertices, q) {
            assert!(in_plane(corner), "quad {q} corner {corner:?} off-plane");
        }
    }
}

#[test]
fn homogeneous_fill_emits_no_faces() {
    // Solid same-type fill with all four lateral neighbors loaded and solid:
    // every face has an equal-type neighbor (the floor clamps to self), so
    // nothing is emitted.
    let mut world = World::new();
    world.insert(Chunk::solid(Point2::new(0, 0), DIRT));
    world.insert(Chunk::solid(Point2::new(0, 1), DIRT));
    world.insert(Chunk::solid(Point2::new(0, -1), DIRT));
    world.insert(Chunk::solid(Point2::new(1, 0), DIRT));
    world.insert(Chunk::solid(Point2::new(-1, 0), DIRT));

    assert_eq!(quad_count(&world, Point2::new(0, 0), 0), 0);
    assert_eq!(quad_count(&world, Point2::new(0, 0), 128), 0);
}

#[test]
fn top_segment_exposes_only_the_ceiling() {
    // Same solid fill, but the topmost segment sees air above the world
    // ceiling: exactly one +Y quad per column.
    let mut world = World::new();
    world.insert(Chunk::solid(Point2::new(0, 0), DIRT));
    world.insert(Chunk::solid(Point2::new(0, 1), DIRT));
    world.insert(Chunk::solid(Point2::new(0, -1), DIRT));
    world.insert(Chunk::solid(Point2::new(1, 0), DIRT));
    world.insert(Chunk::solid(Point2::new(-1, 0), DIRT));

    let by = SIZE_Y - 16;
    let (vertices, _) = mesh(&world, Point2::new(0, 0), by);
    assert_eq!(vertices.len() / 4, (SIZE_XZ * SIZE_XZ) as usize);
    // All emitted quads lie in the segment-local ceiling plane.
    for vertex in vertices {
        assert_eq!(vertex.position().y, 16);
    }
}

#[test]
fn world_floor_never_emits_bottom_faces() {
    let mut chunk = Chunk::empty(Point2::new(0, 0));
    chunk.set_cell(7, 0, 7, cell::pack_id(DIRT));
    let mut world = World::new();
    world.insert(chunk);

    let (vertices, _) = mesh(&world, Point2::new(0, 0), 0);
    assert_eq!(vertices.len() / 4, 5);
    // A -Y quad would have all four corners at y == 0.
    for q in 0..5 {
        let corners = quad_corners(&vertices, q);
        assert!(
            corners.iter().any(|p| p.y == 1),
            "quad {q} sits entirely in the floor plane"
        );
    }
}

#[test]
fn unloaded_lateral_neighbor_reads_as_air() {
    let mut chunk = Chunk::empty(Point2::new(0, 0));
    chunk.set_cell(15, 5, 5, cell::pack_id(DIRT));
    let mut world = World::new();
    world.insert(chunk);

    // No +X neighbor chunk: the shared face is exposed.
    assert_eq!(quad_count(&world, Point2::new(0, 0), 0), 6);

    // Loading a same-type neighbor across the seam suppresses it.
    let mut neighbor = Chunk::empty(Point2::new(1, 0));
    neighbor.set_cell(0, 5, 5, cell::pack_id(DIRT));
    world.insert(neighbor);
    assert_eq!(quad_count(&world, Point2::new(0, 0), 0), 5);
}

#[test]
fn merge_materials_keep_the_face_across_a_seam() {
    let mut chunk = Chunk::empty(Point2::new(0, 0));
    chunk.set_cell(15, 5, 5, cell::pack_id(DIRT));
    let mut world = World::new();
    world.insert(chunk);

    // Dirt against glass: different type and the neighbor merges, so the
    // shared face stays.
    let mut neighbor = Chunk::empty(Point2::new(1, 0));
    neighbor.set_cell(0, 5, 5, cell::pack_id(GLASS));
    world.insert(neighbor);
    assert_eq!(quad_count(&world, Point2::new(0, 0), 0), 6);

    // Dirt against grass: different type but opaque, so it is culled.
    let mut neighbor = Chunk::empty(Point2::new(1, 0));
    neighbor.set_cell(0, 5, 5, cell::pack_id(GRASS));
    world.insert(neighbor);
    assert_eq!(quad_count(&world, Point2::new(0, 0), 0), 5);

    // Glass against glass: equal types never emit between themselves.
    let mut center = Chunk::empty(Point2::new(0, 0));
    center.set_cell(15, 5, 5, cell::pack_id(GLASS));
    let mut neighbor = Chunk::empty(Point2::new(1, 0));
    neighbor.set_cell(0, 5, 5, cell::pack_id(GLASS));
    world.insert(center);
    world.insert(neighbor);
    assert_eq!(quad_count(&world, Point2::new(0, 0), 0), 5);
}

#[test]
fn boundary_and_interior_paths_agree() {
    // The same 4x4x4 pattern meshed twice: once fully interior, once
    // straddling a chunk seam so half of it goes through the boundary path.
    // Total face counts must match.
    fastrand::seed(0x5eed);
    let palette = [0, 0, DIRT, GRASS, GLASS];
    let mut pattern = [[[0u8; 4]; 4]; 4];
    for plane in pattern.iter_mut() {
        for row in plane.iter_mut() {
            for slot in row.iter_mut() {
                *slot = palette[fastrand::usize(..palette.len())];
            }
        }
    }

    let mut interior_world = World::new();
    let mut chunk = Chunk::empty(Point2::new(0, 0));
    for (px, plane) in pattern.iter().enumerate() {
        for (py, row) in plane.iter().enumerate() {
            for (pz, &id) in row.iter().enumerate() {
                let (x, y, z) = (6 + px as i32, 6 + py as i32, 6 + pz as i32);
                chunk.set_cell(x, y, z, cell::pack_id(id));
            }
        }
    }
    interior_world.insert(chunk);
    let interior_quads = quad_count(&interior_world, Point2::new(0, 0), 0);

    let mut seam_world = World::new();
    let mut west = Chunk::empty(Point2::new(0, 0));
    let mut east = Chunk::empty(Point2::new(1, 0));
    for (px, plane) in pattern.iter().enumerate() {
        for (py, row) in plane.iter().enumerate() {
            for (pz, &id) in row.iter().enumerate() {
                // Pattern x 0..2 lands on the west edge, 2..4 on the east.
                let (y, z) = (6 + py as i32, 6 + pz as i32);
                if px < 2 {
                    west.set_cell(14 + px as i32, y, z, cell::pack_id(id));
                } else {
                    east.set_cell(px as i32 - 2, y, z, cell::pack_id(id));
                }
            }
        }
    }
    seam_world.insert(west);
    seam_world.insert(east);
    let seam_quads = quad_count(&seam_world, Point2::new(0, 0), 0)
        + quad_count(&seam_world, Point2::new(1, 0), 0);

    assert_eq!(interior_quads, seam_quads);
}

#[test]
fn meshing_is_deterministic() {
    fastrand::seed(0xfacade);
    let palette = [0, 0, 0, DIRT, GRASS, GLASS];

    let mut world = World::new();
    for position in [
        Point2::new(0, 0),
        Point2::new(0, 1),
        Point2::new(0, -1),
        Point2::new(1, 0),
        Point2::new(-1, 0),
    ] {
        let mut chunk = Chunk::empty(position);
        for y in 0..20 {
            for z in 0..SIZE_XZ {
                for x in 0..SIZE_XZ {
                    let id = palette[fastrand::usize(..palette.len())];
                    chunk.set_cell(x, y, z, cell::pack_id(id));
                }
            }
        }
        world.insert(chunk);
    }

    let first = mesh(&world, Point2::new(0, 0), 0);
    let second = mesh(&world, Point2::new(0, 0), 0);
    assert!(!first.0.is_empty(), "random fill should produce some faces");
    assert_eq!(first.0, second.0);
    assert_eq!(first.1, second.1);
}
