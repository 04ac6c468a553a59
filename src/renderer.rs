//! Interactive 3-D viewer for a generated set of polycubes.
//!
//! Generalizes the teacher's `visualization.rs` (kiss3d + pollster,
//! Left/Right to step between solutions, W/S to explode) from "one
//! piece-colored Soma/Bedlam solution" to "one shape per polycube, cells
//! colored uniformly since a polycube has no sub-pieces to distinguish".
//! Opaque to the core: nothing in `growth`, `canonical`, or `graph` imports
//! this module.

use kiss3d::prelude::*;

use crate::voxel::VoxelGrid;

const CUBE_SIZE: f32 = 0.9;
const CELL_SPACING: f32 = 1.0;
const SHAPE_COLOR: Color = Color::new(0.2, 0.6, 0.9, 1.0);

/// Displays every shape in `shapes` in an interactive viewer. Blocks until
/// the window is closed. A no-op if `shapes` is empty.
pub fn display(shapes: Vec<VoxelGrid>) {
    pollster::block_on(display_async(shapes));
}

async fn display_async(shapes: Vec<VoxelGrid>) {
    if shapes.is_empty() {
        println!("no shapes to display");
        return;
    }

    let num_shapes = shapes.len();
    let mut current = 0;

    let mut window = Window::new(&format!(
        "Polycube 1/{num_shapes} - [Left/Right] navigate, [W/S] explode, [R] reset"
    ))
    .await;

    let mut camera = OrbitCamera3d::default();

    let mut scene = SceneNode3d::empty();
    scene
        .add_light(Light::point(100.0))
        .set_position(Vec3::new(5.0, 5.0, 5.0));

    let (mut cube_nodes, mut center) = build_scene(&mut scene, &shapes[current]);
    camera.set_dist(shape_extent(&shapes[current]) * 2.5);

    let mut explosion_amount: f32 = 0.0;
    const EXPLOSION_SPEED: f32 = 0.05;
    let mut needs_rebuild = false;
    let mut explode_in = false;
    let mut explode_out = false;

    loop {
        for event in window.events().iter() {
            if let kiss3d::event::WindowEvent::Key(key, action, _) = event.value {
                use kiss3d::event::{Action, Key};
                let pressed = action == Action::Press;
                match key {
                    Key::W => explode_out = pressed,
                    Key::S => explode_in = pressed,
                    Key::R if pressed => explosion_amount = 0.0,
                    Key::Right if pressed => {
                        current = (current + 1) % num_shapes;
                        needs_rebuild = true;
                    }
                    Key::Left if pressed => {
                        current = current.checked_sub(1).unwrap_or(num_shapes - 1);
                        needs_rebuild = true;
                    }
                    _ => {}
                }
            }
        }

        if explode_out {
            explosion_amount += EXPLOSION_SPEED;
        }
        if explode_in {
            explosion_amount = (explosion_amount - EXPLOSION_SPEED).max(0.0);
        }

        if needs_rebuild {
            for mut node in cube_nodes.drain(..) {
                node.node.remove();
            }
            let (new_nodes, new_center) = build_scene(&mut scene, &shapes[current]);
            cube_nodes = new_nodes;
            center = new_center;
            camera.set_dist(shape_extent(&shapes[current]) * 2.5);
            window.set_title(&format!(
                "Polycube {}/{num_shapes} - [Left/Right] navigate, [W/S] explode, [R] reset",
                current + 1
            ));
            needs_rebuild = false;
        }

        for cube in &mut cube_nodes {
            let direction = (cube.base_position - center).normalize_or_zero();
            cube.node
                .set_position(cube.base_position + direction * explosion_amount * 2.0);
        }

        if !window.render_3d(&mut scene, &mut camera).await {
            break;
        }
    }
}

/// A rendered cube awaiting explosion-offset updates.
struct RenderedCube {
    node: SceneNode3d,
    base_position: Vec3,
}

fn shape_extent(shape: &VoxelGrid) -> f32 {
    let (dx, dy, dz) = shape.dims();
    [dx, dy, dz].into_iter().max().unwrap_or(1) as f32
}

/// Builds the scene for a single shape, centered at the origin.
fn build_scene(scene: &mut SceneNode3d, shape: &VoxelGrid) -> (Vec<RenderedCube>, Vec3) {
    let (dx, dy, dz) = shape.dims();
    let offset = Vec3::new(
        -((dx as f32) - 1.0) / 2.0,
        -((dy as f32) - 1.0) / 2.0,
        -((dz as f32) - 1.0) / 2.0,
    );

    let mut cubes = Vec::new();
    for (x, y, z) in shape.cells() {
        let base_position = Vec3::new(
            x as f32 * CELL_SPACING,
            y as f32 * CELL_SPACING,
            z as f32 * CELL_SPACING,
        ) + offset;
        let node = scene
            .add_cube(CUBE_SIZE, CUBE_SIZE, CUBE_SIZE)
            .set_color(SHAPE_COLOR)
            .set_position(base_position);
        cubes.push(RenderedCube { node, base_position });
    }

    (cubes, Vec3::ZERO)
}
