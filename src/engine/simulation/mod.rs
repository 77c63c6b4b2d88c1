mod forces;
mod quadtree;

use eframe::egui::{Vec2, vec2};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::Viewport;
use forces::{SeparationParams, accumulate_repulsion_for_node, separate_pairs};
use quadtree::QuadNode;

pub const LAYOUT_ITERATIONS: usize = 300;
pub const JITTER_EXTENT: f32 = 20.0;
pub const SPACING_FACTOR: f32 = 1.2;

const BARNES_HUT_THETA: f32 = 0.72;
const CENTER_PULL: f32 = 0.006;
const FORCE_STEP: f32 = 0.055;
const VELOCITY_DAMPING: f32 = 0.9;
const MAX_SPEED: f32 = 24.0;
const SEPARATION_SWEEPS: usize = 2;

pub fn initial_positions(count: usize, viewport: Viewport, seed: u64) -> Vec<Vec2> {
    let mut rng = StdRng::seed_from_u64(seed);
    let center = viewport.center();

    (0..count)
        .map(|_| {
            center
                + vec2(
                    rng.gen_range(-JITTER_EXTENT..=JITTER_EXTENT),
                    rng.gen_range(-JITTER_EXTENT..=JITTER_EXTENT),
                )
        })
        .collect()
}

pub fn run_layout(radii: &[f32], viewport: Viewport, seed: u64) -> Vec<Vec2> {
    let count = radii.len();
    let mut positions = initial_positions(count, viewport, seed);
    if count == 0 {
        return positions;
    }

    let mut velocities = vec![Vec2::ZERO; count];
    let mut accumulated = vec![Vec2::ZERO; count];
    for _ in 0..LAYOUT_ITERATIONS {
        step(&mut positions, &mut velocities, &mut accumulated, radii, viewport);
    }
    positions
}

fn step(
    positions: &mut [Vec2],
    velocities: &mut [Vec2],
    accumulated: &mut [Vec2],
    radii: &[f32],
    viewport: Viewport,
) {
    let count = positions.len();
    let center = viewport.center();
    accumulated.fill(Vec2::ZERO);

    if count > 1
        && let Some(tree) = QuadNode::build(positions, radii)
    {
        for (index, force) in accumulated.iter_mut().enumerate() {
            accumulate_repulsion_for_node(&tree, index, positions, radii, BARNES_HUT_THETA, force);
        }
    }

    for (index, force) in accumulated.iter_mut().enumerate() {
        *force += (center - positions[index]) * CENTER_PULL;
    }

    for index in 0..count {
        let mut velocity = (velocities[index] + (accumulated[index] * FORCE_STEP)) * VELOCITY_DAMPING;
        let speed_sq = velocity.length_sq();
        if speed_sq > MAX_SPEED * MAX_SPEED {
            velocity *= MAX_SPEED / speed_sq.sqrt();
        }

        velocities[index] = velocity;
        positions[index] += velocity;
    }

    if count > 1 {
        let max_radius = radii.iter().fold(0.0_f32, |max, radius| max.max(*radius));
        let max_pair_distance = (SPACING_FACTOR * 2.0 * max_radius) + 4.0;
        let params = SeparationParams {
            spacing_factor: SPACING_FACTOR,
            max_pair_distance_sq: max_pair_distance * max_pair_distance,
        };

        for _ in 0..SEPARATION_SWEEPS {
            if let Some(tree) = QuadNode::build(positions, radii) {
                separate_pairs(&tree, &tree, true, positions, radii, params);
            }
        }
    }

    let mut centroid = Vec2::ZERO;
    for position in positions.iter() {
        centroid += *position;
    }
    centroid /= count as f32;

    let correction = center - centroid;
    if correction.length_sq() > 0.000_001 {
        for position in positions.iter_mut() {
            *position += correction;
        }
    }
}
