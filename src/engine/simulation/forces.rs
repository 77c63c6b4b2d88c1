use eframe::egui::{Vec2, vec2};

use super::quadtree::QuadNode;

const REPULSION_SCALE: f32 = 600.0;
const SOFTENING: f32 = 620.0;

#[derive(Clone, Copy)]
pub(super) struct SeparationParams {
    pub(super) spacing_factor: f32,
    pub(super) max_pair_distance_sq: f32,
}

fn fallback_direction(from: usize, to: usize) -> Vec2 {
    let angle =
        ((from as f32) * 0.618_034 + (to as f32) * 0.414_214 + 0.23) * std::f32::consts::TAU;
    vec2(angle.cos(), angle.sin())
}

fn repulsion_between(point: Vec2, other: Vec2, other_strength: f32) -> Vec2 {
    let delta = point - other;
    let distance_sq = delta.length_sq();
    let direction = if distance_sq > 0.0001 {
        delta / distance_sq.sqrt()
    } else {
        vec2(1.0, 0.0)
    };
    direction * ((other_strength * REPULSION_SCALE) / (distance_sq + SOFTENING))
}

pub(super) fn accumulate_repulsion_for_node(
    cell: &QuadNode,
    index: usize,
    positions: &[Vec2],
    strengths: &[f32],
    theta: f32,
    force: &mut Vec2,
) {
    if cell.strength <= 0.0 {
        return;
    }

    let point = positions[index];

    if cell.is_leaf() {
        for &other in &cell.indices {
            if other == index {
                continue;
            }
            *force += repulsion_between(point, positions[other], strengths[other]);
        }
        return;
    }

    let delta = point - cell.weighted_center;
    let distance_sq = delta.length_sq().max(0.0001);
    let distance = distance_sq.sqrt();
    if !cell.bounds.contains(point) && (cell.bounds.side_length() / distance) < theta {
        let magnitude = (cell.strength * REPULSION_SCALE) / (distance_sq + SOFTENING);
        *force += (delta / distance) * magnitude;
        return;
    }

    for child in cell.children.iter().flatten() {
        accumulate_repulsion_for_node(child, index, positions, strengths, theta, force);
    }
}

fn separate_pair(
    from: usize,
    to: usize,
    positions: &mut [Vec2],
    radii: &[f32],
    spacing_factor: f32,
) {
    let delta = positions[from] - positions[to];
    let distance_sq = delta.length_sq();
    let distance = distance_sq.sqrt();
    let min_distance = spacing_factor * (radii[from] + radii[to]);
    if distance >= min_distance {
        return;
    }

    let direction = if distance > 0.0001 {
        delta / distance
    } else {
        fallback_direction(from, to)
    };

    let overlap = min_distance - distance;
    let total = radii[from] + radii[to];
    positions[from] += direction * (overlap * (radii[to] / total));
    positions[to] -= direction * (overlap * (radii[from] / total));
}

pub(super) fn separate_pairs(
    cell_a: &QuadNode,
    cell_b: &QuadNode,
    same_cell: bool,
    positions: &mut [Vec2],
    radii: &[f32],
    params: SeparationParams,
) {
    if cell_a.bounds.distance_sq_to(cell_b.bounds) > params.max_pair_distance_sq {
        return;
    }

    if cell_a.is_leaf() && cell_b.is_leaf() {
        if same_cell {
            for i in 0..cell_a.indices.len() {
                for j in (i + 1)..cell_a.indices.len() {
                    separate_pair(
                        cell_a.indices[i],
                        cell_a.indices[j],
                        positions,
                        radii,
                        params.spacing_factor,
                    );
                }
            }
        } else {
            for &from in &cell_a.indices {
                for &to in &cell_b.indices {
                    separate_pair(from, to, positions, radii, params.spacing_factor);
                }
            }
        }
        return;
    }

    if same_cell {
        for first in 0..4 {
            let Some(child_a) = cell_a.children[first].as_ref() else {
                continue;
            };

            separate_pairs(child_a, child_a, true, positions, radii, params);
            for second in (first + 1)..4 {
                let Some(child_b) = cell_a.children[second].as_ref() else {
                    continue;
                };
                separate_pairs(child_a, child_b, false, positions, radii, params);
            }
        }
        return;
    }

    let split_a = if cell_a.is_leaf() {
        false
    } else if cell_b.is_leaf() {
        true
    } else {
        cell_a.bounds.half_extent >= cell_b.bounds.half_extent
    };

    if split_a {
        for child in cell_a.children.iter().flatten() {
            separate_pairs(child, cell_b, false, positions, radii, params);
        }
    } else {
        for child in cell_b.children.iter().flatten() {
            separate_pairs(cell_a, child, false, positions, radii, params);
        }
    }
}
