use eframe::egui::{Vec2, vec2};

const LEAF_CAPACITY: usize = 8;
const MAX_DEPTH: usize = 10;

#[derive(Clone, Copy)]
pub(super) struct CellBounds {
    pub(super) center: Vec2,
    pub(super) half_extent: f32,
}

impl CellBounds {
    fn around(points: &[Vec2]) -> Option<Self> {
        let mut min = vec2(f32::INFINITY, f32::INFINITY);
        let mut max = vec2(f32::NEG_INFINITY, f32::NEG_INFINITY);
        for point in points {
            min = min.min(*point);
            max = max.max(*point);
        }

        if !min.x.is_finite() || !min.y.is_finite() || !max.x.is_finite() || !max.y.is_finite() {
            return None;
        }

        let span = (max.x - min.x).max(max.y - min.y).max(1.0);
        Some(Self {
            center: (min + max) * 0.5,
            half_extent: (span * 0.5) + 1.0,
        })
    }

    pub(super) fn contains(self, point: Vec2) -> bool {
        (point.x - self.center.x).abs() <= self.half_extent
            && (point.y - self.center.y).abs() <= self.half_extent
    }

    fn quadrant_for(self, point: Vec2) -> usize {
        let right = point.x >= self.center.x;
        let lower = point.y >= self.center.y;
        (right as usize) | ((lower as usize) << 1)
    }

    fn child(self, quadrant: usize) -> Self {
        let quarter = self.half_extent * 0.5;
        let x = if quadrant & 1 == 0 { -quarter } else { quarter };
        let y = if quadrant & 2 == 0 { -quarter } else { quarter };

        Self {
            center: self.center + vec2(x, y),
            half_extent: quarter,
        }
    }

    pub(super) fn side_length(self) -> f32 {
        self.half_extent * 2.0
    }

    pub(super) fn distance_sq_to(self, other: Self) -> f32 {
        let gap_x =
            ((self.center.x - other.center.x).abs() - (self.half_extent + other.half_extent)).max(0.0);
        let gap_y =
            ((self.center.y - other.center.y).abs() - (self.half_extent + other.half_extent)).max(0.0);
        (gap_x * gap_x) + (gap_y * gap_y)
    }
}

pub(super) struct QuadNode {
    pub(super) bounds: CellBounds,
    pub(super) weighted_center: Vec2,
    pub(super) strength: f32,
    pub(super) indices: Vec<usize>,
    pub(super) children: [Option<Box<QuadNode>>; 4],
}

impl QuadNode {
    pub(super) fn build(positions: &[Vec2], strengths: &[f32]) -> Option<Self> {
        let bounds = CellBounds::around(positions)?;
        let indices = (0..positions.len()).collect::<Vec<_>>();
        Some(Self::build_cell(bounds, indices, positions, strengths, 0))
    }

    fn build_cell(
        bounds: CellBounds,
        indices: Vec<usize>,
        positions: &[Vec2],
        strengths: &[f32],
        depth: usize,
    ) -> Self {
        let mut weighted_center = Vec2::ZERO;
        let mut strength = 0.0_f32;
        for &index in &indices {
            weighted_center += positions[index] * strengths[index];
            strength += strengths[index];
        }
        if strength > 0.0 {
            weighted_center /= strength;
        }

        let mut cell = Self {
            bounds,
            weighted_center,
            strength,
            indices,
            children: std::array::from_fn(|_| None),
        };

        if depth >= MAX_DEPTH || cell.indices.len() <= LEAF_CAPACITY {
            return cell;
        }

        let mut buckets = std::array::from_fn::<_, 4, _>(|_| Vec::new());
        for &index in &cell.indices {
            buckets[bounds.quadrant_for(positions[index])].push(index);
        }

        if buckets.iter().filter(|bucket| !bucket.is_empty()).count() <= 1 {
            return cell;
        }

        for (quadrant, bucket) in buckets.into_iter().enumerate() {
            if bucket.is_empty() {
                continue;
            }

            cell.children[quadrant] = Some(Box::new(Self::build_cell(
                bounds.child(quadrant),
                bucket,
                positions,
                strengths,
                depth + 1,
            )));
        }
        cell.indices.clear();
        cell
    }

    pub(super) fn is_leaf(&self) -> bool {
        self.children.iter().all(|child| child.is_none())
    }
}
