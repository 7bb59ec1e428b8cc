/// The eight octants of a node, in fixed scan order.
///
/// `O1` is the max corner (+x +y +z) and `O7` the min corner (-x -y -z).
/// Index `i` in `Octant::ALL` matches bit `i` of `ActiveOctants` and slot `i`
/// of a node's children.

use glam::Vec3;
use crate::bounds::{BoundingRegion, AABB};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Octant {
    /// +x +y +z
    O1,
    /// -x +y +z
    O2,
    /// -x -y +z
    O3,
    /// +x -y +z
    O4,
    /// +x +y -z
    O5,
    /// -x +y -z
    O6,
    /// -x -y -z
    O7,
    /// +x -y -z
    O8,
}

impl Octant {
    /// All octants in scan order
    pub const ALL: [Octant; 8] = [
        Octant::O1, Octant::O2, Octant::O3, Octant::O4,
        Octant::O5, Octant::O6, Octant::O7, Octant::O8,
    ];

    /// Position in scan order (0..8)
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Octant> {
        Self::ALL.get(index).copied()
    }

    /// Which half of each axis this octant covers (true = upper half)
    fn upper_halves(self) -> (bool, bool, bool) {
        match self {
            Octant::O1 => (true, true, true),
            Octant::O2 => (false, true, true),
            Octant::O3 => (false, false, true),
            Octant::O4 => (true, false, true),
            Octant::O5 => (true, true, false),
            Octant::O6 => (false, true, false),
            Octant::O7 => (false, false, false),
            Octant::O8 => (true, false, false),
        }
    }

    /// Sub-box of `parent` covered by this octant, split at the parent's center
    pub fn aabb(self, parent: &AABB) -> AABB {
        let center = (parent.min + parent.max) * 0.5;
        let (ux, uy, uz) = self.upper_halves();

        let pick = |upper: bool, low: f32, mid: f32, high: f32| {
            if upper { (mid, high) } else { (low, mid) }
        };
        let (min_x, max_x) = pick(ux, parent.min.x, center.x, parent.max.x);
        let (min_y, max_y) = pick(uy, parent.min.y, center.y, parent.max.y);
        let (min_z, max_z) = pick(uz, parent.min.z, center.z, parent.max.z);

        AABB {
            min: Vec3::new(min_x, min_y, min_z),
            max: Vec3::new(max_x, max_y, max_z),
        }
    }

    /// Octant region of a node region
    pub fn region(self, parent: &BoundingRegion) -> BoundingRegion {
        BoundingRegion::from_aabb(self.aabb(&parent.bounding_box()))
    }

    /// All eight octant regions of `parent`, in scan order
    pub fn regions(parent: &BoundingRegion) -> [BoundingRegion; 8] {
        Self::ALL.map(|octant| octant.region(parent))
    }
}

#[cfg(test)]
#[path = "octant_tests.rs"]
mod tests;
