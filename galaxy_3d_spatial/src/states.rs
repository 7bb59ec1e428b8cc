/// Typed bit flags for per-entity status.
///
/// `InstanceStates` carries the motion/life bits of a rigid body.
/// `ActiveOctants` records which of a node's eight children exist.
/// Bit `i` of `ActiveOctants` corresponds to octant `O(i+1)`.

use bitflags::bitflags;

bitflags! {
    /// Per-instance status bits.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct InstanceStates: u8 {
        /// Position or size changed since the last spatial index step
        const MOVED = 0b0000_0001;
        /// Instance is queued for removal
        const DEAD  = 0b0000_0010;
    }
}

impl InstanceStates {
    pub fn is_moved(&self) -> bool {
        self.contains(Self::MOVED)
    }

    pub fn is_dead(&self) -> bool {
        self.contains(Self::DEAD)
    }

    pub fn set_moved(&mut self, moved: bool) {
        self.set(Self::MOVED, moved);
    }

    pub fn mark_dead(&mut self) {
        self.insert(Self::DEAD);
    }
}

bitflags! {
    /// One bit per octant child of an octree node.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct ActiveOctants: u8 {
        const O1 = 0x01;
        const O2 = 0x02;
        const O3 = 0x04;
        const O4 = 0x08;
        const O5 = 0x10;
        const O6 = 0x20;
        const O7 = 0x40;
        const O8 = 0x80;
    }
}

impl ActiveOctants {
    /// Flag for a single octant index, empty when `index` is not in 0..8
    fn index_flag(index: usize) -> Self {
        match u32::try_from(index).ok().and_then(|shift| 1u8.checked_shl(shift)) {
            Some(bit) => Self::from_bits_retain(bit),
            None => Self::empty(),
        }
    }

    /// Always false for indices past O8
    pub fn is_octant_active(&self, index: usize) -> bool {
        let flag = Self::index_flag(index);
        !flag.is_empty() && self.contains(flag)
    }

    /// No-op for indices past O8
    pub fn activate_octant(&mut self, index: usize) {
        self.insert(Self::index_flag(index));
    }

    pub fn deactivate_octant(&mut self, index: usize) {
        self.remove(Self::index_flag(index));
    }

    /// Activate `index` and clear every other octant (no-op past O8)
    pub fn uniquely_activate_octant(&mut self, index: usize) {
        let flag = Self::index_flag(index);
        if !flag.is_empty() {
            *self = flag;
        }
    }

    pub fn toggle_octant(&mut self, index: usize) {
        self.toggle(Self::index_flag(index));
    }

    /// Active octant indices in ascending order (O1 first)
    pub fn active_indices(&self) -> impl Iterator<Item = usize> {
        let bits = self.bits();
        (0..8).filter(move |i| bits & (1u8 << i) != 0)
    }
}

#[cfg(test)]
#[path = "states_tests.rs"]
mod tests;
