/// Maximum number of seats supported (backed by a u16).
pub const MAX_SEATS: usize = 16;

/// A dense bitset over seat indices.
///
/// Used for the per-street acted set and for eligibility scans where a
/// `HashSet` would be overkill for at most [`MAX_SEATS`] seats.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SeatSet(u16);

impl SeatSet {
    /// The empty set.
    pub fn empty() -> Self {
        Self(0)
    }

    pub fn enable(&mut self, seat: usize) {
        debug_assert!(seat < MAX_SEATS);
        self.0 |= 1 << seat;
    }

    pub fn disable(&mut self, seat: usize) {
        debug_assert!(seat < MAX_SEATS);
        self.0 &= !(1 << seat);
    }

    pub fn get(&self, seat: usize) -> bool {
        debug_assert!(seat < MAX_SEATS);
        self.0 & (1 << seat) != 0
    }

    pub fn count(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Enabled seats in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        let bits = self.0;
        (0..MAX_SEATS).filter(move |seat| bits & (1 << seat) != 0)
    }
}
