//! Queue slot allocation and handle validation.
//!
//! Slot liveness is one bit in the 64-bit occupancy word at the front
//! of the region. Allocation always picks the lowest clear bit, so slot
//! indices recycle eagerly.

use super::fault::Fault;
use super::format;
use super::layout::{MAX_QUEUES, OCCUPANCY_OFFSET, Region};

/// Opaque handle to one live queue.
///
/// The id is the queue's slot index. Every operation re-validates it
/// against the occupancy word, so an out-of-range or currently-dead id
/// fails with [`Fault::IllegalOperation`] instead of touching another
/// queue's state. An id held across `destroy_queue` and a later
/// `create_queue` can alias the slot's new occupant; retiring ids at
/// destroy time is the caller's responsibility.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct QueueId(u8);

impl QueueId {
    /// Rebuild an id from a raw slot index, e.g. one round-tripped
    /// through a host-side table. Nothing is checked here; a bad index
    /// is rejected by the next operation that uses it.
    #[must_use]
    pub const fn from_raw(slot: u8) -> Self {
        QueueId(slot)
    }

    /// The raw slot index behind this id.
    #[must_use]
    pub const fn to_raw(self) -> u8 {
        self.0
    }
}

/// Read the slot occupancy word.
pub(crate) fn occupancy(mem: &Region) -> u64 {
    let mut word = [0u8; 8];
    word.copy_from_slice(&mem[OCCUPANCY_OFFSET..OCCUPANCY_OFFSET + 8]);
    u64::from_le_bytes(word)
}

/// Overwrite the slot occupancy word.
pub(crate) fn set_occupancy(mem: &mut Region, word: u64) {
    mem[OCCUPANCY_OFFSET..OCCUPANCY_OFFSET + 8].copy_from_slice(&word.to_le_bytes());
}

/// Lowest free slot, or `None` when all 64 are taken.
pub(crate) fn find_free_slot(mem: &Region) -> Option<u8> {
    let taken = occupancy(mem).trailing_ones();
    if taken as usize >= MAX_QUEUES {
        None
    } else {
        Some(taken as u8)
    }
}

/// Mark `slot` live.
pub(crate) fn claim_slot(mem: &mut Region, slot: u8) {
    debug_assert!((slot as usize) < MAX_QUEUES, "claimed slot {slot} out of range");
    set_occupancy(mem, occupancy(mem) | 1u64 << slot);
}

/// Mark `slot` free.
pub(crate) fn release_slot(mem: &mut Region, slot: u8) {
    debug_assert!((slot as usize) < MAX_QUEUES, "released slot {slot} out of range");
    set_occupancy(mem, occupancy(mem) & !(1u64 << slot));
}

/// Check `id` ahead of an operation and return its slot index.
///
/// Rejects, in order: a never-formatted region, an out-of-range index,
/// and a slot whose occupancy bit is clear.
///
/// # Errors
///
/// Returns `Fault::IllegalOperation` for all three.
pub(crate) fn validate(mem: &Region, id: QueueId) -> Result<u8, Fault> {
    if !format::is_formatted(mem) {
        return Err(Fault::IllegalOperation);
    }

    let slot = id.to_raw();
    if slot as usize >= MAX_QUEUES {
        return Err(Fault::IllegalOperation);
    }
    if occupancy(mem) & 1u64 << slot == 0 {
        return Err(Fault::IllegalOperation);
    }

    Ok(slot)
}
