//! One-time region formatting.
//!
//! A fresh region is raw bytes until the first `create_queue`, which
//! pays the full setup cost once. The marker byte gates re-formatting,
//! so reopening an already-formatted buffer keeps every queue in it.

use super::layout::{
    BLOCK_COUNT, FORMAT_MARKER, FORMAT_MARKER_OFFSET, FREE_HEAD_OFFSET, MAX_QUEUES, NO_BLOCK,
    Region, meta_offset,
};
use super::slots;

/// Whether the region carries the format marker.
pub(crate) fn is_formatted(mem: &Region) -> bool {
    mem[FORMAT_MARKER_OFFSET] == FORMAT_MARKER
}

/// Format the region on first use; later calls are no-ops.
pub(crate) fn ensure_formatted(mem: &mut Region) {
    if is_formatted(mem) {
        return;
    }

    slots::set_occupancy(mem, 0);

    // Thread every block into one ascending free list.
    for block in 0..(BLOCK_COUNT - 1) as u8 {
        mem[meta_offset(block)] = block + 1;
    }
    mem[meta_offset((BLOCK_COUNT - 1) as u8)] = NO_BLOCK;
    mem[FREE_HEAD_OFFSET] = 0;

    // The marker is written last; everything above must be in place
    // before the region can pass validation.
    mem[FORMAT_MARKER_OFFSET] = FORMAT_MARKER;
    log::debug!("formatted region: {MAX_QUEUES} queue slots, {BLOCK_COUNT} pool blocks");
}
