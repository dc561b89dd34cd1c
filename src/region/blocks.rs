//! Block pool allocation.
//!
//! All 238 pool blocks sit on a single free list threaded through their
//! metadata bytes; the list head index lives at `FREE_HEAD_OFFSET`.
//! Pop and push are O(1) and touch exactly two bytes each.

use super::fault::Fault;
use super::layout::{BLOCK_COUNT, FREE_HEAD_OFFSET, NO_BLOCK, Region, meta_offset};

/// Pop one block off the free list.
///
/// # Errors
///
/// Returns `Fault::OutOfMemory` when the pool is exhausted; the region
/// is left untouched in that case.
pub(crate) fn alloc_block(mem: &mut Region) -> Result<u8, Fault> {
    let head = mem[FREE_HEAD_OFFSET];
    if head == NO_BLOCK {
        return Err(Fault::OutOfMemory);
    }
    debug_assert!((head as usize) < BLOCK_COUNT, "free list head {head} out of range");

    mem[FREE_HEAD_OFFSET] = mem[meta_offset(head)];
    Ok(head)
}

/// Push `block` back onto the free list, overwriting its metadata byte
/// with the previous list head.
pub(crate) fn free_block(mem: &mut Region, block: u8) {
    debug_assert!((block as usize) < BLOCK_COUNT, "freed block {block} out of range");

    mem[meta_offset(block)] = mem[FREE_HEAD_OFFSET];
    mem[FREE_HEAD_OFFSET] = block;
}

/// Walk the free list and count its blocks. Test diagnostics only.
#[cfg(test)]
pub(crate) fn free_block_count(mem: &Region) -> usize {
    let mut count = 0;
    let mut cursor = mem[FREE_HEAD_OFFSET];
    while cursor != NO_BLOCK {
        count += 1;
        assert!(count <= BLOCK_COUNT, "free list cycle");
        cursor = mem[meta_offset(cursor)];
    }
    count
}
