//! Byte layout of the backing region.
//!
//! The engine keeps every piece of state inside one caller-owned
//! 2048-byte buffer, each piece at a fixed offset. The buffer bytes
//! *are* the whole state: reopening the same buffer picks the queues
//! back up exactly where they were.
//!
//! | offset | size | contents                                   |
//! |--------|------|--------------------------------------------|
//! | 0      | 8    | slot occupancy bitmap (little-endian u64)  |
//! | 8      | 1    | free-list head block index                 |
//! | 9      | 1    | format marker                              |
//! | 10     | 6    | reserved                                   |
//! | 16     | 128  | queue table: 64 records of 2 bytes         |
//! | 144    | 1904 | block pool: 238 blocks of 8 bytes          |
//!
//! Each block is 7 payload bytes followed by 1 metadata byte. The
//! metadata byte carries no discriminant; its meaning follows the
//! block's current role:
//!
//! * **free** — index of the next free block, [`NO_BLOCK`] ending the
//!   list. Written by the formatter and by `free_block`.
//! * **interior** — index of the next block in the owning queue's
//!   chain. Written once, when a full tail chains a successor.
//! * **tail** — packed cursor pair: high nibble is the read offset
//!   into the queue's *head* block (`0..=6`), low nibble is the write
//!   offset into this block (`0..=7`, where 7 means full).
//!
//! Role transitions each have exactly one author: `alloc_block` hands a
//! free block to `enqueue_byte`, which immediately writes a tail meta;
//! the tail-full path in `enqueue_byte` demotes the old tail to
//! interior by overwriting its meta with a link; `free_block` returns
//! any block to the free role. No other code writes a metadata byte.

use static_assertions::{const_assert, const_assert_eq};

/// Total size of the backing region in bytes.
pub const REGION_LEN: usize = 2048;

/// A caller-supplied backing buffer.
pub type Region = [u8; REGION_LEN];

/// Maximum number of simultaneously live queues.
pub const MAX_QUEUES: usize = 64;

/// Offset of the 8-byte slot occupancy bitmap.
pub const OCCUPANCY_OFFSET: usize = 0;

/// Offset of the free-list head byte.
pub const FREE_HEAD_OFFSET: usize = 8;

/// Offset of the format marker byte.
pub const FORMAT_MARKER_OFFSET: usize = 9;

/// Marker value present once the region has been formatted.
pub const FORMAT_MARKER: u8 = 0xAA;

/// Offset of the queue table.
pub const TABLE_OFFSET: usize = 16;

/// Size of one queue record: head block index, then tail block index.
pub const RECORD_SIZE: usize = 2;

/// Offset of the block pool; the table ends here.
pub const POOL_OFFSET: usize = TABLE_OFFSET + MAX_QUEUES * RECORD_SIZE;

/// Size of one pool block, metadata byte included.
pub const BLOCK_SIZE: usize = 8;

/// Payload bytes per block; the eighth byte is metadata.
pub const BLOCK_PAYLOAD: usize = 7;

/// Number of blocks in the pool.
pub const BLOCK_COUNT: usize = (REGION_LEN - POOL_OFFSET) / BLOCK_SIZE;

/// Reserved index meaning "no block": end of the free list, end of a
/// chain, or either half of an empty queue's record.
pub const NO_BLOCK: u8 = 0xFF;

// The pool must tile the region exactly, and every block index must
// stay below the reserved sentinel.
const_assert_eq!(POOL_OFFSET + BLOCK_COUNT * BLOCK_SIZE, REGION_LEN);
const_assert!(BLOCK_COUNT < NO_BLOCK as usize);
const_assert!(MAX_QUEUES <= u64::BITS as usize);
const_assert!(BLOCK_PAYLOAD < 0x10);

/// Pack the two cursors into a tail metadata byte.
pub(crate) const fn pack_offsets(head_off: u8, tail_off: u8) -> u8 {
    (head_off << 4) | (tail_off & 0x0F)
}

/// Read cursor into the head block, from a tail metadata byte.
pub(crate) const fn head_offset(meta: u8) -> u8 {
    meta >> 4
}

/// Write cursor into the tail block, from a tail metadata byte.
pub(crate) const fn tail_offset(meta: u8) -> u8 {
    meta & 0x0F
}

/// Region offset of `block`'s first payload byte.
pub(crate) const fn block_offset(block: u8) -> usize {
    POOL_OFFSET + block as usize * BLOCK_SIZE
}

/// Region offset of `block`'s metadata byte.
pub(crate) const fn meta_offset(block: u8) -> usize {
    block_offset(block) + BLOCK_PAYLOAD
}

/// Region offset of `slot`'s queue record.
pub(crate) const fn record_offset(slot: u8) -> usize {
    TABLE_OFFSET + slot as usize * RECORD_SIZE
}
