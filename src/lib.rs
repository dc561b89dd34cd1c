//! Byte FIFOs for memory-starved hosts: up to 64 independent queues
//! multiplexed over one caller-owned 2048-byte buffer, with no
//! allocation beyond that buffer and a 2-byte per-queue footprint.

// private module: everything reachable only through the re-exports below
mod region;

// queue engine
pub use region::queue::QueuePool;
pub use region::slots::QueueId;

// errors
pub use region::fault::Fault;

// region layout contract
pub use region::layout::{
    BLOCK_COUNT, BLOCK_PAYLOAD, BLOCK_SIZE, FORMAT_MARKER, FORMAT_MARKER_OFFSET, FREE_HEAD_OFFSET,
    MAX_QUEUES, NO_BLOCK, OCCUPANCY_OFFSET, POOL_OFFSET, RECORD_SIZE, REGION_LEN, Region,
    TABLE_OFFSET,
};
