use thiserror::Error;

/// Failure raised by a queue operation.
///
/// Every operation validates before it mutates, so a returned fault
/// means the region was left exactly as it was. Faults signal workload
/// bugs (bad handles, draining an empty queue) or true exhaustion of
/// the fixed region; callers are not expected to treat them as
/// transient and retry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Fault {
    /// The queue table or the block pool has no capacity left.
    #[error("region out of memory")]
    OutOfMemory,

    /// The operation is invalid in the current state: an out-of-range
    /// or dead handle, a dequeue on an empty queue, or any handle
    /// operation against a never-formatted region.
    #[error("illegal queue operation")]
    IllegalOperation,
}
