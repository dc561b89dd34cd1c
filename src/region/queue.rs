use super::blocks;
use super::fault::Fault;
use super::format;
use super::layout::{
    BLOCK_PAYLOAD, NO_BLOCK, Region, block_offset, head_offset, meta_offset, pack_offsets,
    record_offset, tail_offset,
};
use super::slots::{self, QueueId};

/// Up to 64 independent byte FIFOs multiplexed over one caller-owned
/// 2048-byte buffer.
///
/// The pool never allocates: queue bookkeeping and payload all live in
/// the borrowed region, and a live queue costs exactly 2 bytes of table
/// space no matter how long it grows. Payload is stored in chains of
/// 8-byte blocks drawn from a shared pool, so pressure from one queue
/// can exhaust enqueues in another; sizing the workload to the region
/// is the caller's job.
///
/// The exclusive borrow makes a pool strictly single-threaded.
pub struct QueuePool<'m> {
    mem: &'m mut Region,
}

impl<'m> QueuePool<'m> {
    /// Adopt `mem` as the backing region without touching a byte.
    ///
    /// A fresh buffer is formatted lazily by the first [`create_queue`]
    /// (handle operations before that fail validation). A buffer
    /// formatted by an earlier pool keeps all of its queues, and ids
    /// from the earlier pool remain valid.
    ///
    /// [`create_queue`]: Self::create_queue
    #[must_use]
    pub fn open(mem: &'m mut Region) -> Self {
        QueuePool { mem }
    }

    /// Create an empty queue and return its id.
    ///
    /// Always claims the lowest free slot, so destroyed slots recycle
    /// eagerly.
    ///
    /// # Errors
    ///
    /// Returns `Fault::OutOfMemory` when all 64 slots are live.
    pub fn create_queue(&mut self) -> Result<QueueId, Fault> {
        format::ensure_formatted(self.mem);

        let Some(slot) = slots::find_free_slot(self.mem) else {
            return Err(Fault::OutOfMemory);
        };
        slots::claim_slot(self.mem, slot);

        let record = record_offset(slot);
        self.mem[record] = NO_BLOCK;
        self.mem[record + 1] = NO_BLOCK;

        log::trace!("created queue in slot {slot}");
        Ok(QueueId::from_raw(slot))
    }

    /// Destroy queue `id`, returning every block it holds to the pool.
    ///
    /// Pending bytes are discarded and the slot becomes free for the
    /// next [`create_queue`](Self::create_queue).
    ///
    /// # Errors
    ///
    /// Returns `Fault::IllegalOperation` if `id` does not name a live
    /// queue.
    pub fn destroy_queue(&mut self, id: QueueId) -> Result<(), Fault> {
        let slot = slots::validate(self.mem, id)?;
        let record = record_offset(slot);
        let tail = self.mem[record + 1];

        // Walk head to tail. The tail's metadata holds packed cursors,
        // not a link, so the walk stops there by index comparison.
        let mut current = self.mem[record];
        while current != NO_BLOCK {
            let next = if current == tail {
                NO_BLOCK
            } else {
                self.mem[meta_offset(current)]
            };
            blocks::free_block(self.mem, current);
            current = next;
        }

        self.mem[record] = NO_BLOCK;
        self.mem[record + 1] = NO_BLOCK;
        slots::release_slot(self.mem, slot);

        log::trace!("destroyed queue in slot {slot}");
        Ok(())
    }

    /// Append `byte` to the back of queue `id`.
    ///
    /// # Errors
    ///
    /// Returns `Fault::IllegalOperation` if `id` does not name a live
    /// queue, and `Fault::OutOfMemory` if a fresh block is needed but
    /// the pool is empty. Either way the queue is left unchanged.
    pub fn enqueue_byte(&mut self, id: QueueId, byte: u8) -> Result<(), Fault> {
        let slot = slots::validate(self.mem, id)?;
        let record = record_offset(slot);
        let head = self.mem[record];

        if head == NO_BLOCK {
            // empty queue: one fresh block carries both ends
            let block = blocks::alloc_block(self.mem)?;
            self.mem[block_offset(block)] = byte;
            self.mem[meta_offset(block)] = pack_offsets(0, 1);
            self.mem[record] = block;
            self.mem[record + 1] = block;
            return Ok(());
        }

        let tail = self.mem[record + 1];
        let meta = self.mem[meta_offset(tail)];
        let tail_off = tail_offset(meta);

        if (tail_off as usize) < BLOCK_PAYLOAD {
            self.mem[block_offset(tail) + tail_off as usize] = byte;
            self.mem[meta_offset(tail)] = pack_offsets(head_offset(meta), tail_off + 1);
            return Ok(());
        }

        // Tail block full: chain a successor. The old tail's metadata
        // becomes a plain link and the head cursor moves into the new
        // tail's metadata unchanged.
        let block = blocks::alloc_block(self.mem)?;
        self.mem[meta_offset(tail)] = block;
        self.mem[block_offset(block)] = byte;
        self.mem[meta_offset(block)] = pack_offsets(head_offset(meta), 1);
        self.mem[record + 1] = block;
        Ok(())
    }

    /// Pop the oldest byte of queue `id`.
    ///
    /// # Errors
    ///
    /// Returns `Fault::IllegalOperation` if `id` does not name a live
    /// queue, or if the queue is empty.
    pub fn dequeue_byte(&mut self, id: QueueId) -> Result<u8, Fault> {
        let slot = slots::validate(self.mem, id)?;
        let record = record_offset(slot);
        let head = self.mem[record];
        if head == NO_BLOCK {
            return Err(Fault::IllegalOperation);
        }

        let tail = self.mem[record + 1];
        let meta = self.mem[meta_offset(tail)];
        let tail_off = tail_offset(meta);
        let mut head_off = head_offset(meta);

        let byte = self.mem[block_offset(head) + head_off as usize];
        head_off += 1;

        if head_off as usize == BLOCK_PAYLOAD {
            // head block fully consumed
            if head == tail {
                blocks::free_block(self.mem, head);
                self.mem[record] = NO_BLOCK;
                self.mem[record + 1] = NO_BLOCK;
            } else {
                let next = self.mem[meta_offset(head)];
                blocks::free_block(self.mem, head);
                self.mem[record] = next;
                self.mem[meta_offset(tail)] = pack_offsets(0, tail_off);
            }
        } else if head == tail && head_off == tail_off {
            // the reader caught the writer mid-block: the queue is
            // logically empty, and the block goes back to the pool
            // right away, unused space included
            blocks::free_block(self.mem, head);
            self.mem[record] = NO_BLOCK;
            self.mem[record + 1] = NO_BLOCK;
        } else {
            self.mem[meta_offset(tail)] = pack_offsets(head_off, tail_off);
        }

        Ok(byte)
    }
}
