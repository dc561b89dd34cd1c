#[cfg(test)]
mod tests {
    use crate::region::blocks;
    use crate::region::fault::Fault;
    use crate::region::layout::{BLOCK_COUNT, BLOCK_PAYLOAD, MAX_QUEUES, REGION_LEN};
    use crate::region::queue::QueuePool;
    use crate::region::slots;

    /// Payload bytes a fully drained pool can hold at once.
    const FULL_POOL_BYTES: usize = BLOCK_COUNT * BLOCK_PAYLOAD;

    #[test]
    fn test_all_slots_live_with_traffic() {
        // every slot live at once, each queue carrying distinct bytes
        let mut mem = [0u8; REGION_LEN];
        let mut pool = QueuePool::open(&mut mem);

        let ids: Vec<_> = (0..MAX_QUEUES).map(|_| pool.create_queue().unwrap()).collect();
        for (i, id) in ids.iter().enumerate() {
            for k in 0..3u8 {
                pool.enqueue_byte(*id, (i as u8).wrapping_mul(3).wrapping_add(k)).unwrap();
            }
        }

        for (i, id) in ids.iter().enumerate() {
            for k in 0..3u8 {
                let expected = (i as u8).wrapping_mul(3).wrapping_add(k);
                assert_eq!(pool.dequeue_byte(*id).unwrap(), expected);
            }
            assert_eq!(pool.dequeue_byte(*id), Err(Fault::IllegalOperation));
        }
    }

    #[test]
    fn test_interleaved_queues_stay_isolated() {
        let mut mem = [0u8; REGION_LEN];
        let mut pool = QueuePool::open(&mut mem);
        let a = pool.create_queue().unwrap();
        let b = pool.create_queue().unwrap();

        pool.enqueue_byte(a, 0).unwrap();
        pool.enqueue_byte(b, 3).unwrap();
        pool.enqueue_byte(a, 1).unwrap();
        pool.enqueue_byte(b, 4).unwrap();
        pool.enqueue_byte(a, 2).unwrap();

        assert_eq!(pool.dequeue_byte(a).unwrap(), 0);
        assert_eq!(pool.dequeue_byte(a).unwrap(), 1);

        pool.enqueue_byte(b, 5).unwrap();
        assert_eq!(pool.dequeue_byte(b).unwrap(), 3);
        assert_eq!(pool.dequeue_byte(a).unwrap(), 2);
        assert_eq!(pool.dequeue_byte(b).unwrap(), 4);
        assert_eq!(pool.dequeue_byte(b).unwrap(), 5);

        pool.destroy_queue(a).unwrap();
        pool.destroy_queue(b).unwrap();
    }

    #[test]
    fn test_block_pressure_is_shared() {
        // one greedy queue starves the other's enqueue, not its slot
        let mut mem = [0u8; REGION_LEN];
        let mut pool = QueuePool::open(&mut mem);
        let greedy = pool.create_queue().unwrap();

        for i in 0..FULL_POOL_BYTES {
            pool.enqueue_byte(greedy, i as u8).unwrap();
        }

        let starved = pool.create_queue().unwrap();
        assert_eq!(pool.enqueue_byte(starved, 1), Err(Fault::OutOfMemory));

        // destroying the greedy queue refills the pool for the other one
        pool.destroy_queue(greedy).unwrap();
        for i in 0..FULL_POOL_BYTES {
            pool.enqueue_byte(starved, i as u8).unwrap();
        }
        assert_eq!(pool.enqueue_byte(starved, 1), Err(Fault::OutOfMemory));
    }

    #[test]
    fn test_destroy_releases_everything() {
        let mut mem = [0u8; REGION_LEN];
        let mut pool = QueuePool::open(&mut mem);

        let ids: Vec<_> = (0..10).map(|_| pool.create_queue().unwrap()).collect();
        for (i, id) in ids.iter().enumerate() {
            for k in 0..(i * 5) {
                pool.enqueue_byte(*id, k as u8).unwrap();
            }
        }
        for id in ids {
            pool.destroy_queue(id).unwrap();
        }
        drop(pool);

        assert_eq!(blocks::free_block_count(&mem), BLOCK_COUNT);
        assert_eq!(slots::occupancy(&mem), 0);
    }

    #[test]
    fn test_slot_recycling_prefers_lowest() {
        let mut mem = [0u8; REGION_LEN];
        let mut pool = QueuePool::open(&mut mem);

        let q0 = pool.create_queue().unwrap();
        let q1 = pool.create_queue().unwrap();
        let q2 = pool.create_queue().unwrap();
        assert_eq!((q0.to_raw(), q1.to_raw(), q2.to_raw()), (0, 1, 2));

        pool.destroy_queue(q1).unwrap();
        pool.destroy_queue(q0).unwrap();

        // lowest freed slot comes back first
        assert_eq!(pool.create_queue().unwrap().to_raw(), 0);
        assert_eq!(pool.create_queue().unwrap().to_raw(), 1);
        assert_eq!(pool.create_queue().unwrap().to_raw(), 3);
    }

    #[test]
    fn test_churn_recycles_blocks() {
        // far more traffic than the pool has blocks, with at most a few
        // bytes resident at a time
        let mut mem = [0u8; REGION_LEN];
        let mut pool = QueuePool::open(&mut mem);
        let q = pool.create_queue().unwrap();

        let mut next_in = 0u8;
        let mut next_out = 0u8;

        // keep four bytes resident so the window slides across blocks
        for _ in 0..4 {
            pool.enqueue_byte(q, next_in).unwrap();
            next_in = next_in.wrapping_add(1);
        }
        for _ in 0..10_000 {
            pool.enqueue_byte(q, next_in).unwrap();
            next_in = next_in.wrapping_add(1);
            assert_eq!(pool.dequeue_byte(q).unwrap(), next_out);
            next_out = next_out.wrapping_add(1);
        }
        while next_out != next_in {
            assert_eq!(pool.dequeue_byte(q).unwrap(), next_out);
            next_out = next_out.wrapping_add(1);
        }
        drop(pool);

        assert_eq!(blocks::free_block_count(&mem), BLOCK_COUNT);
    }

    #[test]
    fn test_reopen_preserves_queue_state() {
        let mut mem = [0u8; REGION_LEN];

        let mut first = QueuePool::open(&mut mem);
        let id = first.create_queue().unwrap();
        for byte in [1u8, 2, 3] {
            first.enqueue_byte(id, byte).unwrap();
        }
        drop(first);

        // the buffer bytes are the whole state: a new pool over the
        // same buffer sees the queue, and the old id still names it
        let mut pool = QueuePool::open(&mut mem);
        assert_eq!(pool.dequeue_byte(id).unwrap(), 1);

        let other = pool.create_queue().unwrap();
        assert_ne!(other, id);
        pool.enqueue_byte(other, 9).unwrap();

        assert_eq!(pool.dequeue_byte(id).unwrap(), 2);
        assert_eq!(pool.dequeue_byte(id).unwrap(), 3);
        assert_eq!(pool.dequeue_byte(other).unwrap(), 9);
    }

    #[test]
    fn test_freed_blocks_are_exactly_reusable() {
        // destroying a 10-block queue lets a new queue claim exactly
        // those 10 blocks back
        let mut mem = [0u8; REGION_LEN];
        let mut pool = QueuePool::open(&mut mem);

        let filler = pool.create_queue().unwrap();
        for i in 0..FULL_POOL_BYTES - 10 * BLOCK_PAYLOAD {
            pool.enqueue_byte(filler, i as u8).unwrap();
        }

        let victim = pool.create_queue().unwrap();
        for i in 0..10 * BLOCK_PAYLOAD {
            pool.enqueue_byte(victim, i as u8).unwrap();
        }
        assert_eq!(pool.enqueue_byte(victim, 0), Err(Fault::OutOfMemory));

        pool.destroy_queue(victim).unwrap();

        let fresh = pool.create_queue().unwrap();
        for i in 0..10 * BLOCK_PAYLOAD {
            pool.enqueue_byte(fresh, i as u8).unwrap();
        }
        assert_eq!(pool.enqueue_byte(fresh, 0), Err(Fault::OutOfMemory));
    }
}
