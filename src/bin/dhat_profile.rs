//! DHAT heap profiler for ringkit.
//!
//! Run with: cargo run --bin dhat_profile --release --features dhat-heap
//! View results: Open dhat-heap.json in <https://nnethercote.github.io/dh_view/dh_view.html>

#[global_allocator]
static ALLOC: dhat::Alloc = dhat::Alloc;

use std::sync::Arc;

use ringkit::ds::RingBuffer;

/// Simple XorShift64 RNG for deterministic workloads.
struct XorShift64 {
    state: u64,
}

impl XorShift64 {
    fn new(seed: u64) -> Self {
        Self { state: seed.max(1) }
    }

    fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }
}

/// Push churn: every version is dropped right after the next push.
fn push_churn(ring: RingBuffer<Arc<u64>>, operations: usize) -> RingBuffer<Arc<u64>> {
    (0..operations as u64).fold(ring, |ring, i| ring.push(Arc::new(i)))
}

/// Snapshot retention: keep every `stride`-th version alive.
fn retain_snapshots(
    ring: &RingBuffer<Arc<u64>>,
    operations: usize,
    stride: usize,
) -> Vec<RingBuffer<Arc<u64>>> {
    let mut current = ring.clone();
    let mut kept = Vec::with_capacity(operations / stride + 1);
    for i in 0..operations {
        current = current.push(Arc::new(i as u64));
        if i % stride == 0 {
            kept.push(current.clone());
        }
    }
    kept
}

/// Random overwrites and pops mixed with pushes.
fn mixed_writes(ring: RingBuffer<Arc<u64>>, operations: usize, seed: u64) -> RingBuffer<Arc<u64>> {
    let mut rng = XorShift64::new(seed);
    let mut ring = ring;
    for _ in 0..operations {
        let roll = rng.next_u64();
        ring = match roll % 10 {
            0..=5 => ring.push(Arc::new(roll)),
            6..=8 => ring.set_at((roll >> 8) as i64, Arc::new(roll)),
            _ => ring.pop(),
        };
    }
    ring
}

fn profile_churn() {
    println!("=== Profiling push churn ===");
    let capacity = 4096;
    let operations = 100_000;

    let ring = push_churn(RingBuffer::new(capacity), operations);
    println!("  Newest: {:?}", ring.peek());
}

fn profile_retention() {
    println!("=== Profiling snapshot retention ===");
    let capacity = 4096;
    let operations = 50_000;

    let base = push_churn(RingBuffer::new(capacity), capacity);
    let kept = retain_snapshots(&base, operations, 64);
    let live: usize = kept.iter().map(|r| r.forward().flatten().count()).sum();

    println!("  Snapshots kept: {}", kept.len());
    println!("  Values reachable (with sharing): {live}");
}

fn profile_mixed() {
    println!("=== Profiling mixed writes ===");
    let capacity = 1024;
    let operations = 100_000;

    let ring = mixed_writes(RingBuffer::new(capacity), operations, 42);
    println!("  Empty: {}", ring.is_empty());
    println!("  Structural hash: {:#x}", ring.structural_hash());
}

fn main() {
    let _profiler = dhat::Profiler::new_heap();

    println!("ringkit DHAT Heap Profiling");
    println!("===========================\n");

    profile_churn();
    profile_retention();
    profile_mixed();

    println!("\n===========================");
    println!("Profiling complete!");
    println!(
        "View results: Open dhat-heap.json in <https://nnethercote.github.io/dh_view/dh_view.html>"
    );
}
