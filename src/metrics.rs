/// File-server hit counter.
///
/// The only shared mutable in-process state in the service. Exposed strictly
/// through atomic increment/read/reset so concurrent requests never need a
/// lock; `/admin/reset` is the one place the count goes back to zero.

use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug, Default)]
pub struct HitCounter {
    hits: AtomicU64,
}

impl HitCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one hit and returns the new total.
    pub fn increment(&self) -> u64 {
        self.hits.fetch_add(1, Ordering::Relaxed) + 1
    }

    pub fn get(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    pub fn reset(&self) {
        self.hits.store(0, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_zero() {
        let counter = HitCounter::new();
        assert_eq!(counter.get(), 0);
    }

    #[test]
    fn increment_counts_up() {
        let counter = HitCounter::new();
        assert_eq!(counter.increment(), 1);
        assert_eq!(counter.increment(), 2);
        assert_eq!(counter.get(), 2);
    }

    #[test]
    fn reset_returns_to_zero() {
        let counter = HitCounter::new();
        counter.increment();
        counter.increment();
        counter.reset();
        assert_eq!(counter.get(), 0);
    }

    #[test]
    fn concurrent_increments_are_not_lost() {
        use std::sync::Arc;

        let counter = Arc::new(HitCounter::new());
        let mut handles = Vec::new();
        for _ in 0..8 {
            let counter = counter.clone();
            handles.push(std::thread::spawn(move || {
                for _ in 0..1000 {
                    counter.increment();
                }
            }));
        }
        for handle in handles {
            handle.join().expect("counting thread panicked");
        }
        assert_eq!(counter.get(), 8000);
    }
}
