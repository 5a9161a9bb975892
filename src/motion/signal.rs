//! # Scroll Signal
//!
//! Lock-free scalar shared between the motion thread (single writer) and any
//! number of readers. The value is an `f64` stored as raw bits in an
//! `AtomicU64`, so a read can never observe half of a write.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// An `f64` cell that can be shared across threads without a lock.
#[derive(Debug, Default)]
pub struct SharedScalar {
    bits: AtomicU64,
}

impl SharedScalar {
    pub fn new(value: f64) -> Self {
        Self {
            bits: AtomicU64::new(value.to_bits()),
        }
    }

    pub fn load(&self) -> f64 {
        f64::from_bits(self.bits.load(Ordering::Acquire))
    }

    pub fn store(&self, value: f64) {
        self.bits.store(value.to_bits(), Ordering::Release);
    }
}

/// Create a scroll-position signal starting at `initial` columns.
///
/// The writer half is not `Clone`: every scroll event originates
/// from one input stream.
pub fn scroll_signal(initial: f64) -> (ScrollWriter, ScrollReader) {
    let cell = Arc::new(SharedScalar::new(initial));
    (
        ScrollWriter {
            cell: Arc::clone(&cell),
        },
        ScrollReader { cell },
    )
}

/// The single producer of horizontal scroll offsets.
#[derive(Debug)]
pub struct ScrollWriter {
    cell: Arc<SharedScalar>,
}

impl ScrollWriter {
    pub fn set(&self, offset: f64) {
        self.cell.store(offset);
    }

    pub fn get(&self) -> f64 {
        self.cell.load()
    }

    /// A new reader observing this signal.
    pub fn reader(&self) -> ScrollReader {
        ScrollReader {
            cell: Arc::clone(&self.cell),
        }
    }
}

/// A read-only view of the scroll-position signal.
#[derive(Debug, Clone)]
pub struct ScrollReader {
    cell: Arc<SharedScalar>,
}

impl ScrollReader {
    /// Latest committed scroll offset.
    pub fn get(&self) -> f64 {
        self.cell.load()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_reader_sees_writes() {
        let (writer, reader) = scroll_signal(0.0);
        assert_eq!(reader.get(), 0.0);

        writer.set(42.5);
        assert_eq!(reader.get(), 42.5);
        assert_eq!(writer.reader().get(), 42.5);
    }

    #[test]
    fn test_negative_and_fractional_values_survive() {
        let scalar = SharedScalar::new(-0.125);
        assert_eq!(scalar.load(), -0.125);
        scalar.store(f64::MAX);
        assert_eq!(scalar.load(), f64::MAX);
    }

    #[test]
    fn test_cross_thread_reads_are_never_torn() {
        let (writer, reader) = scroll_signal(0.0);
        let values = [1.5, 1234.0625, -7.75, 99.0];

        let handle = thread::spawn(move || {
            for _ in 0..10_000 {
                for v in values {
                    writer.set(v);
                }
            }
        });

        for _ in 0..10_000 {
            let seen = reader.get();
            assert!(
                seen == 0.0 || values.contains(&seen),
                "observed a value that was never written: {seen}"
            );
        }

        handle.join().expect("writer thread panicked");
        assert_eq!(reader.get(), 99.0);
    }
}
