//! Fixed-capacity ring window over the most recent samples.
//!
//! The window is backed by an inline array, so pushing a sample never
//! allocates. Once full, each push overwrites the oldest sample.
//!
//! # Example
//!
//! ```
//! use ta_trend::kernels::RingWindow;
//!
//! let mut window: RingWindow<f64, 3> = RingWindow::new();
//! for x in [1.0, 2.0, 3.0, 4.0] {
//!     window.push(x);
//! }
//! assert_eq!(window.len(), 3);
//! assert_eq!(window.back(0), Some(4.0));
//! assert_eq!(window.back(2), Some(2.0));
//! assert_eq!(window.back(3), None);
//! assert!((window.sum_recent(2) - 7.0).abs() < 1e-12);
//! ```

use crate::traits::SeriesElement;

/// A ring buffer holding the last `N` samples pushed.
#[derive(Debug, Clone)]
pub struct RingWindow<T, const N: usize> {
    slots: [T; N],
    /// Position the next push writes to.
    head: usize,
    len: usize,
}

impl<T: SeriesElement, const N: usize> Default for RingWindow<T, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: SeriesElement, const N: usize> RingWindow<T, N> {
    /// Creates an empty window.
    #[must_use]
    pub fn new() -> Self {
        Self {
            slots: [T::zero(); N],
            head: 0,
            len: 0,
        }
    }

    /// Maximum number of samples retained.
    #[inline]
    #[must_use]
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Number of samples currently retained.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if nothing has been pushed yet.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Appends a sample, evicting the oldest one when full.
    #[inline]
    pub fn push(&mut self, value: T) {
        if N == 0 {
            return;
        }
        self.slots[self.head] = value;
        self.head = (self.head + 1) % N;
        if self.len < N {
            self.len += 1;
        }
    }

    /// Returns the sample pushed `offset` pushes ago (`0` is the newest).
    #[inline]
    #[must_use]
    pub const fn back(&self, offset: usize) -> Option<T> {
        if offset >= self.len {
            return None;
        }
        Some(self.slots[(self.head + N - 1 - offset) % N])
    }

    /// Sums the newest `count` samples, newest first.
    ///
    /// `count` is clamped to the number of retained samples.
    #[must_use]
    pub fn sum_recent(&self, count: usize) -> T {
        (0..count.min(self.len))
            .filter_map(|offset| self.back(offset))
            .fold(T::zero(), |acc, x| acc + x)
    }
}
