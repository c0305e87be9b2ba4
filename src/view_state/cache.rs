//! Inline per-item layout cache.

use super::layout::ReviewLayout;
use std::sync::{Mutex, MutexGuard, PoisonError};

#[derive(Debug, Clone, Copy)]
struct CachedLayout {
    width_bits: u64,
    measurer_id: usize,
    layout: ReviewLayout,
}

/// Single-slot cache holding the layout for the last-seen container width.
///
/// Owned by the item it belongs to. The key is the exact bit pattern of the
/// width plus the identity of the measurer that produced the layout; a query
/// with a different width or measurer replaces the slot.
#[derive(Debug, Default)]
pub struct LayoutCache {
    slot: Mutex<Option<CachedLayout>>,
}

impl LayoutCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the layout cached for `width` and `measurer_id`, computing and
    /// storing it on a miss.
    pub fn get_or_compute(
        &self,
        width: f64,
        measurer_id: usize,
        compute: impl FnOnce() -> ReviewLayout,
    ) -> ReviewLayout {
        let mut slot = self.lock();
        let width_bits = width.to_bits();
        match *slot {
            Some(cached)
                if cached.width_bits == width_bits && cached.measurer_id == measurer_id =>
            {
                cached.layout
            }
            _ => {
                let layout = compute();
                *slot = Some(CachedLayout {
                    width_bits,
                    measurer_id,
                    layout,
                });
                layout
            }
        }
    }

    /// Width of the currently cached layout, if any.
    pub fn cached_width(&self) -> Option<f64> {
        (*self.lock()).map(|cached| f64::from_bits(cached.width_bits))
    }

    // The slot holds plain data, so a poisoned lock is still consistent.
    fn lock(&self) -> MutexGuard<'_, Option<CachedLayout>> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Clone for LayoutCache {
    fn clone(&self) -> Self {
        Self {
            slot: Mutex::new(*self.lock()),
        }
    }
}
