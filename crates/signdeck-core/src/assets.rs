//! Liveness tracking for asynchronous raster loads.
//!
//! Media thumbnails and QR bitmaps are decoded outside the editor. A late
//! result is only applied if its element still exists and its source has
//! not changed since the load started.

use crate::elements::ElementId;
use kurbo::Size;
use std::collections::HashMap;

/// Decoded raster metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct RasterInfo {
    pub size: Size,
}

/// Outcome reported by the decoder.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    Loaded(RasterInfo),
    Failed(String),
}

/// Display state of an element's raster.
#[derive(Debug, Clone, PartialEq)]
pub enum AssetState {
    Pending,
    Ready(RasterInfo),
    /// Load failed; the renderer draws a placeholder.
    Placeholder,
}

/// Handle for one load, checked when the result arrives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    pub element: ElementId,
    pub generation: u64,
}

#[derive(Debug, Clone)]
struct Entry {
    generation: u64,
    state: AssetState,
}

/// Tracks the current load generation of every element with a raster.
#[derive(Debug, Clone, Default)]
pub struct AssetTracker {
    entries: HashMap<ElementId, Entry>,
}

impl AssetTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a load for `element`, superseding any load in flight.
    pub fn begin(&mut self, element: ElementId) -> LoadTicket {
        let entry = self.entries.entry(element).or_insert(Entry {
            generation: 0,
            state: AssetState::Pending,
        });
        entry.generation += 1;
        entry.state = AssetState::Pending;
        LoadTicket {
            element,
            generation: entry.generation,
        }
    }

    /// The element's source changed: loads in flight become stale.
    pub fn invalidate(&mut self, element: ElementId) {
        if let Some(entry) = self.entries.get_mut(&element) {
            entry.generation += 1;
            entry.state = AssetState::Pending;
        }
    }

    /// The element was removed.
    pub fn forget(&mut self, element: ElementId) {
        self.entries.remove(&element);
    }

    /// Apply a load result. Returns false if the ticket is stale.
    pub fn complete(&mut self, ticket: LoadTicket, outcome: LoadOutcome) -> bool {
        let Some(entry) = self.entries.get_mut(&ticket.element) else {
            log::debug!("assets: dropping result for removed element {}", ticket.element);
            return false;
        };
        if entry.generation != ticket.generation {
            log::debug!("assets: dropping stale result for {}", ticket.element);
            return false;
        }
        entry.state = match outcome {
            LoadOutcome::Loaded(info) => AssetState::Ready(info),
            LoadOutcome::Failed(reason) => {
                log::warn!("assets: load failed for {}: {}", ticket.element, reason);
                AssetState::Placeholder
            }
        };
        true
    }

    /// Load state of `element`, if a load was started.
    pub fn state(&self, element: ElementId) -> Option<&AssetState> {
        self.entries.get(&element).map(|e| &e.state)
    }
}
