//! Position tracking for registered elements.

use std::collections::HashMap;

use kurbo::Rect;

use crate::error::{AlignError, AlignResult};
use crate::host::{ElementHost, ElementId};

/// Stores the last known rectangle of every registered element.
///
/// Rectangles are read from the host on [`track`](PositionTracker::track)
/// and [`refresh`](PositionTracker::refresh); callers batch their reads
/// at the start of a recalculation pass before applying any correction.
#[derive(Debug, Clone, Default)]
pub struct PositionTracker {
    rects: HashMap<ElementId, Rect>,
}

impl PositionTracker {
    /// Create an empty tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Read an element's live bounds from the host and store them.
    ///
    /// Re-tracking replaces the stored value.
    pub fn track(&mut self, host: &dyn ElementHost, element: ElementId) {
        match host.bounds(element) {
            Some(rect) => {
                self.rects.insert(element, rect);
            }
            None => log::warn!("track: host has no bounds for element {element}"),
        }
    }

    /// Recompute the rectangle of an already-tracked element.
    ///
    /// Does nothing if the element is not tracked.
    pub fn refresh(&mut self, host: &dyn ElementHost, element: ElementId) {
        if !self.rects.contains_key(&element) {
            return;
        }
        if let Some(rect) = host.bounds(element) {
            self.rects.insert(element, rect);
        }
    }

    /// Drop the stored rectangle.
    pub fn untrack(&mut self, element: ElementId) {
        self.rects.remove(&element);
    }

    /// Drop every stored rectangle.
    pub fn clear(&mut self) {
        self.rects.clear();
    }

    /// The stored rectangle for an element.
    pub fn get(&self, element: ElementId) -> AlignResult<Rect> {
        self.rects
            .get(&element)
            .copied()
            .ok_or(AlignError::NotTracked(element))
    }

    /// Whether an element is currently tracked.
    pub fn is_tracked(&self, element: ElementId) -> bool {
        self.rects.contains_key(&element)
    }

    /// Number of tracked elements.
    pub fn len(&self) -> usize {
        self.rects.len()
    }

    /// Whether nothing is tracked.
    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }
}
