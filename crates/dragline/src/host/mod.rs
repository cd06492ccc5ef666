//! Host abstraction for element layout and guide visuals.
//!
//! The engine never touches real UI elements. Layout reads, position
//! corrections, marker classes and guide visuals all go through the
//! [`ElementHost`] trait supplied by the embedder.

mod memory;

pub use memory::{MemoryGuide, MemoryHost};

use std::fmt;

use kurbo::Rect;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::geometry::GuideGeometry;

/// Opaque handle for an element participating in alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ElementId(Uuid);

impl ElementId {
    /// Mint a fresh handle.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ElementId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Opaque handle for a guide visual.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GuideId(Uuid);

impl GuideId {
    /// Mint a fresh handle.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for GuideId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for GuideId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Bridge to the embedding UI layer.
///
/// Implementations can map handles to DOM nodes, scene-graph nodes or
/// plain rectangles; [`MemoryHost`] is the map-backed reference
/// implementation.
pub trait ElementHost {
    /// Current container-relative bounds of an element, if known.
    fn bounds(&self, element: ElementId) -> Option<Rect>;

    /// Visual ancestor used as the default guide container.
    fn visual_parent(&self, element: ElementId) -> Option<ElementId>;

    /// Move an element's left edge to `x`, preserving its size.
    fn set_left(&mut self, element: ElementId, x: f64);

    /// Move an element's top edge to `y`, preserving its size.
    fn set_top(&mut self, element: ElementId, y: f64);

    /// Toggle a named visual marker (class) on an element.
    fn set_marker(&mut self, element: ElementId, marker: &str, on: bool);

    /// Create a new, detached guide visual carrying the given class.
    fn create_guide(&mut self, class: &str) -> GuideId;

    /// Update a guide's position and length.
    fn set_guide_geometry(&mut self, guide: GuideId, geometry: &GuideGeometry);

    /// Insert a guide into a container. Called at most once per live guide.
    fn attach_guide(&mut self, guide: GuideId, container: ElementId);

    /// Destroy a guide visual.
    fn remove_guide(&mut self, guide: GuideId);
}
