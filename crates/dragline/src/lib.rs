//! Dragline Core Library
//!
//! Snap-alignment guides for freely positioned elements inside a
//! container: proximity detection across eight edge pairings, magnetic
//! position correction of the dragged element, and incremental guide-line
//! lifecycle keyed by (target, pairing).

pub mod config;
pub mod engine;
pub mod error;
pub mod geometry;
pub mod guides;
pub mod host;
pub mod session;
pub mod tracker;

pub use config::{DraglineOptions, DEFAULT_THRESHOLD};
pub use error::{AlignError, AlignResult};
pub use geometry::{guide_geometry, snap_origin, AlignKind, Edge, GuideGeometry, Orientation};
pub use guides::GuideRegistry;
pub use host::{ElementHost, ElementId, GuideId, MemoryGuide, MemoryHost};
pub use session::{DragHooks, Dragline};
pub use tracker::PositionTracker;
