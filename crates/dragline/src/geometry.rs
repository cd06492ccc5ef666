//! Edge pairings, snap coordinates and guide geometry.

use kurbo::Rect;
use serde::{Deserialize, Serialize};

/// A rectangle edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Edge {
    Left,
    Right,
    Top,
    Bottom,
}

impl Edge {
    /// Coordinate of this edge on a rectangle.
    pub fn of(self, rect: &Rect) -> f64 {
        match self {
            Edge::Left => rect.x0,
            Edge::Right => rect.x1,
            Edge::Top => rect.y0,
            Edge::Bottom => rect.y1,
        }
    }
}

/// Orientation of a guide line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Orientation {
    /// Horizontal line; the compared coordinates are vertical (y).
    Horizontal,
    /// Vertical line; the compared coordinates are horizontal (x).
    Vertical,
}

/// An edge pairing between the active element and a target element.
///
/// The first letter names the active element's edge, the second the
/// target's: `Tb` aligns the active top against the target bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlignKind {
    Tt,
    Bb,
    Ll,
    Rr,
    Tb,
    Bt,
    Lr,
    Rl,
}

impl AlignKind {
    /// All pairings, in canonical evaluation order.
    pub const ALL: [AlignKind; 8] = [
        AlignKind::Tt,
        AlignKind::Bb,
        AlignKind::Ll,
        AlignKind::Rr,
        AlignKind::Tb,
        AlignKind::Bt,
        AlignKind::Lr,
        AlignKind::Rl,
    ];

    /// The active element's edge.
    pub fn active_edge(self) -> Edge {
        match self {
            AlignKind::Tt | AlignKind::Tb => Edge::Top,
            AlignKind::Bb | AlignKind::Bt => Edge::Bottom,
            AlignKind::Ll | AlignKind::Lr => Edge::Left,
            AlignKind::Rr | AlignKind::Rl => Edge::Right,
        }
    }

    /// The target element's edge.
    pub fn target_edge(self) -> Edge {
        match self {
            AlignKind::Tt | AlignKind::Bt => Edge::Top,
            AlignKind::Bb | AlignKind::Tb => Edge::Bottom,
            AlignKind::Ll | AlignKind::Rl => Edge::Left,
            AlignKind::Rr | AlignKind::Lr => Edge::Right,
        }
    }

    /// Guide orientation produced by this pairing.
    pub fn orientation(self) -> Orientation {
        match self.active_edge() {
            Edge::Top | Edge::Bottom => Orientation::Horizontal,
            Edge::Left | Edge::Right => Orientation::Vertical,
        }
    }
}

/// Geometry of a guide line.
///
/// A zero-thickness segment at `axis` on the snap axis, spanning
/// `span_start..span_start + span_len` on the orthogonal axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GuideGeometry {
    /// Line orientation.
    pub orientation: Orientation,
    /// Fixed coordinate on the snap axis (y for horizontal, x for vertical).
    pub axis: f64,
    /// Start of the span on the orthogonal axis.
    pub span_start: f64,
    /// Length of the span.
    pub span_len: f64,
}

/// Compute the guide geometry for one triggered pairing.
///
/// The span is the union of both elements' extents on the orthogonal
/// axis, so the line always touches both elements regardless of their
/// relative offset.
pub fn guide_geometry(kind: AlignKind, active: &Rect, target: &Rect) -> GuideGeometry {
    let axis = kind.target_edge().of(target);
    match kind.orientation() {
        Orientation::Horizontal => {
            let min = active.x0.min(active.x1).min(target.x0).min(target.x1);
            let max = active.x0.max(active.x1).max(target.x0).max(target.x1);
            GuideGeometry {
                orientation: Orientation::Horizontal,
                axis,
                span_start: min,
                span_len: max - min,
            }
        }
        Orientation::Vertical => {
            let min = active.y0.min(active.y1).min(target.y0).min(target.y1);
            let max = active.y0.max(active.y1).max(target.y0).max(target.y1);
            GuideGeometry {
                orientation: Orientation::Vertical,
                axis,
                span_start: min,
                span_len: max - min,
            }
        }
    }
}

/// Coordinate the active element's origin must take so the paired edges
/// coincide exactly.
///
/// Horizontal pairings return the new top, vertical pairings the new left.
pub fn snap_origin(kind: AlignKind, active: &Rect, target_edge_value: f64) -> f64 {
    match kind.active_edge() {
        Edge::Top | Edge::Left => target_edge_value,
        Edge::Bottom => target_edge_value - active.height(),
        Edge::Right => target_edge_value - active.width(),
    }
}
