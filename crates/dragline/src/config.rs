//! Configuration for an alignment surface.

use serde::{Deserialize, Serialize};

use crate::geometry::AlignKind;

/// Default snap threshold in container units.
pub const DEFAULT_THRESHOLD: f64 = 5.0;

/// Tuning options for a [`Dragline`](crate::Dragline) instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DraglineOptions {
    /// Marker applied to the element being dragged.
    pub active_class: String,
    /// Marker applied to targets currently aligned with the active element.
    pub aligned_class: String,
    /// Class carried by guide visuals.
    pub guide_class: String,
    /// Maximum edge distance (exclusive) for two edges to count as aligned.
    pub threshold: f64,
    /// Edge pairings evaluated each pass, in order.
    pub line_types: Vec<AlignKind>,
}

impl Default for DraglineOptions {
    fn default() -> Self {
        Self {
            active_class: "active".to_string(),
            aligned_class: "aligned-item".to_string(),
            guide_class: "dragline".to_string(),
            threshold: DEFAULT_THRESHOLD,
            line_types: AlignKind::ALL.to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = DraglineOptions::default();
        assert_eq!(options.active_class, "active");
        assert_eq!(options.aligned_class, "aligned-item");
        assert_eq!(options.guide_class, "dragline");
        assert_eq!(options.threshold, 5.0);
        assert_eq!(options.line_types, AlignKind::ALL.to_vec());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let options: DraglineOptions =
            serde_json::from_str(r#"{"threshold": 8.0, "line_types": ["tt", "bb"]}"#).unwrap();
        assert_eq!(options.threshold, 8.0);
        assert_eq!(options.line_types, vec![AlignKind::Tt, AlignKind::Bb]);
        assert_eq!(options.active_class, "active");
        assert_eq!(options.guide_class, "dragline");
    }
}
