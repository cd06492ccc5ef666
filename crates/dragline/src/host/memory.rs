//! Map-backed host for headless use and tests.

use std::collections::{HashMap, HashSet};

use kurbo::Rect;

use super::{ElementHost, ElementId, GuideId};
use crate::geometry::GuideGeometry;

/// Guide record kept by [`MemoryHost`].
#[derive(Debug, Clone)]
pub struct MemoryGuide {
    /// Class the guide was created with.
    pub class: String,
    /// Last geometry applied, if any.
    pub geometry: Option<GuideGeometry>,
    /// Container the guide is attached to, if any.
    pub container: Option<ElementId>,
}

/// An [`ElementHost`] backed by plain maps.
#[derive(Debug, Clone, Default)]
pub struct MemoryHost {
    rects: HashMap<ElementId, Rect>,
    parents: HashMap<ElementId, ElementId>,
    markers: HashMap<ElementId, HashSet<String>>,
    guides: HashMap<GuideId, MemoryGuide>,
    guides_created: usize,
}

impl MemoryHost {
    /// Create an empty host.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an element with the given bounds; returns its handle.
    pub fn insert(&mut self, rect: Rect) -> ElementId {
        let id = ElementId::new();
        self.rects.insert(id, rect);
        id
    }

    /// Insert an element as a visual child of `parent`.
    pub fn insert_in(&mut self, parent: ElementId, rect: Rect) -> ElementId {
        let id = self.insert(rect);
        self.parents.insert(id, parent);
        id
    }

    /// Overwrite an element's bounds (external movement).
    pub fn place(&mut self, element: ElementId, rect: Rect) {
        self.rects.insert(element, rect);
    }

    /// Translate an element by a delta (a drag step).
    pub fn translate(&mut self, element: ElementId, dx: f64, dy: f64) {
        if let Some(rect) = self.rects.get_mut(&element) {
            *rect = Rect::new(rect.x0 + dx, rect.y0 + dy, rect.x1 + dx, rect.y1 + dy);
        }
    }

    /// Whether an element currently carries a marker.
    pub fn has_marker(&self, element: ElementId, marker: &str) -> bool {
        self.markers
            .get(&element)
            .is_some_and(|set| set.contains(marker))
    }

    /// Number of live guide visuals.
    pub fn guide_count(&self) -> usize {
        self.guides.len()
    }

    /// Total number of guides ever created.
    pub fn guides_created(&self) -> usize {
        self.guides_created
    }

    /// The guide record, if the guide is live.
    pub fn guide(&self, id: GuideId) -> Option<&MemoryGuide> {
        self.guides.get(&id)
    }

    /// Guides currently attached to `container`.
    pub fn attached_guides(&self, container: ElementId) -> Vec<GuideId> {
        self.guides
            .iter()
            .filter(|(_, guide)| guide.container == Some(container))
            .map(|(&id, _)| id)
            .collect()
    }
}

impl ElementHost for MemoryHost {
    fn bounds(&self, element: ElementId) -> Option<Rect> {
        self.rects.get(&element).copied()
    }

    fn visual_parent(&self, element: ElementId) -> Option<ElementId> {
        self.parents.get(&element).copied()
    }

    fn set_left(&mut self, element: ElementId, x: f64) {
        if let Some(rect) = self.rects.get_mut(&element) {
            let width = rect.width();
            *rect = Rect::new(x, rect.y0, x + width, rect.y1);
        }
    }

    fn set_top(&mut self, element: ElementId, y: f64) {
        if let Some(rect) = self.rects.get_mut(&element) {
            let height = rect.height();
            *rect = Rect::new(rect.x0, y, rect.x1, y + height);
        }
    }

    fn set_marker(&mut self, element: ElementId, marker: &str, on: bool) {
        let set = self.markers.entry(element).or_default();
        if on {
            set.insert(marker.to_string());
        } else {
            set.remove(marker);
        }
    }

    fn create_guide(&mut self, class: &str) -> GuideId {
        let id = GuideId::new();
        self.guides_created += 1;
        self.guides.insert(
            id,
            MemoryGuide {
                class: class.to_string(),
                geometry: None,
                container: None,
            },
        );
        id
    }

    fn set_guide_geometry(&mut self, guide: GuideId, geometry: &GuideGeometry) {
        if let Some(entry) = self.guides.get_mut(&guide) {
            entry.geometry = Some(*geometry);
        }
    }

    fn attach_guide(&mut self, guide: GuideId, container: ElementId) {
        if let Some(entry) = self.guides.get_mut(&guide) {
            entry.container = Some(container);
        }
    }

    fn remove_guide(&mut self, guide: GuideId) {
        self.guides.remove(&guide);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_left_preserves_size() {
        let mut host = MemoryHost::new();
        let id = host.insert(Rect::new(10.0, 20.0, 110.0, 70.0));

        host.set_left(id, 40.0);

        let rect = host.bounds(id).unwrap();
        assert_eq!(rect.x0, 40.0);
        assert_eq!(rect.width(), 100.0);
        assert_eq!(rect.y0, 20.0);
    }

    #[test]
    fn test_set_top_preserves_size() {
        let mut host = MemoryHost::new();
        let id = host.insert(Rect::new(10.0, 20.0, 110.0, 70.0));

        host.set_top(id, 0.0);

        let rect = host.bounds(id).unwrap();
        assert_eq!(rect.y0, 0.0);
        assert_eq!(rect.height(), 50.0);
        assert_eq!(rect.x0, 10.0);
    }

    #[test]
    fn test_markers_toggle() {
        let mut host = MemoryHost::new();
        let id = host.insert(Rect::new(0.0, 0.0, 10.0, 10.0));

        host.set_marker(id, "active", true);
        assert!(host.has_marker(id, "active"));

        host.set_marker(id, "active", false);
        assert!(!host.has_marker(id, "active"));
    }

    #[test]
    fn test_guide_lifecycle() {
        let mut host = MemoryHost::new();
        let container = host.insert(Rect::new(0.0, 0.0, 500.0, 500.0));
        let guide = host.create_guide("dragline");

        assert_eq!(host.guide_count(), 1);
        assert_eq!(host.guide(guide).unwrap().class, "dragline");
        assert!(host.attached_guides(container).is_empty());

        host.attach_guide(guide, container);
        assert_eq!(host.attached_guides(container), vec![guide]);

        host.remove_guide(guide);
        assert_eq!(host.guide_count(), 0);
        assert_eq!(host.guides_created(), 1);
    }

    #[test]
    fn test_visual_parent() {
        let mut host = MemoryHost::new();
        let container = host.insert(Rect::new(0.0, 0.0, 500.0, 500.0));
        let child = host.insert_in(container, Rect::new(10.0, 10.0, 60.0, 40.0));
        let orphan = host.insert(Rect::new(0.0, 0.0, 10.0, 10.0));

        assert_eq!(host.visual_parent(child), Some(container));
        assert_eq!(host.visual_parent(orphan), None);
    }
}
