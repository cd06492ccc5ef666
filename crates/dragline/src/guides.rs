//! Guide registry: owns the guide visuals, keyed by (target, pairing).

use std::collections::HashMap;

use crate::geometry::{AlignKind, GuideGeometry};
use crate::host::{ElementHost, ElementId, GuideId};

/// A live guide and its attachment state.
#[derive(Debug, Clone, Copy)]
struct GuideEntry {
    id: GuideId,
    attached: bool,
}

/// Owns every guide visual for one alignment surface.
///
/// At most one guide is live per (target, kind) pair, and each guide is
/// attached to the container at most once.
#[derive(Debug, Default)]
pub struct GuideRegistry {
    guides: HashMap<ElementId, HashMap<AlignKind, GuideEntry>>,
}

impl GuideRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the guide for (target, kind), creating it through the host
    /// if absent. New guides start detached.
    pub fn ensure(
        &mut self,
        host: &mut dyn ElementHost,
        target: ElementId,
        kind: AlignKind,
        class: &str,
    ) -> GuideId {
        let entries = self.guides.entry(target).or_default();
        if let Some(entry) = entries.get(&kind) {
            return entry.id;
        }
        let id = host.create_guide(class);
        entries.insert(kind, GuideEntry { id, attached: false });
        id
    }

    /// Update a guide's position and length.
    pub fn set_geometry(
        &self,
        host: &mut dyn ElementHost,
        guide: GuideId,
        geometry: &GuideGeometry,
    ) {
        host.set_guide_geometry(guide, geometry);
    }

    /// Attach the guide for (target, kind) to the container.
    ///
    /// Idempotent: an already-attached guide is left alone.
    pub fn attach(
        &mut self,
        host: &mut dyn ElementHost,
        target: ElementId,
        kind: AlignKind,
        container: ElementId,
    ) {
        if let Some(entry) = self
            .guides
            .get_mut(&target)
            .and_then(|entries| entries.get_mut(&kind))
        {
            if !entry.attached {
                host.attach_guide(entry.id, container);
                entry.attached = true;
            }
        }
    }

    /// Destroy the guide for (target, kind). Returns whether one existed.
    pub fn remove(&mut self, host: &mut dyn ElementHost, target: ElementId, kind: AlignKind) -> bool {
        let Some(entries) = self.guides.get_mut(&target) else {
            return false;
        };
        let Some(entry) = entries.remove(&kind) else {
            return false;
        };
        host.remove_guide(entry.id);
        if entries.is_empty() {
            self.guides.remove(&target);
        }
        true
    }

    /// Destroy every guide for one target. Returns whether any existed.
    pub fn remove_all_for_target(&mut self, host: &mut dyn ElementHost, target: ElementId) -> bool {
        let Some(entries) = self.guides.remove(&target) else {
            return false;
        };
        for entry in entries.values() {
            host.remove_guide(entry.id);
        }
        !entries.is_empty()
    }

    /// Destroy every guide across all targets.
    pub fn clear_all(&mut self, host: &mut dyn ElementHost) {
        for entries in self.guides.values() {
            for entry in entries.values() {
                host.remove_guide(entry.id);
            }
        }
        self.guides.clear();
    }

    /// Whether a guide is live for (target, kind).
    pub fn has(&self, target: ElementId, kind: AlignKind) -> bool {
        self.guides
            .get(&target)
            .is_some_and(|entries| entries.contains_key(&kind))
    }

    /// Number of live guides for one target.
    pub fn count_for_target(&self, target: ElementId) -> usize {
        self.guides.get(&target).map_or(0, HashMap::len)
    }

    /// Number of live guides across all targets.
    pub fn total(&self) -> usize {
        self.guides.values().map(HashMap::len).sum()
    }

    /// Whether no guide is live.
    pub fn is_empty(&self) -> bool {
        self.guides.is_empty()
    }
}
