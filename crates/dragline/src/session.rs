//! Drag session lifecycle and the public facade.

use std::collections::HashMap;
use std::fmt;

use kurbo::Vec2;

use crate::config::DraglineOptions;
use crate::engine;
use crate::guides::GuideRegistry;
use crate::host::{ElementHost, ElementId};
use crate::tracker::PositionTracker;

/// Caller-supplied callbacks layered under the engine's own handling.
///
/// For every drag notification the engine's internal logic runs first and
/// the hook second; this two-stage order is a contract.
#[derive(Default)]
pub struct DragHooks {
    /// Runs after the engine processed a drag start.
    pub on_start: Option<Box<dyn FnMut(ElementId)>>,
    /// Runs after the engine processed a drag move, with the pointer delta.
    pub on_move: Option<Box<dyn FnMut(ElementId, Vec2)>>,
    /// Runs after the engine processed a drag end.
    pub on_end: Option<Box<dyn FnMut(ElementId)>>,
}

impl DragHooks {
    /// Hooks that do nothing.
    pub fn none() -> Self {
        Self::default()
    }
}

/// Snap-alignment session manager for one alignment surface.
///
/// Owns the position index, the guide registry and the active-element
/// state; instances are independent, nothing is process-wide. Drives one
/// drag session at a time: `Idle` until a drag-start notification, then
/// `Dragging` with a recalculation per move, back to `Idle` with a full
/// clear on drag-end.
pub struct Dragline {
    options: DraglineOptions,
    tracker: PositionTracker,
    guides: GuideRegistry,
    /// Registered elements in registration order.
    elements: Vec<ElementId>,
    hooks: HashMap<ElementId, DragHooks>,
    active: Option<ElementId>,
    container: Option<ElementId>,
}

impl Dragline {
    /// Create a manager with the given options.
    pub fn new(options: DraglineOptions) -> Self {
        Self {
            options,
            tracker: PositionTracker::new(),
            guides: GuideRegistry::new(),
            elements: Vec::new(),
            hooks: HashMap::new(),
            active: None,
            container: None,
        }
    }

    /// The configured options.
    pub fn options(&self) -> &DraglineOptions {
        &self.options
    }

    /// The element currently being dragged, if any.
    pub fn active(&self) -> Option<ElementId> {
        self.active
    }

    /// Whether a drag session is in progress.
    pub fn is_dragging(&self) -> bool {
        self.active.is_some()
    }

    /// Registered elements in registration order.
    pub fn elements(&self) -> &[ElementId] {
        &self.elements
    }

    /// Pin the container guides are attached to.
    ///
    /// Without an explicit container, the first recalculation resolves it
    /// to the active element's visual parent and keeps that.
    pub fn register_container(&mut self, container: ElementId) {
        self.container = Some(container);
    }

    /// Register an element for alignment participation.
    ///
    /// Its current bounds are tracked and the hooks stored;
    /// re-registration replaces both. Undo with
    /// [`unregister_element`](Dragline::unregister_element).
    pub fn register_element(&mut self, host: &dyn ElementHost, element: ElementId, hooks: DragHooks) {
        self.tracker.track(host, element);
        self.hooks.insert(element, hooks);
        if !self.elements.contains(&element) {
            self.elements.push(element);
        }
    }

    /// Remove an element from alignment participation.
    ///
    /// Its guides disappear immediately and it no longer takes part in
    /// subsequent passes. Unregistering the active element ends the drag
    /// session first.
    pub fn unregister_element(&mut self, host: &mut dyn ElementHost, element: ElementId) {
        if self.active == Some(element) {
            self.end_session(host, element);
        }
        if self.guides.remove_all_for_target(host, element) {
            host.set_marker(element, &self.options.aligned_class, false);
        }
        self.tracker.untrack(element);
        self.hooks.remove(&element);
        self.elements.retain(|&e| e != element);
    }

    /// Tear down every registration and all session state.
    pub fn destroy_all(&mut self, host: &mut dyn ElementHost) {
        if let Some(active) = self.active {
            self.end_session(host, active);
        }
        self.guides.clear_all(host);
        self.tracker.clear();
        self.hooks.clear();
        self.elements.clear();
        self.container = None;
    }

    /// Drag-start notification from the drag-session collaborator.
    ///
    /// Ignored when a drag is already in progress (single-pointer
    /// assumption) or the element is not registered.
    pub fn on_drag_start(&mut self, host: &mut dyn ElementHost, element: ElementId) {
        if self.active.is_some() {
            log::warn!("drag start for {element} ignored: a drag is already in progress");
            return;
        }
        if !self.tracker.is_tracked(element) {
            log::warn!("drag start for unregistered element {element} ignored");
            return;
        }

        self.active = Some(element);
        host.set_marker(element, &self.options.active_class, true);
        self.recalculate(host, element);
        self.run_start_hook(element);
    }

    /// Drag-move notification. `delta` is the pointer delta reported by
    /// the collaborator and is forwarded to the move hook.
    pub fn on_drag_move(&mut self, host: &mut dyn ElementHost, element: ElementId, delta: Vec2) {
        if self.active != Some(element) {
            log::debug!("drag move for {element} ignored: not the active element");
            return;
        }

        self.tracker.refresh(host, element);
        self.recalculate(host, element);

        if let Some(hooks) = self.hooks.get_mut(&element) {
            if let Some(on_move) = hooks.on_move.as_mut() {
                on_move(element, delta);
            }
        }
    }

    /// Drag-end notification. Performs the mandatory full clear.
    pub fn on_drag_end(&mut self, host: &mut dyn ElementHost, element: ElementId) {
        if self.active != Some(element) {
            log::debug!("drag end for {element} ignored: not the active element");
            return;
        }

        self.end_session(host, element);

        if let Some(hooks) = self.hooks.get_mut(&element) {
            if let Some(on_end) = hooks.on_end.as_mut() {
                on_end(element);
            }
        }
    }

    /// Clear guides, markers and the active element; refresh the dragged
    /// element's rectangle from its final layout.
    fn end_session(&mut self, host: &mut dyn ElementHost, element: ElementId) {
        host.set_marker(element, &self.options.active_class, false);
        self.guides.clear_all(host);
        for &other in &self.elements {
            if other != element {
                host.set_marker(other, &self.options.aligned_class, false);
            }
        }
        self.tracker.refresh(host, element);
        self.active = None;
    }

    fn recalculate(&mut self, host: &mut dyn ElementHost, active: ElementId) {
        if self.container.is_none() {
            self.container = host.visual_parent(active);
            if self.container.is_none() {
                // Guides will be computed but stay detached.
                log::debug!("alignment pass: {}", crate::AlignError::UnresolvableContainer);
            }
        }
        let others: Vec<ElementId> = self
            .elements
            .iter()
            .copied()
            .filter(|&e| e != active)
            .collect();
        if let Err(err) = engine::recalculate(
            host,
            &self.tracker,
            &mut self.guides,
            &self.options,
            active,
            &others,
            self.container,
        ) {
            log::warn!("alignment pass skipped: {err}");
        }
    }

    fn run_start_hook(&mut self, element: ElementId) {
        if let Some(hooks) = self.hooks.get_mut(&element) {
            if let Some(on_start) = hooks.on_start.as_mut() {
                on_start(element);
            }
        }
    }
}

impl Default for Dragline {
    fn default() -> Self {
        Self::new(DraglineOptions::default())
    }
}

impl fmt::Debug for Dragline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dragline")
            .field("elements", &self.elements.len())
            .field("active", &self.active)
            .field("container", &self.container)
            .field("live_guides", &self.guides.total())
            .finish_non_exhaustive()
    }
}
