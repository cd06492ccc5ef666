//! The alignment engine: proximity detection, snapping and guide upkeep.

use kurbo::Rect;

use crate::config::DraglineOptions;
use crate::error::{AlignError, AlignResult};
use crate::geometry::{guide_geometry, snap_origin, AlignKind, Orientation};
use crate::guides::GuideRegistry;
use crate::host::{ElementHost, ElementId};
use crate::tracker::PositionTracker;

/// Run one recalculation pass for the active element against every other
/// tracked element.
///
/// Every pass is a fresh, idempotent computation: a (target, kind) pair
/// within threshold gets its guide created or updated in place, a pair
/// that left threshold gets its guide destroyed, and a target with no
/// remaining guides loses its aligned marker.
///
/// Snap corrections are computed from the rectangle snapshot taken at the
/// start of the pass and applied through the host; the tracker picks them
/// up on the next refresh. When several pairings of one orientation are
/// within threshold in a single pass, the last one evaluated determines
/// the final coordinate while guides are drawn for all of them
/// (last-write-wins).
///
/// Without a container, guides are created and sized but never attached:
/// snapping still works, nothing is drawn.
pub fn recalculate(
    host: &mut dyn ElementHost,
    tracker: &PositionTracker,
    guides: &mut GuideRegistry,
    options: &DraglineOptions,
    active: ElementId,
    others: &[ElementId],
    container: Option<ElementId>,
) -> AlignResult<()> {
    let active_rect = tracker
        .get(active)
        .map_err(|_| AlignError::UntrackedActiveElement)?;

    for &target in others {
        if target == active {
            continue;
        }
        let target_rect = match tracker.get(target) {
            Ok(rect) => rect,
            Err(_) => {
                log::warn!("recalculate: skipping untracked element {target}");
                continue;
            }
        };

        for &kind in &options.line_types {
            let target_value = kind.target_edge().of(&target_rect);
            let active_value = kind.active_edge().of(&active_rect);
            let distance = (target_value - active_value).abs();

            if distance < options.threshold {
                host.set_marker(target, &options.aligned_class, true);
                apply_snap(host, active, &active_rect, kind, target_value);

                let guide = guides.ensure(host, target, kind, &options.guide_class);
                let geometry = guide_geometry(kind, &active_rect, &target_rect);
                guides.set_geometry(host, guide, &geometry);
                if let Some(container) = container {
                    guides.attach(host, target, kind, container);
                }
            } else if guides.remove(host, target, kind) && guides.count_for_target(target) == 0 {
                host.set_marker(target, &options.aligned_class, false);
            }
        }
    }

    Ok(())
}

/// Magnetic correction: move the active element so the paired edges coincide.
fn apply_snap(
    host: &mut dyn ElementHost,
    active: ElementId,
    active_rect: &Rect,
    kind: AlignKind,
    target_value: f64,
) {
    let origin = snap_origin(kind, active_rect, target_value);
    match kind.orientation() {
        Orientation::Horizontal => host.set_top(active, origin),
        Orientation::Vertical => host.set_left(active, origin),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::MemoryHost;

    struct Fixture {
        host: MemoryHost,
        tracker: PositionTracker,
        guides: GuideRegistry,
        options: DraglineOptions,
        container: ElementId,
        active: ElementId,
        target: ElementId,
    }

    /// Active 100x40 at (0, 103), target 100x50 at (30, 50): only the
    /// active-top / target-bottom pairing (distance 3) is near threshold.
    fn fixture() -> Fixture {
        let mut host = MemoryHost::new();
        let container = host.insert(Rect::new(0.0, 0.0, 1000.0, 1000.0));
        let active = host.insert_in(container, Rect::new(0.0, 103.0, 100.0, 143.0));
        let target = host.insert_in(container, Rect::new(30.0, 50.0, 130.0, 100.0));

        let mut tracker = PositionTracker::new();
        tracker.track(&host, active);
        tracker.track(&host, target);

        Fixture {
            host,
            tracker,
            guides: GuideRegistry::new(),
            options: DraglineOptions::default(),
            container,
            active,
            target,
        }
    }

    fn run(fx: &mut Fixture) -> AlignResult<()> {
        recalculate(
            &mut fx.host,
            &fx.tracker,
            &mut fx.guides,
            &fx.options,
            fx.active,
            &[fx.target],
            Some(fx.container),
        )
    }

    #[test]
    fn test_snap_and_guide_within_threshold() {
        let mut fx = fixture();
        run(&mut fx).unwrap();

        // Active top magnetized onto the target bottom.
        assert_eq!(fx.host.bounds(fx.active).unwrap().y0, 100.0);
        assert!(fx.guides.has(fx.target, AlignKind::Tb));
        assert!(fx.host.has_marker(fx.target, "aligned-item"));

        let attached = fx.host.attached_guides(fx.container);
        assert_eq!(attached.len(), 1);
        let geometry = fx.host.guide(attached[0]).unwrap().geometry.unwrap();
        assert_eq!(geometry.orientation, Orientation::Horizontal);
        assert_eq!(geometry.axis, 100.0);
        assert_eq!(geometry.span_start, 0.0);
        assert_eq!(geometry.span_len, 130.0);
    }

    #[test]
    fn test_exact_threshold_does_not_trigger() {
        let mut fx = fixture();
        // Distance between active top and target bottom becomes exactly 5.
        fx.host.place(fx.active, Rect::new(0.0, 105.0, 100.0, 145.0));
        fx.tracker.refresh(&fx.host, fx.active);

        run(&mut fx).unwrap();

        assert!(fx.guides.is_empty());
        assert_eq!(fx.host.bounds(fx.active).unwrap().y0, 105.0);
        assert!(!fx.host.has_marker(fx.target, "aligned-item"));
    }

    #[test]
    fn test_just_inside_threshold_triggers() {
        let mut fx = fixture();
        fx.host.place(fx.active, Rect::new(0.0, 104.9, 100.0, 144.9));
        fx.tracker.refresh(&fx.host, fx.active);

        run(&mut fx).unwrap();

        assert!(fx.guides.has(fx.target, AlignKind::Tb));
    }

    #[test]
    fn test_snap_bottom_to_top() {
        let mut fx = fixture();
        // Active bottom (143) within 3 of target top... move target top to 140.
        fx.host.place(fx.target, Rect::new(300.0, 140.0, 400.0, 190.0));
        fx.tracker.refresh(&fx.host, fx.target);
        fx.options.line_types = vec![AlignKind::Bt];

        run(&mut fx).unwrap();

        // Height 40, target top 140: active top becomes 100.
        assert_eq!(fx.host.bounds(fx.active).unwrap().y0, 100.0);
    }

    #[test]
    fn test_pass_is_idempotent() {
        let mut fx = fixture();
        run(&mut fx).unwrap();
        fx.tracker.refresh(&fx.host, fx.active);
        let snapped = fx.host.bounds(fx.active).unwrap();

        run(&mut fx).unwrap();

        assert_eq!(fx.host.guides_created(), 1);
        assert_eq!(fx.guides.count_for_target(fx.target), 1);
        assert_eq!(fx.host.bounds(fx.active).unwrap(), snapped);
        assert_eq!(fx.host.attached_guides(fx.container).len(), 1);
    }

    #[test]
    fn test_leaving_threshold_retracts_guide_and_marker() {
        let mut fx = fixture();
        run(&mut fx).unwrap();
        assert!(fx.host.has_marker(fx.target, "aligned-item"));

        fx.host.place(fx.active, Rect::new(0.0, 400.0, 100.0, 440.0));
        fx.tracker.refresh(&fx.host, fx.active);
        run(&mut fx).unwrap();

        assert!(fx.guides.is_empty());
        assert_eq!(fx.host.guide_count(), 0);
        assert!(!fx.host.has_marker(fx.target, "aligned-item"));
        // Position is left where the drag put it, no re-snap.
        assert_eq!(fx.host.bounds(fx.active).unwrap().y0, 400.0);
    }

    #[test]
    fn test_marker_survives_while_another_kind_holds() {
        let mut fx = fixture();
        // Target sharing the active left edge and nearly sharing its top.
        fx.host.place(fx.active, Rect::new(0.0, 52.0, 100.0, 92.0));
        fx.tracker.refresh(&fx.host, fx.active);
        fx.host.place(fx.target, Rect::new(0.0, 50.0, 130.0, 100.0));
        fx.tracker.refresh(&fx.host, fx.target);
        fx.options.line_types = vec![AlignKind::Tt, AlignKind::Ll];

        run(&mut fx).unwrap();
        assert_eq!(fx.guides.count_for_target(fx.target), 2);

        // Drift vertically out of range; the left-edge pairing still holds.
        fx.host.place(fx.active, Rect::new(0.0, 70.0, 100.0, 110.0));
        fx.tracker.refresh(&fx.host, fx.active);
        run(&mut fx).unwrap();

        assert!(!fx.guides.has(fx.target, AlignKind::Tt));
        assert!(fx.guides.has(fx.target, AlignKind::Ll));
        assert!(fx.host.has_marker(fx.target, "aligned-item"));
    }

    #[test]
    fn test_last_evaluated_kind_wins_final_coordinate() {
        let mut fx = fixture();
        // A short target whose top (100) and bottom (106) are both within
        // threshold of the active top (103); Tb is evaluated after Tt.
        fx.host.place(fx.active, Rect::new(0.0, 103.0, 100.0, 143.0));
        fx.tracker.refresh(&fx.host, fx.active);
        fx.host.place(fx.target, Rect::new(30.0, 100.0, 130.0, 106.0));
        fx.tracker.refresh(&fx.host, fx.target);
        fx.options.line_types = vec![AlignKind::Tt, AlignKind::Tb];

        run(&mut fx).unwrap();

        // Guides exist for both pairings, position follows the last one.
        assert!(fx.guides.has(fx.target, AlignKind::Tt));
        assert!(fx.guides.has(fx.target, AlignKind::Tb));
        assert_eq!(fx.host.bounds(fx.active).unwrap().y0, 106.0);
    }

    #[test]
    fn test_untracked_active_skips_pass() {
        let mut fx = fixture();
        fx.tracker.untrack(fx.active);

        let result = run(&mut fx);

        assert_eq!(result, Err(AlignError::UntrackedActiveElement));
        assert!(fx.guides.is_empty());
        assert_eq!(fx.host.bounds(fx.active).unwrap().y0, 103.0);
    }

    #[test]
    fn test_no_container_leaves_guides_detached() {
        let mut fx = fixture();
        let result = recalculate(
            &mut fx.host,
            &fx.tracker,
            &mut fx.guides,
            &fx.options,
            fx.active,
            &[fx.target],
            None,
        );

        result.unwrap();
        // Snapping and guide bookkeeping happen, attachment does not.
        assert_eq!(fx.host.bounds(fx.active).unwrap().y0, 100.0);
        assert!(fx.guides.has(fx.target, AlignKind::Tb));
        assert!(fx.host.attached_guides(fx.container).is_empty());
    }

    #[test]
    fn test_vertical_snap_left_to_right() {
        let mut fx = fixture();
        // Active left (0) within 4 of target right... place target right at 4.
        fx.host.place(fx.target, Rect::new(-96.0, 500.0, 4.0, 550.0));
        fx.tracker.refresh(&fx.host, fx.target);
        fx.options.line_types = vec![AlignKind::Lr];

        run(&mut fx).unwrap();

        assert_eq!(fx.host.bounds(fx.active).unwrap().x0, 4.0);
        let geometry = fx
            .host
            .guide(fx.host.attached_guides(fx.container)[0])
            .unwrap()
            .geometry
            .unwrap();
        assert_eq!(geometry.orientation, Orientation::Vertical);
        assert_eq!(geometry.axis, 4.0);
        // Union of vertical extents: active 103..143, target 500..550.
        assert_eq!(geometry.span_start, 103.0);
        assert_eq!(geometry.span_len, 447.0);
    }
}
