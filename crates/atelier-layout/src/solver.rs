//! Single-pass constraint solver.
//!
//! For each component, active constraints apply in declaration order.
//! A constraint sees the effect of *earlier* constraints on its own
//! component, but reads every *other* component's geometry from a frozen
//! pre-solve view. Solving is therefore one synchronous pass, not a
//! fixed-point relaxation: a chain of constraints spanning components
//! settles one link per call, and callers re-invoke [`solve`] until
//! geometry stabilizes.
//!
//! Tolerance policy: a constraint that cannot apply -- dangling target,
//! non-positive size or ratio, arithmetic overflow -- is a no-op, logged
//! at debug level. Nothing here errors.

use rust_decimal::Decimal;
use tracing::debug;

use atelier_types::{Component, ComponentId, Constraint, ConstraintKind};

/// Resolve all active constraints into concrete geometry.
///
/// Returns a new component list; the input is the frozen view that
/// spacing and alignment targets are read from. Components without
/// active constraints pass through unchanged.
pub fn solve(components: &[Component]) -> Vec<Component> {
    components
        .iter()
        .map(|component| solve_component(component, components))
        .collect()
}

/// Apply one component's constraints against the frozen view.
fn solve_component(component: &Component, frozen: &[Component]) -> Component {
    let mut resolved = component.clone();

    // Iterate the original declaration list; constraints mutate `resolved`
    // so later constraints see earlier effects on this same component.
    for constraint in &component.constraints {
        if !constraint.active {
            continue;
        }
        apply_constraint(&mut resolved, constraint, frozen);
    }

    resolved
}

/// Apply a single constraint to `component`, reading targets from `frozen`.
fn apply_constraint(component: &mut Component, constraint: &Constraint, frozen: &[Component]) {
    match constraint.kind {
        ConstraintKind::Spacing => {
            let Some(target) = lookup_target(component, constraint, frozen) else {
                return;
            };
            match target
                .x
                .checked_add(target.width)
                .and_then(|edge| edge.checked_add(constraint.value))
            {
                Some(x) => component.x = x,
                None => {
                    debug!(
                        component = %component.id,
                        "spacing constraint overflowed, skipping"
                    );
                }
            }
        }
        ConstraintKind::Alignment => {
            if let Some(target) = lookup_target(component, constraint, frozen) {
                component.y = target.y;
            }
        }
        ConstraintKind::Size => {
            // A non-positive width would break the width > 0 invariant.
            if constraint.value > Decimal::ZERO {
                component.width = constraint.value;
            } else {
                debug!(
                    component = %component.id,
                    value = %constraint.value,
                    "size constraint with non-positive value, skipping"
                );
            }
        }
        ConstraintKind::Aspect => {
            // `value` is the width:height ratio.
            if constraint.value > Decimal::ZERO {
                match component.width.checked_div(constraint.value) {
                    Some(height) if height > Decimal::ZERO => component.height = height,
                    _ => {
                        debug!(
                            component = %component.id,
                            ratio = %constraint.value,
                            "aspect constraint produced no usable height, skipping"
                        );
                    }
                }
            } else {
                debug!(
                    component = %component.id,
                    ratio = %constraint.value,
                    "aspect constraint with non-positive ratio, skipping"
                );
            }
        }
    }
}

/// Resolve a constraint's target in the frozen view.
///
/// Returns `None` (and logs) when the constraint has no target or the
/// target id no longer resolves -- the dangling-reference tolerance.
fn lookup_target<'a>(
    component: &Component,
    constraint: &Constraint,
    frozen: &'a [Component],
) -> Option<&'a Component> {
    let Some(target_id) = constraint.target else {
        debug!(
            component = %component.id,
            kind = ?constraint.kind,
            "constraint requires a target but has none, skipping"
        );
        return None;
    };

    let found = find_component(frozen, target_id);
    if found.is_none() {
        debug!(
            component = %component.id,
            target = %target_id,
            "constraint target missing, skipping"
        );
    }
    found
}

/// Find a component by id in the frozen view.
fn find_component(components: &[Component], id: ComponentId) -> Option<&Component> {
    components.iter().find(|c| c.id == id)
}

#[cfg(test)]
mod tests {
    use atelier_types::ComponentType;

    use super::*;

    fn component_at(name: &str, x: i64, y: i64, width: i64, height: i64) -> Component {
        Component::new(ComponentType::Button, name)
            .at(Decimal::from(x), Decimal::from(y))
            .sized(Decimal::from(width), Decimal::from(height))
    }

    #[test]
    fn spacing_places_right_of_target() {
        let anchor = component_at("anchor", 10, 20, 100, 40);
        let mut follower = component_at("follower", 0, 0, 80, 40);
        follower
            .constraints
            .push(Constraint::spacing(anchor.id, Decimal::from(16)));

        let solved = solve(&[anchor, follower]);
        // 10 + 100 + 16 = 126
        assert_eq!(solved.get(1).map(|c| c.x), Some(Decimal::from(126)));
    }

    #[test]
    fn alignment_copies_target_top_edge() {
        let anchor = component_at("anchor", 10, 55, 100, 40);
        let mut follower = component_at("follower", 300, 0, 80, 40);
        follower.constraints.push(Constraint::alignment(anchor.id));

        let solved = solve(&[anchor, follower]);
        assert_eq!(solved.get(1).map(|c| c.y), Some(Decimal::from(55)));
    }

    #[test]
    fn size_sets_width() {
        let mut component = component_at("sized", 0, 0, 80, 40);
        component.constraints.push(Constraint::size(Decimal::from(240)));

        let solved = solve(&[component]);
        assert_eq!(solved.first().map(|c| c.width), Some(Decimal::from(240)));
    }

    #[test]
    fn aspect_derives_height_from_width() {
        let mut component = component_at("ratio", 0, 0, 200, 40);
        component.constraints.push(Constraint::aspect(Decimal::from(2)));

        let solved = solve(&[component]);
        assert_eq!(solved.first().map(|c| c.height), Some(Decimal::from(100)));
    }

    #[test]
    fn dangling_target_is_a_no_op() {
        let mut component = component_at("orphan", 7, 9, 80, 40);
        component
            .constraints
            .push(Constraint::spacing(ComponentId::new(), Decimal::from(16)));
        component
            .constraints
            .push(Constraint::alignment(ComponentId::new()));

        let solved = solve(&[component]);
        assert_eq!(solved.first().map(|c| c.x), Some(Decimal::from(7)));
        assert_eq!(solved.first().map(|c| c.y), Some(Decimal::from(9)));
    }

    #[test]
    fn inactive_constraints_are_skipped() {
        let mut component = component_at("paused", 0, 0, 80, 40);
        let mut size = Constraint::size(Decimal::from(500));
        size.active = false;
        component.constraints.push(size);

        let solved = solve(&[component]);
        assert_eq!(solved.first().map(|c| c.width), Some(Decimal::from(80)));
    }

    #[test]
    fn non_positive_size_and_ratio_are_no_ops() {
        let mut component = component_at("guarded", 0, 0, 80, 40);
        component.constraints.push(Constraint::size(Decimal::ZERO));
        component.constraints.push(Constraint::aspect(Decimal::from(-2)));

        let solved = solve(&[component]);
        assert_eq!(solved.first().map(|c| c.width), Some(Decimal::from(80)));
        assert_eq!(solved.first().map(|c| c.height), Some(Decimal::from(40)));
    }

    #[test]
    fn own_constraints_apply_in_declaration_order() {
        // Size runs first, so the aspect constraint sees the new width.
        let mut component = component_at("chained", 0, 0, 80, 40);
        component.constraints.push(Constraint::size(Decimal::from(300)));
        component.constraints.push(Constraint::aspect(Decimal::from(3)));

        let solved = solve(&[component]);
        assert_eq!(solved.first().map(|c| c.width), Some(Decimal::from(300)));
        assert_eq!(solved.first().map(|c| c.height), Some(Decimal::from(100)));
    }

    #[test]
    fn cross_component_reads_are_pre_solve() {
        // `b` spaces off `a`, and `c` spaces off `b`. In one pass, `c`
        // reads b's *pre-solve* position -- the documented staleness.
        let a = component_at("a", 0, 0, 100, 40);
        let mut b = component_at("b", 500, 0, 100, 40);
        b.constraints.push(Constraint::spacing(a.id, Decimal::from(10)));
        let mut c = component_at("c", 900, 0, 100, 40);
        c.constraints.push(Constraint::spacing(b.id, Decimal::from(10)));

        let solved = solve(&[a, b, c]);
        // b: 0 + 100 + 10 = 110. c: 500 + 100 + 10 = 610 (stale b).
        assert_eq!(solved.get(1).map(|v| v.x), Some(Decimal::from(110)));
        assert_eq!(solved.get(2).map(|v| v.x), Some(Decimal::from(610)));

        // A second pass settles the chain: c now reads b at 110.
        let solved_again = solve(&solved);
        assert_eq!(solved_again.get(2).map(|v| v.x), Some(Decimal::from(220)));
    }

    #[test]
    fn solve_is_idempotent_without_cross_component_chains() {
        let anchor = component_at("anchor", 10, 20, 100, 40);
        let mut follower = component_at("follower", 0, 0, 80, 40);
        follower
            .constraints
            .push(Constraint::spacing(anchor.id, Decimal::from(16)));
        follower.constraints.push(Constraint::size(Decimal::from(90)));
        follower.constraints.push(Constraint::aspect(Decimal::from(3)));

        let once = solve(&[anchor, follower]);
        let twice = solve(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn unconstrained_components_pass_through() {
        let a = component_at("plain", 1, 2, 3, 4);
        let expected = a.clone();
        let solved = solve(&[a]);
        assert_eq!(solved.first(), Some(&expected));
    }
}
