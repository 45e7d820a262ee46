//! Scene placement instructions for the rendering collaborator

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::core::{RenderHandle, Target};
use crate::tracking::tracker::IndicatorDecision;

/// What the renderer should do with the selected target's node
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PlacementAction {
    /// No node has been attached to the target yet
    Unplaced,
    /// Node exists but is not in the scene: set its position and insert it
    Insert {
        handle: RenderHandle,
        position: [f64; 3],
    },
    /// Node is already in the scene: cancel running moves and animate to the new position
    MoveTo {
        handle: RenderHandle,
        position: [f64; 3],
        duration_s: f64,
    },
}

impl PlacementAction {
    /// Decide between insertion and animated repositioning.
    ///
    /// `in_scene` is reported by the renderer, which owns scene membership.
    pub fn plan(target: &Target, decision: &IndicatorDecision, in_scene: bool, duration_s: f64) -> Self {
        let Some(handle) = target.render_handle else {
            return PlacementAction::Unplaced;
        };

        let position = to_array(decision.placement());
        if in_scene {
            PlacementAction::MoveTo {
                handle,
                position,
                duration_s,
            }
        } else {
            PlacementAction::Insert { handle, position }
        }
    }

    pub fn position(&self) -> Option<Vector3<f64>> {
        match self {
            PlacementAction::Unplaced => None,
            PlacementAction::Insert { position, .. } | PlacementAction::MoveTo { position, .. } => {
                Some(Vector3::from(*position))
            }
        }
    }
}

fn to_array(v: Vector3<f64>) -> [f64; 3] {
    [v.x, v.y, v.z]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::GeoPoint;
    use crate::tracking::tracker::IndicatorState;

    fn decision() -> IndicatorDecision {
        IndicatorDecision {
            state: IndicatorState::ShowRight,
            target_bearing: 100.0,
            distance: 30.0,
            offset: 20.0,
        }
    }

    #[test]
    fn test_unplaced_target() {
        let target = Target::new("wolf", GeoPoint::new_unchecked(40.0, -74.0));
        let action = PlacementAction::plan(&target, &decision(), false, 0.2);
        assert_eq!(action, PlacementAction::Unplaced);
        assert!(action.position().is_none());
    }

    #[test]
    fn test_insert_then_move() {
        let target = Target::new("wolf", GeoPoint::new_unchecked(40.0, -74.0))
            .with_render_handle(RenderHandle(3));

        let insert = PlacementAction::plan(&target, &decision(), false, 0.2);
        assert_eq!(
            insert,
            PlacementAction::Insert {
                handle: RenderHandle(3),
                position: [20.0, 0.0, -30.0],
            }
        );

        let moved = PlacementAction::plan(&target, &decision(), true, 0.2);
        match moved {
            PlacementAction::MoveTo { handle, duration_s, .. } => {
                assert_eq!(handle, RenderHandle(3));
                assert_eq!(duration_s, 0.2);
            }
            other => panic!("unexpected action {:?}", other),
        }
        assert_eq!(moved.position(), Some(Vector3::new(20.0, 0.0, -30.0)));
    }
}
