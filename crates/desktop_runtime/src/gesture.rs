//! Click-versus-drag disambiguation for desktop icons.
//!
//! `Idle -> PointerDown -> Dragging -> (released)`. Release always returns to `Idle` and reports
//! what the gesture was, so no delayed reset is needed.

use crate::model::{AppId, PointerPosition};

/// Displacement (per axis, in px) a press must exceed before it counts as a drag.
pub const DRAG_THRESHOLD_PX: i32 = 10;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum IconGesture {
    #[default]
    Idle,
    PointerDown {
        app_id: AppId,
        origin: PointerPosition,
    },
    Dragging {
        app_id: AppId,
        origin: PointerPosition,
        current: PointerPosition,
    },
}

/// What a released gesture turned out to be.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GestureOutcome {
    /// Pointer stayed within the threshold: open the icon's app.
    Click(AppId),
    /// Pointer travelled past the threshold: commit a placement at `release`.
    Drop {
        app_id: AppId,
        release: PointerPosition,
    },
    /// Release without a matching press.
    Ignored,
}

impl IconGesture {
    /// Starts a gesture. A press while another gesture is live replaces it.
    pub fn pointer_down(&mut self, app_id: AppId, pointer: PointerPosition) {
        *self = Self::PointerDown {
            app_id,
            origin: pointer,
        };
    }

    /// Tracks movement. Once past the threshold the gesture stays a drag.
    pub fn pointer_move(&mut self, pointer: PointerPosition) {
        match self {
            Self::Idle => {}
            Self::PointerDown { app_id, origin } => {
                if exceeds_threshold(*origin, pointer) {
                    *self = Self::Dragging {
                        app_id: app_id.clone(),
                        origin: *origin,
                        current: pointer,
                    };
                }
            }
            Self::Dragging { current, .. } => *current = pointer,
        }
    }

    /// Ends the gesture and resets to `Idle`.
    pub fn pointer_up(&mut self, pointer: PointerPosition) -> GestureOutcome {
        match std::mem::take(self) {
            Self::Idle => GestureOutcome::Ignored,
            Self::PointerDown { app_id, origin } => {
                if exceeds_threshold(origin, pointer) {
                    GestureOutcome::Drop {
                        app_id,
                        release: pointer,
                    }
                } else {
                    GestureOutcome::Click(app_id)
                }
            }
            Self::Dragging { app_id, .. } => GestureOutcome::Drop {
                app_id,
                release: pointer,
            },
        }
    }

    /// Visual drag offset for the icon being dragged. Discarded on release.
    pub fn drag_offset(&self) -> Option<(&AppId, i32, i32)> {
        match self {
            Self::Dragging {
                app_id,
                origin,
                current,
            } => {
                let (dx, dy) = current.delta_from(*origin);
                Some((app_id, dx, dy))
            }
            _ => None,
        }
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self, Self::Dragging { .. })
    }
}

fn exceeds_threshold(origin: PointerPosition, pointer: PointerPosition) -> bool {
    let (dx, dy) = pointer.delta_from(origin);
    dx.saturating_abs() > DRAG_THRESHOLD_PX || dy.saturating_abs() > DRAG_THRESHOLD_PX
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn at(x: i32, y: i32) -> PointerPosition {
        PointerPosition::new(x, y)
    }

    #[test]
    fn small_wiggle_is_a_click() {
        let mut gesture = IconGesture::default();
        gesture.pointer_down(AppId::new("terminal"), at(100, 100));
        gesture.pointer_move(at(110, 92));
        assert!(!gesture.is_dragging());
        assert_eq!(
            gesture.pointer_up(at(105, 105)),
            GestureOutcome::Click(AppId::new("terminal"))
        );
        assert_eq!(gesture, IconGesture::Idle);
    }

    #[test]
    fn crossing_the_threshold_on_one_axis_starts_a_drag() {
        let mut gesture = IconGesture::default();
        gesture.pointer_down(AppId::new("terminal"), at(100, 100));
        gesture.pointer_move(at(100, 111));
        assert!(gesture.is_dragging());
        assert_eq!(
            gesture.drag_offset(),
            Some((&AppId::new("terminal"), 0, 11))
        );
    }

    #[test]
    fn drag_stays_a_drag_after_returning_near_origin() {
        let mut gesture = IconGesture::default();
        gesture.pointer_down(AppId::new("paint"), at(0, 0));
        gesture.pointer_move(at(40, 0));
        gesture.pointer_move(at(2, 1));
        assert_eq!(
            gesture.pointer_up(at(2, 1)),
            GestureOutcome::Drop {
                app_id: AppId::new("paint"),
                release: at(2, 1)
            }
        );
    }

    #[test]
    fn release_far_away_without_moves_is_still_a_drop() {
        let mut gesture = IconGesture::default();
        gesture.pointer_down(AppId::new("paint"), at(0, 0));
        assert!(matches!(
            gesture.pointer_up(at(-50, 0)),
            GestureOutcome::Drop { .. }
        ));
    }

    #[test]
    fn release_without_press_is_ignored() {
        let mut gesture = IconGesture::default();
        gesture.pointer_move(at(500, 500));
        assert_eq!(gesture.pointer_up(at(500, 500)), GestureOutcome::Ignored);
    }

    #[test]
    fn extreme_pointer_coordinates_saturate_instead_of_overflowing() {
        assert_eq!(at(i32::MAX, 0).delta_from(at(-1, 0)), (i32::MAX, 0));
        assert_eq!(at(i32::MIN, 5).delta_from(at(1, 0)), (i32::MIN, 5));

        let mut gesture = IconGesture::default();
        gesture.pointer_down(AppId::new("paint"), at(i32::MAX, i32::MIN));
        gesture.pointer_move(at(i32::MIN, i32::MAX));
        assert_eq!(
            gesture.drag_offset(),
            Some((&AppId::new("paint"), i32::MIN, i32::MAX))
        );
        assert!(matches!(
            gesture.pointer_up(at(i32::MIN, i32::MAX)),
            GestureOutcome::Drop { .. }
        ));
    }
}
