//! Draggable HUD panel state.

use strum::{Display, IntoStaticStr};
use tracing::trace;

use super::{Point, Rect};

pub const PANEL_WIDTH: i32 = 240;
pub const PANEL_HEIGHT: i32 = 72;
pub const DEFAULT_PANEL_ORIGIN: Point = Point::new(100, 400);

/// Drag gesture state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, IntoStaticStr)]
pub enum DragState {
    #[default]
    Idle,
    /// `grab_offset` is the pointer position relative to the panel's top-left
    /// at the moment the button went down
    Dragging { grab_offset: Point },
}

/// Pointer input relevant to dragging, in window client coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerEvent {
    Down(Point),
    Move { at: Point, primary_held: bool },
    Up(Point),
}

/// Position and drag state of the panel.
///
/// Lives as long as the overlay and is only changed by pointer input. The
/// position is not clamped to the screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelState {
    top_left: Point,
    drag: DragState,
}

impl Default for PanelState {
    fn default() -> Self {
        Self::new(DEFAULT_PANEL_ORIGIN)
    }
}

impl PanelState {
    pub fn new(top_left: Point) -> Self {
        Self {
            top_left,
            drag: DragState::Idle,
        }
    }

    pub fn top_left(&self) -> Point {
        self.top_left
    }

    pub fn bounds(&self) -> Rect {
        Rect::at(self.top_left, PANEL_WIDTH, PANEL_HEIGHT)
    }

    pub fn drag_state(&self) -> DragState {
        self.drag
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.drag, DragState::Dragging { .. })
    }

    /// Feed one pointer event through the drag state machine.
    ///
    /// Returns `true` if the event changed the state.
    pub fn handle(&mut self, event: PointerEvent) -> bool {
        let before = (self.top_left, self.drag);

        match (self.drag, event) {
            // A press inside the panel always re-grabs, even if the release
            // that should have ended the last drag never arrived.
            (_, PointerEvent::Down(at)) if self.bounds().contains(at) => {
                self.drag = DragState::Dragging {
                    grab_offset: at - self.top_left,
                };
            }
            (
                DragState::Dragging { grab_offset },
                PointerEvent::Move {
                    at,
                    primary_held: true,
                },
            ) => {
                self.top_left = at - grab_offset;
            }
            (_, PointerEvent::Up(_)) => {
                self.drag = DragState::Idle;
            }
            _ => {}
        }

        let changed = before != (self.top_left, self.drag);
        if changed {
            trace!(
                "Panel {} at ({}, {})",
                <&'static str>::from(self.drag),
                self.top_left.x,
                self.top_left.y
            );
        }
        changed
    }
}
