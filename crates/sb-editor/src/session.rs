//! Drawing session: the press → move* → release state machine.
//!
//! A gesture owns the snapshot taken at press time. Releasing drops the
//! gesture and with it the snapshot, so at most one snapshot is alive.

use crate::render::{Frame, StrokeRenderer};
use sb_core::{Point, Style, Surface};

/// One in-progress gesture.
#[derive(Debug)]
pub struct Gesture<T> {
    anchor: Point,
    cursor: Point,
    snapshot: T,
}

impl<T> Gesture<T> {
    /// Fixed for the whole gesture.
    pub fn anchor(&self) -> Point {
        self.anchor
    }

    /// Last pointer position seen in this gesture.
    pub fn cursor(&self) -> Point {
        self.cursor
    }

    pub fn snapshot(&self) -> &T {
        &self.snapshot
    }
}

#[derive(Debug)]
enum SessionState<T> {
    Idle,
    Active(Gesture<T>),
}

#[derive(Debug)]
pub struct DrawingSession<T> {
    state: SessionState<T>,
}

impl<T> Default for DrawingSession<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> DrawingSession<T> {
    pub fn new() -> Self {
        Self {
            state: SessionState::Idle,
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self.state, SessionState::Active(_))
    }

    pub fn gesture(&self) -> Option<&Gesture<T>> {
        match &self.state {
            SessionState::Active(gesture) => Some(gesture),
            SessionState::Idle => None,
        }
    }

    /// Start a gesture at `at`: snapshot the surface and load `style`.
    ///
    /// A press while a gesture is already active first ends that gesture,
    /// keeping whatever it drew, then starts the new one.
    /// Returns `false` if the surface could not be captured; the session
    /// stays idle.
    pub fn press<S>(
        &mut self,
        surface: &mut S,
        renderer: &StrokeRenderer,
        style: &Style,
        at: Point,
    ) -> bool
    where
        S: Surface<Snapshot = T>,
    {
        if self.is_active() {
            log::debug!("press while drawing; ending previous gesture");
            self.release();
        }

        let snapshot = match surface.capture() {
            Ok(snapshot) => snapshot,
            Err(e) => {
                log::warn!("cannot start gesture: {e}");
                return false;
            }
        };

        renderer.apply_style(surface, style);
        surface.begin_path();
        surface.move_to(at);

        log::debug!("gesture start: {} at ({}, {})", style.tool, at.x, at.y);
        self.state = SessionState::Active(Gesture {
            anchor: at,
            cursor: at,
            snapshot,
        });
        true
    }

    /// Render the next frame of the active gesture. No-op while idle.
    pub fn pointer_move<S>(
        &mut self,
        surface: &mut S,
        renderer: &StrokeRenderer,
        style: &Style,
        at: Point,
    ) -> bool
    where
        S: Surface<Snapshot = T>,
    {
        let SessionState::Active(gesture) = &mut self.state else {
            return false;
        };
        let frame = Frame {
            snapshot: &gesture.snapshot,
            anchor: gesture.anchor,
            previous: gesture.cursor,
            current: at,
        };
        renderer.render(surface, &frame, style);
        gesture.cursor = at;
        true
    }

    /// End the active gesture, dropping its snapshot. No-op while idle.
    pub fn release(&mut self) -> bool {
        match std::mem::replace(&mut self.state, SessionState::Idle) {
            SessionState::Active(gesture) => {
                log::debug!(
                    "gesture end: anchor ({}, {}), last ({}, {})",
                    gesture.anchor.x,
                    gesture.anchor.y,
                    gesture.cursor.x,
                    gesture.cursor.y
                );
                true
            }
            SessionState::Idle => false,
        }
    }
}
