use eframe::egui::{self, Context, Key, Pos2, Response, Vec2};

use crate::geom::{clip_to_wedge, Point, Segment};

/// Discrete input for one frame, in the order it arrived.
#[derive(Debug, Copy, Clone, PartialEq)]
pub(crate) enum InputEvent {
    /// Gesture start, in pad coordinates.
    PointerDown(Point),
    PointerMove(Point),
    PointerUp,
    Reset,
    ToggleMirror,
    ToggleSpin,
    CycleCount,
    IncreaseCount,
    DecreaseCount,
    Export,
}

pub(crate) fn key_event(key: Key) -> Option<InputEvent> {
    Some(match key {
        Key::Delete | Key::Backspace => InputEvent::Reset,
        Key::M => InputEvent::ToggleMirror,
        Key::R => InputEvent::ToggleSpin,
        Key::Tab => InputEvent::CycleCount,
        Key::ArrowUp | Key::Plus | Key::Equals => InputEvent::IncreaseCount,
        Key::ArrowDown | Key::Minus => InputEvent::DecreaseCount,
        Key::S => InputEvent::Export,
        _ => return None,
    })
}

/// Maps raw key presses to events. Nothing is mapped while a widget has
/// keyboard focus, so a focused slider doesn't also receive a count change.
pub(crate) fn key_events(events: &[egui::Event], focused: bool) -> Vec<InputEvent> {
    if focused {
        return vec![];
    }
    events
        .iter()
        .filter_map(|event| match event {
            egui::Event::Key {
                key,
                pressed: true,
                repeat: false,
                ..
            } => key_event(*key),
            _ => None,
        })
        .collect()
}

/// Collects this frame's events.
///
/// `pad` is the drawing pad's response and `to_pad` maps screen positions
/// into pad units, where the pad circle has radius 1.
pub(crate) fn poll(
    ctx: &Context,
    pad: &Response,
    drawing: bool,
    to_pad: impl Fn(Pos2) -> Point,
) -> Vec<InputEvent> {
    let focused = ctx.memory(|m| m.focused().is_some());
    let mut events = ctx.input(|i| key_events(&i.events, focused));

    let down = pad.is_pointer_button_down_on() && ctx.input(|i| i.pointer.primary_down());
    let moved = ctx.input(|i| i.pointer.delta()) != Vec2::ZERO;
    match (drawing, down, ctx.pointer_latest_pos()) {
        (false, true, Some(pos)) => {
            let point = to_pad(pos);
            // Gestures have to start on the pad
            if point.radius() <= 1. {
                events.push(InputEvent::PointerDown(point));
            }
        }
        (true, true, Some(pos)) if moved => events.push(InputEvent::PointerMove(to_pad(pos))),
        (true, false, _) => events.push(InputEvent::PointerUp),
        _ => (),
    }
    events
}

/// Turns a drag gesture into segments inside the base wedge.
#[derive(Debug, Default)]
pub(crate) struct StrokeCapture {
    last: Option<Point>,
}
impl StrokeCapture {
    pub fn is_active(&self) -> bool {
        self.last.is_some()
    }

    pub fn begin(&mut self, point: Point, arc: f64) {
        self.last = Some(clip_to_wedge(point, arc));
    }

    /// Returns the segment from the previous point, if the pointer moved.
    pub fn extend(&mut self, point: Point, arc: f64) -> Option<Segment> {
        let start = self.last?;
        let end = clip_to_wedge(point, arc);
        if end == start {
            return None;
        }
        self.last = Some(end);
        Some(Segment::new(start, end))
    }

    pub fn end(&mut self) {
        self.last = None;
    }
}
