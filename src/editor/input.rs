use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

use crate::engine::Canvas;
use crate::types::Tool;

use super::config::matches_binding;
use super::state::{EditorState, Segment};
use super::ui::Layout;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Continue,
    Redraw,
    Flush,
    Quit,
}

/// Process one terminal event to completion.
///
/// Canvas mutations are committed here in full; redraws they cause are
/// requested through the canvas observers, not the returned action.
pub fn handle_event(state: &mut EditorState, canvas: &mut Canvas, layout: &Layout, event: Event) -> Action {
    match event {
        Event::Key(key) => handle_key(state, canvas, key),
        Event::Mouse(mouse) => handle_mouse(state, canvas, layout, mouse),
        // Treat losing focus like the pointer leaving the canvas.
        Event::FocusLost => {
            state.gesture.end();
            Action::Continue
        }
        Event::Resize(_, _) => Action::Redraw,
        _ => Action::Continue,
    }
}

fn handle_mouse(state: &mut EditorState, canvas: &mut Canvas, layout: &Layout, mouse: MouseEvent) -> Action {
    let cell = layout.resolve_cell(mouse.column, mouse.row);
    let on_canvas = canvas.size().contains(cell);
    let segment = match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) if on_canvas => Some(state.gesture.begin(cell)),
        MouseEventKind::Drag(MouseButton::Left) => state.gesture.extend(cell),
        MouseEventKind::Up(MouseButton::Left) => {
            state.gesture.end();
            None
        }
        _ => None,
    };

    if let Some(Segment { from, to }) = segment {
        canvas.stroke(from, to, state.tool, state.active_color());
    }
    // Leaving the canvas ends the gesture once the in-bounds part of the
    // exit segment is painted.
    if !on_canvas {
        state.gesture.end();
    }
    Action::Continue
}

fn handle_key(state: &mut EditorState, canvas: &mut Canvas, key: KeyEvent) -> Action {
    let bindings = &state.config.key_bindings;

    if matches_binding(&bindings.quit, &key) {
        return Action::Quit;
    }
    if matches_binding(&bindings.flush, &key) {
        return Action::Flush;
    }
    if matches_binding(&bindings.paint_tool, &key) {
        state.tool = Tool::Paint;
        state.status_message = None;
        return Action::Redraw;
    }
    if matches_binding(&bindings.erase_tool, &key) {
        state.tool = Tool::Erase;
        state.status_message = None;
        return Action::Redraw;
    }
    if matches_binding(&bindings.next_color, &key) {
        state.next_color();
        return Action::Redraw;
    }
    if matches_binding(&bindings.prev_color, &key) {
        state.prev_color();
        return Action::Redraw;
    }
    if matches_binding(&bindings.clear, &key) {
        state.gesture.end();
        canvas.clear();
        state.status_message = Some("Canvas cleared".into());
        return Action::Continue;
    }
    if matches_binding(&bindings.end_stroke, &key) {
        state.gesture.end();
        return Action::Continue;
    }
    if let KeyCode::Char(c @ '1'..='9') = key.code {
        if key.modifiers == KeyModifiers::NONE && state.pick_color(c as usize - '0' as usize) {
            return Action::Redraw;
        }
    }

    Action::Continue
}
