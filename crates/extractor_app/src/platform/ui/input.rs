use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use extractor_core::{AppViewModel, Focus, Msg};

use super::frame::ScrollRequest;

#[derive(Debug, Clone, PartialEq)]
pub enum KeyAction {
    Dispatch(Msg),
    Scroll(ScrollRequest),
    Quit,
    Ignore,
}

/// Translates a key press into a form message for the focused control.
pub fn map_key(key: KeyEvent, view: &AppViewModel) -> KeyAction {
    if key.kind == KeyEventKind::Release {
        return KeyAction::Ignore;
    }
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    match key.code {
        KeyCode::Esc => KeyAction::Quit,
        KeyCode::Char('c') if ctrl => KeyAction::Quit,
        KeyCode::Char('s') if ctrl => KeyAction::Dispatch(Msg::SubmitClicked),
        KeyCode::Tab => KeyAction::Dispatch(Msg::FocusNext),
        KeyCode::BackTab => KeyAction::Dispatch(Msg::FocusPrev),
        KeyCode::PageUp => KeyAction::Scroll(ScrollRequest::PageUp),
        KeyCode::PageDown => KeyAction::Scroll(ScrollRequest::PageDown),
        KeyCode::Home if ctrl => KeyAction::Scroll(ScrollRequest::Top),
        KeyCode::End if ctrl => KeyAction::Scroll(ScrollRequest::Bottom),
        KeyCode::Enter => match view.focus {
            Focus::Query => edit_query(view, |text| text.push('\n')),
            Focus::Destination | Focus::Submit => KeyAction::Dispatch(Msg::SubmitClicked),
        },
        KeyCode::Backspace => match view.focus {
            Focus::Query => edit_query(view, |text| {
                text.pop();
            }),
            Focus::Destination => edit_destination(view, |text| {
                text.pop();
            }),
            Focus::Submit => KeyAction::Ignore,
        },
        KeyCode::Char(ch) if !ctrl && !key.modifiers.contains(KeyModifiers::ALT) => {
            match view.focus {
                Focus::Query => edit_query(view, |text| text.push(ch)),
                Focus::Destination => edit_destination(view, |text| text.push(ch)),
                Focus::Submit if ch == ' ' => KeyAction::Dispatch(Msg::SubmitClicked),
                Focus::Submit => KeyAction::Ignore,
            }
        }
        _ => KeyAction::Ignore,
    }
}

fn edit_query(view: &AppViewModel, edit: impl FnOnce(&mut String)) -> KeyAction {
    let mut text = view.query.clone();
    edit(&mut text);
    KeyAction::Dispatch(Msg::QueryChanged(text))
}

fn edit_destination(view: &AppViewModel, edit: impl FnOnce(&mut String)) -> KeyAction {
    let mut text = view.destination.clone();
    edit(&mut text);
    KeyAction::Dispatch(Msg::DestinationChanged(text))
}

#[cfg(test)]
mod tests {
    use extractor_core::{update, FormState};

    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn view_with_focus(focus_steps: usize) -> AppViewModel {
        let mut state = FormState::new();
        for _ in 0..focus_steps {
            state = update(state, Msg::FocusNext).0;
        }
        state.view()
    }

    #[test]
    fn typing_appends_to_the_focused_field() {
        let view = view_with_focus(1);
        assert_eq!(
            map_key(press(KeyCode::Char('h')), &view),
            KeyAction::Dispatch(Msg::DestinationChanged("h".to_string()))
        );
    }

    #[test]
    fn backspace_removes_last_query_char() {
        let view = view_with_focus(0);
        let mut expected = view.query.clone();
        expected.pop();
        assert_eq!(
            map_key(press(KeyCode::Backspace), &view),
            KeyAction::Dispatch(Msg::QueryChanged(expected))
        );
    }

    #[test]
    fn enter_adds_newline_in_query_and_submits_elsewhere() {
        let query_view = view_with_focus(0);
        assert_eq!(
            map_key(press(KeyCode::Enter), &query_view),
            KeyAction::Dispatch(Msg::QueryChanged(format!("{}\n", query_view.query)))
        );
        assert_eq!(
            map_key(press(KeyCode::Enter), &view_with_focus(1)),
            KeyAction::Dispatch(Msg::SubmitClicked)
        );
        assert_eq!(
            map_key(press(KeyCode::Char(' ')), &view_with_focus(2)),
            KeyAction::Dispatch(Msg::SubmitClicked)
        );
    }

    #[test]
    fn control_keys_submit_and_quit() {
        let view = view_with_focus(0);
        assert_eq!(
            map_key(KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL), &view),
            KeyAction::Dispatch(Msg::SubmitClicked)
        );
        assert_eq!(
            map_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL), &view),
            KeyAction::Quit
        );
        assert_eq!(map_key(press(KeyCode::Esc), &view), KeyAction::Quit);
    }

    #[test]
    fn tab_keys_move_focus() {
        let view = view_with_focus(0);
        assert_eq!(
            map_key(press(KeyCode::Tab), &view),
            KeyAction::Dispatch(Msg::FocusNext)
        );
        assert_eq!(
            map_key(press(KeyCode::BackTab), &view),
            KeyAction::Dispatch(Msg::FocusPrev)
        );
    }

    #[test]
    fn page_keys_scroll_without_touching_the_form() {
        let view = view_with_focus(0);
        assert_eq!(
            map_key(press(KeyCode::PageDown), &view),
            KeyAction::Scroll(ScrollRequest::PageDown)
        );
        assert_eq!(
            map_key(press(KeyCode::PageUp), &view),
            KeyAction::Scroll(ScrollRequest::PageUp)
        );
        assert_eq!(
            map_key(KeyEvent::new(KeyCode::End, KeyModifiers::CONTROL), &view),
            KeyAction::Scroll(ScrollRequest::Bottom)
        );
        assert_eq!(map_key(press(KeyCode::Home), &view), KeyAction::Ignore);
    }
}
