use crossterm::event::KeyCode;
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::Span,
    widgets::{Paragraph, Wrap},
    Frame,
};
use tui_dispatch::EventKind;
use tui_dispatch_components::{
    centered_rect, BaseStyle, Modal, ModalBehavior, ModalProps, ModalStyle, Padding,
};

use super::{Component, ACCENT_GOLD, BG_PANEL, TEXT_MAIN};
use crate::action::Action;

const DISMISS_LABEL: &str = "[ OK ]";

/// Modal alert; blocks every other component until dismissed
pub struct AlertDialog {
    modal: Modal,
}

pub struct AlertDialogProps<'a> {
    pub message: &'a str,
    pub is_focused: bool,
}

impl Default for AlertDialog {
    fn default() -> Self {
        Self {
            modal: Modal::new(),
        }
    }
}

impl AlertDialog {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Component<Action> for AlertDialog {
    type Props<'a> = AlertDialogProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused {
            return None;
        }

        match event {
            EventKind::Key(key) => match key.code {
                KeyCode::Enter | KeyCode::Esc => Some(Action::AlertDismiss),
                _ => None,
            },
            _ => None,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let width = (props.message.chars().count() as u16 + 8)
            .max(24)
            .min(area.width);
        let modal_area = centered_rect(width, 7, area);

        let mut render_content = |frame: &mut Frame, content_area: Rect| {
            let chunks = Layout::vertical([
                Constraint::Min(1),    // Message
                Constraint::Length(1), // Dismiss
            ])
            .split(content_area);

            let message = Paragraph::new(props.message.to_string())
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true })
                .style(Style::default().fg(TEXT_MAIN));
            frame.render_widget(message, chunks[0]);

            let dismiss = Paragraph::new(Span::styled(
                DISMISS_LABEL,
                Style::default()
                    .fg(ACCENT_GOLD)
                    .add_modifier(Modifier::BOLD),
            ))
            .alignment(Alignment::Center);
            frame.render_widget(dismiss, chunks[1]);
        };

        self.modal.render(
            frame,
            area,
            ModalProps {
                is_open: true,
                is_focused: props.is_focused,
                area: modal_area,
                style: ModalStyle {
                    base: BaseStyle {
                        bg: Some(BG_PANEL),
                        padding: Padding::all(1),
                        border: None,
                        fg: None,
                    },
                    ..Default::default()
                },
                behavior: ModalBehavior::default(),
                on_close: || Action::AlertDismiss,
                render_content: &mut render_content,
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::ALERT_EMPTY_INPUT;
    use crossterm::event::{KeyEvent, KeyModifiers};
    use tui_dispatch::testing::*;

    #[test]
    fn test_enter_and_esc_dismiss() {
        let mut dialog = AlertDialog::new();
        for code in [KeyCode::Enter, KeyCode::Esc] {
            let props = AlertDialogProps {
                message: ALERT_EMPTY_INPUT,
                is_focused: true,
            };
            let event = EventKind::Key(KeyEvent::new(code, KeyModifiers::NONE));

            let actions: Vec<_> = dialog.handle_event(&event, props).into_iter().collect();

            actions.assert_first(Action::AlertDismiss);
        }
    }

    #[test]
    fn test_other_keys_ignored() {
        let mut dialog = AlertDialog::new();
        let props = AlertDialogProps {
            message: ALERT_EMPTY_INPUT,
            is_focused: true,
        };

        let actions: Vec<_> = dialog
            .handle_event(&EventKind::Key(key("q")), props)
            .into_iter()
            .collect();

        actions.assert_empty();
    }

    #[test]
    fn test_render_message() {
        let mut render = RenderHarness::new(60, 20);
        let mut dialog = AlertDialog::new();

        let output = render.render_to_string_plain(|frame| {
            let props = AlertDialogProps {
                message: ALERT_EMPTY_INPUT,
                is_focused: true,
            };
            dialog.render(frame, frame.area(), props);
        });

        assert!(output.contains(ALERT_EMPTY_INPUT));
        assert!(output.contains(DISMISS_LABEL));
    }
}
