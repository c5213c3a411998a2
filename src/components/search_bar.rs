use crossterm::event::KeyCode;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use tui_dispatch::EventKind;
use tui_dispatch_components::{BaseStyle, Padding, TextInput, TextInputProps, TextInputStyle};

use super::{Component, ACCENT_GOLD, ACCENT_TEAL, BG_PANEL, TEXT_DIM, TEXT_MAIN};
use crate::action::Action;

pub const SEARCH_BUTTON: &str = "[ Search ]";
const INPUT_PLACEHOLDER: &str = "Pokemon name";

/// Search input plus the button label
pub struct SearchBar {
    input: TextInput,
}

pub struct SearchBarProps<'a> {
    pub query: &'a str,
    pub is_focused: bool,
    pub on_change: fn(String) -> Action,
    pub on_submit: fn(String) -> Action,
}

impl Default for SearchBar {
    fn default() -> Self {
        Self {
            input: TextInput::new(),
        }
    }
}

impl SearchBar {
    pub fn new() -> Self {
        Self::default()
    }
}

fn input_style() -> TextInputStyle {
    TextInputStyle {
        base: BaseStyle {
            border: None,
            padding: Padding::xy(1, 0),
            bg: None,
            fg: Some(TEXT_MAIN),
        },
        placeholder_style: Some(Style::default().fg(TEXT_DIM)),
        cursor_style: None,
    }
}

impl Component<Action> for SearchBar {
    type Props<'a> = SearchBarProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused {
            return Vec::new();
        }

        let EventKind::Key(key) = event else {
            return Vec::new();
        };

        match key.code {
            KeyCode::Esc => vec![Action::SearchBlur],
            KeyCode::Enter => vec![(props.on_submit)(props.query.to_string())],
            _ => {
                let input_props = TextInputProps {
                    value: props.query,
                    placeholder: INPUT_PLACEHOLDER,
                    is_focused: props.is_focused,
                    style: input_style(),
                    on_change: props.on_change,
                    on_submit: props.on_submit,
                    on_cursor_move: Some(|_| Action::Render),
                };
                self.input
                    .handle_event(event, input_props)
                    .into_iter()
                    .collect()
            }
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let border = if props.is_focused {
            Style::default().fg(ACCENT_TEAL)
        } else {
            Style::default().fg(TEXT_DIM)
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .title("SEARCH")
            .style(Style::default().bg(BG_PANEL).fg(TEXT_MAIN))
            .border_style(border);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Min(10),
                Constraint::Length(SEARCH_BUTTON.len() as u16 + 2),
            ])
            .split(inner);

        let input_props = TextInputProps {
            value: props.query,
            placeholder: INPUT_PLACEHOLDER,
            is_focused: props.is_focused,
            style: input_style(),
            on_change: props.on_change,
            on_submit: props.on_submit,
            on_cursor_move: Some(|_| Action::Render),
        };
        self.input.render(frame, chunks[0], input_props);

        let button = Paragraph::new(SEARCH_BUTTON)
            .alignment(Alignment::Center)
            .style(
                Style::default()
                    .fg(ACCENT_GOLD)
                    .add_modifier(Modifier::BOLD),
            );
        frame.render_widget(button, chunks[1]);
    }
}
