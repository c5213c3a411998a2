use crossterm::event::KeyCode;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use tui_dispatch::EventKind;

use super::{Component, ACCENT_GOLD, ACCENT_TEAL, BG_PANEL, TEXT_DIM, TEXT_MAIN};
use crate::action::Action;
use crate::view::{DetailPanel, DetailView, SpriteColumn};

/// Shown in a sprite cell whose image key was missing
pub const NO_IMAGE: &str = "(no image)";
const BACK_LABEL: &str = "< Back!";

/// The detail panel: back control plus whatever detail content is current
#[derive(Default)]
pub struct DetailPanelView;

pub struct DetailPanelProps<'a> {
    pub detail: Option<&'a DetailView>,
    pub pending: Option<&'a str>,
    pub is_focused: bool,
}

impl Component<Action> for DetailPanelView {
    type Props<'a> = DetailPanelProps<'a>;

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
                KeyCode::Esc | KeyCode::Backspace | KeyCode::Char('b') => {
                    Some(Action::DetailBack)
                }
                KeyCode::Char('/') => Some(Action::SearchFocus),
                KeyCode::Char('q') => Some(Action::Quit),
                _ => None,
            },
            _ => None,
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
            .title("DETAIL")
            .style(Style::default().bg(BG_PANEL).fg(TEXT_MAIN))
            .border_style(border);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Min(1)])
            .split(inner);

        let back = Paragraph::new(Span::styled(
            BACK_LABEL,
            Style::default()
                .fg(ACCENT_GOLD)
                .add_modifier(Modifier::BOLD),
        ));
        frame.render_widget(back, layout[0]);

        match props.detail {
            Some(DetailView::Ready(panel)) => render_panel(frame, layout[1], panel),
            Some(DetailView::Unavailable { message }) => {
                render_message(frame, layout[1], message)
            }
            None => {
                if let Some(name) = props.pending {
                    render_message(frame, layout[1], &format!("Loading {name}..."));
                }
            }
        }
    }
}

fn render_message(frame: &mut Frame, area: Rect, message: &str) {
    let paragraph = Paragraph::new(message.to_string())
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .style(Style::default().fg(TEXT_DIM));
    frame.render_widget(paragraph, area);
}

fn render_panel(frame: &mut Frame, area: Rect, panel: &DetailPanel) {
    let top_height = panel.stats.len().max(panel.categories.len()) as u16 + 2;
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(top_height),
            Constraint::Min(4),
        ])
        .split(area);

    let title = Line::from(vec![
        Span::styled(
            format!("#{} ", panel.number),
            Style::default().fg(ACCENT_GOLD),
        ),
        Span::styled(
            panel.name.clone(),
            Style::default()
                .fg(ACCENT_TEAL)
                .add_modifier(Modifier::BOLD),
        ),
    ]);
    frame.render_widget(Paragraph::new(title), layout[0]);

    let top = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(layout[1]);

    let stats: Vec<Line> = panel
        .stats
        .iter()
        .map(|stat| Line::from(stat.label()))
        .collect();
    frame.render_widget(
        Paragraph::new(Text::from(stats)).block(
            Block::default()
                .borders(Borders::ALL)
                .title("STATS")
                .style(Style::default().fg(TEXT_MAIN)),
        ),
        top[0],
    );

    let categories: Vec<Line> = panel
        .categories
        .iter()
        .map(|name| Line::from(name.clone()))
        .collect();
    frame.render_widget(
        Paragraph::new(Text::from(categories)).block(
            Block::default()
                .borders(Borders::ALL)
                .title("TYPES")
                .style(Style::default().fg(TEXT_MAIN)),
        ),
        top[1],
    );

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(vec![
            Constraint::Ratio(1, panel.sprites.len().max(1) as u32);
            panel.sprites.len()
        ])
        .split(layout[2]);
    for (column, column_area) in panel.sprites.iter().zip(columns.iter()) {
        render_sprite_column(frame, *column_area, column);
    }
}

fn render_sprite_column(frame: &mut Frame, area: Rect, column: &SpriteColumn) {
    let lines: Vec<Line> = column
        .cells
        .iter()
        .flat_map(|cell| {
            let url = match &cell.url {
                Some(url) => Span::styled(url.clone(), Style::default().fg(TEXT_MAIN)),
                None => Span::styled(NO_IMAGE, Style::default().fg(TEXT_DIM)),
            };
            [
                Line::from(Span::styled(
                    cell.variant.clone(),
                    Style::default().fg(ACCENT_GOLD),
                )),
                Line::from(url),
            ]
        })
        .collect();
    frame.render_widget(
        Paragraph::new(Text::from(lines))
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(column.pov.to_ascii_uppercase())
                    .style(Style::default().fg(TEXT_MAIN)),
            ),
        area,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::{SpriteCell, StatLine};
    use crossterm::event::{KeyEvent, KeyModifiers};
    use tui_dispatch::testing::*;

    fn ready() -> DetailView {
        DetailView::Ready(DetailPanel {
            name: "bulbasaur".into(),
            number: 1,
            stats: vec![
                StatLine {
                    name: "hp".into(),
                    value: 45,
                },
                StatLine {
                    name: "attack".into(),
                    value: 49,
                },
            ],
            categories: vec!["grass".into(), "poison".into()],
            sprites: vec![
                SpriteColumn {
                    pov: "front".into(),
                    cells: vec![
                        SpriteCell {
                            variant: "default".into(),
                            key: "front_default".into(),
                            url: Some("url1".into()),
                        },
                        SpriteCell {
                            variant: "shiny".into(),
                            key: "front_shiny".into(),
                            url: None,
                        },
                    ],
                },
                SpriteColumn {
                    pov: "back".into(),
                    cells: Vec::new(),
                },
            ],
        })
    }

    #[test]
    fn test_back_keys() {
        let mut panel = DetailPanelView;
        for code in [KeyCode::Esc, KeyCode::Backspace, KeyCode::Char('b')] {
            let props = DetailPanelProps {
                detail: None,
                pending: None,
                is_focused: true,
            };
            let event = EventKind::Key(KeyEvent::new(code, KeyModifiers::NONE));

            let actions: Vec<_> = panel.handle_event(&event, props).into_iter().collect();

            actions.assert_count(1);
            actions.assert_first(Action::DetailBack);
        }
    }

    #[test]
    fn test_unfocused_ignores() {
        let mut panel = DetailPanelView;
        let props = DetailPanelProps {
            detail: None,
            pending: None,
            is_focused: false,
        };

        let actions: Vec<_> = panel
            .handle_event(&EventKind::Key(key("b")), props)
            .into_iter()
            .collect();

        actions.assert_empty();
    }

    #[test]
    fn test_render_ready_panel() {
        let mut render = RenderHarness::new(80, 24);
        let mut panel = DetailPanelView;
        let detail = ready();

        let output = render.render_to_string_plain(|frame| {
            let props = DetailPanelProps {
                detail: Some(&detail),
                pending: None,
                is_focused: true,
            };
            panel.render(frame, frame.area(), props);
        });

        assert!(output.contains(BACK_LABEL));
        assert!(output.contains("bulbasaur"));
        assert!(output.contains("hp: 45"));
        assert!(output.contains("attack: 49"));
        assert!(output.contains("grass"));
        assert!(output.contains("url1"));
        assert!(output.contains(NO_IMAGE));
    }

    #[test]
    fn test_render_placeholder() {
        let mut render = RenderHarness::new(60, 12);
        let mut panel = DetailPanelView;
        let detail = DetailView::unavailable();

        let output = render.render_to_string_plain(|frame| {
            let props = DetailPanelProps {
                detail: Some(&detail),
                pending: None,
                is_focused: true,
            };
            panel.render(frame, frame.area(), props);
        });

        assert!(output.contains("Unable to display Pokemon details."));
        assert!(!output.contains("hp:"));
    }
}
