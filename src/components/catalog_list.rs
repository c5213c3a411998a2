use crossterm::event::KeyCode;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use tui_dispatch::{DataResource, EventKind};
use tui_dispatch_components::{
    BaseStyle, Padding, SelectList, SelectListBehavior, SelectListProps, SelectListStyle,
    SelectionStyle,
};

use super::{
    Component, ACCENT_GOLD, ACCENT_RED, ACCENT_TEAL, BG_HIGHLIGHT, BG_PANEL, TEXT_DIM, TEXT_MAIN,
};
use crate::action::Action;
use crate::view::ListTile;

pub const EMPTY_CATALOG_MESSAGE: &str = "Unable to load Pokémon. Please try again later.";

/// The list panel: one tile per catalog entry
pub struct CatalogList {
    list: SelectList,
}

pub struct CatalogListProps<'a> {
    pub tiles: &'a DataResource<Vec<ListTile>>,
    pub selected: usize,
    pub is_focused: bool,
}

impl Default for CatalogList {
    fn default() -> Self {
        Self {
            list: SelectList::new(),
        }
    }
}

impl CatalogList {
    pub fn new() -> Self {
        Self::default()
    }
}

/// `#   1  bulbasaur  https://...` for entries, the error message for failures.
pub fn tile_line(tile: &ListTile) -> Line<'static> {
    match tile {
        ListTile::Entry {
            name,
            number,
            thumbnail,
        } => Line::from(vec![
            Span::styled(format!("#{number:>4}  "), Style::default().fg(ACCENT_GOLD)),
            Span::styled(
                name.clone(),
                Style::default().fg(TEXT_MAIN).add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::styled(
                thumbnail.clone().unwrap_or_default(),
                Style::default().fg(TEXT_DIM),
            ),
        ]),
        ListTile::Error { message, .. } => Line::from(vec![
            Span::styled("    !  ", Style::default().fg(ACCENT_RED)),
            Span::styled(message.clone(), Style::default().fg(ACCENT_RED)),
        ]),
    }
}

fn list_style() -> SelectListStyle {
    SelectListStyle {
        base: BaseStyle {
            border: None,
            padding: Padding::xy(1, 0),
            bg: None,
            fg: Some(TEXT_MAIN),
        },
        selection: SelectionStyle {
            style: Some(
                Style::default()
                    .bg(BG_HIGHLIGHT)
                    .fg(TEXT_MAIN)
                    .add_modifier(Modifier::BOLD),
            ),
            marker: None,
            disabled: false,
        },
        ..SelectListStyle::default()
    }
}

impl Component<Action> for CatalogList {
    type Props<'a> = CatalogListProps<'a>;

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

        let tiles = props.tiles.data().map(Vec::as_slice).unwrap_or(&[]);
        match key.code {
            KeyCode::Char('q') => vec![Action::Quit],
            KeyCode::Char('/') => vec![Action::SearchFocus],
            KeyCode::Enter => match tiles.get(props.selected) {
                Some(tile) if !tile.is_error() => vec![Action::EntryOpen(props.selected)],
                _ => Vec::new(),
            },
            _ if tiles.is_empty() => Vec::new(),
            _ => {
                let items: Vec<Line<'static>> = tiles.iter().map(tile_line).collect();
                let list_props = SelectListProps {
                    items: &items,
                    count: items.len(),
                    selected: props.selected.min(items.len().saturating_sub(1)),
                    is_focused: true,
                    style: list_style(),
                    behavior: SelectListBehavior {
                        show_scrollbar: true,
                        wrap_navigation: false,
                    },
                    on_select: Action::EntrySelect,
                    render_item: &|item| item.clone(),
                };
                self.list.handle_event(event, list_props).into_iter().collect()
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
            .title("POKEMON")
            .style(Style::default().bg(BG_PANEL).fg(TEXT_MAIN))
            .border_style(border);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let message = match props.tiles {
            DataResource::Empty => Some(String::new()),
            DataResource::Loading => Some("Loading Pokémon...".to_string()),
            DataResource::Failed(error) => Some(error.clone()),
            DataResource::Loaded(tiles) if tiles.is_empty() => {
                Some(EMPTY_CATALOG_MESSAGE.to_string())
            }
            DataResource::Loaded(_) => None,
        };
        if let Some(message) = message {
            let paragraph = Paragraph::new(message)
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true })
                .style(Style::default().fg(TEXT_DIM));
            frame.render_widget(paragraph, inner);
            return;
        }

        let items: Vec<Line<'static>> = props
            .tiles
            .data()
            .map(|tiles| tiles.iter().map(tile_line).collect())
            .unwrap_or_default();
        let list_props = SelectListProps {
            items: &items,
            count: items.len(),
            selected: props.selected.min(items.len().saturating_sub(1)),
            is_focused: props.is_focused,
            style: list_style(),
            behavior: SelectListBehavior {
                show_scrollbar: true,
                wrap_navigation: false,
            },
            on_select: Action::EntrySelect,
            render_item: &|item| item.clone(),
        };
        self.list.render(frame, inner, list_props);
    }
}
