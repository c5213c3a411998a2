use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::Span,
    widgets::{Block, Borders},
    Frame,
};
use tui_dispatch::EventKind;
use tui_dispatch_components::style::BorderStyle;
use tui_dispatch_components::{
    BaseStyle, Padding, StatusBar, StatusBarHint, StatusBarItem, StatusBarProps,
    StatusBarSection, StatusBarStyle,
};

use super::{
    AlertDialog, AlertDialogProps, CatalogList, CatalogListProps, Component, DetailPanelProps,
    DetailPanelView, SearchBar, SearchBarProps, ACCENT_GOLD, ACCENT_TEAL, BG_BASE, BG_PANEL,
    TEXT_DIM, TEXT_MAIN,
};
use crate::action::Action;
use crate::state::{AppState, ViewState};

/// Which part of the screen receives keys
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Focus {
    Alert,
    Search,
    List,
    Detail,
}

impl Focus {
    pub fn of(state: &AppState) -> Self {
        if state.alert_open() {
            Focus::Alert
        } else if state.search_focused {
            Focus::Search
        } else {
            match state.view {
                ViewState::List => Focus::List,
                ViewState::Detail => Focus::Detail,
            }
        }
    }
}

/// Screen regions: search bar on top, one panel, status bar
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScreenLayout {
    pub search: Rect,
    pub body: Rect,
    pub status: Rect,
}

impl ScreenLayout {
    pub fn split(area: Rect) -> Self {
        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(5),
                Constraint::Length(3),
            ])
            .split(area);
        Self {
            search: layout[0],
            body: layout[1],
            status: layout[2],
        }
    }
}

/// The whole catalog screen
pub struct CatalogScreen {
    search: SearchBar,
    list: CatalogList,
    detail: DetailPanelView,
    alert: AlertDialog,
    status_bar: StatusBar,
}

pub struct CatalogScreenProps<'a> {
    pub state: &'a AppState,
    pub is_focused: bool,
}

impl Default for CatalogScreen {
    fn default() -> Self {
        Self {
            search: SearchBar::new(),
            list: CatalogList::new(),
            detail: DetailPanelView,
            alert: AlertDialog::new(),
            status_bar: StatusBar::new(),
        }
    }
}

impl CatalogScreen {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle_search_event(&mut self, event: &EventKind, state: &AppState) -> Vec<Action> {
        let props = SearchBarProps {
            query: &state.search_query,
            is_focused: true,
            on_change: Action::SearchQueryChange,
            on_submit: Action::SearchSubmit,
        };
        self.search.handle_event(event, props).into_iter().collect()
    }

    pub fn handle_list_event(&mut self, event: &EventKind, state: &AppState) -> Vec<Action> {
        let props = CatalogListProps {
            tiles: &state.tiles,
            selected: state.selected,
            is_focused: true,
        };
        self.list.handle_event(event, props).into_iter().collect()
    }

    pub fn handle_detail_event(&mut self, event: &EventKind, state: &AppState) -> Vec<Action> {
        let props = DetailPanelProps {
            detail: state.detail.as_ref(),
            pending: state.pending.as_deref(),
            is_focused: true,
        };
        self.detail.handle_event(event, props).into_iter().collect()
    }

    pub fn handle_alert_event(&mut self, event: &EventKind, state: &AppState) -> Vec<Action> {
        let Some(message) = state.alert.as_deref() else {
            return Vec::new();
        };
        let props = AlertDialogProps {
            message,
            is_focused: true,
        };
        self.alert.handle_event(event, props).into_iter().collect()
    }

    fn render_status(&mut self, frame: &mut Frame, area: Rect, state: &AppState) {
        let status = match (&state.pending, state.tiles.is_loading()) {
            (Some(name), _) => format!("Loading {name}..."),
            (None, true) => "Loading Pokémon...".to_string(),
            (None, false) => format!("{} cached", state.cache.len()),
        };
        let status_span = Span::styled(status.as_str(), Style::default().fg(ACCENT_GOLD));
        let status_items = [StatusBarItem::span(status_span)];
        let hints = status_hints(Focus::of(state));

        let style = StatusBarStyle {
            base: BaseStyle {
                border: Some(BorderStyle {
                    borders: Borders::ALL,
                    style: Style::default().fg(TEXT_DIM),
                    focused_style: Some(Style::default().fg(ACCENT_TEAL)),
                }),
                padding: Padding::xy(1, 0),
                bg: Some(BG_PANEL),
                fg: Some(TEXT_MAIN),
            },
            text: Style::default().fg(TEXT_DIM),
            hint_key: Style::default()
                .fg(ACCENT_TEAL)
                .add_modifier(Modifier::BOLD),
            hint_label: Style::default().fg(TEXT_DIM),
            separator: Style::default().fg(TEXT_DIM),
        };

        let props = StatusBarProps {
            left: StatusBarSection::hints(&hints).with_separator("  "),
            center: StatusBarSection::empty(),
            right: StatusBarSection::items(&status_items).with_separator("  "),
            style,
            is_focused: false,
        };
        Component::<Action>::render(&mut self.status_bar, frame, area, props);
    }
}

fn status_hints(focus: Focus) -> Vec<StatusBarHint<'static>> {
    match focus {
        Focus::Alert => vec![StatusBarHint::new("Enter", "OK")],
        Focus::Search => vec![
            StatusBarHint::new("Enter", "Search"),
            StatusBarHint::new("Esc", "Cancel"),
        ],
        Focus::List => vec![
            StatusBarHint::new("Enter", "Open"),
            StatusBarHint::new("/", "Search"),
            StatusBarHint::new("q", "Quit"),
        ],
        Focus::Detail => vec![
            StatusBarHint::new("b", "Back"),
            StatusBarHint::new("/", "Search"),
            StatusBarHint::new("q", "Quit"),
        ],
    }
}

/// Routes keys by [`Focus`]. The binary registers each panel on the event
/// bus and calls the `handle_*_event` methods directly; this entry point is
/// for callers that own the whole screen, such as the store test harness.
impl Component<Action> for CatalogScreen {
    type Props<'a> = CatalogScreenProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused {
            return Vec::new();
        }

        let state = props.state;
        match Focus::of(state) {
            Focus::Alert => self.handle_alert_event(event, state),
            Focus::Search => self.handle_search_event(event, state),
            Focus::List => self.handle_list_event(event, state),
            Focus::Detail => self.handle_detail_event(event, state),
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let state = props.state;
        let focus = Focus::of(state);
        frame.render_widget(Block::default().style(Style::default().bg(BG_BASE)), area);
        let layout = ScreenLayout::split(area);

        self.search.render(
            frame,
            layout.search,
            SearchBarProps {
                query: &state.search_query,
                is_focused: focus == Focus::Search,
                on_change: Action::SearchQueryChange,
                on_submit: Action::SearchSubmit,
            },
        );

        // Exactly one panel is drawn
        match state.view {
            ViewState::List => self.list.render(
                frame,
                layout.body,
                CatalogListProps {
                    tiles: &state.tiles,
                    selected: state.selected,
                    is_focused: focus == Focus::List,
                },
            ),
            ViewState::Detail => self.detail.render(
                frame,
                layout.body,
                DetailPanelProps {
                    detail: state.detail.as_ref(),
                    pending: state.pending.as_deref(),
                    is_focused: focus == Focus::Detail,
                },
            ),
        }

        self.render_status(frame, layout.status, state);

        if let Some(message) = state.alert.as_deref() {
            self.alert.render(
                frame,
                area,
                AlertDialogProps {
                    message,
                    is_focused: focus == Focus::Alert,
                },
            );
        }
    }
}
