//! Pokemon catalog TUI

use std::cell::RefCell;
use std::io;
use std::path::PathBuf;
use std::rc::Rc;
use std::sync::Arc;

use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, layout::Rect, Frame, Terminal};
use tui_dispatch::{
    EffectContext, EffectStoreLike, EffectStoreWithMiddleware, EventBus, EventContext, EventKind,
    EventRoutingState, HandlerResponse, Keybindings, RenderContext, TaskKey,
};
use tui_dispatch_debug::debug::DebugLayer;
use tui_dispatch_debug::{
    DebugCliArgs, DebugRunOutput, DebugSession, DebugSessionError, ReplayItem,
};

use pokecatalog::action::Action;
use pokecatalog::api::{HttpApi, API_BASE};
use pokecatalog::cache::EntryCache;
use pokecatalog::components::{
    CatalogScreen, CatalogScreenProps, Component, Focus, ScreenLayout,
};
use pokecatalog::effect::Effect;
use pokecatalog::fetcher::Fetcher;
use pokecatalog::logging;
use pokecatalog::reducer::reducer;
use pokecatalog::state::{AppState, ViewState};

/// Pokemon catalog TUI backed by PokeAPI
#[derive(Parser, Debug)]
#[command(name = "pokecatalog")]
#[command(about = "Browse and search the PokeAPI catalog")]
struct Args {
    /// Upstream API base URL
    #[arg(long, env = "POKEAPI_BASE_URL", default_value = API_BASE)]
    api_base: String,

    /// Directory for log files
    #[arg(long)]
    log_dir: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error); RUST_LOG overrides
    #[arg(long, default_value = "info")]
    log_level: String,

    #[command(flatten)]
    debug: DebugCliArgs,
}

#[derive(tui_dispatch::ComponentId, Clone, Copy, PartialEq, Eq, Hash, Debug)]
enum CatalogComponentId {
    Search,
    List,
    Detail,
    Alert,
}

#[derive(tui_dispatch::BindingContext, Clone, Copy, PartialEq, Eq, Hash)]
enum CatalogContext {
    Search,
    List,
    Detail,
    Alert,
}

impl From<Focus> for CatalogComponentId {
    fn from(focus: Focus) -> Self {
        match focus {
            Focus::Alert => CatalogComponentId::Alert,
            Focus::Search => CatalogComponentId::Search,
            Focus::List => CatalogComponentId::List,
            Focus::Detail => CatalogComponentId::Detail,
        }
    }
}

impl EventRoutingState<CatalogComponentId, CatalogContext> for AppState {
    fn focused(&self) -> Option<CatalogComponentId> {
        Some(Focus::of(self).into())
    }

    fn modal(&self) -> Option<CatalogComponentId> {
        if self.alert_open() {
            Some(CatalogComponentId::Alert)
        } else {
            None
        }
    }

    fn binding_context(&self, id: CatalogComponentId) -> CatalogContext {
        match id {
            CatalogComponentId::Search => CatalogContext::Search,
            CatalogComponentId::List => CatalogContext::List,
            CatalogComponentId::Detail => CatalogContext::Detail,
            CatalogComponentId::Alert => CatalogContext::Alert,
        }
    }

    fn default_context(&self) -> CatalogContext {
        CatalogContext::List
    }
}

#[tokio::main]
async fn main() -> io::Result<()> {
    let Args {
        api_base,
        log_dir,
        log_level,
        debug: debug_args,
    } = Args::parse();

    let log_dir = log_dir.unwrap_or_else(logging::default_log_dir);
    let _log_guard = logging::init(&log_dir, &log_level)?;

    let fetcher = Arc::new(Fetcher::new(HttpApi::new(api_base)));
    tracing::info!(base = fetcher.api().base_url(), "starting pokecatalog");

    let debug = DebugSession::new(debug_args);

    debug.save_state_schema::<AppState>().map_err(debug_error)?;
    debug.save_actions_schema::<Action>().map_err(debug_error)?;

    let state = debug
        .load_state_or_else_async(|| async { Ok::<AppState, io::Error>(AppState::new()) })
        .await
        .map_err(debug_error)?;
    let replay_actions = debug.load_replay_items().map_err(debug_error)?;
    let (middleware, recorder) = debug.middleware_with_recorder();
    let store = EffectStoreWithMiddleware::new(state, reducer, middleware);

    // ===== Terminal setup =====
    let use_alt_screen = debug.use_alt_screen();
    let mut stdout = io::stdout();
    if use_alt_screen {
        enable_raw_mode()?;
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &debug, store, replay_actions, fetcher).await;

    // ===== Cleanup =====
    if use_alt_screen {
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;
    }

    let run_output = result?;
    run_output.write_render_output()?;
    debug.save_actions(recorder.as_ref()).map_err(debug_error)?;
    tracing::info!("exiting");
    Ok(())
}

struct CatalogUi {
    screen: CatalogScreen,
}

impl CatalogUi {
    fn new() -> Self {
        Self {
            screen: CatalogScreen::new(),
        }
    }

    fn render(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        state: &AppState,
        render_ctx: RenderContext,
        event_ctx: &mut EventContext<CatalogComponentId>,
    ) {
        let layout = ScreenLayout::split(area);
        event_ctx.set_component_area(CatalogComponentId::Search, layout.search);
        match state.view {
            ViewState::List => {
                event_ctx.set_component_area(CatalogComponentId::List, layout.body);
                event_ctx
                    .component_areas
                    .remove(&CatalogComponentId::Detail);
            }
            ViewState::Detail => {
                event_ctx.set_component_area(CatalogComponentId::Detail, layout.body);
                event_ctx.component_areas.remove(&CatalogComponentId::List);
            }
        }
        if state.alert_open() {
            event_ctx.set_component_area(CatalogComponentId::Alert, area);
        } else {
            event_ctx.component_areas.remove(&CatalogComponentId::Alert);
        }

        let props = CatalogScreenProps {
            state,
            is_focused: render_ctx.is_focused(),
        };
        self.screen.render(frame, area, props);
    }

    fn handle_event(
        &mut self,
        id: CatalogComponentId,
        event: &EventKind,
        state: &AppState,
    ) -> HandlerResponse<Action> {
        let actions = match id {
            CatalogComponentId::Search => self.screen.handle_search_event(event, state),
            CatalogComponentId::List => self.screen.handle_list_event(event, state),
            CatalogComponentId::Detail => self.screen.handle_detail_event(event, state),
            CatalogComponentId::Alert => self.screen.handle_alert_event(event, state),
        };
        if actions.is_empty() {
            HandlerResponse::ignored()
        } else {
            HandlerResponse {
                actions,
                consumed: true,
                needs_render: false,
            }
        }
    }
}

fn debug_error(error: DebugSessionError) -> io::Error {
    io::Error::other(format!("debug session error: {error}"))
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    debug: &DebugSession,
    store: impl EffectStoreLike<AppState, Action, Effect>,
    replay_actions: Vec<ReplayItem<Action>>,
    fetcher: Arc<Fetcher<HttpApi>>,
) -> io::Result<DebugRunOutput<AppState>> {
    let ui = Rc::new(RefCell::new(CatalogUi::new()));
    let mut bus: EventBus<AppState, Action, CatalogComponentId, CatalogContext> =
        EventBus::new();
    let keybindings: Keybindings<CatalogContext> = Keybindings::new();

    for id in [
        CatalogComponentId::Search,
        CatalogComponentId::List,
        CatalogComponentId::Detail,
        CatalogComponentId::Alert,
    ] {
        let ui_handle = Rc::clone(&ui);
        bus.register(id, move |event, state| {
            ui_handle.borrow_mut().handle_event(id, &event.kind, state)
        });
    }

    // Re-render on terminal resize (no action needed, just redraw)
    bus.register_global(|event, _state| match event.kind {
        EventKind::Resize(_, _) => HandlerResponse::ignored().with_render(),
        _ => HandlerResponse::ignored(),
    });

    debug
        .run_effect_app_with_bus(
            terminal,
            store,
            DebugLayer::simple(),
            replay_actions,
            Some(Action::Init),
            Some(Action::Quit),
            |_runtime| {},
            &mut bus,
            &keybindings,
            |frame, area, state, render_ctx, event_ctx| {
                ui.borrow_mut()
                    .render(frame, area, state, render_ctx, event_ctx);
            },
            |action| matches!(action, Action::Quit),
            |effect, ctx| handle_effect(effect, ctx, &fetcher),
        )
        .await
}

/// Handle effects by spawning tasks
fn handle_effect(
    effect: Effect,
    ctx: &mut EffectContext<Action>,
    fetcher: &Arc<Fetcher<HttpApi>>,
) {
    let fetcher = Arc::clone(fetcher);
    match effect {
        Effect::LoadCatalog => {
            ctx.tasks().spawn(TaskKey::new("catalog"), async move {
                let mut cache = EntryCache::new();
                let tiles = fetcher.populate(&mut cache).await;
                Action::CatalogDidLoad { tiles, cache }
            });
        }
        Effect::FetchDetail { name, origin } => {
            let key = format!("detail_{name}");
            ctx.tasks().spawn(TaskKey::new(key), async move {
                let lookup = fetcher.fetch_uncached(&name).await;
                Action::DetailDidResolve {
                    name,
                    origin,
                    lookup,
                }
            });
        }
    }
}
