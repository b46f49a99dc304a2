//! Application state and event handling
//!
//! This is the core of videoteca, managing:
//! - The active route and one `ResourceView` per entity
//! - Event handling (keyboard input)
//! - Popups and flash feedback

use crate::api::CatalogApi;
use crate::config::Config;
use crate::router::Route;
use crate::types::{Tematica, Video};
use crate::ui::Theme;
use crate::views::{FormContext, Resource, ResourceView, ViewEvent};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::time::Instant;
use tracing::{info, warn};

/// How long a flash message stays visible
const FLASH_SECS: u64 = 3;

/// Main application state
pub struct App {
    // Core state
    pub should_quit: bool,
    pub route: Route,
    pub config: Config,
    pub theme: Theme,
    api: Box<dyn CatalogApi>,

    // One view per entity, kept while switching routes
    pub tematicas: ResourceView<Tematica>,
    pub videos: ResourceView<Video>,

    // Popup state
    pub popup: PopupState,

    // Flash message (temporary feedback)
    pub flash_message: Option<(String, bool, Instant)>, // (message, is_error, timestamp)
}

/// Popup overlay state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PopupState {
    None,
    Error { title: String, message: String },
}

/// Application state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Normal,
    FormInput,
    DeleteModal,
    ShowError,
}

impl App {
    /// Create a new App instance. Nothing is fetched until `navigate`.
    pub fn new(config: Config, api: Box<dyn CatalogApi>) -> Self {
        let theme = Theme::from_name(config.theme);

        Self {
            should_quit: false,
            route: Route::Home,
            config,
            theme,
            api,

            tematicas: ResourceView::default(),
            videos: ResourceView::default(),

            popup: PopupState::None,
            flash_message: None,
        }
    }

    pub fn api_url(&self) -> &str {
        self.api.base_url()
    }

    /// Get current app state
    pub fn state(&self) -> AppState {
        if let PopupState::Error { .. } = self.popup {
            return AppState::ShowError;
        }

        match self.route {
            Route::Home => AppState::Normal,
            Route::Tematica => view_state(&self.tematicas),
            Route::Video => view_state(&self.videos),
        }
    }

    /// Whether the open delete modal is the "cannot delete" notice
    pub fn delete_blocked(&self) -> bool {
        match self.route {
            Route::Home => false,
            Route::Tematica => self.tematicas.delete.is_blocked(),
            Route::Video => self.videos.delete.is_blocked(),
        }
    }

    /// Switch to `route` and load its data.
    ///
    /// The target view starts over with no selection and no open form.
    pub fn navigate(&mut self, route: Route) {
        info!(route = route.name(), path = route.path(), "navigate");
        self.route = route;

        let api = self.api.as_ref();
        let event = match route {
            Route::Home => ViewEvent::None,
            Route::Tematica => {
                self.tematicas = ResourceView::default();
                self.tematicas.reload(api)
            }
            Route::Video => {
                self.videos = ResourceView::default();
                // Temáticas feed the tematicaId select
                match self.tematicas.reload(api) {
                    ViewEvent::None => self.videos.reload(api),
                    other => other,
                }
            }
        };
        self.apply(event);
    }

    /// Handle a key event
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        match self.state() {
            AppState::ShowError => self.handle_error_key(key),
            AppState::Normal => self.handle_normal_key(key),
            AppState::FormInput | AppState::DeleteModal => self.handle_view_key(key),
        }
    }

    /// Clear expired flash messages. Called once per frame.
    pub fn tick(&mut self) {
        if let Some((_, _, instant)) = &self.flash_message {
            if instant.elapsed().as_secs() >= FLASH_SECS {
                self.flash_message = None;
            }
        }
    }

    /// Handle key in normal state
    fn handle_normal_key(&mut self, key: KeyEvent) {
        // Global keys (work on every route)
        match key.code {
            KeyCode::Char('q') => {
                self.should_quit = true;
                return;
            }
            KeyCode::Char(c @ '1'..='3') => {
                let idx = c as usize - '1' as usize;
                if let Some(route) = Route::from_index(idx) {
                    self.navigate(route);
                }
                return;
            }
            KeyCode::Char('t') => {
                self.cycle_theme();
                return;
            }
            _ => {}
        }

        self.handle_view_key(key);
    }

    /// Route keys to the active view
    fn handle_view_key(&mut self, key: KeyEvent) {
        let api = self.api.as_ref();
        let event = match self.route {
            Route::Home => ViewEvent::None,
            Route::Tematica => handle_resource_key(&mut self.tematicas, api, &FormContext::default(), key),
            Route::Video => {
                let ctx = FormContext {
                    tematicas: &self.tematicas.list.items,
                };
                handle_resource_key(&mut self.videos, api, &ctx, key)
            }
        };
        self.apply(event);
    }

    /// Handle keys in error popup
    fn handle_error_key(&mut self, key: KeyEvent) {
        if let KeyCode::Char('o') | KeyCode::Enter | KeyCode::Esc = key.code {
            self.popup = PopupState::None;
        }
    }

    /// Switch to the next theme and persist it
    fn cycle_theme(&mut self) {
        self.config.theme = self.config.theme.next();
        self.theme = Theme::from_name(self.config.theme);

        match self.config.save() {
            Ok(()) => self.show_flash(&format!("Tema: {}", self.config.theme.as_str()), false),
            Err(e) => {
                warn!(error = %e, "failed to save config");
                self.show_error("Configuración", &format!("{:#}", e));
            }
        }
    }

    fn apply(&mut self, event: ViewEvent) {
        match event {
            ViewEvent::None => {}
            ViewEvent::Flash { message, is_error } => self.show_flash(&message, is_error),
            ViewEvent::Error { title, message } => self.show_error(&title, &message),
        }
    }

    /// Show an error popup
    fn show_error(&mut self, title: &str, message: &str) {
        self.popup = PopupState::Error {
            title: title.into(),
            message: message.into(),
        };
    }

    /// Show a flash message
    fn show_flash(&mut self, message: &str, is_error: bool) {
        self.flash_message = Some((message.into(), is_error, Instant::now()));
    }
}

fn view_state<R: Resource>(view: &ResourceView<R>) -> AppState {
    if view.delete.is_open() {
        AppState::DeleteModal
    } else if view.form.is_some() {
        AppState::FormInput
    } else {
        AppState::Normal
    }
}

/// Keys for one resource view, in whatever state it is in
fn handle_resource_key<R: Resource>(
    view: &mut ResourceView<R>,
    api: &dyn CatalogApi,
    ctx: &FormContext,
    key: KeyEvent,
) -> ViewEvent {
    if view.delete.is_open() {
        return handle_delete_key(view, api, key);
    }
    if view.form.is_some() {
        return handle_form_key(view, api, key);
    }

    match key.code {
        KeyCode::Char('j') | KeyCode::Down => view.list.move_down(),
        KeyCode::Char('k') | KeyCode::Up => view.list.move_up(),
        KeyCode::Char('g') | KeyCode::Home => view.list.first(),
        KeyCode::Char('G') | KeyCode::End => view.list.last(),
        KeyCode::Enter | KeyCode::Char(' ') => {
            view.list.select_cursor();
        }
        KeyCode::Char('c') => view.open_create(ctx),
        KeyCode::Char('m') => return view.open_edit(api, ctx),
        KeyCode::Char('b') => return view.begin_delete(api),
        KeyCode::Char('r') => return view.reload(api),
        _ => {}
    }
    ViewEvent::None
}

fn handle_form_key<R: Resource>(
    view: &mut ResourceView<R>,
    api: &dyn CatalogApi,
    key: KeyEvent,
) -> ViewEvent {
    match key.code {
        KeyCode::Esc => {
            view.close_form();
            return ViewEvent::None;
        }
        KeyCode::Enter => return view.submit(api),
        _ => {}
    }

    let Some(form) = view.form.as_mut() else {
        return ViewEvent::None;
    };

    match key.code {
        KeyCode::Tab | KeyCode::Down => form.focus_next(),
        KeyCode::BackTab | KeyCode::Up => form.focus_prev(),
        KeyCode::Left => form.cycle_select(false),
        KeyCode::Right => form.cycle_select(true),
        KeyCode::Backspace => form.backspace(),
        KeyCode::Char(c) => form.input_char(c),
        _ => {}
    }
    ViewEvent::None
}

/// Keys in the delete modal
fn handle_delete_key<R: Resource>(
    view: &mut ResourceView<R>,
    api: &dyn CatalogApi,
    key: KeyEvent,
) -> ViewEvent {
    // The blocked notice only offers closing
    if view.delete.is_blocked() {
        if let KeyCode::Char('o') | KeyCode::Char('n') | KeyCode::Enter | KeyCode::Esc = key.code {
            view.cancel_delete();
        }
        return ViewEvent::None;
    }

    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => view.confirm_delete(api),
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
            view.cancel_delete();
            ViewEvent::None
        }
        _ => ViewEvent::None,
    }
}
