//! End-to-end scenarios
//!
//! Each test drives the `App` with key presses against an in-memory
//! catalog and checks what ends up on a rendered `TestBackend` screen.

use crate::api::memory::MemoryApi;
use crate::api::ApiError;
use crate::app::{App, AppState, PopupState};
use crate::config::Config;
use crate::router::Route;
use crate::ui;
use crate::views::FormPanel;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{backend::TestBackend, Terminal};

struct Harness {
    app: App,
    api: MemoryApi,
    terminal: Terminal<TestBackend>,
}

impl Harness {
    fn new(api: MemoryApi) -> Self {
        Self::with_size(api, 120, 40)
    }

    fn with_size(api: MemoryApi, width: u16, height: u16) -> Self {
        let app = App::new(Config::default(), Box::new(api.clone()));
        let terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        Self { app, api, terminal }
    }

    fn visit(api: MemoryApi, route: Route) -> Self {
        let mut h = Self::new(api);
        h.app.navigate(route);
        h
    }

    fn press(&mut self, code: KeyCode) {
        self.app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn type_text(&mut self, text: &str) {
        for c in text.chars() {
            self.press(KeyCode::Char(c));
        }
    }

    /// Render and return the screen as lines of text
    fn screen(&mut self) -> String {
        self.terminal.draw(|frame| ui::render(frame, &self.app)).unwrap();

        let buffer = self.terminal.backend().buffer();
        let width = buffer.area.width as usize;
        buffer
            .content
            .chunks(width)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn form(&self) -> &FormPanel {
        let form = match self.app.route {
            Route::Tematica => self.app.tematicas.form.as_ref(),
            Route::Video => self.app.videos.form.as_ref(),
            Route::Home => None,
        };
        form.expect("no form open")
    }

    /// Tab until `key` has focus
    fn focus(&mut self, key: &str) {
        for _ in 0..self.form().fields.len() {
            if self.form().focused().map(|f| f.key) == Some(key) {
                return;
            }
            self.press(KeyCode::Tab);
        }
        panic!("field {} not found", key);
    }

    /// Replace the text of a field
    fn fill(&mut self, key: &str, value: &str) {
        self.focus(key);
        for _ in 0..self.form().value(key).chars().count() {
            self.press(KeyCode::Backspace);
        }
        self.type_text(value);
    }

    /// Cycle a select until `value` is chosen
    fn choose(&mut self, key: &str, value: &str) {
        self.focus(key);
        for _ in 0..=20 {
            if self.form().value(key) == value {
                return;
            }
            self.press(KeyCode::Right);
        }
        panic!("option {} not offered for {}", value, key);
    }

    fn check(&mut self, key: &str, on: bool) {
        self.focus(key);
        if self.form().field(key).map(|f| f.is_checked()) != Some(on) {
            self.press(KeyCode::Char(' '));
        }
    }

    /// Move the cursor onto the row whose label contains `text` and select it
    fn select_row(&mut self, text: &str) {
        let labels: Vec<String> = match self.app.route {
            Route::Tematica => self.app.tematicas.list.items.iter().map(|t| t.nombre.clone()).collect(),
            Route::Video => self.app.videos.list.items.iter().map(|v| v.titulo.clone()).collect(),
            Route::Home => Vec::new(),
        };
        let pos = labels
            .iter()
            .position(|l| l.contains(text))
            .unwrap_or_else(|| panic!("no row with {}", text));

        self.press(KeyCode::Char('g'));
        for _ in 0..pos {
            self.press(KeyCode::Char('j'));
        }
        self.press(KeyCode::Enter);
    }
}

#[test]
fn tematica_list_is_shown_when_empty() {
    let mut h = Harness::visit(MemoryApi::new(), Route::Tematica);
    let screen = h.screen();

    assert!(screen.contains("Temáticas (0)"));
    assert!(screen.contains("Sin elementos"));
}

#[test]
fn video_list_is_shown_when_empty() {
    let mut h = Harness::visit(MemoryApi::new(), Route::Video);
    let screen = h.screen();

    assert!(screen.contains("Videos (0)"));
    assert!(screen.contains("Sin elementos"));
}

#[test]
fn home_lists_routes() {
    let mut h = Harness::new(MemoryApi::new());
    let screen = h.screen();

    assert!(screen.contains("videoteca · memory://"));
    assert!(screen.contains("/tematica"));
    assert!(screen.contains("/video"));
    assert!(screen.contains("[3] Videos"));
}

#[test]
fn selection_is_exclusive() {
    let mut h = Harness::visit(MemoryApi::seeded(), Route::Tematica);

    h.select_row("Deportes");
    assert!(h.screen().contains("● #1"));

    h.select_row("Cocina");
    let screen = h.screen();
    assert!(screen.contains("● #2"));
    assert!(!screen.contains("● #1"));
    assert_eq!(h.app.tematicas.list.selected_id(), Some(2));
}

#[test]
fn crear_opens_empty_form() {
    let mut h = Harness::visit(MemoryApi::seeded(), Route::Tematica);
    h.select_row("Cocina");

    h.press(KeyCode::Char('c'));
    let screen = h.screen();

    assert!(screen.contains("Crear temática"));
    assert_eq!(h.form().value("nombre"), "");
    assert_eq!(h.form().value("descripcion"), "");
    assert!(screen.contains("[ ]"));
}

#[test]
fn modificar_prefills_selected_tematica() {
    let mut h = Harness::visit(MemoryApi::seeded(), Route::Tematica);
    h.select_row("Cocina");

    h.press(KeyCode::Char('m'));
    let screen = h.screen();

    assert!(screen.contains("Modificar temática"));
    assert!(screen.contains("Cocina_"));
    assert_eq!(h.form().value("descripcion"), "Videos de cocina");
    assert_eq!(h.form().value("fechaCreacion"), "2022-06-01");
}

#[test]
fn modificar_prefills_selected_video() {
    let mut h = Harness::visit(MemoryApi::seeded(), Route::Video);
    h.select_row("Final");

    h.press(KeyCode::Char('m'));
    let screen = h.screen();

    assert!(screen.contains("Modificar video"));
    assert!(screen.contains("< 720p >"));
    assert!(screen.contains("< 1 · Deportes >"));
    assert_eq!(h.form().value("autor"), "Autor");
}

#[test]
fn tematica_with_videos_cannot_be_deleted() {
    let mut h = Harness::visit(MemoryApi::seeded(), Route::Tematica);
    h.select_row("Deportes");
    h.api.clear_calls();

    h.press(KeyCode::Char('b'));
    let screen = h.screen();

    assert!(screen.contains("No se puede borrar la temática"));
    assert!(!screen.contains("Confirmar"));
    assert_eq!(h.api.calls(), vec!["GET /api/videos?tematicaId=1"]);

    h.press(KeyCode::Enter);
    assert_eq!(h.app.state(), AppState::Normal);
    assert_eq!(h.api.tematicas().len(), 2);
    assert!(h.api.calls().iter().all(|c| !c.starts_with("DELETE")));
}

#[test]
fn tematica_without_videos_is_deleted() {
    let mut h = Harness::visit(MemoryApi::seeded(), Route::Tematica);
    h.select_row("Cocina");

    h.press(KeyCode::Char('b'));
    assert!(h.screen().contains("¿Borrar \"Cocina\"?"));

    h.press(KeyCode::Char('y'));
    let screen = h.screen();

    assert!(screen.contains("Temática borrada"));
    assert!(screen.contains("Temáticas (1)"));
    assert!(!screen.contains("Cocina"));
}

#[test]
fn video_is_deleted_after_confirmar() {
    let mut h = Harness::visit(MemoryApi::seeded(), Route::Video);
    h.select_row("Final del mundial");

    h.press(KeyCode::Char('b'));
    let screen = h.screen();
    assert!(screen.contains("Borrar video"));
    assert!(screen.contains("Confirmar"));

    h.press(KeyCode::Enter);
    let screen = h.screen();

    assert!(h.api.videos().is_empty());
    assert!(screen.contains("Video borrado"));
    assert!(screen.contains("Videos (0)"));
    assert!(h.api.calls().contains(&"DELETE /api/videos/3".to_string()));
}

#[test]
fn create_tematica() {
    let mut h = Harness::visit(MemoryApi::seeded(), Route::Tematica);

    h.press(KeyCode::Char('c'));
    h.fill("nombre", "Nueva Temática");
    h.fill("descripcion", "Descripción de la nueva temática");
    h.fill("popularidad", "10");
    h.check("activo", true);
    h.fill("fechaCreacion", "2023-01-01");
    h.press(KeyCode::Enter);

    let screen = h.screen();
    assert!(screen.contains("Temática creada"));
    assert!(screen.contains("Nueva Temática"));
    assert!(h.app.tematicas.form.is_none());

    let created = h.api.tematicas().pop().unwrap();
    assert_eq!(created.nombre, "Nueva Temática");
    assert_eq!(created.descripcion, "Descripción de la nueva temática");
    assert_eq!(created.popularidad, 10.0);
    assert!(created.activo);
    assert_eq!(created.formatted_date(), "2023-01-01");
    assert_eq!(h.app.tematicas.list.selected_id(), created.id);
}

#[test]
fn create_video() {
    let mut h = Harness::visit(MemoryApi::seeded(), Route::Video);

    h.press(KeyCode::Char('c'));
    h.fill("titulo", "Nuevo Video");
    h.fill("autor", "Autor del Video");
    h.fill("duracion", "120");
    h.choose("calidad", "1080p");
    h.choose("clasificacion", "12");
    h.fill("fechaCreacion", "2023-01-01");
    h.choose("tematicaId", "1");
    h.press(KeyCode::Enter);

    let screen = h.screen();
    assert!(screen.contains("Video creado"));
    assert!(screen.contains("Nuevo Video · Autor del Video"));

    let created = h.api.videos().pop().unwrap();
    assert_eq!(created.titulo, "Nuevo Video");
    assert_eq!(created.autor, "Autor del Video");
    assert_eq!(created.duracion, 120.0);
    assert_eq!(created.calidad.as_str(), "1080p");
    assert_eq!(created.clasificacion.as_str(), "12");
    assert_eq!(created.tematica_id, 1);
}

#[test]
fn modify_video() {
    let mut h = Harness::visit(MemoryApi::seeded(), Route::Video);
    h.select_row("Final del mundial");

    h.press(KeyCode::Char('m'));
    h.fill("titulo", "Video Modificado");
    h.fill("autor", "Autor Modificado");
    h.press(KeyCode::Enter);

    let screen = h.screen();
    assert!(screen.contains("Video actualizado"));
    assert!(screen.contains("Video Modificado · Autor Modificado"));
    assert!(h.api.calls().contains(&"PUT /api/videos/3".to_string()));

    let video = &h.api.videos()[0];
    assert_eq!(video.titulo, "Video Modificado");
    assert_eq!(video.autor, "Autor Modificado");
    assert_eq!(video.duracion, 90.0);
}

#[test]
fn modify_tematica() {
    let mut h = Harness::visit(MemoryApi::seeded(), Route::Tematica);
    h.select_row("Cocina");

    h.press(KeyCode::Char('m'));
    h.fill("nombre", "Temática Modificada");
    h.fill("descripcion", "Descripción modificada");
    h.press(KeyCode::Enter);

    let screen = h.screen();
    assert!(screen.contains("Temática actualizada"));
    assert!(screen.contains("Temática Modificada"));

    let tematica = &h.api.tematicas()[1];
    assert_eq!(tematica.nombre, "Temática Modificada");
    assert_eq!(tematica.descripcion, "Descripción modificada");
    assert_eq!(h.app.tematicas.list.selected_id(), Some(2));
}

#[test]
fn invalid_form_shows_inline_errors() {
    let mut h = Harness::visit(MemoryApi::seeded(), Route::Video);
    h.press(KeyCode::Char('c'));
    h.fill("duracion", "45");
    h.api.clear_calls();

    h.press(KeyCode::Enter);
    let screen = h.screen();

    assert!(screen.contains("Campo obligatorio"));
    assert!(screen.contains("Seleccione una opción"));
    assert!(screen.contains("Revise los campos marcados"));
    assert!(h.api.calls().is_empty());
    assert_eq!(h.app.state(), AppState::FormInput);
    assert_eq!(h.form().value("duracion"), "45");
}

#[test]
fn form_follows_focus_on_small_terminal() {
    let mut h = Harness::with_size(MemoryApi::seeded(), 80, 24);
    h.app.navigate(Route::Video);
    h.press(KeyCode::Char('c'));
    h.fill("duracion", "45");
    h.press(KeyCode::Enter);

    h.focus("tematicaId");
    let screen = h.screen();

    // calidad, clasificacion and tematicaId rows with their errors
    assert_eq!(screen.matches("< Seleccione >").count(), 3);
    assert_eq!(screen.matches("Seleccione una opción").count(), 3);

    h.focus("titulo");
    let screen = h.screen();
    assert!(screen.contains("Título"));
    assert!(screen.contains("Campo obligatorio"));
}

#[test]
fn server_error_on_save_keeps_input() {
    let mut h = Harness::visit(MemoryApi::seeded(), Route::Tematica);
    h.press(KeyCode::Char('c'));
    h.fill("nombre", "Viajes");
    h.fill("descripcion", "Videos de viajes");
    h.fill("popularidad", "3");
    h.fill("fechaCreacion", "2023-02-01");

    h.api.fail_on(
        "POST",
        ApiError::Status {
            status: 500,
            message: "boom".into(),
        },
    );
    h.press(KeyCode::Enter);

    assert!(h.screen().contains("Error del servidor"));
    assert_eq!(h.app.state(), AppState::ShowError);

    h.press(KeyCode::Esc);
    assert_eq!(h.app.popup, PopupState::None);
    assert_eq!(h.app.state(), AppState::FormInput);
    assert_eq!(h.form().value("nombre"), "Viajes");
    assert_eq!(h.api.tematicas().len(), 2);
}

#[test]
fn unreachable_service_shows_error() {
    let api = MemoryApi::new();
    api.fail_next(ApiError::Network {
        url: "http://localhost:8080/api/videos".into(),
        message: "connection refused".into(),
    });
    let mut h = Harness::new(api);

    h.press(KeyCode::Char('3'));
    let screen = h.screen();

    assert!(screen.contains("Error de conexión"));
    assert!(screen.contains("Cerrar"));

    h.press(KeyCode::Char('o'));
    assert_eq!(h.app.state(), AppState::Normal);
}
