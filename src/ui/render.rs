//! Main rendering module
//!
//! Handles rendering the complete UI including:
//! - Header with API endpoint and route bar
//! - Active route content
//! - Popups and overlays
//! - Status bar

use crate::app::{App, AppState, PopupState};
use crate::router::Route;
use crate::ui::{theme::Theme, widgets};
use crate::views::{DeleteFlow, FieldKind, FormField, FormPanel, Resource, ResourceView};
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Tabs, Wrap},
    Frame,
};

/// Main render function - entry point for all UI rendering
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    // Main layout: header, content, status bar
    let layout = Layout::vertical([
        Constraint::Length(3), // Header + routes
        Constraint::Min(10),   // Content
        Constraint::Length(1), // Status bar
    ])
    .split(area);

    render_header(frame, app, layout[0]);

    match app.route {
        Route::Home => render_home(frame, app, layout[1]),
        Route::Tematica => render_resource_view(frame, &app.tematicas, &app.theme, layout[1]),
        Route::Video => render_resource_view(frame, &app.videos, &app.theme, layout[1]),
    }

    render_status_bar(frame, app, layout[2]);

    render_popups(frame, app, area);
}

/// Render header with API endpoint and route bar
fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;

    let header_block = Block::default()
        .style(theme.block_style())
        .title(format!(" videoteca · {} ", app.api_url()))
        .title_style(theme.title())
        .borders(Borders::BOTTOM)
        .border_style(theme.border());

    frame.render_widget(header_block, area);

    let route_titles: Vec<Line> = Route::all()
        .iter()
        .enumerate()
        .map(|(i, route)| {
            let style = if app.route == *route {
                theme.title()
            } else {
                theme.text_dim()
            };
            Line::styled(format!("[{}] {}", i + 1, route.label()), style)
        })
        .collect();

    let tabs = Tabs::new(route_titles)
        .select(app.route.index())
        .divider(" │ ")
        .style(theme.text());

    let tabs_area = Rect {
        x: area.x + 2,
        y: area.y + 1,
        width: area.width.saturating_sub(4),
        height: 1,
    };
    frame.render_widget(tabs, tabs_area);
}

/// Render status bar with keybindings for the current state
fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let hints = match app.state() {
        AppState::ShowError => "[Enter/Esc] Cerrar",
        AppState::DeleteModal => {
            if app.delete_blocked() {
                "[Enter/Esc] Cerrar"
            } else {
                "[y] Confirmar  [n/Esc] Cancelar"
            }
        }
        AppState::FormInput => {
            "[Tab/↓] Siguiente  [←/→] Opción  [Space] Marcar  [Enter] Guardar  [Esc] Cancelar"
        }
        AppState::Normal => match app.route {
            Route::Home => "[1-3] Ir a  [t] Tema  [q] Salir",
            _ => "[j/k] Mover  [Enter] Seleccionar  [c] Crear  [m] Modificar  [b] Borrar  [r] Recargar  [q] Salir",
        },
    };

    widgets::render_status_bar(frame, hints, app.config.theme.as_str(), &app.theme, area);
}

/// Render popups if active
fn render_popups(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;

    match app.route {
        Route::Tematica => render_delete_modal(frame, &app.tematicas, theme, area),
        Route::Video => render_delete_modal(frame, &app.videos, theme, area),
        Route::Home => {}
    }

    if let PopupState::Error { title, message } = &app.popup {
        widgets::render_error_popup(frame, title, &[message.clone()], theme, area);
    }

    // Flash message (success/error feedback)
    if let Some((msg, is_error, _)) = &app.flash_message {
        widgets::render_flash_message(frame, msg, *is_error, theme, area);
    }
}

// === ROUTE RENDERERS ===

/// Home: route index and connection info
fn render_home(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;

    let block = Block::default()
        .style(theme.block_style())
        .title(format!(" {} ", Route::Home.label()))
        .title_style(theme.title())
        .borders(Borders::ALL)
        .border_style(theme.border_focused());

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines = vec![
        Line::styled("Catálogo de temáticas y videos", theme.title()),
        Line::raw(""),
        Line::styled("Rutas", theme.text_dim()),
    ];

    for (i, route) in Route::all().iter().enumerate() {
        let style = if app.route == *route {
            theme.selected()
        } else {
            theme.text()
        };
        lines.push(Line::from(vec![
            Span::styled(format!("  [{}] ", i + 1), theme.text_dim()),
            Span::styled(format!("{:<12}", route.path()), style),
            Span::styled(format!("{:<10}", route.name()), theme.text_dim()),
            Span::styled(route.label(), theme.text()),
        ]));
    }

    lines.push(Line::raw(""));
    lines.push(Line::from(vec![
        Span::styled("API      ", theme.text_dim()),
        Span::styled(app.api_url().to_string(), theme.text()),
    ]));

    let config_path = crate::config::Config::path()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|_| "-".into());
    lines.push(Line::from(vec![
        Span::styled("Config   ", theme.text_dim()),
        Span::styled(config_path, theme.text()),
    ]));

    let content = Paragraph::new(lines).wrap(Wrap { trim: false });
    frame.render_widget(content, inner);
}

/// List on the left, form or details on the right
fn render_resource_view<R: Resource>(
    frame: &mut Frame,
    view: &ResourceView<R>,
    theme: &Theme,
    area: Rect,
) {
    let panels = Layout::horizontal([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(area);

    render_list(frame, view, theme, panels[0]);

    match &view.form {
        Some(form) => render_form::<R>(frame, form, theme, panels[1]),
        None => render_details(frame, view.list.selected(), theme, panels[1]),
    }
}

fn render_list<R: Resource>(frame: &mut Frame, view: &ResourceView<R>, theme: &Theme, area: Rect) {
    let is_focused = view.form.is_none();
    let border_style = if is_focused {
        theme.border_focused()
    } else {
        theme.border()
    };

    let block = Block::default()
        .style(theme.block_style())
        .title(format!(" {} ({}) ", R::PLURAL, view.list.items.len()))
        .title_style(if is_focused { theme.title() } else { theme.text_dim() })
        .borders(Borders::ALL)
        .border_style(border_style);

    let inner = block.inner(area);
    frame.render_widget(block, area);

    if view.list.items.is_empty() {
        let msg = if view.loaded { "Sin elementos" } else { "Cargando..." };
        let empty_msg = Paragraph::new(msg)
            .style(theme.text_dim())
            .alignment(Alignment::Center);
        frame.render_widget(empty_msg, inner);
        return;
    }

    // Keep the cursor row visible
    let height = inner.height as usize;
    let offset = view.list.cursor.saturating_sub(height.saturating_sub(1));

    let items: Vec<ListItem> = view
        .list
        .items
        .iter()
        .enumerate()
        .skip(offset)
        .take(height)
        .map(|(i, item)| {
            let (marker, marker_style) = if view.list.is_selected(item) {
                ("● ", theme.marker_selected())
            } else {
                ("  ", theme.text())
            };

            let style = if i == view.list.cursor && is_focused {
                theme.selected()
            } else {
                theme.text()
            };

            let id = item.id().map(|id| format!("#{:<4}", id)).unwrap_or_default();

            ListItem::new(Line::from(vec![
                Span::styled(marker, marker_style),
                Span::styled(format!("{} {}", id, item.list_label()), style),
            ]))
        })
        .collect();

    frame.render_widget(List::new(items), inner);
}

fn render_details<R: Resource>(frame: &mut Frame, selected: Option<&R>, theme: &Theme, area: Rect) {
    let block = Block::default()
        .style(theme.block_style())
        .title(" Detalle ")
        .title_style(theme.text_dim())
        .borders(Borders::ALL)
        .border_style(theme.border());

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let Some(item) = selected else {
        let hint = Paragraph::new("Seleccione un elemento con [Enter] o pulse [c] para crear")
            .style(theme.text_dim())
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        frame.render_widget(hint, inner);
        return;
    };

    let lines: Vec<Line> = item
        .details()
        .into_iter()
        .map(|(label, value)| {
            Line::from(vec![
                Span::styled(format!("{:<20}", label), theme.text_dim()),
                Span::styled(value, theme.text()),
            ])
        })
        .collect();

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
}

fn render_form<R: Resource>(frame: &mut Frame, form: &FormPanel, theme: &Theme, area: Rect) {
    let block = Block::default()
        .style(theme.block_style())
        .title(format!(" {} {} ", form.mode.title(), R::NOUN))
        .title_style(theme.title())
        .borders(Borders::ALL)
        .border_style(theme.border_focused());

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines = Vec::new();
    let mut focus_end = 0;
    for (i, field) in form.fields.iter().enumerate() {
        let focused = i == form.focus;
        lines.push(Line::styled(
            field.label,
            if focused { theme.title() } else { theme.text_dim() },
        ));
        lines.push(Line::from(vec![
            Span::raw("  "),
            Span::styled(
                field_display(field, focused),
                if focused { theme.input_focused() } else { theme.input() },
            ),
        ]));
        if let Some(err) = &field.error {
            lines.push(Line::styled(format!("  ✗ {}", err), theme.error()));
        }
        if focused {
            focus_end = lines.len();
        }
    }

    lines.push(Line::raw(""));
    lines.push(Line::styled("[Enter] Guardar  [Esc] Cancelar", theme.text_dim()));

    // Scroll so the focused field and its error stay on screen
    let offset = form_scroll(focus_end, inner.height as usize);
    frame.render_widget(Paragraph::new(lines).scroll((offset, 0)), inner);
}

/// Rows to skip so that line `focus_end - 1` is the last visible one
fn form_scroll(focus_end: usize, height: usize) -> u16 {
    focus_end.saturating_sub(height).min(u16::MAX as usize) as u16
}

/// Text shown in a field's input row
fn field_display(field: &FormField, focused: bool) -> String {
    match &field.kind {
        FieldKind::Checkbox => {
            let mark = if field.is_checked() { "[x]" } else { "[ ]" };
            mark.to_string()
        }
        FieldKind::Select(_) => {
            format!("< {} >", field.selected_label().unwrap_or("Seleccione"))
        }
        FieldKind::Date if field.value.is_empty() && !focused => "AAAA-MM-DD".to_string(),
        _ => {
            let cursor = if focused { "_" } else { "" };
            format!("{}{}", field.value, cursor)
        }
    }
}

fn render_delete_modal<R: Resource>(
    frame: &mut Frame,
    view: &ResourceView<R>,
    theme: &Theme,
    area: Rect,
) {
    let title = format!("Borrar {}", R::NOUN);

    match &view.delete {
        DeleteFlow::Idle => {}
        DeleteFlow::Confirming { label, .. } => {
            widgets::render_confirm_popup(
                frame,
                &title,
                &format!("¿Borrar \"{}\"?", label),
                theme,
                area,
            );
        }
        DeleteFlow::Blocked {
            label,
            message,
            dependents,
        } => {
            let mut lines = vec![message.clone()];
            if *dependents > 0 {
                lines.push(format!("\"{}\" tiene {} elemento(s) asociados", label, dependents));
            }
            widgets::render_error_popup(frame, &title, &lines, theme, area);
        }
    }
}
