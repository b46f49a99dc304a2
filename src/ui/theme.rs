//! Color palettes and the styles built from them

use crate::config::ThemeName;
use ratatui::style::{Color, Modifier, Style};

/// Colors of one palette
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub base: Color,
    pub text: Color,
    pub muted: Color,
    pub accent: Color,
    pub ok: Color,
    pub alert: Color,
    pub frame: Color,
    pub frame_active: Color,
    pub highlight: Color,
    pub field: Color,
}

const fn rgb(hex: u32) -> Color {
    Color::Rgb((hex >> 16) as u8, (hex >> 8) as u8, hex as u8)
}

const GRUVBOX: Palette = Palette {
    base: rgb(0x282828),
    text: rgb(0xebdbb2),
    muted: rgb(0x928374),
    accent: rgb(0xfe8019),
    ok: rgb(0xb8bb26),
    alert: rgb(0xfb4934),
    frame: rgb(0x504945),
    frame_active: rgb(0xa89984),
    highlight: rgb(0x504945),
    field: rgb(0x3c3836),
};

const NORD: Palette = Palette {
    base: rgb(0x2e3440),
    text: rgb(0xeceff4),
    muted: rgb(0x4c566a),
    accent: rgb(0x88c0d0),
    ok: rgb(0xa3be8c),
    alert: rgb(0xbf616a),
    frame: rgb(0x3b4252),
    frame_active: rgb(0x88c0d0),
    highlight: rgb(0x4c566a),
    field: rgb(0x3b4252),
};

/// Terminal defaults, nothing painted behind text
const TRANSPARENT: Palette = Palette {
    base: Color::Reset,
    text: Color::Reset,
    muted: Color::DarkGray,
    accent: Color::Cyan,
    ok: Color::Green,
    alert: Color::Red,
    frame: Color::DarkGray,
    frame_active: Color::Cyan,
    highlight: Color::DarkGray,
    field: Color::Reset,
};

#[derive(Debug, Clone)]
pub struct Theme {
    pub palette: Palette,
}

impl Theme {
    pub fn from_name(name: ThemeName) -> Self {
        let palette = match name {
            ThemeName::Gruvbox => GRUVBOX,
            ThemeName::Nord => NORD,
            ThemeName::Transparent => TRANSPARENT,
        };
        Self { palette }
    }

    /// Foreground `fg` over the palette background
    fn on_base(&self, fg: Color) -> Style {
        Style::default().fg(fg).bg(self.palette.base)
    }

    pub fn block_style(&self) -> Style {
        Style::default().bg(self.palette.base)
    }

    pub fn text(&self) -> Style {
        self.on_base(self.palette.text)
    }

    pub fn text_dim(&self) -> Style {
        self.on_base(self.palette.muted)
    }

    /// Titles, the active route and focused labels
    pub fn title(&self) -> Style {
        self.on_base(self.palette.accent).add_modifier(Modifier::BOLD)
    }

    /// Key letter inside a `[k]` button
    pub fn key_hint(&self) -> Style {
        Style::default()
            .fg(self.palette.accent)
            .add_modifier(Modifier::BOLD)
    }

    /// List row under the cursor
    pub fn selected(&self) -> Style {
        Style::default()
            .fg(self.palette.text)
            .bg(self.palette.highlight)
            .add_modifier(Modifier::BOLD)
    }

    pub fn border(&self) -> Style {
        self.on_base(self.palette.frame)
    }

    pub fn border_focused(&self) -> Style {
        self.on_base(self.palette.frame_active)
    }

    pub fn input(&self) -> Style {
        Style::default().fg(self.palette.text).bg(self.palette.field)
    }

    pub fn input_focused(&self) -> Style {
        Style::default()
            .fg(self.palette.accent)
            .bg(self.palette.field)
            .add_modifier(Modifier::BOLD)
    }

    pub fn success(&self) -> Style {
        self.on_base(self.palette.ok)
    }

    pub fn error(&self) -> Style {
        self.on_base(self.palette.alert)
    }

    /// `●` in front of the selected list item
    pub fn marker_selected(&self) -> Style {
        Style::default()
            .fg(self.palette.ok)
            .add_modifier(Modifier::BOLD)
    }
}
