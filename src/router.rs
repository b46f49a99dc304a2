//! Route table
//!
//! Maps the three top-level paths to their views. No guards,
//! redirects or nested routes.

/// Top-level views
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Route {
    #[default]
    Home,
    Tematica,
    Video,
}

impl Route {
    pub fn all() -> &'static [Route] {
        &[Route::Home, Route::Tematica, Route::Video]
    }

    /// Route name
    pub fn name(&self) -> &'static str {
        match self {
            Route::Home => "home",
            Route::Tematica => "tematica",
            Route::Video => "video",
        }
    }

    pub fn path(&self) -> &'static str {
        match self {
            Route::Home => "/",
            Route::Tematica => "/tematica",
            Route::Video => "/video",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Route::Home => "Inicio",
            Route::Tematica => "Temáticas",
            Route::Video => "Videos",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            Route::Home => 0,
            Route::Tematica => 1,
            Route::Video => 2,
        }
    }

    pub fn from_index(idx: usize) -> Option<Self> {
        Self::all().get(idx).copied()
    }

    /// Resolve a path to its route. A trailing slash is ignored.
    pub fn from_path(path: &str) -> Option<Self> {
        let trimmed = path.trim();
        let normalized = if trimmed.len() > 1 {
            trimmed.trim_end_matches('/')
        } else {
            trimmed
        };

        Self::all().iter().copied().find(|r| r.path() == normalized)
    }
}
