//! Error taxonomy for REST API calls

use thiserror::Error;

/// Result type alias for API calls
pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// Failure of a single API request
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("No se pudo conectar con {url}: {message}")]
    Network { url: String, message: String },

    #[error("No encontrado: {0}")]
    NotFound(String),

    #[error("Conflicto: {0}")]
    Conflict(String),

    #[error("El servidor respondió {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Respuesta inválida de {url}: {message}")]
    Decode { url: String, message: String },
}

impl ApiError {
    /// Popup title for this error
    pub fn title(&self) -> &'static str {
        match self {
            ApiError::Network { .. } => "Error de conexión",
            ApiError::NotFound(_) => "No encontrado",
            ApiError::Conflict(_) => "Conflicto",
            ApiError::Status { .. } => "Error del servidor",
            ApiError::Decode { .. } => "Respuesta inválida",
        }
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, ApiError::Conflict(_))
    }
}
