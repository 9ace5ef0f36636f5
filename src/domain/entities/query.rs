use chrono::{DateTime, Utc};

use crate::usecase::ports::api::ApiError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchPhase {
    Idle,
    Loading,
    Success,
    Error,
}

/// View state of one fetched resource. Data survives a failed refresh.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryState<T> {
    pub data: Option<T>,
    pub phase: FetchPhase,
    pub error: Option<String>,
    pub last_updated: Option<DateTime<Utc>>,
}

impl<T> Default for QueryState<T> {
    fn default() -> Self {
        Self {
            data: None,
            phase: FetchPhase::Idle,
            error: None,
            last_updated: None,
        }
    }
}

impl<T> QueryState<T> {
    pub fn begin(&mut self) {
        self.phase = FetchPhase::Loading;
    }

    pub fn resolve(&mut self, result: Result<T, ApiError>) {
        match result {
            Ok(data) => {
                self.data = Some(data);
                self.error = None;
                self.phase = FetchPhase::Success;
                self.last_updated = Some(Utc::now());
            }
            Err(err) => {
                self.error = Some(error_message(&err));
                self.phase = FetchPhase::Error;
            }
        }
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    pub fn is_loading(&self) -> bool {
        self.phase == FetchPhase::Loading
    }

    /// Nothing to show and not waiting for anything.
    pub fn is_empty(&self) -> bool {
        self.data.is_none() && !self.is_loading()
    }
}

pub fn error_message(err: &ApiError) -> String {
    match err {
        ApiError::Transport(_) => format!("No se pudo conectar con el servidor: {err}"),
        ApiError::Status { .. } if err.is_unauthorized() => format!("Acceso no autorizado: {err}"),
        ApiError::Status { .. } => format!("El servidor respondió con un error: {err}"),
        ApiError::Decode(_) => format!("Respuesta inesperada del servidor: {err}"),
        ApiError::InvalidInput(message) => message.clone(),
        ApiError::Config(_) => format!("Error de configuración: {err}"),
        ApiError::Save(reason) => format!("No se pudo guardar el archivo: {reason}"),
    }
}
