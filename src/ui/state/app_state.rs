use std::sync::Arc;

use dioxus::prelude::{use_signal, Signal};

use crate::config::AppConfig;
use crate::domain::entities::analytics::EventOutbox;
use crate::domain::entities::audit::RecordLocator;
use crate::usecase::ports::api::Transport;
use crate::usecase::services::analytics_service::AnalyticsService;
use crate::usecase::services::audit_service::AuditService;

/// Read-only services shared by every page.
#[derive(Clone)]
pub struct ApiContext {
    pub audit: AuditService,
    pub analytics: AnalyticsService,
    pub config: Arc<AppConfig>,
}

impl PartialEq for ApiContext {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.config, &other.config)
    }
}

impl ApiContext {
    pub fn new(config: AppConfig, transport: Arc<dyn Transport>) -> Self {
        Self {
            audit: AuditService::new(transport.clone()),
            analytics: AnalyticsService::new(transport),
            config: Arc::new(config),
        }
    }
}

/// Cross-page UI state.
#[derive(Clone, Copy)]
pub struct AppState {
    /// Record picked on the data audit page, consumed by the timeline page.
    pub timeline_target: Signal<Option<RecordLocator>>,
    /// Page views not yet delivered to the analytics endpoint.
    pub outbox: Signal<EventOutbox>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            timeline_target: use_signal(|| None::<RecordLocator>),
            outbox: use_signal(EventOutbox::default),
        }
    }
}
