use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use crate::domain::entities::analytics::{
    AcademicDashboard, ActivePeriod, ActiveUsers, AnalyticsEvent, AuthDashboard, EventPage,
    FilterOptions, FunnelResult, GeoDashboard, NavigationDashboard, NotificationsDashboard,
    OverviewDashboard, PerformanceDashboard, PrivacyDashboard, ProceduresDashboard,
    SessionsDashboard, TimeSeries, UserBehaviorDashboard, UserTimeline,
};
use crate::usecase::ports::api::{ApiError, ApiRequest, QueryParams, Transport};
use crate::usecase::services::{decode, segment};

const BASE: &str = "/audit/analytics";

/// Product analytics endpoints under `/audit/analytics`.
#[derive(Clone)]
pub struct AnalyticsService {
    transport: Arc<dyn Transport>,
}

impl AnalyticsService {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    async fn get<T: DeserializeOwned>(&self, path: &str, params: QueryParams) -> Result<T, ApiError> {
        let path = format!("{BASE}{path}");
        let body = self
            .transport
            .execute(ApiRequest::get(path.clone(), params))
            .await?;
        decode(&path, body)
    }

    async fn dashboard<T: DeserializeOwned>(
        &self,
        name: &str,
        params: QueryParams,
    ) -> Result<T, ApiError> {
        self.get(&format!("/dashboard/{name}"), params).await
    }

    pub async fn track_event(&self, event: &AnalyticsEvent) -> Result<Value, ApiError> {
        let body = serde_json::to_value(event).map_err(|err| ApiError::InvalidInput(err.to_string()))?;
        self.transport
            .execute(ApiRequest::post(format!("{BASE}/events"), Some(body)))
            .await
    }

    pub async fn track_batch(&self, events: &[AnalyticsEvent]) -> Result<Value, ApiError> {
        if events.is_empty() {
            return Err(ApiError::InvalidInput("el lote de eventos está vacío".to_string()));
        }
        let body = json!({ "events": events });
        self.transport
            .execute(ApiRequest::post(format!("{BASE}/events/batch"), Some(body)))
            .await
    }

    /// One event goes to `/events`, several to `/events/batch`.
    pub async fn send_events(&self, events: &[AnalyticsEvent]) -> Result<(), ApiError> {
        match events {
            [] => Ok(()),
            [event] => self.track_event(event).await.map(|_| ()),
            many => self.track_batch(many).await.map(|_| ()),
        }
    }

    pub async fn query_events(&self, params: QueryParams) -> Result<EventPage, ApiError> {
        self.get("/events", params).await
    }

    pub async fn filter_options(&self) -> Result<FilterOptions, ApiError> {
        self.get("/filters", QueryParams::new()).await
    }

    pub async fn dashboard_overview(&self, params: QueryParams) -> Result<OverviewDashboard, ApiError> {
        self.dashboard("overview", params).await
    }

    pub async fn dashboard_sessions(&self, params: QueryParams) -> Result<SessionsDashboard, ApiError> {
        self.dashboard("sessions", params).await
    }

    pub async fn dashboard_auth(&self, params: QueryParams) -> Result<AuthDashboard, ApiError> {
        self.dashboard("auth", params).await
    }

    pub async fn dashboard_navigation(
        &self,
        params: QueryParams,
    ) -> Result<NavigationDashboard, ApiError> {
        self.dashboard("navigation", params).await
    }

    pub async fn dashboard_procedures(
        &self,
        params: QueryParams,
    ) -> Result<ProceduresDashboard, ApiError> {
        self.dashboard("procedures", params).await
    }

    pub async fn dashboard_academic(&self, params: QueryParams) -> Result<AcademicDashboard, ApiError> {
        self.dashboard("academic", params).await
    }

    pub async fn dashboard_performance(
        &self,
        params: QueryParams,
    ) -> Result<PerformanceDashboard, ApiError> {
        self.dashboard("performance", params).await
    }

    pub async fn dashboard_geo(&self, params: QueryParams) -> Result<GeoDashboard, ApiError> {
        self.dashboard("geo", params).await
    }

    pub async fn dashboard_privacy(&self, params: QueryParams) -> Result<PrivacyDashboard, ApiError> {
        self.dashboard("privacy", params).await
    }

    pub async fn dashboard_notifications(
        &self,
        params: QueryParams,
    ) -> Result<NotificationsDashboard, ApiError> {
        self.dashboard("notifications", params).await
    }

    pub async fn dashboard_user_behavior(
        &self,
        params: QueryParams,
    ) -> Result<UserBehaviorDashboard, ApiError> {
        self.dashboard("user-behavior", params).await
    }

    pub async fn active_users(
        &self,
        period: ActivePeriod,
        params: QueryParams,
    ) -> Result<ActiveUsers, ApiError> {
        self.get("/users/active", params.with("period", period.as_param()))
            .await
    }

    pub async fn user_timeline(
        &self,
        user_id: &str,
        params: QueryParams,
    ) -> Result<UserTimeline, ApiError> {
        let id = segment("El ID de usuario", user_id)?;
        self.get(&format!("/users/{id}/timeline"), params).await
    }

    /// `steps` are sent comma-joined, in order.
    pub async fn funnel(&self, steps: &[String], params: QueryParams) -> Result<FunnelResult, ApiError> {
        let steps: Vec<&str> = steps
            .iter()
            .map(|step| step.trim())
            .filter(|step| !step.is_empty())
            .collect();
        if steps.len() < 2 {
            return Err(ApiError::InvalidInput(
                "un funnel necesita al menos dos pasos".to_string(),
            ));
        }
        self.get("/funnel", params.with("steps", steps.join(","))).await
    }

    pub async fn timeseries(&self, params: QueryParams) -> Result<TimeSeries, ApiError> {
        self.get("/timeseries", params).await
    }

    pub async fn export_user_data(&self, user_id: &str) -> Result<Value, ApiError> {
        let id = segment("El ID de usuario", user_id)?;
        self.transport
            .execute(ApiRequest::post(format!("{BASE}/privacy/export/{id}"), None))
            .await
    }

    pub async fn delete_user_data(&self, user_id: &str) -> Result<Value, ApiError> {
        let id = segment("El ID de usuario", user_id)?;
        self.transport
            .execute(ApiRequest::delete(format!("{BASE}/privacy/delete/{id}")))
            .await
    }
}
