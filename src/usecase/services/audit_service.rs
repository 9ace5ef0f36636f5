use std::sync::Arc;

use serde_json::Value;

use crate::domain::entities::audit::{
    AccessEndpointStat, AccessGeoStats, AccessLogRecord, AccessUserStat, DataAuditRecord,
    DataEndpointStat, EndpointTimelinePoint, ErrorStats, IpStat, LegalHoldRequest,
    OperationCounts, Paged, RecordKey, RecordLocator, RetentionStats, TableChangeStat,
    TimelineEvent, UserChangeStat,
};
use crate::usecase::ports::api::{ApiError, ApiRequest, QueryParams, Transport};
use crate::usecase::services::{decode, segment};

const BASE: &str = "/audit";

/// Change-log, access-log and retention endpoints under `/audit`.
#[derive(Clone)]
pub struct AuditService {
    transport: Arc<dyn Transport>,
}

impl AuditService {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    async fn get<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        params: QueryParams,
    ) -> Result<T, ApiError> {
        let path = format!("{BASE}{path}");
        let body = self
            .transport
            .execute(ApiRequest::get(path.clone(), params))
            .await?;
        decode(&path, body)
    }

    async fn post(&self, path: &str, body: Option<Value>) -> Result<Value, ApiError> {
        self.transport
            .execute(ApiRequest::post(format!("{BASE}{path}"), body))
            .await
    }

    pub async fn query_data(&self, params: QueryParams) -> Result<Paged<DataAuditRecord>, ApiError> {
        self.get("/data", params).await
    }

    pub async fn data_by_correlation(
        &self,
        correlation_id: &str,
    ) -> Result<Vec<DataAuditRecord>, ApiError> {
        let id = segment("El ID de correlación", correlation_id)?;
        self.get(&format!("/data/correlation/{id}"), QueryParams::new())
            .await
    }

    pub async fn data_stats_by_table(
        &self,
        params: QueryParams,
    ) -> Result<Vec<TableChangeStat>, ApiError> {
        self.get("/data/stats/by-table", params).await
    }

    pub async fn data_stats_by_user(
        &self,
        params: QueryParams,
    ) -> Result<Vec<UserChangeStat>, ApiError> {
        self.get("/data/stats/by-user", params).await
    }

    pub async fn data_stats_by_operation(
        &self,
        params: QueryParams,
    ) -> Result<OperationCounts, ApiError> {
        self.get("/data/stats/by-operation", params).await
    }

    pub async fn data_stats_by_endpoint(
        &self,
        params: QueryParams,
    ) -> Result<Vec<DataEndpointStat>, ApiError> {
        self.get("/data/stats/by-endpoint", params).await
    }

    /// Simple ids go in the path; composite keys travel as a JSON query value.
    pub async fn record_timeline(
        &self,
        locator: &RecordLocator,
    ) -> Result<Vec<TimelineEvent>, ApiError> {
        if !locator.is_complete() {
            return Err(ApiError::InvalidInput(
                "Por favor complete todos los campos requeridos".to_string(),
            ));
        }
        let mut params = QueryParams::new();
        params
            .insert("systemId", locator.system_id.as_str())
            .insert("schemaName", locator.schema_name.as_str())
            .insert("tableName", locator.table_name.as_str());
        match &locator.key {
            RecordKey::Id(id) => {
                let id = segment("El ID del registro", id)?;
                params.insert("isComposite", "false");
                self.get(&format!("/data/timeline/{id}"), params).await
            }
            RecordKey::Composite(values) => {
                let encoded = serde_json::to_string(values)
                    .map_err(|err| ApiError::InvalidInput(err.to_string()))?;
                params
                    .insert("keyValues", encoded)
                    .insert("isComposite", "true");
                self.get("/data/timeline", params).await
            }
        }
    }

    pub async fn query_access(
        &self,
        params: QueryParams,
    ) -> Result<Paged<AccessLogRecord>, ApiError> {
        self.get("/access", params).await
    }

    pub async fn access_by_correlation(
        &self,
        correlation_id: &str,
    ) -> Result<Vec<AccessLogRecord>, ApiError> {
        let id = segment("El ID de correlación", correlation_id)?;
        self.get(&format!("/access/correlation/{id}"), QueryParams::new())
            .await
    }

    pub async fn access_by_session(
        &self,
        session_id: &str,
    ) -> Result<Vec<AccessLogRecord>, ApiError> {
        let id = segment("El ID de sesión", session_id)?;
        self.get(&format!("/access/session/{id}"), QueryParams::new())
            .await
    }

    pub async fn access_error_stats(&self, params: QueryParams) -> Result<ErrorStats, ApiError> {
        self.get("/access/stats/errors", params).await
    }

    pub async fn access_stats_by_user(
        &self,
        params: QueryParams,
    ) -> Result<Vec<AccessUserStat>, ApiError> {
        self.get("/access/stats/by-user", params).await
    }

    pub async fn access_stats_by_endpoint(
        &self,
        params: QueryParams,
    ) -> Result<Vec<AccessEndpointStat>, ApiError> {
        self.get("/access/stats/by-endpoint", params).await
    }

    pub async fn slow_requests(
        &self,
        params: QueryParams,
    ) -> Result<Vec<AccessLogRecord>, ApiError> {
        self.get("/access/stats/slow-requests", params).await
    }

    pub async fn access_geo_stats(&self, params: QueryParams) -> Result<AccessGeoStats, ApiError> {
        self.get("/access/stats/geo", params).await
    }

    pub async fn access_stats_by_ip(&self, params: QueryParams) -> Result<Vec<IpStat>, ApiError> {
        self.get("/access/stats/by-ip", params).await
    }

    pub async fn endpoint_timeline(
        &self,
        params: QueryParams,
    ) -> Result<Vec<EndpointTimelinePoint>, ApiError> {
        self.get("/access/stats/endpoint-timeline", params).await
    }

    pub async fn retention_stats(&self) -> Result<RetentionStats, ApiError> {
        self.get("/retention/stats", QueryParams::new()).await
    }

    pub async fn apply_legal_hold(&self, request: &LegalHoldRequest) -> Result<Value, ApiError> {
        let body = legal_hold_body(request)?;
        self.post("/retention/legal-hold/apply", Some(body)).await
    }

    pub async fn remove_legal_hold(&self, request: &LegalHoldRequest) -> Result<Value, ApiError> {
        let body = legal_hold_body(request)?;
        self.post("/retention/legal-hold/remove", Some(body)).await
    }

    pub async fn run_retention_cleanup(&self) -> Result<Value, ApiError> {
        self.post("/retention/cleanup", None).await
    }
}

fn legal_hold_body(request: &LegalHoldRequest) -> Result<Value, ApiError> {
    let has_target = [&request.system_id, &request.table_name, &request.correlation_id]
        .iter()
        .any(|field| field.as_deref().is_some_and(|value| !value.trim().is_empty()));
    if !has_target {
        return Err(ApiError::InvalidInput(
            "indique un sistema, tabla o ID de correlación".to_string(),
        ));
    }
    if request.reason.trim().is_empty() {
        return Err(ApiError::InvalidInput("el motivo es requerido".to_string()));
    }
    serde_json::to_value(request).map_err(|err| ApiError::InvalidInput(err.to_string()))
}
