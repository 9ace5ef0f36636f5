use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::entities::lenient;
use crate::usecase::ports::api::to_iso_string;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterOptions {
    #[serde(default)]
    pub systems: Vec<String>,
    #[serde(default)]
    pub roles: Vec<String>,
    #[serde(default)]
    pub platforms: Vec<String>,
    #[serde(default)]
    pub countries: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NamedCount {
    pub name: String,
    #[serde(default)]
    pub count: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverviewDashboard {
    #[serde(default)]
    pub total_events: u64,
    #[serde(default)]
    pub unique_users: u64,
    #[serde(default)]
    pub unique_sessions: u64,
    /// Seconds.
    #[serde(default)]
    pub avg_session_duration: f64,
    #[serde(default)]
    pub event_type_counts: BTreeMap<String, u64>,
    #[serde(default)]
    pub top_events: Vec<NamedCount>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivePeriod {
    Daily,
    Weekly,
    Monthly,
}

impl ActivePeriod {
    pub fn as_param(self) -> &'static str {
        match self {
            ActivePeriod::Daily => "dau",
            ActivePeriod::Weekly => "wau",
            ActivePeriod::Monthly => "mau",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveUsers {
    #[serde(default)]
    pub active_users: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActiveUserSummary {
    pub dau: u64,
    pub wau: u64,
    pub mau: u64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSeriesPoint {
    pub time: String,
    #[serde(default)]
    pub users: u64,
    #[serde(default)]
    pub events: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSeries {
    #[serde(default)]
    pub timeline: Vec<TimeSeriesPoint>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PlatformCount {
    pub platform: String,
    #[serde(default)]
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HourCount {
    #[serde(deserialize_with = "lenient::string")]
    pub hour: String,
    #[serde(default)]
    pub count: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionsDashboard {
    #[serde(default)]
    pub total_sessions: u64,
    /// Seconds.
    #[serde(default)]
    pub avg_session_duration: f64,
    /// Percentage, 0-100.
    #[serde(default)]
    pub bounce_rate: f64,
    #[serde(default)]
    pub sessions_by_platform: Vec<PlatformCount>,
    #[serde(default)]
    pub sessions_by_hour: Vec<HourCount>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AuthMethodStat {
    pub method: String,
    #[serde(default)]
    pub successes: u64,
    #[serde(default)]
    pub failures: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FailureReason {
    pub reason: String,
    #[serde(default)]
    pub count: u64,
    #[serde(default)]
    pub users: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthDashboard {
    #[serde(default)]
    pub login_attempts: u64,
    #[serde(default)]
    pub login_successes: u64,
    #[serde(default)]
    pub login_failures: u64,
    #[serde(default)]
    pub success_rate: f64,
    /// Milliseconds.
    #[serde(default)]
    pub avg_login_time: f64,
    #[serde(default)]
    pub method_stats: Vec<AuthMethodStat>,
    #[serde(default)]
    pub failure_reasons: Vec<FailureReason>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ScreenViews {
    pub screen: String,
    #[serde(default)]
    pub views: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ScreenCount {
    pub screen: String,
    #[serde(default)]
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NavigationFlow {
    pub from: String,
    pub to: String,
    #[serde(default)]
    pub count: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationDashboard {
    #[serde(default)]
    pub total_screen_views: u64,
    #[serde(default)]
    pub unique_screens: u64,
    #[serde(default)]
    pub total_sessions: u64,
    #[serde(default)]
    pub avg_screens_per_session: f64,
    /// Seconds.
    #[serde(default)]
    pub avg_time_on_screen: f64,
    #[serde(default)]
    pub top_screens: Vec<ScreenViews>,
    #[serde(default)]
    pub entry_points: Vec<ScreenCount>,
    #[serde(default)]
    pub exit_points: Vec<ScreenCount>,
    #[serde(default)]
    pub flows: Vec<NavigationFlow>,
}

/// One funnel step as returned by `/funnel` and embedded in procedures.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunnelStep {
    #[serde(alias = "step")]
    pub step_name: String,
    #[serde(default)]
    pub users: u64,
    #[serde(default)]
    pub conversion_rate: f64,
    #[serde(default)]
    pub drop_off_rate: f64,
    #[serde(default)]
    pub avg_duration: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct FunnelResult {
    #[serde(default)]
    pub steps: Vec<FunnelStep>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcedureStat {
    pub procedure_type: String,
    #[serde(default)]
    pub started: u64,
    #[serde(default)]
    pub completed: u64,
    #[serde(default)]
    pub abandoned: u64,
    #[serde(default)]
    pub conversion_rate: f64,
    #[serde(default)]
    pub abandonment_rate: f64,
    /// Seconds.
    #[serde(default)]
    pub avg_duration: Option<f64>,
    #[serde(default)]
    pub funnel: Vec<FunnelStep>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProceduresDashboard {
    #[serde(default)]
    pub total_started: u64,
    #[serde(default)]
    pub total_completed: u64,
    #[serde(default)]
    pub total_abandoned: u64,
    #[serde(default)]
    pub procedures: Vec<ProcedureStat>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentMetrics {
    #[serde(default)]
    pub courses_enrolled: u64,
    #[serde(default)]
    pub grades_viewed: u64,
    #[serde(default)]
    pub materials_downloaded: u64,
    #[serde(default)]
    pub tasks_submitted: u64,
    #[serde(default)]
    pub surveys_started: u64,
    #[serde(default)]
    pub surveys_completed: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfessorMetrics {
    #[serde(default)]
    pub tasks_created: u64,
    #[serde(default)]
    pub attendance_marked: u64,
    #[serde(default)]
    pub grades_assigned: u64,
    #[serde(default)]
    pub materials_uploaded: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForumMetrics {
    #[serde(default)]
    pub posts_created: u64,
    #[serde(default)]
    pub replies_created: u64,
    #[serde(default)]
    pub posts_deleted: u64,
    #[serde(default)]
    pub topics_deleted: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventTypeCount {
    pub event_type: String,
    #[serde(default)]
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AcademicActivityPoint {
    pub date: String,
    #[serde(default)]
    pub grades_viewed: u64,
    #[serde(default)]
    pub materials_downloaded: u64,
    #[serde(default)]
    pub tasks_created: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseActivity {
    pub name: String,
    #[serde(default)]
    pub views: u64,
    #[serde(default)]
    pub downloads: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DayOfWeekCount {
    pub day: String,
    #[serde(default)]
    pub events: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AcademicDashboard {
    #[serde(default)]
    pub student_metrics: StudentMetrics,
    #[serde(default)]
    pub professor_metrics: ProfessorMetrics,
    #[serde(default)]
    pub forum_metrics: ForumMetrics,
    #[serde(default)]
    pub events_by_type: Vec<EventTypeCount>,
    #[serde(default)]
    pub activity_timeline: Vec<AcademicActivityPoint>,
    #[serde(default)]
    pub top_courses: Vec<CourseActivity>,
    #[serde(default)]
    pub activity_by_day_of_week: Vec<DayOfWeekCount>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformancePoint {
    pub date: String,
    #[serde(default)]
    pub avg_load_time: f64,
    #[serde(default)]
    pub avg_api_time: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlowEndpoint {
    pub path: String,
    #[serde(default)]
    pub method: Option<String>,
    #[serde(default)]
    pub avg_time: f64,
    #[serde(default)]
    pub calls: u64,
    #[serde(default)]
    pub error_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PlatformHealth {
    pub platform: String,
    #[serde(default)]
    pub errors: u64,
    #[serde(default)]
    pub crashes: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ErrorTypeCount {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub count: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceDashboard {
    #[serde(default)]
    pub health_score: f64,
    /// Milliseconds.
    #[serde(default)]
    pub avg_load_time: f64,
    /// Milliseconds.
    #[serde(default)]
    pub avg_api_response_time: f64,
    #[serde(default)]
    pub total_errors: u64,
    #[serde(default)]
    pub crash_rate: f64,
    /// Percentages of page loads per speed band.
    #[serde(default)]
    pub fast_loads: f64,
    #[serde(default)]
    pub moderate_loads: f64,
    #[serde(default)]
    pub slow_loads: f64,
    #[serde(default)]
    pub timeline: Vec<PerformancePoint>,
    #[serde(default)]
    pub slow_endpoints: Vec<SlowEndpoint>,
    #[serde(default)]
    pub platform_comparison: Vec<PlatformHealth>,
    #[serde(default)]
    pub errors_by_type: Vec<ErrorTypeCount>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeoLocation {
    #[serde(default)]
    pub country: Option<String>,
    /// Region or city name when the dashboard is grouped by those.
    #[serde(default, alias = "region", alias = "city")]
    pub location: Option<String>,
    #[serde(default)]
    pub users: u64,
    #[serde(default)]
    pub events: u64,
}

impl GeoLocation {
    pub fn key(&self) -> Option<&str> {
        self.country.as_deref().or(self.location.as_deref())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeoDashboard {
    #[serde(default)]
    pub total_locations: u64,
    #[serde(default)]
    pub locations: Vec<GeoLocation>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrivacyDashboard {
    #[serde(default)]
    pub total_with_consent: u64,
    #[serde(default)]
    pub total_without_consent: u64,
    #[serde(default)]
    pub consent_rate: f64,
    #[serde(default)]
    pub consents_granted: u64,
    #[serde(default)]
    pub consents_revoked: u64,
    #[serde(default)]
    pub export_requests: u64,
    #[serde(default)]
    pub deletion_requests: u64,
}

impl PrivacyDashboard {
    pub fn net_consent_change(&self) -> i64 {
        self.consents_granted as i64 - self.consents_revoked as i64
    }
}

pub type NotificationsDashboard = BTreeMap<String, Value>;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageStat {
    pub page: String,
    #[serde(default)]
    pub views: u64,
    #[serde(default)]
    pub unique_users: u64,
    /// Milliseconds.
    #[serde(default)]
    pub avg_time_on_page: f64,
    /// Milliseconds.
    #[serde(default)]
    pub total_time_on_page: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RoleStat {
    pub role: String,
    #[serde(default)]
    pub users: u64,
    #[serde(default)]
    pub sessions: u64,
    #[serde(default)]
    pub events: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BehaviorUserStat {
    #[serde(deserialize_with = "lenient::string")]
    pub user_id: String,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub sessions: u64,
    #[serde(default)]
    pub page_views: u64,
    #[serde(default)]
    pub events: u64,
    #[serde(default)]
    pub last_activity: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FacultyStat {
    #[serde(default, deserialize_with = "lenient::string")]
    pub faculty_id: String,
    pub faculty_name: String,
    #[serde(default)]
    pub users: u64,
    #[serde(default)]
    pub sessions: u64,
    #[serde(default)]
    pub events: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CareerStat {
    #[serde(default, deserialize_with = "lenient::string")]
    pub career_id: String,
    pub career_name: String,
    #[serde(default)]
    pub users: u64,
    #[serde(default)]
    pub sessions: u64,
    #[serde(default)]
    pub events: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserBehaviorDashboard {
    #[serde(default)]
    pub page_stats: Vec<PageStat>,
    #[serde(default)]
    pub role_stats: Vec<RoleStat>,
    #[serde(default)]
    pub user_stats: Vec<BehaviorUserStat>,
    #[serde(default)]
    pub faculty_stats: Vec<FacultyStat>,
    #[serde(default)]
    pub career_stats: Vec<CareerStat>,
}

impl UserBehaviorDashboard {
    /// Mean of per-page averages, in milliseconds.
    pub fn mean_time_on_page(&self) -> f64 {
        if self.page_stats.is_empty() {
            return 0.0;
        }
        let sum: f64 = self.page_stats.iter().map(|page| page.avg_time_on_page).sum();
        sum / self.page_stats.len() as f64
    }
}

/// Event payload accepted by `POST /events`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsEvent {
    pub event_type: String,
    pub event_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub parameters: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub user_properties: Map<String, Value>,
}

impl AnalyticsEvent {
    /// The console reporting which of its own screens was opened.
    pub fn page_view(path: &str, at: DateTime<Utc>) -> Self {
        let mut parameters = Map::new();
        parameters.insert("page".to_string(), Value::String(path.to_string()));
        parameters.insert("app".to_string(), Value::String("audit-console".to_string()));
        Self {
            event_type: "page_view".to_string(),
            event_name: "page_view".to_string(),
            user_id: None,
            session_id: None,
            timestamp: Some(to_iso_string(at)),
            parameters,
            user_properties: Map::new(),
        }
    }
}

/// Events waiting for delivery. A failed send puts its events back in front
/// so they go out with the next one; beyond `capacity` the oldest are dropped.
#[derive(Debug, Clone, PartialEq)]
pub struct EventOutbox {
    pending: Vec<AnalyticsEvent>,
    capacity: usize,
}

impl Default for EventOutbox {
    fn default() -> Self {
        Self::with_capacity(50)
    }
}

impl EventOutbox {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            pending: Vec::new(),
            capacity: capacity.max(1),
        }
    }

    pub fn push(&mut self, event: AnalyticsEvent) {
        self.pending.push(event);
        self.trim();
    }

    pub fn take(&mut self) -> Vec<AnalyticsEvent> {
        std::mem::take(&mut self.pending)
    }

    pub fn restore(&mut self, mut events: Vec<AnalyticsEvent>) {
        events.append(&mut self.pending);
        self.pending = events;
        self.trim();
    }

    fn trim(&mut self) {
        if self.pending.len() > self.capacity {
            let excess = self.pending.len() - self.capacity;
            self.pending.drain(..excess);
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserEvent {
    pub timestamp: String,
    #[serde(default)]
    pub event_type: Option<String>,
    #[serde(default)]
    pub event_name: Option<String>,
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub parameters: Map<String, Value>,
    #[serde(default)]
    pub user_properties: Map<String, Value>,
}

impl UserEvent {
    pub fn platform(&self) -> Option<&str> {
        self.user_properties.get("platform").and_then(Value::as_str)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventPage {
    #[serde(default, alias = "data")]
    pub events: Vec<UserEvent>,
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub total_pages: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserTimeline {
    #[serde(default)]
    pub events: Vec<UserEvent>,
    #[serde(default)]
    pub total_events: u64,
    #[serde(default)]
    pub current_page: u32,
    #[serde(default)]
    pub total_pages: u32,
}

impl UserTimeline {
    /// Distinct session ids in the loaded events.
    pub fn session_count(&self) -> usize {
        let mut sessions: Vec<&str> = self
            .events
            .iter()
            .filter_map(|event| event.session_id.as_deref())
            .collect();
        sessions.sort_unstable();
        sessions.dedup();
        sessions.len()
    }

    /// Most recent `userProperties.platform` seen in the loaded events.
    pub fn platform(&self) -> Option<&str> {
        self.events.iter().find_map(UserEvent::platform)
    }
}
