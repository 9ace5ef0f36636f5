use std::cell::Cell;
use std::collections::{HashMap, VecDeque};
use std::fs;
use std::path::PathBuf;
use std::rc::Rc;
use std::sync::{Arc, Mutex};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use async_trait::async_trait;
use chrono::NaiveDate;
use serde_json::{json, Map, Value};

use crate::config::{AppConfig, AuthConfig, API_KEY_VAR, API_URL_VAR, REFRESH_SECS_VAR, SESSION_TOKEN_VAR};
use crate::domain::charts::{flow_shares, polyline_points, FlowGraph, FlowLink};
use crate::domain::diff::{field_diff, js_string, param_chips, FieldChange};
use crate::domain::entities::analytics::{
    ActivePeriod, AnalyticsEvent, EventOutbox, FunnelStep, NavigationFlow, UserTimeline,
};
use crate::domain::entities::audit::{
    DataAuditRecord, LegalHoldRequest, Operation, Paged, RecordKey, RecordLocator,
};
use crate::domain::entities::date_range::{DatePreset, DateRange};
use crate::domain::entities::filter::{
    DimensionFilterState, Facet, FieldKind, FilterState, SubmittedSearch,
};
use crate::domain::entities::pagination::{PaginationState, DEFAULT_PAGE_LIMIT};
use crate::domain::entities::query::{error_message, FetchPhase, QueryState};
use crate::domain::format::{
    format_bytes, format_duration, format_duration_ms, format_number, or_dash, truncate_label,
    Trend, TrendDirection,
};
use crate::domain::funnel::{conversion_colors, overall_conversion, parse_steps, rate, users_lost};
use crate::domain::geo::{display_name, Choropleth, NEUTRAL_COLOR, SCALE};
use crate::infra::http::client::{parse_body, HttpTransport};
use crate::platform::desktop::dirs::ensure_webview_data_dir;
use crate::platform::export::{export_file_name, write_json};
use crate::router::Route;
use crate::ui::styles::{bar_fill_style, button_style, ButtonKind};
use crate::usecase::ports::api::{ApiError, ApiRequest, HttpMethod, QueryParams, Transport};
use crate::usecase::services::analytics_service::AnalyticsService;
use crate::usecase::services::audit_service::AuditService;
use crate::usecase::services::fetch::FetchTracker;
use crate::usecase::services::refresh::{RefreshSchedule, RefreshSwitch};

fn unique_test_dir(prefix: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock should be after epoch")
        .as_nanos();
    std::env::temp_dir().join(format!("audit-console-{prefix}-{nanos}"))
}

/// Replays canned bodies and remembers every request it was given.
struct RecordingTransport {
    requests: Mutex<Vec<ApiRequest>>,
    responses: Mutex<VecDeque<Result<Value, ApiError>>>,
}

impl RecordingTransport {
    fn replying(responses: Vec<Result<Value, ApiError>>) -> Arc<Self> {
        Arc::new(Self {
            requests: Mutex::new(Vec::new()),
            responses: Mutex::new(responses.into()),
        })
    }

    fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().expect("request log lock").clone()
    }
}

#[async_trait(?Send)]
impl Transport for RecordingTransport {
    async fn execute(&self, request: ApiRequest) -> Result<Value, ApiError> {
        self.requests.lock().expect("request log lock").push(request);
        self.responses
            .lock()
            .expect("response queue lock")
            .pop_front()
            .unwrap_or(Ok(Value::Null))
    }
}

fn audit_service(transport: &Arc<RecordingTransport>) -> AuditService {
    AuditService::new(transport.clone())
}

fn analytics_service(transport: &Arc<RecordingTransport>) -> AnalyticsService {
    AnalyticsService::new(transport.clone())
}

fn object(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        other => panic!("expected object, got {other}"),
    }
}

fn test_config(lookup: &[(&str, &str)]) -> anyhow::Result<AppConfig> {
    let values: HashMap<String, String> = lookup
        .iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect();
    AppConfig::from_lookup(|name| values.get(name).cloned())
}

#[test]
fn format_number_groups_thousands_and_trims_fraction() {
    assert_eq!(format_number(1234567.0), "1,234,567");
    assert_eq!(format_number(1234.5), "1,234.5");
    assert_eq!(format_number(0.12345), "0.123");
    assert_eq!(format_number(-9876.0), "-9,876");
    assert_eq!(format_number(f64::NAN), "0");
}

#[test]
fn durations_render_in_largest_units() {
    assert_eq!(format_duration(45.0), "45s");
    assert_eq!(format_duration(125.0), "2m 5s");
    assert_eq!(format_duration(3725.0), "1h 2m");
    assert_eq!(format_duration_ms(0.0), "0s");
    assert_eq!(format_duration_ms(61_500.0), "1m 1s");
}

#[test]
fn bytes_switch_units_at_powers_of_1024() {
    assert_eq!(format_bytes(500.0), "500 B");
    assert_eq!(format_bytes(2048.0), "2.0 KB");
    assert_eq!(format_bytes(5.0 * 1024.0 * 1024.0), "5.0 MB");
    assert_eq!(format_bytes(2.0 * 1024.0 * 1024.0 * 1024.0), "2.0 GB");
}

#[test]
fn trend_reports_direction_and_absolute_change() {
    let up = Trend::compute(120.0, Some(100.0));
    assert_eq!(up.direction, TrendDirection::Up);
    assert_eq!(up.percentage, "20.0");

    let down = Trend::compute(75.0, Some(100.0));
    assert_eq!(down.direction, TrendDirection::Down);
    assert_eq!(down.percentage, "25.0");

    let doubled = Trend::compute(150.0, Some(100.0));
    assert_eq!(doubled.percentage, "50.0");

    let unknown = Trend::compute(10.0, Some(0.0));
    assert_eq!(unknown.direction, TrendDirection::Neutral);
    assert_eq!(unknown.percentage, "0");
    assert_eq!(Trend::compute(10.0, None).direction, TrendDirection::Neutral);
}

#[test]
fn or_dash_and_truncate_label_cover_blank_and_long_text() {
    assert_eq!(or_dash(None), "-");
    assert_eq!(or_dash(Some("   ")), "-");
    assert_eq!(or_dash(Some("usuarios")), "usuarios");
    assert_eq!(truncate_label("procedimiento_largo", 5), "proce...");
    assert_eq!(truncate_label("corto", 10), "corto");
}

#[test]
fn pagination_bounds_and_window_text() {
    let first = PaginationState::new(1, 20, 95);
    assert_eq!(first.total_pages, 5);
    assert_eq!(first.prev(), None);
    assert_eq!(first.next(), Some(2));
    assert_eq!(first.range_text(), "Mostrando 1 a 20 de 95 resultados");

    let last = PaginationState::new(9, 20, 95);
    assert_eq!(last.page, 5, "page should clamp to the last page");
    assert_eq!(last.next(), None);
    assert_eq!(last.window(), (81, 95));
    assert_eq!(last.page_text(), "Página 5 de 5");

    let empty = PaginationState::new(3, 20, 0);
    assert_eq!(empty.page, 1);
    assert!(!empty.shows_controls());
    assert_eq!(empty.window(), (0, 0));
}

#[test]
fn pagination_from_server_derives_missing_page_count() {
    let paged: Paged<u32> = Paged {
        data: vec![1, 2, 3],
        page: 2,
        limit: 20,
        total: 41,
        total_pages: 0,
    };
    let state = PaginationState::from_server(&paged);
    assert_eq!(state.total_pages, 3);
    assert_eq!(state.page, 2);
    assert!(state.can_prev() && state.can_next());
}

#[test]
fn field_diff_reports_changed_and_added_fields_only() {
    let old = object(json!({ "name": "Ana", "age": 30, "gone": true }));
    let new = object(json!({ "name": "Ana", "age": 31, "email": "ana@example.com" }));

    let changes = field_diff(&old, &new);

    assert_eq!(
        changes,
        vec![
            FieldChange {
                field: "age".to_string(),
                old: "30".to_string(),
                new: "31".to_string(),
            },
            FieldChange {
                field: "email".to_string(),
                old: "undefined".to_string(),
                new: "ana@example.com".to_string(),
            },
        ]
    );
}

#[test]
fn field_diff_suppresses_equal_values() {
    let old = object(json!({ "a": 1, "b": 2 }));
    let new = object(json!({ "a": 1, "b": 3 }));

    let changes = field_diff(&old, &new);

    assert_eq!(changes.len(), 1, "only b changed: {changes:?}");
    assert_eq!(changes[0].field, "b");
}

#[test]
fn whole_floats_compare_equal_to_integers() {
    let changes = field_diff(&object(json!({ "a": 1, "b": 2.5 })), &object(json!({ "a": 1.0, "b": 2.5 })));

    assert!(changes.is_empty(), "1 and 1.0 should render the same: {changes:?}");
    assert_eq!(js_string(&json!(1000.0)), "1000");
    assert_eq!(js_string(&json!(-0.0)), "0");
    assert_eq!(js_string(&json!(0.25)), "0.25");
    assert_eq!(js_string(&json!(42)), "42");
}

#[test]
fn js_string_renders_containers_compactly() {
    assert_eq!(js_string(&json!("texto")), "texto");
    assert_eq!(js_string(&Value::Null), "null");
    assert_eq!(js_string(&json!([1, 2])), "[1,2]");
    assert_eq!(js_string(&json!({ "a": 1 })), "{\"a\":1}");
}

#[test]
fn param_chips_skip_internal_keys_and_cut_long_values() {
    let params = object(json!({
        "_internal": "x",
        "a": "corto",
        "b": "x".repeat(40),
        "c": { "nested": 1 },
        "d": 4,
        "e": false,
        "f": "sobra",
    }));

    let chips = param_chips(&params, 5);

    assert_eq!(chips.len(), 5);
    assert_eq!(chips[0], ("a".to_string(), "corto".to_string()));
    assert_eq!(chips[1].1.chars().count(), 30);
    assert_eq!(chips[2], ("c".to_string(), "{\"nested\":1}".to_string()));
    assert!(chips.iter().all(|(key, _)| !key.starts_with('_')));
    assert!(chips.iter().all(|(key, _)| key != "f"));
}

#[test]
fn choropleth_buckets_follow_intensity_thresholds() {
    let map = Choropleth::from_pairs([("pe", 100.0), ("CO", 50.0), ("EC", 5.0), ("", 9.0)]);

    assert_eq!(map.len(), 3, "blank codes are ignored");
    assert_eq!(map.max(), 100.0);
    assert_eq!(map.value(Some("pe"), None), 100.0);
    assert_eq!(map.value(None, Some("XX")), 0.0);
    assert_eq!(map.bucket(0.0), NEUTRAL_COLOR);
    assert_eq!(map.bucket(100.0), SCALE[5]);
    assert_eq!(map.bucket(50.0), SCALE[3]);
    assert_eq!(map.bucket(5.0), SCALE[0]);
    assert_eq!(map.top(2), vec![("PE".to_string(), 100.0), ("CO".to_string(), 50.0)]);
}

#[test]
fn country_names_fall_back_to_geometry_then_code() {
    assert_eq!(display_name("pe", None), "Perú");
    assert_eq!(display_name("FR", Some("France")), "France");
    assert_eq!(display_name("ZZ", None), "ZZ");
}

#[test]
fn funnel_helpers_handle_empty_entry_step() {
    let steps = vec![
        FunnelStep {
            step_name: "inicio".to_string(),
            users: 200,
            conversion_rate: 100.0,
            drop_off_rate: 0.0,
            avg_duration: None,
        },
        FunnelStep {
            step_name: "fin".to_string(),
            users: 50,
            conversion_rate: 25.0,
            drop_off_rate: 75.0,
            avg_duration: Some(12.5),
        },
    ];
    assert_eq!(overall_conversion(&steps), 25.0);
    assert_eq!(users_lost(&steps, 1), 150);
    assert_eq!(users_lost(&steps, 0), 0);
    assert_eq!(overall_conversion(&[]), 0.0);
    assert_eq!(parse_steps(" a, ,b ,c"), vec!["a", "b", "c"]);
}

#[test]
fn conversion_rate_and_colours() {
    assert_eq!(rate(3, 0), 0.0);
    assert_eq!(rate(1, 4), 25.0);
    assert_eq!(conversion_colors(70.0).1, "#166534");
    assert_eq!(conversion_colors(40.0).1, "#854d0e");
    assert_eq!(conversion_colors(39.9).1, "#991b1b");
}

#[test]
fn flow_graph_keeps_busiest_transitions() {
    let flows = vec![
        NavigationFlow {
            from: "inicio".to_string(),
            to: "perfil".to_string(),
            count: 5,
        },
        NavigationFlow {
            from: "inicio".to_string(),
            to: "notas".to_string(),
            count: 20,
        },
        NavigationFlow {
            from: "notas".to_string(),
            to: "inicio".to_string(),
            count: 0,
        },
        NavigationFlow {
            from: "perfil".to_string(),
            to: "notas".to_string(),
            count: 10,
        },
    ];

    let graph = FlowGraph::build(&flows, 2);

    assert_eq!(graph.sources, vec!["inicio", "perfil"]);
    assert_eq!(graph.targets, vec!["notas"]);
    assert_eq!(
        graph.links,
        vec![
            FlowLink { source: 0, target: 0, value: 20 },
            FlowLink { source: 1, target: 0, value: 10 },
        ]
    );
    assert_eq!(graph.max(), 20);

    let shares = flow_shares(&flows);
    assert!((shares[1] - 20.0 / 35.0 * 100.0).abs() < 1e-9);
    assert!(FlowGraph::build(&[], 5).is_empty());
}

#[test]
fn polyline_points_scale_into_box() {
    assert_eq!(polyline_points(&[0.0, 5.0, 10.0], 10.0, 100.0, 50.0), "0.0,50.0 50.0,25.0 100.0,0.0");
    assert_eq!(polyline_points(&[3.0], 0.0, 100.0, 50.0), "0.0,50.0");
}

#[test]
fn dimension_filters_toggle_and_clear() {
    let mut filters = DimensionFilterState::default();
    filters.toggle(Facet::Platform, "android");
    filters.toggle(Facet::Role, "estudiante");
    assert_eq!(filters.active_count(), 2);

    filters.toggle(Facet::Platform, "android");
    assert_eq!(filters.get(Facet::Platform), None);

    filters.toggle(Facet::Country, "PE");
    filters.clear(Facet::Country);
    assert_eq!(filters.get(Facet::Country), None);
    assert_eq!(filters.active_count(), 1);

    let mut params = QueryParams::new();
    filters.apply_to(&mut params);
    assert_eq!(params.get("role"), Some("estudiante"));

    filters.clear_all();
    assert!(filters.is_empty());
}

#[test]
fn audit_filters_reject_negative_numbers() {
    let mut filters = FilterState::access_audit();
    let numeric = filters
        .fields()
        .find(|field| matches!(field.kind, FieldKind::Number))
        .map(|field| field.name)
        .expect("access audit should have a numeric filter");
    filters.set(numeric, "-5");

    let err = filters.to_params().expect_err("negative filter should be rejected");
    assert!(matches!(err, ApiError::InvalidInput(_)));

    filters.clear();
    let params = filters.to_params().expect("defaults should be valid");
    assert!(params.get(numeric).is_none());
}

#[test]
fn custom_range_rejects_inverted_days() {
    let err = DateRange::custom("2024-05-10", "2024-05-01").expect_err("inverted range");
    assert!(err.contains("anterior"));

    let range = DateRange::custom("2024-05-01", "2024-05-10").expect("valid range");
    assert!(range.start <= range.end);
    let params = range.to_params();
    assert!(params.get("startDate").is_some_and(|value| value.ends_with('Z')));
    assert!(params.get("endDate").is_some());
}

#[test]
fn presets_cover_inclusive_days() {
    let today = NaiveDate::from_ymd_opt(2024, 3, 15).expect("valid date");
    assert_eq!(
        DatePreset::Last7Days.days(today),
        (NaiveDate::from_ymd_opt(2024, 3, 9).expect("valid date"), today)
    );
    let yesterday = NaiveDate::from_ymd_opt(2024, 3, 14).expect("valid date");
    assert_eq!(DatePreset::Yesterday.days(today), (yesterday, yesterday));
}

#[test]
fn query_params_drop_blank_values() {
    let mut params = QueryParams::new();
    params.insert("page", "1").insert("search", "   ");
    params.insert_opt::<u32>("limit", None);
    assert_eq!(params.len(), 1);

    params.insert("page", "");
    assert!(params.is_empty());
}

#[test]
fn record_key_accepts_object_or_encoded_object() {
    let from_object = RecordKey::from_key_values(Some(&json!({ "id": 7 }))).expect("object key");
    assert_eq!(from_object.display_id(), "7");

    let from_text = RecordKey::from_key_values(Some(&json!("{\"codigo\":\"A1\"}"))).expect("text key");
    assert_eq!(from_text.display_id(), "A1");

    assert!(RecordKey::from_key_values(Some(&json!("[1]"))).is_err());
    assert!(RecordKey::from_key_values(None).is_err());
}

#[test]
fn data_audit_rows_accept_numeric_ids() {
    let row: DataAuditRecord = serde_json::from_value(json!({
        "id": 42,
        "timestamp": "2024-05-01T10:00:00Z",
        "operation": "MERGE",
        "userId": 1001,
        "keyValues": { "id": 42 },
    }))
    .expect("row should decode");

    assert_eq!(row.id.as_deref(), Some("42"));
    assert_eq!(row.user_id.as_deref(), Some("1001"));
    assert_eq!(row.operation, Operation::Other);
    let locator = RecordLocator::from_row(&row).expect("row has a key");
    assert!(!locator.is_complete(), "row has no system, schema or table");
}

#[test]
fn user_timeline_counts_distinct_sessions() {
    let timeline: UserTimeline = serde_json::from_value(json!({
        "events": [
            { "timestamp": "t1", "sessionId": "s1", "userProperties": { "platform": "web" } },
            { "timestamp": "t2", "sessionId": "s1" },
            { "timestamp": "t3", "sessionId": "s2" },
            { "timestamp": "t4" },
        ],
        "totalEvents": 4,
        "currentPage": 1,
        "totalPages": 1,
    }))
    .expect("timeline should decode");

    assert_eq!(timeline.session_count(), 2);
    assert_eq!(timeline.platform(), Some("web"));
}

#[test]
fn query_state_keeps_data_after_failed_refresh() {
    let mut state = QueryState::<u32>::default();
    state.begin();
    assert!(state.is_loading());

    state.resolve(Ok(7));
    assert_eq!(state.phase, FetchPhase::Success);
    assert!(state.last_updated.is_some());

    state.begin();
    state.resolve(Err(ApiError::Transport("timeout".to_string())));
    assert_eq!(state.data, Some(7));
    assert_eq!(state.phase, FetchPhase::Error);
    assert!(state.error.as_deref().is_some_and(|msg| msg.starts_with("No se pudo conectar")));

    state.dismiss_error();
    assert!(state.error.is_none());
}

#[test]
fn error_messages_pass_validation_text_through() {
    assert_eq!(
        error_message(&ApiError::InvalidInput("Ingrese un ID".to_string())),
        "Ingrese un ID"
    );
    let denied = ApiError::Status {
        status: 401,
        body: String::new(),
    };
    assert!(denied.is_unauthorized());
    assert!(error_message(&denied).starts_with("Acceso no autorizado"));
}

#[test]
fn fetch_tracker_drops_superseded_responses() {
    let tracker = FetchTracker::new();
    let mut state = QueryState::<&str>::default();

    let first = tracker.begin();
    let second = tracker.begin();

    assert!(!tracker.apply(first, &mut state, Ok("viejo")));
    assert!(state.data.is_none());
    assert!(tracker.apply(second, &mut state, Ok("nuevo")));
    assert_eq!(state.data, Some("nuevo"));
}

#[test]
fn fetch_tracker_ignores_everything_after_cancel() {
    let tracker = FetchTracker::new();
    let mut state = QueryState::<u32>::default();
    let ticket = tracker.begin();

    tracker.cancel();

    assert!(!tracker.is_active());
    assert!(!tracker.apply(ticket, &mut state, Ok(1)));
    let late = tracker.begin();
    assert!(!tracker.apply(late, &mut state, Ok(2)));
    assert!(state.data.is_none());
}

#[tokio::test(start_paused = true)]
async fn late_response_for_old_filter_never_wins() {
    let tracker = FetchTracker::new();
    let state = Rc::new(std::cell::RefCell::new(QueryState::<&str>::default()));

    let slow = {
        let tracker = tracker.clone();
        let state = state.clone();
        let ticket = tracker.begin();
        async move {
            tokio::time::sleep(Duration::from_millis(500)).await;
            tracker.apply(ticket, &mut state.borrow_mut(), Ok("filtro X"))
        }
    };
    let fast = {
        let tracker = tracker.clone();
        let state = state.clone();
        let ticket = tracker.begin();
        async move {
            tokio::time::sleep(Duration::from_millis(10)).await;
            tracker.apply(ticket, &mut state.borrow_mut(), Ok("filtro Y"))
        }
    };

    let (slow_applied, fast_applied) = tokio::join!(slow, fast);

    assert!(!slow_applied, "superseded response should be discarded");
    assert!(fast_applied);
    assert_eq!(state.borrow().data, Some("filtro Y"));
}

#[tokio::test(start_paused = true)]
async fn stale_response_arriving_first_keeps_view_loading() {
    let tracker = FetchTracker::new();
    let state = Rc::new(std::cell::RefCell::new(QueryState::<&str>::default()));
    let old_ticket = tracker.start(&mut state.borrow_mut());
    let new_ticket = tracker.start(&mut state.borrow_mut());

    let old = async {
        let settled = tracker
            .settle(old_ticket, async {
                tokio::time::sleep(Duration::from_millis(10)).await;
                Ok::<_, ApiError>("filtro X")
            })
            .await;
        assert!(settled.is_none(), "superseded response should be dropped");
    };
    let observer = async {
        tokio::time::sleep(Duration::from_millis(100)).await;
        let seen = state.borrow();
        assert_eq!(seen.phase, FetchPhase::Loading);
        assert!(seen.data.is_none());
    };
    let new = async {
        let result = tracker
            .settle(new_ticket, async {
                tokio::time::sleep(Duration::from_millis(500)).await;
                Ok::<_, ApiError>("filtro Y")
            })
            .await
            .expect("latest response should be kept");
        tracker.apply(new_ticket, &mut state.borrow_mut(), result)
    };

    let ((), (), applied) = tokio::join!(old, observer, new);

    assert!(applied);
    assert_eq!(state.borrow().phase, FetchPhase::Success);
    assert_eq!(state.borrow().data, Some("filtro Y"));
}

#[tokio::test(start_paused = true)]
async fn leaving_the_view_drops_a_pending_response() {
    let tracker = FetchTracker::new();
    let mut state = QueryState::<u32>::default();
    let ticket = tracker.start(&mut state);

    let pending = tracker.settle(ticket, async {
        tokio::time::sleep(Duration::from_millis(50)).await;
        Ok::<_, ApiError>(7)
    });
    tracker.cancel();

    assert!(pending.await.is_none());
    assert!(state.data.is_none());
}

#[test]
fn refresh_schedule_labels_and_zero_period() {
    let mut schedule = RefreshSchedule::default();
    assert!(schedule.is_running());
    assert_eq!(schedule.label(), "Auto-actualizar cada minuto");

    schedule.toggle();
    assert!(!schedule.is_running());

    assert_eq!(RefreshSchedule::new(Duration::from_secs(300)).label(), "Auto-actualizar cada 5 minutos");
    assert!(!RefreshSchedule::new(Duration::ZERO).is_running());
}

fn counting_tick(ticks: &Rc<Cell<u32>>) -> impl FnMut() -> std::future::Ready<()> {
    let counter = ticks.clone();
    move || {
        counter.set(counter.get() + 1);
        std::future::ready(())
    }
}

#[tokio::test(start_paused = true)]
async fn auto_refresh_ticks_once_per_period() {
    let ticks = Rc::new(Cell::new(0u32));
    let switch = RefreshSwitch::new();
    let refresh = switch
        .apply(RefreshSchedule::new(Duration::from_secs(60)), counting_tick(&ticks))
        .expect("running schedule should produce a loop");

    let outcome = tokio::time::timeout(Duration::from_secs(185), refresh).await;

    assert!(outcome.is_err(), "periodic loop should still be running");
    assert_eq!(ticks.get(), 3);
}

#[tokio::test(start_paused = true)]
async fn switching_auto_refresh_off_stops_further_ticks() {
    let ticks = Rc::new(Cell::new(0u32));
    let switch = RefreshSwitch::new();
    let mut schedule = RefreshSchedule::new(Duration::from_secs(60));
    let refresh = switch
        .apply(schedule, counting_tick(&ticks))
        .expect("running schedule should produce a loop");

    let operator = async {
        tokio::time::sleep(Duration::from_secs(125)).await;
        assert_eq!(ticks.get(), 2);
        schedule.toggle();
        assert!(switch.apply(schedule, counting_tick(&ticks)).is_none());
        tokio::time::sleep(Duration::from_secs(300)).await;
    };

    tokio::join!(refresh, operator);

    assert_eq!(ticks.get(), 2, "no tick may follow the off switch");
}

#[tokio::test(start_paused = true)]
async fn reapplying_a_schedule_retires_the_previous_loop() {
    let old_ticks = Rc::new(Cell::new(0u32));
    let new_ticks = Rc::new(Cell::new(0u32));
    let switch = RefreshSwitch::new();
    let schedule = RefreshSchedule::new(Duration::from_secs(60));
    let old = switch
        .apply(schedule, counting_tick(&old_ticks))
        .expect("first loop");
    let new = switch
        .apply(schedule, counting_tick(&new_ticks))
        .expect("second loop");

    let outcome = tokio::time::timeout(Duration::from_secs(130), async {
        tokio::join!(old, new);
    })
    .await;

    assert!(outcome.is_err(), "current loop keeps running");
    assert_eq!(old_ticks.get(), 0);
    assert_eq!(new_ticks.get(), 2);
}

#[test]
fn zero_period_schedule_never_starts_a_loop() {
    let ticks = Rc::new(Cell::new(0u32));
    let switch = RefreshSwitch::new();

    assert!(switch
        .apply(RefreshSchedule::new(Duration::ZERO), counting_tick(&ticks))
        .is_none());
    assert_eq!(ticks.get(), 0);
}

#[tokio::test]
async fn data_query_hits_audit_data_with_params() {
    let transport = RecordingTransport::replying(vec![Ok(json!({
        "data": [{ "timestamp": "2024-05-01T10:00:00Z", "operation": "INSERT" }],
        "page": 1,
        "limit": 20,
        "total": 1,
        "totalPages": 1,
    }))]);
    let service = audit_service(&transport);

    let page = service
        .query_data(QueryParams::new().with("tableName", "usuarios"))
        .await
        .expect("query should succeed");

    assert_eq!(page.data.len(), 1);
    assert_eq!(page.data[0].operation, Operation::Insert);
    let requests = transport.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, HttpMethod::Get);
    assert_eq!(requests[0].path, "/audit/data");
    assert_eq!(requests[0].params.get("tableName"), Some("usuarios"));
}

#[tokio::test]
async fn paging_keeps_the_filters_of_the_last_search() {
    let transport = RecordingTransport::replying(vec![Ok(json!({
        "data": [],
        "page": 2,
        "limit": 20,
        "total": 30,
        "totalPages": 2,
    }))]);
    let service = audit_service(&transport);
    let mut filters = FilterState::data_audit();
    let mut search = SubmittedSearch::default();
    filters.set("tableName", "usuarios");
    search.submit(&filters).expect("filters should validate");

    filters.set("tableName", "roles");
    filters.set("userName", "ana");
    service
        .query_data(search.page(2, DEFAULT_PAGE_LIMIT))
        .await
        .expect("page two");

    let sent = transport.requests();
    assert_eq!(sent[0].params.get("tableName"), Some("usuarios"));
    assert_eq!(sent[0].params.get("userName"), None);
    assert_eq!(sent[0].params.get("page"), Some("2"));
    assert_eq!(sent[0].params.get("limit"), Some("20"));
    assert_eq!(sent[0].params.get("sortOrder"), Some("desc"));
}

#[test]
fn rejected_search_leaves_previous_filters_in_place() {
    let mut filters = FilterState::data_audit();
    let mut search = SubmittedSearch::default();
    filters.set("systemId", "matricula");
    search.submit(&filters).expect("filters should validate");

    filters.set("startDate", "no es fecha");
    assert!(matches!(search.submit(&filters), Err(ApiError::InvalidInput(_))));

    let params = search.page(1, 20);
    assert_eq!(params.get("systemId"), Some("matricula"));
    assert_eq!(params.get("startDate"), None);
}

#[tokio::test]
async fn mismatched_body_becomes_decode_error() {
    let transport = RecordingTransport::replying(vec![Ok(json!({ "data": "oops" }))]);
    let service = audit_service(&transport);

    let err = service
        .query_data(QueryParams::new())
        .await
        .expect_err("shape mismatch should fail");

    assert!(matches!(err, ApiError::Decode(ref message) if message.starts_with("/audit/data")));
}

#[tokio::test]
async fn composite_timeline_sends_encoded_key() {
    let transport = RecordingTransport::replying(vec![Ok(json!([]))]);
    let service = audit_service(&transport);
    let locator = RecordLocator {
        key: RecordKey::Composite(object(json!({ "curso": "MAT101", "seccion": 2 }))),
        system_id: "academico".to_string(),
        schema_name: "public".to_string(),
        table_name: "matriculas".to_string(),
    };

    let events = service.record_timeline(&locator).await.expect("timeline");

    assert!(events.is_empty());
    let request = &transport.requests()[0];
    assert_eq!(request.path, "/audit/data/timeline");
    assert_eq!(request.params.get("isComposite"), Some("true"));
    assert_eq!(request.params.get("keyValues"), Some("{\"curso\":\"MAT101\",\"seccion\":2}"));
    assert_eq!(request.params.get("tableName"), Some("matriculas"));
}

#[tokio::test]
async fn simple_timeline_id_is_path_encoded() {
    let transport = RecordingTransport::replying(vec![Ok(json!([]))]);
    let service = audit_service(&transport);
    let locator = RecordLocator {
        key: RecordKey::Id("abc def".to_string()),
        system_id: "academico".to_string(),
        schema_name: "public".to_string(),
        table_name: "alumnos".to_string(),
    };

    service.record_timeline(&locator).await.expect("timeline");

    let request = &transport.requests()[0];
    assert_eq!(request.path, "/audit/data/timeline/abc%20def");
    assert_eq!(request.params.get("isComposite"), Some("false"));
}

#[tokio::test]
async fn incomplete_locator_never_reaches_transport() {
    let transport = RecordingTransport::replying(Vec::new());
    let service = audit_service(&transport);
    let locator = RecordLocator {
        key: RecordKey::Id("1".to_string()),
        system_id: String::new(),
        schema_name: "public".to_string(),
        table_name: "alumnos".to_string(),
    };

    let err = service.record_timeline(&locator).await.expect_err("incomplete");

    assert!(matches!(err, ApiError::InvalidInput(_)));
    assert!(transport.requests().is_empty());
}

#[tokio::test]
async fn legal_hold_requires_target_and_reason() {
    let transport = RecordingTransport::replying(vec![Ok(Value::Null)]);
    let service = audit_service(&transport);

    let missing_target = LegalHoldRequest {
        reason: "auditoría".to_string(),
        ..LegalHoldRequest::default()
    };
    assert!(service.apply_legal_hold(&missing_target).await.is_err());

    let request = LegalHoldRequest {
        table_name: Some("pagos".to_string()),
        reason: "investigación".to_string(),
        ..LegalHoldRequest::default()
    };
    service.apply_legal_hold(&request).await.expect("hold applied");

    let sent = transport.requests();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].method, HttpMethod::Post);
    assert_eq!(sent[0].path, "/audit/retention/legal-hold/apply");
    assert_eq!(
        sent[0].body,
        Some(json!({ "tableName": "pagos", "reason": "investigación" }))
    );
}

#[tokio::test]
async fn funnel_needs_two_steps_and_joins_them() {
    let transport = RecordingTransport::replying(vec![Ok(json!({ "steps": [] }))]);
    let service = analytics_service(&transport);

    let err = service
        .funnel(&["solo".to_string()], QueryParams::new())
        .await
        .expect_err("one step is not a funnel");
    assert!(matches!(err, ApiError::InvalidInput(_)));
    assert!(transport.requests().is_empty());

    let steps = parse_steps("procedure_started, procedure_completed");
    let _ = service.funnel(&steps, QueryParams::new()).await;

    let request = &transport.requests()[0];
    assert_eq!(request.path, "/audit/analytics/funnel");
    assert_eq!(request.params.get("steps"), Some("procedure_started,procedure_completed"));
}

#[tokio::test]
async fn user_endpoints_reject_blank_ids() {
    let transport = RecordingTransport::replying(Vec::new());
    let service = analytics_service(&transport);

    assert!(service.user_timeline("  ", QueryParams::new()).await.is_err());
    assert!(service.export_user_data("").await.is_err());
    assert!(transport.requests().is_empty());

    let _ = service.delete_user_data("u/1").await;
    let request = &transport.requests()[0];
    assert_eq!(request.method, HttpMethod::Delete);
    assert_eq!(request.path, "/audit/analytics/privacy/delete/u%2F1");
}

#[tokio::test]
async fn transport_errors_propagate_unchanged() {
    let transport = RecordingTransport::replying(vec![Err(ApiError::Status {
        status: 500,
        body: "boom".to_string(),
    })]);
    let service = analytics_service(&transport);

    let err = service
        .dashboard_overview(QueryParams::new())
        .await
        .expect_err("server error");

    assert_eq!(
        err,
        ApiError::Status {
            status: 500,
            body: "boom".to_string(),
        }
    );
    assert_eq!(transport.requests()[0].path, "/audit/analytics/dashboard/overview");
}

#[tokio::test]
async fn tracking_posts_events_and_rejects_empty_batches() {
    let transport = RecordingTransport::replying(vec![Ok(json!({ "ok": true })), Ok(Value::Null)]);
    let service = analytics_service(&transport);
    let event = AnalyticsEvent {
        event_type: "NAVIGATION".to_string(),
        event_name: "screen_view".to_string(),
        user_id: Some("u1".to_string()),
        session_id: None,
        timestamp: None,
        parameters: object(json!({ "screen": "inicio" })),
        user_properties: Map::new(),
    };

    service.track_event(&event).await.expect("event accepted");
    assert!(matches!(service.track_batch(&[]).await, Err(ApiError::InvalidInput(_))));
    service.track_batch(&[event]).await.expect("batch accepted");

    let sent = transport.requests();
    assert_eq!(sent.len(), 2);
    assert_eq!(sent[0].path, "/audit/analytics/events");
    assert_eq!(
        sent[0].body,
        Some(json!({
            "eventType": "NAVIGATION",
            "eventName": "screen_view",
            "userId": "u1",
            "parameters": { "screen": "inicio" },
        }))
    );
    assert_eq!(sent[1].path, "/audit/analytics/events/batch");
    assert!(sent[1].body.as_ref().is_some_and(|body| body["events"].as_array().is_some_and(|events| events.len() == 1)));
}

#[tokio::test]
async fn send_events_picks_single_or_batch_endpoint() {
    let transport = RecordingTransport::replying(vec![Ok(Value::Null), Ok(Value::Null)]);
    let service = analytics_service(&transport);
    let at = chrono::DateTime::parse_from_rfc3339("2024-05-01T10:00:00Z")
        .expect("timestamp")
        .with_timezone(&chrono::Utc);
    let first = AnalyticsEvent::page_view("/dashboard", at);
    let second = AnalyticsEvent::page_view("/data-audit", at);

    service.send_events(&[]).await.expect("nothing to send");
    service.send_events(&[first.clone()]).await.expect("single event");
    service.send_events(&[first, second]).await.expect("batch");

    let sent = transport.requests();
    assert_eq!(sent.len(), 2);
    assert_eq!(sent[0].path, "/audit/analytics/events");
    let body = sent[0].body.clone().expect("event body");
    assert_eq!(body["eventType"], "page_view");
    assert_eq!(body["parameters"]["page"], "/dashboard");
    assert_eq!(body["timestamp"], "2024-05-01T10:00:00.000Z");
    assert_eq!(sent[1].path, "/audit/analytics/events/batch");
}

#[test]
fn outbox_requeues_failed_events_ahead_of_new_ones() {
    let at = chrono::Utc::now();
    let mut outbox = EventOutbox::with_capacity(3);
    outbox.push(AnalyticsEvent::page_view("/a", at));
    let failed = outbox.take();
    assert!(outbox.take().is_empty());

    outbox.push(AnalyticsEvent::page_view("/b", at));
    outbox.restore(failed);
    outbox.push(AnalyticsEvent::page_view("/c", at));
    outbox.push(AnalyticsEvent::page_view("/d", at));

    let pages: Vec<Value> = outbox
        .take()
        .into_iter()
        .map(|event| event.parameters["page"].clone())
        .collect();
    assert_eq!(pages, vec![json!("/b"), json!("/c"), json!("/d")]);
}

#[tokio::test]
async fn event_listing_and_active_users_use_query_params() {
    let transport = RecordingTransport::replying(vec![
        Ok(json!({ "data": [{ "timestamp": "t1", "eventName": "login" }], "total": 1, "page": 1, "totalPages": 1 })),
        Ok(json!({ "activeUsers": 12 })),
        Ok(json!({ "pushSent": 3 })),
    ]);
    let service = analytics_service(&transport);

    let page = service
        .query_events(QueryParams::new().with("eventType", "AUTH"))
        .await
        .expect("events");
    let active = service
        .active_users(ActivePeriod::Weekly, QueryParams::new())
        .await
        .expect("active users");
    let notifications = service
        .dashboard_notifications(QueryParams::new())
        .await
        .expect("notifications");

    assert_eq!(page.events.len(), 1);
    assert_eq!(active.active_users, 12);
    assert_eq!(notifications.get("pushSent"), Some(&json!(3)));
    let sent = transport.requests();
    assert_eq!(sent[0].params.get("eventType"), Some("AUTH"));
    assert_eq!(sent[1].path, "/audit/analytics/users/active");
    assert_eq!(sent[1].params.get("period"), Some("wau"));
    assert_eq!(sent[2].path, "/audit/analytics/dashboard/notifications");
}

#[test]
fn http_transport_joins_base_path_and_query() {
    let config = test_config(&[(API_URL_VAR, "https://audit.example.com/api/")]).expect("config");
    let transport = HttpTransport::new(&config).expect("client should build");
    let request = ApiRequest::get(
        "/audit/access",
        QueryParams::new().with("page", "2").with("userName", "ana maría"),
    );

    let url = transport.url_for(&request).expect("url");

    assert_eq!(
        url.as_str(),
        "https://audit.example.com/api/audit/access?page=2&userName=ana+mar%C3%ADa"
    );
    let built = transport.build_request(&ApiRequest::delete("/audit/x")).expect("request");
    assert_eq!(built.method(), reqwest::Method::DELETE);
}

#[test]
fn parse_body_maps_status_and_empty_bodies() {
    assert_eq!(parse_body(204, ""), Ok(Value::Null));
    assert_eq!(parse_body(200, "{\"ok\":true}"), Ok(json!({ "ok": true })));
    assert!(matches!(parse_body(200, "<html>"), Err(ApiError::Decode(_))));
    assert_eq!(
        parse_body(404, "missing"),
        Err(ApiError::Status {
            status: 404,
            body: "missing".to_string(),
        })
    );
}

#[test]
fn config_prefers_session_token_over_api_key() {
    let config = test_config(&[
        (API_URL_VAR, "http://localhost:4000"),
        (SESSION_TOKEN_VAR, "tok"),
        (API_KEY_VAR, "key"),
        (REFRESH_SECS_VAR, "30"),
    ])
    .expect("config");

    assert_eq!(config.auth, AuthConfig::SessionToken("tok".to_string()));
    assert_eq!(config.auth.header(), Some(("authorization", "Bearer tok".to_string())));
    assert_eq!(config.refresh_interval, Duration::from_secs(30));
    assert_eq!(format!("{:?}", config.auth), "SessionToken(***)");
}

#[test]
fn config_falls_back_to_defaults_and_rejects_bad_values() {
    let config = test_config(&[(API_KEY_VAR, " key ")]).expect("config");
    assert_eq!(config.api_base_url.as_str(), "http://localhost:3000/");
    assert_eq!(config.auth.header(), Some(("x-api-key", "key".to_string())));

    assert!(test_config(&[(API_URL_VAR, "ftp://example.com")]).is_err());
    assert!(test_config(&[(REFRESH_SECS_VAR, "soon")]).is_err());
    assert_eq!(test_config(&[]).expect("config").auth, AuthConfig::Anonymous);
}

#[test]
fn routes_render_their_paths() {
    assert_eq!(Route::Dashboard {}.to_string(), "/dashboard");
    assert_eq!(Route::ForensicAnalysis {}.to_string(), "/forensic-analysis");
    assert_eq!(Route::AnalyticsOverview {}.to_string(), "/analytics/overview");
    assert_eq!(Route::UserExplorer {}.to_string(), "/analytics/users");
}

#[test]
fn ensure_webview_data_dir_creates_nested_dir() {
    let temp_dir = unique_test_dir("webview");

    let created = ensure_webview_data_dir(&temp_dir).expect("should create webview dir");

    assert!(created.is_dir());
    assert_eq!(created, temp_dir.join("webview2"));
    fs::remove_dir_all(&temp_dir).expect("should cleanup temp dir");
}

#[test]
fn export_writes_pretty_json_under_safe_name() {
    let date = NaiveDate::from_ymd_opt(2024, 5, 1).expect("valid date");
    let name = export_file_name("ana/../x", date);
    assert_eq!(name, "user_data_ana____x_2024-05-01.json");

    let temp_dir = unique_test_dir("export");
    let path = temp_dir.join("nested").join(&name);
    write_json(&path, &json!({ "userId": "ana" })).expect("should write export");

    let text = fs::read_to_string(&path).expect("should read export");
    assert!(text.contains("\n  \"userId\": \"ana\""));
    fs::remove_dir_all(&temp_dir).expect("should cleanup temp dir");
}

#[test]
fn styles_reflect_state() {
    assert!(button_style(ButtonKind::Primary, true).contains("not-allowed"));
    assert!(button_style(ButtonKind::Danger, false).contains("#dc2626"));
    assert!(bar_fill_style(140.0, "#000").contains("width: 100.0%"));
}
