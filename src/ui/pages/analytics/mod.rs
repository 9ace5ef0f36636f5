//! Product analytics pages. They share a date range toolbar and, on the
//! overview, a periodic refresh owned by the page.

pub mod academic;
pub mod geo;
pub mod navigation;
pub mod overview;
pub mod performance;
pub mod privacy;
pub mod procedures;
pub mod sessions;
pub mod user_behavior;
pub mod user_explorer;

pub use academic::AcademicAnalytics;
pub use geo::GeoAnalytics;
pub use navigation::NavigationAnalytics;
pub use overview::AnalyticsOverview;
pub use performance::PerformanceAnalytics;
pub use privacy::PrivacyAnalytics;
pub use procedures::ProcedureAnalytics;
pub use sessions::SessionAnalytics;
pub use user_behavior::UserBehavior;
pub use user_explorer::UserExplorer;

use chrono::Local;
use dioxus::prelude::*;

use crate::domain::entities::date_range::{DatePreset, DateRange};
use crate::platform::export::{export_file_name, save_json};
use crate::ui::components::{DateRangePicker, PageHeader};
use crate::ui::state::app_state::ApiContext;
use crate::ui::styles::{button_style, ButtonKind};
use crate::usecase::ports::api::ApiError;
use crate::usecase::services::refresh::{RefreshSchedule, RefreshSwitch};

pub fn default_range() -> DateRange {
    DateRange::from_preset(DatePreset::Last7Days)
}

/// Title, subtitle, range picker and a manual refresh button.
#[component]
pub fn RangeHeader(
    title: String,
    subtitle: String,
    mut range: Signal<DateRange>,
    #[props(default)] loading: bool,
    on_refresh: Option<EventHandler<()>>,
) -> Element {
    let value = range();
    rsx! {
        PageHeader {
            title,
            subtitle,
            actions: rsx! {
                DateRangePicker { value, on_change: move |next| range.set(next) }
                if let Some(on_refresh) = on_refresh {
                    button {
                        style: "{button_style(ButtonKind::Primary, loading)}",
                        disabled: loading,
                        onclick: move |_| on_refresh.call(()),
                        if loading { "Actualizando..." } else { "Actualizar" }
                    }
                }
            },
        }
    }
}

/// Re-runs `reload` every period while the schedule is running. Changing
/// the schedule stops the previous loop; unmounting the page stops it too.
pub fn use_auto_refresh(schedule: Signal<RefreshSchedule>, reload: Callback<()>) {
    let switch = use_hook(RefreshSwitch::new);
    use_drop({
        let switch = switch.clone();
        move || switch.stop()
    });
    use_effect(move || {
        let current = schedule();
        if let Some(refresh) = switch.apply(current, move || async move { reload.call(()) }) {
            spawn(refresh);
        }
    });
}

/// Fetches everything stored about a user and asks where to save it.
/// Resolves to the message shown to the operator.
pub async fn export_user(api: ApiContext, user_id: String) -> Result<String, ApiError> {
    let payload = api.analytics.export_user_data(&user_id).await?;
    let file_name = export_file_name(&user_id, Local::now().date_naive());
    match save_json(&file_name, &payload) {
        Ok(Some(path)) => Ok(format!("Datos exportados en {}", path.display())),
        Ok(None) => Ok("Exportación cancelada".to_string()),
        Err(err) => Err(ApiError::Save(format!("{err:#}"))),
    }
}
