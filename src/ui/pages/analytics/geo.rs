use dioxus::prelude::*;

use crate::domain::charts::BarDatum;
use crate::domain::entities::analytics::{GeoDashboard, GeoLocation};
use crate::domain::entities::date_range::{DatePreset, DateRange};
use crate::domain::format::format_number;
use crate::domain::funnel::rate;
use crate::domain::geo::{display_name, GeoMetric};
use crate::ui::components::{BarChart, ErrorBanner, MetricCard, StatColor, WorldMap};
use crate::ui::pages::analytics::RangeHeader;
use crate::ui::state::app_state::ApiContext;
use crate::ui::state::query::use_query;
use crate::ui::styles::{
    bar_fill_style, bar_track_style, card_style, grid_style, input_style, section_title_style,
    table_cell_style, table_header_cell_style, PRIMARY,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GeoGrouping {
    Country,
    Region,
    City,
}

impl GeoGrouping {
    const ALL: [GeoGrouping; 3] = [GeoGrouping::Country, GeoGrouping::Region, GeoGrouping::City];

    fn param(self) -> &'static str {
        match self {
            GeoGrouping::Country => "country",
            GeoGrouping::Region => "region",
            GeoGrouping::City => "city",
        }
    }

    fn from_param(raw: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|grouping| grouping.param() == raw)
            .unwrap_or(GeoGrouping::Country)
    }

    fn option_label(self) -> &'static str {
        match self {
            GeoGrouping::Country => "Por País",
            GeoGrouping::Region => "Por Región",
            GeoGrouping::City => "Por Ciudad",
        }
    }

    fn column(self) -> &'static str {
        match self {
            GeoGrouping::Country => "País",
            GeoGrouping::Region => "Región",
            GeoGrouping::City => "Ciudad",
        }
    }

    fn plural(self) -> &'static str {
        match self {
            GeoGrouping::Country => "Países",
            GeoGrouping::Region => "Regiones",
            GeoGrouping::City => "Ciudades",
        }
    }

    fn name_of(self, row: &GeoLocation) -> String {
        match (self, row.key()) {
            (GeoGrouping::Country, Some(code)) => display_name(code, None),
            (_, Some(name)) => name.to_string(),
            (_, None) => "Desconocido".to_string(),
        }
    }
}

#[component]
pub fn GeoAnalytics() -> Element {
    let api = use_context::<ApiContext>();
    let query = use_query::<GeoDashboard>();
    let range = use_signal(|| DateRange::from_preset(DatePreset::Last30Days));
    let mut grouping = use_signal(|| GeoGrouping::Country);

    let load = use_callback(move |_: ()| {
        let api = api.clone();
        let params = range.peek().to_params().with("groupBy", grouping.peek().param());
        query.run(async move { api.analytics.dashboard_geo(params).await });
    });
    use_effect(move || {
        range.read();
        grouping.read();
        load.call(());
    });

    let state = query.snapshot();
    let data = state.data.clone().unwrap_or_default();
    let loading = state.is_loading();
    let group = grouping();
    let total_users: u64 = data.locations.iter().map(|row| row.users).sum();
    let total_events: u64 = data.locations.iter().map(|row| row.events).sum();
    let top: Vec<BarDatum> = data
        .locations
        .iter()
        .take(10)
        .map(|row| BarDatum::new(group.name_of(row), row.users as f64, PRIMARY))
        .collect();
    let top_title = format!("Top 10 {}", group.plural());
    let header = table_header_cell_style();
    let cell = table_cell_style();

    rsx! {
        RangeHeader {
            title: "Análisis Geográfico",
            subtitle: "Distribución de usuarios y eventos por ubicación geográfica",
            range,
            loading,
            on_refresh: move |_| load.call(()),
        }
        div { style: "display: flex; justify-content: flex-end; margin-bottom: 12px;",
            select {
                style: "{input_style()} width: 180px;",
                onchange: move |evt| grouping.set(GeoGrouping::from_param(&evt.value())),
                for option in GeoGrouping::ALL {
                    option { key: "{option.param()}", value: option.param(), selected: option == group, "{option.option_label()}" }
                }
            }
        }
        ErrorBanner { message: state.error.clone(), on_dismiss: move |_| query.dismiss_error() }
        div { style: "{grid_style(3)}",
            MetricCard { title: "Ubicaciones Únicas", value: data.total_locations as f64, loading }
            MetricCard { title: "Usuarios por Ubicación", value: total_users as f64, color: StatColor::Accent, loading }
            MetricCard { title: "Eventos por Ubicación", value: total_events as f64, color: StatColor::Dark, loading }
        }
        if group == GeoGrouping::Country {
            div { style: "margin-bottom: 16px;",
                WorldMap { locations: data.locations.clone(), title: "Distribución de Usuarios por País", metric: GeoMetric::Users }
            }
        }
        div { style: "margin-bottom: 16px;",
            BarChart { title: top_title, data: top }
        }
        div { style: "{card_style()}",
            h3 { style: "{section_title_style()}", "Todas las Ubicaciones" }
            table { style: "width: 100%; border-collapse: collapse;",
                thead { tr {
                    th { style: "{header}", "#" }
                    th { style: "{header}", "{group.column()}" }
                    th { style: "{header}", "Usuarios" }
                    th { style: "{header}", "Eventos" }
                    th { style: "{header}", "% Usuarios" }
                } }
                tbody {
                    for (idx, row) in data.locations.iter().enumerate() {
                        {
                            let share = rate(row.users, total_users);
                            rsx! {
                                tr { key: "{idx}",
                                    td { style: "{cell} color: #6b7280;", "{idx + 1}" }
                                    td { style: "{cell} font-weight: 500;", "{group.name_of(row)}" }
                                    td { style: "{cell}", "{format_number(row.users as f64)}" }
                                    td { style: "{cell}", "{format_number(row.events as f64)}" }
                                    td { style: "{cell}",
                                        div { style: "display: flex; align-items: center; gap: 8px;",
                                            div { style: "{bar_track_style(8)} width: 80px;",
                                                div { style: "{bar_fill_style(share, PRIMARY)}" }
                                            }
                                            span { "{share:.1}%" }
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
