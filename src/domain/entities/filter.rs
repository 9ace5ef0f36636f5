use std::collections::BTreeMap;

use crate::domain::entities::analytics::FilterOptions;
use crate::domain::entities::date_range::parse_local_datetime;
use crate::usecase::ports::api::{ApiError, QueryParams};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Select,
    Number,
    DateTime,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FilterField {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub placeholder: &'static str,
    pub options: Vec<(String, String)>,
    pub default: String,
}

impl FilterField {
    pub fn text(name: &'static str, label: &'static str, placeholder: &'static str) -> Self {
        Self {
            name,
            label,
            kind: FieldKind::Text,
            placeholder,
            options: Vec::new(),
            default: String::new(),
        }
    }

    pub fn number(name: &'static str, label: &'static str, placeholder: &'static str) -> Self {
        Self {
            kind: FieldKind::Number,
            ..Self::text(name, label, placeholder)
        }
    }

    pub fn datetime(name: &'static str, label: &'static str) -> Self {
        Self {
            kind: FieldKind::DateTime,
            ..Self::text(name, label, "")
        }
    }

    /// Select with an implicit leading "Todos" entry mapping to empty.
    pub fn select(name: &'static str, label: &'static str, options: &[&str]) -> Self {
        Self {
            kind: FieldKind::Select,
            options: options
                .iter()
                .map(|value| (value.to_string(), value.to_string()))
                .collect(),
            ..Self::text(name, label, "")
        }
    }

    /// Hidden field carried in the query but not rendered.
    pub fn fixed(name: &'static str, default: &str) -> Self {
        Self {
            default: default.to_string(),
            ..Self::text(name, "", "")
        }
    }

    pub fn is_visible(&self) -> bool {
        !self.label.is_empty()
    }
}

/// Search form state: committed values are only turned into a query on
/// explicit search.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterState {
    fields: Vec<FilterField>,
    values: BTreeMap<&'static str, String>,
}

impl FilterState {
    pub fn new(fields: Vec<FilterField>) -> Self {
        let values = fields
            .iter()
            .map(|field| (field.name, field.default.clone()))
            .collect();
        Self { fields, values }
    }

    pub fn data_audit() -> Self {
        Self::new(vec![
            FilterField::text("systemId", "Sistema", "ID del sistema"),
            FilterField::text("schemaName", "Esquema", "Nombre del esquema"),
            FilterField::text("tableName", "Tabla", "Nombre de la tabla"),
            FilterField::select("operation", "Operación", &["INSERT", "UPDATE", "DELETE"]),
            FilterField::text("userName", "Usuario", "Nombre de usuario"),
            FilterField::text("userId", "ID Usuario", "ID del usuario"),
            FilterField::datetime("startDate", "Fecha Inicio"),
            FilterField::datetime("endDate", "Fecha Fin"),
            FilterField::fixed("sortBy", "timestamp"),
            FilterField::fixed("sortOrder", "desc"),
        ])
    }

    pub fn access_audit() -> Self {
        Self::new(vec![
            FilterField::text("systemId", "Sistema", "ID del sistema"),
            FilterField::text("userName", "Usuario", "Nombre de usuario"),
            FilterField::text("userId", "ID Usuario", "ID del usuario"),
            FilterField::text("ipAddress", "IP", "Dirección IP"),
            FilterField::select(
                "requestMethod",
                "Método",
                &["GET", "POST", "PUT", "PATCH", "DELETE"],
            ),
            FilterField::text("requestPath", "Ruta", "/api/..."),
            FilterField::number("responseStatus", "Status", "200, 404, 500..."),
            FilterField::datetime("startDate", "Fecha Inicio"),
            FilterField::datetime("endDate", "Fecha Fin"),
            FilterField::number("minDuration", "Duración mín. (ms)", "0"),
            FilterField::number("maxDuration", "Duración máx. (ms)", "5000"),
            FilterField::fixed("sortBy", "timestamp"),
            FilterField::fixed("sortOrder", "desc"),
        ])
    }

    pub fn fields(&self) -> impl Iterator<Item = &FilterField> {
        self.fields.iter().filter(|field| field.is_visible())
    }

    pub fn get(&self, name: &str) -> &str {
        self.values.get(name).map(String::as_str).unwrap_or("")
    }

    pub fn set(&mut self, name: &str, value: impl Into<String>) {
        if let Some(field) = self.fields.iter().find(|field| field.name == name) {
            self.values.insert(field.name, value.into());
        }
    }

    /// Restores every field to its default, sort order included.
    pub fn clear(&mut self) {
        for field in &self.fields {
            self.values.insert(field.name, field.default.clone());
        }
    }

    pub fn to_params(&self) -> Result<QueryParams, ApiError> {
        let mut params = QueryParams::new();
        for field in &self.fields {
            let raw = self.get(field.name).trim();
            if raw.is_empty() {
                continue;
            }
            match field.kind {
                FieldKind::Text | FieldKind::Select => {
                    params.insert(field.name, raw);
                }
                FieldKind::Number => {
                    let number: f64 = raw.parse().map_err(|_| {
                        ApiError::InvalidInput(format!("{}: valor numérico inválido", field.label))
                    })?;
                    if number < 0.0 || !number.is_finite() {
                        return Err(ApiError::InvalidInput(format!(
                            "{}: el valor no puede ser negativo",
                            field.label
                        )));
                    }
                    params.insert(field.name, raw);
                }
                FieldKind::DateTime => {
                    let instant = parse_local_datetime(raw).ok_or_else(|| {
                        ApiError::InvalidInput(format!("{}: fecha inválida", field.label))
                    })?;
                    params.insert_datetime(field.name, instant);
                }
            }
        }
        if let (Some(start), Some(end)) = (params.get("startDate"), params.get("endDate")) {
            if start > end {
                return Err(ApiError::InvalidInput(
                    "la fecha de inicio debe ser anterior a la fecha de fin".to_string(),
                ));
            }
        }
        Ok(params)
    }
}

/// The filters as of the last search. Paging reuses these so edits the user
/// has not searched yet never reach the server.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmittedSearch {
    params: QueryParams,
}

impl SubmittedSearch {
    /// Validates the form and, on success, replaces the submitted filters.
    /// A rejected form leaves the previous search in place.
    pub fn submit(&mut self, filters: &FilterState) -> Result<(), ApiError> {
        self.params = filters.to_params()?;
        Ok(())
    }

    pub fn page(&self, page: u32, limit: u32) -> QueryParams {
        self.params
            .clone()
            .with("page", page.to_string())
            .with("limit", limit.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Facet {
    System,
    Role,
    Platform,
    Country,
}

impl Facet {
    pub const ALL: [Facet; 4] = [Facet::System, Facet::Role, Facet::Platform, Facet::Country];

    pub fn param(self) -> &'static str {
        match self {
            Facet::System => "systemId",
            Facet::Role => "role",
            Facet::Platform => "platform",
            Facet::Country => "country",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Facet::System => "Sistema",
            Facet::Role => "Rol",
            Facet::Platform => "Plataforma",
            Facet::Country => "País",
        }
    }

    pub fn option_label(self, value: &str) -> String {
        match self {
            Facet::Platform => value.to_uppercase(),
            _ => capitalize(value),
        }
    }
}

fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FacetOptions {
    pub facet: Facet,
    pub options: Vec<(String, String)>,
}

pub fn facets_from_options(options: &FilterOptions) -> Vec<FacetOptions> {
    Facet::ALL
        .into_iter()
        .map(|facet| {
            let values = match facet {
                Facet::System => &options.systems,
                Facet::Role => &options.roles,
                Facet::Platform => &options.platforms,
                Facet::Country => &options.countries,
            };
            FacetOptions {
                facet,
                options: values
                    .iter()
                    .map(|value| (value.clone(), facet.option_label(value)))
                    .collect(),
            }
        })
        .filter(|group| !group.options.is_empty())
        .collect()
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DimensionFilterState {
    selected: BTreeMap<Facet, String>,
}

impl DimensionFilterState {
    /// Selecting the current value again deselects it.
    pub fn toggle(&mut self, facet: Facet, value: &str) {
        if value.is_empty() || self.selected.get(&facet).map(String::as_str) == Some(value) {
            self.selected.remove(&facet);
        } else {
            self.selected.insert(facet, value.to_string());
        }
    }

    pub fn clear(&mut self, facet: Facet) {
        self.selected.remove(&facet);
    }

    pub fn clear_all(&mut self) {
        self.selected.clear();
    }

    pub fn get(&self, facet: Facet) -> Option<&str> {
        self.selected.get(&facet).map(String::as_str)
    }

    pub fn active_count(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn apply_to(&self, params: &mut QueryParams) {
        for (facet, value) in &self.selected {
            params.insert(facet.param(), value);
        }
    }
}
