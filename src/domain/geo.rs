//! Country choropleth: value lookup by country code and a six-step blue scale.

use std::collections::BTreeMap;

use crate::domain::entities::analytics::GeoLocation;

pub const NEUTRAL_COLOR: &str = "#E5E7EB";
pub const HOVER_COLOR: &str = "#1E40AF";

/// Lightest to darkest.
pub const SCALE: [&str; 6] = [
    "#93C5FD", "#60A5FA", "#3B82F6", "#2563EB", "#1D4ED8", "#1E40AF",
];

const COUNTRY_NAMES: [(&str, &str); 10] = [
    ("PE", "Perú"),
    ("CO", "Colombia"),
    ("EC", "Ecuador"),
    ("BO", "Bolivia"),
    ("CL", "Chile"),
    ("AR", "Argentina"),
    ("BR", "Brasil"),
    ("MX", "México"),
    ("US", "Estados Unidos"),
    ("ES", "España"),
];

/// Curated name, then the map geometry's own name, then the raw code.
pub fn display_name(code: &str, geometry_name: Option<&str>) -> String {
    let upper = code.to_ascii_uppercase();
    COUNTRY_NAMES
        .iter()
        .find(|(known, _)| *known == upper)
        .map(|(_, name)| name.to_string())
        .or_else(|| geometry_name.map(str::to_string))
        .unwrap_or(upper)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeoMetric {
    Users,
    Events,
}

impl GeoMetric {
    pub fn label(self) -> &'static str {
        match self {
            GeoMetric::Users => "usuarios",
            GeoMetric::Events => "eventos",
        }
    }

    fn pick(self, row: &GeoLocation) -> u64 {
        let primary = match self {
            GeoMetric::Users => row.users,
            GeoMetric::Events => row.events,
        };
        if primary > 0 {
            primary
        } else if row.users > 0 {
            row.users
        } else {
            row.events
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Choropleth {
    values: BTreeMap<String, f64>,
    max: f64,
}

impl Choropleth {
    /// Keys are upper-cased; a later row for the same code wins.
    pub fn from_pairs<I, K>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, f64)>,
        K: AsRef<str>,
    {
        let mut values = BTreeMap::new();
        for (key, value) in pairs {
            let key = key.as_ref().trim();
            if key.is_empty() {
                continue;
            }
            values.insert(key.to_ascii_uppercase(), value);
        }
        let max = values.values().copied().fold(0.0_f64, f64::max);
        Self { values, max }
    }

    pub fn from_rows(rows: &[GeoLocation], metric: GeoMetric) -> Self {
        Self::from_pairs(
            rows.iter()
                .filter_map(|row| row.key().map(|key| (key.to_string(), metric.pick(row) as f64))),
        )
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Looks up by two-letter code, then three-letter code.
    pub fn value(&self, iso_a2: Option<&str>, iso_a3: Option<&str>) -> f64 {
        [iso_a2, iso_a3]
            .into_iter()
            .flatten()
            .find_map(|code| self.values.get(&code.to_ascii_uppercase()).copied())
            .unwrap_or(0.0)
    }

    pub fn bucket(&self, value: f64) -> &'static str {
        if value <= 0.0 || !value.is_finite() {
            return NEUTRAL_COLOR;
        }
        let intensity = if self.max > 0.0 { value / self.max } else { 0.0 };
        if intensity > 0.8 {
            SCALE[5]
        } else if intensity > 0.6 {
            SCALE[4]
        } else if intensity > 0.4 {
            SCALE[3]
        } else if intensity > 0.2 {
            SCALE[2]
        } else if intensity > 0.1 {
            SCALE[1]
        } else {
            SCALE[0]
        }
    }

    pub fn legend(&self) -> &'static [&'static str] {
        &SCALE
    }

    /// All codes with data, highest value first.
    pub fn ranked(&self) -> Vec<(String, f64)> {
        let mut entries: Vec<(String, f64)> = self
            .values
            .iter()
            .map(|(code, value)| (code.clone(), *value))
            .collect();
        entries.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        entries
    }

    pub fn top(&self, count: usize) -> Vec<(String, f64)> {
        let mut ranked = self.ranked();
        ranked.truncate(count);
        ranked
    }
}
