use chrono::{
    DateTime, Datelike, Duration, Local, LocalResult, NaiveDate, NaiveDateTime, NaiveTime,
    TimeZone, Utc,
};

use crate::usecase::ports::api::QueryParams;

pub const CUSTOM_LABEL: &str = "Personalizado";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub label: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatePreset {
    Today,
    Yesterday,
    Last7Days,
    Last14Days,
    Last30Days,
    ThisWeek,
    LastWeek,
    ThisMonth,
    LastMonth,
    Last3Months,
}

impl DatePreset {
    pub const ALL: [DatePreset; 10] = [
        DatePreset::Today,
        DatePreset::Yesterday,
        DatePreset::Last7Days,
        DatePreset::Last14Days,
        DatePreset::Last30Days,
        DatePreset::ThisWeek,
        DatePreset::LastWeek,
        DatePreset::ThisMonth,
        DatePreset::LastMonth,
        DatePreset::Last3Months,
    ];

    pub fn label(self) -> &'static str {
        match self {
            DatePreset::Today => "Hoy",
            DatePreset::Yesterday => "Ayer",
            DatePreset::Last7Days => "Últimos 7 días",
            DatePreset::Last14Days => "Últimos 14 días",
            DatePreset::Last30Days => "Últimos 30 días",
            DatePreset::ThisWeek => "Esta semana",
            DatePreset::LastWeek => "Última semana",
            DatePreset::ThisMonth => "Este mes",
            DatePreset::LastMonth => "Último mes",
            DatePreset::Last3Months => "Últimos 3 meses",
        }
    }

    /// Inclusive local-calendar day bounds relative to `today`.
    pub fn days(self, today: NaiveDate) -> (NaiveDate, NaiveDate) {
        match self {
            DatePreset::Today => (today, today),
            DatePreset::Yesterday => {
                let day = today - Duration::days(1);
                (day, day)
            }
            DatePreset::Last7Days => (today - Duration::days(6), today),
            DatePreset::Last14Days => (today - Duration::days(13), today),
            DatePreset::Last30Days => (today - Duration::days(29), today),
            DatePreset::ThisWeek => (today, today),
            DatePreset::LastWeek => (today - Duration::weeks(1), today),
            DatePreset::ThisMonth => (today, today),
            DatePreset::LastMonth => (months_back(today, 1), today),
            DatePreset::Last3Months => (months_back(today, 3), today),
        }
    }

    pub fn range(self) -> DateRange {
        let (start_day, end_day) = self.days(Local::now().date_naive());
        DateRange {
            start: start_of_day(start_day),
            end: end_of_day(end_day),
            label: Some(self.label().to_string()),
        }
    }
}

fn months_back(day: NaiveDate, months: u32) -> NaiveDate {
    day.checked_sub_months(chrono::Months::new(months))
        .unwrap_or_else(|| day.with_day(1).unwrap_or(day))
}

fn local_to_utc(naive: NaiveDateTime) -> DateTime<Utc> {
    match Local.from_local_datetime(&naive) {
        LocalResult::Single(local) => local.with_timezone(&Utc),
        LocalResult::Ambiguous(earliest, _) => earliest.with_timezone(&Utc),
        LocalResult::None => Utc.from_utc_datetime(&naive),
    }
}

pub fn start_of_day(day: NaiveDate) -> DateTime<Utc> {
    local_to_utc(day.and_time(NaiveTime::MIN))
}

pub fn end_of_day(day: NaiveDate) -> DateTime<Utc> {
    let end = NaiveTime::from_hms_milli_opt(23, 59, 59, 999).unwrap_or(NaiveTime::MIN);
    local_to_utc(day.and_time(end))
}

/// Parses a `datetime-local` input value (`YYYY-MM-DDTHH:MM[:SS]`) in local
/// time.
pub fn parse_local_datetime(input: &str) -> Option<DateTime<Utc>> {
    let trimmed = input.trim();
    ["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).ok())
        .map(local_to_utc)
}

/// Formats a UTC instant for a `datetime-local` input in local time.
pub fn to_local_input(value: DateTime<Utc>) -> String {
    value
        .with_timezone(&Local)
        .format("%Y-%m-%dT%H:%M")
        .to_string()
}

pub fn parse_date(input: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d").ok()
}

impl DateRange {
    pub fn last_days(days: i64) -> Self {
        let now = Utc::now();
        Self {
            start: now - Duration::days(days),
            end: now,
            label: None,
        }
    }

    pub fn from_preset(preset: DatePreset) -> Self {
        preset.range()
    }

    /// A custom inclusive day range. Inverted ranges are rejected rather than
    /// swapped.
    pub fn custom(start: &str, end: &str) -> Result<Self, String> {
        let start_day = parse_date(start).ok_or_else(|| "fecha de inicio inválida".to_string())?;
        let end_day = parse_date(end).ok_or_else(|| "fecha de fin inválida".to_string())?;
        if start_day > end_day {
            return Err("la fecha de inicio debe ser anterior a la fecha de fin".to_string());
        }
        Ok(Self {
            start: start_of_day(start_day),
            end: end_of_day(end_day),
            label: Some(CUSTOM_LABEL.to_string()),
        })
    }

    /// A range from two `datetime-local` inputs.
    pub fn from_local_inputs(start: &str, end: &str) -> Result<Self, String> {
        let start = parse_local_datetime(start)
            .ok_or_else(|| "fecha de inicio inválida".to_string())?;
        let end =
            parse_local_datetime(end).ok_or_else(|| "fecha de fin inválida".to_string())?;
        if start > end {
            return Err("la fecha de inicio debe ser anterior a la fecha de fin".to_string());
        }
        Ok(Self {
            start,
            end,
            label: None,
        })
    }

    pub fn to_params(&self) -> QueryParams {
        let mut params = QueryParams::new();
        params.insert_datetime("startDate", self.start);
        params.insert_datetime("endDate", self.end);
        params
    }

    pub fn display(&self) -> String {
        match self.label.as_deref() {
            Some(label) if label != CUSTOM_LABEL => label.to_string(),
            _ => {
                let start = self.start.with_timezone(&Local);
                let end = self.end.with_timezone(&Local);
                format!(
                    "{} {} - {} {} {}",
                    start.format("%d"),
                    month_abbrev(start.month()),
                    end.format("%d"),
                    month_abbrev(end.month()),
                    end.format("%Y")
                )
            }
        }
    }
}

pub fn month_abbrev(month: u32) -> &'static str {
    match month {
        1 => "ene",
        2 => "feb",
        3 => "mar",
        4 => "abr",
        5 => "may",
        6 => "jun",
        7 => "jul",
        8 => "ago",
        9 => "sept",
        10 => "oct",
        11 => "nov",
        _ => "dic",
    }
}
