//! GraphQL wire types and the heatmap-friendly shapes built from them.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

/// Token repeated once per contribution in [`ContributionsByDate`].
pub const PLACEHOLDER_TOKEN: &str = "contribution";

/// Treats an explicit `null` like a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// === GraphQL envelope ===

/// Top-level GraphQL response body.
///
/// `errors` is kept as raw JSON: its only use is being echoed back in the
/// error message.
#[derive(Debug, Clone, Deserialize)]
pub struct GraphQlResponse<T> {
    /// Query result. Absent or null when the query failed.
    pub data: Option<T>,
    /// GraphQL-level errors. A non-null value means the call failed.
    pub errors: Option<serde_json::Value>,
}

/// GraphQL request body.
#[derive(Debug, Clone, Serialize)]
pub struct GraphQlRequest<'a, V> {
    /// Query document.
    pub query: &'a str,
    /// Query variables.
    pub variables: V,
}

// === Contribution calendar query ===

/// `data` of the contribution calendar query.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CalendarData {
    /// Null when the login does not exist.
    #[serde(default)]
    pub user: Option<CalendarUser>,
}

/// `user` node of the calendar query.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarUser {
    #[serde(default)]
    pub contributions_collection: Option<CalendarCollection>,
}

/// `contributionsCollection` node of the calendar query.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarCollection {
    #[serde(default)]
    pub contribution_calendar: Option<ContributionCalendar>,
}

/// The contribution calendar for the requested window.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionCalendar {
    /// Sum over the window, as reported by GitHub.
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_contributions: u64,
    /// Calendar weeks, Sunday first.
    #[serde(default, deserialize_with = "null_as_default")]
    pub weeks: Vec<ContributionWeek>,
}

/// One calendar week.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionWeek {
    #[serde(default, deserialize_with = "null_as_default")]
    pub contribution_days: Vec<ContributionDay>,
}

/// A single calendar date's activity count.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionDay {
    /// Date as `YYYY-MM-DD`.
    pub date: String,
    /// Contributions on that date. Null is treated as zero.
    #[serde(default)]
    pub contribution_count: Option<u32>,
    /// Heatmap colour GitHub would use for the day.
    #[serde(default)]
    pub color: Option<String>,
}

impl CalendarData {
    /// The calendar, if every link of the path down to it is present.
    pub fn into_calendar(self) -> Option<ContributionCalendar> {
        self.user?.contributions_collection?.contribution_calendar
    }
}

// === Contribution years query ===

/// `data` of the contribution years query.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct YearsData {
    #[serde(default)]
    pub user: Option<YearsUser>,
}

/// `user` node of the years query.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearsUser {
    #[serde(default)]
    pub contributions_collection: Option<YearsCollection>,
}

/// `contributionsCollection` node of the years query.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearsCollection {
    /// Years with any recorded activity, in no particular order.
    #[serde(default, deserialize_with = "null_as_default")]
    pub contribution_years: Vec<i32>,
}

impl YearsData {
    /// The year list, empty if any link of the path is missing.
    pub fn into_years(self) -> Vec<i32> {
        self.user
            .and_then(|u| u.contributions_collection)
            .map(|c| c.contribution_years)
            .unwrap_or_default()
    }
}

// === Output shapes ===

/// Date (`YYYY-MM-DD`) to one placeholder token per contribution.
///
/// Days without contributions have no key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ContributionsByDate(BTreeMap<String, Vec<&'static str>>);

impl ContributionsByDate {
    /// Flatten calendar weeks into the date map, skipping zero-count days.
    ///
    /// A date seen twice keeps its last non-zero count.
    pub fn from_weeks(weeks: &[ContributionWeek]) -> Self {
        let mut days = BTreeMap::new();
        for day in weeks.iter().flat_map(|w| &w.contribution_days) {
            let count = day.contribution_count.unwrap_or(0) as usize;
            if count > 0 {
                days.insert(day.date.clone(), vec![PLACEHOLDER_TOKEN; count]);
            }
        }
        Self(days)
    }

    /// Number of placeholder tokens for `date`, 0 if absent.
    pub fn count(&self, date: &str) -> usize {
        self.0.get(date).map_or(0, Vec::len)
    }

    /// Number of dates with at least one contribution.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when no date has contributions.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Sum of all counts.
    pub fn total(&self) -> usize {
        self.0.values().map(Vec::len).sum()
    }

    /// Dates with contributions, ascending.
    pub fn dates(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

/// Span of years with recorded activity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearSummary {
    /// Earliest year.
    pub start_year: i32,
    /// Latest year.
    pub end_year: i32,
    /// Every active year, ascending.
    pub years: Vec<i32>,
}

impl YearSummary {
    /// Sort `years`; an empty list becomes `[current_year]`.
    pub fn from_years(mut years: Vec<i32>, current_year: i32) -> Self {
        if years.is_empty() {
            return Self {
                start_year: current_year,
                end_year: current_year,
                years: vec![current_year],
            };
        }

        years.sort_unstable();
        Self {
            start_year: years[0],
            end_year: years[years.len() - 1],
            years,
        }
    }
}
