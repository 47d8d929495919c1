//! GraphQL documents and query variables.

use serde::Serialize;
use time::error::ComponentRange;
use time::format_description::well_known::Rfc3339;
use time::{Date, Month, PrimitiveDateTime, Time};

use crate::error::UpstreamError;

/// Contribution calendar for `login` between `from` and `to`.
pub const CONTRIBUTION_CALENDAR_QUERY: &str = r#"
query($login: String!, $from: DateTime!, $to: DateTime!) {
  user(login: $login) {
    contributionsCollection(from: $from, to: $to) {
      contributionCalendar {
        totalContributions
        weeks {
          contributionDays {
            date
            contributionCount
            color
          }
        }
      }
    }
  }
}
"#;

/// Years in which `login` has any recorded activity.
pub const CONTRIBUTION_YEARS_QUERY: &str = r#"
query($login: String!) {
  user(login: $login) {
    contributionsCollection {
      contributionYears
    }
  }
}
"#;

/// Variables for [`CONTRIBUTION_CALENDAR_QUERY`].
#[derive(Debug, Clone, Serialize)]
pub struct CalendarVariables<'a> {
    pub login: &'a str,
    pub from: String,
    pub to: String,
}

/// Variables for [`CONTRIBUTION_YEARS_QUERY`].
#[derive(Debug, Clone, Serialize)]
pub struct YearsVariables<'a> {
    pub login: &'a str,
}

impl<'a> CalendarVariables<'a> {
    /// Variables covering the whole UTC calendar year.
    pub fn for_year(login: &'a str, year: i32) -> Result<Self, UpstreamError> {
        let (from, to) = year_window(year)?;
        Ok(Self { login, from, to })
    }
}

/// RFC 3339 bounds of a UTC calendar year: Jan 1 00:00:00 to Dec 31 23:59:59.
pub fn year_window(year: i32) -> Result<(String, String), UpstreamError> {
    let invalid = |_: ComponentRange| UpstreamError::InvalidYear(year);

    let first = Date::from_calendar_date(year, Month::January, 1).map_err(invalid)?;
    let last = Date::from_calendar_date(year, Month::December, 31).map_err(invalid)?;
    let end_of_day = Time::from_hms(23, 59, 59).map_err(invalid)?;

    let from = PrimitiveDateTime::new(first, Time::MIDNIGHT)
        .assume_utc()
        .format(&Rfc3339)
        .map_err(|_| UpstreamError::InvalidYear(year))?;
    let to = PrimitiveDateTime::new(last, end_of_day)
        .assume_utc()
        .format(&Rfc3339)
        .map_err(|_| UpstreamError::InvalidYear(year))?;

    Ok((from, to))
}
