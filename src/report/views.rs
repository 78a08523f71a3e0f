//! Dashboard views
//!
//! Each view is one page of the dashboard sidebar. A view bundles the
//! aggregates it needs with the insights derived from them; the
//! presentation layer only has to draw what it receives.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::analytics::{self, AggregateTable, UnknownName};
use crate::dataset::{AnalysisResult, Dataset, DatasetSummary};

/// Insight text shown when a section has nothing to summarize
pub const NO_DATA: &str = "No data available.";

/// A sidebar page
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum View {
    Home,
    SeasonalRentals,
    WorkingDayVsWeekend,
    WeatherImpact,
    CasualVsRegistered,
}

impl View {
    /// Get all views in sidebar order
    pub fn all() -> &'static [View] {
        &[
            View::Home,
            View::SeasonalRentals,
            View::WorkingDayVsWeekend,
            View::WeatherImpact,
            View::CasualVsRegistered,
        ]
    }

    /// URL/CLI identifier
    pub fn slug(&self) -> &'static str {
        match self {
            View::Home => "home",
            View::SeasonalRentals => "seasonal-rentals",
            View::WorkingDayVsWeekend => "working-day",
            View::WeatherImpact => "weather",
            View::CasualVsRegistered => "casual-vs-registered",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            View::Home => "Bike-Sharing Analysis",
            View::SeasonalRentals => "Seasonal Rentals",
            View::WorkingDayVsWeekend => "Working Day vs Weekend/Holiday",
            View::WeatherImpact => "Impacts of Weather on Bike-Sharing",
            View::CasualVsRegistered => "Casual Users and Registered Users",
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for View {
    type Err = UnknownName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase().replace('_', "-");
        View::all()
            .iter()
            .copied()
            .find(|view| view.slug() == wanted || view.title().to_lowercase() == wanted)
            .ok_or_else(|| UnknownName {
                kind: "view",
                name: s.to_string(),
                expected: View::all()
                    .iter()
                    .map(|v| v.slug())
                    .collect::<Vec<_>>()
                    .join(", "),
            })
    }
}

/// One chart-sized block of a view
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ViewSection {
    pub heading: String,
    pub table: AggregateTable,
    pub insights: Vec<String>,
}

/// Everything a page needs to render
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ViewReport {
    pub view: View,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overview: Option<DatasetSummary>,
    pub sections: Vec<ViewSection>,
}

fn section(
    heading: &str,
    table: AggregateTable,
    insights: AnalysisResult<Vec<String>>,
) -> AnalysisResult<ViewSection> {
    let insights = match insights {
        Ok(lines) => lines,
        Err(e) if e.is_empty_input() => {
            tracing::debug!(heading, error = %e, "Section has no data");
            vec![NO_DATA.to_string()]
        }
        Err(e) => return Err(e),
    };

    Ok(ViewSection {
        heading: heading.to_string(),
        table,
        insights,
    })
}

/// Compute every table and insight of a view
pub fn build_view(view: View, dataset: &Dataset) -> AnalysisResult<ViewReport> {
    let daily = dataset.daily();
    let mut overview = None;

    let sections = match view {
        View::Home => {
            overview = Some(dataset.summary()?);
            Vec::new()
        }
        View::SeasonalRentals => {
            let seasons = analytics::totals_by_season(daily)?;
            let insights = analytics::season_insights(&seasons);
            vec![section(
                "Total Bike Rentals by Season",
                AggregateTable::Seasons(seasons),
                insights,
            )?]
        }
        View::WorkingDayVsWeekend => {
            let status = analytics::counts_by_day_status(daily)?;
            let day_types = analytics::totals_by_day_type(daily)?;
            let hourly = analytics::hourly_trend_by_day_type(dataset.hourly())?;

            let status_insights = analytics::day_status_insights(&status);
            let day_type_insights = analytics::day_type_insights(&day_types);
            let hourly_insights = analytics::hourly_insights(&hourly);

            vec![
                section(
                    "Distribution of Bike Rentals by Days",
                    AggregateTable::DayStatus(status),
                    status_insights,
                )?,
                section(
                    "Total Casual and Registered Users on Working Days and Weekends/Holidays",
                    AggregateTable::DayType(day_types),
                    day_type_insights,
                )?,
                section(
                    "Hourly Rental Trends",
                    AggregateTable::Hourly(hourly),
                    hourly_insights,
                )?,
            ]
        }
        View::WeatherImpact => {
            let weather = analytics::totals_by_weather(daily)?;
            let insights = analytics::weather_insights(&weather);
            vec![section(
                "Impact of Weather on Bike-Sharing",
                AggregateTable::Weather(weather),
                insights,
            )?]
        }
        View::CasualVsRegistered => {
            let months = analytics::totals_by_year_month(daily)?;
            let growth = analytics::growth_series(daily)?;

            let yearly_insights = analytics::yearly_insights(&months);
            let growth_insights = analytics::growth_insights(&months);

            vec![
                section(
                    "Trends of Casual Users and Registered Users",
                    AggregateTable::Monthly(months),
                    yearly_insights,
                )?,
                section(
                    "Bike-Sharing Growth",
                    AggregateTable::Growth(growth),
                    growth_insights,
                )?,
            ]
        }
    };

    tracing::debug!(view = %view, sections = sections.len(), "Built view");

    Ok(ViewReport {
        view,
        title: view.title().to_string(),
        overview,
        sections,
    })
}
