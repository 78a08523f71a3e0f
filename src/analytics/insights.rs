//! Narrative insights
//!
//! Turns summary tables into the short bullet points shown next to each
//! chart. Every function fails with `AnalysisError::EmptyInput` when its
//! table has no rows, since a ranking or a peak over nothing is undefined.

use std::collections::BTreeMap;

use crate::dataset::{
    types::month_name, AnalysisError, AnalysisResult, DayType, RecordKind, Weather,
};

use super::summary::{
    DayStatusCounts, DayTypeTotals, HourlyTrendRow, MonthlyTotal, SeasonTotal, UserTotals,
    WeatherTotals,
};

/// Format a count with thousands separators (`1061129` -> `1,061,129`)
pub fn format_count(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

fn percent(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 * 100.0 / whole as f64
    }
}

/// First item with the greatest key
fn first_max_by_key<T, F: Fn(&T) -> u64>(items: &[T], key: F) -> Option<&T> {
    items.iter().fold(None, |best: Option<&T>, item| match best {
        Some(b) if key(b) >= key(item) => Some(b),
        _ => Some(item),
    })
}

fn empty(kind: RecordKind, what: &'static str) -> AnalysisError {
    AnalysisError::EmptyInput { kind, what }
}

/// Grand total of `(casual, registered)` pairs
///
/// Once this fits in `u64`, every partial sum over the same rows does too.
fn checked_riders<I>(pairs: I, what: &'static str) -> AnalysisResult<u64>
where
    I: IntoIterator<Item = (u64, u64)>,
{
    pairs
        .into_iter()
        .try_fold(0u64, |acc, (casual, registered)| {
            acc.checked_add(casual)?.checked_add(registered)
        })
        .ok_or(AnalysisError::CountOverflow { what })
}

/// Highest and lowest season plus each season's share
pub fn season_insights(totals: &[SeasonTotal]) -> AnalysisResult<Vec<String>> {
    let (Some(highest), Some(lowest)) = (totals.first(), totals.last()) else {
        return Err(empty(RecordKind::Daily, "season insights"));
    };
    let grand = checked_riders(totals.iter().map(|t| (t.total, 0)), "season insights")?;

    let mut lines: Vec<String> = totals
        .iter()
        .map(|t| {
            format!(
                "{}: {} rentals ({:.1}% of all rentals)",
                t.season,
                format_count(t.total),
                percent(t.total, grand)
            )
        })
        .collect();

    if totals.len() > 1 {
        lines.push(format!(
            "{} had the highest rentals, while {} had the lowest.",
            highest.season, lowest.season
        ));
    } else {
        lines.push(format!("Only {} is present in the data.", highest.season));
    }

    Ok(lines)
}

/// Working days vs weekend/holiday days
pub fn day_status_insights(counts: &DayStatusCounts) -> AnalysisResult<Vec<String>> {
    if counts.workingday.total() == 0 {
        return Err(empty(RecordKind::Daily, "day status insights"));
    }

    Ok(vec![
        format!(
            "Working Days: {} days recorded.",
            format_count(counts.workingday.yes)
        ),
        format!(
            "Weekend/Holidays: {} days recorded, of which {} were holidays.",
            format_count(counts.workingday.no),
            format_count(counts.holiday.yes)
        ),
    ])
}

/// Which day type each rider group prefers
pub fn day_type_insights(totals: &DayTypeTotals) -> AnalysisResult<Vec<String>> {
    if totals.is_empty() {
        return Err(empty(RecordKind::Daily, "day type insights"));
    }

    let of = |day_type: DayType| {
        totals
            .get(day_type)
            .map(|t| UserTotals {
                casual: t.casual,
                registered: t.registered,
            })
            .unwrap_or_default()
    };
    let working = of(DayType::Working);
    let weekend = of(DayType::WeekendOrHoliday);

    let prefer = |label: &str, on_working: u64, on_weekend: u64| {
        let (winner, more, less) = if on_working >= on_weekend {
            (DayType::Working, on_working, on_weekend)
        } else {
            (DayType::WeekendOrHoliday, on_weekend, on_working)
        };
        format!(
            "{} rent more on {} ({} vs {}).",
            label,
            winner,
            format_count(more),
            format_count(less)
        )
    };

    let overall = |t: UserTotals| {
        t.total().ok_or(AnalysisError::CountOverflow {
            what: "day type insights",
        })
    };

    Ok(vec![
        prefer("Casual users", working.casual, weekend.casual),
        prefer("Registered users", working.registered, weekend.registered),
        prefer("Overall, riders", overall(working)?, overall(weekend)?),
    ])
}

/// Peak hours per day type and rider group
pub fn hourly_insights(trend: &[HourlyTrendRow]) -> AnalysisResult<Vec<String>> {
    if trend.is_empty() {
        return Err(empty(RecordKind::Hourly, "hourly insights"));
    }

    let top_hours = |day_type: DayType, registered: bool| -> Option<String> {
        let mut rows: Vec<&HourlyTrendRow> =
            trend.iter().filter(|r| r.day_type == day_type).collect();
        if rows.is_empty() {
            return None;
        }
        let value = |r: &HourlyTrendRow| if registered { r.registered } else { r.casual };
        rows.sort_by(|a, b| value(*b).cmp(&value(*a)).then(a.hour.cmp(&b.hour)));
        Some(
            rows.iter()
                .take(3)
                .map(|r| format!("{:02}:00", r.hour))
                .collect::<Vec<_>>()
                .join(", "),
        )
    };

    let mut lines = Vec::new();
    for day_type in DayType::all() {
        for (registered, group) in [(true, "Registered"), (false, "Casual")] {
            if let Some(hours) = top_hours(*day_type, registered) {
                lines.push(format!("Peak hours for {} {} rentals: {}.", day_type, group, hours));
            }
        }
    }

    Ok(lines)
}

/// Weather ranking and categories without rentals
pub fn weather_insights(totals: &WeatherTotals) -> AnalysisResult<Vec<String>> {
    if totals.is_empty() {
        return Err(empty(RecordKind::Daily, "weather insights"));
    }

    let grand = checked_riders(
        totals.categories.iter().map(|c| (c.casual, c.registered)),
        "weather insights",
    )?;
    let mut lines: Vec<String> = totals
        .categories
        .iter()
        .map(|c| {
            let riders = c.casual + c.registered;
            format!(
                "{} weather: {} rentals ({:.1}% of all rentals).",
                c.weather,
                format_count(riders),
                percent(riders, grand)
            )
        })
        .collect();

    if let Some(best) = first_max_by_key(&totals.categories, |c| c.casual + c.registered) {
        lines.push(format!(
            "More people rent during {} weather than in any other condition.",
            best.weather
        ));
    }

    for weather in Weather::all() {
        let riders = totals
            .get(*weather)
            .map(|c| c.casual + c.registered)
            .unwrap_or(0);
        if riders == 0 {
            lines.push(format!("No rentals occurred during {} weather.", weather));
        }
    }

    Ok(lines)
}

fn by_year(months: &[MonthlyTotal]) -> BTreeMap<i32, Vec<&MonthlyTotal>> {
    let mut years: BTreeMap<i32, Vec<&MonthlyTotal>> = BTreeMap::new();
    for month in months {
        years.entry(month.year).or_default().push(month);
    }
    years
}

/// Per-year totals and peak months for each rider group
pub fn yearly_insights(months: &[MonthlyTotal]) -> AnalysisResult<Vec<String>> {
    if months.is_empty() {
        return Err(empty(RecordKind::Daily, "yearly insights"));
    }
    checked_riders(months.iter().map(|m| (m.casual, m.registered)), "yearly insights")?;

    let mut lines = Vec::new();
    for (year, rows) in by_year(months) {
        let casual: u64 = rows.iter().map(|m| m.casual).sum();
        let registered: u64 = rows.iter().map(|m| m.registered).sum();
        lines.push(format!(
            "{}: {} casual and {} registered rentals.",
            year,
            format_count(casual),
            format_count(registered)
        ));

        if let Some(peak) = first_max_by_key(&rows, |m| m.registered) {
            lines.push(format!(
                "{}: Registered rentals peaked in {}.",
                year,
                month_name(peak.month)
            ));
        }
        if let Some(peak) = first_max_by_key(&rows, |m| m.casual) {
            lines.push(format!(
                "{}: Casual rentals peaked in {}.",
                year,
                month_name(peak.month)
            ));
        }
    }

    Ok(lines)
}

/// Overall peaks, quietest month and year-over-year growth
pub fn growth_insights(months: &[MonthlyTotal]) -> AnalysisResult<Vec<String>> {
    let Some(first) = months.first() else {
        return Err(empty(RecordKind::Daily, "growth insights"));
    };
    checked_riders(months.iter().map(|m| (m.casual, m.registered)), "growth insights")?;

    let mut lines = Vec::new();
    if let Some(peak) = first_max_by_key(months, |m| m.registered) {
        lines.push(format!(
            "The peak for Registered Users was in {} {}.",
            month_name(peak.month),
            peak.year
        ));
    }
    if let Some(peak) = first_max_by_key(months, |m| m.casual) {
        lines.push(format!(
            "The peak for Casual Users was in {} {}.",
            month_name(peak.month),
            peak.year
        ));
    }

    let quietest = months.iter().fold(first, |low, m| {
        if m.casual + m.registered < low.casual + low.registered {
            m
        } else {
            low
        }
    });
    lines.push(format!(
        "The quietest month was {} {} with {} rentals.",
        month_name(quietest.month),
        quietest.year,
        format_count(quietest.casual + quietest.registered)
    ));

    let years = by_year(months);
    let mut totals = years.iter().map(|(year, rows)| {
        let sum = UserTotals {
            casual: rows.iter().map(|m| m.casual).sum(),
            registered: rows.iter().map(|m| m.registered).sum(),
        };
        (*year, sum)
    });
    if let (Some((from_year, from)), Some((to_year, to))) = (totals.next(), totals.last()) {
        for (group, before, after) in [
            ("Registered", from.registered, to.registered),
            ("Casual", from.casual, to.casual),
        ] {
            if before > 0 {
                let change = (after as f64 - before as f64) * 100.0 / before as f64;
                lines.push(format!(
                    "{} Users changed by {:+.1}% from {} to {}.",
                    group, change, from_year, to_year
                ));
            }
        }
    }

    Ok(lines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::summary::{DayTypeTotal, FlagCounts, WeatherTotal};
    use crate::dataset::Season;

    fn month(year: i32, month: u32, casual: u64, registered: u64) -> MonthlyTotal {
        MonthlyTotal {
            year,
            month,
            casual,
            registered,
        }
    }

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1000), "1,000");
        assert_eq!(format_count(1061129), "1,061,129");
    }

    #[test]
    fn test_season_insights() {
        let totals = vec![
            SeasonTotal {
                season: Season::Fall,
                total: 300,
            },
            SeasonTotal {
                season: Season::Spring,
                total: 100,
            },
        ];
        let lines = season_insights(&totals).unwrap();
        assert_eq!(lines[0], "Fall: 300 rentals (75.0% of all rentals)");
        assert_eq!(
            lines.last().unwrap(),
            "Fall had the highest rentals, while Spring had the lowest."
        );
    }

    #[test]
    fn test_empty_tables_are_empty_input() {
        assert!(season_insights(&[]).unwrap_err().is_empty_input());
        assert!(day_status_insights(&DayStatusCounts::default())
            .unwrap_err()
            .is_empty_input());
        assert!(day_type_insights(&DayTypeTotals::default())
            .unwrap_err()
            .is_empty_input());
        assert!(hourly_insights(&[]).unwrap_err().is_empty_input());
        assert!(weather_insights(&WeatherTotals::default())
            .unwrap_err()
            .is_empty_input());
        assert!(yearly_insights(&[]).unwrap_err().is_empty_input());
        assert!(growth_insights(&[]).unwrap_err().is_empty_input());
    }

    #[test]
    fn test_day_status_insights() {
        let counts = DayStatusCounts {
            holiday: FlagCounts { no: 710, yes: 21 },
            workingday: FlagCounts { no: 231, yes: 500 },
        };
        let lines = day_status_insights(&counts).unwrap();
        assert_eq!(lines[0], "Working Days: 500 days recorded.");
        assert_eq!(
            lines[1],
            "Weekend/Holidays: 231 days recorded, of which 21 were holidays."
        );
    }

    #[test]
    fn test_day_type_preferences() {
        let totals = DayTypeTotals(vec![
            DayTypeTotal {
                day_type: DayType::WeekendOrHoliday,
                casual: 316732,
                registered: 683537,
            },
            DayTypeTotal {
                day_type: DayType::Working,
                casual: 303285,
                registered: 1989125,
            },
        ]);
        let lines = day_type_insights(&totals).unwrap();
        assert_eq!(
            lines[0],
            "Casual users rent more on Weekend/Holiday (316,732 vs 303,285)."
        );
        assert!(lines[1].starts_with("Registered users rent more on Working Day"));
        assert!(lines[2].starts_with("Overall, riders rent more on Working Day"));
    }

    #[test]
    fn test_hourly_peaks() {
        let row = |hour, registered| HourlyTrendRow {
            day_type: DayType::Working,
            hour,
            casual: 1,
            registered,
        };
        let trend = vec![row(7, 50), row(8, 90), row(17, 120), row(18, 90)];
        let lines = hourly_insights(&trend).unwrap();
        assert_eq!(
            lines[0],
            "Peak hours for Working Day Registered rentals: 17:00, 08:00, 18:00."
        );
        assert_eq!(
            lines[1],
            "Peak hours for Working Day Casual rentals: 07:00, 08:00, 17:00."
        );
    }

    #[test]
    fn test_weather_insights_mention_missing_categories() {
        let totals = WeatherTotals {
            categories: vec![
                WeatherTotal {
                    weather: Weather::Good,
                    casual: 30,
                    registered: 70,
                },
                WeatherTotal {
                    weather: Weather::Poor,
                    casual: 0,
                    registered: 0,
                },
            ],
            total_casual: 30,
            total_registered: 70,
        };
        let lines = weather_insights(&totals).unwrap();
        let has = |line: &str| lines.iter().any(|l| l == line);

        assert_eq!(lines[0], "Good weather: 100 rentals (100.0% of all rentals).");
        assert!(has("More people rent during Good weather than in any other condition."));
        assert!(has("No rentals occurred during Poor weather."));
        assert!(has("No rentals occurred during Severe weather."));
        assert!(!has("No rentals occurred during Good weather."));
    }

    #[test]
    fn test_yearly_and_growth_insights() {
        let months = vec![
            month(2011, 1, 10, 100),
            month(2011, 6, 50, 400),
            month(2011, 7, 60, 300),
            month(2012, 5, 90, 500),
            month(2012, 9, 80, 700),
        ];

        let yearly = yearly_insights(&months).unwrap();
        assert_eq!(yearly[0], "2011: 120 casual and 800 registered rentals.");
        assert_eq!(yearly[1], "2011: Registered rentals peaked in June.");
        assert_eq!(yearly[2], "2011: Casual rentals peaked in July.");
        assert_eq!(yearly[4], "2012: Registered rentals peaked in September.");

        let growth = growth_insights(&months).unwrap();
        assert_eq!(growth[0], "The peak for Registered Users was in September 2012.");
        assert_eq!(growth[1], "The peak for Casual Users was in May 2012.");
        assert_eq!(growth[2], "The quietest month was January 2011 with 110 rentals.");
        assert_eq!(growth[3], "Registered Users changed by +50.0% from 2011 to 2012.");
        assert_eq!(growth[4], "Casual Users changed by +41.7% from 2011 to 2012.");
    }

    #[test]
    fn test_oversized_tables_fail_instead_of_wrapping() {
        let huge = 10_000_000_000_000_000_000;
        let overflow = |result: AnalysisResult<Vec<String>>| {
            matches!(result, Err(AnalysisError::CountOverflow { .. }))
        };

        let months = vec![month(2011, 1, huge, 0), month(2012, 1, huge, 0)];
        assert!(overflow(yearly_insights(&months)));
        assert!(overflow(growth_insights(&months)));

        let seasons = vec![
            SeasonTotal {
                season: Season::Spring,
                total: huge,
            },
            SeasonTotal {
                season: Season::Winter,
                total: huge,
            },
        ];
        assert!(overflow(season_insights(&seasons)));

        let day_types = DayTypeTotals(vec![DayTypeTotal {
            day_type: DayType::Working,
            casual: huge,
            registered: huge,
        }]);
        assert!(overflow(day_type_insights(&day_types)));
    }
}
