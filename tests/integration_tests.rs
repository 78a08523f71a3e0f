use std::path::{Path, PathBuf};

use bikeshare::analytics::{
    counts_by_day_status, growth_insights, growth_series, hourly_insights,
    hourly_trend_by_day_type, season_insights, totals_by_day_type, totals_by_season,
    totals_by_weather, totals_by_year_month, weather_insights, AggregateKind,
};
use bikeshare::dataset::{AnalysisError, Dataset, DayType, Season, Weather};
use bikeshare::report::{build_view, render_view, OutputFormat, View, NO_DATA};

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn load_sample() -> Dataset {
    Dataset::load(&fixture("day_sample.csv"), &fixture("hour_sample.csv"))
        .expect("Failed to load sample dataset")
}

#[test]
fn test_full_pipeline() {
    let dataset = load_sample();
    assert_eq!(dataset.daily().len(), 11);
    assert_eq!(dataset.hourly().len(), 6);

    for view in View::all() {
        let report = build_view(*view, &dataset).expect("view should build");
        assert_eq!(report.title, view.title());
        for format in [OutputFormat::Table, OutputFormat::Json, OutputFormat::Csv] {
            assert!(!render_view(&report, format).unwrap().is_empty());
        }
    }
}

#[test]
fn test_season_ranking_matches_baseline() {
    let dataset = load_sample();
    let totals = totals_by_season(dataset.daily()).unwrap();

    let ranking: Vec<(Season, u64)> = totals.iter().map(|t| (t.season, t.total)).collect();
    assert_eq!(
        ranking,
        vec![
            (Season::Fall, 17_800),
            (Season::Summer, 7_134),
            (Season::Spring, 4_334),
            (Season::Winter, 3_030),
        ]
    );

    let lines = season_insights(&totals).unwrap();
    assert!(lines.contains(&"Fall: 17,800 rentals (55.1% of all rentals)".to_string()));
    assert_eq!(
        lines.last().unwrap(),
        "Fall had the highest rentals, while Winter had the lowest."
    );
}

#[test]
fn test_partitions_cover_every_record() {
    let dataset = load_sample();
    let daily = dataset.daily();

    let grand: u64 = daily.records().map(|r| r.counts().unwrap().total).sum();
    assert_eq!(grand, 32_298);

    let seasons: u64 = totals_by_season(daily).unwrap().iter().map(|t| t.total).sum();
    assert_eq!(seasons, grand);

    let day_types: u64 = totals_by_day_type(daily)
        .unwrap()
        .iter()
        .map(|t| t.casual + t.registered)
        .sum();
    assert_eq!(day_types, grand);

    let weather = totals_by_weather(daily).unwrap();
    assert_eq!(weather.total_casual + weather.total_registered, grand);

    let months: u64 = totals_by_year_month(daily)
        .unwrap()
        .iter()
        .map(|m| m.casual + m.registered)
        .sum();
    assert_eq!(months, grand);

    let status = counts_by_day_status(daily).unwrap();
    assert_eq!(status.holiday.total(), 11);
    assert_eq!(status.workingday.total(), 11);
    assert_eq!(status.holiday.yes, 2);
    assert_eq!(status.workingday.yes, 6);
}

#[test]
fn test_day_type_preference() {
    let dataset = load_sample();
    let totals = totals_by_day_type(dataset.daily()).unwrap();

    let weekend = totals.get(DayType::WeekendOrHoliday).unwrap();
    let working = totals.get(DayType::Working).unwrap();
    assert_eq!((weekend.casual, weekend.registered), (3_473, 8_446));
    assert_eq!((working.casual, working.registered), (3_330, 17_049));
}

#[test]
fn test_weather_totals_and_missing_category() {
    let dataset = load_sample();
    let totals = totals_by_weather(dataset.daily()).unwrap();

    let order: Vec<Weather> = totals.categories.iter().map(|c| c.weather).collect();
    assert_eq!(order, vec![Weather::Good, Weather::Moderate, Weather::Poor]);

    let good = totals.get(Weather::Good).unwrap();
    assert_eq!((good.casual, good.registered), (3_762, 17_721));

    let lines = weather_insights(&totals).unwrap();
    assert!(lines
        .contains(&"More people rent during Good weather than in any other condition.".to_string()));
    assert!(lines.contains(&"No rentals occurred during Severe weather.".to_string()));
}

#[test]
fn test_hourly_trend_from_raw_headers() {
    let dataset = load_sample();
    let trend = hourly_trend_by_day_type(dataset.hourly()).unwrap();

    let keys: Vec<(DayType, u8)> = trend.iter().map(|r| (r.day_type, r.hour)).collect();
    assert_eq!(
        keys,
        vec![
            (DayType::WeekendOrHoliday, 8),
            (DayType::WeekendOrHoliday, 17),
            (DayType::Working, 8),
            (DayType::Working, 17),
            (DayType::Working, 18),
        ]
    );
    assert_eq!((trend[2].casual, trend[2].registered), (3, 200));

    let lines = hourly_insights(&trend).unwrap();
    assert!(lines
        .contains(&"Peak hours for Working Day Registered rentals: 08:00, 17:00, 18:00.".to_string()));
}

#[test]
fn test_growth_series_and_year_over_year() {
    let dataset = load_sample();
    let series = growth_series(dataset.daily()).unwrap();

    assert_eq!(series.len(), 8);
    assert!(series.iter().enumerate().all(|(i, p)| p.position == i));
    assert_eq!((series[0].year, series[0].month), (2011, 1));
    assert_eq!((series[7].year, series[7].month), (2012, 10));

    let months = totals_by_year_month(dataset.daily()).unwrap();
    let lines = growth_insights(&months).unwrap();
    assert!(lines.contains(&"The peak for Registered Users was in July 2012.".to_string()));
    assert!(lines.contains(&"The quietest month was October 2012 with 30 rentals.".to_string()));
    assert!(lines.contains(&"Registered Users changed by +66.3% from 2011 to 2012.".to_string()));
    assert!(lines.contains(&"Casual Users changed by +52.6% from 2011 to 2012.".to_string()));
}

#[test]
fn test_aggregates_are_idempotent() {
    let dataset = load_sample();

    for kind in AggregateKind::all() {
        let first = kind.compute(&dataset).unwrap();
        let second = kind.compute(&dataset).unwrap();
        assert_eq!(first, second, "{} changed between runs", kind);
    }
}

#[test]
fn test_missing_hourly_file_is_reported() {
    let err = Dataset::load(&fixture("day_sample.csv"), &fixture("no_such_file.csv")).unwrap_err();
    assert!(matches!(err, AnalysisError::Io { .. }));
    assert!(err.to_string().contains("no_such_file.csv"));
}

#[test]
fn test_malformed_csv_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("garbled.csv");
    std::fs::write(&path, b"dteday,casual,registered,cnt\n2011-01-01,\xff\xfe,2,3\n").unwrap();

    let err = bikeshare::dataset::load_daily(&path).unwrap_err();
    assert!(matches!(err, AnalysisError::Csv { .. }));
    assert!(err.to_string().contains("garbled.csv"));
}

#[test]
fn test_view_without_hourly_data() {
    let daily = bikeshare::dataset::load_daily(&fixture("day_sample.csv")).unwrap();
    let hourly = bikeshare::dataset::RecordLoader::new(bikeshare::dataset::RecordKind::Hourly)
        .load_str("dteday,hr,workingday,casual,registered,cnt\n")
        .unwrap();
    let dataset = Dataset::new(daily, hourly);

    let report = build_view(View::WorkingDayVsWeekend, &dataset).unwrap();
    assert!(report
        .sections
        .iter()
        .any(|s| s.insights == vec![NO_DATA.to_string()]));
}
