mod common;

use chrono::NaiveDate;
use orb_dashboard::{DashboardError, FilterRequest, Notice, Request};
use orb_data::{cache::FetchCache, models::Column, selector::DatasetKey};
use tempfile::TempDir;

use common::*;

fn date(m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, m, d).unwrap()
}

fn with_filters(key: DatasetKey, filters: FilterRequest) -> Request {
    Request {
        filters,
        ..Request::new(key)
    }
}

#[tokio::test]
async fn rendering_requires_login() {
    let dir = data_dir();
    let cache = FetchCache::new();
    let mut dashboard = dashboard(dir.path(), &cache);

    let err = dashboard.render(&Request::new(es_full())).await.unwrap_err();
    assert_eq!(err, DashboardError::NotAuthenticated);
    assert!(dashboard.options(None, None, None).await.is_err());

    assert!(dashboard.login(USER, "wrong").is_err());
    assert!(dashboard.render(&Request::new(es_full())).await.is_err());
    assert!(cache.is_empty(), "nothing is fetched before login");
}

#[tokio::test]
async fn full_dataset_renders_every_chart() {
    let dir = data_dir();
    let cache = FetchCache::new();
    let dashboard = logged_in(dir.path(), &cache);

    let view = dashboard.render(&Request::new(es_full())).await.unwrap();
    assert!(view.notices.is_empty(), "{:?}", view.messages());
    assert_eq!(view.sample_size, 4);
    assert_eq!(view.retracement_base, 3);
    assert_eq!(view.bucket_width, 0.5);
    let bounds = view.date_bounds.unwrap();
    assert_eq!((bounds.start, bounds.end), (date(1, 2), date(1, 5)));
    assert_eq!(view.date_range, view.date_bounds);

    let charts = view.charts.unwrap();
    let orb_true = &charts.pies[0];
    let texts: Vec<(&str, &str)> = orb_true
        .entries
        .iter()
        .map(|e| (e.label.as_str(), e.text.as_str()))
        .collect();
    assert_eq!(texts, [("True", "75.0%"), ("False", "25.0%")]);
    assert_eq!(orb_true.colors.get("True").map(String::as_str), Some("#2ecc71"));

    let retracement: Vec<&str> = charts.histograms[0].entries.iter().map(|e| e.text.as_str()).collect();
    assert_eq!(retracement, ["66.7%", "33.3%"]);

    let extension: Vec<&str> = charts.histograms[1].entries.iter().map(|e| e.label.as_str()).collect();
    insta::assert_json_snapshot!(extension, @r#"
    [
      "[0.0, 0.5)",
      "[0.5, 1.0)",
      "[1.0, 1.5)",
      "[1.5, 2.0)"
    ]
    "#);

    let options = view.filter_options.unwrap();
    assert_eq!(options.orb_conf_time, ["All", "09:35", "09:40"]);
}

#[tokio::test]
async fn filters_narrow_the_sample() {
    let dir = data_dir();
    let cache = FetchCache::new();
    let dashboard = logged_in(dir.path(), &cache);

    let friday = FilterRequest {
        weekday: "Friday".into(),
        ..FilterRequest::default()
    };
    let view = dashboard.render(&with_filters(es_full(), friday)).await.unwrap();
    assert_eq!(view.sample_size, 1);

    let long_true = FilterRequest {
        orb_conf_direction: "Long".into(),
        box_color: "Green".into(),
        ..FilterRequest::default()
    };
    let view = dashboard.render(&with_filters(es_full(), long_true)).await.unwrap();
    assert_eq!(view.sample_size, 2);

    // confirmation-time choices ignore the other filters
    let options = view.filter_options.unwrap();
    assert_eq!(options.orb_conf_time, ["All", "09:35", "09:40"]);
}

#[tokio::test]
async fn a_single_date_selects_one_day() {
    let dir = data_dir();
    let cache = FetchCache::new();
    let dashboard = logged_in(dir.path(), &cache);

    let one_day = FilterRequest {
        start_date: Some(date(1, 3)),
        ..FilterRequest::default()
    };
    let view = dashboard.render(&with_filters(es_full(), one_day)).await.unwrap();
    assert_eq!(view.sample_size, 1);
    let range = view.date_range.unwrap();
    assert_eq!((range.start, range.end), (date(1, 3), date(1, 3)));
}

#[tokio::test]
async fn empty_filter_result_is_not_an_error() {
    let dir = data_dir();
    let cache = FetchCache::new();
    let dashboard = logged_in(dir.path(), &cache);

    let nothing = FilterRequest {
        start_date: Some(date(3, 1)),
        end_date: Some(date(3, 31)),
        ..FilterRequest::default()
    };
    let view = dashboard.render(&with_filters(es_full(), nothing)).await.unwrap();
    assert_eq!(view.sample_size, 0);
    let charts = view.charts.unwrap();
    assert!(charts.pies.iter().all(|c| c.available && c.entries.is_empty()));
}

#[tokio::test]
async fn outlying_extension_skips_one_histogram() {
    let dir = data_dir();
    let cache = FetchCache::new();
    let dashboard = logged_in(dir.path(), &cache);

    let key = DatasetKey::new("YM", "09:30", "09:35", "10:25");
    let view = dashboard.render(&Request::new(key)).await.unwrap();
    assert_eq!(view.sample_size, 2);
    assert_eq!(
        view.notices,
        [Notice::ChartSkipped {
            title: "ORB Max Extensions".into(),
            reason: "12000 buckets of width 0.5 exceed the limit of 10000".into(),
        }]
    );

    let charts = view.charts.unwrap();
    assert!(charts.pies.iter().all(|c| c.available && !c.entries.is_empty()));
    assert!(charts.histograms[0].available);
    assert!(!charts.histograms[1].available);
    assert!(charts.histograms[1].entries.is_empty());
    assert!(charts.extreme_times.iter().all(|c| c.available));
}

#[tokio::test]
async fn offered_confirmation_times_select_rows_with_seconds() {
    let dir = data_dir();
    let cache = FetchCache::new();
    let dashboard = logged_in(dir.path(), &cache);
    let key = DatasetKey::new("RTY", "09:30", "09:35", "10:25");

    let all = dashboard.render(&Request::new(key.clone())).await.unwrap();
    let offered = all.filter_options.unwrap().orb_conf_time;
    assert_eq!(offered, ["All", "09:35", "09:41"]);

    let pick = FilterRequest {
        orb_conf_time: offered[1].clone(),
        ..FilterRequest::default()
    };
    let view = dashboard.render(&with_filters(key, pick)).await.unwrap();
    assert_eq!(view.sample_size, 2);
}

#[tokio::test]
async fn invalid_parameters_are_rejected_before_fetching() {
    let dir = data_dir();
    let cache = FetchCache::new();
    let dashboard = logged_in(dir.path(), &cache);

    let unoffered = Request {
        bucket_width: Some(0.1),
        ..Request::new(es_full())
    };
    assert!(matches!(
        dashboard.render(&unoffered).await,
        Err(DashboardError::InvalidParameter(_))
    ));

    let backwards = Request::new(DatasetKey::new("ES", "09:35", "09:30", "10:25"));
    assert!(matches!(
        dashboard.render(&backwards).await,
        Err(DashboardError::InvalidParameter(_))
    ));

    let bad_day = with_filters(
        es_full(),
        FilterRequest {
            weekday: "Caturday".into(),
            ..FilterRequest::default()
        },
    );
    assert!(matches!(
        dashboard.render(&bad_day).await,
        Err(DashboardError::InvalidParameter(_))
    ));

    assert!(cache.is_empty());
}

#[tokio::test]
async fn unknown_combination_renders_a_notice_and_no_charts() {
    let dir = data_dir();
    let cache = FetchCache::new();
    let dashboard = logged_in(dir.path(), &cache);

    let key = DatasetKey::new("ES", "09:30", "09:35", "12:00");
    let view = dashboard.render(&Request::new(key.clone())).await.unwrap();
    assert_eq!(view.notices, [Notice::NoData { key }]);
    assert!(view.charts.is_none());
    assert_eq!(view.sample_size, 0);
}

#[tokio::test]
async fn failed_fetch_renders_empty_charts() {
    let dir = data_dir();
    let cache = FetchCache::new();
    let dashboard = logged_in(dir.path(), &cache);

    let key = DatasetKey::new("CL", "09:00", "09:05", "10:00");
    let view = dashboard.render(&Request::new(key)).await.unwrap();

    assert_eq!(view.notices.len(), 1);
    assert!(matches!(view.notices[0], Notice::FetchFailed { .. }));
    assert_eq!(view.sample_size, 0);
    assert!(view.date_bounds.is_none());
    let charts = view.charts.unwrap();
    assert!(charts.histograms.iter().all(|c| c.available && c.entries.is_empty()));
    assert!(cache.dataset("cl_missing_on_disk.csv").is_none());
}

#[tokio::test]
async fn missing_columns_disable_only_their_charts() {
    let dir = data_dir();
    let cache = FetchCache::new();
    let dashboard = logged_in(dir.path(), &cache);

    let view = dashboard.render(&Request::new(es_partial())).await.unwrap();
    let missing: Vec<Column> = view
        .notices
        .iter()
        .filter_map(|n| match n {
            Notice::MissingColumn { column } => Some(*column),
            _ => None,
        })
        .collect();
    assert_eq!(missing.len(), 9);
    assert!(missing.contains(&Column::MaxExtPct));
    assert!(view.notices.contains(&Notice::CellsBlanked { count: 1 }));
    assert_eq!(view.sample_size, 2);

    let charts = view.charts.unwrap();
    assert!(charts.pies[0].available);
    assert!(charts.pies[1].available);
    assert!(!charts.pies[2].available);
    assert!(charts.histograms.iter().all(|c| !c.available));
}

#[tokio::test]
async fn second_render_is_served_from_the_cache() {
    let dir = data_dir();
    let cache = FetchCache::new();
    let dashboard = logged_in(dir.path(), &cache);

    let first = dashboard.render(&Request::new(es_full())).await.unwrap();
    std::fs::remove_file(dir.path().join("es_full.csv")).unwrap();
    let second = dashboard.render(&Request::new(es_full())).await.unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn login_invalidates_cached_tables() {
    let dir = data_dir();
    let cache = FetchCache::new();
    let mut dashboard = logged_in(dir.path(), &cache);

    dashboard.render(&Request::new(es_full())).await.unwrap();
    assert_eq!(cache.len(), 1);

    dashboard.logout();
    dashboard.login(USER, PASSWORD).unwrap();
    assert!(cache.is_empty());
}

#[tokio::test]
async fn selector_options_cascade() {
    let dir = data_dir();
    let cache = FetchCache::new();
    let dashboard = logged_in(dir.path(), &cache);

    let first = dashboard.options(None, None, None).await.unwrap();
    assert_eq!(first.instruments, ["CL", "ES", "NQ", "RTY", "YM"]);
    assert_eq!(first.orb_starts, ["09:00"]);
    assert_eq!(first.range_ends, ["10:00"]);
    assert_eq!(first.bucket_widths, [0.5, 0.25]);

    let es = dashboard.options(Some("ES"), Some("09:30:00"), None).await.unwrap();
    assert_eq!(es.orb_starts, ["09:30"]);
    assert_eq!(es.orb_ends, ["09:35"]);
    assert_eq!(es.range_ends, ["10:25", "11:00"]);

    let nq = dashboard.options(Some("NQ"), None, None).await.unwrap();
    assert_eq!(nq.orb_ends, ["09:40"]);
}

#[tokio::test]
async fn missing_combinations_table_is_a_notice() {
    let empty = TempDir::new().unwrap();
    let cache = FetchCache::new();
    let dashboard = logged_in(empty.path(), &cache);

    let options = dashboard.options(None, None, None).await.unwrap();
    assert!(options.instruments.is_empty());
    assert!(matches!(options.notices[..], [Notice::FetchFailed { .. }]));
}

#[tokio::test]
#[serial_test::serial]
async fn login_clears_the_process_wide_cache() {
    let dir = data_dir();
    let global = orb_data::cache::global();
    let mut dashboard = dashboard(dir.path(), global);

    global.clear();
    dashboard.login(USER, PASSWORD).unwrap();
    dashboard.render(&Request::new(es_full())).await.unwrap();
    assert!(!global.is_empty());

    dashboard.login(USER, PASSWORD).unwrap();
    assert!(global.is_empty());
}
