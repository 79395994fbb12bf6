//! One render pass: selection → fetch → filter → charts → view.

use chrono::NaiveDate;
use serde::Deserialize;
use tracing::{info, warn};

use orb_data::{
    cache::FetchCache,
    io::normalize_hhmm,
    models::NumericColumn,
    providers::{self, DatasetProvider, DatasetSource, FetchOutcome},
    selector::DatasetKey,
};
use orb_stats::{
    BucketWidth, DateRange, FilterState, StatsError, apply, build_charts, filter_options,
    options::{parse_box_color, parse_direction, parse_flag, parse_time, parse_weekday},
    palette::ALL,
};

use crate::{
    config::DashboardConfig,
    errors::{AuthError, DashboardError},
    session::{Session, SessionGate},
    view::{ChartsView, DashboardView, Notice, SelectorOptions, Span},
};

/// Filter picks as the sidebar sends them: dropdown labels, `"All"` when off.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FilterRequest {
    pub weekday: String,
    pub orb_conf_direction: String,
    pub orb_conf_time: String,
    pub orb_range_direction: String,
    pub orb_true: String,
    pub box_color: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl Default for FilterRequest {
    fn default() -> Self {
        Self {
            weekday: ALL.into(),
            orb_conf_direction: ALL.into(),
            orb_conf_time: ALL.into(),
            orb_range_direction: ALL.into(),
            orb_true: ALL.into(),
            box_color: ALL.into(),
            start_date: None,
            end_date: None,
        }
    }
}

impl FilterRequest {
    /// Parse every dropdown label. The date range is left unset.
    pub fn selections(&self) -> Result<FilterState, StatsError> {
        Ok(FilterState::default()
            .with_weekday(parse_weekday(&self.weekday)?)
            .with_orb_conf_direction(parse_direction(&self.orb_conf_direction)?)
            .with_orb_conf_time(parse_time(&self.orb_conf_time)?)
            .with_orb_range_direction(parse_direction(&self.orb_range_direction)?)
            .with_orb_true(parse_flag(&self.orb_true)?)
            .with_box_color(parse_box_color(&self.box_color)?))
    }

    /// The picked dates. One date alone is the range `[d, d]`.
    pub fn date_range(&self) -> Option<DateRange> {
        match (self.start_date, self.end_date) {
            (Some(a), Some(b)) => Some(DateRange::new(a, b)),
            (Some(d), None) | (None, Some(d)) => Some(DateRange::single(d)),
            (None, None) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    pub key: DatasetKey,
    /// `None` uses the configured default.
    pub bucket_width: Option<f64>,
    pub filters: FilterRequest,
}

impl Request {
    pub fn new(key: DatasetKey) -> Self {
        Self {
            key,
            bucket_width: None,
            filters: FilterRequest::default(),
        }
    }
}

pub struct Dashboard<'c> {
    config: DashboardConfig,
    provider: Box<dyn DatasetProvider>,
    session: Session<'c>,
}

impl<'c> Dashboard<'c> {
    pub fn new(config: DashboardConfig, provider: Box<dyn DatasetProvider>, cache: &'c FetchCache) -> Self {
        Self {
            config,
            provider,
            session: Session::new(cache),
        }
    }

    /// Build the provider named by `config`.
    pub fn from_config(config: DashboardConfig, cache: &'c FetchCache) -> anyhow::Result<Self> {
        let provider = config.data.provider()?;
        Ok(Self::new(config, provider, cache))
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    pub fn session(&self) -> &Session<'c> {
        &self.session
    }

    pub fn login(&mut self, username: &str, password: &str) -> Result<(), AuthError> {
        self.session.login(&self.config.users, username, password)
    }

    pub fn logout(&mut self) {
        self.session.logout();
    }

    fn require_login(&self) -> Result<(), DashboardError> {
        if self.session.is_authenticated() {
            Ok(())
        } else {
            Err(DashboardError::NotAuthenticated)
        }
    }

    fn bucket_width(&self, requested: Option<f64>) -> Result<BucketWidth, DashboardError> {
        let width = requested.unwrap_or(self.config.default_bucket_width);
        if !self.config.offers_width(width) {
            return Err(DashboardError::InvalidParameter(format!(
                "bucket width {width} is not one of {:?}",
                self.config.bucket_widths
            )));
        }
        Ok(BucketWidth::new(width)?)
    }

    /// Render the dashboard for `request`.
    ///
    /// Bad parameters are rejected before anything is fetched. A selection
    /// with no data, or data that fails to load, still renders: the view
    /// carries a notice and, for a failed load, empty charts.
    pub async fn render(&self, request: &Request) -> Result<DashboardView, DashboardError> {
        self.require_login()?;
        let width = self.bucket_width(request.bucket_width)?;
        request.key.validate()?;
        let mut state = request.filters.selections()?;

        let fetched = providers::fetch_or_empty(
            self.provider.as_ref(),
            self.session.cache(),
            &DatasetSource::Key(request.key.clone()),
        )
        .await;

        let mut view = DashboardView {
            selection: request.key.clone(),
            bucket_width: width.get(),
            notices: Vec::new(),
            sample_size: 0,
            retracement_base: 0,
            date_bounds: None,
            date_range: None,
            filter_options: None,
            charts: None,
        };

        match fetched.outcome {
            FetchOutcome::NotFound { key } => {
                info!(%key, "no data for selection");
                view.notices.push(Notice::NoData { key });
                return Ok(view);
            }
            FetchOutcome::Failed { reason } => view.notices.push(Notice::FetchFailed { reason }),
            FetchOutcome::Fresh { .. } | FetchOutcome::Cached { .. } => {}
        }

        let dataset = fetched.dataset.as_ref();
        for &column in dataset.missing_columns() {
            warn!(%column, key = %request.key, "column missing from dataset");
            view.notices.push(Notice::MissingColumn { column });
        }
        let blanked = dataset.report().cells_blanked;
        if blanked > 0 {
            view.notices.push(Notice::CellsBlanked { count: blanked });
        }

        let bounds = dataset.date_bounds();
        state.date_range = request.filters.date_range().or(bounds.map(DateRange::from));

        let filtered = apply(dataset, &state);
        let charts = build_charts(&filtered, width);
        for chart in charts.iter() {
            if let Some(reason) = chart.skipped() {
                view.notices.push(Notice::ChartSkipped {
                    title: chart.title.to_string(),
                    reason: reason.to_string(),
                });
            }
        }
        info!(
            key = %request.key,
            rows = dataset.len(),
            sample_size = filtered.len(),
            notices = view.notices.len(),
            "rendered dashboard"
        );

        view.sample_size = filtered.len();
        view.retracement_base = filtered
            .rows()
            .iter()
            .filter(|r| NumericColumn::MaxRetPct.finite(r).is_some())
            .count();
        view.date_bounds = bounds.map(Span::from);
        view.date_range = state.date_range.map(Span::from);
        view.filter_options = Some(filter_options(dataset));
        view.charts = Some(ChartsView::from(&charts));
        Ok(view)
    }

    /// Cascading selector choices. Each level narrows by the pick above it,
    /// or by the first offered value when nothing was picked.
    pub async fn options(
        &self,
        instrument: Option<&str>,
        orb_start: Option<&str>,
        orb_end: Option<&str>,
    ) -> Result<SelectorOptions, DashboardError> {
        self.require_login()?;
        let mut out = SelectorOptions {
            bucket_widths: self.config.bucket_widths.clone(),
            default_bucket_width: self.config.default_bucket_width,
            ..SelectorOptions::default()
        };

        let table = match providers::combinations(self.provider.as_ref(), self.session.cache()).await {
            Ok(table) => table,
            Err(e) => {
                warn!(error = %e, "combinations unavailable");
                out.notices.push(Notice::FetchFailed {
                    reason: e.to_string(),
                });
                return Ok(out);
            }
        };

        out.instruments = table.instruments();
        let Some(instrument) = pick(instrument.map(|s| s.trim().to_string()), &out.instruments) else {
            return Ok(out);
        };
        out.orb_starts = table.orb_starts(&instrument);
        let Some(orb_start) = pick(orb_start.map(normalize_hhmm), &out.orb_starts) else {
            return Ok(out);
        };
        out.orb_ends = table.orb_ends(&instrument, &orb_start);
        let Some(orb_end) = pick(orb_end.map(normalize_hhmm), &out.orb_ends) else {
            return Ok(out);
        };
        out.range_ends = table.range_ends(&instrument, &orb_start, &orb_end);
        Ok(out)
    }
}

fn pick(chosen: Option<String>, offered: &[String]) -> Option<String> {
    chosen.or_else(|| offered.first().cloned())
}
