use serde::Serialize;

pub const NO_DATA_MESSAGE: &str = "No data available for this selection.";

pub const PRIMARY_COLOR: &str = "#0052CC";
pub const ACCENT_COLOR: &str = "#FFAB00";
pub const ALERT_COLOR: &str = "#DE350B";

/// Display hints that travel with every chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartMeta {
    pub title: String,
    pub x_axis: String,
    pub y_axis: String,
    pub secondary_y_axis: Option<String>,
    pub series: Vec<SeriesStyle>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesStyle {
    pub name: String,
    pub color: String,
    pub secondary_axis: bool,
}

impl SeriesStyle {
    pub fn primary(name: &str, color: &str) -> Self {
        Self {
            name: name.to_string(),
            color: color.to_string(),
            secondary_axis: false,
        }
    }

    pub fn secondary(name: &str, color: &str) -> Self {
        Self {
            secondary_axis: true,
            ..Self::primary(name, color)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyReason {
    /// The query ran and matched nothing.
    NoData,
    /// The query definition could not be loaded.
    QueryUnavailable,
    /// The store could not be opened or the query failed.
    StoreError,
    /// The query returned rows the report could not read.
    InvalidResult,
}

/// A labelled placeholder shown instead of a chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmptyState {
    pub title: String,
    pub message: String,
    pub reason: EmptyReason,
}

impl EmptyState {
    pub fn no_data(title: &str) -> Self {
        Self {
            title: title.to_string(),
            message: NO_DATA_MESSAGE.to_string(),
            reason: EmptyReason::NoData,
        }
    }

    pub fn query_unavailable(title: &str, query: &str) -> Self {
        Self {
            title: title.to_string(),
            message: format!("Query '{}' is unavailable.", query),
            reason: EmptyReason::QueryUnavailable,
        }
    }

    pub fn store_error(title: &str, error: &common::Error) -> Self {
        Self {
            title: title.to_string(),
            message: format!("Data could not be loaded: {}", error),
            reason: EmptyReason::StoreError,
        }
    }

    pub fn invalid_result(title: &str, error: &common::Error) -> Self {
        Self {
            title: title.to_string(),
            message: format!("Data could not be read: {}", error),
            reason: EmptyReason::InvalidResult,
        }
    }
}

/// What every reporting function hands to the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Chart<T> {
    Ready { meta: ChartMeta, data: T },
    Empty(EmptyState),
}

impl<T> Chart<T> {
    pub fn is_empty(&self) -> bool {
        matches!(self, Chart::Empty(_))
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            Chart::Ready { data, .. } => Some(data),
            Chart::Empty(_) => None,
        }
    }

    pub fn meta(&self) -> Option<&ChartMeta> {
        match self {
            Chart::Ready { meta, .. } => Some(meta),
            Chart::Empty(_) => None,
        }
    }

    pub fn empty_state(&self) -> Option<&EmptyState> {
        match self {
            Chart::Ready { .. } => None,
            Chart::Empty(state) => Some(state),
        }
    }
}
