//! View-model building blocks shared by the report pages

use serde::{Deserialize, Serialize};

/// Semantic severity tag for a displayed value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    Success,
    Warning,
    Danger,
    Info,
    Default,
}

impl Default for Variant {
    fn default() -> Self {
        Variant::Default
    }
}

impl std::fmt::Display for Variant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Variant::Success => write!(f, "success"),
            Variant::Warning => write!(f, "warning"),
            Variant::Danger => write!(f, "danger"),
            Variant::Info => write!(f, "info"),
            Variant::Default => write!(f, "default"),
        }
    }
}

/// A single summary-bar metric
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryMetric {
    pub label: String,
    /// Pre-formatted display value
    pub value: String,
    pub highlight: bool,
    pub variant: Variant,
}

impl SummaryMetric {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            highlight: false,
            variant: Variant::Default,
        }
    }

    pub fn highlighted(mut self) -> Self {
        self.highlight = true;
        self
    }

    pub fn with_variant(mut self, variant: Variant) -> Self {
        self.variant = variant;
        self
    }
}

/// One line of a profit-and-loss statement
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PLLineItem {
    pub label: String,
    pub value: String,
    pub is_total: bool,
    pub variant: Variant,
}

impl PLLineItem {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            is_total: false,
            variant: Variant::Default,
        }
    }

    pub fn total(mut self) -> Self {
        self.is_total = true;
        self
    }

    pub fn with_variant(mut self, variant: Variant) -> Self {
        self.variant = variant;
        self
    }
}

/// Thresholds for colouring a gross margin percentage
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarginBands {
    /// Margins below this are `danger`
    pub danger_below: f64,
    /// Margins below this (and not danger) are `warning`
    pub warning_below: f64,
}

impl MarginBands {
    pub const DEFAULT: MarginBands = MarginBands {
        danger_below: 15.0,
        warning_below: 30.0,
    };

    pub fn variant(&self, margin: f64) -> Variant {
        if margin < self.danger_below {
            Variant::Danger
        } else if margin < self.warning_below {
            Variant::Warning
        } else {
            Variant::Success
        }
    }
}

impl Default for MarginBands {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Margin colour with the default bands
pub fn margin_variant(margin: f64) -> Variant {
    MarginBands::DEFAULT.variant(margin)
}

/// Net profit colour: a loss is `danger`, a thin margin (< 10%) `warning`
pub fn net_variant(net_profit: f64, net_margin: f64) -> Variant {
    if net_profit < 0.0 {
        Variant::Danger
    } else if net_margin < 10.0 {
        Variant::Warning
    } else {
        Variant::Success
    }
}

pub fn revenue_status_variant(status: &str) -> Variant {
    match status {
        "completed" | "paid" => Variant::Success,
        "pending" => Variant::Warning,
        "cancelled" | "refunded" => Variant::Danger,
        _ => Variant::Default,
    }
}

pub fn expense_status_variant(status: &str) -> Variant {
    match status {
        "paid" => Variant::Success,
        "approved" => Variant::Info,
        "pending" => Variant::Warning,
        "cancelled" => Variant::Danger,
        _ => Variant::Default,
    }
}

/// Page chrome shared by every report page
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PageHeader {
    pub cache_version: String,
    pub title: String,
    pub current_path: String,
    pub active_nav: String,
    pub active_sub_nav: String,
    pub header_title: String,
    pub header_subtitle: String,
    pub header_icon: String,
}

/// Navigation card on the reports dashboard
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportCard {
    pub title: String,
    pub description: String,
    pub icon: String,
    pub url: String,
}
