//! Filter state shared by the report views

use crate::period::{self, PeriodPreset, PeriodRange};
use pnlweb_config::labels::{GrossProfitLabels, PeriodLabels};
use serde::Serialize;
use std::collections::HashMap;

/// Raw query-string parameters of a report request
pub type QueryParams = HashMap<String, String>;

/// Group-by value that does not count as an active filter
pub const DEFAULT_GROUP_BY: &str = "product";

/// A dropdown or button option
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterOption {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

impl FilterOption {
    fn new(value: &str, label: &str, active: &str) -> Self {
        Self {
            value: value.to_string(),
            label: label.to_string(),
            selected: value == active,
        }
    }
}

/// Current filter state, as the templates see it
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterState {
    /// Raw `period` token; may be unrecognised
    pub active_preset: String,
    pub start_date: String,
    pub end_date: String,
    pub group_by: String,
    pub group_by_options: Vec<FilterOption>,
    pub period_presets: Vec<FilterOption>,
}

impl FilterState {
    /// Build from request parameters. `period` defaults to `thisMonth`.
    pub fn from_query(query: &QueryParams, labels: &PeriodLabels) -> Self {
        let preset = match param(query, "period") {
            "" => PeriodPreset::ThisMonth.as_str(),
            token => token,
        };

        Self {
            active_preset: preset.to_string(),
            start_date: param(query, "start").to_string(),
            end_date: param(query, "end").to_string(),
            group_by: String::new(),
            group_by_options: Vec::new(),
            period_presets: default_period_presets(labels, preset),
        }
    }

    /// Attach a group-by selection and its option list
    pub fn with_group_by(mut self, group_by: &str, options: Vec<FilterOption>) -> Self {
        self.group_by = group_by.to_string();
        self.group_by_options = options;
        self
    }

    pub fn preset(&self) -> PeriodPreset {
        PeriodPreset::from_token(&self.active_preset)
    }

    /// Date range for this filter in the process-local zone
    pub fn resolve_range(&self) -> PeriodRange {
        period::resolve_custom_now(self.preset(), &self.start_date, &self.end_date)
    }
}

/// Data for the `report-filter-sheet` template
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterSheetData {
    pub filter: FilterState,
    pub period_labels: PeriodLabels,
    pub report_url: String,
}

/// Read a query parameter, empty when absent
pub fn param<'a>(query: &'a QueryParams, key: &str) -> &'a str {
    query.get(key).map(String::as_str).unwrap_or("")
}

/// The `group-by` parameter, also accepted as `groupBy`
pub fn group_by_param(query: &QueryParams) -> &str {
    match param(query, "group-by") {
        "" => param(query, "groupBy"),
        value => value,
    }
}

/// The seven preset options in display order
pub fn default_period_presets(labels: &PeriodLabels, active: &str) -> Vec<FilterOption> {
    PeriodPreset::ALL
        .iter()
        .map(|preset| FilterOption::new(preset.as_str(), preset.label(labels), active))
        .collect()
}

/// Group-by choices offered on the gross profit report
pub fn gross_profit_group_by_options(labels: &GrossProfitLabels, active: &str) -> Vec<FilterOption> {
    [
        ("product", &labels.group_by_product),
        ("location", &labels.group_by_location),
        ("category", &labels.group_by_category),
        ("monthly", &labels.group_by_monthly),
        ("quarterly", &labels.group_by_quarterly),
    ]
    .into_iter()
    .map(|(value, label)| FilterOption::new(value, label, active))
    .collect()
}

/// Number of filter dimensions that differ from their defaults.
///
/// A custom date range is not counted on its own; it only registers
/// through the `custom` preset.
pub fn active_filter_count(filter: &FilterState) -> usize {
    let mut count = 0;
    if !filter.active_preset.is_empty() && filter.active_preset != PeriodPreset::ThisMonth.as_str() {
        count += 1;
    }
    if !filter.group_by.is_empty() && filter.group_by != DEFAULT_GROUP_BY {
        count += 1;
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(pairs: &[(&str, &str)]) -> QueryParams {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    fn state(preset: &str, group_by: &str) -> FilterState {
        FilterState {
            active_preset: preset.to_string(),
            group_by: group_by.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_default_period_presets() {
        let labels = PeriodLabels::default();
        let options = default_period_presets(&labels, "lastQuarter");

        let values: Vec<_> = options.iter().map(|o| o.value.as_str()).collect();
        assert_eq!(
            values,
            ["thisMonth", "lastMonth", "thisQuarter", "lastQuarter", "thisYear", "lastYear", "custom"]
        );
        assert_eq!(options.iter().filter(|o| o.selected).count(), 1);
        assert!(options[3].selected);
        assert_eq!(options[6].label, "Custom");
    }

    #[test]
    fn test_no_preset_selected_for_unknown_token() {
        let options = default_period_presets(&PeriodLabels::default(), "fortnight");
        assert!(options.iter().all(|o| !o.selected));
    }

    #[test]
    fn test_active_filter_count() {
        assert_eq!(active_filter_count(&state("", "")), 0);
        assert_eq!(active_filter_count(&state("thisMonth", "product")), 0);
        assert_eq!(active_filter_count(&state("lastMonth", "")), 1);
        assert_eq!(active_filter_count(&state("thisMonth", "monthly")), 1);
        assert_eq!(active_filter_count(&state("custom", "location")), 2);
    }

    #[test]
    fn test_custom_dates_not_counted_separately() {
        let mut filter = state("custom", "");
        filter.start_date = "2024-01-01".to_string();
        filter.end_date = "2024-01-31".to_string();
        assert_eq!(active_filter_count(&filter), 1);
    }

    #[test]
    fn test_from_query_defaults() {
        let filter = FilterState::from_query(&QueryParams::new(), &PeriodLabels::default());
        assert_eq!(filter.active_preset, "thisMonth");
        assert_eq!(filter.preset(), PeriodPreset::ThisMonth);
        assert!(filter.start_date.is_empty());
        assert!(filter.period_presets[0].selected);
        assert_eq!(active_filter_count(&filter), 0);
    }

    #[test]
    fn test_from_query_custom() {
        let filter = FilterState::from_query(
            &query(&[("period", "custom"), ("start", "2024-01-01"), ("end", "2024-01-31")]),
            &PeriodLabels::default(),
        );
        assert_eq!(filter.preset(), PeriodPreset::Custom);
        assert_eq!(filter.start_date, "2024-01-01");
        assert!(filter.period_presets[6].selected);

        let range = filter.resolve_range();
        assert_eq!(range.start.date_naive().to_string(), "2024-01-01");
        assert_eq!(range.end.date_naive().to_string(), "2024-01-31");
    }

    #[test]
    fn test_group_by_param_spellings() {
        assert_eq!(group_by_param(&query(&[("group-by", "location")])), "location");
        assert_eq!(group_by_param(&query(&[("groupBy", "monthly")])), "monthly");
        assert_eq!(group_by_param(&query(&[("group-by", "category"), ("groupBy", "monthly")])), "category");
        assert_eq!(group_by_param(&QueryParams::new()), "");
    }

    #[test]
    fn test_gross_profit_group_by_options() {
        let labels = GrossProfitLabels::default();
        let filter = FilterState::from_query(&QueryParams::new(), &PeriodLabels::default())
            .with_group_by("quarterly", gross_profit_group_by_options(&labels, "quarterly"));

        assert_eq!(filter.group_by_options.len(), 5);
        assert!(filter.group_by_options[4].selected);
        assert_eq!(filter.group_by_options[4].label, "Quarterly");
        assert_eq!(active_filter_count(&filter), 1);
    }
}
