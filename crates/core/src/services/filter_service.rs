use chrono::NaiveDate;

use super::date_service::parse_calendar_date;
use crate::models::chart::Chart;
use crate::models::zodiac::ZodiacSign;

/// Filter controls of the listing view.
///
/// `sun_sign` travels to the server with the page query; everything else is
/// evaluated locally over the charts already loaded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChartFilters {
    pub search_query: String,
    pub sun_sign: Option<ZodiacSign>,
    pub moon_sign: Option<ZodiacSign>,
    pub rising_sign: Option<ZodiacSign>,
    /// Inclusive lower bound on the birth date.
    pub date_from: Option<NaiveDate>,
    /// Inclusive upper bound on the birth date.
    pub date_to: Option<NaiveDate>,
}

impl ChartFilters {
    /// True when at least one locally evaluated predicate is set.
    pub fn has_local_predicates(&self) -> bool {
        !self.search_query.trim().is_empty()
            || self.moon_sign.is_some()
            || self.rising_sign.is_some()
            || self.date_from.is_some()
            || self.date_to.is_some()
    }
}

/// Local search/filter pipeline over accumulated charts.
///
/// Pure logic, no I/O. Never reorders: the output keeps server order.
pub struct FilterService;

impl FilterService {
    pub fn new() -> Self {
        Self
    }

    /// Indices into `charts` of every chart passing all predicates, ascending.
    pub fn apply(&self, charts: &[Chart], filters: &ChartFilters) -> Vec<usize> {
        let query = filters.search_query.trim().to_lowercase();
        charts
            .iter()
            .enumerate()
            .filter(|(_, chart)| self.matches(chart, filters, &query))
            .map(|(idx, _)| idx)
            .collect()
    }

    fn matches(&self, chart: &Chart, filters: &ChartFilters, query: &str) -> bool {
        if !query.is_empty()
            && !chart.name.to_lowercase().contains(query)
            && !chart.birth_location.to_lowercase().contains(query)
        {
            return false;
        }

        if let Some(sign) = filters.moon_sign {
            if chart.moon_sign != sign.as_str() {
                return false;
            }
        }

        if let Some(sign) = filters.rising_sign {
            if chart.rising_sign != sign.as_str() {
                return false;
            }
        }

        if filters.date_from.is_none() && filters.date_to.is_none() {
            return true;
        }

        // A chart whose date cannot be read never satisfies a date bound.
        let Some(birth) = parse_calendar_date(&chart.birth_date) else {
            return false;
        };
        if filters.date_from.is_some_and(|from| birth < from) {
            return false;
        }
        if filters.date_to.is_some_and(|to| birth > to) {
            return false;
        }
        true
    }
}

impl Default for FilterService {
    fn default() -> Self {
        Self::new()
    }
}
