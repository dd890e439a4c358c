// ═══════════════════════════════════════════════════════════════════
// Shared test doubles — in-memory ChartApi, recording viewport
// ═══════════════════════════════════════════════════════════════════
#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

use astro_charts_core::api::traits::ChartApi;
use astro_charts_core::errors::CoreError;
use astro_charts_core::models::chart::{Chart, Planet, Planets};
use astro_charts_core::models::envelope::{FieldError, PaginatedResponse};
use astro_charts_core::models::query::ChartQuery;
use astro_charts_core::models::request::{CalculateChartRequest, ChartUpdate};
use astro_charts_core::views::viewport::{ScrollMetrics, Section, Viewport};

pub fn planets() -> Planets {
    Planets {
        sun: Planet::new("Taurus", 24.5),
        moon: Planet::new("Cancer", 3.2),
        mercury: Planet::new("Gemini", 10.0),
        venus: Planet::new("Aries", 28.9),
        mars: Planet::new("Pisces", 15.1),
        jupiter: Some(Planet::new("Cancer", 1.4)),
        saturn: None,
        uranus: None,
        neptune: None,
        pluto: None,
    }
}

pub fn chart(id: &str, name: &str, location: &str, birth_date: &str) -> Chart {
    Chart {
        id: id.to_string(),
        name: name.to_string(),
        birth_date: birth_date.to_string(),
        birth_time: "12:00".to_string(),
        birth_location: location.to_string(),
        sun_sign: "Taurus".to_string(),
        moon_sign: "Cancer".to_string(),
        rising_sign: "Leo".to_string(),
        planets: planets(),
        latitude: None,
        longitude: None,
        notes: None,
        is_public: None,
        created_by: None,
        created_at: None,
        updated_at: None,
    }
}

pub fn chart_with_signs(id: &str, sun: &str, moon: &str, rising: &str) -> Chart {
    let mut c = chart(id, &format!("Chart {id}"), "Paris, France", "1990-01-01");
    c.sun_sign = sun.to_string();
    c.moon_sign = moon.to_string();
    c.rising_sign = rising.to_string();
    c
}

/// `n` charts with ids `c1..cn`, one birth day apart starting 1990-01-01.
pub fn numbered_charts(n: usize) -> Vec<Chart> {
    (1..=n)
        .map(|i| {
            let date = chrono::NaiveDate::from_ymd_opt(1990, 1, 1).unwrap()
                + chrono::Duration::days(i as i64 - 1);
            chart(
                &format!("c{i}"),
                &format!("Person {i}"),
                "London, UK",
                &date.format("%Y-%m-%d").to_string(),
            )
        })
        .collect()
}

/// In-memory backend. Paginates, filters by sun sign, applies updates.
/// Queued errors are returned by the next calls, whatever the operation.
#[derive(Default)]
pub struct MockChartApi {
    pub charts: Mutex<Vec<Chart>>,
    failures: Mutex<VecDeque<CoreError>>,
    pub queries: Mutex<Vec<ChartQuery>>,
    pub calculations: Mutex<Vec<CalculateChartRequest>>,
    pub updates: Mutex<Vec<(String, ChartUpdate)>>,
    pub deletions: Mutex<Vec<String>>,
    pub calls: Mutex<usize>,
}

impl MockChartApi {
    pub fn with_charts(charts: Vec<Chart>) -> Self {
        Self {
            charts: Mutex::new(charts),
            ..Self::default()
        }
    }

    pub fn fail_next(&self, error: CoreError) {
        self.failures.lock().unwrap().push_back(error);
    }

    pub fn call_count(&self) -> usize {
        *self.calls.lock().unwrap()
    }

    pub fn last_query(&self) -> Option<ChartQuery> {
        self.queries.lock().unwrap().last().cloned()
    }

    fn begin_call(&self) -> Result<(), CoreError> {
        *self.calls.lock().unwrap() += 1;
        match self.failures.lock().unwrap().pop_front() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

pub fn not_found() -> CoreError {
    CoreError::Api {
        status: 404,
        message: "Chart not found".into(),
    }
}

pub fn field_errors(msgs: &[&str]) -> CoreError {
    CoreError::Validation {
        status: 400,
        message: Some("Validation failed".into()),
        errors: msgs
            .iter()
            .map(|m| FieldError {
                msg: m.to_string(),
                param: None,
                path: None,
            })
            .collect(),
    }
}

#[async_trait]
impl ChartApi for MockChartApi {
    async fn get_all_charts(&self, query: &ChartQuery) -> Result<PaginatedResponse<Chart>, CoreError> {
        self.queries.lock().unwrap().push(query.clone());
        self.begin_call()?;

        let matching: Vec<Chart> = self
            .charts
            .lock()
            .unwrap()
            .iter()
            .filter(|c| query.sun_sign.map_or(true, |s| c.sun_sign == s.as_str()))
            .cloned()
            .collect();

        let limit = query.limit.max(1) as usize;
        let total = matching.len();
        let pages = total.div_ceil(limit);
        let start = (query.page.max(1) as usize - 1) * limit;
        let data: Vec<Chart> = matching.into_iter().skip(start).take(limit).collect();

        Ok(PaginatedResponse {
            success: true,
            count: data.len() as u32,
            total: total as u32,
            page: query.page,
            pages: pages as u32,
            data,
        })
    }

    async fn get_chart_by_id(&self, id: &str) -> Result<Chart, CoreError> {
        self.begin_call()?;
        self.charts
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.id == id)
            .cloned()
            .ok_or_else(not_found)
    }

    async fn calculate_chart(&self, request: &CalculateChartRequest) -> Result<Chart, CoreError> {
        self.calculations.lock().unwrap().push(request.clone());
        self.begin_call()?;

        let mut charts = self.charts.lock().unwrap();
        let id = format!("calc{}", charts.len() + 1);
        let mut c = chart(
            &id,
            &format!("Chart for {}", request.birth_location),
            &request.birth_location,
            &request.birth_date,
        );
        c.birth_time = request.birth_time.clone();
        charts.push(c.clone());
        Ok(c)
    }

    async fn update_chart(&self, id: &str, update: &ChartUpdate) -> Result<Chart, CoreError> {
        self.updates
            .lock()
            .unwrap()
            .push((id.to_string(), update.clone()));
        self.begin_call()?;

        let mut charts = self.charts.lock().unwrap();
        let c = charts.iter_mut().find(|c| c.id == id).ok_or_else(not_found)?;
        if let Some(v) = &update.name {
            c.name = v.clone();
        }
        if let Some(v) = &update.birth_date {
            c.birth_date = format!("{v}T00:00:00.000Z");
        }
        if let Some(v) = &update.birth_time {
            c.birth_time = v.clone();
        }
        if let Some(v) = &update.birth_location {
            c.birth_location = v.clone();
        }
        if let Some(v) = &update.notes {
            c.notes = Some(v.clone());
        }
        if let Some(v) = update.is_public {
            c.is_public = Some(v);
        }
        Ok(c.clone())
    }

    async fn delete_chart(&self, id: &str) -> Result<(), CoreError> {
        self.deletions.lock().unwrap().push(id.to_string());
        self.begin_call()?;

        let mut charts = self.charts.lock().unwrap();
        let idx = charts.iter().position(|c| c.id == id).ok_or_else(not_found)?;
        charts.remove(idx);
        Ok(())
    }

    async fn initialize_project(&self) -> Result<serde_json::Value, CoreError> {
        self.begin_call()?;
        Ok(serde_json::json!({ "success": true, "message": "initialized" }))
    }
}

/// Viewport double: fixed metrics, records reveal requests.
#[derive(Default)]
pub struct RecordingViewport {
    pub metrics: ScrollMetrics,
    pub revealed: Mutex<Vec<Section>>,
}

impl RecordingViewport {
    pub fn at(metrics: ScrollMetrics) -> Self {
        Self {
            metrics,
            revealed: Mutex::new(Vec::new()),
        }
    }
}

impl Viewport for RecordingViewport {
    fn scroll_metrics(&self) -> ScrollMetrics {
        self.metrics
    }

    fn scroll_into_view(&self, section: Section) {
        self.revealed.lock().unwrap().push(section);
    }
}

/// 800px window scrolled to within 100px of a 3000px page.
pub fn near_bottom() -> ScrollMetrics {
    ScrollMetrics::new(800.0, 2100.0, 3000.0)
}

/// 800px window at the top of a 3000px page.
pub fn at_top() -> ScrollMetrics {
    ScrollMetrics::new(800.0, 0.0, 3000.0)
}
