use log::{error, info};
use std::sync::Arc;

use super::form::BirthDataForm;
use super::viewport::{Section, Viewport};
use crate::api::traits::ChartApi;
use crate::models::chart::Chart;

/// Where the calculation form is in its submit cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalculatorPhase {
    Editing,
    Submitting,
    Result,
    Error,
}

/// Result of a submit attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Client-side validation failed; nothing was sent.
    Invalid,
    /// A submission is already in flight.
    Busy,
    Calculated,
    Failed,
}

/// Calculation controller: collects birth data, submits it, shows the chart.
pub struct CalculatorView {
    api: Arc<dyn ChartApi>,
    viewport: Option<Arc<dyn Viewport>>,
    form: BirthDataForm,
    phase: CalculatorPhase,
    error: Option<String>,
    result: Option<Chart>,
}

impl CalculatorView {
    pub fn new(api: Arc<dyn ChartApi>) -> Self {
        Self {
            api,
            viewport: None,
            form: BirthDataForm::new(),
            phase: CalculatorPhase::Editing,
            error: None,
            result: None,
        }
    }

    /// Attach the surface used to bring the result panel on screen.
    pub fn with_viewport(mut self, viewport: Arc<dyn Viewport>) -> Self {
        self.viewport = Some(viewport);
        self
    }

    pub fn form(&self) -> &BirthDataForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut BirthDataForm {
        &mut self.form
    }

    pub fn phase(&self) -> CalculatorPhase {
        self.phase
    }

    pub fn is_submitting(&self) -> bool {
        self.phase == CalculatorPhase::Submitting
    }

    pub fn can_submit(&self) -> bool {
        !self.is_submitting() && self.form.is_valid()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// The calculated chart, only while the result panel is showing.
    pub fn result(&self) -> Option<&Chart> {
        match self.phase {
            CalculatorPhase::Result => self.result.as_ref(),
            _ => None,
        }
    }

    pub async fn submit(&mut self) -> SubmitOutcome {
        if self.is_submitting() {
            return SubmitOutcome::Busy;
        }
        let Some(request) = self.form.to_request() else {
            self.form.mark_all_touched();
            return SubmitOutcome::Invalid;
        };

        self.phase = CalculatorPhase::Submitting;
        self.error = None;
        self.result = None;

        let result = self.api.calculate_chart(&request).await;
        match result {
            Ok(chart) => {
                info!("chart {} calculated for {}", chart.id, request.birth_location);
                self.result = Some(chart);
                self.phase = CalculatorPhase::Result;
                self.form.reset();
                if let Some(viewport) = &self.viewport {
                    viewport.scroll_into_view(Section::CalculationResult);
                }
                SubmitOutcome::Calculated
            }
            Err(e) => {
                error!("chart calculation failed: {e}");
                self.error = Some(e.user_message_or("Failed to calculate chart"));
                self.phase = CalculatorPhase::Error;
                SubmitOutcome::Failed
            }
        }
    }

    /// Clear the form, the error and any result.
    pub fn reset(&mut self) {
        self.form.reset();
        self.error = None;
        self.result = None;
        self.phase = CalculatorPhase::Editing;
    }
}
