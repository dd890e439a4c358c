use crate::errors::CoreError;
use crate::models::chart::Chart;
use crate::models::request::ChartUpdate;
use crate::services::date_service::to_input_date;

/// Maximum length of chart notes, in characters.
pub const MAX_NOTES_LEN: usize = 1000;

/// Detached, editable copy of a chart's user-editable fields.
///
/// Edits never touch the listing's canonical entry; the listing commits by
/// replacing its entry with whatever the server returns after a save.
#[derive(Debug, Clone, PartialEq)]
pub struct EditBuffer {
    id: String,
    pub name: String,
    /// `YYYY-MM-DD`
    pub birth_date: String,
    pub birth_time: String,
    pub birth_location: String,
    pub notes: String,
    pub is_public: bool,
}

impl EditBuffer {
    pub fn from_chart(chart: &Chart) -> Self {
        Self {
            id: chart.id.clone(),
            name: chart.name.clone(),
            birth_date: to_input_date(&chart.birth_date),
            birth_time: chart.birth_time.clone(),
            birth_location: chart.birth_location.clone(),
            notes: chart.notes.clone().unwrap_or_default(),
            is_public: chart.is_public.unwrap_or(false),
        }
    }

    /// Id of the chart this buffer edits.
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        let required = [
            ("Chart name", &self.name),
            ("Birth date", &self.birth_date),
            ("Birth time", &self.birth_time),
            ("Birth location", &self.birth_location),
        ];
        for (label, value) in required {
            if value.trim().is_empty() {
                return Err(CoreError::InvalidForm(format!("{label} is required")));
            }
        }
        if self.notes.chars().count() > MAX_NOTES_LEN {
            return Err(CoreError::InvalidForm(format!(
                "Notes must be at most {MAX_NOTES_LEN} characters"
            )));
        }
        Ok(())
    }

    /// The partial update sent on save: the editable subset only.
    pub fn to_update(&self) -> Result<ChartUpdate, CoreError> {
        self.validate()?;
        Ok(ChartUpdate {
            name: Some(self.name.clone()),
            birth_date: Some(self.birth_date.clone()),
            birth_time: Some(self.birth_time.clone()),
            birth_location: Some(self.birth_location.clone()),
            notes: Some(self.notes.clone()),
            is_public: Some(self.is_public),
        })
    }
}

/// State of an open edit modal.
#[derive(Debug, Clone, PartialEq)]
pub struct EditSession {
    pub buffer: EditBuffer,
    pub saving: bool,
    pub error: Option<String>,
}

impl EditSession {
    pub fn open(chart: &Chart) -> Self {
        Self {
            buffer: EditBuffer::from_chart(chart),
            saving: false,
            error: None,
        }
    }
}

/// State of an open delete confirmation.
#[derive(Debug, Clone, PartialEq)]
pub struct DeleteSession {
    pub target: Chart,
    pub deleting: bool,
    pub error: Option<String>,
}

impl DeleteSession {
    pub fn open(chart: &Chart) -> Self {
        Self {
            target: chart.clone(),
            deleting: false,
            error: None,
        }
    }
}
