use crate::models::request::CalculateChartRequest;

/// Minimum length of the birth location once surrounding whitespace is trimmed.
pub const MIN_LOCATION_LEN: usize = 2;

/// Inputs of the calculation form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BirthField {
    BirthDate,
    BirthTime,
    BirthLocation,
}

impl BirthField {
    pub const ALL: [BirthField; 3] = [
        BirthField::BirthDate,
        BirthField::BirthTime,
        BirthField::BirthLocation,
    ];
}

/// Why a field fails validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldIssue {
    Required,
    MinLength { min: usize },
}

impl FieldIssue {
    pub fn message(&self, field: BirthField) -> &'static str {
        match (self, field) {
            (FieldIssue::Required, BirthField::BirthDate) => "Birth date is required",
            (FieldIssue::Required, BirthField::BirthTime) => "Birth time is required",
            (FieldIssue::Required, BirthField::BirthLocation) => "Birth location is required",
            (FieldIssue::MinLength { .. }, _) => "Location must be at least 2 characters",
        }
    }
}

/// One input's value plus interaction flags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormField {
    pub value: String,
    /// The user has left the field (or a submit attempt marked it).
    pub touched: bool,
    /// The user has changed the value.
    pub dirty: bool,
}

/// Birth-data form with per-field validation state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BirthDataForm {
    birth_date: FormField,
    birth_time: FormField,
    birth_location: FormField,
}

impl BirthDataForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(&self, field: BirthField) -> &FormField {
        match field {
            BirthField::BirthDate => &self.birth_date,
            BirthField::BirthTime => &self.birth_time,
            BirthField::BirthLocation => &self.birth_location,
        }
    }

    fn field_mut(&mut self, field: BirthField) -> &mut FormField {
        match field {
            BirthField::BirthDate => &mut self.birth_date,
            BirthField::BirthTime => &mut self.birth_time,
            BirthField::BirthLocation => &mut self.birth_location,
        }
    }

    pub fn value(&self, field: BirthField) -> &str {
        &self.field(field).value
    }

    /// User input into a field.
    pub fn set(&mut self, field: BirthField, value: impl Into<String>) {
        let f = self.field_mut(field);
        f.value = value.into();
        f.dirty = true;
    }

    /// User left a field.
    pub fn touch(&mut self, field: BirthField) {
        self.field_mut(field).touched = true;
    }

    pub fn mark_all_touched(&mut self) {
        for field in BirthField::ALL {
            self.touch(field);
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn field_error(&self, field: BirthField) -> Option<FieldIssue> {
        let value = self.value(field).trim();
        if value.is_empty() {
            return Some(FieldIssue::Required);
        }
        if field == BirthField::BirthLocation && value.chars().count() < MIN_LOCATION_LEN {
            return Some(FieldIssue::MinLength {
                min: MIN_LOCATION_LEN,
            });
        }
        None
    }

    /// Message to show under a field, once the user has interacted with it.
    pub fn visible_error(&self, field: BirthField) -> Option<&'static str> {
        if !self.is_field_invalid(field) {
            return None;
        }
        self.field_error(field).map(|issue| issue.message(field))
    }

    pub fn is_valid(&self) -> bool {
        BirthField::ALL.iter().all(|&f| self.field_error(f).is_none())
    }

    /// Invalid and already interacted with.
    pub fn is_field_invalid(&self, field: BirthField) -> bool {
        let f = self.field(field);
        self.field_error(field).is_some() && (f.touched || f.dirty)
    }

    /// Valid and changed by the user.
    pub fn is_field_valid(&self, field: BirthField) -> bool {
        self.field_error(field).is_none() && self.field(field).dirty
    }

    /// The request to submit, or `None` while the form is invalid.
    pub fn to_request(&self) -> Option<CalculateChartRequest> {
        if !self.is_valid() {
            return None;
        }
        Some(CalculateChartRequest::new(
            self.birth_date.value.clone(),
            self.birth_time.value.clone(),
            self.birth_location.value.trim(),
        ))
    }
}
