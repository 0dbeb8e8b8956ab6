use std::fmt;

use serde::Serialize;

use super::domain::{PropertyAddress, SearchRequest, SearchType};

/// Raw form input as collected from the user, prior to any validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchForm {
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub county: Option<String>,
    pub parcel_number: Option<String>,
    pub search_type: String,
    pub include_historical: bool,
    pub jurisdiction: Option<String>,
}

impl Default for SearchForm {
    fn default() -> Self {
        Self {
            street: String::new(),
            city: String::new(),
            state: String::new(),
            zip_code: String::new(),
            county: None,
            parcel_number: None,
            search_type: SearchType::Full.as_str().to_string(),
            include_historical: false,
            jurisdiction: None,
        }
    }
}

impl SearchForm {
    /// Validate the form into a submittable request.
    ///
    /// Either every field passes and the request carries the input unchanged,
    /// or every failing field is reported and nothing is submitted.
    pub fn validate(&self) -> Result<SearchRequest, ValidationErrors> {
        let mut errors = Vec::new();

        if self.street.is_empty() {
            errors.push(FieldError::new(FormField::Street, "Street is required"));
        }
        if self.city.is_empty() {
            errors.push(FieldError::new(FormField::City, "City is required"));
        }
        if self.state.chars().count() != 2 {
            errors.push(FieldError::new(
                FormField::State,
                "State must be 2 characters",
            ));
        }
        if self.zip_code.chars().count() < 5 {
            errors.push(FieldError::new(FormField::ZipCode, "Zip code is required"));
        }

        let search_type = match self.search_type.parse::<SearchType>() {
            Ok(parsed) => Some(parsed),
            Err(message) => {
                errors.push(FieldError::new(FormField::SearchType, message));
                None
            }
        };

        if !errors.is_empty() {
            return Err(ValidationErrors(errors));
        }

        Ok(SearchRequest {
            property_address: PropertyAddress {
                street: self.street.clone(),
                city: self.city.clone(),
                state: self.state.clone(),
                zip_code: self.zip_code.clone(),
                county: self.county.clone(),
                parcel_number: self.parcel_number.clone(),
            },
            search_type: search_type.unwrap_or_default(),
            include_historical: self.include_historical,
            jurisdiction: self.jurisdiction.clone(),
        })
    }
}

/// Form fields that carry validation rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FormField {
    Street,
    City,
    State,
    ZipCode,
    SearchType,
}

impl FormField {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Street => "street",
            Self::City => "city",
            Self::State => "state",
            Self::ZipCode => "zip_code",
            Self::SearchType => "search_type",
        }
    }
}

/// A single field-level validation message, rendered next to the field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: FormField,
    pub message: String,
}

impl FieldError {
    fn new(field: FormField, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field.name(), self.message)
    }
}

/// Every failing field of one validation pass; submission is all-or-nothing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("search form failed validation on {} field(s)", .0.len())]
pub struct ValidationErrors(pub Vec<FieldError>);

impl ValidationErrors {
    pub fn fields(&self) -> &[FieldError] {
        &self.0
    }

    pub fn message_for(&self, field: FormField) -> Option<&str> {
        self.0
            .iter()
            .find(|error| error.field == field)
            .map(|error| error.message.as_str())
    }
}
