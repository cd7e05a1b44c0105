//! Parsing of raw text-field input into typed roster values.
//!
//! Input collaborators hand over whatever the user typed. Names and ids
//! are trimmed, empty fields are `Missing`, and integers are parsed
//! strictly: `"75abc"` is rejected rather than read as 75.

use crate::error::ValidationError;
use crate::model::NewStudent;

/// Raw values from a registration form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistrationForm {
    pub name: String,
    pub id: String,
    pub gender: String,
    pub age: String,
    pub form: String,
}

impl RegistrationForm {
    /// Trim and type-check the fields. Range checks are left to the store.
    pub fn parse(&self) -> Result<NewStudent, ValidationError> {
        let name = required("name", &self.name)?;
        let id = required("id", &self.id)?;
        let gender = required("gender", &self.gender)?;
        let age = integer("age", &self.age)?;
        let form = integer("form", &self.form)?;

        Ok(NewStudent {
            id: id.to_string(),
            name: name.to_string(),
            gender: gender.to_string(),
            age,
            form,
        })
    }
}

/// Raw values from a performance entry form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PerformanceForm {
    pub form: String,
    pub math: String,
    pub english: String,
    pub science: String,
    pub social: String,
}

impl PerformanceForm {
    /// Parse into raw integers suitable for
    /// [`RosterStore::submit_performance`](crate::store::RosterStore::submit_performance).
    pub fn parse_raw(&self) -> Result<(i64, [i64; 4]), ValidationError> {
        let form = integer("form", &self.form)?;
        let scores = [
            integer("math", &self.math)?,
            integer("english", &self.english)?,
            integer("science", &self.science)?,
            integer("social", &self.social)?,
        ];
        Ok((form, scores))
    }
}

fn required<'a>(field: &'static str, raw: &'a str) -> Result<&'a str, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        Err(ValidationError::Missing { field })
    } else {
        Ok(trimmed)
    }
}

fn integer(field: &'static str, raw: &str) -> Result<i64, ValidationError> {
    let trimmed = required(field, raw)?;
    trimmed
        .parse::<i64>()
        .map_err(|_| ValidationError::NotNumeric {
            field,
            value: trimmed.to_string(),
        })
}
