//! Core data model types for the roster.
//!
//! Range-constrained values are newtypes that can only be built through
//! their validating constructors, so a `Student` or `PerformanceRecord`
//! that exists is always within bounds.

use std::fmt;

use crate::error::ValidationError;

fn check_range(
    field: &'static str,
    value: i64,
    min: i64,
    max: i64,
) -> Result<u8, ValidationError> {
    if value < min || value > max {
        return Err(ValidationError::OutOfRange {
            field,
            min,
            max,
            value,
        });
    }
    // min/max for every caller fit in a u8
    Ok(value as u8)
}

/// A student's age in years, 10 through 20.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Age(pub(crate) u8);

impl Age {
    pub const MIN: i64 = 10;
    pub const MAX: i64 = 20;

    pub fn new(value: i64) -> Result<Self, ValidationError> {
        check_range("age", value, Self::MIN, Self::MAX).map(Age)
    }
}

impl fmt::Display for Age {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A grade level, 1 through 4.
///
/// Used both for a student's current level and for the term a
/// performance record belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Form(pub(crate) u8);

impl Form {
    pub const MIN: i64 = 1;
    pub const MAX: i64 = 4;

    pub fn new(value: i64) -> Result<Self, ValidationError> {
        check_range("form", value, Self::MIN, Self::MAX).map(Form)
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl fmt::Display for Form {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Form {}", self.0)
    }
}

/// A subject score, 0 through 100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Score(pub(crate) u8);

impl Score {
    pub const MIN: i64 = 0;
    pub const MAX: i64 = 100;

    /// Validate a score for `subject`; errors name the subject.
    pub fn new(subject: Subject, value: i64) -> Result<Self, ValidationError> {
        check_range(subject.as_str(), value, Self::MIN, Self::MAX).map(Score)
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The fixed set of tracked subjects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Subject {
    Math,
    English,
    Science,
    Social,
}

impl Subject {
    /// All subjects in display order.
    pub const ALL: [Subject; 4] = [
        Subject::Math,
        Subject::English,
        Subject::Science,
        Subject::Social,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Subject::Math => "math",
            Subject::English => "english",
            Subject::Science => "science",
            Subject::Social => "social",
        }
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One score per subject.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scores {
    pub math: Score,
    pub english: Score,
    pub science: Score,
    pub social: Score,
}

impl Scores {
    /// Validate four raw scores.
    pub fn new(
        math: i64,
        english: i64,
        science: i64,
        social: i64,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            math: Score::new(Subject::Math, math)?,
            english: Score::new(Subject::English, english)?,
            science: Score::new(Subject::Science, science)?,
            social: Score::new(Subject::Social, social)?,
        })
    }

    pub fn get(&self, subject: Subject) -> Score {
        match subject {
            Subject::Math => self.math,
            Subject::English => self.english,
            Subject::Science => self.science,
            Subject::Social => self.social,
        }
    }

    /// `(subject, score)` pairs in display order.
    pub fn iter(&self) -> impl Iterator<Item = (Subject, Score)> + '_ {
        Subject::ALL.into_iter().map(move |s| (s, self.get(s)))
    }

    pub fn total(&self) -> u32 {
        self.iter().map(|(_, score)| u32::from(score.get())).sum()
    }

    /// Unweighted mean of the four subject scores.
    pub fn average(&self) -> Average {
        // sum / 4 expressed in hundredths is exactly sum * 25
        Average::from_hundredths(self.total() * 100 / Subject::ALL.len() as u32)
    }
}

/// A mean score with exactly two decimal places.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Average(u32);

impl Average {
    pub fn from_hundredths(hundredths: u32) -> Self {
        Average(hundredths)
    }

    pub fn hundredths(self) -> u32 {
        self.0
    }
}

impl fmt::Display for Average {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

/// One snapshot of subject scores for a given form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PerformanceRecord {
    pub form: Form,
    pub scores: Scores,
}

impl PerformanceRecord {
    pub fn new(form: Form, scores: Scores) -> Self {
        Self { form, scores }
    }

    pub fn average(&self) -> Average {
        self.scores.average()
    }
}

/// Raw registration values as supplied by the input collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewStudent {
    pub id: String,
    pub name: String,
    pub gender: String,
    pub age: i64,
    pub form: i64,
}

/// A registered student.
///
/// Fields are only mutable through [`crate::store::RosterStore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Student {
    pub(crate) id: String,
    pub(crate) name: String,
    pub(crate) gender: String,
    pub(crate) age: Age,
    pub(crate) form: Form,
    pub(crate) performance: Vec<PerformanceRecord>,
}

impl Student {
    /// Validate raw registration values into a student with no records.
    pub fn from_registration(new: NewStudent) -> Result<Self, ValidationError> {
        let id = require("id", new.id)?;
        let name = require("name", new.name)?;
        let gender = require("gender", new.gender)?;
        let age = Age::new(new.age)?;
        let form = Form::new(new.form)?;

        Ok(Self {
            id,
            name,
            gender,
            age,
            form,
            performance: Vec::new(),
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn gender(&self) -> &str {
        &self.gender
    }

    pub fn age(&self) -> Age {
        self.age
    }

    pub fn form(&self) -> Form {
        self.form
    }

    /// Performance records in the order they were first entered.
    pub fn performance(&self) -> &[PerformanceRecord] {
        &self.performance
    }

    /// Mean of the most recently added record, or `None` when the
    /// student has no records yet.
    ///
    /// The last record in entry order is used, which is not necessarily
    /// the record for the student's current form.
    pub fn average(&self) -> Option<Average> {
        self.performance.last().map(PerformanceRecord::average)
    }
}

fn require(field: &'static str, value: String) -> Result<String, ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::Missing { field })
    } else {
        Ok(value)
    }
}
