//! TOML seed files and the built-in sample roster.
//!
//! A seed file pre-populates the roster at session start. Entries go
//! through the same store operations as interactive input, so a seed
//! file can never produce a roster that breaks an invariant.

use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::model::{Age, Form, NewStudent, PerformanceRecord, Score, Scores, Student};
use crate::store::RosterStore;

#[derive(Debug, Deserialize)]
struct TomlSeedFile {
    #[serde(default)]
    students: Vec<TomlStudent>,
}

#[derive(Debug, Deserialize)]
struct TomlStudent {
    id: String,
    name: String,
    gender: String,
    age: i64,
    form: i64,
    #[serde(default)]
    performance: Vec<TomlPerformance>,
}

#[derive(Debug, Deserialize)]
struct TomlPerformance {
    form: i64,
    math: i64,
    english: i64,
    science: i64,
    social: i64,
}

/// Parse a seed file into a populated roster.
pub fn parse_seed(path: &Path) -> Result<RosterStore> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read seed file: {}", path.display()))?;

    parse_seed_str(&content, path)
}

/// Parse seed TOML from a string (useful for testing).
pub fn parse_seed_str(content: &str, source_path: &Path) -> Result<RosterStore> {
    let parsed: TomlSeedFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    let mut store = RosterStore::new();
    for s in parsed.students {
        // text fields get the same trimming as interactive registration
        let id = s.id.trim().to_string();
        store
            .register_student(NewStudent {
                id: id.clone(),
                name: s.name.trim().to_string(),
                gender: s.gender.trim().to_string(),
                age: s.age,
                form: s.form,
            })
            .with_context(|| format!("invalid student {id} in {}", source_path.display()))?;

        for p in s.performance {
            store
                .submit_performance(&id, p.form, [p.math, p.english, p.science, p.social])
                .with_context(|| {
                    format!(
                        "invalid performance record for {id} in {}",
                        source_path.display()
                    )
                })?;
        }
    }

    tracing::debug!(
        "loaded {} student(s) from {}",
        store.len(),
        source_path.display()
    );
    Ok(store)
}

/// A non-fatal issue found in a seed file.
#[derive(Debug, Clone)]
pub struct SeedWarning {
    /// The student the warning concerns, if any.
    pub student_id: Option<String>,
    pub message: String,
}

/// Lint a seed file for suspicious but loadable content.
pub fn lint_seed(path: &Path) -> Result<Vec<SeedWarning>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read seed file: {}", path.display()))?;

    lint_seed_str(&content, path)
}

pub fn lint_seed_str(content: &str, source_path: &Path) -> Result<Vec<SeedWarning>> {
    let parsed: TomlSeedFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    let mut warnings = Vec::new();
    let warn = |warnings: &mut Vec<SeedWarning>, id: &str, message: String| {
        warnings.push(SeedWarning {
            student_id: Some(id.to_string()),
            message,
        });
    };

    if parsed.students.is_empty() {
        warnings.push(SeedWarning {
            student_id: None,
            message: "seed file contains no students".into(),
        });
    }

    let mut seen_ids = HashSet::new();
    for s in &parsed.students {
        if !seen_ids.insert(s.id.trim()) {
            warn(&mut warnings, &s.id, format!("duplicate student ID: {}", s.id));
        }

        if s.performance.is_empty() {
            warn(&mut warnings, &s.id, "no performance records".into());
        }

        let mut seen_forms = HashSet::new();
        for p in &s.performance {
            if !seen_forms.insert(p.form) {
                warn(
                    &mut warnings,
                    &s.id,
                    format!("form {} recorded more than once; the later entry wins", p.form),
                );
            }
            if p.form > s.form {
                warn(
                    &mut warnings,
                    &s.id,
                    format!(
                        "record for form {} is above the student's current form {}",
                        p.form, s.form
                    ),
                );
            }
        }

        if let Some(last) = s.performance.last() {
            if last.form != s.form {
                warn(
                    &mut warnings,
                    &s.id,
                    format!(
                        "average will use the form {} record, not current form {}",
                        last.form, s.form
                    ),
                );
            }
        }
    }

    Ok(warnings)
}

fn record(form: u8, math: u8, english: u8, science: u8, social: u8) -> PerformanceRecord {
    PerformanceRecord::new(
        Form(form),
        Scores {
            math: Score(math),
            english: Score(english),
            science: Score(science),
            social: Score(social),
        },
    )
}

/// The two sample students every fresh session starts with.
pub(crate) fn sample_roster() -> RosterStore {
    let students = vec![
        Student {
            id: "S001".into(),
            name: "John Doe".into(),
            gender: "Male".into(),
            age: Age(15),
            form: Form(1),
            performance: vec![record(1, 75, 80, 70, 85)],
        },
        Student {
            id: "S002".into(),
            name: "Jane Smith".into(),
            gender: "Female".into(),
            age: Age(16),
            form: Form(2),
            performance: vec![record(1, 85, 90, 88, 92), record(2, 78, 85, 82, 88)],
        },
    ];
    RosterStore::from_trusted(students)
}
