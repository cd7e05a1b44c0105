//! The student roster store.
//!
//! `RosterStore` is the sole owner of the student collection. Lookups are
//! linear scans; rosters are small and managed by hand.

use crate::error::RosterError;
use crate::model::{Age, Average, Form, NewStudent, PerformanceRecord, Scores, Student};

/// What a performance submission did to the student's records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// No record existed for the form; one was appended.
    Added,
    /// The existing record for the form was replaced in place.
    Updated,
}

/// Detail view of one student.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentDetail {
    pub id: String,
    pub name: String,
    pub age: Age,
    pub gender: String,
    pub form: Form,
    pub record_count: usize,
    pub average: Option<Average>,
}

impl From<&Student> for StudentDetail {
    fn from(student: &Student) -> Self {
        Self {
            id: student.id.clone(),
            name: student.name.clone(),
            age: student.age,
            gender: student.gender.clone(),
            form: student.form,
            record_count: student.performance.len(),
            average: student.average(),
        }
    }
}

/// In-memory collection of students, kept in registration order.
#[derive(Debug, Clone, Default)]
pub struct RosterStore {
    students: Vec<Student>,
}

impl RosterStore {
    /// Create an empty roster.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a roster pre-populated with two sample students.
    pub fn with_sample_data() -> Self {
        crate::seed::sample_roster()
    }

    /// Wrap students that are already known to satisfy every invariant.
    pub(crate) fn from_trusted(students: Vec<Student>) -> Self {
        Self { students }
    }

    pub fn len(&self) -> usize {
        self.students.len()
    }

    pub fn is_empty(&self) -> bool {
        self.students.is_empty()
    }

    /// Borrowing iterator over students in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Student> {
        self.students.iter()
    }

    /// Register a new student with an empty performance history.
    pub fn register_student(&mut self, new: NewStudent) -> Result<&Student, RosterError> {
        let student = Student::from_registration(new).map_err(|e| {
            tracing::debug!("registration rejected: {e}");
            RosterError::from(e)
        })?;

        if self.position(&student.id).is_some() {
            tracing::debug!("registration rejected: duplicate id {}", student.id);
            return Err(RosterError::DuplicateId(student.id));
        }

        tracing::info!(id = %student.id, name = %student.name, "registered student");
        self.students.push(student);
        let last = self.students.len() - 1;
        Ok(&self.students[last])
    }

    /// Remove a student, returning the removed record.
    ///
    /// Fails with `NotFound` when the id is absent; callers that want
    /// idempotent deletion can ignore that error.
    pub fn delete_student(&mut self, id: &str) -> Result<Student, RosterError> {
        match self.position(id) {
            Some(index) => {
                let removed = self.students.remove(index);
                tracing::info!(id, "deleted student");
                Ok(removed)
            }
            None => {
                tracing::debug!(id, "delete of unknown student");
                Err(RosterError::NotFound(id.to_string()))
            }
        }
    }

    pub fn find_student(&self, id: &str) -> Result<&Student, RosterError> {
        self.students
            .iter()
            .find(|s| s.id == id)
            .ok_or_else(|| RosterError::NotFound(id.to_string()))
    }

    /// Snapshot of every student in registration order.
    ///
    /// The returned list is owned, so later mutations of the store do not
    /// affect it.
    pub fn list_students(&self) -> Vec<Student> {
        self.students.clone()
    }

    pub fn student_detail(&self, id: &str) -> Result<StudentDetail, RosterError> {
        self.find_student(id).map(StudentDetail::from)
    }

    /// Snapshot of one student's performance records in entry order.
    pub fn performance_history(&self, id: &str) -> Result<Vec<PerformanceRecord>, RosterError> {
        self.find_student(id).map(|s| s.performance.clone())
    }

    /// Add or replace the performance record for `form`.
    ///
    /// `form` and the scores arrive as raw integers and are validated
    /// before anything is touched. A record for a form already present
    /// keeps its position in the history.
    pub fn submit_performance(
        &mut self,
        student_id: &str,
        form: i64,
        scores: [i64; 4],
    ) -> Result<SubmitOutcome, RosterError> {
        let index = self
            .position(student_id)
            .ok_or_else(|| RosterError::NotFound(student_id.to_string()))?;

        let form = Form::new(form)?;
        let [math, english, science, social] = scores;
        let scores = Scores::new(math, english, science, social)?;

        Ok(self.put_record(index, PerformanceRecord::new(form, scores)))
    }

    /// Average of the student's most recently added record.
    pub fn compute_average(&self, id: &str) -> Result<Option<Average>, RosterError> {
        self.find_student(id).map(Student::average)
    }

    fn put_record(&mut self, index: usize, record: PerformanceRecord) -> SubmitOutcome {
        let student = &mut self.students[index];
        let outcome = match student.performance.iter_mut().find(|r| r.form == record.form) {
            Some(existing) => {
                *existing = record;
                SubmitOutcome::Updated
            }
            None => {
                student.performance.push(record);
                SubmitOutcome::Added
            }
        };
        tracing::info!(
            id = %student.id,
            form = record.form.get(),
            ?outcome,
            "recorded performance"
        );
        outcome
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.students.iter().position(|s| s.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;

    fn new_student(id: &str, name: &str, age: i64, form: i64) -> NewStudent {
        NewStudent {
            id: id.into(),
            name: name.into(),
            gender: "Female".into(),
            age,
            form,
        }
    }

    fn amy() -> NewStudent {
        new_student("S010", "Amy Lee", 14, 1)
    }

    #[test]
    fn register_keeps_call_order() {
        let mut store = RosterStore::new();
        for (i, name) in ["Ann", "Ben", "Cal"].iter().enumerate() {
            store
                .register_student(new_student(&format!("S{i}"), name, 12, 2))
                .unwrap();
        }
        let ids: Vec<_> = store.list_students().iter().map(|s| s.id().to_string()).collect();
        assert_eq!(ids, vec!["S0", "S1", "S2"]);
    }

    #[test]
    fn register_returns_created_student() {
        let mut store = RosterStore::new();
        let student = store.register_student(amy()).unwrap();
        assert_eq!(student.id(), "S010");
        assert_eq!(student.name(), "Amy Lee");
        assert!(student.performance().is_empty());
    }

    #[test]
    fn duplicate_id_leaves_roster_unchanged() {
        let mut store = RosterStore::new();
        store.register_student(amy()).unwrap();
        let before = store.list_students();

        let err = store
            .register_student(new_student("S010", "Someone Else", 16, 3))
            .unwrap_err();
        assert_eq!(err, RosterError::DuplicateId("S010".into()));
        assert_eq!(store.list_students(), before);
    }

    #[test]
    fn age_boundaries() {
        let mut store = RosterStore::new();
        assert!(store.register_student(new_student("A", "a", 10, 1)).is_ok());
        assert!(store.register_student(new_student("B", "b", 20, 1)).is_ok());

        let err = store.register_student(new_student("C", "c", 9, 1)).unwrap_err();
        assert!(matches!(
            err,
            RosterError::Validation(ValidationError::OutOfRange { field: "age", .. })
        ));
        assert!(store.register_student(new_student("D", "d", 21, 1)).is_err());
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn form_out_of_range_rejected() {
        let mut store = RosterStore::new();
        assert!(store.register_student(new_student("A", "a", 12, 0)).is_err());
        assert!(store.register_student(new_student("A", "a", 12, 5)).is_err());
        assert!(store.is_empty());
    }

    #[test]
    fn delete_then_find_is_not_found() {
        let mut store = RosterStore::new();
        store.register_student(amy()).unwrap();

        let removed = store.delete_student("S010").unwrap();
        assert_eq!(removed.name(), "Amy Lee");
        assert_eq!(
            store.find_student("S010").unwrap_err(),
            RosterError::NotFound("S010".into())
        );
        // second delete reports absence without touching anything
        assert!(matches!(
            store.delete_student("S010"),
            Err(RosterError::NotFound(_))
        ));
    }

    #[test]
    fn list_is_a_snapshot() {
        let mut store = RosterStore::new();
        store.register_student(amy()).unwrap();
        let snapshot = store.list_students();

        store.submit_performance("S010", 1, [50, 50, 50, 50]).unwrap();
        store.delete_student("S010").unwrap();

        assert_eq!(snapshot.len(), 1);
        assert!(snapshot[0].performance().is_empty());
    }

    #[test]
    fn submit_new_form_appends() {
        let mut store = RosterStore::new();
        store.register_student(amy()).unwrap();

        assert_eq!(
            store.submit_performance("S010", 2, [60, 60, 60, 60]).unwrap(),
            SubmitOutcome::Added
        );
        assert_eq!(
            store.submit_performance("S010", 1, [70, 70, 70, 70]).unwrap(),
            SubmitOutcome::Added
        );
        let history = store.performance_history("S010").unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].form.get(), 2);
        assert_eq!(history[1].form.get(), 1);
    }

    #[test]
    fn submit_existing_form_replaces_in_place() {
        let mut store = RosterStore::new();
        store.register_student(amy()).unwrap();
        store.submit_performance("S010", 1, [10, 10, 10, 10]).unwrap();
        store.submit_performance("S010", 2, [20, 20, 20, 20]).unwrap();

        let outcome = store.submit_performance("S010", 1, [90, 90, 90, 90]).unwrap();
        assert_eq!(outcome, SubmitOutcome::Updated);

        let history = store.performance_history("S010").unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].form.get(), 1);
        assert_eq!(history[0].scores.math.get(), 90);
        assert_eq!(history[1].scores.math.get(), 20);
    }

    #[test]
    fn submit_is_idempotent() {
        let mut store = RosterStore::new();
        store.register_student(amy()).unwrap();
        store.submit_performance("S010", 3, [1, 2, 3, 4]).unwrap();
        let once = store.list_students();
        store.submit_performance("S010", 3, [1, 2, 3, 4]).unwrap();
        assert_eq!(store.list_students(), once);
    }

    #[test]
    fn submit_rejects_bad_input_without_mutation() {
        let mut store = RosterStore::new();
        store.register_student(amy()).unwrap();

        assert!(matches!(
            store.submit_performance("S999", 1, [50, 50, 50, 50]),
            Err(RosterError::NotFound(_))
        ));
        assert!(store.submit_performance("S010", 5, [50, 50, 50, 50]).is_err());
        assert!(store.submit_performance("S010", 1, [50, -1, 50, 50]).is_err());
        assert!(store.submit_performance("S010", 1, [50, 50, 101, 50]).is_err());
        assert!(store.performance_history("S010").unwrap().is_empty());

        assert!(store.submit_performance("S010", 1, [0, 100, 0, 100]).is_ok());
    }

    #[test]
    fn average_uses_last_added_record() {
        let mut store = RosterStore::new();
        store.register_student(amy()).unwrap();
        assert_eq!(store.compute_average("S010").unwrap(), None);

        store.submit_performance("S010", 2, [80, 80, 80, 80]).unwrap();
        store.submit_performance("S010", 1, [40, 40, 40, 40]).unwrap();
        // the Form 1 record was entered last, so it wins over Form 2
        assert_eq!(
            store.compute_average("S010").unwrap().unwrap().to_string(),
            "40.00"
        );
    }

    #[test]
    fn end_to_end_amy_lee() {
        let mut store = RosterStore::new();
        store.register_student(amy()).unwrap();

        store.submit_performance("S010", 1, [60, 70, 80, 90]).unwrap();
        let avg = store.compute_average("S010").unwrap().unwrap();
        assert_eq!(avg.to_string(), "75.00");

        store.submit_performance("S010", 1, [100, 100, 100, 100]).unwrap();
        assert_eq!(store.performance_history("S010").unwrap().len(), 1);
        let avg = store.compute_average("S010").unwrap().unwrap();
        assert_eq!(avg.to_string(), "100.00");
    }

    #[test]
    fn detail_view_counts_records() {
        let store = RosterStore::with_sample_data();
        let detail = store.student_detail("S002").unwrap();
        assert_eq!(detail.name, "Jane Smith");
        assert_eq!(detail.record_count, 2);
        assert_eq!(detail.form.get(), 2);
        assert!(store.student_detail("nobody").is_err());
    }
}
