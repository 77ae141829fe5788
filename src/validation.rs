//! Field-level validation rules for the HTML forms.
//!
//! Every rule that fails contributes one [`FieldError`]; the list keeps the order of the
//! fields on the form so the page shows messages top to bottom.

use crate::types::{FieldError, LecturerForm, ModuleForm, Student, StudentForm};

/// Credit values a module may carry, as submitted by the form.
pub const ALLOWED_CREDITS: [&str; 3] = ["5", "10", "15"];

pub const GPA_MIN: f64 = 0.0;
pub const GPA_MAX: f64 = 4.0;

fn min_len(value: &str, min: usize) -> bool {
    value.chars().count() >= min
}

/// Parses a GPA and checks its range. NaN and infinities fail the range check.
pub fn parse_gpa(value: &str) -> Option<f64> {
    let gpa = value.parse::<f64>().ok()?;
    (GPA_MIN..=GPA_MAX).contains(&gpa).then_some(gpa)
}

pub fn parse_credits(value: &str) -> Option<i64> {
    if ALLOWED_CREDITS.contains(&value) {
        value.parse().ok()
    } else {
        None
    }
}

pub fn validate_student(form: &StudentForm) -> Vec<FieldError> {
    let mut errors = Vec::new();
    if !min_len(&form.sid, 4) {
        errors.push(FieldError::new("sid", "Student ID must be 4 characters"));
    }
    if !min_len(&form.name, 5) {
        errors.push(FieldError::new("name", "Name must be at least 5 characters"));
    }
    if parse_gpa(&form.gpa).is_none() {
        errors.push(FieldError::new("gpa", "GPA must be between 0.0 & 4.0"));
    }
    errors
}

/// Validates the form and builds the row to insert.
pub fn parse_student(form: &StudentForm) -> Result<Student, Vec<FieldError>> {
    let errors = validate_student(form);
    match parse_gpa(&form.gpa) {
        Some(gpa) if errors.is_empty() => Ok(Student { sid: form.sid.clone(), name: form.name.clone(), gpa }),
        _ => Err(errors),
    }
}

pub fn validate_module(form: &ModuleForm) -> Vec<FieldError> {
    let mut errors = Vec::new();
    if !min_len(&form.name, 5) {
        errors.push(FieldError::new("name", "Module Name must be at least 5 characters"));
    }
    if parse_credits(&form.credits).is_none() {
        errors.push(FieldError::new("credits", "Credits can be either 5, 10, 15"));
    }
    errors
}

/// Validates the form and returns the new `(name, credits)` pair.
pub fn parse_module_update(form: &ModuleForm) -> Result<(String, i64), Vec<FieldError>> {
    let errors = validate_module(form);
    match parse_credits(&form.credits) {
        Some(credits) if errors.is_empty() => Ok((form.name.clone(), credits)),
        _ => Err(errors),
    }
}

pub fn validate_lecturer(form: &LecturerForm) -> Vec<FieldError> {
    let mut errors = Vec::new();
    if !min_len(&form.id, 4) {
        errors.push(FieldError::new("_id", "Lecturer ID must be 4 characters"));
    }
    if !min_len(&form.name, 5) {
        errors.push(FieldError::new("name", "Name must be at least 5 characters"));
    }
    if !min_len(&form.dept, 3) {
        errors.push(FieldError::new("dept", "Dept must be 3 characters"));
    }
    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    fn student(sid: &str, name: &str, gpa: &str) -> StudentForm {
        StudentForm { sid: sid.into(), name: name.into(), gpa: gpa.into() }
    }

    #[test]
    fn test_valid_student_has_no_errors() {
        assert!(validate_student(&student("G001", "Sean Smith", "3.2")).is_empty());
        assert!(validate_student(&student("G001", "Sean Smith", "0")).is_empty());
        assert!(validate_student(&student("G001", "Sean Smith", "4.0")).is_empty());
    }

    #[test]
    fn test_student_errors_follow_form_order() {
        let errors = validate_student(&student("G1", "Tom", "abc"));
        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["sid", "name", "gpa"]);
        assert_eq!(errors[0].msg, "Student ID must be 4 characters");
    }

    #[test]
    fn test_gpa_bounds() {
        assert_eq!(parse_gpa("4.01"), None);
        assert_eq!(parse_gpa("-0.1"), None);
        assert_eq!(parse_gpa("NaN"), None);
        assert_eq!(parse_gpa("inf"), None);
        assert_eq!(parse_gpa(""), None);
        assert_eq!(parse_gpa("2.5"), Some(2.5));
    }

    #[test]
    fn test_lengths_count_characters_not_bytes() {
        // 4 characters, 8 bytes
        assert!(validate_student(&student("ÉÉÉÉ", "Siobhán", "1.0")).is_empty());
        assert_eq!(validate_student(&student("ÉÉÉ", "Siobhán", "1.0")).len(), 1);
    }

    #[test]
    fn test_module_credits() {
        let mut form = ModuleForm { mid: "M100".into(), name: "Databases".into(), credits: "10".into(), dept: "CS".into() };
        assert!(validate_module(&form).is_empty());

        form.credits = "7".into();
        let errors = validate_module(&form);
        assert_eq!(errors, vec![FieldError::new("credits", "Credits can be either 5, 10, 15")]);

        form.credits = " 5".into();
        assert_eq!(validate_module(&form).len(), 1);
        assert_eq!(parse_credits("15"), Some(15));
    }

    #[test]
    fn test_parse_student_builds_row() {
        let row = parse_student(&student("G010", "Niamh Walsh", "3.75")).unwrap();
        assert_eq!(row, Student { sid: "G010".into(), name: "Niamh Walsh".into(), gpa: 3.75 });

        let errors = parse_student(&student("G010", "Niamh Walsh", "5")).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "gpa");
    }

    #[test]
    fn test_lecturer_rules() {
        let form = LecturerForm { id: "L1".into(), name: "Ann".into(), dept: "CS".into() };
        let errors = validate_lecturer(&form);
        assert_eq!(errors.len(), 3);
        assert_eq!(errors[0].field, "_id");

        let form = LecturerForm { id: "L001".into(), name: "Mary Ryan".into(), dept: "SFT".into() };
        assert!(validate_lecturer(&form).is_empty());
    }
}
