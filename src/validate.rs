//! Client-side field validation, run before any request is dispatched.

use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

/// A validation error for a single field
#[derive(Debug, Clone)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    fn new(field: &str, message: &str) -> Self {
        Self {
            field: field.to_string(),
            message: message.to_string(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]: {}", self.field, self.message)
    }
}

/// One or more fields failed validation; nothing was sent to the backend.
#[derive(Debug, Clone)]
pub struct ValidationFailed {
    pub errors: Vec<FieldError>,
}

impl fmt::Display for ValidationFailed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self
            .errors
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ");
        f.write_str(&joined)
    }
}

impl std::error::Error for ValidationFailed {}

fn finish(errors: Vec<FieldError>) -> Result<(), ValidationFailed> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(ValidationFailed { errors })
    }
}

pub fn login(identifier: &str, password: &str) -> Result<(), ValidationFailed> {
    let mut errors = Vec::new();
    if identifier.trim().is_empty() {
        errors.push(FieldError::new("identifier", "Email or Username is required"));
    }
    if password.chars().count() < 6 {
        errors.push(FieldError::new(
            "password",
            "Password must be at least 6 characters",
        ));
    }
    finish(errors)
}

pub fn register(
    name: &str,
    username: &str,
    email: &str,
    password: &str,
) -> Result<(), ValidationFailed> {
    let mut errors = Vec::new();
    if name.chars().count() < 2 {
        errors.push(FieldError::new("name", "Name must be at least 2 characters"));
    }
    if username.chars().count() < 3 {
        errors.push(FieldError::new(
            "username",
            "Username must be at least 3 characters",
        ));
    }
    if !EMAIL_RE.is_match(email) {
        errors.push(FieldError::new("email", "Invalid email address"));
    }
    if password.chars().count() < 6 {
        errors.push(FieldError::new(
            "password",
            "Password must be at least 6 characters",
        ));
    }
    finish(errors)
}

/// Validates whichever course fields are present; `None` fields are left to
/// the backend's own defaults (update calls send partial bodies).
pub fn course(
    nama: Option<&str>,
    deskripsi: Option<&str>,
    sks: Option<u8>,
) -> Result<(), ValidationFailed> {
    let mut errors = Vec::new();
    if let Some(nama) = nama {
        if nama.chars().count() < 3 {
            errors.push(FieldError::new(
                "nama",
                "Course name must be at least 3 characters",
            ));
        } else if nama.chars().count() > 100 {
            errors.push(FieldError::new("nama", "Course name too long"));
        }
    }
    if let Some(deskripsi) = deskripsi {
        if deskripsi.chars().count() > 500 {
            errors.push(FieldError::new("deskripsi", "Description too long"));
        }
    }
    if let Some(sks) = sks {
        if sks < 1 {
            errors.push(FieldError::new("sks", "SKS must be at least 1"));
        } else if sks > 6 {
            errors.push(FieldError::new("sks", "SKS cannot exceed 6"));
        }
    }
    finish(errors)
}

pub fn task(
    nama: Option<&str>,
    mata_kuliah_id: Option<&str>,
    deskripsi: Option<&str>,
) -> Result<(), ValidationFailed> {
    let mut errors = Vec::new();
    if let Some(nama) = nama {
        if nama.chars().count() < 3 {
            errors.push(FieldError::new(
                "nama",
                "Task name must be at least 3 characters",
            ));
        } else if nama.chars().count() > 200 {
            errors.push(FieldError::new("nama", "Task name too long"));
        }
    }
    if let Some(id) = mata_kuliah_id {
        if id.trim().is_empty() {
            errors.push(FieldError::new("mataKuliahId", "Please select a course"));
        }
    }
    if let Some(deskripsi) = deskripsi {
        if deskripsi.chars().count() > 1000 {
            errors.push(FieldError::new("deskripsi", "Description too long"));
        }
    }
    finish(errors)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_rules() {
        assert!(login("ann@example.com", "secret123").is_ok());
        assert!(login("ann", "secret123").is_ok());

        let err = login("", "secret123").unwrap_err();
        assert_eq!(err.errors[0].message, "Email or Username is required");

        let err = login("ann", "short").unwrap_err();
        assert_eq!(err.errors[0].message, "Password must be at least 6 characters");
    }

    #[test]
    fn test_register_rules() {
        assert!(register("Ann Lee", "annlee", "ann@example.com", "secret123").is_ok());

        let err = register("A", "an", "not-an-email", "12345").unwrap_err();
        let fields: Vec<&str> = err.errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, ["name", "username", "email", "password"]);
    }

    #[test]
    fn test_course_rules() {
        assert!(course(Some("Applied Statistics"), None, Some(3)).is_ok());
        assert!(course(Some("AB"), None, None).is_err());
        assert!(course(Some(&"x".repeat(101)), None, None).is_err());
        assert!(course(None, Some(&"x".repeat(501)), None).is_err());

        let err = course(None, None, Some(0)).unwrap_err();
        assert_eq!(err.errors[0].message, "SKS must be at least 1");
        let err = course(None, None, Some(7)).unwrap_err();
        assert_eq!(err.errors[0].message, "SKS cannot exceed 6");
        assert!(course(None, None, Some(1)).is_ok());
        assert!(course(None, None, Some(6)).is_ok());
    }

    #[test]
    fn test_task_rules() {
        assert!(task(Some("Lab report 2"), Some("c1"), None).is_ok());
        assert!(task(Some("ab"), None, None).is_err());
        assert!(task(Some(&"x".repeat(201)), None, None).is_err());
        assert!(task(None, None, Some(&"x".repeat(1001))).is_err());

        let err = task(None, Some(""), None).unwrap_err();
        assert_eq!(err.errors[0].message, "Please select a course");
    }

    #[test]
    fn test_validation_never_touches_partial_none() {
        // A patch with no fields set has nothing to reject.
        assert!(course(None, None, None).is_ok());
        assert!(task(None, None, None).is_ok());
    }

    #[test]
    fn test_field_error_display() {
        let err = FieldError::new("sks", "SKS cannot exceed 6");
        assert_eq!(err.to_string(), "[sks]: SKS cannot exceed 6");
    }
}
