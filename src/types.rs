use serde::{Deserialize, Serialize};

// Rows of the relational store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Student {
    pub sid: String,
    pub name: String,
    pub gpa: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Module {
    pub mid: String,
    pub name: String,
    pub credits: i64,
    pub dept: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Department {
    pub did: String,
    pub name: String,
}

/// A lecturer document. The key is stored as `_id` to match the MongoDB collection layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lecturer {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub dept: String,
}

// Raw form submissions. Every field stays a string so invalid input can be echoed back.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StudentForm {
    #[serde(default)]
    pub sid: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub gpa: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ModuleForm {
    #[serde(default)]
    pub mid: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub credits: String,
    #[serde(default)]
    pub dept: String,
}

impl From<&Module> for ModuleForm {
    fn from(m: &Module) -> Self {
        Self { mid: m.mid.clone(), name: m.name.clone(), credits: m.credits.to_string(), dept: m.dept.clone() }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LecturerForm {
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub dept: String,
}

impl From<&LecturerForm> for Lecturer {
    fn from(f: &LecturerForm) -> Self {
        Self { id: f.id.clone(), name: f.name.clone(), dept: f.dept.clone() }
    }
}

/// A single message shown above a form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    /// Form field the message belongs to; empty for errors raised by a datastore.
    pub field: String,
    pub msg: String,
}

impl FieldError {
    pub fn new(field: &str, msg: impl Into<String>) -> Self {
        Self { field: field.to_string(), msg: msg.into() }
    }

    /// An error that is not tied to one field (duplicate key, missing department, ...).
    pub fn general(msg: impl Into<String>) -> Self {
        Self { field: String::new(), msg: msg.into() }
    }
}
