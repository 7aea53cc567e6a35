use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Task status as the backend knows it. The wire form is
/// `PENDING`/`IN_PROGRESS`/`COMPLETED`; the display form shown in lists and
/// on the board is `Not Started`/`In Progress`/`Completed`. Both translations
/// are exhaustive matches over this enum, so adding a status without updating
/// them is a compile error, and serde, `Display`, and `FromStr` all route
/// through the same four functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskStatus {
    Pending,
    InProgress,
    Completed,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown task status: {0:?}")]
pub struct UnknownStatus(pub String);

impl TaskStatus {
    /// Board column order.
    pub const ALL: [TaskStatus; 3] = [Self::Pending, Self::InProgress, Self::Completed];

    /// Backend wire form.
    pub fn as_wire(self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::InProgress => "IN_PROGRESS",
            Self::Completed => "COMPLETED",
        }
    }

    /// Display label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Pending => "Not Started",
            Self::InProgress => "In Progress",
            Self::Completed => "Completed",
        }
    }

    pub fn from_wire(value: &str) -> Result<Self, UnknownStatus> {
        match value {
            "PENDING" => Ok(Self::Pending),
            "IN_PROGRESS" => Ok(Self::InProgress),
            "COMPLETED" => Ok(Self::Completed),
            other => Err(UnknownStatus(other.to_string())),
        }
    }

    pub fn from_label(label: &str) -> Result<Self, UnknownStatus> {
        match label {
            "Not Started" => Ok(Self::Pending),
            "In Progress" => Ok(Self::InProgress),
            "Completed" => Ok(Self::Completed),
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for TaskStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_wire())
    }
}

impl<'de> Deserialize<'de> for TaskStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        Self::from_wire(&value).map_err(serde::de::Error::custom)
    }
}

/// Lenient parse for command-line input: accepts the wire form, the display
/// label, or any casing of either, with `-`/`_` treated as spaces.
impl std::str::FromStr for TaskStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Ok(status) = Self::from_wire(s).or_else(|_| Self::from_label(s)) {
            return Ok(status);
        }
        let normalized = s.trim().replace(['-', '_'], " ").to_lowercase();
        match normalized.as_str() {
            "pending" | "not started" => Ok(Self::Pending),
            "in progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            _ => Err(UnknownStatus(s.to_string())),
        }
    }
}

/// A task ("tugas"), as returned by the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tugas {
    pub id: String,
    pub nama: String,
    #[serde(default)]
    pub deskripsi: String,
    pub status: TaskStatus,
    pub deadline: NaiveDate,
    pub mata_kuliah_id: String,
    pub user_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Embedded course summary, present on list/get responses.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mata_kuliah: Option<MataKuliahRef>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MataKuliahRef {
    pub id: String,
    pub nama: String,
    pub sks: u8,
}

/// A course ("mata kuliah").
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MataKuliah {
    pub id: String,
    pub nama: String,
    #[serde(default)]
    pub deskripsi: String,
    pub sks: u8,
    pub user_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Task-count aggregate, present on list responses.
    #[serde(default, rename = "_count", skip_serializing_if = "Option::is_none")]
    pub count: Option<TugasCount>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TugasCount {
    pub tugas: u32,
}

/// Server-issued identity snapshot, cached beside the token for display only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: User,
}

/// Body for `POST /auth/login`. The backend accepts either an email or a
/// username credential; an identifier containing `@` is sent as an email.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum LoginRequest {
    Email { email: String, password: String },
    Username { username: String, password: String },
}

impl LoginRequest {
    pub fn from_identifier(identifier: &str, password: &str) -> Self {
        if identifier.contains('@') {
            Self::Email {
                email: identifier.to_string(),
                password: password.to_string(),
            }
        } else {
            Self::Username {
                username: identifier.to_string(),
                password: password.to_string(),
            }
        }
    }
}

/// Body for `POST /auth/register`.
#[derive(Debug, Serialize)]
pub struct RegisterRequest {
    pub name: String,
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Partial task representation for create and update calls; unset fields are
/// omitted from the body.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TugasPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nama: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deskripsi: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deadline: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mata_kuliah_id: Option<String>,
}

/// Partial course representation for create and update calls.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MataKuliahPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nama: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deskripsi: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sks: Option<u8>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trip_wire() {
        for status in TaskStatus::ALL {
            assert_eq!(TaskStatus::from_wire(status.as_wire()).unwrap(), status);
        }
    }

    #[test]
    fn test_status_round_trip_label() {
        for status in TaskStatus::ALL {
            assert_eq!(TaskStatus::from_label(status.label()).unwrap(), status);
        }
    }

    #[test]
    fn test_status_labels() {
        assert_eq!(TaskStatus::Pending.label(), "Not Started");
        assert_eq!(TaskStatus::InProgress.label(), "In Progress");
        assert_eq!(TaskStatus::Completed.label(), "Completed");
    }

    #[test]
    fn test_status_unknown_values_are_errors() {
        assert!(TaskStatus::from_wire("DONE").is_err());
        assert!(TaskStatus::from_label("Done").is_err());
        // Strict parsers do not accept the other side's vocabulary.
        assert!(TaskStatus::from_wire("Not Started").is_err());
        assert!(TaskStatus::from_label("PENDING").is_err());
    }

    #[test]
    fn test_status_cli_parse() {
        assert_eq!("pending".parse::<TaskStatus>().unwrap(), TaskStatus::Pending);
        assert_eq!(
            "not-started".parse::<TaskStatus>().unwrap(),
            TaskStatus::Pending
        );
        assert_eq!(
            "IN_PROGRESS".parse::<TaskStatus>().unwrap(),
            TaskStatus::InProgress
        );
        assert_eq!(
            "Completed".parse::<TaskStatus>().unwrap(),
            TaskStatus::Completed
        );
        assert!("doing".parse::<TaskStatus>().is_err());
    }

    #[test]
    fn test_status_serde_wire_form() {
        assert_eq!(
            serde_json::to_string(&TaskStatus::InProgress).unwrap(),
            "\"IN_PROGRESS\""
        );
        let status: TaskStatus = serde_json::from_str("\"PENDING\"").unwrap();
        assert_eq!(status, TaskStatus::Pending);
    }

    #[test]
    fn test_tugas_deserialization() {
        let json = serde_json::json!({
            "id": "t1",
            "nama": "Lab report 2",
            "deskripsi": "",
            "status": "COMPLETED",
            "deadline": "2024-03-05",
            "mataKuliahId": "c1",
            "userId": "u1",
            "createdAt": "2024-03-01T08:00:00Z",
            "updatedAt": "2024-03-05T10:30:00Z",
            "mataKuliah": { "id": "c1", "nama": "Applied Statistics", "sks": 3 }
        });
        let task: Tugas = serde_json::from_value(json).unwrap();
        assert_eq!(task.status, TaskStatus::Completed);
        assert_eq!(task.deadline.to_string(), "2024-03-05");
        assert_eq!(task.mata_kuliah.unwrap().nama, "Applied Statistics");
    }

    #[test]
    fn test_mata_kuliah_count_aggregate() {
        let json = serde_json::json!({
            "id": "c1",
            "nama": "Intro to Algorithms",
            "deskripsi": "Core CS course",
            "sks": 3,
            "userId": "u1",
            "createdAt": "2024-02-01T08:00:00Z",
            "updatedAt": "2024-02-01T08:00:00Z",
            "_count": { "tugas": 4 }
        });
        let course: MataKuliah = serde_json::from_value(json).unwrap();
        assert_eq!(course.count.unwrap().tugas, 4);
    }

    #[test]
    fn test_login_request_identifier_classification() {
        let by_email = LoginRequest::from_identifier("ann@example.com", "secret123");
        let body = serde_json::to_value(&by_email).unwrap();
        assert_eq!(body["email"], "ann@example.com");
        assert!(body.get("username").is_none());

        let by_username = LoginRequest::from_identifier("ann", "secret123");
        let body = serde_json::to_value(&by_username).unwrap();
        assert_eq!(body["username"], "ann");
        assert!(body.get("email").is_none());
    }

    #[test]
    fn test_payload_omits_unset_fields() {
        let patch = TugasPayload {
            status: Some(TaskStatus::InProgress),
            ..Default::default()
        };
        let body = serde_json::to_value(&patch).unwrap();
        assert_eq!(body, serde_json::json!({ "status": "IN_PROGRESS" }));
    }
}
