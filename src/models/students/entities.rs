use serde::{Deserialize, Serialize};

// Enrollment status
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum StudentStatus {
    Active,
    Graduated,
    Dropped,
}

impl std::fmt::Display for StudentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StudentStatus::Active => write!(f, "active"),
            StudentStatus::Graduated => write!(f, "graduated"),
            StudentStatus::Dropped => write!(f, "dropped"),
        }
    }
}

impl std::str::FromStr for StudentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(StudentStatus::Active),
            "graduated" => Ok(StudentStatus::Graduated),
            "dropped" => Ok(StudentStatus::Dropped),
            _ => Err(format!("Invalid student status: {s}")),
        }
    }
}

impl<'de> Deserialize<'de> for StudentStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(|_| {
            serde::de::Error::custom(format!(
                "Invalid student status: '{s}'. Supported: active, graduated, dropped"
            ))
        })
    }
}

// Student entity
//
// `is_locked` is the global result-visibility gate for this student; it is
// only ever read or written through the policy layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Student {
    pub id: i64,
    pub user_id: i64,
    pub enrollment_no: String,
    pub name: String,
    pub class_id: i64,
    pub batch_id: i64,
    pub skill_id: i64,
    pub status: StudentStatus,
    pub total_paid: f64,
    pub amount: Option<f64>,
    pub is_locked: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
