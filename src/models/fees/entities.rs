use serde::{Deserialize, Serialize};

// Fee status; a Pending fee gates the student out of bulk mark entry
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FeeStatus {
    Paid,
    Pending,
}

impl std::fmt::Display for FeeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FeeStatus::Paid => write!(f, "paid"),
            FeeStatus::Pending => write!(f, "pending"),
        }
    }
}

impl std::str::FromStr for FeeStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "paid" => Ok(FeeStatus::Paid),
            "pending" => Ok(FeeStatus::Pending),
            _ => Err(format!("Invalid fee status: {s}")),
        }
    }
}

impl<'de> Deserialize<'de> for FeeStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(|_| {
            serde::de::Error::custom(format!(
                "Invalid fee status: '{s}'. Supported: paid, pending"
            ))
        })
    }
}

// Monthly fee entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Fee {
    pub id: i64,
    pub student_id: i64,
    pub amount: f64,
    pub month: i32,
    pub year: i32,
    pub status: FeeStatus,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
