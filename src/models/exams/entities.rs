use serde::{Deserialize, Serialize};

// Exam type
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum ExamType {
    MonthlyExam,
    FinalExam,
    Test,
    Midterm,
}

impl std::fmt::Display for ExamType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExamType::MonthlyExam => write!(f, "monthly_exam"),
            ExamType::FinalExam => write!(f, "final_exam"),
            ExamType::Test => write!(f, "test"),
            ExamType::Midterm => write!(f, "midterm"),
        }
    }
}

impl std::str::FromStr for ExamType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "monthly_exam" => Ok(ExamType::MonthlyExam),
            "final_exam" => Ok(ExamType::FinalExam),
            "test" => Ok(ExamType::Test),
            "midterm" => Ok(ExamType::Midterm),
            _ => Err(format!("Invalid exam type: {s}")),
        }
    }
}

impl<'de> Deserialize<'de> for ExamType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(|_| {
            serde::de::Error::custom(format!(
                "Invalid exam type: '{s}'. Supported: monthly_exam, final_exam, test, midterm"
            ))
        })
    }
}

// Exam status; gates result mutation
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ExamStatus {
    Open,
    Closed,
}

impl std::fmt::Display for ExamStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExamStatus::Open => write!(f, "open"),
            ExamStatus::Closed => write!(f, "closed"),
        }
    }
}

impl std::str::FromStr for ExamStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "open" => Ok(ExamStatus::Open),
            "closed" => Ok(ExamStatus::Closed),
            _ => Err(format!("Invalid exam status: {s}")),
        }
    }
}

impl<'de> Deserialize<'de> for ExamStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(|_| {
            serde::de::Error::custom(format!(
                "Invalid exam status: '{s}'. Supported: open, closed"
            ))
        })
    }
}

impl ExamStatus {
    pub fn toggled(self) -> Self {
        match self {
            ExamStatus::Open => ExamStatus::Closed,
            ExamStatus::Closed => ExamStatus::Open,
        }
    }
}

// Exam entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Exam {
    pub id: i64,
    pub skill_id: i64,
    pub class_id: i64,
    pub subject_id: i64,
    pub date: chrono::NaiveDate,
    pub exam_type: ExamType,
    pub status: ExamStatus,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// Exam as listed to callers, with the subject name joined in so clients and
/// the orphan-subject guard do not need a second lookup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExamWithSubject {
    #[serde(flatten)]
    pub exam: Exam,
    pub subject_name: Option<String>,
}
