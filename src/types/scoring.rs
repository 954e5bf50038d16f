use serde::Serialize;
use std::fmt;

/// Signed point contribution per category. Penalty entries stay `None` when
/// their check did not run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScoreBreakdown {
    pub base_score: i32,
    pub structure: i32,
    pub history: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commit_quality: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub security: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language_specific: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code_quality: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coverage: Option<i32>,
    pub final_score: i32,
}

impl ScoreBreakdown {
    /// Populated entries in display order, keyed by category name.
    pub fn entries(&self) -> Vec<(&'static str, i32)> {
        let mut entries = vec![
            ("base_score", self.base_score),
            ("structure", self.structure),
            ("history", self.history),
        ];
        let penalties = [
            ("commit_quality", self.commit_quality),
            ("security", self.security),
            ("language_specific", self.language_specific),
            ("code_quality", self.code_quality),
            ("coverage", self.coverage),
        ];
        entries.extend(
            penalties
                .into_iter()
                .filter_map(|(name, value)| value.map(|value| (name, value))),
        );
        entries.push(("final_score", self.final_score));
        entries
    }

    pub fn total_penalty(&self) -> i32 {
        [
            self.commit_quality,
            self.security,
            self.language_specific,
            self.code_quality,
            self.coverage,
        ]
        .into_iter()
        .flatten()
        .sum()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum HealthCategory {
    Excellent,
    Good,
    Fair,
    Poor,
    Critical,
}

impl HealthCategory {
    pub fn from_score(score: u8) -> Self {
        match score {
            90.. => Self::Excellent,
            70..=89 => Self::Good,
            50..=69 => Self::Fair,
            30..=49 => Self::Poor,
            _ => Self::Critical,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Excellent => "Excellent",
            Self::Good => "Good",
            Self::Fair => "Fair",
            Self::Poor => "Poor",
            Self::Critical => "Critical",
        }
    }
}

impl fmt::Display for HealthCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
