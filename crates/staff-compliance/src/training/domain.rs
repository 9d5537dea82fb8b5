use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskTier {
    High,
    Medium,
    Low,
}

impl RiskTier {
    pub const fn ordered() -> [Self; 3] {
        [Self::High, Self::Medium, Self::Low]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }

    /// Position used when ranking gaps; high risk sorts first.
    pub const fn priority(self) -> u8 {
        match self {
            Self::High => 0,
            Self::Medium => 1,
            Self::Low => 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrainingCategory {
    FireSafety,
    ClinicalSkills,
    InfectionControl,
    Ppe,
    HealthAndSafety,
    WasteManagement,
    Governance,
    Other,
}

impl TrainingCategory {
    pub const fn label(self) -> &'static str {
        match self {
            Self::FireSafety => "Fire Safety",
            Self::ClinicalSkills => "Clinical Skills",
            Self::InfectionControl => "Infection Control",
            Self::Ppe => "PPE",
            Self::HealthAndSafety => "Health & Safety",
            Self::WasteManagement => "Waste Mgmt",
            Self::Governance => "Governance",
            Self::Other => "Other",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComplianceStatus {
    Missing,
    Overdue,
    DueSoon,
    Compliant,
}

impl ComplianceStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Missing => "Missing",
            Self::Overdue => "Overdue",
            Self::DueSoon => "Due Soon",
            Self::Compliant => "Compliant",
        }
    }

    /// Due-soon and overdue modules have a deadline someone must act on.
    pub const fn is_at_risk(self) -> bool {
        matches!(self, Self::Overdue | Self::DueSoon)
    }

    pub const fn is_gap(self) -> bool {
        !matches!(self, Self::Compliant)
    }
}

/// Restricts the gap list to a single risk tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RiskFilter {
    #[default]
    All,
    Tier(RiskTier),
}

impl RiskFilter {
    pub fn admits(self, tier: RiskTier) -> bool {
        match self {
            Self::All => true,
            Self::Tier(expected) => expected == tier,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownRiskFilter(pub String);

impl fmt::Display for UnknownRiskFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown risk filter '{}' (expected all, high, medium or low)",
            self.0
        )
    }
}

impl std::error::Error for UnknownRiskFilter {}

impl FromStr for RiskFilter {
    type Err = UnknownRiskFilter;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "" | "all" => Ok(Self::All),
            "high" => Ok(Self::Tier(RiskTier::High)),
            "medium" => Ok(Self::Tier(RiskTier::Medium)),
            "low" => Ok(Self::Tier(RiskTier::Low)),
            _ => Err(UnknownRiskFilter(value.to_string())),
        }
    }
}

/// One staff member as supplied by the record store.
///
/// `completions` maps a module key to the raw completion value exactly as the
/// store holds it; absent keys and blank strings both mean "never completed".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonRecord {
    pub full_name: String,
    #[serde(default)]
    pub department: String,
    #[serde(default)]
    pub job_title: String,
    #[serde(default)]
    pub is_clinical: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employee_id: Option<String>,
    #[serde(default)]
    pub completions: BTreeMap<String, String>,
}

impl PersonRecord {
    pub fn new(full_name: impl Into<String>) -> Self {
        Self {
            full_name: full_name.into(),
            ..Self::default()
        }
    }

    pub fn with_role(
        mut self,
        department: impl Into<String>,
        job_title: impl Into<String>,
        is_clinical: bool,
    ) -> Self {
        self.department = department.into();
        self.job_title = job_title.into();
        self.is_clinical = is_clinical;
        self
    }

    pub fn with_employee_id(mut self, employee_id: impl Into<String>) -> Self {
        self.employee_id = Some(employee_id.into());
        self
    }

    pub fn completion(&self, module_key: &str) -> Option<&str> {
        self.completions.get(module_key).map(String::as_str)
    }

    pub fn with_completion(mut self, module_key: &str, value: impl Into<String>) -> Self {
        self.completions.insert(module_key.to_string(), value.into());
        self
    }
}
