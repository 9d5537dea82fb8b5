use super::domain::{RiskTier, TrainingCategory};
use serde::Serialize;
use std::collections::BTreeMap;

/// A mandatory training requirement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrainingModule {
    pub key: &'static str,
    pub label: &'static str,
    pub validity_months: u32,
    pub risk_tier: RiskTier,
}

/// Read-only registry of training requirements, built once at startup and
/// shared by reference with every evaluation.
#[derive(Debug, Clone, Default)]
pub struct ModuleCatalog {
    modules: Vec<TrainingModule>,
    categories: BTreeMap<&'static str, TrainingCategory>,
}

impl ModuleCatalog {
    pub fn new(
        modules: Vec<TrainingModule>,
        categories: impl IntoIterator<Item = (&'static str, TrainingCategory)>,
    ) -> Self {
        Self {
            modules,
            categories: categories.into_iter().collect(),
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn standard() -> Self {
        Self::new(standard_modules(), STANDARD_CATEGORIES.iter().copied())
    }

    pub fn modules(&self) -> &[TrainingModule] {
        &self.modules
    }

    pub fn get(&self, key: &str) -> Option<&TrainingModule> {
        self.modules.iter().find(|module| module.key == key)
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    /// Category for a module key; unmapped keys land in `Other` so no module
    /// drops out of a rollup.
    pub fn category_of(&self, key: &str) -> TrainingCategory {
        self.categories
            .get(key)
            .copied()
            .unwrap_or(TrainingCategory::Other)
    }

    /// Distinct categories in the order their first module appears.
    pub fn categories(&self) -> Vec<TrainingCategory> {
        let mut ordered = Vec::new();
        for module in &self.modules {
            let category = self.category_of(module.key);
            if !ordered.contains(&category) {
                ordered.push(category);
            }
        }
        ordered
    }
}

const STANDARD_CATEGORIES: &[(&str, TrainingCategory)] = &[
    ("fire_safety", TrainingCategory::FireSafety),
    ("basic_life_support", TrainingCategory::ClinicalSkills),
    ("infection_prevention", TrainingCategory::InfectionControl),
    ("hand_hygiene", TrainingCategory::InfectionControl),
    ("ppe_donning_doffing", TrainingCategory::Ppe),
    ("respirator_fit_testing", TrainingCategory::Ppe),
    ("manual_handling", TrainingCategory::HealthAndSafety),
    ("coshh", TrainingCategory::HealthAndSafety),
    ("clinical_waste", TrainingCategory::WasteManagement),
    ("sharps_safety", TrainingCategory::WasteManagement),
    ("information_governance", TrainingCategory::Governance),
    ("equality_diversity", TrainingCategory::Governance),
];

fn standard_modules() -> Vec<TrainingModule> {
    vec![
        TrainingModule {
            key: "fire_safety",
            label: "Fire Safety & Evacuation",
            validity_months: 12,
            risk_tier: RiskTier::High,
        },
        TrainingModule {
            key: "basic_life_support",
            label: "Basic Life Support",
            validity_months: 12,
            risk_tier: RiskTier::High,
        },
        TrainingModule {
            key: "infection_prevention",
            label: "Infection Prevention & Control",
            validity_months: 12,
            risk_tier: RiskTier::High,
        },
        TrainingModule {
            key: "hand_hygiene",
            label: "Hand Hygiene",
            validity_months: 12,
            risk_tier: RiskTier::Medium,
        },
        TrainingModule {
            key: "ppe_donning_doffing",
            label: "PPE Donning & Doffing",
            validity_months: 12,
            risk_tier: RiskTier::High,
        },
        TrainingModule {
            key: "respirator_fit_testing",
            label: "Respirator Fit Testing",
            validity_months: 24,
            risk_tier: RiskTier::High,
        },
        TrainingModule {
            key: "manual_handling",
            label: "Moving & Handling",
            validity_months: 36,
            risk_tier: RiskTier::Medium,
        },
        TrainingModule {
            key: "coshh",
            label: "COSHH Awareness",
            validity_months: 36,
            risk_tier: RiskTier::Medium,
        },
        TrainingModule {
            key: "clinical_waste",
            label: "Clinical Waste Segregation",
            validity_months: 24,
            risk_tier: RiskTier::Medium,
        },
        TrainingModule {
            key: "sharps_safety",
            label: "Sharps Safety",
            validity_months: 24,
            risk_tier: RiskTier::High,
        },
        TrainingModule {
            key: "information_governance",
            label: "Information Governance & Data Security",
            validity_months: 12,
            risk_tier: RiskTier::Low,
        },
        TrainingModule {
            key: "equality_diversity",
            label: "Equality, Diversity & Human Rights",
            validity_months: 36,
            risk_tier: RiskTier::Low,
        },
    ]
}
