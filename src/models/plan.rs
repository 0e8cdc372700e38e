use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedPlan {
    pub schedule: Vec<DayPlan>,
    pub places: Vec<Place>,
    pub budget: BudgetBreakdown,
    pub recommendations: PlanRecommendations,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DayPlan {
    pub day: u32,
    #[serde(default)]
    pub date: String,
    pub items: Vec<ScheduleItem>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleItem {
    pub time: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub category: ScheduleCategory,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ScheduleCategory {
    Transport,
    Sightseeing,
    Food,
    Accommodation,
    Activity,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Place {
    pub name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub description: String,
}

/// Expected to add up to roughly the requested budget; nothing enforces it.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BudgetBreakdown {
    pub transportation: f64,
    pub accommodation: f64,
    pub food: f64,
    pub activities: f64,
}

impl BudgetBreakdown {
    pub fn total(&self) -> f64 {
        self.transportation + self.accommodation + self.food + self.activities
    }

    pub fn figures(&self) -> [(&'static str, f64); 4] {
        [
            ("transportation", self.transportation),
            ("accommodation", self.accommodation),
            ("food", self.food),
            ("activities", self.activities),
        ]
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct PlanRecommendations {
    #[serde(default)]
    pub must_visit: Vec<String>,
    #[serde(default)]
    pub local_food: Vec<String>,
    #[serde(default)]
    pub tips: Vec<String>,
}
