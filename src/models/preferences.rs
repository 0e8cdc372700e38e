use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::services::generation_error::GenerationError;

/// Input for plan generation, as posted by the trip planner frontend.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct TravelPreferences {
    pub destination: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub member_count: u32,
    pub budget: f64,
    #[serde(default)]
    pub interests: Vec<String>,
    #[serde(default)]
    pub travel_style: String,
    #[serde(default, alias = "customNote")]
    pub description: Option<String>,
}

/// Input for recommendation generation.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationPreferences {
    pub destination: String,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub interests: Vec<String>,
    /// Budget tier as chosen in the UI ("low", "medium", ...), not an amount.
    #[serde(default)]
    pub budget: String,
    #[serde(default)]
    pub travel_style: String,
    pub group_size: u32,
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub custom_note: Option<String>,
}

#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
pub struct TripLength {
    pub days: i64,
    pub nights: i64,
}

impl TripLength {
    /// Both endpoints count as travel days.
    pub fn from_range(start: NaiveDate, end: NaiveDate) -> Result<Self, GenerationError> {
        if end < start {
            return Err(GenerationError::InvalidDateRange { start, end });
        }

        let days = (end - start).num_days() + 1;
        Ok(Self {
            days,
            nights: days - 1,
        })
    }
}

impl TravelPreferences {
    pub fn trip_length(&self) -> Result<TripLength, GenerationError> {
        TripLength::from_range(self.start_date, self.end_date)
    }

    /// Checks the preconditions plan generation relies on.
    pub fn validate(&self) -> Result<TripLength, GenerationError> {
        if self.destination.trim().is_empty() {
            return Err(GenerationError::InvalidPreferences(
                "destination is required".to_string(),
            ));
        }
        if self.member_count == 0 {
            return Err(GenerationError::InvalidPreferences(
                "memberCount must be at least 1".to_string(),
            ));
        }
        if !self.budget.is_finite() || self.budget < 0.0 {
            return Err(GenerationError::InvalidPreferences(
                "budget must be a non-negative number".to_string(),
            ));
        }

        self.trip_length()
    }
}

impl RecommendationPreferences {
    pub fn validate(&self) -> Result<(), GenerationError> {
        if self.destination.trim().is_empty() {
            return Err(GenerationError::InvalidPreferences(
                "destination is required".to_string(),
            ));
        }
        if self.group_size == 0 {
            return Err(GenerationError::InvalidPreferences(
                "groupSize must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// The region, if one was supplied and it is not blank.
    pub fn region(&self) -> Option<&str> {
        self.region
            .as_deref()
            .map(str::trim)
            .filter(|region| !region.is_empty())
    }
}
