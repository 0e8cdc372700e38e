use crate::models::plan::{
    BudgetBreakdown, DayPlan, GeneratedPlan, Place, PlanRecommendations, ScheduleCategory,
    ScheduleItem,
};
use crate::models::preferences::TravelPreferences;

const TRANSPORTATION_SHARE: f64 = 0.3;
const ACCOMMODATION_SHARE: f64 = 0.4;
const FOOD_SHARE: f64 = 0.2;
const ACTIVITIES_SHARE: f64 = 0.1;

/// Each share is floored to a whole currency unit so the parts never add up
/// to more than the budget.
pub fn split_budget(budget: f64) -> BudgetBreakdown {
    let budget = if budget.is_finite() { budget.max(0.0) } else { 0.0 };
    let share = |ratio: f64| (budget * ratio).floor();

    BudgetBreakdown {
        transportation: share(TRANSPORTATION_SHARE),
        accommodation: share(ACCOMMODATION_SHARE),
        food: share(FOOD_SHARE),
        activities: share(ACTIVITIES_SHARE),
    }
}

/// Deterministic stand-in used when the model cannot produce a plan.
pub fn fallback_plan(prefs: &TravelPreferences) -> GeneratedPlan {
    let destination = prefs.destination.trim();
    let interests = prefs
        .interests
        .iter()
        .map(|i| i.trim())
        .filter(|i| !i.is_empty())
        .collect::<Vec<_>>();
    let theme = if interests.is_empty() {
        "観光".to_string()
    } else {
        interests.join("、")
    };

    let schedule = vec![DayPlan {
        day: 1,
        date: prefs.start_date.format("%Y-%m-%d").to_string(),
        items: vec![
            ScheduleItem {
                time: "09:00".to_string(),
                title: format!("{}へ移動", destination),
                description: format!("{}に到着", destination),
                category: ScheduleCategory::Transport,
                location: Some(destination.to_string()),
            },
            ScheduleItem {
                time: "10:00".to_string(),
                title: format!("{}観光", destination),
                description: format!("{}を楽しむ", theme),
                category: ScheduleCategory::Sightseeing,
                location: Some(destination.to_string()),
            },
        ],
    }];

    let places = vec![Place {
        name: format!("{}の人気スポット", destination),
        category: "観光地".to_string(),
        rating: 4.0,
        description: format!("{}で人気の観光スポット", destination),
    }];

    GeneratedPlan {
        schedule,
        places,
        budget: split_budget(prefs.budget),
        recommendations: PlanRecommendations {
            must_visit: vec![format!("{}の代表的な観光地", destination)],
            local_food: vec![format!("{}の郷土料理", destination)],
            tips: vec![
                "事前に交通手段を確認しましょう".to_string(),
                "天候に合わせた服装を準備しましょう".to_string(),
            ],
        },
    }
}
