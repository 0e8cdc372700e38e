use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// A single point of interest suggested by the model.
///
/// Every field is optional on the way in because the model routinely leaves
/// some out or sends `null`; `id` and `is_bookmarked` are never read from the
/// model and are always set server-side.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AiRecommendation {
    #[serde(skip_deserializing)]
    pub id: Uuid,
    #[serde(default, deserialize_with = "deserialize_lenient_string")]
    pub name: String,
    #[serde(default, deserialize_with = "deserialize_lenient_string")]
    pub category: String,
    #[serde(default, deserialize_with = "deserialize_lenient_f64")]
    pub rating: f64,
    #[serde(default, deserialize_with = "deserialize_lenient_string")]
    pub image: String,
    #[serde(default, deserialize_with = "deserialize_lenient_string")]
    pub description: String,
    #[serde(default, deserialize_with = "deserialize_lenient_string")]
    pub ai_reason: String,
    #[serde(default, deserialize_with = "deserialize_lenient_f64")]
    pub match_score: f64,
    #[serde(default, deserialize_with = "deserialize_lenient_string")]
    pub estimated_time: String,
    #[serde(default, deserialize_with = "deserialize_lenient_string")]
    pub price_range: String,
    #[serde(default, deserialize_with = "deserialize_lenient_tags")]
    pub tags: Vec<String>,
    #[serde(skip_deserializing)]
    pub is_bookmarked: bool,
}

// Numbers may arrive as numbers, numeric strings ("90", "4.5") or null.
fn deserialize_lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Value = Value::deserialize(deserializer)?;
    match value {
        Value::Number(n) => Ok(n.as_f64().unwrap_or(0.0)),
        Value::String(s) => Ok(s.trim().parse::<f64>().ok().filter(|f| f.is_finite()).unwrap_or(0.0)),
        _ => Ok(0.0),
    }
}

fn deserialize_lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Value = Value::deserialize(deserializer)?;
    match value {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        _ => Ok(String::new()),
    }
}

// null means no tags; a single string counts as one tag; non-string entries are skipped.
fn deserialize_lenient_tags<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Value = Value::deserialize(deserializer)?;
    match value {
        Value::Array(items) => Ok(items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s),
                Value::Number(n) => Some(n.to_string()),
                _ => None,
            })
            .collect()),
        Value::String(s) if !s.trim().is_empty() => Ok(vec![s]),
        _ => Ok(Vec::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loosely_typed_fields_are_accepted() {
        let rec: AiRecommendation = serde_json::from_value(serde_json::json!({
            "id": "1",
            "name": "京都駅",
            "rating": null,
            "matchScore": "90",
            "tags": null,
            "isBookmarked": true,
            "priceRange": 1000
        }))
        .unwrap();

        assert!(rec.id.is_nil());
        assert_eq!(rec.rating, 0.0);
        assert_eq!(rec.match_score, 90.0);
        assert!(rec.tags.is_empty());
        assert!(!rec.is_bookmarked);
        assert_eq!(rec.price_range, "1000");
    }

    #[test]
    fn test_unparsable_numbers_become_zero() {
        let rec: AiRecommendation = serde_json::from_value(serde_json::json!({
            "name": "京都",
            "rating": "high",
            "description": null,
            "tags": ["寺", 3, null]
        }))
        .unwrap();

        assert_eq!(rec.rating, 0.0);
        assert_eq!(rec.description, "");
        assert_eq!(rec.tags, vec!["寺".to_string(), "3".to_string()]);
    }
}
