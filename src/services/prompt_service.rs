use crate::models::preferences::{RecommendationPreferences, TravelPreferences, TripLength};

/// Rendered in place of any field the traveller left empty.
pub const NOT_SPECIFIED: &str = "特になし";

/// How many recommendations the model is asked for.
pub const RECOMMENDATION_COUNT: usize = 6;

const PLAN_JSON_EXAMPLE: &str = r#"{
  "schedule": [
    {
      "day": 1,
      "date": "YYYY-MM-DD",
      "items": [
        {
          "time": "09:00",
          "title": "活動名",
          "description": "詳細説明",
          "category": "transport | sightseeing | food | accommodation | activity",
          "location": "場所"
        }
      ]
    }
  ],
  "places": [
    {
      "name": "スポット名",
      "category": "カテゴリ",
      "rating": 4.5,
      "description": "説明"
    }
  ],
  "budget": {
    "transportation": 0,
    "accommodation": 0,
    "food": 0,
    "activities": 0
  },
  "recommendations": {
    "mustVisit": ["必見スポット"],
    "localFood": ["ご当地グルメ"],
    "tips": ["旅のヒント"]
  }
}"#;

const RECOMMENDATION_JSON_EXAMPLE: &str = r#"[
  {
    "name": "スポット名",
    "category": "カテゴリ",
    "rating": 4.5,
    "image": "https://example.com/photo.jpg",
    "description": "説明",
    "aiReason": "おすすめする理由",
    "matchScore": 90,
    "estimatedTime": "2時間",
    "priceRange": "¥1,000〜¥3,000",
    "tags": ["タグ"]
  }
]"#;

fn or_default(value: &str) -> &str {
    if value.trim().is_empty() {
        NOT_SPECIFIED
    } else {
        value
    }
}

fn join_or_default(values: &[String]) -> String {
    let joined = values
        .iter()
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .collect::<Vec<_>>()
        .join("、");
    or_default(&joined).to_string()
}

pub fn build_plan_prompt(prefs: &TravelPreferences, length: TripLength) -> String {
    let description = prefs.description.as_deref().unwrap_or("");

    format!(
        "あなたは経験豊富な旅行プランナーです。以下の条件で旅行プランを作成してください。\n\n\
         目的地: {destination}\n\
         日程: {start} 〜 {end}（{nights}泊{days}日）\n\
         人数: {members}名\n\
         予算: {budget}円\n\
         興味: {interests}\n\
         旅行スタイル: {style}\n\
         要望: {description}\n\n\
         スケジュールは{days}日分、日ごとに時刻順で作成してください。\n\
         予算の内訳（transportation, accommodation, food, activities）の合計は予算に近づけてください。\n\
         categoryは transport, sightseeing, food, accommodation, activity のいずれかにしてください。\n\n\
         以下のJSON形式のみで回答してください:\n{example}",
        destination = prefs.destination,
        start = prefs.start_date.format("%Y-%m-%d"),
        end = prefs.end_date.format("%Y-%m-%d"),
        nights = length.nights,
        days = length.days,
        members = prefs.member_count,
        budget = prefs.budget,
        interests = join_or_default(&prefs.interests),
        style = or_default(&prefs.travel_style),
        description = or_default(description),
        example = PLAN_JSON_EXAMPLE,
    )
}

pub fn build_recommendation_prompt(prefs: &RecommendationPreferences) -> String {
    let region = prefs.region().unwrap_or(NOT_SPECIFIED);
    let custom_note = prefs.custom_note.as_deref().unwrap_or("");

    format!(
        "あなたは旅行ガイドの専門家です。以下の条件に合うおすすめスポットを{count}件提案してください。\n\n\
         目的地: {destination}\n\
         地域: {region}\n\
         興味: {interests}\n\
         予算: {budget}\n\
         旅行スタイル: {style}\n\
         人数: {group}名\n\
         期間: {duration}\n\
         要望: {note}\n\n\
         必ず「{destination}」にあるスポットのみを提案し、name または description に「{destination}」を含めてください。\n\
         image には https:// で始まる画像ファイル（jpg, jpeg, png, webp, gif, bmp, svg）のURLを指定してください。\n\
         matchScore は 0〜100 の数値にしてください。\n\n\
         以下のJSON配列形式のみで回答してください:\n{example}",
        count = RECOMMENDATION_COUNT,
        destination = prefs.destination,
        region = region,
        interests = join_or_default(&prefs.interests),
        budget = or_default(&prefs.budget),
        style = or_default(&prefs.travel_style),
        group = prefs.group_size,
        duration = or_default(&prefs.duration),
        note = or_default(custom_note),
        example = RECOMMENDATION_JSON_EXAMPLE,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn kyoto_trip() -> TravelPreferences {
        TravelPreferences {
            destination: "京都".to_string(),
            start_date: NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2024, 3, 17).unwrap(),
            member_count: 2,
            budget: 80000.0,
            interests: vec!["寺社".to_string(), "和菓子".to_string()],
            travel_style: "relaxed".to_string(),
            description: None,
        }
    }

    #[test]
    fn test_plan_prompt_embeds_fields_and_length() {
        let prefs = kyoto_trip();
        let length = prefs.trip_length().unwrap();
        let prompt = build_plan_prompt(&prefs, length);

        assert!(prompt.contains("目的地: 京都"));
        assert!(prompt.contains("2024-03-15 〜 2024-03-17"));
        assert!(prompt.contains("2泊3日"));
        assert!(prompt.contains("寺社、和菓子"));
        assert!(prompt.contains("旅行スタイル: relaxed"));
        assert!(prompt.contains("\"mustVisit\""));
    }

    #[test]
    fn test_empty_fields_render_as_not_specified() {
        let mut prefs = kyoto_trip();
        prefs.interests.clear();
        prefs.travel_style = String::new();
        let prompt = build_plan_prompt(&prefs, prefs.trip_length().unwrap());

        assert!(prompt.contains(&format!("興味: {}", NOT_SPECIFIED)));
        assert!(prompt.contains(&format!("旅行スタイル: {}", NOT_SPECIFIED)));
        assert!(prompt.contains(&format!("要望: {}", NOT_SPECIFIED)));
    }

    #[test]
    fn test_recommendation_prompt_uses_region_and_note() {
        let prefs = RecommendationPreferences {
            destination: "京都".to_string(),
            region: Some("嵐山".to_string()),
            interests: vec!["自然".to_string()],
            budget: "medium".to_string(),
            travel_style: "active".to_string(),
            group_size: 4,
            duration: "1日".to_string(),
            custom_note: Some("子連れ".to_string()),
        };
        let prompt = build_recommendation_prompt(&prefs);

        assert!(prompt.contains("地域: 嵐山"));
        assert!(prompt.contains("人数: 4名"));
        assert!(prompt.contains("要望: 子連れ"));
        assert!(prompt.contains("\"aiReason\""));
    }

    #[test]
    fn test_recommendation_prompt_without_region() {
        let prefs = RecommendationPreferences {
            destination: "京都".to_string(),
            region: None,
            interests: vec![],
            budget: String::new(),
            travel_style: String::new(),
            group_size: 1,
            duration: String::new(),
            custom_note: None,
        };
        let prompt = build_recommendation_prompt(&prefs);

        assert!(prompt.contains(&format!("地域: {}", NOT_SPECIFIED)));
        assert!(prompt.contains(&format!("予算: {}", NOT_SPECIFIED)));
    }
}
