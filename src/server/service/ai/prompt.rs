use chrono::{Datelike, NaiveDate};
use entity::sea_orm_active_enums::{DietaryPreference, ExperienceLevel, FitnessGoal, Gender};
use sea_orm::ActiveEnum;

pub const WORKOUT_SYSTEM: &str = "You are an expert fitness trainer AI.";
pub const DIET_SYSTEM: &str = "You are an expert Indian nutritionist AI.";

/// `"muscle_gain"` becomes `"Muscle Gain"`
pub fn title_case(value: &str) -> String {
    value
        .split(['_', ' '])
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

pub fn workout_title(goal: FitnessGoal) -> String {
    format!("{} Plan", title_case(&goal.to_value()))
}

pub fn diet_title(preference: DietaryPreference, calories: i32) -> String {
    format!(
        "{} Indian Diet ({} kcal)",
        title_case(&preference.to_value()),
        calories
    )
}

fn gender_label(gender: Option<Gender>) -> &'static str {
    match gender {
        Some(Gender::Male) => "male",
        Some(Gender::Female) => "female",
        Some(Gender::Other) | None => "",
    }
}

fn age(date_of_birth: Option<NaiveDate>, today: NaiveDate) -> String {
    match date_of_birth {
        Some(dob) => (today.year() - dob.year()).to_string(),
        None => "Unknown".to_string(),
    }
}

fn measurement(value: Option<f64>) -> String {
    value.map_or_else(|| "Unknown".to_string(), |v| v.to_string())
}

pub fn workout_prompt(
    member: &entity::member::Model,
    goal: FitnessGoal,
    level: ExperienceLevel,
    today: NaiveDate,
) -> String {
    let goal = goal.to_value();
    let level = level.to_value();
    let gender = gender_label(member.gender);
    let subject = if gender.is_empty() {
        "gym member".to_string()
    } else {
        format!("{} gym member", gender)
    };

    format!(
        r#"Create a 4-week structured workout plan for a {subject}.
Profile:
- Gender: {gender_display}
- Age: {age}
- Weight: {weight}kg, Height: {height}cm
- Goal: {goal}
- Experience Level: {level}
- Medical Conditions: {medical}
- Days per week: 4-5

Return purely JSON in this structure:
{{
  "goal": "{goal}",
  "level": "{level}",
  "duration_weeks": 4,
  "weekly_plan": [
    {{
      "day": "Monday",
      "focus": "Chest + Triceps",
      "exercises": [
        {{"name": "Bench Press", "sets": 4, "reps": "10-12", "notes": "Focus on form"}}
      ]
    }}
  ]
}}"#,
        gender_display = if gender.is_empty() { "Unspecified" } else { gender },
        age = age(member.date_of_birth, today),
        weight = measurement(member.weight_kg),
        height = measurement(member.height_cm),
        medical = member.medical_conditions.as_deref().unwrap_or("None"),
    )
}

pub fn diet_prompt(
    member: &entity::member::Model,
    calories: i32,
    preference: DietaryPreference,
    budget: &str,
) -> String {
    let preference = preference.to_value();

    format!(
        r#"Create a detailed weekly Indian diet plan for a gym member.
Profile:
- Weight: {weight}kg
- Goal: {goal}
- Calorie Target: {calories} kcal/day
- Preference: {preference} (strictly Indian cuisine)
- Budget: {budget} (low = simple home cooking, high = premium ingredients)
- Medical: {medical}

Requirements:
1. Foods must be common Indian items (roti, dal, sabzi, rice, poha, idli, paneer, chicken curry).
2. Macros should be balanced for the goal.
3. Include a grocery list.

Return strictly JSON:
{{
  "calories": {calories},
  "preference": "{preference}",
  "budget": "{budget}",
  "macro_split": {{"protein": "XXg", "carbs": "XXg", "fats": "XXg"}},
  "days": [
    {{
      "day": "Monday",
      "meals": [
        {{"meal": "Breakfast", "name": "Paneer Paratha with Curd", "items": "2 parathas, 100g curd", "calories": 400}}
      ]
    }}
  ],
  "grocery_list": ["Atta", "Rice", "Toor Dal"]
}}
Provide 7 days; repeating meals across days is fine."#,
        weight = measurement(member.weight_kg),
        goal = title_case(&member.goal.to_value()),
        medical = member.medical_conditions.as_deref().unwrap_or("None"),
    )
}
