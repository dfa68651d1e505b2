//! AI workout and diet plan generation.
//!
//! Every LLM call is recorded in the usage log whether it succeeds or not, and the log
//! doubles as the monthly quota counter of the gym's subscription plan.

pub mod client;
pub mod prompt;

use std::time::Instant;

use entity::sea_orm_active_enums::AiFeature;
use sea_orm::{ActiveValue, DatabaseConnection};
use serde_json::Value;

use crate::{
    model::fitness::{
        AiUsageDto, DietPlanDto, GenerateDietDto, GenerateWorkoutDto, WorkoutPlanDto,
    },
    server::{
        config::Config,
        data::{
            ai_usage::AiUsageLogRepository,
            billing::subscription_plan::SubscriptionPlanRepository,
            fitness::{diet_plan::DietPlanRepository, workout_plan::WorkoutPlanRepository},
            gym::GymRepository,
            member::MemberRepository,
        },
        error::{
            limit::LimitError, not_found::NotFoundError, validation::ValidationError, Error,
        },
        service::ai::client::{estimate_cost_micros, Completion, LlmClient},
        util::time::{month_start, today},
    },
};

const WORKOUT_WEEKS: i32 = 4;
const BUDGETS: [&str; 3] = ["low", "medium", "high"];

pub fn workout_plan_dto(plan: entity::workout_plan::Model) -> WorkoutPlanDto {
    WorkoutPlanDto {
        id: plan.id,
        member_id: plan.member_id,
        title: plan.title,
        goal: plan.goal,
        duration_weeks: plan.duration_weeks,
        difficulty: plan.difficulty,
        plan_data: plan.plan_data,
        ai_model_used: plan.ai_model_used,
        ai_prompt_tokens: plan.ai_prompt_tokens,
        ai_completion_tokens: plan.ai_completion_tokens,
        is_active: plan.is_active,
        created_at: plan.created_at,
    }
}

pub fn diet_plan_dto(plan: entity::diet_plan::Model) -> DietPlanDto {
    DietPlanDto {
        id: plan.id,
        member_id: plan.member_id,
        title: plan.title,
        goal: plan.goal,
        dietary_preference: plan.dietary_preference,
        daily_calories: plan.daily_calories,
        daily_protein_g: plan.daily_protein_g,
        daily_carbs_g: plan.daily_carbs_g,
        daily_fat_g: plan.daily_fat_g,
        plan_data: plan.plan_data,
        ai_model_used: plan.ai_model_used,
        ai_prompt_tokens: plan.ai_prompt_tokens,
        ai_completion_tokens: plan.ai_completion_tokens,
        is_active: plan.is_active,
        created_at: plan.created_at,
    }
}

/// Grams from a macro split entry such as `"150g"` or `150`
fn macro_grams(content: &Value, key: &str) -> Option<i32> {
    match content.get("macro_split")?.get(key)? {
        Value::Number(n) => n.as_f64().map(|g| g.round() as i32),
        Value::String(s) => {
            let digits: String = s.trim().chars().take_while(char::is_ascii_digit).collect();
            digits.parse().ok()
        }
        _ => None,
    }
}

/// Who asked for a generation, for the usage log
#[derive(Clone, Copy)]
struct Requester {
    gym_id: i32,
    user_id: Option<i32>,
}

pub struct AiService<'a> {
    db: &'a DatabaseConnection,
    client: LlmClient<'a>,
}

impl<'a> AiService<'a> {
    /// Creates a new instance of [`AiService`]
    pub fn new(db: &'a DatabaseConnection, http: &'a reqwest::Client, config: &'a Config) -> Self {
        Self {
            db,
            client: LlmClient::new(http, config),
        }
    }

    /// This month's AI calls of the gym and its plan allowance
    pub async fn usage(&self, gym_id: i32) -> Result<AiUsageDto, Error> {
        let used = AiUsageLogRepository::new(self.db)
            .count_since(gym_id, month_start(today()).and_time(Default::default()))
            .await?;

        Ok(AiUsageDto {
            used,
            limit: self.monthly_limit(gym_id).await?,
        })
    }

    async fn monthly_limit(&self, gym_id: i32) -> Result<i32, Error> {
        let gym = GymRepository::new(self.db)
            .get_by_id(gym_id)
            .await?
            .ok_or(NotFoundError::Gym)?;

        let Some(plan_id) = gym.subscription_plan_id else {
            return Ok(0);
        };

        Ok(SubscriptionPlanRepository::new(self.db)
            .get_by_id(plan_id)
            .await?
            .map(|plan| plan.max_ai_queries_per_month)
            .unwrap_or(0))
    }

    async fn ensure_quota(&self, gym_id: i32) -> Result<(), Error> {
        let usage = self.usage(gym_id).await?;
        if usage.limit > 0 && usage.used >= usage.limit as u64 {
            return Err(LimitError::AiQuotaExceeded.into());
        }

        Ok(())
    }

    pub async fn generate_workout_plan(
        &self,
        gym_id: i32,
        user_id: Option<i32>,
        request: GenerateWorkoutDto,
    ) -> Result<WorkoutPlanDto, Error> {
        let member = self.find_member(gym_id, request.member_id).await?;
        self.ensure_quota(gym_id).await?;

        let prompt = prompt::workout_prompt(&member, request.goal, request.level, today());
        let completion = self
            .complete(
                Requester { gym_id, user_id },
                AiFeature::WorkoutPlan,
                prompt::WORKOUT_SYSTEM,
                &prompt,
                format!("Workout plan for member #{}", member.id),
            )
            .await?;

        let plan = WorkoutPlanRepository::new(self.db)
            .create(entity::workout_plan::ActiveModel {
                gym_id: ActiveValue::Set(gym_id),
                member_id: ActiveValue::Set(member.id),
                created_by_id: ActiveValue::Set(user_id),
                title: ActiveValue::Set(prompt::workout_title(request.goal)),
                goal: ActiveValue::Set(request.goal),
                duration_weeks: ActiveValue::Set(WORKOUT_WEEKS),
                difficulty: ActiveValue::Set(request.level),
                plan_data: ActiveValue::Set(completion.content),
                ai_model_used: ActiveValue::Set(completion.model.to_string()),
                ai_prompt_tokens: ActiveValue::Set(completion.prompt_tokens),
                ai_completion_tokens: ActiveValue::Set(completion.completion_tokens),
                ..Default::default()
            })
            .await?;

        tracing::info!(gym_id = %gym_id, plan_id = %plan.id, "Generated workout plan");

        Ok(workout_plan_dto(plan))
    }

    pub async fn generate_diet_plan(
        &self,
        gym_id: i32,
        user_id: Option<i32>,
        request: GenerateDietDto,
    ) -> Result<DietPlanDto, Error> {
        if request.calories <= 0 {
            return Err(ValidationError::invalid("Calories must be a positive number.").into());
        }
        let budget = request
            .budget
            .as_deref()
            .map(|b| b.trim().to_lowercase())
            .filter(|b| !b.is_empty())
            .unwrap_or_else(|| "medium".to_string());
        if !BUDGETS.contains(&budget.as_str()) {
            return Err(ValidationError::invalid("Budget must be low, medium or high.").into());
        }

        let member = self.find_member(gym_id, request.member_id).await?;
        self.ensure_quota(gym_id).await?;

        let prompt = prompt::diet_prompt(&member, request.calories, request.preference, &budget);
        let mut completion = self
            .complete(
                Requester { gym_id, user_id },
                AiFeature::DietPlan,
                prompt::DIET_SYSTEM,
                &prompt,
                format!("Diet plan for member #{}", member.id),
            )
            .await?;

        if let Value::Object(content) = &mut completion.content {
            let meta = content
                .entry("meta")
                .or_insert_with(|| Value::Object(Default::default()));
            if let Value::Object(meta) = meta {
                meta.insert("budget".to_string(), Value::String(budget));
            }
        }

        let plan = DietPlanRepository::new(self.db)
            .create(entity::diet_plan::ActiveModel {
                gym_id: ActiveValue::Set(gym_id),
                member_id: ActiveValue::Set(member.id),
                created_by_id: ActiveValue::Set(user_id),
                title: ActiveValue::Set(prompt::diet_title(request.preference, request.calories)),
                goal: ActiveValue::Set(member.goal),
                dietary_preference: ActiveValue::Set(request.preference),
                daily_calories: ActiveValue::Set(request.calories),
                daily_protein_g: ActiveValue::Set(macro_grams(&completion.content, "protein")),
                daily_carbs_g: ActiveValue::Set(macro_grams(&completion.content, "carbs")),
                daily_fat_g: ActiveValue::Set(macro_grams(&completion.content, "fats")),
                plan_data: ActiveValue::Set(completion.content),
                ai_model_used: ActiveValue::Set(completion.model.to_string()),
                ai_prompt_tokens: ActiveValue::Set(completion.prompt_tokens),
                ai_completion_tokens: ActiveValue::Set(completion.completion_tokens),
                ..Default::default()
            })
            .await?;

        tracing::info!(gym_id = %gym_id, plan_id = %plan.id, "Generated diet plan");

        Ok(diet_plan_dto(plan))
    }

    pub async fn list_workout_plans(&self, gym_id: i32) -> Result<Vec<WorkoutPlanDto>, Error> {
        let plans = WorkoutPlanRepository::new(self.db).find_by_gym(gym_id).await?;

        Ok(plans.into_iter().map(workout_plan_dto).collect())
    }

    pub async fn get_workout_plan(&self, gym_id: i32, plan_id: i32) -> Result<WorkoutPlanDto, Error> {
        let plan = WorkoutPlanRepository::new(self.db)
            .get_by_id(gym_id, plan_id)
            .await?
            .ok_or(NotFoundError::WorkoutPlan)?;

        Ok(workout_plan_dto(plan))
    }

    pub async fn list_diet_plans(&self, gym_id: i32) -> Result<Vec<DietPlanDto>, Error> {
        let plans = DietPlanRepository::new(self.db).find_by_gym(gym_id).await?;

        Ok(plans.into_iter().map(diet_plan_dto).collect())
    }

    pub async fn get_diet_plan(&self, gym_id: i32, plan_id: i32) -> Result<DietPlanDto, Error> {
        let plan = DietPlanRepository::new(self.db)
            .get_by_id(gym_id, plan_id)
            .await?
            .ok_or(NotFoundError::DietPlan)?;

        Ok(diet_plan_dto(plan))
    }

    /// Calls the model and records the call, returning the completion or the call's error
    async fn complete(
        &self,
        requester: Requester,
        feature: AiFeature,
        system: &str,
        prompt: &str,
        summary: String,
    ) -> Result<Completion, Error> {
        let started = Instant::now();
        let result = self.client.complete(system, prompt).await;
        let elapsed_ms = started.elapsed().as_millis() as i64;

        let mut log = entity::ai_usage_log::ActiveModel {
            gym_id: ActiveValue::Set(Some(requester.gym_id)),
            user_id: ActiveValue::Set(requester.user_id),
            feature: ActiveValue::Set(feature),
            response_time_ms: ActiveValue::Set(elapsed_ms),
            was_cached: ActiveValue::Set(false),
            prompt_summary: ActiveValue::Set(Some(summary)),
            ..Default::default()
        };

        match &result {
            Ok(completion) => {
                log.model_used = ActiveValue::Set(completion.model.to_string());
                log.prompt_tokens = ActiveValue::Set(completion.prompt_tokens);
                log.completion_tokens = ActiveValue::Set(completion.completion_tokens);
                log.cost_usd_micros = ActiveValue::Set(estimate_cost_micros(
                    completion.model,
                    completion.prompt_tokens,
                    completion.completion_tokens,
                ));
                log.was_successful = ActiveValue::Set(true);
                log.error_message = ActiveValue::Set(None);
            }
            Err(e) => {
                tracing::error!(gym_id = %requester.gym_id, "AI generation failed: {}", e);

                log.model_used = ActiveValue::Set(self.client.model().unwrap_or_default().to_string());
                log.prompt_tokens = ActiveValue::Set(0);
                log.completion_tokens = ActiveValue::Set(0);
                log.cost_usd_micros = ActiveValue::Set(0);
                log.was_successful = ActiveValue::Set(false);
                log.error_message = ActiveValue::Set(Some(e.to_string()));
            }
        }

        AiUsageLogRepository::new(self.db).create(log).await?;

        result
    }

    async fn find_member(&self, gym_id: i32, member_id: i32) -> Result<entity::member::Model, Error> {
        MemberRepository::new(self.db)
            .get_by_id(gym_id, member_id, None)
            .await?
            .ok_or_else(|| NotFoundError::Member.into())
    }
}
