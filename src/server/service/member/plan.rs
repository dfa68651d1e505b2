//! Membership plans sold by a gym.

use sea_orm::{ActiveValue, DatabaseConnection, IntoActiveModel};

use crate::{
    model::member::{CreateMembershipPlanDto, MembershipPlanDto, UpdateMembershipPlanDto},
    server::{
        data::member::plan::MembershipPlanRepository,
        error::{not_found::NotFoundError, validation::ValidationError, Error},
    },
};

pub fn plan_dto(plan: entity::membership_plan::Model) -> MembershipPlanDto {
    MembershipPlanDto {
        id: plan.id,
        name: plan.name,
        duration_months: plan.duration_months,
        price: plan.price,
        includes_trainer: plan.includes_trainer,
        includes_diet_plan: plan.includes_diet_plan,
        includes_supplements: plan.includes_supplements,
        description: plan.description,
        is_active: plan.is_active,
    }
}

fn validate(name: &str, duration_months: i32, price: i64) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::invalid("Plan name is required."));
    }
    if duration_months < 1 {
        return Err(ValidationError::invalid(
            "Duration must be at least one month.",
        ));
    }
    if price < 0 {
        return Err(ValidationError::invalid("Price cannot be negative."));
    }

    Ok(())
}

pub struct MembershipPlanService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> MembershipPlanService<'a> {
    /// Creates a new instance of [`MembershipPlanService`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn list(&self, gym_id: i32) -> Result<Vec<MembershipPlanDto>, Error> {
        let plans = MembershipPlanRepository::new(self.db).list(gym_id).await?;

        Ok(plans.into_iter().map(plan_dto).collect())
    }

    pub async fn create(
        &self,
        gym_id: i32,
        plan: CreateMembershipPlanDto,
    ) -> Result<MembershipPlanDto, Error> {
        validate(&plan.name, plan.duration_months, plan.price)?;

        let created = MembershipPlanRepository::new(self.db)
            .create(entity::membership_plan::ActiveModel {
                gym_id: ActiveValue::Set(gym_id),
                name: ActiveValue::Set(plan.name.trim().to_string()),
                duration_months: ActiveValue::Set(plan.duration_months),
                price: ActiveValue::Set(plan.price),
                includes_trainer: ActiveValue::Set(plan.includes_trainer),
                includes_diet_plan: ActiveValue::Set(plan.includes_diet_plan),
                includes_supplements: ActiveValue::Set(plan.includes_supplements),
                description: ActiveValue::Set(plan.description),
                is_active: ActiveValue::Set(true),
                ..Default::default()
            })
            .await?;

        Ok(plan_dto(created))
    }

    pub async fn get(&self, gym_id: i32, plan_id: i32) -> Result<MembershipPlanDto, Error> {
        let plan = MembershipPlanRepository::new(self.db)
            .get_by_id(gym_id, plan_id)
            .await?
            .ok_or(NotFoundError::MembershipPlan)?;

        Ok(plan_dto(plan))
    }

    pub async fn update(
        &self,
        gym_id: i32,
        plan_id: i32,
        patch: UpdateMembershipPlanDto,
    ) -> Result<MembershipPlanDto, Error> {
        let repo = MembershipPlanRepository::new(self.db);
        let plan = repo
            .get_by_id(gym_id, plan_id)
            .await?
            .ok_or(NotFoundError::MembershipPlan)?;

        validate(
            patch.name.as_deref().unwrap_or(&plan.name),
            patch.duration_months.unwrap_or(plan.duration_months),
            patch.price.unwrap_or(plan.price),
        )?;

        let mut am = plan.into_active_model();
        if let Some(name) = patch.name {
            am.name = ActiveValue::Set(name.trim().to_string());
        }
        if let Some(duration_months) = patch.duration_months {
            am.duration_months = ActiveValue::Set(duration_months);
        }
        if let Some(price) = patch.price {
            am.price = ActiveValue::Set(price);
        }
        if let Some(includes_trainer) = patch.includes_trainer {
            am.includes_trainer = ActiveValue::Set(includes_trainer);
        }
        if let Some(includes_diet_plan) = patch.includes_diet_plan {
            am.includes_diet_plan = ActiveValue::Set(includes_diet_plan);
        }
        if let Some(includes_supplements) = patch.includes_supplements {
            am.includes_supplements = ActiveValue::Set(includes_supplements);
        }
        if let Some(description) = patch.description {
            am.description = ActiveValue::Set(Some(description));
        }
        if let Some(is_active) = patch.is_active {
            am.is_active = ActiveValue::Set(is_active);
        }

        Ok(plan_dto(repo.update(am).await?))
    }

    pub async fn delete(&self, gym_id: i32, plan_id: i32) -> Result<(), Error> {
        let repo = MembershipPlanRepository::new(self.db);
        let plan = repo
            .get_by_id(gym_id, plan_id)
            .await?
            .ok_or(NotFoundError::MembershipPlan)?;

        repo.soft_delete(plan).await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use gymedge_test_utils::prelude::*;

    use super::*;

    fn monthly() -> CreateMembershipPlanDto {
        CreateMembershipPlanDto {
            name: " Monthly ".to_string(),
            duration_months: 1,
            price: 150_000,
            includes_trainer: false,
            includes_diet_plan: true,
            includes_supplements: false,
            description: None,
        }
    }

    /// Expect plans to be created, patched and soft deleted within the gym
    #[tokio::test]
    async fn manages_plan_lifecycle() -> Result<(), TestError> {
        let mut test = TestBuilder::new().with_member_tables().build().await?;
        let gym = test.tenancy().insert_gym("Iron Paradise").await?;
        let service = MembershipPlanService::new(&test.db);

        let created = service.create(gym.id, monthly()).await.unwrap();
        let updated = service
            .update(
                gym.id,
                created.id,
                UpdateMembershipPlanDto {
                    price: Some(120_000),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        service.delete(gym.id, created.id).await.unwrap();

        assert_eq!(created.name, "Monthly");
        assert_eq!(updated.price, 120_000);
        assert!(service.list(gym.id).await.unwrap().is_empty());
        assert!(matches!(
            service.get(gym.id, created.id).await,
            Err(Error::NotFoundError(NotFoundError::MembershipPlan))
        ));

        Ok(())
    }

    /// Expect a plan of another gym to be reported as missing
    #[tokio::test]
    async fn hides_other_gym_plans() -> Result<(), TestError> {
        let mut test = TestBuilder::new().with_member_tables().build().await?;
        let gym = test.tenancy().insert_gym("Iron Paradise").await?;
        let other = test.tenancy().insert_gym("Muscle Hub").await?;
        let plan = test
            .member()
            .insert_membership_plan(other.id, "Monthly", 1, 150_000)
            .await?;

        let result = MembershipPlanService::new(&test.db).get(gym.id, plan.id).await;

        assert!(matches!(
            result,
            Err(Error::NotFoundError(NotFoundError::MembershipPlan))
        ));

        Ok(())
    }

    /// Expect invalid durations to be rejected
    #[tokio::test]
    async fn rejects_zero_duration() -> Result<(), TestError> {
        let mut test = TestBuilder::new().with_member_tables().build().await?;
        let gym = test.tenancy().insert_gym("Iron Paradise").await?;

        let result = MembershipPlanService::new(&test.db)
            .create(
                gym.id,
                CreateMembershipPlanDto {
                    duration_months: 0,
                    ..monthly()
                },
            )
            .await;

        assert!(matches!(result, Err(Error::ValidationError(_))));

        Ok(())
    }

    /// Expect Error when required tables are not present
    #[tokio::test]
    async fn fails_when_tables_missing() -> Result<(), TestError> {
        let test = TestBuilder::new().build().await?;

        let result = MembershipPlanService::new(&test.db).list(1).await;

        assert!(matches!(result, Err(Error::DbErr(_))));

        Ok(())
    }
}
