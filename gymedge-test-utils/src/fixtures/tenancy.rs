use chrono::{Duration, Utc};
use entity::sea_orm_active_enums::{GymType, SubscriptionStatus};
use sea_orm::{ActiveValue, EntityTrait, PaginatorTrait};

use crate::{error::TestError, TestContext};

impl TestContext {
    pub fn tenancy<'a>(&'a mut self) -> TenancyFixtures<'a> {
        TenancyFixtures { context: self }
    }
}

pub struct TenancyFixtures<'a> {
    context: &'a mut TestContext,
}

impl<'a> TenancyFixtures<'a> {
    /// Insert an active SaaS plan with every feature enabled and no AI quota.
    pub async fn insert_subscription_plan(
        &self,
        slug: &str,
    ) -> Result<entity::subscription_plan::Model, TestError> {
        let now = Utc::now().naive_utc();

        Ok(
            entity::prelude::SubscriptionPlan::insert(entity::subscription_plan::ActiveModel {
                name: ActiveValue::Set(slug.to_uppercase()),
                slug: ActiveValue::Set(slug.to_string()),
                price_monthly: ActiveValue::Set(99_900),
                price_yearly: ActiveValue::Set(999_900),
                discount_pct: ActiveValue::Set(0),
                max_members: ActiveValue::Set(500),
                max_ai_queries_per_month: ActiveValue::Set(0),
                max_staff_accounts: ActiveValue::Set(5),
                max_leads: ActiveValue::Set(1000),
                has_lead_management: ActiveValue::Set(true),
                has_ai_workout: ActiveValue::Set(true),
                has_ai_diet: ActiveValue::Set(true),
                has_ai_lead_scoring: ActiveValue::Set(true),
                has_whatsapp_integration: ActiveValue::Set(true),
                has_instagram_content: ActiveValue::Set(false),
                has_analytics_dashboard: ActiveValue::Set(true),
                has_white_label: ActiveValue::Set(false),
                has_api_access: ActiveValue::Set(false),
                is_active: ActiveValue::Set(true),
                display_order: ActiveValue::Set(0),
                created_at: ActiveValue::Set(now),
                updated_at: ActiveValue::Set(now),
                ..Default::default()
            })
            .exec_with_returning(&self.context.db)
            .await?,
        )
    }

    /// Insert an active gym on trial with a generated code and slug.
    pub async fn insert_gym(&self, name: &str) -> Result<entity::gym::Model, TestError> {
        self.insert_gym_for_organization(name, None).await
    }

    /// Insert an active gym belonging to an organization.
    pub async fn insert_gym_for_organization(
        &self,
        name: &str,
        organization_id: Option<i32>,
    ) -> Result<entity::gym::Model, TestError> {
        let now = Utc::now().naive_utc();
        let count = entity::prelude::Gym::find().count(&self.context.db).await?;
        let slug = format!(
            "{}-{}",
            name.to_lowercase().replace(' ', "-"),
            count + 1
        );

        Ok(entity::prelude::Gym::insert(entity::gym::ActiveModel {
            name: ActiveValue::Set(name.to_string()),
            slug: ActiveValue::Set(slug),
            gym_code: ActiveValue::Set(format!("GYM{:07}", count + 1)),
            brand_color: ActiveValue::Set("#6366f1".to_string()),
            font_family: ActiveValue::Set("Inter".to_string()),
            logo: ActiveValue::Set(None),
            owner_name: ActiveValue::Set("Test Owner".to_string()),
            owner_phone: ActiveValue::Set("9000000000".to_string()),
            email: ActiveValue::Set(None),
            address: ActiveValue::Set(None),
            city: ActiveValue::Set(Some("Jaipur".to_string())),
            state: ActiveValue::Set(None),
            pincode: ActiveValue::Set(None),
            gym_type: ActiveValue::Set(GymType::Standard),
            member_capacity: ActiveValue::Set(100),
            subscription_plan_id: ActiveValue::Set(None),
            subscription_status: ActiveValue::Set(SubscriptionStatus::Trial),
            trial_ends_at: ActiveValue::Set(Some(now + Duration::days(30))),
            organization_id: ActiveValue::Set(organization_id),
            is_active: ActiveValue::Set(true),
            is_deleted: ActiveValue::Set(false),
            deleted_at: ActiveValue::Set(None),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        })
        .exec_with_returning(&self.context.db)
        .await?)
    }

    pub async fn insert_holding_company(
        &self,
        holding_code: &str,
    ) -> Result<entity::holding_company::Model, TestError> {
        let now = Utc::now().naive_utc();

        Ok(
            entity::prelude::HoldingCompany::insert(entity::holding_company::ActiveModel {
                name: ActiveValue::Set("Test Holdings".to_string()),
                holding_code: ActiveValue::Set(holding_code.to_string()),
                owner_name: ActiveValue::Set("Holding Owner".to_string()),
                owner_email: ActiveValue::Set(None),
                owner_phone: ActiveValue::Set(None),
                is_active: ActiveValue::Set(true),
                is_deleted: ActiveValue::Set(false),
                deleted_at: ActiveValue::Set(None),
                created_at: ActiveValue::Set(now),
                updated_at: ActiveValue::Set(now),
                ..Default::default()
            })
            .exec_with_returning(&self.context.db)
            .await?,
        )
    }

    /// Insert an active brand with the given royalty terms.
    pub async fn insert_brand(
        &self,
        holding_company_id: i32,
        brand_code: &str,
        royalty_basis_points: i32,
        royalty_flat_fee: i64,
    ) -> Result<entity::brand::Model, TestError> {
        let now = Utc::now().naive_utc();

        Ok(entity::prelude::Brand::insert(entity::brand::ActiveModel {
            holding_company_id: ActiveValue::Set(holding_company_id),
            name: ActiveValue::Set(format!("Brand {}", brand_code)),
            brand_code: ActiveValue::Set(brand_code.to_string()),
            royalty_basis_points: ActiveValue::Set(royalty_basis_points),
            royalty_flat_fee: ActiveValue::Set(royalty_flat_fee),
            is_active: ActiveValue::Set(true),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        })
        .exec_with_returning(&self.context.db)
        .await?)
    }

    /// Insert an active franchise organization.
    pub async fn insert_organization(
        &self,
        brand_id: Option<i32>,
        org_code: &str,
    ) -> Result<entity::organization::Model, TestError> {
        let now = Utc::now().naive_utc();

        Ok(
            entity::prelude::Organization::insert(entity::organization::ActiveModel {
                brand_id: ActiveValue::Set(brand_id),
                name: ActiveValue::Set(format!("Org {}", org_code)),
                org_code: ActiveValue::Set(org_code.to_string()),
                entity_code: ActiveValue::Set(format!("E{}", org_code)),
                owner_name: ActiveValue::Set(None),
                owner_email: ActiveValue::Set(None),
                owner_phone: ActiveValue::Set(None),
                is_franchise: ActiveValue::Set(true),
                franchise_start_date: ActiveValue::Set(None),
                subscription_plan_id: ActiveValue::Set(None),
                is_active: ActiveValue::Set(true),
                is_deleted: ActiveValue::Set(false),
                deleted_at: ActiveValue::Set(None),
                created_at: ActiveValue::Set(now),
                updated_at: ActiveValue::Set(now),
                ..Default::default()
            })
            .exec_with_returning(&self.context.db)
            .await?,
        )
    }
}
