//! Bulk member import from CSV.

use entity::sea_orm_active_enums::{
    DietaryPreference, ExperienceLevel, FitnessGoal, MemberStatus,
};
use sea_orm::ActiveValue;

use crate::{
    model::member::ImportResultDto,
    server::{
        data::member::{plan::MembershipPlanRepository, MemberRepository},
        error::Error,
        service::member::MemberService,
        util::{
            csv::parse_csv,
            time::{add_months, today},
        },
    },
};

const REQUIRED_COLUMNS: [&str; 2] = ["name", "phone"];

impl<'a> MemberService<'a> {
    /// Imports members from CSV text with at least `name` and `phone` columns.
    ///
    /// Rows are imported independently; failures are reported per row, numbered as in the
    /// file with the header on row 1. An optional `plan` column is matched by plan name,
    /// falling back to the gym's first active plan.
    pub async fn bulk_import(&self, gym_id: i32, csv_text: &str) -> Result<ImportResultDto, Error> {
        let table = parse_csv(csv_text);

        let missing = table.missing_columns(&REQUIRED_COLUMNS);
        if !missing.is_empty() {
            return Ok(ImportResultDto {
                success_count: 0,
                errors: vec![format!("Missing required columns: {}", missing.join(", "))],
            });
        }

        let member_repo = MemberRepository::new(self.db);
        let plan_repo = MembershipPlanRepository::new(self.db);
        let default_plan = plan_repo.first_active(gym_id).await?;
        let start = today();

        let mut success_count = 0;
        let mut errors = Vec::new();

        for (index, row) in table.rows.iter().enumerate() {
            let row_number = index + 2;
            let field = |column: &str| {
                row.get(column)
                    .map(|value| value.trim())
                    .filter(|value| !value.is_empty())
            };

            let (Some(name), Some(phone)) = (field("name"), field("phone")) else {
                errors.push(format!("Row {}: Name and Phone are required.", row_number));
                continue;
            };

            if member_repo.phone_exists(gym_id, phone, None).await? {
                errors.push(format!(
                    "Row {}: Member with phone {} already exists.",
                    row_number, phone
                ));
                continue;
            }

            let plan = match field("plan") {
                Some(plan_name) => plan_repo
                    .find_by_name(gym_id, plan_name)
                    .await?
                    .or_else(|| default_plan.clone()),
                None => default_plan.clone(),
            };
            let expiry = plan
                .as_ref()
                .map(|plan| add_months(start, plan.duration_months))
                .unwrap_or(start);

            member_repo
                .create(entity::member::ActiveModel {
                    gym_id: ActiveValue::Set(gym_id),
                    name: ActiveValue::Set(name.to_string()),
                    phone: ActiveValue::Set(phone.to_string()),
                    email: ActiveValue::Set(field("email").map(str::to_string)),
                    gender: ActiveValue::Set(None),
                    date_of_birth: ActiveValue::Set(None),
                    goal: ActiveValue::Set(FitnessGoal::GeneralFitness),
                    experience_level: ActiveValue::Set(ExperienceLevel::Beginner),
                    medical_conditions: ActiveValue::Set(None),
                    dietary_preference: ActiveValue::Set(DietaryPreference::Veg),
                    height_cm: ActiveValue::Set(None),
                    weight_kg: ActiveValue::Set(None),
                    body_fat_pct: ActiveValue::Set(None),
                    bmi: ActiveValue::Set(None),
                    membership_plan_id: ActiveValue::Set(plan.as_ref().map(|plan| plan.id)),
                    join_date: ActiveValue::Set(start),
                    membership_start: ActiveValue::Set(Some(start)),
                    membership_expiry: ActiveValue::Set(Some(expiry)),
                    amount_paid: ActiveValue::Set(0),
                    assigned_trainer_id: ActiveValue::Set(None),
                    attendance_streak: ActiveValue::Set(0),
                    last_check_in: ActiveValue::Set(None),
                    churn_risk_score: ActiveValue::Set(0),
                    status: ActiveValue::Set(MemberStatus::Active),
                    emergency_contact: ActiveValue::Set(None),
                    ..Default::default()
                })
                .await?;

            success_count += 1;
        }

        tracing::info!(
            gym_id = %gym_id,
            imported = success_count,
            failed = errors.len(),
            "Imported members from CSV"
        );

        Ok(ImportResultDto {
            success_count,
            errors,
        })
    }
}
