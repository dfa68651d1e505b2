//! Gym dashboard, business health and churn risk scoring.

use std::collections::HashMap;

use chrono::{Duration, NaiveDate, NaiveDateTime};
use entity::sea_orm_active_enums::MemberStatus;
use sea_orm::DatabaseConnection;

use crate::{
    model::dashboard::{
        BusinessHealthDto, GymDashboardDto, HealthActionsDto, MemberBriefDto, RetentionDto,
        RevenueDto,
    },
    server::{
        data::member::{plan::MembershipPlanRepository, MemberRepository},
        error::Error,
        service::member::HIGH_CHURN_THRESHOLD,
        util::time::{month_start, previous_month_start},
    },
};

const RECENT_MEMBERS: u64 = 5;
const EXPIRING_SOON: u64 = 10;
const HEALTH_ACTIONS: u64 = 5;
const NO_ALERTS: &str = "AI is analyzing member patterns. No critical alerts today.";

pub fn member_brief(member: entity::member::Model) -> MemberBriefDto {
    MemberBriefDto {
        id: member.id,
        name: member.name,
        phone: member.phone,
        membership_expiry: member.membership_expiry,
        churn_risk_score: member.churn_risk_score,
    }
}

/// Whole percentage change from last month, 100 when last month had nothing
pub fn revenue_growth(mtd: i64, last_month: i64) -> i64 {
    if last_month > 0 {
        (mtd - last_month) * 100 / last_month
    } else if mtd > 0 {
        100
    } else {
        0
    }
}

fn percentage(part: u64, total: u64) -> i64 {
    (part * 100 / total.max(1)) as i64
}

/// Heuristic churn risk from attendance recency, membership expiry and streak.
pub fn churn_risk_score(member: &entity::member::Model, today: NaiveDate) -> i32 {
    let mut score = 0;

    match member.last_check_in {
        Some(last) => {
            score += match (today - last.date()).num_days() {
                days if days >= 21 => 50,
                days if days >= 14 => 35,
                days if days >= 7 => 20,
                _ => 0,
            };
        }
        None => {
            if (today - member.join_date).num_days() > 7 {
                score += 40;
            }
        }
    }

    match member.status {
        MemberStatus::Active => {
            if let Some(expiry) = member.membership_expiry {
                score += match (expiry - today).num_days() {
                    days if days <= 7 => 25,
                    days if days <= 14 => 10,
                    _ => 0,
                };
            }
        }
        MemberStatus::Expired => score += 15,
        MemberStatus::Frozen | MemberStatus::Cancelled => {}
    }

    score -= match member.attendance_streak {
        streak if streak >= 10 => 15,
        streak if streak >= 5 => 10,
        _ => 0,
    };

    score.clamp(0, 100)
}

pub struct DashboardService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> DashboardService<'a> {
    /// Creates a new instance of [`DashboardService`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    async fn revenue(&self, gym_id: i32, today: NaiveDate) -> Result<RevenueDto, Error> {
        let member_repo = MemberRepository::new(self.db);
        let this_month = month_start(today);

        let mtd = member_repo
            .sum_amount_paid(&[gym_id], Some(this_month), None)
            .await?;
        let last_month = member_repo
            .sum_amount_paid(
                &[gym_id],
                Some(previous_month_start(today)),
                Some(this_month),
            )
            .await?;

        Ok(RevenueDto {
            mtd,
            last_month,
            growth: revenue_growth(mtd, last_month),
        })
    }

    /// Headline numbers for a gym as of `at`. Revenue figures stay zero unless
    /// `include_revenue` is set.
    pub async fn dashboard_stats(
        &self,
        gym_id: i32,
        at: NaiveDateTime,
        include_revenue: bool,
    ) -> Result<GymDashboardDto, Error> {
        let member_repo = MemberRepository::new(self.db);
        let plan_repo = MembershipPlanRepository::new(self.db);
        let today = at.date();
        let gym_ids = [gym_id];

        let total_members = member_repo.count(&gym_ids, None).await?;
        let active_members = member_repo
            .count(&gym_ids, Some(MemberStatus::Active))
            .await?;
        let expired_members = member_repo
            .count(&gym_ids, Some(MemberStatus::Expired))
            .await?;
        let frozen_members = member_repo
            .count(&gym_ids, Some(MemberStatus::Frozen))
            .await?;
        let high_churn_risk = member_repo
            .count_high_churn(gym_id, HIGH_CHURN_THRESHOLD)
            .await?;

        let revenue = if include_revenue {
            self.revenue(gym_id, today).await?
        } else {
            RevenueDto {
                mtd: 0,
                last_month: 0,
                growth: 0,
            }
        };

        let expiring = member_repo
            .find_active_expiring_between(Some(gym_id), today, today + Duration::days(7), None)
            .await?;
        let prices: HashMap<i32, i64> = plan_repo
            .list(gym_id)
            .await?
            .into_iter()
            .map(|plan| (plan.id, plan.price))
            .collect();
        let pending_renewals_count = expiring.len() as u64;
        let pending_renewals_amount = if include_revenue {
            expiring
                .iter()
                .filter_map(|member| member.membership_plan_id)
                .filter_map(|plan_id| prices.get(&plan_id))
                .sum()
        } else {
            0
        };

        let risk_inactive_count = member_repo
            .count_active_inactive_since(gym_id, at - Duration::days(10))
            .await?;

        let mut insights = Vec::new();
        if high_churn_risk > 0 {
            insights.push(format!(
                "{} members likely to churn based on attendance drops.",
                high_churn_risk
            ));
        }
        if risk_inactive_count > 0 {
            insights.push(format!(
                "{} high-value members inactive for 10+ days.",
                risk_inactive_count
            ));
        }
        if pending_renewals_count > 0 {
            insights.push(format!(
                "{} renewals due in the next 7 days.",
                pending_renewals_count
            ));
        }
        if insights.is_empty() {
            insights.push(NO_ALERTS.to_string());
        }

        let recent_members = member_repo
            .find_recent(gym_id, RECENT_MEMBERS)
            .await?
            .into_iter()
            .map(member_brief)
            .collect();
        let expiring_soon = expiring
            .into_iter()
            .take(EXPIRING_SOON as usize)
            .map(member_brief)
            .collect();

        Ok(GymDashboardDto {
            total_members,
            active_members,
            expired_members,
            frozen_members,
            high_churn_risk,
            revenue_mtd: revenue.mtd,
            revenue_last_month: revenue.last_month,
            revenue_growth: revenue.growth,
            pending_renewals_count,
            pending_renewals_amount,
            risk_inactive_count,
            insights,
            recent_members,
            expiring_soon,
        })
    }

    /// Revenue trend, retention percentages and the members needing follow up
    pub async fn business_health(
        &self,
        gym_id: i32,
        at: NaiveDateTime,
        include_revenue: bool,
    ) -> Result<BusinessHealthDto, Error> {
        let member_repo = MemberRepository::new(self.db);
        let today = at.date();
        let gym_ids = [gym_id];

        let revenue = if include_revenue {
            self.revenue(gym_id, today).await?
        } else {
            RevenueDto {
                mtd: 0,
                last_month: 0,
                growth: 0,
            }
        };

        let total = member_repo.count(&gym_ids, None).await?;
        let active = member_repo
            .count(&gym_ids, Some(MemberStatus::Active))
            .await?;
        let expired = member_repo
            .count(&gym_ids, Some(MemberStatus::Expired))
            .await?;
        let at_risk = member_repo
            .count_high_churn(gym_id, HIGH_CHURN_THRESHOLD)
            .await?;

        let inactive = member_repo
            .find_active_inactive_since(gym_id, at - Duration::days(7), Some(HEALTH_ACTIONS))
            .await?;
        let expiring = member_repo
            .find_by_status_expiring_between(
                gym_id,
                Some(MemberStatus::Active),
                today,
                today + Duration::days(3),
                Some(HEALTH_ACTIONS),
            )
            .await?;
        let pending = member_repo
            .find_by_status_expiring_between(
                gym_id,
                Some(MemberStatus::Expired),
                today - Duration::days(30),
                today,
                Some(HEALTH_ACTIONS),
            )
            .await?;

        Ok(BusinessHealthDto {
            revenue,
            retention: RetentionDto {
                active_pct: percentage(active, total),
                expired_pct: percentage(expired, total),
                at_risk_pct: percentage(at_risk, total),
            },
            actions: HealthActionsDto {
                inactive: inactive.into_iter().map(member_brief).collect(),
                expiring: expiring.into_iter().map(member_brief).collect(),
                pending: pending.into_iter().map(member_brief).collect(),
            },
        })
    }

    /// Recomputes the churn score of every live member, returning how many changed
    pub async fn rescore_churn(&self, today: NaiveDate) -> Result<usize, Error> {
        let member_repo = MemberRepository::new(self.db);
        let mut updated = 0;

        for member in member_repo.find_all_live().await? {
            let score = churn_risk_score(&member, today);
            if score != member.churn_risk_score {
                member_repo.set_churn_score(member.id, score).await?;
                updated += 1;
            }
        }

        tracing::info!(updated = %updated, "Rescored member churn risk");

        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use gymedge_test_utils::prelude::*;
    use sea_orm::{ActiveValue, EntityTrait, IntoActiveModel};

    use super::*;
    use crate::server::util::time::now;

    async fn dashboard_test() -> Result<TestContext, TestError> {
        TestBuilder::new().with_all_tables().build().await
    }

    fn member_model(
        status: MemberStatus,
        join_date: NaiveDate,
        expiry: Option<NaiveDate>,
        last_check_in: Option<NaiveDate>,
        streak: i32,
    ) -> entity::member::Model {
        let stamp = join_date.and_hms_opt(9, 0, 0).unwrap();

        entity::member::Model {
            id: 1,
            gym_id: 1,
            name: "Asha".to_string(),
            phone: "9876543210".to_string(),
            email: None,
            gender: None,
            date_of_birth: None,
            goal: entity::sea_orm_active_enums::FitnessGoal::GeneralFitness,
            experience_level: entity::sea_orm_active_enums::ExperienceLevel::Beginner,
            medical_conditions: None,
            dietary_preference: entity::sea_orm_active_enums::DietaryPreference::Veg,
            height_cm: None,
            weight_kg: None,
            body_fat_pct: None,
            bmi: None,
            membership_plan_id: None,
            join_date,
            membership_start: Some(join_date),
            membership_expiry: expiry,
            amount_paid: 0,
            assigned_trainer_id: None,
            attendance_streak: streak,
            last_check_in: last_check_in.map(|d| d.and_hms_opt(7, 0, 0).unwrap()),
            churn_risk_score: 0,
            status,
            emergency_contact: None,
            is_deleted: false,
            deleted_at: None,
            created_at: stamp,
            updated_at: stamp,
        }
    }

    mod revenue_growth {
        use super::*;

        /// Expect truncated percentages and the 100 fallback without a baseline
        #[test]
        fn computes_growth() {
            assert_eq!(revenue_growth(150_000, 100_000), 50);
            assert_eq!(revenue_growth(50_000, 150_000), -66);
            assert_eq!(revenue_growth(10_000, 0), 100);
            assert_eq!(revenue_growth(0, 0), 0);
        }
    }

    mod churn_risk_score {
        use super::*;

        fn date(y: i32, m: u32, d: u32) -> NaiveDate {
            NaiveDate::from_ymd_opt(y, m, d).unwrap()
        }

        /// Expect a long absence and close expiry to add up
        #[test]
        fn scores_absent_member_near_expiry() {
            let today = date(2025, 6, 30);
            let member = member_model(
                MemberStatus::Active,
                date(2025, 1, 1),
                Some(date(2025, 7, 3)),
                Some(date(2025, 6, 1)),
                0,
            );

            assert_eq!(churn_risk_score(&member, today), 75);
        }

        /// Expect a regular attendee with a long streak to score zero
        #[test]
        fn streak_offsets_risk() {
            let today = date(2025, 6, 30);
            let member = member_model(
                MemberStatus::Active,
                date(2025, 1, 1),
                Some(date(2025, 9, 1)),
                Some(date(2025, 6, 29)),
                12,
            );

            assert_eq!(churn_risk_score(&member, today), 0);
        }

        /// Expect members who never checked in to count only after their first week
        #[test]
        fn never_checked_in_after_a_week() {
            let today = date(2025, 6, 30);
            let fresh = member_model(
                MemberStatus::Active,
                date(2025, 6, 27),
                Some(date(2025, 7, 27)),
                None,
                0,
            );
            let stale = member_model(
                MemberStatus::Expired,
                date(2025, 5, 1),
                Some(date(2025, 6, 1)),
                None,
                0,
            );

            assert_eq!(churn_risk_score(&fresh, today), 0);
            assert_eq!(churn_risk_score(&stale, today), 55);
        }

        /// Expect the score to stay within 0..=100
        #[test]
        fn clamps_result() {
            let today = date(2025, 6, 30);
            let member = member_model(
                MemberStatus::Active,
                date(2025, 1, 1),
                Some(date(2025, 6, 30)),
                Some(date(2025, 1, 2)),
                0,
            );

            assert!((0..=100).contains(&churn_risk_score(&member, today)));
            assert_eq!(churn_risk_score(&member, today), 75);
        }
    }

    mod dashboard_stats {
        use super::*;

        /// Expect counts, pending renewal value and insights for a gym
        #[tokio::test]
        async fn summarizes_gym() -> Result<(), TestError> {
            let mut test = dashboard_test().await?;
            let gym = test.tenancy().insert_gym("Iron Paradise").await?;
            let plan = test
                .member()
                .insert_membership_plan(gym.id, "Monthly", 1, 150_000)
                .await?;
            let expiring = test.member().insert_member(gym.id, "Asha", "9876543210").await?;
            let mut am = expiring.into_active_model();
            am.membership_expiry = ActiveValue::Set(Some(today_date() + Duration::days(3)));
            am.membership_plan_id = ActiveValue::Set(Some(plan.id));
            am.amount_paid = ActiveValue::Set(150_000);
            test.member().update_member(am).await?;
            let expired = test.member().insert_member(gym.id, "Ravi", "9876543211").await?;
            let mut am = expired.into_active_model();
            am.status = ActiveValue::Set(MemberStatus::Expired);
            am.churn_risk_score = ActiveValue::Set(80);
            test.member().update_member(am).await?;

            let stats = DashboardService::new(&test.db)
                .dashboard_stats(gym.id, now(), true)
                .await
                .unwrap();

            assert_eq!(stats.total_members, 2);
            assert_eq!(stats.active_members, 1);
            assert_eq!(stats.expired_members, 1);
            assert_eq!(stats.high_churn_risk, 1);
            assert_eq!(stats.revenue_mtd, 150_000);
            assert_eq!(stats.pending_renewals_count, 1);
            assert_eq!(stats.pending_renewals_amount, 150_000);
            assert_eq!(stats.expiring_soon.len(), 1);
            assert_eq!(stats.recent_members.len(), 2);
            assert_eq!(
                stats.insights,
                vec![
                    "1 members likely to churn based on attendance drops.".to_string(),
                    "1 renewals due in the next 7 days.".to_string(),
                ]
            );

            Ok(())
        }

        /// Expect revenue fields to be zero without the revenue permission
        #[tokio::test]
        async fn hides_revenue() -> Result<(), TestError> {
            let mut test = dashboard_test().await?;
            let gym = test.tenancy().insert_gym("Iron Paradise").await?;
            let member = test.member().insert_member(gym.id, "Asha", "9876543210").await?;
            let mut am = member.into_active_model();
            am.amount_paid = ActiveValue::Set(99_900);
            test.member().update_member(am).await?;

            let stats = DashboardService::new(&test.db)
                .dashboard_stats(gym.id, now(), false)
                .await
                .unwrap();

            assert_eq!(stats.revenue_mtd, 0);
            assert_eq!(stats.revenue_growth, 0);
            assert_eq!(stats.insights, vec![NO_ALERTS.to_string()]);

            Ok(())
        }

        /// Expect an error when required tables are missing
        #[tokio::test]
        async fn fails_when_tables_missing() -> Result<(), TestError> {
            let test = TestBuilder::new().build().await?;

            let result = DashboardService::new(&test.db)
                .dashboard_stats(1, now(), true)
                .await;

            assert!(matches!(result, Err(Error::DbErr(_))));

            Ok(())
        }
    }

    mod business_health {
        use super::*;

        /// Expect retention percentages and follow up lists
        #[tokio::test]
        async fn lists_actions() -> Result<(), TestError> {
            let mut test = dashboard_test().await?;
            let gym = test.tenancy().insert_gym("Iron Paradise").await?;
            let inactive = test.member().insert_member(gym.id, "Asha", "9876543210").await?;
            let mut am = inactive.into_active_model();
            am.last_check_in = ActiveValue::Set(Some(now() - Duration::days(9)));
            am.membership_expiry = ActiveValue::Set(Some(today_date() + Duration::days(2)));
            test.member().update_member(am).await?;
            let lapsed = test.member().insert_member(gym.id, "Ravi", "9876543211").await?;
            let mut am = lapsed.into_active_model();
            am.status = ActiveValue::Set(MemberStatus::Expired);
            am.membership_expiry = ActiveValue::Set(Some(today_date() - Duration::days(5)));
            test.member().update_member(am).await?;

            let health = DashboardService::new(&test.db)
                .business_health(gym.id, now(), true)
                .await
                .unwrap();

            assert_eq!(health.retention.active_pct, 50);
            assert_eq!(health.retention.expired_pct, 50);
            assert_eq!(health.retention.at_risk_pct, 0);
            assert_eq!(health.actions.inactive.len(), 1);
            assert_eq!(health.actions.expiring.len(), 1);
            assert_eq!(health.actions.pending.len(), 1);
            assert_eq!(health.actions.pending[0].name, "Ravi");

            Ok(())
        }

        /// Expect zero percentages for an empty gym
        #[tokio::test]
        async fn handles_empty_gym() -> Result<(), TestError> {
            let mut test = dashboard_test().await?;
            let gym = test.tenancy().insert_gym("Iron Paradise").await?;

            let health = DashboardService::new(&test.db)
                .business_health(gym.id, now(), true)
                .await
                .unwrap();

            assert_eq!(
                health.retention,
                RetentionDto {
                    active_pct: 0,
                    expired_pct: 0,
                    at_risk_pct: 0,
                }
            );

            Ok(())
        }
    }

    mod rescore_churn {
        use super::*;

        /// Expect only members whose score changed to be updated
        #[tokio::test]
        async fn updates_changed_scores() -> Result<(), TestError> {
            let mut test = dashboard_test().await?;
            let gym = test.tenancy().insert_gym("Iron Paradise").await?;
            test.member().insert_member(gym.id, "Asha", "9876543210").await?;
            let absent = test.member().insert_member(gym.id, "Ravi", "9876543211").await?;
            let mut am = absent.clone().into_active_model();
            am.last_check_in = ActiveValue::Set(Some(now() - Duration::days(25)));
            test.member().update_member(am).await?;

            let updated = DashboardService::new(&test.db)
                .rescore_churn(today_date())
                .await
                .unwrap();

            assert_eq!(updated, 1);
            let absent = entity::prelude::Member::find_by_id(absent.id)
                .one(&test.db)
                .await?
                .unwrap();
            assert_eq!(absent.churn_risk_score, 50);

            Ok(())
        }
    }

    fn today_date() -> NaiveDate {
        crate::server::util::time::today()
    }
}
