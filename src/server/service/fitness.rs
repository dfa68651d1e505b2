//! Attendance check-in/check-out and body progress tracking.

use chrono::Duration;
use sea_orm::{ActiveValue, DatabaseConnection, IntoActiveModel};

use crate::{
    model::fitness::{AttendanceDto, CreateProgressLogDto, ProgressLogDto},
    server::{
        data::{
            fitness::{attendance::AttendanceRepository, progress::ProgressLogRepository},
            member::MemberRepository,
        },
        error::{conflict::ConflictError, not_found::NotFoundError, Error},
        service::member::compute_bmi,
        util::time::{now, today},
    },
};

pub fn attendance_dto(attendance: entity::attendance::Model) -> AttendanceDto {
    AttendanceDto {
        id: attendance.id,
        member_id: attendance.member_id,
        check_in: attendance.check_in,
        check_out: attendance.check_out,
        duration_minutes: attendance.duration_minutes,
        notes: attendance.notes,
    }
}

pub fn progress_dto(log: entity::progress_log::Model) -> ProgressLogDto {
    ProgressLogDto {
        id: log.id,
        member_id: log.member_id,
        date: log.date,
        weight_kg: log.weight_kg,
        body_fat_pct: log.body_fat_pct,
        muscle_mass_kg: log.muscle_mass_kg,
        bmi: log.bmi,
        chest_cm: log.chest_cm,
        waist_cm: log.waist_cm,
        hips_cm: log.hips_cm,
        biceps_cm: log.biceps_cm,
        thighs_cm: log.thighs_cm,
        notes: log.notes,
    }
}

pub struct FitnessService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> FitnessService<'a> {
    /// Creates a new instance of [`FitnessService`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Opens an attendance for the member and advances the daily streak.
    ///
    /// The streak grows when the previous check-in was yesterday, stays put for a second
    /// visit on the same day and restarts at 1 otherwise.
    pub async fn check_in(
        &self,
        gym_id: i32,
        trainer_id: Option<i32>,
        member_id: i32,
    ) -> Result<AttendanceDto, Error> {
        let member = self.find_member(gym_id, trainer_id, member_id).await?;
        let attendance_repo = AttendanceRepository::new(self.db);

        let checked_in_at = now();
        let day = checked_in_at.date();
        if attendance_repo
            .find_open_on(member.id, day)
            .await?
            .is_some()
        {
            return Err(ConflictError::AlreadyCheckedIn.into());
        }

        let attendance = attendance_repo
            .create(gym_id, member.id, checked_in_at)
            .await?;

        let streak = match member.last_check_in.map(|at| at.date()) {
            Some(last) if last == day => member.attendance_streak,
            Some(last) if last == day - Duration::days(1) => member.attendance_streak + 1,
            _ => 1,
        };

        let mut am = member.into_active_model();
        am.attendance_streak = ActiveValue::Set(streak);
        am.last_check_in = ActiveValue::Set(Some(checked_in_at));
        MemberRepository::new(self.db).update(am).await?;

        tracing::debug!(member_id = %member_id, streak = %streak, "Member checked in");

        Ok(attendance_dto(attendance))
    }

    pub async fn check_out(&self, gym_id: i32, attendance_id: i32) -> Result<AttendanceDto, Error> {
        let attendance_repo = AttendanceRepository::new(self.db);
        let attendance = attendance_repo
            .get_by_id(gym_id, attendance_id)
            .await?
            .ok_or(NotFoundError::Attendance)?;

        if attendance.check_out.is_some() {
            return Err(ConflictError::AlreadyCheckedOut.into());
        }

        let attendance = attendance_repo.check_out(attendance, now()).await?;

        Ok(attendance_dto(attendance))
    }

    pub async fn attendance_history(
        &self,
        gym_id: i32,
        trainer_id: Option<i32>,
        member_id: i32,
    ) -> Result<Vec<AttendanceDto>, Error> {
        let member = self.find_member(gym_id, trainer_id, member_id).await?;
        let history = AttendanceRepository::new(self.db)
            .find_by_member(member.id)
            .await?;

        Ok(history.into_iter().map(attendance_dto).collect())
    }

    /// Records a progress entry and copies the body metrics onto the member
    pub async fn log_progress(
        &self,
        gym_id: i32,
        trainer_id: Option<i32>,
        member_id: i32,
        input: CreateProgressLogDto,
    ) -> Result<ProgressLogDto, Error> {
        let member = self.find_member(gym_id, trainer_id, member_id).await?;

        let bmi = input
            .bmi
            .or_else(|| compute_bmi(member.height_cm, input.weight_kg));

        let log = ProgressLogRepository::new(self.db)
            .create(entity::progress_log::ActiveModel {
                gym_id: ActiveValue::Set(gym_id),
                member_id: ActiveValue::Set(member.id),
                date: ActiveValue::Set(input.date.unwrap_or_else(today)),
                weight_kg: ActiveValue::Set(input.weight_kg),
                body_fat_pct: ActiveValue::Set(input.body_fat_pct),
                muscle_mass_kg: ActiveValue::Set(input.muscle_mass_kg),
                bmi: ActiveValue::Set(bmi),
                chest_cm: ActiveValue::Set(input.chest_cm),
                waist_cm: ActiveValue::Set(input.waist_cm),
                hips_cm: ActiveValue::Set(input.hips_cm),
                biceps_cm: ActiveValue::Set(input.biceps_cm),
                thighs_cm: ActiveValue::Set(input.thighs_cm),
                notes: ActiveValue::Set(input.notes),
                ..Default::default()
            })
            .await?;

        let mut am = member.into_active_model();
        if let Some(weight_kg) = log.weight_kg {
            am.weight_kg = ActiveValue::Set(Some(weight_kg));
        }
        if let Some(body_fat_pct) = log.body_fat_pct {
            am.body_fat_pct = ActiveValue::Set(Some(body_fat_pct));
        }
        if let Some(bmi) = log.bmi {
            am.bmi = ActiveValue::Set(Some(bmi));
        }
        MemberRepository::new(self.db).update(am).await?;

        Ok(progress_dto(log))
    }

    pub async fn list_progress(
        &self,
        gym_id: i32,
        trainer_id: Option<i32>,
        member_id: i32,
    ) -> Result<Vec<ProgressLogDto>, Error> {
        let member = self.find_member(gym_id, trainer_id, member_id).await?;
        let logs = ProgressLogRepository::new(self.db)
            .find_by_member(member.id)
            .await?;

        Ok(logs.into_iter().map(progress_dto).collect())
    }

    async fn find_member(
        &self,
        gym_id: i32,
        trainer_id: Option<i32>,
        member_id: i32,
    ) -> Result<entity::member::Model, Error> {
        MemberRepository::new(self.db)
            .get_by_id(gym_id, member_id, trainer_id)
            .await?
            .ok_or_else(|| NotFoundError::Member.into())
    }
}

#[cfg(test)]
mod tests {
    use gymedge_test_utils::prelude::*;
    use sea_orm::EntityTrait;

    use super::*;

    async fn fitness_test() -> Result<TestContext, TestError> {
        TestBuilder::new().with_all_tables().build().await
    }

    async fn member_by_id(
        test: &TestContext,
        member_id: i32,
    ) -> Result<entity::member::Model, TestError> {
        Ok(entity::prelude::Member::find_by_id(member_id)
            .one(&test.db)
            .await?
            .unwrap())
    }

    mod check_in {
        use super::*;

        /// Expect a check-in the day after the last one to extend the streak
        #[tokio::test]
        async fn extends_streak_from_yesterday() -> Result<(), TestError> {
            let mut test = fitness_test().await?;
            let gym = test.tenancy().insert_gym("Iron Paradise").await?;
            let member = test.member().insert_member(gym.id, "Asha", "9876543210").await?;
            let mut am = member.clone().into_active_model();
            am.attendance_streak = ActiveValue::Set(4);
            am.last_check_in = ActiveValue::Set(Some(now() - Duration::days(1)));
            test.member().update_member(am).await?;

            FitnessService::new(&test.db)
                .check_in(gym.id, None, member.id)
                .await
                .unwrap();

            let member = member_by_id(&test, member.id).await?;
            assert_eq!(member.attendance_streak, 5);
            assert!(member.last_check_in.is_some());

            Ok(())
        }

        /// Expect a gap of more than a day to restart the streak
        #[tokio::test]
        async fn restarts_streak_after_gap() -> Result<(), TestError> {
            let mut test = fitness_test().await?;
            let gym = test.tenancy().insert_gym("Iron Paradise").await?;
            let member = test.member().insert_member(gym.id, "Asha", "9876543210").await?;
            let mut am = member.clone().into_active_model();
            am.attendance_streak = ActiveValue::Set(9);
            am.last_check_in = ActiveValue::Set(Some(now() - Duration::days(3)));
            test.member().update_member(am).await?;

            FitnessService::new(&test.db)
                .check_in(gym.id, None, member.id)
                .await
                .unwrap();

            assert_eq!(member_by_id(&test, member.id).await?.attendance_streak, 1);

            Ok(())
        }

        /// Expect a second check-in while the first is open to conflict
        #[tokio::test]
        async fn rejects_open_attendance() -> Result<(), TestError> {
            let mut test = fitness_test().await?;
            let gym = test.tenancy().insert_gym("Iron Paradise").await?;
            let member = test.member().insert_member(gym.id, "Asha", "9876543210").await?;
            let service = FitnessService::new(&test.db);

            service.check_in(gym.id, None, member.id).await.unwrap();
            let result = service.check_in(gym.id, None, member.id).await;

            assert!(matches!(
                result,
                Err(Error::ConflictError(ConflictError::AlreadyCheckedIn))
            ));

            Ok(())
        }

        /// Expect a trainer to be unable to check in another trainer's member
        #[tokio::test]
        async fn scopes_to_trainer() -> Result<(), TestError> {
            let mut test = fitness_test().await?;
            let gym = test.tenancy().insert_gym("Iron Paradise").await?;
            let member = test.member().insert_member(gym.id, "Asha", "9876543210").await?;

            let result = FitnessService::new(&test.db)
                .check_in(gym.id, Some(999), member.id)
                .await;

            assert!(matches!(
                result,
                Err(Error::NotFoundError(NotFoundError::Member))
            ));

            Ok(())
        }

        /// Expect a database error when the tables are missing
        #[tokio::test]
        async fn fails_when_tables_missing() -> Result<(), TestError> {
            let test = TestBuilder::new().build().await?;

            let result = FitnessService::new(&test.db).check_in(1, None, 1).await;

            assert!(matches!(result, Err(Error::DbErr(_))));

            Ok(())
        }
    }

    mod check_out {
        use super::*;

        /// Expect the first check-out to close the attendance and the second to conflict
        #[tokio::test]
        async fn closes_once() -> Result<(), TestError> {
            let mut test = fitness_test().await?;
            let gym = test.tenancy().insert_gym("Iron Paradise").await?;
            let member = test.member().insert_member(gym.id, "Asha", "9876543210").await?;
            let service = FitnessService::new(&test.db);
            let attendance = service.check_in(gym.id, None, member.id).await.unwrap();

            let closed = service.check_out(gym.id, attendance.id).await.unwrap();
            let again = service.check_out(gym.id, attendance.id).await;

            assert!(closed.check_out.is_some());
            assert_eq!(closed.duration_minutes, Some(0));
            assert!(matches!(
                again,
                Err(Error::ConflictError(ConflictError::AlreadyCheckedOut))
            ));

            Ok(())
        }

        /// Expect an attendance of another gym to be not found
        #[tokio::test]
        async fn scopes_to_gym() -> Result<(), TestError> {
            let mut test = fitness_test().await?;
            let gym = test.tenancy().insert_gym("Iron Paradise").await?;
            let other = test.tenancy().insert_gym("Muscle Hub").await?;
            let member = test.member().insert_member(gym.id, "Asha", "9876543210").await?;
            let service = FitnessService::new(&test.db);
            let attendance = service.check_in(gym.id, None, member.id).await.unwrap();

            let result = service.check_out(other.id, attendance.id).await;

            assert!(matches!(
                result,
                Err(Error::NotFoundError(NotFoundError::Attendance))
            ));

            Ok(())
        }
    }

    mod log_progress {
        use super::*;

        /// Expect BMI from the member's height and the metrics copied onto the member
        #[tokio::test]
        async fn derives_bmi_and_updates_member() -> Result<(), TestError> {
            let mut test = fitness_test().await?;
            let gym = test.tenancy().insert_gym("Iron Paradise").await?;
            let member = test.member().insert_member(gym.id, "Asha", "9876543210").await?;
            let mut am = member.clone().into_active_model();
            am.height_cm = ActiveValue::Set(Some(175.0));
            test.member().update_member(am).await?;

            let log = FitnessService::new(&test.db)
                .log_progress(
                    gym.id,
                    None,
                    member.id,
                    CreateProgressLogDto {
                        weight_kg: Some(70.0),
                        body_fat_pct: Some(18.5),
                        ..Default::default()
                    },
                )
                .await
                .unwrap();

            assert_eq!(log.bmi, Some(22.9));
            assert_eq!(log.date, today());

            let member = member_by_id(&test, member.id).await?;
            assert_eq!(member.weight_kg, Some(70.0));
            assert_eq!(member.body_fat_pct, Some(18.5));
            assert_eq!(member.bmi, Some(22.9));

            Ok(())
        }

        /// Expect an explicit BMI to win over the derived one
        #[tokio::test]
        async fn keeps_given_bmi() -> Result<(), TestError> {
            let mut test = fitness_test().await?;
            let gym = test.tenancy().insert_gym("Iron Paradise").await?;
            let member = test.member().insert_member(gym.id, "Asha", "9876543210").await?;

            let log = FitnessService::new(&test.db)
                .log_progress(
                    gym.id,
                    None,
                    member.id,
                    CreateProgressLogDto {
                        weight_kg: Some(70.0),
                        bmi: Some(24.0),
                        ..Default::default()
                    },
                )
                .await
                .unwrap();

            assert_eq!(log.bmi, Some(24.0));

            Ok(())
        }
    }

    mod list_progress {
        use super::*;

        /// Expect the newest entry first
        #[tokio::test]
        async fn lists_newest_first() -> Result<(), TestError> {
            let mut test = fitness_test().await?;
            let gym = test.tenancy().insert_gym("Iron Paradise").await?;
            let member = test.member().insert_member(gym.id, "Asha", "9876543210").await?;
            let service = FitnessService::new(&test.db);
            for days_ago in [10, 0, 5] {
                service
                    .log_progress(
                        gym.id,
                        None,
                        member.id,
                        CreateProgressLogDto {
                            date: Some(today() - Duration::days(days_ago)),
                            ..Default::default()
                        },
                    )
                    .await
                    .unwrap();
            }

            let logs = service.list_progress(gym.id, None, member.id).await.unwrap();

            let dates: Vec<_> = logs.iter().map(|log| log.date).collect();
            assert_eq!(
                dates,
                vec![
                    today(),
                    today() - Duration::days(5),
                    today() - Duration::days(10)
                ]
            );

            Ok(())
        }
    }
}
