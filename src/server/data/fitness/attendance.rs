use chrono::{NaiveDate, NaiveDateTime};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    IntoActiveModel, QueryFilter, QueryOrder,
};

use crate::server::data::day_bounds;

pub struct AttendanceRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> AttendanceRepository<'a, C> {
    /// Creates a new instance of [`AttendanceRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        gym_id: i32,
        member_id: i32,
        check_in: NaiveDateTime,
    ) -> Result<entity::attendance::Model, DbErr> {
        let attendance = entity::attendance::ActiveModel {
            gym_id: ActiveValue::Set(gym_id),
            member_id: ActiveValue::Set(member_id),
            check_in: ActiveValue::Set(check_in),
            check_out: ActiveValue::Set(None),
            duration_minutes: ActiveValue::Set(None),
            notes: ActiveValue::Set(None),
            ..Default::default()
        };

        entity::prelude::Attendance::insert(attendance)
            .exec_with_returning(self.db)
            .await
    }

    pub async fn get_by_id(
        &self,
        gym_id: i32,
        attendance_id: i32,
    ) -> Result<Option<entity::attendance::Model>, DbErr> {
        entity::prelude::Attendance::find_by_id(attendance_id)
            .filter(entity::attendance::Column::GymId.eq(gym_id))
            .one(self.db)
            .await
    }

    /// Attendance of the member checked in on `date` and not yet checked out
    pub async fn find_open_on(
        &self,
        member_id: i32,
        date: NaiveDate,
    ) -> Result<Option<entity::attendance::Model>, DbErr> {
        let (start, end) = day_bounds(date);

        entity::prelude::Attendance::find()
            .filter(entity::attendance::Column::MemberId.eq(member_id))
            .filter(entity::attendance::Column::CheckIn.gte(start))
            .filter(entity::attendance::Column::CheckIn.lt(end))
            .filter(entity::attendance::Column::CheckOut.is_null())
            .one(self.db)
            .await
    }

    /// Attendance history of a member, latest check-in first
    pub async fn find_by_member(
        &self,
        member_id: i32,
    ) -> Result<Vec<entity::attendance::Model>, DbErr> {
        entity::prelude::Attendance::find()
            .filter(entity::attendance::Column::MemberId.eq(member_id))
            .order_by_desc(entity::attendance::Column::CheckIn)
            .order_by_desc(entity::attendance::Column::Id)
            .all(self.db)
            .await
    }

    /// Closes the attendance at `check_out`, recording the whole minutes spent
    pub async fn check_out(
        &self,
        attendance: entity::attendance::Model,
        check_out: NaiveDateTime,
    ) -> Result<entity::attendance::Model, DbErr> {
        let minutes = (check_out - attendance.check_in).num_minutes().max(0);

        let mut am = attendance.into_active_model();
        am.check_out = ActiveValue::Set(Some(check_out));
        am.duration_minutes = ActiveValue::Set(Some(minutes as i32));

        am.update(self.db).await
    }
}
