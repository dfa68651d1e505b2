use chrono::Utc;
use entity::sea_orm_active_enums::{BillingCycle, PaymentStatus};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter,
    QueryOrder,
};

/// Order details of a checkout awaiting payment
pub struct PendingPayment {
    pub gym_id: i32,
    pub plan_id: i32,
    pub billing_cycle: BillingCycle,
    pub razorpay_order_id: String,
    /// Total charged in paise, GST included
    pub amount: i64,
    pub gst_amount: i64,
}

pub struct PaymentRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> PaymentRepository<'a, C> {
    /// Creates a new instance of [`PaymentRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create_pending(
        &self,
        pending: PendingPayment,
    ) -> Result<entity::payment::Model, DbErr> {
        let payment = entity::payment::ActiveModel {
            gym_id: ActiveValue::Set(pending.gym_id),
            subscription_id: ActiveValue::Set(None),
            plan_id: ActiveValue::Set(Some(pending.plan_id)),
            billing_cycle: ActiveValue::Set(Some(pending.billing_cycle)),
            razorpay_payment_id: ActiveValue::Set(None),
            razorpay_order_id: ActiveValue::Set(Some(pending.razorpay_order_id)),
            razorpay_signature: ActiveValue::Set(None),
            amount: ActiveValue::Set(pending.amount),
            gst_amount: ActiveValue::Set(pending.gst_amount),
            currency: ActiveValue::Set("INR".to_string()),
            status: ActiveValue::Set(PaymentStatus::Pending),
            payment_method: ActiveValue::Set(None),
            invoice_number: ActiveValue::Set(None),
            paid_at: ActiveValue::Set(None),
            created_at: ActiveValue::Set(Utc::now().naive_utc()),
            ..Default::default()
        };

        entity::prelude::Payment::insert(payment)
            .exec_with_returning(self.db)
            .await
    }

    /// Payment of the gym created for the Razorpay order
    pub async fn find_by_order_id(
        &self,
        gym_id: i32,
        order_id: &str,
    ) -> Result<Option<entity::payment::Model>, DbErr> {
        entity::prelude::Payment::find()
            .filter(entity::payment::Column::GymId.eq(gym_id))
            .filter(entity::payment::Column::RazorpayOrderId.eq(order_id))
            .one(self.db)
            .await
    }

    /// Payments of the gym, newest first
    pub async fn find_by_gym(&self, gym_id: i32) -> Result<Vec<entity::payment::Model>, DbErr> {
        entity::prelude::Payment::find()
            .filter(entity::payment::Column::GymId.eq(gym_id))
            .order_by_desc(entity::payment::Column::CreatedAt)
            .order_by_desc(entity::payment::Column::Id)
            .all(self.db)
            .await
    }

    pub async fn update(
        &self,
        payment: entity::payment::ActiveModel,
    ) -> Result<entity::payment::Model, DbErr> {
        payment.update(self.db).await
    }
}
