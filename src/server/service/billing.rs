//! SaaS subscription billing through Razorpay orders.
//!
//! A checkout creates a Razorpay order and a pending payment. The browser completes the
//! payment with Razorpay and posts the signed result back, which captures the payment and
//! starts or renews the gym's subscription.

use std::time::Duration;

use chrono::{NaiveDateTime, Utc};
use entity::sea_orm_active_enums::{BillingCycle, BillingStatus, PaymentStatus, SubscriptionStatus};
use hmac::{Hmac, Mac};
use sea_orm::{ActiveValue, DatabaseConnection, IntoActiveModel, TransactionTrait};
use serde::Deserialize;
use serde_json::json;
use sha2::Sha256;

use crate::{
    model::billing::{
        CheckoutDto, CheckoutResponseDto, PaymentDto, SubscriptionPlanDto, VerifyPaymentDto,
    },
    server::{
        config::Config,
        data::{
            billing::{
                gym_subscription::GymSubscriptionRepository,
                payment::{PaymentRepository, PendingPayment},
                subscription_plan::SubscriptionPlanRepository,
            },
            gym::GymRepository,
        },
        error::{
            conflict::ConflictError, external::ExternalError, not_found::NotFoundError,
            validation::ValidationError, Error,
        },
        util::time::{add_months, now},
    },
};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);
const CURRENCY: &str = "INR";
const GST_PERCENT: i64 = 18;

type HmacSha256 = Hmac<Sha256>;

/// GST on an amount in paise, rounded to the nearest paisa
pub fn gst_amount(amount: i64) -> i64 {
    (amount * GST_PERCENT + 50) / 100
}

/// Invoice number of a captured payment, e.g. `INV-202506-00042`
pub fn invoice_number(paid_at: NaiveDateTime, payment_id: i32) -> String {
    format!("INV-{}-{:05}", paid_at.format("%Y%m"), payment_id)
}

/// Whether `signature` is the hex HMAC-SHA256 of `"{order_id}|{payment_id}"` under `secret`.
///
/// The comparison runs in constant time.
pub fn signature_matches(secret: &str, order_id: &str, payment_id: &str, signature: &str) -> bool {
    let Ok(expected) = hex::decode(signature.trim()) else {
        return false;
    };
    let Ok(mut mac) = HmacSha256::new_from_slice(secret.as_bytes()) else {
        return false;
    };
    mac.update(format!("{}|{}", order_id, payment_id).as_bytes());

    mac.verify_slice(&expected).is_ok()
}

pub fn plan_dto(plan: entity::subscription_plan::Model) -> SubscriptionPlanDto {
    SubscriptionPlanDto {
        id: plan.id,
        name: plan.name,
        slug: plan.slug,
        price_monthly: plan.price_monthly,
        price_yearly: plan.price_yearly,
        discount_pct: plan.discount_pct,
        max_members: plan.max_members,
        max_ai_queries_per_month: plan.max_ai_queries_per_month,
        max_staff_accounts: plan.max_staff_accounts,
        max_leads: plan.max_leads,
        has_lead_management: plan.has_lead_management,
        has_ai_workout: plan.has_ai_workout,
        has_ai_diet: plan.has_ai_diet,
        has_ai_lead_scoring: plan.has_ai_lead_scoring,
        has_whatsapp_integration: plan.has_whatsapp_integration,
        has_instagram_content: plan.has_instagram_content,
        has_analytics_dashboard: plan.has_analytics_dashboard,
        has_white_label: plan.has_white_label,
        has_api_access: plan.has_api_access,
    }
}

pub fn payment_dto(payment: entity::payment::Model) -> PaymentDto {
    PaymentDto {
        id: payment.id,
        razorpay_order_id: payment.razorpay_order_id,
        razorpay_payment_id: payment.razorpay_payment_id,
        amount: payment.amount,
        gst_amount: payment.gst_amount,
        currency: payment.currency,
        status: payment.status,
        invoice_number: payment.invoice_number,
        paid_at: payment.paid_at,
        created_at: payment.created_at,
    }
}

#[derive(Deserialize)]
struct RazorpayOrder {
    id: String,
}

pub struct BillingService<'a> {
    db: &'a DatabaseConnection,
    http: &'a reqwest::Client,
    config: &'a Config,
}

impl<'a> BillingService<'a> {
    /// Creates a new instance of [`BillingService`]
    pub fn new(db: &'a DatabaseConnection, http: &'a reqwest::Client, config: &'a Config) -> Self {
        Self { db, http, config }
    }

    pub async fn list_plans(&self) -> Result<Vec<SubscriptionPlanDto>, Error> {
        let plans = SubscriptionPlanRepository::new(self.db).find_active().await?;

        Ok(plans.into_iter().map(plan_dto).collect())
    }

    fn credentials(&self) -> Result<(&'a str, &'a str), Error> {
        match (
            self.config.razorpay_key_id.as_deref(),
            self.config.razorpay_key_secret.as_deref(),
        ) {
            (Some(key_id), Some(secret)) => Ok((key_id, secret)),
            _ => Err(ExternalError::PaymentNotConfigured.into()),
        }
    }

    /// Creates a Razorpay order for the plan price plus GST and records a pending payment
    pub async fn create_checkout(
        &self,
        gym_id: i32,
        checkout: CheckoutDto,
    ) -> Result<CheckoutResponseDto, Error> {
        let (key_id, secret) = self.credentials()?;

        let plan = SubscriptionPlanRepository::new(self.db)
            .find_active_by_slug(&checkout.plan_slug)
            .await?
            .ok_or(NotFoundError::SubscriptionPlan)?;

        let amount = match checkout.billing_cycle {
            BillingCycle::Monthly => plan.price_monthly,
            BillingCycle::Yearly => plan.price_yearly,
        };
        let gst = gst_amount(amount);
        let total = amount + gst;
        let receipt = format!("gym_{}_{}", gym_id, Utc::now().timestamp_millis());

        let url = format!(
            "{}/v1/orders",
            self.config.razorpay_api_url.trim_end_matches('/')
        );
        let response = self
            .http
            .post(url)
            .basic_auth(key_id, Some(secret))
            .timeout(REQUEST_TIMEOUT)
            .json(&json!({"amount": total, "currency": CURRENCY, "receipt": receipt}))
            .send()
            .await
            .map_err(|e| ExternalError::PaymentGateway(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ExternalError::PaymentGateway(e.to_string()))?;
        if !status.is_success() {
            return Err(ExternalError::PaymentGateway(format!("HTTP {}: {}", status, body)).into());
        }
        let order: RazorpayOrder = serde_json::from_str(&body)
            .map_err(|e| ExternalError::PaymentGateway(e.to_string()))?;

        PaymentRepository::new(self.db)
            .create_pending(PendingPayment {
                gym_id,
                plan_id: plan.id,
                billing_cycle: checkout.billing_cycle,
                razorpay_order_id: order.id.clone(),
                amount: total,
                gst_amount: gst,
            })
            .await?;

        tracing::info!(gym_id = %gym_id, order_id = %order.id, "Created checkout order");

        Ok(CheckoutResponseDto {
            order_id: order.id,
            amount: total,
            currency: CURRENCY.to_string(),
            key_id: key_id.to_string(),
        })
    }

    /// Checks the Razorpay signature and activates the purchased plan.
    ///
    /// Only pending payments are verified. A bad signature marks the payment failed
    /// before returning the error.
    pub async fn verify_payment(
        &self,
        gym_id: i32,
        verification: VerifyPaymentDto,
    ) -> Result<PaymentDto, Error> {
        let (_, secret) = self.credentials()?;

        let payment = PaymentRepository::new(self.db)
            .find_by_order_id(gym_id, &verification.razorpay_order_id)
            .await?
            .ok_or(NotFoundError::Payment)?;

        if payment.status != PaymentStatus::Pending {
            return Err(ConflictError::PaymentAlreadyProcessed.into());
        }

        if !signature_matches(
            secret,
            &verification.razorpay_order_id,
            &verification.razorpay_payment_id,
            &verification.razorpay_signature,
        ) {
            tracing::warn!(gym_id = %gym_id, order_id = %verification.razorpay_order_id, "Payment signature mismatch");

            let mut am = payment.into_active_model();
            am.status = ActiveValue::Set(PaymentStatus::Failed);
            am.razorpay_payment_id = ActiveValue::Set(Some(verification.razorpay_payment_id));
            PaymentRepository::new(self.db).update(am).await?;

            return Err(ValidationError::invalid("Payment signature verification failed.").into());
        }

        let plan_id = payment.plan_id.ok_or(NotFoundError::SubscriptionPlan)?;
        let cycle = payment.billing_cycle.unwrap_or(BillingCycle::Monthly);
        let paid_at = now();
        let period_end = add_months(
            paid_at.date(),
            match cycle {
                BillingCycle::Monthly => 1,
                BillingCycle::Yearly => 12,
            },
        )
        .and_time(paid_at.time());

        let txn = self.db.begin().await?;

        let subscription_repo = GymSubscriptionRepository::new(&txn);
        let subscription = match subscription_repo.find_by_gym(gym_id).await? {
            Some(existing) => {
                let mut am = existing.into_active_model();
                am.plan_id = ActiveValue::Set(plan_id);
                am.billing_cycle = ActiveValue::Set(cycle);
                am.amount = ActiveValue::Set(payment.amount);
                am.status = ActiveValue::Set(BillingStatus::Active);
                am.current_period_start = ActiveValue::Set(paid_at);
                am.current_period_end = ActiveValue::Set(period_end);
                am.cancelled_at = ActiveValue::Set(None);
                subscription_repo.update(am).await?
            }
            None => {
                subscription_repo
                    .create(entity::gym_subscription::ActiveModel {
                        gym_id: ActiveValue::Set(gym_id),
                        plan_id: ActiveValue::Set(plan_id),
                        billing_cycle: ActiveValue::Set(cycle),
                        amount: ActiveValue::Set(payment.amount),
                        razorpay_subscription_id: ActiveValue::Set(None),
                        razorpay_customer_id: ActiveValue::Set(None),
                        status: ActiveValue::Set(BillingStatus::Active),
                        current_period_start: ActiveValue::Set(paid_at),
                        current_period_end: ActiveValue::Set(period_end),
                        cancelled_at: ActiveValue::Set(None),
                        ..Default::default()
                    })
                    .await?
            }
        };

        let payment_id = payment.id;
        let mut am = payment.into_active_model();
        am.status = ActiveValue::Set(PaymentStatus::Captured);
        am.subscription_id = ActiveValue::Set(Some(subscription.id));
        am.razorpay_payment_id = ActiveValue::Set(Some(verification.razorpay_payment_id));
        am.razorpay_signature = ActiveValue::Set(Some(verification.razorpay_signature));
        am.paid_at = ActiveValue::Set(Some(paid_at));
        am.invoice_number = ActiveValue::Set(Some(invoice_number(paid_at, payment_id)));
        let payment = PaymentRepository::new(&txn).update(am).await?;

        let gym_repo = GymRepository::new(&txn);
        let gym = gym_repo
            .get_by_id(gym_id)
            .await?
            .ok_or(NotFoundError::Gym)?;
        let mut am = gym.into_active_model();
        am.subscription_plan_id = ActiveValue::Set(Some(plan_id));
        am.subscription_status = ActiveValue::Set(SubscriptionStatus::Active);
        gym_repo.update(am).await?;

        txn.commit().await?;

        tracing::info!(gym_id = %gym_id, payment_id = %payment.id, "Payment captured");

        Ok(payment_dto(payment))
    }

    pub async fn payment_history(&self, gym_id: i32) -> Result<Vec<PaymentDto>, Error> {
        let payments = PaymentRepository::new(self.db).find_by_gym(gym_id).await?;

        Ok(payments.into_iter().map(payment_dto).collect())
    }
}
