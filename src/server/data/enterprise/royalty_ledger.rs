use chrono::{NaiveDate, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    IntoActiveModel, QueryFilter, QueryOrder,
};

/// Figures of one month's royalty calculation
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RoyaltyFigures {
    pub gross_revenue: i64,
    pub royalty_basis_points: i32,
    pub royalty_flat_fee: i64,
    pub calculated_royalty: i64,
}

pub struct RoyaltyLedgerRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> RoyaltyLedgerRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Inserts or refreshes the entry for (organization, month).
    ///
    /// Payment status of an existing entry is preserved.
    pub async fn upsert(
        &self,
        organization_id: i32,
        month: NaiveDate,
        figures: RoyaltyFigures,
    ) -> Result<entity::royalty_ledger::Model, DbErr> {
        let now = Utc::now().naive_utc();

        let existing = entity::prelude::RoyaltyLedger::find()
            .filter(entity::royalty_ledger::Column::OrganizationId.eq(organization_id))
            .filter(entity::royalty_ledger::Column::Month.eq(month))
            .one(self.db)
            .await?;

        match existing {
            Some(entry) => {
                let mut am = entry.into_active_model();
                am.gross_revenue = ActiveValue::Set(figures.gross_revenue);
                am.royalty_basis_points = ActiveValue::Set(figures.royalty_basis_points);
                am.royalty_flat_fee = ActiveValue::Set(figures.royalty_flat_fee);
                am.calculated_royalty = ActiveValue::Set(figures.calculated_royalty);
                am.updated_at = ActiveValue::Set(now);

                am.update(self.db).await
            }
            None => {
                entity::prelude::RoyaltyLedger::insert(entity::royalty_ledger::ActiveModel {
                    organization_id: ActiveValue::Set(organization_id),
                    month: ActiveValue::Set(month),
                    gross_revenue: ActiveValue::Set(figures.gross_revenue),
                    royalty_basis_points: ActiveValue::Set(figures.royalty_basis_points),
                    royalty_flat_fee: ActiveValue::Set(figures.royalty_flat_fee),
                    calculated_royalty: ActiveValue::Set(figures.calculated_royalty),
                    is_paid: ActiveValue::Set(false),
                    paid_date: ActiveValue::Set(None),
                    transaction_ref: ActiveValue::Set(None),
                    created_at: ActiveValue::Set(now),
                    updated_at: ActiveValue::Set(now),
                    ..Default::default()
                })
                .exec_with_returning(self.db)
                .await
            }
        }
    }

    pub async fn get_by_id(
        &self,
        id: i32,
    ) -> Result<Option<entity::royalty_ledger::Model>, DbErr> {
        entity::prelude::RoyaltyLedger::find_by_id(id)
            .one(self.db)
            .await
    }

    /// Entries of an organization, newest month first
    pub async fn find_by_organization(
        &self,
        organization_id: i32,
    ) -> Result<Vec<entity::royalty_ledger::Model>, DbErr> {
        entity::prelude::RoyaltyLedger::find()
            .filter(entity::royalty_ledger::Column::OrganizationId.eq(organization_id))
            .order_by_desc(entity::royalty_ledger::Column::Month)
            .all(self.db)
            .await
    }

    pub async fn mark_paid(
        &self,
        entry: entity::royalty_ledger::Model,
        paid_date: NaiveDate,
        transaction_ref: Option<String>,
    ) -> Result<entity::royalty_ledger::Model, DbErr> {
        let mut am = entry.into_active_model();
        am.is_paid = ActiveValue::Set(true);
        am.paid_date = ActiveValue::Set(Some(paid_date));
        am.transaction_ref = ActiveValue::Set(transaction_ref);
        am.updated_at = ActiveValue::Set(Utc::now().naive_utc());

        am.update(self.db).await
    }
}
