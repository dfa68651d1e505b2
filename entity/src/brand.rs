use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "brand")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub holding_company_id: i32,
    pub name: String,
    #[sea_orm(unique)]
    pub brand_code: String,
    pub royalty_basis_points: i32,
    pub royalty_flat_fee: i64,
    pub is_active: bool,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::holding_company::Entity",
        from = "Column::HoldingCompanyId",
        to = "super::holding_company::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    HoldingCompany,
}

impl Related<super::holding_company::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::HoldingCompany.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
