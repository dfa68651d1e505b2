use sea_orm::entity::prelude::*;

use super::sea_orm_active_enums::UserRole;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "gym_user")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub gym_id: Option<i32>,
    pub holding_company_id: Option<i32>,
    pub brand_id: Option<i32>,
    pub organization_id: Option<i32>,
    pub phone: String,
    pub email: Option<String>,
    #[sea_orm(unique)]
    pub username: Option<String>,
    pub name: String,
    pub role: UserRole,
    pub can_view_revenue: bool,
    pub can_manage_members: bool,
    pub can_manage_leads: bool,
    pub can_use_ai: bool,
    pub is_active: bool,
    pub is_superuser: bool,
    pub password_hash: Option<String>,
    pub last_login: Option<DateTime>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::gym::Entity",
        from = "Column::GymId",
        to = "super::gym::Column::Id",
        on_update = "NoAction",
        on_delete = "SetNull"
    )]
    Gym,
    #[sea_orm(
        belongs_to = "super::holding_company::Entity",
        from = "Column::HoldingCompanyId",
        to = "super::holding_company::Column::Id",
        on_update = "NoAction",
        on_delete = "SetNull"
    )]
    HoldingCompany,
    #[sea_orm(
        belongs_to = "super::brand::Entity",
        from = "Column::BrandId",
        to = "super::brand::Column::Id",
        on_update = "NoAction",
        on_delete = "SetNull"
    )]
    Brand,
    #[sea_orm(
        belongs_to = "super::organization::Entity",
        from = "Column::OrganizationId",
        to = "super::organization::Column::Id",
        on_update = "NoAction",
        on_delete = "SetNull"
    )]
    Organization,
}

impl Related<super::gym::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Gym.def()
    }
}

impl Related<super::holding_company::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::HoldingCompany.def()
    }
}

impl Related<super::brand::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Brand.def()
    }
}

impl Related<super::organization::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Organization.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
