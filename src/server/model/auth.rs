//! Authenticated staff account and role-based permission checks.

use entity::sea_orm_active_enums::UserRole;

use crate::server::error::{auth::AuthError, Error};

const DEFAULT_DENIED: &str = "You do not have permission to perform this action.";

/// Permission a handler can require of the logged in user
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Permission {
    /// Assigned to a gym
    GymStaff,
    GymOwner,
    GymOwnerOrManager,
    /// Owner, manager or trainer
    GymTrainer,
    ManageMembers,
    ManageLeads,
    UseAi,
    ViewRevenue,
    HoldingAdmin,
    /// Holding or brand admin
    BrandAdmin,
    /// Holding, brand or organization admin
    OrgAdmin,
    /// Any enterprise admin, region manager, owner or manager
    LocationManager,
}

impl Permission {
    /// Message returned with the 403 response when this permission is missing
    pub fn message(&self) -> &'static str {
        match self {
            Self::GymStaff => "You must be associated with a gym to access this resource.",
            Self::GymOwner => "Only gym owners can perform this action.",
            Self::GymOwnerOrManager => "Only gym owners or managers can perform this action.",
            Self::GymTrainer => "Only trainers can perform this action.",
            Self::ManageMembers => "You do not have permission to manage members.",
            Self::ManageLeads => "You do not have permission to manage leads.",
            Self::UseAi => "You do not have permission to use AI features.",
            Self::ViewRevenue => DEFAULT_DENIED,
            Self::HoldingAdmin | Self::BrandAdmin | Self::OrgAdmin | Self::LocationManager => {
                DEFAULT_DENIED
            }
        }
    }

    pub fn allows(&self, user: &entity::gym_user::Model) -> bool {
        let has_gym = user.gym_id.is_some();

        match self {
            Self::GymStaff => has_gym,
            Self::GymOwner => has_gym && user.role == UserRole::Owner,
            Self::GymOwnerOrManager => {
                has_gym && matches!(user.role, UserRole::Owner | UserRole::Manager)
            }
            Self::GymTrainer => {
                has_gym
                    && matches!(
                        user.role,
                        UserRole::Owner | UserRole::Manager | UserRole::Trainer
                    )
            }
            Self::ManageMembers => user.can_manage_members,
            Self::ManageLeads => user.can_manage_leads,
            Self::UseAi => user.can_use_ai,
            Self::ViewRevenue => user.can_view_revenue,
            Self::HoldingAdmin => user.role == UserRole::HoldingAdmin,
            Self::BrandAdmin => matches!(user.role, UserRole::HoldingAdmin | UserRole::BrandAdmin),
            Self::OrgAdmin => matches!(
                user.role,
                UserRole::HoldingAdmin | UserRole::BrandAdmin | UserRole::OrgAdmin
            ),
            Self::LocationManager => matches!(
                user.role,
                UserRole::HoldingAdmin
                    | UserRole::BrandAdmin
                    | UserRole::OrgAdmin
                    | UserRole::RegionManager
                    | UserRole::Owner
                    | UserRole::Manager
            ),
        }
    }
}

/// Staff account loaded from the session for the current request
#[derive(Clone, Debug)]
pub struct CurrentUser(pub entity::gym_user::Model);

impl CurrentUser {
    /// Fails with the first missing permission
    pub fn require(&self, permissions: &[Permission]) -> Result<(), Error> {
        for permission in permissions {
            if !permission.allows(&self.0) {
                return Err(AuthError::PermissionDenied(permission.message()).into());
            }
        }

        Ok(())
    }

    pub fn has(&self, permission: Permission) -> bool {
        permission.allows(&self.0)
    }

    /// The user's gym, required by every gym-scoped operation
    pub fn gym_id(&self) -> Result<i32, Error> {
        self.0
            .gym_id
            .ok_or_else(|| AuthError::PermissionDenied(Permission::GymStaff.message()).into())
    }

    /// Trainers only see the members assigned to them
    pub fn trainer_scope(&self) -> Option<i32> {
        (self.0.role == UserRole::Trainer).then_some(self.0.id)
    }

    pub fn is_enterprise(&self) -> bool {
        matches!(
            self.0.role,
            UserRole::HoldingAdmin
                | UserRole::BrandAdmin
                | UserRole::OrgAdmin
                | UserRole::RegionManager
        )
    }

    pub fn id(&self) -> i32 {
        self.0.id
    }
}
