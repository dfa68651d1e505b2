//! Gym tenants: creation with unique codes and slugs, and branding.

use chrono::NaiveDateTime;
use entity::sea_orm_active_enums::{GymType, SubscriptionStatus};
use sea_orm::{ActiveValue, ConnectionTrait, IntoActiveModel};

use crate::{
    model::gym::{GymDto, UpdateGymDto},
    server::{
        data::gym::GymRepository,
        error::{not_found::NotFoundError, validation::ValidationError, Error},
        util::{
            code::generate_code,
            slug::{slug_candidate, slugify},
        },
    },
};

const DEFAULT_BRAND_COLOR: &str = "#6366f1";
const DEFAULT_FONT_FAMILY: &str = "Inter";
const DEFAULT_MEMBER_CAPACITY: i32 = 100;

/// Details of a gym to create; the code and slug are generated
pub struct NewGym {
    pub name: String,
    pub owner_name: String,
    pub owner_phone: String,
    pub email: Option<String>,
    pub city: Option<String>,
    pub subscription_plan_id: Option<i32>,
    pub subscription_status: SubscriptionStatus,
    pub trial_ends_at: Option<NaiveDateTime>,
    pub organization_id: Option<i32>,
}

/// Logo ready for an `<img src>`: data URIs pass through, bare base64 is assumed PNG
pub fn logo_data_uri(gym: &entity::gym::Model) -> Option<String> {
    let logo = gym.logo.as_deref().filter(|l| !l.is_empty())?;

    if logo.starts_with("data:") {
        Some(logo.to_string())
    } else {
        Some(format!("data:image/png;base64,{}", logo))
    }
}

pub fn gym_dto(gym: entity::gym::Model) -> GymDto {
    GymDto {
        logo_data_uri: logo_data_uri(&gym),
        id: gym.id,
        name: gym.name,
        slug: gym.slug,
        gym_code: gym.gym_code,
        brand_color: gym.brand_color,
        font_family: gym.font_family,
        owner_name: gym.owner_name,
        owner_phone: gym.owner_phone,
        email: gym.email,
        address: gym.address,
        city: gym.city,
        state: gym.state,
        pincode: gym.pincode,
        gym_type: gym.gym_type,
        member_capacity: gym.member_capacity,
        subscription_plan_id: gym.subscription_plan_id,
        subscription_status: gym.subscription_status,
        trial_ends_at: gym.trial_ends_at,
        organization_id: gym.organization_id,
    }
}

pub struct GymService<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> GymService<'a, C> {
    /// Creates a new instance of [`GymService`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Creates a gym with a fresh `GYM` + 7 digit code and a unique slug of its name
    pub async fn create_gym(&self, new_gym: NewGym) -> Result<entity::gym::Model, Error> {
        let gym_repo = GymRepository::new(self.db);

        let gym_code = loop {
            let code = generate_code("GYM", 7);
            if !gym_repo.code_exists(&code).await? {
                break code;
            }
        };

        let base = slugify(&new_gym.name);
        let mut attempt = 0;
        let slug = loop {
            let candidate = slug_candidate(&base, attempt);
            if !gym_repo.slug_exists(&candidate).await? {
                break candidate;
            }
            attempt += 1;
        };

        let gym = gym_repo
            .create(entity::gym::ActiveModel {
                name: ActiveValue::Set(new_gym.name),
                slug: ActiveValue::Set(slug),
                gym_code: ActiveValue::Set(gym_code),
                brand_color: ActiveValue::Set(DEFAULT_BRAND_COLOR.to_string()),
                font_family: ActiveValue::Set(DEFAULT_FONT_FAMILY.to_string()),
                logo: ActiveValue::Set(None),
                owner_name: ActiveValue::Set(new_gym.owner_name),
                owner_phone: ActiveValue::Set(new_gym.owner_phone),
                email: ActiveValue::Set(new_gym.email),
                address: ActiveValue::Set(None),
                city: ActiveValue::Set(new_gym.city),
                state: ActiveValue::Set(None),
                pincode: ActiveValue::Set(None),
                gym_type: ActiveValue::Set(GymType::Standard),
                member_capacity: ActiveValue::Set(DEFAULT_MEMBER_CAPACITY),
                subscription_plan_id: ActiveValue::Set(new_gym.subscription_plan_id),
                subscription_status: ActiveValue::Set(new_gym.subscription_status),
                trial_ends_at: ActiveValue::Set(new_gym.trial_ends_at),
                organization_id: ActiveValue::Set(new_gym.organization_id),
                is_active: ActiveValue::Set(true),
                ..Default::default()
            })
            .await?;

        tracing::info!(gym_id = %gym.id, gym_code = %gym.gym_code, "Created gym");

        Ok(gym)
    }

    pub async fn get_gym(&self, gym_id: i32) -> Result<entity::gym::Model, Error> {
        GymRepository::new(self.db)
            .get_by_id(gym_id)
            .await?
            .ok_or_else(|| NotFoundError::Gym.into())
    }

    /// Applies branding and address changes, leaving absent fields untouched
    pub async fn update_branding(
        &self,
        gym_id: i32,
        patch: UpdateGymDto,
    ) -> Result<entity::gym::Model, Error> {
        let gym = self.get_gym(gym_id).await?;
        let mut am = gym.into_active_model();

        if let Some(name) = patch.name {
            let name = name.trim().to_string();
            if name.is_empty() {
                return Err(ValidationError::invalid("Gym name is required.").into());
            }
            am.name = ActiveValue::Set(name);
        }
        if let Some(color) = patch.brand_color {
            am.brand_color = ActiveValue::Set(color);
        }
        if let Some(font) = patch.font_family {
            am.font_family = ActiveValue::Set(font);
        }
        if let Some(logo) = patch.logo {
            am.logo = ActiveValue::Set(Some(logo).filter(|l| !l.is_empty()));
        }
        if let Some(address) = patch.address {
            am.address = ActiveValue::Set(Some(address));
        }
        if let Some(city) = patch.city {
            am.city = ActiveValue::Set(Some(city));
        }
        if let Some(state) = patch.state {
            am.state = ActiveValue::Set(Some(state));
        }
        if let Some(pincode) = patch.pincode {
            am.pincode = ActiveValue::Set(Some(pincode));
        }

        Ok(GymRepository::new(self.db).update(am).await?)
    }
}
