//! Franchise hierarchy dashboards and monthly royalty ledgers.
//!
//! Royalty is charged to franchise organizations on the membership revenue of their gyms,
//! at the basis points and flat fee of the organization's brand.

use chrono::{Datelike, NaiveDate};
use entity::sea_orm_active_enums::{MemberStatus, UserRole};
use sea_orm::DatabaseConnection;

use crate::{
    model::enterprise::{
        BrandSummaryDto, HoldingDashboardDto, HoldingStatsDto, LocationDto,
        OrganizationDashboardDto, OrganizationStatsDto, RoyaltyEntryDto, RoyaltyReportDto,
        RoyaltyTermsDto,
    },
    server::{
        data::{
            enterprise::{
                brand::BrandRepository,
                holding_company::HoldingCompanyRepository,
                organization::OrganizationRepository,
                royalty_ledger::{RoyaltyFigures, RoyaltyLedgerRepository},
            },
            gym::GymRepository,
            member::MemberRepository,
        },
        error::{
            auth::AuthError, not_found::NotFoundError, validation::ValidationError, Error,
        },
        model::auth::Permission,
        util::time::{next_month_start, today},
    },
};

/// Royalty owed on `gross_revenue` in paise
pub fn calculate_royalty(gross_revenue: i64, basis_points: i32, flat_fee: i64) -> i64 {
    gross_revenue * i64::from(basis_points) / 10_000 + flat_fee
}

fn ledger_entry(entry: entity::royalty_ledger::Model) -> RoyaltyEntryDto {
    RoyaltyEntryDto {
        id: entry.id,
        month: entry.month.format("%B %Y").to_string(),
        gross_revenue: entry.gross_revenue,
        royalty_due: entry.calculated_royalty,
        is_paid: entry.is_paid,
        paid_date: entry.paid_date,
    }
}

pub struct EnterpriseService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> EnterpriseService<'a> {
    /// Creates a new instance of [`EnterpriseService`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Calculates and stores the organization's royalty for one calendar month
    pub async fn generate_ledger_for_month(
        &self,
        organization: &entity::organization::Model,
        year: i32,
        month: u32,
    ) -> Result<entity::royalty_ledger::Model, Error> {
        let start = NaiveDate::from_ymd_opt(year, month, 1)
            .ok_or_else(|| Error::ParseError(format!("invalid month {}-{}", year, month)))?;
        let end = next_month_start(start);

        let gym_ids: Vec<i32> = GymRepository::new(self.db)
            .find_by_organization_ids(&[organization.id])
            .await?
            .into_iter()
            .map(|gym| gym.id)
            .collect();
        let gross_revenue = MemberRepository::new(self.db)
            .sum_amount_paid(&gym_ids, Some(start), Some(end))
            .await?;

        let brand = match organization.brand_id {
            Some(brand_id) => BrandRepository::new(self.db).get_by_id(brand_id).await?,
            None => None,
        };
        let (basis_points, flat_fee) = brand
            .map(|brand| (brand.royalty_basis_points, brand.royalty_flat_fee))
            .unwrap_or((0, 0));

        let figures = RoyaltyFigures {
            gross_revenue,
            royalty_basis_points: basis_points,
            royalty_flat_fee: flat_fee,
            calculated_royalty: calculate_royalty(gross_revenue, basis_points, flat_fee),
        };

        Ok(RoyaltyLedgerRepository::new(self.db)
            .upsert(organization.id, start, figures)
            .await?)
    }

    /// Generates the month's ledger of every active franchise, returning how many were written
    pub async fn generate_all_ledgers(&self, year: i32, month: u32) -> Result<usize, Error> {
        let organizations = OrganizationRepository::new(self.db)
            .find_active_franchises()
            .await?;

        for organization in &organizations {
            self.generate_ledger_for_month(organization, year, month)
                .await?;
        }

        tracing::info!(
            "Generated royalty ledgers for {} organizations for {}-{:02}",
            organizations.len(),
            year,
            month
        );

        Ok(organizations.len())
    }

    pub async fn holding_dashboard(
        &self,
        user: &entity::gym_user::Model,
    ) -> Result<HoldingDashboardDto, Error> {
        let holding = match user.holding_company_id {
            Some(id) => HoldingCompanyRepository::new(self.db).get_by_id(id).await?,
            None => None,
        }
        .ok_or_else(|| ValidationError::invalid("User not linked to a Holding Company"))?;

        let brands = BrandRepository::new(self.db)
            .find_by_holding_company(holding.id)
            .await?;
        let brand_ids: Vec<i32> = brands.iter().map(|brand| brand.id).collect();
        let org_ids: Vec<i32> = OrganizationRepository::new(self.db)
            .find_by_brand_ids(&brand_ids)
            .await?
            .into_iter()
            .map(|org| org.id)
            .collect();
        let gyms = GymRepository::new(self.db)
            .find_by_organization_ids(&org_ids)
            .await?;
        let gym_ids: Vec<i32> = gyms.iter().map(|gym| gym.id).collect();

        let member_repo = MemberRepository::new(self.db);
        let stats = HoldingStatsDto {
            total_brands: brands.len() as u64,
            total_gyms: gyms.len() as u64,
            active_gyms: gyms.iter().filter(|gym| gym.is_active).count() as u64,
            total_members: member_repo.count(&gym_ids, None).await?,
            active_members: member_repo
                .count(&gym_ids, Some(MemberStatus::Active))
                .await?,
            total_revenue: member_repo.sum_amount_paid(&gym_ids, None, None).await?,
        };

        Ok(HoldingDashboardDto {
            holding_name: holding.name,
            stats,
            brands: brands
                .into_iter()
                .map(|brand| BrandSummaryDto {
                    id: brand.id,
                    name: brand.name,
                    brand_code: brand.brand_code,
                    royalty_basis_points: brand.royalty_basis_points,
                    royalty_flat_fee: brand.royalty_flat_fee,
                })
                .collect(),
        })
    }

    async fn linked_organization(
        &self,
        user: &entity::gym_user::Model,
    ) -> Result<entity::organization::Model, Error> {
        let organization = match user.organization_id {
            Some(id) => OrganizationRepository::new(self.db).get_by_id(id).await?,
            None => None,
        };

        organization
            .ok_or_else(|| ValidationError::invalid("User not linked to an Organization").into())
    }

    pub async fn organization_dashboard(
        &self,
        user: &entity::gym_user::Model,
    ) -> Result<OrganizationDashboardDto, Error> {
        let organization = self.linked_organization(user).await?;

        let brand_name = match organization.brand_id {
            Some(brand_id) => BrandRepository::new(self.db)
                .get_by_id(brand_id)
                .await?
                .map(|brand| brand.name),
            None => None,
        };

        let gyms = GymRepository::new(self.db)
            .find_by_organization_ids(&[organization.id])
            .await?;
        let gym_ids: Vec<i32> = gyms.iter().map(|gym| gym.id).collect();

        let member_repo = MemberRepository::new(self.db);
        let mut locations = Vec::with_capacity(gyms.len());
        for gym in gyms {
            locations.push(LocationDto {
                id: gym.id,
                member_count: member_repo.count(&[gym.id], None).await?,
                name: gym.name,
                city: gym.city,
            });
        }

        Ok(OrganizationDashboardDto {
            organization_name: organization.name,
            brand_name,
            stats: OrganizationStatsDto {
                total_locations: locations.len() as u64,
                total_members: member_repo.count(&gym_ids, None).await?,
                active_members: member_repo
                    .count(&gym_ids, Some(MemberStatus::Active))
                    .await?,
            },
            locations,
        })
    }

    /// Refreshes the current month's ledger and returns the organization's royalty history
    pub async fn royalty_report(
        &self,
        user: &entity::gym_user::Model,
    ) -> Result<RoyaltyReportDto, Error> {
        let organization = self.linked_organization(user).await?;

        let current = today();
        let latest = self
            .generate_ledger_for_month(&organization, current.year(), current.month())
            .await?;

        let history = RoyaltyLedgerRepository::new(self.db)
            .find_by_organization(organization.id)
            .await?;

        Ok(RoyaltyReportDto {
            organization_name: organization.name,
            terms: RoyaltyTermsDto {
                royalty_basis_points: latest.royalty_basis_points,
                royalty_flat_fee: latest.royalty_flat_fee,
            },
            history: history.into_iter().map(ledger_entry).collect(),
        })
    }

    /// Settles a ledger entry. Only superusers and admins above the ledger's brand may do so.
    pub async fn mark_ledger_paid(
        &self,
        user: &entity::gym_user::Model,
        ledger_id: i32,
        transaction_ref: Option<String>,
    ) -> Result<RoyaltyEntryDto, Error> {
        let ledger_repo = RoyaltyLedgerRepository::new(self.db);
        let entry = ledger_repo
            .get_by_id(ledger_id)
            .await?
            .ok_or(NotFoundError::RoyaltyLedger)?;

        if !user.is_superuser {
            let brand = match OrganizationRepository::new(self.db)
                .get_by_id(entry.organization_id)
                .await?
                .and_then(|org| org.brand_id)
            {
                Some(brand_id) => BrandRepository::new(self.db).get_by_id(brand_id).await?,
                None => None,
            };

            let allowed = brand.is_some_and(|brand| match user.role {
                UserRole::BrandAdmin => user.brand_id == Some(brand.id),
                UserRole::HoldingAdmin => {
                    user.holding_company_id == Some(brand.holding_company_id)
                }
                _ => false,
            });
            if !allowed {
                return Err(AuthError::PermissionDenied(Permission::BrandAdmin.message()).into());
            }
        }

        let entry = ledger_repo
            .mark_paid(entry, today(), transaction_ref)
            .await?;

        tracing::info!(ledger_id = %entry.id, user_id = %user.id, "Royalty marked paid");

        Ok(ledger_entry(entry))
    }
}

#[cfg(test)]
mod tests {
    use gymedge_test_utils::prelude::*;
    use sea_orm::{ActiveValue, IntoActiveModel};

    use super::*;
    use crate::server::util::time::month_start;

    /// Franchise organization of a 10% + ₹500 brand with one gym
    struct Franchise {
        holding: entity::holding_company::Model,
        brand: entity::brand::Model,
        organization: entity::organization::Model,
        gym: entity::gym::Model,
    }

    async fn franchise(test: &mut TestContext) -> Result<Franchise, TestError> {
        let holding = test.tenancy().insert_holding_company("HC1").await?;
        let brand = test
            .tenancy()
            .insert_brand(holding.id, "BR1", 1_000, 50_000)
            .await?;
        let organization = test
            .tenancy()
            .insert_organization(Some(brand.id), "ORG1")
            .await?;
        let gym = test
            .tenancy()
            .insert_gym_for_organization("Iron Paradise", Some(organization.id))
            .await?;

        Ok(Franchise {
            holding,
            brand,
            organization,
            gym,
        })
    }

    /// Inserts a member who paid `amount_paid` and joined on `join_date`
    async fn paying_member(
        test: &mut TestContext,
        gym_id: i32,
        phone: &str,
        amount_paid: i64,
        join_date: NaiveDate,
    ) -> Result<entity::member::Model, TestError> {
        let member = test.member().insert_member(gym_id, "Member", phone).await?;
        let mut am = member.into_active_model();
        am.amount_paid = ActiveValue::Set(amount_paid);
        am.join_date = ActiveValue::Set(join_date);

        test.member().update_member(am).await
    }

    mod calculate_royalty {
        use super::*;

        /// Expect basis points of the revenue plus the flat fee
        #[test]
        fn applies_basis_points_and_flat_fee() {
            assert_eq!(calculate_royalty(1_000_000, 1_000, 50_000), 150_000);
            assert_eq!(calculate_royalty(0, 1_000, 50_000), 50_000);
            assert_eq!(calculate_royalty(1_000_000, 0, 0), 0);
        }
    }

    mod generate_ledger_for_month {
        use super::*;

        /// Expect only members who joined within the month to count as revenue
        #[tokio::test]
        async fn sums_revenue_of_the_month() -> Result<(), TestError> {
            let mut test = TestBuilder::new().with_all_tables().build().await?;
            let franchise = franchise(&mut test).await?;
            let june = |day| NaiveDate::from_ymd_opt(2025, 6, day).unwrap();
            paying_member(&mut test, franchise.gym.id, "9000000001", 600_000, june(1)).await?;
            paying_member(&mut test, franchise.gym.id, "9000000002", 400_000, june(30)).await?;
            paying_member(
                &mut test,
                franchise.gym.id,
                "9000000003",
                900_000,
                NaiveDate::from_ymd_opt(2025, 7, 1).unwrap(),
            )
            .await?;

            let entry = EnterpriseService::new(&test.db)
                .generate_ledger_for_month(&franchise.organization, 2025, 6)
                .await
                .unwrap();

            assert_eq!(entry.month, june(1));
            assert_eq!(entry.gross_revenue, 1_000_000);
            assert_eq!(entry.calculated_royalty, 150_000);

            Ok(())
        }

        /// Expect zero terms for an organization without a brand
        #[tokio::test]
        async fn charges_nothing_without_brand() -> Result<(), TestError> {
            let mut test = TestBuilder::new().with_all_tables().build().await?;
            let organization = test.tenancy().insert_organization(None, "ORG9").await?;

            let entry = EnterpriseService::new(&test.db)
                .generate_ledger_for_month(&organization, 2025, 6)
                .await
                .unwrap();

            assert_eq!(entry.royalty_basis_points, 0);
            assert_eq!(entry.calculated_royalty, 0);

            Ok(())
        }

        /// Expect a database error when the tables are missing
        #[tokio::test]
        async fn fails_when_tables_missing() -> Result<(), TestError> {
            let mut test = TestBuilder::new().with_tenant_tables().build().await?;
            let organization = test.tenancy().insert_organization(None, "ORG9").await?;

            let result = EnterpriseService::new(&test.db)
                .generate_ledger_for_month(&organization, 2025, 6)
                .await;

            assert!(matches!(result, Err(Error::DbErr(_))));

            Ok(())
        }
    }

    mod holding_dashboard {
        use super::*;

        /// Expect brand, gym, member and revenue totals across the holding
        #[tokio::test]
        async fn aggregates_the_holding() -> Result<(), TestError> {
            let mut test = TestBuilder::new().with_all_tables().build().await?;
            let franchise = franchise(&mut test).await?;
            paying_member(&mut test, franchise.gym.id, "9000000001", 250_000, today()).await?;
            let user = test
                .user()
                .insert_enterprise_user(
                    UserRole::HoldingAdmin,
                    Some(franchise.holding.id),
                    None,
                    None,
                )
                .await?;

            let dashboard = EnterpriseService::new(&test.db)
                .holding_dashboard(&user)
                .await
                .unwrap();

            assert_eq!(dashboard.holding_name, franchise.holding.name);
            assert_eq!(
                dashboard.stats,
                HoldingStatsDto {
                    total_brands: 1,
                    total_gyms: 1,
                    active_gyms: 1,
                    total_members: 1,
                    active_members: 1,
                    total_revenue: 250_000,
                }
            );
            assert_eq!(dashboard.brands[0].brand_code, "BR1");

            Ok(())
        }

        /// Expect a user without a holding company to be rejected
        #[tokio::test]
        async fn requires_linked_holding() -> Result<(), TestError> {
            let mut test = TestBuilder::new().with_all_tables().build().await?;
            let user = test
                .user()
                .insert_enterprise_user(UserRole::HoldingAdmin, None, None, None)
                .await?;

            let result = EnterpriseService::new(&test.db).holding_dashboard(&user).await;

            assert!(matches!(
                result,
                Err(Error::ValidationError(ValidationError::Invalid(ref m)))
                    if m == "User not linked to a Holding Company"
            ));

            Ok(())
        }
    }

    mod organization_dashboard {
        use super::*;

        /// Expect every location with its member count
        #[tokio::test]
        async fn lists_locations() -> Result<(), TestError> {
            let mut test = TestBuilder::new().with_all_tables().build().await?;
            let franchise = franchise(&mut test).await?;
            let second = test
                .tenancy()
                .insert_gym_for_organization("Muscle Hub", Some(franchise.organization.id))
                .await?;
            test.member()
                .insert_member(franchise.gym.id, "Asha", "9000000001")
                .await?;
            test.member()
                .insert_member(second.id, "Ravi", "9000000002")
                .await?;
            test.member()
                .insert_member(second.id, "Meera", "9000000003")
                .await?;
            let user = test
                .user()
                .insert_enterprise_user(
                    UserRole::OrgAdmin,
                    None,
                    None,
                    Some(franchise.organization.id),
                )
                .await?;

            let dashboard = EnterpriseService::new(&test.db)
                .organization_dashboard(&user)
                .await
                .unwrap();

            assert_eq!(dashboard.brand_name.as_deref(), Some("Brand BR1"));
            assert_eq!(
                dashboard.stats,
                OrganizationStatsDto {
                    total_locations: 2,
                    total_members: 3,
                    active_members: 3,
                }
            );
            let hub = dashboard
                .locations
                .iter()
                .find(|location| location.id == second.id)
                .unwrap();
            assert_eq!(hub.member_count, 2);

            Ok(())
        }
    }

    mod royalty_report {
        use super::*;

        /// Expect the current month to be generated and labelled
        #[tokio::test]
        async fn includes_current_month() -> Result<(), TestError> {
            let mut test = TestBuilder::new().with_all_tables().build().await?;
            let franchise = franchise(&mut test).await?;
            let user = test
                .user()
                .insert_enterprise_user(
                    UserRole::OrgAdmin,
                    None,
                    None,
                    Some(franchise.organization.id),
                )
                .await?;

            let report = EnterpriseService::new(&test.db)
                .royalty_report(&user)
                .await
                .unwrap();

            assert_eq!(
                report.terms,
                RoyaltyTermsDto {
                    royalty_basis_points: 1_000,
                    royalty_flat_fee: 50_000,
                }
            );
            assert_eq!(report.history.len(), 1);
            assert_eq!(
                report.history[0].month,
                month_start(today()).format("%B %Y").to_string()
            );
            assert_eq!(report.history[0].royalty_due, 50_000);

            Ok(())
        }
    }

    mod mark_ledger_paid {
        use super::*;

        /// Expect the brand's admin to settle the entry
        #[tokio::test]
        async fn allows_brand_admin() -> Result<(), TestError> {
            let mut test = TestBuilder::new().with_all_tables().build().await?;
            let franchise = franchise(&mut test).await?;
            let admin = test
                .user()
                .insert_enterprise_user(UserRole::BrandAdmin, None, Some(franchise.brand.id), None)
                .await?;
            let service = EnterpriseService::new(&test.db);
            let entry = service
                .generate_ledger_for_month(&franchise.organization, 2025, 6)
                .await
                .unwrap();

            let paid = service
                .mark_ledger_paid(&admin, entry.id, Some("UTR123".to_string()))
                .await
                .unwrap();

            assert!(paid.is_paid);
            assert_eq!(paid.paid_date, Some(today()));

            Ok(())
        }

        /// Expect an admin of another brand to be denied
        #[tokio::test]
        async fn denies_other_brand() -> Result<(), TestError> {
            let mut test = TestBuilder::new().with_all_tables().build().await?;
            let franchise = franchise(&mut test).await?;
            let other_brand = test
                .tenancy()
                .insert_brand(franchise.holding.id, "BR2", 500, 0)
                .await?;
            let admin = test
                .user()
                .insert_enterprise_user(UserRole::BrandAdmin, None, Some(other_brand.id), None)
                .await?;
            let service = EnterpriseService::new(&test.db);
            let entry = service
                .generate_ledger_for_month(&franchise.organization, 2025, 6)
                .await
                .unwrap();

            let result = service.mark_ledger_paid(&admin, entry.id, None).await;

            assert!(matches!(
                result,
                Err(Error::AuthError(AuthError::PermissionDenied(_)))
            ));

            Ok(())
        }
    }
}
