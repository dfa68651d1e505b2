//! Declarative test builder.
//!
//! Tables and mock endpoints are queued on the builder and created in one go by `build()`.

use mockito::Mock;
use sea_orm::{sea_query::TableCreateStatement, DbBackend, EntityTrait, Schema};

use crate::{error::TestError, TestContext};

/// Builder for declarative test initialization.
pub struct TestBuilder {
    tables: Vec<TableCreateStatement>,
    include_tenant_tables: bool,
    include_member_tables: bool,
    include_all_tables: bool,
    mock_builders: Vec<Box<dyn FnOnce(&mut mockito::ServerGuard) -> Mock>>,
}

impl TestBuilder {
    pub fn new() -> Self {
        Self {
            tables: Vec::new(),
            include_tenant_tables: false,
            include_member_tables: false,
            include_all_tables: false,
            mock_builders: Vec::new(),
        }
    }

    /// Add the tenancy and identity tables.
    ///
    /// Creates SubscriptionPlan, HoldingCompany, Brand, Organization, Gym, GymUser and
    /// GymUserLocation in foreign key order.
    pub fn with_tenant_tables(mut self) -> Self {
        self.include_tenant_tables = true;
        self
    }

    /// Add the tenant tables plus MembershipPlan and Member.
    pub fn with_member_tables(mut self) -> Self {
        self.include_member_tables = true;
        self
    }

    /// Add every table of the schema.
    pub fn with_all_tables(mut self) -> Self {
        self.include_all_tables = true;
        self
    }

    /// Add a single entity table to the test database.
    ///
    /// ```no_run
    /// use gymedge_test_utils::TestBuilder;
    /// use entity::prelude::*;
    ///
    /// # async fn example() -> Result<(), gymedge_test_utils::TestError> {
    /// let test = TestBuilder::new()
    ///     .with_table(OtpSession)
    ///     .with_table(ContactQuery)
    ///     .build()
    ///     .await?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn with_table<E: EntityTrait>(mut self, entity: E) -> Self {
        let schema = Schema::new(DbBackend::Sqlite);
        self.tables.push(schema.create_table_from_entity(entity));
        self
    }

    /// Add a mock endpoint with full control over the mockito server.
    ///
    /// Mocks created here are asserted by `TestContext::assert_mocks`.
    pub fn with_mock_endpoint<F>(mut self, setup: F) -> Self
    where
        F: FnOnce(&mut mockito::ServerGuard) -> Mock + 'static,
    {
        self.mock_builders.push(Box::new(setup));
        self
    }

    /// Create the queued tables and mock endpoints.
    ///
    /// # Returns
    /// - `Ok(TestContext)` - Configured test environment
    /// - `Err(TestError::DbErr)` - Database connection or table creation failed
    pub async fn build(self) -> Result<TestContext, TestError> {
        let mut context = TestContext::new().await?;

        let mut all_tables = Vec::new();

        if self.include_all_tables {
            all_tables.extend(all_table_statements());
        } else if self.include_member_tables {
            all_tables.extend(tenant_table_statements());
            all_tables.extend(member_table_statements());
        } else if self.include_tenant_tables {
            all_tables.extend(tenant_table_statements());
        }

        all_tables.extend(self.tables);
        context.with_tables(all_tables).await?;

        let mut mocks = Vec::new();
        for builder in self.mock_builders {
            mocks.push(builder(&mut context.server));
        }
        context.mocks = mocks;

        Ok(context)
    }
}

impl Default for TestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn tenant_table_statements() -> Vec<TableCreateStatement> {
    let schema = Schema::new(DbBackend::Sqlite);
    vec![
        schema.create_table_from_entity(entity::prelude::SubscriptionPlan),
        schema.create_table_from_entity(entity::prelude::HoldingCompany),
        schema.create_table_from_entity(entity::prelude::Brand),
        schema.create_table_from_entity(entity::prelude::Organization),
        schema.create_table_from_entity(entity::prelude::Gym),
        schema.create_table_from_entity(entity::prelude::GymUser),
        schema.create_table_from_entity(entity::prelude::GymUserLocation),
    ]
}

fn member_table_statements() -> Vec<TableCreateStatement> {
    let schema = Schema::new(DbBackend::Sqlite);
    vec![
        schema.create_table_from_entity(entity::prelude::MembershipPlan),
        schema.create_table_from_entity(entity::prelude::Member),
    ]
}

fn all_table_statements() -> Vec<TableCreateStatement> {
    let schema = Schema::new(DbBackend::Sqlite);
    let mut tables = tenant_table_statements();
    tables.extend(member_table_statements());
    tables.extend(vec![
        schema.create_table_from_entity(entity::prelude::OtpSession),
        schema.create_table_from_entity(entity::prelude::Lead),
        schema.create_table_from_entity(entity::prelude::WorkoutPlan),
        schema.create_table_from_entity(entity::prelude::DietPlan),
        schema.create_table_from_entity(entity::prelude::Attendance),
        schema.create_table_from_entity(entity::prelude::ProgressLog),
        schema.create_table_from_entity(entity::prelude::AiUsageLog),
        schema.create_table_from_entity(entity::prelude::WhatsappMessage),
        schema.create_table_from_entity(entity::prelude::WhatsappMessageLog),
        schema.create_table_from_entity(entity::prelude::WhatsappAutomation),
        schema.create_table_from_entity(entity::prelude::Quote),
        schema.create_table_from_entity(entity::prelude::ContactQuery),
        schema.create_table_from_entity(entity::prelude::GymSubscription),
        schema.create_table_from_entity(entity::prelude::Payment),
        schema.create_table_from_entity(entity::prelude::RoyaltyLedger),
    ]);
    tables
}
