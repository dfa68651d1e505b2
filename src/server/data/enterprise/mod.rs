//! Repositories for the franchise hierarchy: holding companies, brands, organizations and
//! their royalty ledger.

pub mod brand;
pub mod holding_company;
pub mod organization;
pub mod royalty_ledger;
