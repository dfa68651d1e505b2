use std::{sync::Arc, time::Duration};

use sea_orm::DatabaseConnection;

use crate::server::{config::Config, error::Error};

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub config: Arc<Config>,
    /// Shared client for the LLM, WhatsApp, Twilio and Razorpay APIs
    pub http: reqwest::Client,
}

impl AppState {
    pub fn new(db: DatabaseConnection, config: Config) -> Result<Self, Error> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("gymedge/", env!("CARGO_PKG_VERSION")))
            .connect_timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            db,
            config: Arc::new(config),
            http,
        })
    }
}
