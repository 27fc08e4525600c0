//! User profile registration.

use crate::commands::validate_email;
use crate::config::Config;
use crate::hub::{HubApi, HubClient, UserProfile};
use anyhow::{Context, Result};
use tracing::info;

/// Creates or refreshes the user's profile record on the marketplace.
pub struct RegisterCommand {
    config: Config,
}

impl RegisterCommand {
    /// Creates a new register command.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub async fn execute(&self, profile: UserProfile) -> Result<String> {
        let client = HubClient::new(&self.config).context("Failed to create HTTP client")?;

        self.execute_with_client(&client, profile).await
    }

    /// Registers the profile with a provided client (for testing).
    pub async fn execute_with_client(
        &self,
        client: &impl HubApi,
        profile: UserProfile,
    ) -> Result<String> {
        let email = validate_email(&profile.email)?.to_string();
        let profile = UserProfile { email, name: profile.name.trim().to_string(), ..profile };

        client.register_user(&profile).await.context("Failed to register user")?;
        info!("Registered profile for {}", profile.email);

        Ok(format!("Registered profile for {}", profile.email))
    }
}
