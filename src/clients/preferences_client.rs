use super::store_client::{domain_client, DomainClient};
use crate::preferences_store::{Preferences, PreferencesCommand, PreferencesError, PreferencesQuery};
use tracing::instrument;

domain_client!(Preferences, PreferencesError);

impl PreferencesClient {
    #[instrument(skip(self))]
    pub async fn admin_mode(&self) -> Result<bool, PreferencesError> {
        self.read(PreferencesQuery::AdminMode).await
    }

    #[instrument(skip(self))]
    pub async fn set_admin_mode(&self, enabled: bool) -> Result<bool, PreferencesError> {
        self.apply(PreferencesCommand::SetAdminMode(enabled)).await
    }

    /// Flips admin mode and returns the new value.
    #[instrument(skip(self))]
    pub async fn toggle_admin_mode(&self) -> Result<bool, PreferencesError> {
        self.apply(PreferencesCommand::ToggleAdminMode).await
    }
}
