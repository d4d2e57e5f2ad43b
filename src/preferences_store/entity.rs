//! [`StoreState`] implementation for UI preferences.

use super::error::PreferencesError;
use crate::framework::StoreState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Preferences {
    pub admin_mode: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreferencesCommand {
    SetAdminMode(bool),
    ToggleAdminMode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreferencesQuery {
    AdminMode,
}

impl StoreState for Preferences {
    const NAME: &'static str = "preferences";
    type Command = PreferencesCommand;
    /// The admin-mode value after the command.
    type Outcome = bool;
    type Query = PreferencesQuery;
    type View = bool;
    type Snapshot = bool;
    type Error = PreferencesError;

    fn restore(snapshot: Option<bool>) -> Self {
        Self {
            admin_mode: snapshot.unwrap_or(false),
        }
    }

    fn snapshot(&self) -> bool {
        self.admin_mode
    }

    fn apply(&mut self, command: PreferencesCommand) -> Result<bool, PreferencesError> {
        match command {
            PreferencesCommand::SetAdminMode(value) => self.admin_mode = value,
            PreferencesCommand::ToggleAdminMode => self.admin_mode = !self.admin_mode,
        }
        Ok(self.admin_mode)
    }

    fn read(&self, query: PreferencesQuery) -> bool {
        match query {
            PreferencesQuery::AdminMode => self.admin_mode,
        }
    }

    fn size(&self) -> usize {
        1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_flips_the_flag() {
        let mut prefs = Preferences::restore(None);
        assert!(!prefs.admin_mode);
        assert_eq!(prefs.apply(PreferencesCommand::ToggleAdminMode), Ok(true));
        assert_eq!(prefs.apply(PreferencesCommand::ToggleAdminMode), Ok(false));
        assert_eq!(prefs.apply(PreferencesCommand::SetAdminMode(true)), Ok(true));
        assert!(prefs.read(PreferencesQuery::AdminMode));
    }

    #[test]
    fn snapshot_is_a_plain_boolean() {
        let prefs = Preferences::restore(Some(true));
        assert_eq!(serde_json::to_string(&prefs.snapshot()).unwrap(), "true");
    }
}
