//! Console state and the command handlers that drive it.
//!
//! Each handler performs one request, records the outcome in the
//! [`OutputLog`] under its action label (or `"<label> Error"`), and returns
//! the error so callers can pick an exit status. Successful skill mutations
//! are followed by a refresh of the skills list.

use crate::client::{Payload, SkillTrackerClient};
use crate::error::{ConsoleError, Result};
use crate::model::{SkillForm, UserForm};
use crate::refresh::AutoRefresh;
use crate::render::{OutputLog, SkillRow, SkillsView, StatusLine};
use oidkit::{ObjectIdLike, normalize};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{info, instrument, warn};

/// Editable fields of the skill form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SkillDraft {
    pub skill_id: String,
    pub name: String,
    pub proficiency: String,
}

/// Per-row actions of the skills table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowAction {
    /// Copy the row into the skill form.
    Select,
    Delete,
}

#[derive(Debug)]
pub struct Console {
    client: SkillTrackerClient,
    pub user_id: String,
    pub draft: SkillDraft,
    pub log: OutputLog,
    pub status: StatusLine,
    pub skills: SkillsView,
}

pub type SharedConsole = Arc<Mutex<Console>>;

impl Console {
    #[must_use]
    pub fn new(client: SkillTrackerClient) -> Self {
        Self {
            client,
            user_id: String::new(),
            draft: SkillDraft::default(),
            log: OutputLog::new(),
            status: StatusLine::default(),
            skills: SkillsView::default(),
        }
    }

    #[must_use]
    pub fn with_user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = user_id.into();
        self
    }

    #[must_use]
    pub fn client(&self) -> &SkillTrackerClient {
        &self.client
    }

    #[must_use]
    pub fn into_shared(self) -> SharedConsole {
        Arc::new(Mutex::new(self))
    }

    fn record<T>(&mut self, label: &str, outcome: Result<T>) -> Result<T> {
        if let Err(e) = &outcome {
            warn!(action = label, "{e}");
            self.log.push(format!("{label} Error"), e.to_string());
        }
        outcome
    }

    fn require_user_id(&self) -> Result<String> {
        let id = self.user_id.trim();
        if id.is_empty() {
            return Err(ConsoleError::MissingInput { field: "User ID" });
        }
        Ok(id.to_owned())
    }

    /// Checks the credentials. On success the caller's id becomes the
    /// current user id.
    #[instrument(level = "debug", skip(self))]
    pub async fn login(&mut self) -> Result<()> {
        match self.client.login().await {
            Ok(payload) => {
                self.status.set(true, StatusLine::AUTHENTICATED);
                self.log.push_payload("Login", &payload);
                if let Some(id) = user_id_from(&payload) {
                    info!(user_id = %id, "logged in");
                    self.user_id = id;
                }
                Ok(())
            }
            Err(e) => {
                self.status.set(false, StatusLine::FAILED);
                self.record("Login", Err(e))
            }
        }
    }

    pub async fn register(&mut self, username: &str, password: &str) -> Result<()> {
        let form = UserForm::new(username, password);
        let outcome = self.client.register(&form).await;
        self.record("Register", outcome)?;
        self.log.push("Register", "Created");
        Ok(())
    }

    pub async fn get_user(&mut self) -> Result<()> {
        let id = self.require_user_id()?;
        let outcome = self.client.get_user(&id).await;
        let payload = self.record("Get User", outcome)?;
        self.log.push_payload("Get User", &payload);
        Ok(())
    }

    pub async fn update_user(&mut self, username: &str, password: &str) -> Result<()> {
        let id = self.require_user_id()?;
        let form = UserForm::new(username, password);
        let outcome = self.client.update_user(&id, &form).await;
        self.record("Update User", outcome)?;
        self.log.push("Update User", "Updated");
        Ok(())
    }

    pub async fn delete_user(&mut self) -> Result<()> {
        let id = self.require_user_id()?;
        let outcome = self.client.delete_user(&id).await;
        self.record("Delete User", outcome)?;
        self.log.push("Delete User", "Deleted");
        Ok(())
    }

    /// Reloads the skills table for the current user.
    #[instrument(level = "debug", skip(self), fields(user_id = %self.user_id))]
    pub async fn fetch_skills(&mut self) -> Result<()> {
        let id = self.require_user_id()?;
        let outcome = self.client.list_skills(&id).await;
        let payload = self.record("Fetch Skills", outcome)?;
        self.log.push_payload("Fetch Skills", &payload);
        self.skills = SkillsView::from_payload(&payload);
        Ok(())
    }

    pub async fn add_skill(&mut self) -> Result<()> {
        let id = self.require_user_id()?;
        let form = SkillForm::new(&self.draft.name, &self.draft.proficiency);
        if form.name.is_empty() {
            return Err(ConsoleError::MissingInput { field: "Skill name" });
        }
        let outcome = self.client.add_skill(&id, &form).await;
        self.record("Add Skill", outcome)?;
        self.log.push("Add Skill", "Created");
        self.refresh_after_mutation().await;
        Ok(())
    }

    pub async fn update_skill(&mut self) -> Result<()> {
        let (user_id, skill_id) = self.require_skill_target()?;
        let form = SkillForm::new(&self.draft.name, &self.draft.proficiency);
        let outcome = self.client.update_skill(&user_id, &skill_id, &form).await;
        self.record("Update Skill", outcome)?;
        self.log.push("Update Skill", "Updated");
        self.refresh_after_mutation().await;
        Ok(())
    }

    pub async fn delete_skill(&mut self) -> Result<()> {
        let (user_id, skill_id) = self.require_skill_target()?;
        self.delete_skill_by_id(&user_id, &skill_id).await
    }

    /// Runs a row action from the skills table.
    pub async fn skill_action(&mut self, action: RowAction, row: &SkillRow) -> Result<()> {
        let user_id = self.user_id.trim().to_owned();
        let skill_id = row.id.trim().to_owned();
        if user_id.is_empty() {
            self.log.push("Skill Action", "User ID required");
            return Err(ConsoleError::MissingInput { field: "User ID" });
        }
        if skill_id.is_empty() {
            self.log.push("Skill Action", "Skill ID missing");
            return Err(ConsoleError::MissingInput { field: "Skill ID" });
        }

        match action {
            RowAction::Select => {
                self.draft = SkillDraft {
                    skill_id,
                    name: row.name.clone(),
                    proficiency: row.proficiency.clone(),
                };
                self.log.push("Select Skill", "Ready to update");
                Ok(())
            }
            RowAction::Delete => self.delete_skill_by_id(&user_id, &skill_id).await,
        }
    }

    async fn delete_skill_by_id(&mut self, user_id: &str, skill_id: &str) -> Result<()> {
        let outcome = self.client.delete_skill(user_id, skill_id).await;
        self.record("Delete Skill", outcome)?;
        self.log.push("Delete Skill", "Deleted");
        self.refresh_after_mutation().await;
        Ok(())
    }

    fn require_skill_target(&self) -> Result<(String, String)> {
        let user_id = self.require_user_id()?;
        let skill_id = self.draft.skill_id.trim();
        if skill_id.is_empty() {
            return Err(ConsoleError::MissingInput { field: "Skill ID" });
        }
        Ok((user_id, skill_id.to_owned()))
    }

    // The mutation already succeeded; a failed reload is only logged.
    async fn refresh_after_mutation(&mut self) {
        if let Err(e) = self.fetch_skills().await {
            tracing::debug!("refresh after mutation failed: {e}");
        }
    }
}

/// Extracts a user id from a login answer: the body itself when it is a
/// string, otherwise its `id` field.
fn user_id_from(payload: &Payload) -> Option<String> {
    if let Some(s) = payload.as_str() {
        return Some(s.to_owned());
    }
    let id = payload.as_json()?.get("id")?;
    if matches!(ObjectIdLike::from_value(id), ObjectIdLike::Unsupported) {
        return Some(id.to_string());
    }
    Some(normalize(id)).filter(|s| !s.is_empty())
}

/// Turns periodic refresh on or off for a shared console.
///
/// Enabling always triggers one immediate fetch, even when the poller was
/// already running; the poller itself is never duplicated.
pub async fn set_auto_refresh(console: &SharedConsole, refresh: &mut AutoRefresh, enabled: bool) {
    if !enabled {
        refresh.stop().await;
        return;
    }

    let shared = Arc::clone(console);
    refresh.start(move || {
        let shared = Arc::clone(&shared);
        async move { refresh_skills(&shared).await }
    });
    refresh_skills(console).await;
}

/// Failures already land in the output log and status line.
async fn refresh_skills(console: &SharedConsole) {
    if let Err(e) = console.lock().await.fetch_skills().await {
        tracing::debug!("auto-refresh fetch failed: {e}");
    }
}
