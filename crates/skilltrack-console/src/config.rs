use anyhow::bail;
use clap::{Parser, Subcommand};
use std::time::Duration;

/// Service used when no base URL is configured.
pub const DEFAULT_BASE_URL: &str = "https://skilltracker-production.up.railway.app";

/// Runtime configuration for the `skilltrack` binary.
///
/// Every connection setting can come from a flag, the environment, or a
/// `.env` file in the working directory.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "skilltrack",
    version,
    about = "Administrative console for the skill-tracker REST service"
)]
pub struct CliArgs {
    /// Base URL of the skill-tracker service. A trailing `/` is dropped.
    ///
    /// Environment variable: `SKILLTRACK_BASE_URL`
    #[arg(long, env = "SKILLTRACK_BASE_URL", default_value_t = String::from(DEFAULT_BASE_URL))]
    pub base_url: String,

    /// Username for HTTP Basic authentication.
    ///
    /// Environment variable: `SKILLTRACK_USERNAME`
    #[arg(short, long, env = "SKILLTRACK_USERNAME", default_value_t = String::new())]
    pub username: String,

    /// Password for HTTP Basic authentication. Requests go out without an
    /// `Authorization` header unless both username and password are set.
    ///
    /// Environment variable: `SKILLTRACK_PASSWORD`
    #[arg(
        short,
        long,
        env = "SKILLTRACK_PASSWORD",
        default_value_t = String::new(),
        hide_env_values = true,
        hide_default_value = true
    )]
    pub password: String,

    /// Seconds between two refreshes in `watch` mode.
    ///
    /// Environment variable: `SKILLTRACK_REFRESH_SECS`
    #[arg(long, env = "SKILLTRACK_REFRESH_SECS", default_value_t = 5)]
    pub refresh_secs: u64,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Keep the skills list refreshed until Ctrl+C.
    Watch {
        #[arg(long, env = "SKILLTRACK_USER_ID")]
        user_id: String,
        /// Stop after this many periodic refreshes.
        #[arg(long)]
        ticks: Option<u32>,
    },

    #[command(flatten)]
    Action(Action),
}

/// Commands that run a single request sequence and print the result.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Check the credentials and print the caller's user id.
    Login,

    /// Create a new account. Sent without credentials.
    Register {
        #[arg(long)]
        reg_username: String,
        #[arg(long)]
        reg_password: String,
    },

    /// Show a user record.
    GetUser {
        #[arg(long, env = "SKILLTRACK_USER_ID")]
        user_id: String,
    },

    /// Change a user's name and/or password. Empty values keep the old ones.
    UpdateUser {
        #[arg(long, env = "SKILLTRACK_USER_ID")]
        user_id: String,
        #[arg(long, default_value_t = String::new())]
        new_username: String,
        #[arg(long, default_value_t = String::new())]
        new_password: String,
    },

    /// Delete a user.
    DeleteUser {
        #[arg(long, env = "SKILLTRACK_USER_ID")]
        user_id: String,
    },

    /// List a user's skills. Optionally act on one row of the list.
    Skills {
        #[arg(long, env = "SKILLTRACK_USER_ID")]
        user_id: String,
        /// Load row N (0-based) into the skill form.
        #[arg(long, conflicts_with = "delete")]
        select: Option<usize>,
        /// Delete row N (0-based).
        #[arg(long)]
        delete: Option<usize>,
    },

    /// Add a skill to a user.
    AddSkill {
        #[arg(long, env = "SKILLTRACK_USER_ID")]
        user_id: String,
        #[arg(long)]
        name: String,
        #[arg(long, default_value_t = String::new())]
        proficiency: String,
    },

    /// Update a skill. Empty values keep the old ones.
    UpdateSkill {
        #[arg(long, env = "SKILLTRACK_USER_ID")]
        user_id: String,
        #[arg(long)]
        skill_id: String,
        #[arg(long, default_value_t = String::new())]
        name: String,
        #[arg(long, default_value_t = String::new())]
        proficiency: String,
    },

    /// Delete a skill.
    DeleteSkill {
        #[arg(long, env = "SKILLTRACK_USER_ID")]
        user_id: String,
        #[arg(long)]
        skill_id: String,
    },
}

impl Action {
    /// Whether the skills table belongs in this command's output.
    #[must_use]
    pub const fn shows_skills(&self) -> bool {
        matches!(
            self,
            Self::Skills { .. }
                | Self::AddSkill { .. }
                | Self::UpdateSkill { .. }
                | Self::DeleteSkill { .. }
        )
    }
}

/// Username/password pair for HTTP Basic authentication.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    /// Returns `None` unless both the trimmed username and the password are
    /// non-empty.
    #[must_use]
    pub fn new(username: &str, password: &str) -> Option<Self> {
        let username = username.trim();
        if username.is_empty() || password.is_empty() {
            return None;
        }
        Some(Self {
            username: username.to_owned(),
            password: password.to_owned(),
        })
    }
}

impl core::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct ConsoleConfig {
    pub base_url: String,
    pub credentials: Option<Credentials>,
    pub refresh_interval: Duration,
}

impl ConsoleConfig {
    /// Builds a config for `base_url` with the default refresh interval.
    pub fn new(base_url: &str, credentials: Option<Credentials>) -> anyhow::Result<Self> {
        Ok(Self {
            base_url: normalize_base_url(base_url)?,
            credentials,
            refresh_interval: Duration::from_secs(5),
        })
    }
}

impl TryFrom<&CliArgs> for ConsoleConfig {
    type Error = anyhow::Error;

    fn try_from(args: &CliArgs) -> Result<Self, Self::Error> {
        if args.refresh_secs == 0 {
            bail!("SKILLTRACK_REFRESH_SECS must be greater than 0");
        }

        Ok(Self {
            base_url: normalize_base_url(&args.base_url)?,
            credentials: Credentials::new(&args.username, &args.password),
            refresh_interval: Duration::from_secs(args.refresh_secs),
        })
    }
}

/// Trims the input, falls back to [`DEFAULT_BASE_URL`] when empty, and drops
/// one trailing `/`.
fn normalize_base_url(raw: &str) -> anyhow::Result<String> {
    let trimmed = raw.trim();
    let value = if trimmed.is_empty() {
        DEFAULT_BASE_URL
    } else {
        trimmed
    };
    let value = value.strip_suffix('/').unwrap_or(value);

    if let Err(e) = reqwest::Url::parse(value) {
        bail!("SKILLTRACK_BASE_URL ({value}) is not a valid URL: {e}");
    }
    Ok(value.to_owned())
}
