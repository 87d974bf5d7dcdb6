//! # `skilltrack` Console
//!
//! Runs one console command against the skill-tracker service and prints the
//! output log (newest entry first), followed by the skills table for skill
//! commands and the status line after `login`.
//!
//! ## Usage
//!
//! ```bash
//! skilltrack --base-url http://localhost:8080 -u alice -p secret login
//! skilltrack skills --user-id 507f1f77bcf86cd799439011 --select 0
//! skilltrack watch --user-id 507f1f77bcf86cd799439011
//! ```

use clap::Parser;
use skilltrack_console::{
    client::SkillTrackerClient,
    config::{Action, CliArgs, Command, ConsoleConfig},
    console::{Console, RowAction, SkillDraft, set_auto_refresh},
    error::ConsoleError,
    refresh::AutoRefresh,
    telemetry::init_tracing,
};
use std::process::ExitCode;
use tokio::signal;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    // Load from .env
    let _ = dotenvy::dotenv();
    let args = CliArgs::parse();
    let config = ConsoleConfig::try_from(&args)?;

    init_tracing();
    tracing::debug!("Starting console with config: {:#?}", config);

    let client = SkillTrackerClient::new(&config)?;
    let mut console = Console::new(client);

    let outcome = match args.command {
        Command::Watch { user_id, ticks } => {
            console.user_id = user_id;
            return watch(console, &config, ticks).await;
        }
        Command::Action(action) => {
            let show_skills = action.shows_skills();
            let outcome = run(&mut console, action).await;
            print!("{}", render(&console, show_skills));
            outcome
        }
    };

    match outcome {
        Ok(()) => Ok(ExitCode::SUCCESS),
        // Already shown in the output log.
        Err(
            ConsoleError::Http { .. } | ConsoleError::Network(_) | ConsoleError::InvalidId { .. },
        ) => Ok(ExitCode::FAILURE),
        Err(e) => Err(e.into()),
    }
}

async fn run(console: &mut Console, action: Action) -> Result<(), ConsoleError> {
    match action {
        Action::Login => console.login().await,
        Action::Register {
            reg_username,
            reg_password,
        } => console.register(&reg_username, &reg_password).await,
        Action::GetUser { user_id } => {
            console.user_id = user_id;
            console.get_user().await
        }
        Action::UpdateUser {
            user_id,
            new_username,
            new_password,
        } => {
            console.user_id = user_id;
            console.update_user(&new_username, &new_password).await
        }
        Action::DeleteUser { user_id } => {
            console.user_id = user_id;
            console.delete_user().await
        }
        Action::Skills {
            user_id,
            select,
            delete,
        } => {
            console.user_id = user_id;
            console.fetch_skills().await?;
            let Some((action, index)) = select
                .map(|i| (RowAction::Select, i))
                .or(delete.map(|i| (RowAction::Delete, i)))
            else {
                return Ok(());
            };
            let Some(row) = console.skills.get(index).cloned() else {
                console.log.push("Skill Action", format!("No skill at row {index}"));
                return Err(ConsoleError::MissingInput { field: "Skill row" });
            };
            console.skill_action(action, &row).await
        }
        Action::AddSkill {
            user_id,
            name,
            proficiency,
        } => {
            console.user_id = user_id;
            console.draft = SkillDraft {
                skill_id: String::new(),
                name,
                proficiency,
            };
            console.add_skill().await
        }
        Action::UpdateSkill {
            user_id,
            skill_id,
            name,
            proficiency,
        } => {
            console.user_id = user_id;
            console.draft = SkillDraft {
                skill_id,
                name,
                proficiency,
            };
            console.update_skill().await
        }
        Action::DeleteSkill { user_id, skill_id } => {
            console.user_id = user_id;
            console.draft.skill_id = skill_id;
            console.delete_skill().await
        }
    }
}

fn render(console: &Console, show_skills: bool) -> String {
    let mut out = String::new();
    if !console.log.is_empty() {
        out.push_str(&format!("{}\n", console.log));
    }
    if show_skills {
        out.push_str(&format!("\nSkills:\n{}\n", console.skills));
    }
    let status = console.status.to_string();
    if !status.is_empty() {
        out.push_str(&format!("\n{status}\n"));
    }
    out
}

/// Keeps the skills table refreshed until Ctrl+C or until `ticks` periodic
/// refreshes have run.
async fn watch(
    console: Console,
    config: &ConsoleConfig,
    ticks: Option<u32>,
) -> anyhow::Result<ExitCode> {
    let period = config.refresh_interval;
    let shared = console.into_shared();
    let mut refresh = AutoRefresh::new(period);

    set_auto_refresh(&shared, &mut refresh, true).await;
    println!("{}\n", shared.lock().await.skills);

    // Sample half a period after each tick so the fetch has landed.
    let start = tokio::time::Instant::now() + period + period / 2;
    let mut sample = tokio::time::interval_at(start, period);
    let mut seen = 0u32;
    loop {
        tokio::select! {
            _ = signal::ctrl_c() => {
                tracing::info!("Received Ctrl+C signal");
                break;
            }
            _ = sample.tick() => {
                seen += 1;
                let console = shared.lock().await;
                if let Some(entry) = console.log.latest() {
                    println!("{entry}\n\n{}\n", console.skills);
                }
                if ticks.is_some_and(|n| seen >= n) {
                    break;
                }
            }
        }
    }

    set_auto_refresh(&shared, &mut refresh, false).await;
    Ok(ExitCode::SUCCESS)
}
