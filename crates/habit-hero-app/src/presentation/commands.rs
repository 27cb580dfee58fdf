use chrono::{Local, NaiveDate};
use log::info;
use std::io::Read;

use habit_hero_domain::shared::{HabitId, RecordId, TodoId};

use crate::application::commands::{CommandHandler, LoginCommand, LogoutCommand, RegisterCommand};
use crate::application::dtos::{DailyBonusRequestDto, XpLedgerRequestDto};
use crate::application::queries::CalculatorQueryService;
use crate::presentation::cli::{CalcCommand, Command, ConfigCommand};
use crate::presentation::error::{CommandError, CommandResult};
use crate::presentation::output::{describe_beat, describe_outcome, describe_status, Output};
use crate::presentation::state::AppState;

fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn read_input(input: Option<String>) -> CommandResult<String> {
    match input {
        Some(input) => Ok(input),
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .map_err(|e| CommandError::invalid_input(format!("Failed to read stdin: {}", e)))?;
            Ok(buffer)
        }
    }
}

/// Commands that need neither the network nor a session
pub fn execute_offline(cmd: CalcCommand, out: &Output) -> CommandResult<()> {
    match cmd {
        CalcCommand::Xp { input } => {
            let request: XpLedgerRequestDto = serde_json::from_str(&read_input(input)?)?;
            let response = CalculatorQueryService::apply_xp(&request)?;
            out.emit(&response, || {
                vec![format!(
                    "+{} XP -> level {} with {} XP{}",
                    response.effective_amount,
                    response.level,
                    response.xp,
                    if response.leveled_up { " (level up!)" } else { "" }
                )]
            })
        }
        CalcCommand::DailyBonus { input } => {
            let request: DailyBonusRequestDto = serde_json::from_str(&read_input(input)?)?;
            let response = CalculatorQueryService::daily_bonus(&request)?;
            out.emit(&response, || {
                if response.show_bonus {
                    vec![format!(
                        "+{} XP bonus, streak {}",
                        response.bonus_xp, response.new_streak
                    )]
                } else {
                    vec![format!("Already claimed today, streak {}", response.new_streak)]
                }
            })
        }
    }
}

pub fn execute_config(state: &AppState, cmd: ConfigCommand, out: &Output) -> CommandResult<()> {
    let config = &state.services.config;
    match cmd {
        ConfigCommand::LogLevel { level: Some(level) } => {
            config.set_log_level(level)?;
            out.emit(&serde_json::json!({ "logLevel": level }), || {
                vec![format!(
                    "Log level set to {} (takes effect on the next run)",
                    level.as_str()
                )]
            })
        }
        ConfigCommand::LogLevel { level: None } => {
            let level = config.get_log_level();
            out.emit(&serde_json::json!({ "logLevel": level }), || {
                vec![level.as_str().to_string()]
            })
        }
    }
}

/// Sign in or register, then load the profile and claim the login bonus
async fn authenticate(
    state: &AppState,
    username: String,
    register: bool,
    out: &Output,
) -> CommandResult<()> {
    let handler = &state.command_handlers.auth;
    let user = if register {
        handler.handle(RegisterCommand { username }).await?
    } else {
        handler.handle(LoginCommand { username }).await?
    };

    let progress = &state.services.progress;
    progress.load().await?;
    let bonus = progress.claim_daily_bonus(today()).await?;

    out.emit(
        &serde_json::json!({ "user": user, "dailyBonus": bonus }),
        || {
            let mut lines = vec![format!("Welcome, {}!", user.username)];
            if !bonus.persisted {
                lines.push("warning: login streak could not be saved".to_string());
            }
            lines
        },
    )?;
    out.notice(&state.announcements.drain());
    Ok(())
}

pub async fn execute(state: &AppState, cmd: Command, out: &Output) -> CommandResult<()> {
    let progress = &state.services.progress;

    match cmd {
        Command::Login { username } => authenticate(state, username, false, out).await?,
        Command::Register { username } => authenticate(state, username, true, out).await?,
        Command::Logout => {
            state.command_handlers.logout.handle(LogoutCommand).await?;
            out.emit(&serde_json::json!({ "loggedOut": true }), || {
                vec!["Logged out".to_string()]
            })?;
        }
        Command::Whoami => {
            let user = state.queries.auth.current_user().await?;
            out.emit(&serde_json::json!({ "user": user }), || match &user {
                Some(user) => vec![user.username.clone()],
                None => vec!["Not logged in".to_string()],
            })?;
        }
        Command::Calc { calc } => execute_offline(calc, out)?,
        Command::Config { config } => execute_config(state, config, out)?,
        cmd => {
            progress.load().await?;
            execute_progress(state, cmd, out).await?;
            out.notice(&state.announcements.drain());
        }
    }

    Ok(())
}

/// Actions against the loaded profile
async fn execute_progress(state: &AppState, cmd: Command, out: &Output) -> CommandResult<()> {
    let progress = &state.services.progress;

    match cmd {
        Command::Status { select } => {
            let status = if select.is_empty() {
                progress.status().await?
            } else {
                let ids: Vec<HabitId> =
                    select.iter().map(|id| HabitId::from_string(id)).collect();
                progress.preview(&ids).await?
            };
            out.emit(&status, || describe_status(&status))
        }
        Command::DailyBonus => {
            let outcome = progress.claim_daily_bonus(today()).await?;
            let headline = if outcome.result.show_bonus {
                format!("Login streak: {} day(s)", outcome.result.new_streak)
            } else {
                "Daily bonus already claimed today".to_string()
            };
            out.emit(&outcome, || describe_outcome(&outcome, headline))
        }
        Command::AddHabit { name, xp } => {
            let outcome = progress.add_habit(name, xp).await?;
            let headline = format!(
                "Added habit [{}] {}",
                outcome.result.id(),
                outcome.result.name()
            );
            out.emit(&outcome, || describe_outcome(&outcome, headline))
        }
        Command::Submit { ids } => {
            let ids: Vec<HabitId> = ids.iter().map(|id| HabitId::from_string(id)).collect();
            let outcome = progress.submit_habits(&ids, today()).await?;
            let headline = format!("Completed {} habit(s)", outcome.result.completed.len());
            out.emit(&outcome, || describe_outcome(&outcome, headline))
        }
        Command::AddRecord { name, value, unit } => {
            let outcome = progress.add_record(name, value, unit).await?;
            let headline = format!(
                "Added record [{}] {}: {} {}",
                outcome.result.id(),
                outcome.result.name(),
                outcome.result.current(),
                outcome.result.unit()
            );
            out.emit(&outcome, || describe_outcome(&outcome, headline))
        }
        Command::Tie { id } => {
            let outcome = progress.tie_record(&RecordId::from_string(&id)).await?;
            let headline = format!(
                "Matched {}: {} {}",
                outcome.result.name(),
                outcome.result.current(),
                outcome.result.unit()
            );
            out.emit(&outcome, || describe_outcome(&outcome, headline))
        }
        Command::Beat { id, value } => {
            let outcome = progress
                .beat_record(&RecordId::from_string(&id), value)
                .await?;
            if !outcome.result.outcome.is_accepted() {
                info!("[cli] beat rejected for record {}", id);
            }
            let headline = describe_beat(outcome.result.record.name(), &outcome.result.outcome);
            out.emit(&outcome, || describe_outcome(&outcome, headline))
        }
        Command::AddTodo { text } => {
            let outcome = progress.add_todo(text).await?;
            let headline = format!(
                "Added to-do ({}) {}",
                outcome.result.id(),
                outcome.result.text()
            );
            out.emit(&outcome, || describe_outcome(&outcome, headline))
        }
        Command::ToggleTodo { id } => {
            let outcome = progress.toggle_todo(&TodoId::from_string(&id)).await?;
            let headline = if outcome.result.is_completed() {
                format!("Done: {}", outcome.result.text())
            } else {
                format!("Open again: {}", outcome.result.text())
            };
            out.emit(&outcome, || describe_outcome(&outcome, headline))
        }
        Command::Login { .. }
        | Command::Register { .. }
        | Command::Logout
        | Command::Whoami
        | Command::Calc { .. }
        | Command::Config { .. } => Err(CommandError::invalid_input(
            "Command does not act on the loaded profile",
        )),
    }
}
