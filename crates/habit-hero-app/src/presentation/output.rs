use serde::Serialize;

use habit_hero_domain::record::BeatOutcome;

use crate::application::dtos::{ActionOutcomeDto, ProgressStatusDto, XpAwardDto};
use crate::presentation::error::{CommandError, CommandResult};

/// Writes command results to stdout as text or JSON
#[derive(Debug, Clone, Copy)]
pub struct Output {
    json: bool,
}

impl Output {
    pub fn new(json: bool) -> Self {
        Self { json }
    }

    pub fn is_json(&self) -> bool {
        self.json
    }

    /// Print `value` as JSON, or the lines produced by `text`
    pub fn emit<T, F>(&self, value: &T, text: F) -> CommandResult<()>
    where
        T: Serialize,
        F: FnOnce() -> Vec<String>,
    {
        if self.json {
            let rendered = serde_json::to_string_pretty(value).map_err(|e| {
                CommandError::infrastructure(format!("Failed to render JSON: {}", e))
            })?;
            println!("{}", rendered);
        } else {
            for line in text() {
                println!("{}", line);
            }
        }
        Ok(())
    }

    /// Text-mode notices; JSON output stays a single document
    pub fn notice(&self, lines: &[String]) {
        if !self.json {
            for line in lines {
                println!("{}", line);
            }
        }
    }

    /// In JSON mode failures are reported on stdout as well as stderr
    pub fn error(&self, err: &CommandError) {
        if !self.json {
            return;
        }
        if let Ok(rendered) = serde_json::to_string_pretty(&serde_json::json!({ "error": err })) {
            println!("{}", rendered);
        }
    }
}

pub fn describe_award(award: &XpAwardDto) -> String {
    let mut line = format!("+{} XP from {}", award.effective_amount, award.source);
    if award.effective_amount != award.raw_amount {
        line.push_str(&format!(" ({} x{})", award.raw_amount, award.multiplier));
    }
    line.push_str(&format!(
        ", level {} ({} XP to next level)",
        award.level, award.xp_to_next_level
    ));
    line
}

/// Award line plus a warning when the store rejected the write
pub fn describe_outcome<T: Serialize>(
    outcome: &ActionOutcomeDto<T>,
    headline: String,
) -> Vec<String> {
    let mut lines = vec![headline];
    if let Some(award) = &outcome.award {
        lines.push(describe_award(award));
    }
    if !outcome.persisted {
        lines.push("warning: progress was kept locally but could not be saved".to_string());
    }
    lines
}

pub fn describe_beat(name: &str, outcome: &BeatOutcome) -> String {
    match outcome {
        BeatOutcome::Accepted {
            previous, current, ..
        } => format!("{}: {} -> {}", name, previous, current),
        BeatOutcome::Rejected { current, candidate } => format!(
            "{}: {} does not beat the current record of {}",
            name, candidate, current
        ),
    }
}

pub fn describe_status(status: &ProgressStatusDto) -> Vec<String> {
    let mut lines = vec![
        format!(
            "Level {}: {}/{} XP ({:.0}%)",
            status.level,
            status.xp,
            status.threshold,
            status.progress * 100.0
        ),
        format!(
            "Streak multiplier x{} from {} active streak(s), daily login streak {}",
            status.multiplier, status.active_streaks, status.daily_streak
        ),
    ];

    if status.selection.count > 0 {
        lines.push(format!(
            "Selected {} habit(s): {} XP, {} XP with the multiplier",
            status.selection.count, status.selection.base_xp, status.preview_xp
        ));
    }

    if !status.habits.is_empty() {
        lines.push("Habits:".to_string());
        for habit in &status.habits {
            lines.push(format!(
                "  [{}] {} ({} XP, streak {})",
                habit.id(),
                habit.name(),
                habit.xp(),
                habit.streak()
            ));
        }
    }

    if !status.prs.is_empty() {
        lines.push("Personal records:".to_string());
        for record in &status.prs {
            lines.push(format!(
                "  [{}] {}: {} {}",
                record.id(),
                record.name(),
                record.current(),
                record.unit()
            ));
        }
    }

    if !status.todos.is_empty() {
        lines.push("To-dos:".to_string());
        for todo in &status.todos {
            let mark = if todo.is_completed() { "x" } else { " " };
            lines.push(format!("  [{}] ({}) {}", mark, todo.id(), todo.text()));
        }
    }

    lines
}
