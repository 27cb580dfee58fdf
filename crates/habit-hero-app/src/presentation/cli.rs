use clap::{Parser, Subcommand};

use crate::application::services::LogLevel;

#[derive(Debug, Parser)]
#[command(name = "habit-hero", version, about = "Earn XP and levels for your habits")]
pub struct Cli {
    /// Print machine-readable JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Sign in, then claim today's login bonus
    Login { username: String },
    /// Create an account, then claim today's login bonus
    Register { username: String },
    /// Sign out and forget the stored session
    Logout,
    /// Show the signed-in user
    Whoami,
    /// Show level, XP and everything tracked
    Status {
        /// Preview the XP these habits would earn if submitted now
        #[arg(long = "select", value_name = "ID")]
        select: Vec<String>,
    },
    /// Claim today's login bonus
    DailyBonus,
    /// Track a new habit
    AddHabit {
        name: String,
        /// XP per completion (default: 10)
        #[arg(long)]
        xp: Option<u32>,
    },
    /// Check off habits for today
    Submit {
        /// Ids of the habits completed
        #[arg(required = true)]
        ids: Vec<String>,
    },
    /// Track a new personal record
    AddRecord {
        name: String,
        value: f64,
        /// Unit label (default: reps)
        #[arg(long)]
        unit: Option<String>,
    },
    /// Match a personal record
    Tie { id: String },
    /// Beat a personal record with a higher value
    Beat { id: String, value: f64 },
    /// Add a to-do
    AddTodo { text: String },
    /// Mark a to-do done, or open again
    ToggleTodo { id: String },
    /// Run a progression calculation offline
    Calc {
        #[command(subcommand)]
        calc: CalcCommand,
    },
    /// Read or change local settings
    Config {
        #[command(subcommand)]
        config: ConfigCommand,
    },
}

#[derive(Debug, Subcommand)]
pub enum CalcCommand {
    /// Apply an XP amount: {"xp","level","habits","rawAmount","bypassMultiplier"}
    Xp {
        /// JSON request (read from stdin when omitted)
        input: Option<String>,
    },
    /// Evaluate a login: {"lastLoginDate","currentDate","currentStreak"}
    DailyBonus {
        /// JSON request (read from stdin when omitted)
        input: Option<String>,
    },
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show the log level, or persist a new one for the next run
    LogLevel { level: Option<LogLevel> },
}
