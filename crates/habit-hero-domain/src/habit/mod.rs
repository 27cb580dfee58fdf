mod aggregate;
mod board;

#[cfg(test)]
mod aggregate_test;

pub use aggregate::{Habit, HabitBuilder, DEFAULT_HABIT_XP};
pub use board::{HabitBoard, HabitSubmission, SelectionSummary};
