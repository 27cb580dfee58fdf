// Domain layer - pure progression rules and the ports the outer layers implement

pub mod daily_bonus;
pub mod events;
pub mod habit;
pub mod profile;
pub mod progression;
pub mod record;
pub mod rewards;
pub mod session;
pub mod shared;
pub mod todo;

pub use events::DomainEvent;
pub use shared::{DomainError, HabitId, RecordId, TodoId};
