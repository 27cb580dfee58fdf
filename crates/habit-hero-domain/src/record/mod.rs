mod aggregate;

pub use aggregate::{BeatOutcome, PersonalRecord, DEFAULT_RECORD_UNIT};
