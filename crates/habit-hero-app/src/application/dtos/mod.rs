mod calculator_dto;
mod progress_dto;

pub use calculator_dto::{
    DailyBonusRequestDto, DailyBonusResponseDto, XpLedgerRequestDto, XpLedgerResponseDto,
};
pub use progress_dto::{
    ActionOutcomeDto, BeatRecordResultDto, ProgressStatusDto, SubmitHabitsResultDto, XpAwardDto,
};
