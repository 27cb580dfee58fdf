mod auth_queries;
mod calculator_queries;

pub use auth_queries::AuthQueryService;
pub use calculator_queries::CalculatorQueryService;
