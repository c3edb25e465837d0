pub use super::price_alert::Entity as PriceAlert;
pub use super::token::Entity as Token;
pub use super::token_history_day::Entity as TokenHistoryDay;
pub use super::token_history_hour::Entity as TokenHistoryHour;
pub use super::token_history_minute::Entity as TokenHistoryMinute;
pub use super::token_history_week::Entity as TokenHistoryWeek;
