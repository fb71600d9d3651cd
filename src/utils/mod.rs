//! Display helpers

pub mod format;

pub use format::{
    capitalize_first_letter, format_address, format_date, format_number,
    format_percent_change, format_token_amount, format_usd,
};
