//! Display formatting for trade figures.

pub mod date;
pub mod num;

pub use date::{format_date, format_date_time};
pub use num::{
    format_currency, format_duration, format_number, format_percent, format_r_multiple,
    group_thousands,
};
