mod amount;
mod errors;
mod timestamp;

pub use amount::{decimal_from_value, lenient_decimal, parse_amount};
pub use errors::AmountError;
pub use timestamp::{epoch_millis, parse_timestamp, timestamp_from_value};
