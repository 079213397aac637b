pub mod classification;
mod order_rules;
mod resume;
mod share_class;

pub use order_rules::{OrderRules, ValidatedOrder, ValidationError};
pub use resume::PositionResume;
pub use share_class::share_class;
