pub mod batch;
pub mod cli;
pub mod convert;
pub mod duration;
pub mod fonts;
pub mod label;
pub mod labeler;
pub mod logging;
pub mod numberer;
pub mod scanner;
pub mod validate;

pub use duration::{format_elapsed, format_scaled, parse_duration, ScaledTime};
