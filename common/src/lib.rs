pub mod messages;
mod upwords;

pub use upwords::*;
