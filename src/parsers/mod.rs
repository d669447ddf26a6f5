pub mod payloads;
pub mod targets;

pub use payloads::{load_payloads, parse_payloads};
pub use targets::{parse_target_line, TargetListParser};
