//! Container format detection.

pub mod detect;

pub use detect::ContainerFormat;
pub use detect::check_signature;
