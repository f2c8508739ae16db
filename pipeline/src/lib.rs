mod config;
mod contract;
mod error;
mod launcher;
mod machine;
mod params;
mod platform;

pub use config::*;
pub use contract::*;
pub use error::*;
pub use launcher::*;
pub use machine::*;
pub use params::*;
pub use platform::*;
