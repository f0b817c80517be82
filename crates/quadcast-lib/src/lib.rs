//! QuadCast — LED control for HyperX QuadCast microphones via `quadcastrgb`.

pub mod color;
pub mod context;
pub mod error;
pub mod install;
pub mod locate;
pub mod platform;
pub mod probe;
pub mod process;
pub mod session;
pub mod settings;

pub use error::QuadcastError;
