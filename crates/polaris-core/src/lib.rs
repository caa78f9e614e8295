pub mod error;
pub mod geometry;
pub mod ipc;
pub mod placement;
pub mod preprocess;
pub mod script;

pub use error::IpcError;
