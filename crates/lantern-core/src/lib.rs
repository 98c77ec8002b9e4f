pub mod config;
pub mod constants;
pub mod device;
pub mod error;
pub mod playback;
pub mod pointer;
pub mod reveal;
pub mod scroll;

pub use config::*;
pub use device::*;
pub use error::*;
pub use playback::*;
pub use pointer::*;
pub use reveal::*;
pub use scroll::*;
