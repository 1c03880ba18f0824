//! Sender implementations.
//!
//! Each provider implements the [`Sender`](crate::Sender) trait.
//!
//! | Provider | Feature Flag | Description |
//! |----------|-------------|-------------|
//! | [`LoopsSender`] | `loops` | Loops.so transactional API |
//! | [`LocalSender`] | `local` | In-memory capture for dev/testing |
//! | [`LoggerSender`] | (none) | Logs payloads without sending |

#[cfg(feature = "loops")]
mod loops;
#[cfg(feature = "loops")]
pub use loops::LoopsSender;

#[cfg(feature = "local")]
mod local;
#[cfg(feature = "local")]
pub use local::LocalSender;

mod logger;
pub use logger::LoggerSender;
