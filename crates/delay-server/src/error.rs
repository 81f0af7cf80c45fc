//! Errors that stop the server from starting or keep it from serving.

use std::net::SocketAddr;
use std::num::ParseIntError;

/// Fatal startup and serving errors. Any of these ends the process with a
/// non-zero exit status.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    /// `PORT` was set to something that is not a port number.
    #[error("invalid PORT value {value:?}: {source}")]
    InvalidPort {
        /// The rejected value
        value: String,
        /// Why it did not parse
        source: ParseIntError,
    },
    /// The listener could not be bound.
    #[error("failed to bind {addr}: {source}")]
    Bind {
        /// Address we tried to bind
        addr: SocketAddr,
        /// Underlying I/O error
        source: std::io::Error,
    },
    /// The accept loop stopped with an error.
    #[error("server error: {0}")]
    Serve(#[source] std::io::Error),
}
