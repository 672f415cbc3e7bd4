use std::io;
use thiserror::Error;

// Failures that stop the server from starting or serving.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: io::Error,
    },

    #[error("server error: {0}")]
    Serve(#[from] io::Error),
}

// The caller abandoned the request while an artificial delay was pending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("request cancelled during artificial delay")]
pub struct Cancelled;
