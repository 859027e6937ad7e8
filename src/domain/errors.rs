// Domain-level errors for engine and transport boundaries.

use std::fmt;

/// Block lookup failed for a single coordinate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    /// The chunk holding the block is not loaded.
    Unloaded,
    /// Any other engine-side failure.
    Engine(String),
}

impl fmt::Display for LookupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LookupError::Unloaded => write!(f, "block is in an unloaded chunk"),
            LookupError::Engine(message) => write!(f, "block lookup failed: {message}"),
        }
    }
}

impl std::error::Error for LookupError {}

/// An actuation against an actor could not be applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorldError {
    /// The referenced actor is no longer part of the world.
    ActorGone(String),
    Engine(String),
}

impl fmt::Display for WorldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorldError::ActorGone(id) => write!(f, "actor {id} is gone"),
            WorldError::Engine(message) => write!(f, "engine error: {message}"),
        }
    }
}

impl std::error::Error for WorldError {}

/// Outbound request failed before a usable reply was obtained.
#[derive(Debug)]
pub enum TransportError {
    /// Connection refused, timeout and similar.
    Transport(String),
    /// The service answered with a non-success status.
    Upstream { status: u16 },
    /// The reply body could not be decoded.
    Decode(String),
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportError::Transport(message) => write!(f, "transport error: {message}"),
            TransportError::Upstream { status } => write!(f, "upstream error {status}"),
            TransportError::Decode(message) => write!(f, "response decode error: {message}"),
        }
    }
}

impl std::error::Error for TransportError {}
