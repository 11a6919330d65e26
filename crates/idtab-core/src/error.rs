//! # Error Types — Structured Error Hierarchy
//!
//! Defines the error types shared by the idtab crates. All errors use
//! `thiserror` for derive-based `Display` and `Error` implementations.
//!
//! ## Design
//!
//! - Payload errors carry the dotted path that failed to resolve.
//! - Address errors name the offending address.
//! - Chain errors carry the sequence numbers or signature id involved.

use thiserror::Error;

/// Top-level error type for the idtab workspace.
#[derive(Error, Debug)]
pub enum IdtabError {
    /// A signature id was malformed.
    #[error("invalid signature id {0:?}")]
    InvalidSigId(String),

    /// A timestamp could not be represented.
    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(String),

    /// Reading the signed payload failed.
    #[error("payload error: {0}")]
    Payload(#[from] PayloadError),

    /// Decoding a cryptocurrency address failed.
    #[error("address error: {0}")]
    Address(#[from] AddressError),

    /// The chain was not in canonical order.
    #[error("chain error: {0}")]
    Chain(#[from] ChainError),

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Error reading a field out of a signed payload.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PayloadError {
    /// No value exists at the path.
    #[error("no value at {path}")]
    Missing {
        /// Dotted path that was looked up.
        path: String,
    },

    /// A value exists at the path but has the wrong JSON type.
    #[error("wrong type at {path}: expected {expected}")]
    WrongType {
        /// Dotted path that was looked up.
        path: String,
        /// The JSON type that was expected.
        expected: &'static str,
    },
}

/// Error decoding a cryptocurrency address.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AddressError {
    /// The address is not valid base58.
    #[error("bad base58 in address {address}: {reason}")]
    Base58 {
        /// The address as given.
        address: String,
        /// Decoder message.
        reason: String,
    },

    /// The decoded payload has the wrong length.
    #[error("address {address} decodes to {len} bytes, expected 25")]
    BadLength {
        /// The address as given.
        address: String,
        /// Decoded length.
        len: usize,
    },

    /// The trailing checksum does not match.
    #[error("bad checksum in address {0}")]
    BadChecksum(String),

    /// The version byte is not valid for the network.
    #[error("address {address} has version {version:#04x}, not valid on {network}")]
    BadVersion {
        /// The address as given.
        address: String,
        /// Decoded version byte.
        version: u8,
        /// Network name.
        network: String,
    },
}

/// Error in the ordering of a signature chain.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChainError {
    /// Sequence numbers must strictly increase.
    #[error("seqno {next} follows {prev}; chain links must be in increasing order")]
    OutOfOrder {
        /// Sequence number of the earlier link.
        prev: u64,
        /// Sequence number of the offending link.
        next: u64,
    },

    /// A signature id occurs twice.
    #[error("duplicate signature id {0}")]
    DuplicateSigId(String),
}
