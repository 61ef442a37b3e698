//! # Error Types
//!
//! Defines error types used across modules.

use thiserror::Error;

/// Errors raised by a key-value store backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KVStoreError {
    /// I/O error during read/write.
    #[error("KV store I/O error: {message}")]
    IOError { message: String },

    /// Data corruption in the store.
    #[error("KV store corruption: {message}")]
    CorruptionError { message: String },

    /// The backend lock was poisoned by a panicking writer.
    #[error("KV store lock poisoned")]
    LockPoisoned,
}

/// Errors related to permission names and bitmasks.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PermissionError {
    /// The name does not match any known permission.
    #[error("Unknown permission: {0}")]
    UnknownPermission(String),

    /// The value is not exactly one defined flag (or `NOTHING` / `EVERYTHING`).
    #[error("Permission value {bits:#b} has no single name")]
    NoSingleName { bits: u32 },

    /// The name has already been registered.
    #[error("Permission already registered: {0}")]
    AlreadyRegistered(String),

    /// Permission names must be non-empty.
    #[error("Permission name cannot be empty")]
    EmptyName,
}

/// Errors raised when parsing an account address.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddressError {
    #[error("Address cannot be empty")]
    Empty,

    #[error("Address must be lowercase: {0}")]
    MixedCase(String),

    #[error("Address has no human readable part: {0}")]
    MissingPrefix(String),

    #[error("Address data part is invalid: {0}")]
    InvalidData(String),
}
