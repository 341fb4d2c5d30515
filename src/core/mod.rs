//! Core logic - framework-agnostic delivery, settings, and text rendering.
//!
//! Nothing in here depends on a live gateway connection; the bot layer adapts serenity types
//! into these plain values and back.

/// Channel permission diagnostics
pub mod diagnostics;
/// Meters, coin flips, emojify, fake hack
pub mod fun;
/// Welcome, leave, and announcement embed content
pub mod notices;
/// Avatar URL helpers
pub mod profile;
/// Chunked repeat delivery
pub mod repeat;
/// Per-guild settings repository
pub mod settings;
/// Webhook URL validation
pub mod webhook;
