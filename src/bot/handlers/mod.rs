//! Discord gateway event handlers
//!
//! Everything that reacts to gateway traffic rather than a slash command lives here:
//! presence on ready, member join and leave notices, and reaction verification.

/// Poise event hook dispatching on [`poise::serenity_prelude::FullEvent`]
pub mod events;
