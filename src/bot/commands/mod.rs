//! Discord command implementations organized by category.

#![allow(clippy::too_long_first_doc_paragraph)]

/// Announcement channel and posting
pub mod announce;

/// Channel permission diagnostics
pub mod diag;

/// Meters, coin flips, fake hacks, emojify
pub mod fun;

/// General utility commands
pub mod general;

/// Profile picture lookup
pub mod profile;

/// The chunked message repeater
pub mod repeat;

/// Autorole and reaction verification
pub mod roles;

/// Webhook relay
pub mod webhook;

/// Welcome and leave notifications
pub mod welcome;

use crate::{bot::BotData, errors::Error};

// Export commands
pub use announce::*;
pub use diag::*;
pub use fun::*;
pub use general::*;
pub use profile::*;
pub use repeat::*;
pub use roles::*;
pub use webhook::*;
pub use welcome::*;

/// Every command the framework registers.
#[must_use]
pub fn all() -> Vec<poise::Command<BotData, Error>> {
    vec![
        raiz(),
        raizv2(),
        setupwelcome(),
        disablewelcome(),
        welcometest(),
        leavetest(),
        setautorole(),
        setupverification(),
        disableverification(),
        makeannc(),
        annc(),
        femboymeter(),
        gaymeter(),
        skidmeter(),
        uwumeter(),
        touch(),
        coinflip(),
        hack(),
        emojify(),
        getpfp(),
        webhooksend(),
        diag(),
        ping(),
        help(),
    ]
}
