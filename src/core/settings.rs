//! Per-guild settings - notification channels, role automation, announcements.
//!
//! Settings sit behind the [`SettingsStore`] trait so commands and event handlers never
//! touch a global map. The only implementation, [`InMemorySettings`], keeps everything in
//! process memory; a restart starts from empty.

use crate::errors::{Error, Result};
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

/// Parses a Discord snowflake typed as text (e.g. a message ID pasted into a command).
///
/// # Errors
/// Returns [`Error::InvalidId`] for anything that is not a positive integer.
pub fn parse_snowflake(input: &str) -> Result<u64> {
    match input.trim().parse::<u64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(Error::InvalidId {
            input: input.to_string(),
        }),
    }
}

/// Channels that receive member join and leave notices.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NotificationChannels {
    pub welcome_channel: Option<u64>,
    pub leave_channel: Option<u64>,
}

impl NotificationChannels {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.welcome_channel.is_none() && self.leave_channel.is_none()
    }
}

/// Reaction-role verification target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VerificationConfig {
    /// Channel holding the verification message
    pub channel_id: u64,
    /// Message members react to
    pub message_id: u64,
    /// Role granted on a matching reaction
    pub role_id: u64,
}

/// The only emoji that counts as a verification reaction.
pub const VERIFICATION_EMOJI: &str = "✅";

impl VerificationConfig {
    /// Whether a reaction on `channel_id`/`message_id` with `emoji` should grant the role.
    #[must_use]
    pub fn matches(&self, channel_id: u64, message_id: u64, emoji: &str) -> bool {
        self.channel_id == channel_id
            && self.message_id == message_id
            && emoji == VERIFICATION_EMOJI
    }
}

/// Automatic role assignment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RoleSettings {
    /// Role given to every member on join
    pub autorole: Option<u64>,
    pub verification: Option<VerificationConfig>,
}

impl RoleSettings {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.autorole.is_none() && self.verification.is_none()
    }
}

/// Everything configured for a single guild.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GuildSettings {
    pub notifications: NotificationChannels,
    pub roles: RoleSettings,
    pub announcement_channel: Option<u64>,
}

impl GuildSettings {
    /// True when nothing at all is configured.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.notifications.is_empty()
            && self.roles.is_empty()
            && self.announcement_channel.is_none()
    }
}

/// Repository of guild settings keyed by guild ID.
pub trait SettingsStore: Send + Sync {
    /// Settings for `guild_id`, if any were stored.
    fn get(&self, guild_id: u64) -> Option<GuildSettings>;

    /// Replaces the settings for `guild_id`.
    fn set(&self, guild_id: u64, settings: GuildSettings);

    /// Drops the settings for `guild_id`, returning what was stored.
    fn remove(&self, guild_id: u64) -> Option<GuildSettings>;
}

/// Read-modify-write helper. Empty results are removed rather than stored.
///
/// Returns the settings as they were before `f` ran.
pub fn update<F>(store: &dyn SettingsStore, guild_id: u64, f: F) -> GuildSettings
where
    F: FnOnce(&mut GuildSettings),
{
    let before = store.get(guild_id).unwrap_or_default();
    let mut after = before;
    f(&mut after);

    if after.is_empty() {
        store.remove(guild_id);
    } else {
        store.set(guild_id, after);
    }
    before
}

/// Process-local settings map. Lost on restart.
#[derive(Debug, Default)]
pub struct InMemorySettings {
    guilds: RwLock<HashMap<u64, GuildSettings>>,
}

impl InMemorySettings {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl SettingsStore for InMemorySettings {
    fn get(&self, guild_id: u64) -> Option<GuildSettings> {
        self.guilds
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&guild_id)
            .copied()
    }

    fn set(&self, guild_id: u64, settings: GuildSettings) {
        self.guilds
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(guild_id, settings);
    }

    fn remove(&self, guild_id: u64) -> Option<GuildSettings> {
        self.guilds
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&guild_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GUILD: u64 = 42;

    #[test]
    fn test_get_unknown_guild_is_none() {
        let store = InMemorySettings::new();
        assert!(store.get(GUILD).is_none());
    }

    #[test]
    fn test_update_merges_fields() {
        let store = InMemorySettings::new();
        update(&store, GUILD, |s| s.notifications.welcome_channel = Some(1));
        update(&store, GUILD, |s| s.notifications.leave_channel = Some(2));
        update(&store, GUILD, |s| s.announcement_channel = Some(3));

        let settings = store.get(GUILD).unwrap_or_default();
        assert_eq!(settings.notifications.welcome_channel, Some(1));
        assert_eq!(settings.notifications.leave_channel, Some(2));
        assert_eq!(settings.announcement_channel, Some(3));
    }

    #[test]
    fn test_clearing_everything_removes_entry() {
        let store = InMemorySettings::new();
        update(&store, GUILD, |s| s.roles.autorole = Some(9));
        let before = update(&store, GUILD, |s| s.roles.autorole = None);

        assert_eq!(before.roles.autorole, Some(9));
        assert!(store.get(GUILD).is_none());
    }

    #[test]
    fn test_clearing_notifications_keeps_other_settings() {
        let store = InMemorySettings::new();
        update(&store, GUILD, |s| {
            s.notifications.welcome_channel = Some(1);
            s.announcement_channel = Some(5);
        });
        update(&store, GUILD, |s| {
            s.notifications = NotificationChannels::default();
        });

        let settings = store.get(GUILD).unwrap_or_default();
        assert!(settings.notifications.is_empty());
        assert_eq!(settings.announcement_channel, Some(5));
    }

    #[test]
    fn test_parse_snowflake() {
        assert_eq!(parse_snowflake(" 1234567890123 ").ok(), Some(1_234_567_890_123));
        assert!(matches!(parse_snowflake("0"), Err(Error::InvalidId { .. })));
        assert!(matches!(parse_snowflake("abc"), Err(Error::InvalidId { .. })));
        assert!(matches!(parse_snowflake("-5"), Err(Error::InvalidId { .. })));
    }

    #[test]
    fn test_verification_match_requires_all_three() {
        let config = VerificationConfig {
            channel_id: 1,
            message_id: 2,
            role_id: 3,
        };
        assert!(config.matches(1, 2, "✅"));
        assert!(!config.matches(1, 2, "👍"));
        assert!(!config.matches(9, 2, "✅"));
        assert!(!config.matches(1, 9, "✅"));
    }
}
