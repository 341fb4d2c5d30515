//! Embed content for membership and announcement notices.
//!
//! The bot layer turns a [`Notice`] into a serenity embed; keeping the text here lets it be
//! tested without a gateway connection.

/// Embed accent colours.
pub mod colours {
    /// Welcome notices
    pub const GREEN: u32 = 0x002E_CC71;
    /// Leave notices
    pub const RED: u32 = 0x00E7_4C3C;
    /// Announcements
    pub const GOLD: u32 = 0x00F1_C40F;
    /// Profile pictures
    pub const BLURPLE: u32 = 0x0058_65F2;
}

/// Framework-agnostic embed description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub title: String,
    pub description: String,
    pub colour: u32,
    pub thumbnail_url: Option<String>,
    pub footer: Option<String>,
}

/// Notice for a member who just joined. `test` marks notices sent by `/welcometest`.
#[must_use]
pub fn welcome_notice(
    member_mention: &str,
    avatar_url: String,
    member_count: Option<u64>,
    test: bool,
) -> Notice {
    let count = member_count.map_or_else(|| "?".to_string(), |count| count.to_string());
    let (title, footer) = if test {
        (
            "👋 Welcome! (Test)",
            format!("Test message • Member #{count}"),
        )
    } else {
        ("👋 Welcome!", format!("Member #{count}"))
    };

    Notice {
        title: title.to_string(),
        description: format!("{member_mention} just joined the server!"),
        colour: colours::GREEN,
        thumbnail_url: Some(avatar_url),
        footer: Some(footer),
    }
}

/// Notice for a member who left.
#[must_use]
pub fn leave_notice(member_mention: &str, avatar_url: String, test: bool) -> Notice {
    Notice {
        title: if test {
            "👋 Goodbye! (Test)".to_string()
        } else {
            "👋 Goodbye!".to_string()
        },
        description: format!("{member_mention} left the server."),
        colour: colours::RED,
        thumbnail_url: Some(avatar_url),
        footer: test.then(|| "Test message".to_string()),
    }
}

#[must_use]
pub fn announcement_notice(message: &str, author_display_name: &str) -> Notice {
    Notice {
        title: "📢 Announcement".to_string(),
        description: message.to_string(),
        colour: colours::GOLD,
        thumbnail_url: None,
        footer: Some(format!("Sent by {author_display_name}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_welcome_notice_footer_counts_members() {
        let notice = welcome_notice("<@1>", "https://cdn/a.png".to_string(), Some(12), false);
        assert_eq!(notice.title, "👋 Welcome!");
        assert_eq!(notice.description, "<@1> just joined the server!");
        assert_eq!(notice.footer.as_deref(), Some("Member #12"));
        assert_eq!(notice.colour, colours::GREEN);
    }

    #[test]
    fn test_welcome_test_notice_is_marked() {
        let notice = welcome_notice("<@1>", String::new(), None, true);
        assert_eq!(notice.title, "👋 Welcome! (Test)");
        assert_eq!(notice.footer.as_deref(), Some("Test message • Member #?"));
    }

    #[test]
    fn test_leave_notice_has_no_footer_unless_test() {
        assert!(leave_notice("<@1>", String::new(), false).footer.is_none());
        assert_eq!(
            leave_notice("<@1>", String::new(), true).footer.as_deref(),
            Some("Test message")
        );
    }

    #[test]
    fn test_announcement_footer_names_sender() {
        let notice = announcement_notice("Server maintenance at 9", "Mira");
        assert_eq!(notice.description, "Server maintenance at 9");
        assert_eq!(notice.footer.as_deref(), Some("Sent by Mira"));
        assert!(notice.thumbnail_url.is_none());
    }
}
