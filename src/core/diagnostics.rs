//! Channel permission diagnostics for `/diag`.

/// The bot's effective permissions that matter for posting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct PermissionSnapshot {
    pub view_channel: bool,
    pub send_messages: bool,
    pub send_messages_in_threads: bool,
    pub embed_links: bool,
    pub attach_files: bool,
}

/// Thread state, present only when the channel is a thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThreadState {
    pub archived: bool,
    pub locked: bool,
}

/// What `/diag` knows about the channel it was run in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelDiagnostics {
    pub channel_name: Option<String>,
    pub channel_id: u64,
    pub thread: Option<ThreadState>,
    /// `None` when permissions could not be resolved (DMs, uncached guild)
    pub permissions: Option<PermissionSnapshot>,
}

const fn yes_no(value: bool) -> &'static str {
    if value { "Yes" } else { "No" }
}

impl ChannelDiagnostics {
    /// Suggested fixes, in the order an admin should try them.
    #[must_use]
    pub fn recommendations(&self) -> Vec<&'static str> {
        let mut recs = Vec::new();
        let perms = self.permissions;

        if !perms.is_some_and(|p| p.view_channel) {
            recs.push("Grant the bot View Channel in this channel.");
        }
        if !perms.is_some_and(|p| p.send_messages) {
            recs.push("Grant the bot Send Messages in this channel.");
        }
        if let Some(thread) = self.thread {
            if !perms.is_some_and(|p| p.send_messages_in_threads) {
                recs.push("Enable Send Messages in Threads for the bot role.");
            }
            if thread.archived {
                recs.push("Unarchive the thread or create a new open thread.");
            }
            if thread.locked {
                recs.push("Unlock the thread to allow posting.");
            }
        }
        recs
    }

    /// Plain-text report; the bot wraps it in a code block.
    #[must_use]
    pub fn render(&self) -> String {
        let mut details = vec![
            format!(
                "Channel: {} ({})",
                self.channel_name
                    .clone()
                    .unwrap_or_else(|| self.channel_id.to_string()),
                self.channel_id
            ),
            format!(
                "Type: {}",
                if self.thread.is_some() {
                    "Thread"
                } else {
                    "Text/Other"
                }
            ),
        ];

        if let Some(thread) = self.thread {
            details.push(format!("Thread archived: {}", thread.archived));
            details.push(format!("Thread locked: {}", thread.locked));
        }

        match self.permissions {
            Some(p) => {
                details.push(format!("View Channel: {}", yes_no(p.view_channel)));
                details.push(format!("Send Messages: {}", yes_no(p.send_messages)));
                details.push(format!(
                    "Send In Threads: {}",
                    yes_no(p.send_messages_in_threads)
                ));
                details.push(format!("Embed Links: {}", yes_no(p.embed_links)));
                details.push(format!("Attach Files: {}", yes_no(p.attach_files)));
            }
            None => details.push("Could not resolve permissions (no guild or channel).".to_string()),
        }

        let mut body = details.join("\n");
        let recs = self.recommendations();
        if !recs.is_empty() {
            body.push_str("\n\nRecommendations:\n- ");
            body.push_str(&recs.join("\n- "));
        }
        body
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_granted() -> PermissionSnapshot {
        PermissionSnapshot {
            view_channel: true,
            send_messages: true,
            send_messages_in_threads: true,
            embed_links: true,
            attach_files: true,
        }
    }

    #[test]
    fn test_healthy_text_channel_has_no_recommendations() {
        let diag = ChannelDiagnostics {
            channel_name: Some("general".to_string()),
            channel_id: 10,
            thread: None,
            permissions: Some(all_granted()),
        };
        let body = diag.render();
        assert!(body.starts_with("Channel: general (10)\nType: Text/Other"));
        assert!(body.contains("Send Messages: Yes"));
        assert!(!body.contains("Recommendations"));
    }

    #[test]
    fn test_unresolved_permissions_recommend_basics() {
        let diag = ChannelDiagnostics {
            channel_name: None,
            channel_id: 10,
            thread: None,
            permissions: None,
        };
        assert_eq!(
            diag.recommendations(),
            vec![
                "Grant the bot View Channel in this channel.",
                "Grant the bot Send Messages in this channel."
            ]
        );
        assert!(diag.render().contains("Could not resolve permissions"));
    }

    #[test]
    fn test_locked_archived_thread() {
        let diag = ChannelDiagnostics {
            channel_name: Some("help-thread".to_string()),
            channel_id: 11,
            thread: Some(ThreadState {
                archived: true,
                locked: true,
            }),
            permissions: Some(PermissionSnapshot {
                send_messages_in_threads: false,
                ..all_granted()
            }),
        };
        let body = diag.render();
        assert!(body.contains("Type: Thread"));
        assert!(body.contains("Thread archived: true"));
        assert_eq!(diag.recommendations().len(), 3);
    }
}
