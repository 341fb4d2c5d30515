//! Novelty commands - meters, coin flips, emoji text, and the fake hack.
//!
//! Rendering is split from rolling so the text for any percentage can be tested; the
//! `roll_*` helpers are the only places randomness enters.

use rand::Rng;

/// Discord's per-message character limit.
pub const MESSAGE_LIMIT: usize = 2000;

/// The playful percentage meters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Meter {
    Femboy,
    Gay,
    Skid,
    Uwu,
    TouchGrass,
}

impl Meter {
    /// Short name used in logs.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Femboy => "femboymeter",
            Self::Gay => "gaymeter",
            Self::Skid => "skidmeter",
            Self::Uwu => "uwumeter",
            Self::TouchGrass => "touch",
        }
    }

    /// Result text for `percentage` (1..=100) about the member behind `mention`.
    #[must_use]
    pub fn render(self, mention: &str, percentage: u8) -> String {
        match self {
            Self::Femboy if percentage > 50 => {
                format!("🎀 {mention} is **{percentage}%** femboy! They are a femboy! 💖")
            }
            Self::Femboy => format!("🎀 {mention} is **{percentage}%** femboy!"),
            Self::Gay => {
                format!("🌈 {mention} is {percentage}% on the gay‑o‑meter — just for fun!")
            }
            Self::Skid => format!("💩 {mention} is **{percentage}%** a skid not sigma!"),
            Self::Uwu => {
                let vibe = match percentage {
                    0..30 => "Barely any UwU energy... kinda sus ngl 😐",
                    30..60 => "Moderate UwU vibes detected owo",
                    60..90 => "HIGH UwU LEVELS!! They're dangerously cute!! >w<",
                    _ => "🚨 MAXIMUM UwU OVERLOAD!! OwO 🚨",
                };
                format!("💕 {mention} is **{percentage}%** UwU!\n{vibe}")
            }
            Self::TouchGrass => {
                let verdict = match percentage {
                    0..20 => format!(
                        "{mention} is SEVERELY grass-deficient!! 🚨\n**Prescription:** Go outside IMMEDIATELY!"
                    ),
                    20..50 => {
                        format!("{mention} needs to touch grass soon... ⚠️\nIt's been a while, hasn't it?")
                    }
                    50..80 => format!("{mention} touches grass occasionally. Acceptable. ✅"),
                    _ => format!(
                        "{mention} is a certified grass-toucher!! 🌿\nTeach us your ways, master!"
                    ),
                };
                format!("🌱 **Touch Grass Meter: {percentage}%**\n{verdict}")
            }
        }
    }
}

/// A percentage in 1..=100.
#[must_use]
pub fn roll_percentage() -> u8 {
    rand::thread_rng().gen_range(1..=100)
}

/// Side a coin landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoinSide {
    Heads,
    Tails,
}

impl CoinSide {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Heads => "Heads",
            Self::Tails => "Tails",
        }
    }

    #[must_use]
    pub fn render(self) -> String {
        format!("🪙 The coin landed on: **{}**!", self.label())
    }
}

#[must_use]
pub fn flip_coin() -> CoinSide {
    if rand::thread_rng().gen_bool(0.5) {
        CoinSide::Heads
    } else {
        CoinSide::Tails
    }
}

fn emoji_for(c: char) -> Option<&'static str> {
    let emoji = match c.to_ascii_lowercase() {
        'a' => "🅰️",
        'b' => "🅱️",
        'c' => "🅲",
        'd' => "🅳",
        'e' => "🅴",
        'f' => "🅵",
        'g' => "🅶",
        'h' => "🅷",
        'i' => "🅸",
        'j' => "🅹",
        'k' => "🅺",
        'l' => "🅻",
        'm' => "🅼",
        'n' => "🅽",
        'o' => "🅾️",
        'p' => "🅿️",
        'q' => "🆀",
        'r' => "🆁",
        's' => "🆂",
        't' => "🆃",
        'u' => "🆄",
        'v' => "🆅",
        'w' => "🆆",
        'x' => "🆇",
        'y' => "🆈",
        'z' => "🆉",
        '0' => "0️⃣",
        '1' => "1️⃣",
        '2' => "2️⃣",
        '3' => "3️⃣",
        '4' => "4️⃣",
        '5' => "5️⃣",
        '6' => "6️⃣",
        '7' => "7️⃣",
        '8' => "8️⃣",
        '9' => "9️⃣",
        '!' => "❗",
        '?' => "❓",
        ' ' => "  ",
        _ => return None,
    };
    Some(emoji)
}

/// Swaps letters, digits, `!`, `?` and spaces for emoji; clips to [`MESSAGE_LIMIT`].
#[must_use]
pub fn emojify(text: &str) -> String {
    let mut result = String::with_capacity(text.len() * 4);
    for c in text.chars() {
        match emoji_for(c) {
            Some(emoji) => result.push_str(emoji),
            None => result.push(c),
        }
    }

    if result.chars().count() > MESSAGE_LIMIT {
        let mut clipped: String = result.chars().take(MESSAGE_LIMIT - 3).collect();
        clipped.push_str("...");
        clipped
    } else {
        result
    }
}

/// Opening line of `/hack`.
#[must_use]
pub fn hack_intro(target_mention: &str) -> String {
    format!("🔓 Initiating hack on {target_mention}...")
}

/// Successive edits of the fake hack, in order.
#[must_use]
pub fn hack_stages(target_mention: &str, target_username: &str) -> Vec<String> {
    let mut stages: Vec<String> = [
        "⚙️ Bypassing Discord firewall...",
        "📡 Connecting to mainframe...",
        "💾 Downloading data... 10%",
        "💾 Downloading data... 45%",
        "💾 Downloading data... 78%",
        "💾 Downloading data... 100%",
    ]
    .iter()
    .map(ToString::to_string)
    .collect();

    stages.push(format!(
        "✅ Successfully hacked {target_mention}!\n\n**Stolen Data:**\n\
         🔑 Password: `ilovemom123`\n\
         📧 Email: `{target_username}@totallyrealmail.com`\n\
         💳 Credit Card: `6767 6767 6767 6767`\n\
         📍 IP Address: `127.0.0.1`\n\
         ⚠️ Browser History: *[REDACTED - too embarrassing]*"
    ));
    stages
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_femboy_threshold() {
        assert!(Meter::Femboy.render("<@1>", 51).contains("They are a femboy!"));
        assert!(!Meter::Femboy.render("<@1>", 50).contains("They are a femboy!"));
    }

    #[test]
    fn test_uwu_tiers() {
        assert!(Meter::Uwu.render("x", 29).contains("Barely any"));
        assert!(Meter::Uwu.render("x", 30).contains("Moderate"));
        assert!(Meter::Uwu.render("x", 89).contains("HIGH UwU"));
        assert!(Meter::Uwu.render("x", 90).contains("MAXIMUM"));
    }

    #[test]
    fn test_touch_grass_tiers() {
        assert!(Meter::TouchGrass.render("x", 19).contains("SEVERELY"));
        assert!(Meter::TouchGrass.render("x", 20).contains("soon"));
        assert!(Meter::TouchGrass.render("x", 79).contains("occasionally"));
        assert!(Meter::TouchGrass.render("x", 100).starts_with("🌱 **Touch Grass Meter: 100%**"));
    }

    #[test]
    fn test_roll_percentage_in_range() {
        for _ in 0..500 {
            assert!((1..=100).contains(&roll_percentage()));
        }
    }

    #[test]
    fn test_coin_render() {
        assert_eq!(CoinSide::Heads.render(), "🪙 The coin landed on: **Heads**!");
        assert!(matches!(flip_coin(), CoinSide::Heads | CoinSide::Tails));
    }

    #[test]
    fn test_emojify_maps_and_passes_through() {
        assert_eq!(emojify("Hi!"), "🅷🅸❗");
        assert_eq!(emojify("a b"), "🅰️  🅱️");
        assert_eq!(emojify("é#"), "é#");
    }

    #[test]
    fn test_emojify_clips_long_output() {
        let result = emojify(&"c".repeat(2500));
        assert_eq!(result.chars().count(), MESSAGE_LIMIT);
        assert!(result.ends_with("..."));
    }

    #[test]
    fn test_hack_ends_with_stolen_data() {
        let stages = hack_stages("<@7>", "sam");
        assert_eq!(stages.len(), 7);
        assert!(stages[6].contains("sam@totallyrealmail.com"));
        assert!(stages[6].starts_with("✅ Successfully hacked <@7>!"));
    }
}
