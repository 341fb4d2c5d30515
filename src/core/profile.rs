//! Avatar URL helpers for `/getpfp`.

/// Sizes the CDN serves that `/getpfp` offers.
pub const ALLOWED_SIZES: [u32; 5] = [128, 256, 512, 1024, 2048];
/// Used when no size, or an unsupported one, is requested.
pub const DEFAULT_SIZE: u32 = 1024;
/// Largest size, always offered as an extra button.
pub const MAX_SIZE: u32 = 2048;

/// Falls back to [`DEFAULT_SIZE`] for anything not in [`ALLOWED_SIZES`].
#[must_use]
pub fn normalize_size(requested: Option<u32>) -> u32 {
    requested
        .filter(|size| ALLOWED_SIZES.contains(size))
        .unwrap_or(DEFAULT_SIZE)
}

fn strip_query(url: &str) -> &str {
    url.split_once('?').map_or(url, |(base, _)| base)
}

/// `url` with its `size` query replaced.
#[must_use]
pub fn with_size(url: &str, size: u32) -> String {
    format!("{}?size={size}", strip_query(url))
}

/// `url` pointing at the GIF rendition, at `size`.
#[must_use]
pub fn gif_with_size(url: &str, size: u32) -> String {
    let base = strip_query(url);
    let stem = match base.rsplit_once('.') {
        Some((stem, extension)) if !extension.contains('/') => stem,
        _ => base,
    };
    format!("{stem}.gif?size={size}")
}

/// Link buttons for an avatar: sized, max, optional GIF, and the untouched original.
#[must_use]
pub fn avatar_links(face_url: &str, size: u32, animated: bool) -> Vec<(String, String)> {
    let mut links = vec![
        (format!("Open {size}px"), with_size(face_url, size)),
        (format!("Open {MAX_SIZE}px"), with_size(face_url, MAX_SIZE)),
    ];
    if animated {
        links.push(("Open GIF".to_string(), gif_with_size(face_url, size)));
    }
    links.push(("Open Original".to_string(), face_url.to_string()));
    links
}

#[cfg(test)]
mod tests {
    use super::*;

    const FACE: &str = "https://cdn.discordapp.com/avatars/1/abc.webp?size=1024";

    #[test]
    fn test_normalize_size() {
        assert_eq!(normalize_size(Some(256)), 256);
        assert_eq!(normalize_size(Some(300)), DEFAULT_SIZE);
        assert_eq!(normalize_size(None), DEFAULT_SIZE);
    }

    #[test]
    fn test_with_size_replaces_query() {
        assert_eq!(
            with_size(FACE, 128),
            "https://cdn.discordapp.com/avatars/1/abc.webp?size=128"
        );
        assert_eq!(
            with_size("https://cdn.discordapp.com/embed/avatars/0.png", 512),
            "https://cdn.discordapp.com/embed/avatars/0.png?size=512"
        );
    }

    #[test]
    fn test_gif_with_size_swaps_extension() {
        assert_eq!(
            gif_with_size(
                "https://cdn.discordapp.com/avatars/1/a_abc.webp?size=1024",
                256
            ),
            "https://cdn.discordapp.com/avatars/1/a_abc.gif?size=256"
        );
    }

    #[test]
    fn test_avatar_links_order() {
        let labels: Vec<String> = avatar_links(FACE, 512, true)
            .into_iter()
            .map(|(label, _)| label)
            .collect();
        assert_eq!(
            labels,
            vec!["Open 512px", "Open 2048px", "Open GIF", "Open Original"]
        );
        assert_eq!(avatar_links(FACE, 512, false).len(), 3);
    }
}
