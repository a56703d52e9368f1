//! Sidecar file naming.
//!
//! A sidecar shares the primary video's base name and carries one of the
//! known suffixes: `Movie.en.srt`, `Movie.nfo`, `Movie.trickplay`,
//! `Movie-poster.jpg` and so on.

use crate::models::media::MediaKind;
use regex::Regex;
use std::sync::LazyLock;

// Optional language code and flags, then a subtitle extension.
static RE_SUBTITLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^(?:\.[a-z]{2,3}(?:[-_][a-z]{2,4})?)?(?:\.(?:forced|sdh|default|cc|hi))*\.(?:srt|ass|ssa|sub|idx|vtt|sup|smi)$",
    )
    .expect("subtitle suffix regex")
});

static RE_ARTWORK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^-(backdrop|poster|logo|landscape)\.(jpe?g|png|webp)$").expect("artwork suffix regex")
});

/// Kind of sidecar, derived from its suffix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SidecarKind {
    Subtitle,
    Nfo,
    Trickplay,
    /// Artwork role (`poster`, `backdrop`, ...) and image extension.
    Artwork { role: String, extension: String },
}

/// Classify the part of a sidecar name that follows the shared base name.
pub fn classify_suffix(suffix: &str) -> Option<SidecarKind> {
    if RE_SUBTITLE.is_match(suffix) {
        return Some(SidecarKind::Subtitle);
    }
    if suffix.eq_ignore_ascii_case(".nfo") {
        return Some(SidecarKind::Nfo);
    }
    if suffix.eq_ignore_ascii_case(".trickplay") {
        return Some(SidecarKind::Trickplay);
    }
    RE_ARTWORK.captures(suffix).map(|caps| SidecarKind::Artwork {
        role: caps[1].to_lowercase(),
        extension: caps[2].to_string(),
    })
}

/// If `name` is a sidecar of a video with base name `source_stem`, return
/// its kind and suffix.
pub fn match_sidecar<'n>(source_stem: &str, name: &'n str) -> Option<(SidecarKind, &'n str)> {
    let suffix = name.strip_prefix(source_stem)?;
    if suffix.is_empty() {
        return None;
    }
    classify_suffix(suffix).map(|kind| (kind, suffix))
}

/// Destination name of a sidecar next to a primary file with base name
/// `destination_stem`.
///
/// Movies follow Jellyfin's folder-level names (`movie.nfo`, `poster.jpg`);
/// episodes keep the suffix on the new base name.
pub fn sidecar_destination_name(
    kind: &SidecarKind,
    suffix: &str,
    destination_stem: &str,
    media_kind: MediaKind,
) -> String {
    match (media_kind, kind) {
        (MediaKind::Movie, SidecarKind::Nfo) => "movie.nfo".to_string(),
        (MediaKind::Movie, SidecarKind::Artwork { role, extension }) => {
            format!("{}.{}", role, extension)
        }
        _ => format!("{}{}", destination_stem, suffix),
    }
}
