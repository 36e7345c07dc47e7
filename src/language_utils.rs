use anyhow::{Result, anyhow};
use isolang::Language;

/// Language utilities for BCP-47-like caption tags
///
/// Caption tracks carry tags such as "en", "ko", or "pt-BR": an ISO 639-1
/// (sometimes 639-3) base subtag with an optional region. This module turns
/// those tags into display names for tracks the upstream provider did not
/// name.
/// Split a tag into its base language subtag and optional region subtag
fn split_tag(tag: &str) -> (&str, Option<&str>) {
    match tag.split_once(['-', '_']) {
        Some((base, region)) if !region.is_empty() => (base, Some(region)),
        _ => (tag, None),
    }
}

/// Look up the English name of the base language subtag
fn base_language_name(base: &str) -> Option<&'static str> {
    let normalized = base.trim().to_lowercase();
    let language = match normalized.len() {
        2 => Language::from_639_1(&normalized),
        3 => Language::from_639_3(&normalized),
        _ => None,
    };
    language.map(|lang| lang.to_name())
}

/// Get a display name for a caption language tag
///
/// "en" becomes "English", "pt-BR" becomes "Portuguese (BR)". Fails when
/// the base subtag is not a recognized ISO 639 code.
pub fn display_name(tag: &str) -> Result<String> {
    let (base, region) = split_tag(tag);
    let name = base_language_name(base)
        .ok_or_else(|| anyhow!("Unrecognized language tag: {}", tag))?;

    Ok(match region {
        Some(region) => format!("{} ({})", name, region.to_uppercase()),
        None => name.to_string(),
    })
}

/// Display name with the tag itself as fallback
///
/// Upstream track listings occasionally omit the human-readable name; the
/// tag is always better than an empty string.
pub fn display_name_or_tag(tag: &str) -> String {
    display_name(tag).unwrap_or_else(|_| tag.to_string())
}

/// Rough well-formedness check for a caption language tag
pub fn is_plausible_tag(tag: &str) -> bool {
    let (base, region) = split_tag(tag);
    let base_ok = (2..=3).contains(&base.len()) && base.bytes().all(|b| b.is_ascii_alphabetic());
    let region_ok = region.is_none_or(|r| {
        (2..=4).contains(&r.len()) && r.bytes().all(|b| b.is_ascii_alphanumeric())
    });
    base_ok && region_ok
}
