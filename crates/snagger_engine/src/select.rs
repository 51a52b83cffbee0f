use url::Url;

use crate::ProviderKind;

/// The concrete set of video hosts routed to the dedicated high-priority
/// provider; adding a host means appending here, nothing else. Order is
/// fixed and significant: first match wins. Everything else goes to the
/// generic social extractor.
const VIDEO_HOST_PATTERNS: &[&str] = &[
    "youtube.com",
    "youtu.be",
    "vimeo.com",
    "dailymotion.com",
];

/// Maps a raw target to its extraction provider. Total and deterministic:
/// never fails, and repeated calls with the same input agree.
pub fn select_provider(target: &str) -> ProviderKind {
    if let Some(host) = Url::parse(target).ok().and_then(|url| {
        url.host_str().map(|host| host.to_ascii_lowercase())
    }) {
        for pattern in VIDEO_HOST_PATTERNS {
            if host == *pattern || host.ends_with(&format!(".{pattern}")) {
                return ProviderKind::VideoHost;
            }
        }
        return ProviderKind::SocialGeneric;
    }

    // Targets that are not URLs (catalog identifiers, bare hosts) still get
    // a provider; check for a recognizable host substring before defaulting.
    let lowered = target.to_ascii_lowercase();
    for pattern in VIDEO_HOST_PATTERNS {
        if lowered.contains(pattern) {
            return ProviderKind::VideoHost;
        }
    }
    ProviderKind::SocialGeneric
}
