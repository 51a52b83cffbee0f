use serde::Deserialize;

use crate::{
    Deliverable, ExtractError, ExtractFault, Variant, FALLBACK_PREVIEW, FALLBACK_SIZE,
    FALLBACK_TITLE,
};

/// Raw schema of the video-host provider's GET endpoint.
#[derive(Debug, Deserialize)]
pub(crate) struct VideoHostRaw {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    link: Option<String>,
    #[serde(default)]
    thumbnail: Option<String>,
}

/// Raw schema of the generic social provider's POST endpoint.
#[derive(Debug, Deserialize)]
pub(crate) struct SocialRaw {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    thumbnail: Option<String>,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    medias: Vec<SocialMedia>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SocialMedia {
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    quality: Option<String>,
    #[serde(default)]
    extension: Option<String>,
    #[serde(default)]
    size: Option<serde_json::Value>,
}

/// The video host returns a single link; it serves both the HD video
/// remux and the audio-only track, so it is offered under both labels.
pub(crate) fn normalize_video(raw: VideoHostRaw) -> Result<Deliverable, ExtractError> {
    if raw.status.as_deref() != Some("ok") {
        return Err(ExtractError::new(
            ExtractFault::NoUsableLink,
            format!("provider status {:?}", raw.status.as_deref().unwrap_or("missing")),
        ));
    }
    let link = match raw.link {
        Some(link) if !link.is_empty() => link,
        _ => {
            return Err(ExtractError::new(
                ExtractFault::NoUsableLink,
                "provider response carries no link",
            ))
        }
    };

    let variants = vec![
        Variant {
            label: "MP4 Video (HD)".to_string(),
            source_url: link.clone(),
            size_hint: FALLBACK_SIZE.to_string(),
        },
        Variant {
            label: "MP3 Audio".to_string(),
            source_url: link,
            size_hint: FALLBACK_SIZE.to_string(),
        },
    ];

    Ok(Deliverable {
        title: non_empty_or(raw.title, FALLBACK_TITLE),
        preview_image: non_empty_or(raw.thumbnail, FALLBACK_PREVIEW),
        variants,
    })
}

pub(crate) fn normalize_social(raw: SocialRaw) -> Result<Deliverable, ExtractError> {
    let mut variants: Vec<Variant> = raw
        .medias
        .into_iter()
        .filter_map(|media| {
            let source_url = media.url.filter(|url| !url.is_empty())?;
            Some(Variant {
                label: media_label(media.quality.as_deref(), media.extension.as_deref()),
                source_url,
                size_hint: size_hint(media.size.as_ref()),
            })
        })
        .collect();

    if let Some(url) = raw.url.filter(|url| !url.is_empty()) {
        variants.push(Variant {
            label: "Direct link".to_string(),
            source_url: url,
            size_hint: FALLBACK_SIZE.to_string(),
        });
    }

    // An empty media list with no top-level url is an extraction failure,
    // never an empty-but-ready result.
    if variants.is_empty() {
        return Err(ExtractError::new(
            ExtractFault::NoUsableLink,
            "provider returned no media entries and no direct url",
        ));
    }

    Ok(Deliverable {
        title: non_empty_or(raw.title, FALLBACK_TITLE),
        preview_image: non_empty_or(raw.thumbnail, FALLBACK_PREVIEW),
        variants,
    })
}

fn non_empty_or(value: Option<String>, fallback: &str) -> String {
    match value {
        Some(value) if !value.trim().is_empty() => value,
        _ => fallback.to_string(),
    }
}

fn media_label(quality: Option<&str>, extension: Option<&str>) -> String {
    match (extension, quality) {
        (Some(ext), Some(quality)) => format!("{} ({quality})", ext.to_ascii_uppercase()),
        (Some(ext), None) => ext.to_ascii_uppercase(),
        (None, Some(quality)) => quality.to_string(),
        (None, None) => "Media".to_string(),
    }
}

/// Providers report size as a number of bytes, a free-form string, or not
/// at all.
fn size_hint(size: Option<&serde_json::Value>) -> String {
    match size {
        Some(serde_json::Value::Number(number)) => match number.as_u64() {
            Some(bytes) => format_size(bytes),
            None => FALLBACK_SIZE.to_string(),
        },
        Some(serde_json::Value::String(text)) if !text.trim().is_empty() => text.clone(),
        _ => FALLBACK_SIZE.to_string(),
    }
}

fn format_size(bytes: u64) -> String {
    const MIB: u64 = 1024 * 1024;
    const KIB: u64 = 1024;
    if bytes >= MIB {
        format!("{:.1} MB", bytes as f64 / MIB as f64)
    } else if bytes >= KIB {
        format!("{:.1} KB", bytes as f64 / KIB as f64)
    } else {
        format!("{bytes} B")
    }
}

#[cfg(test)]
mod tests {
    use super::{format_size, media_label};

    #[test]
    fn media_label_prefers_extension_with_quality() {
        assert_eq!(media_label(Some("hd"), Some("mp4")), "MP4 (hd)");
        assert_eq!(media_label(None, Some("jpg")), "JPG");
        assert_eq!(media_label(Some("720p"), None), "720p");
        assert_eq!(media_label(None, None), "Media");
    }

    #[test]
    fn format_size_picks_unit() {
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(2048), "2.0 KB");
        assert_eq!(format_size(3 * 1024 * 1024), "3.0 MB");
    }
}
