use sha2::{Digest, Sha256};

/// Windows-safe, deterministic transfer filename:
/// `{sanitized_title}--{sanitized_label}--{short_hash(url)}.{ext}`
pub fn transfer_filename(title: &str, label: &str, source_url: &str) -> String {
    let stem = sanitize_component(title, "untitled");
    let tag = sanitize_component(label, "variant");
    let hash = short_hash(source_url);
    let ext = infer_extension(label, source_url);
    format!("{stem}--{tag}--{hash}.{ext}")
}

fn sanitize_component(input: &str, fallback: &str) -> String {
    let mut cleaned: String = input
        .chars()
        .map(|c| if is_forbidden(c) { '_' } else { c })
        .collect();
    cleaned = cleaned.trim_matches(&['_', ' ', '.'][..]).to_string();
    if cleaned.is_empty() {
        cleaned = fallback.to_string();
    }
    // Collapse multiple underscores
    let mut compacted = String::with_capacity(cleaned.len());
    let mut prev_underscore = false;
    for c in cleaned.chars() {
        if c == '_' {
            if !prev_underscore {
                compacted.push(c);
            }
            prev_underscore = true;
        } else {
            compacted.push(c);
            prev_underscore = false;
        }
    }
    let mut final_name = compacted;
    if final_name.len() > 80 {
        // Provider titles are arbitrary UTF-8; cut on a char boundary.
        let mut end = 80;
        while end > 0 && !final_name.is_char_boundary(end) {
            end -= 1;
        }
        final_name.truncate(end);
    }
    if is_reserved_windows_name(&final_name) {
        final_name.push('_');
    }
    final_name
}

fn is_forbidden(c: char) -> bool {
    matches!(c,
        '\\' | '/' | ':' | '*' | '?' | '"' | '<' | '>' | '|' | '\0'..='\u{1F}'
    )
}

fn is_reserved_windows_name(name: &str) -> bool {
    const RESERVED: &[&str] = &[
        "CON", "PRN", "AUX", "NUL", "COM1", "COM2", "COM3", "COM4", "COM5", "COM6", "COM7", "COM8",
        "COM9", "LPT1", "LPT2", "LPT3", "LPT4", "LPT5", "LPT6", "LPT7", "LPT8", "LPT9",
    ];
    RESERVED.iter().any(|r| r.eq_ignore_ascii_case(name))
}

/// The variant label is more trustworthy than the URL: providers often
/// serve media through extensionless CDN paths.
fn infer_extension(label: &str, source_url: &str) -> String {
    let lowered = label.to_ascii_lowercase();
    if lowered.contains("mp3") || lowered.contains("audio") {
        return "mp3".to_string();
    }
    if lowered.contains("mp4") || lowered.contains("video") {
        return "mp4".to_string();
    }

    if let Some(ext) = url_extension(source_url) {
        return ext;
    }
    "bin".to_string()
}

fn url_extension(source_url: &str) -> Option<String> {
    let path = source_url.split(['?', '#']).next().unwrap_or(source_url);
    let segment = path.rsplit('/').next()?;
    let (_, ext) = segment.rsplit_once('.')?;
    let ext = ext.to_ascii_lowercase();
    if ext.is_empty() || ext.len() > 5 || !ext.chars().all(|c| c.is_ascii_alphanumeric()) {
        return None;
    }
    Some(ext)
}

fn short_hash(input: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(input.as_bytes());
    let digest = hasher.finalize();
    let mut hex = String::with_capacity(8);
    for byte in digest.iter().take(4) {
        use std::fmt::Write;
        let _ = write!(&mut hex, "{byte:02x}");
    }
    hex
}
