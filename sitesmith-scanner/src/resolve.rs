use url::Url;

/// Resolve a possibly-relative URL against a base URL.
///
/// Absolute inputs (own scheme, or protocol-relative `//`) are returned
/// without touching their path. When the base is not a usable absolute URL
/// the original string is handed back unchanged rather than erroring - the
/// caller treats unresolvable hrefs as off-domain noise.
///
/// The base URL's query string never survives resolution; only
/// `scheme://host[:port]/path` is reassembled.
pub fn resolve(relative: &str, base: &str) -> String {
    // Protocol-relative links borrow the base's scheme, defaulting to http.
    if relative.starts_with("//") {
        let scheme = Url::parse(base)
            .map(|u| u.scheme().to_string())
            .unwrap_or_else(|_| "http".to_string());
        return format!("{}:{}", scheme, relative);
    }
    if has_scheme(relative) {
        return relative.to_string();
    }

    let Ok(base_url) = Url::parse(base) else {
        return relative.to_string();
    };
    let Some(host) = base_url.host_str() else {
        return relative.to_string();
    };

    // Trailing slash means the base path is a directory; otherwise the last
    // segment is a file reference and gets dropped.
    let base_path = base_url.path();
    let base_dir = if base_path.ends_with('/') {
        base_path.to_string()
    } else {
        match base_path.rfind('/') {
            Some(idx) => base_path[..=idx].to_string(),
            None => "/".to_string(),
        }
    };

    let merged = if relative.starts_with('/') {
        // Root-relative: replaces the base path entirely.
        relative.to_string()
    } else {
        let stripped = relative.strip_prefix("./").unwrap_or(relative);
        format!("{}{}", base_dir, stripped)
    };

    let path = normalize_path(&merged);

    match base_url.port() {
        Some(port) => format!("{}://{}:{}{}", base_url.scheme(), host, port, path),
        None => format!("{}://{}{}", base_url.scheme(), host, path),
    }
}

/// Collapse `.` and `..` segments in a single left-to-right pass.
/// A `..` with nothing left to pop is a no-op, not an error.
fn normalize_path(path: &str) -> String {
    let mut segments: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            other => segments.push(other),
        }
    }
    format!("/{}", segments.join("/"))
}

/// True when the string opens with an RFC 3986 scheme followed by `:`.
fn has_scheme(s: &str) -> bool {
    let Some(colon) = s.find(':') else {
        return false;
    };
    if colon == 0 {
        return false;
    }
    let head = &s[..colon];
    let mut chars = head.chars();
    let first = chars.next().expect("head is non-empty");
    first.is_ascii_alphabetic()
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}
