//! Repository identifier extraction.
//!
//! Feed URLs (`https://github.com/org/repo/releases.atom`) and catalog
//! repository URLs (`https://github.com/org/repo`) are joined on a shared
//! `org/repo` key.  Both sides go through [`extract_repo_id`].

/// Host marker that must appear in the URL for an identifier to exist.
const HOST_MARKER: &str = "github.com/";

/// Path suffix of a releases feed; everything before it is the identifier.
const RELEASES_MARKER: &str = "/releases";

/// Extract the `org/repo` identifier from a URL-like string.
///
/// Returns an empty string when the host marker is missing or nothing follows
/// it.  Never panics: malformed input just produces an empty or partial key.
///
/// ```text
/// https://github.com/kubernetes/kubernetes/releases.atom  -> kubernetes/kubernetes
/// https://github.com/kubernetes/kubernetes                -> kubernetes/kubernetes
/// github.com/helm/helm/                                   -> helm/helm
/// https://github.com/kubernetes                           -> kubernetes
/// https://example.com/x                                   -> ""
/// ```
pub fn extract_repo_id(url: &str) -> String {
    let Some(idx) = url.find(HOST_MARKER) else {
        return String::new();
    };
    let remainder = &url[idx + HOST_MARKER.len()..];

    if let Some(end) = remainder.find(RELEASES_MARKER) {
        return remainder[..end].to_string();
    }

    // No feed suffix: keep the first two path segments.
    match remainder.match_indices('/').nth(1) {
        Some((second_slash, _)) => remainder[..second_slash].to_string(),
        None => remainder.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn releases_feed_url() {
        assert_eq!(
            extract_repo_id("https://github.com/kubernetes/kubernetes/releases.atom"),
            "kubernetes/kubernetes"
        );
    }

    #[test]
    fn plain_repository_url() {
        assert_eq!(
            extract_repo_id("https://github.com/kubernetes/kubernetes"),
            "kubernetes/kubernetes"
        );
    }

    #[test]
    fn url_without_host_marker_is_empty() {
        assert_eq!(extract_repo_id("https://example.com/x"), "");
        assert_eq!(extract_repo_id("https://gitlab.com/org/repo"), "");
        assert_eq!(extract_repo_id(""), "");
    }

    #[test]
    fn scheme_is_optional() {
        assert_eq!(extract_repo_id("github.com/helm/helm"), "helm/helm");
        assert_eq!(extract_repo_id("http://github.com/helm/helm"), "helm/helm");
    }

    #[test]
    fn trailing_content_after_two_segments_is_dropped() {
        assert_eq!(extract_repo_id("https://github.com/helm/helm/"), "helm/helm");
        assert_eq!(
            extract_repo_id("https://github.com/envoyproxy/envoy/tree/main/docs"),
            "envoyproxy/envoy"
        );
    }

    #[test]
    fn two_segments_property_holds_across_shapes() {
        for url in [
            "https://github.com/a/b",
            "http://github.com/a/b/",
            "github.com/a/b/c/d",
            "https://www.github.com/a/b/issues?q=is%3Aopen",
        ] {
            assert_eq!(extract_repo_id(url), "a/b", "url: {url}");
        }
    }

    #[test]
    fn single_segment_returns_remainder() {
        assert_eq!(extract_repo_id("https://github.com/kubernetes"), "kubernetes");
        assert_eq!(extract_repo_id("https://github.com/kubernetes/"), "kubernetes/");
    }

    #[test]
    fn nothing_after_marker_is_empty() {
        assert_eq!(extract_repo_id("https://github.com/"), "");
    }

    #[test]
    fn marker_match_is_case_sensitive() {
        assert_eq!(extract_repo_id("https://GitHub.com/a/b"), "");
    }

    #[test]
    fn first_marker_occurrence_wins() {
        assert_eq!(
            extract_repo_id("https://github.com/a/b/blob/main/github.com/c/d"),
            "a/b"
        );
    }

    #[test]
    fn releases_tag_path_is_trimmed() {
        assert_eq!(
            extract_repo_id("https://github.com/cilium/cilium/releases/tag/v1.15.0"),
            "cilium/cilium"
        );
    }

    #[test]
    fn non_ascii_input_does_not_panic() {
        assert_eq!(extract_repo_id("https://github.com/ü/ß/"), "ü/ß");
        assert_eq!(extract_repo_id("日本語"), "");
    }
}
