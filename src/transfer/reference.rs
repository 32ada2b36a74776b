//! Source to target image reference mapping

/// Part of an image reference after the last `/`, or the whole reference
/// when it has no path separator.
///
/// `docker.example.net/library/nginx:1.27` becomes `nginx:1.27`.
pub fn bare_name(reference: &str) -> &str {
    match reference.rsplit_once('/') {
        Some((_, name)) => name,
        None => reference,
    }
}

/// Reference the image is retagged and pushed as: `target/<bare name>`
pub fn target_reference(source: &str, target: &str) -> String {
    format!("{}/{}", target, bare_name(source))
}
