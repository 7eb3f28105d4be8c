use std::path::{Component, Path};

/// Convert backslashes to forward slashes.
///
/// EXS24 files written on Windows carry backslash separators; SFZ sample
/// paths are always written with forward slashes.
pub fn to_forward_slashes(path: &str) -> String {
    path.replace('\\', "/")
}

/// Normalize a base sample directory: forward slashes, one trailing slash
/// removed.
///
/// # Example
///
/// ```
/// use exs2sfz::path_utils::normalize_base_path;
///
/// assert_eq!(normalize_base_path("Samples\\Piano\\"), "Samples/Piano");
/// ```
pub fn normalize_base_path(path: &str) -> String {
    let mut normalized = to_forward_slashes(path);
    if normalized.ends_with('/') {
        normalized.pop();
    }
    normalized
}

/// Join a base directory and a sample file name with a `/`.
pub fn join_sample_path(base: &str, file_name: &str) -> String {
    format!("{}/{}", base, to_forward_slashes(file_name))
}

/// Express `target` relative to the directory `base`, using `/` separators.
///
/// When the two paths share no root (one absolute and one relative, or
/// different Windows prefixes) the target is returned unchanged.
///
/// # Example
///
/// ```
/// use exs2sfz::path_utils::relative_path_from;
/// use std::path::Path;
///
/// let rel = relative_path_from(Path::new("/lib/Piano/C4.wav"), Path::new("/lib/out"));
/// assert_eq!(rel, "../Piano/C4.wav");
/// ```
pub fn relative_path_from(target: &Path, base: &Path) -> String {
    let target_parts: Vec<Component> = target.components().collect();
    let base_parts: Vec<Component> = base.components().collect();

    if root_of(&target_parts) != root_of(&base_parts) {
        return to_forward_slashes(&target.to_string_lossy());
    }

    let common = target_parts
        .iter()
        .zip(base_parts.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let mut parts: Vec<String> = Vec::new();
    for component in &base_parts[common..] {
        match component {
            Component::CurDir => {}
            _ => parts.push("..".to_string()),
        }
    }
    for component in &target_parts[common..] {
        match component {
            Component::CurDir => {}
            other => parts.push(other.as_os_str().to_string_lossy().into_owned()),
        }
    }

    if parts.is_empty() {
        ".".to_string()
    } else {
        parts.join("/")
    }
}

fn root_of<'a>(parts: &[Component<'a>]) -> Vec<Component<'a>> {
    parts
        .iter()
        .take_while(|c| matches!(c, Component::Prefix(_) | Component::RootDir))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_normalize_base_path() {
        assert_eq!(normalize_base_path("C:\\Samples\\"), "C:/Samples");
        assert_eq!(normalize_base_path("samples//"), "samples/");
        assert_eq!(normalize_base_path(""), "");
    }

    #[test]
    fn test_join_sample_path() {
        assert_eq!(join_sample_path("Samples", "Sub\\C4.wav"), "Samples/Sub/C4.wav");
    }

    #[test]
    fn test_relative_path_from() {
        let target = PathBuf::from("/library/Piano Samples/C4.aif");
        assert_eq!(
            relative_path_from(&target, Path::new("/library")),
            "Piano Samples/C4.aif"
        );
        assert_eq!(
            relative_path_from(&target, Path::new("/library/out/sfz")),
            "../../Piano Samples/C4.aif"
        );
        assert_eq!(
            relative_path_from(Path::new("relative/C4.aif"), Path::new("/library")),
            "relative/C4.aif"
        );
    }
}
