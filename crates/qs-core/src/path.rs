use std::path::{Path, PathBuf};

use crate::ShareError;

/// Reduce a client supplied file name to a bare base name:
/// - keeps only the last segment, splitting on both `/` and `\`
/// - rejects empty names, `.`, `..` and names containing NUL
///
/// Splitting on `\` everywhere keeps the result free of separators on
/// Windows as well as on Unix, so the base name can be joined to the served
/// directory without re-checking containment.
pub fn sanitize_name(raw: &str) -> Result<String, ShareError> {
    let base = raw.rsplit(&['/', '\\'][..]).next().unwrap_or("");
    if base.is_empty() || base == "." || base == ".." {
        return Err(ShareError::BadName(raw.to_string()));
    }
    if base.contains('\0') {
        return Err(ShareError::BadName(raw.escape_default().to_string()));
    }
    Ok(base.to_string())
}

/// Map a client supplied file name onto a path directly inside `root`.
/// Returns the sanitized base name alongside the joined path.
pub fn resolve(root: &Path, raw: &str) -> Result<(String, PathBuf), ShareError> {
    let name = sanitize_name(raw)?;
    let path = root.join(&name);
    Ok((name, path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_plain_names() {
        assert_eq!(sanitize_name("report.txt").unwrap(), "report.txt");
        assert_eq!(sanitize_name(".hidden").unwrap(), ".hidden");
        assert_eq!(sanitize_name("a..b").unwrap(), "a..b");
        assert_eq!(sanitize_name("name with spaces.pdf").unwrap(), "name with spaces.pdf");
    }

    #[test]
    fn strips_directory_components() {
        assert_eq!(sanitize_name("../../etc/passwd").unwrap(), "passwd");
        assert_eq!(sanitize_name("/etc/shadow").unwrap(), "shadow");
        assert_eq!(sanitize_name("dir/sub/file.bin").unwrap(), "file.bin");
        assert_eq!(sanitize_name("..\\..\\windows\\win.ini").unwrap(), "win.ini");
        assert_eq!(sanitize_name("C:\\Users\\me\\photo.jpg").unwrap(), "photo.jpg");
        assert_eq!(sanitize_name("mixed/..\\x.txt").unwrap(), "x.txt");
    }

    #[test]
    fn rejects_names_empty_after_stripping() {
        for raw in ["", "/", "dir/", "..", ".", "../..", "a/..", "\\", "foo\\.", "nul\0byte"] {
            assert!(
                matches!(sanitize_name(raw), Err(ShareError::BadName(_))),
                "{raw:?} should be rejected"
            );
        }
    }

    #[test]
    fn resolve_never_leaves_root() {
        let root = Path::new("/srv/share");
        let inputs = [
            "../secret",
            "../../../../etc/passwd",
            "/absolute/path.txt",
            "..\\..\\boot.ini",
            "./././x",
            "a/b/c/../../d",
            "%2e%2e/%2e%2e/x",
            "....//....//y",
            "normal.txt",
        ];
        for raw in inputs {
            let (name, p) = resolve(root, raw).unwrap();
            assert_eq!(p.parent(), Some(root), "{raw:?} resolved to {p:?}");
            assert_eq!(p.file_name().unwrap().to_str().unwrap(), name);
            assert!(!name.contains('/') && !name.contains('\\'));
        }
    }
}
