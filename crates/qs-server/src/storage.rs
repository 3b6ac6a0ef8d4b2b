use qs_core::{format_size, FileEntry, ShareError};
use std::path::Path;
use tokio::io::AsyncWriteExt;

fn not_found(e: std::io::Error) -> ShareError {
    if e.kind() == std::io::ErrorKind::NotFound {
        ShareError::NotFound
    } else {
        ShareError::Io(e)
    }
}

/// Regular files directly inside `root`, in directory order.
///
/// Symlinks are skipped along with directories, so a link pointing outside
/// the served directory is never listed.
pub async fn list_files(root: &Path) -> Result<Vec<FileEntry>, ShareError> {
    let mut rd = tokio::fs::read_dir(root).await.map_err(not_found)?;

    let mut out = Vec::new();
    while let Some(ent) = rd.next_entry().await? {
        // Entries can vanish between readdir and stat; skip them.
        let meta = match tokio::fs::symlink_metadata(ent.path()).await {
            Ok(m) => m,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => continue,
            Err(e) => return Err(e.into()),
        };
        if !meta.is_file() {
            continue;
        }
        out.push(FileEntry {
            name: ent.file_name().to_string_lossy().to_string(),
            size: format_size(meta.len()),
        });
    }
    Ok(out)
}

/// Open a served file for reading. Anything but a regular file is `NotFound`.
pub async fn open_file(path: &Path) -> Result<(tokio::fs::File, u64), ShareError> {
    let meta = tokio::fs::symlink_metadata(path).await.map_err(not_found)?;
    if !meta.is_file() {
        return Err(ShareError::NotFound);
    }
    let file = tokio::fs::File::open(path).await.map_err(not_found)?;
    Ok((file, meta.len()))
}

/// Whether an upload may (over)write `path`: it must be absent or a regular
/// file. Writing through a symlink could land outside the served directory.
pub async fn writable_target(path: &Path) -> Result<bool, ShareError> {
    match tokio::fs::symlink_metadata(path).await {
        Ok(meta) => Ok(meta.is_file()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(true),
        Err(e) => Err(e.into()),
    }
}

/// Create or truncate `path` for an incoming upload.
pub async fn create_file(path: &Path) -> Result<tokio::fs::File, ShareError> {
    Ok(tokio::fs::File::create(path).await?)
}

pub async fn write_chunk(file: &mut tokio::fs::File, chunk: &[u8]) -> Result<(), ShareError> {
    file.write_all(chunk).await?;
    Ok(())
}

pub async fn finish_file(mut file: tokio::fs::File) -> Result<(), ShareError> {
    file.flush().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[tokio::test]
    async fn lists_only_regular_files() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join("a.txt"), vec![0u8; 1536]).unwrap();
        std::fs::write(tmp.path().join("empty"), b"").unwrap();
        std::fs::create_dir(tmp.path().join("subdir")).unwrap();
        std::fs::write(tmp.path().join("subdir").join("nested.txt"), b"x").unwrap();

        let files: HashSet<FileEntry> = list_files(tmp.path()).await.unwrap().into_iter().collect();
        let expected: HashSet<FileEntry> = [
            FileEntry { name: "a.txt".into(), size: "1.5 KB".into() },
            FileEntry { name: "empty".into(), size: "0.0 B".into() },
        ]
        .into_iter()
        .collect();
        assert_eq!(files, expected);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn symlinks_are_neither_listed_nor_opened() {
        let outside = tempfile::tempdir().unwrap();
        let secret = outside.path().join("secret.txt");
        std::fs::write(&secret, b"top secret").unwrap();

        let tmp = tempfile::tempdir().unwrap();
        let link = tmp.path().join("link.txt");
        std::os::unix::fs::symlink(&secret, &link).unwrap();

        assert!(list_files(tmp.path()).await.unwrap().is_empty());
        assert!(matches!(open_file(&link).await, Err(ShareError::NotFound)));
        assert!(!writable_target(&link).await.unwrap());
    }

    #[tokio::test]
    async fn open_rejects_dirs_and_missing() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::create_dir(tmp.path().join("d")).unwrap();
        assert!(matches!(open_file(&tmp.path().join("d")).await, Err(ShareError::NotFound)));
        assert!(matches!(open_file(&tmp.path().join("missing")).await, Err(ShareError::NotFound)));
        assert!(!writable_target(&tmp.path().join("d")).await.unwrap());
        assert!(writable_target(&tmp.path().join("missing")).await.unwrap());
    }

    #[tokio::test]
    async fn create_overwrites_existing_content() {
        let tmp = tempfile::tempdir().unwrap();
        let p = tmp.path().join("f.bin");
        std::fs::write(&p, b"old old old").unwrap();

        let mut f = create_file(&p).await.unwrap();
        write_chunk(&mut f, b"new").await.unwrap();
        finish_file(f).await.unwrap();

        assert_eq!(std::fs::read(&p).unwrap(), b"new");
    }
}
