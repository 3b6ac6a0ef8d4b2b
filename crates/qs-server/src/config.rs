use clap::Parser;
use std::{
    net::IpAddr,
    path::{Path, PathBuf},
};
use thiserror::Error;

#[derive(Parser, Debug)]
#[command(
    name = "quickshare",
    version,
    about = "Share a directory over the local network: browse, download and upload from any browser"
)]
pub struct Cli {
    /// Port to listen on
    #[arg(short, long, env = "QUICKSHARE_PORT", default_value_t = 8000)]
    pub port: u16,

    /// Address to bind
    #[arg(long, env = "QUICKSHARE_HOST", default_value = "0.0.0.0")]
    pub host: IpAddr,

    /// Directory to serve (defaults to the current directory)
    #[arg(short, long, env = "QUICKSHARE_DIR")]
    pub dir: Option<PathBuf>,

    /// Access password; when set every page and API call requires it
    #[arg(short, long, env = "QUICKSHARE_AUTH")]
    pub auth: Option<String>,

    /// Do not print the QR code
    #[arg(long, env = "QUICKSHARE_NO_QR")]
    pub no_qr: bool,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("directory does not exist: {0}")]
    DirNotFound(PathBuf),

    #[error("not a directory: {0}")]
    NotADirectory(PathBuf),

    #[error("cannot access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub root: PathBuf,
    pub host: IpAddr,
    pub port: u16,
    pub password: Option<String>,
    pub show_qr: bool,
}

impl Config {
    pub fn from_cli(cli: Cli) -> Result<Self, ConfigError> {
        let dir = match cli.dir {
            Some(d) => d,
            None => std::env::current_dir().map_err(|source| ConfigError::Io {
                path: PathBuf::from("."),
                source,
            })?,
        };
        let root = served_dir(&dir)?;
        let password = cli.auth.filter(|p| !p.is_empty());

        Ok(Self {
            root,
            host: cli.host,
            port: cli.port,
            password,
            show_qr: !cli.no_qr,
        })
    }
}

/// Canonicalize `dir` and make sure it is an existing directory.
fn served_dir(dir: &Path) -> Result<PathBuf, ConfigError> {
    let root = dir.canonicalize().map_err(|source| {
        if source.kind() == std::io::ErrorKind::NotFound {
            ConfigError::DirNotFound(dir.to_path_buf())
        } else {
            ConfigError::Io { path: dir.to_path_buf(), source }
        }
    })?;
    if !root.is_dir() {
        return Err(ConfigError::NotADirectory(root));
    }
    Ok(root)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("quickshare").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn defaults() {
        let c = cli(&[]);
        assert_eq!(c.port, 8000);
        assert_eq!(c.host, "0.0.0.0".parse::<IpAddr>().unwrap());
        assert!(c.dir.is_none());
        assert!(c.auth.is_none());
        assert!(!c.no_qr);
    }

    #[test]
    fn resolves_existing_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().to_str().unwrap();
        let cfg = Config::from_cli(cli(&["--dir", dir, "--auth", "secret", "--no-qr", "-p", "9000"])).unwrap();
        assert_eq!(cfg.root, tmp.path().canonicalize().unwrap());
        assert_eq!(cfg.password.as_deref(), Some("secret"));
        assert_eq!(cfg.port, 9000);
        assert!(!cfg.show_qr);
    }

    #[test]
    fn empty_password_means_open() {
        let tmp = tempfile::tempdir().unwrap();
        let cfg = Config::from_cli(cli(&["--dir", tmp.path().to_str().unwrap(), "--auth", ""])).unwrap();
        assert!(cfg.password.is_none());
    }

    #[test]
    fn missing_dir_is_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        let missing = tmp.path().join("nope");
        let err = Config::from_cli(cli(&["--dir", missing.to_str().unwrap()])).unwrap_err();
        assert!(matches!(err, ConfigError::DirNotFound(_)), "{err}");
    }

    #[test]
    fn file_is_not_a_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let file = tmp.path().join("f.txt");
        std::fs::write(&file, b"x").unwrap();
        let err = Config::from_cli(cli(&["--dir", file.to_str().unwrap()])).unwrap_err();
        assert!(matches!(err, ConfigError::NotADirectory(_)), "{err}");
    }
}
