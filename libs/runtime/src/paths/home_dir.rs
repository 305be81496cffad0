use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HomeDirError {
    #[error("neither HOME nor APPDATA is set; cannot resolve the home directory")]
    NoBaseDir,
    #[error("failed to create directory {path}: {source}")]
    Create {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

fn platform_base() -> Option<PathBuf> {
    let var = if cfg!(windows) { "APPDATA" } else { "HOME" };
    std::env::var_os(var)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

/// Resolve the server home directory.
///
/// - `None` → `<platform base>/<default_subdir>` ($HOME on Unix, %APPDATA% on Windows)
/// - `~` or `~/x` → expanded against the platform base
/// - relative paths → joined onto the current working directory
///
/// When `create` is set the directory is created if missing.
pub fn resolve_home_dir(
    configured: Option<String>,
    default_subdir: &str,
    create: bool,
) -> Result<PathBuf, HomeDirError> {
    let path = match configured.as_deref().map(str::trim) {
        None | Some("") => platform_base()
            .ok_or(HomeDirError::NoBaseDir)?
            .join(default_subdir),
        Some("~") => platform_base().ok_or(HomeDirError::NoBaseDir)?,
        Some(p) if p.starts_with("~/") || p.starts_with("~\\") => platform_base()
            .ok_or(HomeDirError::NoBaseDir)?
            .join(&p[2..]),
        Some(p) => {
            let p = PathBuf::from(p);
            if p.is_absolute() {
                p
            } else {
                std::env::current_dir()
                    .map_err(|source| HomeDirError::Create {
                        path: p.to_string_lossy().to_string(),
                        source,
                    })?
                    .join(p)
            }
        }
    };

    if create {
        std::fs::create_dir_all(&path).map_err(|source| HomeDirError::Create {
            path: path.to_string_lossy().to_string(),
            source,
        })?;
    }

    Ok(path)
}
