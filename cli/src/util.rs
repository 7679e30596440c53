use std::{
    future::Future,
    path::{Path, PathBuf},
    process::exit,
};

use anyhow::anyhow;

pub fn current_dir() -> PathBuf {
    std::env::current_dir().unwrap_or_else(|e| {
        eprintln!("Failed to get current dir: {}", e);
        exit(1);
    })
}

pub fn replace_homedir_to_tilde(path: impl Into<PathBuf>) -> PathBuf {
    let path = path.into();
    let Some(home_dir) = ::dirs::home_dir() else {
        return path
    };
    path.strip_prefix(home_dir)
        .map(|path| Path::new("~").join(path))
        .unwrap_or(path)
}

/// Runs `fut` to completion unless Ctrl-C arrives first. If the handler
/// cannot be installed, `fut` just runs to completion.
pub async fn abort_on_ctrl_c<T, F>(fut: F) -> anyhow::Result<T>
where
    F: Future<Output = anyhow::Result<T>>,
{
    tokio::select! {
        res = fut => res,
        Ok(()) = tokio::signal::ctrl_c() => Err(anyhow!("Interrupted")),
    }
}

/// Message printed after `fatal: `. Any connectivity failure in the chain is
/// reported as a plain connection error.
pub fn fatal_message(e: &anyhow::Error) -> String {
    let is_connection_error = e.chain().any(|cause| {
        cause
            .downcast_ref::<stos_webclient::Error>()
            .map_or(false, |e| e.is_connection_error())
    });
    if is_connection_error {
        "Connection error".to_owned()
    } else {
        format!("{:#}", e)
    }
}
