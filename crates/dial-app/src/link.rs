use std::fmt;
use std::process::{Command, Stdio};
use std::thread;

/// Failure to hand a URL to the desktop's opener.
#[derive(Debug)]
pub enum LinkError {
    /// Only `http` and `https` links are launched.
    UnsupportedScheme(String),
    Spawn { url: String, source: std::io::Error },
}

impl fmt::Display for LinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LinkError::UnsupportedScheme(url) => write!(f, "refusing to open `{url}`: not an http(s) link"),
            LinkError::Spawn { url, source } => write!(f, "failed to open `{url}`: {source}"),
        }
    }
}

impl std::error::Error for LinkError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LinkError::Spawn { source, .. } => Some(source),
            LinkError::UnsupportedScheme(_) => None,
        }
    }
}

/// Builds the platform command that opens `url` in the default browser.
pub fn opener_command(url: &str) -> Command {
    #[cfg(target_os = "windows")]
    let cmd = {
        let mut c = Command::new("cmd");
        // The empty argument is the window title `start` would otherwise take from the URL.
        c.args(["/C", "start", ""]).arg(url);
        c
    };
    #[cfg(target_os = "macos")]
    let cmd = {
        let mut c = Command::new("open");
        c.arg(url);
        c
    };
    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    let cmd = {
        let mut c = Command::new("xdg-open");
        c.arg(url);
        c
    };
    cmd
}

/// Launches the opener without blocking the event loop.
///
/// The child is reaped on a detached thread; its exit status is only logged.
pub fn open(url: &str) -> Result<(), LinkError> {
    if !(url.starts_with("https://") || url.starts_with("http://")) {
        return Err(LinkError::UnsupportedScheme(url.to_string()));
    }

    let mut child = opener_command(url)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|source| LinkError::Spawn { url: url.to_string(), source })?;

    log::info!("opening {url}");
    let url = url.to_string();
    thread::spawn(move || match child.wait() {
        Ok(status) if !status.success() => log::warn!("opener for {url} exited with {status}"),
        Ok(_) => {}
        Err(e) => log::warn!("waiting on opener for {url}: {e}"),
    });
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_http_links_are_refused() {
        let err = open("file:///etc/passwd").unwrap_err();
        assert!(matches!(err, LinkError::UnsupportedScheme(_)));
        assert!(err.to_string().contains("file:///etc/passwd"));
    }

    #[test]
    fn url_is_the_last_argument() {
        let cmd = opener_command("https://example.com");
        let last = cmd.get_args().last().map(|a| a.to_string_lossy().into_owned());
        assert_eq!(last.as_deref(), Some("https://example.com"));
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn linux_uses_xdg_open() {
        assert_eq!(opener_command("https://example.com").get_program(), "xdg-open");
    }
}
