use std::process::{Command, Stdio};

/// Builds the command that shows `message` in a native error dialog.
///
/// `None` on platforms without a known dialog helper.
pub fn dialog_command(title: &str, message: &str) -> Option<Command> {
    #[cfg(target_os = "windows")]
    let cmd = {
        let script = format!(
            "Add-Type -AssemblyName PresentationFramework; \
             [System.Windows.MessageBox]::Show('{}', '{}') | Out-Null",
            message.replace('\'', "''"),
            title.replace('\'', "''"),
        );
        let mut c = Command::new("powershell");
        c.args(["-NoProfile", "-NonInteractive", "-Command"]).arg(script);
        Some(c)
    };
    #[cfg(target_os = "macos")]
    let cmd = {
        let quote = |s: &str| s.replace('\\', "\\\\").replace('"', "\\\"");
        let script = format!(
            "display alert \"{}\" message \"{}\" as critical",
            quote(title),
            quote(message)
        );
        let mut c = Command::new("osascript");
        c.arg("-e").arg(script);
        Some(c)
    };
    #[cfg(all(unix, not(target_os = "macos")))]
    let cmd = {
        let mut c = Command::new("zenity");
        c.arg("--error")
            .arg(format!("--title={title}"))
            .arg("--no-markup")
            .arg(format!("--text={message}"));
        Some(c)
    };
    #[cfg(not(any(unix, target_os = "windows")))]
    let cmd = {
        let _ = (title, message);
        None
    };
    cmd
}

/// Shows `message` in a dialog and waits until it is dismissed.
///
/// Best effort: a missing helper is logged and otherwise ignored, since the
/// caller has already reported the message on stderr.
pub fn show_error(title: &str, message: &str) {
    let Some(mut cmd) = dialog_command(title, message) else {
        log::debug!("no dialog helper on this platform");
        return;
    };
    let status = cmd
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status();
    match status {
        Ok(s) if !s.success() => log::warn!("error dialog exited with {s}"),
        Ok(_) => {}
        Err(e) => log::warn!("could not show error dialog ({:?}): {e}", cmd.get_program()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(cmd: &Command) -> Vec<String> {
        cmd.get_args().map(|a| a.to_string_lossy().into_owned()).collect()
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn linux_uses_zenity_error_dialog() {
        let cmd = dialog_command("Simple-Clock", "no GPU <adapter>").unwrap();
        assert_eq!(cmd.get_program(), "zenity");
        let args = args(&cmd);
        assert_eq!(args[0], "--error");
        assert!(args.contains(&"--no-markup".to_string()));
        assert_eq!(args.last().map(String::as_str), Some("--text=no GPU <adapter>"));
    }

    #[cfg(target_os = "macos")]
    #[test]
    fn macos_escapes_quotes_in_the_script() {
        let cmd = dialog_command("Simple-Clock", "say \"hi\"").unwrap();
        assert_eq!(cmd.get_program(), "osascript");
        let script = args(&cmd).pop().unwrap();
        assert!(script.contains("message \"say \\\"hi\\\"\""));
    }

    #[cfg(target_os = "windows")]
    #[test]
    fn windows_doubles_single_quotes() {
        let cmd = dialog_command("Simple-Clock", "it's broken").unwrap();
        let script = args(&cmd).pop().unwrap();
        assert!(script.contains("'it''s broken'"));
    }
}
