use crate::item::LinkTarget;
use std::process::{Command, Stdio};
use std::thread;
use thiserror::Error;

pub const DEFAULT_OPENER: &str = "xdg-open";

#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("opener command is empty")]
    EmptyOpener,
    #[error("failed to parse opener '{opener}'")]
    Parse {
        opener: String,
        #[source]
        source: shell_words::ParseError,
    },
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Full argv for opening `target` with `opener`, e.g. `firefox --new-tab`.
pub fn opener_argv(opener: &str, target: &LinkTarget) -> Result<Vec<String>, LaunchError> {
    let mut argv = shell_words::split(opener).map_err(|source| LaunchError::Parse {
        opener: opener.to_string(),
        source,
    })?;
    if argv.is_empty() {
        return Err(LaunchError::EmptyOpener);
    }
    argv.push(target.to_string());
    Ok(argv)
}

/// Spawns the opener detached from our stdio. The child is reaped on a
/// background thread so a long-running caller does not collect zombies.
pub fn open_target(target: &LinkTarget, opener: &str) -> Result<(), LaunchError> {
    let argv = opener_argv(opener, target)?;
    let (program, args) = argv.split_first().ok_or(LaunchError::EmptyOpener)?;

    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()?;

    log::info!("Opened '{}' with {}", target, program);

    let program = program.clone();
    thread::spawn(move || match child.wait() {
        Ok(status) if !status.success() => {
            log::warn!("{} exited with {}", program, status);
        }
        Ok(_) => {}
        Err(e) => log::error!("Failed to wait for {}: {}", program, e),
    });
    Ok(())
}
