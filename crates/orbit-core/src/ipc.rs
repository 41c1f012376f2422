use crate::presentation::Presentation;
use std::io::Write;
use std::os::unix::net::UnixStream;
use std::path::PathBuf;
use strum::{Display as StrumDisplay, EnumString};

const SOCKET_NAME: &str = "orbit.sock";

/// Daemon socket, inside `$XDG_RUNTIME_DIR` when there is one.
pub fn socket_path() -> PathBuf {
    std::env::var_os("XDG_RUNTIME_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("/tmp"))
        .join(SOCKET_NAME)
}

/// One line of the daemon's socket protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, StrumDisplay)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Command {
    Show,
    Hide,
    Toggle,
    Flat,
    Orbital,
}

impl From<Presentation> for Command {
    fn from(p: Presentation) -> Self {
        match p {
            Presentation::Flat => Self::Flat,
            Presentation::Orbital => Self::Orbital,
        }
    }
}

pub fn send(command: Command) -> std::io::Result<()> {
    let mut stream = UnixStream::connect(socket_path())?;
    writeln!(stream, "{}", command)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commands_parse_from_socket_lines() {
        assert_eq!("show".parse::<Command>().unwrap(), Command::Show);
        assert_eq!("Toggle".parse::<Command>().unwrap(), Command::Toggle);
        assert_eq!("orbital".parse::<Command>().unwrap(), Command::Orbital);
        assert!("launch".parse::<Command>().is_err());
        assert_eq!(Command::Hide.to_string(), "hide");
        assert_eq!(Command::from(Presentation::Flat), Command::Flat);
    }

    #[test]
    fn socket_lives_in_runtime_dir_or_tmp() {
        assert!(socket_path().ends_with(SOCKET_NAME));
    }
}
