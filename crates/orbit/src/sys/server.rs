use crate::events::AppEvent;
use async_channel::Sender;
use orbit_core::Presentation;
use orbit_core::ipc::{self, Command};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::net::UnixListener;

pub fn event_for(command: Command) -> AppEvent {
    match command {
        Command::Show => AppEvent::Show,
        Command::Hide => AppEvent::Hide,
        Command::Toggle => AppEvent::Toggle,
        Command::Flat => AppEvent::Present(Presentation::Flat),
        Command::Orbital => AppEvent::Present(Presentation::Orbital),
    }
}

pub async fn run_server(tx: Sender<AppEvent>) {
    let socket_path = ipc::socket_path();

    // Cleanup old socket if it exists
    if fs_err::metadata(&socket_path).is_ok() {
        let _ = fs_err::remove_file(&socket_path);
    }

    let listener = match UnixListener::bind(&socket_path) {
        Ok(l) => l,
        Err(e) => {
            log::error!("Failed to bind {}: {}", socket_path.display(), e);
            return;
        }
    };
    log::info!("Listening on {}", socket_path.display());

    loop {
        match listener.accept().await {
            Ok((mut stream, _)) => {
                let tx = tx.clone();
                tokio::spawn(async move {
                    let reader = BufReader::new(&mut stream);
                    let mut lines = reader.lines();

                    while let Ok(Some(line)) = lines.next_line().await {
                        match line.trim().parse::<Command>() {
                            Ok(command) => {
                                let _ = tx.send(event_for(command)).await;
                            }
                            Err(_) => log::warn!("Unknown command '{}'", line.trim()),
                        }
                    }
                });
            }
            Err(e) => {
                log::error!("Failed to accept connection: {}", e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presentation_commands_map_to_present_events() {
        assert!(matches!(
            event_for(Command::Orbital),
            AppEvent::Present(Presentation::Orbital)
        ));
        assert!(matches!(event_for(Command::Toggle), AppEvent::Toggle));
    }
}
