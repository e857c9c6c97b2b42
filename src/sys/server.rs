use crate::events::AppEvent;
use async_channel::Sender;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::net::UnixListener;

const SOCKET_PATH: &str = "/tmp/spinwheel.sock";

fn parse_command(line: &str) -> Option<AppEvent> {
    let mut parts = line.trim().split_whitespace();
    match parts.next()? {
        "spin" => match parts.next() {
            None => Some(AppEvent::Spin),
            Some(arg) => arg.parse().ok().map(AppEvent::SpinTo),
        },
        "reload" => Some(AppEvent::ConfigReload),
        _ => None,
    }
}

pub async fn run_server(tx: Sender<AppEvent>) {
    // Cleanup old socket if it exists
    if std::fs::metadata(SOCKET_PATH).is_ok() {
        let _ = std::fs::remove_file(SOCKET_PATH);
    }

    let listener = match UnixListener::bind(SOCKET_PATH) {
        Ok(l) => l,
        Err(e) => {
            log::error!("Failed to bind unix socket: {}", e);
            return;
        }
    };

    loop {
        match listener.accept().await {
            Ok((mut stream, _)) => {
                let tx = tx.clone();
                tokio::spawn(async move {
                    let reader = BufReader::new(&mut stream);
                    let mut lines = reader.lines();

                    while let Ok(Some(line)) = lines.next_line().await {
                        match parse_command(&line) {
                            Some(event) => {
                                let _ = tx.send(event).await;
                            }
                            None => log::debug!("Ignoring unknown command '{}'", line.trim()),
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
    fn commands_parse() {
        assert!(matches!(parse_command("spin"), Some(AppEvent::Spin)));
        assert!(matches!(parse_command("  spin  "), Some(AppEvent::Spin)));
        assert!(matches!(
            parse_command("spin 3"),
            Some(AppEvent::SpinTo(3))
        ));
        assert!(matches!(
            parse_command("reload"),
            Some(AppEvent::ConfigReload)
        ));
        assert!(parse_command("spin minus-one").is_none());
        assert!(parse_command("dance").is_none());
        assert!(parse_command("").is_none());
    }
}
