use crate::events::AppEvent;
use async_channel::Sender;
use std::thread;
use tokio::runtime::Runtime;

const SERVICES_THREAD: &str = "spinwheel-services";

/// Hosts the command server and the config watcher on a detached thread
/// with its own tokio runtime, publishing into the component's channel.
/// Failures are logged; the widget runs fine without background services.
pub fn start_background_services(tx: Sender<AppEvent>) {
    let spawned = thread::Builder::new()
        .name(SERVICES_THREAD.into())
        .spawn(move || run_services(tx));

    if let Err(e) = spawned {
        log::error!("Failed to spawn {} thread: {}", SERVICES_THREAD, e);
    }
}

fn run_services(tx: Sender<AppEvent>) {
    let rt = match Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            log::error!("Failed to create background runtime: {}", e);
            return;
        }
    };

    log::info!("Starting command server and config watcher");

    rt.block_on(async {
        let server_tx = tx.clone();
        tokio::spawn(async move {
            crate::sys::server::run_server(server_tx).await;
        });
        tokio::spawn(async move {
            crate::config::run_async_watcher(tx).await;
        });

        std::future::pending::<()>().await;
    });
}
