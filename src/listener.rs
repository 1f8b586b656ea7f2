// src/listener.rs
use log::{error, info, warn};
use std::sync::Arc;
use std::time::Duration;
use tokio::io::AsyncReadExt;
use tokio::net::{TcpListener, TcpStream};

use crate::engine::TrafficEngine;

/// Each connection delivers at most one payload read of this size.
const MAX_PAYLOAD_BYTES: usize = 1024;

/// A peer that sends nothing within this window is dropped so it can never
/// stall the handler pool.
const READ_TIMEOUT: Duration = Duration::from_secs(2);

/// Binds the ingestion socket and serves it until the task is aborted.
pub async fn start_listener(
    addr: &str,
    engine: Arc<TrafficEngine>,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let listener = TcpListener::bind(addr).await?;
    info!("ingestion listener on {} (defender active)", addr);
    serve(listener, engine).await;
    Ok(())
}

/// Accept loop: one task per connection, so a slow or broken client never
/// blocks acceptance of the next. Accept errors are logged and the loop
/// keeps serving.
pub async fn serve(listener: TcpListener, engine: Arc<TrafficEngine>) {
    loop {
        match listener.accept().await {
            Ok((socket, peer)) => {
                let engine = engine.clone();
                tokio::spawn(async move {
                    handle_connection(socket, &peer.ip().to_string(), peer.port(), engine).await;
                });
            }
            Err(e) => {
                error!("accept failed: {}", e);
            }
        }
    }
}

/// Reads one bounded payload, decodes it as UTF-8 best-effort, and hands it
/// to the engine. Every failure mode is contained to this connection.
async fn handle_connection(
    mut socket: TcpStream,
    peer_addr: &str,
    peer_port: u16,
    engine: Arc<TrafficEngine>,
) {
    let mut buf = [0u8; MAX_PAYLOAD_BYTES];
    let payload = match tokio::time::timeout(READ_TIMEOUT, socket.read(&mut buf)).await {
        Ok(Ok(n)) => String::from_utf8_lossy(&buf[..n]).into_owned(),
        Ok(Err(e)) => {
            warn!("read error from {}:{}: {}", peer_addr, peer_port, e);
            return;
        }
        Err(_) => {
            warn!("read timeout from {}:{}", peer_addr, peer_port);
            return;
        }
    };
    engine.submit(peer_addr, peer_port, &payload, false);
}
