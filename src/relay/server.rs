//! WebSocket front end of the relay.

use std::net::SocketAddr;

use futures::{SinkExt, StreamExt};
use tokio::net::{TcpListener, TcpStream};
use tokio_tungstenite::tungstenite::Message;

use super::events::ClientEvent;
use super::hub::RelayHandle;

/// Accepts relay connections until the listener fails permanently.
pub async fn serve(listener: TcpListener, relay: RelayHandle) {
    match listener.local_addr() {
        Ok(addr) => log::info!("Realtime relay listening on ws://{}", addr),
        Err(e) => log::warn!("Realtime relay listening on unknown address: {}", e),
    }

    loop {
        match listener.accept().await {
            Ok((stream, addr)) => {
                tokio::spawn(handle_connection(stream, addr, relay.clone()));
            }
            Err(e) => {
                log::error!("Failed to accept relay connection: {}", e);
            }
        }
    }
}

/// Handle a single WebSocket connection from handshake to close.
async fn handle_connection(stream: TcpStream, addr: SocketAddr, relay: RelayHandle) {
    let ws_stream = match tokio_tungstenite::accept_async(stream).await {
        Ok(ws) => ws,
        Err(e) => {
            log::warn!("WebSocket handshake with {} failed: {}", addr, e);
            return;
        }
    };

    let (mut ws_sender, mut ws_receiver) = ws_stream.split();
    let (session, mut outbox) = relay.connect();
    log::debug!("Session {} opened from {}", session, addr);

    // Forward queued events to the socket. Ends once the relay drops this session.
    let send_task = tokio::spawn(async move {
        while let Some(event) = outbox.recv().await {
            let json = match serde_json::to_string(event.as_ref()) {
                Ok(json) => json,
                Err(e) => {
                    log::error!("Failed to encode relay event: {}", e);
                    continue;
                }
            };
            if ws_sender.send(Message::Text(json.into())).await.is_err() {
                break;
            }
        }
        ws_sender
    });

    // A Close frame does not end the loop: the next read flushes tungstenite's
    // queued Close reply and then yields None.
    while let Some(msg) = ws_receiver.next().await {
        let text = match msg {
            Ok(Message::Text(text)) => text,
            Ok(Message::Close(frame)) => {
                log::debug!("Session {} closing: {:?}", session, frame);
                continue;
            }
            Ok(Message::Binary(bytes)) => {
                log::debug!("Dropping {} byte binary frame from {}", bytes.len(), session);
                continue;
            }
            Ok(_) => continue,
            Err(e) => {
                log::debug!("Session {} transport error: {}", session, e);
                break;
            }
        };

        match serde_json::from_str::<ClientEvent>(text.as_str()) {
            Ok(event) => relay.dispatch(session, event),
            Err(e) => log::debug!("Dropping unreadable event from {}: {}", session, e),
        }
    }

    relay.disconnect(session);
    match send_task.await {
        Ok(mut ws_sender) => {
            if let Err(e) = ws_sender.close().await {
                log::debug!("Session {} already closed: {}", session, e);
            }
        }
        Err(e) => log::warn!("Writer for session {} failed: {}", session, e),
    }
}
