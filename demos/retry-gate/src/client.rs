//! A client that walks the full validation exchange once.

use std::net::SocketAddr;
use std::time::Duration;

use causeway_validation::ConnectionId;
use tokio::net::UdpSocket;
use tracing::info;

use crate::wire::{self, msg_type};

type ClientError = Box<dyn std::error::Error + Send + Sync>;

const REPLY_TIMEOUT: Duration = Duration::from_secs(3);

async fn recv(socket: &UdpSocket, buf: &mut [u8]) -> Result<usize, ClientError> {
    Ok(tokio::time::timeout(REPLY_TIMEOUT, socket.recv(buf)).await??)
}

/// Run one hello / retry / token exchange against the gate.
pub async fn run() -> Result<(), ClientError> {
    let server: SocketAddr = std::env::var("CAUSEWAY_SERVER")
        .unwrap_or_else(|_| "127.0.0.1:4433".into())
        .parse()?;

    let socket = UdpSocket::bind("0.0.0.0:0").await?;
    socket.connect(server).await?;

    let dcid = ConnectionId::random(8);
    let scid = ConnectionId::random(8);
    info!(%server, dcid = ?dcid, "sending hello");
    socket.send(&wire::hello(&dcid, &scid, None)).await?;

    let mut buf = [0u8; 2048];
    let len = recv(&socket, &mut buf).await?;
    let mut rest = match buf[..len].split_first() {
        Some((&msg_type::RETRY, rest)) => rest,
        Some((&other, _)) => return Err(format!("expected retry, got 0x{other:02x}").into()),
        None => return Err("empty reply".into()),
    };

    let retry_dcid = wire::take_cid(&mut rest).ok_or("retry missing dcid")?;
    if retry_dcid != scid.as_bytes() {
        return Err("retry addressed to someone else".into());
    }
    let new_cid =
        ConnectionId::try_from_slice(wire::take_cid(&mut rest).ok_or("retry missing scid")?)?;
    let echoed = wire::take_cid(&mut rest).ok_or("retry missing odcid")?;
    if echoed != dcid.as_bytes() {
        return Err("retry echoed the wrong original CID".into());
    }
    let token = rest;
    info!(new_cid = ?new_cid, token_len = token.len(), "got retry, resending with token");

    socket.send(&wire::hello(&new_cid, &scid, Some(token))).await?;

    let len = recv(&socket, &mut buf).await?;
    match buf[..len].split_first() {
        Some((&msg_type::ACCEPT, rest)) if rest.len() == 20 => {
            let label = u32::from_be_bytes(rest[..4].try_into()?);
            info!(
                flow_label = %format_args!("0x{label:05x}"),
                reset_token = %hex::encode(&rest[4..]),
                "accepted"
            );
            Ok(())
        }
        Some((&msg_type::REJECT, _)) => Err("server rejected the token".into()),
        _ => Err("unexpected reply".into()),
    }
}
