//! The stateless side of the gate.
//!
//! The server keeps exactly one piece of state: the token secret. Every
//! datagram is answered from the secret, the source address, and the
//! payload alone, so any process holding the same secret gives the same
//! answers.

use std::net::SocketAddr;

use causeway_validation::packet::RetryPacketAssembler;
use causeway_validation::prelude::*;
use tokio::net::UdpSocket;
use tracing::{info, warn};

use crate::wire::{self, GateEncoder, msg_type};

type ServerError = Box<dyn std::error::Error + Send + Sync>;

fn secret_from_env() -> Result<TokenSecret, ServerError> {
    match std::env::var("CAUSEWAY_SECRET") {
        Ok(encoded) => {
            let bytes: [u8; 32] = hex::decode(encoded)?
                .as_slice()
                .try_into()
                .map_err(|_| "CAUSEWAY_SECRET must be 32 hex-encoded bytes")?;
            Ok(TokenSecret::from_bytes(bytes))
        }
        Err(_) => Ok(TokenSecret::generate()),
    }
}

/// Run the gate server until killed.
pub async fn run() -> Result<(), ServerError> {
    let bind: SocketAddr = std::env::var("CAUSEWAY_BIND")
        .unwrap_or_else(|_| "0.0.0.0:4433".into())
        .parse()?;

    let secret = secret_from_env()?;
    let assembler = RetryPacketAssembler::new(RetryTokenCodec::default(), GateEncoder);
    let ctx = CryptoContext::initial();

    let socket = UdpSocket::bind(bind).await?;
    let local = socket.local_addr()?;
    info!(%local, "retry gate listening");

    let mut buf = [0u8; 2048];
    loop {
        let (len, remote) = socket.recv_from(&mut buf).await?;
        let result =
            handle_message(&socket, &assembler, &ctx, &secret, local, remote, &buf[..len]).await;
        if let Err(error) = result {
            warn!(%remote, %error, "dropping datagram");
        }
    }
}

async fn handle_message(
    socket: &UdpSocket,
    assembler: &RetryPacketAssembler<GateEncoder>,
    ctx: &CryptoContext,
    secret: &TokenSecret,
    local: SocketAddr,
    remote: SocketAddr,
    data: &[u8],
) -> Result<(), ServerError> {
    let Some((&kind, mut rest)) = data.split_first() else {
        return Ok(());
    };

    match kind {
        msg_type::HELLO => {
            let odcid = ConnectionId::try_from_slice(
                wire::take_cid(&mut rest).ok_or("hello missing dcid")?,
            )?;
            let peer_scid = ConnectionId::try_from_slice(
                wire::take_cid(&mut rest).ok_or("hello missing scid")?,
            )?;

            let packet = assembler.build_retry(secret, &odcid, &peer_scid, &local, &remote)?;
            info!(%remote, new_cid = ?packet.new_cid(), "sending retry");
            socket.send_to(packet.as_bytes(), remote).await?;
        }
        msg_type::HELLO_TOKEN => {
            let dcid = ConnectionId::try_from_slice(
                wire::take_cid(&mut rest).ok_or("hello missing dcid")?,
            )?;
            wire::take_cid(&mut rest).ok_or("hello missing scid")?;

            // Everything after the CID fields is the echoed token.
            match assembler.codec().validate(secret, &remote, rest) {
                Ok(odcid) => {
                    info!(%remote, odcid = ?odcid, "address validated");
                    let label = flow_label(ctx, secret, &local, &remote, &dcid);
                    let reset = stateless_reset_token(ctx, secret, &dcid)?;

                    let mut reply = vec![msg_type::ACCEPT];
                    reply.extend_from_slice(&u32::from(label).to_be_bytes());
                    reply.extend_from_slice(reset.as_bytes());
                    socket.send_to(&reply, remote).await?;
                }
                Err(_) => {
                    info!(%remote, "token rejected");
                    socket.send_to(&[msg_type::REJECT], remote).await?;
                }
            }
        }
        other => warn!(%remote, kind = other, "unknown message type"),
    }
    Ok(())
}
