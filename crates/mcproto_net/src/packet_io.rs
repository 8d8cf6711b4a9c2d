//! The cooperative transport: one `tokio` task per connection.

use std::io::{self, ErrorKind};
use std::sync::Arc;

use bytes::BytesMut;
use mcproto_protocol::decode::{PacketDecoder, PacketFrame};
use mcproto_protocol::encode::PacketEncoder;
use mcproto_protocol::{CompressionThreshold, Decode, Encode, Packet, PacketState};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::Semaphore;
use tracing::{debug, trace};

use crate::config::ServerConfig;
use crate::connection::ConnectionState;

const READ_BUF_SIZE: usize = 4096;

/// Packet-level I/O over a `tokio` [`TcpStream`], driven entirely by
/// `.await` points. The only operations exposed are sending and receiving
/// whole packets; callers never see the raw encoder/decoder buffers.
pub struct PacketIo {
    stream: TcpStream,
    enc: PacketEncoder,
    dec: PacketDecoder,
    frame: PacketFrame,
    state: ConnectionState,
}

impl PacketIo {
    pub fn new(stream: TcpStream) -> Self {
        Self {
            stream,
            enc: PacketEncoder::new(),
            dec: PacketDecoder::new(),
            frame: PacketFrame {
                id: -1,
                body: BytesMut::new(),
            },
            state: ConnectionState::handshaking(),
        }
    }

    pub fn state(&self) -> PacketState {
        self.state.get()
    }

    pub fn advance_state(&mut self, next: PacketState) {
        self.state.advance(next);
    }

    pub async fn send_packet<P>(&mut self, pkt: &P) -> anyhow::Result<()>
    where
        P: Packet + Encode,
    {
        self.enc.append_packet(pkt)?;
        let bytes = self.enc.take();
        self.stream.write_all(&bytes).await?;
        Ok(())
    }

    pub async fn recv_packet<'a, P>(&'a mut self) -> anyhow::Result<P>
    where
        P: Packet + Decode<'a>,
    {
        loop {
            if let Some(frame) = self.dec.try_next_packet()? {
                self.frame = frame;
                return self.frame.decode();
            }

            self.dec.reserve(READ_BUF_SIZE);
            let mut buf = self.dec.take_capacity();

            if self.stream.read_buf(&mut buf).await? == 0 {
                return Err(io::Error::from(ErrorKind::UnexpectedEof).into());
            }

            // Always O(1): we reserved space above and `read_buf` shouldn't
            // have grown the allocation.
            self.dec.queue_bytes(buf);
        }
    }

    pub fn set_compression(&mut self, threshold: CompressionThreshold) {
        self.enc.set_compression(threshold);
        self.dec.set_compression(threshold);
    }

    pub fn enable_encryption(&mut self, key: &[u8; 16]) {
        self.enc.enable_encryption(key);
        self.dec.enable_encryption(key);
    }
}

/// Runs an accept loop that spawns one task per connection, bounded by
/// `config.max_connections`. Runs until the listener errors.
pub async fn serve<F, Fut>(config: &ServerConfig, handle: F) -> io::Result<()>
where
    F: Fn(PacketIo) -> Fut + Send + Sync + 'static,
    Fut: std::future::Future<Output = ()> + Send + 'static,
{
    let listener = TcpListener::bind(config.address).await?;
    let sema = Arc::new(Semaphore::new(config.max_connections));
    let handle = Arc::new(handle);

    trace!(address = %config.address, "cooperative transport listening");

    loop {
        let Ok(permit) = sema.clone().acquire_owned().await else {
            return Ok(());
        };

        let (stream, remote_addr) = listener.accept().await?;
        if let Err(e) = stream.set_nodelay(true) {
            debug!("failed to set TCP_NODELAY: {e}");
        }

        let handle = handle.clone();
        trace!(%remote_addr, "accepted connection");

        tokio::spawn(async move {
            handle(PacketIo::new(stream)).await;
            drop(permit);
        });
    }
}
