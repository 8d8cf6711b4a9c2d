//! The parallel-threads transport: one OS thread per connection.

use std::io::{self, ErrorKind, Read, Write};
use std::net::{TcpListener, TcpStream};

use bytes::BytesMut;
use mcproto_protocol::decode::{PacketDecoder, PacketFrame};
use mcproto_protocol::encode::PacketEncoder;
use mcproto_protocol::{CompressionThreshold, Decode, Encode, Packet, PacketState};
use tracing::{debug, trace};

use crate::config::ServerConfig;
use crate::connection::ConnectionState;

const READ_BUF_SIZE: usize = 4096;

/// Packet-level I/O over a blocking [`TcpStream`]. Reads and writes block
/// the calling thread directly; intended to be driven from a thread spawned
/// per connection by [`serve`].
pub struct BlockingPacketIo {
    stream: TcpStream,
    enc: PacketEncoder,
    dec: PacketDecoder,
    frame: PacketFrame,
    state: ConnectionState,
}

impl BlockingPacketIo {
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

    pub fn send_packet<P>(&mut self, pkt: &P) -> anyhow::Result<()>
    where
        P: Packet + Encode,
    {
        self.enc.append_packet(pkt)?;
        let bytes = self.enc.take();
        self.stream.write_all(&bytes)?;
        Ok(())
    }

    pub fn recv_packet<'a, P>(&'a mut self) -> anyhow::Result<P>
    where
        P: Packet + Decode<'a>,
    {
        loop {
            if let Some(frame) = self.dec.try_next_packet()? {
                self.frame = frame;
                return self.frame.decode();
            }

            self.dec.reserve(READ_BUF_SIZE);
            let mut chunk = [0u8; READ_BUF_SIZE];
            let n = self.stream.read(&mut chunk)?;

            if n == 0 {
                return Err(io::Error::from(ErrorKind::UnexpectedEof).into());
            }

            self.dec.queue_slice(&chunk[..n]);
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

/// Runs an accept loop that spawns one OS thread per connection, refusing
/// new connections once `config.max_connections` threads are outstanding.
/// Blocks the calling thread until the listener errors.
pub fn serve(
    config: &ServerConfig,
    handle: impl Fn(BlockingPacketIo) + Clone + Send + 'static,
) -> io::Result<()> {
    let listener = TcpListener::bind(config.address)?;
    let mut active: Vec<std::thread::JoinHandle<()>> = Vec::new();

    trace!(address = %config.address, "blocking transport listening");

    for stream in listener.incoming() {
        let stream = stream?;
        if let Err(e) = stream.set_nodelay(true) {
            debug!("failed to set TCP_NODELAY: {e}");
        }

        active.retain(|h| !h.is_finished());

        if active.len() >= config.max_connections {
            debug!(
                max_connections = config.max_connections,
                "rejecting connection, at capacity"
            );
            drop(stream);
            continue;
        }

        let handle = handle.clone();
        active.push(std::thread::spawn(move || handle(BlockingPacketIo::new(stream))));
    }

    Ok(())
}
