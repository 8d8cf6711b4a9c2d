//! The connection state machine shared by both transport variants.
//!
//! A connection begins in [`PacketState::Handshaking`] and moves to either
//! [`PacketState::Status`] or [`PacketState::Login`] once the handshake
//! packet's next-state field is read, and in the login case finishes in
//! [`PacketState::Play`] once login succeeds. No other transition is legal;
//! a transport that tries one has a bug, so we panic rather than propagate
//! an error a caller could plausibly ignore.

use mcproto_protocol::PacketState;

/// Tracks which of the four protocol states a connection is currently in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConnectionState(PacketState);

impl ConnectionState {
    /// Every connection starts here.
    pub fn handshaking() -> Self {
        Self(PacketState::Handshaking)
    }

    pub fn get(&self) -> PacketState {
        self.0
    }

    /// Moves to `next`.
    ///
    /// # Panics
    ///
    /// Panics if `next` isn't reachable from the current state.
    pub fn advance(&mut self, next: PacketState) {
        let allowed = matches!(
            (self.0, next),
            (PacketState::Handshaking, PacketState::Status)
                | (PacketState::Handshaking, PacketState::Login)
                | (PacketState::Login, PacketState::Play)
        );

        assert!(
            allowed,
            "illegal connection state transition: {:?} -> {:?}",
            self.0, next
        );

        self.0 = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_handshaking() {
        assert_eq!(ConnectionState::handshaking().get(), PacketState::Handshaking);
    }

    #[test]
    fn handshaking_can_reach_status_or_login() {
        let mut s = ConnectionState::handshaking();
        s.advance(PacketState::Status);
        assert_eq!(s.get(), PacketState::Status);

        let mut s = ConnectionState::handshaking();
        s.advance(PacketState::Login);
        assert_eq!(s.get(), PacketState::Login);
    }

    #[test]
    fn login_can_reach_play() {
        let mut s = ConnectionState::handshaking();
        s.advance(PacketState::Login);
        s.advance(PacketState::Play);
        assert_eq!(s.get(), PacketState::Play);
    }

    #[test]
    #[should_panic(expected = "illegal connection state transition")]
    fn status_cannot_reach_play() {
        let mut s = ConnectionState::handshaking();
        s.advance(PacketState::Status);
        s.advance(PacketState::Play);
    }

    #[test]
    #[should_panic(expected = "illegal connection state transition")]
    fn handshaking_cannot_skip_to_play() {
        let mut s = ConnectionState::handshaking();
        s.advance(PacketState::Play);
    }
}
