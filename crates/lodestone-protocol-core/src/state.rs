use std::fmt::{self, Display};

/// The state of a protocol connection. Each state has its own packet tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProtocolState {
    Handshake,
    Status,
    Login,
    Game,
}

impl ProtocolState {
    pub const ALL: [ProtocolState; 4] = [
        ProtocolState::Handshake,
        ProtocolState::Status,
        ProtocolState::Login,
        ProtocolState::Game,
    ];

    /// Legal edges: Handshake -> Status | Login, Login -> Game.
    /// Game is terminal; disconnecting is the transport's business.
    pub fn can_transition_to(self, next: ProtocolState) -> bool {
        matches!(
            (self, next),
            (ProtocolState::Handshake, ProtocolState::Status)
                | (ProtocolState::Handshake, ProtocolState::Login)
                | (ProtocolState::Login, ProtocolState::Game)
        )
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, ProtocolState::Game)
    }
}

impl Display for ProtocolState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ProtocolState::Handshake => "HANDSHAKE",
            ProtocolState::Status => "STATUS",
            ProtocolState::Login => "LOGIN",
            ProtocolState::Game => "GAME",
        })
    }
}

/// Which way a packet travels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PacketDirection {
    Serverbound,
    Clientbound,
}

impl PacketDirection {
    pub fn opposite(self) -> Self {
        match self {
            PacketDirection::Serverbound => PacketDirection::Clientbound,
            PacketDirection::Clientbound => PacketDirection::Serverbound,
        }
    }
}

impl Display for PacketDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PacketDirection::Serverbound => "serverbound",
            PacketDirection::Clientbound => "clientbound",
        })
    }
}

/// The end of the connection a session sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Client,
    Server,
}

impl Side {
    /// Direction of packets this side receives and decodes.
    pub fn inbound(self) -> PacketDirection {
        match self {
            Side::Client => PacketDirection::Clientbound,
            Side::Server => PacketDirection::Serverbound,
        }
    }

    /// Direction of packets this side encodes and sends.
    pub fn outbound(self) -> PacketDirection {
        self.inbound().opposite()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transitions() {
        use ProtocolState::*;
        assert!(Handshake.can_transition_to(Status));
        assert!(Handshake.can_transition_to(Login));
        assert!(Login.can_transition_to(Game));

        assert!(!Handshake.can_transition_to(Game));
        assert!(!Status.can_transition_to(Login));
        assert!(!Login.can_transition_to(Handshake));
        for next in ProtocolState::ALL {
            assert!(!Game.can_transition_to(next));
            assert!(!next.can_transition_to(next));
        }
    }

    #[test]
    fn test_side_directions() {
        assert_eq!(Side::Server.inbound(), PacketDirection::Serverbound);
        assert_eq!(Side::Server.outbound(), PacketDirection::Clientbound);
        assert_eq!(Side::Client.inbound(), PacketDirection::Clientbound);
        assert_eq!(Side::Client.outbound(), PacketDirection::Serverbound);
    }
}
