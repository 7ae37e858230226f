use lodestone_protocol_core::{magic_values, ProtocolState};

magic_values! {
    /// What the client wants to do after the handshake.
    pub enum HandshakeIntent: "handshake intent" {
        Status = 1,
        Login = 2,
    }
}

impl HandshakeIntent {
    pub fn next_state(self) -> ProtocolState {
        match self {
            HandshakeIntent::Status => ProtocolState::Status,
            HandshakeIntent::Login => ProtocolState::Login,
        }
    }
}
