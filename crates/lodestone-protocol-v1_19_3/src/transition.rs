use lodestone_protocol_core::{Packet, ProtocolState};

use crate::packets::handshake::Handshake;
use crate::packets::login::LoginSuccess;

/// The state both ends move to once `packet` has been sent or received, if
/// it ends the current state.
pub fn next_state(packet: &dyn Packet) -> Option<ProtocolState> {
    if let Some(handshake) = packet.downcast_ref::<Handshake>() {
        return Some(handshake.intent.next_state());
    }
    if packet.is::<LoginSuccess>() {
        return Some(ProtocolState::Game);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::HandshakeIntent;
    use crate::packets::status::PingRequest;
    use lodestone_types::GameProfile;
    use uuid::Uuid;

    fn handshake(intent: HandshakeIntent) -> Handshake {
        Handshake {
            protocol_version: 761,
            server_address: "mc.example.com".into(),
            server_port: 25565,
            intent,
        }
    }

    #[test]
    fn test_next_state() {
        assert_eq!(
            next_state(&handshake(HandshakeIntent::Status)),
            Some(ProtocolState::Status)
        );
        assert_eq!(
            next_state(&handshake(HandshakeIntent::Login)),
            Some(ProtocolState::Login)
        );
        let success = LoginSuccess {
            profile: GameProfile::new(Uuid::nil(), "Steve"),
        };
        assert_eq!(next_state(&success), Some(ProtocolState::Game));
        assert_eq!(next_state(&PingRequest { payload: 1 }), None);
    }
}
