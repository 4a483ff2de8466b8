//! Packet router for channel callbacks.
//!
//! The channel layer calls into [`RecordModule`] when a packet arrives,
//! when an acknowledgement for a sent packet comes back, and when a sent
//! packet times out. The module decodes the envelope and dispatches on the
//! packet variant.
//!
//! On receipt, handler errors are not returned to the channel layer as
//! errors. They become an error [`Acknowledgement`], so the sender learns
//! the outcome. Application rejection and malformed packets are therefore
//! indistinguishable on the wire.

use xrecord_types::{Acknowledgement, Packet, RecordPacketData};

use crate::acknowledge::{on_ack_create, on_ack_edit};
use crate::channel::{ChannelKeeper, ChannelPacket};
use crate::config::Config;
use crate::error::{PacketError, Result};
use crate::hooks::{NoHooks, PacketHooks};
use crate::msg::{submit_create, submit_edit, MsgSendCreateRecord, MsgSendEditRecord};
use crate::receive::{on_recv_create, on_recv_edit};
use crate::store::{RecordStore, SentRecordStore};
use crate::timeout::{on_timeout_create, on_timeout_edit};

/// The record packet module bound to one port.
#[derive(Debug)]
pub struct RecordModule<H = NoHooks> {
    config: Config,
    hooks: H,
}

impl RecordModule<NoHooks> {
    /// Create a module with no-op failure hooks.
    pub fn new(config: Config) -> Self {
        Self::with_hooks(config, NoHooks)
    }
}

impl<H: PacketHooks> RecordModule<H> {
    /// Create a module with custom failure hooks.
    pub fn with_hooks(config: Config, hooks: H) -> Self {
        Self { config, hooks }
    }

    /// The module's configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The module's hooks.
    pub fn hooks(&self) -> &H {
        &self.hooks
    }

    /// Handle an inbound edit command.
    pub fn submit_edit<C: ChannelKeeper>(
        &self,
        channels: &mut C,
        msg: &MsgSendEditRecord,
    ) -> Result<u64> {
        self.check_port(&msg.port)?;
        submit_edit(channels, msg)
    }

    /// Handle an inbound create command.
    pub fn submit_create<C: ChannelKeeper>(
        &self,
        channels: &mut C,
        msg: &MsgSendCreateRecord,
    ) -> Result<u64> {
        self.check_port(&msg.port)?;
        submit_create(channels, msg)
    }

    /// Process a packet delivered to this chain and produce the
    /// acknowledgement to write back.
    pub fn on_recv_packet<S: RecordStore>(
        &mut self,
        store: &mut S,
        packet: &ChannelPacket,
    ) -> Acknowledgement {
        tracing::debug!(
            "Received packet {} on {}/{}",
            packet.sequence,
            packet.destination_port,
            packet.destination_channel
        );

        match self.recv(store, packet) {
            Ok(bytes) => Acknowledgement::result(bytes),
            Err(e) => {
                tracing::warn!("Packet {} rejected: {}", packet.sequence, e);
                Acknowledgement::error(e.to_string())
            }
        }
    }

    fn recv<S: RecordStore>(&self, store: &mut S, packet: &ChannelPacket) -> Result<Vec<u8>> {
        self.check_port(&packet.destination_port)?;
        let policy = &self.config.validation;

        match decode_packet(&packet.data)? {
            Packet::EditRecord(data) => on_recv_edit(store, policy, &data)?
                .to_json()
                .map_err(PacketError::Encoding),
            Packet::CreateRecord(data) => on_recv_create(store, policy, &data)?
                .to_json()
                .map_err(PacketError::Encoding),
            Packet::NoData(_) => Err(PacketError::UnrecognizedPacket),
        }
    }

    /// Process the acknowledgement for a packet this chain sent.
    pub fn on_acknowledgement_packet<S: SentRecordStore>(
        &mut self,
        store: &mut S,
        packet: &ChannelPacket,
        acknowledgement: &[u8],
    ) -> Result<()> {
        self.check_port(&packet.source_port)?;
        let ack = Acknowledgement::from_bytes(acknowledgement).map_err(PacketError::AckDecode)?;

        tracing::debug!(
            "Acknowledgement for packet {} on {}/{} (success: {})",
            packet.sequence,
            packet.source_port,
            packet.source_channel,
            ack.is_success()
        );

        match decode_packet(&packet.data)? {
            Packet::EditRecord(data) => on_ack_edit(store, &mut self.hooks, &data, &ack),
            Packet::CreateRecord(data) => on_ack_create(store, &mut self.hooks, &data, &ack),
            Packet::NoData(_) => Err(PacketError::UnrecognizedPacket),
        }
    }

    /// Process the timeout of a packet this chain sent.
    pub fn on_timeout_packet(&mut self, packet: &ChannelPacket) -> Result<()> {
        self.check_port(&packet.source_port)?;

        match decode_packet(&packet.data)? {
            Packet::EditRecord(data) => on_timeout_edit(&mut self.hooks, &data),
            Packet::CreateRecord(data) => on_timeout_create(&mut self.hooks, &data),
            Packet::NoData(_) => Err(PacketError::UnrecognizedPacket),
        }
    }

    fn check_port(&self, port: &str) -> Result<()> {
        if port != self.config.packet.port {
            return Err(PacketError::WrongPort {
                expected: self.config.packet.port.clone(),
                got: port.to_string(),
            });
        }
        Ok(())
    }
}

/// Decode packet bytes into the carried variant. An envelope with no
/// variant is [`PacketError::UnrecognizedPacket`].
fn decode_packet(data: &[u8]) -> Result<Packet> {
    RecordPacketData::from_bytes(data)
        .map_err(PacketError::PacketDecode)?
        .packet
        .ok_or(PacketError::UnrecognizedPacket)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channel::{Height, MemoryChannelKeeper};
    use crate::store::{MemoryRecordStore, Record, SentRecord};
    use xrecord_types::{
        CreateRecordPacketAck, EditRecordPacketAck, EditRecordPacketData, NoData, RecordId,
        Response,
    };

    fn packet_with(envelope: RecordPacketData) -> ChannelPacket {
        ChannelPacket {
            data: envelope.to_bytes().unwrap(),
            sequence: 1,
            source_port: "record".into(),
            source_channel: "channel-0".into(),
            destination_port: "record".into(),
            destination_channel: "channel-1".into(),
            timeout_height: Height::zero(),
            timeout_timestamp: 100,
        }
    }

    fn edit_packet(editor: &str) -> ChannelPacket {
        packet_with(RecordPacketData::from(EditRecordPacketData {
            record_id: "7".into(),
            title: "T2".into(),
            content: "C2".into(),
            editor: editor.into(),
        }))
    }

    fn owned_store() -> MemoryRecordStore {
        let mut store = MemoryRecordStore::new();
        store.set_record(Record {
            id: RecordId::new(7),
            title: "T1".into(),
            content: "C1".into(),
            owner: "alice".into(),
        });
        store
    }

    #[test]
    fn successful_edit_yields_result_ack() {
        let mut module = RecordModule::new(Config::default());
        let mut store = owned_store();

        let ack = module.on_recv_packet(&mut store, &edit_packet("alice"));

        match ack.response {
            Some(Response::Result(bytes)) => {
                assert!(EditRecordPacketAck::from_json(&bytes).unwrap().ok)
            }
            other => panic!("Expected result ack, got {:?}", other),
        }
        assert_eq!(store.record(RecordId::new(7)).unwrap().title, "T2");
    }

    #[test]
    fn unauthorized_edit_yields_error_ack() {
        let mut module = RecordModule::new(Config::default());
        let mut store = owned_store();

        let ack = module.on_recv_packet(&mut store, &edit_packet("bob"));

        assert!(matches!(ack.response, Some(Response::Error(ref e)) if e.contains("not the owner")));
        assert_eq!(store.record(RecordId::new(7)).unwrap().title, "T1");
    }

    #[test]
    fn garbage_packet_yields_error_ack() {
        let mut module = RecordModule::new(Config::default());
        let mut store = owned_store();
        let mut packet = edit_packet("alice");
        packet.data = vec![0x00, 0x01];

        let ack = module.on_recv_packet(&mut store, &packet);
        assert!(!ack.is_success());
    }

    #[test]
    fn no_data_packet_is_unrecognized() {
        let mut module = RecordModule::new(Config::default());
        let mut store = owned_store();
        let packet = packet_with(RecordPacketData::new(Packet::NoData(NoData {})));

        let ack = module.on_recv_packet(&mut store, &packet);
        assert_eq!(
            ack,
            Acknowledgement::error(PacketError::UnrecognizedPacket.to_string())
        );

        let empty = packet_with(RecordPacketData::default());
        assert!(module.on_timeout_packet(&empty).is_err());
    }

    #[test]
    fn packet_for_other_port_is_rejected() {
        let mut module = RecordModule::new(Config::default());
        let mut store = owned_store();
        let mut packet = edit_packet("alice");
        packet.destination_port = "transfer".into();

        let ack = module.on_recv_packet(&mut store, &packet);
        assert!(!ack.is_success());
        assert_eq!(store.record(RecordId::new(7)).unwrap().title, "T1");
    }

    #[test]
    fn create_packet_roundtrips_through_module() {
        let mut module = RecordModule::new(Config::default());
        let mut remote = MemoryRecordStore::new();
        let mut local = MemoryRecordStore::new();
        let packet = packet_with(RecordPacketData::from(xrecord_types::CreateRecordPacketData {
            title: "hello".into(),
            content: "world".into(),
            creator: "alice".into(),
        }));

        let ack = module.on_recv_packet(&mut remote, &packet);
        match &ack.response {
            Some(Response::Result(bytes)) => {
                assert_eq!(CreateRecordPacketAck::from_json(bytes).unwrap().record_id, "0")
            }
            other => panic!("Expected result ack, got {:?}", other),
        }

        module
            .on_acknowledgement_packet(&mut local, &packet, &ack.to_bytes().unwrap())
            .unwrap();
        assert_eq!(
            local.sent_record(RecordId::new(0)),
            Some(SentRecord {
                id: RecordId::new(0),
                title: "hello".into(),
                owner: "alice".into(),
            })
        );
    }

    #[test]
    fn undecodable_acknowledgement_is_ack_decode() {
        let mut module = RecordModule::new(Config::default());
        let mut store = MemoryRecordStore::new();

        let err = module
            .on_acknowledgement_packet(&mut store, &edit_packet("alice"), &[0x00])
            .unwrap_err();
        assert!(matches!(err, PacketError::AckDecode(_)));
    }

    #[test]
    fn timeout_routes_to_hooks() {
        #[derive(Default)]
        struct Timeouts(Vec<String>);
        impl PacketHooks for Timeouts {
            fn on_edit_timeout(&mut self, data: &EditRecordPacketData) -> Result<()> {
                self.0.push(data.record_id.clone());
                Ok(())
            }
        }

        let mut module = RecordModule::with_hooks(Config::default(), Timeouts::default());
        module.on_timeout_packet(&edit_packet("alice")).unwrap();
        assert_eq!(module.hooks().0, vec!["7".to_string()]);
    }

    #[test]
    fn submit_on_unbound_port_is_rejected() {
        let module = RecordModule::new(Config::default());
        let mut keeper = MemoryChannelKeeper::new();
        keeper.open_channel("blog", "channel-0", "blog", "channel-1");

        let msg = MsgSendEditRecord {
            creator: "alice".into(),
            port: "blog".into(),
            channel_id: "channel-0".into(),
            timeout_timestamp: 5,
            record_id: "1".into(),
            title: "t".into(),
            content: "c".into(),
        };

        let err = module.submit_edit(&mut keeper, &msg).unwrap_err();
        assert!(matches!(err, PacketError::WrongPort { .. }));
        assert!(keeper.sent_packets().is_empty());
    }
}
