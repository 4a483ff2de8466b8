//! Transmit coordinator.
//!
//! Resolves the channel, its counterparty and the next send sequence,
//! checks capability ownership, serializes the envelope and hands one
//! packet to the channel layer. Never retries.

use xrecord_types::RecordPacketData;

use crate::builder::encode;
use crate::channel::{ChannelKeeper, ChannelPacket, Height};
use crate::error::{PacketError, Result};

/// Send an envelope on `source_port`/`source_channel`.
///
/// Returns the sequence the packet was committed under. At most one packet
/// reaches the channel per call; channel-layer errors are passed through
/// unchanged as [`PacketError::Transport`].
pub fn transmit<C: ChannelKeeper>(
    channels: &mut C,
    envelope: &RecordPacketData,
    source_port: &str,
    source_channel: &str,
    timeout_height: Height,
    timeout_timestamp: u64,
) -> Result<u64> {
    let end = channels
        .channel(source_port, source_channel)
        .ok_or_else(|| PacketError::ChannelNotFound {
            port: source_port.to_string(),
            channel: source_channel.to_string(),
        })?;

    let destination_port = end.counterparty.port_id;
    let destination_channel = end.counterparty.channel_id;

    let sequence = channels
        .next_sequence_send(source_port, source_channel)
        .ok_or_else(|| PacketError::SequenceNotFound {
            port: source_port.to_string(),
            channel: source_channel.to_string(),
        })?;

    let capability = channels
        .channel_capability(source_port, source_channel)
        .ok_or_else(|| PacketError::CapabilityNotOwned {
            port: source_port.to_string(),
            channel: source_channel.to_string(),
        })?;

    let data = encode(envelope)?;

    let packet = ChannelPacket {
        data,
        sequence,
        source_port: source_port.to_string(),
        source_channel: source_channel.to_string(),
        destination_port,
        destination_channel,
        timeout_height,
        timeout_timestamp,
    };

    channels.send_packet(&capability, packet)?;

    tracing::info!(
        "Sent packet on {}/{} (sequence {})",
        source_port,
        source_channel,
        sequence
    );

    Ok(sequence)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::EditRequest;
    use crate::channel::{ChannelEnd, ChannelError, ChannelState, Counterparty, MemoryChannelKeeper};

    fn envelope() -> RecordPacketData {
        EditRequest {
            record_id: "7".into(),
            new_title: "T2".into(),
            new_content: "C2".into(),
            editor: "alice".into(),
        }
        .to_envelope()
    }

    fn send(keeper: &mut MemoryChannelKeeper) -> Result<u64> {
        transmit(
            keeper,
            &envelope(),
            "record",
            "channel-0",
            Height::zero(),
            1_000,
        )
    }

    #[test]
    fn missing_channel_is_channel_not_found() {
        let mut keeper = MemoryChannelKeeper::new();
        let err = send(&mut keeper).unwrap_err();
        assert!(matches!(err, PacketError::ChannelNotFound { .. }));
        assert!(keeper.sent_packets().is_empty());
    }

    #[test]
    fn missing_sequence_is_sequence_not_found() {
        let mut keeper = MemoryChannelKeeper::new();
        keeper.insert_channel(
            "record",
            "channel-0",
            ChannelEnd {
                state: ChannelState::Open,
                counterparty: Counterparty {
                    port_id: "record".into(),
                    channel_id: "channel-3".into(),
                },
            },
        );
        keeper.claim_capability("record", "channel-0");

        let err = send(&mut keeper).unwrap_err();
        assert!(matches!(err, PacketError::SequenceNotFound { .. }));
    }

    #[test]
    fn missing_capability_is_capability_not_owned() {
        let mut keeper = MemoryChannelKeeper::new();
        keeper.open_channel("record", "channel-0", "record", "channel-3");
        keeper.release_capability("record", "channel-0");

        let err = send(&mut keeper).unwrap_err();
        assert!(matches!(err, PacketError::CapabilityNotOwned { .. }));
        assert!(keeper.sent_packets().is_empty());
    }

    #[test]
    fn packet_is_addressed_to_counterparty() {
        let mut keeper = MemoryChannelKeeper::new();
        keeper.open_channel("record", "channel-0", "blog", "channel-3");

        let sequence = send(&mut keeper).unwrap();

        let packet = &keeper.sent_packets()[0];
        assert_eq!(packet.sequence, sequence);
        assert_eq!(packet.destination_port, "blog");
        assert_eq!(packet.destination_channel, "channel-3");
        assert_eq!(packet.timeout_timestamp, 1_000);
        assert_eq!(
            RecordPacketData::from_bytes(&packet.data).unwrap(),
            envelope()
        );
    }

    #[test]
    fn sequences_strictly_increase() {
        let mut keeper = MemoryChannelKeeper::new();
        keeper.open_channel("record", "channel-0", "record", "channel-3");

        let sequences: Vec<u64> = (0..5).map(|_| send(&mut keeper).unwrap()).collect();

        assert_eq!(sequences, vec![1, 2, 3, 4, 5]);
        assert!(sequences.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn transport_error_is_surfaced_verbatim() {
        let mut keeper = MemoryChannelKeeper::new();
        keeper.open_channel("record", "channel-0", "record", "channel-3");
        keeper.fail_next_send("flow control");

        let err = send(&mut keeper).unwrap_err();
        assert!(matches!(
            err,
            PacketError::Transport(ChannelError::Rejected(ref r)) if r == "flow control"
        ));

        // no retry, and the failed call consumed no sequence
        assert!(keeper.sent_packets().is_empty());
        assert_eq!(send(&mut keeper).unwrap(), 1);
    }

    #[test]
    fn closed_channel_surfaces_transport_error() {
        let mut keeper = MemoryChannelKeeper::new();
        keeper.open_channel("record", "channel-0", "record", "channel-3");
        keeper.close_channel("record", "channel-0");

        let err = send(&mut keeper).unwrap_err();
        assert!(matches!(
            err,
            PacketError::Transport(ChannelError::Closed { .. })
        ));
    }
}
