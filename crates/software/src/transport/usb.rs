//! Queues messages as [USB-MIDI](https://www.usb.org/sites/default/files/midi10.pdf) event packets.

use super::MidiTransport;
use tinyvec::ArrayVec;
use wmidi::{Channel, ControlFunction, ControlValue, MidiMessage, Note, U14, Velocity};

/// Room for a full panic burst (128 note-offs) with plenty left over for an ordinary tick.
pub const USB_MIDI_PACKET_CAPACITY: usize = 256;

/// A 32-bit USB-MIDI Event Packet: a header byte (cable number and code index number) followed by the MIDI event.
pub type UsbMidiPacket = [u8; 4];

/// A [`MidiTransport`] which encodes messages as USB-MIDI event packets, holding them until they're drained.
#[derive(Clone, Debug)]
pub struct UsbMidiBuffer {
    channel: Channel,
    packets: ArrayVec<[UsbMidiPacket; USB_MIDI_PACKET_CAPACITY]>,
    dropped: usize,
}

impl UsbMidiBuffer {
    /// Constructs an empty [`UsbMidiBuffer`]. Pitch bend is sent on `channel`.
    pub fn new(channel: Channel) -> Self {
        Self {
            channel,
            packets: ArrayVec::new(),
            dropped: 0,
        }
    }

    /// Returns the queued packets back to back, ready to be written to a bulk endpoint.
    pub fn bytes(&self) -> &[u8] {
        self.packets.as_slice().as_flattened()
    }

    /// Returns the queued packets.
    pub fn packets(&self) -> &[UsbMidiPacket] {
        self.packets.as_slice()
    }

    /// Determine if any packets are queued.
    pub fn is_empty(&self) -> bool {
        self.packets.is_empty()
    }

    /// Forgets every queued packet, typically once they've been written.
    pub fn clear(&mut self) {
        self.packets.clear();
    }

    /// Number of messages discarded so far because the queue was full.
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    fn push(&mut self, msg: MidiMessage<'static>) {
        let Some(packet) = encode(&msg) else {
            warn!("Message cannot be carried by a single USB-MIDI event packet");
            return;
        };

        if self.packets.try_push(packet).is_some() {
            self.dropped += 1;
            warn!(
                "USB-MIDI queue is full; {} messages dropped so far",
                self.dropped
            );
        }
    }
}

/// Wraps a channel message in a packet for virtual cable 0.
///
/// For channel messages, the code index number is simply the high nibble of the status byte.
fn encode(msg: &MidiMessage) -> Option<UsbMidiPacket> {
    let mut packet = [0_u8; 4];
    msg.copy_to_slice(&mut packet[1..]).ok()?;
    packet[0] = packet[1] >> 4;
    Some(packet)
}

impl MidiTransport for UsbMidiBuffer {
    fn note_on(&mut self, channel: Channel, note: Note, velocity: Velocity) {
        self.push(MidiMessage::NoteOn(channel, note, velocity));
    }

    fn note_off(&mut self, channel: Channel, note: Note, velocity: Velocity) {
        self.push(MidiMessage::NoteOff(channel, note, velocity));
    }

    fn pitch_bend(&mut self, value: U14) {
        self.push(MidiMessage::PitchBendChange(self.channel, value));
    }

    fn control_change(&mut self, channel: Channel, control: ControlFunction, value: ControlValue) {
        self.push(MidiMessage::ControlChange(channel, control, value));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wmidi::U7;

    #[test]
    fn packets() {
        let mut buffer = UsbMidiBuffer::new(Channel::Ch1);
        buffer.note_on(Channel::Ch1, Note::C4, U7::from_u8_lossy(127));
        buffer.note_off(Channel::Ch2, Note::C4, U7::from_u8_lossy(0));
        buffer.control_change(
            Channel::Ch1,
            ControlFunction::BREATH_CONTROLLER,
            U7::from_u8_lossy(5),
        );
        buffer.pitch_bend(U14::from_u16_lossy(8191));

        assert_eq!(
            &[
                [0x09, 0x90, 60, 127],
                [0x08, 0x81, 60, 0],
                [0x0b, 0xb0, 2, 5],
                [0x0e, 0xe0, 0x7f, 0x3f],
            ],
            buffer.packets(),
            "Expected left but got right"
        );
        assert_eq!(16, buffer.bytes().len());
        assert_eq!(&[0x09, 0x90, 60, 127], &buffer.bytes()[..4]);
    }

    #[test]
    fn command_is_a_note_on() {
        let mut buffer = UsbMidiBuffer::new(Channel::Ch1);
        buffer.command(Channel::Ch1, U7::from_u8_lossy(0b1110));
        assert_eq!(&[[0x09, 0x90, 0b1110, 127]], buffer.packets());
    }

    #[test]
    fn full_queue_drops_rather_than_overflow() {
        let mut buffer = UsbMidiBuffer::new(Channel::Ch1);
        for _ in 0..USB_MIDI_PACKET_CAPACITY + 10 {
            buffer.note_off(Channel::Ch1, Note::C4, U7::from_u8_lossy(0));
        }
        assert_eq!(USB_MIDI_PACKET_CAPACITY, buffer.packets().len());
        assert_eq!(10, buffer.dropped());

        buffer.clear();
        assert!(buffer.is_empty());
    }
}
