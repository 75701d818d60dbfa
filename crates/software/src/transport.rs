//! Destinations for the messages a performance produces.

mod mirror;
pub use mirror::*;

mod usb;
pub use usb::*;

use wmidi::{Channel, ControlFunction, ControlValue, Note, U7, U14, Velocity};

/// Controller for the auxiliary X axis (General Purpose Controller 1, CC 16).
pub const X_AXIS_CONTROL: ControlFunction = ControlFunction::GENERAL_PURPOSE_CONTROLLER_1;
/// Controller for the auxiliary Y axis (General Purpose Controller 2, CC 17).
pub const Y_AXIS_CONTROL: ControlFunction = ControlFunction::GENERAL_PURPOSE_CONTROLLER_2;

/// A sink for outgoing MIDI messages.
///
/// Implementations are expected to accept every message without blocking; a tick emits everything it has to say
/// before the next one begins.
pub trait MidiTransport {
    /// Starts a note.
    fn note_on(&mut self, channel: Channel, note: Note, velocity: Velocity);

    /// Stops a note.
    fn note_off(&mut self, channel: Channel, note: Note, velocity: Velocity);

    /// Bends every sounding note. The instrument has a single pitch bend, so the implementation chooses the channel.
    fn pitch_bend(&mut self, value: U14);

    /// Sets a continuous controller.
    fn control_change(&mut self, channel: Channel, control: ControlFunction, value: ControlValue);

    /// Sends a one-shot command chorded while the meta switch was held.
    ///
    /// Commands travel as a note-on whose note number is the command code, which is enough for DAWs with MIDI learn
    /// (e.g., for scene selection) to tell them apart.
    fn command(&mut self, channel: Channel, code: U7) {
        self.note_on(channel, Note::from(code), U7::from_u8_lossy(127));
    }
}
