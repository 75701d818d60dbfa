//! Stand-ins for the hardware, for driving the instrument in tests.

use crate::{
    sensors::{CHORD_SWITCH_CNT, SensorReader},
    transport::MidiTransport,
};
use embedded_hal::digital::PinState;
use std::vec::Vec;
use wmidi::{Channel, ControlFunction, ControlValue, MidiMessage, Note, U14, Velocity};

/// Sensors whose readings are whatever the test says they are.
#[derive(Clone, Copy, Debug)]
pub struct FakeSensors {
    pub chord: [PinState; CHORD_SWITCH_CNT],
    pub meta: PinState,
    pub panic: PinState,
    pub slide: u16,
    pub breath: u16,
    pub x: u16,
    pub y: u16,
}

impl SensorReader for FakeSensors {
    fn chord_switch(&mut self, index: usize) -> PinState {
        self.chord[index]
    }

    fn meta_switch(&mut self) -> PinState {
        self.meta
    }

    fn panic_switch(&mut self) -> PinState {
        self.panic
    }

    fn slide(&mut self) -> u16 {
        self.slide
    }

    fn breath(&mut self) -> u16 {
        self.breath
    }

    fn x_axis(&mut self) -> u16 {
        self.x
    }

    fn y_axis(&mut self) -> u16 {
        self.y
    }
}

/// A transport which remembers everything sent through it. Pitch bend is recorded on channel 1.
#[derive(Debug, Default)]
pub struct Recorder {
    pub sent: Vec<MidiMessage<'static>>,
}

impl Recorder {
    /// Returns everything recorded so far, leaving the recorder empty.
    pub fn take(&mut self) -> Vec<MidiMessage<'static>> {
        core::mem::take(&mut self.sent)
    }
}

impl MidiTransport for Recorder {
    fn note_on(&mut self, channel: Channel, note: Note, velocity: Velocity) {
        self.sent.push(MidiMessage::NoteOn(channel, note, velocity));
    }

    fn note_off(&mut self, channel: Channel, note: Note, velocity: Velocity) {
        self.sent.push(MidiMessage::NoteOff(channel, note, velocity));
    }

    fn pitch_bend(&mut self, value: U14) {
        self.sent
            .push(MidiMessage::PitchBendChange(Channel::Ch1, value));
    }

    fn control_change(&mut self, channel: Channel, control: ControlFunction, value: ControlValue) {
        self.sent
            .push(MidiMessage::ControlChange(channel, control, value));
    }
}
