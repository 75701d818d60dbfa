use super::{MidiTransport, X_AXIS_CONTROL, Y_AXIS_CONTROL};
use core::fmt::Write;
use wmidi::{Channel, ControlFunction, ControlValue, Note, U7, U14, Velocity};

/// A [`MidiTransport`] which describes each message as a line of text instead of sending it.
///
/// Handy on the bench, when there's no synth attached but there is a debug probe.
pub struct Mirror<W> {
    out: W,
}

impl<W: Write> Mirror<W> {
    /// Constructs a [`Mirror`] writing to `out`.
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn line(&mut self, args: core::fmt::Arguments) {
        // a lost debug line is not worth interrupting the performance over
        let _ = self.out.write_fmt(args);
        let _ = self.out.write_char('\n');
    }
}

impl<W: Write> MidiTransport for Mirror<W> {
    fn note_on(&mut self, _channel: Channel, note: Note, _velocity: Velocity) {
        self.line(format_args!("ON {}", note as u8));
    }

    fn note_off(&mut self, _channel: Channel, note: Note, _velocity: Velocity) {
        self.line(format_args!("OFF {}", note as u8));
    }

    fn pitch_bend(&mut self, value: U14) {
        self.line(format_args!("BEND {}", u16::from(value)));
    }

    fn control_change(&mut self, _channel: Channel, control: ControlFunction, value: ControlValue) {
        let value = u8::from(value);
        match control {
            ControlFunction::BREATH_CONTROLLER => self.line(format_args!("BC {}", value)),
            ControlFunction::CHANNEL_VOLUME => self.line(format_args!("VOL {}", value)),
            X_AXIS_CONTROL => self.line(format_args!("X {}", value)),
            Y_AXIS_CONTROL => self.line(format_args!("Y {}", value)),
            other => self.line(format_args!("CC {} {}", u8::from(other), value)),
        }
    }

    fn command(&mut self, _channel: Channel, code: U7) {
        self.line(format_args!("META {:X}", u8::from(code)));
    }
}
