use crate::{
    configuration::{BreathDestination, Settings, SlideQuantization},
    mapping::{OvertoneTable, SlidePosition, map_axis, map_breath, map_slide},
    sensors::{Sample, SensorReader},
    transport::{MidiTransport, X_AXIS_CONTROL, Y_AXIS_CONTROL},
};
use embassy_time::Instant;
use wmidi::{Note, U7, U14};

mod change_gate;
pub use change_gate::*;

mod meta_mode;
pub use meta_mode::*;

mod note_state;
pub use note_state::*;

/// Number of notes addressed by "all notes off."
const MIDI_NOTE_CNT: u8 = 128;

/// What the player is asking for on this tick, in musical terms.
#[derive(Clone, Copy, Debug)]
struct Intent {
    /// [`None`] when the chord doesn't select an overtone (or belongs to the meta switch).
    note: Option<Note>,
    slide: SlidePosition,
    volume: U7,
    x: U7,
    y: U7,
}

/// The instrument: turns a [`Sample`] of its controls into MIDI, one tick at a time.
///
/// A [`Performance`] owns all of the instrument's state and is the only thing that changes it. Each tick it decides
/// whether a note should start, stop, or change, and which controllers need updating, then hands the resulting
/// messages to a [`MidiTransport`] in the order the synthesizer needs them. In order of precedence:
///
/// 1. The panic switch silences every note, and nothing else happens that tick.
/// 2. Silence (no breath) ends the sounding note.
/// 3. Breath and a valid chord start a note, after controllers are brought up to date so the note begins with the
///    right volume and bend.
/// 4. A different valid chord replaces the sounding note.
/// 5. Otherwise, while a note sounds, controllers are refreshed at most once per
///    [`cc_interval`][Settings::cc_interval], and only those that moved past their thresholds.
///
/// An invalid chord never ends a note. Sliding the fingers from one chord to another often passes through a
/// combination that isn't in the [`OvertoneTable`], and the note should ride through it.
#[derive(Clone, Debug)]
pub struct Performance {
    settings: Settings,
    overtones: OvertoneTable,
    state: NoteState,
    meta: MetaMode,
    cc_limit: RateLimit,
}

impl Performance {
    /// Constructs a silent [`Performance`] playing the default [`OvertoneTable`].
    pub fn new(settings: Settings) -> Self {
        Self {
            state: NoteState::new(&settings),
            meta: MetaMode::default(),
            cc_limit: RateLimit::new(settings.cc_interval),
            settings,
            overtones: OvertoneTable::default(),
        }
    }

    /// Getter.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Getter.
    pub fn state(&self) -> &NoteState {
        &self.state
    }

    #[cfg(test)]
    fn is_meta_active(&self) -> bool {
        self.meta.is_active()
    }

    /// Setter. Takes effect with the next slide reading.
    pub fn set_slide_quantization(&mut self, quantization: SlideQuantization) {
        info!("Slide quantization enabled: {}", quantization.is_enabled());
        self.settings.slide_quantization = quantization;
    }

    /// Setter. Takes effect with the next breath value sent.
    pub fn set_breath_destination(&mut self, destination: BreathDestination) {
        info!(
            "Breath now sent to controller {}",
            u8::from(destination.control_function())
        );
        self.settings.breath_destination = destination;
    }

    /// Reads every sensor and performs a tick.
    pub fn poll(
        &mut self,
        sensors: &mut impl SensorReader,
        now: Instant,
        transport: &mut impl MidiTransport,
    ) {
        let sample = Sample::read(sensors);
        self.tick(&sample, now, transport);
    }

    /// Performs one tick given a [`Sample`] of the controls taken at `now`.
    pub fn tick(&mut self, sample: &Sample, now: Instant, transport: &mut impl MidiTransport) {
        if sample.panic {
            self.all_notes_off(transport);
            return;
        }

        let chord = match self.meta.update(sample.meta, sample.chord) {
            // note selection is frozen while the chord belongs to the meta switch
            MetaEvent::Capturing => None,
            MetaEvent::Command(command) => {
                info!("Sending meta command {}", command.bits());
                transport.command(self.settings.channel, U7::from_u8_lossy(command.bits()));
                Some(sample.chord)
            }
            MetaEvent::Inactive => Some(sample.chord),
        };

        let intent = Intent {
            note: chord
                .and_then(|chord| self.overtones.decode(chord))
                .map(|overtone| self.overtones.note(overtone)),
            slide: map_slide(
                sample.slide,
                &self.settings.slide,
                self.settings.slide_quantization,
            ),
            volume: map_breath(sample.breath, &self.settings.breath),
            x: map_axis(sample.x),
            y: map_axis(sample.y),
        };

        self.perform(&intent, now, transport);
    }

    fn perform(&mut self, intent: &Intent, now: Instant, transport: &mut impl MidiTransport) {
        let breathing = u8::from(intent.volume) > 0;

        match (self.state.voice, intent.note) {
            (Voice::Sounding(current), _) if !breathing => {
                self.note_off(current, transport);
                self.state.voice = Voice::Silent;
            }
            (Voice::Silent, Some(note)) if breathing => {
                self.send_breath(intent.volume, transport);
                self.send_pitch_bend(intent.slide, transport);
                self.send_axes(intent.x, intent.y, transport);
                self.note_on(note, transport);
                self.state.voice = Voice::Sounding(note);
            }
            (Voice::Silent, _) => {}
            (Voice::Sounding(current), Some(note)) if note != current => {
                self.note_off(current, transport);
                self.send_pitch_bend(intent.slide, transport);
                self.send_breath(intent.volume, transport);
                self.send_axes(intent.x, intent.y, transport);
                self.note_on(note, transport);
                self.state.voice = Voice::Sounding(note);
            }
            (Voice::Sounding(_), _) => {
                if self.cc_limit.try_open(now) {
                    self.send_pitch_bend(intent.slide, transport);
                    self.send_breath(intent.volume, transport);
                    self.send_axes(intent.x, intent.y, transport);
                }
            }
        }
    }

    /// Sends a note-off for every MIDI note and forgets the sounding note, so that breath which continues past the
    /// panic starts a fresh note.
    fn all_notes_off(&mut self, transport: &mut impl MidiTransport) {
        warn!("Panic! Sending note-off for all {} notes", MIDI_NOTE_CNT);
        for n in 0..MIDI_NOTE_CNT {
            transport.note_off(
                self.settings.channel,
                Note::from(U7::from_u8_lossy(n)),
                U7::from_u8_lossy(0),
            );
        }
        self.state.voice = Voice::Silent;
    }

    fn note_on(&self, note: Note, transport: &mut impl MidiTransport) {
        info!("Note on: {} ({})", note.to_str(), note as u8);
        transport.note_on(self.settings.channel, note, self.settings.note_on_velocity);
    }

    fn note_off(&self, note: Note, transport: &mut impl MidiTransport) {
        info!("Note off: {} ({})", note.to_str(), note as u8);
        transport.note_off(self.settings.channel, note, U7::from_u8_lossy(0));
    }

    /// A slide nobody is touching leaves the last bend in place.
    fn send_pitch_bend(&mut self, slide: SlidePosition, transport: &mut impl MidiTransport) {
        let SlidePosition::Bend(bend) = slide else {
            return;
        };
        if let Some(bend) = self.state.pitch_bend.offer(bend) {
            trace!("Pitch bend: {}", bend);
            transport.pitch_bend(U14::from_u16_lossy(bend));
        }
    }

    fn send_breath(&mut self, volume: U7, transport: &mut impl MidiTransport) {
        if let Some(volume) = self.state.volume.offer(u8::from(volume).into()) {
            trace!("Breath: {}", volume);
            transport.control_change(
                self.settings.channel,
                self.settings.breath_destination.control_function(),
                U7::from_u8_lossy(volume as u8),
            );
        }
    }

    fn send_axes(&mut self, x: U7, y: U7, transport: &mut impl MidiTransport) {
        if let Some(x) = self.state.x.offer(u8::from(x).into()) {
            trace!("X axis: {}", x);
            transport.control_change(
                self.settings.channel,
                X_AXIS_CONTROL,
                U7::from_u8_lossy(x as u8),
            );
        }
        if let Some(y) = self.state.y.offer(u8::from(y).into()) {
            trace!("Y axis: {}", y);
            transport.control_change(
                self.settings.channel,
                Y_AXIS_CONTROL,
                U7::from_u8_lossy(y as u8),
            );
        }
    }
}
