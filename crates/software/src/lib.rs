//! This crate contains architecture-agnostic logic for the Sackbut, a trombone-like controller which turns chorded
//! overtone switches, a slide (a linear position strip), a breath-pressure sensor, and two auxiliary axes into a live
//! [MIDI](https://midi.org/midi-1-0) performance.
//!
//! Each polling tick, a [`Sample`][sensors::Sample] of the raw inputs is handed to a
//! [`Performance`][performance::Performance], which decides which note should sound and which messages a
//! [`MidiTransport`][transport::MidiTransport] must emit to get the attached synthesizer there.

#![deny(missing_docs)]
#![no_std]

#[cfg(test)]
extern crate std;

// must come first so the logging macros are visible to the modules below
mod fmt;

pub mod configuration;

/// Pure functions which translate raw sensor readings into musical values.
pub mod mapping;

/// The note state machine and everything it needs to decide what to send each tick.
pub mod performance;

pub mod sensors;
pub mod transport;

#[cfg(test)]
mod testutil;
