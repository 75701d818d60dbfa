//! Gets each tick's messages off the board: over USB normally, or into the debug log with the `mirror` feature.

use crate::UsbDriver;
use defmt::*;
use embassy_time::Duration;
use embassy_usb::class::midi::MidiClass;
use wmidi::Channel;

#[cfg(not(feature = "mirror"))]
use {
    defmt::panic,
    embassy_time::with_timeout,
    embassy_usb::driver::EndpointError,
    sackbut_lib::transport::UsbMidiBuffer,
};

#[cfg(feature = "mirror")]
use {sackbut_lib::transport::Mirror, tinyvec::ArrayVec};

/// Size of the USB-MIDI bulk endpoint; also the largest single write.
pub const MAX_PACKET_SIZE: usize = 64;

/// Where a tick's messages wait until they're flushed.
#[cfg(not(feature = "mirror"))]
pub type Outbox = UsbMidiBuffer;

/// Where a tick's messages wait until they're flushed.
#[cfg(feature = "mirror")]
pub type Outbox = Mirror<DefmtLines>;

/// Constructs an empty [`Outbox`] for `channel`.
#[cfg(not(feature = "mirror"))]
pub fn outbox(channel: Channel) -> Outbox {
    UsbMidiBuffer::new(channel)
}

/// Constructs an empty [`Outbox`]. Mirrored lines don't mention channels.
#[cfg(feature = "mirror")]
pub fn outbox(_channel: Channel) -> Outbox {
    Mirror::new(DefmtLines::default())
}

#[cfg(not(feature = "mirror"))]
#[doc(hidden)]
struct Disconnected {}

#[cfg(not(feature = "mirror"))]
impl From<EndpointError> for Disconnected {
    fn from(val: EndpointError) -> Self {
        match val {
            EndpointError::BufferOverflow => panic!("Buffer overflow"),
            EndpointError::Disabled => Disconnected {},
        }
    }
}

#[cfg(not(feature = "mirror"))]
async fn write(
    class: &mut MidiClass<'static, UsbDriver>,
    outbox: &UsbMidiBuffer,
) -> Result<(), Disconnected> {
    for transfer in outbox.bytes().chunks(MAX_PACKET_SIZE) {
        class.write_packet(transfer).await?;
    }
    Ok(())
}

/// Writes everything queued during the last tick, giving up after `timeout` so an absent host can't stall the
/// instrument. Whatever isn't written is discarded; stale MIDI is worse than none.
#[cfg(not(feature = "mirror"))]
pub async fn flush(outbox: &mut Outbox, class: &mut MidiClass<'static, UsbDriver>, timeout: Duration) {
    if outbox.is_empty() {
        return;
    }

    match with_timeout(timeout, write(class, outbox)).await {
        Ok(Ok(())) => {}
        Ok(Err(Disconnected {})) => {
            warn!(
                "USB disconnected; discarding {} packets",
                outbox.packets().len()
            );
        }
        Err(_) => {
            warn!(
                "USB host isn't reading; discarding {} packets",
                outbox.packets().len()
            );
        }
    }
    outbox.clear();
}

/// Mirrored messages are logged as they're produced, so there's nothing left to do.
#[cfg(feature = "mirror")]
pub async fn flush(
    _outbox: &mut Outbox,
    _class: &mut MidiClass<'static, UsbDriver>,
    _timeout: Duration,
) {
}

/// Collects mirrored text and logs it a line at a time.
#[cfg(feature = "mirror")]
#[derive(Default)]
pub struct DefmtLines {
    line: ArrayVec<[u8; 64]>,
}

#[cfg(feature = "mirror")]
impl DefmtLines {
    fn emit(&mut self) {
        match core::str::from_utf8(&self.line) {
            Ok(line) => info!("{=str}", line),
            Err(_) => warn!("Mirrored line is not UTF-8: {=[u8]}", self.line.as_slice()),
        }
        self.line.clear();
    }
}

#[cfg(feature = "mirror")]
impl core::fmt::Write for DefmtLines {
    fn write_str(&mut self, s: &str) -> core::fmt::Result {
        for &byte in s.as_bytes() {
            if byte == b'\n' {
                self.emit();
            } else if self.line.try_push(byte).is_some() {
                // overlong lines are split rather than truncated
                self.emit();
                self.line.push(byte);
            }
        }
        Ok(())
    }
}
