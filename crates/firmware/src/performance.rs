//! The polling loop that plays the instrument.

use crate::{
    UsbDriver,
    breath_destination::BreathDestinationReceiver,
    sensors::Board,
    slide_quantization::SlideQuantizationReceiver,
    transport::{flush, outbox},
};
use defmt::info;
use embassy_time::{Instant, Timer};
use embassy_usb::class::midi::MidiClass;
use sackbut_lib::{configuration::Settings, performance::Performance};

/// Task responsible for sampling the controls and sending the resulting MIDI, once per polling interval.
///
/// Everything a tick decides is sent before the next tick begins; the only waiting is the pause between ticks.
#[embassy_executor::task]
pub async fn perform(
    mut board: Board,
    mut class: MidiClass<'static, UsbDriver>,
    mut slide_quantization: SlideQuantizationReceiver<'static>,
    mut breath_destination: BreathDestinationReceiver<'static>,
) -> ! {
    let mut performance = Performance::new(Settings::default());
    let mut outbox = outbox(performance.settings().channel);

    info!("Ready to play");
    loop {
        if let Some(quantization) = slide_quantization.try_changed() {
            performance.set_slide_quantization(quantization);
        }
        if let Some(destination) = breath_destination.try_changed() {
            performance.set_breath_destination(destination);
        }

        let poll_interval = performance.settings().poll_interval;
        performance.poll(&mut board, Instant::now(), &mut outbox);
        flush(&mut outbox, &mut class, poll_interval).await;

        Timer::after(poll_interval).await;
    }
}
