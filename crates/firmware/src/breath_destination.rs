//! Tasks and types related to the [breath destination](`BreathDestination`) toggle.

use embassy_stm32::{exti::ExtiInput, gpio::Output};
use embassy_sync::{
    blocking_mutex::raw::CriticalSectionRawMutex,
    watch::{Receiver, Sender, Watch},
};
use sackbut_lib::configuration::{BreathDestination, CycleConfig};

const BREATH_DESTINATION_RECEIVER_CNT: usize = 1;
/// Syncs [breath destination](`BreathDestination`) config across tasks.
pub static BREATH_DESTINATION_SYNC: Watch<
    CriticalSectionRawMutex,
    BreathDestination,
    BREATH_DESTINATION_RECEIVER_CNT,
> = Watch::new_with(BreathDestination::BreathController);
pub type BreathDestinationSender<'a> =
    Sender<'a, CriticalSectionRawMutex, BreathDestination, BREATH_DESTINATION_RECEIVER_CNT>;
pub type BreathDestinationReceiver<'a> =
    Receiver<'a, CriticalSectionRawMutex, BreathDestination, BREATH_DESTINATION_RECEIVER_CNT>;

/// Input and status indicator for the breath destination.
///
/// Each press of the button moves breath between the breath controller (LED off) and channel volume (LED on), for
/// patches that ignore CC 2.
#[embassy_executor::task]
pub async fn breath_destination_config(
    mut button: ExtiInput<'static>,
    mut led: Output<'static>,
    breath_destination: BreathDestinationSender<'static>,
) -> ! {
    loop {
        button.wait_for_rising_edge().await;

        let new_state = breath_destination
            .try_get()
            .expect("Breath destination state should never be uninitialized")
            .cycle();
        breath_destination.send(new_state);

        match new_state {
            BreathDestination::BreathController => led.set_low(),
            BreathDestination::ChannelVolume => led.set_high(),
        }
    }
}
