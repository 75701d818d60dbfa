//! Tasks and types related to the [slide quantization](`SlideQuantization`) toggle.

use embassy_stm32::{exti::ExtiInput, gpio::Output};
use embassy_sync::{
    blocking_mutex::raw::CriticalSectionRawMutex,
    watch::{Receiver, Sender, Watch},
};
use sackbut_lib::configuration::{CycleConfig, SlideQuantization};

const SLIDE_QUANTIZATION_RECEIVER_CNT: usize = 1;
/// Syncs [slide quantization](`SlideQuantization`) config across tasks.
pub static SLIDE_QUANTIZATION_SYNC: Watch<
    CriticalSectionRawMutex,
    SlideQuantization,
    SLIDE_QUANTIZATION_RECEIVER_CNT,
> = Watch::new_with(SlideQuantization::Continuous);
pub type SlideQuantizationSender<'a> =
    Sender<'a, CriticalSectionRawMutex, SlideQuantization, SLIDE_QUANTIZATION_RECEIVER_CNT>;
pub type SlideQuantizationReceiver<'a> =
    Receiver<'a, CriticalSectionRawMutex, SlideQuantization, SLIDE_QUANTIZATION_RECEIVER_CNT>;

/// Input and status indicator for slide quantization.
///
/// Each press of the button toggles between a continuous slide (LED off) and one that snaps to the seven positions
/// (LED on).
#[embassy_executor::task]
pub async fn slide_quantization_config(
    mut button: ExtiInput<'static>,
    mut led: Output<'static>,
    slide_quantization: SlideQuantizationSender<'static>,
) -> ! {
    loop {
        button.wait_for_rising_edge().await;

        let new_state = slide_quantization
            .try_get()
            .expect("Slide quantization state should never be uninitialized")
            .cycle();
        slide_quantization.send(new_state);

        if new_state.is_enabled() {
            led.set_high();
        } else {
            led.set_low();
        }
    }
}
