//! Reads the instrument's controls from the Nucleo's Arduino-style headers.

use embassy_stm32::{
    adc::{Adc, AnyAdcChannel},
    gpio::Input,
    peripherals::ADC1,
};
use embedded_hal::digital::PinState;
use sackbut_lib::sensors::{CHORD_SWITCH_CNT, SensorReader};

/// The instrument's switches and analog sensors, as wired to the board.
///
/// Switches use the internal pull-ups and short to ground when pressed. Analog sensors share ADC1, which is run at
/// 10 bits so readings line up with the default calibrations.
pub struct Board {
    pub adc: Adc<'static, ADC1>,
    pub chord: [Input<'static>; CHORD_SWITCH_CNT],
    pub meta: Input<'static>,
    pub panic: Input<'static>,
    pub slide: AnyAdcChannel<ADC1>,
    pub breath: AnyAdcChannel<ADC1>,
    pub x: AnyAdcChannel<ADC1>,
    pub y: AnyAdcChannel<ADC1>,
}

fn level(input: &Input<'static>) -> PinState {
    if input.is_high() {
        PinState::High
    } else {
        PinState::Low
    }
}

impl SensorReader for Board {
    fn chord_switch(&mut self, index: usize) -> PinState {
        level(&self.chord[index])
    }

    fn meta_switch(&mut self) -> PinState {
        level(&self.meta)
    }

    fn panic_switch(&mut self) -> PinState {
        level(&self.panic)
    }

    fn slide(&mut self) -> u16 {
        self.adc.blocking_read(&mut self.slide)
    }

    fn breath(&mut self) -> u16 {
        self.adc.blocking_read(&mut self.breath)
    }

    fn x_axis(&mut self) -> u16 {
        self.adc.blocking_read(&mut self.x)
    }

    fn y_axis(&mut self) -> u16 {
        self.adc.blocking_read(&mut self.y)
    }
}
