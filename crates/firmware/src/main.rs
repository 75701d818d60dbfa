//! The Sackbut is [Embassy](https://embassy.dev)-based firmware for a trombone-like MIDI controller, named for the
//! trombone's Renaissance ancestor. The firmware runs on the [Nucleo-F767ZI development
//! board](https://www.st.com/en/evaluation-tools/nucleo-f767zi.html), which is powered by an F7-series STM32
//! microcontroller, and appears to the host as a USB-MIDI device.
//!
//! The player selects an overtone by chording four switches with the right hand, blows into a pressure sensor to
//! sound it, and bends it down with a slide (a 500mm SoftPot linear resistance strip), much like a trombonist. Two
//! auxiliary axes become general purpose controllers, and a thumb-operated meta switch turns the chord switches into
//! a keypad for one-shot commands. A panic switch silences everything.
//!
//! All of the musical decisions live in [`sackbut_lib`]; this crate wires it to the hardware.

#![no_std]
#![no_main]

mod breath_destination;
mod performance;
mod sensors;
mod slide_quantization;
mod transport;

use crate::{
    breath_destination::BREATH_DESTINATION_SYNC, sensors::Board,
    slide_quantization::SLIDE_QUANTIZATION_SYNC,
};
use defmt::*;
use embassy_executor::Spawner;
use embassy_stm32::{
    Config,
    adc::{Adc, AdcChannel, Resolution},
    bind_interrupts,
    exti::ExtiInput,
    gpio::{Input, Level, Output, Pull, Speed},
    peripherals,
    time::Hertz,
    usb,
};
use embassy_usb::{Builder, UsbDevice, class::midi::MidiClass};
use static_cell::StaticCell;

use defmt_rtt as _;
#[cfg(not(feature = "panic-probe"))]
use panic_halt as _;
#[cfg(feature = "panic-probe")]
use panic_probe as _;

bind_interrupts!(
    #[doc(hidden)]
    struct Irqs {
        OTG_FS => usb::InterruptHandler<peripherals::USB_OTG_FS>;
    }
);

type UsbDriver = usb::Driver<'static, peripherals::USB_OTG_FS>;

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Initializing Sackbut");

    let mut config = Config::default();
    {
        use embassy_stm32::rcc::*;
        // hse: high-speed external clock
        config.rcc.hse = Some(Hse {
            freq: Hertz(8_000_000),
            mode: HseMode::Bypass,
        });

        // pll: phase-locked loop, crucial for dividing clock
        config.rcc.pll_src = PllSource::HSE;
        config.rcc.pll = Some(Pll {
            prediv: PllPreDiv::DIV4,
            mul: PllMul::MUL216,
            divp: Some(PllPDiv::DIV2), // 8mhz / 4 * 216 / 2 = 216Mhz
            // per section 5.2 of RM0410: the 48MHz clock used for USB OTG FS is derived from main PLL VCO (PLLQ clock)
            divq: Some(PllQDiv::DIV9), // 8mhz / 4 * 216 / 9 = 48Mhz
            divr: None,
        });
        config.rcc.ahb_pre = AHBPrescaler::DIV1;
        config.rcc.apb1_pre = APBPrescaler::DIV4;
        config.rcc.apb2_pre = APBPrescaler::DIV2;
        config.rcc.sys = Sysclk::PLL1_P;
        config.rcc.mux.clk48sel = mux::Clk48sel::PLL1_Q;
    }
    let p = embassy_stm32::init(config);

    // user button (B1) toggles slide quantization; the green LED (LD1) shows when it's on
    let button = ExtiInput::new(p.PC13, p.EXTI13, Pull::None);
    let green_led = Output::new(p.PB0, Level::Low, Speed::Low);
    unwrap!(spawner.spawn(slide_quantization::slide_quantization_config(
        button,
        green_led,
        SLIDE_QUANTIZATION_SYNC.sender()
    )));

    // an external pushbutton on PD1 moves breath to channel volume; the blue LED (LD2) shows when it has
    let toggle = ExtiInput::new(p.PD1, p.EXTI1, Pull::Up);
    let blue_led = Output::new(p.PB7, Level::Low, Speed::Low);
    unwrap!(spawner.spawn(breath_destination::breath_destination_config(
        toggle,
        blue_led,
        BREATH_DESTINATION_SYNC.sender()
    )));

    // the controls, on the Arduino-style headers: switches on D2-D7, sensors on A0-A2 plus PB1 (A3 is ADC3-only)
    let mut adc = Adc::new(p.ADC1);
    adc.set_resolution(Resolution::BITS10);
    let board = Board {
        adc,
        chord: [
            Input::new(p.PE13, Pull::Up), // D3
            Input::new(p.PF14, Pull::Up), // D4
            Input::new(p.PE11, Pull::Up), // D5
            Input::new(p.PE9, Pull::Up),  // D6
        ],
        meta: Input::new(p.PF15, Pull::Up),  // D2
        panic: Input::new(p.PF13, Pull::Up), // D7
        breath: p.PA3.degrade_adc(),         // A0
        slide: p.PC0.degrade_adc(),          // A1
        x: p.PC3.degrade_adc(),              // A2
        y: p.PB1.degrade_adc(),
    };

    // Create the driver, from the HAL.
    static ENDPOINT_OUT_BUFFER: StaticCell<[u8; 256]> = StaticCell::new();
    let mut config = embassy_stm32::usb::Config::default();

    // USB devices which are self-powered (i.e., that can stay powered on if unplugged from the host)
    // need to enable vbus_detection to comply with the USB spec. Per section 6.10 of the Nucleo board
    // manual (UM1974), CN13 (the USB port) cannot power the board; external power is necessary.
    // See docs on `vbus_detection` for details.
    config.vbus_detection = true;

    let driver = usb::Driver::new_fs(
        p.USB_OTG_FS,
        Irqs,
        p.PA12,
        p.PA11,
        ENDPOINT_OUT_BUFFER.init([0; 256]),
        config,
    );

    // per https://pid.codes, FOSS projects can apply to be listed under the vendor ID owned by InterBiometrics
    let vendor_id = 0x1209;
    // product ID honors 1495, the year the sackbut first turns up in English court records
    let product_id = 0x1495;

    let mut config = embassy_usb::Config::new(vendor_id, product_id);
    config.manufacturer = Some("Pawpaw Works");
    config.product = Some("Sackbut");
    config.self_powered = true;
    config.max_power = 0;

    // Create embassy-usb DeviceBuilder using the driver and config.
    // It needs some buffers for building the descriptors.
    static CONFIG_DESCRIPTOR: StaticCell<[u8; 256]> = StaticCell::new();
    static BOS_DESCRIPTOR: StaticCell<[u8; 256]> = StaticCell::new();
    static CONTROL_BUFFER: StaticCell<[u8; 64]> = StaticCell::new();

    let mut builder = Builder::new(
        driver,
        config,
        CONFIG_DESCRIPTOR.init([0; 256]),
        BOS_DESCRIPTOR.init([0; 256]),
        &mut [], // no msos descriptors
        CONTROL_BUFFER.init([0; 64]),
    );

    // the instrument only talks, so it has no jacks to receive on
    let class = MidiClass::new(&mut builder, 0, 1, transport::MAX_PACKET_SIZE as u16);

    let usb = builder.build();
    unwrap!(spawner.spawn(usb_task(usb)));

    let slide_quantization = SLIDE_QUANTIZATION_SYNC
        .receiver()
        .expect("Slide quantization synchronizer should have a receiver available");
    let breath_destination = BREATH_DESTINATION_SYNC
        .receiver()
        .expect("Breath destination synchronizer should have a receiver available");
    unwrap!(spawner.spawn(performance::perform(
        board,
        class,
        slide_quantization,
        breath_destination
    )));
}

#[embassy_executor::task]
async fn usb_task(mut usb: UsbDevice<'static, UsbDriver>) -> ! {
    usb.run().await
}
