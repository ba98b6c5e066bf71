#![no_std]
#![no_main]

use defmt::{error, info, trace};
use defmt_rtt as _;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Level, Output};
use embassy_rp::peripherals::USB;
use embassy_rp::usb::Driver;
use embassy_time::{Duration, Ticker};
use embassy_usb::class::hid::State;
use embassy_usb::{Builder, Config as UsbConfig};
use gpio_gamepad::{
    configure_usb_hid, Controller, GpioLines, HidTransport, OperatingMode, PadController,
    PinBank, PinSampler, ReportSignal, SignalSink, UsbHidOutput, BOARD_REVISION,
    POLL_INTERVAL_MS,
};
use static_cell::StaticCell;

#[cfg(feature = "dev-panic")]
use panic_probe as _;
#[cfg(feature = "prod-panic")]
use panic_reset as _;

bind_interrupts!(struct Irqs {
    USBCTRL_IRQ => embassy_rp::usb::InterruptHandler<USB>;
});

/// Signal for passing reports from the poll task to the output task.
/// Using Signal instead of Channel provides "latest value wins" semantics:
/// only the most recent report matters to the host.
static REPORT_SIGNAL: StaticCell<ReportSignal> = StaticCell::new();

/// USB device configuration buffer.
static CONFIG_DESCRIPTOR: StaticCell<[u8; 256]> = StaticCell::new();
static BOS_DESCRIPTOR: StaticCell<[u8; 256]> = StaticCell::new();
static MSOS_DESCRIPTOR: StaticCell<[u8; 256]> = StaticCell::new();
static CONTROL_BUF: StaticCell<[u8; 64]> = StaticCell::new();

/// HID state.
static HID_STATE: StaticCell<State> = StaticCell::new();

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("GPIO gamepad starting ({:?})...", BOARD_REVISION);

    let p = embassy_rp::init(embassy_rp::config::Config::default());

    // Initialize the report signal (latest-value semantics)
    let signal: &'static ReportSignal = REPORT_SIGNAL.init(ReportSignal::new());

    // --- Switch inputs ---
    // GPIO 23-25 and 29 are wired to the Pico's regulator, VBUS sense, LED and
    // VSYS divider.
    let bank: PinBank = [
        Some(p.PIN_0.into()),
        Some(p.PIN_1.into()),
        Some(p.PIN_2.into()),
        Some(p.PIN_3.into()),
        Some(p.PIN_4.into()),
        Some(p.PIN_5.into()),
        Some(p.PIN_6.into()),
        Some(p.PIN_7.into()),
        Some(p.PIN_8.into()),
        Some(p.PIN_9.into()),
        Some(p.PIN_10.into()),
        Some(p.PIN_11.into()),
        Some(p.PIN_12.into()),
        Some(p.PIN_13.into()),
        Some(p.PIN_14.into()),
        Some(p.PIN_15.into()),
        Some(p.PIN_16.into()),
        Some(p.PIN_17.into()),
        Some(p.PIN_18.into()),
        Some(p.PIN_19.into()),
        Some(p.PIN_20.into()),
        Some(p.PIN_21.into()),
        Some(p.PIN_22.into()),
        None,
        None,
        None,
        Some(p.PIN_26.into()),
        Some(p.PIN_27.into()),
        Some(p.PIN_28.into()),
        None,
    ];

    // Fails on a map that uses a GPIO missing from the bank above.
    let sampler = match PinSampler::new(GpioLines::new(bank), BOARD_REVISION.pin_map()) {
        Ok(sampler) => sampler,
        Err(e) => defmt::panic!("Invalid pin map: {:?}", e),
    };
    let transport = HidTransport::new(SignalSink::new(signal));
    let controller = Controller::initialize(sampler, transport);

    let mode = controller.mode();
    info!("Operating mode: {:?}", mode);

    // On-board LED shows the boot-selected mode
    let led = Output::new(p.PIN_25, Level::from(mode == OperatingMode::LeftStick));

    // --- USB Setup ---
    let usb_driver = Driver::new(p.USB, Irqs);

    let mut usb_config = UsbConfig::new(0x1209, 0x0001); // pid.codes test VID/PID
    usb_config.manufacturer = Some("Rust Gamepad");
    usb_config.product = Some("GPIO Gamepad");
    usb_config.serial_number = Some("001");
    usb_config.max_power = 100;
    usb_config.max_packet_size_0 = 64;

    let config_descriptor = CONFIG_DESCRIPTOR.init([0; 256]);
    let bos_descriptor = BOS_DESCRIPTOR.init([0; 256]);
    let msos_descriptor = MSOS_DESCRIPTOR.init([0; 256]);
    let control_buf = CONTROL_BUF.init([0; 64]);

    let mut builder = Builder::new(
        usb_driver,
        usb_config,
        config_descriptor,
        bos_descriptor,
        msos_descriptor,
        control_buf,
    );

    // Configure HID class
    let hid_state = HID_STATE.init(State::new());
    let hid_writer = configure_usb_hid(&mut builder, hid_state);

    // Build the USB device
    let usb_device = builder.build();

    // Create output
    let usb_output = UsbHidOutput::new(hid_writer);

    // Spawn tasks (unwrap the SpawnToken, then spawn)
    spawner.spawn(usb_task(usb_device).unwrap());
    spawner.spawn(output_task(usb_output, signal).unwrap());
    spawner.spawn(poll_task(controller, led).unwrap());

    info!("GPIO gamepad initialized, polling switches...");
}

/// USB device task - runs the USB stack.
#[embassy_executor::task]
async fn usb_task(mut device: embassy_usb::UsbDevice<'static, Driver<'static, USB>>) {
    device.run().await;
}

/// Poll task - samples the switches and reports changes once per interval.
///
/// Owns the mode LED so it stays driven for the life of the firmware.
#[embassy_executor::task]
async fn poll_task(mut controller: PadController, _led: Output<'static>) {
    let mut ticker = Ticker::every(Duration::from_millis(POLL_INTERVAL_MS));

    loop {
        if controller.tick() {
            trace!("Report: {:?}", controller.transport().report());
        }
        ticker.next().await;
    }
}

/// Output task - waits for report signals and sends them to USB HID.
#[embassy_executor::task]
async fn output_task(mut output: UsbHidOutput<'static>, signal: &'static ReportSignal) {
    // Wait for USB to be ready
    output.wait_ready().await;
    info!("USB HID ready, forwarding reports...");

    loop {
        // Wait for the next report (blocks until signaled)
        let report = signal.wait().await;
        if let Err(e) = output.send(&report).await {
            error!("Output error: {:?}", e);
        }
    }
}
