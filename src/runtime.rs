// Startup wiring: status LED, boot safety stop, network bring-up, listener,
// then the serve loop. Every failure before the loop is fatal; once serving,
// nothing short of process death stops the robot responding.

use std::net::{IpAddr, SocketAddr};

use tracing::info;

use crate::config::{
    DEFAULT_PORT, INVERT_FL, INVERT_FR, INVERT_RL, INVERT_RR, PINS_FL, PINS_FR, PINS_RL, PINS_RR,
    STATUS_LED_PIN,
};
use crate::drive::{Drivetrain, Level, OutputPin, Wheel, gpio, open_output_pin};
use crate::net;
use crate::web::server;

pub struct Options {
    /// Address to bind the listener to
    pub bind: IpAddr,
    /// Port for the HTTP interface
    pub port: u16,
    /// Drive the GPIO controller (false keeps everything loopback)
    pub hardware: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            bind: IpAddr::from([0, 0, 0, 0]),
            port: DEFAULT_PORT,
            hardware: true,
        }
    }
}

fn build_drivetrain(hardware: bool) -> Result<Drivetrain<Box<dyn OutputPin>>, gpio::GpioError> {
    let wheel = |pins: (u8, u8), invert: bool| -> Result<_, gpio::GpioError> {
        Ok(Wheel::new(
            open_output_pin(pins.0, hardware)?,
            open_output_pin(pins.1, hardware)?,
            invert,
        ))
    };

    Ok(Drivetrain::new(
        wheel(PINS_FL, INVERT_FL)?,
        wheel(PINS_FR, INVERT_FR)?,
        wheel(PINS_RL, INVERT_RL)?,
        wheel(PINS_RR, INVERT_RR)?,
    ))
}

pub async fn run(opts: Options) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    // LED on means the firmware reached startup
    let mut status_led = open_output_pin(STATUS_LED_PIN, opts.hardware)?;
    status_led.set_level(Level::High);

    let mut drivetrain = build_drivetrain(opts.hardware)?;
    drivetrain.stop(); // safety on boot

    let address = net::wait_for_address().await?;
    info!("Connected, IP: {}", address);
    info!("Open this in your browser: http://{}/", address);

    let listener = server::bind(SocketAddr::new(opts.bind, opts.port))?;
    info!("HTTP server on port {}", opts.port);

    server::serve(listener, drivetrain).await;
    Ok(())
}
