//! VoteCam Firmware: Main Entry Point
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                       │
//! │                                                                  │
//! │  UartLink        Dispatcher<TcpControlServer>   FlashLed         │
//! │  (SerialLink)    (ControlPort)                  (Illumination)   │
//! │  RequestBridge   Esp32TimeAdapter   SharedFlag   LogEventSink    │
//! │  (BridgePort)    (Clock + WDT)      (signals)    (EventSink)     │
//! │                                                                  │
//! │  ──────────────── Port Trait Boundary ───────────────────        │
//! │                                                                  │
//! │  ┌────────────────────────────────────────────────────────┐      │
//! │  │  StationService + SessionContext (main task)           │      │
//! │  │  vote · enroll · profile · delete                      │      │
//! │  └────────────────────────────────────────────────────────┘      │
//! │                                                                  │
//! │  BridgeWorker + EspHttpTransport (core 0)                        │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use anyhow::{Context, Result};
use log::{info, warn};

use esp_idf_hal::ledc::{LedcDriver, LedcTimerDriver, config::TimerConfig};
use esp_idf_hal::prelude::*;
use esp_idf_hal::uart::{UartDriver, config::Config as UartConfig};
use esp_idf_svc::eventloop::EspSystemEventLoop;
use esp_idf_svc::nvs::EspDefaultNvsPartition;
use esp_idf_svc::wifi::{BlockingWifi, EspWifi};

use votecam::adapters::http::EspHttpTransport;
use votecam::adapters::log_sink::LogEventSink;
use votecam::adapters::nvs::NvsAdapter;
use votecam::adapters::signals::SharedFlag;
use votecam::adapters::tcp_control::TcpControlServer;
use votecam::adapters::time::Esp32TimeAdapter;
use votecam::adapters::uart_link::UartLink;
use votecam::adapters::wifi::{ConnectivityPort, WifiAdapter};
use votecam::app::ports::{Clock, ConfigError, ConfigPort};
use votecam::app::service::StationService;
use votecam::bridge::RequestBridge;
use votecam::config::SystemConfig;
use votecam::control::Dispatcher;
use votecam::drivers::flash_led::FlashLed;
use votecam::drivers::task_pin::{self, Core};
use votecam::drivers::watchdog::Watchdog;
use votecam::pins;
use votecam::session::SessionContext;

/// Load order: NVS, then the build-time JSON document, then defaults.
fn load_config(nvs: &NvsAdapter) -> Result<SystemConfig> {
    let config = match nvs.load() {
        Ok(cfg) => {
            info!("Config loaded from NVS");
            cfg
        }
        Err(ConfigError::NotFound) => match option_env!("VOTECAM_CONFIG_JSON") {
            Some(json) => {
                let cfg = SystemConfig::from_json(json).context("VOTECAM_CONFIG_JSON")?;
                if let Err(e) = nvs.save(&cfg) {
                    warn!("Provisioned config not persisted: {}", e);
                }
                info!("Config provisioned from build environment");
                cfg
            }
            None => {
                warn!("No stored config, using defaults");
                SystemConfig::default()
            }
        },
        Err(e) => {
            warn!("NVS config load failed ({}), using defaults", e);
            SystemConfig::default()
        }
    };
    config.validate().context("configuration")?;
    Ok(config)
}

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("VoteCam v{}", env!("CARGO_PKG_VERSION"));

    // ── 2. Configuration ──────────────────────────────────────
    let nvs = NvsAdapter::new().context("NVS init")?;
    let config = load_config(&nvs)?;

    let peripherals = Peripherals::take()?;
    let sysloop = EspSystemEventLoop::take()?;
    let nvs_partition = EspDefaultNvsPartition::take()?;

    // ── 3. WiFi station ───────────────────────────────────────
    let driver = EspWifi::new(peripherals.modem, sysloop.clone(), Some(nvs_partition))?;
    let mut wifi = WifiAdapter::new(BlockingWifi::wrap(driver, sysloop)?);
    match wifi.set_credentials(&config.wifi_ssid, &config.wifi_password) {
        Ok(()) => {
            if let Err(e) = wifi.connect() {
                warn!("WiFi: {} (will retry)", e);
            }
        }
        Err(e) => warn!("WiFi: {}, logging service unreachable", e),
    }

    // ── 4. Request bridge worker on core 0 ────────────────────
    let (bridge, worker) = RequestBridge::new(config.enqueue_policy);
    let transport = EspHttpTransport::new(config.http_timeout_ms);
    task_pin::spawn_on_core(
        Core::Pro,
        pins::BRIDGE_PRIORITY,
        pins::BRIDGE_STACK_KB,
        "bridge\0",
        move || worker.run(transport),
    )?;

    // ── 5. Peripherals ────────────────────────────────────────
    info!(
        "Fingerprint UART0 tx=GPIO{} rx=GPIO{} @ {} baud",
        pins::FINGERPRINT_UART_TX_GPIO,
        pins::FINGERPRINT_UART_RX_GPIO,
        config.serial_baud
    );
    let uart = UartDriver::new(
        peripherals.uart0,
        peripherals.pins.gpio1,
        peripherals.pins.gpio3,
        Option::<esp_idf_hal::gpio::AnyIOPin>::None,
        Option::<esp_idf_hal::gpio::AnyIOPin>::None,
        &UartConfig::new().baudrate(Hertz(config.serial_baud)),
    )?;

    info!("Flash LED on GPIO{}", pins::FLASH_LED_GPIO);
    let timer = LedcTimerDriver::new(
        peripherals.ledc.timer0,
        &TimerConfig::new().frequency(pins::FLASH_LED_PWM_HZ.Hz()),
    )?;
    let channel = LedcDriver::new(peripherals.ledc.channel0, timer, peripherals.pins.gpio4)?;
    let light = FlashLed::new(channel, config.flash_duty);

    let control = Dispatcher::new(TcpControlServer::bind(config.control_port)?);

    // Producers are the camera stream server and the face detector.
    // Neither is part of this firmware image, so both flags stay false
    // and no vote is ever armed until they are linked in.
    let viewer = SharedFlag::new();
    let mut presence = SharedFlag::new();
    warn!("camera: no stream server or face detector linked, presence trigger idle");

    let clock = Esp32TimeAdapter::new().with_watchdog(Watchdog::new(config.watchdog_timeout_secs));

    // ── 6. Station ────────────────────────────────────────────
    let mut ctx = SessionContext::new(
        UartLink::new(uart),
        control,
        bridge,
        light,
        clock,
        viewer,
        &config,
    );
    let mut sink = LogEventSink::new();
    let mut station = StationService::new(&config);
    station.start(&mut sink);

    // ── 7. Main loop ──────────────────────────────────────────
    loop {
        wifi.poll(ctx.clock.now_ms());
        station.step(&mut ctx, &mut presence, &mut sink);
        ctx.sleep_ms(config.loop_interval_ms);
    }
}
