//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter       | Implements                   | Connects to              |
//! |---------------|------------------------------|--------------------------|
//! | `http`        | HttpTransport                | ESP-IDF HTTP client      |
//! | `log_sink`    | EventSink                    | Serial log output        |
//! | `nvs`         | ConfigPort                   | NVS / in-memory store    |
//! | `signals`     | ViewerSignal, PresenceSensor | Stream / detector tasks  |
//! | `tcp_control` | ControlServer, ControlClient | lwIP TCP sockets         |
//! | `time`        | Clock                        | ESP32 system timer       |
//! | `uart_link`   | SerialLink                   | UART0 (fingerprint unit) |
//! | `wifi`        | ConnectivityPort             | ESP-IDF WiFi STA         |

pub mod http;
pub mod log_sink;
pub mod nvs;
pub mod signals;
pub mod tcp_control;
pub mod time;
#[cfg(target_os = "espidf")]
pub mod uart_link;
pub mod wifi;
