//! GPIO / peripheral pin assignments for the ESP32-CAM (AI-Thinker) board.
//!
//! Single source of truth: every driver references this module rather than
//! hard-coding pin numbers.

// ---------------------------------------------------------------------------
// Fingerprint unit (UART0, shared with the boot console)
// ---------------------------------------------------------------------------

pub const FINGERPRINT_UART_TX_GPIO: i32 = 1;
pub const FINGERPRINT_UART_RX_GPIO: i32 = 3;

// ---------------------------------------------------------------------------
// Flash LED
// ---------------------------------------------------------------------------

/// On-board white flash LED (through a transistor, active HIGH).
pub const FLASH_LED_GPIO: i32 = 4;
/// LEDC PWM frequency for the flash LED.
pub const FLASH_LED_PWM_HZ: u32 = 5_000;

// ---------------------------------------------------------------------------
// Task layout
// ---------------------------------------------------------------------------

/// Stack for the request-bridge worker (TLS handshakes need room).
pub const BRIDGE_STACK_KB: usize = 12;
/// FreeRTOS priority of the request-bridge worker.
pub const BRIDGE_PRIORITY: u8 = 5;
