//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter    | Implements  | Connects to                   |
//! |------------|-------------|-------------------------------|
//! | `hardware` | InputPort   | door/button GPIO, knob ADC    |
//! |            | OutputSink  | heating relay, lamp, indicator|
//! | `log_sink` | EventSink   | Serial log output             |
//! |            | (reporter)  | StatusBoard → status line     |

pub mod hardware;
pub mod log_sink;
