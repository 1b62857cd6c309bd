//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter        | Implements   | Connects to                     |
//! |----------------|--------------|---------------------------------|
//! | `config_file`  | ConfigPort   | JSON document on disk           |
//! | `hardware`     | PlantPort    | probes + relays                 |
//! | `log_sink`     | EventSink    | `log` facade                    |
//! | `sim`          | OutputPin    | in-memory pins and probes       |
//! |                | OneWireDriver|                                 |
//! | `time`         | ClockPort    | `Instant` + local wall clock    |

pub mod config_file;
pub mod hardware;
pub mod log_sink;
pub mod sim;
pub mod time;
