//! # Modem Core
//!
//! Crate compartilhada que coleta estatísticas por canal da interface HTTP
//! de gerenciamento de um cable modem e normaliza os registros heterogêneos
//! do dispositivo em um modelo unificado.
//!
//! ## Módulos
//! - [`types`] – Canal unificado, estatísticas e tipo de dispositivo
//! - [`modem`] – Trait de capacidade comum a todos os drivers
//! - [`transport`] – GET HTTP (ureq) com timeout e headers fixos
//! - [`parse`] – Helpers trim-and-parse com default zero
//! - [`coda56`] – Driver DOCSIS (fetch + normalização)
//! - [`config`] – Configuração unificada via TOML

pub mod types;
pub mod modem;
pub mod transport;
pub mod parse;
pub mod coda56;
pub mod config;

// Re-exports convenientes
pub use types::{ModemChannel, ModemStats, ModemType};
pub use modem::{CachedStats, Modem};
pub use transport::{HttpGet, TransportError, UreqTransport};
pub use coda56::Coda56;
pub use config::{AppConfig, ModemConfig, PollerConfig};
