//! Driver do Hitron CODA-56 (DOCSIS 3.1).
//!
//! A interface web expõe quatro endpoints JSON não documentados:
//! - `dsinfo` – downstream SC-QAM
//! - `dsofdminfo` – downstream OFDM
//! - `usinfo` – upstream SC-QAM
//! - `usofdminfo` – upstream OFDMA (decodificado, ainda não normalizado)
//!
//! O blob bruto é buscado uma vez por ciclo de polling e fica em cache até
//! [`Modem::clear_stats`].

pub mod fetch;
pub mod normalize;
pub mod records;

pub use normalize::normalize;

use crate::modem::{CachedStats, Modem};
use crate::transport::HttpGet;
use crate::types::{ModemStats, ModemType};
use tracing::debug;

/// Endereço padrão da interface de gerenciamento.
pub const DEFAULT_ADDRESS: &str = "192.168.100.1";

/// Instância de um CODA-56.
pub struct Coda56<T: HttpGet> {
    ip_address: String,
    transport: T,
    stats: Option<CachedStats>,
}

impl<T: HttpGet> Coda56<T> {
    /// Cria o driver. Endereço vazio usa [`DEFAULT_ADDRESS`].
    pub fn new(ip_address: impl Into<String>, transport: T) -> Self {
        let ip_address = ip_address.into();
        let ip_address = if ip_address.trim().is_empty() {
            DEFAULT_ADDRESS.to_string()
        } else {
            ip_address.trim().to_string()
        };

        Self {
            ip_address,
            transport,
            stats: None,
        }
    }

    pub fn ip_address(&self) -> &str {
        &self.ip_address
    }

    /// Cache do ciclo atual, se já houve fetch.
    pub fn cached(&self) -> Option<&CachedStats> {
        self.stats.as_ref()
    }
}

impl<T: HttpGet> Modem for Coda56<T> {
    fn modem_type(&self) -> ModemType {
        ModemType::Docsis
    }

    fn fetch_stats(&mut self) -> &CachedStats {
        let Self {
            ip_address,
            transport,
            stats,
        } = self;

        stats.get_or_insert_with(|| {
            let (raw, elapsed) = fetch::fetch_all(&*transport, ip_address);
            CachedStats {
                raw,
                fetch_time_ms: u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
            }
        })
    }

    fn parse_stats(&mut self) -> ModemStats {
        let cached = self.fetch_stats();
        let (down_channels, up_channels) = normalize(&cached.raw);
        let fetch_time_ms = cached.fetch_time_ms;

        debug!(
            "CODA-56: {} downstream, {} upstream ({fetch_time_ms} ms)",
            down_channels.len(),
            up_channels.len()
        );

        ModemStats {
            down_channels,
            up_channels,
            fetch_time_ms,
        }
    }

    fn clear_stats(&mut self) {
        self.stats = None;
    }
}
