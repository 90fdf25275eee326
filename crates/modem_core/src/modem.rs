//! Interface comum dos drivers de modem.
//!
//! Cada família de dispositivo implementa [`Modem`]. A escolha de qual
//! driver usar fica fora deste crate.

use crate::types::{ModemStats, ModemType};

/// Blob bruto de um ciclo de polling e a latência do fetch que o produziu.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CachedStats {
    pub raw: Vec<u8>,
    /// Latência total do fetch (ms)
    pub fetch_time_ms: u64,
}

/// Capacidade exposta por um driver de modem.
///
/// O cache é escrito uma vez por ciclo e lido por quantas normalizações
/// forem necessárias. O driver de polling chama [`Modem::clear_stats`] antes
/// de cada novo ciclo.
pub trait Modem {
    /// Tag de classificação do dispositivo.
    fn modem_type(&self) -> ModemType;

    /// Busca os dados brutos. Se já existe cache, não faz nada.
    fn fetch_stats(&mut self) -> &CachedStats;

    /// Busca (se necessário) e normaliza para o modelo unificado. Nunca falha.
    fn parse_stats(&mut self) -> ModemStats;

    /// Invalida o cache do ciclo atual.
    fn clear_stats(&mut self);
}
