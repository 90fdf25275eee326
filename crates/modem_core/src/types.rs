//! Modelo unificado de canais.
//!
//! Todos os formatos de registro do modem (SC-QAM, OFDM, upstream legado)
//! convergem para [`ModemChannel`], com unidades consistentes.

use serde::{Deserialize, Serialize};
use std::fmt;

// ──────────────────────────────────────────────
// Canal
// ──────────────────────────────────────────────

/// Canal unificado (downstream ou upstream).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ModemChannel {
    /// ID lógico reportado pelo modem (0 para entradas OFDM)
    pub channel_id: i64,
    /// Porta física ou número do receptor
    pub channel: i64,
    /// Frequência (Hz)
    pub frequency: i64,
    /// Relação sinal-ruído (dB ×10)
    pub snr: i32,
    /// Potência (dB ×10)
    pub power: i32,
    /// Erros pré-FEC (corrigidos + não corrigidos)
    pub pre_fec_errors: i64,
    /// Erros pós-FEC (não corrigidos)
    pub post_fec_errors: i64,
    /// Modulação (ex: "256QAM", "4K", "64QAM", "unknown")
    pub modulation: String,
    /// Esquema (ex: "SC-QAM", "OFDM", "ATDMA")
    pub scheme: String,
}

// ──────────────────────────────────────────────
// Estatísticas
// ──────────────────────────────────────────────

/// Resultado de um ciclo de polling.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ModemStats {
    /// Canais downstream: SC-QAM na ordem do modem, depois OFDM travados
    pub down_channels: Vec<ModemChannel>,
    /// Canais upstream SC-QAM, na ordem do modem
    pub up_channels: Vec<ModemChannel>,
    /// Latência do último fetch (ms)
    pub fetch_time_ms: u64,
}

// ──────────────────────────────────────────────
// Tipo de dispositivo
// ──────────────────────────────────────────────

/// Classificação do driver, usada pelo sistema que escolhe o dispositivo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModemType {
    Docsis,
}

impl ModemType {
    pub fn as_str(self) -> &'static str {
        match self {
            ModemType::Docsis => "docsis",
        }
    }
}

impl fmt::Display for ModemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
