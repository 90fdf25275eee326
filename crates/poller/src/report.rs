//! Resumo de um ciclo de polling no log.

use modem_core::types::{ModemChannel, ModemStats};
use tracing::{debug, info};

/// Loga o resumo do ciclo em `info` e cada canal em `debug`.
pub fn log_stats(stats: &ModemStats) {
    let summary = summarize(stats);
    info!(
        "↓ {} canais ({} OFDM) | ↑ {} canais | pós-FEC {} | fetch {} ms",
        summary.down,
        summary.down_ofdm,
        summary.up,
        summary.post_fec_errors,
        stats.fetch_time_ms
    );

    for c in &stats.down_channels {
        debug!("↓ {}", describe(c));
    }
    for c in &stats.up_channels {
        debug!("↑ {}", describe(c));
    }
}

/// Contagens agregadas de um ciclo.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Summary {
    pub down: usize,
    pub down_ofdm: usize,
    pub up: usize,
    pub post_fec_errors: i64,
}

pub fn summarize(stats: &ModemStats) -> Summary {
    Summary {
        down: stats.down_channels.len(),
        down_ofdm: stats
            .down_channels
            .iter()
            .filter(|c| c.scheme == "OFDM")
            .count(),
        up: stats.up_channels.len(),
        post_fec_errors: stats
            .down_channels
            .iter()
            .map(|c| c.post_fec_errors)
            .fold(0i64, i64::saturating_add),
    }
}

/// Linha legível de um canal (valores ×10 convertidos para dB).
pub fn describe(c: &ModemChannel) -> String {
    format!(
        "#{} id {} {:.1} MHz | {} {} | SNR {:.1} dB | {:.1} dB | FEC {}/{}",
        c.channel,
        c.channel_id,
        c.frequency as f64 / 1_000_000.0,
        c.scheme,
        c.modulation,
        f64::from(c.snr) / 10.0,
        f64::from(c.power) / 10.0,
        c.pre_fec_errors,
        c.post_fec_errors
    )
}
