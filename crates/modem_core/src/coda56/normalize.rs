//! Normalização do documento bruto para [`ModemChannel`].
//!
//! Reentrante sobre o mesmo blob. Nunca falha: blob inválido, chave `null`
//! ou elemento que não é registro resultam em listas vazias ou parciais.

use super::records::{DsChannel, DsOfdmChannel, UsChannel, UsOfdmChannel};
use crate::parse::{parse_int, parse_scaled};
use crate::types::ModemChannel;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::{debug, trace};

/// Escala de SNR e potência (dB → dB ×10).
const DB_SCALE: f64 = 10.0;

/// Registros brutos decodificados, na ordem em que vieram.
///
/// Cada registro carrega sua posição original no array (usada como número
/// de canal no OFDM).
#[derive(Debug, Default)]
struct RawStats {
    downstream: Vec<(usize, DsChannel)>,
    downstream_ofdm: Vec<(usize, DsOfdmChannel)>,
    upstream: Vec<(usize, UsChannel)>,
    upstream_ofdm: Vec<(usize, UsOfdmChannel)>,
}

impl RawStats {
    /// Decodifica o blob de forma tolerante, chave a chave e elemento a elemento.
    fn decode(raw: &[u8]) -> Self {
        let root: Map<String, Value> = match serde_json::from_slice(raw) {
            Ok(root) => root,
            Err(e) => {
                debug!("Blob inválido, ignorando: {e}");
                return Self::default();
            }
        };

        Self {
            downstream: records(&root, "dsinfo"),
            downstream_ofdm: records(&root, "dsofdminfo"),
            upstream: records(&root, "usinfo"),
            upstream_ofdm: records(&root, "usofdminfo"),
        }
    }
}

/// Extrai os registros de uma chave. `null`, ausência ou não-array → vazio.
fn records<T: DeserializeOwned>(root: &Map<String, Value>, key: &str) -> Vec<(usize, T)> {
    let Some(Value::Array(items)) = root.get(key) else {
        return Vec::new();
    };

    items
        .iter()
        .enumerate()
        .filter_map(|(index, item)| match T::deserialize(item) {
            Ok(record) => Some((index, record)),
            Err(e) => {
                debug!("{key}[{index}] ignorado: {e}");
                None
            }
        })
        .collect()
}

/// Normaliza o blob em (downstream, upstream).
///
/// Downstream: SC-QAM na ordem original, depois OFDM travados.
/// Upstream: SC-QAM na ordem original (OFDMA ainda não suportado).
pub fn normalize(raw: &[u8]) -> (Vec<ModemChannel>, Vec<ModemChannel>) {
    let stats = RawStats::decode(raw);

    let mut down_channels: Vec<ModemChannel> = stats
        .downstream
        .iter()
        .map(|(_, ds)| downstream_channel(ds))
        .collect();

    down_channels.extend(
        stats
            .downstream_ofdm
            .iter()
            .filter_map(|(index, ofdm)| downstream_ofdm_channel(*index, ofdm)),
    );

    let up_channels = stats
        .upstream
        .iter()
        .map(|(_, us)| upstream_channel(us))
        .collect();

    // TODO: upstream OFDMA quando houver captura de um canal ativo
    if !stats.upstream_ofdm.is_empty() {
        trace!("{} canais upstream OFDMA ignorados", stats.upstream_ofdm.len());
    }

    (down_channels, up_channels)
}

// ──────────────────────────────────────────────
// Transformações por formato
// ──────────────────────────────────────────────

/// Código de modulação SC-QAM → rótulo.
fn modulation_label(code: &str) -> &'static str {
    match code {
        "2" => "256QAM",
        _ => "unknown",
    }
}

fn downstream_channel(ds: &DsChannel) -> ModemChannel {
    let correcteds: i64 = parse_int(ds.correcteds.as_str());
    let uncorrect: i64 = parse_int(ds.uncorrect.as_str());

    ModemChannel {
        channel_id: parse_int(ds.channel_id.as_str()),
        channel: parse_int(ds.port_id.as_str()),
        frequency: parse_int(ds.frequency.as_str()),
        snr: parse_scaled(ds.snr.as_str(), DB_SCALE),
        power: parse_scaled(ds.signal_strength.as_str(), DB_SCALE),
        pre_fec_errors: correcteds.saturating_add(uncorrect),
        post_fec_errors: uncorrect,
        modulation: modulation_label(ds.modulation.as_str()).into(),
        scheme: "SC-QAM".into(),
    }
}

/// `None` se algum lock (PLC/NCP/MDC1) não estiver travado.
fn downstream_ofdm_channel(index: usize, ofdm: &DsOfdmChannel) -> Option<ModemChannel> {
    if !ofdm.is_locked() {
        trace!("Receptor OFDM {index} destravado, descartado");
        return None;
    }

    let correcteds: i64 = parse_int(ofdm.correcteds.as_str());
    let uncorrect: i64 = parse_int(ofdm.uncorrect.as_str());

    Some(ModemChannel {
        channel: i64::try_from(index).unwrap_or(i64::MAX),
        frequency: parse_int(ofdm.subcarr0_freq.as_str()),
        snr: parse_scaled(ofdm.snr.as_str(), DB_SCALE),
        power: parse_scaled(ofdm.plcpower.as_str(), DB_SCALE),
        pre_fec_errors: correcteds.saturating_add(uncorrect),
        post_fec_errors: uncorrect,
        modulation: label_or_unknown(ofdm.ffttype.as_str()),
        scheme: "OFDM".into(),
        ..Default::default()
    })
}

fn upstream_channel(us: &UsChannel) -> ModemChannel {
    ModemChannel {
        channel_id: parse_int(us.channel_id.as_str()),
        channel: parse_int(us.port_id.as_str()),
        frequency: parse_int(us.frequency.as_str()),
        power: parse_scaled(us.signal_strength.as_str(), DB_SCALE),
        modulation: label_or_unknown(us.mod_type.as_str()),
        scheme: label_or_unknown(us.scdma_mode.as_str()),
        ..Default::default()
    }
}

/// Rótulo reportado pelo modem, ou "unknown" se vier vazio.
fn label_or_unknown(label: &str) -> String {
    if label.trim().is_empty() {
        "unknown".into()
    } else {
        label.to_string()
    }
}
