//! Formatos brutos dos endpoints `/data/*.asp`.
//!
//! Todo campo é modelado como texto ([`RawField`]): o modem mistura strings
//! com espaços, números e placeholders entre endpoints e firmwares.

use serde::de::{Deserializer, Error as _};
use serde::Deserialize;
use serde_json::Value;

/// Campo textual tolerante.
///
/// Strings são mantidas como vieram; números e booleanos viram texto;
/// `null` vira texto vazio. Arrays/objetos são rejeitados.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawField(pub String);

impl RawField {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for RawField {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl<'de> Deserialize<'de> for RawField {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match Value::deserialize(deserializer)? {
            Value::String(s) => Ok(Self(s)),
            Value::Number(n) => Ok(Self(n.to_string())),
            Value::Bool(b) => Ok(Self(b.to_string())),
            Value::Null => Ok(Self::default()),
            other => Err(D::Error::custom(format!("campo não escalar: {other}"))),
        }
    }
}

// ──────────────────────────────────────────────
// Downstream SC-QAM (dsinfo)
// ──────────────────────────────────────────────

// {"portId":"1","frequency":"591000000","modulation":"2","signalStrength":"6.000","snr":"38.983","dsoctets":"1 * 2e32 + 426317386","correcteds":"13","uncorrect":"27","channelId":"7"}
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DsChannel {
    pub port_id: RawField,
    pub frequency: RawField,
    /// Código numérico ("2" = 256QAM)
    pub modulation: RawField,
    pub signal_strength: RawField,
    pub snr: RawField,
    pub dsoctets: RawField,
    pub correcteds: RawField,
    pub uncorrect: RawField,
    pub channel_id: RawField,
}

// ──────────────────────────────────────────────
// Downstream OFDM (dsofdminfo)
// ──────────────────────────────────────────────

// {"receive":"1","ffttype":"4K","Subcarr0freqFreq":" 290600000","plclock":"YES","ncplock":"YES","mdc1lock":"YES","plcpower":"5.699997","SNR":"41","dsoctets":"41345036375","correcteds":"2088221076","uncorrect":"0"}
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DsOfdmChannel {
    pub receive: RawField,
    pub ffttype: RawField,
    #[serde(rename = "Subcarr0freqFreq")]
    pub subcarr0_freq: RawField,
    pub plclock: RawField,
    pub ncplock: RawField,
    pub mdc1lock: RawField,
    pub plcpower: RawField,
    #[serde(rename = "SNR")]
    pub snr: RawField,
    pub dsoctets: RawField,
    pub correcteds: RawField,
    pub uncorrect: RawField,
}

impl DsOfdmChannel {
    /// PLC, NCP e MDC1 travados. Qualquer outro valor indica receptor inativo.
    pub fn is_locked(&self) -> bool {
        [&self.plclock, &self.ncplock, &self.mdc1lock]
            .iter()
            .all(|lock| lock.as_str() == "YES")
    }
}

// ──────────────────────────────────────────────
// Upstream SC-QAM (usinfo)
// ──────────────────────────────────────────────

// {"portId":"1","frequency":"25900000","bandwidth":"6400000","modtype":"64QAM","scdmaMode":"ATDMA","signalStrength":"31.250","channelId":"2"}
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UsChannel {
    pub port_id: RawField,
    pub frequency: RawField,
    pub bandwidth: RawField,
    #[serde(rename = "modtype")]
    pub mod_type: RawField,
    pub scdma_mode: RawField,
    pub signal_strength: RawField,
    pub channel_id: RawField,
}

// ──────────────────────────────────────────────
// Upstream OFDMA (usofdminfo)
// ──────────────────────────────────────────────

// {"uschindex":"0","state":"  DISABLED","frequency":"0","digAtten":"    0.0000","digAttenBo":"    0.0000","channelBw":"    0.0000","repPower":"    0.0000","repPower1_6":"    0.0000","fftVal":"2K"}
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct UsOfdmChannel {
    pub uschindex: RawField,
    pub state: RawField,
    pub frequency: RawField,
    #[serde(rename = "digAtten")]
    pub dig_atten: RawField,
    #[serde(rename = "digAttenBo")]
    pub dig_atten_bo: RawField,
    #[serde(rename = "channelBw")]
    pub channel_bw: RawField,
    #[serde(rename = "repPower")]
    pub rep_power: RawField,
    #[serde(rename = "repPower1_6")]
    pub rep_power_1_6: RawField,
    #[serde(rename = "fftVal")]
    pub fft_val: RawField,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_field_accepts_scalars() {
        let ds: DsChannel = serde_json::from_str(
            r#"{"portId":3,"frequency":"  603000000","snr":null,"uncorrect":true}"#,
        )
        .unwrap();
        assert_eq!(ds.port_id.as_str(), "3");
        assert_eq!(ds.frequency.as_str(), "  603000000");
        assert_eq!(ds.snr.as_str(), "");
        assert_eq!(ds.uncorrect.as_str(), "true");
        // Campo ausente
        assert_eq!(ds.channel_id.as_str(), "");
    }

    #[test]
    fn raw_field_rejects_nested_values() {
        let result: Result<DsChannel, _> = serde_json::from_str(r#"{"portId":{"a":1}}"#);
        assert!(result.is_err());
    }

    #[test]
    fn ofdm_field_names() {
        let ofdm: DsOfdmChannel = serde_json::from_str(
            r#"{"receive":"1","ffttype":"4K","Subcarr0freqFreq":" 290600000","plclock":"YES","ncplock":"YES","mdc1lock":"YES","plcpower":"5.699997","SNR":"41","dsoctets":"41345036375","correcteds":"2088221076","uncorrect":"0"}"#,
        )
        .unwrap();
        assert_eq!(ofdm.subcarr0_freq.as_str(), " 290600000");
        assert_eq!(ofdm.snr.as_str(), "41");
        assert_eq!(ofdm.ffttype.as_str(), "4K");
        assert!(ofdm.is_locked());
    }

    #[test]
    fn ofdm_lock_requires_all_three() {
        let mut ofdm = DsOfdmChannel {
            plclock: "YES".into(),
            ncplock: "YES".into(),
            mdc1lock: "NO".into(),
            ..Default::default()
        };
        assert!(!ofdm.is_locked());
        ofdm.mdc1lock = "yes".into();
        assert!(!ofdm.is_locked());
        ofdm.mdc1lock = "YES".into();
        assert!(ofdm.is_locked());
    }

    #[test]
    fn upstream_field_names() {
        let us: UsChannel = serde_json::from_str(
            r#"{"portId":"1","frequency":"25900000","bandwidth":"6400000","modtype":"64QAM","scdmaMode":"ATDMA","signalStrength":"31.250","channelId":"2"}"#,
        )
        .unwrap();
        assert_eq!(us.mod_type.as_str(), "64QAM");
        assert_eq!(us.scdma_mode.as_str(), "ATDMA");
        assert_eq!(us.signal_strength.as_str(), "31.250");
    }

    #[test]
    fn upstream_ofdm_field_names() {
        let us: UsOfdmChannel = serde_json::from_str(
            r#"{"uschindex":"0","state":"  DISABLED","frequency":"0","digAtten":"    0.0000","digAttenBo":"    0.0000","channelBw":"    0.0000","repPower":"    0.0000","repPower1_6":"    0.0000","fftVal":"2K"}"#,
        )
        .unwrap();
        assert_eq!(us.state.as_str(), "  DISABLED");
        assert_eq!(us.rep_power_1_6.as_str(), "    0.0000");
        assert_eq!(us.fft_val.as_str(), "2K");
    }
}
