//! Configuração unificada via TOML.
//!
//! Um único `config.toml` ao lado do executável. Seções ausentes usam
//! os valores padrão.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, warn};

/// Erros de leitura/escrita da configuração.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Erro ao ler {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Erro ao parsear {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Erro ao serializar configuração: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Erro ao escrever {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Configuração do modem.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModemConfig {
    /// IP da interface de gerenciamento (vazio = 192.168.100.1)
    pub ip_address: String,
    /// Timeout por requisição HTTP (segundos)
    pub timeout_secs: f64,
}

impl Default for ModemConfig {
    fn default() -> Self {
        Self {
            ip_address: String::new(),
            timeout_secs: 5.0,
        }
    }
}

impl ModemConfig {
    pub fn timeout(&self) -> Duration {
        Duration::try_from_secs_f64(self.timeout_secs).unwrap_or(Duration::from_secs(5))
    }
}

/// Configuração do ciclo de polling.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PollerConfig {
    /// Intervalo entre ciclos (segundos)
    pub interval_secs: f64,
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self { interval_secs: 30.0 }
    }
}

impl PollerConfig {
    pub fn interval(&self) -> Duration {
        Duration::try_from_secs_f64(self.interval_secs).unwrap_or(Duration::from_secs(30))
    }
}

/// Configuração raiz do aplicativo.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub modem: ModemConfig,
    pub poller: PollerConfig,
}

impl AppConfig {
    /// Carrega configuração de um arquivo TOML, com fallback para o padrão.
    pub fn load(path: &Path) -> Self {
        if path.exists() {
            match Self::try_load(path) {
                Ok(config) => {
                    info!("Configuração carregada de {}", path.display());
                    return config;
                }
                Err(e) => warn!("{e}"),
            }
        }

        info!("Usando configuração padrão");
        AppConfig::default()
    }

    /// Carrega configuração, propagando erros de leitura e parse.
    pub fn try_load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Salva configuração em arquivo TOML.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(|source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        })?;
        info!("Configuração salva em {}", path.display());
        Ok(())
    }

    /// Retorna o caminho padrão do config.toml.
    pub fn default_path() -> PathBuf {
        let exe_dir = std::env::current_exe()
            .map(|p| p.parent().unwrap_or(Path::new(".")).to_path_buf())
            .unwrap_or_else(|_| PathBuf::from("."));
        exe_dir.join("config.toml")
    }

    /// Valida a configuração e retorna lista de erros.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        let interval = self.poller.interval_secs;
        let timeout = self.modem.timeout_secs;

        if !(1.0..=3600.0).contains(&interval) {
            errors.push(format!("Intervalo de polling inválido: {interval} (1–3600)"));
        }
        if timeout.is_nan() || timeout <= 0.0 {
            errors.push(format!("Timeout HTTP inválido: {timeout}"));
        } else if timeout > interval {
            errors.push(format!(
                "Timeout HTTP ({timeout}s) maior que o intervalo de polling ({interval}s)"
            ));
        }

        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = AppConfig::default();
        let errors = config.validate();
        assert!(errors.is_empty(), "Erros: {:?}", errors);
    }

    #[test]
    fn roundtrip_toml() {
        let mut config = AppConfig::default();
        config.modem.ip_address = "192.168.0.1".into();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: AppConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.modem.ip_address, "192.168.0.1");
        assert_eq!(parsed.poller.interval_secs, config.poller.interval_secs);
    }

    #[test]
    fn partial_toml_uses_defaults() {
        let partial = r#"
[modem]
ip_address = "10.0.0.138"
"#;
        let config: AppConfig = toml::from_str(partial).unwrap();
        assert_eq!(config.modem.ip_address, "10.0.0.138");
        // Outros campos devem ter valor padrão
        assert_eq!(config.modem.timeout_secs, 5.0);
        assert_eq!(config.poller.interval_secs, 30.0);
    }

    #[test]
    fn timeout_looser_than_interval_is_rejected() {
        let mut config = AppConfig::default();
        config.poller.interval_secs = 10.0;
        config.modem.timeout_secs = 15.0;
        let errors = config.validate();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("maior que o intervalo"));
    }

    #[test]
    fn invalid_values_are_reported() {
        let mut config = AppConfig::default();
        config.poller.interval_secs = 0.0;
        config.modem.timeout_secs = -1.0;
        assert_eq!(config.validate().len(), 2);
    }

    #[test]
    fn duration_fallbacks() {
        let mut config = AppConfig::default();
        assert_eq!(config.modem.timeout(), Duration::from_secs(5));
        config.modem.timeout_secs = f64::NAN;
        assert_eq!(config.modem.timeout(), Duration::from_secs(5));
        config.poller.interval_secs = -3.0;
        assert_eq!(config.poller.interval(), Duration::from_secs(30));
    }

    #[test]
    fn save_and_load_file() {
        let path = std::env::temp_dir().join(format!("modem_core_cfg_{}.toml", std::process::id()));
        let mut config = AppConfig::default();
        config.poller.interval_secs = 60.0;
        config.save(&path).unwrap();

        let loaded = AppConfig::load(&path);
        assert_eq!(loaded.poller.interval_secs, 60.0);
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn broken_file_falls_back_to_default() {
        let path = std::env::temp_dir().join(format!("modem_core_bad_{}.toml", std::process::id()));
        std::fs::write(&path, "[modem\nip_address = ").unwrap();

        assert!(matches!(AppConfig::try_load(&path), Err(ConfigError::Parse { .. })));
        let config = AppConfig::load(&path);
        assert_eq!(config.modem.timeout_secs, 5.0);
        std::fs::remove_file(&path).ok();
    }
}
