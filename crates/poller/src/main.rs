//! # Modem Poller
//!
//! Consulta o cable modem periodicamente e registra as estatísticas por
//! canal (downstream/upstream) no log.
//!
//! ## Uso
//! ```bash
//! modem_poller            # Loop contínuo no intervalo do config.toml
//! modem_poller --once     # Um ciclo, estatísticas em JSON no stdout
//! ```

mod report;

use modem_core::config::AppConfig;
use modem_core::{Coda56, Modem, UreqTransport};
use std::process::ExitCode;
use std::time::Instant;
use tracing::{error, info, warn};

fn main() -> ExitCode {
    // ── Logging ──
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let once = std::env::args().any(|a| a == "--once");

    // ── Carregar config ──
    let config_path = AppConfig::default_path();
    let config = AppConfig::load(&config_path);

    // Salva config padrão se não existir
    if !config_path.exists() {
        if let Err(e) = config.save(&config_path) {
            warn!("Não foi possível salvar config padrão: {e}");
        }
    }

    let errors = config.validate();
    if !errors.is_empty() {
        for e in &errors {
            error!("Config inválida: {e}");
        }
        return ExitCode::FAILURE;
    }

    let interval = config.poller.interval();
    let transport = UreqTransport::new(config.modem.timeout());
    let mut modem = Coda56::new(config.modem.ip_address.clone(), transport);

    if once {
        let stats = modem.parse_stats();
        return match serde_json::to_string_pretty(&stats) {
            Ok(json) => {
                println!("{json}");
                ExitCode::SUCCESS
            }
            Err(e) => {
                error!("Erro ao serializar estatísticas: {e}");
                ExitCode::FAILURE
            }
        };
    }

    // ── Banner ──
    println!();
    println!("══════════════════════════════════════════════");
    println!("   📡 MODEM POLLER – ATIVO");
    println!("══════════════════════════════════════════════");
    println!("  Modem:     {} ({})", modem.ip_address(), modem.modem_type());
    println!("  Intervalo: {:.1}s", config.poller.interval_secs);
    println!("  Timeout:   {:.1}s", config.modem.timeout_secs);
    println!("══════════════════════════════════════════════");
    println!();

    // ── Loop principal ──
    loop {
        let cycle_start = Instant::now();

        modem.clear_stats();
        let stats = modem.parse_stats();
        report::log_stats(&stats);

        if stats.down_channels.is_empty() && stats.up_channels.is_empty() {
            warn!("Nenhum canal obtido de {}", modem.ip_address());
        }

        // Dormir pelo tempo restante do intervalo
        let elapsed = cycle_start.elapsed();
        if elapsed < interval {
            std::thread::sleep(interval - elapsed);
        } else {
            info!("Ciclo levou {elapsed:?}, acima do intervalo de {interval:?}");
        }
    }
}
