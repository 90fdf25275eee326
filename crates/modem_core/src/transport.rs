//! Capacidade de GET HTTP usada pelos drivers.
//!
//! O driver só precisa de "faça o GET e devolva o corpo ou uma falha".
//! [`UreqTransport`] é a implementação real; testes usam fakes em memória.

use std::io::Read;
use std::time::Duration;
use tracing::trace;
use ureq::{Agent, AgentBuilder};

/// User-Agent fixo e não identificável (o modem bloqueia clientes "bot").
pub const USER_AGENT: &str = "curl/8.5.0";

/// Erros de transporte.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("Falha na requisição: {0}")]
    Request(String),

    #[error("Falha ao ler corpo da resposta: {0}")]
    Read(#[from] std::io::Error),
}

/// GET HTTP bloqueante.
pub trait HttpGet: Send + Sync {
    /// Retorna o corpo da resposta, independente do status HTTP.
    fn get(&self, url: &str) -> Result<Vec<u8>, TransportError>;
}

/// Transporte HTTP sobre `ureq`, sem retry.
pub struct UreqTransport {
    agent: Agent,
}

impl UreqTransport {
    /// Cria o agent com timeout por requisição.
    pub fn new(timeout: Duration) -> Self {
        let agent = AgentBuilder::new()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build();
        Self { agent }
    }
}

impl HttpGet for UreqTransport {
    fn get(&self, url: &str) -> Result<Vec<u8>, TransportError> {
        let response = match self.agent.get(url).set("Accept", "*/*").call() {
            Ok(response) => response,
            // Status não-2xx não é tratado como erro: o corpo segue adiante
            Err(ureq::Error::Status(code, response)) => {
                trace!("GET {url} → HTTP {code}");
                response
            }
            Err(e) => return Err(TransportError::Request(e.to_string())),
        };

        let mut body = Vec::new();
        response.into_reader().read_to_end(&mut body)?;
        Ok(body)
    }
}
