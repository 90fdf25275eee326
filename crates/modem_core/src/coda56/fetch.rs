//! Fetch dos quatro endpoints JSON do modem.
//!
//! Cada recurso vira um fragmento do documento final. Falha de transporte
//! ou corpo que não seja um array JSON vira o literal `null`; o fetch como
//! um todo nunca falha.

use crate::transport::HttpGet;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};
use tracing::{debug, warn};

/// Recursos consultados, na ordem fixa das chaves do documento.
pub const RESOURCES: [&str; 4] = ["dsinfo", "dsofdminfo", "usinfo", "usofdminfo"];

/// Fragmento usado quando o recurso falha.
const NULL_FRAGMENT: &[u8] = b"null";

/// Monta a URL de um recurso com parâmetro anti-cache (`_=<epoch secs>`).
pub fn api_address(address: &str, resource: &str) -> String {
    let epoch = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    format!("http://{address}/data/{resource}.asp?_={epoch}")
}

/// Busca os quatro recursos em paralelo e monta o documento
/// `{"dsinfo":…,"dsofdminfo":…,"usinfo":…,"usofdminfo":…}`.
///
/// Retorna o blob e o tempo total da operação.
pub fn fetch_all(transport: &dyn HttpGet, address: &str) -> (Vec<u8>, Duration) {
    let start = Instant::now();

    let fragments: Vec<Vec<u8>> = std::thread::scope(|scope| {
        let handles: Vec<_> = RESOURCES
            .iter()
            .map(|resource| scope.spawn(move || fetch_fragment(transport, address, resource)))
            .collect();

        handles
            .into_iter()
            .map(|h| h.join().unwrap_or_else(|_| NULL_FRAGMENT.to_vec()))
            .collect()
    });

    let blob = assemble(&fragments);
    let elapsed = start.elapsed();
    debug!("Fetch de {address}: {} bytes em {:?}", blob.len(), elapsed);

    (blob, elapsed)
}

/// GET de um recurso. Qualquer falha degrada para `null`.
fn fetch_fragment(transport: &dyn HttpGet, address: &str, resource: &str) -> Vec<u8> {
    let url = api_address(address, resource);
    match transport.get(&url) {
        Ok(body) if is_json_array(&body) => body,
        Ok(body) => {
            warn!("{resource}: resposta não é um array JSON ({} bytes)", body.len());
            NULL_FRAGMENT.to_vec()
        }
        Err(e) => {
            warn!("{resource}: erro no GET {url}: {e}");
            NULL_FRAGMENT.to_vec()
        }
    }
}

fn is_json_array(body: &[u8]) -> bool {
    serde_json::from_slice::<Vec<serde::de::IgnoredAny>>(body).is_ok()
}

/// Concatena os fragmentos com as chaves fixas de [`RESOURCES`].
fn assemble(fragments: &[Vec<u8>]) -> Vec<u8> {
    let mut blob = Vec::with_capacity(fragments.iter().map(|f| f.len() + 16).sum::<usize>() + 2);
    blob.push(b'{');
    for (i, resource) in RESOURCES.iter().enumerate() {
        if i > 0 {
            blob.push(b',');
        }
        blob.extend_from_slice(format!("\"{resource}\":").as_bytes());
        blob.extend_from_slice(fragments.get(i).map_or(NULL_FRAGMENT, |f| f.as_slice()));
    }
    blob.push(b'}');
    blob
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::transport::TransportError;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Transporte em memória: corpo fixo por recurso, URLs registradas.
    #[derive(Default)]
    pub(crate) struct FakeTransport {
        pub bodies: HashMap<&'static str, Result<&'static str, &'static str>>,
        pub requested: Mutex<Vec<String>>,
    }

    impl FakeTransport {
        pub fn with(mut self, resource: &'static str, body: Result<&'static str, &'static str>) -> Self {
            self.bodies.insert(resource, body);
            self
        }

        pub fn request_count(&self) -> usize {
            self.requested.lock().unwrap().len()
        }
    }

    impl HttpGet for FakeTransport {
        fn get(&self, url: &str) -> Result<Vec<u8>, TransportError> {
            self.requested.lock().unwrap().push(url.to_string());
            let resource = RESOURCES
                .iter()
                .find(|r| url.contains(&format!("/data/{r}.asp")))
                .copied()
                .unwrap_or_default();
            match self.bodies.get(resource) {
                Some(Ok(body)) => Ok(body.as_bytes().to_vec()),
                Some(Err(msg)) => Err(TransportError::Request(msg.to_string())),
                None => Err(TransportError::Request("connection refused".into())),
            }
        }
    }

    #[test]
    fn url_format() {
        let url = api_address("192.168.100.1", "dsinfo");
        assert!(url.starts_with("http://192.168.100.1/data/dsinfo.asp?_="));
        let epoch: u64 = url.rsplit('=').next().unwrap().parse().unwrap();
        assert!(epoch > 1_600_000_000);
    }

    #[test]
    fn requests_all_four_resources() {
        let transport = FakeTransport::default();
        fetch_all(&transport, "10.0.0.1");

        let mut urls = transport.requested.lock().unwrap().clone();
        urls.sort();
        assert_eq!(urls.len(), 4);
        for resource in RESOURCES {
            assert!(
                urls.iter()
                    .any(|u| u.starts_with(&format!("http://10.0.0.1/data/{resource}.asp?_="))),
                "faltou {resource}: {urls:?}"
            );
        }
    }

    #[test]
    fn assembles_fixed_key_order() {
        let transport = FakeTransport::default()
            .with("usofdminfo", Ok("[]"))
            .with("dsinfo", Ok(r#"[{"portId":"1"}]"#))
            .with("usinfo", Ok(" [ ] "));
        let (blob, _) = fetch_all(&transport, "modem");

        assert_eq!(
            String::from_utf8(blob).unwrap(),
            r#"{"dsinfo":[{"portId":"1"}],"dsofdminfo":null,"usinfo": [ ] ,"usofdminfo":[]}"#
        );
    }

    #[test]
    fn total_failure_is_all_null() {
        let transport = FakeTransport::default();
        let (blob, _) = fetch_all(&transport, "modem");
        assert_eq!(
            blob,
            br#"{"dsinfo":null,"dsofdminfo":null,"usinfo":null,"usofdminfo":null}"#
        );
        let parsed: serde_json::Value = serde_json::from_slice(&blob).unwrap();
        assert!(parsed.is_object());
    }

    #[test]
    fn non_array_body_becomes_null() {
        let transport = FakeTransport::default()
            .with("dsinfo", Ok("<html>404 Not Found</html>"))
            .with("dsofdminfo", Ok(r#"{"error":"busy"}"#))
            .with("usinfo", Ok(""))
            .with("usofdminfo", Err("timed out"));
        let (blob, _) = fetch_all(&transport, "modem");
        assert_eq!(
            blob,
            br#"{"dsinfo":null,"dsofdminfo":null,"usinfo":null,"usofdminfo":null}"#
        );
    }
}
