//! TLS setup for tenant database connections.
//!
//! Tenant databases are only reachable over TLS. The [`SslMode`] decides how
//! much of the server certificate is checked.

use std::sync::Arc;

use rustls::ClientConfig;
use td_core::SslMode;
use tokio_postgres_rustls::MakeRustlsConnect;

use crate::error::{DbError, DbResult};

/// Builder for PostgreSQL TLS connectors.
pub struct TlsBuilder {
    ssl_mode: SslMode,
}

impl TlsBuilder {
    /// Create a new TLS builder with the given SSL mode.
    pub fn new(ssl_mode: SslMode) -> Self {
        Self { ssl_mode }
    }

    /// Build the connector handed to the PostgreSQL client.
    pub fn build(&self) -> DbResult<MakeRustlsConnect> {
        Ok(MakeRustlsConnect::new(self.build_client_config()?))
    }

    /// Build the underlying rustls ClientConfig.
    pub fn build_client_config(&self) -> DbResult<ClientConfig> {
        let builder = ClientConfig::builder_with_provider(Arc::new(
            rustls::crypto::ring::default_provider(),
        ))
        .with_safe_default_protocol_versions()
        .map_err(|e| DbError::TlsError(e.to_string()))?;

        let config = match self.ssl_mode {
            SslMode::Disable => {
                return Err(DbError::TlsError(
                    "ssl_mode=disable is not allowed for tenant databases".into(),
                ));
            }
            SslMode::Require => {
                log::warn!(
                    "ssl_mode=require encrypts the connection but does NOT verify the server \
                     certificate; use verify-full where the server presents a trusted certificate"
                );
                builder
                    .dangerous()
                    .with_custom_certificate_verifier(Arc::new(NoVerifier))
                    .with_no_client_auth()
            }
            SslMode::VerifyCa | SslMode::VerifyFull => {
                // rustls always checks the hostname, so verify-ca behaves like verify-full.
                log::debug!("ssl_mode={}: certificate verification enabled", self.ssl_mode);
                let mut root_store = rustls::RootCertStore::empty();
                root_store.extend(webpki_roots::TLS_SERVER_ROOTS.iter().cloned());
                builder
                    .with_root_certificates(root_store)
                    .with_no_client_auth()
            }
        };

        Ok(config)
    }
}

/// Certificate verifier that accepts any server certificate.
///
/// Only used for `ssl_mode=require`: the channel is encrypted but the peer is
/// not authenticated.
#[derive(Debug)]
struct NoVerifier;

impl rustls::client::danger::ServerCertVerifier for NoVerifier {
    fn verify_server_cert(
        &self,
        _end_entity: &rustls::pki_types::CertificateDer<'_>,
        _intermediates: &[rustls::pki_types::CertificateDer<'_>],
        _server_name: &rustls::pki_types::ServerName<'_>,
        _ocsp_response: &[u8],
        _now: rustls::pki_types::UnixTime,
    ) -> Result<rustls::client::danger::ServerCertVerified, rustls::Error> {
        Ok(rustls::client::danger::ServerCertVerified::assertion())
    }

    fn verify_tls12_signature(
        &self,
        _message: &[u8],
        _cert: &rustls::pki_types::CertificateDer<'_>,
        _dss: &rustls::DigitallySignedStruct,
    ) -> Result<rustls::client::danger::HandshakeSignatureValid, rustls::Error> {
        Ok(rustls::client::danger::HandshakeSignatureValid::assertion())
    }

    fn verify_tls13_signature(
        &self,
        _message: &[u8],
        _cert: &rustls::pki_types::CertificateDer<'_>,
        _dss: &rustls::DigitallySignedStruct,
    ) -> Result<rustls::client::danger::HandshakeSignatureValid, rustls::Error> {
        Ok(rustls::client::danger::HandshakeSignatureValid::assertion())
    }

    fn supported_verify_schemes(&self) -> Vec<rustls::SignatureScheme> {
        rustls::crypto::ring::default_provider()
            .signature_verification_algorithms
            .supported_schemes()
    }
}
