//! ServerBuilder for fluent API to build HTTP servers

use super::exposure::RestExposure;
use super::host::ServerHost;
use crate::config::{AppConfig, MailConfig};
use crate::core::ConfigurationStore;
use crate::notify::{LogMailer, Mailer, mailer_for};
use crate::storage::InMemoryConfigurationStore;
use anyhow::Result;
use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;

/// Builder for the configuration service
///
/// Every component has a default: an in-memory store, a logging mailer and
/// the default mail settings.
///
/// # Example
///
/// ```ignore
/// let app = ServerBuilder::new()
///     .with_store(InMemoryConfigurationStore::new())
///     .with_mailer(RecordingMailer::new())
///     .build();
/// ```
pub struct ServerBuilder {
    store: Option<Arc<dyn ConfigurationStore>>,
    mailer: Option<Arc<dyn Mailer>>,
    mail: MailConfig,
}

impl ServerBuilder {
    /// Create a new ServerBuilder
    pub fn new() -> Self {
        Self {
            store: None,
            mailer: None,
            mail: MailConfig::default(),
        }
    }

    /// Start from an application configuration
    ///
    /// Picks the HTTP relay mailer when `mail.relay_url` is set.
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let mailer = mailer_for(&config.mail)?;
        Ok(Self {
            store: None,
            mailer: Some(mailer),
            mail: config.mail.clone(),
        })
    }

    /// Set the configuration store
    pub fn with_store(mut self, store: impl ConfigurationStore + 'static) -> Self {
        self.store = Some(Arc::new(store));
        self
    }

    /// Set the mailer used for branch notifications
    pub fn with_mailer(mut self, mailer: impl Mailer + 'static) -> Self {
        self.mailer = Some(Arc::new(mailer));
        self
    }

    /// Set sender and branch addressing
    pub fn with_mail_config(mut self, mail: MailConfig) -> Self {
        self.mail = mail;
        self
    }

    /// Build the transport-agnostic host
    pub fn build_host(self) -> ServerHost {
        let store = self
            .store
            .unwrap_or_else(|| Arc::new(InMemoryConfigurationStore::new()));
        let mailer = self.mailer.unwrap_or_else(|| Arc::new(LogMailer));

        ServerHost::new(store, mailer, self.mail)
    }

    /// Build the final REST router
    pub fn build(self) -> Router {
        RestExposure::build_router(Arc::new(self.build_host()))
    }

    /// Serve the application with graceful shutdown
    ///
    /// This will:
    /// - Bind to the provided address
    /// - Start serving requests
    /// - Handle SIGTERM and SIGINT (Ctrl+C) for graceful shutdown
    pub async fn serve(self, addr: SocketAddr) -> Result<()> {
        let app = self.build();
        let listener = TcpListener::bind(addr).await?;

        tracing::info!("Server listening on {}", listener.local_addr()?);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Resolves on Ctrl+C or SIGTERM
///
/// If a handler cannot be installed the failure is logged and that signal is
/// simply never observed.
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal, initiating graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal, initiating graceful shutdown...");
        },
    }
}
