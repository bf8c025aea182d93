//! Author and book catalogue service.
//!
//! The domain services in [`modules`] validate payloads, check that a book's
//! author exists before writing it, and attach authors to books on read.
//! Storage sits behind the ports in `authorbook-db`; HTTP plumbing lives in
//! `authorbook-http`.

pub mod error;
pub mod modules;
pub mod validation;

#[cfg(test)]
pub(crate) mod testing;

use anyhow::Context;
use authorbook_db::StoreSet;
use authorbook_kernel::{settings::Settings, InitCtx, ModuleRegistry};

pub use error::{ServiceError, ServiceResult};

/// Registry holding every feature module wired to `stores`.
pub fn registry(stores: &StoreSet) -> anyhow::Result<ModuleRegistry> {
    let mut registry = ModuleRegistry::new();
    modules::register_all(&mut registry, stores)?;
    Ok(registry)
}

/// Fully layered router over `stores`, without binding a socket.
pub fn app(stores: &StoreSet, settings: &Settings) -> anyhow::Result<axum::Router> {
    let registry = registry(stores)?;
    Ok(authorbook_http::build_router(&registry, settings))
}

/// Connect the stores, run the module lifecycle, and serve until Ctrl-C.
pub async fn run(settings: Settings) -> anyhow::Result<()> {
    let stores = StoreSet::connect(&settings.database)
        .await
        .with_context(|| "failed to build stores")?;

    let registry = registry(&stores)?;
    let ctx = InitCtx {
        settings: &settings,
    };

    registry.init_modules(&ctx).await?;
    registry.start_modules(&ctx).await?;

    let served = authorbook_http::start_server(&registry, &settings, shutdown_signal()).await;

    registry.stop_modules().await?;
    served
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("shutdown signal received"),
        Err(e) => {
            tracing::error!(error = %e, "unable to listen for shutdown signal");
            std::future::pending::<()>().await;
        }
    }
}
