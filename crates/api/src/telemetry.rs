use tracing_subscriber::{EnvFilter, prelude::*};

pub fn init_sentry_guard(dsn: Option<&str>) -> Option<sentry::ClientInitGuard> {
    let dsn = dsn?;

    let guard = sentry::init((
        dsn,
        sentry::ClientOptions {
            release: sentry::release_name!(),
            // Questions can contain customer data, keep them out of events.
            send_default_pii: false,
            ..Default::default()
        },
    ));

    Some(guard)
}

/// Console logging filtered by `RUST_LOG` (default `info`), with warnings and
/// errors also forwarded to Sentry when it is initialised.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .with(sentry_tracing::layer())
        .init();
}
