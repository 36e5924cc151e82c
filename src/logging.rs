use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LogFormat;

const DEFAULT_FILTER: &str = "ysi_estimator=info,poem=info";

/// Inicializa el subscriber global; `RUST_LOG` tiene prioridad sobre el filtro por defecto.
pub fn init_logger(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let registry = tracing_subscriber::registry().with(filter);
    match format {
        LogFormat::Compact => registry.with(tracing_subscriber::fmt::layer()
                                                .with_target(false)
                                                .with_thread_ids(false)
                                                .with_file(false)
                                                .with_line_number(false)
                                                .compact())
                                      .init(),
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer()
                                             .with_target(false)
                                             .with_thread_ids(false)
                                             .json())
                                   .init(),
    }
}
