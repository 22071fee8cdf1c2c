//! Tracing subscriber setup for applications embedding the pager.
//!
//! ## Usage
//!
//! Call [`init_tracing`] once at startup. `RUST_LOG` takes precedence over
//! the built-in filter; calling it again is harmless.

/// Filter used when `RUST_LOG` is unset or unparsable.
#[cfg(not(target_os = "android"))]
const DEFAULT_FILTER: &str = "error,pagescroll_components=info,pagescroll_ui=info";

/// Installs a global `fmt` subscriber filtered by `RUST_LOG`.
pub fn init_tracing() {
    #[cfg(target_os = "android")]
    {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_max_level(tracing::Level::INFO)
            .try_init();
    }

    #[cfg(not(target_os = "android"))]
    {
        let filter = match tracing_subscriber::EnvFilter::try_from_default_env() {
            Ok(filter) => filter,
            Err(_) => match tracing_subscriber::EnvFilter::try_new(DEFAULT_FILTER) {
                Ok(filter) => filter,
                Err(_) => tracing_subscriber::EnvFilter::new("error"),
            },
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .try_init();
    }
}
