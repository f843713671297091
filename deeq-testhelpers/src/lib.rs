#![warn(missing_docs)]
#![warn(clippy::std_instead_of_core)]
#![forbid(unsafe_code)]
#![doc = include_str!("../README.md")]

use std::sync::LazyLock;
use std::time::Instant;
use tracing_subscriber::filter::Targets;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

static START_TIME: LazyLock<Instant> = LazyLock::new(Instant::now);

struct Uptime;

impl FormatTime for Uptime {
    fn format_time(&self, w: &mut Writer<'_>) -> core::fmt::Result {
        let elapsed = START_TIME.elapsed();
        write!(w, "{:4}.{:03}s", elapsed.as_secs(), elapsed.subsec_millis())
    }
}

/// Installs the global subscriber the first time it is forced.
static SUBSCRIBER_INIT: LazyLock<()> = LazyLock::new(|| {
    let _ = *START_TIME;

    let filter = std::env::var("DEEQ_LOG")
        .ok()
        .and_then(|s| s.parse::<Targets>().ok())
        .unwrap_or_else(|| Targets::new().with_default(tracing::Level::TRACE));

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_timer(Uptime)
                .with_target(false)
                .with_level(true)
                .with_file(true)
                .with_line_number(true)
                .with_test_writer()
                .compact(),
        )
        .with(filter)
        .try_init()
        .ok();
});

/// Sets up tracing for a test.
///
/// Safe to call from every test: the subscriber is installed exactly once
/// per process, whether tests run under `cargo test` or `cargo nextest`.
pub fn setup() {
    LazyLock::force(&SUBSCRIBER_INIT);
}

#[cfg(test)]
mod tests {
    #[test]
    fn setup_is_idempotent() {
        super::setup();
        super::setup();
        tracing::debug!("subscriber installed");
    }

    #[test]
    fn events_format_with_fields() {
        super::setup();
        tracing::info!(left = 1, right = 2, "compared");
        tracing::trace!(shape = %"Vec<i32>", "aligned");
    }
}
