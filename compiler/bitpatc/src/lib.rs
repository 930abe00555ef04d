//! Command-line front end for `bitpat`.
//!
//! The binary (`bitpat`) is a thin argument dispatcher over [`commands`];
//! everything here writes to a caller-supplied writer so it can be tested
//! without spawning a process.

pub mod commands;
pub mod diagnostic;
pub mod number;
pub mod table;

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Safe to call multiple times. Enable with `RUST_LOG=bitpat=debug` or
/// `RUST_LOG=bitpat=trace`; set `BITPAT_LOG_TREE=1` for indented span
/// trees instead of flat lines.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        // Only initialize if RUST_LOG is set
        if std::env::var("RUST_LOG").is_err() {
            return;
        }
        let filter = EnvFilter::from_default_env();
        if std::env::var_os("BITPAT_LOG_TREE").is_some() {
            tracing_subscriber::registry()
                .with(
                    tracing_tree::HierarchicalLayer::new(2)
                        .with_targets(true)
                        .with_writer(std::io::stderr),
                )
                .with(filter)
                .init();
        } else {
            tracing_subscriber::registry()
                .with(
                    fmt::layer()
                        .with_target(true)
                        .with_level(true)
                        .with_writer(std::io::stderr),
                )
                .with(filter)
                .init();
        }
    });
}
