pub use tracing::{
    debug, debug_span, error, error_span, info, info_span, instrument, trace, trace_span, warn,
    warn_span,
};

mod error;
pub use error::{Error, Result};

pub mod charsets;
pub mod citekey;
pub mod date;
pub mod fields;
pub mod formats;
pub mod generic;
pub mod genres;
pub mod name;
pub mod notes;
pub mod pages;
pub mod param;
pub mod pipeline;
pub mod reftypes;
pub mod serialno;
pub mod title;
pub mod typeinf;
pub mod url;

pub use fields::{FieldStore, LEVEL_ANY, LEVEL_HOST, LEVEL_MAIN, LEVEL_ORIG, LEVEL_SERIES};
pub use param::{InputFormat, OutputFormat, Param};
pub use pipeline::Batch;

pub fn logging_init() {
    use tracing_subscriber::{filter::LevelFilter, fmt, prelude::*, EnvFilter};

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).without_time())
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::WARN.into())
                .from_env_lossy(),
        )
        .init();
}

pub fn logging_init_test() {
    use tracing_subscriber::fmt;
    fmt().without_time().try_init().ok();
}
