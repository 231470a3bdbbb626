/*!

# Overview

The `log` module provides the engine's logging: `tracing` events with a numeric verbosity threshold. The log level
describes what _kind_ of message is logged; the threshold describes how _verbose_ the message is. The engine logs
sparingly: cache activity at high thresholds, unsupported or rejected constructions at low ones.

```
use morphlib::{debug, info, warning, log::*};

// Only messages logged at a threshold of at most 1 are emitted from here on.
set_global_logging_threshold(1);

warning!(1, "Emitted.");
debug!(4, "Not emitted.");
info!("Threshold 0 is always emitted.");
```

## Threshold

The global logging threshold is a numerical value, with higher values meaning more verbose logging. A message logged
at threshold `t` is emitted only if `t` is at most the global threshold. A message logged without a threshold is
logged at threshold 0 and always emitted.

The initial threshold is 2. When the logger is first initialized it reads the `MORPHLIB_LOG` environment variable;
if that holds a small nonnegative integer, it replaces the initial threshold. After that, only
`set_global_logging_threshold` changes it.

Thresholds used by the engine:

| threshold | what                                                                |
|:----------|:--------------------------------------------------------------------|
| 1         | unsupported requests, rejected constructions, undecodable records   |
| 3         | canonical searches that found no morphism                           |
| 4         | cache misses and insertions (feature `cache_debug`)                 |
| 5         | cache hits (feature `cache_debug`)                                  |

# Macros

`warning!`, `info!`, `debug!`, `trace!`, each with syntax

```ignore
level!(threshold, "format string", args...);
level!("format string", args...);          // threshold 0
```

Logger initialization is implicit. The threshold is held in an atomic, so the logger is safe to use from any thread.

*/
mod formatter;
mod threshold_filter;
mod macros;

use std::sync::{
    atomic::{AtomicU8, Ordering},
    LazyLock
  };

use tracing_subscriber::{
  fmt,
  layer::SubscriberExt,
  Registry
};

use threshold_filter::ThresholdFilterLayer;
use formatter::EngineFieldFormatter;
pub use macros::*;

/// Environment variable holding the initial logging threshold.
pub const THRESHOLD_VARIABLE: &str = "MORPHLIB_LOG";

static DEFAULT_THRESHOLD: u8 = 2;

/// Used for implicit initialization.
static INIT_LOGGER: LazyLock<()> = LazyLock::new(|| {
  if let Some(threshold) = threshold_from_environment() {
    set_global_logging_threshold(threshold);
  }

  let subscriber = Registry::default()
      .with(ThresholdFilterLayer)
      .with(
        fmt::layer()
            .fmt_fields(EngineFieldFormatter)
            .with_target(false)
            .without_time()
            .with_writer(std::io::stderr),
      );

  // Another subscriber may already be installed by the host application. Its choice wins.
  let _ = tracing::subscriber::set_global_default(subscriber);
});

/// This does not need to be called directly. Initializes the logging system.
pub fn init_logger() {
  LazyLock::force(&INIT_LOGGER);
}

static GLOBAL_LOGGING_THRESHOLD: AtomicU8 = AtomicU8::new(DEFAULT_THRESHOLD);

/// Sets the global threshold.
pub fn set_global_logging_threshold(new_threshold: u8) {
  GLOBAL_LOGGING_THRESHOLD.store(new_threshold, Ordering::SeqCst);
}

/// Retrieves the global threshold.
pub fn get_global_logging_threshold() -> u8 {
  GLOBAL_LOGGING_THRESHOLD.load(Ordering::SeqCst)
}

fn threshold_from_environment() -> Option<u8> {
  parse_threshold(std::env::var(THRESHOLD_VARIABLE).ok()?.as_str())
}

fn parse_threshold(text: &str) -> Option<u8> {
  text.trim().parse::<u8>().ok()
}


#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn parse_threshold_values() {
    assert_eq!(parse_threshold("3"), Some(3));
    assert_eq!(parse_threshold(" 7\n"), Some(7));
    assert_eq!(parse_threshold("verbose"), None);
    assert_eq!(parse_threshold("-1"), None);
  }

  #[test]
  fn test_logging() {
    let modulus = 5;

    set_global_logging_threshold(3);
    info!(2, "Reducing modulo {}", modulus);
    debug!(4, "NOT logged: cache miss for modulus {}", modulus);
    warning!("Unsupported request.");
    trace!(5, "NOT logged: cache hit");

    set_global_logging_threshold(5);
    trace!(5, "Logged after raising the threshold.");
    assert_eq!(get_global_logging_threshold(), 5);
  }
}
