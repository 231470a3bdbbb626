//! Macros for generating log messages.

#[macro_export]
macro_rules! warning {
    ($threshold:literal, $($arg:tt)+) => {
        {
            $crate::log::init_logger();
            tracing::event!(
                tracing::Level::WARN,
                threshold = $threshold,
                message = format_args!($($arg)+)
            );
        }
    };
    ($($arg:tt)+) => {
        {
            $crate::log::init_logger();
            tracing::event!(
                tracing::Level::WARN,
                threshold = 0,
                message = format_args!($($arg)+)
            );
        }
    };
}

#[macro_export]
macro_rules! info {
    ($threshold:literal, $($arg:tt)+) => {
        {
            $crate::log::init_logger();
            tracing::event!(
                tracing::Level::INFO,
                threshold = $threshold,
                message = format_args!($($arg)+)
            );
        }
    };
    ($($arg:tt)+) => {
        {
            $crate::log::init_logger();
            tracing::event!(
                tracing::Level::INFO,
                threshold = 0,
                message = format_args!($($arg)+)
            );
        }
    };
}

#[macro_export]
macro_rules! debug {
    ($threshold:literal, $($arg:tt)+) => {
        {
            $crate::log::init_logger();
            tracing::event!(
                tracing::Level::DEBUG,
                threshold = $threshold,
                message = format_args!($($arg)+)
            );
        }
    };
    ($($arg:tt)+) => {
        {
            $crate::log::init_logger();
            tracing::event!(
                tracing::Level::DEBUG,
                threshold = 0,
                message = format_args!($($arg)+)
            );
        }
    };
}

#[macro_export]
macro_rules! trace {
    ($threshold:literal, $($arg:tt)+) => {
        {
            $crate::log::init_logger();
            tracing::event!(
                tracing::Level::TRACE,
                threshold = $threshold,
                message = format_args!($($arg)+)
            );
        }
    };
    ($($arg:tt)+) => {
        {
            $crate::log::init_logger();
            tracing::event!(
                tracing::Level::TRACE,
                threshold = 0,
                message = format_args!($($arg)+)
            );
        }
    };
}


// The following makes the macros importable directly from the `log` module.
pub use {warning, info, debug, trace};
