// Copyright lowRISC contributors.
// Licensed under the Apache License, Version 2.0, see LICENSE for details.
// SPDX-License-Identifier: Apache-2.0

//! Logging and error-reporting macros.
//!
//! With the `log` feature off, every macro here expands to nothing but its
//! control flow; format strings are compiled out entirely.
//!
//! Nothing outside this module names the [`log`] crate.

#[cfg(doc)]
use __raw_log as log;

/// Returns `Err($error)` from the enclosing function unless `$cond` holds,
/// logging the failed condition.
macro_rules! check {
    ($cond:expr, $error:expr) => {
        if !$cond {
            let error = $error;
            return fail!(
                error,
                "`{}` does not hold; failing with {:?}",
                stringify!($cond),
                error,
            );
        }
    };
}

/// Logs `$error` and evaluates to `Err($error)`.
///
/// Every error this crate originates goes through here, e.g.
/// `return fail!(Error::Truncated);` or
/// `.ok_or_else(|| fail!(Error::MissingAsset(..)))`.
macro_rules! fail {
    ($error:expr, $($format:tt)+) => {{
        error!($($format)+);
        Err($error)
    }};
    ($error:expr) => {{
        let error = $error;
        error!("failing with {:?}", error);
        Err(error)
    }};
}

/// [`log::trace!()`], compiled out without the `log` feature.
macro_rules! trace {
    ($($args:tt)*) => {
        #[cfg(feature = "log")]
        let _ = __raw_log::trace!($($args)*);
    }
}

/// [`log::info!()`], compiled out without the `log` feature.
macro_rules! info {
    ($($args:tt)*) => {
        #[cfg(feature = "log")]
        let _ = __raw_log::info!($($args)*);
    }
}

/// [`log::warn!()`], compiled out without the `log` feature.
macro_rules! warn {
    ($($args:tt)*) => {
        #[cfg(feature = "log")]
        let _ = __raw_log::warn!($($args)*);
    }
}

/// [`log::error!()`], compiled out without the `log` feature.
macro_rules! error {
    ($($args:tt)*) => {
        #[cfg(feature = "log")]
        let _ = __raw_log::error!($($args)*);
    }
}

/// Installs a logger for unit tests before the harness starts.
///
/// Output goes to stderr through `eprintln!`, so the harness only shows it
/// for failing tests.
#[cfg(all(test, feature = "log"))]
#[ctor::ctor]
fn init_test_logger() {
    env_logger::builder()
        .format(|_, record| {
            let file = record.file().unwrap_or("?");
            let line = record.line().unwrap_or(0);
            for msg in record.args().to_string().trim().lines() {
                eprintln!("[{} {}:{}] {}", record.level(), file, line, msg);
            }
            Ok(())
        })
        .init();
}
