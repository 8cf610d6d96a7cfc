//! Register transport tests.

/// `/dev/mem`-style page windows, exercised on a regular file.
#[cfg(unix)]
pub mod devmem;
