//! Test doubles for the register transport.
