//! Implementation-internal state tracking

pub(crate) mod offset;
