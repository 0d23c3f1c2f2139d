// Adapters layer: concrete implementations for the systems around the
// extraction engine (capture files, webhook delivery).

pub mod capture;
pub mod webhook;
