//! Wire envelopes and presentation models shared by the client and the UI.

pub mod auth;
pub mod dialog;
pub mod envelope;
