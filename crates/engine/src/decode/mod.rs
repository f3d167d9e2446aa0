//! Request decoders, one per wire format. Both produce a
//! [`RequestEnvelope`](extgate_types::RequestEnvelope).

pub mod legacy;
pub mod omaha;
