//! Controller layer: UI events and command orchestration. Submission state
//! transitions themselves live in `client_core::state`.

pub mod events;
pub mod orchestration;
