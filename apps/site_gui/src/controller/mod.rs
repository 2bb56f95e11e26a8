//! Controller layer: status events and routing of UI actions to navigation.

pub mod events;
pub mod orchestration;
