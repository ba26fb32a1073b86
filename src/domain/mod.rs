//! Domain layer: entities, lifecycle status, click pipeline, repository traits.

pub mod click_event;
pub mod click_worker;
pub mod entities;
pub mod repositories;
pub mod status;
