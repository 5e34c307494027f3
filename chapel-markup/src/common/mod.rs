//! Logic shared by the serializers: turning the block list into events and
//! deciding which URLs may be emitted.

pub mod links;
pub mod nested_to_flat;

pub use nested_to_flat::to_events;
