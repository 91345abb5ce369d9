pub mod binder;
pub mod classifier;
pub mod emitters;
pub mod generator;
pub mod marshal;
pub mod type_mapper;

pub use generator::{Artifact, RailsServerGenerator};
