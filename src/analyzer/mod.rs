//! Analysis engine for determining version bumps from tracker stories

pub mod bump_resolver;

pub use bump_resolver::resolve;
