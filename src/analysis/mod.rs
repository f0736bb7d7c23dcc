pub mod enrich;

pub use enrich::enrich;
