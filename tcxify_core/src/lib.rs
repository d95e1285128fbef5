pub mod altitude;
pub mod byte_counter;
pub mod distance;
pub mod emit;
pub mod error;
pub mod formatting;
pub mod heart_rate;
pub mod model;
pub mod model_impls;
pub mod pipeline;
pub mod read;
pub mod summary;
pub mod tcx_writer;
pub mod trim;
