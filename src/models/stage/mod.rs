mod registry;
mod types;


pub use registry::{
    describe, describe_value, index_of, index_of_value, list_stages, progress_percentage,
    StageDescriptor, TERMINAL_INDEX,
};
pub use types::FunnelStage;
