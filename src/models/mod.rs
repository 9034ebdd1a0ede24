pub mod clock_time;
pub mod interaction;
pub mod next_step;
pub mod role;
pub mod school;
pub mod serialization;
pub mod stage;

pub use serialization::MarkdownSerializable;
