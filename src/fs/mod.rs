pub mod interaction_files;
pub mod school_files;
pub mod work_dir;

pub use work_dir::WorkDir;
