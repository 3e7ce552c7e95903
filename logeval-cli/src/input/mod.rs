//! Input handling module

pub mod external;
pub mod label_reader;
pub mod layout;

pub use external::load_external;
pub use label_reader::LabelReader;
pub use layout::{find_ground_truth, find_prediction, list_subdirs};
