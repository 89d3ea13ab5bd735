pub mod dataset;

pub use dataset::{load_dataset, parse_dataset, render_dataset, save_dataset, DatasetFormat};
