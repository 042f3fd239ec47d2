mod datasets;

pub use datasets::{load_datasets, BrowserFetch, DatasetPaths, DatasetSource, Datasets, LoadError};
