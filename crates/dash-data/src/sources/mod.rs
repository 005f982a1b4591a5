pub mod csv_source;

pub use csv_source::{read_csv, read_csv_file, source_name};
