/// loading of element tables from comma-delimited text files
pub mod load_from_file;
