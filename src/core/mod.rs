pub mod categories;
pub mod feature_header;
pub mod records;
pub mod target;
