pub mod addresses;
pub mod root;
