pub mod history;
pub mod lookup;
