pub mod date;
pub mod record;
pub mod table;

pub use date::*;
pub use record::*;
pub use table::*;
