pub mod parser;
pub mod random_division;
pub mod serialization;

pub use parser::{parse_division, read_division, write_division};
pub use random_division::{generate_division, DivisionParameters};
pub use serialization::{load_any, load_division, save_any, save_division};
