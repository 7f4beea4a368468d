pub mod division;
pub mod team;

pub use division::{Division, DivisionRecord};
pub use team::{Team, TeamId};
