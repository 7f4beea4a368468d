pub mod builder;
pub mod oracle;
pub mod report;

pub use builder::EliminationNetwork;
pub use oracle::{Certificate, EliminationKind, EliminationOracle, Verdict};
pub use report::{EliminationReport, TeamStanding};
