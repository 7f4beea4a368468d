pub mod config;
pub mod division;
pub mod elimination;
pub mod error;
pub mod flow;
pub mod utils;

pub use config::{OutputFormat, ReportConfig};
pub use division::{Division, DivisionRecord, Team, TeamId};
pub use elimination::{
	Certificate,
	EliminationKind,
	EliminationNetwork,
	EliminationOracle,
	EliminationReport,
	TeamStanding,
	Verdict,
};
pub use error::{EliminationError, Result};
pub use flow::{FlowEdge, FlowNetwork, FordFulkerson};
