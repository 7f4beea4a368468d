use crate::division::Division;
use crate::error::{EliminationError, Result};
use crate::utils::parser::{read_division, write_division};
use std::fs;
use std::path::Path;
use tracing::debug;

pub fn save_division<P: AsRef<Path>>(path: P, division: &Division) -> Result<()> {
    let bytes = bincode::serialize(division)
        .map_err(|err| EliminationError::Snapshot(format!("serialize division: {err}")))?;
    fs::write(path, bytes)?;
    Ok(())
}

pub fn load_division<P: AsRef<Path>>(path: P) -> Result<Division> {
    let bytes = fs::read(path)?;
    bincode::deserialize(&bytes)
        .map_err(|err| EliminationError::Snapshot(format!("deserialize division: {err}")))
}

fn is_snapshot(path: &Path) -> bool {
    path.extension().and_then(|ext| ext.to_str()) == Some("bin")
}

/// Loads a bincode snapshot for `.bin` files and the text league format
/// otherwise.
pub fn load_any<P: AsRef<Path>>(path: P) -> Result<Division> {
    let path = path.as_ref();
    let division = if is_snapshot(path) {
        load_division(path)?
    } else {
        read_division(path)?
    };
    debug!(
        path = %path.display(),
        teams = division.team_count(),
        leader = division.leader_name(),
        "loaded division"
    );
    Ok(division)
}

/// Counterpart of `load_any`.
pub fn save_any<P: AsRef<Path>>(path: P, division: &Division) -> Result<()> {
    let path = path.as_ref();
    if is_snapshot(path) {
        save_division(path, division)
    } else {
        fs::write(path, write_division(division))?;
        Ok(())
    }
}
