//! JSON-based project loader
//!
//! Reads a fully-populated `ProjectInput` from a JSON file and re-checks
//! the documented invariants before handing it to the engine.

use std::error::Error;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use super::data::ProjectInput;

/// Load a project input from a JSON file
pub fn load_project(path: &Path) -> Result<ProjectInput, Box<dyn Error>> {
    let file = File::open(path)?;
    let input: ProjectInput = serde_json::from_reader(BufReader::new(file))?;
    input.validate()?;
    Ok(input)
}

/// Parse a project input from a JSON string
pub fn parse_project(json: &str) -> Result<ProjectInput, Box<dyn Error>> {
    let input: ProjectInput = serde_json::from_str(json)?;
    input.validate()?;
    Ok(input)
}
