use std::{fs, path::Path};

use tracing::debug;

use crate::{CompiledMdp, GridSpec, MdpError, MdpSpec};

/// Load a tabular MDP spec from YAML on disk. The spec is not validated.
pub fn load_yaml(path: impl AsRef<Path>) -> Result<MdpSpec, MdpError> {
    let path = path.as_ref();
    let yaml = fs::read_to_string(path)?;
    let spec: MdpSpec = serde_yaml::from_str(&yaml)?;
    debug!(path = %path.display(), states = spec.states.len(), "loaded mdp spec");
    Ok(spec)
}

/// Load, validate and compile a tabular MDP from a YAML file.
pub fn compile_yaml(path: impl AsRef<Path>) -> Result<CompiledMdp, MdpError> {
    load_yaml(path)?.compile()
}

pub fn save_yaml(path: impl AsRef<Path>, spec: &MdpSpec) -> Result<(), MdpError> {
    let yaml = serde_yaml::to_string(spec)?;
    fs::write(path, yaml)?;
    Ok(())
}

/// Load and validate a grid layout from YAML on disk.
pub fn load_grid_yaml(path: impl AsRef<Path>) -> Result<GridSpec, MdpError> {
    let path = path.as_ref();
    let spec = GridSpec::from_yaml_str(&fs::read_to_string(path)?)?;
    debug!(path = %path.display(), height = spec.height, width = spec.width, "loaded grid spec");
    Ok(spec)
}

pub fn save_grid_yaml(path: impl AsRef<Path>, spec: &GridSpec) -> Result<(), MdpError> {
    fs::write(path, serde_yaml::to_string(spec)?)?;
    Ok(())
}
