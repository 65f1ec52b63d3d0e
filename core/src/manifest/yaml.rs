use std::{env, fs::File, io::Read, path::Path};

use regex::{Captures, Regex};

use crate::manifest::core::Manifest;

pub const YAML_CONFIG_NAME: &str = "yielder-indexer.yaml";

#[derive(thiserror::Error, Debug)]
pub enum ReadManifestError {
    #[error("Could not open file: {0}")]
    CouldNotOpenFile(#[from] std::io::Error),

    #[error("Could not parse manifest: {0}")]
    CouldNotParseManifest(#[from] serde_yaml::Error),

    #[error("Could not build env variable pattern: {0}")]
    CouldNotBuildEnvPattern(#[from] regex::Error),

    #[error("Environment variable {0} not found")]
    EnvVariableNotFound(String),
}

fn substitute_env_variables(contents: &str) -> Result<String, ReadManifestError> {
    let re = Regex::new(r"\$\{([^}]+)\}")?;

    let mut missing: Option<String> = None;
    let result = re.replace_all(contents, |caps: &Captures| {
        let var_name = &caps[1];
        match env::var(var_name) {
            Ok(value) => value,
            Err(_) => {
                missing.get_or_insert_with(|| var_name.to_string());
                String::new()
            }
        }
    });

    if let Some(var_name) = missing {
        return Err(ReadManifestError::EnvVariableNotFound(var_name));
    }

    Ok(result.into_owned())
}

pub fn read_manifest(file_path: &Path) -> Result<Manifest, ReadManifestError> {
    let mut file = File::open(file_path)?;
    let mut contents = String::new();
    file.read_to_string(&mut contents)?;

    let substituted = substitute_env_variables(&contents)?;
    let manifest: Manifest = serde_yaml::from_str(&substituted)?;

    Ok(manifest)
}
