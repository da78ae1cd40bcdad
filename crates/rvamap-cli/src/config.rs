use std::ffi::OsStr;
use std::path::Path;

use miette::IntoDiagnostic;
use rvamap_exports::Dumper;
use rvamap_exports::dumper::{DUMPBIN_EXPORTS_ARG, DUMPBIN_PROGRAM};

/// Environment variable holding the lookup configuration.
pub const CONFIG_ENV: &str = "RVAMAP_CONFIG";

/// Configuration of export lookups.
#[derive(Debug, Default, PartialEq, knus::Decode)]
pub struct LookupConfig {
    /// Export dumper to run against the library.
    #[knus(child, default)]
    pub dumper: DumperConfig,
}

/// Configuration of the export dumper.
#[derive(Debug, PartialEq, knus::Decode)]
pub struct DumperConfig {
    /// Program to spawn.
    #[knus(argument)]
    pub program: String,

    /// Arguments passed before the library path.
    #[knus(arguments)]
    pub args: Vec<String>,
}

impl Default for DumperConfig {
    fn default() -> Self {
        Self {
            program: DUMPBIN_PROGRAM.to_owned(),
            args: vec![DUMPBIN_EXPORTS_ARG.to_owned()],
        }
    }
}

impl DumperConfig {
    /// Builds the configured [Dumper].
    pub fn to_dumper(&self) -> Dumper {
        Dumper::new(&self.program).args(&self.args)
    }
}

/// Loads the lookup configuration from the `RVAMAP_CONFIG` environment
/// variable, falling back to the default one if unset.
pub fn load_config() -> miette::Result<LookupConfig> {
    match std::env::var(CONFIG_ENV) {
        Ok(config) => parse_config(&config),
        Err(std::env::VarError::NotPresent) => Ok(LookupConfig::default()),
        Err(e) => Err(e).into_diagnostic(),
    }
}

/// Parses a lookup configuration (KDL format).
///
/// If it ends with `.kdl`, it is treated as a path to a configuration file.
/// Otherwise it is directly parsed as inline KDL-formatted configuration.
pub fn parse_config(config: &str) -> miette::Result<LookupConfig> {
    let path = Path::new(config);

    let config = if let Some((filename, "kdl")) = path
        .file_name()
        .and_then(OsStr::to_str)
        .zip(path.extension().and_then(OsStr::to_str))
    {
        let content = std::fs::read_to_string(path).into_diagnostic()?;
        knus::parse(filename, &content)?
    } else {
        knus::parse("<content>", config)?
    };

    Ok(config)
}
