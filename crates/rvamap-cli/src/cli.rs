use std::path::PathBuf;

use rvamap_exports::parse_hex;

/// Prints the DLL exports nearest to a runtime address.
///
/// The relative virtual address `VIRTUAL_ADDR - BASE_ADDR` is looked up in the
/// export table listed by `dumpbin /exports` (see `RVAMAP_CONFIG` to use
/// another dumper).
#[derive(clap::Parser, Debug)]
#[clap(disable_help_flag = true, disable_version_flag = true)]
pub struct CliOpts {
    /// Path to the dynamic library.
    #[clap(value_name = "DLL_PATH", allow_hyphen_values = true)]
    pub dll_path: PathBuf,

    /// Runtime virtual address (hexadecimal, without `0x` prefix).
    #[clap(value_name = "VIRTUAL_ADDR", value_parser = parse_hex)]
    pub virtual_addr: u64,

    /// Load base address of the library (hexadecimal, without `0x` prefix).
    #[clap(value_name = "BASE_ADDR", value_parser = parse_hex)]
    pub base_addr: u64,
}

impl CliOpts {
    /// Parses the CLI from the command-line.
    ///
    /// # Warning
    ///
    /// Exits on error.
    pub fn parse_from_cmdline() -> Self {
        <Self as clap::Parser>::parse()
    }
}
