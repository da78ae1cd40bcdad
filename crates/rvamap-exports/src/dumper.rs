use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// Default export dumper program.
pub const DUMPBIN_PROGRAM: &str = "dumpbin";

/// Default export dumper argument selecting the export table.
pub const DUMPBIN_EXPORTS_ARG: &str = "/exports";

/// External program listing the exports of a dynamic library as text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dumper {
    /// Program to spawn.
    pub program: PathBuf,

    /// Arguments preceding the library path.
    pub args: Vec<OsString>,
}

impl Dumper {
    /// Constructs a new `Dumper` spawning `program` with no argument
    /// other than the library path.
    ///
    /// If `program` is not an absolute path, the `PATH` will be searched in
    /// an OS-defined way.
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Constructs the `dumpbin /exports` dumper shipped with Visual Studio.
    pub fn dumpbin() -> Self {
        Self::new(DUMPBIN_PROGRAM).arg(DUMPBIN_EXPORTS_ARG)
    }

    /// Adds an argument to pass to the program, before the library path.
    ///
    /// To pass multiple arguments see [`args`](Self::args).
    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Adds multiple arguments to pass to the program.
    ///
    /// To pass a single argument see [`arg`](Self::arg).
    pub fn args<I, S>(self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        args.into_iter().fold(self, |dumper, arg| dumper.arg(arg))
    }

    /// Runs the dumper against `library` and returns its standard output.
    ///
    /// The call blocks until the program exits. Its standard error is
    /// inherited, and a non-success exit status is an error.
    #[tracing::instrument(name = "DumpExports", skip_all, fields(library = %library.display()))]
    pub fn dump_exports(&self, library: &Path) -> crate::Result<String> {
        tracing::debug!(program = %self.program.display(), args = ?self.args, "spawning dumper");

        let output = Command::new(&self.program)
            .args(&self.args)
            .arg(library)
            .stdin(Stdio::null())
            .stderr(Stdio::inherit())
            .output()
            .map_err(|e| crate::Error::Spawn(self.program.clone(), e))?;

        if !output.status.success() {
            return Err(crate::Error::DumperStatus {
                program: self.program.clone(),
                status: output.status,
            });
        }

        tracing::debug!(len = output.stdout.len(), "captured dumper output");

        Ok(String::from_utf8(output.stdout)?)
    }
}

impl Default for Dumper {
    fn default() -> Self {
        Self::dumpbin()
    }
}

#[cfg(test)]
mod tests {
    use std::ffi::OsString;
    use std::path::{Path, PathBuf};

    use super::Dumper;

    #[test]
    fn default_is_dumpbin_exports() {
        let dumper = Dumper::default();

        assert_eq!(dumper.program, PathBuf::from("dumpbin"));
        assert_eq!(dumper.args, [OsString::from("/exports")]);
    }

    #[test]
    fn builder_keeps_argument_order() {
        let dumper = Dumper::new("llvm-readobj").arg("--coff-exports").args(["-a", "-b"]);

        assert_eq!(dumper.args, ["--coff-exports", "-a", "-b"]);
    }

    #[test]
    fn missing_program() {
        let err = Dumper::new("rvamap-no-such-dumper")
            .dump_exports(Path::new("foo.dll"))
            .expect_err("dumper error");

        assert!(matches!(err, crate::Error::Spawn(ref program, _) if program == Path::new("rvamap-no-such-dumper")));
    }

    #[cfg(unix)]
    #[test]
    fn library_path_is_last_argument() {
        let output = Dumper::new("sh")
            .args(["-c", "printf '%s\\r\\n' \"$0\""])
            .dump_exports(Path::new("foo.dll"))
            .expect("dump exports");

        assert_eq!(output, "foo.dll\r\n");
    }

    #[cfg(unix)]
    #[test]
    fn failing_dumper() {
        let err = Dumper::new("sh")
            .args(["-c", "exit 3"])
            .dump_exports(Path::new("foo.dll"))
            .expect_err("dumper error");

        assert!(matches!(err, crate::Error::DumperStatus { ref status, .. } if status.code() == Some(3)));
    }

    #[cfg(unix)]
    #[test]
    fn non_utf8_output() {
        let err = Dumper::new("sh")
            .args(["-c", "printf '\\377\\376'"])
            .dump_exports(Path::new("foo.dll"))
            .expect_err("dumper error");

        assert!(matches!(err, crate::Error::Utf8(_)));
    }
}
