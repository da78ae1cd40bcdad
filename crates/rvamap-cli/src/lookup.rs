use std::io::Write;
use std::path::Path;

use miette::IntoDiagnostic;
use rvamap_exports::{Dumper, ExportRecord, ExportTable, RvaWindow, format_hex};

/// Runs the export lookup of `virtual_addr` in the library at `dll_path`,
/// loaded at `base_addr`.
///
/// The report header is written once the dumper has run. Exports are then
/// written as they are found, so a malformed row fails the lookup after the
/// exports sorted before it have been written.
pub fn evaluate_lookup(
    dll_path: &Path,
    virtual_addr: u64,
    base_addr: u64,
    dumper: &Dumper,
    mut output: impl Write,
) -> miette::Result<()> {
    let window = RvaWindow::from_addresses(virtual_addr, base_addr);

    tracing::debug!(
        rva = %format_hex(window.rva()),
        min = %format_hex(window.min()),
        max = %format_hex(window.max()),
        "searching exports"
    );

    let dump = dumper.dump_exports(dll_path).into_diagnostic()?;
    let table = ExportTable::from_dump(&dump);

    write_header(&mut output, &window).into_diagnostic()?;

    let res = table.exports_near(&window).try_for_each(|export| {
        let export = export.into_diagnostic()?;
        write_export(&mut output, &export).into_diagnostic()
    });

    output.flush().into_diagnostic()?;

    res
}

/// Writes the two header lines of the lookup report.
pub fn write_header(output: &mut impl Write, window: &RvaWindow) -> std::io::Result<()> {
    writeln!(
        output,
        "DLL symbols near RVA = {} (delta = {})",
        format_hex(window.rva()),
        format_hex(window.delta().into())
    )?;
    writeln!(output, "RVA      Name")
}

/// Writes the report line of an export: its RVA column then its name.
pub fn write_export(output: &mut impl Write, export: &ExportRecord) -> std::io::Result<()> {
    writeln!(output, "{} {}", export.rva_text, export.name)
}

#[cfg(test)]
mod tests {
    use rvamap_exports::{ExportRecord, RvaWindow};

    use super::{write_export, write_header};

    fn export(rva: u64, name: &str) -> ExportRecord {
        ExportRecord {
            ordinal: "1".to_owned(),
            hint: "0".to_owned(),
            rva_text: format!("{rva:08X}"),
            rva,
            name: name.to_owned(),
        }
    }

    #[test]
    fn report_with_exports() {
        let window = RvaWindow::from_addresses(0x7ffac3d43cb7, 0x7ffac3cb0000);
        let mut output = Vec::new();

        write_header(&mut output, &window).expect("write header");
        for export in [export(0x93ca0, "FuncB"), export(0x93cc0, "FuncA")] {
            write_export(&mut output, &export).expect("write export");
        }

        assert_eq!(
            String::from_utf8(output).expect("utf-8 report"),
            indoc::indoc! {"
                DLL symbols near RVA = 0x93cb7 (delta = 0x1000)
                RVA      Name
                00093CA0 FuncB
                00093CC0 FuncA
            "}
        );
    }

    #[test]
    fn report_without_exports() {
        let window = RvaWindow::from_addresses(0x10, 0x20);
        let mut output = Vec::new();

        write_header(&mut output, &window).expect("write header");

        assert_eq!(
            String::from_utf8(output).expect("utf-8 report"),
            "DLL symbols near RVA = -0x10 (delta = 0x1000)\nRVA      Name\n"
        );
    }
}
