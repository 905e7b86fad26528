use std::path::Path;
use std::process::{Command, Stdio};

use eyre::{Result, bail};
use log::{debug, info};

/// Default external Markdown-to-PDF converter
pub const DEFAULT_CONVERTER: &str = "pandoc";

/// Document title embedded in the PDF metadata
pub const DEFAULT_PDF_TITLE: &str = "YouTube Video Summary";

/// Render a Markdown file to PDF with an external converter.
///
/// The converter is invoked pandoc-style:
/// `<converter> <input> -o <output> --metadata title=<title>`.
pub fn convert(converter: &str, input: &Path, output: &Path, title: &str) -> Result<()> {
    debug!("Converting {} -> {} via {converter}", input.display(), output.display());

    let result = Command::new(converter)
        .arg(input)
        .arg("-o")
        .arg(output)
        .arg("--metadata")
        .arg(format!("title={title}"))
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output();

    match result {
        Ok(out) if out.status.success() => {}
        Ok(out) => {
            let stderr = String::from_utf8_lossy(&out.stderr);
            bail!("{converter} exited with status {}: {}", out.status, stderr.trim());
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            bail!(
                "{converter} not found. Install it to enable PDF output:\n  \
                 brew install pandoc\n  \
                 or: apt install pandoc texlive-latex-recommended\n  \
                 or rerun with --no-pdf"
            );
        }
        Err(e) => bail!("failed to run {converter}: {e}"),
    }

    if !output.exists() {
        bail!("{converter} did not produce expected output file: {}", output.display());
    }

    info!("PDF written: {}", output.display());
    Ok(())
}
