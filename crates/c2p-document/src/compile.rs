//! Compilation of assembled LaTeX into a PDF.
//!
//! Compilation runs in a scratch directory. Only the PDF is moved next to the
//! requested output; the `.aux`, `.log` and `.tex` files are copied there
//! when cleanup is disabled or when the compiler fails.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use c2p_core::{C2pError, Result};

const ARTIFACT_EXTENSIONS: [&str; 3] = ["aux", "log", "tex"];

// ---------------------------------------------------------------------------
// DocumentCompiler trait
// ---------------------------------------------------------------------------

/// Turns `<work_dir>/<jobname>.tex` into `<work_dir>/<jobname>.pdf`.
pub trait DocumentCompiler {
    fn compile(&self, tex_path: &Path, jobname: &str, work_dir: &Path) -> Result<()>;
}

/// Runs `xelatex` in non-interactive mode.
#[derive(Debug, Clone)]
pub struct XelatexCompiler {
    program: PathBuf,
}

impl XelatexCompiler {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for XelatexCompiler {
    fn default() -> Self {
        Self::new("xelatex")
    }
}

impl DocumentCompiler for XelatexCompiler {
    fn compile(&self, tex_path: &Path, jobname: &str, work_dir: &Path) -> Result<()> {
        let program = self.program.display().to_string();
        tracing::debug!(%program, jobname, "running compiler");

        let output = Command::new(&self.program)
            .arg("-interaction=nonstopmode")
            .arg(format!("-jobname={}", jobname))
            .arg(format!("-output-directory={}", work_dir.display()))
            .arg(tex_path)
            .current_dir(work_dir)
            .output()
            .map_err(|e| C2pError::CompileFailed(format!("could not run {}: {}", program, e)))?;

        if !output.status.success() {
            return Err(C2pError::CompileFailed(format!(
                "{} exited with {}",
                program, output.status
            )));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// PDF generation
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct PdfRequest<'a> {
    /// Assembled LaTeX source.
    pub tex: &'a str,
    /// Destination PDF path; relative paths resolve against the current
    /// directory.
    pub output: &'a Path,
    /// Discard intermediate files after a successful build.
    pub cleanup: bool,
}

/// Compile `request.tex` and move the PDF to `request.output`.
///
/// Returns the absolute path of the written PDF.
pub fn generate_pdf(request: &PdfRequest<'_>, compiler: &dyn DocumentCompiler) -> Result<PathBuf> {
    let output = absolute(request.output)?;
    let (out_dir, jobname) = split_output(&output)?;
    fs::create_dir_all(&out_dir)?;

    let work = tempfile::Builder::new().prefix("chinese2pdf-").tempdir()?;
    let tex_path = work.path().join(format!("{}.tex", jobname));
    fs::write(&tex_path, request.tex)?;

    if let Err(e) = compiler.compile(&tex_path, &jobname, work.path()) {
        let kept = preserve_artifacts(work.path(), &jobname, &out_dir)?;
        tracing::warn!(error = %e, kept, dir = %out_dir.display(), "compilation failed, artifacts kept");
        return Err(e);
    }

    let pdf = work.path().join(format!("{}.pdf", jobname));
    if !pdf.is_file() {
        preserve_artifacts(work.path(), &jobname, &out_dir)?;
        return Err(C2pError::MissingOutput(pdf));
    }
    move_file(&pdf, &output)?;

    if !request.cleanup {
        let kept = preserve_artifacts(work.path(), &jobname, &out_dir)?;
        tracing::debug!(kept, "kept intermediate files");
    }

    tracing::info!(path = %output.display(), "wrote pdf");
    Ok(output)
}

/// Write the LaTeX source next to `output` as `<stem>.tex` without compiling.
pub fn write_tex(tex: &str, output: &Path) -> Result<PathBuf> {
    let output = absolute(output)?;
    let (out_dir, jobname) = split_output(&output)?;
    fs::create_dir_all(&out_dir)?;
    let path = out_dir.join(format!("{}.tex", jobname));
    fs::write(&path, tex)?;
    tracing::info!(path = %path.display(), "wrote tex source");
    Ok(path)
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

fn absolute(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        Ok(std::env::current_dir()?.join(path))
    }
}

fn split_output(output: &Path) -> Result<(PathBuf, String)> {
    let jobname = output
        .file_stem()
        .and_then(|s| s.to_str())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| C2pError::InvalidInput(format!("bad output path: {}", output.display())))?;
    let dir = output
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));
    Ok((dir, jobname.to_string()))
}

/// Copy whichever intermediate files exist; returns how many were copied.
fn preserve_artifacts(work_dir: &Path, jobname: &str, out_dir: &Path) -> Result<usize> {
    let mut kept = 0;
    for ext in ARTIFACT_EXTENSIONS {
        let name = format!("{}.{}", jobname, ext);
        let src = work_dir.join(&name);
        if src.is_file() {
            fs::copy(&src, out_dir.join(&name))?;
            kept += 1;
        }
    }
    Ok(kept)
}

fn move_file(from: &Path, to: &Path) -> Result<()> {
    if fs::rename(from, to).is_ok() {
        return Ok(());
    }
    // Cross-device: the scratch directory may live on another filesystem.
    fs::copy(from, to)?;
    fs::remove_file(from)?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
