use std::path::{Path, PathBuf};

use clap::{ArgAction, Parser, ValueEnum};

use c2p_core::vocabulary::read_rows;
use c2p_core::{C2pError, FormatConfig, HskLevel, IndexBuilder, Result, VocabularyIndex};
use c2p_document::{generate_pdf, write_tex, PdfRequest, Template, XelatexCompiler};
use c2p_render::{RenderedBodies, TextFormatter};
use c2p_text::{DictionarySegmenter, JiebaSegmenter, PinyinRomanizer, Segmenter};

/// How Hanzi runs are split into words.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum SegmenterKind {
    /// Dictionary segmentation with the bundled jieba dictionary
    Jieba,
    /// Longest match against the loaded vocabulary
    Dictionary,
}

#[derive(Debug, Parser)]
#[command(name = "chinese2pdf")]
#[command(about = "Typeset Chinese text as Hanzi, Pinyin and Hanzi-with-Pinyin sections in a PDF")]
struct Args {
    /// UTF-8 text file to convert
    input: PathBuf,

    /// Output PDF path
    #[arg(short, long, default_value = "output.pdf")]
    output: PathBuf,

    /// Document title
    #[arg(short, long, default_value = "ChineseToPDF")]
    title: String,

    /// Keep the .aux, .log and .tex files next to the PDF
    #[arg(long = "no-cleanup", action = ArgAction::SetFalse)]
    cleanup: bool,

    /// Vocabulary table (.csv or .json)
    #[arg(long)]
    hsk_csv: Option<PathBuf>,

    /// Annotate only these HSK levels; all levels when given without values
    #[arg(long, num_args = 0.., value_parser = clap::value_parser!(u8).range(1..=6))]
    annotate_hsk: Option<Vec<u8>>,

    /// TOML file with formatting options
    #[arg(long)]
    config: Option<PathBuf>,

    /// LaTeX template overriding the built-in one
    #[arg(long)]
    template: Option<PathBuf>,

    /// Word segmentation strategy
    #[arg(long, value_enum, default_value_t = SegmenterKind::Jieba)]
    segmenter: SegmenterKind,

    /// Also write the rendered bodies as JSON
    #[arg(long)]
    emit_json: Option<PathBuf>,

    /// Write the .tex source instead of compiling
    #[arg(long)]
    tex_only: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

impl Args {
    fn levels(&self) -> Vec<HskLevel> {
        self.annotate_hsk
            .iter()
            .flatten()
            .filter_map(|&n| HskLevel::new(n))
            .collect()
    }
}

fn init_logging(verbose: u8) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let default = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_env("CHINESE2PDF_LOG").unwrap_or_else(|_| EnvFilter::new(default));

    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .try_init();
}

fn load_index(args: &Args, config: &FormatConfig) -> Result<VocabularyIndex> {
    let Some(path) = &args.hsk_csv else {
        return Ok(VocabularyIndex::empty());
    };

    let rows = read_rows(path)?;
    let (index, report) = IndexBuilder::new(config).with_levels(args.levels()).build(rows);
    tracing::info!(
        path = %path.display(),
        entries = index.len(),
        rejected = report.rejected.len(),
        duplicates = report.duplicates,
        filtered = report.filtered,
        fingerprint = %index.fingerprint(),
        "loaded vocabulary"
    );
    Ok(index)
}

fn write_json(path: &Path, bodies: &RenderedBodies) -> Result<()> {
    let json = serde_json::to_string_pretty(bodies)?;
    std::fs::write(path, json)?;
    tracing::info!(path = %path.display(), "wrote rendered bodies");
    Ok(())
}

fn run(args: &Args) -> Result<PathBuf> {
    let config = match &args.config {
        Some(path) => FormatConfig::load(path)?,
        None => FormatConfig::default(),
    };
    let template = match &args.template {
        Some(path) => Template::load(path)?,
        None => Template::builtin(),
    };

    let text = std::fs::read_to_string(&args.input)
        .map_err(|e| C2pError::InvalidInput(format!("{}: {}", args.input.display(), e)))?;
    let index = load_index(args, &config)?;

    let segmenter: Box<dyn Segmenter> = match args.segmenter {
        SegmenterKind::Jieba => Box::new(JiebaSegmenter::new()),
        SegmenterKind::Dictionary => Box::new(DictionarySegmenter::from_index(&index)),
    };
    let romanizer = PinyinRomanizer::new().with_phrases(&config.phrases);

    let bodies = TextFormatter::new(&config, segmenter.as_ref(), &romanizer, &index).format(&text);
    if let Some(path) = &args.emit_json {
        write_json(path, &bodies)?;
    }

    let tex = template.fill(&args.title, &config.font, &bodies);
    if args.tex_only {
        return write_tex(&tex, &args.output);
    }

    let request = PdfRequest {
        tex: &tex,
        output: &args.output,
        cleanup: args.cleanup,
    };
    generate_pdf(&request, &XelatexCompiler::default())
}

fn main() -> std::result::Result<(), C2pError> {
    let args = Args::parse();
    init_logging(args.verbose);

    match run(&args) {
        Ok(path) => {
            println!("{}", path.display());
            Ok(())
        }
        Err(e) => {
            tracing::error!(error = %e, "chinese2pdf failed");
            Err(e)
        }
    }
}
