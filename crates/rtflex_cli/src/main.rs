//! rtflex: Dump the token stream of RTF documents.
//!
//! Usage:
//!   rtflex [options] [file...]
//!   rtflex --batch fragments.json
//!
//! With no files (or `-`), the document is read from stdin.

use clap::{ArgAction, Parser as ClapParser, ValueEnum};
use log::{debug, info};
use miette::{LabeledSpan, NamedSource, Severity, SourceCode};
use rtflex_core::LineMap;
use rtflex_diagnostics::{Diagnostic, DiagnosticCategory};
use rtflex_options::{CliOptions, LogLevel, OutputFormat};
use rtflex_scanner::{ScanError, ScanOutput, Scanner};
use serde_json::{json, Value};
use std::fmt;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process;

#[derive(ClapParser, Debug)]
#[command(name = "rtflex", about = "rtflex - Tokenize Rich Text Format documents", version)]
struct Cli {
    /// RTF files to scan. Reads stdin when empty or `-`.
    #[arg(value_name = "FILE")]
    files: Vec<PathBuf>,

    /// Path to rtflex.json.
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// Output format for the token stream.
    #[arg(short = 'f', long, value_enum)]
    format: Option<FormatArg>,

    /// Pretty-print JSON output.
    #[arg(long)]
    pretty: bool,

    /// Show the line:column position of each token.
    #[arg(long)]
    spans: bool,

    /// Do not report scanner diagnostics.
    #[arg(long = "no-diagnostics")]
    no_diagnostics: bool,

    /// Scan every entry of a JSON array of fragments.
    #[arg(long, value_name = "JSON", conflicts_with = "files")]
    batch: Option<PathBuf>,

    /// Increase log verbosity (repeatable).
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    verbose: u8,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
enum FormatArg {
    Text,
    Json,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Text => OutputFormat::Text,
            FormatArg::Json => OutputFormat::Json,
        }
    }
}

impl Cli {
    /// Options given explicitly on the command line.
    fn overrides(&self) -> CliOptions {
        CliOptions {
            format: self.format.map(OutputFormat::from),
            pretty: self.pretty.then_some(true),
            spans: self.spans.then_some(true),
            diagnostics: self.no_diagnostics.then_some(false),
            log_level: None,
        }
    }
}

const EXIT_OK: i32 = 0;
const EXIT_FAILURE: i32 = 1;
const EXIT_INVALID_INPUT: i32 = 2;

fn main() {
    let cli = Cli::parse();

    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let file_options = match rtflex_options::load_config(cli.config.as_deref(), &cwd) {
        Ok(options) => options,
        Err(e) => {
            print_error(&e.to_string());
            process::exit(EXIT_FAILURE);
        }
    };
    let options = file_options.merge(cli.overrides());
    init_logging(options.log_level().raised(cli.verbose));
    debug!("effective options: {:?}", options);

    let exit_code = match cli.batch {
        Some(ref batch) => run_batch(batch, &options),
        None => run_scan(&cli.files, &options),
    };
    process::exit(exit_code);
}

fn init_logging(level: LogLevel) {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level.as_filter()))
        .format_timestamp(None)
        .init();
}

// ============================================================================
// File mode
// ============================================================================

fn run_scan(files: &[PathBuf], options: &CliOptions) -> i32 {
    let stdin_only = [PathBuf::from("-")];
    let files = if files.is_empty() { &stdin_only[..] } else { files };
    let show_headers = files.len() > 1;
    let mut exit_code = EXIT_OK;

    for path in files {
        let name = display_name(path);
        let bytes = match read_input(path) {
            Ok(bytes) => bytes,
            Err(e) => {
                print_error(&format!("Failed to read {}: {}", name, e));
                exit_code = exit_code.max(EXIT_FAILURE);
                continue;
            }
        };
        info!("scanning {} ({} bytes)", name, bytes.len());

        let scanner = match Scanner::from_bytes(&bytes) {
            Ok(scanner) => scanner,
            Err(e) => {
                report_scan_error(&name, &e, options);
                exit_code = exit_code.max(EXIT_INVALID_INPUT);
                continue;
            }
        };
        let source = scanner.source();
        emit(&name, source, scanner.scan(), options, show_headers);
    }

    exit_code
}

fn read_input(path: &Path) -> io::Result<Vec<u8>> {
    if path == Path::new("-") {
        let mut buf = Vec::new();
        io::stdin().lock().read_to_end(&mut buf)?;
        Ok(buf)
    } else {
        std::fs::read(path)
    }
}

fn display_name(path: &Path) -> String {
    if path == Path::new("-") {
        "<stdin>".to_string()
    } else {
        path.display().to_string()
    }
}

// ============================================================================
// Batch mode
// ============================================================================

fn run_batch(path: &Path, options: &CliOptions) -> i32 {
    let name = display_name(path);
    let fragments = match read_input(path)
        .map_err(|e| e.to_string())
        .and_then(|bytes| serde_json::from_slice::<Value>(&bytes).map_err(|e| e.to_string()))
    {
        Ok(Value::Array(fragments)) => fragments,
        Ok(_) => {
            print_error(&format!("{}: expected a JSON array of fragments", name));
            return EXIT_FAILURE;
        }
        Err(e) => {
            print_error(&format!("Failed to read {}: {}", name, e));
            return EXIT_FAILURE;
        }
    };

    let mut exit_code = EXIT_OK;
    for (index, fragment) in fragments.iter().enumerate() {
        let entry_name = format!("{}[{}]", name, index);
        match Scanner::from_value(fragment) {
            Ok(scanner) => {
                let source = scanner.source();
                emit(&entry_name, source, scanner.scan(), options, true);
            }
            Err(e) => {
                report_scan_error(&entry_name, &e, options);
                exit_code = EXIT_INVALID_INPUT;
            }
        }
    }
    exit_code
}

// ============================================================================
// Output
// ============================================================================

fn emit(name: &str, source: &str, output: ScanOutput, options: &CliOptions, show_header: bool) {
    match options.format() {
        OutputFormat::Text => {
            if show_header {
                println!("==> {} <==", name);
            }
            print_tokens(source, &output, options.spans());
            if options.diagnostics() {
                for diag in output.diagnostics.iter() {
                    print_diagnostic(name, source, diag);
                }
            }
        }
        OutputFormat::Json => {
            let value = json_entry(name, source, &output, options);
            print_json(&value, options.pretty());
        }
    }
}

fn print_tokens(source: &str, output: &ScanOutput, spans: bool) {
    if spans {
        let line_map = LineMap::new(source);
        for info in &output.tokens {
            println!("{}\t{}", line_map.line_and_column_of(info.span.start), info.token);
        }
    } else {
        for token in output.iter() {
            println!("{}", token);
        }
    }
}

fn json_entry(name: &str, source: &str, output: &ScanOutput, options: &CliOptions) -> Value {
    let line_map = options.spans().then(|| LineMap::new(source));
    let tokens: Vec<Value> = output
        .tokens
        .iter()
        .map(|info| {
            let token = serde_json::to_value(&info.token).unwrap_or(Value::Null);
            match line_map {
                Some(ref line_map) => {
                    let position = line_map.line_and_column_of(info.span.start);
                    json!({
                        "token": token,
                        "span": [info.span.start, info.span.end()],
                        "line": position.line + 1,
                        "column": position.column + 1,
                    })
                }
                None => token,
            }
        })
        .collect();

    let mut entry = json!({ "file": name, "tokens": tokens });
    if options.diagnostics() {
        entry["diagnostics"] =
            serde_json::to_value(output.diagnostics.diagnostics()).unwrap_or(Value::Null);
    }
    entry
}

fn print_json(value: &Value, pretty: bool) {
    let rendered = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    match rendered {
        Ok(text) => println!("{}", text),
        Err(e) => print_error(&format!("Failed to serialize output: {}", e)),
    }
}

fn report_scan_error(name: &str, error: &ScanError, options: &CliOptions) {
    match options.format() {
        OutputFormat::Text => print_error(&format!("{}: {}", name, error)),
        OutputFormat::Json => {
            let diag = error.to_diagnostic().in_file(name);
            print_json(&json!({ "file": name, "error": diag }), options.pretty());
        }
    }
}

// ============================================================================
// Diagnostic rendering
// ============================================================================

/// A scanner diagnostic paired with the source it points into, for miette.
#[derive(Debug)]
struct SourceDiagnostic {
    diagnostic: Diagnostic,
    source: NamedSource<String>,
}

impl fmt::Display for SourceDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.diagnostic.message_text)
    }
}

impl std::error::Error for SourceDiagnostic {}

impl miette::Diagnostic for SourceDiagnostic {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(format!("RTF{}", self.diagnostic.code)))
    }

    fn severity(&self) -> Option<Severity> {
        Some(match self.diagnostic.category {
            DiagnosticCategory::Error => Severity::Error,
            DiagnosticCategory::Warning => Severity::Warning,
            DiagnosticCategory::Suggestion | DiagnosticCategory::Message => Severity::Advice,
        })
    }

    fn source_code(&self) -> Option<&dyn SourceCode> {
        Some(&self.source)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let span = self.diagnostic.span?;
        Some(Box::new(std::iter::once(LabeledSpan::at(
            span.to_range(),
            "here",
        ))))
    }
}

fn print_diagnostic(name: &str, source: &str, diag: &Diagnostic) {
    let report = miette::Report::new(SourceDiagnostic {
        diagnostic: diag.clone(),
        source: NamedSource::new(name, source.to_string()),
    });
    eprintln!("{:?}", report);
}

fn print_error(msg: &str) {
    eprintln!("{:?}", miette::miette!("{}", msg));
}
