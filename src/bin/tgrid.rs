//! texgrid CLI - render, import and check LaTeX tables

#[cfg(feature = "cli")]
use clap::{Parser, Subcommand, ValueEnum};
#[cfg(feature = "cli")]
use std::fs;
#[cfg(feature = "cli")]
use std::io::{self, Read, Write};
#[cfg(feature = "cli")]
use std::path::Path;
#[cfg(feature = "cli")]
use texgrid::{
    diagnostics::{check_table, format_diagnostics},
    document::{DocumentFormat, TableDocument},
    import::{import_delimited, Delimiter, ImportOptions},
    packages::usepackage_lines,
    ColumnSpecs, Dialect, GlobalOptions, TableError, TableSession,
};
#[cfg(feature = "cli")]
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "tgrid")]
#[command(version)]
#[command(about = "texgrid - LaTeX table generator for tabularray, tabular and booktabs", long_about = None)]
struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    command: Commands,

    /// More log output on stderr (-v debug, -vv trace); RUST_LOG takes precedence
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[cfg(feature = "cli")]
#[derive(Subcommand)]
enum Commands {
    /// Render a table document (TOML, JSON or YAML) to LaTeX
    Render {
        /// Table document (reads from stdin if not provided)
        input: Option<String>,

        /// Output file path (writes to stdout if not provided)
        #[arg(short, long)]
        output: Option<String>,

        /// Override the document's dialect
        #[arg(short, long, value_enum)]
        dialect: Option<DialectArg>,

        /// Document format when reading from stdin
        #[arg(long, value_enum, default_value_t = FormatArg::Toml)]
        format: FormatArg,

        /// Prepend the required \usepackage lines as comments
        #[arg(long)]
        with_packages: bool,
    },

    /// Import CSV/TSV data as a LaTeX table or a table document
    Import {
        /// Delimited text file (reads from stdin if not provided)
        input: Option<String>,

        /// Output file path (writes to stdout if not provided)
        #[arg(short, long)]
        output: Option<String>,

        /// Output dialect
        #[arg(short, long, value_enum, default_value_t = DialectArg::Modern)]
        dialect: DialectArg,

        /// Field delimiter (comma, tab, semicolon, pipe); detected if omitted
        #[arg(long)]
        delimiter: Option<String>,

        /// Keep LaTeX special characters as they are
        #[arg(long)]
        raw: bool,

        /// Bold the first row
        #[arg(long)]
        header: bool,

        /// Emit a table document in this format instead of LaTeX
        #[arg(long, value_enum)]
        document: Option<FormatArg>,
    },

    /// Check a table document for problems in the chosen dialect
    Check {
        /// Table document (reads from stdin if not provided)
        input: Option<String>,

        /// Override the document's dialect
        #[arg(short, long, value_enum)]
        dialect: Option<DialectArg>,

        /// Document format when reading from stdin
        #[arg(long, value_enum, default_value_t = FormatArg::Toml)]
        format: FormatArg,

        /// Disable colored output
        #[arg(long)]
        no_color: bool,
    },

    /// List the \usepackage lines a table document needs
    Packages {
        /// Table document (reads from stdin if not provided)
        input: Option<String>,

        /// Override the document's dialect
        #[arg(short, long, value_enum)]
        dialect: Option<DialectArg>,

        /// Document format when reading from stdin
        #[arg(long, value_enum, default_value_t = FormatArg::Toml)]
        format: FormatArg,
    },

    /// Show version and feature info
    Info,
}

#[cfg(feature = "cli")]
#[derive(Clone, Copy, ValueEnum)]
enum DialectArg {
    /// tabularray (tblr / longtblr)
    Modern,
    /// tabular with \hline rules
    Plain,
    /// booktabs rules
    Rules,
}

#[cfg(feature = "cli")]
impl From<DialectArg> for Dialect {
    fn from(arg: DialectArg) -> Self {
        match arg {
            DialectArg::Modern => Dialect::Modern,
            DialectArg::Plain => Dialect::Plain,
            DialectArg::Rules => Dialect::Rules,
        }
    }
}

#[cfg(feature = "cli")]
#[derive(Clone, Copy, ValueEnum)]
enum FormatArg {
    Toml,
    Json,
    Yaml,
}

#[cfg(feature = "cli")]
impl From<FormatArg> for DocumentFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Toml => DocumentFormat::Toml,
            FormatArg::Json => DocumentFormat::Json,
            FormatArg::Yaml => DocumentFormat::Yaml,
        }
    }
}

/// Console logging on stderr, filtered by RUST_LOG or the verbosity flag
#[cfg(feature = "cli")]
fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let console_layer = fmt::layer()
        .with_writer(io::stderr)
        .with_target(true)
        .with_filter(filter);

    tracing_subscriber::registry().with(console_layer).init();
}

#[cfg(feature = "cli")]
fn main() -> io::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    handle_subcommand(cli.command)
}

#[cfg(feature = "cli")]
fn handle_subcommand(cmd: Commands) -> io::Result<()> {
    match cmd {
        Commands::Render {
            input,
            output,
            dialect,
            format,
            with_packages,
        } => {
            let mut session = load_session(input.as_deref(), format)?;
            if let Some(dialect) = dialect {
                session.set_dialect(dialect.into());
            }

            let mut result = String::new();
            if with_packages {
                let lines = usepackage_lines(session.grid(), session.dialect(), session.options());
                for line in lines.lines() {
                    result.push_str(&format!("% {}\n", line));
                }
            }
            result.push_str(&session.serialize());

            write_output(output.as_deref(), &result)?;
        }

        Commands::Import {
            input,
            output,
            dialect,
            delimiter,
            raw,
            header,
            document,
        } => {
            let content = read_input(input.as_deref())?;

            let delimiter = match delimiter {
                Some(name) => Some(Delimiter::from_name(&name).ok_or_else(|| {
                    io::Error::new(
                        io::ErrorKind::InvalidInput,
                        format!("unknown delimiter '{}'", name),
                    )
                })?),
                None => None,
            };
            let options = ImportOptions {
                delimiter,
                escape: !raw,
                bold_header: header,
            };

            let grid = import_delimited(&content, &options).map_err(table_error)?;
            let columns = ColumnSpecs::new(grid.cols());
            let mut session = TableSession::from_parts(grid, columns).map_err(table_error)?;
            session.set_dialect(dialect.into());

            let result = match document {
                Some(format) => TableDocument::from_session(&session)
                    .to_text(format.into())
                    .map_err(table_error)?,
                None => session.serialize(),
            };

            write_output(output.as_deref(), &result)?;
        }

        Commands::Check {
            input,
            dialect,
            format,
            no_color,
        } => {
            let session = load_session(input.as_deref(), format)?;
            let dialect = dialect.map_or(session.dialect(), Dialect::from);

            let result = check_table(
                session.grid(),
                session.columns(),
                dialect,
                session.options(),
            );
            println!("{}", format_diagnostics(&result, !no_color));

            if result.has_errors() {
                std::process::exit(1);
            }
        }

        Commands::Packages {
            input,
            dialect,
            format,
        } => {
            let session = load_session(input.as_deref(), format)?;
            let dialect = dialect.map_or(session.dialect(), Dialect::from);

            let lines = usepackage_lines(session.grid(), dialect, session.options());
            if !lines.is_empty() {
                println!("{}", lines);
            }
        }

        Commands::Info => {
            println!("texgrid - LaTeX table generator");
            println!("Version: {}", env!("CARGO_PKG_VERSION"));
            println!();
            println!("Dialects:");
            println!("  modern  tabularray (tblr, longtblr)");
            println!("  plain   tabular / longtable with \\hline rules");
            println!("  rules   booktabs (\\toprule, \\midrule, \\bottomrule)");
            println!();
            println!("Document formats: toml, json, yaml");
            println!("Import formats: csv, tsv, semicolon and pipe separated text");
            println!();
            let defaults = GlobalOptions::default();
            println!(
                "Defaults: horizontal rules {}, vertical rules {}, centering {}",
                on_off(defaults.horizontal_rules),
                on_off(defaults.vertical_rules),
                on_off(defaults.centering)
            );
        }
    }

    Ok(())
}

#[cfg(feature = "cli")]
fn on_off(flag: bool) -> &'static str {
    if flag {
        "on"
    } else {
        "off"
    }
}

#[cfg(feature = "cli")]
fn table_error(e: TableError) -> io::Error {
    match e {
        TableError::IoError { message } => io::Error::new(io::ErrorKind::Other, message),
        other => io::Error::new(io::ErrorKind::InvalidData, other.to_string()),
    }
}

#[cfg(feature = "cli")]
fn read_input(path: Option<&str>) -> io::Result<String> {
    match path {
        Some(path) => fs::read_to_string(path),
        None => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            Ok(buffer)
        }
    }
}

/// Load a document from a file (format from the extension) or stdin
#[cfg(feature = "cli")]
fn load_session(path: Option<&str>, stdin_format: FormatArg) -> io::Result<TableSession> {
    let document = match path {
        Some(path) => TableDocument::load(Path::new(path)),
        None => TableDocument::parse(&read_input(None)?, stdin_format.into()),
    }
    .map_err(table_error)?;
    document.into_session().map_err(table_error)
}

#[cfg(feature = "cli")]
fn write_output(path: Option<&str>, result: &str) -> io::Result<()> {
    match path {
        Some(path) => {
            let mut file = fs::File::create(path)?;
            writeln!(file, "{}", result)?;
            eprintln!("✓ Output written to: {}", path);
        }
        None => {
            println!("{}", result);
        }
    }
    Ok(())
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("CLI feature not enabled. Build with --features cli");
    eprintln!();
    eprintln!("Usage:");
    eprintln!("  cargo install texgrid --features cli");
    eprintln!("  tgrid render table.toml");
}
