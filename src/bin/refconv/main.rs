use anyhow::{anyhow, Context, Result};
use clap::Parser;
use refconv::charsets;
use refconv::formats;
use refconv::param::{CharsetSource, InputFormat, OutputFormat, XmlOut};
use refconv::Batch;
use std::io::{BufReader, Write};
use std::path::PathBuf;

/// Convert bibliographic references between formats.
#[derive(Parser)]
#[command(name = "refconv", version, about)]
struct Cli {
    /// Input format: bibtex, ris, end, nbib, isi, copac
    #[arg(short = 'f', long = "from", value_name = "FORMAT")]
    from: String,

    /// Output format: bibtex, ris, end, mods, ads
    #[arg(short = 't', long = "to", value_name = "FORMAT")]
    to: String,

    /// Input files; stdin when none are given
    files: Vec<PathBuf>,

    /// Per-stage debugging dumps (verbose=2)
    #[arg(short = 'd', long)]
    debug: bool,

    /// Report unrecognized tags and defaulted types (verbose=1)
    #[arg(long)]
    verbose: bool,

    /// Input character set
    #[arg(short = 'i', long = "input-encoding", value_name = "CHARSET")]
    charset_in: Option<String>,

    /// Output character set
    #[arg(short = 'o', long = "output-encoding", value_name = "CHARSET")]
    charset_out: Option<String>,

    /// Force Unicode (UTF-8) in and out
    #[arg(long = "un")]
    unicode: bool,

    /// Skip writing the byte-order mark on UTF-8 output
    #[arg(long = "nb")]
    no_bom: bool,

    /// Do not split titles on colons
    #[arg(long = "nt")]
    no_split_title: bool,

    /// Do not convert LaTeX escapes
    #[arg(long = "nl")]
    no_latex: bool,

    /// Do not write XML entities
    #[arg(long = "nx")]
    no_xml: bool,

    /// File of names to pass through verbatim
    #[arg(long = "as", value_name = "FILE")]
    asis: Option<PathBuf>,

    /// File of corporate-author names
    #[arg(long = "cs", value_name = "FILE")]
    corps: Option<PathBuf>,

    /// Write each reference to its own file
    #[arg(short = 's', long = "single-refs")]
    single_ref_per_file: bool,

    /// Append _<n> to every citation key
    #[arg(long = "sn")]
    sequence_numbers: bool,

    /// BibTeX: brace-delimited values instead of quotes
    #[arg(short = 'b', long)]
    brackets: bool,

    /// BibTeX: uppercase tag names
    #[arg(short = 'U', long)]
    uppercase: bool,

    /// BibTeX: single-dash page ranges
    #[arg(long = "sd")]
    single_dash: bool,

    /// BibTeX: trailing comma after the last field
    #[arg(long = "fc")]
    final_comma: bool,

    /// BibTeX: restrict citation keys to alphanumerics
    #[arg(long = "sk")]
    strict_key: bool,

    /// Drop citation keys on output
    #[arg(long = "nk")]
    no_key: bool,

    /// BibTeX: padded field layout
    #[arg(short = 'w', long)]
    whitespace: bool,
}

fn init_logging(debug: bool, verbose: bool) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let default = if debug {
        "debug"
    } else if verbose {
        "info"
    } else {
        "warn"
    };
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).without_time())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)))
        .init();
}

fn lookup_charset(name: &str) -> Result<charsets::Charset> {
    charsets::find(name).ok_or_else(|| {
        anyhow!(
            "unknown character set '{}' (supported: {})",
            name,
            charsets::list_names().join(", ")
        )
    })
}

fn run(cli: Cli) -> Result<()> {
    let from = InputFormat::from_name(&cli.from)?;
    let to = OutputFormat::from_name(&cli.to)?;

    let mut read_p = formats::init_input_params(from, "refconv");
    let mut write_p = formats::init_output_params(to, "refconv");

    let verbose = if cli.debug {
        2
    } else if cli.verbose {
        1
    } else {
        0
    };
    read_p.verbose = verbose;
    write_p.verbose = verbose;

    if let Some(name) = &cli.charset_in {
        read_p.set_charset_in(lookup_charset(name)?, CharsetSource::User);
    }
    if let Some(name) = &cli.charset_out {
        write_p.set_charset_out(lookup_charset(name)?, CharsetSource::User);
    }
    if cli.unicode {
        read_p.set_charset_in(charsets::Charset::Unicode, CharsetSource::User);
        write_p.set_charset_out(charsets::Charset::Unicode, CharsetSource::User);
    }
    if cli.no_bom {
        write_p.utf8_bom = false;
    }
    if cli.no_split_title {
        read_p.nosplittitle = true;
        write_p.nosplittitle = true;
    }
    if cli.no_latex {
        read_p.latex_in = false;
        write_p.latex_out = false;
    }
    if cli.no_xml {
        write_p.xml_out = XmlOut::Off;
    }
    if let Some(path) = &cli.asis {
        read_p.read_asis_file(path)?;
    }
    if let Some(path) = &cli.corps {
        read_p.read_corps_file(path)?;
    }
    read_p.add_count = cli.sequence_numbers;

    write_p.single_ref_per_file = cli.single_ref_per_file;
    write_p.drop_key = cli.no_key;
    write_p.bibtex_style.brackets = cli.brackets;
    write_p.bibtex_style.uppercase_tags = cli.uppercase;
    write_p.bibtex_style.single_dash = cli.single_dash;
    write_p.bibtex_style.final_comma = cli.final_comma;
    write_p.bibtex_style.strict_key = cli.strict_key;
    write_p.bibtex_style.whitespace = cli.whitespace;

    let mut batch = Batch::new();
    if cli.files.is_empty() {
        let stdin = std::io::stdin();
        let mut reader = stdin.lock();
        batch.read(&mut reader, "<stdin>", &read_p)?;
    } else {
        for path in &cli.files {
            let file = std::fs::File::open(path)
                .with_context(|| format!("cannot open {}", path.display()))?;
            let mut reader = BufReader::new(file);
            batch.read(&mut reader, &path.display().to_string(), &read_p)?;
        }
    }

    if cli.single_ref_per_file {
        batch.write_one_per_file(&write_p)?;
    } else {
        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        batch.write(&mut out, &write_p)?;
        out.flush()?;
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.debug, cli.verbose);

    if let Err(err) = run(cli) {
        eprintln!("refconv: {err}");
        std::process::exit(1);
    }
}
