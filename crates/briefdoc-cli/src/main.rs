//! BriefDoc CLI - Parse, check, and render AI analysis text
//!
//! Usage:
//!   bdcli [OPTIONS] [COMMAND] <FILE|->
//!
//! Commands:
//!   parse     Parse and display document structure (default)
//!   check     Report degraded input conditions
//!   stats     Show document statistics
//!   render    Render to the terminal

mod render;

use std::env;
use std::fs;
use std::io::{self, Read};
use std::process;

use anyhow::{anyhow, bail, Context, Result};
use briefdoc_core::{Block, Document, Inline, ParseResult, Parser};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use render::{Detail, Renderer, Theme};

fn main() {
    let args: Vec<String> = env::args().collect();

    if let Err(e) = run(&args) {
        eprintln!("error: {:#}", e);
        process::exit(1);
    }
}

fn run(args: &[String]) -> Result<()> {
    let config = parse_args(args)?;
    init_tracing(config.verbose);

    let input = read_input(&config.file)?;
    debug!(file = %config.file, bytes = input.len(), "read input");

    let parser = Parser::new();

    match config.command {
        Command::Parse => cmd_parse(&parser, &input, &config),
        Command::Check => cmd_check(&parser, &input, &config),
        Command::Stats => cmd_stats(&parser, &input),
        Command::Render => cmd_render(&parser, &input, &config),
    }
}

/// Log to stderr; `RUST_LOG` wins, otherwise `warn` (or `debug` with `-v`).
fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn read_input(file: &str) -> Result<String> {
    if file == "-" {
        let mut input = String::new();
        io::stdin()
            .read_to_string(&mut input)
            .context("failed to read stdin")?;
        Ok(input)
    } else {
        fs::read_to_string(file).with_context(|| format!("failed to read '{}'", file))
    }
}

#[derive(Debug)]
struct Config {
    command: Command,
    file: String,
    format: OutputFormat,
    verbose: bool,
    detail: Detail,
    theme: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Parse,
    Check,
    Stats,
    Render,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Text,
    Json,
}

fn parse_args(args: &[String]) -> Result<Config> {
    let mut command = Command::Parse;
    let mut format = OutputFormat::Text;
    let mut verbose = false;
    let mut detail = Detail::default();
    let mut theme = None;
    let mut file = None;

    let mut i = 1;
    while i < args.len() {
        let arg = &args[i];
        match arg.as_str() {
            "-h" | "--help" => {
                print_help();
                process::exit(0);
            }
            "-V" | "--version" => {
                println!("bdcli {}", env!("CARGO_PKG_VERSION"));
                process::exit(0);
            }
            "-v" | "--verbose" => verbose = true,
            "-j" | "--json" => format = OutputFormat::Json,
            "-d" | "--detail" => {
                i += 1;
                let value = args
                    .get(i)
                    .ok_or_else(|| anyhow!("{} requires a value", arg))?;
                detail = value.parse().map_err(|e: String| anyhow!(e))?;
            }
            "-t" | "--theme" => {
                i += 1;
                let value = args
                    .get(i)
                    .ok_or_else(|| anyhow!("{} requires a value", arg))?;
                theme = Some(value.clone());
            }
            "parse" => command = Command::Parse,
            "check" => command = Command::Check,
            "stats" => command = Command::Stats,
            "render" => command = Command::Render,
            // stdin
            "-" => {
                if file.is_some() {
                    bail!("multiple files specified");
                }
                file = Some(arg.clone());
            }
            _ if arg.starts_with('-') => {
                bail!("unknown option: {}", arg);
            }
            _ => {
                if file.is_some() {
                    bail!("multiple files specified");
                }
                file = Some(arg.clone());
            }
        }
        i += 1;
    }

    let file = file.ok_or_else(|| anyhow!("no input file specified (use '-' for stdin)"))?;

    Ok(Config {
        command,
        file,
        format,
        verbose,
        detail,
        theme,
    })
}

fn print_help() {
    eprintln!(
        r#"bdcli - BriefDoc analysis text parser and renderer

USAGE:
    bdcli [OPTIONS] [COMMAND] <FILE|->

COMMANDS:
    parse       Parse and display document structure (default)
    check       Report degraded input (exit 1 if any)
    stats       Show document statistics
    render      Render styled text to the terminal

OPTIONS:
    -v, --verbose         Show detailed tree and debug logs
    -j, --json            Output in JSON format
    -d, --detail LEVEL    Render detail: rich, simple, compact [default: rich]
    -t, --theme FILE      JSON theme file for render
    -h, --help            Print help information
    -V, --version         Print version information

EXAMPLES:
    bdcli report.txt                  Parse a file
    bdcli -v report.txt               Parse with verbose output
    bdcli -j report.txt               Output the tree as JSON
    cat report.txt | bdcli check -    Check text from stdin
    bdcli render -d compact report.txt
"#
    );
}

// =============================================================================
// Parse Command
// =============================================================================

fn cmd_parse(parser: &Parser, input: &str, config: &Config) -> Result<()> {
    let result = parser.parse_with_diagnostics(input);

    for diagnostic in &result.diagnostics {
        eprintln!("warning: {}", diagnostic);
    }

    match config.format {
        OutputFormat::Json => print_json(&result.document)?,
        OutputFormat::Text => {
            if config.verbose {
                print_document_verbose(&result.document);
            } else {
                print_document_summary(&result.document);
            }
        }
    }

    Ok(())
}

// =============================================================================
// Check Command
// =============================================================================

fn cmd_check(parser: &Parser, input: &str, config: &Config) -> Result<()> {
    let result = parser.parse_with_diagnostics(input);

    if matches!(config.format, OutputFormat::Json) {
        println!("{}", check_json(&result));
    } else if result.is_clean() {
        println!("Clean: no degraded input found");
    } else {
        eprintln!("{} diagnostic(s):", result.diagnostics.len());
        for diagnostic in &result.diagnostics {
            eprintln!("  - [{}] {}", diagnostic.kind.as_str(), diagnostic);
        }
    }

    if result.is_clean() {
        Ok(())
    } else {
        bail!("{} diagnostic(s) found", result.diagnostics.len())
    }
}

fn check_json(result: &ParseResult) -> serde_json::Value {
    let diagnostics: Vec<_> = result
        .diagnostics
        .iter()
        .map(|d| {
            serde_json::json!({
                "kind": d.kind.as_str(),
                "line": d.line,
                "message": d.message,
            })
        })
        .collect();
    serde_json::json!({ "clean": result.is_clean(), "diagnostics": diagnostics })
}

// =============================================================================
// Stats Command
// =============================================================================

fn cmd_stats(parser: &Parser, input: &str) -> Result<()> {
    let result = parser.parse_with_diagnostics(input);
    let stats = DocumentStats::from_document(&result.document, input);

    println!("Document Statistics");
    println!("-------------------");
    println!("Content:");
    println!("  Total blocks:   {}", stats.total_blocks);
    println!("  Headings:       {}", stats.headings);
    println!("  Paragraphs:     {}", stats.paragraphs);
    println!("  Lists:          {} ({} items)", stats.lists, stats.list_items);
    println!("  Tables:         {} ({} rows)", stats.tables, stats.table_rows);
    println!("  Code blocks:    {}", stats.code_blocks);
    println!("  Blockquotes:    {}", stats.blockquotes);
    println!("  Rules:          {}", stats.rules);
    println!("  Spacers:        {}", stats.spacers);
    println!();
    println!("Size:");
    println!("  Characters:     {}", stats.chars);
    println!("  Words (est.):   {}", stats.words);
    println!("  Lines:          {}", stats.lines);
    println!();
    println!("Diagnostics:    {}", result.diagnostics.len());

    Ok(())
}

#[derive(Debug, Default, PartialEq, Eq)]
struct DocumentStats {
    total_blocks: usize,
    headings: usize,
    paragraphs: usize,
    lists: usize,
    list_items: usize,
    tables: usize,
    table_rows: usize,
    code_blocks: usize,
    blockquotes: usize,
    rules: usize,
    spacers: usize,
    chars: usize,
    words: usize,
    lines: usize,
}

impl DocumentStats {
    fn from_document(doc: &Document, input: &str) -> Self {
        let mut stats = Self {
            chars: input.chars().count(),
            words: input.split_whitespace().count(),
            lines: input.lines().count(),
            ..Self::default()
        };

        for block in doc {
            stats.total_blocks += 1;
            match block {
                Block::Heading { .. } => stats.headings += 1,
                Block::Paragraph { .. } => stats.paragraphs += 1,
                Block::List { items, .. } => {
                    stats.lists += 1;
                    stats.list_items += items.len();
                }
                Block::Table { rows, .. } => {
                    stats.tables += 1;
                    stats.table_rows += rows.len();
                }
                Block::CodeBlock { .. } => stats.code_blocks += 1,
                Block::Blockquote { .. } => stats.blockquotes += 1,
                Block::HorizontalRule => stats.rules += 1,
                Block::Spacer => stats.spacers += 1,
            }
        }
        stats
    }
}

// =============================================================================
// Render Command
// =============================================================================

fn cmd_render(parser: &Parser, input: &str, config: &Config) -> Result<()> {
    let theme = match &config.theme {
        Some(path) => load_theme(path)?,
        None if render::supports_color() => Theme::default(),
        None => Theme::plain(),
    };

    let doc = parser.parse(input);
    print!("{}", Renderer::new(&theme, config.detail).render(&doc));
    Ok(())
}

fn load_theme(path: &str) -> Result<Theme> {
    let json =
        fs::read_to_string(path).with_context(|| format!("failed to read theme '{}'", path))?;
    Theme::from_json(&json).with_context(|| format!("invalid theme '{}'", path))
}

// =============================================================================
// JSON Output
// =============================================================================

fn print_json(doc: &Document) -> Result<()> {
    let json = serde_json::to_string_pretty(doc).context("failed to serialize document")?;
    println!("{}", json);
    Ok(())
}

// =============================================================================
// Text Output
// =============================================================================

fn print_document_summary(doc: &Document) {
    println!("Blocks: {}", doc.len());
    for (i, block) in doc.iter().enumerate() {
        println!("  [{}] {}", i + 1, describe_block(block));
    }
}

fn print_document_verbose(doc: &Document) {
    println!("=== BriefDoc Tree ===");
    println!();
    println!("--- Blocks ---");
    for (i, block) in doc.iter().enumerate() {
        println!();
        println!("[{}] {}", i + 1, describe_block(block));
        print_block_verbose(block, 1);
    }
}

fn describe_block(block: &Block) -> String {
    match block {
        Block::Heading { level, .. } => format!("Heading (level {})", level),
        Block::Paragraph { .. } => "Paragraph".to_string(),
        Block::List { kind, items } => format!("List ({:?}, {} items)", kind, items.len()),
        Block::Table { headers, rows } => {
            format!("Table ({} columns, {} rows)", headers.len(), rows.len())
        }
        Block::CodeBlock { language, lines } => format!(
            "CodeBlock (lang: {}, {} lines)",
            language.as_deref().unwrap_or("none"),
            lines.len()
        ),
        Block::Blockquote { .. } => "Blockquote".to_string(),
        Block::HorizontalRule => "HorizontalRule".to_string(),
        Block::Spacer => "Spacer".to_string(),
    }
}

fn print_block_verbose(block: &Block, indent: usize) {
    let prefix = "  ".repeat(indent);

    match block {
        Block::Heading { content, .. }
        | Block::Paragraph { content }
        | Block::Blockquote { content } => {
            println!("{}Content: {}", prefix, format_inlines(content));
        }
        Block::List { items, .. } => {
            for (i, item) in items.iter().enumerate() {
                println!(
                    "{}Item {} (depth {}): {}",
                    prefix,
                    i + 1,
                    item.depth,
                    format_inlines(&item.content)
                );
            }
        }
        Block::Table { headers, rows } => {
            let cells: Vec<String> = headers.iter().map(|c| format_inlines(c)).collect();
            println!("{}Header: {}", prefix, cells.join(" | "));
            for (i, row) in rows.iter().enumerate() {
                let cells: Vec<String> = row.iter().map(|c| format_inlines(c)).collect();
                println!("{}Row {}: {}", prefix, i + 1, cells.join(" | "));
            }
        }
        Block::CodeBlock { lines, .. } => {
            let joined = lines.join("\n");
            let preview: String = joined.chars().take(60).collect();
            let ellipsis = if joined.chars().count() > 60 { "..." } else { "" };
            println!(
                "{}Content: {}{}",
                prefix,
                preview.replace('\n', "\\n"),
                ellipsis
            );
        }
        Block::HorizontalRule | Block::Spacer => {}
    }
}

fn format_inlines(inlines: &[Inline]) -> String {
    let mut result = String::new();
    for inline in inlines {
        match inline {
            Inline::Text(t) => result.push_str(t),
            Inline::Italic(inner) => {
                result.push('*');
                result.push_str(&format_inlines(inner));
                result.push('*');
            }
            Inline::Bold(inner) => {
                result.push_str("**");
                result.push_str(&format_inlines(inner));
                result.push_str("**");
            }
            Inline::Code(c) => {
                result.push('`');
                result.push_str(c);
                result.push('`');
            }
            Inline::Link { label, url } => {
                result.push('[');
                result.push_str(label);
                result.push_str("](");
                result.push_str(url);
                result.push(')');
            }
        }
    }
    result
}
