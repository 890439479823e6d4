//! Quarry CLI
//!
//! Compiles a CSS selector and runs it over a JSON document.

mod report;

use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use owo_colors::OwoColorize;
use quarry_common::warning::{clear_warnings, warn_once};
use quarry_dom::DomTree;
use quarry_selectors::{CaseSensitivity, MatchOptions, Selector, SelectorError, compile_with, parse, tokenize};

/// Quarry: run CSS3 selectors over JSON documents
#[derive(Parser, Debug)]
#[command(name = "quarry")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    # Print every matching element with its ancestor path
    quarry 'ul > li:nth-child(odd)' page.json

    # Read the document from stdin
    cat page.json | quarry '.note' -

    # Inline document, count only
    quarry --count 'p' --json '{"type":"element","tagName":"p"}'

    # Inspect how a selector is tokenized and parsed
    quarry --tokens --ast 'div.item:first-child'
"#)]
struct Cli {
    /// Selector to compile
    #[arg(value_name = "SELECTOR")]
    selector: String,

    /// JSON document to search (`-` for stdin)
    #[arg(value_name = "FILE")]
    path: Option<PathBuf>,

    /// Parse a JSON document string directly instead of a file
    #[arg(long, value_name = "DOC", conflicts_with = "path")]
    json: Option<String>,

    /// Match element names case-sensitively (XML documents)
    #[arg(long)]
    xml: bool,

    /// Compare attribute values ASCII case-insensitively
    #[arg(long)]
    ignore_value_case: bool,

    /// Print only the number of matches
    #[arg(long)]
    count: bool,

    /// Print the selector's tokens
    #[arg(long)]
    tokens: bool,

    /// Print the parsed selector
    #[arg(long)]
    ast: bool,
}

impl Cli {
    fn match_options(&self) -> MatchOptions {
        let options = if self.xml { MatchOptions::xml() } else { MatchOptions::html() };
        if self.ignore_value_case {
            options.with_attribute_values(CaseSensitivity::AsciiCaseInsensitive)
        } else {
            options
        }
    }

    const fn has_document(&self) -> bool {
        self.path.is_some() || self.json.is_some()
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.tokens {
        let tokens = tokenize(&cli.selector).unwrap_or_else(|error| fail(&cli.selector, &error));
        println!("{}", "=== Tokens ===".bold());
        for token in tokens {
            println!("{:>4}  {}", token.offset, token.kind);
        }
    }

    if cli.ast {
        let list = parse(&cli.selector).unwrap_or_else(|error| fail(&cli.selector, &error));
        println!("{}", "=== Selector ===".bold());
        println!("{list:#?}");
    }

    let selector: Selector<DomTree> =
        compile_with(&cli.selector, &cli.match_options()).unwrap_or_else(|error| fail(&cli.selector, &error));

    if !cli.has_document() {
        if cli.tokens || cli.ast {
            return Ok(());
        }
        anyhow::bail!("no document given: pass FILE, `-` for stdin, or --json");
    }

    let tree = load_tree(&cli)?;
    let matches = selector.select(&tree, &tree.root());

    if matches.is_empty() {
        warn_once("CLI", &format!("selector '{}' matched nothing", cli.selector));
    }

    if cli.count {
        println!("{}", matches.len());
        return Ok(());
    }

    for element in matches {
        let path = report::ancestor_path(&tree, element);
        let label = report::describe_element(&tree, element);
        if path.is_empty() {
            println!("{}", label.green().bold());
        } else {
            println!("{} {} {}", path.dimmed(), ">".dimmed(), label.green().bold());
        }
    }

    Ok(())
}

/// Load the document named on the command line.
fn load_tree(cli: &Cli) -> anyhow::Result<DomTree> {
    clear_warnings();
    if let Some(ref json) = cli.json {
        return DomTree::from_json_str(json).context("failed to parse --json document");
    }
    match cli.path {
        Some(ref path) if path.as_os_str() == "-" => {
            DomTree::from_json_reader(io::stdin().lock()).context("failed to read document from stdin")
        }
        Some(ref path) => {
            let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
            DomTree::from_json_reader(BufReader::new(file))
                .with_context(|| format!("failed to load document from {}", path.display()))
        }
        None => anyhow::bail!("no document given: pass FILE, `-` for stdin, or --json"),
    }
}

/// Print a caret diagnostic for `error` and exit with status 1.
fn fail(source: &str, error: &SelectorError) -> ! {
    let (line, caret) = report::caret_lines(source, error.offset());
    eprintln!("{}", report::error_header(error).red().bold());
    eprintln!("  {line}");
    eprintln!("  {}", caret.red());
    std::process::exit(1);
}
