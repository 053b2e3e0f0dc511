// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::fmt::Write as _;
use std::fs::File;
use std::io::{self, Read, Write};
use std::process;

use pico_args::Arguments;

const HELP: &str = "\
svgscene resolves an SVG document into a scene graph.

USAGE:
  svgscene [OPTIONS] <in-svg> <out-svg>  # from file to file
  svgscene [OPTIONS] <in-svg> -c         # from file to stdout
  svgscene [OPTIONS] - <out-svg>         # from stdin to file
  svgscene [OPTIONS] - -c                # from stdin to stdout

OPTIONS:
  -h, --help                        Prints help information
  -V, --version                     Prints version information
  -c                                Prints the output to the stdout

  --dpi DPI                         Sets the resolution
                                    [default: 96] [possible values: 10..4000 (inclusive)]
  --font-family FAMILY              Sets the default font family that will be
                                    used when no 'font-family' is present
                                    [default: Times New Roman]
  --font-size SIZE                  Sets the default font size that will be
                                    used when no 'font-size' is present
                                    [default: 12] [possible values: 1..192 (inclusive)]
  --default-width LENGTH            Sets the default width of the SVG viewport
                                    when there are no 'width' and 'viewBox' attributes
                                    [values: 1..4294967295 (inclusive)] [default: 100]
  --default-height LENGTH           Sets the default height of the SVG viewport
                                    when there are no 'height' and 'viewBox' attributes
                                    [values: 1..4294967295 (inclusive)] [default: 100]
  --lenient                         Skips elements with malformed path data,
                                    transform lists and styles instead of failing

  --tree                            Prints the resolved scene graph instead of SVG
  --draw                            Prints the graphics backend calls instead of SVG
  --indent INDENT                   Sets the XML nodes indent
                                    [values: none, 0, 1, 2, 3, 4, tabs] [default: 4]
  --attrs-indent INDENT             Sets the XML attributes indent
                                    [values: none, 0, 1, 2, 3, 4, tabs] [default: none]
  --coordinates-precision NUM       Set the coordinates numeric precision.
                                    Smaller precision can lead to a malformed output in some cases
                                    [values: 2..8 (inclusive)] [default: 8]
  --transforms-precision NUM        Set the transform values numeric precision.
                                    Smaller precision can lead to a malformed output in some cases
                                    [values: 2..8 (inclusive)] [default: 8]
  --quiet                           Disables warnings

ARGS:
  <in-svg>                          Input file
  <out-svg>                         Output file
";

#[derive(Clone, Copy, PartialEq, Debug)]
enum OutputFormat {
    Svg,
    Tree,
    Draw,
}

#[derive(Debug)]
struct Args {
    dpi: u32,
    font_family: Option<String>,
    font_size: u32,
    default_width: u32,
    default_height: u32,
    lenient: bool,

    format: OutputFormat,
    indent: svgscene::Indent,
    attrs_indent: svgscene::Indent,
    coordinates_precision: Option<u8>,
    transforms_precision: Option<u8>,

    quiet: bool,

    input: String,
    output: String,
}

fn collect_args() -> Result<Args, pico_args::Error> {
    let mut input = Arguments::from_env();

    if input.contains(["-h", "--help"]) {
        print!("{}", HELP);
        process::exit(0);
    }

    if input.contains(["-V", "--version"]) {
        println!("{}", env!("CARGO_PKG_VERSION"));
        process::exit(0);
    }

    let format = if input.contains("--tree") {
        OutputFormat::Tree
    } else if input.contains("--draw") {
        OutputFormat::Draw
    } else {
        OutputFormat::Svg
    };

    Ok(Args {
        dpi: input.opt_value_from_fn("--dpi", parse_dpi)?.unwrap_or(96),
        font_family: input.opt_value_from_str("--font-family")?,
        font_size: input
            .opt_value_from_fn("--font-size", parse_font_size)?
            .unwrap_or(12),
        default_width: input
            .opt_value_from_fn("--default-width", parse_length)?
            .unwrap_or(100),
        default_height: input
            .opt_value_from_fn("--default-height", parse_length)?
            .unwrap_or(100),
        lenient: input.contains("--lenient"),

        format,
        indent: input
            .opt_value_from_fn("--indent", parse_indent)?
            .unwrap_or(svgscene::Indent::Spaces(4)),
        attrs_indent: input
            .opt_value_from_fn("--attrs-indent", parse_indent)?
            .unwrap_or(svgscene::Indent::None),
        coordinates_precision: input
            .opt_value_from_fn("--coordinates-precision", parse_precision)?,
        transforms_precision: input.opt_value_from_fn("--transforms-precision", parse_precision)?,

        quiet: input.contains("--quiet"),

        input: input.free_from_str()?,
        output: input.free_from_str()?,
    })
}

fn parse_dpi(s: &str) -> Result<u32, String> {
    let n: u32 = s.parse().map_err(|_| "invalid number")?;

    if (10..=4000).contains(&n) {
        Ok(n)
    } else {
        Err("DPI out of bounds".to_string())
    }
}

fn parse_font_size(s: &str) -> Result<u32, String> {
    let n: u32 = s.parse().map_err(|_| "invalid number")?;

    if n > 0 && n <= 192 {
        Ok(n)
    } else {
        Err("font size out of bounds".to_string())
    }
}

fn parse_indent(s: &str) -> Result<svgscene::Indent, String> {
    let indent = match s {
        "none" => svgscene::Indent::None,
        "0" => svgscene::Indent::Spaces(0),
        "1" => svgscene::Indent::Spaces(1),
        "2" => svgscene::Indent::Spaces(2),
        "3" => svgscene::Indent::Spaces(3),
        "4" => svgscene::Indent::Spaces(4),
        "tabs" => svgscene::Indent::Tabs,
        _ => return Err("invalid INDENT value".to_string()),
    };

    Ok(indent)
}

fn parse_length(s: &str) -> Result<u32, String> {
    let n: u32 = s.parse().map_err(|_| "invalid length")?;

    if n > 0 {
        Ok(n)
    } else {
        Err("LENGTH cannot be zero".to_string())
    }
}

fn parse_precision(s: &str) -> Result<u8, String> {
    let n: u8 = s.parse().map_err(|_| "invalid precision NUM value")?;

    if (2..=8).contains(&n) {
        Ok(n)
    } else {
        Err("precision NUM cannot be smaller than 2 or larger than 8".to_string())
    }
}

#[derive(Clone, PartialEq, Debug)]
enum InputFrom<'a> {
    Stdin,
    File(&'a str),
}

#[derive(Clone, PartialEq, Debug)]
enum OutputTo<'a> {
    Stdout,
    File(&'a str),
}

fn main() {
    let args = match collect_args() {
        Ok(v) => v,
        Err(e) => {
            eprintln!("Error: {}.", e);
            process::exit(1);
        }
    };

    if !args.quiet {
        if let Ok(()) = log::set_logger(&LOGGER) {
            log::set_max_level(log::LevelFilter::Warn);
        }
    }

    if let Err(e) = process(args) {
        eprintln!("Error: {}.", e);
        process::exit(1);
    }
}

fn process(args: Args) -> Result<(), String> {
    let in_svg = match args.input.as_str() {
        "-" => InputFrom::Stdin,
        "-c" => return Err("-c should be set after input".to_string()),
        path => InputFrom::File(path),
    };

    let out_svg = match args.output.as_str() {
        "-c" => OutputTo::Stdout,
        path => OutputTo::File(path),
    };

    let default_size =
        svgscene::Size::from_wh(args.default_width as f64, args.default_height as f64)
            .ok_or("invalid default size")?;

    let opt = svgscene::Options {
        dpi: args.dpi as f64,
        font_family: args
            .font_family
            .as_deref()
            .unwrap_or("Times New Roman")
            .to_string(),
        font_size: args.font_size as f64,
        default_size,
        syntax_errors: if args.lenient {
            svgscene::SyntaxErrorPolicy::SkipElement
        } else {
            svgscene::SyntaxErrorPolicy::Fail
        },
        ..svgscene::Options::default()
    };

    let input_svg = match in_svg {
        InputFrom::Stdin => load_stdin(),
        InputFrom::File(path) => std::fs::read(path).map_err(|e| e.to_string()),
    }?;

    let mut layouter = svgscene::SimpleTextLayouter::new();
    let doc = svgscene::Document::from_data(&input_svg, &opt, &mut layouter)
        .map_err(|e| e.to_string())?;

    let s = match args.format {
        OutputFormat::Svg => {
            let xml_opt = svgscene::WriteOptions {
                coordinates_precision: args.coordinates_precision.unwrap_or(8),
                transforms_precision: args.transforms_precision.unwrap_or(8),
                use_single_quote: false,
                indent: args.indent,
                attributes_indent: args.attrs_indent,
            };

            doc.to_svg_string(&xml_opt)
        }
        OutputFormat::Tree => dump_tree(&doc),
        OutputFormat::Draw => {
            let mut backend = svgscene::RecordingBackend::new();
            svgscene::render(&doc, &mut backend);

            let mut s = String::new();
            for cmd in backend.commands() {
                let _ = writeln!(s, "{}", cmd);
            }
            s
        }
    };

    match out_svg {
        OutputTo::Stdout => {
            io::stdout()
                .write_all(s.as_bytes())
                .map_err(|_| "failed to write to the stdout".to_string())?;
        }
        OutputTo::File(path) => {
            let mut f =
                File::create(path).map_err(|_| "failed to create the output file".to_string())?;
            f.write_all(s.as_bytes())
                .map_err(|_| "failed to write to the output file".to_string())?;
        }
    }

    Ok(())
}

fn dump_tree(doc: &svgscene::Document) -> String {
    fn dump_node(node: &svgscene::GraphicsNode, depth: usize, s: &mut String) {
        let _ = write!(s, "{:indent$}{} {:?}", "", node.tag(), node.kind(), indent = depth * 2);
        if let Some(ts) = node.transform() {
            let _ = write!(
                s,
                " transform=({} {} {} {} {} {})",
                ts.a, ts.b, ts.c, ts.d, ts.e, ts.f
            );
        }
        if let Some(fill) = node.fill() {
            let _ = write!(s, " fill={:?}", fill);
        }
        if let Some(stroke) = node.stroke() {
            let _ = write!(s, " stroke={:?} width={}", stroke, node.stroke_width());
        }
        s.push('\n');

        for child in node.children() {
            dump_node(child, depth + 1, s);
        }
    }

    let mut s = String::new();
    let size = doc.size();
    let _ = writeln!(s, "size {}x{}", size.width(), size.height());
    dump_node(doc.root(), 0, &mut s);

    for diag in doc.diagnostics() {
        let _ = writeln!(s, "warning: {}", diag);
    }

    s
}

fn load_stdin() -> Result<Vec<u8>, String> {
    let mut buf = Vec::new();
    let stdin = io::stdin();
    let mut handle = stdin.lock();

    handle
        .read_to_end(&mut buf)
        .map_err(|_| "failed to read from stdin".to_string())?;

    Ok(buf)
}

/// A simple stderr logger.
static LOGGER: SimpleLogger = SimpleLogger;
struct SimpleLogger;
impl log::Log for SimpleLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= log::LevelFilter::Warn
    }

    fn log(&self, record: &log::Record) {
        if self.enabled(record.metadata()) {
            let target = if !record.target().is_empty() {
                record.target()
            } else {
                record.module_path().unwrap_or_default()
            };

            let line = record.line().unwrap_or(0);
            let args = record.args();

            match record.level() {
                log::Level::Error => eprintln!("Error (in {}:{}): {}", target, line, args),
                log::Level::Warn => eprintln!("Warning (in {}:{}): {}", target, line, args),
                log::Level::Info => eprintln!("Info (in {}:{}): {}", target, line, args),
                log::Level::Debug => eprintln!("Debug (in {}:{}): {}", target, line, args),
                log::Level::Trace => eprintln!("Trace (in {}:{}): {}", target, line, args),
            }
        }
    }

    fn flush(&self) {}
}
