use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::PathBuf;
use std::sync::Arc;
use anyhow::{anyhow, Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use log::{debug, LevelFilter};
use guardmap::{LoadOptions, LogDiagnostics, MappingTable};
use jfr_retrace::{MethodRef, Renderer, RenderOptions};

#[derive(Debug, Parser)]
#[command(version, about = "Renders JVM methods and stack traces, deobfuscated with a ProGuard/R8 mapping file")]
struct Cli {
	/// Be verbose, give it multiple times for even more output.
	#[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
	verbose: u8,

	/// The `mapping.txt` to deobfuscate names with. Without it, names are shown as they are.
	#[arg(short = 'm', long = "mapping")]
	mapping: Option<PathBuf>,

	/// Also deobfuscate package names, by deriving package mappings from the class mappings.
	#[arg(long = "packages")]
	packages: bool,

	#[arg(long = "no-return-type")]
	no_return_type: bool,

	#[arg(long = "no-class")]
	no_class: bool,

	/// Show `(...)` instead of the parameter types.
	#[arg(long = "no-arguments")]
	no_arguments: bool,

	/// Leave out the package of every class name.
	#[arg(short = 's', long = "short")]
	short: bool,

	/// Cut stack traces off after that many frames.
	#[arg(long = "max-frames")]
	max_frames: Option<usize>,

	#[arg(long = "indent")]
	indent: Option<String>,

	/// The text in front of each frame of a stack trace, `at ` if not given.
	#[arg(long = "prefix")]
	prefix: Option<String>,

	#[command(subcommand)]
	command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
	/// Renders a single method
	Method {
		class_name: String,
		method_name: String,
		descriptor: String,
	},
	/// Renders a stack trace, with one frame per line, given as `class method descriptor` or `class.method(descriptor)`
	Trace {
		/// Where to read the frames from, standard input if not given
		input: Option<PathBuf>,
	},
	/// Deobfuscates symbols from a constant pool, like class names, array types or package names
	Constant {
		#[arg(required = true)]
		constants: Vec<String>,
	},
	/// Renders package names
	Package {
		#[arg(required = true)]
		packages: Vec<String>,
	},
}

impl Cli {
	fn render_options(&self) -> RenderOptions {
		let mut options = RenderOptions {
			show_return_type: !self.no_return_type,
			show_declaring_class: !self.no_class,
			show_arguments: !self.no_arguments,
			max_visible_frames: self.max_frames,
			indent: self.indent.clone(),
			line_prefix: self.prefix.clone(),
			..RenderOptions::default()
		};
		if self.short {
			options = options.without_packages();
		}
		options
	}

	fn load_options(&self) -> LoadOptions {
		LoadOptions { derive_packages: self.packages }
	}
}

fn setup_logging(verbose: u8) -> Result<()> {
	let level = match verbose {
		0 => LevelFilter::Warn,
		1 => LevelFilter::Info,
		2 => LevelFilter::Debug,
		_ => LevelFilter::Trace,
	};

	fern::Dispatch::new()
		.format(|out, message, record| {
			out.finish(format_args!("[{} {}] {}", record.level(), record.target(), message))
		})
		.level(level)
		.chain(std::io::stderr())
		.apply()
		.context("failed to set up logging")
}

fn read_frames(input: Option<PathBuf>) -> Result<Vec<MethodRef>> {
	let reader: Box<dyn BufRead> = match input {
		Some(path) => {
			let file = File::open(&path)
				.with_context(|| anyhow!("failed to open stack trace {path:?}"))?;
			Box::new(BufReader::new(file))
		},
		None => Box::new(std::io::stdin().lock()),
	};

	let mut frames = Vec::new();
	for (line_number, line) in reader.lines().enumerate() {
		let line = line.with_context(|| anyhow!("failed to read line {}", line_number + 1))?;
		if line.trim().is_empty() {
			continue;
		}
		let frame = line.parse::<MethodRef>()
			.with_context(|| anyhow!("in line {}", line_number + 1))?;
		frames.push(frame);
	}
	Ok(frames)
}

fn main() -> Result<()> {
	let cli = Cli::parse();

	setup_logging(cli.verbose)?;

	let mappings = match &cli.mapping {
		Some(path) => guardmap::proguard::load_file(path, cli.load_options(), &LogDiagnostics),
		None => MappingTable::new(),
	};
	debug!("using {} class mappings", mappings.class_count());

	let renderer = Renderer::new(Arc::new(mappings));
	let options = cli.render_options();

	let mut stdout = std::io::stdout().lock();
	match cli.command {
		Command::Method { class_name, method_name, descriptor } => {
			let signature = javadesc::decode(&descriptor)?;
			let text = renderer.render_signature(&class_name, &method_name, &signature, &options);
			writeln!(stdout, "{text}")?;
		},
		Command::Trace { input } => {
			let frames = read_frames(input)?;
			write!(stdout, "{}", renderer.render_stack_trace(&frames, &options))?;
		},
		Command::Constant { constants } => {
			for constant in constants {
				let original = renderer.mappings().resolve_constant(&constant);
				writeln!(stdout, "{}", original.as_deref().unwrap_or(&constant))?;
			}
		},
		Command::Package { packages } => {
			for package in packages {
				writeln!(stdout, "{}", renderer.render_package(&package))?;
			}
		},
	}

	Ok(())
}
