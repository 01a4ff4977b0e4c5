use std::path::PathBuf;

use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;

#[derive(Parser)]
#[command(
	author,
	version,
	about = "Render HTML <template> elements with data-driven slot updates.",
	long_about = "slotted clones a page's <template> element once per data item, fills the \
	              elements tagged with data-template markers from a declarative mapping, and \
	              swaps the result into a container element.\n\nQuick start:\n  slotted init    \
	              Create a sample page, mapping, and data file\n  slotted render  Render a page's \
	              template with JSON data\n  slotted slots   List the slot markers in a page's \
	              template\n  slotted demo    Run the built-in simulated fetch-and-render sample"
)]
pub struct SlottedCli {
	#[command(subcommand)]
	pub command: Option<Commands>,

	/// Enable verbose output (render timing and dropped-attribute warnings).
	#[arg(long, short, global = true, default_value_t = false)]
	pub verbose: bool,

	/// Disable colored output.
	#[arg(long, global = true, default_value_t = false)]
	pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
	/// Initialize a directory with sample files.
	///
	/// Creates `page.html` (a document with a template and a container),
	/// `slotted.toml` (the mapping configuration), and `items.json` (sample
	/// data). Files that already exist are left untouched.
	Init {
		/// Directory to create the sample files in.
		#[arg(long, short, default_value = ".")]
		path: PathBuf,
	},
	/// Render a page's template with JSON data.
	///
	/// Loads the page, resolves the template and container selectors from
	/// the mapping config, clones the template once per data item, fills the
	/// slots, and prints the updated document (or writes it to `--output`).
	Render {
		/// Path to the HTML document containing the template and container.
		#[arg(long)]
		page: PathBuf,

		/// Path to the JSON data: an array of items, or a single object
		/// treated as a one-item sequence.
		#[arg(long)]
		data: PathBuf,

		/// Path to the mapping config (TOML or JSON).
		#[arg(long, default_value = "slotted.toml")]
		config: PathBuf,

		/// Write the rendered document here instead of stdout.
		#[arg(long, short)]
		output: Option<PathBuf>,

		/// Fail the render when a mapped attribute name falls outside the
		/// whitelist, instead of dropping it with a warning.
		#[arg(long, default_value_t = false)]
		strict_attributes: bool,

		/// Report how long the render pass took.
		#[arg(long, default_value_t = false)]
		timing: bool,

		/// Watch the page, data, and config files and re-render whenever one
		/// of them changes.
		#[arg(long, default_value_t = false)]
		watch: bool,
	},
	/// List the slot markers inside a page's template.
	///
	/// Walks the template's inert content and prints every `data-template`
	/// marker in document order, flagging keys shadowed by an earlier
	/// duplicate (only the first occurrence of a key is ever rendered).
	Slots {
		/// Path to the HTML document to inspect.
		#[arg(long)]
		page: PathBuf,

		/// Selector of the template element to inspect.
		#[arg(long, default_value = "template")]
		template: String,

		/// Output format for the slot list.
		#[arg(long, value_enum, default_value_t = OutputFormat::Text)]
		format: OutputFormat,
	},
	/// Run the built-in sample: a simulated fetch feeding the renderer.
	///
	/// A producer thread sleeps for the configured latency and then sends
	/// mock search results over a channel; the consumer renders them into an
	/// embedded sample page and prints the result.
	Demo {
		/// Simulated fetch latency in milliseconds.
		#[arg(long, default_value_t = 200)]
		delay_ms: u64,
	},
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
	/// Human-readable text output.
	Text,
	/// JSON output for programmatic consumption.
	Json,
}
