use std::path::Path;
use std::path::PathBuf;
use std::process;
use std::sync::mpsc;
use std::time::Duration;
use std::time::Instant;

use clap::Parser;
use owo_colors::OwoColorize;
use slotted_cli::Commands;
use slotted_cli::OutputFormat;
use slotted_cli::SlottedCli;
use slotted_core::AnyEmptyResult;
use slotted_core::AnyResult;
use slotted_core::Document;
use slotted_core::MappingSpec;
use slotted_core::RenderValues;
use slotted_core::RendererOptions;
use slotted_core::SlotValues;
use slotted_core::SlottedError;
use slotted_core::TemplateRenderer;
use slotted_core::collect_slots;
use slotted_core::dom;

static USE_COLOR: std::sync::atomic::AtomicBool = std::sync::atomic::AtomicBool::new(true);

fn color_enabled() -> bool {
	USE_COLOR.load(std::sync::atomic::Ordering::Relaxed)
}

/// Apply ANSI color codes only when color is enabled.
macro_rules! colored {
	($text:expr,red) => {
		if color_enabled() {
			format!("{}", $text.red())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,green) => {
		if color_enabled() {
			format!("{}", $text.green())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,yellow) => {
		if color_enabled() {
			format!("{}", $text.yellow())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,bold) => {
		if color_enabled() {
			format!("{}", $text.bold())
		} else {
			format!("{}", $text)
		}
	};
}

fn main() {
	let args = SlottedCli::parse();

	// Respect NO_COLOR env var and --no-color flag.
	let use_color = !args.no_color && std::env::var_os("NO_COLOR").is_none();
	if !use_color {
		USE_COLOR.store(false, std::sync::atomic::Ordering::Relaxed);
	}

	// Install miette's fancy handler for rich error diagnostics.
	miette::set_hook(Box::new(move |_| {
		Box::new(
			miette::MietteHandlerOpts::new()
				.color(use_color)
				.unicode(use_color)
				.build(),
		)
	}))
	.ok();

	// Route tracing output (render timing, dropped-attribute warnings) to
	// stderr; --verbose raises the default level to debug.
	let default_level = if args.verbose { "debug" } else { "warn" };
	tracing_subscriber::fmt()
		.with_env_filter(
			tracing_subscriber::EnvFilter::try_from_default_env()
				.unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
		)
		.with_writer(std::io::stderr)
		.init();

	let result = match args.command {
		Some(Commands::Init { path }) => run_init(&path),
		Some(Commands::Render {
			page,
			data,
			config,
			output,
			strict_attributes,
			timing,
			watch,
		}) => {
			run_render(RenderRequest {
				page,
				data,
				config,
				output,
				strict_attributes,
				timing,
				watch,
			})
		}
		Some(Commands::Slots {
			page,
			template,
			format,
		}) => run_slots(&page, &template, format),
		Some(Commands::Demo { delay_ms }) => run_demo(delay_ms),
		None => {
			eprintln!("No subcommand specified. Run `slotted --help` for usage.");
			process::exit(1);
		}
	};

	if let Err(e) = result {
		// Try to render through miette for rich diagnostics with help text
		// and error codes.
		match e.downcast::<SlottedError>() {
			Ok(slotted_err) => {
				let report: miette::Report = (*slotted_err).into();
				eprintln!("{report:?}");
			}
			Err(e) => {
				eprintln!("{} {e}", colored!("error:", red));
			}
		}
		process::exit(2);
	}
}

const SAMPLE_PAGE: &str = r##"<!doctype html>
<html>
	<head>
		<title>slotted sample</title>
	</head>
	<body>
		<h1>Search results</h1>
		<section id="results-container"></section>
		<template id="result-template">
			<article class="result">
				<h3 data-template="category"></h3>
				<a data-template="link"></a>
			</article>
		</template>
	</body>
</html>
"##;

const SAMPLE_CONFIG: &str = r##"# slotted mapping configuration
# Selectors resolve against the page. Attribute values may use
# {{ field }} templates rendered against each data item; plain
# strings pass through unchanged.
template = "#result-template"
container = "#results-container"

[slots.category]
textContent = "{{ category }}"

[slots.link]
textContent = "{{ linkText }}"
href = "{{ linkUrl }}"
class = "link"
"##;

const SAMPLE_ITEMS: &str = r#"[
	{
		"category": "Technology",
		"linkText": "Learn JavaScript",
		"linkUrl": "https://example.com/learn-js"
	},
	{
		"category": "Health",
		"linkText": "Fitness Tips",
		"linkUrl": "https://example.com/fitness-tips"
	},
	{
		"category": "Finance",
		"linkText": "Investing 101",
		"linkUrl": "https://example.com/investing-101"
	},
	{
		"category": "Education",
		"linkText": "Online Courses",
		"linkUrl": "https://example.com/online-courses"
	},
	{
		"category": "Entertainment",
		"linkText": "Movie Reviews",
		"linkUrl": "https://example.com/movie-reviews"
	},
	{
		"category": "Travel",
		"linkText": "Top Destinations",
		"linkUrl": "https://example.com/top-destinations"
	}
]
"#;

fn run_init(path: &Path) -> AnyEmptyResult {
	let page_path = path.join("page.html");
	let config_path = path.join("slotted.toml");
	let items_path = path.join("items.json");

	let mut created_page = false;
	for (target, content, label) in [
		(&page_path, SAMPLE_PAGE, "page"),
		(&config_path, SAMPLE_CONFIG, "mapping config"),
		(&items_path, SAMPLE_ITEMS, "data"),
	] {
		if target.exists() {
			println!("{} file already exists: {}", label, target.display());
			continue;
		}

		std::fs::write(target, content)?;
		println!("Created {} file: {}", label, target.display());
		created_page = created_page || *target == page_path;
	}

	if created_page {
		println!();
		println!("Next steps:");
		println!("  1. Edit {} to shape the template and its slots", page_path.display());
		println!("  2. Point the [slots.*] entries in slotted.toml at your data fields");
		println!("  3. Run `slotted render --page page.html --data items.json`");
	}

	Ok(())
}

struct RenderRequest {
	page: PathBuf,
	data: PathBuf,
	config: PathBuf,
	output: Option<PathBuf>,
	strict_attributes: bool,
	timing: bool,
	watch: bool,
}

fn run_render(request: RenderRequest) -> AnyEmptyResult {
	// Run the initial render.
	render_once(&request)?;

	if !request.watch {
		return Ok(());
	}

	// Watch mode
	println!("\nWatching for file changes... (press Ctrl+C to stop)");

	let (tx, rx) = mpsc::channel();

	let mut watcher =
		notify::recommended_watcher(move |res: Result<notify::Event, notify::Error>| {
			if let Ok(event) = res {
				if matches!(
					event.kind,
					notify::EventKind::Modify(_) | notify::EventKind::Create(_)
				) {
					let _ = tx.send(());
				}
			}
		})?;

	use notify::Watcher;
	for path in [&request.page, &request.data, &request.config] {
		watcher.watch(path, notify::RecursiveMode::NonRecursive)?;
	}

	loop {
		rx.recv()?;
		// Debounce: drain additional events within 200ms.
		while rx.recv_timeout(Duration::from_millis(200)).is_ok() {}

		println!("\nFile change detected, rendering...");
		if let Err(e) = render_once(&request) {
			eprintln!("{} {e}", colored!("error:", red));
		}
	}
}

fn render_once(request: &RenderRequest) -> AnyEmptyResult {
	let mut spec = MappingSpec::load(&request.config)?;
	if request.strict_attributes {
		spec.strict_attributes = true;
	}
	if request.timing {
		spec.debug_timing = true;
	}

	let document = Document::parse(std::fs::read_to_string(&request.page)?);
	let items = load_items(&request.data)?;

	let renderer = spec.renderer(&document)?;
	let started = Instant::now();
	renderer.render(&items)?;
	let html = document.to_html()?;

	match &request.output {
		Some(path) => {
			std::fs::write(path, &html)?;
			println!(
				"{} rendered {} item(s) into {}",
				colored!("ok:", green),
				items.len(),
				path.display()
			);
		}
		None => println!("{html}"),
	}

	if request.timing {
		eprintln!("Rendered {} item(s) in {:?}", items.len(), started.elapsed());
	}

	Ok(())
}

/// Load data items from a JSON file. A single object is normalized to a
/// one-item sequence.
fn load_items(path: &Path) -> AnyResult<Vec<serde_json::Value>> {
	let content = std::fs::read_to_string(path)?;
	let value: serde_json::Value = serde_json::from_str(&content)?;

	Ok(match value {
		serde_json::Value::Array(items) => items,
		other => vec![other],
	})
}

fn run_slots(page: &Path, template: &str, format: OutputFormat) -> AnyEmptyResult {
	let document = Document::parse(std::fs::read_to_string(page)?);

	let Some(element) = document.query_selector(template)? else {
		return Err(SlottedError::TemplateNotFound(template.to_string()).into());
	};

	if dom::element_name(&element) != Some("template") {
		let found = dom::element_name(&element).unwrap_or("unknown").to_string();
		return Err(SlottedError::NotATemplate {
			selector: template.to_string(),
			found,
		}
		.into());
	}

	let slots = collect_slots(&element);

	match format {
		OutputFormat::Json => {
			println!("{}", serde_json::to_string_pretty(&slots)?);
		}
		OutputFormat::Text => {
			if slots.is_empty() {
				println!("No slot markers found.");
				return Ok(());
			}

			println!("{}", colored!("Slots:", bold));
			for slot in &slots {
				let status = if slot.shadowed {
					format!(" {}", colored!("[shadowed]", yellow))
				} else {
					String::new()
				};
				println!("  {} <{}>{status}", slot.key, slot.element);
			}

			println!("\n{} slot marker(s)", slots.len());
		}
	}

	Ok(())
}

#[derive(Debug, Clone)]
struct DemoItem {
	category: &'static str,
	link_text: &'static str,
	link_url: &'static str,
}

fn demo_items() -> Vec<DemoItem> {
	vec![
		DemoItem {
			category: "Technology",
			link_text: "Learn JavaScript",
			link_url: "https://example.com/learn-js",
		},
		DemoItem {
			category: "Health",
			link_text: "Fitness Tips",
			link_url: "https://example.com/fitness-tips",
		},
		DemoItem {
			category: "Finance",
			link_text: "Investing 101",
			link_url: "https://example.com/investing-101",
		},
		DemoItem {
			category: "Education",
			link_text: "Online Courses",
			link_url: "https://example.com/online-courses",
		},
		DemoItem {
			category: "Entertainment",
			link_text: "Movie Reviews",
			link_url: "https://example.com/movie-reviews",
		},
		DemoItem {
			category: "Travel",
			link_text: "Top Destinations",
			link_url: "https://example.com/top-destinations",
		},
	]
}

fn run_demo(delay_ms: u64) -> AnyEmptyResult {
	// The original sample wires an event-driven search to a fetch-then-render
	// cycle; here the request initiator and the render consumer talk over a
	// channel instead.
	let (tx, rx) = mpsc::channel();
	let producer = std::thread::spawn(move || {
		// Simulated roundtrip latency.
		std::thread::sleep(Duration::from_millis(delay_ms));
		let _ = tx.send(demo_items());
	});

	let document = Document::parse(SAMPLE_PAGE);
	let Some(container) = document.query_selector("#results-container")? else {
		return Err(
			SlottedError::Configuration("the demo page is missing its container".to_string()).into(),
		);
	};

	let renderer = TemplateRenderer::new(
		&document,
		RendererOptions::new("#result-template", container),
		|item: &DemoItem| {
			Ok(RenderValues::new()
				.slot("category", SlotValues::new().text(item.category))
				.slot(
					"link",
					SlotValues::new()
						.text(item.link_text)
						.attr("href", item.link_url)
						.attr("class", "link"),
				))
		},
	)?;

	let items = rx.recv()?;
	let started = Instant::now();
	renderer.render(&items)?;
	let _ = producer.join();

	println!("{}", document.to_html()?);
	eprintln!(
		"{} fetched and rendered {} item(s) in {:?}",
		colored!("demo:", green),
		items.len(),
		started.elapsed()
	);

	Ok(())
}
