use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Diagnostic, Error)]
#[non_exhaustive]
pub enum SlottedError {
	#[error(transparent)]
	#[diagnostic(code(slotted::io_error))]
	Io(#[from] std::io::Error),

	#[error("invalid selector `{selector}`: {reason}")]
	#[diagnostic(
		code(slotted::invalid_selector),
		help(
			"a selector combines an optional tag name (or `*`) with `#id`, `.class`, and \
			 `[attr=\"value\"]` parts; combinators are not supported"
		)
	)]
	InvalidSelector { selector: String, reason: String },

	#[error("no element matches selector: `{0}`")]
	#[diagnostic(
		code(slotted::template_not_found),
		help("add a <template> element matching this selector to the document")
	)]
	TemplateNotFound(String),

	#[error("element matching `{selector}` is a <{found}>, not a <template>")]
	#[diagnostic(
		code(slotted::not_a_template),
		help("only inert <template> elements can be cloned for rendering")
	)]
	NotATemplate { selector: String, found: String },

	#[error("invalid renderer configuration: {0}")]
	#[diagnostic(code(slotted::configuration))]
	Configuration(String),

	#[error("template content could not be cloned into a detached fragment")]
	#[diagnostic(
		code(slotted::template_clone),
		help("the resolved <template> element carries no content fragment")
	)]
	TemplateClone,

	#[error("data mapping failed: {0}")]
	#[diagnostic(code(slotted::mapping))]
	Mapping(String),

	#[error("`{0}` is not a permitted attribute name")]
	#[diagnostic(
		code(slotted::invalid_attribute),
		help("permitted names are the fixed HTML attribute whitelist plus `textContent`")
	)]
	InvalidAttribute(String),

	#[error("failed to parse mapping config file: {0}")]
	#[diagnostic(
		code(slotted::config_parse),
		help(
			"check that the file is valid TOML (or JSON) with `template`, `container`, and \
			 `[slots.*]` entries"
		)
	)]
	ConfigParse(String),

	#[error("unsupported mapping config format: `{0}`")]
	#[diagnostic(
		code(slotted::unsupported_format),
		help("supported formats: toml, json")
	)]
	UnsupportedConfigFormat(String),

	#[error("attribute template rendering failed for slot `{slot}`: {reason}")]
	#[diagnostic(code(slotted::attribute_template))]
	AttributeTemplate { slot: String, reason: String },
}

pub type SlottedResult<T> = Result<T, SlottedError>;
pub type AnyError = Box<dyn std::error::Error>;
pub type AnyEmptyResult = Result<(), AnyError>;
pub type AnyResult<T> = Result<T, AnyError>;
