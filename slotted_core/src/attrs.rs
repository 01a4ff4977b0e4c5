/// The synthetic pseudo-attribute that targets an element's text content
/// instead of a literal HTML attribute. The one camelCase entry in an
/// otherwise lowercase attribute vocabulary.
pub const TEXT_CONTENT: &str = "textContent";

/// The fixed set of literal HTML attribute names a render pass is allowed to
/// write. Sorted so membership checks can binary search. Immutable for the
/// process lifetime; anything outside this set (plus [`TEXT_CONTENT`]) is
/// rejected at write-time.
pub const VALID_ATTRIBUTES: [&str; 97] = [
	"accept",
	"accept-charset",
	"accesskey",
	"action",
	"align",
	"alt",
	"async",
	"autocomplete",
	"autofocus",
	"autoplay",
	"bgcolor",
	"border",
	"charset",
	"checked",
	"cite",
	"class",
	"color",
	"cols",
	"colspan",
	"content",
	"contenteditable",
	"controls",
	"coords",
	"data",
	"datetime",
	"default",
	"defer",
	"dir",
	"dirname",
	"disabled",
	"download",
	"draggable",
	"dropzone",
	"enctype",
	"for",
	"form",
	"formaction",
	"headers",
	"height",
	"hidden",
	"high",
	"href",
	"hreflang",
	"http-equiv",
	"id",
	"ismap",
	"kind",
	"label",
	"lang",
	"list",
	"loop",
	"low",
	"max",
	"maxlength",
	"media",
	"method",
	"min",
	"multiple",
	"muted",
	"name",
	"novalidate",
	"open",
	"optimum",
	"pattern",
	"placeholder",
	"poster",
	"preload",
	"readonly",
	"rel",
	"required",
	"reversed",
	"rows",
	"rowspan",
	"sandbox",
	"scope",
	"selected",
	"shape",
	"size",
	"sizes",
	"span",
	"spellcheck",
	"src",
	"srcdoc",
	"srclang",
	"srcset",
	"start",
	"step",
	"style",
	"tabindex",
	"target",
	"title",
	"translate",
	"type",
	"usemap",
	"value",
	"width",
	"wrap",
];

/// Check whether `name` may be written during a render pass. Case-sensitive:
/// HTML attribute names are lowercase, and the only camelCase entry is the
/// [`TEXT_CONTENT`] pseudo-attribute.
pub fn is_valid_attribute(name: &str) -> bool {
	name == TEXT_CONTENT || VALID_ATTRIBUTES.binary_search(&name).is_ok()
}
