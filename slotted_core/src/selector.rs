use logos::Logos;
use markup5ever_rcdom::Handle;
use markup5ever_rcdom::NodeData;
use snailquote::unescape;

use crate::SlottedError;
use crate::SlottedResult;

/// Raw tokens produced by logos for flat tokenization of a selector string.
#[derive(Logos, Debug, PartialEq)]
enum RawToken {
	#[token("#")]
	Hash,
	#[token(".")]
	Dot,
	#[token("[")]
	BracketOpen,
	#[token("]")]
	BracketClose,
	#[token("=")]
	Equals,
	#[token("*")]
	Star,
	#[regex(r"[ \t\r\n]+")]
	Whitespace,
	#[regex(r"[a-zA-Z_][a-zA-Z0-9_-]*")]
	Ident,
	#[regex(r#""([^"\\]|\\.)*""#)]
	DoubleQuotedString,
	#[regex(r"'([^'\\]|\\.)*'")]
	SingleQuotedString,
}

/// An `[attr]` or `[attr=value]` part of a selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeSelector {
	/// The attribute name to look up (namespace-insensitive).
	pub name: String,
	/// When present, the attribute value must match exactly. When absent,
	/// presence of the attribute is enough.
	pub value: Option<String>,
}

/// A parsed compound simple selector: one optional tag name (or `*`) combined
/// with any number of `#id`, `.class`, and `[attr=value]` parts.
///
/// Combinators (descendant whitespace, `>`, `+`, `~`) are not supported;
/// selectors here always address a single element. Matching walks the
/// document in pre-order, so "first match" means first in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selector {
	/// Required tag name, lowercase. `None` matches any element.
	pub tag: Option<String>,
	/// Required value of the `id` attribute.
	pub id: Option<String>,
	/// Classes that must all appear in the `class` attribute.
	pub classes: Vec<String>,
	/// Attribute presence/equality requirements.
	pub attributes: Vec<AttributeSelector>,
}

impl Selector {
	/// Parse a selector string.
	pub fn parse(input: impl AsRef<str>) -> SlottedResult<Self> {
		let input = input.as_ref();
		let error = |reason: &str| {
			SlottedError::InvalidSelector {
				selector: input.to_string(),
				reason: reason.to_string(),
			}
		};

		let tokens: Vec<_> = RawToken::lexer(input).spanned().collect();
		let mut selector = Self::default();
		let mut saw_part = false;
		let mut cursor = 0;

		let ident_at = |index: usize| -> Option<String> {
			match tokens.get(index) {
				Some((Ok(RawToken::Ident), span)) => Some(input[span.clone()].to_string()),
				_ => None,
			}
		};

		while cursor < tokens.len() {
			let (result, span) = &tokens[cursor];
			let Ok(token) = result else {
				return Err(error(&format!(
					"unexpected character `{}`",
					&input[span.clone()]
				)));
			};

			match token {
				RawToken::Whitespace => {
					return Err(error("combinators are not supported"));
				}
				RawToken::Ident => {
					if saw_part {
						return Err(error("a tag name must be the first part of a selector"));
					}
					selector.tag = Some(input[span.clone()].to_ascii_lowercase());
					cursor += 1;
				}
				RawToken::Star => {
					if saw_part {
						return Err(error("`*` must be the first part of a selector"));
					}
					cursor += 1;
				}
				RawToken::Hash => {
					let Some(id) = ident_at(cursor + 1) else {
						return Err(error("expected an identifier after `#`"));
					};
					if selector.id.is_some() {
						return Err(error("duplicate `#id` part"));
					}
					selector.id = Some(id);
					cursor += 2;
				}
				RawToken::Dot => {
					let Some(class) = ident_at(cursor + 1) else {
						return Err(error("expected an identifier after `.`"));
					};
					selector.classes.push(class);
					cursor += 2;
				}
				RawToken::BracketOpen => {
					let Some(name) = ident_at(cursor + 1) else {
						return Err(error("expected an attribute name after `[`"));
					};
					cursor += 2;

					match tokens.get(cursor) {
						Some((Ok(RawToken::BracketClose), _)) => {
							selector.attributes.push(AttributeSelector { name, value: None });
							cursor += 1;
						}
						Some((Ok(RawToken::Equals), _)) => {
							cursor += 1;
							let value = match tokens.get(cursor) {
								Some((Ok(RawToken::Ident), span)) => input[span.clone()].to_string(),
								Some((Ok(RawToken::DoubleQuotedString | RawToken::SingleQuotedString), span)) => {
									let slice = &input[span.clone()];
									let inner = &slice[1..slice.len() - 1];
									if inner.contains('\\') {
										unescape(inner)
											.map_err(|_| error("invalid escape in attribute value"))?
									} else {
										inner.to_string()
									}
								}
								_ => return Err(error("expected an attribute value after `=`")),
							};
							cursor += 1;
							match tokens.get(cursor) {
								Some((Ok(RawToken::BracketClose), _)) => cursor += 1,
								_ => return Err(error("expected `]` to close the attribute part")),
							}
							selector.attributes.push(AttributeSelector {
								name,
								value: Some(value),
							});
						}
						_ => return Err(error("expected `]` or `=` in the attribute part")),
					}
				}
				RawToken::BracketClose
				| RawToken::Equals
				| RawToken::DoubleQuotedString
				| RawToken::SingleQuotedString => {
					return Err(error(&format!(
						"unexpected `{}` outside an attribute part",
						&input[span.clone()]
					)));
				}
			}

			saw_part = true;
		}

		if !saw_part {
			return Err(error("empty selector"));
		}

		Ok(selector)
	}

	/// Check whether this selector matches the given node. Non-element nodes
	/// never match.
	pub fn matches(&self, node: &Handle) -> bool {
		let NodeData::Element { name, attrs, .. } = &node.data else {
			return false;
		};

		if let Some(tag) = &self.tag {
			if !name.local.as_ref().eq_ignore_ascii_case(tag) {
				return false;
			}
		}

		let attrs = attrs.borrow();
		let lookup = |wanted: &str| {
			attrs
				.iter()
				.find(|attr| attr.name.local.as_ref() == wanted)
				.map(|attr| &*attr.value)
		};

		if let Some(id) = &self.id {
			if lookup("id") != Some(id.as_str()) {
				return false;
			}
		}

		for class in &self.classes {
			let found = lookup("class")
				.is_some_and(|value| value.split_ascii_whitespace().any(|part| part == class));
			if !found {
				return false;
			}
		}

		for attribute in &self.attributes {
			match (lookup(&attribute.name), &attribute.value) {
				(Some(_), None) => {}
				(Some(actual), Some(expected)) if actual == expected.as_str() => {}
				_ => return false,
			}
		}

		true
	}
}
