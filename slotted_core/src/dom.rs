use std::cell::RefCell;
use std::rc::Rc;

use html5ever::LocalName;
use html5ever::QualName;
use html5ever::namespace_url;
use html5ever::ns;
use html5ever::parse_document;
use html5ever::serialize::SerializeOpts;
use html5ever::serialize::TraversalScope;
use html5ever::serialize::serialize;
use html5ever::tendril::StrTendril;
use html5ever::tendril::TendrilSink;
use markup5ever::Attribute;
use markup5ever_rcdom::Handle;
use markup5ever_rcdom::Node;
use markup5ever_rcdom::NodeData;
use markup5ever_rcdom::RcDom;
use markup5ever_rcdom::SerializableHandle;

use crate::Selector;
use crate::SlottedResult;

/// An in-memory HTML document.
///
/// Wraps an [`RcDom`] tree produced by html5ever's browser-compatible parser
/// (full error recovery, so parsing never fails). `<template>` elements are
/// parsed the way browsers parse them: their markup lands in an inert content
/// fragment (see [`template_contents`]) rather than in the document tree, and
/// is only materialized by cloning.
pub struct Document {
	dom: RcDom,
}

impl Document {
	/// Parse an HTML string into a document.
	pub fn parse(html: impl AsRef<str>) -> Self {
		let dom = parse_document(RcDom::default(), Default::default())
			.one(StrTendril::from(html.as_ref()));

		Self { dom }
	}

	/// The document root node.
	pub fn root(&self) -> Handle {
		self.dom.document.clone()
	}

	/// Find the first element matching `selector`, in document order. Inert
	/// template content is never searched. Errors only when the selector
	/// itself is invalid.
	pub fn query_selector(&self, selector: impl AsRef<str>) -> SlottedResult<Option<Handle>> {
		let selector = Selector::parse(selector)?;
		Ok(query(&self.root(), &selector))
	}

	/// Serialize the whole document back to HTML text.
	pub fn to_html(&self) -> SlottedResult<String> {
		let mut bytes = Vec::new();
		let serializable = SerializableHandle::from(self.root());
		serialize(&mut bytes, &serializable, SerializeOpts::default())?;

		Ok(String::from_utf8_lossy(&bytes).into_owned())
	}
}

fn query(node: &Handle, selector: &Selector) -> Option<Handle> {
	if selector.matches(node) {
		return Some(node.clone());
	}

	for child in node.children.borrow().iter() {
		if let Some(found) = query(child, selector) {
			return Some(found);
		}
	}

	None
}

/// Serialize a single node (including itself) to HTML text.
pub fn outer_html(node: &Handle) -> SlottedResult<String> {
	let options = SerializeOpts {
		traversal_scope: TraversalScope::IncludeNode,
		..Default::default()
	};
	let mut bytes = Vec::new();
	let serializable = SerializableHandle::from(node.clone());
	serialize(&mut bytes, &serializable, options)?;

	Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Whether the node is an element.
pub fn is_element(node: &Handle) -> bool {
	matches!(node.data, NodeData::Element { .. })
}

/// The element's lowercase tag name, or `None` for non-element nodes.
pub fn element_name(node: &Handle) -> Option<&str> {
	match &node.data {
		NodeData::Element { name, .. } => Some(name.local.as_ref()),
		_ => None,
	}
}

/// Read an attribute value by name (namespace-insensitive).
pub fn get_attribute(node: &Handle, name: &str) -> Option<String> {
	let NodeData::Element { attrs, .. } = &node.data else {
		return None;
	};

	attrs
		.borrow()
		.iter()
		.find(|attr| attr.name.local.as_ref() == name)
		.map(|attr| attr.value.to_string())
}

/// Write an attribute, replacing any existing value. No-op on non-elements.
pub fn set_attribute(node: &Handle, name: &str, value: &str) {
	let NodeData::Element { attrs, .. } = &node.data else {
		return;
	};

	let mut attrs = attrs.borrow_mut();
	if let Some(existing) = attrs.iter_mut().find(|attr| attr.name.local.as_ref() == name) {
		existing.value = StrTendril::from(value);
		return;
	}

	attrs.push(Attribute {
		name: QualName::new(None, ns!(), LocalName::from(name)),
		value: StrTendril::from(value),
	});
}

/// Remove an attribute by name. No-op when absent or on non-elements.
pub fn remove_attribute(node: &Handle, name: &str) {
	let NodeData::Element { attrs, .. } = &node.data else {
		return;
	};

	attrs
		.borrow_mut()
		.retain(|attr| attr.name.local.as_ref() != name);
}

/// The concatenated text of the node and all its descendants.
pub fn text_content(node: &Handle) -> String {
	let mut out = String::new();
	collect_text(node, &mut out);
	out
}

fn collect_text(node: &Handle, out: &mut String) {
	if let NodeData::Text { contents } = &node.data {
		out.push_str(&contents.borrow());
	}

	for child in node.children.borrow().iter() {
		collect_text(child, out);
	}
}

/// Replace the node's children with a single text node holding `value`
/// (or with nothing when `value` is empty).
pub fn set_text_content(node: &Handle, value: &str) {
	let mut children = Vec::new();
	if !value.is_empty() {
		children.push(Node::new(NodeData::Text {
			contents: RefCell::new(StrTendril::from(value)),
		}));
	}

	replace_children(node, children);
}

/// Recursively clone a node into a detached tree. Inert template content is
/// cloned along with its element.
pub fn deep_clone(node: &Handle) -> Handle {
	let data = match &node.data {
		NodeData::Document => NodeData::Document,
		NodeData::Doctype {
			name,
			public_id,
			system_id,
		} => {
			NodeData::Doctype {
				name: name.clone(),
				public_id: public_id.clone(),
				system_id: system_id.clone(),
			}
		}
		NodeData::Text { contents } => {
			NodeData::Text {
				contents: RefCell::new(contents.borrow().clone()),
			}
		}
		NodeData::Comment { contents } => {
			NodeData::Comment {
				contents: contents.clone(),
			}
		}
		NodeData::Element {
			name,
			attrs,
			template_contents,
			mathml_annotation_xml_integration_point,
		} => {
			NodeData::Element {
				name: name.clone(),
				attrs: RefCell::new(attrs.borrow().clone()),
				template_contents: RefCell::new(
					template_contents.borrow().as_ref().map(deep_clone),
				),
				mathml_annotation_xml_integration_point: *mathml_annotation_xml_integration_point,
			}
		}
		NodeData::ProcessingInstruction { target, contents } => {
			NodeData::ProcessingInstruction {
				target: target.clone(),
				contents: contents.clone(),
			}
		}
	};

	let clone = Node::new(data);
	for child in node.children.borrow().iter() {
		append_child(&clone, deep_clone(child));
	}

	clone
}

/// Attach a detached node as the last child of `parent`.
pub fn append_child(parent: &Handle, child: Handle) {
	child.parent.set(Some(Rc::downgrade(parent)));
	parent.children.borrow_mut().push(child);
}

/// Replace all of `parent`'s children with `children` in one operation.
pub fn replace_children(parent: &Handle, children: Vec<Handle>) {
	let old = std::mem::take(&mut *parent.children.borrow_mut());
	for child in old {
		child.parent.set(None);
	}

	for child in children {
		append_child(parent, child);
	}
}

/// The node's element children, in order.
pub fn child_elements(node: &Handle) -> Vec<Handle> {
	node.children
		.borrow()
		.iter()
		.filter(|child| is_element(child))
		.cloned()
		.collect()
}

/// The inert content fragment of a `<template>` element.
pub fn template_contents(node: &Handle) -> Option<Handle> {
	let NodeData::Element {
		template_contents, ..
	} = &node.data
	else {
		return None;
	};

	template_contents.borrow().clone()
}

/// Find the first descendant (pre-order across `roots`, in order) carrying
/// the attribute `name` with exactly the value `value`.
pub fn find_by_attribute(roots: &[Handle], name: &str, value: &str) -> Option<Handle> {
	for root in roots {
		if let Some(found) = find_attribute_in(root, name, value) {
			return Some(found);
		}
	}

	None
}

fn find_attribute_in(node: &Handle, name: &str, value: &str) -> Option<Handle> {
	if get_attribute(node, name).as_deref() == Some(value) {
		return Some(node.clone());
	}

	for child in node.children.borrow().iter() {
		if let Some(found) = find_attribute_in(child, name, value) {
			return Some(found);
		}
	}

	None
}
