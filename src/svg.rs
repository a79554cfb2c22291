//! SVG markup in and out of a [`Document`].
//!
//! Parsing goes through `roxmltree`. Elements keep their local names;
//! namespaced attributes keep their prefix (`xlink:href`, `inkscape:label`)
//! and extension namespaces stay declared as `xmlns:*` attributes where they
//! were declared. Comments and processing instructions are dropped. Serialization is minimal well-formed
//! XML with escaped attributes and text.

use crate::dom::{Document, NodeData, NodeId};
use crate::error::SvgError;

const SVG_NS: &str = "http://www.w3.org/2000/svg";
const XLINK_NS: &str = "http://www.w3.org/1999/xlink";
const XML_NS: &str = "http://www.w3.org/XML/1998/namespace";

// =============================================================================
// Parsing
// =============================================================================

/// Parse SVG text into a fresh document. The result starts with no dirty nodes.
pub fn parse(text: &str) -> Result<Document, SvgError> {
    let xml = roxmltree::Document::parse(text)?;
    let mut doc = Document::new();
    import(&mut doc, xml.root_element(), None);
    doc.take_dirty();
    Ok(doc)
}

fn import(doc: &mut Document, node: roxmltree::Node<'_, '_>, parent: Option<NodeId>) {
    let id = if node.is_element() {
        let element = doc.create_element(node.tag_name().name());
        for attr in node.attributes() {
            let name = match attr.namespace() {
                Some(XLINK_NS) => format!("xlink:{}", attr.name()),
                Some(XML_NS) => format!("xml:{}", attr.name()),
                Some(uri) => match node.lookup_prefix(uri) {
                    Some(prefix) => format!("{prefix}:{}", attr.name()),
                    None => attr.name().to_string(),
                },
                None => attr.name().to_string(),
            };
            doc.set_attribute(element, &name, attr.value());
        }
        import_namespaces(doc, node, element);
        element
    } else if node.is_text() {
        doc.create_text(node.text().unwrap_or_default())
    } else {
        return;
    };

    if let Some(parent) = parent {
        doc.append_child(parent, id);
    }
    for child in node.children() {
        import(doc, child, Some(id));
    }
}

/// Re-declare extension prefixes introduced on `node`. SVG, xlink and xml are
/// written by the serializer and skipped here.
fn import_namespaces(doc: &mut Document, node: roxmltree::Node<'_, '_>, element: NodeId) {
    for ns in node.namespaces() {
        let Some(prefix) = ns.name() else {
            continue;
        };
        if matches!(ns.uri(), SVG_NS | XLINK_NS | XML_NS) {
            continue;
        }
        let inherited = node.parent_element().is_some_and(|parent| {
            parent
                .namespaces()
                .any(|p| p.name() == Some(prefix) && p.uri() == ns.uri())
        });
        if !inherited {
            doc.set_attribute(element, &format!("xmlns:{prefix}"), ns.uri());
        }
    }
}

// =============================================================================
// Serialization
// =============================================================================

/// Serialize the document's root element (and everything under it).
///
/// The outermost element gets `xmlns` (and `xmlns:xlink` when needed) if it
/// does not declare them already.
pub fn to_string(doc: &Document) -> String {
    doc.root().map(|root| node_to_string(doc, root)).unwrap_or_default()
}

/// Serialize one subtree, treating `node` as the outermost element.
pub fn node_to_string(doc: &Document, node: NodeId) -> String {
    let mut out = String::new();
    write_node(doc, node, true, &mut out);
    out
}

fn write_node(doc: &Document, node: NodeId, outermost: bool, out: &mut String) {
    let Some(data) = doc.get(node).map(|n| &n.data) else {
        return;
    };

    match data {
        NodeData::Element { tag_name, attrs } => {
            out.push('<');
            out.push_str(tag_name);
            for attr in attrs {
                out.push(' ');
                out.push_str(&attr.name);
                out.push_str("=\"");
                escape_attr(&attr.value, out);
                out.push('"');
            }
            if outermost {
                write_namespaces(doc, node, out);
            }

            let children = doc.children(node);
            if children.is_empty() {
                out.push_str("/>");
                return;
            }
            out.push('>');
            for &child in children {
                write_node(doc, child, false, out);
            }
            out.push_str("</");
            out.push_str(tag_name);
            out.push('>');
        }
        NodeData::Text(text) => escape_text(text, out),
        NodeData::Comment(text) => {
            out.push_str("<!--");
            out.push_str(text);
            out.push_str("-->");
        }
    }
}

fn write_namespaces(doc: &Document, node: NodeId, out: &mut String) {
    if !doc.has_attribute(node, "xmlns") {
        out.push_str(" xmlns=\"");
        out.push_str(SVG_NS);
        out.push('"');
    }

    let uses_xlink = std::iter::once(node)
        .chain(doc.descendants(node))
        .flat_map(|n| doc.attributes(n))
        .any(|a| a.name.starts_with("xlink:"));
    if uses_xlink && !doc.has_attribute(node, "xmlns:xlink") {
        out.push_str(" xmlns:xlink=\"");
        out.push_str(XLINK_NS);
        out.push('"');
    }
}

fn escape_attr(input: &str, out: &mut String) {
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
}

fn escape_text(input: &str, out: &mut String) {
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
}
