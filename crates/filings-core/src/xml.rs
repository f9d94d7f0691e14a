//! Typed recursive XML document nodes.
//!
//! Registry documents (filing-summary manifests, taxonomy schemas, XBRL
//! instance documents) arrive as XML with inconsistent prefixes and
//! nesting. [`XmlNode`] gives them one typed shape with accessors for
//! children, attributes, and text, instead of untyped nested maps.

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use crate::error::{ResolveError, Result};

/// One element of a parsed XML document.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct XmlNode {
    /// Qualified element name as written in the document (prefix kept).
    pub name: String,
    /// Attributes in document order as (qualified name, value) pairs.
    pub attributes: Vec<(String, String)>,
    /// Concatenated character data directly under this element.
    pub text: Option<String>,
    /// Child elements in document order.
    pub children: Vec<XmlNode>,
}

impl XmlNode {
    /// Parses a complete XML document and returns its root element.
    pub fn parse(xml: &str) -> Result<Self> {
        let mut reader = Reader::from_str(xml);
        reader.config_mut().trim_text(true);

        let mut stack: Vec<Self> = Vec::new();
        loop {
            match reader.read_event().map_err(parse_err)? {
                Event::Start(start) => stack.push(Self::from_start(&start)?),
                Event::Empty(start) => {
                    let node = Self::from_start(&start)?;
                    match stack.last_mut() {
                        Some(parent) => parent.children.push(node),
                        // Self-closing root: the whole document is one element.
                        None => return Ok(node),
                    }
                }
                Event::Text(text) => {
                    let value = text.unescape().map_err(parse_err)?;
                    if let Some(parent) = stack.last_mut() {
                        parent.append_text(&value);
                    }
                }
                Event::CData(cdata) => {
                    let value = String::from_utf8_lossy(&cdata.into_inner()).into_owned();
                    if let Some(parent) = stack.last_mut() {
                        parent.append_text(&value);
                    }
                }
                Event::End(_) => {
                    let node = stack
                        .pop()
                        .ok_or_else(|| ResolveError::Parse("unbalanced close tag".into()))?;
                    match stack.last_mut() {
                        Some(parent) => parent.children.push(node),
                        None => return Ok(node),
                    }
                }
                Event::Eof => {
                    return Err(ResolveError::Parse(
                        "document ended before the root element closed".into(),
                    ));
                }
                // Declarations, comments, processing instructions.
                _ => {}
            }
        }
    }

    fn from_start(start: &BytesStart<'_>) -> Result<Self> {
        let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
        let mut attributes = Vec::new();
        for attr in start.attributes() {
            let attr = attr.map_err(parse_err)?;
            let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
            let value = attr.unescape_value().map_err(parse_err)?.into_owned();
            attributes.push((key, value));
        }
        Ok(Self {
            name,
            attributes,
            text: None,
            children: Vec::new(),
        })
    }

    fn append_text(&mut self, value: &str) {
        if value.is_empty() {
            return;
        }
        match &mut self.text {
            Some(existing) => existing.push_str(value),
            None => self.text = Some(value.to_owned()),
        }
    }

    /// Returns the element name without any namespace prefix.
    #[must_use]
    pub fn local_name(&self) -> &str {
        self.name.rsplit_once(':').map_or(self.name.as_str(), |(_, local)| local)
    }

    /// Returns the first child whose local name matches.
    #[must_use]
    pub fn child(&self, local_name: &str) -> Option<&Self> {
        self.children.iter().find(|c| c.local_name() == local_name)
    }

    /// Iterates children whose local name matches, in document order.
    pub fn children_named<'a>(
        &'a self,
        local_name: &'a str,
    ) -> impl Iterator<Item = &'a Self> {
        self.children
            .iter()
            .filter(move |c| c.local_name() == local_name)
    }

    /// Returns an attribute value by qualified name.
    #[must_use]
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Returns this element's character data, if any.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Iterates all descendant elements in document order (excluding self).
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants {
            stack: self.children.iter().rev().collect(),
        }
    }
}

/// Pre-order iterator over an element's descendants.
#[derive(Debug)]
pub struct Descendants<'a> {
    stack: Vec<&'a XmlNode>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a XmlNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}

fn parse_err(e: impl std::fmt::Display) -> ResolveError {
    ResolveError::Parse(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = r#"<?xml version="1.0"?>
<FilingSummary>
  <MyReports>
    <Report instance="amzn-20231231.htm">
      <ShortName>Consolidated Balance Sheets</ShortName>
      <LongName>1003 - Statement - Consolidated Balance Sheets</LongName>
      <HtmlFileName>R4.htm</HtmlFileName>
    </Report>
    <Report/>
  </MyReports>
</FilingSummary>"#;

    #[test]
    fn parses_nested_elements() {
        let root = XmlNode::parse(DOC).unwrap();
        assert_eq!(root.name, "FilingSummary");
        let reports = root.child("MyReports").unwrap();
        assert_eq!(reports.children_named("Report").count(), 2);
        let report = reports.child("Report").unwrap();
        assert_eq!(report.attr("instance"), Some("amzn-20231231.htm"));
        assert_eq!(
            report.child("ShortName").unwrap().text(),
            Some("Consolidated Balance Sheets")
        );
    }

    #[test]
    fn local_name_strips_prefix() {
        let root = XmlNode::parse(
            r#"<link:roleType roleURI="http://example.com/role/BalanceSheet">
                 <link:definition>1003 - Statement - Balance Sheet</link:definition>
               </link:roleType>"#,
        )
        .unwrap();
        assert_eq!(root.local_name(), "roleType");
        assert_eq!(
            root.child("definition").unwrap().text(),
            Some("1003 - Statement - Balance Sheet")
        );
    }

    #[test]
    fn descendants_walk_in_document_order() {
        let root = XmlNode::parse(DOC).unwrap();
        let names: Vec<_> = root.descendants().map(|n| n.local_name().to_owned()).collect();
        assert_eq!(
            names,
            [
                "MyReports",
                "Report",
                "ShortName",
                "LongName",
                "HtmlFileName",
                "Report"
            ]
        );
    }

    #[test]
    fn unbalanced_document_is_a_parse_error() {
        let err = XmlNode::parse("<a><b></b>").unwrap_err();
        assert!(matches!(err, ResolveError::Parse(_)));
    }

    #[test]
    fn entities_are_unescaped() {
        let root = XmlNode::parse("<name>Procter &amp; Gamble</name>").unwrap();
        assert_eq!(root.text(), Some("Procter & Gamble"));
    }
}
