/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

//! XML Encoding module that uses Rust lifetimes to make
//! generating malformed XML a compile error

use crate::escape::escape;

// currently there's actually no way that encoding can fail but give it time :-)
#[non_exhaustive]
#[derive(Debug)]
pub enum Error {}

/// XmlWriter Abstraction
///
/// XmlWriter (and friends) make generating an invalid XML document a type error. Nested branches
/// of the Xml document mutable borrow from the root. You cannot continue writing to the root
/// until the nested branch is dropped and dropping the nested branch writes the terminator (eg.
/// closing element).
///
/// The one exception to this rule is names—it is possible to construct an invalid Xml Name. However,
/// names are always known ahead of time and always static, so this would be obvious from the code.
///
/// Furthermore, once `const panic` stabilizes, we'll be able to make an invalid XmlName a compiler
/// error.
///
/// # Example
/// ```rust
///  use sdk_xml::encode::XmlWriter;
///  let mut s = String::new();
///  let mut doc = XmlWriter::new(&mut s);
///  let mut start_el = doc.start_el("Root")
///     .write_ns("http://example.com", None);
///  let mut start_tag = start_el.finish();
///  start_tag.data("hello");
///  start_tag.finish();
///  assert_eq!(s, "<Root xmlns=\"http://example.com\">hello</Root>");
/// ```
pub struct XmlWriter<'a> {
    doc: &'a mut String,
}

impl<'a> XmlWriter<'a> {
    pub fn new(doc: &'a mut String) -> Self {
        Self { doc }
    }
}

impl<'a> XmlWriter<'a> {
    pub fn start_el<'b, 'c>(&'c mut self, tag: &'b str) -> ElWriter<'c, 'b> {
        write_start(self.doc, tag);
        ElWriter::new(self.doc, tag)
    }
}

fn write_start(doc: &mut String, tag: &str) {
    doc.push('<');
    doc.push_str(tag);
}

pub struct ElWriter<'a, 'b> {
    start: &'b str,
    doc: Option<&'a mut String>,
}

impl<'a, 'b> ElWriter<'a, 'b> {
    fn new(doc: &'a mut String, start: &'b str) -> ElWriter<'a, 'b> {
        ElWriter {
            start,
            doc: Some(doc),
        }
    }

    pub fn write_attribute(&mut self, key: &str, value: &str) -> &mut Self {
        if let Some(doc) = self.doc.as_mut() {
            doc.push(' ');
            doc.push_str(key);
            doc.push_str("=\"");
            doc.push_str(&escape(value));
            doc.push('"');
        }
        self
    }

    pub fn write_ns(mut self, namespace: &str, prefix: Option<&str>) -> Self {
        if let Some(doc) = self.doc.as_mut() {
            doc.push_str(" xmlns");
            if let Some(prefix) = prefix {
                doc.push(':');
                doc.push_str(prefix);
            }
            doc.push_str("=\"");
            doc.push_str(&escape(namespace));
            doc.push('"');
        }
        self
    }

    pub fn finish(mut self) -> ScopeWriter<'a, 'b> {
        let doc = self
            .doc
            .take()
            .expect("ElWriter always holds the document until finished");
        doc.push('>');
        ScopeWriter {
            doc,
            start: self.start,
        }
    }
}

/// An element that was started and never finished is written as self-closing
impl Drop for ElWriter<'_, '_> {
    fn drop(&mut self) {
        if let Some(doc) = self.doc.take() {
            doc.push_str("/>");
        }
    }
}

/// Wrap the construction of a tag pair `<a></a>`
pub struct ScopeWriter<'a, 'b> {
    doc: &'a mut String,
    start: &'b str,
}

impl Drop for ScopeWriter<'_, '_> {
    fn drop(&mut self) {
        self.doc.push_str("</");
        self.doc.push_str(self.start);
        self.doc.push('>');
    }
}

impl ScopeWriter<'_, '_> {
    pub fn data(&mut self, data: &str) {
        self.doc.push_str(escape(data).as_ref());
    }

    pub fn finish(self) {
        // drop will be called which writes the closer to the document
    }

    pub fn start_el<'b, 'c>(&'c mut self, tag: &'b str) -> ElWriter<'c, 'b> {
        write_start(self.doc, tag);
        ElWriter::new(self.doc, tag)
    }
}
