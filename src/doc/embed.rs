//! Cross-document page embedding.
//!
//! A source page becomes drawable in the output document as a Form XObject:
//! its content streams are concatenated into the form body and its resource
//! dictionary is deep-copied across. Copies are cached per source object id,
//! so resources shared between pages (fonts, images) are carried over once
//! per output document no matter how many pages reference them.

use lopdf::{Dictionary, Document, Object, ObjectId, Stream};
use std::collections::HashMap;

use crate::error::{ComposeError, Result};
use crate::geometry::Size;

use super::{media_box_array, media_origin, page_size};

/// A drawable reference to a source page inside an output document.
#[derive(Debug, Clone, Copy)]
pub struct EmbeddedPage {
    /// Object id of the Form XObject in the output document.
    pub xobject: ObjectId,
    /// Source page extent (MediaBox width/height).
    pub size: Size,
    /// Source MediaBox origin; drawing compensates for non-zero origins so
    /// placements are always expressed from the page corner.
    pub origin: (f64, f64),
}

/// Embeds pages of one source document into one output document.
///
/// Holds the object-copy cache for the lifetime of the operation; create one
/// per compositor invocation.
pub struct Embedder<'s> {
    source: &'s Document,
    copied: HashMap<ObjectId, ObjectId>,
}

impl<'s> Embedder<'s> {
    /// Create an embedder for `source`.
    pub fn new(source: &'s Document) -> Self {
        Self {
            source,
            copied: HashMap::new(),
        }
    }

    /// Embed the source page `page_id` into `out` as a Form XObject.
    ///
    /// `page` is the 1-indexed page number, used for error context.
    ///
    /// # Errors
    ///
    /// Fails when the page has no usable MediaBox or its content streams
    /// cannot be resolved.
    pub fn embed(&mut self, out: &mut Document, page: u32, page_id: ObjectId) -> Result<EmbeddedPage> {
        let size = page_size(self.source, page, page_id)?;
        let origin = media_origin(self.source, page_id);
        let page_dict = self.source.get_dictionary(page_id)?;

        let body = self.page_content(page, page_dict)?;

        let mut form = Dictionary::new();
        form.set("Type", Object::Name(b"XObject".to_vec()));
        form.set("Subtype", Object::Name(b"Form".to_vec()));
        form.set("FormType", Object::Integer(1));
        form.set("BBox", Object::Array(media_box_array(self.source, page_id)));

        if let Ok(resources) = page_dict.get(b"Resources") {
            let resources = resources.clone();
            form.set("Resources", self.copy_deep(out, &resources)?);
        }

        let xobject = out.add_object(Stream::new(form, body));
        Ok(EmbeddedPage {
            xobject,
            size,
            origin,
        })
    }

    /// Concatenate a page's content streams into one decoded body.
    ///
    /// A stream that declares a filter must decode; injecting still-encoded
    /// bytes into the form body would corrupt the output page.
    fn page_content(&self, page: u32, page_dict: &Dictionary) -> Result<Vec<u8>> {
        let Ok(contents) = page_dict.get(b"Contents") else {
            return Ok(Vec::new());
        };

        let refs: Vec<ObjectId> = match contents {
            Object::Reference(id) => vec![*id],
            Object::Array(arr) => arr
                .iter()
                .filter_map(|obj| obj.as_reference().ok())
                .collect(),
            _ => Vec::new(),
        };

        let mut body = Vec::new();
        for id in refs {
            if let Ok(stream) = self.source.get_object(id).and_then(|o| o.as_stream()) {
                let content = if stream.dict.has(b"Filter") {
                    stream.decompressed_content().map_err(|e| {
                        ComposeError::malformed_page(
                            page,
                            format!("content stream failed to decode: {e}"),
                        )
                    })?
                } else {
                    stream.content.clone()
                };
                body.extend_from_slice(&content);
                body.push(b'\n');
            }
        }
        Ok(body)
    }

    /// Deep-copy an object graph from the source into `out`.
    ///
    /// References are rewritten to fresh output ids. The cache entry is
    /// reserved before the referenced object is copied, which both dedupes
    /// shared resources and breaks reference cycles.
    fn copy_deep(&mut self, out: &mut Document, obj: &Object) -> Result<Object> {
        Ok(match obj {
            Object::Reference(id) => {
                if let Some(&mapped) = self.copied.get(id) {
                    return Ok(Object::Reference(mapped));
                }
                let reserved = out.new_object_id();
                self.copied.insert(*id, reserved);
                let copied = match self.source.get_object(*id) {
                    Ok(referenced) => self.copy_deep(out, &referenced.clone())?,
                    Err(_) => Object::Null,
                };
                out.objects.insert(reserved, copied);
                Object::Reference(reserved)
            }
            Object::Dictionary(dict) => Object::Dictionary(self.copy_dict(out, dict)?),
            Object::Array(arr) => {
                let mut copied = Vec::with_capacity(arr.len());
                for item in arr {
                    copied.push(self.copy_deep(out, item)?);
                }
                Object::Array(copied)
            }
            Object::Stream(stream) => {
                let dict = self.copy_dict(out, &stream.dict)?;
                Object::Stream(Stream::new(dict, stream.content.clone()))
            }
            other => other.clone(),
        })
    }

    fn copy_dict(&mut self, out: &mut Document, dict: &Dictionary) -> Result<Dictionary> {
        let mut copied = Dictionary::new();
        for (key, value) in dict.iter() {
            copied.set(key.clone(), self.copy_deep(out, value)?);
        }
        Ok(copied)
    }
}
