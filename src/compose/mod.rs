//! The compositors.
//!
//! Each submodule implements one layout operation over the shared model:
//! given source content of known dimensions and a target canvas of known
//! dimensions, compute a placement (origin + uniform scale) under an
//! explicit policy, and build a new output document. Source documents are
//! never mutated; every operation returns a freshly built document for the
//! caller to serialize.

pub mod fit;
pub mod nup;
pub mod paginate;
pub mod stack;
pub mod text;

/// Substitute `{page}` / `{total}` tokens in a label template.
pub(crate) fn substitute_tokens(template: &str, page: u32, total: usize) -> String {
    template
        .replace("{page}", &page.to_string())
        .replace("{total}", &total.to_string())
}
