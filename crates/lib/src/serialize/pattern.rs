//! Regular expression patterns.

use regex::Regex;

use super::{TypeDescriptor, TypedSerializer, require_scalar};
use crate::{ConfigNode, ConversionError, Result, Scalar};

/// Converts between text nodes and compiled [`Regex`] patterns.
///
/// Reading compiles the node's text with the default regex syntax; a pattern
/// that does not compile is an invalid value, with the [`regex::Error`] kept
/// as the error's source. Writing stores the pattern's source text, so a
/// written pattern reads back to an equivalent one.
#[derive(Debug, Clone, Copy, Default)]
pub struct PatternSerializer;

impl TypedSerializer for PatternSerializer {
    type Value = Regex;

    fn deserialize(&self, _requested: &TypeDescriptor, node: &ConfigNode) -> Result<Regex> {
        let source = require_scalar(node, "pattern").map(Scalar::as_string)?;
        Regex::new(&source).map_err(|err| {
            ConversionError::invalid_with_source(format!("`{source}` is not a valid pattern"), err)
        })
    }

    fn serialize(&self, _requested: &TypeDescriptor, value: Regex, node: &mut ConfigNode) -> Result<()> {
        node.set(value.as_str());
        Ok(())
    }
}
