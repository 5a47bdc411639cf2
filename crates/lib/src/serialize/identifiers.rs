//! Identifier types stored as text: UUIDs and URLs.

use url::Url;
use uuid::Uuid;

use super::{TypeDescriptor, TypedSerializer, require_scalar};
use crate::{ConfigNode, ConversionError, Result, Scalar};

/// Converts between text nodes and [`Uuid`]s.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidSerializer;

impl TypedSerializer for UuidSerializer {
    type Value = Uuid;

    fn deserialize(&self, _requested: &TypeDescriptor, node: &ConfigNode) -> Result<Uuid> {
        let text = require_scalar(node, "uuid").map(Scalar::as_string)?;
        Uuid::parse_str(text.trim()).map_err(|err| {
            ConversionError::invalid_with_source(format!("`{text}` is not a valid UUID"), err)
        })
    }

    fn serialize(&self, _requested: &TypeDescriptor, value: Uuid, node: &mut ConfigNode) -> Result<()> {
        node.set(value.hyphenated().to_string());
        Ok(())
    }
}

/// Converts between text nodes and absolute [`Url`]s.
///
/// Reading normalizes the URL, so `http://example.com` reads back as
/// `http://example.com/`.
#[derive(Debug, Clone, Copy, Default)]
pub struct UrlSerializer;

impl TypedSerializer for UrlSerializer {
    type Value = Url;

    fn deserialize(&self, _requested: &TypeDescriptor, node: &ConfigNode) -> Result<Url> {
        let text = require_scalar(node, "url").map(Scalar::as_string)?;
        Url::parse(text.trim()).map_err(|err| {
            ConversionError::invalid_with_source(format!("`{text}` is not a valid URL"), err)
        })
    }

    fn serialize(&self, _requested: &TypeDescriptor, value: Url, node: &mut ConfigNode) -> Result<()> {
        node.set(String::from(value));
        Ok(())
    }
}
