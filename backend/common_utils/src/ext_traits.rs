//! This module holds traits for extending functionalities for existing datatypes
//! & inbuilt datatypes.

use error_stack::ResultExt;
use serde::{Deserialize, Serialize};

use crate::errors::{CustomResult, ParsingError};

/// Encode interface
pub trait Encode<'e>
where
    Self: 'e + std::fmt::Debug,
{
    /// Converting `Self` into a serde_json::Value
    fn encode_to_value(&'e self) -> CustomResult<serde_json::Value, ParsingError>
    where
        Self: Serialize;
}

impl<'e, A> Encode<'e> for A
where
    Self: 'e + std::fmt::Debug,
{
    fn encode_to_value(&'e self) -> CustomResult<serde_json::Value, ParsingError>
    where
        Self: Serialize,
    {
        serde_json::to_value(self)
            .change_context(ParsingError::EncodeError("json-value"))
            .attach_printable_lazy(|| format!("Unable to convert {self:?} to a value"))
    }
}

/// Extending functionalities of `bytes`
pub trait BytesExt {
    /// Convert `bytes::Bytes` into type `<T>` using `serde::Deserialize`
    fn parse_struct<'de, T>(
        &'de self,
        type_name: &'static str,
    ) -> CustomResult<T, ParsingError>
    where
        T: Deserialize<'de>;
}

impl BytesExt for [u8] {
    fn parse_struct<'de, T>(
        &'de self,
        type_name: &'static str,
    ) -> CustomResult<T, ParsingError>
    where
        T: Deserialize<'de>,
    {
        // Some upstreams prefix their JSON with a UTF-8 BOM
        let bytes = self.strip_prefix(&[0xEF, 0xBB, 0xBF]).unwrap_or(self);
        serde_json::from_slice(bytes)
            .change_context(ParsingError::StructParseFailure(type_name))
            .attach_printable_lazy(|| {
                format!("Unable to parse {type_name} from {} bytes", self.len())
            })
    }
}
