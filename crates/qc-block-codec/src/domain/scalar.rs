//! Field-slot helpers shared by the header and transaction codecs.
//!
//! Numeric slots are big-endian unsigned integers. Fixed-width slots are
//! left-zero-padded on decode and written at exactly their width; minimal
//! slots drop leading zero bytes, with zero written as the empty string.

use super::errors::CodecError;
use primitive_types::U256;
use rlp::{PayloadInfo, Rlp};

/// Borrow the byte string at `index` of an RLP list.
pub(crate) fn item_bytes<'a>(
    list: &Rlp<'a>,
    index: usize,
    field: &'static str,
) -> Result<&'a [u8], CodecError> {
    let item = list.at(index)?;
    if !item.is_data() {
        return Err(CodecError::MalformedStructure(format!(
            "{field} must be a byte string"
        )));
    }
    Ok(item.data()?)
}

/// Check that `bytes` holds exactly one RLP item with nothing after it.
pub(crate) fn expect_single_item(bytes: &[u8], what: &str) -> Result<(), CodecError> {
    let total = PayloadInfo::from(bytes)?.total();
    if total != bytes.len() {
        return Err(CodecError::MalformedStructure(format!(
            "{what} is {total} bytes but input has {}",
            bytes.len()
        )));
    }
    Ok(())
}

/// Split an RLP list into the raw encodings of its items.
///
/// Every item header is parsed and the items must end exactly at the end of
/// the list payload; a truncated or overlong tail is `MalformedStructure`.
pub(crate) fn list_items<'a>(list: &Rlp<'a>, what: &str) -> Result<Vec<&'a [u8]>, CodecError> {
    if !list.is_list() {
        return Err(CodecError::MalformedStructure(format!(
            "expected {what} as RLP list"
        )));
    }
    let raw = list.as_raw();
    let info = PayloadInfo::from(raw)?;
    if info.total() > raw.len() {
        return Err(CodecError::MalformedStructure(format!("truncated {what}")));
    }
    let payload = &raw[info.header_len..info.total()];

    let mut items = Vec::new();
    let mut offset = 0;
    while offset < payload.len() {
        let rest = &payload[offset..];
        let total = PayloadInfo::from(rest)
            .map_err(|e| {
                CodecError::MalformedStructure(format!("{what} item {}: {e}", items.len()))
            })?
            .total();
        if total > rest.len() {
            return Err(CodecError::MalformedStructure(format!(
                "{what} item {} overruns the list",
                items.len()
            )));
        }
        items.push(&rest[..total]);
        offset += total;
    }
    Ok(items)
}

/// Check that `list` is an RLP list of exactly `arity` well-formed items.
pub(crate) fn expect_list(list: &Rlp<'_>, arity: usize, what: &str) -> Result<(), CodecError> {
    let count = list_items(list, what)?.len();
    if count != arity {
        return Err(CodecError::MalformedStructure(format!(
            "{what} must have {arity} fields, got {count}"
        )));
    }
    Ok(())
}

pub(crate) fn decode_u256(bytes: &[u8], field: &'static str) -> Result<U256, CodecError> {
    if bytes.len() > 32 {
        return Err(CodecError::FieldTooLarge {
            field,
            len: bytes.len(),
            max: 32,
        });
    }
    Ok(U256::from_big_endian(bytes))
}

pub(crate) fn decode_u64(bytes: &[u8], field: &'static str) -> Result<u64, CodecError> {
    let padded = decode_fixed::<8>(bytes, field)?;
    Ok(u64::from_be_bytes(padded))
}

/// Right-align `bytes` into an `N`-byte buffer.
pub(crate) fn decode_fixed<const N: usize>(
    bytes: &[u8],
    field: &'static str,
) -> Result<[u8; N], CodecError> {
    if bytes.len() > N {
        return Err(CodecError::FieldTooLarge {
            field,
            len: bytes.len(),
            max: N,
        });
    }
    let mut out = [0u8; N];
    out[N - bytes.len()..].copy_from_slice(bytes);
    Ok(out)
}

pub(crate) fn trim_leading_zeros(bytes: &[u8]) -> &[u8] {
    let start = bytes.iter().position(|&b| b != 0).unwrap_or(bytes.len());
    &bytes[start..]
}

pub(crate) fn encode_u256(value: &U256) -> Vec<u8> {
    let mut buf = [0u8; 32];
    value.to_big_endian(&mut buf);
    trim_leading_zeros(&buf).to_vec()
}

pub(crate) fn encode_u64(value: u64) -> Vec<u8> {
    trim_leading_zeros(&value.to_be_bytes()).to_vec()
}
