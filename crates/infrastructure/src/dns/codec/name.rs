//! Domain name wire codec (RFC 1035 sections 3.1 and 4.1.4).
//!
//! Encoding always writes names in full; decoding follows compression
//! pointers anywhere in the message.

use dot_lookup_domain::DomainError;

/// Maximum wire length of a name, including length bytes and the root label.
pub const MAX_NAME_LEN: usize = 255;
pub const MAX_LABEL_LEN: usize = 63;

const POINTER_TAG: u8 = 0b1100_0000;
const LABEL_TYPE_MASK: u8 = 0b1100_0000;

/// Appends the uncompressed wire form of `name` to `buf`.
///
/// Each `.`-separated piece becomes one length-prefixed label and a zero byte
/// terminates the name. Nothing is validated here; see [`validate_name`].
pub fn encode_name_into(buf: &mut Vec<u8>, name: &str) {
    for label in name.split('.') {
        buf.push(label.len() as u8);
        buf.extend_from_slice(label.as_bytes());
    }
    buf.push(0);
}

pub fn encode_name(name: &str) -> Vec<u8> {
    let mut buf = Vec::with_capacity(name.len() + 2);
    encode_name_into(&mut buf, name);
    buf
}

/// Checks that `name` can be encoded as a query name and returns it without
/// its trailing dot, if it had one.
pub fn validate_name(name: &str) -> Result<&str, DomainError> {
    let trimmed = name.strip_suffix('.').unwrap_or(name);

    if trimmed.is_empty() {
        return Err(DomainError::InvalidDomainName(format!(
            "'{}' has no labels",
            name
        )));
    }

    let mut wire_len = 1;
    for label in trimmed.split('.') {
        if label.is_empty() {
            return Err(DomainError::InvalidDomainName(format!(
                "'{}' contains an empty label",
                name
            )));
        }
        if label.len() > MAX_LABEL_LEN {
            return Err(DomainError::InvalidDomainName(format!(
                "label '{}' is {} bytes (max {})",
                label,
                label.len(),
                MAX_LABEL_LEN
            )));
        }
        wire_len += label.len() + 1;
    }

    if wire_len > MAX_NAME_LEN {
        return Err(DomainError::InvalidDomainName(format!(
            "'{}' is {} bytes on the wire (max {})",
            name, wire_len, MAX_NAME_LEN
        )));
    }

    Ok(trimmed)
}

/// Decodes the name starting at `start` in `message`.
///
/// Returns the dotted name (no trailing dot, empty for the root) and the
/// number of bytes the name occupies at `start`: up to and including the
/// terminating zero byte, or the two bytes of the first compression pointer.
///
/// Pointers must refer to an offset before the pointer itself, and the
/// decoded name may not exceed [`MAX_NAME_LEN`]; together these rule out
/// pointer loops.
pub fn decode_name(message: &[u8], start: usize) -> Result<(String, usize), DomainError> {
    let mut name = String::new();
    let mut pos = start;
    let mut consumed: Option<usize> = None;
    let mut wire_len = 0usize;

    loop {
        let len = *message.get(pos).ok_or_else(|| out_of_bounds(start, pos))?;

        match len & LABEL_TYPE_MASK {
            0 if len == 0 => {
                // after a jump `pos` may sit before `start`
                let consumed = consumed.unwrap_or_else(|| pos + 1 - start);
                return Ok((name, consumed));
            }
            0 => {
                let len = len as usize;
                let label = message
                    .get(pos + 1..pos + 1 + len)
                    .ok_or_else(|| out_of_bounds(start, pos))?;

                wire_len += len + 1;
                if wire_len + 1 > MAX_NAME_LEN {
                    return Err(DomainError::MalformedResponse(format!(
                        "name at offset {} exceeds {} bytes",
                        start, MAX_NAME_LEN
                    )));
                }

                if !name.is_empty() {
                    name.push('.');
                }
                name.push_str(&String::from_utf8_lossy(label));
                pos += 1 + len;
            }
            POINTER_TAG => {
                let low = *message
                    .get(pos + 1)
                    .ok_or_else(|| out_of_bounds(start, pos))?;
                let target = (((len & !POINTER_TAG) as usize) << 8) | low as usize;

                if target >= pos {
                    return Err(DomainError::MalformedResponse(format!(
                        "compression pointer at offset {} points forward to {}",
                        pos, target
                    )));
                }

                if consumed.is_none() {
                    consumed = Some(pos + 2 - start);
                }
                pos = target;
            }
            _ => {
                return Err(DomainError::MalformedResponse(format!(
                    "unsupported label type 0x{:02x} at offset {}",
                    len, pos
                )));
            }
        }
    }
}

fn out_of_bounds(start: usize, pos: usize) -> DomainError {
    DomainError::MalformedResponse(format!(
        "name at offset {} runs past end of message (offset {})",
        start, pos
    ))
}
