//! Binary layout of stored vulnerability descriptions
//!
//! ```text
//! 0..4   magic "VDDS"
//! 4..6   schema major (u16 LE)
//! 6..8   schema minor (u16 LE)
//! 8..    fields in fixed order; strings are u32 LE length + UTF-8 bytes
//!        (u32::MAX marks an absent string), the score is an f32 LE
//! ```
//!
//! Readers accept any minor revision of a known major and ignore bytes a
//! newer minor appends after the last known field.

use vds_errors::FeedError;
use vds_types::{CvssMetrics, VulnerabilityDescription};

const MAGIC: [u8; 4] = *b"VDDS";
const HEADER_LEN: usize = 8;
const ABSENT: u32 = u32::MAX;

/// Schema revision written in every record header
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct SchemaVersion {
    pub major: u16,
    pub minor: u16,
}

impl SchemaVersion {
    pub const CURRENT: Self = Self { major: 1, minor: 0 };

    #[must_use]
    pub const fn new(major: u16, minor: u16) -> Self {
        Self { major, minor }
    }

    #[must_use]
    pub fn to_header_bytes(self) -> [u8; HEADER_LEN] {
        let mut bytes = [0u8; HEADER_LEN];
        bytes[0..4].copy_from_slice(&MAGIC);
        bytes[4..6].copy_from_slice(&self.major.to_le_bytes());
        bytes[6..8].copy_from_slice(&self.minor.to_le_bytes());
        bytes
    }

    fn from_header_bytes(cve_id: &str, bytes: &[u8]) -> Result<Self, FeedError> {
        if bytes.len() < HEADER_LEN {
            return Err(decode_error(cve_id, "header too short"));
        }
        if bytes[0..4] != MAGIC {
            return Err(decode_error(cve_id, "invalid magic bytes"));
        }

        let major = u16::from_le_bytes([bytes[4], bytes[5]]);
        let minor = u16::from_le_bytes([bytes[6], bytes[7]]);
        Ok(Self::new(major, minor))
    }
}

fn decode_error(cve_id: &str, message: impl Into<String>) -> FeedError {
    FeedError::DecodeError {
        cve_id: cve_id.to_string(),
        message: message.into(),
    }
}

/// Encode a record with the current schema version
///
/// # Errors
///
/// Returns `EncodeError` if a string field does not fit a `u32` length
/// prefix.
pub fn encode(record: &VulnerabilityDescription) -> Result<Vec<u8>, FeedError> {
    let mut out = Vec::with_capacity(256);
    out.extend_from_slice(&SchemaVersion::CURRENT.to_header_bytes());

    let cvss = &record.cvss;
    put_str(&mut out, "access_complexity", cvss.access_complexity.as_deref())?;
    put_str(&mut out, "assigner_short_name", record.assigner_short_name.as_deref())?;
    put_str(&mut out, "attack_vector", cvss.attack_vector.as_deref())?;
    put_str(&mut out, "authentication", cvss.authentication.as_deref())?;
    put_str(&mut out, "availability_impact", cvss.availability_impact.as_deref())?;
    put_str(&mut out, "classification", record.classification.as_deref())?;
    put_str(&mut out, "confidentiality_impact", cvss.confidentiality_impact.as_deref())?;
    put_str(&mut out, "cwe_id", record.cwe_id.as_deref())?;
    put_str(&mut out, "date_published", record.date_published.as_deref())?;
    put_str(&mut out, "date_updated", record.date_updated.as_deref())?;
    put_str(&mut out, "description", record.description.as_deref())?;
    put_str(&mut out, "integrity_impact", cvss.integrity_impact.as_deref())?;
    put_str(&mut out, "privileges_required", cvss.privileges_required.as_deref())?;
    put_str(&mut out, "reference", record.reference.as_deref())?;
    put_str(&mut out, "scope", cvss.scope.as_deref())?;
    out.extend_from_slice(&record.score_base.to_le_bytes());
    put_str(&mut out, "score_version", record.score_version.as_deref())?;
    put_str(&mut out, "severity", record.severity.as_deref())?;
    put_str(&mut out, "user_interaction", cvss.user_interaction.as_deref())?;
    Ok(out)
}

fn put_str(out: &mut Vec<u8>, field: &str, value: Option<&str>) -> Result<(), FeedError> {
    match value {
        Some(s) => {
            out.extend_from_slice(&length_prefix(field, s.len())?.to_le_bytes());
            out.extend_from_slice(s.as_bytes());
        }
        None => out.extend_from_slice(&ABSENT.to_le_bytes()),
    }
    Ok(())
}

/// `u32::MAX` is reserved for "absent"
fn length_prefix(field: &str, len: usize) -> Result<u32, FeedError> {
    u32::try_from(len)
        .ok()
        .filter(|&prefix| prefix != ABSENT)
        .ok_or_else(|| FeedError::EncodeError {
            message: format!("{field} is {len} bytes, limit is {} bytes", ABSENT - 1),
        })
}

/// Decode stored bytes into an owned record
///
/// # Errors
///
/// Returns `UnsupportedSchema` for an unknown major version and
/// `DecodeError` for truncated input, invalid UTF-8, or trailing bytes
/// under the current minor version.
pub fn decode(cve_id: &str, bytes: &[u8]) -> Result<VulnerabilityDescription, FeedError> {
    let version = SchemaVersion::from_header_bytes(cve_id, bytes)?;
    if version.major != SchemaVersion::CURRENT.major {
        return Err(FeedError::UnsupportedSchema {
            major: version.major,
            minor: version.minor,
        });
    }

    let mut reader = Reader {
        cve_id,
        buf: bytes,
        pos: HEADER_LEN,
    };

    let access_complexity = reader.string()?;
    let assigner_short_name = reader.string()?;
    let attack_vector = reader.string()?;
    let authentication = reader.string()?;
    let availability_impact = reader.string()?;
    let classification = reader.string()?;
    let confidentiality_impact = reader.string()?;
    let cwe_id = reader.string()?;
    let date_published = reader.string()?;
    let date_updated = reader.string()?;
    let description = reader.string()?;
    let integrity_impact = reader.string()?;
    let privileges_required = reader.string()?;
    let reference = reader.string()?;
    let scope = reader.string()?;
    let score_base = reader.f32()?;
    let score_version = reader.string()?;
    let severity = reader.string()?;
    let user_interaction = reader.string()?;

    if reader.remaining() > 0 && version.minor <= SchemaVersion::CURRENT.minor {
        return Err(decode_error(
            cve_id,
            format!("{} trailing bytes", reader.remaining()),
        ));
    }

    Ok(VulnerabilityDescription {
        assigner_short_name,
        classification,
        cwe_id,
        date_published,
        date_updated,
        description,
        reference,
        score_base,
        score_version,
        severity,
        cvss: CvssMetrics {
            access_complexity,
            attack_vector,
            authentication,
            availability_impact,
            confidentiality_impact,
            integrity_impact,
            privileges_required,
            scope,
            user_interaction,
        },
    })
}

struct Reader<'a> {
    cve_id: &'a str,
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    fn take(&mut self, len: usize) -> Result<&'a [u8], FeedError> {
        if self.remaining() < len {
            return Err(decode_error(
                self.cve_id,
                format!("unexpected end of record at offset {}", self.pos),
            ));
        }
        let slice = &self.buf[self.pos..self.pos + len];
        self.pos += len;
        Ok(slice)
    }

    fn u32(&mut self) -> Result<u32, FeedError> {
        let bytes = self.take(4)?;
        Ok(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    fn f32(&mut self) -> Result<f32, FeedError> {
        let bytes = self.take(4)?;
        Ok(f32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    fn string(&mut self) -> Result<Option<String>, FeedError> {
        let len = self.u32()?;
        if len == ABSENT {
            return Ok(None);
        }
        let offset = self.pos;
        let bytes = self.take(len as usize)?;
        let value = std::str::from_utf8(bytes).map_err(|e| {
            decode_error(self.cve_id, format!("invalid UTF-8 at offset {offset}: {e}"))
        })?;
        Ok(Some(value.to_string()))
    }
}
