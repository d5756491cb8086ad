//! This module contains the [`Metadata`] type, the decoded form of a contract's
//! metadata trailer.

pub mod field;

use indexmap::IndexMap;
use serde::{ser::SerializeMap, Serialize, Serializer};

use crate::{
    constant::{CBOR_FIELD, IPFS_FIELD, RESERVED_FIELDS, SOLC_VERSION_FIELD},
    metadata::field::Field,
};

/// The raw trailer, as it appears in the `cbor` field of the [`Metadata`].
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct CborTrailer {
    /// The hex encoding of the trailer bytes.
    bytes: String,

    /// The length of the trailer in bytes.
    length: usize,
}

impl CborTrailer {
    /// Constructs a new raw trailer description from the hex-encoded `bytes`
    /// and the byte `length` that they encode.
    #[must_use]
    pub fn new(bytes: impl Into<String>, length: usize) -> Self {
        let bytes = bytes.into();
        Self { bytes, length }
    }

    /// Gets the hex encoding of the trailer bytes.
    #[must_use]
    pub fn bytes(&self) -> &str {
        &self.bytes
    }

    /// Gets the length of the trailer in bytes.
    #[must_use]
    pub fn length(&self) -> usize {
        self.length
    }
}

/// The decoded contents of a contract's metadata trailer.
///
/// # Output Fields
///
/// - `cbor` is always present and describes the raw trailer.
/// - `ipfs` is present if the trailer has an `ipfs` entry, and holds the
///   base-58 encoding of the multihash found there.
/// - `solcVersion` is present if the trailer has a `solc` entry, and holds the
///   version components joined with `.`.
/// - Every other entry of the trailer appears under its own key, with its value
///   encoded as hex, in the order the entries were found in the trailer.
///   Entries named `cbor` or `solcVersion` are only reachable through
///   [`Metadata::field`], as the output fields of those names take their
///   place.
///
/// The [`Serialize`] implementation writes these fields in that order, giving
/// a JSON object such as:
///
/// ```json
/// {
///   "cbor": { "bytes": "0xa264…0811", "length": 51 },
///   "ipfs": "Qmcopji18H4MppSeHA5DHzMJAamZTW6qZ2huju4rd6VkoV",
///   "solcVersion": "0.8.17"
/// }
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Metadata {
    cbor:         CborTrailer,
    ipfs:         Option<String>,
    solc_version: Option<String>,
    fields:       IndexMap<String, String>,
}

impl Metadata {
    /// Builds the metadata for the raw trailer `cbor` from its interpreted
    /// `fields`.
    ///
    /// The decoder never produces the same field twice. If a hand-built list of
    /// `fields` does, the last occurrence wins.
    #[must_use]
    pub fn new(cbor: CborTrailer, fields: impl IntoIterator<Item = Field>) -> Self {
        let mut ipfs = None;
        let mut solc_version = None;
        let mut others = IndexMap::new();

        for field in fields {
            match field {
                Field::Ipfs(cid) => ipfs = Some(cid),
                Field::SolcVersion(version) => solc_version = Some(version),
                Field::Other { key, value } => {
                    others.insert(key, value);
                }
            }
        }

        Self {
            cbor,
            ipfs,
            solc_version,
            fields: others,
        }
    }

    /// Gets the description of the raw trailer.
    #[must_use]
    pub fn cbor(&self) -> &CborTrailer {
        &self.cbor
    }

    /// Gets the base-58 encoded IPFS content identifier, if the trailer has
    /// one.
    #[must_use]
    pub fn ipfs(&self) -> Option<&str> {
        self.ipfs.as_deref()
    }

    /// Gets the version of the compiler that produced the bytecode, if the
    /// trailer records it.
    #[must_use]
    pub fn solc_version(&self) -> Option<&str> {
        self.solc_version.as_deref()
    }

    /// Gets the hex-encoded value of the unrecognised trailer entry `key`, if
    /// it exists.
    #[must_use]
    pub fn field(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    /// Gets the unrecognised trailer entries, in the order they were found.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Gets the unrecognised entries that do not collide with an output field.
    fn passthrough(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields().filter(|(key, _)| !RESERVED_FIELDS.contains(key))
    }
}

impl Serialize for Metadata {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let entries = 1
            + usize::from(self.ipfs.is_some())
            + usize::from(self.solc_version.is_some())
            + self.passthrough().count();
        let mut map = serializer.serialize_map(Some(entries))?;

        map.serialize_entry(CBOR_FIELD, &self.cbor)?;
        if let Some(ipfs) = &self.ipfs {
            map.serialize_entry(IPFS_FIELD, ipfs)?;
        }
        if let Some(version) = &self.solc_version {
            map.serialize_entry(SOLC_VERSION_FIELD, version)?;
        }
        for (key, value) in self.passthrough() {
            map.serialize_entry(key, value)?;
        }

        map.end()
    }
}

#[cfg(test)]
mod test {
    use crate::metadata::{field::Field, CborTrailer, Metadata};

    fn sample() -> Metadata {
        Metadata::new(
            CborTrailer::new("0xa0", 1),
            [
                Field::Other {
                    key:   "zeta".into(),
                    value: "0x01".into(),
                },
                Field::SolcVersion("0.8.9".into()),
                Field::Other {
                    key:   "alpha".into(),
                    value: "0x02".into(),
                },
                Field::Ipfs("QmHash".into()),
            ],
        )
    }

    #[test]
    fn exposes_fields_through_accessors() {
        let metadata = sample();

        assert_eq!(metadata.cbor().bytes(), "0xa0");
        assert_eq!(metadata.cbor().length(), 1);
        assert_eq!(metadata.ipfs(), Some("QmHash"));
        assert_eq!(metadata.solc_version(), Some("0.8.9"));
        assert_eq!(metadata.field("zeta"), Some("0x01"));
        assert_eq!(metadata.field("ipfs"), None);
        assert_eq!(
            metadata.fields().collect::<Vec<_>>(),
            vec![("zeta", "0x01"), ("alpha", "0x02")]
        );
    }

    #[test]
    fn serializes_with_cbor_first_and_entries_in_order() -> anyhow::Result<()> {
        let json = serde_json::to_string(&sample())?;

        assert_eq!(
            json,
            r#"{"cbor":{"bytes":"0xa0","length":1},"ipfs":"QmHash","solcVersion":"0.8.9","zeta":"0x01","alpha":"0x02"}"#
        );

        Ok(())
    }

    #[test]
    fn never_serializes_entries_over_output_fields() -> anyhow::Result<()> {
        let metadata = Metadata::new(
            CborTrailer::new("0xa0", 1),
            [
                Field::Other {
                    key:   "cbor".into(),
                    value: "0x01".into(),
                },
                Field::Other {
                    key:   "solcVersion".into(),
                    value: "0x02".into(),
                },
                Field::Other {
                    key:   "foo".into(),
                    value: "0x03".into(),
                },
            ],
        );

        assert_eq!(metadata.field("cbor"), Some("0x01"));
        assert_eq!(
            serde_json::to_string(&metadata)?,
            r#"{"cbor":{"bytes":"0xa0","length":1},"foo":"0x03"}"#
        );

        Ok(())
    }

    #[test]
    fn omits_absent_well_known_fields() -> anyhow::Result<()> {
        let metadata = Metadata::new(CborTrailer::new("0xa0", 1), Vec::<Field>::new());
        let json = serde_json::to_value(&metadata)?;

        assert_eq!(
            json,
            serde_json::json!({ "cbor": { "bytes": "0xa0", "length": 1 } })
        );

        Ok(())
    }
}
