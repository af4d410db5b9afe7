// Minimal MaxMind DB writer for tests.
//
// Produces files in the MaxMind DB 2.0 binary format (24-bit records, no
// data pointers) so the real `maxminddb` reader can be exercised without
// shipping MaxMind's test databases. Networks must not overlap.
//
// Included with `mod mmdb_writer;` by the test files that need it.

#![allow(dead_code)]

use std::net::IpAddr;
use std::path::{Path, PathBuf};

const DATA_SECTION_SEPARATOR: [u8; 16] = [0; 16];
const METADATA_START_MARKER: &[u8] = b"\xAB\xCD\xEFMaxMind.com";
const RECORD_SIZE: u16 = 24;

const TYPE_STRING: u8 = 2;
const TYPE_DOUBLE: u8 = 3;
const TYPE_UINT16: u8 = 5;
const TYPE_UINT32: u8 = 6;
const TYPE_MAP: u8 = 7;
const TYPE_UINT64: u8 = 9;
const TYPE_ARRAY: u8 = 11;
const TYPE_BOOL: u8 = 14;

/// A value in the data section.
#[derive(Debug, Clone, PartialEq)]
pub enum MmdbValue {
    Str(String),
    U16(u16),
    U32(u32),
    U64(u64),
    Double(f64),
    Bool(bool),
    Map(Vec<(String, MmdbValue)>),
    Array(Vec<MmdbValue>),
}

/// Shorthand for a string value.
pub fn text(value: &str) -> MmdbValue {
    MmdbValue::Str(value.to_string())
}

/// Shorthand for a map value; keys keep the given order.
pub fn map(entries: Vec<(&str, MmdbValue)>) -> MmdbValue {
    MmdbValue::Map(
        entries
            .into_iter()
            .map(|(key, value)| (key.to_string(), value))
            .collect(),
    )
}

/// `{"en": name}` as used for localized names.
pub fn names(name: &str) -> MmdbValue {
    map(vec![("en", text(name))])
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Record {
    Empty,
    Node(usize),
    Data(usize),
}

/// Builds one database file.
#[derive(Debug)]
pub struct MmdbWriter {
    database_type: String,
    ip_version: u16,
    build_epoch: u64,
    nodes: Vec<[Record; 2]>,
    data: Vec<MmdbValue>,
}

impl MmdbWriter {
    /// An IPv6 tree; IPv4 networks are stored under `::/96`.
    pub fn new(database_type: &str) -> Self {
        Self::with_ip_version(database_type, 6)
    }

    /// A tree holding IPv4 networks only.
    pub fn ipv4_only(database_type: &str) -> Self {
        Self::with_ip_version(database_type, 4)
    }

    fn with_ip_version(database_type: &str, ip_version: u16) -> Self {
        Self {
            database_type: database_type.to_string(),
            ip_version,
            build_epoch: 1_700_000_000,
            nodes: vec![[Record::Empty, Record::Empty]],
            data: Vec::new(),
        }
    }

    /// Stores `value` for every address in `cidr`, e.g. `81.2.69.128/26`.
    pub fn insert(mut self, cidr: &str, value: MmdbValue) -> Self {
        let (address, prefix) = cidr.split_once('/').expect("CIDR with prefix length");
        let address: IpAddr = address.parse().expect("valid network address");
        let prefix: usize = prefix.parse().expect("numeric prefix length");

        let bits = self.network_bits(address, prefix);
        self.data.push(value);
        let data_index = self.data.len() - 1;
        self.insert_bits(&bits, data_index);
        self
    }

    fn network_bits(&self, address: IpAddr, prefix: usize) -> Vec<bool> {
        match address {
            IpAddr::V4(v4) => {
                let value = u32::from(v4);
                let v4_bits = (0..prefix).map(|i| (value >> (31 - i)) & 1 == 1);
                if self.ip_version == 6 {
                    std::iter::repeat(false).take(96).chain(v4_bits).collect()
                } else {
                    v4_bits.collect()
                }
            }
            IpAddr::V6(v6) => {
                assert_eq!(self.ip_version, 6, "IPv6 network in an IPv4 tree");
                let value = u128::from(v6);
                (0..prefix).map(|i| (value >> (127 - i)) & 1 == 1).collect()
            }
        }
    }

    fn insert_bits(&mut self, bits: &[bool], data_index: usize) {
        let (last, path) = bits.split_last().expect("non-empty network prefix");
        let mut node = 0;
        for &bit in path {
            node = match self.nodes[node][usize::from(bit)] {
                Record::Node(next) => next,
                Record::Empty => {
                    self.nodes.push([Record::Empty, Record::Empty]);
                    let next = self.nodes.len() - 1;
                    self.nodes[node][usize::from(bit)] = Record::Node(next);
                    next
                }
                Record::Data(_) => panic!("overlapping networks are not supported"),
            };
        }
        assert_eq!(
            self.nodes[node][usize::from(*last)],
            Record::Empty,
            "overlapping networks are not supported"
        );
        self.nodes[node][usize::from(*last)] = Record::Data(data_index);
    }

    /// Encodes the whole file.
    pub fn to_bytes(&self) -> Vec<u8> {
        let node_count = self.nodes.len();

        let mut data_section = Vec::new();
        let mut offsets = Vec::with_capacity(self.data.len());
        for value in &self.data {
            offsets.push(data_section.len());
            encode(value, &mut data_section);
        }

        let mut out = Vec::new();
        for node in &self.nodes {
            for record in node {
                let value = match *record {
                    Record::Empty => node_count,
                    Record::Node(next) => next,
                    Record::Data(index) => {
                        node_count + DATA_SECTION_SEPARATOR.len() + offsets[index]
                    }
                };
                assert!(value < 1 << RECORD_SIZE, "record does not fit in 24 bits");
                out.extend_from_slice(&(value as u32).to_be_bytes()[1..]);
            }
        }
        out.extend_from_slice(&DATA_SECTION_SEPARATOR);
        out.extend_from_slice(&data_section);
        out.extend_from_slice(METADATA_START_MARKER);
        encode(&self.metadata(node_count), &mut out);
        out
    }

    fn metadata(&self, node_count: usize) -> MmdbValue {
        map(vec![
            ("binary_format_major_version", MmdbValue::U16(2)),
            ("binary_format_minor_version", MmdbValue::U16(0)),
            ("build_epoch", MmdbValue::U64(self.build_epoch)),
            ("database_type", text(&self.database_type)),
            ("description", names("Test database")),
            ("ip_version", MmdbValue::U16(self.ip_version)),
            ("languages", MmdbValue::Array(vec![text("en")])),
            ("node_count", MmdbValue::U32(node_count as u32)),
            ("record_size", MmdbValue::U16(RECORD_SIZE)),
        ])
    }

    /// Writes the file as `dir/file_name` and returns its path.
    pub fn write_to(&self, dir: &Path, file_name: &str) -> PathBuf {
        let path = dir.join(file_name);
        std::fs::write(&path, self.to_bytes()).expect("write test database");
        path
    }
}

fn encode(value: &MmdbValue, out: &mut Vec<u8>) {
    match value {
        MmdbValue::Str(s) => {
            control(out, TYPE_STRING, s.len());
            out.extend_from_slice(s.as_bytes());
        }
        MmdbValue::Double(d) => {
            control(out, TYPE_DOUBLE, 8);
            out.extend_from_slice(&d.to_be_bytes());
        }
        MmdbValue::U16(n) => unsigned(out, TYPE_UINT16, u64::from(*n)),
        MmdbValue::U32(n) => unsigned(out, TYPE_UINT32, u64::from(*n)),
        MmdbValue::U64(n) => unsigned(out, TYPE_UINT64, *n),
        MmdbValue::Bool(b) => control(out, TYPE_BOOL, usize::from(*b)),
        MmdbValue::Map(entries) => {
            control(out, TYPE_MAP, entries.len());
            for (key, value) in entries {
                encode(&MmdbValue::Str(key.clone()), out);
                encode(value, out);
            }
        }
        MmdbValue::Array(items) => {
            control(out, TYPE_ARRAY, items.len());
            for item in items {
                encode(item, out);
            }
        }
    }
}

/// Big-endian with leading zero bytes dropped.
fn unsigned(out: &mut Vec<u8>, type_num: u8, value: u64) {
    let bytes = value.to_be_bytes();
    let skip = bytes.iter().take_while(|b| **b == 0).count();
    control(out, type_num, bytes.len() - skip);
    out.extend_from_slice(&bytes[skip..]);
}

/// Control byte, extended type byte and size bytes of a value.
fn control(out: &mut Vec<u8>, type_num: u8, size: usize) {
    let (type_bits, extended) = if type_num <= TYPE_MAP {
        (type_num << 5, None)
    } else {
        (0, Some(type_num - TYPE_MAP))
    };

    let (size_bits, size_bytes): (u8, Vec<u8>) = if size < 29 {
        (size as u8, Vec::new())
    } else if size < 285 {
        (29, vec![(size - 29) as u8])
    } else if size < 65_821 {
        (30, ((size - 285) as u16).to_be_bytes().to_vec())
    } else {
        (31, ((size - 65_821) as u32).to_be_bytes()[1..].to_vec())
    };

    out.push(type_bits | size_bits);
    out.extend(extended);
    out.extend(size_bytes);
}

#[test]
fn test_control_byte_encodings() {
    let mut out = Vec::new();
    control(&mut out, TYPE_STRING, 3);
    assert_eq!(out, vec![0x43]);

    out.clear();
    control(&mut out, TYPE_BOOL, 1);
    assert_eq!(out, vec![0x01, 0x07]);

    out.clear();
    control(&mut out, TYPE_STRING, 300);
    assert_eq!(out, vec![0x5e, 0x00, 0x0f]);

    out.clear();
    unsigned(&mut out, TYPE_UINT32, 0x0102);
    assert_eq!(out, vec![0xc2, 0x01, 0x02]);
}
