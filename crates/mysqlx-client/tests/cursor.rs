//! Result-set behavior tests: paging, draining, and failure propagation.

#![allow(clippy::unwrap_used)]

use std::collections::VecDeque;

use bytes::Bytes;
use mysqlx_client::{Column, Error, Result, RowSet, RowSource};
use xproto::Scalar;

/// Vec-backed row source yielding pre-encoded numbered rows.
struct VecSource {
    columns: Vec<Column>,
    rows: VecDeque<Vec<Bytes>>,
}

impl VecSource {
    fn numbered(count: i64) -> Self {
        Self {
            columns: vec![Column::new("n")],
            rows: (0..count)
                .map(|i| vec![Scalar::Sint(i).encode_to_bytes()])
                .collect(),
        }
    }
}

impl RowSource for VecSource {
    fn read_next_row(&mut self) -> Result<Option<Vec<Bytes>>> {
        Ok(self.rows.pop_front())
    }

    fn load_column_metadata(&mut self) -> Result<Vec<Column>> {
        Ok(self.columns.clone())
    }
}

/// Source that fails with an IO error after yielding some rows.
struct FailingSource {
    good_rows: i64,
    yielded: i64,
}

impl RowSource for FailingSource {
    fn read_next_row(&mut self) -> Result<Option<Vec<Bytes>>> {
        if self.yielded == self.good_rows {
            return Err(Error::Io(std::io::Error::new(
                std::io::ErrorKind::ConnectionReset,
                "peer went away",
            )));
        }
        self.yielded += 1;
        Ok(Some(vec![Scalar::Sint(self.yielded).encode_to_bytes()]))
    }

    fn load_column_metadata(&mut self) -> Result<Vec<Column>> {
        Ok(vec![Column::new("n")])
    }
}

#[test]
fn advance_is_monotonic() {
    let mut set = RowSet::new(VecSource::numbered(45)).unwrap();
    let mut last_buffered = 0;
    let mut expected_position = 0;
    while set.advance().unwrap() {
        assert!(set.buffered_len() >= last_buffered);
        last_buffered = set.buffered_len();
        assert_eq!(set.position(), Some(expected_position));
        expected_position += 1;
    }
    assert_eq!(set.buffered_len(), 45);
}

#[test]
fn paging_never_overfetches() {
    let mut set = RowSet::new(VecSource::numbered(50)).unwrap();
    assert!(set.advance().unwrap());
    // Default page size is 20: first fetch buffers one page, no more.
    assert_eq!(set.page_size(), 20);
    assert_eq!(set.buffered_len(), 20);

    // Positions 1..19 come straight from the buffer, no fetch.
    for _ in 1..20 {
        assert!(set.advance().unwrap());
    }
    assert_eq!(set.buffered_len(), 20);

    assert!(set.advance().unwrap());
    assert_eq!(set.buffered_len(), 40);
}

#[test]
fn final_page_may_be_short() {
    let mut set = RowSet::new(VecSource::numbered(25)).unwrap();
    while set.advance().unwrap() {}
    assert_eq!(set.buffered_len(), 25);
    assert!(set.is_exhausted());
}

#[test]
fn drain_all_materializes_everything() {
    let mut set = RowSet::new(VecSource::numbered(33)).unwrap();
    set.drain_all().unwrap();
    assert_eq!(set.buffered_len(), 33);
    assert!(set.is_exhausted());
    // Position was before-first, so it restores to 0.
    assert_eq!(set.position(), Some(0));
    assert_eq!(set.read_field(0).unwrap(), &Scalar::Sint(0));
}

#[test]
fn drain_all_restores_prior_position() {
    let mut set = RowSet::new(VecSource::numbered(33)).unwrap();
    assert!(set.advance().unwrap());
    assert!(set.advance().unwrap());
    set.drain_all().unwrap();
    assert_eq!(set.position(), Some(1));
    assert_eq!(set.read_field(0).unwrap(), &Scalar::Sint(1));
    assert_eq!(set.buffered_len(), 33);
}

#[test]
fn discard_remaining_skips_buffering() {
    let mut set = RowSet::new(VecSource::numbered(100)).unwrap();
    assert!(set.advance().unwrap());
    assert_eq!(set.buffered_len(), 20);

    set.discard_remaining().unwrap();
    assert!(set.is_exhausted());
    assert_eq!(set.buffered_len(), 20);

    // Buffered rows stay readable; the stream itself is gone.
    assert_eq!(set.read_field(0).unwrap(), &Scalar::Sint(0));
    for _ in 1..20 {
        assert!(set.advance().unwrap());
    }
    assert!(!set.advance().unwrap());

    // Idempotent once exhausted.
    set.discard_remaining().unwrap();
}

#[test]
fn transport_error_propagates_mid_page() {
    let source = FailingSource {
        good_rows: 5,
        yielded: 0,
    };
    let mut set = RowSet::new(source).unwrap();
    let err = set.advance().unwrap_err();
    assert!(matches!(err, Error::Io(_)));
    assert!(!err.is_usage_error());
}

#[test]
fn malformed_field_payload_is_a_protocol_error() {
    struct GarbageSource;
    impl RowSource for GarbageSource {
        fn read_next_row(&mut self) -> Result<Option<Vec<Bytes>>> {
            Ok(Some(vec![Bytes::from_static(&[0xEE])]))
        }
        fn load_column_metadata(&mut self) -> Result<Vec<Column>> {
            Ok(vec![Column::new("n")])
        }
    }

    let mut set = RowSet::new(GarbageSource).unwrap();
    assert!(matches!(set.advance(), Err(Error::Protocol(_))));
}

#[test]
fn metadata_is_loaded_once() {
    struct CountingSource {
        inner: VecSource,
        metadata_loads: usize,
    }
    impl RowSource for CountingSource {
        fn read_next_row(&mut self) -> Result<Option<Vec<Bytes>>> {
            self.inner.read_next_row()
        }
        fn load_column_metadata(&mut self) -> Result<Vec<Column>> {
            self.metadata_loads += 1;
            assert_eq!(self.metadata_loads, 1, "metadata must load exactly once");
            self.inner.load_column_metadata()
        }
    }

    let source = CountingSource {
        inner: VecSource::numbered(3),
        metadata_loads: 0,
    };
    let mut set = RowSet::new(source).unwrap();
    set.drain_all().unwrap();
    assert_eq!(set.columns().len(), 1);
}

#[test]
fn row_values_decode_in_column_order() {
    struct WideSource {
        sent: bool,
    }
    impl RowSource for WideSource {
        fn read_next_row(&mut self) -> Result<Option<Vec<Bytes>>> {
            if self.sent {
                return Ok(None);
            }
            self.sent = true;
            Ok(Some(vec![
                Scalar::Null.encode_to_bytes(),
                Scalar::Bool(true).encode_to_bytes(),
                Scalar::Sint(-9).encode_to_bytes(),
                Scalar::Double(0.5).encode_to_bytes(),
                Scalar::from("doc").encode_to_bytes(),
                Scalar::from(&b"\x01\x02"[..]).encode_to_bytes(),
            ]))
        }
        fn load_column_metadata(&mut self) -> Result<Vec<Column>> {
            Ok(["a", "b", "c", "d", "e", "f"].map(Column::new).to_vec())
        }
    }

    let mut set = RowSet::new(WideSource { sent: false }).unwrap();
    assert!(set.advance().unwrap());
    assert!(set.read_field(0).unwrap().is_null());
    assert_eq!(set.read_field(1).unwrap().as_bool(), Some(true));
    assert_eq!(set.read_field(2).unwrap().as_i64(), Some(-9));
    assert_eq!(set.read_field(3).unwrap().as_f64(), Some(0.5));
    assert_eq!(set.read_field(4).unwrap().as_str(), Some("doc"));
    assert_eq!(set.read_field(5).unwrap().as_octets(), Some(&b"\x01\x02"[..]));
    assert!(matches!(set.read_field(6), Err(Error::OutOfRange)));
}
