// Rowkey codec tests
// Count-prefixed encoding, exact sizing, and the decode capacity guard.

use rowkey_engine::{Error, MAX_ROWKEY, MIN_ROWKEY, Rowkey, RowkeyMut, Value};

fn sample() -> [Value<'static>; 6] {
    [
        Value::Int(-42),
        Value::Varchar(b"banana"),
        Value::Double(3.5),
        Value::Null,
        Value::PreciseDateTime(1_700_000_000_123_456),
        Value::Bool(false),
    ]
}

// =============================================================================
// Test 1: Serialize then deserialize gives the same key
// =============================================================================
#[test]
fn roundtrip_element_by_element() {
    let values = sample();
    let key = Rowkey::new(&values);
    let size = key.serialized_size();

    let mut buf = vec![0u8; size];
    assert_eq!(key.serialize(&mut buf), Ok(size));

    let mut slots = [Value::Null; 6];
    let mut decoded = RowkeyMut::new(&mut slots);
    assert_eq!(decoded.deserialize(&buf), Ok(size));
    assert_eq!(decoded.count(), values.len());
    assert_eq!(decoded.as_rowkey().values(), &values[..]);
}

// =============================================================================
// Test 2: serialized_size is exact, byte for byte
// =============================================================================
#[test]
fn serialized_size_is_exact() {
    let values = sample();
    let key = Rowkey::new(&values);
    let size = key.serialized_size();

    let mut roomy = vec![0xEEu8; size + 8];
    assert_eq!(key.serialize(&mut roomy), Ok(size));
    assert!(roomy[size..].iter().all(|&b| b == 0xEE));

    let mut tight = vec![0u8; size - 1];
    assert!(matches!(key.serialize(&mut tight), Err(Error::BufferTooSmall { .. })));
}

// =============================================================================
// Test 3: Sentinel rowkeys survive the wire
// =============================================================================
#[test]
fn sentinels_roundtrip() {
    for sentinel in [&MIN_ROWKEY, &MAX_ROWKEY] {
        let bytes = sentinel.to_bytes().unwrap();
        let mut slots = [Value::Null; 1];
        let mut decoded = RowkeyMut::new(&mut slots);
        decoded.deserialize(&bytes).unwrap();
        assert_eq!(decoded.as_rowkey(), *sentinel);
        assert_eq!(decoded.as_rowkey().is_min_row(), sentinel.is_min_row());
    }
}

// =============================================================================
// Test 4: Count above capacity is rejected, count left unchanged
// =============================================================================
#[test]
fn capacity_guard() {
    let values = sample();
    let bytes = Rowkey::new(&values).to_bytes().unwrap();

    let mut slots = [Value::Int(0); 5];
    let mut target = RowkeyMut::with_count(&mut slots, 2).unwrap();
    assert_eq!(
        target.deserialize(&bytes),
        Err(Error::CapacityExceeded {
            count: 6,
            capacity: 5
        })
    );
    assert_eq!(target.count(), 2);
    assert_eq!(target.as_rowkey().values(), &[Value::Int(0), Value::Int(0)]);
}

// =============================================================================
// Test 5: Input cut mid-element is TruncatedInput
// =============================================================================
#[test]
fn truncated_input() {
    let values = sample();
    let bytes = Rowkey::new(&values).to_bytes().unwrap();

    for cut in 1..bytes.len() {
        let mut slots = [Value::Null; 6];
        let mut target = RowkeyMut::with_count(&mut slots, 0).unwrap();
        assert_eq!(target.deserialize(&bytes[..cut]), Err(Error::TruncatedInput), "cut at {cut}");
        assert_eq!(target.count(), 0);
    }

    let mut slots = [Value::Null; 1];
    let mut target = RowkeyMut::new(&mut slots);
    assert_eq!(target.deserialize(&[]), Err(Error::TruncatedInput));
}

// =============================================================================
// Test 6: Decoding stops at the key; trailing bytes belong to the caller
// =============================================================================
#[test]
fn consumes_only_the_key() {
    let first = [Value::Int(1), Value::Varchar(b"x")];
    let second = [Value::Int(2)];
    let mut buf = Rowkey::new(&first).to_bytes().unwrap();
    let first_len = buf.len();
    buf.extend(Rowkey::new(&second).to_bytes().unwrap());

    let mut slots = [Value::Null; 2];
    let mut a = RowkeyMut::new(&mut slots);
    assert_eq!(a.deserialize(&buf), Ok(first_len));
    assert_eq!(a.as_rowkey().values(), &first[..]);

    let mut more = [Value::Null; 2];
    let mut b = RowkeyMut::new(&mut more);
    b.deserialize(&buf[first_len..]).unwrap();
    assert_eq!(b.as_rowkey().values(), &second[..]);
}

// =============================================================================
// Test 7: Varchar payloads borrow from the input buffer
// =============================================================================
#[test]
fn varchar_borrows_input() {
    let values = [Value::Varchar(b"zero-copy")];
    let bytes = Rowkey::new(&values).to_bytes().unwrap();

    let mut slots = [Value::Null; 1];
    let mut decoded = RowkeyMut::new(&mut slots);
    decoded.deserialize(&bytes).unwrap();

    match decoded.as_rowkey().values()[0] {
        Value::Varchar(payload) => {
            let range = bytes.as_ptr_range();
            assert!(range.contains(&payload.as_ptr()));
        }
        other => panic!("unexpected value {other:?}"),
    }
}

// =============================================================================
// Test 8: Malformed tag is corruption, not truncation
// =============================================================================
#[test]
fn bad_tag_is_corruption() {
    let bytes = [1u8, 0x55];
    let mut slots = [Value::Null; 1];
    let mut target = RowkeyMut::new(&mut slots);
    assert!(matches!(target.deserialize(&bytes), Err(Error::Corruption(_))));
}
