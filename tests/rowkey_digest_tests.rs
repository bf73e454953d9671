// Rowkey digest tests
// Rolling CRC-64 checksum, batch accumulation, MurmurHash2.

use rowkey_engine::{BatchChecksum, Rowkey, RowkeyMut, Value};

// =============================================================================
// Test 1: Same values and seed, same output
// =============================================================================
#[test]
fn deterministic() {
    let a = [Value::Int(5), Value::Varchar(b"fig")];
    let b = [Value::Int(5), Value::Varchar(b"fig")];

    assert_eq!(Rowkey::new(&a).checksum(11), Rowkey::new(&b).checksum(11));
    assert_eq!(Rowkey::new(&a).murmurhash2(11), Rowkey::new(&b).murmurhash2(11));
}

// =============================================================================
// Test 2: Reordering the same values changes both digests
// =============================================================================
#[test]
fn order_sensitive() {
    let ab = [Value::Varchar(b"a"), Value::Varchar(b"b")];
    let ba = [Value::Varchar(b"b"), Value::Varchar(b"a")];

    assert_ne!(Rowkey::new(&ab).checksum(0), Rowkey::new(&ba).checksum(0));
    assert_ne!(Rowkey::new(&ab).murmurhash2(0), Rowkey::new(&ba).murmurhash2(0));
}

// =============================================================================
// Test 3: Rolling checksum is a left fold of per-value steps
// =============================================================================
#[test]
fn rolling_is_a_fold() {
    let values = [Value::Int(1), Value::Double(2.0), Value::Null];
    let expected = values.iter().fold(77u64, |acc, v| v.checksum(acc));
    assert_eq!(Rowkey::new(&values).checksum(77), expected);

    let hashed = values.iter().fold(3u32, |acc, v| v.murmurhash2(acc));
    assert_eq!(Rowkey::new(&values).murmurhash2(3), hashed);
}

// =============================================================================
// Test 4: Empty or detached keys leave seed and accumulator untouched
// =============================================================================
#[test]
fn empty_is_noop() {
    let detached = RowkeyMut::detached();
    for key in [Rowkey::new(&[]), detached.as_rowkey()] {
        assert_eq!(key.checksum(123), 123);
        assert_eq!(key.murmurhash2(456), 456);

        let mut batch = BatchChecksum::new();
        batch.fill(b"prior");
        let before = batch.crc64();
        key.checksum_into(&mut batch);
        assert_eq!(batch.crc64(), before);
    }
}

// =============================================================================
// Test 5: Batch accumulation spans keys and is order dependent
// =============================================================================
#[test]
fn batch_spans_keys() {
    let k1 = [Value::Int(1)];
    let k2 = [Value::Int(2), Value::Varchar(b"x")];

    let mut forward = BatchChecksum::new();
    Rowkey::new(&k1).checksum_into(&mut forward);
    Rowkey::new(&k2).checksum_into(&mut forward);

    let mut again = BatchChecksum::new();
    Rowkey::new(&k1).checksum_into(&mut again);
    Rowkey::new(&k2).checksum_into(&mut again);
    assert_eq!(forward.crc64(), again.crc64());

    let mut reversed = BatchChecksum::new();
    Rowkey::new(&k2).checksum_into(&mut reversed);
    Rowkey::new(&k1).checksum_into(&mut reversed);
    assert_ne!(forward.crc64(), reversed.crc64());
}

// =============================================================================
// Test 6: Seeds matter
// =============================================================================
#[test]
fn seed_changes_output() {
    let values = [Value::Varchar(b"seeded")];
    let key = Rowkey::new(&values);
    assert_ne!(key.checksum(1), key.checksum(2));
    assert_ne!(key.murmurhash2(1), key.murmurhash2(2));
}

// =============================================================================
// Test 7: Batch accumulation of one key equals its rolling checksum
// =============================================================================
#[test]
fn batch_matches_rolling() {
    let values = [Value::Int(1), Value::Varchar(b"x"), Value::Null, Value::Double(2.5)];
    let key = Rowkey::new(&values);

    let mut batch = BatchChecksum::new();
    key.checksum_into(&mut batch);
    assert_eq!(batch.crc64(), key.checksum(0));
}

// =============================================================================
// Test 8: Batching several keys chains their rolling checksums
// =============================================================================
#[test]
fn batch_chains_rolling() {
    let k1 = [Value::Min, Value::Bool(true), Value::DateTime(-4)];
    let k2 = [Value::Float(0.5), Value::Varchar(b"tail"), Value::Max];
    let (k1, k2) = (Rowkey::new(&k1), Rowkey::new(&k2));

    let mut batch = BatchChecksum::new();
    k1.checksum_into(&mut batch);
    k2.checksum_into(&mut batch);
    assert_eq!(batch.crc64(), k2.checksum(k1.checksum(0)));
}
