use num_bigint::BigUint;
use proptest::prelude::*;

use crate::protocol::crypto::CryptoError;
use crate::protocol::crypto::bigint::to_fixed_width_be;

#[test]
fn test_zero_pads_to_width() {
    let n = BigUint::from(0u32);
    assert_eq!(to_fixed_width_be(&n, 4).unwrap(), vec![0, 0, 0, 0]);
    assert_eq!(to_fixed_width_be(&n, 0).unwrap(), Vec::<u8>::new());
}

#[test]
fn test_left_zero_padding() {
    let n = BigUint::from(0x1234u32);
    assert_eq!(to_fixed_width_be(&n, 4).unwrap(), vec![0, 0, 0x12, 0x34]);
}

#[test]
fn test_exact_width() {
    let n = BigUint::from(0xFFu32);
    assert_eq!(to_fixed_width_be(&n, 1).unwrap(), vec![0xFF]);
}

#[test]
fn test_too_wide_rejected() {
    let n = BigUint::from(0x100u32);
    let result = to_fixed_width_be(&n, 1);
    assert!(matches!(result, Err(CryptoError::IntegerTooWide { width: 1 })));

    let result = to_fixed_width_be(&BigUint::from(1u32), 0);
    assert!(matches!(result, Err(CryptoError::IntegerTooWide { width: 0 })));
}

proptest! {
    #[test]
    fn test_roundtrip_preserves_value(bytes in proptest::collection::vec(any::<u8>(), 0..64)) {
        let n = BigUint::from_bytes_be(&bytes);
        let encoded = to_fixed_width_be(&n, bytes.len()).unwrap();
        prop_assert_eq!(&encoded, &bytes);
        prop_assert_eq!(BigUint::from_bytes_be(&encoded), n);
    }

    #[test]
    fn test_wider_buffer_roundtrip(value in any::<u64>(), extra in 0usize..16) {
        let n = BigUint::from(value);
        let width = 8 + extra;
        let encoded = to_fixed_width_be(&n, width).unwrap();
        prop_assert_eq!(encoded.len(), width);
        prop_assert_eq!(BigUint::from_bytes_be(&encoded), n);
    }
}
