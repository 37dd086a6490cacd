use super::decode_hex;
use crate::protocol::crypto::{HkdfSha512, PAIRING_OKM_LEN, derive_key};

#[test]
fn test_hkdf_known_vector() {
    // RFC 5869 A.1 inputs carried over to SHA-512
    let ikm = [0x0b; 22];
    let salt: Vec<u8> = (0x00u8..=0x0c).collect();
    let info: Vec<u8> = (0xf0u8..=0xf9).collect();

    let okm = derive_key(Some(&salt), &ikm, &info, 42).unwrap();
    assert_eq!(
        okm,
        decode_hex(
            "832390086cda71fb47625bb5ceb168e4c8e26a1a16ed34d9fc7fe92c14815793\
             38da362cb8d9f925d7cb"
        )
    );
}

#[test]
fn test_hkdf_deterministic() {
    let key1 = derive_key(None, b"test", b"info", 32).unwrap();
    let key2 = derive_key(None, b"test", b"info", 32).unwrap();
    assert_eq!(key1, key2);
}

#[test]
fn test_hkdf_info_separation() {
    let key1 = derive_key(None, b"test", b"info1", 32).unwrap();
    let key2 = derive_key(None, b"test", b"info2", 32).unwrap();
    assert_ne!(key1, key2);
}

#[test]
fn test_hkdf_expand_fixed() {
    let hkdf = HkdfSha512::new(Some(b"salt"), b"shared secret");
    let fixed: [u8; 32] = hkdf.expand_fixed(b"WriteKey").unwrap();
    let dynamic = hkdf.expand(b"WriteKey", 32).unwrap();
    assert_eq!(fixed.to_vec(), dynamic);
}

#[test]
fn test_pairing_output_length() {
    let okm = derive_key(
        Some(b"Pair-Setup-Encrypt-Salt"),
        b"session key",
        b"Pair-Setup-Encrypt-Info",
        PAIRING_OKM_LEN,
    )
    .unwrap();
    assert_eq!(okm.len(), 64);
}

#[test]
fn test_hkdf_excessive_length_rejected() {
    let hkdf = HkdfSha512::new(None, b"ikm");
    // HKDF-SHA512 caps output at 255 * 64 bytes
    assert!(hkdf.expand(b"info", 255 * 64 + 1).is_err());
}
