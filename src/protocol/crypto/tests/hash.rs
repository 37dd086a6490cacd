use super::decode_hex;
use crate::protocol::crypto::{DIGEST_LEN, sha512, sha512_concat};

#[test]
fn test_sha512_known_vector() {
    let digest = sha512(b"abc");
    assert_eq!(
        digest.to_vec(),
        decode_hex(
            "ddaf35a193617abacc417349ae20413112e6fa4e89a97ea20a9eeee64b55d39a\
             2192992a274fc1a836ba3c23a3feebbd454d4423643ce80e2a9ac94fa54ca49f"
        )
    );
}

#[test]
fn test_sha512_empty() {
    let digest = sha512(b"");
    assert_eq!(
        digest.to_vec(),
        decode_hex(
            "cf83e1357eefb8bdf1542850d66d8007d620e4050b5715dc83f4a921d36ce9ce\
             47d0d13c5d85f2b0ff8318d2877eec2f63b931bd47417a81a538327af927da3e"
        )
    );
}

#[test]
fn test_concat_matches_contiguous() {
    let contiguous = sha512(b"Pair-Setup:1234");
    let parts = sha512_concat(&[b"Pair-Setup", b":", b"1234"]);
    assert_eq!(contiguous, parts);
    assert_eq!(parts.len(), DIGEST_LEN);
}
