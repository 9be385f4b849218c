//! Known-answer test vectors

use digestr_core::HashAlgorithm;

/// Published digest of a fixed input
#[derive(Debug, Clone, Copy)]
pub struct KnownVector {
    pub algorithm: HashAlgorithm,
    pub input: &'static [u8],
    pub hex: &'static str,
}

const fn vector(algorithm: HashAlgorithm, input: &'static [u8], hex: &'static str) -> KnownVector {
    KnownVector {
        algorithm,
        input,
        hex,
    }
}

/// RFC 1321, FIPS 180-2, the CRC-32 check value and assorted checksums
pub const KNOWN_VECTORS: &[KnownVector] = &[
    // Adler-32
    vector(HashAlgorithm::ADLER32, b"", "00000001"),
    vector(HashAlgorithm::ADLER32, b"abc", "024d0127"),
    vector(HashAlgorithm::ADLER32, b"Wikipedia", "11e60398"),
    // CRC-32
    vector(HashAlgorithm::CRC32, b"", "00000000"),
    vector(HashAlgorithm::CRC32, b"123456789", "cbf43926"),
    vector(
        HashAlgorithm::CRC32,
        b"The quick brown fox jumps over the lazy dog",
        "414fa339",
    ),
    // ELF
    vector(HashAlgorithm::ELF, b"", "00000000"),
    vector(HashAlgorithm::ELF, b"abc", "00006783"),
    // MD5
    vector(HashAlgorithm::MD5, b"", "d41d8cd98f00b204e9800998ecf8427e"),
    vector(HashAlgorithm::MD5, b"abc", "900150983cd24fb0d6963f7d28e17f72"),
    vector(
        HashAlgorithm::MD5,
        b"message digest",
        "f96b697d7cb7938d525a2f31aaf161d0",
    ),
    vector(
        HashAlgorithm::MD5,
        b"12345678901234567890123456789012345678901234567890123456789012345678901234567890",
        "57edf4a22be3c955ac49da2e2107b67a",
    ),
    // SHA-256
    vector(
        HashAlgorithm::SHA256,
        b"",
        "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855",
    ),
    vector(
        HashAlgorithm::SHA256,
        b"abc",
        "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad",
    ),
    vector(
        HashAlgorithm::SHA256,
        b"abcdbcdecdefdefgefghfghighijhijkijkljklmklmnlmnomnopnopq",
        "248d6a61d20638b8e5c026930c3e6039a33ce45964ff2167f6ecedd419db06c1",
    ),
];

/// Vectors for one algorithm
pub fn vectors_for(algorithm: HashAlgorithm) -> impl Iterator<Item = &'static KnownVector> {
    KNOWN_VECTORS.iter().filter(move |v| v.algorithm == algorithm)
}
