//! Hash algorithm implementations

mod adler32;
mod block;
mod crc32;
mod elf;
mod md5;
mod sha256;

pub use adler32::Adler32;
pub use crc32::Crc32;
pub use elf::Elf;
pub use md5::Md5;
pub use sha256::Sha256;
