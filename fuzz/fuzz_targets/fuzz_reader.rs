#![no_main]

use fmx::index::{IndexReader, IndexWriter};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Arbitrary bytes must be rejected or load into a self-consistent index
    if let Ok(index) = IndexReader::from_bytes(data) {
        let _ = index.count(b"a");
        assert_eq!(IndexReader::from_bytes(&IndexWriter::to_bytes(&index)).ok(), Some(index));
    }
});
