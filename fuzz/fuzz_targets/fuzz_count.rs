#![no_main]

use arbitrary::Arbitrary;
use fmx::bench::linear_count;
use fmx::index::{ConstructionStrategy, IndexBuilder, IndexConfig, SENTINEL, Text};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct Input {
    text: Vec<u8>,
    pattern: Vec<u8>,
    naive: bool,
}

fuzz_target!(|input: Input| {
    // Counts must agree with a plain scan for any text and pattern
    let data: Vec<u8> = input.text.into_iter().filter(|&b| b != SENTINEL).take(4096).collect();
    let Ok(text) = Text::new(data.clone()) else {
        return;
    };

    let config = IndexConfig {
        strategy: if input.naive {
            ConstructionStrategy::Naive
        } else {
            ConstructionStrategy::PrefixDoubling
        },
        ..IndexConfig::default()
    };
    let index = IndexBuilder::new(config).build(&text).unwrap().index;

    if input.pattern.contains(&SENTINEL) {
        assert!(index.count(&input.pattern).is_err());
    } else {
        assert_eq!(index.count(&input.pattern).unwrap(), linear_count(&data, &input.pattern));
    }
});
