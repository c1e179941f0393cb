#![no_main]

use libfuzzer_sys::fuzz_target;
use xofhash::{HashError, HasherSession};

fuzz_target!(|data: &[u8]| {
    // Feed the input in uneven pieces, hashing it whole for comparison
    let mut split = HasherSession::standard();
    for piece in data.chunks(data.first().map_or(1, |b| *b as usize + 1)) {
        split.update(piece).unwrap();
    }
    let mut whole = HasherSession::standard();
    whole.update(data).unwrap();
    assert_eq!(split.finalize(None).unwrap(), whole.finalize(None).unwrap());

    // Keys are accepted only at exactly 32 bytes
    let mut keyed = HasherSession::new();
    match keyed.init_keyed(data) {
        Ok(_) => assert_eq!(data.len(), 32),
        Err(HashError::InvalidKeyLength { actual }) => assert_eq!(actual, data.len()),
        Err(e) => panic!("unexpected error: {e}"),
    }

    // Reset discards everything absorbed
    split.reset();
    split.update(b"fresh").unwrap();
    let mut fresh = HasherSession::standard();
    fresh.update(b"fresh").unwrap();
    assert_eq!(split.finalize(None).unwrap(), fresh.finalize(None).unwrap());
});
