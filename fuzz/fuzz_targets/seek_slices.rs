#![no_main]

use libfuzzer_sys::fuzz_target;
use xofhash::{DEFAULT_MAX_OUTPUT_LEN, HasherSession};

fuzz_target!(|input: (Vec<u8>, u16, u16)| {
    let (data, start, len) = input;
    let start = start as usize % DEFAULT_MAX_OUTPUT_LEN;
    let len = (len as usize % (DEFAULT_MAX_OUTPUT_LEN - start)).max(1);

    let mut session = HasherSession::standard();
    session.update(&data).unwrap();

    // Verify: a seeked output is a slice of one long output
    let whole = session.finalize(Some(start + len)).unwrap();
    let slice = session.finalize_at_offset(start as u64, len).unwrap();
    assert_eq!(&whole.as_bytes()[start..], slice.as_bytes());

    // Verify: callback view matches the owned result
    session
        .finalize_with(start as u64, len, |view| assert_eq!(view, slice.as_bytes()))
        .unwrap();

    // Verify: finalize does not disturb the state
    assert_eq!(session.finalize(Some(start + len)).unwrap(), whole);
});
