// Integration tests for hasher sessions, seeked output and one-shot helpers
// Tests cover: mode transitions, keystream slicing, reset, keyed separation, hex

use proptest::prelude::*;
use xofhash::{
    DEFAULT_MAX_OUTPUT_LEN, Digest, HashError, HasherSession, HexCase, Mode, OutputConfig,
    OutputPool, decode_hex, digest, encode_hex, hex_digest,
};

const EMPTY_DIGEST: &str = "af1349b9f5f9a1a6a0404dea36dcc9499bcb25c9adc112b7cc9a93cae41f3262";

fn standard(data: &[u8]) -> HasherSession {
    let mut session = HasherSession::standard();
    session.update(data).unwrap();
    session
}

// ============================================================================
// Known Answers
// ============================================================================

#[test]
fn test_empty_input_matches_published_digest() {
    assert_eq!(digest(b"", None).unwrap().to_hex(), EMPTY_DIGEST);
    assert_eq!(hex_digest(b"", None).unwrap(), EMPTY_DIGEST);
    assert_eq!(standard(b"").finalize(None).unwrap().to_hex(), EMPTY_DIGEST);
}

#[test]
fn test_split_update_equals_single_update() {
    let mut split = HasherSession::standard();
    split.update(b"Hello, ").unwrap();
    split.update(b"World!").unwrap();

    let single = standard(b"Hello, World!");
    assert_eq!(split.finalize(None).unwrap(), single.finalize(None).unwrap());
    assert_eq!(
        single.finalize(None).unwrap(),
        *blake3::hash(b"Hello, World!").as_bytes()
    );
}

#[test]
fn test_digest_is_deterministic() {
    let data: Vec<u8> = (0..10_000).map(|i| (i * 7 + 13) as u8).collect();
    assert_eq!(digest(&data, None).unwrap(), digest(&data, None).unwrap());
    assert_eq!(digest(&data, None).unwrap().len(), 32);
}

// ============================================================================
// Mode Transitions
// ============================================================================

#[test]
fn test_lifecycle() {
    let mut session = HasherSession::new();
    assert!(session.mode().is_none());
    assert!(matches!(
        session.update(b"early"),
        Err(HashError::NotInitialized)
    ));

    session.init_derive_key("xofhash integration 2024").unwrap();
    assert!(matches!(session.mode(), Some(Mode::DeriveKey { .. })));
    session.update(b"material").unwrap();
    assert_eq!(
        session.finalize(None).unwrap(),
        blake3::derive_key("xofhash integration 2024", b"material")
    );

    session.reset();
    assert!(matches!(session.mode(), Some(Mode::DeriveKey { .. })));
    session.update(b"material").unwrap();
    assert_eq!(
        session.finalize(None).unwrap(),
        blake3::derive_key("xofhash integration 2024", b"material")
    );
}

#[test]
fn test_key_length_boundaries() {
    for len in [0, 31, 33, 64] {
        let mut session = HasherSession::new();
        let key = vec![0u8; len];
        assert!(
            matches!(
                session.init_keyed(&key),
                Err(HashError::InvalidKeyLength { actual }) if actual == len
            ),
            "key of {} bytes should be rejected",
            len
        );
        assert!(!session.is_initialized());
    }
    assert!(HasherSession::keyed(&[0u8; 32]).is_ok());
}

#[test]
fn test_keyed_outputs_are_separated() {
    let k1 = [1u8; 32];
    let k2 = [2u8; 32];
    let message = b"the same message";

    let mut a = HasherSession::keyed(&k1).unwrap();
    let mut b = HasherSession::keyed(&k2).unwrap();
    a.update(message).unwrap();
    b.update(message).unwrap();
    let plain = standard(message);

    let a = a.finalize(None).unwrap();
    let b = b.finalize(None).unwrap();
    assert_ne!(a, b);
    assert_ne!(a, plain.finalize(None).unwrap());
    assert_eq!(a, *blake3::keyed_hash(&k1, message).as_bytes());
}

// ============================================================================
// Output Production
// ============================================================================

#[test]
fn test_output_length_boundaries() {
    let session = standard(b"bounds");
    assert!(matches!(
        session.finalize(Some(0)),
        Err(HashError::InvalidOutputLength)
    ));
    assert!(matches!(
        session.finalize(Some(DEFAULT_MAX_OUTPUT_LEN + 1)),
        Err(HashError::OutputTooLarge { requested, max })
            if requested == DEFAULT_MAX_OUTPUT_LEN + 1 && max == DEFAULT_MAX_OUTPUT_LEN
    ));
    assert_eq!(
        session
            .finalize(Some(DEFAULT_MAX_OUTPUT_LEN))
            .unwrap()
            .len(),
        DEFAULT_MAX_OUTPUT_LEN
    );
}

#[test]
fn test_large_output_assembled_from_seeked_calls() {
    let session = standard(b"assemble");
    let total = 3 * DEFAULT_MAX_OUTPUT_LEN + 123;

    let mut assembled = Vec::with_capacity(total);
    let mut offset = 0u64;
    while assembled.len() < total {
        let len = (total - assembled.len()).min(DEFAULT_MAX_OUTPUT_LEN);
        let block = session.finalize_at_offset(offset, len).unwrap();
        assembled.extend_from_slice(block.as_bytes());
        offset += len as u64;
    }

    let mut expected = vec![0u8; total];
    blake3::Hasher::new()
        .update(b"assemble")
        .finalize_xof()
        .fill(&mut expected);
    assert_eq!(assembled, expected);
}

#[test]
fn test_finalize_does_not_consume_state() {
    let mut session = standard(b"part one");
    let first = session.finalize(Some(64)).unwrap();
    assert_eq!(session.finalize(Some(64)).unwrap(), first);

    session.update(b" and two").unwrap();
    assert_eq!(
        session.finalize(None).unwrap(),
        *blake3::hash(b"part one and two").as_bytes()
    );
}

#[test]
fn test_zero_copy_callback() {
    let session = standard(b"callback");
    let label = "tag";
    let rendered = session
        .finalize_with(0, 4, |view| format!("{}:{}", label, encode_hex(view, HexCase::Lower)))
        .unwrap();
    assert_eq!(
        rendered,
        format!("tag:{}", session.finalize(Some(4)).unwrap().to_hex())
    );
}

#[test]
fn test_caller_owned_pool() {
    let session = standard(b"pool");
    let mut pool = OutputPool::new(session.config());

    let big = session
        .finalize_in(&mut pool, 0, 10_000, |out| out.to_vec())
        .unwrap();
    assert_eq!(pool.large_capacity(), 10_000);

    let smaller = session
        .finalize_in(&mut pool, 0, 5_000, |out| out.to_vec())
        .unwrap();
    assert_eq!(pool.large_capacity(), 10_000);
    assert_eq!(&big[..5_000], &smaller[..]);

    session
        .finalize_in(&mut pool, 0, 20_000, |out| out.len())
        .unwrap();
    assert_eq!(pool.large_capacity(), 20_000);
}

#[test]
fn test_custom_ceiling() {
    let config = OutputConfig::new(1024, 128 * 1024).unwrap();
    let mut session = HasherSession::with_config(config).unwrap();
    session.init_standard().unwrap();
    assert_eq!(session.finalize(Some(100_000)).unwrap().len(), 100_000);
    assert!(session.finalize(Some(128 * 1024 + 1)).is_err());
}

#[test]
fn test_sessions_per_thread() {
    let handles: Vec<_> = (0..4u8)
        .map(|i| {
            std::thread::spawn(move || {
                let data = vec![i; 1000];
                let ours = digest(&data, Some(5000)).unwrap();
                (data, ours)
            })
        })
        .collect();

    for handle in handles {
        let (data, ours) = handle.join().unwrap();
        assert_eq!(ours, standard(&data).finalize(Some(5000)).unwrap());
    }
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn prop_seek_is_keystream_slice(
        data in proptest::collection::vec(any::<u8>(), 0..512),
        a in 0usize..2000,
        extra in 1usize..2000,
    ) {
        let session = standard(&data);
        let b = a + extra;
        let whole = session.finalize(Some(b)).unwrap();
        let slice = session.finalize_at_offset(a as u64, b - a).unwrap();
        prop_assert_eq!(&whole.as_bytes()[a..b], slice.as_bytes());
    }

    #[test]
    fn prop_split_updates_match_concatenation(
        data in proptest::collection::vec(any::<u8>(), 0..4096),
        split in any::<prop::sample::Index>(),
    ) {
        let at = split.index(data.len() + 1);
        let mut session = HasherSession::standard();
        session.update(&data[..at]).unwrap();
        session.update(&data[at..]).unwrap();
        prop_assert_eq!(session.finalize(None).unwrap(), standard(&data).finalize(None).unwrap());
    }

    #[test]
    fn prop_reset_leaves_no_residue(
        old in proptest::collection::vec(any::<u8>(), 0..1024),
        new in proptest::collection::vec(any::<u8>(), 0..1024),
    ) {
        let mut session = standard(&old);
        session.reset();
        session.update(&new).unwrap();
        prop_assert_eq!(session.finalize(None).unwrap(), standard(&new).finalize(None).unwrap());
    }

    #[test]
    fn prop_hex_round_trip(data in proptest::collection::vec(any::<u8>(), 0..256)) {
        let lower = encode_hex(&data, HexCase::Lower);
        let upper = encode_hex(&data, HexCase::Upper);
        prop_assert_eq!(lower.len(), 2 * data.len());
        prop_assert!(lower.chars().all(|c| matches!(c, '0'..='9' | 'a'..='f')));
        prop_assert!(upper.chars().all(|c| matches!(c, '0'..='9' | 'A'..='F')));
        prop_assert_eq!(decode_hex(&lower).unwrap(), data.clone());
        let parsed = Digest::from_hex(&upper).unwrap();
        prop_assert_eq!(parsed.as_bytes(), &data[..]);
    }
}

// ============================================================================
// Async
// ============================================================================

#[cfg(feature = "async-io")]
mod async_update {
    use std::io;
    use std::pin::Pin;
    use std::task::{Context, Poll};

    use futures_io::AsyncRead;
    use tokio_util::compat::TokioAsyncReadCompatExt;
    use xofhash::{HashError, HasherSession, update_async};

    /// Yields `data` once, then fails.
    struct FailingReader {
        data: &'static [u8],
    }

    impl AsyncRead for FailingReader {
        fn poll_read(
            mut self: Pin<&mut Self>,
            _cx: &mut Context<'_>,
            buf: &mut [u8],
        ) -> Poll<io::Result<usize>> {
            if self.data.is_empty() {
                return Poll::Ready(Err(io::Error::new(
                    io::ErrorKind::BrokenPipe,
                    "reader failed",
                )));
            }
            let data = self.data;
            let n = data.len().min(buf.len());
            buf[..n].copy_from_slice(&data[..n]);
            self.data = &data[n..];
            Poll::Ready(Ok(n))
        }
    }

    #[tokio::test]
    async fn test_update_async_matches_sync() {
        let data: Vec<u8> = (0..100_000).map(|i| (i % 253) as u8).collect();
        let mut session = HasherSession::standard();
        let consumed = update_async(&mut session, (&data[..]).compat())
            .await
            .unwrap();

        assert_eq!(consumed, data.len() as u64);
        assert_eq!(
            session.finalize(None).unwrap(),
            *blake3::hash(&data).as_bytes()
        );
    }

    #[tokio::test]
    async fn test_update_async_error_leaves_session_unchanged() {
        let mut session = HasherSession::standard();
        session.update(b"abc").unwrap();
        let before = session.finalize(None).unwrap();

        let result = update_async(&mut session, FailingReader { data: b"junk" }).await;
        assert!(matches!(result, Err(HashError::Io(_))));
        assert_eq!(session.finalize(None).unwrap(), before);
    }

    #[tokio::test]
    async fn test_update_async_requires_init() {
        let mut session = HasherSession::new();
        let result = update_async(&mut session, (&b"data"[..]).compat()).await;
        assert!(matches!(result, Err(HashError::NotInitialized)));
    }
}
