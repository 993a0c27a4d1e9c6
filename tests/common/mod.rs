//! Hand-built WASM module fixtures for indexer tests.

/// Build a minimal module with `fn_imports` imported functions, optionally a
/// memory import, and the given function bodies (each body must carry its
/// locals vector and trailing `end`).
///
/// Returns the module bytes and the byte span of each body's contents.
pub fn build_module(
    fn_imports: usize,
    with_memory_import: bool,
    bodies: &[&[u8]],
) -> (Vec<u8>, Vec<(usize, usize)>) {
    assert!(fn_imports < 16 && bodies.len() < 16, "single-byte LEBs only");

    let mut bytes = vec![0x00, 0x61, 0x73, 0x6d, 0x01, 0x00, 0x00, 0x00];

    // Type section: a single () -> () type.
    bytes.extend([0x01, 0x04, 0x01, 0x60, 0x00, 0x00]);

    // Import section.
    if fn_imports > 0 || with_memory_import {
        let mut payload = vec![(fn_imports + usize::from(with_memory_import)) as u8];
        for i in 0..fn_imports {
            payload.extend([0x01, b'e', 0x01, b'a' + i as u8, 0x00, 0x00]);
        }
        if with_memory_import {
            payload.extend([0x01, b'e', 0x01, b'm', 0x02, 0x00, 0x00]);
        }
        bytes.push(0x02);
        bytes.push(payload.len() as u8);
        bytes.extend(payload);
    }

    // Function section: every body uses type 0.
    if !bodies.is_empty() {
        let mut payload = vec![bodies.len() as u8];
        payload.extend(std::iter::repeat(0x00).take(bodies.len()));
        bytes.push(0x03);
        bytes.push(payload.len() as u8);
        bytes.extend(payload);
    }

    // Code section.
    let mut spans = Vec::new();
    if !bodies.is_empty() {
        let mut payload = vec![bodies.len() as u8];
        let mut rel_spans = Vec::new();
        for body in bodies {
            payload.push(body.len() as u8);
            let start = payload.len();
            payload.extend_from_slice(body);
            rel_spans.push((start, start + body.len()));
        }
        bytes.push(0x0a);
        bytes.push(payload.len() as u8);
        let base = bytes.len();
        bytes.extend(payload);
        spans = rel_spans
            .into_iter()
            .map(|(start, end)| (base + start, base + end))
            .collect();
    }

    (bytes, spans)
}

/// A body with no locals, a `nop`, and `end`.
pub const NOP_BODY: &[u8] = &[0x00, 0x01, 0x0b];
