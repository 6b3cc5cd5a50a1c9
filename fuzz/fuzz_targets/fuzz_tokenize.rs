#![no_main]
use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use memutils::{join, split, string_length};

#[derive(Debug, Arbitrary)]
struct Input {
    delimiter: u8,
    line: Vec<u8>,
}

fn tokenize(input: Input) {
    if input.delimiter == 0 {
        return;
    }
    let mut buf = input.line;
    let original = buf.clone();
    let content_len = string_length(buf.as_slice());

    let parts = split(&mut buf[..], input.delimiter);
    let rejoined = join(parts.as_slice(), &[input.delimiter]);
    let segments = parts.len();
    drop(parts);

    // Splitting then joining on the same delimiter restores the content.
    assert_eq!(&rejoined[..rejoined.len() - 1], &original[..content_len]);
    assert_eq!(rejoined.last(), Some(&0));

    let delimiters = original[..content_len]
        .iter()
        .filter(|&&b| b == input.delimiter)
        .count();
    if content_len == 0 {
        assert_eq!(segments, 0);
    } else {
        assert_eq!(segments, delimiters + 1);
    }
    // Bytes past the content are never touched.
    assert_eq!(buf[content_len..], original[content_len..]);
}

fuzz_target!(|input: Input| tokenize(input));
