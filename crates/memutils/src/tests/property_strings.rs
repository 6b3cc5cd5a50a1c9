use alloc::vec::Vec;

use quickcheck::QuickCheck;

use super::{arbitrary::Content, test_count};
use crate::{
    concatenate, duplicate,
    string::{equal_words, scan_length},
    string_length, strings_equal,
};

fn reference_content(s: &[u8]) -> &[u8] {
    let end = s.iter().position(|&b| b == 0).unwrap_or(s.len());
    &s[..end]
}

/// Property: the word scan agrees with a byte scan for any bytes at any
/// starting offset, and both word widths agree with each other.
#[test]
fn length_matches_byte_scan() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(bytes: Vec<u8>, skip: u8) -> bool {
        let start = usize::from(skip % 8).min(bytes.len());
        let s = &bytes[start..];
        let expected = reference_content(s).len();
        string_length(s) == expected
            && scan_length::<u32>(s) == expected
            && scan_length::<u64>(s) == expected
    }

    QuickCheck::new()
        .tests(test_count())
        .quickcheck(prop as fn(Vec<u8>, u8) -> bool);
}

/// Property: equality is exactly equality of logical contents, and is
/// reflexive and symmetric.
#[test]
fn equality_matches_content_comparison() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(a: Vec<u8>, b: Vec<u8>) -> bool {
        let expected = reference_content(&a) == reference_content(&b);
        strings_equal(&a, &a)
            && strings_equal(&b, &b)
            && strings_equal(&a, &b) == expected
            && strings_equal(&b, &a) == expected
            && equal_words::<u32>(&a, &b) == expected
    }

    QuickCheck::new()
        .tests(test_count())
        .quickcheck(prop as fn(Vec<u8>, Vec<u8>) -> bool);
}

/// Property: strings sharing a long common prefix compare by their tails.
#[test]
fn equality_with_shared_prefix() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(prefix: Content, a: Content, b: Content) -> bool {
        let left: Vec<u8> = prefix.0.iter().chain(&a.0).copied().collect();
        let right: Vec<u8> = prefix.0.iter().chain(&b.0).copied().collect();
        strings_equal(&left, &right) == (a == b)
    }

    QuickCheck::new()
        .tests(test_count())
        .quickcheck(prop as fn(Content, Content, Content) -> bool);
}

/// Property: duplication and concatenation produce terminated copies of
/// their inputs' contents.
#[test]
fn allocated_strings_are_terminated_copies() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(a: Content, b: Content) -> bool {
        let Some(copy) = duplicate(a.0.as_slice()) else {
            return false;
        };
        let joined = concatenate(a.0.as_slice(), b.0.as_slice());

        let mut expected = a.0.clone();
        expected.push(0);
        let copy_ok = copy == expected;

        expected.pop();
        expected.extend_from_slice(&b.0);
        expected.push(0);
        copy_ok && joined == expected && string_length(joined.as_slice()) == expected.len() - 1
    }

    QuickCheck::new()
        .tests(test_count())
        .quickcheck(prop as fn(Content, Content) -> bool);
}
