#![no_main]
use libfuzzer_sys::fuzz_target;
use memutils::{
    concatenate, duplicate,
    fuzzing::{equal_words, scan_length},
    string_length, strings_equal, until_nul,
};

fn content(s: &[u8]) -> &[u8] {
    &s[..s.iter().position(|&b| b == 0).unwrap_or(s.len())]
}

fn strings(data: &[u8]) {
    let Some((&cut, rest)) = data.split_first() else {
        return;
    };
    let mid = usize::from(cut) % (rest.len() + 1);
    let (a, b) = rest.split_at(mid);

    let expected = content(a).len();
    assert_eq!(string_length(a), expected);
    assert_eq!(scan_length::<u32>(a), expected);
    assert_eq!(scan_length::<u64>(a), expected);
    assert_eq!(until_nul(a), content(a));

    let equal = content(a) == content(b);
    assert_eq!(strings_equal(a, b), equal);
    assert_eq!(equal_words::<u32>(a, b), equal);
    assert_eq!(equal_words::<u64>(b, a), equal);

    let copy = duplicate(a).unwrap_or_default();
    assert_eq!(until_nul(&copy), content(a));
    assert_eq!(copy.last(), Some(&0));

    let joined = concatenate(a, b);
    assert_eq!(joined.len(), content(a).len() + content(b).len() + 1);
    assert_eq!(&joined[..content(a).len()], content(a));
    assert_eq!(joined.last(), Some(&0));
}

fuzz_target!(|data: &[u8]| strings(data));
