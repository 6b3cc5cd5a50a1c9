//! Fatal allocation failure, observed from a parent process.
//!
//! Each test re-runs itself in a child process with `CHILD_ENV` set. The child
//! performs an allocating operation against an allocator that refuses every
//! request; the parent checks the exit status and the diagnostic output.
#![allow(missing_docs)]

use std::{env, process::Command};

use memutils::{
    ALLOC_FAILURE_EXIT_CODE, ALLOC_FAILURE_MESSAGE, AllocError, AllocGuard, Allocator, FailureHook,
    PointerSet, concatenate_in, duplicate_in, guarded_allocate, guarded_reallocate, join_in,
};

const CHILD_ENV: &str = "MEMUTILS_ALLOC_FAILURE_CHILD";
const HOOK_PREFIX: &str = "hook: ";

struct Refusing;

impl Allocator for Refusing {
    fn grow<T>(&self, buf: &mut Vec<T>, capacity: usize) -> Result<(), AllocError> {
        if capacity <= buf.capacity() {
            return Ok(());
        }
        Err(AllocError::OutOfMemory {
            requested: capacity.saturating_mul(size_of::<T>()),
        })
    }
}

fn hook(message: &str) {
    eprintln!("{HOOK_PREFIX}{message}");
}

fn in_child() -> bool {
    env::var_os(CHILD_ENV).is_some()
}

fn expected_status() -> i32 {
    if cfg!(unix) {
        ALLOC_FAILURE_EXIT_CODE & 0xff
    } else {
        ALLOC_FAILURE_EXIT_CODE
    }
}

struct ChildOutcome {
    status: Option<i32>,
    stderr: String,
}

impl ChildOutcome {
    fn hook_calls(&self) -> usize {
        self.stderr
            .matches(&format!("{HOOK_PREFIX}{ALLOC_FAILURE_MESSAGE}"))
            .count()
    }

    fn messages(&self) -> usize {
        self.stderr.matches(ALLOC_FAILURE_MESSAGE).count()
    }
}

fn run_child(test_name: &str) -> ChildOutcome {
    let output = Command::new(env::current_exe().expect("test binary path"))
        .args([test_name, "--exact", "--nocapture", "--test-threads=1"])
        .env(CHILD_ENV, "1")
        .output()
        .expect("spawn child test process");
    ChildOutcome {
        status: output.status.code(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    }
}

fn assert_terminated_via_hook(outcome: &ChildOutcome) {
    assert_eq!(outcome.status, Some(expected_status()), "{}", outcome.stderr);
    assert_eq!(outcome.hook_calls(), 1, "{}", outcome.stderr);
    assert_eq!(outcome.messages(), 1, "{}", outcome.stderr);
}

fn assert_terminated_via_stderr(outcome: &ChildOutcome) {
    assert_eq!(outcome.status, Some(expected_status()), "{}", outcome.stderr);
    assert_eq!(outcome.hook_calls(), 0, "{}", outcome.stderr);
    assert_eq!(outcome.messages(), 1, "{}", outcome.stderr);
}

#[test]
fn duplicate_failure_calls_hook_once() {
    if in_child() {
        let guard = AllocGuard::new(Refusing).with_failure_hook(&hook);
        let _ = duplicate_in(b"x".as_slice(), &guard);
        unreachable!("allocation failure must terminate the process");
    }
    assert_terminated_via_hook(&run_child("duplicate_failure_calls_hook_once"));
}

#[test]
fn concatenate_failure_reports_on_stderr() {
    if in_child() {
        let guard = AllocGuard::new(Refusing);
        let _ = concatenate_in(b"foo".as_slice(), b"bar".as_slice(), &guard);
        unreachable!("allocation failure must terminate the process");
    }
    assert_terminated_via_stderr(&run_child("concatenate_failure_reports_on_stderr"));
}

#[test]
fn join_failure_calls_hook_once() {
    if in_child() {
        let guard = AllocGuard::new(Refusing).with_failure_hook(&hook);
        let _ = join_in(&[b"a", b"b"], b"-", &guard);
        unreachable!("allocation failure must terminate the process");
    }
    assert_terminated_via_hook(&run_child("join_failure_calls_hook_once"));
}

#[test]
fn pointer_set_growth_failure_calls_hook_once() {
    if in_child() {
        let mut set = PointerSet::new_in(AllocGuard::new(Refusing).with_failure_hook(&hook));
        set.insert(1usize);
        unreachable!("allocation failure must terminate the process");
    }
    assert_terminated_via_hook(&run_child("pointer_set_growth_failure_calls_hook_once"));
}

#[test]
fn stateful_hook_sees_the_message_once() {
    if in_child() {
        let tool = String::from("memutils-test");
        let hook: FailureHook = Box::leak(Box::new(move |message: &str| {
            eprintln!("{HOOK_PREFIX}[{tool}] {message}");
        }));
        let _ = guarded_allocate(usize::MAX, Some(hook));
        unreachable!("allocation failure must terminate the process");
    }
    let outcome = run_child("stateful_hook_sees_the_message_once");
    assert_eq!(outcome.status, Some(expected_status()), "{}", outcome.stderr);
    assert_eq!(
        outcome
            .stderr
            .matches(&format!("{HOOK_PREFIX}[memutils-test] {ALLOC_FAILURE_MESSAGE}"))
            .count(),
        1,
        "{}",
        outcome.stderr
    );
    assert_eq!(outcome.messages(), 1, "{}", outcome.stderr);
}

#[test]
fn oversized_guarded_allocate_terminates() {
    if in_child() {
        let _ = guarded_allocate(usize::MAX, None);
        unreachable!("allocation failure must terminate the process");
    }
    assert_terminated_via_stderr(&run_child("oversized_guarded_allocate_terminates"));
}

#[test]
fn oversized_guarded_reallocate_calls_hook_once() {
    if in_child() {
        let mut buf: Vec<u64> = Vec::new();
        let on_failure: FailureHook = &hook;
        guarded_reallocate(&mut buf, usize::MAX / 2, Some(on_failure));
        unreachable!("allocation failure must terminate the process");
    }
    assert_terminated_via_hook(&run_child("oversized_guarded_reallocate_calls_hook_once"));
}
