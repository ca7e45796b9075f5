// Platkit - core/strings.rs
//
// String comparison and duplication helpers, plus `StringSlot`: a nullable
// string handle that releases its old allocation before taking a new one.
//
// Duplicates live in checked `HeapBuffer`s so exhaustion goes through the
// fatal path like every other allocation.

use crate::platform::diagnostics::Diagnostics;
use crate::platform::memory::HeapBuffer;

/// True when `s` is missing or has no bytes.
pub fn is_empty(s: Option<&str>) -> bool {
    s.map_or(true, str::is_empty)
}

/// Exact, case-sensitive equality.
pub fn equal(a: &str, b: &str) -> bool {
    a == b
}

/// ASCII case-insensitive equality. Bytes are folded one at a time and the
/// comparison stops at the first mismatch.
pub fn case_equal(a: &str, b: &str) -> bool {
    a.len() == b.len()
        && a
            .bytes()
            .zip(b.bytes())
            .all(|(x, y)| x.to_ascii_lowercase() == y.to_ascii_lowercase())
}

/// A string copied into its own heap allocation.
///
/// The buffer holds the bytes plus a trailing NUL, so even the empty string
/// owns a positive-size allocation.
#[derive(Debug)]
pub struct HeapString {
    buffer: HeapBuffer,
}

impl HeapString {
    pub fn as_str(&self) -> &str {
        let bytes = &self.buffer.as_slice()[..self.len()];
        // SAFETY: the bytes were copied verbatim from a `&str` in `duplicate`
        // and the buffer is never exposed mutably afterwards.
        unsafe { std::str::from_utf8_unchecked(bytes) }
    }

    pub fn len(&self) -> usize {
        self.buffer.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Address of the first byte, for identity checks.
    pub fn as_ptr(&self) -> *const u8 {
        self.buffer.as_slice().as_ptr()
    }

    pub fn release(self) {
        self.buffer.release();
    }
}

impl std::ops::Deref for HeapString {
    type Target = str;

    fn deref(&self) -> &str {
        self.as_str()
    }
}

impl std::fmt::Display for HeapString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Copy `s` into a fresh allocation owned by the caller.
pub fn duplicate(s: &str, diag: &Diagnostics) -> HeapString {
    let mut buffer = HeapBuffer::allocate(s.len() + 1, diag);
    buffer.as_mut_slice()[..s.len()].copy_from_slice(s.as_bytes());
    HeapString { buffer }
}

/// Nullable, exclusively-owned string.
#[derive(Debug, Default)]
pub struct StringSlot {
    value: Option<HeapString>,
}

impl StringSlot {
    /// An empty slot.
    pub fn new() -> Self {
        Self { value: None }
    }

    /// Release the current value, if any.
    pub fn clear(&mut self) {
        if let Some(old) = self.value.take() {
            old.release();
        }
    }

    /// Release the current value, then store a copy of `value`.
    pub fn set(&mut self, value: &str, diag: &Diagnostics) {
        self.clear();
        self.value = Some(duplicate(value, diag));
    }

    pub fn get(&self) -> Option<&str> {
        self.value.as_ref().map(HeapString::as_str)
    }

    pub fn is_empty(&self) -> bool {
        is_empty(self.get())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::diagnostics::test_support::test_diagnostics;
    use crate::platform::memory::live_allocations;

    #[test]
    fn test_is_empty_accepts_none() {
        assert!(is_empty(None));
        assert!(is_empty(Some("")));
        assert!(!is_empty(Some(" ")));
    }

    #[test]
    fn test_case_equal_vs_equal() {
        let pairs = [("Hash", "hASH"), ("BookFile", "bookfile"), ("x", "X")];
        for (a, b) in pairs {
            assert!(case_equal(a, b), "{a} vs {b}");
            assert!(!equal(a, b), "{a} vs {b}");
        }
        assert!(equal("same", "same"));
        assert!(case_equal("same", "same"));
    }

    #[test]
    fn test_case_equal_requires_same_length() {
        assert!(!case_equal("abc", "ABCD"));
        assert!(!case_equal("", "a"));
        assert!(case_equal("", ""));
    }

    #[test]
    fn test_case_equal_only_folds_ascii() {
        assert!(!case_equal("é", "É"));
        assert!(case_equal("é", "é"));
    }

    #[test]
    fn test_duplicate_is_equal_but_distinct() {
        let (diag, _) = test_diagnostics();
        let original = String::from("engine.ini");
        let copy = duplicate(&original, &diag);
        assert!(equal(&copy, &original));
        assert_ne!(copy.as_ptr(), original.as_ptr());

        let second = duplicate(&copy, &diag);
        assert_ne!(second.as_ptr(), copy.as_ptr());
        assert_eq!(second.to_string(), "engine.ini");
    }

    #[test]
    fn test_duplicate_empty_string() {
        let (diag, _) = test_diagnostics();
        let copy = duplicate("", &diag);
        assert!(copy.is_empty());
        assert_eq!(copy.as_str(), "");
    }

    #[test]
    fn test_slot_set_releases_previous() {
        let (diag, _) = test_diagnostics();
        let before = live_allocations();

        let mut slot = StringSlot::new();
        assert!(slot.is_empty());
        slot.set("x", &diag);
        slot.set("y", &diag);
        assert_eq!(slot.get(), Some("y"));
        assert_eq!(live_allocations(), before + 1);

        slot.clear();
        assert_eq!(slot.get(), None);
        assert_eq!(live_allocations(), before);

        slot.clear();
        assert_eq!(live_allocations(), before);
    }

    #[test]
    fn test_slot_set_empty_string_is_not_none() {
        let (diag, _) = test_diagnostics();
        let mut slot = StringSlot::new();
        slot.set("", &diag);
        assert_eq!(slot.get(), Some(""));
        assert!(slot.is_empty());
    }
}
