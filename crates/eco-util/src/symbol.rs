//! String interning for identifiers.
//!
//! A [`Symbol`] is a compact (4-byte) handle to a string stored once in a
//! global table. Identifiers (`Load` names, object keys, parameter names,
//! import/export bindings) appear many times over a program's AST; interning
//! them means comparing two identifiers is an integer comparison instead of
//! a string comparison, and the AST doesn't carry a `String` per occurrence.
//!
//! The toolchain is single-threaded end to end (spec §5), so unlike the
//! teacher's `DashMap`-backed interner this one is a plain `RefCell` behind
//! a `thread_local!` table — no lock-free concurrent map is needed, but the
//! leak-on-purpose storage strategy (`Box::leak`) is the same.

use std::cell::RefCell;
use std::fmt;

use rustc_hash::FxHashMap;

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Symbol(u32);

impl Symbol {
    pub fn intern(s: &str) -> Self {
        TABLE.with(|t| t.borrow_mut().intern(s))
    }

    pub fn as_str(&self) -> &'static str {
        TABLE.with(|t| t.borrow().get(*self))
    }

    pub fn as_u32(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.as_str())
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<&str> for Symbol {
    fn from(s: &str) -> Self {
        Symbol::intern(s)
    }
}

impl From<String> for Symbol {
    fn from(s: String) -> Self {
        Symbol::intern(&s)
    }
}

struct StringTable {
    index: FxHashMap<&'static str, u32>,
    strings: Vec<&'static str>,
}

impl StringTable {
    fn new() -> Self {
        Self { index: FxHashMap::default(), strings: Vec::new() }
    }

    fn intern(&mut self, s: &str) -> Symbol {
        if let Some(&idx) = self.index.get(s) {
            return Symbol(idx);
        }
        // Leaked once per distinct string, for the lifetime of the program
        // (thread-local table never shrinks) — no unsafe needed.
        let copied: &'static str = Box::leak(s.to_string().into_boxed_str());
        let idx = self.strings.len() as u32;
        self.strings.push(copied);
        self.index.insert(copied, idx);
        Symbol(idx)
    }

    fn get(&self, sym: Symbol) -> &'static str {
        self.strings[sym.0 as usize]
    }
}

thread_local! {
    static TABLE: RefCell<StringTable> = RefCell::new(StringTable::new());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_string_same_symbol() {
        let a = Symbol::intern("hello");
        let b = Symbol::intern("hello");
        assert_eq!(a, b);
    }

    #[test]
    fn different_strings_different_symbols() {
        let a = Symbol::intern("foo");
        let b = Symbol::intern("bar");
        assert_ne!(a, b);
    }

    #[test]
    fn round_trips_through_as_str() {
        let s = Symbol::intern("round_trip_me");
        assert_eq!(s.as_str(), "round_trip_me");
    }
}
