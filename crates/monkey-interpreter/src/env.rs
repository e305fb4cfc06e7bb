//! Environment arena for the Monkey interpreter.
//!
//! Closures keep their defining scope alive past the call that created it,
//! and recursive bindings make the reachability graph cyclic. Frames
//! therefore live in a single arena owned by the interpreter and values
//! refer to a frame by handle: no ownership cycle can form, and dropping
//! the interpreter reclaims every frame at once.

use std::collections::HashMap;

use crate::value::Value;

/// Handle to a frame in the arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnvId(usize);

/// One lexical scope: local bindings plus a link to the enclosing scope.
#[derive(Debug, Default)]
struct Frame {
    store: HashMap<String, Value>,
    outer: Option<EnvId>,
}

/// Arena of every environment created during a session.
#[derive(Debug, Default)]
pub struct Environments {
    frames: Vec<Frame>,
}

impl Environments {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create the root frame with no enclosing scope.
    pub fn new_global(&mut self) -> EnvId {
        self.push_frame(None)
    }

    /// Create a frame enclosed by `outer`; lookups fall through to it.
    pub fn new_enclosed(&mut self, outer: EnvId) -> EnvId {
        self.push_frame(Some(outer))
    }

    fn push_frame(&mut self, outer: Option<EnvId>) -> EnvId {
        let id = EnvId(self.frames.len());
        self.frames.push(Frame {
            store: HashMap::new(),
            outer,
        });
        id
    }

    /// Look `name` up starting at `env`, searching enclosing frames
    /// outer-ward.
    pub fn get(&self, env: EnvId, name: &str) -> Option<Value> {
        let mut current = Some(env);
        while let Some(EnvId(index)) = current {
            let frame = &self.frames[index];
            if let Some(value) = frame.store.get(name) {
                return Some(value.clone());
            }
            current = frame.outer;
        }
        None
    }

    /// Bind `name` in `env`'s own frame. Rebinding a name in the same scope
    /// overwrites it; enclosing frames are never written.
    pub fn set(&mut self, env: EnvId, name: String, value: Value) {
        self.frames[env.0].store.insert(name, value);
    }

    /// Bindings of `env`'s own frame, for the REPL `:vars` listing.
    pub fn snapshot(&self, env: EnvId) -> Vec<(String, Value)> {
        self.frames[env.0]
            .store
            .iter()
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect()
    }
}
