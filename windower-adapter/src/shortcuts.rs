use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::sync::Arc;

use crate::WatchTarget;

/// A modifier-qualified key, normalized for routing.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KeyCombo {
    /// Logical key name (`"ArrowDown"`, `"Enter"`, `"v"`, ...). Compared
    /// case-insensitively.
    pub key: String,
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
    pub meta: bool,
}

impl KeyCombo {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ctrl: false,
            alt: false,
            shift: false,
            meta: false,
        }
    }

    pub fn ctrl(mut self) -> Self {
        self.ctrl = true;
        self
    }

    pub fn alt(mut self) -> Self {
        self.alt = true;
        self
    }

    pub fn shift(mut self) -> Self {
        self.shift = true;
        self
    }

    pub fn meta(mut self) -> Self {
        self.meta = true;
        self
    }

    /// Canonical routing form: modifiers in fixed order, key lowercased
    /// (`"ctrl+shift+v"`).
    pub fn canonical(&self) -> String {
        let mut out = String::new();
        for (on, name) in [
            (self.ctrl, "ctrl"),
            (self.alt, "alt"),
            (self.shift, "shift"),
            (self.meta, "meta"),
        ] {
            if on {
                out.push_str(name);
                out.push('+');
            }
        }
        for c in self.key.chars() {
            out.extend(c.to_lowercase());
        }
        out
    }
}

/// A key press as reported by the embedding layer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyEvent {
    pub combo: KeyCombo,
    /// Opaque handle of the focused element, for the editable-target guard.
    pub target: WatchTarget,
}

/// Handle returned by [`ShortcutRegistry::register`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BindingId(u64);

struct Binding<C> {
    id: BindingId,
    command: C,
}

/// An injectable routing table from key combos to caller-defined commands.
///
/// Dispatch resolves a [`KeyEvent`] to the bound command value; the caller
/// then acts on it (typically by driving [`crate::Surface`] selection).
/// Returning a value instead of invoking a stored closure keeps the
/// registry free of re-entrancy concerns. Each consumer owns its own
/// registry; there is no process-wide singleton.
///
/// Registering a combo that is already bound replaces the old binding
/// (last registration wins).
pub struct ShortcutRegistry<C> {
    bindings: BTreeMap<String, Binding<C>>,
    enabled: bool,
    editable_guard: Option<Arc<dyn Fn(WatchTarget) -> bool + Send + Sync>>,
    next_id: u64,
}

impl<C> ShortcutRegistry<C> {
    pub fn new() -> Self {
        Self {
            bindings: BTreeMap::new(),
            enabled: true,
            editable_guard: None,
            next_id: 0,
        }
    }

    pub fn register(&mut self, combo: &KeyCombo, command: C) -> BindingId {
        let id = BindingId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        self.bindings
            .insert(combo.canonical(), Binding { id, command });
        id
    }

    /// Removes a binding by handle. Returns whether it was still live (a
    /// later registration on the same combo supersedes earlier handles).
    pub fn unregister(&mut self, id: BindingId) -> bool {
        let Some(canonical) = self
            .bindings
            .iter()
            .find(|(_, b)| b.id == id)
            .map(|(c, _)| c.clone())
        else {
            return false;
        };
        self.bindings.remove(&canonical);
        true
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Installs the editable-element exclusion predicate: events whose
    /// focused target the predicate flags (inputs, text areas,
    /// content-editable regions) are never dispatched.
    pub fn set_editable_guard(
        &mut self,
        guard: Option<impl Fn(WatchTarget) -> bool + Send + Sync + 'static>,
    ) {
        self.editable_guard = guard.map(|f| Arc::new(f) as _);
    }

    /// Routes an event to its bound command, if any.
    pub fn dispatch(&self, event: &KeyEvent) -> Option<&C> {
        if !self.enabled {
            return None;
        }
        if let Some(guard) = &self.editable_guard {
            if guard(event.target) {
                wtrace!("shortcut suppressed: editable target");
                return None;
            }
        }
        self.bindings
            .get(&event.combo.canonical())
            .map(|b| &b.command)
    }
}

impl<C> Default for ShortcutRegistry<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: core::fmt::Debug> core::fmt::Debug for ShortcutRegistry<C> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ShortcutRegistry")
            .field("bindings", &self.bindings.len())
            .field("enabled", &self.enabled)
            .finish_non_exhaustive()
    }
}
