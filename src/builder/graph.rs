//! The build graph that receives generated modules.
//!
//! Implementation libraries go through two states:
//!
//! ```text
//! Declared(placeholder) --finish--> Finished(library id)
//! ```
//!
//! A placeholder is finished exactly once, after every interface has been
//! declared, so the versions of its imports are known.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::builder::module::{ModuleId, ModuleSpec, Placeholder};
use crate::errors::{ConfigError, ConfigResult};

/// Module-creation capability of the host build graph.
pub trait BuildGraph {
    /// Create a module that needs no second phase.
    fn create_module(&mut self, spec: ModuleSpec) -> ConfigResult<ModuleId>;

    /// Declare an implementation placeholder.
    fn declare_placeholder(&mut self, placeholder: Placeholder) -> ConfigResult<ModuleId>;

    /// Placeholders still in the declared state, in name order.
    fn pending_placeholders(&self) -> Vec<ModuleId>;

    fn placeholder(&self, id: &ModuleId) -> Option<&Placeholder>;

    /// Materialize `library` for a declared placeholder.
    fn finish(&mut self, id: &ModuleId, library: ModuleSpec) -> ConfigResult<ModuleId>;
}

/// Lifecycle of an implementation placeholder.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ImplementationState {
    Declared(Placeholder),
    Finished { library: ModuleId },
}

/// In-memory build graph.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ModuleGraph {
    modules: BTreeMap<ModuleId, ModuleSpec>,
    implementations: BTreeMap<ModuleId, ImplementationState>,
}

impl ModuleGraph {
    pub fn new() -> Self {
        Self::default()
    }

    fn check_unique(&self, id: &ModuleId) -> ConfigResult<()> {
        if self.modules.contains_key(id) || self.implementations.contains_key(id) {
            return Err(ConfigError::DuplicateModule {
                name: id.to_string(),
            });
        }
        Ok(())
    }

    pub fn module(&self, name: &str) -> Option<&ModuleSpec> {
        self.modules.get(&ModuleId(name.to_string()))
    }

    pub fn modules(&self) -> impl Iterator<Item = &ModuleSpec> {
        self.modules.values()
    }

    pub fn state(&self, name: &str) -> Option<&ImplementationState> {
        self.implementations.get(&ModuleId(name.to_string()))
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty() && self.implementations.is_empty()
    }

    /// Whether every placeholder has been finished.
    pub fn is_complete(&self) -> bool {
        self.implementations
            .values()
            .all(|state| matches!(state, ImplementationState::Finished { .. }))
    }

    /// Move every module and placeholder of `other` into this graph.
    pub fn merge(&mut self, other: ModuleGraph) -> ConfigResult<()> {
        for (id, spec) in other.modules {
            self.check_unique(&id)?;
            self.modules.insert(id, spec);
        }
        for (id, state) in other.implementations {
            self.check_unique(&id)?;
            if let ImplementationState::Declared(ref placeholder) = state {
                self.check_unique(&placeholder.library.id())?;
            }
            self.implementations.insert(id, state);
        }
        Ok(())
    }
}

impl BuildGraph for ModuleGraph {
    fn create_module(&mut self, spec: ModuleSpec) -> ConfigResult<ModuleId> {
        let id = spec.id();
        self.check_unique(&id)?;
        tracing::debug!("created module {}", id);
        self.modules.insert(id.clone(), spec);
        Ok(id)
    }

    fn declare_placeholder(&mut self, placeholder: Placeholder) -> ConfigResult<ModuleId> {
        let id = placeholder.id();
        self.check_unique(&id)?;
        self.check_unique(&placeholder.library.id())?;
        tracing::debug!("declared placeholder {}", id);
        self.implementations
            .insert(id.clone(), ImplementationState::Declared(placeholder));
        Ok(id)
    }

    fn pending_placeholders(&self) -> Vec<ModuleId> {
        self.implementations
            .iter()
            .filter(|(_, state)| matches!(state, ImplementationState::Declared(_)))
            .map(|(id, _)| id.clone())
            .collect()
    }

    fn placeholder(&self, id: &ModuleId) -> Option<&Placeholder> {
        match self.implementations.get(id) {
            Some(ImplementationState::Declared(placeholder)) => Some(placeholder),
            _ => None,
        }
    }

    fn finish(&mut self, id: &ModuleId, library: ModuleSpec) -> ConfigResult<ModuleId> {
        match self.implementations.get(id) {
            Some(ImplementationState::Declared(_)) => {}
            Some(ImplementationState::Finished { .. }) => {
                return Err(ConfigError::AlreadyFinished {
                    name: id.to_string(),
                })
            }
            None => {
                return Err(ConfigError::NotAPlaceholder {
                    name: id.to_string(),
                })
            }
        }

        let library_id = self.create_module(library)?;
        self.implementations.insert(
            id.clone(),
            ImplementationState::Finished {
                library: library_id.clone(),
            },
        );
        Ok(library_id)
    }
}
