//! attrs.rs — Table des attributs synthétisés (un fragment de C par nœud).
//!
//! Indexée par `NodeId` : une case optionnelle par nœud de l’arène, créée
//! fraîche pour chaque passe. Une case n’est écrite qu’une fois.

use throbac_ast::{NodeId, Tree};

use crate::error::{Result, TranslateError};

#[derive(Debug, Clone, Default)]
pub struct Attributes {
    slots: Vec<Option<String>>,
}

impl Attributes {
    /// Table vide dimensionnée pour `tree`.
    pub fn for_tree(tree: &Tree) -> Self {
        Self { slots: vec![None; tree.len()] }
    }

    /// Fragment du nœud, s’il a été produit.
    pub fn get(&self, id: NodeId) -> Option<&str> {
        self.slots.get(id.index()).and_then(|s| s.as_deref())
    }

    /// Écrit le fragment de `id` ; une seconde écriture est une erreur.
    pub fn set(&mut self, id: NodeId, kind: &'static str, fragment: String) -> Result<()> {
        if id.index() >= self.slots.len() {
            self.slots.resize(id.index() + 1, None);
        }
        let slot = &mut self.slots[id.index()];
        if slot.is_some() {
            return Err(TranslateError::DuplicateFragment { node: id, kind });
        }
        *slot = Some(fragment);
        Ok(())
    }

    /// Nombre de nœuds ayant reçu un fragment.
    pub fn filled(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }
}
