//! walk.rs — Parcours en profondeur, enfants avant parent.
//!
//! Chaque nœud est « quitté » exactement une fois, après tous ses enfants,
//! frères visités de gauche à droite (ordre de la source).

use crate::tree::{NodeId, Tree};

/// Reçoit un appel par nœud, au moment où on le quitte.
pub trait Listener {
    type Error;

    fn exit(&mut self, tree: &Tree, id: NodeId) -> Result<(), Self::Error>;
}

/// Parcourt l’arbre depuis sa racine. Un arbre sans racine ne produit aucun appel.
pub fn walk<L: Listener>(tree: &Tree, listener: &mut L) -> Result<(), L::Error> {
    match tree.root() {
        Some(root) => walk_from(tree, root, listener),
        None => Ok(()),
    }
}

/// Parcours post-ordre à partir de `start` (pile explicite : pas de récursion).
pub fn walk_from<L: Listener>(tree: &Tree, start: NodeId, listener: &mut L) -> Result<(), L::Error> {
    // (nœud, enfants déjà empilés ?)
    let mut stack = vec![(start, false)];
    while let Some((id, expanded)) = stack.pop() {
        if expanded {
            listener.exit(tree, id)?;
            continue;
        }
        stack.push((id, true));
        for child in tree.kind(id).children().into_iter().rev() {
            stack.push((child, false));
        }
    }
    Ok(())
}
