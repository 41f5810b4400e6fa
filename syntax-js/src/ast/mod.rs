use crate::loc::Loc;
use ahash::HashMap;
use ahash::HashMapExt;
use std::fmt;

pub mod stx;

use stx::Syntax;

/// Index of a node in its `Ast` arena.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
  pub fn index(self) -> usize {
    self.0 as usize
  }
}

impl fmt::Debug for NodeId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "#{}", self.0)
  }
}

#[derive(Debug)]
pub struct Node {
  // Source range of a parsed node. A synthetic node that replaced another keeps the replaced range, so
  // its parent still knows which source text to skip.
  pub loc: Loc,
  pub stx: Syntax,
  pub parent: Option<NodeId>,
  // Created by a rewrite; printed canonically instead of copied from source.
  pub synthetic: bool,
  // Direct children were added or removed after parsing.
  pub dirty: bool,
}

/// A parsed file: the source text and an arena of nodes rooted at a `TopLevel`.
#[derive(Debug)]
pub struct Ast {
  source: String,
  nodes: Vec<Node>,
  root: NodeId,
  // Statement lists as they were parsed, captured before their first structural edit.
  original_lists: HashMap<NodeId, Vec<NodeId>>,
}

impl Ast {
  pub(crate) fn new(source: String) -> Ast {
    Ast {
      source,
      nodes: Vec::new(),
      root: NodeId(0),
      original_lists: HashMap::new(),
    }
  }

  pub fn source(&self) -> &str {
    &self.source
  }

  pub fn root(&self) -> NodeId {
    self.root
  }

  pub(crate) fn set_root(&mut self, root: NodeId) {
    self.root = root;
  }

  pub fn len(&self) -> usize {
    self.nodes.len()
  }

  pub fn is_empty(&self) -> bool {
    self.nodes.is_empty()
  }

  pub(crate) fn truncate(&mut self, len: usize) {
    self.nodes.truncate(len);
  }

  pub fn node(&self, id: NodeId) -> &Node {
    &self.nodes[id.index()]
  }

  pub fn stx(&self, id: NodeId) -> &Syntax {
    &self.nodes[id.index()].stx
  }

  pub(crate) fn stx_mut(&mut self, id: NodeId) -> &mut Syntax {
    &mut self.nodes[id.index()].stx
  }

  pub fn loc(&self, id: NodeId) -> Loc {
    self.nodes[id.index()].loc
  }

  pub fn parent(&self, id: NodeId) -> Option<NodeId> {
    self.nodes[id.index()].parent
  }

  pub fn text(&self, loc: Loc) -> &str {
    &self.source[loc.0..loc.1]
  }

  pub fn children(&self, id: NodeId) -> Vec<NodeId> {
    self.stx(id).children()
  }

  /// All nodes reachable from `id`, including itself, in source order.
  pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
    let mut out = Vec::new();
    let mut stack = vec![id];
    while let Some(next) = stack.pop() {
      out.push(next);
      stack.extend(self.children(next).into_iter().rev());
    }
    out
  }

  /// Ancestors of `id`, nearest first.
  pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
    std::iter::successors(self.parent(id), move |&n| self.parent(n))
  }

  pub(crate) fn alloc(&mut self, loc: Loc, stx: Syntax) -> NodeId {
    let id = NodeId(self.nodes.len() as u32);
    self.nodes.push(Node {
      loc,
      stx,
      parent: None,
      synthetic: false,
      dirty: false,
    });
    id
  }

  /// Creates a node that did not come from the source. Its children are re-parented to it.
  pub fn alloc_synthetic(&mut self, stx: Syntax) -> NodeId {
    let children = stx.children();
    let id = self.alloc(Loc::at(0), stx);
    self.nodes[id.index()].synthetic = true;
    for c in children {
      self.nodes[c.index()].parent = Some(id);
    }
    id
  }

  pub(crate) fn link_parents(&mut self) {
    for id in self.descendants(self.root) {
      for c in self.children(id) {
        self.nodes[c.index()].parent = Some(id);
      }
    }
  }

  /// Renames an `IdExpr`, `IdPat` or `ClassOrFuncName` in place. Identifiers always print their current name.
  pub fn rename_ident(&mut self, id: NodeId, new_name: &str) {
    match &mut self.nodes[id.index()].stx {
      Syntax::IdExpr { name } | Syntax::IdPat { name } | Syntax::ClassOrFuncName { name } => {
        *name = new_name.to_string();
      }
      _ => debug_assert!(false, "rename_ident on non-identifier node {:?}", id),
    }
  }

  /// Replaces the child `old` of `parent` with `new`. A synthetic replacement takes over the replaced range.
  pub fn replace_child(&mut self, parent: NodeId, old: NodeId, new: NodeId) -> bool {
    let old_loc = self.loc(old);
    let replaced = match self.nodes[parent.index()]
      .stx
      .child_slots_mut()
      .into_iter()
      .find(|slot| **slot == old)
    {
      Some(slot) => {
        *slot = new;
        true
      }
      None => false,
    };
    if replaced {
      let new_node = &mut self.nodes[new.index()];
      new_node.parent = Some(parent);
      if new_node.synthetic {
        new_node.loc = old_loc;
      }
      self.nodes[old.index()].parent = None;
    }
    replaced
  }

  /// Marks `id` as structurally changed, remembering its item list as parsed.
  pub fn mark_dirty(&mut self, id: NodeId) {
    let node = &self.nodes[id.index()];
    if !node.dirty && !node.synthetic {
      if let Some(list) = node.stx.item_list() {
        self.original_lists.insert(id, list.clone());
      }
    }
    self.nodes[id.index()].dirty = true;
  }

  /// The item list of a dirty node as it was parsed.
  pub fn original_list(&self, id: NodeId) -> Option<&Vec<NodeId>> {
    self.original_lists.get(&id)
  }

  /// Inserts `new` into the statement list containing `anchor`, directly after it.
  pub fn insert_after(&mut self, anchor: NodeId, new: NodeId) -> bool {
    let Some(container) = self.parent(anchor) else {
      return false;
    };
    let Some(pos) = self
      .stx(container)
      .stmt_list()
      .and_then(|list| list.iter().position(|&n| n == anchor))
    else {
      return false;
    };
    self.mark_dirty(container);
    if let Some(list) = self.nodes[container.index()].stx.stmt_list_mut() {
      list.insert(pos + 1, new);
    }
    self.nodes[new.index()].parent = Some(container);
    true
  }

  /// Removes `child` from the item list of `parent`: a statement list, the declarators of a `VarDecl`, or
  /// the properties of an `ObjPat`.
  pub fn remove_from_list(&mut self, parent: NodeId, child: NodeId) -> bool {
    let listed = self
      .stx(parent)
      .item_list()
      .is_some_and(|list| list.contains(&child));
    if !listed {
      return false;
    };
    self.mark_dirty(parent);
    if let Some(list) = self.nodes[parent.index()].stx.item_list_mut() {
      list.retain(|&n| n != child);
    }
    self.nodes[child.index()].parent = None;
    true
  }

  /// Nearest ancestor-or-self that sits directly in a statement list.
  pub fn enclosing_list_item(&self, id: NodeId) -> Option<NodeId> {
    let mut cur = id;
    loop {
      let parent = self.parent(cur)?;
      if self
        .stx(parent)
        .stmt_list()
        .is_some_and(|list| list.contains(&cur))
      {
        return Some(cur);
      }
      cur = parent;
    }
  }
}

#[cfg(test)]
mod tests {
  use super::stx::Syntax;
  use crate::parse;

  #[test]
  fn test_parents_are_linked() {
    let ast = parse("a.b(c);").unwrap();
    let root = ast.root();
    for id in ast.descendants(root) {
      for c in ast.children(id) {
        assert_eq!(ast.parent(c), Some(id));
      }
    }
    assert_eq!(ast.parent(root), None);
  }

  #[test]
  fn test_insert_and_remove_keep_original_list() {
    let mut ast = parse("a;\nb;\n").unwrap();
    let root = ast.root();
    let first = ast.children(root)[0];
    let second = ast.children(root)[1];
    let id = ast.alloc_synthetic(Syntax::IdExpr { name: "x".into() });
    let stmt = ast.alloc_synthetic(Syntax::ExprStmt { expr: id });
    assert!(ast.insert_after(first, stmt));
    assert!(ast.remove_from_list(root, second));
    assert_eq!(ast.children(root), vec![first, stmt]);
    assert_eq!(ast.original_list(root), Some(&vec![first, second]));
    assert_eq!(ast.enclosing_list_item(id), Some(stmt));
  }
}
