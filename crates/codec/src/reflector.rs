//! Schema reflector
//!
//! Turns a [`Shape`] into a [`FieldPlan`] with a depth-first walk over the
//! declared fields:
//!
//! - A named nested record contributes its (possibly renamed) name plus `.`
//!   to the property names of its leaves
//! - An embedded record contributes nothing; its leaves surface as if they
//!   were declared on the parent. An embedded record with a rename directive
//!   is treated as named nesting under that name
//! - `noindex` on a record field applies to every leaf below it
//! - Aliases on a record field apply to the prefix, so every leaf below it is
//!   also reachable under the legacy prefix
//!
//! After the walk every property name and alias must be unique. Any failure
//! aborts plan construction; a plan is never built partially.

use std::any::TypeId;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use strata_core::{Limits, ValueKind};
use tracing::debug;

use crate::error::PlanError;
use crate::field::TypeClass;
use crate::plan::{FieldPlan, LeafDescriptor, Multiplicity};
use crate::shape::{Directive, FieldDecl, FieldType, Shape, ShapeRef};

/// Build the field plan for `shape`
///
/// # Errors
///
/// Returns a [`PlanError`] for unsupported field types, colliding names,
/// recursive or too deeply nested shapes, and invalid directives.
pub fn reflect(shape: &Shape, limits: &Limits) -> Result<FieldPlan, PlanError> {
    let mut walker = Walker {
        root: shape.name(),
        limits,
        leaves: Vec::new(),
        location: Vec::new(),
        stack: vec![shape.type_id()],
    };
    walker.walk(shape, &Scope::root())?;
    let lookup = index_names(shape.name(), &walker.leaves)?;

    debug!(
        shape = shape.name(),
        leaves = walker.leaves.len(),
        "Built field plan"
    );
    Ok(FieldPlan::new(
        shape.name(),
        shape.type_id(),
        walker.leaves,
        lookup,
    ))
}

/// Naming context of the record currently being walked
struct Scope {
    // Dotted declared-name path, with trailing '.'
    path: String,
    // Wire prefixes, canonical first, then legacy prefixes from aliases
    prefixes: Vec<String>,
    noindex: bool,
    depth: usize,
}

impl Scope {
    fn root() -> Self {
        Scope {
            path: String::new(),
            prefixes: vec![String::new()],
            noindex: false,
            depth: 0,
        }
    }

    /// Every `prefix + candidate + suffix` combination, canonical first
    fn expand(&self, own: &str, aliases: &[&'static str], suffix: &str) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        for prefix in &self.prefixes {
            for candidate in std::iter::once(own).chain(aliases.iter().copied()) {
                let name = format!("{}{}{}", prefix, candidate, suffix);
                if !names.contains(&name) {
                    names.push(name);
                }
            }
        }
        names
    }
}

/// Directives of one field, resolved
#[derive(Default)]
struct Resolved {
    rename: Option<&'static str>,
    noindex: bool,
    aliases: Vec<&'static str>,
    auto_now: bool,
    skip: bool,
}

struct Walker<'a> {
    root: &'static str,
    limits: &'a Limits,
    leaves: Vec<LeafDescriptor>,
    location: Vec<usize>,
    // Record types on the current path, for cycle detection
    stack: Vec<TypeId>,
}

impl Walker<'_> {
    fn walk(&mut self, shape: &Shape, scope: &Scope) -> Result<(), PlanError> {
        for (index, decl) in shape.fields().iter().enumerate() {
            let path = format!("{}{}", scope.path, decl.name());
            let resolved = self.resolve(decl, &path)?;
            if resolved.skip {
                continue;
            }

            self.location.push(index);
            match decl.ty() {
                FieldType::Leaf(class) => self.leaf(decl, *class, path, &resolved, scope)?,
                FieldType::Record(nested) => self.nested(decl, nested, path, &resolved, scope)?,
            }
            self.location.pop();
        }
        Ok(())
    }

    fn resolve(&self, decl: &FieldDecl, path: &str) -> Result<Resolved, PlanError> {
        let mut resolved = Resolved::default();
        for directive in decl.directives() {
            match directive {
                Directive::Rename(name) => {
                    if resolved.rename.is_some() {
                        return Err(self.invalid(path, "more than one rename"));
                    }
                    resolved.rename = Some(*name);
                }
                Directive::NoIndex => resolved.noindex = true,
                Directive::AliasOf(name) => {
                    if !resolved.aliases.contains(name) {
                        resolved.aliases.push(*name);
                    }
                }
                Directive::AutoNow => resolved.auto_now = true,
                Directive::Skip => resolved.skip = true,
                Directive::Unknown(option) => {
                    return Err(self.invalid(path, format!("unknown option \"{}\"", option)));
                }
            }
        }
        Ok(resolved)
    }

    fn leaf(
        &mut self,
        decl: &FieldDecl,
        class: TypeClass,
        path: String,
        resolved: &Resolved,
        scope: &Scope,
    ) -> Result<(), PlanError> {
        let (kind, multiplicity) = match class {
            TypeClass::Scalar(kind) => (kind, Multiplicity::Scalar),
            TypeClass::Sequence(kind) => (kind, Multiplicity::Sequence),
            TypeClass::Unsupported(type_name) => {
                return Err(PlanError::UnsupportedFieldType {
                    shape: self.root.to_string(),
                    field: path,
                    type_name,
                });
            }
        };

        if resolved.auto_now
            && (kind != ValueKind::Timestamp || multiplicity != Multiplicity::Scalar)
        {
            return Err(self.invalid(&path, "auto_now requires a single timestamp field"));
        }

        let own = resolved.rename.unwrap_or(decl.name());
        let mut names = scope.expand(own, &resolved.aliases, "").into_iter();
        let name = names.next().unwrap_or_default();
        let aliases: Vec<String> = names.collect();

        for candidate in std::iter::once(&name).chain(aliases.iter()) {
            self.limits
                .validate_name(candidate)
                .map_err(|source| PlanError::InvalidName {
                    shape: self.root.to_string(),
                    field: path.clone(),
                    source,
                })?;
        }

        self.leaves.push(LeafDescriptor {
            path,
            name,
            location: self.location.clone(),
            kind,
            multiplicity,
            indexed: !(resolved.noindex || scope.noindex) && kind.is_indexable(),
            aliases,
            auto_now: resolved.auto_now,
        });
        Ok(())
    }

    fn nested(
        &mut self,
        decl: &FieldDecl,
        nested: &ShapeRef,
        path: String,
        resolved: &Resolved,
        scope: &Scope,
    ) -> Result<(), PlanError> {
        let child = nested.shape();
        if self.stack.contains(&nested.type_id()) {
            return Err(PlanError::RecursiveShape {
                shape: self.root.to_string(),
                field: path,
                nested: child.name().to_string(),
            });
        }
        if scope.depth + 1 > self.limits.max_nesting_depth {
            return Err(PlanError::NestingTooDeep {
                shape: self.root.to_string(),
                field: path,
                max: self.limits.max_nesting_depth,
            });
        }
        if resolved.auto_now {
            return Err(self.invalid(&path, "auto_now requires a single timestamp field"));
        }

        let child_scope = if decl.is_embedded() && resolved.rename.is_none() {
            if !resolved.aliases.is_empty() {
                return Err(self.invalid(&path, "an embedded record has no name to alias"));
            }
            Scope {
                path: scope.path.clone(),
                prefixes: scope.prefixes.clone(),
                noindex: scope.noindex || resolved.noindex,
                depth: scope.depth + 1,
            }
        } else {
            let own = resolved.rename.unwrap_or(decl.name());
            Scope {
                path: format!("{}.", path),
                prefixes: scope.expand(own, &resolved.aliases, "."),
                noindex: scope.noindex || resolved.noindex,
                depth: scope.depth + 1,
            }
        };

        self.stack.push(nested.type_id());
        self.walk(&child, &child_scope)?;
        self.stack.pop();
        Ok(())
    }

    fn invalid(&self, path: &str, reason: impl Into<String>) -> PlanError {
        PlanError::InvalidDirective {
            shape: self.root.to_string(),
            field: path.to_string(),
            reason: reason.into(),
        }
    }
}

/// Map every property name and alias to its leaf, rejecting collisions
fn index_names(
    shape: &'static str,
    leaves: &[LeafDescriptor],
) -> Result<HashMap<String, usize>, PlanError> {
    let mut lookup: HashMap<String, usize> = HashMap::with_capacity(leaves.len());
    for (i, leaf) in leaves.iter().enumerate() {
        for name in std::iter::once(&leaf.name).chain(leaf.aliases.iter()) {
            match lookup.entry(name.clone()) {
                Entry::Occupied(existing) => {
                    return Err(PlanError::DuplicateName {
                        shape: shape.to_string(),
                        name: name.clone(),
                        first: leaves[*existing.get()].path.clone(),
                        second: leaf.path.clone(),
                    });
                }
                Entry::Vacant(slot) => {
                    slot.insert(i);
                }
            }
        }
    }
    Ok(lookup)
}
