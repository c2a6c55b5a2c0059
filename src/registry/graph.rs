//! Reference graph over pattern definitions.
//!
//! Nodes are pattern names, edges are the `%{SYNTAX...}` references found in
//! each body. The walk is an iterative depth-first search with an explicit
//! path so that a cycle is reported exactly as it occurs (`A -> B -> A`).

use super::PatternRegistry;
use crate::error::{GrokError, Result};
use crate::expand::tokens;
use std::collections::HashSet;

/// Names referenced by `body`, in order of appearance, duplicates removed.
pub fn references(body: &str) -> Vec<&str> {
    let mut seen = HashSet::new();
    tokens(body)
        .map(|(_, token)| token.syntax)
        .filter(|syntax| seen.insert(*syntax))
        .collect()
}

/// Walk every definition reachable from `roots` and report the first
/// unknown reference or cycle.
pub(crate) fn check<'a, I>(registry: &PatternRegistry, roots: I) -> Result<()>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut done = HashSet::new();
    for root in roots {
        visit(registry, root, &mut done)?;
    }
    Ok(())
}

fn visit<'r>(
    registry: &'r PatternRegistry,
    root: &'r str,
    done: &mut HashSet<&'r str>,
) -> Result<()> {
    if done.contains(root) {
        return Ok(());
    }

    // Current path with the references still to visit at each step
    let mut path = vec![(root, edges(registry, root)?)];
    while let Some((name, pending)) = path.last_mut() {
        let Some(next) = pending.next() else {
            done.insert(*name);
            path.pop();
            continue;
        };
        if done.contains(next) {
            continue;
        }

        if let Some(start) = path.iter().position(|(n, _)| *n == next) {
            let mut cycle: Vec<String> =
                path[start..].iter().map(|(n, _)| n.to_string()).collect();
            cycle.push(next.to_string());
            return Err(GrokError::CyclicPattern(cycle));
        }

        let pending = edges(registry, next)?;
        path.push((next, pending));
    }
    Ok(())
}

fn edges<'r>(registry: &'r PatternRegistry, name: &str) -> Result<std::vec::IntoIter<&'r str>> {
    let body = registry
        .lookup(name)
        .ok_or_else(|| GrokError::UnknownPattern(name.to_string()))?;
    Ok(references(body).into_iter())
}
