//! Position assignments persisted by repositories as a single batch.

use super::{OrderingError, Position};
use std::collections::HashSet;
use std::fmt::Display;
use std::hash::Hash;

/// One record's target parent and position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionAssignment<I, P> {
    /// Record identifier.
    pub id: I,
    /// Parent the record belongs to after the write.
    pub parent: P,
    /// Dense position within that parent.
    pub position: Position,
}

/// The full set of writes produced by one reorder or renumber operation.
///
/// Repositories apply a plan atomically: either every assignment is
/// persisted or none is. A plan lists the complete membership of each parent
/// it names, so applying it leaves every such parent dense.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionPlan<I, P> {
    assignments: Vec<PositionAssignment<I, P>>,
    parents: Vec<P>,
}

/// Disagreement between a plan and the records it would rewrite.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanMismatch<I> {
    /// A listed record does not exist.
    Missing(I),
    /// A listed record lives under a parent the plan does not name.
    Foreign(I),
    /// The named parents hold records the plan does not list.
    Incomplete {
        /// Records listed by the plan.
        listed: usize,
        /// Records currently held by the named parents.
        present: usize,
    },
}

impl<I, P> PositionPlan<I, P>
where
    I: Copy + Eq + Hash + Display,
    P: Copy + Eq,
{
    /// Builds the plan for a drag that may cross parents.
    ///
    /// Every item in `destination` is assigned its index and
    /// `destination_parent`. When the parents differ, every item in
    /// `resource` is additionally assigned its index and `resource_parent`;
    /// when they are equal `resource` is ignored.
    ///
    /// # Errors
    ///
    /// Returns [`OrderingError::DuplicateItem`] when an identifier occurs
    /// twice among the persisted lists, or [`OrderingError::TooManyItems`]
    /// when a list exceeds the position range.
    pub fn for_move(
        resource: &[I],
        destination: &[I],
        resource_parent: P,
        destination_parent: P,
    ) -> Result<Self, OrderingError> {
        let mut assignments = Vec::with_capacity(resource.len() + destination.len());
        push_dense(&mut assignments, destination, destination_parent)?;
        if resource_parent != destination_parent {
            push_dense(&mut assignments, resource, resource_parent)?;
        }
        let parents = if resource_parent == destination_parent {
            vec![destination_parent]
        } else {
            vec![destination_parent, resource_parent]
        };
        let plan = Self {
            assignments,
            parents,
        };
        plan.ensure_unique()?;
        Ok(plan)
    }

    /// Builds a dense renumbering of `ids` under a single parent.
    ///
    /// # Errors
    ///
    /// Returns [`OrderingError::DuplicateItem`] when an identifier occurs
    /// twice, or [`OrderingError::TooManyItems`] when the list exceeds the
    /// position range.
    pub fn renumber(parent: P, ids: &[I]) -> Result<Self, OrderingError> {
        Self::for_move(&[], ids, parent, parent)
    }

    /// Checks the plan against the records currently stored.
    ///
    /// `current_parent` reports where a listed record lives now, or `None`
    /// when it does not exist. `present` is the number of records the
    /// plan's parents hold. Repositories call this inside the same lock or
    /// transaction that applies the plan.
    ///
    /// # Errors
    ///
    /// Returns the first [`PlanMismatch`] found.
    pub fn verify<F>(&self, current_parent: F, present: usize) -> Result<(), PlanMismatch<I>>
    where
        F: Fn(I) -> Option<P>,
    {
        for assignment in &self.assignments {
            match current_parent(assignment.id) {
                None => return Err(PlanMismatch::Missing(assignment.id)),
                Some(parent) if !self.parents.contains(&parent) => {
                    return Err(PlanMismatch::Foreign(assignment.id));
                }
                Some(_) => {}
            }
        }
        if present != self.assignments.len() {
            return Err(PlanMismatch::Incomplete {
                listed: self.assignments.len(),
                present,
            });
        }
        Ok(())
    }

    fn ensure_unique(&self) -> Result<(), OrderingError> {
        let mut seen = HashSet::with_capacity(self.assignments.len());
        for assignment in &self.assignments {
            if !seen.insert(assignment.id) {
                return Err(OrderingError::DuplicateItem(assignment.id.to_string()));
            }
        }
        Ok(())
    }
}

impl<I, P> PositionPlan<I, P> {
    /// Returns the planned assignments.
    #[must_use]
    pub fn assignments(&self) -> &[PositionAssignment<I, P>] {
        &self.assignments
    }

    /// Returns `true` when the plan performs no writes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    /// Returns the number of planned writes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    /// Returns the parents whose membership the plan rewrites, destination
    /// first. A parent is named even when its list is empty.
    #[must_use]
    pub fn parents(&self) -> &[P] {
        &self.parents
    }
}

fn push_dense<I: Copy, P: Copy>(
    assignments: &mut Vec<PositionAssignment<I, P>>,
    ids: &[I],
    parent: P,
) -> Result<(), OrderingError> {
    for (index, id) in ids.iter().enumerate() {
        assignments.push(PositionAssignment {
            id: *id,
            parent,
            position: Position::from_index(index)?,
        });
    }
    Ok(())
}
